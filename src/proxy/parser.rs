//! Proxy parser module for reading catalog text

use crate::proxy::models::ProxyEntry;
use crate::Result;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Matches `scheme://address:port` lines so the scheme can be dropped
static SCHEME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?i:https?|socks[45])://([^/]+?)/?$").expect("scheme regex is valid")
});

/// Proxy parser for reading catalog entries from strings and files
pub struct ProxyParser;

impl ProxyParser {
    /// Parse a single catalog line
    ///
    /// Empty lines and `#` comments yield `None`. A leading
    /// `http://`, `https://`, `socks4://` or `socks5://` scheme is stripped,
    /// anything else is kept verbatim.
    pub fn parse_line(line: &str) -> Option<ProxyEntry> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return None;
        }

        if let Some(caps) = SCHEME_RE.captures(line) {
            return Some(ProxyEntry::new(&caps[1]));
        }

        Some(ProxyEntry::new(line))
    }

    /// Parse entries from a string (multiple lines), keeping their order
    pub fn parse_string(content: &str) -> Vec<ProxyEntry> {
        content.lines().filter_map(Self::parse_line).collect()
    }

    /// Parse entries from a file
    pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Vec<ProxyEntry>> {
        let content = fs::read_to_string(path)?;
        Ok(Self::parse_string(&content))
    }

    /// Newline-joined text form of a list of entries
    pub fn to_text(entries: &[ProxyEntry]) -> String {
        entries
            .iter()
            .map(ProxyEntry::as_str)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_format() {
        let entry = ProxyParser::parse_line("192.168.1.1:1080").unwrap();
        assert_eq!(entry.as_str(), "192.168.1.1:1080");
    }

    #[test]
    fn test_parse_trims_whitespace() {
        let entry = ProxyParser::parse_line("   10.0.0.1:9050\t").unwrap();
        assert_eq!(entry.as_str(), "10.0.0.1:9050");
    }

    #[test]
    fn test_parse_url_format_socks5() {
        let entry = ProxyParser::parse_line("socks5://192.168.1.1:1080").unwrap();
        assert_eq!(entry.as_str(), "192.168.1.1:1080");
    }

    #[test]
    fn test_parse_url_format_trailing_slash() {
        let entry = ProxyParser::parse_line("HTTP://192.168.1.3:8080/").unwrap();
        assert_eq!(entry.as_str(), "192.168.1.3:8080");
    }

    #[test]
    fn test_parse_empty_line() {
        assert!(ProxyParser::parse_line("").is_none());
        assert!(ProxyParser::parse_line("   ").is_none());
    }

    #[test]
    fn test_parse_comment_line() {
        assert!(ProxyParser::parse_line("# This is a comment").is_none());
    }

    #[test]
    fn test_parse_keeps_unvalidated_lines() {
        let entry = ProxyParser::parse_line("not-a-proxy").unwrap();
        assert_eq!(entry.as_str(), "not-a-proxy");
    }

    #[test]
    fn test_parse_string_keeps_order_and_duplicates() {
        let content = r#"
5.6.7.8:1080
# comment
1.2.3.4:1080
socks5://5.6.7.8:1080
"#;
        let entries = ProxyParser::parse_string(content);
        let raw: Vec<_> = entries.iter().map(ProxyEntry::as_str).collect();
        assert_eq!(raw, vec!["5.6.7.8:1080", "1.2.3.4:1080", "5.6.7.8:1080"]);
    }

    #[test]
    fn test_to_text() {
        let entries = vec![ProxyEntry::new("1.2.3.4:1080"), ProxyEntry::new("9.9.9.9:443")];
        assert_eq!(ProxyParser::to_text(&entries), "1.2.3.4:1080\n9.9.9.9:443");
        assert_eq!(ProxyParser::to_text(&[]), "");
    }

    #[test]
    fn test_parse_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("list.txt");
        fs::write(&path, "1.2.3.4:1080\n\nsocks4://9.9.9.9:4145\n").unwrap();

        let entries = ProxyParser::parse_file(&path).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].as_str(), "9.9.9.9:4145");
    }
}
