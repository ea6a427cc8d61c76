//! Proxy data models

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single proxy endpoint in `address:port` form.
///
/// The string is kept exactly as it appeared in the catalog; the only
/// structure ever read out of it is the split on the first colon used for
/// display.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProxyEntry(String);

impl ProxyEntry {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Full `address:port` string
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Address part (everything before the first colon)
    pub fn address(&self) -> &str {
        self.split().0
    }

    /// Port part (everything after the first colon, empty if there is none)
    pub fn port(&self) -> &str {
        self.split().1
    }

    fn split(&self) -> (&str, &str) {
        self.0.split_once(':').unwrap_or((self.0.as_str(), ""))
    }

    /// Case-insensitive substring match against the full string.
    ///
    /// `needle` must already be lowercased.
    pub fn matches(&self, needle: &str) -> bool {
        self.0.to_lowercase().contains(needle)
    }
}

impl fmt::Display for ProxyEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProxyEntry {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<String> for ProxyEntry {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

impl AsRef<str> for ProxyEntry {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_split() {
        let entry = ProxyEntry::new("192.0.2.10:1080");
        assert_eq!(entry.address(), "192.0.2.10");
        assert_eq!(entry.port(), "1080");
        assert_eq!(entry.to_string(), "192.0.2.10:1080");
    }

    #[test]
    fn test_entry_without_port() {
        let entry = ProxyEntry::new("localhost");
        assert_eq!(entry.address(), "localhost");
        assert_eq!(entry.port(), "");
    }

    #[test]
    fn test_entry_splits_on_first_colon_only() {
        let entry = ProxyEntry::new("host:1080:extra");
        assert_eq!(entry.address(), "host");
        assert_eq!(entry.port(), "1080:extra");
    }

    #[test]
    fn test_entry_matches_case_insensitive() {
        let entry = ProxyEntry::new("Proxy.Example:1080");
        assert!(entry.matches("proxy.ex"));
        assert!(entry.matches("e:10"));
        assert!(!entry.matches("443"));
    }

    #[test]
    fn test_entry_serializes_as_plain_string() {
        let entry = ProxyEntry::new("198.51.100.7:443");
        let json = serde_json::to_string(&entry).unwrap();
        assert_eq!(json, "\"198.51.100.7:443\"");
    }
}
