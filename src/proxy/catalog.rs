//! The read-only proxy catalog

use crate::proxy::models::ProxyEntry;
use crate::proxy::parser::ProxyParser;
use crate::Result;
use std::path::Path;
use tracing::debug;

/// Catalog shipped with the binary
const EMBEDDED_CATALOG: &str = include_str!("../../data/socks5.txt");

/// Ordered, immutable collection of proxy entries for a session
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProxyCatalog {
    entries: Vec<ProxyEntry>,
}

impl ProxyCatalog {
    pub fn new(entries: Vec<ProxyEntry>) -> Self {
        Self { entries }
    }

    /// Catalog compiled into the binary
    pub fn embedded() -> Self {
        Self::new(ProxyParser::parse_string(EMBEDDED_CATALOG))
    }

    /// Load a catalog from a text file, one entry per line
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let entries = ProxyParser::parse_file(path.as_ref())?;
        debug!(path = ?path.as_ref(), count = entries.len(), "loaded catalog");
        Ok(Self::new(entries))
    }

    pub fn entries(&self) -> &[ProxyEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries matching `term`, in catalog order.
    ///
    /// Blank terms select everything; otherwise the match is a
    /// case-insensitive substring test on the full `address:port` string.
    pub fn filter(&self, term: &str) -> Vec<&ProxyEntry> {
        if term.trim().is_empty() {
            return self.entries.iter().collect();
        }

        let needle = term.to_lowercase();
        self.entries.iter().filter(|e| e.matches(&needle)).collect()
    }

    /// Full catalog as newline-joined text, ignoring any filter
    pub fn to_text(&self) -> String {
        ProxyParser::to_text(&self.entries)
    }
}

impl<S: Into<String>> FromIterator<S> for ProxyCatalog {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(|s| ProxyEntry::new(s)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ProxyCatalog {
        ["1.2.3.4:1080", "5.6.7.8:1080", "9.9.9.9:443"]
            .into_iter()
            .collect()
    }

    #[test]
    fn test_embedded_catalog_is_populated() {
        let catalog = ProxyCatalog::embedded();
        assert!(!catalog.is_empty());
        assert!(catalog.entries().iter().all(|e| !e.port().is_empty()));
    }

    #[test]
    fn test_filter_empty_term_returns_all() {
        let catalog = sample();
        assert_eq!(catalog.filter("").len(), 3);
        assert_eq!(catalog.filter("   ").len(), 3);
    }

    #[test]
    fn test_filter_by_port() {
        let catalog = sample();
        let hits = catalog.filter("443");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].as_str(), "9.9.9.9:443");
    }

    #[test]
    fn test_filter_keeps_catalog_order() {
        let catalog = sample();
        let hits: Vec<_> = catalog.filter("1080").iter().map(|e| e.as_str()).collect();
        assert_eq!(hits, vec!["1.2.3.4:1080", "5.6.7.8:1080"]);
    }

    #[test]
    fn test_filter_is_case_insensitive() {
        let catalog: ProxyCatalog = ["Gateway.Local:1080", "other:9050"].into_iter().collect();
        assert_eq!(catalog.filter("GATEWAY").len(), 1);
        assert_eq!(catalog.filter("gateway.local:10").len(), 1);
    }

    #[test]
    fn test_filter_results_contain_term() {
        let catalog = ProxyCatalog::embedded();
        for term in ["1080", "192.0", ".1", "zzz", "203.0.113"] {
            let hits = catalog.filter(term);
            assert!(hits.len() <= catalog.len());
            assert!(hits.iter().all(|e| e.as_str().to_lowercase().contains(term)));
        }
    }

    #[test]
    fn test_to_text_ignores_filter() {
        let catalog = sample();
        assert_eq!(catalog.to_text(), "1.2.3.4:1080\n5.6.7.8:1080\n9.9.9.9:443");
    }
}
