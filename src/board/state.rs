//! Transient view state: page, page size, search term and view mode

use crate::Result;
use anyhow::anyhow;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How the proxy region lays out its entries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Grid,
    List,
}

impl ViewMode {
    pub const ALL: [ViewMode; 2] = [ViewMode::Grid, ViewMode::List];
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewMode::Grid => write!(f, "grid"),
            ViewMode::List => write!(f, "list"),
        }
    }
}

impl FromStr for ViewMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "grid" => Ok(ViewMode::Grid),
            "list" => Ok(ViewMode::List),
            _ => Err(anyhow!("Invalid view mode: {}. Use: grid, list", s)),
        }
    }
}

/// Number of entries per page; always positive
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct PageSize(usize);

impl PageSize {
    /// Sizes offered by the page-size selector
    pub const ALLOWED: [usize; 4] = [10, 20, 50, 100];

    /// Size chosen from the selector; anything outside `ALLOWED` is rejected
    pub fn choice(n: usize) -> Result<Self> {
        if Self::ALLOWED.contains(&n) {
            Ok(Self(n))
        } else {
            Err(anyhow!(
                "Invalid page size: {}. Use one of: {:?}",
                n,
                Self::ALLOWED
            ))
        }
    }

    pub fn get(self) -> usize {
        self.0
    }

    /// Next larger selector size, if any
    pub fn larger(self) -> Option<Self> {
        Self::ALLOWED.iter().copied().find(|&n| n > self.0).map(Self)
    }

    /// Next smaller selector size, if any
    pub fn smaller(self) -> Option<Self> {
        Self::ALLOWED.iter().rev().copied().find(|&n| n < self.0).map(Self)
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self(20)
    }
}

impl TryFrom<usize> for PageSize {
    type Error = anyhow::Error;

    fn try_from(n: usize) -> Result<Self> {
        if n == 0 {
            return Err(anyhow!("Page size must be greater than zero"));
        }
        Ok(Self(n))
    }
}

impl From<PageSize> for usize {
    fn from(size: PageSize) -> usize {
        size.0
    }
}

impl FromStr for PageSize {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let n: usize = s
            .trim()
            .parse()
            .map_err(|_| anyhow!("Invalid page size: {}", s))?;
        Self::choice(n)
    }
}

impl fmt::Display for PageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Everything the board remembers between user actions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    /// Current page, 1-based
    pub page: usize,
    pub page_size: PageSize,
    pub search_term: String,
    pub view_mode: ViewMode,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: PageSize::default(),
            search_term: String::new(),
            view_mode: ViewMode::default(),
        }
    }
}

impl ViewState {
    pub fn new(page_size: PageSize, view_mode: ViewMode) -> Self {
        Self {
            page_size,
            view_mode,
            ..Self::default()
        }
    }
}

/// `ceil(filtered / page_size)`, zero when nothing matches
pub fn total_pages(filtered: usize, page_size: PageSize) -> usize {
    filtered.div_ceil(page_size.get())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let state = ViewState::default();
        assert_eq!(state.page, 1);
        assert_eq!(state.page_size.get(), 20);
        assert!(state.search_term.is_empty());
        assert_eq!(state.view_mode, ViewMode::Grid);
    }

    #[test]
    fn test_page_size_rejects_unlisted_values() {
        assert!(PageSize::try_from(0).is_err());
        assert_eq!(PageSize::try_from(2).unwrap().get(), 2);
        assert!(PageSize::choice(25).is_err());
        assert_eq!(PageSize::choice(50).unwrap().get(), 50);
        assert!("abc".parse::<PageSize>().is_err());
        assert_eq!("100".parse::<PageSize>().unwrap().get(), 100);
    }

    #[test]
    fn test_page_size_stepping() {
        let size = PageSize::default();
        assert_eq!(size.larger().map(PageSize::get), Some(50));
        assert_eq!(size.smaller().map(PageSize::get), Some(10));
        assert!(PageSize::choice(100).unwrap().larger().is_none());
        assert!(PageSize::choice(10).unwrap().smaller().is_none());
        // Off-selector sizes step onto the nearest choice
        assert_eq!(PageSize::try_from(2).unwrap().larger().map(PageSize::get), Some(10));
    }

    #[test]
    fn test_total_pages() {
        let size = PageSize::choice(10).unwrap();
        assert_eq!(total_pages(0, size), 0);
        assert_eq!(total_pages(1, size), 1);
        assert_eq!(total_pages(10, size), 1);
        assert_eq!(total_pages(11, size), 2);
    }

    #[test]
    fn test_view_mode_parse() {
        assert_eq!("GRID".parse::<ViewMode>().unwrap(), ViewMode::Grid);
        assert_eq!("list".parse::<ViewMode>().unwrap(), ViewMode::List);
        assert!("table".parse::<ViewMode>().is_err());
    }
}
