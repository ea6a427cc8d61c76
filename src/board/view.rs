//! View interface the controller renders into
//!
//! A front end implements only the regions it actually has; every method
//! defaults to a no-op so a missing region is silently skipped.

use crate::board::state::ViewMode;
use crate::proxy::ProxyEntry;
use chrono::NaiveTime;
use serde::Serialize;
use std::fmt::{self, Write as _};

/// Counters shown next to the list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Stats {
    pub total_count: usize,
    pub filtered_count: usize,
    pub current_page: usize,
    pub total_pages: usize,
}

impl Stats {
    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.total_pages > 0 && self.current_page < self.total_pages
    }
}

/// One rendered page: the visible window plus statistics
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page {
    pub items: Vec<ProxyEntry>,
    pub stats: Stats,
}

/// Blocking, user-facing message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Info(String),
    Error(String),
}

impl Notice {
    pub fn info(msg: impl Into<String>) -> Self {
        Notice::Info(msg.into())
    }

    pub fn error(msg: impl Into<String>) -> Self {
        Notice::Error(msg.into())
    }

    pub fn message(&self) -> &str {
        match self {
            Notice::Info(msg) | Notice::Error(msg) => msg,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Notice::Error(_))
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Rendering surface driven by the list controller
pub trait View {
    /// Replace the proxy region with `items`, laid out according to `mode`
    fn render_list(&mut self, _items: &[ProxyEntry], _mode: ViewMode) {}

    fn render_stats(&mut self, _stats: &Stats) {}

    /// Wall-clock time of the last re-render
    fn render_updated_at(&mut self, _time: NaiveTime) {}

    fn set_pagination_enabled(&mut self, _prev: bool, _next: bool) {}

    /// Mark the selector for `mode` active and every other one inactive
    fn set_active_view_mode(&mut self, _mode: ViewMode) {}

    /// Disable (busy) or restore the refresh control
    fn set_refresh_busy(&mut self, _busy: bool) {}

    fn notify(&mut self, _notice: Notice) {}
}

/// Headless view that renders into plain text, used by the CLI
#[derive(Debug, Default)]
pub struct TextView {
    list: String,
    stats: String,
    notices: Vec<Notice>,
}

impl TextView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last rendered stats line followed by the proxy region
    pub fn output(&self) -> String {
        format!("{}\n{}", self.stats, self.list)
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }
}

impl View for TextView {
    fn render_list(&mut self, items: &[ProxyEntry], mode: ViewMode) {
        self.list.clear();
        if items.is_empty() {
            self.list.push_str("No proxies found.\n");
            return;
        }

        match mode {
            ViewMode::List => {
                for entry in items {
                    let _ = writeln!(self.list, "{:<18} :{}", entry.address(), entry.port());
                }
            }
            ViewMode::Grid => {
                for row in items.chunks(GRID_COLUMNS) {
                    let cells: Vec<String> =
                        row.iter().map(|e| format!("{:<22}", e.as_str())).collect();
                    let _ = writeln!(self.list, "{}", cells.join(" ").trim_end());
                }
            }
        }
    }

    fn render_stats(&mut self, stats: &Stats) {
        self.stats = format!(
            "Total: {} | Filtered: {} | Page {}/{}",
            stats.total_count, stats.filtered_count, stats.current_page, stats.total_pages
        );
    }

    fn notify(&mut self, notice: Notice) {
        self.notices.push(notice);
    }
}

/// Entries per row in the text grid
const GRID_COLUMNS: usize = 4;

#[cfg(test)]
mod tests {
    use super::*;

    struct Headless;
    impl View for Headless {}

    #[test]
    fn test_missing_regions_are_noops() {
        let mut view = Headless;
        view.render_list(&[ProxyEntry::new("1.2.3.4:1080")], ViewMode::Grid);
        view.render_stats(&Stats::default());
        view.set_pagination_enabled(false, true);
        view.notify(Notice::info("ignored"));
    }

    #[test]
    fn test_stats_pagination_flags() {
        let stats = Stats {
            total_count: 3,
            filtered_count: 3,
            current_page: 1,
            total_pages: 2,
        };
        assert!(!stats.has_previous());
        assert!(stats.has_next());

        let empty = Stats {
            total_count: 3,
            filtered_count: 0,
            current_page: 1,
            total_pages: 0,
        };
        assert!(!empty.has_previous());
        assert!(!empty.has_next());
    }

    #[test]
    fn test_text_view_list_mode() {
        let mut view = TextView::new();
        let items = vec![ProxyEntry::new("1.2.3.4:1080"), ProxyEntry::new("9.9.9.9:443")];
        view.render_list(&items, ViewMode::List);
        view.render_stats(&Stats {
            total_count: 2,
            filtered_count: 2,
            current_page: 1,
            total_pages: 1,
        });

        let out = view.output();
        assert!(out.starts_with("Total: 2 | Filtered: 2 | Page 1/1"));
        let first = out.lines().nth(1).unwrap();
        assert!(first.starts_with("1.2.3.4 "));
        assert!(first.ends_with(" :1080"));
        assert!(out.contains(":443"));
    }

    #[test]
    fn test_text_view_grid_wraps_rows() {
        let mut view = TextView::new();
        let items: Vec<_> = (1..=5)
            .map(|i| ProxyEntry::new(format!("10.0.0.{}:1080", i)))
            .collect();
        view.render_list(&items, ViewMode::Grid);
        assert_eq!(view.output().lines().filter(|l| l.contains("10.0.0.")).count(), 2);
    }

    #[test]
    fn test_text_view_empty_page() {
        let mut view = TextView::new();
        view.render_list(&[], ViewMode::Grid);
        assert!(view.output().contains("No proxies found."));
    }
}
