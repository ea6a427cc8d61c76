//! SOCKS5 Board - Proxy list browser
//!
//! Browses a fixed catalog of proxy endpoints with paging, substring
//! search and a grid/list layout, and exports the catalog to the
//! clipboard or a text file.

pub mod board;
pub mod export;
pub mod logging;
pub mod proxy;
pub mod tui;

pub use board::*;
pub use proxy::*;

use std::path::PathBuf;
use std::time::Duration;

/// Application result type
pub type Result<T> = anyhow::Result<T>;

/// Default delay of the simulated refresh in milliseconds
const DEFAULT_REFRESH_DELAY_MS: u64 = 1500;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Initial page size
    pub page_size: PageSize,
    /// Initial layout of the proxy region
    pub view_mode: ViewMode,
    /// How long the simulated refresh pretends to work
    pub refresh_delay: Duration,
    /// File name used by the text export
    pub export_file_name: String,
    /// Directory the text export writes into
    pub export_dir: PathBuf,
    /// Catalog file to load instead of the embedded list
    pub catalog_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            page_size: PageSize::default(),
            view_mode: ViewMode::default(),
            refresh_delay: Duration::from_millis(DEFAULT_REFRESH_DELAY_MS),
            export_file_name: export::DEFAULT_EXPORT_FILE.to_string(),
            export_dir: PathBuf::from("."),
            catalog_path: None,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page_size(mut self, page_size: PageSize) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn with_view_mode(mut self, view_mode: ViewMode) -> Self {
        self.view_mode = view_mode;
        self
    }

    pub fn with_refresh_delay(mut self, delay: Duration) -> Self {
        self.refresh_delay = delay;
        self
    }

    pub fn with_export_dir(mut self, dir: PathBuf) -> Self {
        self.export_dir = dir;
        self
    }

    pub fn with_catalog_path(mut self, path: PathBuf) -> Self {
        self.catalog_path = Some(path);
        self
    }

    /// Load the configured catalog, falling back to the embedded one
    pub fn load_catalog(&self) -> Result<ProxyCatalog> {
        match &self.catalog_path {
            Some(path) => ProxyCatalog::from_file(path),
            None => Ok(ProxyCatalog::embedded()),
        }
    }
}
