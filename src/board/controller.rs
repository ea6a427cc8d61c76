//! List controller: owns the view state and drives a `View`

use crate::board::state::{self, PageSize, ViewMode, ViewState};
use crate::board::view::{Notice, Page, Stats, View};
use crate::export::{Clipboard, FileSaver};
use crate::proxy::ProxyCatalog;
use crate::Config;
use chrono::Local;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, error, info};

/// Owns the catalog, the view state and the view it renders into
pub struct ListController<V: View> {
    catalog: ProxyCatalog,
    state: ViewState,
    view: V,
    refresh_delay: Duration,
    export_file_name: String,
    /// Set while a simulated refresh is pending
    refreshing: bool,
}

impl<V: View> ListController<V> {
    /// Create a controller and render the first page
    pub fn new(catalog: ProxyCatalog, view: V, config: &Config) -> Self {
        let mut controller = Self {
            catalog,
            state: ViewState::new(config.page_size, config.view_mode),
            view,
            refresh_delay: config.refresh_delay,
            export_file_name: config.export_file_name.clone(),
            refreshing: false,
        };

        controller.view.set_active_view_mode(controller.state.view_mode);
        controller.refresh_view();
        controller
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn catalog(&self) -> &ProxyCatalog {
        &self.catalog
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn is_refreshing(&self) -> bool {
        self.refreshing
    }

    /// Filter by `term` and jump back to the first page
    pub fn apply_search(&mut self, term: &str) {
        debug!(term, "apply search");
        self.state.search_term = term.to_string();
        self.state.page = 1;
        self.refresh_view();
    }

    pub fn set_page_size(&mut self, page_size: PageSize) {
        debug!(%page_size, "set page size");
        self.state.page_size = page_size;
        self.state.page = 1;
        self.refresh_view();
    }

    /// Returns whether the page changed
    pub fn go_to_previous_page(&mut self) -> bool {
        if self.state.page <= 1 {
            return false;
        }

        self.state.page -= 1;
        self.refresh_view();
        true
    }

    /// Returns whether the page changed
    pub fn go_to_next_page(&mut self) -> bool {
        if self.state.page >= self.total_pages() {
            return false;
        }

        self.state.page += 1;
        self.refresh_view();
        true
    }

    /// Jump to `page`, clamped to the valid range
    pub fn go_to_page(&mut self, page: usize) {
        let last = self.total_pages().max(1);
        self.state.page = page.clamp(1, last);
        self.refresh_view();
    }

    pub fn set_view_mode(&mut self, mode: ViewMode) {
        debug!(%mode, "set view mode");
        self.state.view_mode = mode;
        self.view.set_active_view_mode(mode);
        self.refresh_view();
    }

    /// Current page window and statistics; does not touch the view
    pub fn render(&self) -> Page {
        let filtered = self.catalog.filter(&self.state.search_term);
        let size = self.state.page_size.get();
        let start = (self.state.page - 1) * size;

        let items = filtered.iter().skip(start).take(size).map(|e| (*e).clone()).collect();

        Page {
            items,
            stats: Stats {
                total_count: self.catalog.len(),
                filtered_count: filtered.len(),
                current_page: self.state.page,
                total_pages: state::total_pages(filtered.len(), self.state.page_size),
            },
        }
    }

    /// Copy the whole catalog, ignoring the active filter
    pub fn copy_all<C: Clipboard + ?Sized>(&mut self, clipboard: &mut C) -> bool {
        let text = self.catalog.to_text();

        match clipboard.write_text(&text) {
            Ok(()) => {
                info!(count = self.catalog.len(), "copied proxies to clipboard");
                self.view.notify(Notice::info("All proxies copied to clipboard!"));
                true
            }
            Err(e) => {
                error!("Failed to copy: {:#}", e);
                self.view.notify(Notice::error("Failed to copy proxies"));
                false
            }
        }
    }

    /// Save the whole catalog as a text file, ignoring the active filter
    pub fn export_as_text<S: FileSaver + ?Sized>(&mut self, saver: &mut S) -> crate::Result<PathBuf> {
        let text = self.catalog.to_text();

        match saver.save(&self.export_file_name, &text) {
            Ok(path) => {
                info!(path = ?path, count = self.catalog.len(), "exported proxies");
                self.view
                    .notify(Notice::info(format!("Saved proxies to {}", path.display())));
                Ok(path)
            }
            Err(e) => {
                error!("Failed to export: {:#}", e);
                self.view.notify(Notice::error("Failed to save proxies"));
                Err(e)
            }
        }
    }

    /// Start a simulated refresh.
    ///
    /// Disables the refresh control and returns how long to wait before
    /// `finish_refresh`, or `None` if a refresh is already pending.
    pub fn begin_refresh(&mut self) -> Option<Duration> {
        if self.refreshing {
            return None;
        }

        info!("refreshing proxy list");
        self.refreshing = true;
        self.view.set_refresh_busy(true);
        Some(self.refresh_delay)
    }

    /// Re-render from the unchanged catalog and restore the refresh control
    pub fn finish_refresh(&mut self) {
        if !self.refreshing {
            return;
        }

        self.refresh_view();
        self.refreshing = false;
        self.view.set_refresh_busy(false);
        self.view.notify(Notice::info("Proxy list updated!"));
    }

    /// `begin_refresh`, wait out the delay, then `finish_refresh`
    pub async fn simulate_refresh(&mut self) -> bool {
        match self.begin_refresh() {
            Some(delay) => {
                tokio::time::sleep(delay).await;
                self.finish_refresh();
                true
            }
            None => false,
        }
    }

    fn total_pages(&self) -> usize {
        let filtered = self.catalog.filter(&self.state.search_term).len();
        state::total_pages(filtered, self.state.page_size)
    }

    fn refresh_view(&mut self) {
        let page = self.render();

        self.view.render_list(&page.items, self.state.view_mode);
        self.view.render_stats(&page.stats);
        self.view
            .set_pagination_enabled(page.stats.has_previous(), page.stats.has_next());
        self.view.render_updated_at(Local::now().time());
    }
}
