//! Board module: paging, search and rendering over the proxy catalog

pub mod controller;
pub mod state;
pub mod view;

pub use controller::ListController;
pub use state::{PageSize, ViewMode, ViewState};
pub use view::{Notice, Page, Stats, TextView, View};
