//! Proxy module for the catalog data
//!
//! This module provides:
//! - The `ProxyEntry` model (`address:port` strings)
//! - Parsing catalog text from files or the embedded list
//! - The read-only `ProxyCatalog` with its substring filter

pub mod catalog;
pub mod models;
pub mod parser;

pub use catalog::ProxyCatalog;
pub use models::ProxyEntry;
pub use parser::ProxyParser;
