//! Export targets: the system clipboard and plain text files

use crate::Result;
use std::fs;
use std::path::{Path, PathBuf};

/// File name used when saving the catalog
pub const DEFAULT_EXPORT_FILE: &str = "socks5-proxies.txt";

/// Something that can hold a text payload for pasting elsewhere
pub trait Clipboard {
    fn write_text(&mut self, text: &str) -> Result<()>;
}

/// Something that can persist a text payload under a file name
pub trait FileSaver {
    /// Save `contents` as `file_name`, returning where it ended up
    fn save(&mut self, file_name: &str, contents: &str) -> Result<PathBuf>;
}

/// Clipboard of the desktop session, via arboard
pub struct SystemClipboard {
    inner: arboard::Clipboard,
}

impl SystemClipboard {
    pub fn new() -> Result<Self> {
        Ok(Self {
            inner: arboard::Clipboard::new()?,
        })
    }
}

impl Clipboard for SystemClipboard {
    fn write_text(&mut self, text: &str) -> Result<()> {
        self.inner.set_text(text.to_owned())?;
        Ok(())
    }
}

/// Stand-in used when no clipboard could be opened; every write fails
pub struct UnavailableClipboard {
    reason: String,
}

impl UnavailableClipboard {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl Clipboard for UnavailableClipboard {
    fn write_text(&mut self, _text: &str) -> Result<()> {
        Err(anyhow::anyhow!("clipboard unavailable: {}", self.reason))
    }
}

/// Writes exported files into a fixed directory
#[derive(Debug, Clone)]
pub struct DirectorySaver {
    dir: PathBuf,
}

impl DirectorySaver {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }
}

impl FileSaver for DirectorySaver {
    fn save(&mut self, file_name: &str, contents: &str) -> Result<PathBuf> {
        fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(file_name);
        fs::write(&path, contents)?;
        Ok(path)
    }
}
