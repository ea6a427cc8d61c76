//! Tracing subscriber setup

use crate::Result;
use std::fs::OpenOptions;
use std::io;
use std::path::Path;
use std::sync::Mutex;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Where log lines go
pub enum LogTarget<'a> {
    /// Standard error, for one-shot commands
    Stderr,
    /// Append to a file; used while the TUI owns the terminal
    File(&'a Path),
    /// Drop everything
    Discard,
}

/// Map `-v` occurrences to a level
pub fn level_for(verbose: u8) -> Level {
    match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Install the global subscriber. `RUST_LOG` directives are honored on top
/// of the verbosity level for this crate.
pub fn init(verbose: u8, target: LogTarget<'_>) -> Result<()> {
    let level = level_for(verbose);
    let filter = EnvFilter::from_default_env()
        .add_directive(format!("socks5_board={}", level).parse()?);

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    match target {
        LogTarget::Stderr => builder.with_writer(io::stderr).init(),
        LogTarget::File(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            builder.with_ansi(false).with_writer(Mutex::new(file)).init();
        }
        LogTarget::Discard => builder.with_writer(io::sink).init(),
    }

    Ok(())
}
