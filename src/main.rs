use anyhow::Result;
use clap::{Parser, Subcommand};
use socks5_board::{
    export::{Clipboard, DirectorySaver, SystemClipboard, UnavailableClipboard},
    logging::{self, LogTarget},
    tui::BoardApp,
    Config, ListController, PageSize, TextView, ViewMode,
};
use std::path::PathBuf;
use tracing::warn;

/// Browse and export a list of SOCKS5 proxies
#[derive(Parser)]
#[command(name = "socks5-board")]
#[command(about = "Browse and export a list of SOCKS5 proxies")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Catalog file to use instead of the built-in list
    #[arg(short, long, global = true)]
    catalog: Option<PathBuf>,

    /// Write logs to this file (the TUI discards logs otherwise)
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the interactive TUI
    Tui {
        /// Initial page size (10, 20, 50, 100)
        #[arg(short = 's', long, default_value = "20")]
        page_size: PageSize,
        /// Initial layout (grid, list)
        #[arg(long, default_value = "grid")]
        view: ViewMode,
        /// Directory the download action writes into
        #[arg(short, long, default_value = ".")]
        dir: PathBuf,
    },
    /// Print one page of proxies
    List {
        /// Only show proxies containing this text
        #[arg(short = 'q', long, default_value = "")]
        search: String,
        /// Page to show, starting at 1
        #[arg(short, long, default_value = "1")]
        page: usize,
        /// Entries per page (10, 20, 50, 100)
        #[arg(short = 's', long, default_value = "20")]
        page_size: PageSize,
        /// Layout (grid, list)
        #[arg(long, default_value = "list")]
        view: ViewMode,
        /// Print the page as JSON
        #[arg(long)]
        json: bool,
    },
    /// Copy every proxy to the clipboard
    Copy,
    /// Save every proxy to socks5-proxies.txt
    Export {
        /// Output directory
        #[arg(short, long, default_value = ".")]
        dir: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let is_tui = matches!(cli.command, None | Some(Commands::Tui { .. }));
    let target = match (&cli.log_file, is_tui) {
        (Some(path), _) => LogTarget::File(path),
        (None, true) => LogTarget::Discard,
        (None, false) => LogTarget::Stderr,
    };
    logging::init(cli.verbose, target)?;

    let mut config = Config::new();
    if let Some(path) = cli.catalog.clone() {
        config = config.with_catalog_path(path);
    }

    match cli.command {
        None => {
            // Default to TUI mode
            run_tui(config).await?;
        }
        Some(Commands::Tui {
            page_size,
            view,
            dir,
        }) => {
            let config = config
                .with_page_size(page_size)
                .with_view_mode(view)
                .with_export_dir(dir);
            run_tui(config).await?;
        }
        Some(Commands::List {
            search,
            page,
            page_size,
            view,
            json,
        }) => {
            let config = config.with_page_size(page_size).with_view_mode(view);
            let catalog = config.load_catalog()?;
            let mut controller = ListController::new(catalog, TextView::new(), &config);

            if !search.is_empty() {
                controller.apply_search(&search);
            }
            controller.go_to_page(page);

            if json {
                println!("{}", serde_json::to_string_pretty(&controller.render())?);
            } else {
                print!("{}", controller.view().output());
            }
        }
        Some(Commands::Copy) => {
            let catalog = config.load_catalog()?;
            let mut controller = ListController::new(catalog, TextView::new(), &config);
            let mut clipboard = open_clipboard();

            let copied = controller.copy_all(clipboard.as_mut());
            for notice in controller.view().notices() {
                if notice.is_error() {
                    eprintln!("{}", notice);
                } else {
                    println!("{}", notice);
                }
            }
            if !copied {
                std::process::exit(1);
            }
        }
        Some(Commands::Export { dir }) => {
            let config = config.with_export_dir(dir);
            let catalog = config.load_catalog()?;
            let mut controller = ListController::new(catalog, TextView::new(), &config);
            let mut saver = DirectorySaver::new(&config.export_dir);

            let path = controller.export_as_text(&mut saver)?;
            println!(
                "Saved {} proxies to {:?}",
                controller.catalog().len(),
                path
            );
        }
    }

    Ok(())
}

async fn run_tui(config: Config) -> Result<()> {
    let catalog = config.load_catalog()?;
    let mut app = BoardApp::new(catalog, &config, open_clipboard());
    app.run().await
}

/// System clipboard, or one that reports the failure on every copy
fn open_clipboard() -> Box<dyn Clipboard> {
    match SystemClipboard::new() {
        Ok(clipboard) => Box::new(clipboard),
        Err(e) => {
            warn!("clipboard unavailable: {:#}", e);
            Box::new(UnavailableClipboard::new(e.to_string()))
        }
    }
}
