//! Interactive terminal search for the current directory.
//!
//! Binary crate entry point. All interface logic is in the `tui` module;
//! the search engine itself lives in the library crate.

// Use mimalloc as global allocator — markedly lower fragmentation than the
// system allocator under the walker's many short-lived string allocations.
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

mod logging;
mod tui;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use tgrep::engine::Engine;

/// Interactive recursive search with live preview
#[derive(Parser, Debug)]
#[command(name = "tgrep", version, about, after_help = "\
Type a query and press Enter to search the directory recursively.\n\
Tab switches between the query and the file-glob filter.")]
struct Cli {
    /// Directory to search (defaults to the current directory)
    #[arg(value_name = "DIR")]
    root: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let _log_guard = logging::init();

    let root = match cli.root {
        Some(dir) => dir,
        None => match std::env::current_dir() {
            Ok(dir) => dir,
            Err(err) => {
                eprintln!("tgrep: cannot determine current directory: {err}");
                return ExitCode::FAILURE;
            }
        },
    };

    tracing::info!(root = %root.display(), "starting");

    if let Err(err) = tui::run(Engine::new(root)) {
        eprintln!("tgrep: {err}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
