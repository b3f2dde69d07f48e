//! Command-line interface.

pub mod commands;
pub mod output;
mod types;

pub use types::{Cli, Commands};

use console::style;

/// Report a command failure and exit with status 1.
///
/// In JSON mode the error is printed to stdout as `{"error": ...}` so
/// scripted callers always get parseable output.
pub fn handle_error(err: anyhow::Error, json_mode: bool) -> ! {
    if json_mode {
        let chain: Vec<String> = err.chain().map(ToString::to_string).collect();
        println!(
            "{}",
            serde_json::json!({ "error": err.to_string(), "causes": chain })
        );
    } else {
        eprintln!("{} {err:#}", style("error:").red().bold());
    }
    std::process::exit(1);
}
