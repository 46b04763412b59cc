//! Command-line front end for the menu advisor.
//!
//! ```text
//! menu-advisor [--config FILE] [--seed FILE] [--upload FILE]... <command>
//!
//! commands:
//!   list                        print every stored school lunch
//!   upload <FILE> [--kind KIND] ingest a document and print its record
//!   suggest <YYYY-MM-DD> <MEAL> suggest a breakfast or dinner
//! ```
//!
//! Output is JSON on stdout. Usage errors exit with 2, failed commands
//! with 1. Set `RUST_LOG` to change log verbosity.

use std::process;

use clap::Parser;
use menu_advisor::cli::Cli;

fn print_json(value: &serde_json::Value) {
    match serde_json::to_string_pretty(value) {
        Ok(text) => println!("{text}"),
        Err(e) => eprintln!("failed to render output: {e}"),
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Exits with status 2 on usage errors.
    let cli = Cli::parse();

    match cli.run() {
        Ok(output) => print_json(&output),
        Err(output) => {
            print_json(&output);
            process::exit(1);
        }
    }
}
