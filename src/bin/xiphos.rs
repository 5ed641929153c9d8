//! Xiphos CLI binary.

use std::process;

use clap::Parser;

use xiphos::cli::args::XiphosArgs;
use xiphos::cli::commands;

fn main() {
    let args = XiphosArgs::parse();

    if let Err(e) = commands::execute(args) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
