#![warn(missing_docs)]

//! Entry point for the `glass` binary.

mod cli;
mod commands;
mod error;

use std::process;

use clap::Parser;
use tracing::{dispatcher, error};

use crate::cli::Cli;

fn main() {
    let Cli { log, command } = Cli::parse();
    let dispatch = logging::dispatch(&log.spec());
    dispatcher::with_default(&dispatch, || {
        if let Err(err) = commands::run(&command, &dispatch) {
            error!("{err}");
            eprintln!("error: {err}");
            process::exit(1);
        }
    });
}
