//! # bt-resolve - Main Entry Point
//!
//! Reads one line of crash output (argument or stdin), extracts the
//! backtrace addresses and resolves them with the configured backend.

use anyhow::{Context, Result};
use bt_resolve::cli::{read_backtrace_line, Args};
use bt_resolve::domain::ResolveError;
use bt_resolve::resolver::{resolve, ResolutionOutcome, NO_BACKTRACE_MESSAGE};
use clap::Parser;
use log::info;
use std::io;

// Exit codes
const EXIT_SUCCESS: i32 = 0;
const EXIT_ERROR: i32 = 1;

fn main() {
    env_logger::init();
    std::process::exit(match run() {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            let code = exit_code_for(&e);
            eprintln!("error: {e}");
            code
        }
    });
}

/// A failing resolver tool hands its exit code through; anything else is 1
fn exit_code_for(err: &anyhow::Error) -> i32 {
    err.downcast_ref::<ResolveError>().map_or(EXIT_ERROR, ResolveError::exit_code)
}

fn run() -> Result<()> {
    let args = Args::parse();
    let config = args.to_config();

    let line = match args.line {
        Some(ref line) => line.clone(),
        None => read_backtrace_line(&mut io::stdin().lock(), &mut io::stdout(), args.quiet)
            .context("Failed to read backtrace from stdin")?,
    };

    info!("Backend: {:?}, image: {}", config.backend, config.elf.display());
    let resolver = config.build_resolver();

    match resolve(&line, &resolver)? {
        ResolutionOutcome::NoBacktraceFound => println!("{NO_BACKTRACE_MESSAGE}"),
        ResolutionOutcome::Resolved { addresses } => info!("Resolved {addresses} addresses"),
    }

    Ok(())
}
