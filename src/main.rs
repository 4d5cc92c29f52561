//! Category Join CLI
//!
//! Joins non-blocked transactions with active users and prints
//! per-category totals as CSV.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- --users users.csv --transactions transactions.csv > result.csv
//! BASE_DIR=/data cargo run
//! ```
//!
//! # Environment Variables
//!
//! - `PATH_USERS`, `PATH_TRANSACTIONS`: input files
//! - `BASE_DIR`: directory with `users.csv` and `transactions.csv`
//! - `RUST_LOG`: Set to `info` or `debug` to control logging verbosity

use category_join::{execute_files, CliArgs, Result};
use clap::Parser;
use log::info;
use std::io;
use std::process;
use std::time::Instant;

fn main() {
    env_logger::init();

    let args = CliArgs::parse();
    if let Err(e) = run(&args) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(args: &CliArgs) -> Result<()> {
    let config = args.query_config();
    let started = Instant::now();

    let result = execute_files(&config)?;
    let elapsed = started.elapsed().as_micros();
    info!("elapsed time: {elapsed} microseconds");

    let stdout = io::stdout();
    let handle = stdout.lock();
    result.write_csv(handle)?;

    Ok(())
}
