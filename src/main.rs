use clap::Parser;
use std::process;
use wildlife_explorer::cli::{Args, run_until};

fn main() {
    let args = Args::parse();

    let runtime = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
        eprintln!("Failed to create async runtime: {}", e);
        process::exit(1);
    });

    let result = runtime.block_on(run_until(args, tokio::signal::ctrl_c()));

    if let Err(error) = result {
        eprintln!("Error: {:#}", error);
        process::exit(1);
    }
}
