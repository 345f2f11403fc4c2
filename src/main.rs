//! CLI entry point for deterministic stimulus reconstruction

use clap::Parser;
use stimgen::io::cli::{BatchRunner, Cli};

fn main() -> stimgen::Result<()> {
    let cli = Cli::parse();
    let mut runner = BatchRunner::new(cli);
    runner.run()
}
