//! trmm-kc - KC blocksize planning for triangular matrix multiplication
//!
//! # About
//! `trmm-kc` exercises the KC blocksize selectors of the [`trmm_kc`] library from the
//! command-line: it shows how a dimension gets cut into chunks, checks the selectors against their
//! guarantees on random configurations, and times full sweeps.
//!
//! # Quickstart
//! ## Build
//! As any Rust-based project, `trmm-kc` is built and run with `cargo`:
//! ```sh
//! cargo build --release
//! ```
//!
//! ## Help
//! To see the help usage:
//! ```sh
//! cargo run -- help
//!
//! KC blocksize selection for triangular matrix multiplication.
//!
//! Usage: trmm-kc [OPTIONS] <COMMAND>
//!
//! Commands:
//!   plan    Print the chunks each dimension is cut into
//!   verify  Check the selectors on randomly drawn configurations
//!   bench   Time full sweeps of both selectors
//!   help    Print this message or the help of the given subcommand(s)
//! ```
//!
//! ## Example run
//! To see how a backward sweep cuts a few dimensions with a custom double-precision policy:
//! ```sh
//! cargo run --release -- --kc d=8:12 plan --dims 100 17 --direction backward
//! ```

mod cli;
mod drivers;
mod logger;
mod perf_report;

use crate::cli::{CliArgs, Command};

use clap::Parser;

fn main() -> trmm_kc::Result<()> {
    let args = CliArgs::parse();
    logger::init_log(logger::level_from_verbosity(args.verbose))?;

    let res = match args.command {
        Command::Plan { .. } => drivers::plan(&args),
        Command::Verify { .. } => drivers::verify(&args),
        Command::Bench { .. } => drivers::bench(&args),
    };
    if let Err(ref e) = res {
        log::error!("{e}");
    }
    res
}
