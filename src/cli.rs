//! Command-Line Interface related code.
//!
//! This module handles the parsing of CLI arguments using the [`clap`][1] crate.
//! It defines the availables runtime options and subcommands.
//!
//! [1]: https://crates.io/crates/clap

use trmm_kc::{blksz, consts, Blksz, Datatype, Direction, Result};

use clap::{Parser, Subcommand};

use std::path::PathBuf;

/// KC blocksize selection for triangular matrix multiplication.
///
/// Plans, verifies and profiles the chunking of the reduction dimension of a TRMM-like product
/// under a given blocksize policy.
#[derive(Clone, Debug, Parser)]
pub struct CliArgs {
    /// Number of meta-repetitions for the benchmark.
    #[arg(
        short,
        long,
        value_name = "META_REPS",
        default_value_t = consts::META_REPETITIONS,
        value_parser = clap::value_parser!(u8).range(2..u8::MAX.into()),
    )]
    pub meta_repetitions: u8,

    /// Number of repetitions of the tight loop.
    #[arg(
        short,
        long,
        value_name = "TIGHT_REPS",
        default_value_t = consts::TIGHT_LOOP_REPETITIONS,
        value_parser = clap::value_parser!(u16).range(1..u16::MAX.into()),
    )]
    pub tight_loop_repetitions: u16,

    /// Override of the KC blocksize policy for one datatype, as `DT=DEFAULT:MAX`.
    ///
    /// May be repeated, e.g. `--kc d=192:256 --kc z=96:128`.
    #[arg(long = "kc", value_name = "DT=DEFAULT:MAX")]
    pub kc_overrides: Vec<String>,

    /// Command to run.
    #[command(subcommand)]
    pub command: Command,

    /// Output file, defaults to `stdout` if unspecified.
    #[arg(short, long)]
    pub output_file: Option<PathBuf>,

    /// Seed for the random number generator (RNG).
    #[arg(short, long, value_name = "SEED")]
    pub seed: Option<u64>,

    /// Increase logging verbosity (`-v` for debug, `-vv` for trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl CliArgs {
    /// Reference KC policy with the command-line overrides applied in order.
    pub fn blocksizes(&self) -> Result<Blksz> {
        let mut kc = Blksz::kc_reference();
        for spec in &self.kc_overrides {
            let (dt, default, max) = blksz::parse_override(spec)?;
            kc.set(dt, default, max)?;
        }
        Ok(kc)
    }
}

/// Operand layout shared by the subcommands.
#[derive(Clone, Debug, PartialEq, clap::Args)]
pub struct OperandArgs {
    /// Execution datatype.
    #[arg(short, long, value_enum, default_value_t = Datatype::Double)]
    pub datatype: Datatype,

    /// Treat `a` as a triangular matrix (align to MR) instead of a general one (align to NR).
    #[arg(long)]
    pub triangular: bool,
}

/// List of available commands.
#[derive(Debug, Clone, PartialEq, Subcommand)]
pub enum Command {
    /// Print the chunks each dimension is cut into.
    Plan {
        /// Sizes of the partitioned dimension.
        #[arg(
            short = 'n',
            long,
            required = true,
            num_args = 1..,
        )]
        dims: Vec<usize>,

        /// Traversal direction.
        #[arg(short = 'D', long, value_enum, default_value_t = Direction::Forward)]
        direction: Direction,

        #[command(flatten)]
        operands: OperandArgs,
    },
    /// Check the selectors on randomly drawn configurations.
    Verify {
        /// Number of random configurations.
        #[arg(short, long, default_value_t = consts::VERIFY_CASES)]
        cases: usize,

        /// Largest drawn dimension.
        #[arg(long, default_value_t = consts::VERIFY_MAX_DIM)]
        max_dim: usize,
    },
    /// Time full sweeps of both selectors.
    Bench {
        /// Sizes of the partitioned dimension.
        #[arg(
            short = 'n',
            long,
            required = true,
            num_args = 1..,
        )]
        dims: Vec<usize>,

        #[command(flatten)]
        operands: OperandArgs,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plan() {
        let args = CliArgs::parse_from([
            "trmm-kc",
            "--kc",
            "d=8:12",
            "plan",
            "-n",
            "100",
            "20",
            "-D",
            "b",
            "-d",
            "d",
            "--triangular",
        ]);
        assert_eq!(
            args.command,
            Command::Plan {
                dims: vec![100, 20],
                direction: Direction::Backward,
                operands: OperandArgs {
                    datatype: Datatype::Double,
                    triangular: true,
                },
            }
        );
        let kc = args.blocksizes().unwrap();
        assert_eq!(kc.for_type(Datatype::Double), 8);
        assert_eq!(kc.max_for_type(Datatype::Double), 12);
        assert_eq!(
            kc.for_type(Datatype::Float),
            Blksz::kc_reference().for_type(Datatype::Float)
        );
    }

    #[test]
    fn test_invalid_override_is_an_error() {
        let args = CliArgs::parse_from(["trmm-kc", "--kc", "s=16:8", "verify"]);
        assert!(args.blocksizes().is_err());
    }

    #[test]
    fn test_defaults() {
        let args = CliArgs::parse_from(["trmm-kc", "-vv", "bench", "-n", "512"]);
        assert_eq!(args.meta_repetitions, consts::META_REPETITIONS);
        assert_eq!(args.tight_loop_repetitions, consts::TIGHT_LOOP_REPETITIONS);
        assert_eq!(args.verbose, 2);
        assert!(args.kc_overrides.is_empty());
        assert_eq!(
            args.command,
            Command::Bench {
                dims: vec![512],
                operands: OperandArgs {
                    datatype: Datatype::Double,
                    triangular: false,
                },
            }
        );
    }
}
