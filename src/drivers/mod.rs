//! Command drivers.
//!
//! This module provides one driver per CLI command. Each driver builds the blocksize policy and
//! the operand descriptors from the parsed arguments, runs the selectors and writes a CSV summary.
//!
//! # Commands
//! ## Plan
//! Cuts each requested dimension into chunks with the selector of the requested direction and
//! writes one line per chunk. This shows exactly where a blocked algorithm would place its
//! boundaries, and how the backward selector moves the uneven edge to the first visited chunk.
//!
//! ## Verify
//! Draws random configurations (dimension, policy, register blocking, operand structure) from a
//! seeded generator and sweeps each of them, checking every returned chunk. The checks run in
//! parallel with [`rayon`][1]; any violation makes the command fail.
//!
//! ## Bench
//! Measures the time of full sweeps of both selectors. As with any micro-benchmark, the sweep is
//! repeated in a "meta repetitions loop" to assess the precision of the results, and optionally in
//! a tight loop averaged over its iterations when a single sweep is too short to be timed (see
//! [`crate::cli`] for overriding both from the command-line).
//!
//! The resulting reports are written to `stdout`, or a file if specified.
//!
//! [1]: https://crates.io/crates/rayon

mod timing;
mod verify;

use crate::{cli::*, perf_report::PerfReport};

use trmm_kc::{partition, utils::rand_cases, Direction, Error, MatrixObj, Result};

use std::{
    fs::OpenOptions,
    io::{stdout, Write},
};

/// Opens the report destination: the output file if one was given, `stdout` otherwise.
fn open_output(args: &CliArgs) -> Result<Box<dyn Write>> {
    let output: Box<dyn Write> = match args.output_file {
        Some(ref name) => Box::new(
            OpenOptions::new()
                .create(true)
                .write(true)
                .truncate(true)
                .open(name)?,
        ),
        None => Box::new(stdout()),
    };
    Ok(output)
}

fn operands(args: &OperandArgs) -> (MatrixObj, MatrixObj) {
    let a = match args.triangular {
        true => MatrixObj::triangular(args.datatype),
        false => MatrixObj::general(args.datatype),
    };
    (a, MatrixObj::general(args.datatype))
}

/// Driver for the `plan` command.
pub fn plan(args: &CliArgs) -> Result<()> {
    let Command::Plan {
        dims,
        direction,
        operands: operand_args,
    } = &args.command
    else {
        unreachable!()
    };

    let bsize = args.blocksizes()?;
    let (a, b) = operands(operand_args);

    let mut output = open_output(args)?;
    writeln!(output, "direction,datatype,dim,chunk,offset,len")?;
    for &dim in dims {
        for (n, chunk) in partition(*direction, dim, &a, &b, &bsize).iter().enumerate() {
            writeln!(
                output,
                "{direction},{},{dim},{n},{},{}",
                operand_args.datatype, chunk.offset, chunk.len
            )?;
        }
    }

    Ok(())
}

/// Driver for the `verify` command.
pub fn verify(args: &CliArgs) -> Result<()> {
    let Command::Verify { cases, max_dim } = args.command else {
        unreachable!()
    };

    let drawn = rand_cases(cases, max_dim, args.seed)?;
    log::info!("Checking {} random configurations", drawn.len());

    let violations = verify::check_all(&drawn);
    let failed = verify::count_failed(&violations);

    let mut output = open_output(args)?;
    writeln!(output, "index,case,violation")?;
    for violation in &violations {
        log::warn!("#{} {}: {}", violation.index, violation.case, violation.what);
        writeln!(
            output,
            "{},{},{}",
            violation.index, violation.case, violation.what
        )?;
    }

    if failed > 0 {
        return Err(Error::Violations {
            failed,
            total: drawn.len(),
        });
    }
    log::info!("All {} configurations hold", drawn.len());

    Ok(())
}

/// Driver for the `bench` command.
pub fn bench(args: &CliArgs) -> Result<()> {
    let Command::Bench {
        dims,
        operands: operand_args,
    } = &args.command
    else {
        unreachable!()
    };

    let bsize = args.blocksizes()?;
    let (a, b) = operands(operand_args);

    let mut reports = Vec::with_capacity(2 * dims.len());
    for &dim in dims {
        log::info!("Dimension: {dim}");
        for direction in [Direction::Forward, Direction::Backward] {
            let report = timing::sweep_selector(
                direction,
                dim,
                &a,
                &b,
                &bsize,
                args.meta_repetitions,
                args.tight_loop_repetitions,
            );
            log::debug!("{direction} sweep over {dim}: {} chunks", report.nb_chunks());
            reports.push(report);
        }
    }

    let mut output = open_output(args)?;
    PerfReport::print_csv_header(&mut output)?;
    for report in reports {
        writeln!(output, "{report}")?;
    }

    Ok(())
}
