//! Selector timing drivers.
//!
//! This module implements the driver functions responsible for profiling full sweeps of the
//! blocksize selectors on the host.

use crate::perf_report::PerfReport;

use trmm_kc::{Blksz, Direction, MatrixDesc, MatrixObj};

use std::{hint::black_box, time::Instant};

/// Walks `dim` once with `select` and returns the number of chunks it was cut into.
#[inline]
fn sweep(
    select: trmm_kc::DetermineKcFn,
    dim: usize,
    a: &MatrixObj,
    b: &MatrixObj,
    bsize: &Blksz,
) -> usize {
    let mut i = 0;
    let mut nb_chunks = 0;
    while i < dim {
        i += black_box(select(black_box(i), dim, a, b, bsize));
        nb_chunks += 1;
    }
    nb_chunks
}

/// Profiles full sweeps of the selector matching `direction`.
pub fn sweep_selector(
    direction: Direction,
    dim: usize,
    a: &MatrixObj,
    b: &MatrixObj,
    bsize: &Blksz,
    meta_reps: u8,
    tight_reps: u16,
) -> PerfReport {
    let select = direction.selector();
    let nb_chunks = sweep(select, dim, a, b, bsize);

    // Measure execution time of sweeps
    let mut durations = Vec::with_capacity(meta_reps.into());
    for _ in 0..meta_reps {
        let dur = Instant::now();
        for _ in 0..tight_reps {
            black_box(sweep(select, dim, a, b, bsize));
        }
        durations.push((dur.elapsed() / tight_reps as u32).as_secs_f64());
    }

    PerfReport::new(
        direction,
        a.execution_datatype(),
        a.is_root_triangular(),
        dim,
        nb_chunks,
        &mut durations,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use trmm_kc::{partition, Datatype};

    #[test]
    fn test_sweep_counts_chunks() {
        let bsize = Blksz::kc_reference();
        let a = MatrixObj::triangular(Datatype::Double);
        let b = MatrixObj::general(Datatype::Double);

        for direction in [Direction::Forward, Direction::Backward] {
            for dim in [0, 1, 256, 1000, 4097] {
                assert_eq!(
                    sweep(direction.selector(), dim, &a, &b, &bsize),
                    partition(direction, dim, &a, &b, &bsize).len()
                );
            }
        }
    }

    #[test]
    fn test_sweep_selector_report() {
        let bsize = Blksz::kc_reference();
        let a = MatrixObj::triangular(Datatype::Float);
        let b = MatrixObj::general(Datatype::Float);

        let report = sweep_selector(Direction::Backward, 1000, &a, &b, &bsize, 3, 2);
        assert_eq!(report.nb_chunks(), partition(Direction::Backward, 1000, &a, &b, &bsize).len());
    }
}
