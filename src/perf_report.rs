//! Performance report related structures and functions.
//!
//! This module defines the data structures and functions needed to generate performance reports
//! out of the recorded execution times of full selector sweeps.

use trmm_kc::{Datatype, Direction};

use statistical::{mean, standard_deviation};

use std::{fmt, io::Write};

/// Performance information and statistics of a benchmarked sweep.
pub struct PerfReport {
    /// Direction of the sweep, i.e. which selector was called.
    direction: Direction,
    /// Execution datatype of the operands.
    datatype: Datatype,
    /// Whether the blocksizes were aligned to MR (triangular `a`) or NR.
    triangular: bool,
    /// Size of the partitioned dimension.
    dim: usize,
    /// Number of selector calls (chunks) per sweep.
    nb_chunks: usize,
    /// Minimum recorded runtime in microseconds.
    min_time: f64,
    /// Median recorded runtime in microseconds.
    median_time: f64,
    /// Maximum recorded runtime in microseconds.
    max_time: f64,
    /// Average runtime in microseconds.
    avg_time: f64,
    /// Runtime standard deviation in microseconds.
    stddev_time: f64,
    /// Selector calls per second, in millions.
    throughput: f64,
}

impl PerfReport {
    pub fn print_csv_header(output: &mut dyn Write) -> std::io::Result<()> {
        writeln!(
            output,
            "direction,datatype,triangular,dim,chunks,min_runtime,median_runtime,max_runtime,avg_runtime,stddev,Mcalls/s"
        )
    }

    /// Creates a new `PerfReport` given a sweep description, the number of chunks it produces and
    /// the recorded execution times (in seconds).
    ///
    /// `durations` must not be empty.
    pub fn new(
        direction: Direction,
        datatype: Datatype,
        triangular: bool,
        dim: usize,
        nb_chunks: usize,
        durations: &mut [f64],
    ) -> Self {
        debug_assert!(!durations.is_empty(), "no recorded durations");

        // Sort durations to avoid having to do two passes to get both min and max elements
        durations.sort_by(f64::total_cmp);

        let min_time = durations[0] * 1e6;
        let median_time = durations[durations.len() / 2] * 1e6;
        let max_time = durations[durations.len() - 1] * 1e6;
        let avg_time = mean(durations);
        let stddev_time = if durations.len() > 1 {
            standard_deviation(durations, Some(avg_time)) * 1e6
        } else {
            0.0
        };

        let throughput = if avg_time > 0.0 {
            nb_chunks as f64 / avg_time / 1e6
        } else {
            f64::INFINITY
        };

        Self {
            direction,
            datatype,
            triangular,
            dim,
            nb_chunks,
            min_time,
            median_time,
            max_time,
            avg_time: avg_time * 1e6,
            stddev_time,
            throughput,
        }
    }

    pub fn nb_chunks(&self) -> usize {
        self.nb_chunks
    }
}

impl fmt::Display for PerfReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{},{},{},{},{:.6},{:.6},{:.6},{:.6},{:.6},{:.3}",
            self.direction,
            self.datatype,
            self.triangular,
            self.dim,
            self.nb_chunks,
            self.min_time,
            self.median_time,
            self.max_time,
            self.avg_time,
            self.stddev_time,
            self.throughput,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_statistics() {
        let mut durations = [3e-6, 1e-6, 2e-6];
        let report = PerfReport::new(
            Direction::Forward,
            Datatype::Double,
            true,
            1000,
            4,
            &mut durations,
        );
        assert!((report.min_time - 1.0).abs() < 1e-9);
        assert!((report.median_time - 2.0).abs() < 1e-9);
        assert!((report.max_time - 3.0).abs() < 1e-9);
        assert!((report.avg_time - 2.0).abs() < 1e-9);
        // 4 calls in 2 microseconds.
        assert!((report.throughput - 2.0).abs() < 1e-9);
        assert_eq!(report.nb_chunks(), 4);
    }

    #[test]
    fn test_csv_line_matches_header() {
        let mut header = Vec::new();
        PerfReport::print_csv_header(&mut header).unwrap();
        let header = String::from_utf8(header).unwrap();

        let mut durations = [1e-6, 1e-6];
        let report = PerfReport::new(
            Direction::Backward,
            Datatype::Scomplex,
            false,
            17,
            3,
            &mut durations,
        );
        let line = report.to_string();

        assert_eq!(header.trim_end().split(',').count(), line.split(',').count());
        assert!(line.starts_with("backward,c,false,17,3,"));
    }
}
