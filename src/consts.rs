//! Crate-level constants.

/// Default number of meta repetitions performed when benchmarking a selector.
pub const META_REPETITIONS: u8 = 31;

/// Default number of tight loop repetitions performed when benchmarking a selector.
pub const TIGHT_LOOP_REPETITIONS: u16 = 1;

/// Default number of random configurations drawn by `verify`.
pub const VERIFY_CASES: usize = 10_000;

/// Largest dimension drawn by `verify`.
pub const VERIFY_MAX_DIM: usize = 4096;

/// Reference KC blocksizes (default), in `s`, `d`, `c`, `z` order.
pub const DEFAULT_KC: [usize; 4] = [256, 256, 256, 256];

/// Reference KC blocksizes (maximum), in `s`, `d`, `c`, `z` order.
///
/// The headroom above [`DEFAULT_KC`] is what the backward selector uses to absorb an
/// uneven edge into an earlier chunk.
pub const MAXIMUM_KC: [usize; 4] = [320, 320, 320, 320];

/// Reference micro-kernel register blocking along `m`, in `s`, `d`, `c`, `z` order.
pub const DEFAULT_MR: [usize; 4] = [8, 4, 4, 2];

/// Reference micro-kernel register blocking along `n`, in `s`, `d`, `c`, `z` order.
pub const DEFAULT_NR: [usize; 4] = [4, 4, 2, 2];
