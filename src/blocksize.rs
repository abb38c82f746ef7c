//! KC blocksize selection for triangular matrix multiplication.
//!
//! When the reduction dimension `k` of a product involving a triangular operand is cut into
//! chunks, every chunk has to stay below the maximum blocksize of the policy, its boundaries
//! should fall on multiples of the micro-kernel register blocking, and the traversal should not
//! end on a sliver that leaves the micro-kernel mostly idle.
//!
//! Two selectors are provided, one per traversal direction:
//! - [`determine_kc_f`] for algorithms moving forward (top to bottom, left to right, top-left to
//!   bottom-right);
//! - [`determine_kc_b`] for algorithms moving backward (bottom to top, right to left,
//!   bottom-right to top-left), which additionally rebalances the uneven edge of the dimension.
//!
//! Both are called once per chunk by a loop driver that advances `i` by the returned size until
//! it reaches `dim`. See [`crate::partition`] for such a driver.

use crate::{
    blksz::Blksz,
    info::{TuningInfo, REFERENCE_TUNING},
    obj::{MatrixDesc, MatrixObj},
};

/// Signature shared by the blocksize selectors, so that loop drivers can be handed either one.
pub type DetermineKcFn = fn(usize, usize, &MatrixObj, &MatrixObj, &Blksz) -> usize;

/// Direction in which an algorithm sweeps the partitioned dimension.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum Direction {
    /// From the start of the dimension toward its end.
    #[value(alias = "f")]
    Forward,
    /// From the end of the dimension toward its start.
    #[value(alias = "b")]
    Backward,
}

impl Direction {
    /// Selector matching this direction, using the reference tuning table.
    pub fn selector(self) -> DetermineKcFn {
        match self {
            Self::Forward => determine_kc_f::<MatrixObj, MatrixObj>,
            Self::Backward => determine_kc_b::<MatrixObj, MatrixObj>,
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Forward => write!(f, "forward"),
            Self::Backward => write!(f, "backward"),
        }
    }
}

/// Rounds `dim` up to the nearest multiple of `mult`.
#[inline]
pub fn align_dim_to_mult(dim: usize, mult: usize) -> usize {
    debug_assert!(mult > 0, "alignment factor must be non-zero");
    num::Integer::next_multiple_of(&dim, &mult)
}

/// Looks up the default and maximum blocksizes for the execution datatype of `a` and nudges both
/// up to a multiple of MR if the triangular matrix is on the left, or NR if it is on the right.
#[inline]
fn aligned_blocksizes<A, H>(a: &A, bsize: &Blksz, info: &H) -> (usize, usize)
where
    A: MatrixDesc + ?Sized,
    H: TuningInfo + ?Sized,
{
    let dt = a.execution_datatype();

    let mnr = if a.is_root_triangular() {
        info.default_mr(dt)
    } else {
        info.default_nr(dt)
    };

    let b_alg = align_dim_to_mult(bsize.for_type(dt), mnr);
    let b_max = align_dim_to_mult(bsize.max_for_type(dt), mnr);
    debug_assert!(b_alg > 0, "default blocksize must be non-zero");

    (b_alg, b_max)
}

/// Blocksize for a forward sweep, using the reference tuning table.
///
/// `i` is the part of `dim` already consumed. `b` is not consulted; it is part of the signature
/// so that this function is interchangeable with other selectors (see [`DetermineKcFn`]).
pub fn determine_kc_f<A, B>(i: usize, dim: usize, a: &A, b: &B, bsize: &Blksz) -> usize
where
    A: MatrixDesc + ?Sized,
    B: MatrixDesc + ?Sized,
{
    determine_kc_f_with(&REFERENCE_TUNING, i, dim, a, b, bsize)
}

/// Blocksize for a forward sweep, aligned using `info`.
pub fn determine_kc_f_with<H, A, B>(
    info: &H,
    i: usize,
    dim: usize,
    a: &A,
    _b: &B,
    bsize: &Blksz,
) -> usize
where
    H: TuningInfo + ?Sized,
    A: MatrixDesc + ?Sized,
    B: MatrixDesc + ?Sized,
{
    debug_assert!(i <= dim, "offset {i} is past the dimension {dim}");

    let (b_alg, b_max) = aligned_blocksizes(a, bsize, info);

    // What is left includes the chunk being sized now. If it fits under the maximum, take all of
    // it in one go.
    let dim_left_now = dim - i;
    if dim_left_now <= b_max {
        dim_left_now
    } else {
        b_alg
    }
}

/// Blocksize for a backward sweep, using the reference tuning table.
///
/// `i` is the part of `dim` already consumed, counted from the end of the dimension. `b` is not
/// consulted (see [`determine_kc_f`]).
pub fn determine_kc_b<A, B>(i: usize, dim: usize, a: &A, b: &B, bsize: &Blksz) -> usize
where
    A: MatrixDesc + ?Sized,
    B: MatrixDesc + ?Sized,
{
    determine_kc_b_with(&REFERENCE_TUNING, i, dim, a, b, bsize)
}

/// Blocksize for a backward sweep, aligned using `info`.
///
/// When the remaining dimension is not a multiple of the default blocksize, the uneven part is
/// taken now rather than left for the last chunk: it is added to this chunk if that stays under
/// the maximum, otherwise this chunk is exactly the uneven part.
pub fn determine_kc_b_with<H, A, B>(
    info: &H,
    i: usize,
    dim: usize,
    a: &A,
    _b: &B,
    bsize: &Blksz,
) -> usize
where
    H: TuningInfo + ?Sized,
    A: MatrixDesc + ?Sized,
    B: MatrixDesc + ?Sized,
{
    debug_assert!(i <= dim, "offset {i} is past the dimension {dim}");

    let (b_alg, b_max) = aligned_blocksizes(a, bsize, info);

    let dim_left_now = dim - i;
    let dim_at_edge = dim_left_now % b_alg;

    if dim_at_edge == 0 {
        return b_alg;
    }

    if dim_left_now <= b_max {
        dim_left_now
    } else if dim_at_edge <= b_max - b_alg {
        b_alg + dim_at_edge
    } else {
        dim_at_edge
    }
}

/// Blocksize for a sweep in `direction`, aligned using `info`.
pub fn determine_kc<H, A, B>(
    direction: Direction,
    info: &H,
    i: usize,
    dim: usize,
    a: &A,
    b: &B,
    bsize: &Blksz,
) -> usize
where
    H: TuningInfo + ?Sized,
    A: MatrixDesc + ?Sized,
    B: MatrixDesc + ?Sized,
{
    match direction {
        Direction::Forward => determine_kc_f_with(info, i, dim, a, b, bsize),
        Direction::Backward => determine_kc_b_with(info, i, dim, a, b, bsize),
    }
}
