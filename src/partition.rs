//! Reference loop driver.
//!
//! [`KcSweep`] threads the consumed offset through repeated selector calls, the way a blocked
//! algorithm walks its reduction dimension, and yields each chunk in absolute coordinates.

use crate::{
    blksz::Blksz,
    blocksize::{determine_kc, Direction},
    info::{RegisterBlocking, TuningInfo, REFERENCE_TUNING},
    obj::MatrixDesc,
};

/// A chunk of the partitioned dimension: `offset..offset + len`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Chunk {
    pub offset: usize,
    pub len: usize,
}

impl Chunk {
    pub fn end(&self) -> usize {
        self.offset + self.len
    }
}

/// Iterator over the chunks selected for a whole sweep of a dimension.
///
/// Forward chunks are produced from the start of the dimension; backward chunks from its end.
pub struct KcSweep<'a, H: ?Sized, A: ?Sized, B: ?Sized> {
    info: &'a H,
    direction: Direction,
    dim: usize,
    consumed: usize,
    a: &'a A,
    b: &'a B,
    bsize: &'a Blksz,
}

impl<'a, A, B> KcSweep<'a, RegisterBlocking, A, B>
where
    A: MatrixDesc + ?Sized,
    B: MatrixDesc + ?Sized,
{
    /// Creates a sweep aligned with the reference tuning table.
    pub fn new(direction: Direction, dim: usize, a: &'a A, b: &'a B, bsize: &'a Blksz) -> Self {
        Self::with_tuning(&REFERENCE_TUNING, direction, dim, a, b, bsize)
    }
}

impl<'a, H, A, B> KcSweep<'a, H, A, B>
where
    H: TuningInfo + ?Sized,
    A: MatrixDesc + ?Sized,
    B: MatrixDesc + ?Sized,
{
    pub fn with_tuning(
        info: &'a H,
        direction: Direction,
        dim: usize,
        a: &'a A,
        b: &'a B,
        bsize: &'a Blksz,
    ) -> Self {
        Self {
            info,
            direction,
            dim,
            consumed: 0,
            a,
            b,
            bsize,
        }
    }

    /// Part of the dimension already handed out.
    pub fn consumed(&self) -> usize {
        self.consumed
    }
}

impl<'a, H, A, B> Iterator for KcSweep<'a, H, A, B>
where
    H: TuningInfo + ?Sized,
    A: MatrixDesc + ?Sized,
    B: MatrixDesc + ?Sized,
{
    type Item = Chunk;

    fn next(&mut self) -> Option<Self::Item> {
        if self.consumed >= self.dim {
            return None;
        }

        let len = determine_kc(
            self.direction,
            self.info,
            self.consumed,
            self.dim,
            self.a,
            self.b,
            self.bsize,
        );
        debug_assert!(len > 0 && len <= self.dim - self.consumed);

        let offset = match self.direction {
            Direction::Forward => self.consumed,
            Direction::Backward => self.dim - self.consumed - len,
        };
        self.consumed += len;

        Some(Chunk { offset, len })
    }
}

/// Cuts `dim` into the chunks a sweep in `direction` would visit, in visiting order.
pub fn partition<A, B>(direction: Direction, dim: usize, a: &A, b: &B, bsize: &Blksz) -> Vec<Chunk>
where
    A: MatrixDesc + ?Sized,
    B: MatrixDesc + ?Sized,
{
    let chunks: Vec<_> = KcSweep::new(direction, dim, a, b, bsize).collect();
    log::debug!(
        "{direction} sweep over {dim} ({}): {} chunks",
        a.execution_datatype(),
        chunks.len()
    );
    chunks
}
