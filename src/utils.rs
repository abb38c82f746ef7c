//! Utility functions for generating random sweep configurations.

use crate::{
    blksz::Blksz,
    blocksize::Direction,
    datatype::Datatype,
    error::Result,
    info::{RegisterBlocking, TuningInfo},
    obj::{MatrixDesc, MatrixObj},
};

use rand::prelude::*;

/// A complete, randomly drawn input to a sweep: dimension, policy, tuning and operands.
#[derive(Clone, Copy, Debug)]
pub struct SweepCase {
    pub dim: usize,
    pub direction: Direction,
    pub a: MatrixObj,
    pub b: MatrixObj,
    pub bsize: Blksz,
    pub info: RegisterBlocking,
}

impl SweepCase {
    /// Draws a single case with dimensions in `1..=max_dim`.
    pub fn rand(rng: &mut impl Rng, max_dim: usize) -> Result<Self> {
        let dt = Datatype::ALL[rng.gen_range(0..Datatype::ALL.len())];
        let direction = if rng.gen_bool(0.5) {
            Direction::Forward
        } else {
            Direction::Backward
        };

        let a = if rng.gen_bool(0.5) {
            MatrixObj::triangular(dt)
        } else {
            MatrixObj::general(dt)
        };
        let a = if rng.gen_bool(0.25) { a.subpart() } else { a };
        let b = MatrixObj::general(dt);

        let b_alg = rng.gen_range(1..=512);
        let b_max = b_alg + rng.gen_range(0..=256);
        let bsize = Blksz::uniform(b_alg, b_max)?;

        let mr = rng.gen_range(1..=16);
        let nr = rng.gen_range(1..=16);
        let info = RegisterBlocking::new([mr; 4], [nr; 4])?;

        Ok(Self {
            dim: rng.gen_range(1..=max_dim.max(1)),
            direction,
            a,
            b,
            bsize,
            info,
        })
    }

    /// Tiling factor the selectors align to for this case.
    pub fn mnr(&self) -> usize {
        let dt = self.a.execution_datatype();
        if self.a.is_root_triangular() {
            self.info.default_mr(dt)
        } else {
            self.info.default_nr(dt)
        }
    }
}

/// Produces `n` random cases from a generator seeded with `seed` (0 if unspecified).
pub fn rand_cases(n: usize, max_dim: usize, seed: Option<u64>) -> Result<Vec<SweepCase>> {
    let seed = seed.unwrap_or(0);
    let mut rng = rand::rngs::SmallRng::seed_from_u64(seed);
    (0..n).map(|_| SweepCase::rand(&mut rng, max_dim)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rand_cases_are_reproducible() {
        let first = rand_cases(32, 1000, Some(7)).unwrap();
        let second = rand_cases(32, 1000, Some(7)).unwrap();
        assert_eq!(first.len(), 32);
        for (x, y) in first.iter().zip(&second) {
            assert_eq!(x.dim, y.dim);
            assert_eq!(x.direction, y.direction);
            assert_eq!(x.a, y.a);
            assert_eq!(x.bsize, y.bsize);
            assert_eq!(x.info, y.info);
        }
    }

    #[test]
    fn test_rand_cases_respect_bounds() {
        for case in rand_cases(256, 50, None).unwrap() {
            assert!((1..=50).contains(&case.dim));
            assert!(case.mnr() > 0);
            let dt = case.a.datatype();
            assert!(case.bsize.for_type(dt) <= case.bsize.max_for_type(dt));
        }
    }
}
