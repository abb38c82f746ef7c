//! Blocksize policies.
//!
//! A [`Blksz`] holds, for every datatype, the default blocksize used when a dimension is cut into
//! chunks and the maximum blocksize a chunk may grow to.

use crate::{
    consts::{DEFAULT_KC, MAXIMUM_KC},
    datatype::{Datatype, DtTable},
    error::{Error, Result},
};

/// Per-datatype default and maximum blocksizes.
///
/// Construction guarantees `0 < default <= max` for every datatype.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Blksz {
    defaults: DtTable<usize>,
    maxes: DtTable<usize>,
}

impl Blksz {
    /// Creates a policy from default and maximum values given in `s`, `d`, `c`, `z` order.
    pub fn new(defaults: [usize; 4], maxes: [usize; 4]) -> Result<Self> {
        let blksz = Self {
            defaults: DtTable::new(defaults),
            maxes: DtTable::new(maxes),
        };
        for (dt, default) in blksz.defaults.iter() {
            check_pair(dt, default, blksz.max_for_type(dt))?;
        }
        Ok(blksz)
    }

    /// Creates a policy without checking it, for exercising the selectors' own assertions.
    #[cfg(test)]
    pub(crate) const fn new_unchecked(defaults: [usize; 4], maxes: [usize; 4]) -> Self {
        Self {
            defaults: DtTable::new(defaults),
            maxes: DtTable::new(maxes),
        }
    }

    /// Creates a policy using the same default and maximum for every datatype.
    pub fn uniform(default: usize, max: usize) -> Result<Self> {
        Self::new([default; 4], [max; 4])
    }

    /// Reference KC policy.
    pub fn kc_reference() -> Self {
        Self {
            defaults: DtTable::new(DEFAULT_KC),
            maxes: DtTable::new(MAXIMUM_KC),
        }
    }

    /// Default blocksize for `dt`.
    #[inline]
    pub fn for_type(&self, dt: Datatype) -> usize {
        self.defaults.get(dt)
    }

    /// Maximum blocksize for `dt`.
    #[inline]
    pub fn max_for_type(&self, dt: Datatype) -> usize {
        self.maxes.get(dt)
    }

    /// Replaces the pair for `dt`, leaving the policy untouched if the pair is invalid.
    pub fn set(&mut self, dt: Datatype, default: usize, max: usize) -> Result<()> {
        check_pair(dt, default, max)?;
        self.defaults.set(dt, default);
        self.maxes.set(dt, max);
        Ok(())
    }
}

impl Default for Blksz {
    fn default() -> Self {
        Self::kc_reference()
    }
}

fn check_pair(dt: Datatype, default: usize, max: usize) -> Result<()> {
    if default == 0 || default > max {
        return Err(Error::InvalidBlocksize { dt, default, max });
    }
    Ok(())
}

/// Parses a `DT=DEFAULT:MAX` override, e.g. `d=192:256`.
pub fn parse_override(spec: &str) -> Result<(Datatype, usize, usize)> {
    let malformed = || Error::BlocksizeSpec(spec.to_string());

    let (dt, sizes) = spec.split_once('=').ok_or_else(malformed)?;
    let (default, max) = sizes.split_once(':').ok_or_else(malformed)?;

    let dt = dt.trim().parse::<Datatype>()?;
    let default = default.trim().parse().map_err(|_| malformed())?;
    let max = max.trim().parse().map_err(|_| malformed())?;

    Ok((dt, default, max))
}
