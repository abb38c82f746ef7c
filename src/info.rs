//! Hardware tuning information.
//!
//! Register blocking factors (MR and NR) of the micro-kernel, per datatype. Chunk boundaries along
//! the reduction dimension are aligned to one of these.

use crate::{
    consts::{DEFAULT_MR, DEFAULT_NR},
    datatype::{Datatype, DtTable},
    error::{Error, Result},
};

/// Source of the micro-kernel register blocking factors.
pub trait TuningInfo {
    /// Register blocking along `m` for `dt`. Always positive.
    fn default_mr(&self, dt: Datatype) -> usize;
    /// Register blocking along `n` for `dt`. Always positive.
    fn default_nr(&self, dt: Datatype) -> usize;
}

/// Table of register blocking factors.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RegisterBlocking {
    mr: DtTable<usize>,
    nr: DtTable<usize>,
}

/// Register blocking of the reference micro-kernels.
pub static REFERENCE_TUNING: RegisterBlocking = RegisterBlocking::reference();

impl RegisterBlocking {
    /// Creates a table from MR and NR values given in `s`, `d`, `c`, `z` order.
    pub fn new(mr: [usize; 4], nr: [usize; 4]) -> Result<Self> {
        let table = Self {
            mr: DtTable::new(mr),
            nr: DtTable::new(nr),
        };
        for ((dt, mr), (_, nr)) in table.mr.iter().zip(table.nr.iter()) {
            if mr == 0 {
                return Err(Error::ZeroTilingFactor { dt, which: "mr" });
            }
            if nr == 0 {
                return Err(Error::ZeroTilingFactor { dt, which: "nr" });
            }
        }
        Ok(table)
    }

    pub const fn reference() -> Self {
        Self {
            mr: DtTable::new(DEFAULT_MR),
            nr: DtTable::new(DEFAULT_NR),
        }
    }
}

impl Default for RegisterBlocking {
    fn default() -> Self {
        Self::reference()
    }
}

impl TuningInfo for RegisterBlocking {
    #[inline]
    fn default_mr(&self, dt: Datatype) -> usize {
        self.mr.get(dt)
    }

    #[inline]
    fn default_nr(&self, dt: Datatype) -> usize {
        self.nr.get(dt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_factors_are_positive() {
        for dt in Datatype::ALL {
            assert!(REFERENCE_TUNING.default_mr(dt) > 0);
            assert!(REFERENCE_TUNING.default_nr(dt) > 0);
        }
        assert_eq!(REFERENCE_TUNING.default_mr(Datatype::Float), 8);
        assert_eq!(REFERENCE_TUNING.default_nr(Datatype::Scomplex), 2);
    }

    #[test]
    fn test_new_rejects_zero() {
        assert!(matches!(
            RegisterBlocking::new([4, 4, 4, 4], [4, 4, 0, 4]),
            Err(Error::ZeroTilingFactor {
                dt: Datatype::Scomplex,
                which: "nr"
            })
        ));
        assert!(matches!(
            RegisterBlocking::new([0, 4, 4, 4], [4, 4, 4, 4]),
            Err(Error::ZeroTilingFactor {
                dt: Datatype::Float,
                which: "mr"
            })
        ));
        assert!(RegisterBlocking::new([6, 6, 3, 3], [8, 4, 4, 2]).is_ok());
    }
}
