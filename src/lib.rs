//! trmm-kc - KC blocksize selection for triangular matrix multiplication
//!
//! # About
//! Blocked matrix multiplication cuts its reduction dimension `k` into chunks that are fed to a
//! fixed-shape micro-kernel. When one operand is triangular, the chunk sizes must:
//! - stay below a maximum blocksize derived from the hardware;
//! - be aligned to the micro-kernel register blocking (MR when the triangular matrix is on the
//!   left, NR when it is on the right);
//! - avoid ending a sweep on a trailing chunk too small to keep the micro-kernel busy.
//!
//! This crate provides the per-chunk decision for both traversal directions, see
//! [`determine_kc_f`] and [`determine_kc_b`], together with the small descriptors they consume:
//! the operand properties ([`MatrixDesc`]), the blocksize policy ([`Blksz`]) and the register
//! blocking table ([`TuningInfo`]).
//!
//! # Example
//! ```
//! use trmm_kc::{determine_kc_b, determine_kc_f, Blksz, Datatype, MatrixObj};
//!
//! let a = MatrixObj::triangular(Datatype::Double);
//! let b = MatrixObj::general(Datatype::Double);
//! let kc = Blksz::kc_reference();
//!
//! // 1000 = 3 * 256 + 232: a forward sweep takes the default and leaves the edge for last...
//! assert_eq!(determine_kc_f(0, 1000, &a, &b, &kc), 256);
//! // ...while a backward sweep takes the 232-wide edge first.
//! assert_eq!(determine_kc_b(0, 1000, &a, &b, &kc), 232);
//! ```

pub mod blksz;
pub mod blocksize;
pub mod consts;
pub mod datatype;
pub mod error;
pub mod info;
pub mod obj;
pub mod partition;
pub mod utils;

pub use blksz::Blksz;
pub use blocksize::{
    align_dim_to_mult, determine_kc, determine_kc_b, determine_kc_b_with, determine_kc_f,
    determine_kc_f_with, DetermineKcFn, Direction,
};
pub use datatype::{Datatype, DtTable};
pub use error::{Error, Result};
pub use info::{RegisterBlocking, TuningInfo, REFERENCE_TUNING};
pub use obj::{MatrixDesc, MatrixObj, Structure};
pub use partition::{partition, Chunk, KcSweep};
