//! Numeric datatypes and per-datatype tables.

use crate::error::Error;

use std::{fmt, str::FromStr};

/// Numeric precision under which a kernel executes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum Datatype {
    /// Single-precision real.
    #[value(alias = "s")]
    Float,
    /// Double-precision real.
    #[value(alias = "d")]
    Double,
    /// Single-precision complex.
    #[value(alias = "c")]
    Scomplex,
    /// Double-precision complex.
    #[value(alias = "z")]
    Dcomplex,
}

impl Datatype {
    /// All datatypes, in canonical `s`, `d`, `c`, `z` order.
    pub const ALL: [Datatype; 4] = [
        Datatype::Float,
        Datatype::Double,
        Datatype::Scomplex,
        Datatype::Dcomplex,
    ];

    /// Position of the datatype in [`Datatype::ALL`].
    pub const fn index(self) -> usize {
        match self {
            Self::Float => 0,
            Self::Double => 1,
            Self::Scomplex => 2,
            Self::Dcomplex => 3,
        }
    }

    /// BLAS-style prefix character.
    pub const fn letter(self) -> char {
        match self {
            Self::Float => 's',
            Self::Double => 'd',
            Self::Scomplex => 'c',
            Self::Dcomplex => 'z',
        }
    }
}

impl fmt::Display for Datatype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

impl FromStr for Datatype {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "s" | "float" => Ok(Self::Float),
            "d" | "double" => Ok(Self::Double),
            "c" | "scomplex" => Ok(Self::Scomplex),
            "z" | "dcomplex" => Ok(Self::Dcomplex),
            _ => Err(Error::UnknownDatatype(s.to_string())),
        }
    }
}

/// One value per datatype.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DtTable<T> {
    values: [T; 4],
}

impl<T: Copy> DtTable<T> {
    /// Creates a table from values given in `s`, `d`, `c`, `z` order.
    pub const fn new(values: [T; 4]) -> Self {
        Self { values }
    }

    #[inline]
    pub fn get(&self, dt: Datatype) -> T {
        self.values[dt.index()]
    }

    pub fn set(&mut self, dt: Datatype, value: T) {
        self.values[dt.index()] = value;
    }

    /// Iterates over `(datatype, value)` pairs in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (Datatype, T)> + '_ {
        Datatype::ALL.into_iter().zip(self.values.iter().copied())
    }
}
