//! Matrix descriptors.
//!
//! The selectors only need two facts about an operand: the datatype it is computed in and whether
//! the matrix it was partitioned from (its root) is triangular. [`MatrixDesc`] captures exactly
//! that; [`MatrixObj`] is a plain descriptor implementing it.

use crate::datatype::Datatype;

/// Read-only view of the operand properties consumed by the blocksize selectors.
pub trait MatrixDesc {
    /// Datatype in which the computation on this operand is carried out.
    fn execution_datatype(&self) -> Datatype;
    /// Whether the root object of this operand is triangular.
    fn is_root_triangular(&self) -> bool;
}

/// Structural property of a matrix.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Structure {
    #[default]
    General,
    Hermitian,
    Symmetric,
    Triangular,
}

/// Descriptor of a matrix operand.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MatrixObj {
    /// Storage datatype.
    dt: Datatype,
    /// Execution datatype, when it differs from the storage datatype.
    exec_dt: Option<Datatype>,
    /// Structure of this (possibly partitioned) object.
    structure: Structure,
    /// Structure of the object this one was partitioned from.
    root_structure: Structure,
}

impl MatrixObj {
    /// Creates a root descriptor with the given storage datatype and structure.
    pub const fn new(dt: Datatype, structure: Structure) -> Self {
        Self {
            dt,
            exec_dt: None,
            structure,
            root_structure: structure,
        }
    }

    pub const fn general(dt: Datatype) -> Self {
        Self::new(dt, Structure::General)
    }

    pub const fn triangular(dt: Datatype) -> Self {
        Self::new(dt, Structure::Triangular)
    }

    /// Returns a copy of this descriptor computed in `exec_dt`.
    pub const fn with_execution_datatype(mut self, exec_dt: Datatype) -> Self {
        self.exec_dt = Some(exec_dt);
        self
    }

    /// Returns the descriptor of a partition of this object.
    ///
    /// A partition of a structured matrix is treated as general, but it keeps the structure of
    /// the root it came from.
    pub const fn subpart(&self) -> Self {
        Self {
            dt: self.dt,
            exec_dt: self.exec_dt,
            structure: Structure::General,
            root_structure: self.root_structure,
        }
    }

    pub const fn datatype(&self) -> Datatype {
        self.dt
    }

    pub const fn structure(&self) -> Structure {
        self.structure
    }

    pub const fn root_structure(&self) -> Structure {
        self.root_structure
    }
}

impl MatrixDesc for MatrixObj {
    fn execution_datatype(&self) -> Datatype {
        self.exec_dt.unwrap_or(self.dt)
    }

    fn is_root_triangular(&self) -> bool {
        self.root_structure == Structure::Triangular
    }
}
