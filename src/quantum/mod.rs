// src/quantum/mod.rs
//! Quantum circuit building blocks
//!
//! Wires, gates, operations and tapes, plus the two ways a circuit can be
//! described lazily: a traceable [`QuantumFunction`] and a [`QNode`] bound to
//! a register of device wires.

use thiserror::Error;

pub mod wires;
pub mod gate;
pub mod matrix;
pub mod operation;
pub mod tape;
pub mod qfunc;

pub use wires::{Wire, Wires};
pub use gate::{QuantumGate, StandardGate, ParametrizedGate, CustomMatrixGate};
pub use operation::Operation;
pub use tape::{QuantumTape, TapeBuilder};
pub use qfunc::{QuantumFunction, QNode};

/// Construction-time errors raised by templates when their inputs violate an
/// invariant
#[derive(Debug, Error)]
pub enum QuantumFunctionError {
    #[error("U and V must have the same number of wires: U acts on {u_wires}, V is declared on {v_wires}")]
    WireCountMismatch { u_wires: Wires, v_wires: Wires },

    #[error("all wires in v_tape must be in v_wires: {wire} is not in {v_wires}")]
    VWireNotDeclared { wire: Wire, v_wires: Wires },

    #[error("u_tape and v_tape must act on distinct wires, both act on {0}")]
    SharedWires(Wires),

    #[error("the combined register {0} of U and V wires contains a repeated wire")]
    CombinedWiresNotUnique(Wires),
}

/// Errors raised while building or transforming circuits
#[derive(Debug, Error)]
pub enum QuantumError {
    #[error("wire {wire} is not in the wire order {wire_order}")]
    WireNotInOrder { wire: Wire, wire_order: Wires },

    #[error("wire order is empty but the circuit has {operations} operation(s)")]
    EmptyWireOrder { operations: usize },

    #[error("wire {wire} appears more than once in {wires}")]
    DuplicateWire { wire: Wire, wires: Wires },

    #[error("gate {gate} acts on {expected} wire(s), but {got} were given")]
    GateWireCount { gate: String, expected: usize, got: usize },

    #[error("matrix of shape {rows}x{cols} is not a square matrix of dimension 2^k")]
    InvalidMatrixShape { rows: usize, cols: usize },

    #[error("wire {wire} is not on the device register {device_wires}")]
    WireNotOnDevice { wire: Wire, device_wires: Wires },

    #[error("positions {positions:?} do not fit a register of {n_wires} wire(s)")]
    InvalidPositions { positions: Vec<usize>, n_wires: usize },

    #[error("shape error: {0}")]
    Shape(#[from] ndarray::ShapeError),

    #[error("quantum function error: {0}")]
    QuantumFunction(#[from] QuantumFunctionError),
}

pub type QuantumResult<T> = Result<T, QuantumError>;

/// Re-export commonly used types and traits
pub mod prelude {
    pub use super::{Wire, Wires};
    pub use super::{QuantumGate, StandardGate, ParametrizedGate, CustomMatrixGate};
    pub use super::{Operation, QuantumTape, TapeBuilder};
    pub use super::{QuantumFunction, QNode};
    pub use super::{QuantumError, QuantumFunctionError, QuantumResult};
}
