//! Quantum tapes, circuit templates and matrix transforms
//!
//! This crate records quantum circuits as tapes of gate operations over named
//! wires, computes the dense unitary of a circuit under an explicit wire
//! ordering, and provides the Hilbert-Schmidt test templates used to compare a
//! parametrized unitary against a fixed target.

pub mod quantum;
pub mod transforms;
pub mod templates;

// Create a prelude module for convenient imports
pub mod prelude {
    pub use crate::quantum::prelude::*;
    pub use crate::transforms::{get_unitary_matrix, CircuitSource, UnitaryMatrix};
    pub use crate::templates::{HilbertSchmidt, HilbertSchmidtVariant};
}

// Version and crate information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const CRATE_NAME: &str = env!("CARGO_PKG_NAME");
