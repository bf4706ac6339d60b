// src/transforms/mod.rs
//! Transforms over circuits
//!
//! A transform reads a circuit from any [`CircuitSource`] and produces a new
//! representation of it.

pub mod unitary_matrix;

pub use unitary_matrix::{expand_matrix, get_unitary_matrix, CircuitSource, UnitaryMatrix};
