// src/templates/mod.rs
//! Circuit templates
//!
//! Templates are parametrized operations that are defined by the gate
//! sequence they decompose into.

pub mod hilbert_schmidt;

pub use hilbert_schmidt::{HilbertSchmidt, HilbertSchmidtVariant};
