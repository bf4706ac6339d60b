// src/quantum/operation.rs
//! Gates placed on wires
//!
//! An [`Operation`] pairs a gate with the wires it acts on. The gate is held
//! behind an `Arc`, so cloning an operation shares the gate object instead of
//! copying it; operations are never mutated after construction.

use std::fmt::{self, Display};
use std::sync::Arc;

use ndarray::Array2;
use num_complex::Complex64;

use super::gate::{CustomMatrixGate, ParametrizedGate, QuantumGate, StandardGate};
use super::{QuantumError, QuantumResult, Wire, Wires};

/// A gate applied to an ordered list of distinct wires
#[derive(Clone, Debug)]
pub struct Operation {
    gate: Arc<dyn QuantumGate>,
    wires: Wires,
}

impl Operation {
    /// Place `gate` on `wires`
    pub fn new<G: QuantumGate>(gate: G, wires: impl Into<Wires>) -> QuantumResult<Self> {
        Self::from_shared(Arc::new(gate), wires.into())
    }

    /// Place an already shared gate on `wires`
    pub fn from_shared(gate: Arc<dyn QuantumGate>, wires: Wires) -> QuantumResult<Self> {
        if wires.len() != gate.qubit_count() {
            return Err(QuantumError::GateWireCount {
                gate: gate.name(),
                expected: gate.qubit_count(),
                got: wires.len(),
            });
        }
        wires.ensure_unique()?;
        Ok(Operation { gate, wires })
    }

    pub fn gate(&self) -> &dyn QuantumGate {
        self.gate.as_ref()
    }

    pub fn wires(&self) -> &Wires {
        &self.wires
    }

    pub fn name(&self) -> String {
        self.gate.name()
    }

    /// The local `2^k × 2^k` matrix, ordered like [`Operation::wires`]
    pub fn matrix(&self) -> Array2<Complex64> {
        self.gate.matrix()
    }

    /// The inverse operation on the same wires
    pub fn adjoint(&self) -> Operation {
        Operation {
            gate: Arc::from(self.gate.adjoint()),
            wires: self.wires.clone(),
        }
    }

    /// Returns true if both operations hold the very same gate object
    pub fn shares_gate(&self, other: &Operation) -> bool {
        Arc::ptr_eq(&self.gate, &other.gate)
    }

    fn single<G: QuantumGate>(gate: G, wire: impl Into<Wire>) -> QuantumResult<Self> {
        let wire: Wire = wire.into();
        Self::new(gate, Wires::from(wire))
    }

    pub fn hadamard(wire: impl Into<Wire>) -> QuantumResult<Self> {
        Self::single(StandardGate::H, wire)
    }

    pub fn pauli_x(wire: impl Into<Wire>) -> QuantumResult<Self> {
        Self::single(StandardGate::X, wire)
    }

    pub fn pauli_y(wire: impl Into<Wire>) -> QuantumResult<Self> {
        Self::single(StandardGate::Y, wire)
    }

    pub fn pauli_z(wire: impl Into<Wire>) -> QuantumResult<Self> {
        Self::single(StandardGate::Z, wire)
    }

    /// CNOT with the first wire as control
    pub fn cnot(wires: impl Into<Wires>) -> QuantumResult<Self> {
        Self::new(StandardGate::CNOT, wires)
    }

    pub fn rx(theta: f64, wire: impl Into<Wire>) -> QuantumResult<Self> {
        Self::single(ParametrizedGate::Rx(theta), wire)
    }

    pub fn ry(theta: f64, wire: impl Into<Wire>) -> QuantumResult<Self> {
        Self::single(ParametrizedGate::Ry(theta), wire)
    }

    pub fn rz(theta: f64, wire: impl Into<Wire>) -> QuantumResult<Self> {
        Self::single(ParametrizedGate::Rz(theta), wire)
    }

    /// An arbitrary matrix as an operation, the number of wires must match its dimension
    pub fn qubit_unitary(matrix: Array2<Complex64>, wires: impl Into<Wires>) -> QuantumResult<Self> {
        Self::new(CustomMatrixGate::new("QubitUnitary", matrix)?, wires)
    }
}

impl PartialEq for Operation {
    fn eq(&self, other: &Self) -> bool {
        self.wires == other.wires
            && self.name() == other.name()
            && self.gate.equals(other.gate.as_ref())
    }
}

impl Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let wires: Vec<String> = self.wires.iter().map(|w| w.to_string()).collect();
        write!(f, "{}({})", self.name(), wires.join(", "))
    }
}
