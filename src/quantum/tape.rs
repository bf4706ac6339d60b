// src/quantum/tape.rs
//! Quantum tapes
//!
//! A [`QuantumTape`] is the recorded form of a circuit: operations in the
//! order they are applied, plus every wire they touch. Tapes are built
//! explicitly with a [`TapeBuilder`]; nothing is recorded implicitly.

use ndarray::Array2;
use num_complex::Complex64;

use super::gate::{CustomMatrixGate, ParametrizedGate, QuantumGate, StandardGate};
use super::{Operation, QuantumResult, Wire, Wires};

/// An ordered list of operations over a register of wires
#[derive(Clone, Debug, Default, PartialEq)]
pub struct QuantumTape {
    operations: Vec<Operation>,
    wires: Wires,
}

impl QuantumTape {
    /// Create an empty tape
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty tape that already acts on `wires`
    ///
    /// Wires touched later by operations are appended after these.
    pub fn with_wires(wires: impl Into<Wires>) -> Self {
        let mut tape = Self::default();
        for wire in wires.into() {
            tape.wires.push_unique(wire);
        }
        tape
    }

    /// Append an operation
    pub fn push(&mut self, op: Operation) {
        for wire in op.wires() {
            self.wires.push_unique(wire.clone());
        }
        self.operations.push(op);
    }

    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    /// All wires of the tape in first-occurrence order
    pub fn wires(&self) -> &Wires {
        &self.wires
    }

    pub fn num_wires(&self) -> usize {
        self.wires.len()
    }

    /// Number of operations
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Operation> {
        self.operations.iter()
    }

    /// Create the adjoint (dagger) of this tape
    pub fn adjoint(&self) -> QuantumTape {
        let mut result = QuantumTape::with_wires(self.wires.clone());

        // Add the operations in reverse order, each replaced by its adjoint
        for op in self.operations.iter().rev() {
            result.push(op.adjoint());
        }

        result
    }
}

impl<'a> IntoIterator for &'a QuantumTape {
    type Item = &'a Operation;
    type IntoIter = std::slice::Iter<'a, Operation>;

    fn into_iter(self) -> Self::IntoIter {
        self.operations.iter()
    }
}

impl FromIterator<Operation> for QuantumTape {
    fn from_iter<I: IntoIterator<Item = Operation>>(iter: I) -> Self {
        let mut tape = QuantumTape::new();
        for op in iter {
            tape.push(op);
        }
        tape
    }
}

/// A builder for quantum tapes
///
/// Gate shortcuts return `QuantumResult<&mut Self>` so they chain with `?`:
///
/// ```
/// use qtape::quantum::{QuantumResult, TapeBuilder};
///
/// fn bell() -> QuantumResult<()> {
///     let mut builder = TapeBuilder::new();
///     builder.h(0)?.cnot(0, 1)?;
///     assert_eq!(builder.build().len(), 2);
///     Ok(())
/// }
/// # bell().unwrap();
/// ```
#[derive(Clone, Debug, Default)]
pub struct TapeBuilder {
    tape: QuantumTape,
}

impl TapeBuilder {
    /// Create a new tape builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder whose tape starts on `wires`
    pub fn with_wires(wires: impl Into<Wires>) -> Self {
        TapeBuilder { tape: QuantumTape::with_wires(wires) }
    }

    /// Build the quantum tape
    pub fn build(self) -> QuantumTape {
        self.tape
    }

    /// Operations recorded so far
    pub fn operations(&self) -> &[Operation] {
        self.tape.operations()
    }

    /// Append a ready-made operation
    pub fn apply(&mut self, op: Operation) -> &mut Self {
        self.tape.push(op);
        self
    }

    /// Append every operation of `tape`, sharing their gates
    pub fn extend(&mut self, tape: &QuantumTape) -> &mut Self {
        for op in tape {
            self.tape.push(op.clone());
        }
        self
    }

    /// Place any gate on `wires`
    pub fn gate<G: QuantumGate>(&mut self, gate: G, wires: impl Into<Wires>) -> QuantumResult<&mut Self> {
        let op = Operation::new(gate, wires)?;
        Ok(self.apply(op))
    }

    fn single<G: QuantumGate>(&mut self, gate: G, wire: impl Into<Wire>) -> QuantumResult<&mut Self> {
        let wire: Wire = wire.into();
        self.gate(gate, Wires::from(wire))
    }

    fn pair<G: QuantumGate>(&mut self, gate: G, a: impl Into<Wire>, b: impl Into<Wire>) -> QuantumResult<&mut Self> {
        let pair: [Wire; 2] = [a.into(), b.into()];
        self.gate(gate, Wires::new(pair))
    }

    /// Add a Hadamard gate
    pub fn h(&mut self, wire: impl Into<Wire>) -> QuantumResult<&mut Self> {
        self.single(StandardGate::H, wire)
    }

    /// Add a Pauli-X gate
    pub fn x(&mut self, wire: impl Into<Wire>) -> QuantumResult<&mut Self> {
        self.single(StandardGate::X, wire)
    }

    /// Add a Pauli-Y gate
    pub fn y(&mut self, wire: impl Into<Wire>) -> QuantumResult<&mut Self> {
        self.single(StandardGate::Y, wire)
    }

    /// Add a Pauli-Z gate
    pub fn z(&mut self, wire: impl Into<Wire>) -> QuantumResult<&mut Self> {
        self.single(StandardGate::Z, wire)
    }

    pub fn s(&mut self, wire: impl Into<Wire>) -> QuantumResult<&mut Self> {
        self.single(StandardGate::S, wire)
    }

    pub fn t(&mut self, wire: impl Into<Wire>) -> QuantumResult<&mut Self> {
        self.single(StandardGate::T, wire)
    }

    /// Add a CNOT gate
    pub fn cnot(&mut self, control: impl Into<Wire>, target: impl Into<Wire>) -> QuantumResult<&mut Self> {
        self.pair(StandardGate::CNOT, control, target)
    }

    pub fn cz(&mut self, control: impl Into<Wire>, target: impl Into<Wire>) -> QuantumResult<&mut Self> {
        self.pair(StandardGate::CZ, control, target)
    }

    /// Add a SWAP gate
    pub fn swap(&mut self, a: impl Into<Wire>, b: impl Into<Wire>) -> QuantumResult<&mut Self> {
        self.pair(StandardGate::SWAP, a, b)
    }

    /// Add a Toffoli gate (CCNOT)
    pub fn toffoli(
        &mut self,
        control1: impl Into<Wire>,
        control2: impl Into<Wire>,
        target: impl Into<Wire>,
    ) -> QuantumResult<&mut Self> {
        let wires: [Wire; 3] = [control1.into(), control2.into(), target.into()];
        self.gate(StandardGate::Toffoli, Wires::new(wires))
    }

    /// Add an Rx gate
    pub fn rx(&mut self, wire: impl Into<Wire>, theta: f64) -> QuantumResult<&mut Self> {
        self.single(ParametrizedGate::Rx(theta), wire)
    }

    /// Add an Ry gate
    pub fn ry(&mut self, wire: impl Into<Wire>, theta: f64) -> QuantumResult<&mut Self> {
        self.single(ParametrizedGate::Ry(theta), wire)
    }

    /// Add an Rz gate
    pub fn rz(&mut self, wire: impl Into<Wire>, theta: f64) -> QuantumResult<&mut Self> {
        self.single(ParametrizedGate::Rz(theta), wire)
    }

    pub fn phase(&mut self, wire: impl Into<Wire>, theta: f64) -> QuantumResult<&mut Self> {
        self.single(ParametrizedGate::Phase(theta), wire)
    }

    /// Add a controlled Rz gate
    pub fn crz(&mut self, control: impl Into<Wire>, target: impl Into<Wire>, theta: f64) -> QuantumResult<&mut Self> {
        self.pair(ParametrizedGate::CRz(theta), control, target)
    }

    /// Add an arbitrary matrix on `wires`
    pub fn unitary(&mut self, matrix: Array2<Complex64>, wires: impl Into<Wires>) -> QuantumResult<&mut Self> {
        self.gate(CustomMatrixGate::new("QubitUnitary", matrix)?, wires)
    }
}
