// src/templates/hilbert_schmidt.rs
//! Hilbert-Schmidt test circuits
//!
//! The Hilbert-Schmidt test estimates how close a parametrized unitary `V` is
//! to a fixed target `U`. `U` acts on one register, `V` on a second register
//! of the same size. Bell pairs are prepared across the two registers, `U` and
//! the conjugate of `V` are applied, and the pairs are measured back in the
//! Bell basis. The local variant only disentangles the first pair.

use std::fmt::{self, Display};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::quantum::{
    Operation, QuantumFunction, QuantumFunctionError, QuantumResult, QuantumTape, Wires,
};

/// Which measurement layout the test circuit ends with
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HilbertSchmidtVariant {
    /// Bell measurement on every pair
    Global,
    /// Bell measurement on the first pair only
    Local,
}

impl HilbertSchmidtVariant {
    pub fn name(&self) -> &'static str {
        match self {
            HilbertSchmidtVariant::Global => "HilbertSchmidt",
            HilbertSchmidtVariant::Local => "HilbertSchmidtLocal",
        }
    }
}

/// A Hilbert-Schmidt test template
///
/// The combined register is the U tape's wires followed by the declared V
/// wires. The template itself holds no gates; [`HilbertSchmidt::decomposition`]
/// derives them from the stored tapes each time it is called.
#[derive(Clone, Debug)]
pub struct HilbertSchmidt {
    params: Vec<f64>,
    u_tape: Arc<QuantumTape>,
    v_function: QuantumFunction,
    v_tape: QuantumTape,
    v_wires: Wires,
    wires: Wires,
    inverse: bool,
    variant: HilbertSchmidtVariant,
}

impl HilbertSchmidt {
    /// Build the full test for `U = u_tape` and `V = v_function(params, v_wires)`
    pub fn new(
        params: Vec<f64>,
        u_tape: impl Into<Arc<QuantumTape>>,
        v_function: QuantumFunction,
        v_wires: impl Into<Wires>,
    ) -> QuantumResult<Self> {
        Self::with_variant(HilbertSchmidtVariant::Global, params, u_tape, v_function, v_wires)
    }

    /// Build the local test, which only measures the first qubit pair
    pub fn local(
        params: Vec<f64>,
        u_tape: impl Into<Arc<QuantumTape>>,
        v_function: QuantumFunction,
        v_wires: impl Into<Wires>,
    ) -> QuantumResult<Self> {
        Self::with_variant(HilbertSchmidtVariant::Local, params, u_tape, v_function, v_wires)
    }

    pub fn with_variant(
        variant: HilbertSchmidtVariant,
        params: Vec<f64>,
        u_tape: impl Into<Arc<QuantumTape>>,
        v_function: QuantumFunction,
        v_wires: impl Into<Wires>,
    ) -> QuantumResult<Self> {
        let u_tape = u_tape.into();
        let v_wires = v_wires.into();
        let v_tape = v_function.trace(&params, &v_wires)?;
        let u_wires = u_tape.wires();

        if u_wires.len() != v_wires.len() {
            return Err(QuantumFunctionError::WireCountMismatch {
                u_wires: u_wires.clone(),
                v_wires,
            }.into());
        }
        if let Some(wire) = v_tape.wires().iter().find(|w| !v_wires.contains(w)) {
            return Err(QuantumFunctionError::VWireNotDeclared {
                wire: wire.clone(),
                v_wires,
            }.into());
        }
        let shared = Wires::shared_wires(&[u_wires.clone(), v_tape.wires().clone()]);
        if !shared.is_empty() {
            return Err(QuantumFunctionError::SharedWires(shared).into());
        }
        // V's declared wires may still overlap U even when its tape does not
        let wires = Wires::all_wires(&[u_wires.clone(), v_wires.clone()]);
        if wires.first_duplicate().is_some() {
            return Err(QuantumFunctionError::CombinedWiresNotUnique(wires).into());
        }

        debug!(
            template = variant.name(),
            %wires,
            u_operations = u_tape.len(),
            v_operations = v_tape.len(),
            "constructed Hilbert-Schmidt template"
        );

        Ok(HilbertSchmidt {
            params,
            u_tape,
            v_function,
            v_tape,
            v_wires,
            wires,
            inverse: false,
            variant,
        })
    }

    pub fn name(&self) -> &'static str {
        self.variant.name()
    }

    /// The template takes a single parameter array, the one passed to V
    pub fn num_params(&self) -> usize {
        1
    }

    pub fn params(&self) -> &[f64] {
        &self.params
    }

    /// The combined register, U wires then V wires
    pub fn wires(&self) -> &Wires {
        &self.wires
    }

    pub fn u_tape(&self) -> &Arc<QuantumTape> {
        &self.u_tape
    }

    pub fn v_tape(&self) -> &QuantumTape {
        &self.v_tape
    }

    pub fn v_function(&self) -> &QuantumFunction {
        &self.v_function
    }

    pub fn v_wires(&self) -> &Wires {
        &self.v_wires
    }

    pub fn is_inverse(&self) -> bool {
        self.inverse
    }

    pub fn variant(&self) -> HilbertSchmidtVariant {
        self.variant
    }

    /// The gate sequence of the test circuit
    ///
    /// The inversion flag is not applied here; see [`HilbertSchmidt::expand`].
    pub fn decomposition(&self) -> QuantumResult<Vec<Operation>> {
        let half = self.wires.len() / 2;
        let pairs: Vec<Wires> = (0..half)
            .map(|i| Wires::new([self.wires[i].clone(), self.wires[i + half].clone()]))
            .collect();

        let mut ops = Vec::with_capacity(4 * half + self.u_tape.len() + self.v_tape.len());
        for wire in self.wires.iter().take(half) {
            ops.push(Operation::hadamard(wire)?);
        }
        for pair in &pairs {
            ops.push(Operation::cnot(pair.clone())?);
        }

        ops.extend(self.u_tape.iter().cloned());
        // per-gate adjoints, kept in V's tape order
        ops.extend(self.v_tape.iter().map(Operation::adjoint));

        match self.variant {
            HilbertSchmidtVariant::Global => {
                for pair in pairs.iter().rev() {
                    ops.push(Operation::cnot(pair.clone())?);
                }
                for wire in self.wires.iter().take(half) {
                    ops.push(Operation::hadamard(wire)?);
                }
            },
            HilbertSchmidtVariant::Local => {
                // only the first pair is disentangled; V's adjoints stay above
                if let Some(pair) = pairs.first() {
                    ops.push(Operation::cnot(pair.clone())?);
                    ops.push(Operation::hadamard(&pair[0])?);
                }
            },
        }

        Ok(ops)
    }

    /// The decomposition as a tape over the template's wires, inverted if the
    /// template is marked as an adjoint
    pub fn expand(&self) -> QuantumResult<QuantumTape> {
        let mut tape = QuantumTape::with_wires(self.wires.clone());
        for op in self.decomposition()? {
            tape.push(op);
        }
        Ok(if self.inverse { tape.adjoint() } else { tape })
    }

    /// A new template over the same U tape, V function and V wires with the
    /// inversion flag toggled
    pub fn adjoint(&self) -> QuantumResult<Self> {
        let mut adjoint = Self::with_variant(
            self.variant,
            self.params.clone(),
            Arc::clone(&self.u_tape),
            self.v_function.clone(),
            self.v_wires.clone(),
        )?;
        adjoint.inverse = !self.inverse;
        Ok(adjoint)
    }
}

impl Display for HilbertSchmidt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let wires: Vec<String> = self.wires.iter().map(|w| w.to_string()).collect();
        write!(f, "{}", self.name())?;
        if self.inverse {
            write!(f, ".inv()")?;
        }
        write!(f, "(wires=[{}])", wires.join(", "))
    }
}
