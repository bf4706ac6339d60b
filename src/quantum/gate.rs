// src/quantum/gate.rs
//! Quantum gate primitives
//!
//! Every gate exposes its local unitary in the big-endian convention: the
//! first wire a gate is applied to is the most significant qubit of its
//! matrix.

use std::any::Any;
use std::fmt::Debug;
use num_complex::Complex64;
use ndarray::{array, Array2};
use serde::{Deserialize, Serialize};

use super::matrix;
use super::{QuantumError, QuantumResult};

/// Common complex numbers used in quantum gates
pub mod constants {
    use num_complex::Complex64;

    /// The imaginary unit i
    pub const I: Complex64 = Complex64::new(0.0, 1.0);

    /// 1/sqrt(2)
    pub const FRAC_1_SQRT_2: f64 = std::f64::consts::FRAC_1_SQRT_2;
}

const ZERO: Complex64 = Complex64::new(0.0, 0.0);
const ONE: Complex64 = Complex64::new(1.0, 0.0);

/// Trait for quantum gates
pub trait QuantumGate: Debug + Any + Send + Sync {
    /// Returns the number of qubits this gate acts on
    fn qubit_count(&self) -> usize;

    /// Returns the matrix representation of this gate
    fn matrix(&self) -> Array2<Complex64>;

    /// Returns a display name for this gate
    fn name(&self) -> String;

    /// Create a clone of this gate
    fn clone_box(&self) -> Box<dyn QuantumGate>;

    /// Returns the adjoint (Hermitian conjugate) of this gate
    fn adjoint(&self) -> Box<dyn QuantumGate> {
        Box::new(CustomMatrixGate {
            matrix: matrix::dagger(&self.matrix()),
            name: format!("{}†", self.name()),
            qubits: self.qubit_count(),
        })
    }

    /// Compares this gate with another gate by their matrices
    fn equals(&self, other: &dyn QuantumGate) -> bool {
        matrix::approx_eq(&self.matrix(), &other.matrix(), 1e-10)
    }
}

impl Clone for Box<dyn QuantumGate> {
    fn clone(&self) -> Box<dyn QuantumGate> {
        self.clone_box()
    }
}

impl PartialEq for Box<dyn QuantumGate> {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other.as_ref())
    }
}

/// A generic gate defined by its matrix
#[derive(Debug, Clone)]
pub struct CustomMatrixGate {
    pub matrix: Array2<Complex64>,
    pub name: String,
    pub qubits: usize,
}

impl CustomMatrixGate {
    /// Wrap an arbitrary `2^k × 2^k` matrix as a gate on `k` qubits
    ///
    /// Unitarity is not checked.
    pub fn new(name: impl Into<String>, matrix: Array2<Complex64>) -> QuantumResult<Self> {
        let (rows, cols) = matrix.dim();
        let qubits = match matrix::num_qubits_for_dim(rows) {
            Some(k) if rows == cols => k,
            _ => return Err(QuantumError::InvalidMatrixShape { rows, cols }),
        };
        Ok(CustomMatrixGate { matrix, name: name.into(), qubits })
    }
}

impl QuantumGate for CustomMatrixGate {
    fn qubit_count(&self) -> usize {
        self.qubits
    }

    fn matrix(&self) -> Array2<Complex64> {
        self.matrix.clone()
    }

    fn name(&self) -> String {
        self.name.clone()
    }

    fn clone_box(&self) -> Box<dyn QuantumGate> {
        Box::new(self.clone())
    }
}

/// Standard quantum gates (Pauli, Hadamard, etc.)
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum StandardGate {
    /// Identity gate
    I(usize), // number of qubits

    /// Pauli-X gate (NOT gate)
    X,

    /// Pauli-Y gate
    Y,

    /// Pauli-Z gate
    Z,

    /// Hadamard gate
    H,

    /// Phase gate (S gate)
    S,

    /// Adjoint of the S gate
    Sdg,

    /// π/8 gate (T gate)
    T,

    /// Adjoint of the T gate
    Tdg,

    /// CNOT gate
    CNOT,

    /// SWAP gate
    SWAP,

    /// Toffoli gate (CCNOT)
    Toffoli,

    /// Controlled-Z gate
    CZ,

    /// Controlled-Y gate
    CY,
}

impl QuantumGate for StandardGate {
    fn qubit_count(&self) -> usize {
        match self {
            StandardGate::I(n) => *n,
            StandardGate::X | StandardGate::Y | StandardGate::Z |
            StandardGate::H | StandardGate::S | StandardGate::Sdg |
            StandardGate::T | StandardGate::Tdg => 1,
            StandardGate::CNOT | StandardGate::SWAP | StandardGate::CZ |
            StandardGate::CY => 2,
            StandardGate::Toffoli => 3,
        }
    }

    fn matrix(&self) -> Array2<Complex64> {
        use constants::*;
        match self {
            StandardGate::I(n) => matrix::identity(1 << n),
            StandardGate::X => array![[ZERO, ONE], [ONE, ZERO]],
            StandardGate::Y => array![[ZERO, -I], [I, ZERO]],
            StandardGate::Z => array![[ONE, ZERO], [ZERO, -ONE]],
            StandardGate::H => {
                let factor = Complex64::new(FRAC_1_SQRT_2, 0.0);
                array![
                    [factor, factor],
                    [factor, -factor]
                ]
            },
            StandardGate::S => array![[ONE, ZERO], [ZERO, I]],
            StandardGate::Sdg => array![[ONE, ZERO], [ZERO, -I]],
            StandardGate::T => {
                array![
                    [ONE, ZERO],
                    [ZERO, Complex64::new(FRAC_1_SQRT_2, FRAC_1_SQRT_2)]
                ]
            },
            StandardGate::Tdg => {
                array![
                    [ONE, ZERO],
                    [ZERO, Complex64::new(FRAC_1_SQRT_2, -FRAC_1_SQRT_2)]
                ]
            },
            StandardGate::CNOT => controlled(array![[ZERO, ONE], [ONE, ZERO]]),
            StandardGate::CZ => controlled(array![[ONE, ZERO], [ZERO, -ONE]]),
            StandardGate::CY => controlled(array![[ZERO, -I], [I, ZERO]]),
            StandardGate::SWAP => {
                array![
                    [ONE, ZERO, ZERO, ZERO],
                    [ZERO, ZERO, ONE, ZERO],
                    [ZERO, ONE, ZERO, ZERO],
                    [ZERO, ZERO, ZERO, ONE]
                ]
            },
            StandardGate::Toffoli => {
                let mut matrix = Array2::zeros((8, 8));
                for i in 0..8 {
                    // flip the last qubit only when both controls are set
                    let j = if i >> 1 == 0b11 { i ^ 1 } else { i };
                    matrix[[i, j]] = ONE;
                }
                matrix
            }
        }
    }

    fn name(&self) -> String {
        match self {
            StandardGate::I(n) => format!("I({})", n),
            StandardGate::X => "X".to_string(),
            StandardGate::Y => "Y".to_string(),
            StandardGate::Z => "Z".to_string(),
            StandardGate::H => "H".to_string(),
            StandardGate::S => "S".to_string(),
            StandardGate::Sdg => "S†".to_string(),
            StandardGate::T => "T".to_string(),
            StandardGate::Tdg => "T†".to_string(),
            StandardGate::CNOT => "CNOT".to_string(),
            StandardGate::SWAP => "SWAP".to_string(),
            StandardGate::CZ => "CZ".to_string(),
            StandardGate::CY => "CY".to_string(),
            StandardGate::Toffoli => "Toffoli".to_string(),
        }
    }

    fn clone_box(&self) -> Box<dyn QuantumGate> {
        Box::new(self.clone())
    }

    fn adjoint(&self) -> Box<dyn QuantumGate> {
        match self {
            StandardGate::S => Box::new(StandardGate::Sdg),
            StandardGate::Sdg => Box::new(StandardGate::S),
            StandardGate::T => Box::new(StandardGate::Tdg),
            StandardGate::Tdg => Box::new(StandardGate::T),
            // everything else is Hermitian
            _ => self.clone_box(),
        }
    }
}

/// Block-diagonal `diag(I, u)` for a single-qubit `u`, control on the first qubit
fn controlled(u: Array2<Complex64>) -> Array2<Complex64> {
    let mut m = matrix::identity(4);
    m.slice_mut(ndarray::s![2.., 2..]).assign(&u);
    m
}

/// Parametrized quantum gates
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum ParametrizedGate {
    /// Rotation around X-axis
    Rx(f64),

    /// Rotation around Y-axis
    Ry(f64),

    /// Rotation around Z-axis
    Rz(f64),

    /// General single-qubit unitary with Euler angles
    U3(f64, f64, f64),

    /// Controlled rotation around Z-axis
    CRz(f64),

    /// Controlled rotation around X-axis
    CRx(f64),

    /// Controlled rotation around Y-axis
    CRy(f64),

    /// Phase gate with arbitrary angle
    Phase(f64),

    /// Controlled phase gate with arbitrary angle
    CPhase(f64),
}

impl ParametrizedGate {
    fn rx(theta: f64) -> Array2<Complex64> {
        let cos = (theta / 2.0).cos();
        let sin = (theta / 2.0).sin();
        array![
            [Complex64::new(cos, 0.0), Complex64::new(0.0, -sin)],
            [Complex64::new(0.0, -sin), Complex64::new(cos, 0.0)]
        ]
    }

    fn ry(theta: f64) -> Array2<Complex64> {
        let cos = (theta / 2.0).cos();
        let sin = (theta / 2.0).sin();
        array![
            [Complex64::new(cos, 0.0), Complex64::new(-sin, 0.0)],
            [Complex64::new(sin, 0.0), Complex64::new(cos, 0.0)]
        ]
    }

    fn rz(theta: f64) -> Array2<Complex64> {
        array![
            [Complex64::cis(-theta / 2.0), ZERO],
            [ZERO, Complex64::cis(theta / 2.0)]
        ]
    }

    fn phase(theta: f64) -> Array2<Complex64> {
        array![[ONE, ZERO], [ZERO, Complex64::cis(theta)]]
    }
}

impl QuantumGate for ParametrizedGate {
    fn qubit_count(&self) -> usize {
        match self {
            ParametrizedGate::Rx(_) |
            ParametrizedGate::Ry(_) |
            ParametrizedGate::Rz(_) |
            ParametrizedGate::U3(_, _, _) |
            ParametrizedGate::Phase(_) => 1,
            ParametrizedGate::CRz(_) |
            ParametrizedGate::CRx(_) |
            ParametrizedGate::CRy(_) |
            ParametrizedGate::CPhase(_) => 2,
        }
    }

    fn matrix(&self) -> Array2<Complex64> {
        match self {
            ParametrizedGate::Rx(theta) => Self::rx(*theta),
            ParametrizedGate::Ry(theta) => Self::ry(*theta),
            ParametrizedGate::Rz(theta) => Self::rz(*theta),
            ParametrizedGate::Phase(theta) => Self::phase(*theta),
            ParametrizedGate::U3(theta, phi, lambda) => {
                let cos = (theta / 2.0).cos();
                let sin = (theta / 2.0).sin();
                array![
                    [Complex64::new(cos, 0.0), -Complex64::cis(*lambda) * sin],
                    [Complex64::cis(*phi) * sin, Complex64::cis(phi + lambda) * cos]
                ]
            },
            ParametrizedGate::CRx(theta) => controlled(Self::rx(*theta)),
            ParametrizedGate::CRy(theta) => controlled(Self::ry(*theta)),
            ParametrizedGate::CRz(theta) => controlled(Self::rz(*theta)),
            ParametrizedGate::CPhase(theta) => controlled(Self::phase(*theta)),
        }
    }

    fn name(&self) -> String {
        match self {
            ParametrizedGate::Rx(theta) => format!("Rx({:.2})", theta),
            ParametrizedGate::Ry(theta) => format!("Ry({:.2})", theta),
            ParametrizedGate::Rz(theta) => format!("Rz({:.2})", theta),
            ParametrizedGate::U3(theta, phi, lambda) => {
                format!("U3({:.2}, {:.2}, {:.2})", theta, phi, lambda)
            },
            ParametrizedGate::CRz(theta) => format!("CRz({:.2})", theta),
            ParametrizedGate::CRx(theta) => format!("CRx({:.2})", theta),
            ParametrizedGate::CRy(theta) => format!("CRy({:.2})", theta),
            ParametrizedGate::CPhase(theta) => format!("CPhase({:.2})", theta),
            ParametrizedGate::Phase(theta) => format!("P({:.2})", theta)
        }
    }

    fn clone_box(&self) -> Box<dyn QuantumGate> {
        Box::new(self.clone())
    }

    fn adjoint(&self) -> Box<dyn QuantumGate> {
        match self {
            // Rotation gates have adjoint = rotation by negative angle
            ParametrizedGate::Rx(theta) => Box::new(ParametrizedGate::Rx(-*theta)),
            ParametrizedGate::Ry(theta) => Box::new(ParametrizedGate::Ry(-*theta)),
            ParametrizedGate::Rz(theta) => Box::new(ParametrizedGate::Rz(-*theta)),
            ParametrizedGate::U3(theta, phi, lambda) => {
                Box::new(ParametrizedGate::U3(-*theta, -*lambda, -*phi))
            },
            ParametrizedGate::CRz(theta) => Box::new(ParametrizedGate::CRz(-*theta)),
            ParametrizedGate::CRx(theta) => Box::new(ParametrizedGate::CRx(-*theta)),
            ParametrizedGate::CRy(theta) => Box::new(ParametrizedGate::CRy(-*theta)),
            ParametrizedGate::Phase(theta) => Box::new(ParametrizedGate::Phase(-*theta)),
            ParametrizedGate::CPhase(theta) => Box::new(ParametrizedGate::CPhase(-*theta)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn all_gates() -> Vec<Box<dyn QuantumGate>> {
        vec![
            Box::new(StandardGate::I(2)),
            Box::new(StandardGate::X),
            Box::new(StandardGate::Y),
            Box::new(StandardGate::Z),
            Box::new(StandardGate::H),
            Box::new(StandardGate::S),
            Box::new(StandardGate::T),
            Box::new(StandardGate::CNOT),
            Box::new(StandardGate::CZ),
            Box::new(StandardGate::CY),
            Box::new(StandardGate::SWAP),
            Box::new(StandardGate::Toffoli),
            Box::new(ParametrizedGate::Rx(0.3)),
            Box::new(ParametrizedGate::Ry(-1.1)),
            Box::new(ParametrizedGate::Rz(2.4)),
            Box::new(ParametrizedGate::U3(0.4, 1.2, -0.7)),
            Box::new(ParametrizedGate::CRx(0.5)),
            Box::new(ParametrizedGate::CRy(0.6)),
            Box::new(ParametrizedGate::CRz(0.7)),
            Box::new(ParametrizedGate::Phase(PI / 3.0)),
            Box::new(ParametrizedGate::CPhase(PI / 5.0)),
        ]
    }

    #[test]
    fn test_gates_are_unitary_with_matching_dimension() {
        for gate in all_gates() {
            let m = gate.matrix();
            assert_eq!(m.nrows(), 1 << gate.qubit_count(), "{}", gate.name());
            assert!(matrix::is_unitary(&m, 1e-10), "{} is not unitary", gate.name());
        }
    }

    #[test]
    fn test_adjoint_is_conjugate_transpose() {
        for gate in all_gates() {
            let expected = matrix::dagger(&gate.matrix());
            assert!(
                matrix::approx_eq(&gate.adjoint().matrix(), &expected, 1e-10),
                "adjoint of {} is wrong", gate.name()
            );
        }
    }

    #[test]
    fn test_default_adjoint_uses_custom_matrix() {
        let gate = CustomMatrixGate::new("V", StandardGate::S.matrix()).unwrap();
        let adj = gate.adjoint();
        assert_eq!(adj.name(), "V†");
        assert!(adj.equals(&StandardGate::Sdg));
    }

    #[test]
    fn test_custom_matrix_gate_rejects_bad_shapes() {
        let bad = Array2::<Complex64>::zeros((3, 3));
        assert!(CustomMatrixGate::new("bad", bad).is_err());
        let rect = Array2::<Complex64>::zeros((2, 4));
        assert!(CustomMatrixGate::new("rect", rect).is_err());
    }

    #[test]
    fn test_cnot_flips_target_when_control_set() {
        let m = StandardGate::CNOT.matrix();
        assert_eq!(m[[3, 2]], ONE);
        assert_eq!(m[[2, 3]], ONE);
        assert_eq!(m[[2, 2]], ZERO);
    }
}
