// src/transforms/unitary_matrix.rs
//! Matrix representation of a circuit
//!
//! The unitary of a circuit over a wire order of `n` wires is built by
//! embedding each operation's local matrix into the `2^n`-dimensional space
//! and left-multiplying it onto an accumulator that starts at the identity.
//!
//! Embedding works on the tensor view of a `2^n × 2^n` matrix: `n` row axes
//! followed by `n` column axes, one pair per wire position. The operation's
//! input axes are contracted against the row axes at the operation's wire
//! positions, then its output axes are moved back to those positions.

use std::borrow::Cow;

use ndarray::{Array2, ArrayD, IxDyn};
use num_complex::Complex64;
use tracing::{debug, trace};

use crate::quantum::matrix;
use crate::quantum::{QNode, QuantumError, QuantumFunction, QuantumResult, QuantumTape, Wires};

/// Anything a circuit can be read from
#[derive(Clone, Copy, Debug)]
pub enum CircuitSource<'a> {
    /// A recorded tape, used as is
    Tape(&'a QuantumTape),

    /// A quantum function, traced with `params` over `wires`
    Function {
        func: &'a QuantumFunction,
        params: &'a [f64],
        wires: &'a Wires,
    },

    /// A bound circuit, constructed for `params`
    QNode {
        node: &'a QNode,
        params: &'a [f64],
    },
}

impl<'a> CircuitSource<'a> {
    /// Normalize the source to a tape
    pub fn resolve(&self) -> QuantumResult<Cow<'a, QuantumTape>> {
        match *self {
            CircuitSource::Tape(tape) => Ok(Cow::Borrowed(tape)),
            CircuitSource::Function { func, params, wires } => {
                func.trace(params, wires).map(Cow::Owned)
            },
            CircuitSource::QNode { node, params } => node.construct(params).map(Cow::Owned),
        }
    }
}

impl<'a> From<&'a QuantumTape> for CircuitSource<'a> {
    fn from(tape: &'a QuantumTape) -> Self {
        CircuitSource::Tape(tape)
    }
}

/// Transform computing the unitary of a circuit under a fixed wire order
#[derive(Clone, Debug)]
pub struct UnitaryMatrix {
    wire_order: Wires,
}

impl UnitaryMatrix {
    /// Create the transform; the wire order must not repeat wires
    pub fn new(wire_order: impl Into<Wires>) -> QuantumResult<Self> {
        let wire_order = wire_order.into();
        wire_order.ensure_unique()?;
        Ok(UnitaryMatrix { wire_order })
    }

    pub fn wire_order(&self) -> &Wires {
        &self.wire_order
    }

    /// The `2^n × 2^n` unitary of `source`, rows and columns ordered by the
    /// wire order with its first wire most significant
    pub fn compute<'a>(&self, source: impl Into<CircuitSource<'a>>) -> QuantumResult<Array2<Complex64>> {
        let tape = source.into().resolve()?;
        let n_wires = self.wire_order.len();

        if n_wires == 0 && !tape.is_empty() {
            return Err(QuantumError::EmptyWireOrder { operations: tape.len() });
        }
        debug!(
            n_wires,
            n_operations = tape.len(),
            "computing unitary matrix"
        );

        let mut unitary = matrix::identity(1 << n_wires);
        for op in tape.iter() {
            let positions = self.wire_order.indices(op.wires())?;
            trace!(operation = %op, ?positions, "embedding operation");
            let global = expand_matrix(&op.matrix(), &positions, n_wires)?;
            unitary = global.dot(&unitary);
        }

        Ok(unitary)
    }
}

/// Compute the unitary of `source` over `wire_order`
pub fn get_unitary_matrix<'a>(
    source: impl Into<CircuitSource<'a>>,
    wire_order: &Wires,
) -> QuantumResult<Array2<Complex64>> {
    UnitaryMatrix::new(wire_order.clone())?.compute(source)
}

/// Embed the local matrix of a `k`-wire operation into an `n`-wire space
///
/// `positions[j]` is the wire-order position of the operation's `j`-th wire.
/// Positions must be distinct and below `n`, and `op_matrix` must be
/// `2^k × 2^k` with `k = positions.len()`.
pub fn expand_matrix(
    op_matrix: &Array2<Complex64>,
    positions: &[usize],
    n_wires: usize,
) -> QuantumResult<Array2<Complex64>> {
    let k = positions.len();
    let distinct = positions.iter().enumerate().all(|(i, p)| !positions[..i].contains(p));
    if k > n_wires || !distinct || positions.iter().any(|&p| p >= n_wires) {
        return Err(QuantumError::InvalidPositions { positions: positions.to_vec(), n_wires });
    }
    let (rows, cols) = op_matrix.dim();
    if rows != 1 << k || cols != 1 << k {
        return Err(QuantumError::InvalidMatrixShape { rows, cols });
    }

    let dim = 1_usize << n_wires;
    let tensor_shape = IxDyn(&vec![2; 2 * n_wires]);
    let untouched: Vec<usize> = (0..n_wires).filter(|p| !positions.contains(p)).collect();

    // identity as a tensor with axes (row_0..row_n, col_0..col_n); bring the
    // row axes being acted on to the front
    let eye: ArrayD<Complex64> = matrix::identity(dim).into_shape(tensor_shape.clone())?;
    let front: Vec<usize> = positions.iter()
        .chain(untouched.iter())
        .copied()
        .chain(n_wires..2 * n_wires)
        .collect();
    let eye = eye.permuted_axes(IxDyn(&front))
        .as_standard_layout()
        .into_owned()
        .into_shape((1 << k, 1 << (2 * n_wires - k)))?;

    // contract the op's input axes; axes now read (out_0..out_k, untouched rows, cols)
    let contracted = op_matrix.dot(&eye).into_shape(tensor_shape)?;

    // send axis j < n to position (positions ++ untouched)[j]
    let mut back: Vec<usize> = (0..2 * n_wires).collect();
    for (j, &dest) in positions.iter().chain(untouched.iter()).enumerate() {
        back[dest] = j;
    }
    let expanded = contracted.permuted_axes(IxDyn(&back))
        .as_standard_layout()
        .into_owned()
        .into_shape((dim, dim))?;
    Ok(expanded)
}
