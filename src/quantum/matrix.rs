// src/quantum/matrix.rs
//! Small dense-matrix helpers shared by gates, transforms and tests

use ndarray::{linalg, Array2};
use num_complex::Complex64;

/// The `dim × dim` complex identity
pub fn identity(dim: usize) -> Array2<Complex64> {
    Array2::eye(dim)
}

/// Conjugate transpose
pub fn dagger(m: &Array2<Complex64>) -> Array2<Complex64> {
    m.t().mapv(|z| z.conj())
}

/// Kronecker product `a ⊗ b`, with `a` on the most significant factor
pub fn kron(a: &Array2<Complex64>, b: &Array2<Complex64>) -> Array2<Complex64> {
    linalg::kron(&a.view(), &b.view())
}

/// Element-wise comparison within `tol`
pub fn approx_eq(a: &Array2<Complex64>, b: &Array2<Complex64>, tol: f64) -> bool {
    a.dim() == b.dim()
        && a.iter().zip(b.iter()).all(|(x, y)| (x - y).norm() < tol)
}

/// Returns true if `m† m` is the identity within `tol`
pub fn is_unitary(m: &Array2<Complex64>, tol: f64) -> bool {
    let (rows, cols) = m.dim();
    rows == cols && approx_eq(&dagger(m).dot(m), &identity(rows), tol)
}

/// `Some(k)` if `dim == 2^k`
pub fn num_qubits_for_dim(dim: usize) -> Option<usize> {
    (dim.is_power_of_two()).then(|| dim.trailing_zeros() as usize)
}
