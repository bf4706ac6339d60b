// src/quantum/qfunc.rs
//! Lazily described circuits
//!
//! A [`QuantumFunction`] is a callable that records gates into a
//! [`TapeBuilder`] given parameters and wires; tracing it produces a
//! [`QuantumTape`]. A [`QNode`] binds a quantum function to a fixed register
//! of device wires and builds its tape on demand.

use std::fmt;
use std::sync::Arc;

use tracing::trace;

use super::{QuantumError, QuantumResult, QuantumTape, TapeBuilder, Wires};

type QFn = dyn Fn(&mut TapeBuilder, &[f64], &Wires) -> QuantumResult<()> + Send + Sync;

/// A traceable quantum function
///
/// Cloning is cheap and yields a handle to the same function.
#[derive(Clone)]
pub struct QuantumFunction {
    name: String,
    func: Arc<QFn>,
}

impl QuantumFunction {
    pub fn new<F>(name: impl Into<String>, func: F) -> Self
    where
        F: Fn(&mut TapeBuilder, &[f64], &Wires) -> QuantumResult<()> + Send + Sync + 'static,
    {
        QuantumFunction { name: name.into(), func: Arc::new(func) }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Run the function against a fresh builder and return what it recorded
    pub fn trace(&self, params: &[f64], wires: &Wires) -> QuantumResult<QuantumTape> {
        let mut builder = TapeBuilder::new();
        (self.func)(&mut builder, params, wires)?;
        let tape = builder.build();
        trace!(function = %self.name, operations = tape.len(), "traced quantum function");
        Ok(tape)
    }

    /// Returns true if both handles refer to the same function
    pub fn ptr_eq(&self, other: &QuantumFunction) -> bool {
        Arc::ptr_eq(&self.func, &other.func)
    }
}

impl fmt::Debug for QuantumFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuantumFunction").field("name", &self.name).finish_non_exhaustive()
    }
}

/// A quantum function bound to a register of device wires
#[derive(Clone, Debug)]
pub struct QNode {
    func: QuantumFunction,
    wires: Wires,
}

impl QNode {
    pub fn new(func: QuantumFunction, wires: impl Into<Wires>) -> QuantumResult<Self> {
        let wires = wires.into();
        wires.ensure_unique()?;
        Ok(QNode { func, wires })
    }

    /// Device wires
    pub fn wires(&self) -> &Wires {
        &self.wires
    }

    pub fn func(&self) -> &QuantumFunction {
        &self.func
    }

    /// Build the tape for `params`
    ///
    /// Fails if the function touches a wire that is not on the device.
    pub fn construct(&self, params: &[f64]) -> QuantumResult<QuantumTape> {
        let tape = self.func.trace(params, &self.wires)?;
        if let Some(wire) = tape.wires().iter().find(|w| !self.wires.contains(w)) {
            return Err(QuantumError::WireNotOnDevice {
                wire: wire.clone(),
                device_wires: self.wires.clone(),
            });
        }
        Ok(tape)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ladder() -> QuantumFunction {
        QuantumFunction::new("ladder", |b, params, wires| {
            for (wire, theta) in wires.iter().zip(params) {
                b.ry(wire.clone(), *theta)?;
            }
            for k in 1..wires.len() {
                b.cnot(wires[k - 1].clone(), wires[k].clone())?;
            }
            Ok(())
        })
    }

    #[test]
    fn test_trace_records_in_order() {
        let tape = ladder().trace(&[0.1, 0.2], &Wires::from(["a", "b"])).unwrap();
        let names: Vec<String> = tape.iter().map(|op| op.to_string()).collect();
        assert_eq!(names, vec!["Ry(0.10)(a)", "Ry(0.20)(b)", "CNOT(a, b)"]);
    }

    #[test]
    fn test_trace_propagates_builder_errors() {
        let broken = QuantumFunction::new("broken", |b, _, _| {
            b.cnot(0, 0)?;
            Ok(())
        });
        assert!(broken.trace(&[], &Wires::default()).is_err());
    }

    #[test]
    fn test_qnode_rejects_foreign_wires() {
        let stray = QuantumFunction::new("stray", |b, _, _| {
            b.h(7)?;
            Ok(())
        });
        let node = QNode::new(stray, Wires::range(2)).unwrap();
        let err = node.construct(&[]).unwrap_err();
        assert!(matches!(err, QuantumError::WireNotOnDevice { .. }));
    }

    #[test]
    fn test_qnode_constructs_over_device_wires() {
        let node = QNode::new(ladder(), Wires::range(3)).unwrap();
        let tape = node.construct(&[0.0, 0.0, 0.0]).unwrap();
        assert_eq!(tape.len(), 5);
        assert_eq!(tape.wires(), &Wires::range(3));
    }

    #[test]
    fn test_clones_share_function() {
        let f = ladder();
        assert!(f.ptr_eq(&f.clone()));
        assert!(!f.ptr_eq(&ladder()));
    }
}
