//hilbert_schmidt_tests.rs

#[cfg(test)]
mod tests {
    use num_complex::Complex64;
    use ndarray::Array2;
    use std::sync::Arc;

    use qtape::quantum::prelude::*;
    use qtape::quantum::matrix::dagger;
    use qtape::templates::{HilbertSchmidt, HilbertSchmidtVariant};
    use qtape::transforms::get_unitary_matrix;

    /// Helper function for comparing complex numbers with tolerance
    fn complex_approx_eq(a: Complex64, b: Complex64, epsilon: f64) -> bool {
        (a - b).norm() < epsilon
    }

    fn matrix_approx_eq(a: &Array2<Complex64>, b: &Array2<Complex64>, epsilon: f64) -> bool {
        if a.dim() != b.dim() {
            return false;
        }
        a.iter().zip(b.iter()).all(|(x, y)| complex_approx_eq(*x, *y, epsilon))
    }

    fn display(ops: &[Operation]) -> Vec<String> {
        ops.iter().map(|op| op.to_string()).collect()
    }

    fn empty_v() -> QuantumFunction {
        QuantumFunction::new("empty", |_, _, _| Ok(()))
    }

    fn rz_v() -> QuantumFunction {
        QuantumFunction::new("rz", |b, params, wires| {
            b.rz(&wires[0], params[0])?;
            Ok(())
        })
    }

    /// Two-qubit ansatz: Ry on each wire, then a CNOT
    fn ry_cnot_v() -> QuantumFunction {
        QuantumFunction::new("ry_cnot", |b, params, wires| {
            b.ry(&wires[0], params[0])?;
            b.ry(&wires[1], params[1])?;
            b.cnot(&wires[0], &wires[1])?;
            Ok(())
        })
    }

    fn u_tape(build: impl FnOnce(&mut TapeBuilder)) -> QuantumTape {
        let mut builder = TapeBuilder::new();
        build(&mut builder);
        builder.build()
    }

    #[test]
    fn test_global_with_empty_tapes() {
        let hs = HilbertSchmidt::new(vec![], QuantumTape::with_wires([0]), empty_v(), [1]).unwrap();
        assert_eq!(hs.wires(), &Wires::from([0, 1]));
        assert_eq!(
            display(&hs.decomposition().unwrap()),
            vec!["H(0)", "CNOT(0, 1)", "CNOT(0, 1)", "H(0)"]
        );
    }

    #[test]
    fn test_local_with_empty_tapes() {
        let hs = HilbertSchmidt::local(vec![], QuantumTape::with_wires([0]), empty_v(), [1]).unwrap();
        assert_eq!(
            display(&hs.decomposition().unwrap()),
            vec!["H(0)", "CNOT(0, 1)", "CNOT(0, 1)", "H(0)"]
        );
        // one pair: the local test closes exactly like the global one
        let global = HilbertSchmidt::new(vec![], QuantumTape::with_wires([0]), empty_v(), [1]).unwrap();
        assert_eq!(hs.decomposition().unwrap(), global.decomposition().unwrap());
    }

    #[test]
    fn test_global_gate_order() {
        let u = u_tape(|b| {
            b.h("a").unwrap().cnot("a", "b").unwrap();
        });
        let hs = HilbertSchmidt::new(vec![0.5, 0.25], u, ry_cnot_v(), ["c", "d"]).unwrap();

        assert_eq!(hs.wires(), &Wires::from(["a", "b", "c", "d"]));
        assert_eq!(
            display(&hs.decomposition().unwrap()),
            vec![
                "H(a)", "H(b)",
                "CNOT(a, c)", "CNOT(b, d)",
                "H(a)", "CNOT(a, b)",
                "Ry(-0.50)(c)", "Ry(-0.25)(d)", "CNOT(c, d)",
                "CNOT(b, d)", "CNOT(a, c)",
                "H(a)", "H(b)",
            ]
        );
    }

    #[test]
    fn test_local_gate_order() {
        let u = u_tape(|b| {
            b.h("a").unwrap().cnot("a", "b").unwrap();
        });
        let hs = HilbertSchmidt::local(vec![0.5, 0.25], u, ry_cnot_v(), ["c", "d"]).unwrap();

        assert_eq!(
            display(&hs.decomposition().unwrap()),
            vec![
                "H(a)", "H(b)",
                "CNOT(a, c)", "CNOT(b, d)",
                "H(a)", "CNOT(a, b)",
                "Ry(-0.50)(c)", "Ry(-0.25)(d)", "CNOT(c, d)",
                "CNOT(a, c)", "H(a)",
            ]
        );
    }

    #[test]
    fn test_decomposition_is_repeatable() {
        let u = u_tape(|b| {
            b.x(0).unwrap();
        });
        let hs = HilbertSchmidt::new(vec![1.0], u, rz_v(), [1]).unwrap();
        let first = hs.decomposition().unwrap();
        let second = hs.decomposition().unwrap();
        assert_eq!(first, second);
        assert_eq!(hs.u_tape().len(), 1);
    }

    #[test]
    fn test_u_operations_are_listed_not_copied() {
        let u = Arc::new(u_tape(|b| {
            b.rx(0, 0.3).unwrap().ry(0, 0.6).unwrap();
        }));
        let hs = HilbertSchmidt::new(vec![0.1], Arc::clone(&u), rz_v(), [1]).unwrap();
        let ops = hs.decomposition().unwrap();

        assert!(ops[2].shares_gate(&u.operations()[0]));
        assert!(ops[3].shares_gate(&u.operations()[1]));
        assert!(Arc::ptr_eq(hs.u_tape(), &u));
    }

    #[test]
    fn test_wire_count_mismatch() {
        let u = u_tape(|b| {
            b.cnot(0, 1).unwrap();
        });
        let err = HilbertSchmidt::new(vec![], u, empty_v(), [2]).unwrap_err();
        assert!(matches!(
            err,
            QuantumError::QuantumFunction(QuantumFunctionError::WireCountMismatch { .. })
        ));
    }

    #[test]
    fn test_shared_wires() {
        let u = u_tape(|b| {
            b.h(0).unwrap();
        });
        let err = HilbertSchmidt::new(vec![0.3], u, rz_v(), [0]).unwrap_err();
        match err {
            QuantumError::QuantumFunction(QuantumFunctionError::SharedWires(shared)) => {
                assert_eq!(shared, Wires::from([0]));
            },
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_error_messages_name_the_invariant() {
        let u = u_tape(|b| {
            b.h(0).unwrap();
        });
        let err = HilbertSchmidt::local(vec![0.3], u, rz_v(), [0]).unwrap_err();
        assert!(err.to_string().contains("distinct wires"));
    }

    #[test]
    fn test_v_function_errors_propagate() {
        let broken = QuantumFunction::new("broken", |b, _, wires| {
            b.cnot(&wires[0], &wires[0])?;
            Ok(())
        });
        let err = HilbertSchmidt::new(vec![], QuantumTape::with_wires([0]), broken, [1]).unwrap_err();
        assert!(matches!(err, QuantumError::DuplicateWire { .. }));
    }

    #[test]
    fn test_adjoint_toggles_only_inverse() {
        let u = Arc::new(u_tape(|b| {
            b.t(0).unwrap();
        }));
        let v = rz_v();
        let hs = HilbertSchmidt::local(vec![0.8], Arc::clone(&u), v.clone(), [1]).unwrap();
        let adj = hs.adjoint().unwrap();

        assert!(adj.is_inverse());
        assert!(Arc::ptr_eq(adj.u_tape(), hs.u_tape()));
        assert!(adj.v_function().ptr_eq(&v));
        assert_eq!(adj.v_wires(), hs.v_wires());
        assert_eq!(adj.params(), hs.params());
        assert_eq!(adj.variant(), HilbertSchmidtVariant::Local);
        assert_eq!(adj.num_params(), 1);

        assert!(!adj.adjoint().unwrap().is_inverse());
    }

    #[test]
    fn test_inverse_expansion_is_matrix_adjoint() {
        let u = u_tape(|b| {
            b.s(0).unwrap().h(0).unwrap();
        });
        let hs = HilbertSchmidt::new(vec![0.4], u, rz_v(), [1]).unwrap();

        let forward = get_unitary_matrix(&hs.expand().unwrap(), hs.wires()).unwrap();
        let backward = get_unitary_matrix(&hs.adjoint().unwrap().expand().unwrap(), hs.wires()).unwrap();
        assert!(matrix_approx_eq(&backward, &dagger(&forward), 1e-10));
    }

    #[test]
    fn test_overlap_amplitude() {
        // ⟨00|HS|00⟩ = Tr(U V†ᵀ)/2, which is cos((θ - φ)/2) for Rz rotations
        for (theta, phi) in [(0.7, 0.7), (0.7, 0.1), (2.0, -1.0)] {
            let u = u_tape(|b| {
                b.rz(0, theta).unwrap();
            });
            for variant in [HilbertSchmidtVariant::Global, HilbertSchmidtVariant::Local] {
                let hs = HilbertSchmidt::with_variant(variant, vec![phi], u.clone(), rz_v(), [1]).unwrap();
                let m = get_unitary_matrix(&hs.expand().unwrap(), hs.wires()).unwrap();
                let expected: f64 = ((theta - phi) / 2.0_f64).cos();
                assert!((m[[0, 0]].norm() - expected.abs()).abs() < 1e-10);
            }
        }
    }

    #[test]
    fn test_matrix_matches_hand_built_circuit() {
        let u = u_tape(|b| {
            b.h(0).unwrap().crz(0, 1, 0.9).unwrap();
        });
        let params = vec![0.3, -0.6];
        let hs = HilbertSchmidt::new(params.clone(), u.clone(), ry_cnot_v(), [2, 3]).unwrap();

        let mut expected = TapeBuilder::new();
        expected.h(0).unwrap().h(1).unwrap()
            .cnot(0, 2).unwrap().cnot(1, 3).unwrap();
        expected.extend(&u);
        expected.ry(2, -params[0]).unwrap()
            .ry(3, -params[1]).unwrap()
            .cnot(2, 3).unwrap()
            .cnot(1, 3).unwrap().cnot(0, 2).unwrap()
            .h(0).unwrap().h(1).unwrap();

        let order = Wires::range(4);
        let from_template = get_unitary_matrix(&hs.expand().unwrap(), &order).unwrap();
        let from_hand = get_unitary_matrix(&expected.build(), &order).unwrap();
        assert!(matrix_approx_eq(&from_template, &from_hand, 1e-10));
    }
}
