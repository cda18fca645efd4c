//! Bit-exact reproduction of the small `Z/13Z` worked examples: the
//! three-factor circuit `x4 = x1*x2*x3`, domain `M = {5, 7}`.

use ark_ff::{Fp64, MontBackend, MontConfig};
use circuit_snark::circuit::{Circuit, CircuitError, NodeIdx, NodeSpec};
use circuit_snark::qap::QapSystem;

#[derive(MontConfig)]
#[modulus = "13"]
#[generator = "2"]
pub struct F13Config;
pub type F13 = Fp64<MontBackend<F13Config, 1>>;

fn fe(v: u64) -> F13 {
    F13::from(v)
}

fn three_factor_circuit() -> Circuit<F13> {
    Circuit::build(vec![
        NodeSpec::source(),                     // 0: x1
        NodeSpec::source(),                     // 1: x2
        NodeSpec::source(),                     // 2: x3
        NodeSpec::mul(NodeIdx(0), NodeIdx(1)),  // 3: mul1 (x1*x2)
        NodeSpec::mul(NodeIdx(3), NodeIdx(2)),  // 4: x4
        NodeSpec::sink(NodeIdx(4)),
    ])
    .unwrap()
}

#[test]
fn s1_r1cs_correctness() {
    let circuit = three_factor_circuit();
    let r1cs = circuit.build_r1cs().unwrap();
    // s = [1, I=11, W=2,3,4,6]
    let assignment = vec![fe(11), fe(2), fe(3), fe(4), fe(6)];
    assert!(r1cs.is_valid_assignment(&assignment));
}

#[test]
fn s2_qap_equivalence() {
    let circuit = three_factor_circuit();
    let r1cs = circuit.build_r1cs().unwrap();
    let qap = QapSystem::compile(&r1cs, Some(vec![fe(5), fe(7)])).unwrap();

    let full = vec![fe(1), fe(11), fe(2), fe(3), fe(4), fe(6)];
    assert!(qap.is_valid_assignment(&full).unwrap());

    let mut tampered = full.clone();
    tampered[1] = fe(1);
    assert!(!qap.is_valid_assignment(&tampered).unwrap());
}

#[test]
fn s3_circuit_execution() {
    let circuit = three_factor_circuit();
    let witness = circuit
        .execute(&[(NodeIdx(0), fe(7)), (NodeIdx(1), fe(3)), (NodeIdx(2), fe(2))])
        .unwrap();

    // mul1.c = 21 mod 13 = 8, x4 = 16 mod 13 = 3.
    assert_eq!(witness[3], fe(8));
    assert_eq!(witness[4], fe(3));

    let r1cs = circuit.build_r1cs().unwrap();
    assert!(r1cs.is_valid_assignment(&witness));

    let qap = QapSystem::compile(&r1cs, Some(vec![fe(5), fe(7)])).unwrap();
    let mut full = vec![fe(1)];
    full.extend_from_slice(&witness);
    assert!(qap.is_valid_assignment(&full).unwrap());
}

#[test]
fn finalize_is_idempotent() {
    let circuit = three_factor_circuit();
    circuit.finalize().unwrap();
    let labels_first = circuit.signal_count();
    circuit.finalize().unwrap();
    assert_eq!(circuit.signal_count(), labels_first);
    let r1cs_a = circuit.build_r1cs().unwrap();
    let r1cs_b = circuit.build_r1cs().unwrap();
    assert_eq!(r1cs_a, r1cs_b);
}

#[test]
fn interpolate_evaluate_round_trips_over_f13() {
    use circuit_snark::poly::Polynomial;
    let points = vec![fe(5), fe(7)];
    let values = vec![fe(8), fe(3)];
    let p = Polynomial::interpolate(&points, &values);
    assert_eq!(p.evaluate(fe(5)), fe(8));
    assert_eq!(p.evaluate(fe(7)), fe(3));
}

#[test]
fn both_constant_gate_is_rejected_over_f13() {
    let circuit: Circuit<F13> = Circuit::build(vec![
        NodeSpec::constant(fe(2)),
        NodeSpec::constant(fe(3)),
        NodeSpec::mul(NodeIdx(0), NodeIdx(1)),
    ])
    .unwrap();
    let err = circuit.finalize().unwrap_err();
    assert!(matches!(err, CircuitError::ConstantOnBothSides { node: 2 }));
}
