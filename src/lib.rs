//! Crate root: public surface and the canonical scalar field/curve aliases.
//!
//! This crate compiles an algebraic circuit down to an R1CS, lifts the R1CS
//! to a QAP, and runs a Groth16 trusted setup, prover, and verifier over it.
//! The pipeline is:
//!
//! ```text
//! Circuit -> build_r1cs() -> R1csSystem -> QapSystem::compile() -> QapSystem
//!   -> SimulationTrapdoor::sample() -> Crs::generate() -> Proof::prove() -> verify()
//! ```
//!
//! ## Invariants
//!
//! - **Field & curve.** Every module is generic over `F: PrimeField`
//!   ([`poly`], [`circuit`], [`r1cs`], [`qap`]) or `E: Pairing`
//!   ([`groth16`]); the production default is `ark_bn254::Bn254` ([`Fr`],
//!   [`G1`]). All arithmetic is Arkworks' constant-time field/curve code; we
//!   **forbid unsafe** throughout the crate.
//!
//! - **Instance/witness ordering.** The Groth16 layer splits a circuit's
//!   full signal vector into `[1, instance(n)..., witness(m)...]` purely by
//!   index range. Callers that want a clean instance/witness split must
//!   allocate instance-designated `Source` nodes before any witness `Source`
//!   or gate nodes, since label numbering follows arena construction order.
//!
//! - **Trapdoor hygiene.** [`groth16::SimulationTrapdoor`] zeroizes on drop.
//!   A correct caller samples it, feeds it to [`groth16::Crs::generate`],
//!   and lets it go out of scope immediately after — anything else is the
//!   scenario `groth16::forger` exists to illustrate (behind the `forger`
//!   feature, off by default).

#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]

/// Dense univariate polynomials over a prime field (evaluation,
/// interpolation, exact division).
pub mod poly;

/// Algebraic circuits: arena-of-nodes DAG, signal labeling, and lowering to
/// an R1CS.
pub mod circuit;

/// Rank-1 constraint systems.
pub mod r1cs;

/// Quadratic arithmetic programs compiled from an R1CS.
pub mod qap;

/// Groth16 trusted setup, proving, and verification.
pub mod groth16;

pub use circuit::{Circuit, CircuitError, NodeIdx, NodeKind, NodeSpec};
pub use qap::{QapError, QapSystem};
pub use r1cs::{R1csConstraint, R1csSystem};

/// Scalar field used by the production curve instantiation (BN254).
pub type Fr = ark_bn254::Fr;

/// G1 affine group element used by the production curve instantiation.
pub type G1 = ark_bn254::G1Affine;

/// G2 affine group element used by the production curve instantiation.
pub type G2 = ark_bn254::G2Affine;

/// Pairing engine used by the production curve instantiation.
pub type Curve = ark_bn254::Bn254;
