//! Groth16 proof verification.
//!
//! Checks the single pairing equation
//! `e(A,B) = e(alpha_g1,beta_g2) * e(instance,gamma_g2) * e(C,delta_g2)`
//! by moving every term to one side and running one multi-pairing plus a
//! single final exponentiation, the same shape as the teacher's KZG
//! opening check.

use ark_ec::pairing::Pairing;
use ark_ec::{AffineRepr, CurveGroup};
use ark_ff::{Field, One, PrimeField};
use zeroize::Zeroize;

use crate::groth16::crs::Crs;
use crate::groth16::prover::Proof;

/// Failure modes of verification that indicate a caller bug (shape
/// mismatch) rather than a forged or invalid proof. A cryptographically
/// invalid proof is never an `Err` — it is `Ok(false)`.
#[derive(Debug, thiserror::Error)]
pub enum VerifyError {
    /// The instance vector's length didn't match the CRS's declared `n`.
    #[error("shape mismatch: crs expects {expected} instance signals, got {got}")]
    ShapeMismatch { expected: usize, got: usize },
}

/// Verify `proof` against the public `instance` vector (length must equal
/// `crs.n`). Returns `Ok(false)` for any cryptographically invalid or
/// forged proof, and `Err` only when the instance vector's shape is wrong.
pub fn verify<E: Pairing>(
    crs: &Crs<E>,
    instance: &[E::ScalarField],
    proof: &Proof<E>,
) -> Result<bool, VerifyError>
where
    E::ScalarField: Zeroize,
{
    if instance.len() != crs.n {
        return Err(VerifyError::ShapeMismatch { expected: crs.n, got: instance.len() });
    }

    tracing::trace!(n = crs.n, "groth16 verifier: entry");

    let mut g1_instance = crs.instance_query[0].into_group();
    for (query, i) in crs.instance_query[1..].iter().zip(instance.iter()) {
        if i.is_zero() {
            continue;
        }
        g1_instance += query.mul_bigint(i.into_bigint());
    }
    let g1_instance = g1_instance.into_affine();

    let neg_alpha_g1 = (-crs.alpha_g1.into_group()).into_affine();
    let neg_instance_g1 = (-g1_instance.into_group()).into_affine();
    let neg_c_g1 = (-proof.c.into_group()).into_affine();

    let a_terms = [proof.a, neg_alpha_g1, neg_instance_g1, neg_c_g1];
    let b_terms = [proof.b, crs.beta_g2, crs.gamma_g2, crs.delta_g2];

    let ml = E::multi_miller_loop(a_terms, b_terms);
    let ok = match E::final_exponentiation(ml) {
        Some(fe) => fe.0.is_one(),
        None => false,
    };

    tracing::trace!(ok, "groth16 verifier: exit");
    Ok(ok)
}
