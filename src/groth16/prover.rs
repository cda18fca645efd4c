//! Groth16 proof generation.

use ark_ec::pairing::Pairing;
use ark_ec::{AffineRepr, CurveGroup, Group};
use ark_ff::{Field, PrimeField, UniformRand, Zero};
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use rand::{CryptoRng, RngCore};
use zeroize::Zeroize;

use crate::groth16::crs::Crs;
use crate::qap::QapSystem;

/// Failure modes of proof generation.
#[derive(Debug, thiserror::Error)]
pub enum ProveError {
    /// The supplied assignment's shape didn't match the CRS it was proved
    /// against.
    #[error("shape mismatch: expected {expected} signals ({n} instance + {m} witness), got {got}")]
    ShapeMismatch { expected: usize, n: usize, m: usize, got: usize },
    /// `H`'s degree exceeded the number of `tau` powers the CRS carries for
    /// it — can only happen if the QAP the CRS was built from doesn't match
    /// the one the assignment satisfies.
    #[error("H has degree {degree}, but the CRS only carries {available} powers for it")]
    DegreeOverflow { degree: usize, available: usize },
}

/// A Groth16 proof: `(A, C) in G1 x G1`, `B in G2`.
#[derive(Clone, Debug, CanonicalSerialize, CanonicalDeserialize)]
pub struct Proof<E: Pairing> {
    pub a: E::G1Affine,
    pub b: E::G2Affine,
    pub c: E::G1Affine,
}

/// Evaluate `sum_j coeffs[j] * powers[j]` in the exponent, i.e. fold a plain
/// polynomial's coefficients against a CRS power table.
fn fold_g1<E: Pairing>(coeffs: &[E::ScalarField], powers: &[E::G1Affine]) -> E::G1 {
    let mut acc = E::G1::zero();
    for (c, p) in coeffs.iter().zip(powers.iter()) {
        if c.is_zero() {
            continue;
        }
        acc += p.mul_bigint(c.into_bigint());
    }
    acc
}

fn fold_g2<E: Pairing>(coeffs: &[E::ScalarField], powers: &[E::G2Affine]) -> E::G2 {
    let mut acc = E::G2::zero();
    for (c, p) in coeffs.iter().zip(powers.iter()) {
        if c.is_zero() {
            continue;
        }
        acc += p.mul_bigint(c.into_bigint());
    }
    acc
}

impl<E: Pairing> Proof<E>
where
    E::ScalarField: Zeroize,
{
    /// Prove that `full_assignment = [1, instance..., witness...]` satisfies
    /// the R1CS `qap` was compiled from, under `crs`. `r`/`t` are the
    /// prover's blinding scalars: pass `None` to sample them fresh, or
    /// `Some` fixed values to reproduce a known-answer proof.
    pub fn prove<R: RngCore + CryptoRng>(
        crs: &Crs<E>,
        qap: &QapSystem<E::ScalarField>,
        full_assignment: &[E::ScalarField],
        r: Option<E::ScalarField>,
        t: Option<E::ScalarField>,
        rng: &mut R,
    ) -> Result<Self, ProveError> {
        let expected = 1 + crs.n + crs.m;
        if full_assignment.len() != expected {
            return Err(ProveError::ShapeMismatch {
                expected,
                n: crs.n,
                m: crs.m,
                got: full_assignment.len(),
            });
        }

        tracing::trace!(n = crs.n, m = crs.m, "groth16 prover: entry");

        let r = r.unwrap_or_else(|| E::ScalarField::rand(rng));
        let t = t.unwrap_or_else(|| E::ScalarField::rand(rng));

        let h = qap.h(full_assignment).map_err(|_| ProveError::ShapeMismatch {
            expected,
            n: crs.n,
            m: crs.m,
            got: full_assignment.len(),
        })?;
        if h.coeffs().len() > crs.h_powers_g1.len() {
            return Err(ProveError::DegreeOverflow {
                degree: h.coeffs().len().saturating_sub(1),
                available: crs.h_powers_g1.len(),
            });
        }

        let mut g1_a = crs.alpha_g1.into_group();
        let mut g2_b = crs.beta_g2.into_group();
        let mut g1_b = crs.beta_g1.into_group();

        // The constant wire (column 0) never contributes to A/B directly —
        // `alpha`/`beta` already stand in for it; it only reappears via the
        // verifier's instance-query term. So this sum runs over columns
        // `1..` only, i.e. effectively against `[0, instance..., witness...]`
        // rather than `full_assignment` itself.
        for (j, s) in full_assignment.iter().enumerate().skip(1) {
            if s.is_zero() {
                continue;
            }
            g1_a += fold_g1::<E>(qap.a[j].coeffs(), &crs.tau_powers_g1).mul_bigint(s.into_bigint());
            g2_b += fold_g2::<E>(qap.b[j].coeffs(), &crs.tau_powers_g2).mul_bigint(s.into_bigint());
            g1_b += fold_g1::<E>(qap.b[j].coeffs(), &crs.tau_powers_g1).mul_bigint(s.into_bigint());
        }
        g1_a += crs.delta_g1.mul_bigint(r.into_bigint());
        g2_b += crs.delta_g2.mul_bigint(t.into_bigint());
        g1_b += crs.delta_g1.mul_bigint(t.into_bigint());

        let g1_w = fold_g1::<E>(&full_assignment[1 + crs.n..], &crs.witness_query);
        let g1_h = fold_g1::<E>(h.coeffs(), &crs.h_powers_g1);

        let mut g1_c = g1_w + g1_h;
        g1_c += g1_a.mul_bigint(t.into_bigint());
        g1_c += g1_b.mul_bigint(r.into_bigint());
        let neg_rt = -(r * t);
        g1_c += crs.delta_g1.mul_bigint(neg_rt.into_bigint());

        tracing::trace!("groth16 prover: exit");

        Ok(Proof { a: g1_a.into_affine(), b: g2_b.into_affine(), c: g1_c.into_affine() })
    }
}
