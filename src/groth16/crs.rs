//! Groth16 common reference string (CRS) generation.
//!
//! Given a compiled QAP and a [`SimulationTrapdoor`], folds the trapdoor's
//! five secret scalars into group elements so that the prover and verifier
//! can run the protocol without ever learning `(alpha, beta, gamma, delta,
//! tau)` themselves.

use ark_ec::pairing::Pairing;
use ark_ec::{CurveGroup, Group};
use ark_ff::{Field, One, PrimeField};
use zeroize::Zeroize;

use crate::groth16::trapdoor::SimulationTrapdoor;
use crate::qap::QapSystem;

/// Failure modes of CRS generation.
#[derive(Debug, thiserror::Error)]
pub enum CrsError {
    /// One of the trapdoor's scalars that must be invertible (`gamma`,
    /// `delta`) was zero. Unreachable when the trapdoor came from
    /// [`SimulationTrapdoor::sample`] or [`SimulationTrapdoor::from_scalars`],
    /// both of which reject zero scalars, but callers can in principle
    /// construct degenerate trapdoors, so this is checked rather than
    /// assumed.
    #[error("trapdoor scalar required to be non-zero was zero")]
    ZeroTrapdoor,
    /// `n` (the declared instance count) exceeds the QAP's total column
    /// count minus one.
    #[error("shape mismatch: qap has width {width}, n={n} leaves no room for it")]
    ShapeMismatch { width: usize, n: usize },
}

/// The common reference string: everything the prover and verifier need,
/// derived once from a QAP and a trapdoor and then shared.
pub struct Crs<E: Pairing> {
    /// Number of public instance signals.
    pub n: usize,
    /// Number of private witness signals.
    pub m: usize,
    pub(crate) alpha_g1: E::G1Affine,
    pub(crate) beta_g1: E::G1Affine,
    pub(crate) delta_g1: E::G1Affine,
    pub(crate) beta_g2: E::G2Affine,
    pub(crate) gamma_g2: E::G2Affine,
    pub(crate) delta_g2: E::G2Affine,
    /// `g1 * tau^j` for `j = 0..k-1`, letting the prover evaluate any
    /// degree-`<k` polynomial "in the exponent" without learning `tau`.
    pub(crate) tau_powers_g1: Vec<E::G1Affine>,
    /// Same powers of `tau`, in `G2`.
    pub(crate) tau_powers_g2: Vec<E::G2Affine>,
    /// `g1 * (tau^j * T(tau) / delta)` for `j = 0..k-2`, letting the prover
    /// fold `H(tau)*T(tau)/delta` from `H`'s plain coefficients.
    pub(crate) h_powers_g1: Vec<E::G1Affine>,
    /// `g1 * ((beta*A_j(tau) + alpha*B_j(tau) + C_j(tau)) / gamma)` for the
    /// `n+1` instance-facing columns (including the constant column).
    pub(crate) instance_query: Vec<E::G1Affine>,
    /// Same construction over `delta`, for the `m` witness-facing columns.
    pub(crate) witness_query: Vec<E::G1Affine>,
}

impl<E: Pairing> Crs<E>
where
    E::ScalarField: Zeroize,
{
    /// Build the CRS for `qap`, treating its first `n` non-constant columns
    /// as public instance signals and the rest as private witness signals.
    pub fn generate(
        qap: &QapSystem<E::ScalarField>,
        trapdoor: &SimulationTrapdoor<E::ScalarField>,
        n: usize,
    ) -> Result<Self, CrsError> {
        let width = qap.width();
        if width < 1 + n {
            return Err(CrsError::ShapeMismatch { width, n });
        }
        let m = width - 1 - n;
        let k = qap.k();

        tracing::debug!(n, m, k, "crs: generating from qap and trapdoor");

        let gamma_inv = trapdoor.gamma.inverse().ok_or(CrsError::ZeroTrapdoor)?;
        let delta_inv = trapdoor.delta.inverse().ok_or(CrsError::ZeroTrapdoor)?;

        let g1 = E::G1::generator();
        let g2 = E::G2::generator();

        let alpha_g1 = (g1 * trapdoor.alpha).into_affine();
        let beta_g1 = (g1 * trapdoor.beta).into_affine();
        let delta_g1 = (g1 * trapdoor.delta).into_affine();
        let beta_g2 = (g2 * trapdoor.beta).into_affine();
        let gamma_g2 = (g2 * trapdoor.gamma).into_affine();
        let delta_g2 = (g2 * trapdoor.delta).into_affine();

        let mut tau_powers_g1 = Vec::with_capacity(k);
        let mut tau_powers_g2 = Vec::with_capacity(k);
        let mut cur = E::ScalarField::one();
        for _ in 0..k {
            tau_powers_g1.push((g1 * cur).into_affine());
            tau_powers_g2.push((g2 * cur).into_affine());
            cur *= trapdoor.tau;
        }

        let t_at_tau = qap.t.evaluate(trapdoor.tau);
        let h_len = k.saturating_sub(1);
        let mut h_powers_g1 = Vec::with_capacity(h_len);
        let mut cur = E::ScalarField::one();
        for _ in 0..h_len {
            let val = cur * t_at_tau * delta_inv;
            h_powers_g1.push((g1 * val).into_affine());
            cur *= trapdoor.tau;
        }

        let column_term = |j: usize| -> E::ScalarField {
            let a_j = qap.a[j].evaluate(trapdoor.tau);
            let b_j = qap.b[j].evaluate(trapdoor.tau);
            let c_j = qap.c[j].evaluate(trapdoor.tau);
            trapdoor.beta * a_j + trapdoor.alpha * b_j + c_j
        };

        let instance_query: Vec<E::G1Affine> = (0..=n)
            .map(|j| (g1 * (column_term(j) * gamma_inv)).into_affine())
            .collect();
        let witness_query: Vec<E::G1Affine> = (0..m)
            .map(|idx| (g1 * (column_term(n + 1 + idx) * delta_inv)).into_affine())
            .collect();

        Ok(Self {
            n,
            m,
            alpha_g1,
            beta_g1,
            delta_g1,
            beta_g2,
            gamma_g2,
            delta_g2,
            tau_powers_g1,
            tau_powers_g2,
            h_powers_g1,
            instance_query,
            witness_query,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::qap::QapSystem;
    use crate::r1cs::{R1csConstraint, R1csSystem};
    use ark_bn254::{Bn254, Fr};

    fn fe(v: u64) -> Fr {
        Fr::from(v)
    }

    fn three_factor_qap() -> QapSystem<Fr> {
        let con1 = R1csConstraint::new(
            vec![fe(0), fe(0), fe(1), fe(0), fe(0), fe(0)],
            vec![fe(0), fe(0), fe(0), fe(1), fe(0), fe(0)],
            vec![fe(0), fe(0), fe(0), fe(0), fe(0), fe(1)],
        );
        let con2 = R1csConstraint::new(
            vec![fe(0), fe(0), fe(0), fe(0), fe(0), fe(1)],
            vec![fe(0), fe(0), fe(0), fe(0), fe(1), fe(0)],
            vec![fe(0), fe(1), fe(0), fe(0), fe(0), fe(0)],
        );
        let r1cs = R1csSystem::new(vec![con1, con2]);
        QapSystem::compile(&r1cs, Some(vec![fe(5), fe(7)])).unwrap()
    }

    #[test]
    fn crs_generation_reports_correct_shape() {
        let qap = three_factor_qap();
        let trapdoor =
            SimulationTrapdoor::from_scalars(fe(6), fe(5), fe(4), fe(3), fe(2)).unwrap();
        let crs = Crs::<Bn254>::generate(&qap, &trapdoor, 1).unwrap();
        assert_eq!(crs.n, 1);
        assert_eq!(crs.m, 4);
        assert_eq!(crs.tau_powers_g1.len(), 2);
        assert_eq!(crs.instance_query.len(), 2);
        assert_eq!(crs.witness_query.len(), 4);
    }

    #[test]
    fn n_larger_than_width_is_rejected() {
        let qap = three_factor_qap();
        let trapdoor =
            SimulationTrapdoor::from_scalars(fe(6), fe(5), fe(4), fe(3), fe(2)).unwrap();
        let err = Crs::<Bn254>::generate(&qap, &trapdoor, 10).unwrap_err();
        assert!(matches!(err, CrsError::ShapeMismatch { .. }));
    }
}
