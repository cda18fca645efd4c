//! The Groth16 "forger": builds a proof that verifies for any instance
//! *without* a satisfying witness, given the simulation trapdoor.
//!
//! This exists to demonstrate why the trapdoor must never survive past CRS
//! generation in a real deployment — anyone holding it can produce proofs
//! indistinguishable from honest ones. It is diagnostic/test code, not
//! something a production proving service should ever call, so it only
//! compiles in under the `forger` feature (off by default) and every
//! invocation additionally logs a loud warning at runtime — the same
//! two-layer "opt-in feature plus unmissable warning" discipline the
//! teacher crate applies to its insecure dev-SRS generator.

use ark_ec::pairing::Pairing;
use ark_ec::{CurveGroup, Group};
use ark_ff::{Field, PrimeField, UniformRand};
use rand::{CryptoRng, RngCore};
use zeroize::Zeroize;

use crate::groth16::prover::Proof;
use crate::groth16::trapdoor::SimulationTrapdoor;
use crate::qap::QapSystem;

/// Failure modes of forging.
#[derive(Debug, thiserror::Error)]
pub enum ForgeError {
    /// The instance vector was longer than the QAP has instance-facing
    /// columns for.
    #[error("instance has {got} signals, qap only has {available} non-constant columns")]
    ShapeMismatch { got: usize, available: usize },
}

/// Forge a proof for `instance` using the trapdoor directly, with no
/// witness at all. `a`/`b` fix the two "random" proof elements for
/// reproducing a known-answer forgery; `None` samples them.
///
/// **Not for production use.** A correct deployment discards the trapdoor
/// immediately after [`crate::groth16::crs::Crs::generate`] runs; this
/// function exists only to exhibit what a leaked trapdoor lets an attacker
/// do.
pub fn forge<E: Pairing, R: RngCore + CryptoRng>(
    qap: &QapSystem<E::ScalarField>,
    trapdoor: &SimulationTrapdoor<E::ScalarField>,
    instance: &[E::ScalarField],
    a: Option<E::ScalarField>,
    b: Option<E::ScalarField>,
    rng: &mut R,
) -> Result<Proof<E>, ForgeError>
where
    E::ScalarField: Zeroize,
{
    tracing::warn!(
        "groth16::forger::forge invoked — this proves statements with no witness; \
         never call this against a trapdoor that protects real statements"
    );

    if instance.len() + 1 > qap.width() {
        return Err(ForgeError::ShapeMismatch { got: instance.len(), available: qap.width() });
    }

    let a = a.unwrap_or_else(|| E::ScalarField::rand(rng));
    let b = b.unwrap_or_else(|| E::ScalarField::rand(rng));

    let g1 = E::G1::generator();
    let g2 = E::G2::generator();

    let delta_inv = trapdoor
        .delta
        .inverse()
        .expect("trapdoor scalars are non-zero by construction");

    let mut c_scalar = a * b * delta_inv - trapdoor.alpha * trapdoor.beta * delta_inv;

    let mut instance_prime = Vec::with_capacity(instance.len() + 1);
    instance_prime.push(E::ScalarField::one());
    instance_prime.extend_from_slice(instance);

    for (j, s) in instance_prime.iter().enumerate() {
        let term = trapdoor.beta * qap.a[j].evaluate(trapdoor.tau)
            + trapdoor.alpha * qap.b[j].evaluate(trapdoor.tau)
            + qap.c[j].evaluate(trapdoor.tau);
        c_scalar -= term * delta_inv * s;
    }

    Ok(Proof {
        a: (g1 * a).into_affine(),
        b: (g2 * b).into_affine(),
        c: (g1 * c_scalar).into_affine(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::groth16::crs::Crs;
    use crate::groth16::verifier::verify;
    use crate::r1cs::{R1csConstraint, R1csSystem};
    use ark_bn254::{Bn254, Fr};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

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
    fn forged_proof_still_verifies() {
        let qap = three_factor_qap();
        let trapdoor =
            SimulationTrapdoor::from_scalars(fe(6), fe(5), fe(4), fe(3), fe(2)).unwrap();
        let crs = Crs::<Bn254>::generate(&qap, &trapdoor, 1).unwrap();

        let mut rng = StdRng::seed_from_u64(9);
        let proof =
            forge::<Bn254, _>(&qap, &trapdoor, &[fe(11)], Some(fe(9)), Some(fe(3)), &mut rng)
                .unwrap();

        assert!(verify(&crs, &[fe(11)], &proof).unwrap());
    }

    #[test]
    fn oversized_instance_is_rejected() {
        let qap = three_factor_qap();
        let trapdoor =
            SimulationTrapdoor::from_scalars(fe(6), fe(5), fe(4), fe(3), fe(2)).unwrap();
        let mut rng = StdRng::seed_from_u64(9);
        let err = forge::<Bn254, _>(
            &qap,
            &trapdoor,
            &[fe(1), fe(2), fe(3), fe(4), fe(5), fe(6)],
            None,
            None,
            &mut rng,
        )
        .unwrap_err();
        assert!(matches!(err, ForgeError::ShapeMismatch { .. }));
    }
}
