//! The Groth16 simulation trapdoor `(alpha, beta, gamma, delta, tau)`.
//!
//! Knowledge of these five scalars lets a "forger" build proofs for any
//! statement without a witness (see [`crate::groth16::forger`]), which is
//! exactly why a real deployment must sample them once, fold them into the
//! CRS, and then discard them. This type zeroizes its scalars on drop so
//! that discarding it is not just "drop the `Vec` and hope" — the same
//! discipline a production ceremony tool applies to its toxic waste.

use ark_ff::{Field, PrimeField, UniformRand, Zero};
use rand::{CryptoRng, RngCore};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Errors produced while sampling a trapdoor.
#[derive(Debug, thiserror::Error)]
pub enum TrapdoorError {
    /// The RNG couldn't find a scalar that was both non-zero and distinct
    /// from every scalar already chosen, after exhausting its resample
    /// budget; vanishingly unlikely for a cryptographically sized field, but
    /// resampling rather than silently accepting a bad draw keeps this
    /// unreachable from a caller-supplied trapdoor instead of a programming
    /// error here.
    #[error("RNG produced no usable scalar after {attempts} attempts")]
    Exhausted { attempts: usize },
    /// An explicitly-supplied trapdoor had two equal scalars among
    /// `(alpha, beta, gamma, delta, tau)`.
    #[error("trapdoor scalars must be pairwise distinct")]
    NotDistinct,
}

/// `(alpha, beta, gamma, delta, tau)`: the five secret scalars a Groth16
/// trusted setup must generate, fold into the CRS, and destroy.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SimulationTrapdoor<F: Field + Zeroize> {
    pub(crate) alpha: F,
    pub(crate) beta: F,
    pub(crate) gamma: F,
    pub(crate) delta: F,
    pub(crate) tau: F,
}

const MAX_RESAMPLE_ATTEMPTS: usize = 64;

impl<F: PrimeField + Zeroize> SimulationTrapdoor<F> {
    /// Construct a trapdoor from explicit scalars (used by tests that need
    /// to fix the trapdoor to reproduce known-answer vectors). None of the
    /// five scalars may be zero, and all five must be pairwise distinct.
    pub fn from_scalars(
        alpha: F,
        beta: F,
        gamma: F,
        delta: F,
        tau: F,
    ) -> Result<Self, TrapdoorError> {
        let scalars = [alpha, beta, gamma, delta, tau];
        if scalars.iter().any(|s| s.is_zero()) {
            return Err(TrapdoorError::Exhausted { attempts: 0 });
        }
        for i in 0..scalars.len() {
            for j in (i + 1)..scalars.len() {
                if scalars[i] == scalars[j] {
                    return Err(TrapdoorError::NotDistinct);
                }
            }
        }
        Ok(Self { alpha, beta, gamma, delta, tau })
    }

    /// Sample a fresh trapdoor: five independent, non-zero, pairwise
    /// distinct scalars.
    pub fn sample<R: RngCore + CryptoRng>(rng: &mut R) -> Result<Self, TrapdoorError> {
        let mut chosen: Vec<F> = Vec::with_capacity(5);
        for _ in 0..5 {
            let next = sample_distinct_nonzero(rng, &chosen)?;
            chosen.push(next);
        }
        Ok(Self { alpha: chosen[0], beta: chosen[1], gamma: chosen[2], delta: chosen[3], tau: chosen[4] })
    }
}

/// Draw a scalar that is non-zero and not already present in `seen`,
/// resampling on collision.
fn sample_distinct_nonzero<F: PrimeField, R: RngCore + CryptoRng>(
    rng: &mut R,
    seen: &[F],
) -> Result<F, TrapdoorError> {
    for attempt in 0..MAX_RESAMPLE_ATTEMPTS {
        let candidate = F::rand(rng);
        if !candidate.is_zero() && !seen.contains(&candidate) {
            return Ok(candidate);
        }
        if attempt + 1 == MAX_RESAMPLE_ATTEMPTS {
            return Err(TrapdoorError::Exhausted { attempts: attempt + 1 });
        }
    }
    unreachable!("loop always returns by the final iteration")
}

#[cfg(test)]
mod tests {
    use super::*;
    use ark_bn254::Fr;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn sampled_trapdoor_has_no_zero_scalar() {
        let mut rng = StdRng::seed_from_u64(7);
        let st = SimulationTrapdoor::<Fr>::sample(&mut rng).unwrap();
        assert!(!st.alpha.is_zero());
        assert!(!st.beta.is_zero());
        assert!(!st.gamma.is_zero());
        assert!(!st.delta.is_zero());
        assert!(!st.tau.is_zero());
    }

    #[test]
    fn explicit_zero_scalar_is_rejected() {
        let err = SimulationTrapdoor::from_scalars(
            Fr::from(0u64),
            Fr::from(5u64),
            Fr::from(4u64),
            Fr::from(3u64),
            Fr::from(2u64),
        )
        .unwrap_err();
        assert!(matches!(err, TrapdoorError::Exhausted { .. }));
    }

    #[test]
    fn repeated_scalar_is_rejected() {
        let err = SimulationTrapdoor::from_scalars(
            Fr::from(6u64),
            Fr::from(5u64),
            Fr::from(4u64),
            Fr::from(5u64),
            Fr::from(2u64),
        )
        .unwrap_err();
        assert!(matches!(err, TrapdoorError::NotDistinct));
    }

    #[test]
    fn sampled_trapdoor_has_pairwise_distinct_scalars() {
        let mut rng = StdRng::seed_from_u64(11);
        let st = SimulationTrapdoor::<Fr>::sample(&mut rng).unwrap();
        let scalars = [st.alpha, st.beta, st.gamma, st.delta, st.tau];
        for i in 0..scalars.len() {
            for j in (i + 1)..scalars.len() {
                assert_ne!(scalars[i], scalars[j]);
            }
        }
    }

    #[test]
    fn from_scalars_round_trips() {
        let st = SimulationTrapdoor::from_scalars(
            Fr::from(6u64),
            Fr::from(5u64),
            Fr::from(4u64),
            Fr::from(3u64),
            Fr::from(2u64),
        )
        .unwrap();
        assert_eq!(st.alpha, Fr::from(6u64));
        assert_eq!(st.tau, Fr::from(2u64));
    }
}
