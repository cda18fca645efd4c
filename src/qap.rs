//! Quadratic Arithmetic Programs: the polynomial encoding of an
//! [`R1csSystem`](crate::r1cs::R1csSystem) that the Groth16 CRS is built
//! over.
//!
//! Each R1CS column `j` becomes a polynomial `A_j`/`B_j`/`C_j` of degree
//! `< k` (`k` = number of constraints), obtained by Lagrange-interpolating
//! the column's per-constraint coefficients over a size-`k` evaluation
//! domain `M = {m_1, ..., m_k}`. The vanishing polynomial
//! `T(x) = product_l (x - m_l)` then turns the R1CS relation into the
//! single polynomial identity `A(x)*B(x) - C(x) = H(x)*T(x)` for the
//! assignment-weighted sums `A = sum_j a_j*A_j`, etc.

use ark_ff::{Field, PrimeField};

use crate::poly::Polynomial;
use crate::r1cs::R1csSystem;

/// Failure modes of QAP compilation.
#[derive(Debug, thiserror::Error)]
pub enum QapError {
    /// The supplied (or requested default) evaluation domain has fewer
    /// points than the R1CS has constraints.
    #[error("domain has {got} points, but {needed} constraints need one point each")]
    DomainTooSmall { needed: usize, got: usize },
    /// The R1CS's constraint width didn't match what was expected.
    #[error("shape mismatch: expected width {expected}, got {got}")]
    ShapeMismatch { expected: usize, got: usize },
}

/// A compiled Quadratic Arithmetic Program.
#[derive(Debug, Clone)]
pub struct QapSystem<F: PrimeField> {
    /// The evaluation domain `M`, one point per constraint.
    pub domain: Vec<F>,
    /// Vanishing polynomial over `domain`.
    pub t: Polynomial<F>,
    /// Per-column interpolated polynomials for the `a` coefficients.
    pub a: Vec<Polynomial<F>>,
    /// Per-column interpolated polynomials for the `b` coefficients.
    pub b: Vec<Polynomial<F>>,
    /// Per-column interpolated polynomials for the `c` coefficients.
    pub c: Vec<Polynomial<F>>,
}

impl<F: PrimeField> QapSystem<F> {
    /// Compile an R1CS system into a QAP. `domain`, if supplied, must have
    /// exactly as many points as the R1CS has constraints; otherwise a
    /// default domain `{g, g^2, ..., g^k}` is derived from a fixed generator
    /// of `F`'s prime-order multiplicative group.
    pub fn compile(r1cs: &R1csSystem<F>, domain: Option<Vec<F>>) -> Result<Self, QapError> {
        let k = r1cs.len();
        let width = r1cs.width().unwrap_or(0);

        let domain = match domain {
            Some(pts) => {
                if pts.len() < k {
                    return Err(QapError::DomainTooSmall { needed: k, got: pts.len() });
                }
                pts[..k].to_vec()
            }
            None => default_domain(k)?,
        };

        tracing::debug!(k, width, "qap: compiling R1CS into domain of size {}", domain.len());

        let mut a = Vec::with_capacity(width);
        let mut b = Vec::with_capacity(width);
        let mut c = Vec::with_capacity(width);
        for j in 0..width {
            let a_vals: Vec<F> = r1cs.constraints.iter().map(|con| con.a[j]).collect();
            let b_vals: Vec<F> = r1cs.constraints.iter().map(|con| con.b[j]).collect();
            let c_vals: Vec<F> = r1cs.constraints.iter().map(|con| con.c[j]).collect();
            a.push(Polynomial::interpolate(&domain, &a_vals));
            b.push(Polynomial::interpolate(&domain, &b_vals));
            c.push(Polynomial::interpolate(&domain, &c_vals));
        }

        let t = Polynomial::vanishing(&domain);
        Ok(Self { domain, t, a, b, c })
    }

    /// Number of constraints `k`.
    pub fn k(&self) -> usize {
        self.domain.len()
    }

    /// Column width `1 + L`.
    pub fn width(&self) -> usize {
        self.a.len()
    }

    fn weighted_sum(cols: &[Polynomial<F>], assignment: &[F]) -> Polynomial<F> {
        let mut acc = Polynomial::zero();
        for (col, s) in cols.iter().zip(assignment.iter()) {
            if s.is_zero() {
                continue;
            }
            acc = acc.add(&col.scale(*s));
        }
        acc
    }

    /// `P(s) = A(s)*B(s) - C(s)` for assignment `s = [1, witness...]`.
    pub fn p(&self, full_assignment: &[F]) -> Result<Polynomial<F>, QapError> {
        if full_assignment.len() != self.width() {
            return Err(QapError::ShapeMismatch {
                expected: self.width(),
                got: full_assignment.len(),
            });
        }
        let a = Self::weighted_sum(&self.a, full_assignment);
        let b = Self::weighted_sum(&self.b, full_assignment);
        let c = Self::weighted_sum(&self.c, full_assignment);
        Ok(a.mul(&b).sub(&c))
    }

    /// `H(s) = P(s) / T`, the cofactor polynomial the Groth16 prover commits
    /// to. Returns the quotient without checking exact divisibility; callers
    /// that need to confirm `s` actually satisfies the R1CS should use
    /// [`Self::is_valid_assignment`].
    pub fn h(&self, full_assignment: &[F]) -> Result<Polynomial<F>, QapError> {
        let p = self.p(full_assignment)?;
        let (q, _r) = p.div_rem(&self.t);
        Ok(q)
    }

    /// `true` iff `P(s)` is exactly divisible by `T`, i.e. `s` satisfies the
    /// original R1CS.
    pub fn is_valid_assignment(&self, full_assignment: &[F]) -> Result<bool, QapError> {
        let p = self.p(full_assignment)?;
        let (_q, r) = p.div_rem(&self.t);
        Ok(r.is_zero())
    }
}

/// A small multiplicative-generator-derived default domain `{g, g^2, ...,
/// g^k}`, used when the caller doesn't supply one. `g` is taken to be
/// `F::from(2)`. QAP correctness requires the domain points be pairwise
/// distinct and non-zero; `2`'s multiplicative order in `F*` isn't known
/// statically, so this checks for a repeat as it generates powers and
/// surfaces `QapError::DomainTooSmall` instead of silently handing
/// `Polynomial::interpolate` a domain with a repeated point (which would
/// divide by zero internally rather than fail with a named error).
fn default_domain<F: PrimeField>(k: usize) -> Result<Vec<F>, QapError> {
    let base = F::from(2u64);
    let mut pts: Vec<F> = Vec::with_capacity(k);
    let mut cur = base;
    for _ in 0..k {
        if pts.contains(&cur) {
            return Err(QapError::DomainTooSmall { needed: k, got: pts.len() });
        }
        pts.push(cur);
        cur *= base;
    }
    Ok(pts)
}
