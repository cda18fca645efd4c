//! Dense univariate polynomials over an arbitrary prime field.
//!
//! `ark-poly` evaluates and interpolates efficiently over root-of-unity
//! domains, but the evaluation domains this crate needs (the QAP domain `M`)
//! are ordinary field elements with no subgroup structure. This module
//! hand-rolls the small set of operations actually needed: evaluation,
//! general Lagrange interpolation, and exact division by a monic divisor.

#![allow(clippy::needless_range_loop)]

use ark_ff::{Field, PrimeField};

/// A dense polynomial `c_0 + c_1*x + ... + c_d*x^d`, stored low-degree-first.
///
/// Canonical form trims trailing zero coefficients, so the zero polynomial is
/// always `Polynomial { coeffs: vec![] }` and `degree()` on it is `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Polynomial<F: PrimeField> {
    coeffs: Vec<F>,
}

impl<F: PrimeField> Polynomial<F> {
    /// Build a polynomial from coefficients, low-degree-first, trimming
    /// trailing zeros into canonical form.
    pub fn from_coeffs(mut coeffs: Vec<F>) -> Self {
        while matches!(coeffs.last(), Some(c) if c.is_zero()) {
            coeffs.pop();
        }
        Self { coeffs }
    }

    /// The zero polynomial.
    pub fn zero() -> Self {
        Self { coeffs: Vec::new() }
    }

    /// The constant polynomial `c`.
    pub fn constant(c: F) -> Self {
        Self::from_coeffs(vec![c])
    }

    /// `true` iff this is the zero polynomial.
    pub fn is_zero(&self) -> bool {
        self.coeffs.is_empty()
    }

    /// Degree of the polynomial, or `None` for the zero polynomial.
    pub fn degree(&self) -> Option<usize> {
        if self.coeffs.is_empty() {
            None
        } else {
            Some(self.coeffs.len() - 1)
        }
    }

    /// Coefficients, low-degree-first.
    pub fn coeffs(&self) -> &[F] {
        &self.coeffs
    }

    /// Evaluate via Horner's method.
    pub fn evaluate(&self, x: F) -> F {
        let mut acc = F::zero();
        for c in self.coeffs.iter().rev() {
            acc = acc * x + c;
        }
        acc
    }

    /// Lagrange-interpolate the unique polynomial of degree `< points.len()`
    /// passing through `(points[i], values[i])`.
    ///
    /// `points` must be pairwise distinct; this is not checked here (callers
    /// construct the evaluation domain and are expected to pick distinct
    /// points, as the QAP domain invariant requires).
    pub fn interpolate(points: &[F], values: &[F]) -> Self {
        assert_eq!(points.len(), values.len(), "interpolate: length mismatch");
        let k = points.len();
        if k == 0 {
            return Self::zero();
        }

        // Accumulate sum_i values[i] * L_i(x), where L_i is the i-th Lagrange
        // basis polynomial, built incrementally as a coefficient vector.
        let mut result = vec![F::zero(); k];
        for i in 0..k {
            // numerator = product_{j != i} (x - points[j]), as coefficients.
            let mut numer = vec![F::one()];
            let mut denom = F::one();
            for j in 0..k {
                if j == i {
                    continue;
                }
                numer = poly_mul_linear(&numer, -points[j]);
                denom *= points[i] - points[j];
            }
            let scale = values[i] * denom.inverse().expect("points must be distinct");
            for (c, n) in result.iter_mut().zip(numer.iter()) {
                *c += *n * scale;
            }
        }
        Self::from_coeffs(result)
    }

    /// Multiply two polynomials.
    pub fn mul(&self, other: &Self) -> Self {
        if self.is_zero() || other.is_zero() {
            return Self::zero();
        }
        let mut out = vec![F::zero(); self.coeffs.len() + other.coeffs.len() - 1];
        for (i, a) in self.coeffs.iter().enumerate() {
            if a.is_zero() {
                continue;
            }
            for (j, b) in other.coeffs.iter().enumerate() {
                out[i + j] += *a * b;
            }
        }
        Self::from_coeffs(out)
    }

    /// Add two polynomials.
    pub fn add(&self, other: &Self) -> Self {
        let len = self.coeffs.len().max(other.coeffs.len());
        let mut out = vec![F::zero(); len];
        for (i, c) in self.coeffs.iter().enumerate() {
            out[i] += c;
        }
        for (i, c) in other.coeffs.iter().enumerate() {
            out[i] += c;
        }
        Self::from_coeffs(out)
    }

    /// Subtract `other` from `self`.
    pub fn sub(&self, other: &Self) -> Self {
        let len = self.coeffs.len().max(other.coeffs.len());
        let mut out = vec![F::zero(); len];
        for (i, c) in self.coeffs.iter().enumerate() {
            out[i] += c;
        }
        for (i, c) in other.coeffs.iter().enumerate() {
            out[i] -= c;
        }
        Self::from_coeffs(out)
    }

    /// Scale every coefficient by `s`.
    pub fn scale(&self, s: F) -> Self {
        Self::from_coeffs(self.coeffs.iter().map(|c| *c * s).collect())
    }

    /// Exact polynomial division: returns `(quotient, remainder)` such that
    /// `self == quotient * divisor + remainder`. Ordinary long division;
    /// callers that require exactness (the QAP's `H = P / T`) check the
    /// remainder is zero themselves.
    pub fn div_rem(&self, divisor: &Self) -> (Self, Self) {
        assert!(!divisor.is_zero(), "division by the zero polynomial");
        let d_deg = divisor.degree().unwrap();
        let d_lead_inv = divisor.coeffs[d_deg].inverse().expect("leading coeff is non-zero");

        let mut remainder = self.coeffs.clone();
        let mut quotient = vec![F::zero(); remainder.len().saturating_sub(d_deg)];

        while remainder.len() > d_deg && !remainder.last().map(|c| c.is_zero()).unwrap_or(true) {
            let r_deg = remainder.len() - 1;
            let shift = r_deg - d_deg;
            let coef = *remainder.last().unwrap() * d_lead_inv;
            quotient[shift] = coef;
            for (k, dc) in divisor.coeffs.iter().enumerate() {
                remainder[shift + k] -= coef * dc;
            }
            remainder.pop();
        }

        (Self::from_coeffs(quotient), Self::from_coeffs(remainder))
    }

    /// The monic vanishing polynomial `T(x) = product_l (x - m_l)` over the
    /// given set of (assumed distinct) roots.
    pub fn vanishing(roots: &[F]) -> Self {
        let mut t = vec![F::one()];
        for &r in roots {
            t = poly_mul_linear(&t, -r);
        }
        Self::from_coeffs(t)
    }
}

/// Multiply a coefficient vector by the linear factor `(x + c)`.
fn poly_mul_linear<F: PrimeField>(coeffs: &[F], c: F) -> Vec<F> {
    let mut out = vec![F::zero(); coeffs.len() + 1];
    for (i, a) in coeffs.iter().enumerate() {
        out[i + 1] += a;
        out[i] += *a * c;
    }
    out
}
