//! Rank-1 Constraint Systems.
//!
//! A constraint is a triple of coefficient vectors `(a, b, c)`, each of
//! length `1 + L` (the leading `1` slot is the constant wire). An assignment
//! `s` of length `L` is valid for the constraint iff
//! `<a, [1]++s> * <b, [1]++s> == <c, [1]++s>`.

use ark_ff::{Field, PrimeField};

/// One rank-1 constraint `a . s * b . s == c . s`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct R1csConstraint<F: PrimeField> {
    /// Coefficients dotted against `[1, s_1, ..., s_L]` for the left factor.
    pub a: Vec<F>,
    /// Coefficients dotted against `[1, s_1, ..., s_L]` for the right factor.
    pub b: Vec<F>,
    /// Coefficients dotted against `[1, s_1, ..., s_L]` for the product.
    pub c: Vec<F>,
}

impl<F: PrimeField> R1csConstraint<F> {
    /// Build a constraint from its three coefficient vectors. All three must
    /// have equal length; this is enforced by callers that build constraints
    /// out of a shared `EdgeLabelSystem` width, not re-checked here.
    pub fn new(a: Vec<F>, b: Vec<F>, c: Vec<F>) -> Self {
        Self { a, b, c }
    }

    fn dot(coeffs: &[F], full: &[F]) -> F {
        coeffs
            .iter()
            .zip(full.iter())
            .fold(F::zero(), |acc, (x, y)| acc + *x * y)
    }

    /// Check `a . s * b . s == c . s` where `s = [1, assignment...]`.
    pub fn is_valid_assignment(&self, assignment: &[F]) -> bool {
        let mut full = Vec::with_capacity(assignment.len() + 1);
        full.push(F::one());
        full.extend_from_slice(assignment);
        Self::dot(&self.a, &full) * Self::dot(&self.b, &full) == Self::dot(&self.c, &full)
    }
}

/// A collection of constraints that must all hold for a valid assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct R1csSystem<F: PrimeField> {
    /// The constraints, in emission order.
    pub constraints: Vec<R1csConstraint<F>>,
}

impl<F: PrimeField> R1csSystem<F> {
    /// Wrap a vector of constraints.
    pub fn new(constraints: Vec<R1csConstraint<F>>) -> Self {
        Self { constraints }
    }

    /// Number of constraints `k`.
    pub fn len(&self) -> usize {
        self.constraints.len()
    }

    /// `true` iff there are no constraints.
    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }

    /// Width `1 + L` shared by every constraint's coefficient vectors, or
    /// `None` if the system has no constraints.
    pub fn width(&self) -> Option<usize> {
        self.constraints.first().map(|c| c.a.len())
    }

    /// `true` iff `assignment` satisfies every constraint.
    pub fn is_valid_assignment(&self, assignment: &[F]) -> bool {
        self.constraints
            .iter()
            .all(|c| c.is_valid_assignment(assignment))
    }
}
