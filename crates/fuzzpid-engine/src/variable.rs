//! Linguistic variables: an integer domain plus one membership function per
//! [`Term`].

use fuzzpid_types::{FuzzyError, TERM_COUNT, Term, VariableKind};
use serde::Serialize;

use crate::membership::{MembershipCurve, MembershipFunction, evaluate};

/// Largest number of samples a [`Domain`] may hold.
pub const MAX_DOMAIN_SAMPLES: usize = 1_000_000;

/// Inclusive integer range `[min, max]` sampled with step 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Domain {
    min: i64,
    max: i64,
}

impl Domain {
    /// Returns [`FuzzyError::InvalidDomain`] when `min > max` or the range
    /// holds more than [`MAX_DOMAIN_SAMPLES`] integers.
    pub fn new(variable: VariableKind, min: i64, max: i64) -> Result<Self, FuzzyError> {
        let within_limit = max
            .checked_sub(min)
            .and_then(|span| usize::try_from(span).ok())
            .is_some_and(|span| span < MAX_DOMAIN_SAMPLES);
        if !within_limit {
            return Err(FuzzyError::InvalidDomain { variable, min, max });
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> i64 {
        self.min
    }

    pub fn max(&self) -> i64 {
        self.max
    }

    /// Every integer from `min` to `max` inclusive, as `f64`.
    pub fn samples(&self) -> Vec<f64> {
        (self.min..=self.max).map(|v| v as f64).collect()
    }
}

/// One of the controller's three variables, fully validated.
#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    kind: VariableKind,
    domain: Domain,
    terms: [MembershipFunction; TERM_COUNT],
}

impl Variable {
    pub fn new(
        kind: VariableKind,
        domain: Domain,
        terms: [MembershipFunction; TERM_COUNT],
    ) -> Self {
        Self {
            kind,
            domain,
            terms,
        }
    }

    pub fn kind(&self) -> VariableKind {
        self.kind
    }

    pub fn domain(&self) -> Domain {
        self.domain
    }

    pub fn function(&self, term: Term) -> &MembershipFunction {
        &self.terms[term.index()]
    }

    /// Sample all five membership functions over `samples`, in term order.
    pub fn curves(&self, samples: &[f64]) -> [MembershipCurve; TERM_COUNT] {
        std::array::from_fn(|i| evaluate(&self.terms[i], samples))
    }
}
