//! `fuzzpid-types` – shared vocabulary for the fuzzy gain scheduler.
//!
//! Every crate in the workspace speaks in these types: the five linguistic
//! [`Term`]s, the three [`VariableKind`]s, the [`MembershipFamily`] names used
//! in configuration files, and the global [`FuzzyError`].

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of linguistic terms per variable.  The rule base is built around
/// this exact cardinality.
pub const TERM_COUNT: usize = 5;

/// Linguistic term shared by every variable, in fixed order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Term {
    /// Negative-Medium
    NM,
    /// Negative-Small
    NS,
    /// Zero
    Z,
    /// Positive-Small
    PS,
    /// Positive-Medium
    PM,
}

impl Term {
    /// All terms in index order (`NM` = 0 … `PM` = 4).
    pub const ALL: [Term; TERM_COUNT] = [Term::NM, Term::NS, Term::Z, Term::PS, Term::PM];

    /// Zero-based position of the term.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Inverse of [`Term::index`].  Returns `None` for `index >= 5`.
    pub fn from_index(index: usize) -> Option<Term> {
        Self::ALL.get(index).copied()
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Term::NM => "NM",
            Term::NS => "NS",
            Term::Z => "Z",
            Term::PS => "PS",
            Term::PM => "PM",
        };
        f.write_str(s)
    }
}

/// The three variables of the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VariableKind {
    Error,
    DeltaError,
    Output,
}

impl fmt::Display for VariableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VariableKind::Error => write!(f, "error"),
            VariableKind::DeltaError => write!(f, "delta_error"),
            VariableKind::Output => write!(f, "output"),
        }
    }
}

/// Membership-function family names as they appear in configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MembershipFamily {
    Trimf,
    Trapmf,
    Gaussmf,
    Gauss2mf,
    Gbellmf,
    Sigmf,
    Dsigmf,
    Psigmf,
    Smf,
    Zmf,
    Pimf,
    Piecemf,
}

impl MembershipFamily {
    /// Number of shape parameters the family expects.
    pub fn arity(self) -> usize {
        match self {
            MembershipFamily::Gaussmf
            | MembershipFamily::Sigmf
            | MembershipFamily::Smf
            | MembershipFamily::Zmf => 2,
            MembershipFamily::Trimf | MembershipFamily::Gbellmf | MembershipFamily::Piecemf => 3,
            MembershipFamily::Trapmf
            | MembershipFamily::Gauss2mf
            | MembershipFamily::Dsigmf
            | MembershipFamily::Psigmf
            | MembershipFamily::Pimf => 4,
        }
    }
}

impl fmt::Display for MembershipFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            MembershipFamily::Trimf => "trimf",
            MembershipFamily::Trapmf => "trapmf",
            MembershipFamily::Gaussmf => "gaussmf",
            MembershipFamily::Gauss2mf => "gauss2mf",
            MembershipFamily::Gbellmf => "gbellmf",
            MembershipFamily::Sigmf => "sigmf",
            MembershipFamily::Dsigmf => "dsigmf",
            MembershipFamily::Psigmf => "psigmf",
            MembershipFamily::Smf => "smf",
            MembershipFamily::Zmf => "zmf",
            MembershipFamily::Pimf => "pimf",
            MembershipFamily::Piecemf => "piecemf",
        };
        f.write_str(s)
    }
}

/// Global error type spanning configuration rejection and inference failures.
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FuzzyError {
    #[error("Invalid {family} parameters: {details}")]
    InvalidShapeParameters {
        family: MembershipFamily,
        details: String,
    },

    #[error("Invalid domain for {variable}: [{min}, {max}] is inverted or too large to sample")]
    InvalidDomain {
        variable: VariableKind,
        min: i64,
        max: i64,
    },

    #[error("Variable {variable} has no membership function for term {term}")]
    MissingTerm { variable: VariableKind, term: Term },

    #[error("Invalid rule table: {0}")]
    InvalidRuleTable(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Degenerate aggregate: no rule fired, centroid is undefined")]
    DegenerateAggregate,

    #[error("Configuration Error: {0}")]
    Config(String),
}
