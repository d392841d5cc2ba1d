//! [`RuleTable`] – the fixed 5×5 linguistic rule base.
//!
//! Each (error term, delta-error term) cell maps to exactly one output term.
//! Inference runs in two steps:
//!
//! 1. [`strength_matrix`] ANDs the two degree vectors with `min`, giving
//!    `strength[d][e] = min(error[e], delta_error[d])`.
//! 2. [`RuleTable::aggregate`] ORs every cell that concludes the same output
//!    term with `max`.
//!
//! The standard table, rows indexed by delta-error term and columns by error
//! term:
//!
//! ```text
//!  ΔE \ E |  NM   NS   Z    PS   PM
//! --------+-------------------------
//!    NM   |  NM   NM   NS   Z    PS
//!    NS   |  NM   NM   NS   PS   PM
//!    Z    |  NM   NS   Z    PS   PM
//!    PS   |  NM   NS   PS   PM   PM
//!    PM   |  NS   Z    PS   PM   PM
//! ```
//!
//! # Example
//!
//! ```
//! use fuzzpid_engine::rules::{strength_matrix, RuleTable};
//! use fuzzpid_types::Term;
//!
//! let table = RuleTable::standard();
//! assert_eq!(table.consequent(Term::Z, Term::Z), Term::Z);
//!
//! let error = [0.0, 0.0, 1.0, 0.0, 0.0];
//! let delta = [0.0, 0.0, 1.0, 0.0, 0.0];
//! let strengths = table.aggregate(&strength_matrix(&error, &delta));
//! assert_eq!(strengths, [0.0, 0.0, 1.0, 0.0, 0.0]);
//! ```

use fuzzpid_types::{FuzzyError, TERM_COUNT, Term};

use crate::fuzzify::MembershipDegrees;

/// Rule strengths, `matrix[d][e]` for delta-error term `d` and error term `e`.
pub type StrengthMatrix = [[f64; TERM_COUNT]; TERM_COUNT];

/// Aggregated firing strength per output term, in term order.
pub type OutputStrengths = [f64; TERM_COUNT];

/// Build the rule-strength matrix with the `min` AND operator.
pub fn strength_matrix(error: &MembershipDegrees, delta_error: &MembershipDegrees) -> StrengthMatrix {
    std::array::from_fn(|d| std::array::from_fn(|e| error[e].min(delta_error[d])))
}

// ────────────────────────────────────────────────────────────────────────────
// RuleTable
// ────────────────────────────────────────────────────────────────────────────

/// Validated mapping from all 25 input cells to one output term each.
///
/// The table is a plain 5×5 array so every cell holds exactly one
/// consequent: the partition of cells across output terms is exhaustive and
/// disjoint by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleTable {
    /// `rows[d][e]`
    rows: [[Term; TERM_COUNT]; TERM_COUNT],
}

impl Default for RuleTable {
    fn default() -> Self {
        Self::standard()
    }
}

impl RuleTable {
    /// The PID-gain scheduling rule base.
    pub fn standard() -> Self {
        use Term::*;
        Self {
            rows: [
                [NM, NM, NS, Z, PS],
                [NM, NM, NS, PS, PM],
                [NM, NS, Z, PS, PM],
                [NM, NS, PS, PM, PM],
                [NS, Z, PS, PM, PM],
            ],
        }
    }

    /// Build a table from rows of consequents, one row per delta-error term
    /// (`NM` first) and one column per error term.
    ///
    /// Returns [`FuzzyError::InvalidRuleTable`] unless there are exactly 5
    /// rows of exactly 5 terms.
    pub fn from_rows(rows: &[Vec<Term>]) -> Result<Self, FuzzyError> {
        if rows.len() != TERM_COUNT {
            return Err(FuzzyError::InvalidRuleTable(format!(
                "expected {TERM_COUNT} rows, got {}",
                rows.len()
            )));
        }
        let mut table = [[Term::Z; TERM_COUNT]; TERM_COUNT];
        for (d, row) in rows.iter().enumerate() {
            if row.len() != TERM_COUNT {
                return Err(FuzzyError::InvalidRuleTable(format!(
                    "row {} has {} entries, expected {TERM_COUNT}",
                    Term::ALL[d],
                    row.len()
                )));
            }
            table[d].copy_from_slice(row);
        }
        Ok(Self { rows: table })
    }

    /// Rows as owned vectors, the inverse of [`RuleTable::from_rows`].
    pub fn to_rows(&self) -> Vec<Vec<Term>> {
        self.rows.iter().map(|row| row.to_vec()).collect()
    }

    /// Output term concluded by the rule `IF error IS e AND Δerror IS d`.
    pub fn consequent(&self, error: Term, delta_error: Term) -> Term {
        self.rows[delta_error.index()][error.index()]
    }

    /// Every `(error, delta_error)` cell that concludes `output`.
    pub fn cells_for(&self, output: Term) -> Vec<(Term, Term)> {
        let mut cells = Vec::new();
        for d in Term::ALL {
            for e in Term::ALL {
                if self.consequent(e, d) == output {
                    cells.push((e, d));
                }
            }
        }
        cells
    }

    /// OR together the strengths of every cell per output term (`max`).
    ///
    /// Output terms with no contributing cell aggregate to `0.0`.
    pub fn aggregate(&self, matrix: &StrengthMatrix) -> OutputStrengths {
        let mut out: OutputStrengths = [0.0; TERM_COUNT];
        for (d, row) in matrix.iter().enumerate() {
            for (e, &strength) in row.iter().enumerate() {
                let t = self.rows[d][e].index();
                out[t] = out[t].max(strength);
            }
        }
        out
    }
}
