//! [`FuzzyController`] – orchestrates one Mamdani inference pass.
//!
//! The controller holds the two crisp inputs (error and delta-error) plus
//! the validated variables and rule table.  Each call to
//! [`FuzzyController::run`] re-samples every membership curve, fuzzifies both
//! inputs, fires the rule base, composes the output set and returns its
//! centroid.  Nothing is cached between calls.
//!
//! # Example
//!
//! ```rust
//! use fuzzpid_engine::{ControllerConfig, FuzzyController};
//!
//! let mut ctl = FuzzyController::new(&ControllerConfig::default()).unwrap();
//! ctl.set_inputs(10.0, 0.0);
//!
//! let correction = ctl.run().unwrap();
//! assert!(correction > 0.0); // large positive error pushes the output up
//! ```

use fuzzpid_types::{FuzzyError, TERM_COUNT, VariableKind};
use serde::Serialize;
use tracing::{debug, warn};

use crate::compose::compose;
use crate::config::{ControllerConfig, ValidatedConfig};
use crate::defuzz::defuzzify;
use crate::fuzzify::{MembershipDegrees, fuzzify};
use crate::membership::MembershipCurve;
use crate::rules::{OutputStrengths, RuleTable, StrengthMatrix, strength_matrix};
use crate::variable::{Domain, Variable};

// ────────────────────────────────────────────────────────────────────────────
// Trace types
// ────────────────────────────────────────────────────────────────────────────

/// Sampled view of one variable during an inference pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VariableTrace {
    pub kind: VariableKind,
    pub domain: Domain,
    pub samples: Vec<f64>,
    pub curves: [MembershipCurve; TERM_COUNT],
}

impl VariableTrace {
    fn sample(variable: &Variable) -> Self {
        let domain = variable.domain();
        let samples = domain.samples();
        let curves = variable.curves(&samples);
        Self {
            kind: variable.kind(),
            domain,
            samples,
            curves,
        }
    }
}

/// Every intermediate of one inference pass, for read-only consumers such as
/// plotting tools.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InferenceTrace {
    pub error: f64,
    pub delta_error: f64,
    pub error_variable: VariableTrace,
    pub delta_error_variable: VariableTrace,
    pub output_variable: VariableTrace,
    pub error_degrees: MembershipDegrees,
    pub delta_error_degrees: MembershipDegrees,
    /// `strengths[d][e]`
    pub strengths: StrengthMatrix,
    pub output_strengths: OutputStrengths,
    pub clipped: [MembershipCurve; TERM_COUNT],
    pub aggregated: MembershipCurve,
    /// Crisp control-output correction.
    pub output: f64,
}

// ────────────────────────────────────────────────────────────────────────────
// FuzzyController
// ────────────────────────────────────────────────────────────────────────────

/// Two-input, one-output fuzzy controller over the fixed 5-term rule base.
///
/// Setters take `&mut self` and [`run`](Self::run) takes `&self`; hosts that
/// share a controller across threads wrap it in their own lock.
#[derive(Debug, Clone)]
pub struct FuzzyController {
    error: f64,
    delta_error: f64,
    error_variable: Variable,
    delta_error_variable: Variable,
    output_variable: Variable,
    rules: RuleTable,
}

impl FuzzyController {
    /// Validate `config` and build a controller with both inputs at `0.0`.
    ///
    /// # Errors
    ///
    /// Any shape, domain, missing-term or rule-table problem in `config`.
    pub fn new(config: &ControllerConfig) -> Result<Self, FuzzyError> {
        Ok(Self::from_validated(config.build()?))
    }

    /// Build from already validated parts.
    pub fn from_validated(config: ValidatedConfig) -> Self {
        Self {
            error: 0.0,
            delta_error: 0.0,
            error_variable: config.error,
            delta_error_variable: config.delta_error,
            output_variable: config.output,
            rules: config.rules,
        }
    }

    pub fn set_error(&mut self, error: f64) {
        self.error = error;
    }

    pub fn set_delta_error(&mut self, delta_error: f64) {
        self.delta_error = delta_error;
    }

    /// Set both crisp inputs at once.
    pub fn set_inputs(&mut self, error: f64, delta_error: f64) {
        self.error = error;
        self.delta_error = delta_error;
    }

    pub fn error(&self) -> f64 {
        self.error
    }

    pub fn delta_error(&self) -> f64 {
        self.delta_error
    }

    pub fn rule_table(&self) -> &RuleTable {
        &self.rules
    }

    pub fn variable(&self, kind: VariableKind) -> &Variable {
        match kind {
            VariableKind::Error => &self.error_variable,
            VariableKind::DeltaError => &self.delta_error_variable,
            VariableKind::Output => &self.output_variable,
        }
    }

    /// Run one inference pass and return the crisp output.
    ///
    /// # Errors
    ///
    /// [`FuzzyError::DegenerateAggregate`] when no rule fires, and
    /// [`FuzzyError::InvalidInput`] for a non-finite input.
    pub fn run(&self) -> Result<f64, FuzzyError> {
        self.run_traced().map(|trace| trace.output)
    }

    /// Run one inference pass and return every intermediate result.
    pub fn run_traced(&self) -> Result<InferenceTrace, FuzzyError> {
        let error_variable = VariableTrace::sample(&self.error_variable);
        let delta_error_variable = VariableTrace::sample(&self.delta_error_variable);
        let output_variable = VariableTrace::sample(&self.output_variable);

        let error_degrees = fuzzify(
            &error_variable.samples,
            &error_variable.curves,
            self.error,
        )?;
        let delta_error_degrees = fuzzify(
            &delta_error_variable.samples,
            &delta_error_variable.curves,
            self.delta_error,
        )?;
        debug!(
            error = self.error,
            delta_error = self.delta_error,
            ?error_degrees,
            ?delta_error_degrees,
            "fuzzified inputs"
        );

        let strengths = strength_matrix(&error_degrees, &delta_error_degrees);
        let output_strengths = self.rules.aggregate(&strengths);
        let composition = compose(&output_variable.curves, &output_strengths);

        let output = match defuzzify(&output_variable.samples, &composition.aggregated) {
            Ok(output) => output,
            Err(e) => {
                warn!(
                    error = self.error,
                    delta_error = self.delta_error,
                    reason = %e,
                    "fuzzy inference produced no output"
                );
                return Err(e);
            }
        };
        debug!(?output_strengths, output, "defuzzified output");

        Ok(InferenceTrace {
            error: self.error,
            delta_error: self.delta_error,
            error_variable,
            delta_error_variable,
            output_variable,
            error_degrees,
            delta_error_degrees,
            strengths,
            output_strengths,
            clipped: composition.clipped,
            aggregated: composition.aggregated,
            output,
        })
    }
}
