//! `fuzzpid-engine` – Mamdani inference for a fuzzy PID-gain scheduler.
//!
//! Two crisp inputs (error and delta-error) go in, one crisp control-output
//! correction comes out.
//!
//! # Modules
//!
//! - [`membership`] – [`MembershipFunction`][membership::MembershipFunction]:
//!   the twelve membership-function families and their sampling into
//!   [`MembershipCurve`][membership::MembershipCurve]s.
//! - [`variable`] – [`Domain`][variable::Domain] and
//!   [`Variable`][variable::Variable]: an integer universe plus five terms.
//! - [`fuzzify`] – crisp value to per-term degrees by linear interpolation.
//! - [`rules`] – [`RuleTable`][rules::RuleTable]: the 5×5 rule base, the
//!   `min` strength matrix and `max` aggregation.
//! - [`compose`] – clipping and fusion of the output curves.
//! - [`defuzz`] – centroid defuzzification.
//! - [`config`] – [`ControllerConfig`][config::ControllerConfig]: the TOML
//!   configuration bundle and its validation.
//! - [`controller`] – [`FuzzyController`][controller::FuzzyController]:
//!   holds the inputs and runs the whole pipeline.

pub mod compose;
pub mod config;
pub mod controller;
pub mod defuzz;
pub mod fuzzify;
pub mod membership;
pub mod rules;
pub mod variable;

pub use config::{ControllerConfig, RuleTableConfig, TermConfig, VariableConfig};
pub use controller::{FuzzyController, InferenceTrace, VariableTrace};
pub use membership::{MembershipCurve, MembershipFunction};
pub use rules::RuleTable;
pub use variable::{Domain, MAX_DOMAIN_SAMPLES, Variable};
