//! Controller configuration bundle, read from TOML.
//!
//! ```toml
//! [error]
//! min = -10
//! max = 10
//! [error.terms]
//! NM = { family = "trimf", params = [-10, -10, -5] }
//! NS = { family = "trimf", params = [-10, -5, 0] }
//! # ... Z, PS, PM
//!
//! [delta_error]
//! # same layout
//!
//! [output]
//! # same layout
//!
//! # Optional; the standard rule base is used when absent.
//! [rules]
//! rows = [["NM", "NM", "NS", "Z", "PS"], ...]
//! ```
//!
//! These structs mirror the file format only.  [`ControllerConfig::build`]
//! turns them into validated engine types, so every configuration error
//! surfaces at load time rather than on the first inference.

use std::fs;
use std::path::Path;

use fuzzpid_types::{FuzzyError, MembershipFamily, TERM_COUNT, Term, VariableKind};
use serde::{Deserialize, Serialize};

use crate::membership::MembershipFunction;
use crate::rules::RuleTable;
use crate::variable::{Domain, Variable};

/// One term's membership function as written in configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TermConfig {
    pub family: MembershipFamily,
    pub params: Vec<f64>,
}

impl TermConfig {
    pub fn new(family: MembershipFamily, params: &[f64]) -> Self {
        Self {
            family,
            params: params.to_vec(),
        }
    }
}

/// The five term slots of a variable.  A missing slot is reported as
/// [`FuzzyError::MissingTerm`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TermsConfig {
    #[serde(rename = "NM", default, skip_serializing_if = "Option::is_none")]
    pub nm: Option<TermConfig>,
    #[serde(rename = "NS", default, skip_serializing_if = "Option::is_none")]
    pub ns: Option<TermConfig>,
    #[serde(rename = "Z", default, skip_serializing_if = "Option::is_none")]
    pub z: Option<TermConfig>,
    #[serde(rename = "PS", default, skip_serializing_if = "Option::is_none")]
    pub ps: Option<TermConfig>,
    #[serde(rename = "PM", default, skip_serializing_if = "Option::is_none")]
    pub pm: Option<TermConfig>,
}

impl TermsConfig {
    pub fn get(&self, term: Term) -> Option<&TermConfig> {
        match term {
            Term::NM => self.nm.as_ref(),
            Term::NS => self.ns.as_ref(),
            Term::Z => self.z.as_ref(),
            Term::PS => self.ps.as_ref(),
            Term::PM => self.pm.as_ref(),
        }
    }

    pub fn set(&mut self, term: Term, config: Option<TermConfig>) {
        let slot = match term {
            Term::NM => &mut self.nm,
            Term::NS => &mut self.ns,
            Term::Z => &mut self.z,
            Term::PS => &mut self.ps,
            Term::PM => &mut self.pm,
        };
        *slot = config;
    }
}

/// Domain bounds and term shapes of one variable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableConfig {
    pub min: i64,
    pub max: i64,
    #[serde(default)]
    pub terms: TermsConfig,
}

impl VariableConfig {
    /// Five triangles evenly spaced over `[min, max]`, the outer two acting
    /// as shoulders that peak on the domain bounds.
    pub fn symmetric_triangles(min: i64, max: i64) -> Self {
        let (lo, hi) = (min as f64, max as f64);
        let step = (hi - lo) / 4.0;
        let peak = |i: usize| lo + step * i as f64;
        let mut terms = TermsConfig::default();
        for term in Term::ALL {
            let i = term.index();
            let left = if i == 0 { lo } else { peak(i - 1) };
            let right = if i == TERM_COUNT - 1 { hi } else { peak(i + 1) };
            terms.set(
                term,
                Some(TermConfig::new(
                    MembershipFamily::Trimf,
                    &[left, peak(i), right],
                )),
            );
        }
        Self { min, max, terms }
    }

    /// Validate into a [`Variable`].
    pub fn build(&self, kind: VariableKind) -> Result<Variable, FuzzyError> {
        let domain = Domain::new(kind, self.min, self.max)?;
        let [nm, ns, z, ps, pm] = Term::ALL.map(|term| self.function(kind, term));
        Ok(Variable::new(kind, domain, [nm?, ns?, z?, ps?, pm?]))
    }

    fn function(&self, kind: VariableKind, term: Term) -> Result<MembershipFunction, FuzzyError> {
        let cfg = self.terms.get(term).ok_or(FuzzyError::MissingTerm {
            variable: kind,
            term,
        })?;
        MembershipFunction::from_params(cfg.family, &cfg.params)
    }
}

/// Optional rule table override.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleTableConfig {
    /// One row per delta-error term, one column per error term.
    pub rows: Vec<Vec<Term>>,
}

/// Full configuration bundle for a [`FuzzyController`](crate::FuzzyController).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControllerConfig {
    pub error: VariableConfig,
    pub delta_error: VariableConfig,
    pub output: VariableConfig,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rules: Option<RuleTableConfig>,
}

impl Default for ControllerConfig {
    /// Symmetric triangular terms; error and delta-error over `[-10, 10]`,
    /// output over `[-5, 5]`, standard rule base.
    fn default() -> Self {
        Self {
            error: VariableConfig::symmetric_triangles(-10, 10),
            delta_error: VariableConfig::symmetric_triangles(-10, 10),
            output: VariableConfig::symmetric_triangles(-5, 5),
            rules: None,
        }
    }
}

/// Validated engine-side form of a [`ControllerConfig`].
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedConfig {
    pub error: Variable,
    pub delta_error: Variable,
    pub output: Variable,
    pub rules: RuleTable,
}

impl ControllerConfig {
    /// Parse a TOML document.
    pub fn from_toml_str(raw: &str) -> Result<Self, FuzzyError> {
        toml::from_str(raw).map_err(|e| FuzzyError::Config(format!("Failed to parse config: {e}")))
    }

    /// Serialize to a pretty TOML document.
    pub fn to_toml_string(&self) -> Result<String, FuzzyError> {
        toml::to_string_pretty(self)
            .map_err(|e| FuzzyError::Config(format!("Failed to serialize config: {e}")))
    }

    /// Read and parse the TOML file at `path`.
    pub fn load_from(path: &Path) -> Result<Self, FuzzyError> {
        let raw = fs::read_to_string(path).map_err(|e| {
            FuzzyError::Config(format!("Failed to read config at {}: {e}", path.display()))
        })?;
        Self::from_toml_str(&raw)
    }

    /// Write the configuration to `path` as TOML.
    pub fn save_to(&self, path: &Path) -> Result<(), FuzzyError> {
        let raw = self.to_toml_string()?;
        fs::write(path, raw).map_err(|e| {
            FuzzyError::Config(format!("Failed to write config at {}: {e}", path.display()))
        })
    }

    /// Check every variable and the rule table.
    pub fn build(&self) -> Result<ValidatedConfig, FuzzyError> {
        let rules = match &self.rules {
            Some(table) => RuleTable::from_rows(&table.rows)?,
            None => RuleTable::standard(),
        };
        Ok(ValidatedConfig {
            error: self.error.build(VariableKind::Error)?,
            delta_error: self.delta_error.build(VariableKind::DeltaError)?,
            output: self.output.build(VariableKind::Output)?,
            rules,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
[error]
min = -6
max = 6

[error.terms]
NM = { family = "trapmf", params = [-6, -6, -4, -2] }
NS = { family = "trimf", params = [-4, -2, 0] }
Z  = { family = "gaussmf", params = [0, 1.5] }
PS = { family = "trimf", params = [0, 2, 4] }
PM = { family = "trapmf", params = [2, 4, 6, 6] }

[delta_error]
min = -3
max = 3

[delta_error.terms]
NM = { family = "zmf", params = [-3, -1] }
NS = { family = "gbellmf", params = [1, 2, -1.5] }
Z  = { family = "pimf", params = [-2, -0.5, 0.5, 2] }
PS = { family = "gbellmf", params = [1, 2, 1.5] }
PM = { family = "smf", params = [1, 3] }

[output]
min = -5
max = 5

[output.terms]
NM = { family = "trimf", params = [-5, -5, -2.5] }
NS = { family = "trimf", params = [-5, -2.5, 0] }
Z  = { family = "trimf", params = [-2.5, 0, 2.5] }
PS = { family = "trimf", params = [0, 2.5, 5] }
PM = { family = "trimf", params = [2.5, 5, 5] }
"#;

    #[test]
    fn parses_mixed_families() {
        let cfg = ControllerConfig::from_toml_str(SAMPLE).expect("parse");
        assert_eq!(cfg.error.min, -6);
        assert_eq!(
            cfg.delta_error.terms.get(Term::Z).unwrap().family,
            MembershipFamily::Pimf
        );
        assert!(cfg.rules.is_none());
        let built = cfg.build().expect("valid");
        assert_eq!(built.rules, RuleTable::standard());
        assert_eq!(
            built.error.function(Term::Z).family(),
            MembershipFamily::Gaussmf
        );
    }

    #[test]
    fn default_config_is_valid() {
        let built = ControllerConfig::default().build().expect("valid");
        assert_eq!(built.output.domain().min(), -5);
        assert_eq!(
            built.error.function(Term::PM),
            &MembershipFunction::Triangular {
                a: 5.0,
                b: 10.0,
                c: 10.0
            }
        );
        assert_eq!(
            built.output.function(Term::NS),
            &MembershipFunction::Triangular {
                a: -5.0,
                b: -2.5,
                c: 0.0
            }
        );
    }

    #[test]
    fn missing_term_is_rejected() {
        let mut cfg = ControllerConfig::default();
        cfg.delta_error.terms.set(Term::PS, None);
        assert_eq!(
            cfg.build().unwrap_err(),
            FuzzyError::MissingTerm {
                variable: VariableKind::DeltaError,
                term: Term::PS
            }
        );
    }

    #[test]
    fn first_missing_term_in_order_is_reported() {
        let mut cfg = VariableConfig::symmetric_triangles(-3, 3);
        cfg.terms.set(Term::PM, None);
        cfg.terms.set(Term::NS, None);
        assert_eq!(
            cfg.build(VariableKind::Output).unwrap_err(),
            FuzzyError::MissingTerm {
                variable: VariableKind::Output,
                term: Term::NS
            }
        );
    }

    #[test]
    fn bad_shape_is_rejected_at_build() {
        let mut cfg = ControllerConfig::default();
        cfg.output
            .terms
            .set(Term::Z, Some(TermConfig::new(MembershipFamily::Trimf, &[0.0, 1.0])));
        assert!(matches!(
            cfg.build(),
            Err(FuzzyError::InvalidShapeParameters {
                family: MembershipFamily::Trimf,
                ..
            })
        ));
    }

    #[test]
    fn inverted_domain_is_rejected_at_build() {
        let mut cfg = ControllerConfig::default();
        cfg.error.min = 20;
        assert!(matches!(
            cfg.build(),
            Err(FuzzyError::InvalidDomain {
                variable: VariableKind::Error,
                ..
            })
        ));
    }

    #[test]
    fn huge_domain_is_rejected_at_build() {
        let mut cfg = ControllerConfig::default();
        cfg.output.min = -4_000_000_000_000;
        cfg.output.max = 4_000_000_000_000;
        assert!(matches!(
            crate::FuzzyController::new(&cfg),
            Err(FuzzyError::InvalidDomain {
                variable: VariableKind::Output,
                ..
            })
        ));
    }

    #[test]
    fn custom_rule_table_is_used() {
        let mut cfg = ControllerConfig::default();
        cfg.rules = Some(RuleTableConfig {
            rows: vec![vec![Term::Z; TERM_COUNT]; TERM_COUNT],
        });
        let built = cfg.build().unwrap();
        assert_eq!(built.rules.consequent(Term::PM, Term::PM), Term::Z);
    }

    #[test]
    fn short_rule_table_is_rejected() {
        let mut cfg = ControllerConfig::default();
        cfg.rules = Some(RuleTableConfig {
            rows: vec![vec![Term::Z; TERM_COUNT]; 4],
        });
        assert!(matches!(cfg.build(), Err(FuzzyError::InvalidRuleTable(_))));
    }

    #[test]
    fn unknown_family_fails_to_parse() {
        let raw = SAMPLE.replace("\"gaussmf\"", "\"cauchymf\"");
        assert!(matches!(
            ControllerConfig::from_toml_str(&raw),
            Err(FuzzyError::Config(_))
        ));
    }

    #[test]
    fn unknown_rule_term_fails_to_parse() {
        let raw = format!(
            "{SAMPLE}\n[rules]\nrows = [[\"NM\", \"NM\", \"NS\", \"Z\", \"PB\"]]\n"
        );
        assert!(ControllerConfig::from_toml_str(&raw).is_err());
    }

    #[test]
    fn roundtrip_through_file() {
        let dir = tempfile::tempdir().expect("tmp dir");
        let path = dir.path().join("controller.toml");

        let mut cfg = ControllerConfig::default();
        cfg.rules = Some(RuleTableConfig {
            rows: RuleTable::standard().to_rows(),
        });
        cfg.save_to(&path).expect("save");

        let loaded = ControllerConfig::load_from(&path).expect("load");
        assert_eq!(loaded, cfg);
    }

    #[test]
    fn load_from_missing_file_is_config_error() {
        let dir = tempfile::tempdir().expect("tmp dir");
        let err = ControllerConfig::load_from(&dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, FuzzyError::Config(_)));
        assert!(err.to_string().contains("absent.toml"));
    }
}
