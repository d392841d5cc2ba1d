//! Membership Evaluator.
//!
//! A [`MembershipFunction`] is a tagged variant: one enum arm per family, each
//! carrying its own shape parameters.  Evaluating it over a variable's domain
//! samples yields a [`MembershipCurve`] whose degrees are aligned with those
//! samples.
//!
//! Parameters arrive from configuration as a family name plus a flat list of
//! numbers; [`MembershipFunction::from_params`] checks arity and shape
//! constraints so that a bad configuration is rejected before any inference
//! runs.
//!
//! # Example
//!
//! ```rust
//! use fuzzpid_engine::membership::{evaluate, MembershipFunction};
//! use fuzzpid_types::MembershipFamily;
//!
//! let tri = MembershipFunction::from_params(MembershipFamily::Trimf, &[-5.0, 0.0, 5.0]).unwrap();
//! let samples = [-5.0, -2.5, 0.0, 2.5, 5.0];
//! let curve = evaluate(&tri, &samples);
//! assert_eq!(curve.degrees(), &[0.0, 0.5, 1.0, 0.5, 0.0]);
//! ```

use fuzzpid_types::{FuzzyError, MembershipFamily};
use serde::Serialize;

// ────────────────────────────────────────────────────────────────────────────
// MembershipFunction
// ────────────────────────────────────────────────────────────────────────────

/// A membership-function family together with its shape parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MembershipFunction {
    /// `trimf(a, b, c)`: peak at `b`, zero outside `(a, c)`.
    Triangular { a: f64, b: f64, c: f64 },
    /// `trapmf(a, b, c, d)`: plateau on `[b, c]`, zero outside `[a, d]`.
    Trapezoidal { a: f64, b: f64, c: f64, d: f64 },
    /// `gaussmf(mean, sigma)`.
    Gaussian { mean: f64, sigma: f64 },
    /// `gauss2mf(mean1, sigma1, mean2, sigma2)`: flat top between the means.
    TwoSidedGaussian {
        mean1: f64,
        sigma1: f64,
        mean2: f64,
        sigma2: f64,
    },
    /// `gbellmf(a, b, c)`: width `a`, slope `b`, centre `c`.
    GeneralizedBell { a: f64, b: f64, c: f64 },
    /// `sigmf(b, c)`: offset `b`, slope `c`.
    Sigmoid { b: f64, c: f64 },
    /// `dsigmf(b1, c1, b2, c2)`: difference of two sigmoids.
    DifferenceOfSigmoids { b1: f64, c1: f64, b2: f64, c2: f64 },
    /// `psigmf(b1, c1, b2, c2)`: product of two sigmoids.
    ProductOfSigmoids { b1: f64, c1: f64, b2: f64, c2: f64 },
    /// `smf(a, b)`: quadratic S-curve rising from `a` to `b`.
    SCurve { a: f64, b: f64 },
    /// `zmf(a, b)`: quadratic Z-curve falling from `a` to `b`.
    ZCurve { a: f64, b: f64 },
    /// `pimf(a, b, c, d)`: S-rise on `[a, b]`, plateau, Z-fall on `[c, d]`.
    PiCurve { a: f64, b: f64, c: f64, d: f64 },
    /// `piecemf(a, b, c)`: piecewise-linear ramp that saturates above `c`.
    PiecewiseLinear { a: f64, b: f64, c: f64 },
}

impl MembershipFunction {
    /// Build a function from a family name and a flat parameter list.
    ///
    /// Returns [`FuzzyError::InvalidShapeParameters`] when the arity does not
    /// match the family, a parameter is not finite, breakpoints are out of
    /// order, or a width parameter is zero.
    pub fn from_params(family: MembershipFamily, params: &[f64]) -> Result<Self, FuzzyError> {
        let invalid = |details: String| FuzzyError::InvalidShapeParameters { family, details };

        if params.len() != family.arity() {
            return Err(invalid(format!(
                "expected {} parameters, got {}",
                family.arity(),
                params.len()
            )));
        }
        if let Some(p) = params.iter().find(|p| !p.is_finite()) {
            return Err(invalid(format!("parameter {p} is not finite")));
        }

        let p = params;
        let function = match family {
            MembershipFamily::Trimf => {
                ensure_ordered(p).map_err(invalid)?;
                Self::Triangular {
                    a: p[0],
                    b: p[1],
                    c: p[2],
                }
            }
            MembershipFamily::Trapmf => {
                ensure_ordered(p).map_err(invalid)?;
                Self::Trapezoidal {
                    a: p[0],
                    b: p[1],
                    c: p[2],
                    d: p[3],
                }
            }
            MembershipFamily::Gaussmf => {
                ensure_nonzero("sigma", p[1]).map_err(invalid)?;
                Self::Gaussian {
                    mean: p[0],
                    sigma: p[1],
                }
            }
            MembershipFamily::Gauss2mf => {
                ensure_nonzero("sigma1", p[1]).map_err(invalid)?;
                ensure_nonzero("sigma2", p[3]).map_err(invalid)?;
                if p[0] > p[2] {
                    return Err(invalid(format!("mean1 {} exceeds mean2 {}", p[0], p[2])));
                }
                Self::TwoSidedGaussian {
                    mean1: p[0],
                    sigma1: p[1],
                    mean2: p[2],
                    sigma2: p[3],
                }
            }
            MembershipFamily::Gbellmf => {
                ensure_nonzero("a", p[0]).map_err(invalid)?;
                Self::GeneralizedBell {
                    a: p[0],
                    b: p[1],
                    c: p[2],
                }
            }
            MembershipFamily::Sigmf => Self::Sigmoid { b: p[0], c: p[1] },
            MembershipFamily::Dsigmf => Self::DifferenceOfSigmoids {
                b1: p[0],
                c1: p[1],
                b2: p[2],
                c2: p[3],
            },
            MembershipFamily::Psigmf => Self::ProductOfSigmoids {
                b1: p[0],
                c1: p[1],
                b2: p[2],
                c2: p[3],
            },
            MembershipFamily::Smf => {
                ensure_ordered(p).map_err(invalid)?;
                Self::SCurve { a: p[0], b: p[1] }
            }
            MembershipFamily::Zmf => {
                ensure_ordered(p).map_err(invalid)?;
                Self::ZCurve { a: p[0], b: p[1] }
            }
            MembershipFamily::Pimf => {
                ensure_ordered(p).map_err(invalid)?;
                Self::PiCurve {
                    a: p[0],
                    b: p[1],
                    c: p[2],
                    d: p[3],
                }
            }
            MembershipFamily::Piecemf => {
                ensure_ordered(p).map_err(invalid)?;
                // The (b, c] segment divides by c.
                if p[1] < p[2] {
                    ensure_nonzero("c", p[2]).map_err(invalid)?;
                }
                Self::PiecewiseLinear {
                    a: p[0],
                    b: p[1],
                    c: p[2],
                }
            }
        };
        Ok(function)
    }

    /// The configuration family this function belongs to.
    pub fn family(&self) -> MembershipFamily {
        match self {
            Self::Triangular { .. } => MembershipFamily::Trimf,
            Self::Trapezoidal { .. } => MembershipFamily::Trapmf,
            Self::Gaussian { .. } => MembershipFamily::Gaussmf,
            Self::TwoSidedGaussian { .. } => MembershipFamily::Gauss2mf,
            Self::GeneralizedBell { .. } => MembershipFamily::Gbellmf,
            Self::Sigmoid { .. } => MembershipFamily::Sigmf,
            Self::DifferenceOfSigmoids { .. } => MembershipFamily::Dsigmf,
            Self::ProductOfSigmoids { .. } => MembershipFamily::Psigmf,
            Self::SCurve { .. } => MembershipFamily::Smf,
            Self::ZCurve { .. } => MembershipFamily::Zmf,
            Self::PiCurve { .. } => MembershipFamily::Pimf,
            Self::PiecewiseLinear { .. } => MembershipFamily::Piecemf,
        }
    }

    /// Degree of membership of a single crisp `x`, always within `[0, 1]`.
    pub fn degree(&self, x: f64) -> f64 {
        let y = match *self {
            Self::Triangular { a, b, c } => triangular(x, a, b, c),
            Self::Trapezoidal { a, b, c, d } => {
                if (b..=c).contains(&x) {
                    1.0
                } else if x > a && x < b {
                    (x - a) / (b - a)
                } else if x > c && x < d {
                    (d - x) / (d - c)
                } else {
                    0.0
                }
            }
            Self::Gaussian { mean, sigma } => gaussian(x, mean, sigma),
            Self::TwoSidedGaussian {
                mean1,
                sigma1,
                mean2,
                sigma2,
            } => {
                if x <= mean1 {
                    gaussian(x, mean1, sigma1)
                } else if x > mean2 {
                    gaussian(x, mean2, sigma2)
                } else {
                    1.0
                }
            }
            Self::GeneralizedBell { a, b, c } => 1.0 / (1.0 + ((x - c) / a).abs().powf(2.0 * b)),
            Self::Sigmoid { b, c } => sigmoid(x, b, c),
            Self::DifferenceOfSigmoids { b1, c1, b2, c2 } => sigmoid(x, b1, c1) - sigmoid(x, b2, c2),
            Self::ProductOfSigmoids { b1, c1, b2, c2 } => sigmoid(x, b1, c1) * sigmoid(x, b2, c2),
            Self::SCurve { a, b } => s_curve(x, a, b),
            Self::ZCurve { a, b } => 1.0 - s_curve(x, a, b),
            Self::PiCurve { a, b, c, d } => {
                if x <= c {
                    s_curve(x, a, b)
                } else {
                    1.0 - s_curve(x, c, d)
                }
            }
            Self::PiecewiseLinear { a, b, c } => {
                if x <= a {
                    0.0
                } else if x <= b {
                    (x - a) / (c - a)
                } else if x <= c {
                    x / c
                } else {
                    1.0
                }
            }
        };
        y.clamp(0.0, 1.0)
    }
}

fn ensure_ordered(points: &[f64]) -> Result<(), String> {
    match points.windows(2).find(|w| w[0] > w[1]) {
        Some(w) => Err(format!("breakpoints out of order: {} > {}", w[0], w[1])),
        None => Ok(()),
    }
}

fn ensure_nonzero(name: &str, value: f64) -> Result<(), String> {
    if value == 0.0 {
        Err(format!("{name} must be non-zero"))
    } else {
        Ok(())
    }
}

fn triangular(x: f64, a: f64, b: f64, c: f64) -> f64 {
    if x == b {
        1.0
    } else if x > a && x < b {
        (x - a) / (b - a)
    } else if x > b && x < c {
        (c - x) / (c - b)
    } else {
        0.0
    }
}

fn gaussian(x: f64, mean: f64, sigma: f64) -> f64 {
    (-(x - mean).powi(2) / (2.0 * sigma.powi(2))).exp()
}

fn sigmoid(x: f64, b: f64, c: f64) -> f64 {
    1.0 / (1.0 + (-c * (x - b)).exp())
}

/// Quadratic S-spline between `a` and `b`; a step when `a == b`.
fn s_curve(x: f64, a: f64, b: f64) -> f64 {
    if x <= a {
        0.0
    } else if x >= b {
        1.0
    } else if x <= (a + b) / 2.0 {
        2.0 * ((x - a) / (b - a)).powi(2)
    } else {
        1.0 - 2.0 * ((x - b) / (b - a)).powi(2)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// MembershipCurve
// ────────────────────────────────────────────────────────────────────────────

/// Sampled membership degrees, index-aligned with the owning variable's
/// domain samples.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct MembershipCurve(Vec<f64>);

impl MembershipCurve {
    pub fn degrees(&self) -> &[f64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Pair each degree with its x-coordinate.
    pub fn points<'a>(&'a self, samples: &'a [f64]) -> impl Iterator<Item = (f64, f64)> + 'a {
        samples.iter().copied().zip(self.0.iter().copied())
    }
}

impl From<Vec<f64>> for MembershipCurve {
    fn from(degrees: Vec<f64>) -> Self {
        Self(degrees)
    }
}

impl FromIterator<f64> for MembershipCurve {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Sample `function` at every point of `samples`.
pub fn evaluate(function: &MembershipFunction, samples: &[f64]) -> MembershipCurve {
    samples.iter().map(|&x| function.degree(x)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn mf(family: MembershipFamily, params: &[f64]) -> MembershipFunction {
        MembershipFunction::from_params(family, params).unwrap()
    }

    fn domain() -> Vec<f64> {
        (-10..=10).map(f64::from).collect()
    }

    // ------------------------------------------------------------------ arity

    #[test]
    fn wrong_arity_is_rejected_for_every_family() {
        let families = [
            MembershipFamily::Trimf,
            MembershipFamily::Trapmf,
            MembershipFamily::Gaussmf,
            MembershipFamily::Gauss2mf,
            MembershipFamily::Gbellmf,
            MembershipFamily::Sigmf,
            MembershipFamily::Dsigmf,
            MembershipFamily::Psigmf,
            MembershipFamily::Smf,
            MembershipFamily::Zmf,
            MembershipFamily::Pimf,
            MembershipFamily::Piecemf,
        ];
        for family in families {
            let params = vec![1.0; family.arity() + 1];
            let err = MembershipFunction::from_params(family, &params).unwrap_err();
            assert!(
                matches!(err, FuzzyError::InvalidShapeParameters { family: f, .. } if f == family),
                "{family} accepted {} params",
                params.len()
            );
        }
    }

    #[test]
    fn unordered_breakpoints_are_rejected() {
        assert!(MembershipFunction::from_params(MembershipFamily::Trimf, &[0.0, -1.0, 1.0]).is_err());
        assert!(
            MembershipFunction::from_params(MembershipFamily::Trapmf, &[0.0, 1.0, 3.0, 2.0]).is_err()
        );
        assert!(MembershipFunction::from_params(MembershipFamily::Smf, &[2.0, 1.0]).is_err());
    }

    #[test]
    fn zero_width_is_rejected() {
        assert!(MembershipFunction::from_params(MembershipFamily::Gaussmf, &[0.0, 0.0]).is_err());
        assert!(
            MembershipFunction::from_params(MembershipFamily::Gbellmf, &[0.0, 2.0, 0.0]).is_err()
        );
    }

    #[test]
    fn non_finite_parameter_is_rejected() {
        assert!(
            MembershipFunction::from_params(MembershipFamily::Sigmf, &[f64::NAN, 1.0]).is_err()
        );
    }

    #[test]
    fn family_roundtrips_through_from_params() {
        let f = mf(MembershipFamily::Gauss2mf, &[-1.0, 1.0, 1.0, 2.0]);
        assert_eq!(f.family(), MembershipFamily::Gauss2mf);
    }

    // ------------------------------------------------------------------ shapes

    #[test]
    fn triangular_peak_and_support() {
        let f = mf(MembershipFamily::Trimf, &[-5.0, 0.0, 5.0]);
        assert!((f.degree(0.0) - 1.0).abs() < EPS);
        assert!((f.degree(2.5) - 0.5).abs() < EPS);
        assert_eq!(f.degree(-5.0), 0.0);
        assert_eq!(f.degree(7.0), 0.0);
    }

    #[test]
    fn triangular_shoulder_reaches_one_at_edge() {
        let f = mf(MembershipFamily::Trimf, &[5.0, 10.0, 10.0]);
        assert!((f.degree(10.0) - 1.0).abs() < EPS);
        assert!((f.degree(7.5) - 0.5).abs() < EPS);
    }

    #[test]
    fn trapezoidal_plateau() {
        let f = mf(MembershipFamily::Trapmf, &[-4.0, -2.0, 2.0, 4.0]);
        assert_eq!(f.degree(-2.0), 1.0);
        assert_eq!(f.degree(0.0), 1.0);
        assert_eq!(f.degree(2.0), 1.0);
        assert!((f.degree(3.0) - 0.5).abs() < EPS);
        assert_eq!(f.degree(5.0), 0.0);
    }

    #[test]
    fn gaussian_peak_at_mean() {
        let f = mf(MembershipFamily::Gaussmf, &[1.0, 2.0]);
        assert!((f.degree(1.0) - 1.0).abs() < EPS);
        assert!((f.degree(3.0) - (-0.5f64).exp()).abs() < EPS);
    }

    #[test]
    fn two_sided_gaussian_is_flat_between_means() {
        let f = mf(MembershipFamily::Gauss2mf, &[-1.0, 1.0, 1.0, 1.0]);
        assert_eq!(f.degree(0.0), 1.0);
        assert!(f.degree(-3.0) < 1.0);
        assert!(f.degree(3.0) < 1.0);
    }

    #[test]
    fn generalized_bell_half_at_width() {
        let f = mf(MembershipFamily::Gbellmf, &[2.0, 3.0, 0.0]);
        assert_eq!(f.degree(0.0), 1.0);
        assert!((f.degree(2.0) - 0.5).abs() < EPS);
        assert!((f.degree(-2.0) - 0.5).abs() < EPS);
    }

    #[test]
    fn sigmoid_family() {
        let s = mf(MembershipFamily::Sigmf, &[0.0, 1.0]);
        assert!((s.degree(0.0) - 0.5).abs() < EPS);
        assert!(s.degree(10.0) > 0.99);

        let d = mf(MembershipFamily::Dsigmf, &[-2.0, 5.0, 2.0, 5.0]);
        assert!(d.degree(0.0) > 0.99);
        assert!(d.degree(8.0) < 0.01);

        let p = mf(MembershipFamily::Psigmf, &[-2.0, 5.0, 2.0, -5.0]);
        assert!(p.degree(0.0) > 0.99);
        assert!(p.degree(-8.0) < 0.01);
    }

    #[test]
    fn difference_of_sigmoids_never_negative() {
        // Inverted configuration would go negative without clamping.
        let d = mf(MembershipFamily::Dsigmf, &[2.0, 5.0, -2.0, 5.0]);
        for x in domain() {
            assert!(d.degree(x) >= 0.0);
        }
    }

    #[test]
    fn s_and_z_curves_mirror() {
        let s = mf(MembershipFamily::Smf, &[-2.0, 2.0]);
        let z = mf(MembershipFamily::Zmf, &[-2.0, 2.0]);
        assert_eq!(s.degree(-3.0), 0.0);
        assert_eq!(s.degree(3.0), 1.0);
        assert!((s.degree(0.0) - 0.5).abs() < EPS);
        assert!((s.degree(-1.0) - 0.125).abs() < EPS);
        for x in domain() {
            assert!((s.degree(x) + z.degree(x) - 1.0).abs() < EPS);
        }
    }

    #[test]
    fn pi_curve_plateau() {
        let f = mf(MembershipFamily::Pimf, &[-6.0, -2.0, 2.0, 6.0]);
        assert_eq!(f.degree(0.0), 1.0);
        assert!((f.degree(-4.0) - 0.5).abs() < EPS);
        assert!((f.degree(4.0) - 0.5).abs() < EPS);
        assert_eq!(f.degree(-6.0), 0.0);
        assert_eq!(f.degree(6.0), 0.0);
    }

    #[test]
    fn piecewise_linear_saturates() {
        let f = mf(MembershipFamily::Piecemf, &[0.0, 2.0, 4.0]);
        assert_eq!(f.degree(-1.0), 0.0);
        assert!((f.degree(1.0) - 0.25).abs() < EPS);
        assert!((f.degree(3.0) - 0.75).abs() < EPS);
        assert_eq!(f.degree(5.0), 1.0);
    }

    #[test]
    fn every_family_stays_within_unit_interval() {
        let functions = [
            mf(MembershipFamily::Trimf, &[-5.0, 0.0, 5.0]),
            mf(MembershipFamily::Trapmf, &[-5.0, -1.0, 1.0, 5.0]),
            mf(MembershipFamily::Gaussmf, &[0.0, 3.0]),
            mf(MembershipFamily::Gauss2mf, &[-1.0, 2.0, 1.0, 2.0]),
            mf(MembershipFamily::Gbellmf, &[3.0, 2.0, 0.0]),
            mf(MembershipFamily::Sigmf, &[0.0, 1.0]),
            mf(MembershipFamily::Dsigmf, &[-3.0, 2.0, 3.0, 2.0]),
            mf(MembershipFamily::Psigmf, &[-3.0, 2.0, 3.0, -2.0]),
            mf(MembershipFamily::Smf, &[-3.0, 3.0]),
            mf(MembershipFamily::Zmf, &[-3.0, 3.0]),
            mf(MembershipFamily::Pimf, &[-8.0, -2.0, 2.0, 8.0]),
            mf(MembershipFamily::Piecemf, &[-10.0, 0.0, 10.0]),
        ];
        let samples = domain();
        for f in &functions {
            let curve = evaluate(f, &samples);
            assert_eq!(curve.len(), samples.len());
            assert!(
                curve.degrees().iter().all(|d| (0.0..=1.0).contains(d)),
                "{} left [0, 1]",
                f.family()
            );
        }
    }

    // ------------------------------------------------------------------ curve

    #[test]
    fn curve_points_pair_samples() {
        let samples = [-1.0, 0.0, 1.0];
        let f = mf(MembershipFamily::Trimf, &[-1.0, 0.0, 1.0]);
        let curve = evaluate(&f, &samples);
        let points: Vec<_> = curve.points(&samples).collect();
        assert_eq!(points, vec![(-1.0, 0.0), (0.0, 1.0), (1.0, 0.0)]);
    }
}
