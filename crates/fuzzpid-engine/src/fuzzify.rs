//! Fuzzifier.
//!
//! Converts a crisp value into one membership degree per term by linearly
//! interpolating each sampled curve.  Values beyond the domain take the
//! degree of the nearest boundary sample.

use fuzzpid_types::{FuzzyError, TERM_COUNT};

use crate::membership::MembershipCurve;

/// One degree per term, in term order.
pub type MembershipDegrees = [f64; TERM_COUNT];

/// Linearly interpolate `(samples, degrees)` at `x`.
///
/// `samples` must be ascending.  Values outside the sampled range clamp to
/// the first or last degree.  Returns `None` when `samples` is empty or the
/// two slices differ in length.
pub fn interp_membership(samples: &[f64], degrees: &[f64], x: f64) -> Option<f64> {
    if samples.len() != degrees.len() {
        return None;
    }
    let (&first, &last) = (samples.first()?, samples.last()?);
    if x <= first {
        return degrees.first().copied();
    }
    if x >= last {
        return degrees.last().copied();
    }

    // First sample strictly greater than x; x lies in [samples[i-1], samples[i]).
    let i = samples.partition_point(|&s| s <= x);
    let (x1, x2) = (samples[i - 1], samples[i]);
    let (y1, y2) = (degrees[i - 1], degrees[i]);
    Some(y1 + (x - x1) * (y2 - y1) / (x2 - x1))
}

/// Fuzzify `crisp` against the five curves of one variable.
pub fn fuzzify(
    samples: &[f64],
    curves: &[MembershipCurve; TERM_COUNT],
    crisp: f64,
) -> Result<MembershipDegrees, FuzzyError> {
    if !crisp.is_finite() {
        return Err(FuzzyError::InvalidInput(format!(
            "crisp value {crisp} is not finite"
        )));
    }
    if samples.is_empty() {
        return Err(FuzzyError::InvalidInput("empty domain".to_string()));
    }

    let mut degrees: MembershipDegrees = [0.0; TERM_COUNT];
    for (degree, curve) in degrees.iter_mut().zip(curves) {
        *degree = interp_membership(samples, curve.degrees(), crisp).ok_or_else(|| {
            FuzzyError::InvalidInput(format!(
                "curve has {} degrees for {} samples",
                curve.len(),
                samples.len()
            ))
        })?;
    }
    Ok(degrees)
}
