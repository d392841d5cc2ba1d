//! Defuzzifier.
//!
//! Reduces the aggregated output set to a crisp value with the discrete
//! centroid
//!
//! ```text
//! x* = Σ xᵢ·μᵢ / Σ μᵢ
//! ```
//!
//! A set with zero total mass has no centroid: that case is reported as
//! [`FuzzyError::DegenerateAggregate`] and left to the caller's fallback
//! policy.

use fuzzpid_types::FuzzyError;

use crate::membership::MembershipCurve;

/// Centroid of `aggregated` over `samples`.
pub fn defuzzify(samples: &[f64], aggregated: &MembershipCurve) -> Result<f64, FuzzyError> {
    if samples.len() != aggregated.len() {
        return Err(FuzzyError::InvalidInput(format!(
            "aggregated set has {} degrees for {} samples",
            aggregated.len(),
            samples.len()
        )));
    }

    let (moment, mass) = aggregated
        .points(samples)
        .fold((0.0, 0.0), |(m, w), (x, mu)| (m + x * mu, w + mu));

    if mass <= 0.0 {
        return Err(FuzzyError::DegenerateAggregate);
    }
    Ok(moment / mass)
}
