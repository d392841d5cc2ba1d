//! Output Composer.
//!
//! Clips every output curve at its aggregated rule strength (pointwise
//! `min`) and fuses the clipped curves into one aggregated fuzzy set
//! (pointwise `max`).

use fuzzpid_types::TERM_COUNT;
use serde::Serialize;

use crate::membership::MembershipCurve;
use crate::rules::OutputStrengths;

/// Clipped per-term curves and the fused set they produce.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutputComposition {
    pub clipped: [MembershipCurve; TERM_COUNT],
    pub aggregated: MembershipCurve,
}

/// `min(curve[x], strength)` at every sample.
pub fn clip(curve: &MembershipCurve, strength: f64) -> MembershipCurve {
    curve.degrees().iter().map(|&y| y.min(strength)).collect()
}

/// Pointwise maximum over `curves`.  All curves must share one domain.
pub fn fuse(curves: &[MembershipCurve]) -> MembershipCurve {
    let len = curves.iter().map(MembershipCurve::len).max().unwrap_or(0);
    (0..len)
        .map(|i| {
            curves
                .iter()
                .filter_map(|c| c.degrees().get(i).copied())
                .fold(0.0, f64::max)
        })
        .collect()
}

/// Clip each output curve by its strength, then fuse.
pub fn compose(
    curves: &[MembershipCurve; TERM_COUNT],
    strengths: &OutputStrengths,
) -> OutputComposition {
    let clipped: [MembershipCurve; TERM_COUNT] =
        std::array::from_fn(|i| clip(&curves[i], strengths[i]));
    let aggregated = fuse(&clipped);
    OutputComposition {
        clipped,
        aggregated,
    }
}
