//! Scoring primitives
//!
//! # Scoring formula
//!
//! ```text
//! final = perf_score × performance_weight + price_fit × 100 × price_weight
//!
//! price_fit = clamp(1 − |price_mid − target| / target, 0, 1)
//! ```
//!
//! Price fit degrades linearly to 0 as the price midpoint deviates ±100%
//! from the category's budget target, and is scaled ×100 so it is
//! commensurate with performance scores (roughly a 0-100 scale). The
//! weights come from the mode's score bias, 0.5 each when unset.

use crate::models::Component;
use crate::rules::Mode;

/// Watts added to CPU TDP + GPU power for board, storage, and fans.
pub const BASELINE_POWER_W: f64 = 120.0;

/// Factor bringing the 0-1 price fit onto the performance score's scale.
const PRICE_FIT_SCALE: f64 = 100.0;

fn clamp(value: f64, min: f64, max: f64) -> f64 {
    value.max(min).min(max)
}

/// How well a price midpoint fits a budget target, in `[0, 1]`.
///
/// A non-positive target yields 0: a category with no budget share is
/// scored on performance alone.
pub fn price_fit_score(price_mid: f64, target: f64) -> f64 {
    if target <= 0.0 {
        return 0.0;
    }
    let diff_ratio = (price_mid - target).abs() / target;
    clamp(1.0 - diff_ratio, 0.0, 1.0)
}

/// Weighted blend of performance score and price fit.
pub fn final_score<C: Component>(part: &C, target: f64, mode: &Mode) -> f64 {
    let price_fit = price_fit_score(part.price_range().midpoint(), target);
    part.perf_score() * mode.score_bias.performance
        + price_fit * PRICE_FIT_SCALE * mode.score_bias.price
}
