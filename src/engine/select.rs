//! Candidate selector: budget window, ranking, and best pick
//!
//! The same triad serves every category. Budget constraints never
//! eliminate all candidates outright: an empty window falls back to the
//! unfiltered pool.

use std::cmp::Ordering;

use crate::models::Component;
use crate::rules::Mode;
use crate::scoring::final_score;

/// Keep parts whose price midpoint lies within `target ± tolerance`.
///
/// Falls back to the full input when the window is empty, so a non-empty
/// input never produces an empty output.
pub fn within_budget<'a, C: Component>(
    items: &[&'a C],
    target: f64,
    tolerance: f64,
) -> Vec<&'a C> {
    if items.is_empty() {
        return Vec::new();
    }
    let lo = target * (1.0 - tolerance);
    let hi = target * (1.0 + tolerance);
    let within: Vec<&C> = items
        .iter()
        .copied()
        .filter(|item| {
            let mid = item.price_range().midpoint();
            mid >= lo && mid <= hi
        })
        .collect();
    if within.is_empty() {
        items.to_vec()
    } else {
        within
    }
}

/// Sort descending by final score. Exact score ties break toward lower
/// power draw when the mode prefers low power; otherwise the stable sort
/// keeps catalog order.
pub fn rank<'a, C: Component>(items: &[&'a C], target: f64, mode: &Mode) -> Vec<&'a C> {
    let low_power = mode.prefers_low_power();
    let mut scored: Vec<(&C, f64, f64)> = items
        .iter()
        .map(|&item| (item, final_score(item, target, mode), item.power_value()))
        .collect();
    scored.sort_by(|a, b| {
        let by_score = b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal);
        if by_score == Ordering::Equal && low_power {
            a.2.partial_cmp(&b.2).unwrap_or(Ordering::Equal)
        } else {
            by_score
        }
    });
    scored.into_iter().map(|(item, _, _)| item).collect()
}

/// Best candidate within the budget window, or `None` on an empty pool.
pub fn pick_best<'a, C: Component>(
    items: &[&'a C],
    target: f64,
    mode: &Mode,
    tolerance: f64,
) -> Option<&'a C> {
    let pool = within_budget(items, target, tolerance);
    rank(&pool, target, mode).into_iter().next()
}
