//! Recommendation engine
//!
//! [`select`] holds the category-agnostic budget/rank/pick triad,
//! [`resolve`] the per-category candidate pipelines, [`assemble`] the
//! full-build orchestration, and [`diy`] the manual-override helpers.

pub mod assemble;
pub mod diy;
pub mod resolve;
pub mod select;

pub use assemble::compute_recommendation;
