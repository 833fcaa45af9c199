//! rigfit - rule-driven PC build recommendations
//!
//! Picks one part per hardware category to fit a price bracket and usage
//! scenario, respecting cross-part compatibility (CPU platform, memory
//! generation, form factor, PSU headroom, cooler rating).

pub mod catalog;
pub mod cli;
pub mod engine;
pub mod error;
pub mod loader;
pub mod models;
pub mod reporters;
pub mod rules;
pub mod scoring;
