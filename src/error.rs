//! Error types for rigfit
//!
//! The category pipelines themselves have no failure paths: empty pools
//! fall back to wider pools and shortfalls surface as warning strings.
//! `RigError` covers the boundaries around them: form-id resolution,
//! catalog lookups, and override parsing.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RigError {
    #[error("unknown category '{0}' (expected one of: cpu, gpu, motherboard, memory, storage, psu, cooler, case)")]
    UnknownCategory(String),

    #[error("no part with id '{id}' in the {category} catalog")]
    UnknownPart { category: String, id: String },

    #[error("budget '{0}' is not defined in the rule table")]
    UnknownBudget(String),

    #[error("scenario '{0}' is not defined in the rule table")]
    UnknownScenario(String),

    #[error("mode '{0}' is not defined in the rule table")]
    UnknownMode(String),

    #[error("override '{0}' is not of the form category=part-id")]
    BadOverride(String),
}
