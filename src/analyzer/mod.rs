//! Decision engine turning commits and known tags into the next tag

pub mod decision;

pub use decision::{Baseline, DecisionEngine, SkipReason, TagDecision, TagPlan};
