//! User interface module.
//!
//! The tool runs unattended in CI, so there are no prompts: only
//! formatting of statuses, warnings and decisions.

pub mod formatter;

pub use formatter::{
    display_commit_analysis, display_decision, display_error, display_status, display_success,
    display_warning,
};
