//! Entry points behind the command line
//!
//! [context] reads the runner environment, [orchestration] runs the
//! decision and acts on it.

pub mod context;
pub mod orchestration;

pub use context::{ActionContext, PullRequestEvent};
pub use orchestration::{run_publish_workflow, WorkflowResult};
