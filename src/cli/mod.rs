//! Action dispatch for the `auto-semver` binary

pub mod orchestration;

pub use orchestration::{run_action, run_mark, run_version, Action, WorkflowOptions, WorkflowResult};
