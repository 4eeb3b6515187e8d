//! User interface module - reporting workflow results to the CI log.
//!
//! - `formatter` - Message text and styled printing
//! - This module - Choosing what to print for a [WorkflowResult]

pub mod formatter;

// Re-export formatter functions for convenience
pub use formatter::{
    display_boundary_warning, display_error, display_protection, display_skip, display_status,
    display_success, display_version_change,
};

use crate::boundary::BoundaryWarning;
use crate::cli::WorkflowResult;

/// Print the outcome of a workflow.
pub fn display_workflow_result(result: &WorkflowResult) {
    match result {
        WorkflowResult::Skipped(reason) => display_skip(reason),
        WorkflowResult::Tagged {
            version,
            tag,
            pushed,
            ..
        } => {
            if *pushed {
                display_version_change(version, tag);
            } else {
                display_boundary_warning(&BoundaryWarning::DryRun {
                    change: formatter::format_version_change(version, tag),
                });
            }
        }
        WorkflowResult::Protected { outcome, pushed } => {
            if !outcome.replaced && *pushed {
                display_boundary_warning(&BoundaryWarning::ProtectionTagMissing {
                    tag: outcome.tag.clone(),
                });
            }
            if *pushed {
                display_protection(outcome);
            } else {
                display_boundary_warning(&BoundaryWarning::DryRun {
                    change: formatter::format_protection(outcome),
                });
            }
        }
    }
}
