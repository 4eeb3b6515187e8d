//! Pure formatting functions for UI output.
//!
//! The `format_*` functions build the message text and are unit tested; the
//! `display_*` functions add styling and print.

use console::style;

use crate::analyzer::{NextVersion, SkipReason};
use crate::boundary::BoundaryWarning;
use crate::protect::ProtectionOutcome;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Display a boundary warning to the user.
pub fn display_boundary_warning(warning: &BoundaryWarning) {
    eprintln!("{} {}", style("⚠ WARNING:").yellow(), warning);
}

/// `Automatic versioning: 1.2.3 ——> v1.2.4`
pub fn format_version_change(version: &NextVersion, tag: &str) -> String {
    format!(
        "Automatic versioning: {} ——> {}",
        version.previous_label(),
        tag
    )
}

pub fn format_skip(reason: &SkipReason) -> String {
    format!("Skipped automatic versioning: {}", reason)
}

/// `Added tag release-prod for commit v1.2.3 (0a1b2c3)`
pub fn format_protection(outcome: &ProtectionOutcome) -> String {
    let short_commit = if outcome.commit.len() > 7 {
        &outcome.commit[..7]
    } else {
        outcome.commit.as_str()
    };
    format!(
        "Added tag {} for commit {} ({})",
        outcome.tag, outcome.target, short_commit
    )
}

/// Display a version bump, with the tag highlighted.
pub fn display_version_change(version: &NextVersion, tag: &str) {
    display_success(&format_version_change(version, &style(tag).green().bold().to_string()));
}

pub fn display_skip(reason: &SkipReason) {
    display_status(&format_skip(reason));
}

pub fn display_protection(outcome: &ProtectionOutcome) {
    display_success(&format_protection(outcome));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Version, VersionBump};

    #[test]
    fn test_format_version_change() {
        let version = NextVersion {
            previous: Some(Version::new(1, 2, 3)),
            next: Version::new(1, 2, 4),
            bump: Some(VersionBump::Patch),
        };
        assert_eq!(
            format_version_change(&version, "v1.2.4"),
            "Automatic versioning: 1.2.3 ——> v1.2.4"
        );
    }

    #[test]
    fn test_format_initial_version() {
        let version = NextVersion {
            previous: None,
            next: Version::new(1, 0, 0),
            bump: None,
        };
        assert_eq!(
            format_version_change(&version, "v1.0.0"),
            "Automatic versioning: None ——> v1.0.0"
        );
    }

    #[test]
    fn test_format_skip() {
        assert_eq!(
            format_skip(&SkipReason::NotAMerge),
            "Skipped automatic versioning: latest commit is not a merge"
        );
    }

    #[test]
    fn test_format_protection_shortens_commit() {
        let outcome = ProtectionOutcome {
            tag: "release-prod".to_string(),
            target: "v1.2.3".to_string(),
            commit: "0a1b2c3d4e5f".to_string(),
            replaced: true,
        };
        assert_eq!(
            format_protection(&outcome),
            "Added tag release-prod for commit v1.2.3 (0a1b2c3)"
        );
    }

    #[test]
    fn test_display_error() {
        // Visual verification test - output is printed to stderr
        display_error("test error");
    }
}
