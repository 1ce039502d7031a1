//! Pure formatting functions for UI output.
//!
//! Every line here goes to stderr. Stdout is reserved for step outputs
//! and the released version.

use console::style;

use crate::boundary::BoundaryWarning;
use crate::domain::{DependencyUpdate, ReleaseTag};

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    eprintln!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    eprintln!("{} {}", style("→").yellow(), message);
}

/// Display a boundary warning to the user.
pub fn display_boundary_warning(warning: &BoundaryWarning) {
    eprintln!("{} {}", style("⚠ WARNING:").yellow(), warning);
}

/// Display what a run is about to publish.
///
/// # Arguments
/// * `update` - The upstream dependency bump
/// * `version` - The release tag about to be created
/// * `previous` - The latest existing release tag, if any
pub fn display_release_plan(
    update: &DependencyUpdate,
    version: &ReleaseTag,
    previous: Option<&ReleaseTag>,
) {
    eprintln!("\n{}", style("Release Plan:").bold());
    eprintln!(
        "  Dependency: {} {} → {}",
        update.name,
        style(&update.old_version).red(),
        style(&update.new_version).green()
    );
    match previous {
        Some(previous) => eprintln!(
            "  Release:    {} → {} (alias {})",
            style(previous).red(),
            style(version).green(),
            version.major_alias()
        ),
        None => eprintln!(
            "  Release:    {} (initial, alias {})",
            style(version).green(),
            version.major_alias()
        ),
    }
}
