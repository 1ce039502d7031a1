//! User interface module - terminal output and GitHub Actions step outputs.
//!
//! - `formatter` - Pure display functions
//! - This module - `key=value` step outputs for the Actions runner

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use crate::domain::DependencyUpdate;
use crate::error::Result;

pub mod formatter;

pub use formatter::{
    display_boundary_warning, display_error, display_release_plan, display_status,
    display_success,
};

/// Format the parsed dependency as step outputs.
///
/// ```ignore
/// action_name=ossf/scorecard-action
/// old_version=v2.4.1
/// new_version=v2.4.2
/// ```
pub fn format_step_outputs(update: &DependencyUpdate) -> String {
    format!(
        "action_name={}\nold_version={}\nnew_version={}\n",
        update.name, update.old_version, update.new_version
    )
}

/// Append step outputs to the runner's `$GITHUB_OUTPUT` file.
pub fn append_step_outputs(path: &Path, outputs: &str) -> Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    file.write_all(outputs.as_bytes())?;
    Ok(())
}
