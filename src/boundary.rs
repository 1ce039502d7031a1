use std::fmt;

/// Warnings raised at the edges of the release pipeline.
/// These are non-fatal: the run continues with a deterministic substitute.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryWarning {
    /// The PR title did not match the Dependabot bump shape
    UnrecognizedTitle { title: String, reason: String },
    /// Upstream release notes could not be read; fallback notes are used
    UpstreamNotesUnavailable {
        repository: String,
        tag: String,
        reason: String,
    },
    /// No `vX.Y.Z` tag exists yet; the seed version is used
    NoReleaseTags { seed: String },
}

impl fmt::Display for BoundaryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryWarning::UnrecognizedTitle { title, reason } => {
                write!(f, "Could not parse PR title '{}': {}", title, reason)
            }
            BoundaryWarning::UpstreamNotesUnavailable {
                repository,
                tag,
                reason,
            } => write!(
                f,
                "Could not fetch upstream notes for {}@{} ({}), generating fallback content",
                repository, tag, reason
            ),
            BoundaryWarning::NoReleaseTags { seed } => {
                write!(f, "No release tags found, starting at {}", seed)
            }
        }
    }
}

impl BoundaryWarning {
    /// Log the warning and show it to the user.
    pub fn report(&self) {
        log::warn!("{}", self);
        crate::ui::display_boundary_warning(self);
    }
}
