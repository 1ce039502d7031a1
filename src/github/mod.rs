//! GitHub release API access
//!
//! Two narrow seams: [UpstreamReleases] reads an upstream release's
//! description, [ReleasePublisher] creates this repository's release.
//! [client::GitHubClient] implements both over the REST API and
//! [mock::MockGitHub] implements both in memory.

pub mod client;
pub mod mock;
pub mod types;

pub use client::GitHubClient;
pub use mock::MockGitHub;
pub use types::{CreatedRelease, ReleaseRequest};

use crate::error::Result;

/// Read access to releases of other repositories.
pub trait UpstreamReleases: Send + Sync {
    /// Body of the release tagged `tag` in `repository` (`owner/repo`).
    ///
    /// `Ok(None)` when the release does not exist or has no body.
    fn release_body(&self, repository: &str, tag: &str) -> Result<Option<String>>;
}

/// Creates release records for this repository.
pub trait ReleasePublisher: Send + Sync {
    fn create_release(&self, repository: &str, request: &ReleaseRequest) -> Result<CreatedRelease>;
}
