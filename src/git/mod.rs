//! Tag storage abstraction
//!
//! The release pipeline only needs a narrow slice of version control:
//! list tags, create an annotated tag at HEAD, force-move an alias tag and
//! push tags to a remote. [TagStore] captures exactly that.
//!
//! - [repository::Git2TagStore]: the real implementation using the `git2` crate
//! - [mock::MockTagStore]: an in-memory implementation for testing
//!
//! ```rust
//! # use scorecard_release::git::{MockTagStore, TagStore};
//! let store = MockTagStore::new();
//! store.create_annotated_tag("v1.0.1", "chore: update ossf/scorecard-action dependency")?;
//! store.move_tag("v1", "v1.0.1")?;
//! store.push_tags("origin", &["v1.0.1"], false)?;
//! # Ok::<(), scorecard_release::ReleaseError>(())
//! ```

pub mod mock;
pub mod repository;

pub use mock::MockTagStore;
pub use repository::Git2TagStore;

use crate::error::Result;

/// Version-control operations needed to publish a release.
///
/// All implementors must be `Send + Sync`. Implementations map their
/// underlying errors to [crate::error::ReleaseError] variants.
pub trait TagStore: Send + Sync {
    /// All tag names in the repository, in no particular order.
    fn list_tags(&self) -> Result<Vec<String>>;

    /// Create an annotated tag named `name` at HEAD.
    ///
    /// Fails if the tag already exists.
    fn create_annotated_tag(&self, name: &str, message: &str) -> Result<()>;

    /// Point `alias` at the commit `target_tag` refers to, replacing any
    /// existing `alias` tag.
    fn move_tag(&self, alias: &str, target_tag: &str) -> Result<()>;

    /// Push tags to `remote`. With `force`, remote tags are overwritten.
    fn push_tags(&self, remote: &str, tag_names: &[&str], force: bool) -> Result<()>;

    /// URL configured for `remote`, if any.
    fn remote_url(&self, remote: &str) -> Result<Option<String>>;
}
