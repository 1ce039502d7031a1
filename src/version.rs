use crate::domain::ReleaseTag;
use crate::error::Result;

/// Seed used when the repository has no release tag yet.
pub const DEFAULT_SEED: &str = "v1.0.1";

/// Returns the highest `vX.Y.Z` tag among `tags`, by numeric field order.
///
/// Alias tags such as `v1` and anything else that is not a plain release
/// tag are ignored.
pub fn latest_release_tag<S: AsRef<str>>(tags: &[S]) -> Option<ReleaseTag> {
    tags.iter()
        .filter_map(|tag| ReleaseTag::parse(tag.as_ref()).ok())
        .max()
}

/// Computes this repository's next release tag.
///
/// The highest existing release tag gets its patch incremented; with no
/// release tags the `seed` is returned unchanged. Fails only when the
/// patch component is already at its maximum.
///
/// # Example
/// ```ignore
/// assert_eq!(next_version(&["v1.2.5"], &seed)?.name(), "v1.2.6");
/// assert_eq!(next_version::<&str>(&[], &seed)?, seed);
/// ```
pub fn next_version<S: AsRef<str>>(tags: &[S], seed: &ReleaseTag) -> Result<ReleaseTag> {
    match latest_release_tag(tags) {
        Some(latest) => latest.next_patch(),
        None => Ok(seed.clone()),
    }
}
