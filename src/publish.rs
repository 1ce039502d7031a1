use std::fs;
use std::path::Path;

use crate::domain::ReleaseTag;
use crate::error::{ReleaseError, Result};
use crate::git::TagStore;
use crate::github::{CreatedRelease, ReleasePublisher, ReleaseRequest};

/// Where and how a release is published.
#[derive(Debug, Clone, PartialEq)]
pub struct PublishTarget<'a> {
    /// Git remote receiving the tags
    pub remote: &'a str,
    /// This repository, `owner/repo`
    pub repository: &'a str,
}

/// Publish `version`: tag, push, move the major alias, push it, create the release.
///
/// The notes file is checked before anything else; a missing file is a
/// fatal precondition failure with no side effects. Afterwards each step
/// runs once. A failure stops the run and leaves earlier steps in place.
pub fn publish_release<S, P>(
    store: &S,
    publisher: &P,
    target: &PublishTarget<'_>,
    version: &ReleaseTag,
    tag_message: &str,
    notes_path: &Path,
) -> Result<CreatedRelease>
where
    S: TagStore + ?Sized,
    P: ReleasePublisher + ?Sized,
{
    if !notes_path.is_file() {
        return Err(ReleaseError::MissingNotesFile(notes_path.to_path_buf()));
    }
    let notes = fs::read_to_string(notes_path)?;

    let tag = version.name();
    let alias = version.major_alias();

    log::info!("creating tag {}", tag);
    store.create_annotated_tag(&tag, tag_message)?;
    store.push_tags(target.remote, &[tag.as_str()], false)?;

    log::info!("moving {} to {}", alias, tag);
    store.move_tag(&alias, &tag)?;
    store.push_tags(target.remote, &[alias.as_str()], true)?;

    log::info!("creating release {} in {}", tag, target.repository);
    let request = ReleaseRequest::latest(tag, notes);
    publisher.create_release(target.repository, &request)
}
