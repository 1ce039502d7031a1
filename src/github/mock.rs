use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use crate::error::{ReleaseError, Result};

use super::types::{CreatedRelease, ReleaseRequest};
use super::{ReleasePublisher, UpstreamReleases};

#[derive(Default)]
struct MockState {
    bodies: HashMap<(String, String), String>,
    created: Vec<(String, ReleaseRequest)>,
    fail_reads: bool,
    fail_creates: bool,
}

/// In-memory GitHub for testing the pipeline without network access
pub struct MockGitHub {
    state: Mutex<MockState>,
}

impl MockGitHub {
    pub fn new() -> Self {
        MockGitHub {
            state: Mutex::new(MockState::default()),
        }
    }

    /// Register an upstream release body
    pub fn add_release(&self, repository: &str, tag: &str, body: &str) {
        self.lock()
            .bodies
            .insert((repository.to_string(), tag.to_string()), body.to_string());
    }

    /// Make every upstream read fail as a network error would
    pub fn fail_reads(&self) {
        self.lock().fail_reads = true;
    }

    /// Make every release creation fail
    pub fn fail_creates(&self) {
        self.lock().fail_creates = true;
    }

    /// Releases created so far, with the repository they were created in
    pub fn created_releases(&self) -> Vec<(String, ReleaseRequest)> {
        self.lock().created.clone()
    }

    fn lock(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for MockGitHub {
    fn default() -> Self {
        Self::new()
    }
}

impl UpstreamReleases for MockGitHub {
    fn release_body(&self, repository: &str, tag: &str) -> Result<Option<String>> {
        let state = self.lock();
        if state.fail_reads {
            return Err(ReleaseError::api("connection refused"));
        }
        Ok(state
            .bodies
            .get(&(repository.to_string(), tag.to_string()))
            .cloned())
    }
}

impl ReleasePublisher for MockGitHub {
    fn create_release(&self, repository: &str, request: &ReleaseRequest) -> Result<CreatedRelease> {
        let mut state = self.lock();
        if state.fail_creates {
            return Err(ReleaseError::api("POST releases returned 422"));
        }
        state.created.push((repository.to_string(), request.clone()));
        Ok(CreatedRelease {
            id: state.created.len() as u64,
            html_url: format!(
                "https://github.com/{}/releases/tag/{}",
                repository, request.tag_name
            ),
        })
    }
}
