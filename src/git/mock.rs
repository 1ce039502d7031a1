use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use crate::error::{ReleaseError, Result};
use crate::git::TagStore;

const MOCK_HEAD: &str = "0000000000000000000000000000000000000001";

/// A tag as recorded by [MockTagStore]
#[derive(Debug, Clone, PartialEq)]
pub struct MockTag {
    pub commit: String,
    /// `Some` for annotated tags
    pub message: Option<String>,
}

/// A push as recorded by [MockTagStore]
#[derive(Debug, Clone, PartialEq)]
pub struct PushRecord {
    pub remote: String,
    pub tags: Vec<String>,
    pub force: bool,
}

#[derive(Default)]
struct MockState {
    tags: BTreeMap<String, MockTag>,
    pushes: Vec<PushRecord>,
    remote_url: Option<String>,
    fail_push: bool,
}

/// In-memory tag store for testing without a git repository
pub struct MockTagStore {
    state: Mutex<MockState>,
}

impl MockTagStore {
    /// Create a new empty mock tag store
    pub fn new() -> Self {
        MockTagStore {
            state: Mutex::new(MockState::default()),
        }
    }

    /// Seed existing tags, all pointing at HEAD
    pub fn with_tags(tags: &[&str]) -> Self {
        let store = Self::new();
        {
            let mut state = store.lock();
            for tag in tags {
                state.tags.insert(
                    tag.to_string(),
                    MockTag {
                        commit: MOCK_HEAD.to_string(),
                        message: None,
                    },
                );
            }
        }
        store
    }

    /// Set the URL reported for every remote
    pub fn set_remote_url(&self, url: impl Into<String>) {
        self.lock().remote_url = Some(url.into());
    }

    /// Make every subsequent push fail
    pub fn fail_pushes(&self) {
        self.lock().fail_push = true;
    }

    pub fn tag(&self, name: &str) -> Option<MockTag> {
        self.lock().tags.get(name).cloned()
    }

    pub fn pushes(&self) -> Vec<PushRecord> {
        self.lock().pushes.clone()
    }

    fn lock(&self) -> MutexGuard<'_, MockState> {
        // A poisoned mock only happens after a panicking test thread.
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for MockTagStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TagStore for MockTagStore {
    fn list_tags(&self) -> Result<Vec<String>> {
        Ok(self.lock().tags.keys().cloned().collect())
    }

    fn create_annotated_tag(&self, name: &str, message: &str) -> Result<()> {
        let mut state = self.lock();
        if state.tags.contains_key(name) {
            return Err(ReleaseError::tag(format!("Tag '{}' already exists", name)));
        }
        state.tags.insert(
            name.to_string(),
            MockTag {
                commit: MOCK_HEAD.to_string(),
                message: Some(message.to_string()),
            },
        );
        Ok(())
    }

    fn move_tag(&self, alias: &str, target_tag: &str) -> Result<()> {
        let mut state = self.lock();
        let commit = state
            .tags
            .get(target_tag)
            .map(|tag| tag.commit.clone())
            .ok_or_else(|| ReleaseError::tag(format!("Tag '{}' not found", target_tag)))?;

        state.tags.insert(
            alias.to_string(),
            MockTag {
                commit,
                message: None,
            },
        );
        Ok(())
    }

    fn push_tags(&self, remote: &str, tag_names: &[&str], force: bool) -> Result<()> {
        let mut state = self.lock();
        if state.fail_push {
            return Err(ReleaseError::remote(format!("Push to '{}' failed", remote)));
        }
        if let Some(missing) = tag_names.iter().find(|t| !state.tags.contains_key(**t)) {
            return Err(ReleaseError::remote(format!(
                "src refspec {} does not match any",
                missing
            )));
        }
        state.pushes.push(PushRecord {
            remote: remote.to_string(),
            tags: tag_names.iter().map(|t| t.to_string()).collect(),
            force,
        });
        Ok(())
    }

    fn remote_url(&self, _remote: &str) -> Result<Option<String>> {
        Ok(self.lock().remote_url.clone())
    }
}
