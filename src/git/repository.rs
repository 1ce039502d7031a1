use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use git2::{Cred, CredentialType, PushOptions, RemoteCallbacks, Repository, Signature};
use secrecy::{ExposeSecret, SecretString};

use crate::config::TaggerConfig;
use crate::error::{ReleaseError, Result};

/// [super::TagStore] backed by a local git repository through `git2`.
pub struct Git2TagStore {
    repo: Mutex<Repository>,
    tagger: TaggerConfig,
    token: Option<SecretString>,
}

impl Git2TagStore {
    /// Open or discover a git repository at or above `path`
    pub fn open<P: AsRef<Path>>(path: P, tagger: TaggerConfig) -> Result<Self> {
        let repo = Repository::discover(path)?;
        Ok(Self::from_git2(repo, tagger))
    }

    /// Create from an existing git2::Repository
    pub fn from_git2(repo: Repository, tagger: TaggerConfig) -> Self {
        Git2TagStore {
            repo: Mutex::new(repo),
            tagger,
            token: None,
        }
    }

    /// Use `token` for HTTPS pushes (GitHub's `x-access-token` scheme).
    pub fn with_token(mut self, token: Option<SecretString>) -> Self {
        self.token = token;
        self
    }

    fn lock(&self) -> Result<MutexGuard<'_, Repository>> {
        self.repo
            .lock()
            .map_err(|_| ReleaseError::tag("repository lock poisoned"))
    }

    fn callbacks(&self) -> RemoteCallbacks<'_> {
        let mut callbacks = RemoteCallbacks::new();

        callbacks.credentials(move |_url, username_from_url, allowed_types| {
            if allowed_types.contains(CredentialType::USER_PASS_PLAINTEXT) {
                if let Some(token) = &self.token {
                    return Cred::userpass_plaintext("x-access-token", token.expose_secret());
                }
            }

            if allowed_types.contains(CredentialType::SSH_KEY) {
                if let Ok(cred) = Cred::ssh_key_from_agent(username_from_url.unwrap_or("git")) {
                    return Ok(cred);
                }
            }

            Cred::default()
        });

        callbacks.push_update_reference(|refname, status| match status {
            Some(message) => Err(git2::Error::from_str(&format!(
                "remote rejected {}: {}",
                refname, message
            ))),
            None => Ok(()),
        });

        callbacks
    }
}

impl super::TagStore for Git2TagStore {
    fn list_tags(&self) -> Result<Vec<String>> {
        let repo = self.lock()?;
        let tags = repo.tag_names(None)?;

        Ok(tags.iter().flatten().map(|s| s.to_string()).collect())
    }

    fn create_annotated_tag(&self, name: &str, message: &str) -> Result<()> {
        let repo = self.lock()?;

        let head = repo
            .head()
            .and_then(|head| head.peel_to_commit())
            .map_err(|e| ReleaseError::tag(format!("Cannot resolve HEAD: {}", e)))?;

        let tagger = Signature::now(&self.tagger.name, &self.tagger.email)?;

        repo.tag(name, head.as_object(), &tagger, message, false)
            .map_err(|e| ReleaseError::tag(format!("Cannot create tag '{}': {}", name, e)))?;

        log::debug!("created annotated tag {} at {}", name, head.id());
        Ok(())
    }

    fn move_tag(&self, alias: &str, target_tag: &str) -> Result<()> {
        let repo = self.lock()?;

        let commit = repo
            .find_reference(&format!("refs/tags/{}", target_tag))
            .and_then(|reference| reference.peel_to_commit())
            .map_err(|e| {
                ReleaseError::tag(format!("Cannot resolve tag '{}': {}", target_tag, e))
            })?;

        repo.tag_lightweight(alias, commit.as_object(), true)
            .map_err(|e| ReleaseError::tag(format!("Cannot move tag '{}': {}", alias, e)))?;

        log::debug!("moved tag {} to {} ({})", alias, target_tag, commit.id());
        Ok(())
    }

    fn push_tags(&self, remote: &str, tag_names: &[&str], force: bool) -> Result<()> {
        let repo = self.lock()?;

        let mut remote_handle = repo
            .find_remote(remote)
            .map_err(|e| ReleaseError::remote(format!("Cannot find remote '{}': {}", remote, e)))?;

        let prefix = if force { "+" } else { "" };
        let refspecs: Vec<String> = tag_names
            .iter()
            .map(|tag| format!("{}refs/tags/{}:refs/tags/{}", prefix, tag, tag))
            .collect();
        let refspec_strs: Vec<&str> = refspecs.iter().map(|s| s.as_str()).collect();

        let mut options = PushOptions::new();
        options.remote_callbacks(self.callbacks());

        remote_handle
            .push(&refspec_strs, Some(&mut options))
            .map_err(|e| ReleaseError::remote(format!("Push to '{}' failed: {}", remote, e)))?;

        log::debug!("pushed {:?} to {} (force: {})", tag_names, remote, force);
        Ok(())
    }

    fn remote_url(&self, remote: &str) -> Result<Option<String>> {
        let repo = self.lock()?;

        let url = match repo.find_remote(remote) {
            Ok(handle) => handle.url().map(|url| url.to_string()),
            Err(e) if e.code() == git2::ErrorCode::NotFound => None,
            Err(e) => return Err(e.into()),
        };
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::super::TagStore;
    use super::*;
    use tempfile::TempDir;

    fn repo_with_commit() -> (TempDir, Git2TagStore) {
        let dir = TempDir::new().unwrap();
        let repo = Repository::init(dir.path()).unwrap();
        {
            let sig = Signature::now("Test", "test@example.com").unwrap();
            let tree_id = repo.index().unwrap().write_tree().unwrap();
            let tree = repo.find_tree(tree_id).unwrap();
            repo.commit(Some("HEAD"), &sig, &sig, "initial", &tree, &[])
                .unwrap();
        }
        (dir, Git2TagStore::from_git2(repo, TaggerConfig::default()))
    }

    #[test]
    fn test_create_and_list_tags() {
        let (_dir, store) = repo_with_commit();
        assert!(store.list_tags().unwrap().is_empty());

        store.create_annotated_tag("v1.0.1", "chore: release").unwrap();
        assert_eq!(store.list_tags().unwrap(), vec!["v1.0.1".to_string()]);
    }

    #[test]
    fn test_create_existing_tag_fails() {
        let (_dir, store) = repo_with_commit();
        store.create_annotated_tag("v1.0.1", "first").unwrap();
        let err = store.create_annotated_tag("v1.0.1", "second").unwrap_err();
        assert!(err.to_string().contains("v1.0.1"));
    }

    #[test]
    fn test_move_tag_overwrites_alias() {
        let (_dir, store) = repo_with_commit();
        store.create_annotated_tag("v1.0.1", "first").unwrap();
        store.move_tag("v1", "v1.0.1").unwrap();
        store.move_tag("v1", "v1.0.1").unwrap();

        let mut tags = store.list_tags().unwrap();
        tags.sort();
        assert_eq!(tags, vec!["v1".to_string(), "v1.0.1".to_string()]);
    }

    #[test]
    fn test_move_tag_to_missing_target_fails() {
        let (_dir, store) = repo_with_commit();
        assert!(store.move_tag("v1", "v9.9.9").is_err());
    }

    #[test]
    fn test_remote_url_missing_remote() {
        let (_dir, store) = repo_with_commit();
        assert_eq!(store.remote_url("origin").unwrap(), None);
    }

    #[test]
    fn test_remote_url_configured_remote() {
        let (_dir, store) = repo_with_commit();
        {
            let repo = store.lock().unwrap();
            repo.remote("origin", "git@github.com:broadsage/scorecard-action.git")
                .unwrap();
        }
        assert_eq!(
            store.remote_url("origin").unwrap().as_deref(),
            Some("git@github.com:broadsage/scorecard-action.git")
        );
    }
}
