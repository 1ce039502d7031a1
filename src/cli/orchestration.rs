//! Main release workflow orchestration
//!
//! Runs the pipeline strictly forward: parse the PR title, fetch upstream
//! notes, compute the next version, render the notes file, publish. Only
//! the notes fetch may fail softly; every other failure aborts the run.

use std::path::PathBuf;

use crate::boundary::BoundaryWarning;
use crate::config::{repository_from_remote_url, Config};
use crate::domain::{DependencyUpdate, ReleaseTag};
use crate::error::{ReleaseError, Result};
use crate::git::TagStore;
use crate::github::{ReleasePublisher, UpstreamReleases};
use crate::notes::{self, ReleaseDescriptor, UpstreamNotes};
use crate::publish::{self, PublishTarget};
use crate::title::parse_title;
use crate::ui;
use crate::version;

/// Arguments for one release run
#[derive(Debug, Clone, PartialEq)]
pub struct ReleaseWorkflowArgs {
    /// The merged Dependabot PR title
    pub title: String,

    /// Render the notes file but create no tags and no release
    pub dry_run: bool,
}

/// Result of a release run
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowResult {
    pub version: ReleaseTag,
    pub alias: String,
    pub update: DependencyUpdate,
    pub notes_path: PathBuf,
    /// Whether fallback notes replaced the upstream description
    pub notes_fallback: bool,
    /// `None` for dry runs
    pub release_url: Option<String>,
}

/// Rendered notes ready to be published
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedRelease {
    pub descriptor: ReleaseDescriptor,
    pub previous: Option<ReleaseTag>,
    pub upstream: UpstreamNotes,
    pub repository: String,
}

/// The release pipeline over its three collaborators.
pub struct ReleaseWorkflow<'a> {
    config: &'a Config,
    store: &'a dyn TagStore,
    upstream: &'a dyn UpstreamReleases,
    publisher: &'a dyn ReleasePublisher,
}

impl<'a> ReleaseWorkflow<'a> {
    pub fn new(
        config: &'a Config,
        store: &'a dyn TagStore,
        upstream: &'a dyn UpstreamReleases,
        publisher: &'a dyn ReleasePublisher,
    ) -> Self {
        ReleaseWorkflow {
            config,
            store,
            upstream,
            publisher,
        }
    }

    /// Parse stage. Unrecognized titles are reported and continue with sentinels.
    pub fn parse(&self, title: &str) -> DependencyUpdate {
        let parsed = parse_title(title);
        if let Some(warning) = parsed.warning() {
            warning.report();
        }
        let update = parsed.into_update();
        log::info!(
            "extracted {} {} -> {}",
            update.name,
            update.old_version,
            update.new_version
        );
        update
    }

    /// Version stage: the latest release tag and the one to create next.
    pub fn next_version(&self) -> Result<(Option<ReleaseTag>, ReleaseTag)> {
        let seed = self.config.seed()?;
        let tags = self.store.list_tags()?;
        let previous = version::latest_release_tag(&tags);

        if previous.is_none() {
            BoundaryWarning::NoReleaseTags { seed: seed.name() }.report();
        }

        let next = version::next_version(&tags, &seed)?;
        log::info!("next release: {}", next);
        Ok((previous, next))
    }

    /// This repository as `owner/repo`, from config or the remote URL.
    pub fn repository(&self) -> Result<String> {
        if let Some(repository) = &self.config.repository {
            return Ok(repository.clone());
        }

        self.store
            .remote_url(&self.config.remote)?
            .as_deref()
            .and_then(repository_from_remote_url)
            .ok_or_else(|| {
                ReleaseError::config(format!(
                    "cannot determine repository from remote '{}'; set GITHUB_REPOSITORY",
                    self.config.remote
                ))
            })
    }

    /// Parse, fetch, version and render, writing the notes file to `notes_path`.
    pub fn prepare(&self, title: &str, notes_path: &std::path::Path) -> Result<PreparedRelease> {
        let update = self.parse(title);

        ui::display_status(&format!(
            "Fetching upstream notes for {} {}",
            update.name, update.new_version
        ));
        let upstream =
            notes::fetch_upstream_notes(self.upstream, &update, self.config.max_upstream_lines);
        if let UpstreamNotes::Fallback { reason, .. } = &upstream {
            BoundaryWarning::UpstreamNotesUnavailable {
                repository: update.name.clone(),
                tag: update.new_version.clone(),
                reason: reason.clone(),
            }
            .report();
        }

        let (previous, next) = self.next_version()?;
        let repository = self.repository()?;

        let descriptor = ReleaseDescriptor::new(next, update, &upstream, &repository);
        notes::write_notes_file(notes_path, &descriptor.notes_body)?;

        Ok(PreparedRelease {
            descriptor,
            previous,
            upstream,
            repository,
        })
    }

    /// Run the whole pipeline.
    pub fn run(&self, args: &ReleaseWorkflowArgs) -> Result<WorkflowResult> {
        if !args.dry_run {
            self.config.require_token()?;
        }

        let notes_path = self.config.notes_file.clone();
        let prepared = self.prepare(&args.title, &notes_path)?;
        let descriptor = &prepared.descriptor;

        if let Some(output) = &self.config.github_output {
            let outputs = format!(
                "{}version={}\n",
                ui::format_step_outputs(&descriptor.update),
                descriptor.our_version
            );
            ui::append_step_outputs(output, &outputs)?;
        }

        ui::display_release_plan(
            &descriptor.update,
            &descriptor.our_version,
            prepared.previous.as_ref(),
        );

        let release_url = if args.dry_run {
            ui::display_status(&format!(
                "Dry run: notes written to {}; no tags or release created",
                notes_path.display()
            ));
            None
        } else {
            let target = PublishTarget {
                remote: &self.config.remote,
                repository: &prepared.repository,
            };
            let created = publish::publish_release(
                self.store,
                self.publisher,
                &target,
                &descriptor.our_version,
                &descriptor.tag_message(),
                &notes_path,
            )?;
            ui::display_success(&format!(
                "Created release {}: {}",
                descriptor.our_version, created.html_url
            ));
            Some(created.html_url)
        };

        Ok(WorkflowResult {
            version: descriptor.our_version.clone(),
            alias: descriptor.our_version.major_alias(),
            update: descriptor.update.clone(),
            notes_path,
            notes_fallback: prepared.upstream.is_fallback(),
            release_url,
        })
    }
}
