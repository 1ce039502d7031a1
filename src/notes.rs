//! Release notes: upstream fetch with fallback, rendering, and the notes file.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use crate::domain::{DependencyUpdate, ReleaseTag};
use crate::error::Result;
use crate::github::UpstreamReleases;

/// Upstream release description, or the substitute used in its place.
#[derive(Debug, Clone, PartialEq)]
pub enum UpstreamNotes {
    Fetched(String),
    Fallback { text: String, reason: String },
}

impl UpstreamNotes {
    pub fn text(&self) -> &str {
        match self {
            UpstreamNotes::Fetched(text) => text,
            UpstreamNotes::Fallback { text, .. } => text,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, UpstreamNotes::Fallback { .. })
    }
}

/// Read the upstream release notes for `update.new_version`.
///
/// Never fails. Any read error, a missing release or an empty body yields
/// [UpstreamNotes::Fallback] built by [fallback_notes]. Fetched notes are
/// cut to the first `max_lines` lines.
pub fn fetch_upstream_notes<U>(
    source: &U,
    update: &DependencyUpdate,
    max_lines: usize,
) -> UpstreamNotes
where
    U: UpstreamReleases + ?Sized,
{
    let fallback = |reason: String| UpstreamNotes::Fallback {
        text: fallback_notes(update),
        reason,
    };

    if !update.is_known() {
        return fallback("dependency name unknown".to_string());
    }

    match source.release_body(&update.name, &update.new_version) {
        Ok(Some(body)) => {
            let trimmed = body.trim();
            if trimmed.is_empty() || trimmed == "null" {
                return fallback("release body is empty".to_string());
            }
            log::debug!(
                "fetched upstream notes for {}@{}",
                update.name,
                update.new_version
            );
            UpstreamNotes::Fetched(truncate_lines(trimmed, max_lines))
        }
        Ok(None) => fallback("release not found".to_string()),
        Err(e) => fallback(e.to_string()),
    }
}

fn truncate_lines(text: &str, max_lines: usize) -> String {
    text.lines().take(max_lines).collect::<Vec<_>>().join("\n")
}

/// Templated notes used when the upstream description is unavailable.
pub fn fallback_notes(update: &DependencyUpdate) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "## Dependency Update\n");
    let _ = writeln!(out, "This release updates the following dependency:\n");
    let _ = writeln!(out, "### Updated Dependencies");
    let _ = writeln!(
        out,
        "- **{}**: {} → {}\n",
        update.name, update.old_version, update.new_version
    );

    if update.is_known() {
        let _ = writeln!(out, "### References");
        let _ = writeln!(out, "- [Full Release Notes]({})", update.release_url());
        let _ = writeln!(out, "- [Compare Changes]({})", update.compare_url());
        let _ = writeln!(out, "- [Repository]({})\n", update.repository_url());
    }

    let _ = writeln!(out, "### What's Changed");
    let _ = writeln!(
        out,
        "- Updated {} to {} with upstream improvements and bug fixes",
        update.name, update.new_version
    );
    let _ = write!(out, "- Automated dependency management via Dependabot");
    out
}

/// Heading icon for well-known upstream actions.
pub fn category_icon(dependency: &str) -> &'static str {
    match dependency {
        "ossf/scorecard-action" => "🔒",
        "github/codeql-action" => "🛡️",
        "actions/upload-artifact" => "📤",
        "actions/checkout" => "📥",
        "slackapi/slack-github-action" => "🔗",
        _ => "📦",
    }
}

/// Everything needed to publish one release; lives for a single run.
#[derive(Debug, Clone, PartialEq)]
pub struct ReleaseDescriptor {
    pub our_version: ReleaseTag,
    pub update: DependencyUpdate,
    pub notes_body: String,
}

impl ReleaseDescriptor {
    /// Render the notes for `our_version` of `repository`.
    pub fn new(
        our_version: ReleaseTag,
        update: DependencyUpdate,
        upstream: &UpstreamNotes,
        repository: &str,
    ) -> Self {
        let action_ref = format!("{}@{}", repository, our_version.major_alias());
        let notes_body = render_release_notes(&update, upstream, &action_ref);
        ReleaseDescriptor {
            our_version,
            update,
            notes_body,
        }
    }

    /// Message recorded on the annotated tag.
    pub fn tag_message(&self) -> String {
        format!("chore: update {} dependency", self.update.name)
    }
}

/// Render the Markdown release notes.
///
/// `action_ref` is what consumers put after `uses:`, e.g.
/// `broadsage/scorecard-action@v1`.
pub fn render_release_notes(
    update: &DependencyUpdate,
    upstream: &UpstreamNotes,
    action_ref: &str,
) -> String {
    format!(
        "## {icon} Dependency Update: {name}

### Version Update
- **{name}**: Updated from `{old}` to `{new}`

### Upstream Release Notes
{upstream}

### Maintenance
- Automated dependency update via Dependabot

---

### Usage
Update your workflows to use the latest version:
```yaml
uses: {action_ref}
```

*This release was automatically created by the dependency management workflow.*
",
        icon = category_icon(&update.name),
        name = update.name,
        old = update.old_version,
        new = update.new_version,
        upstream = upstream.text(),
        action_ref = action_ref,
    )
}

/// Write `body` to `path`, creating parent directories as needed.
pub fn write_notes_file(path: &Path, body: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, body)?;
    log::debug!("wrote release notes to {}", path.display());
    Ok(())
}
