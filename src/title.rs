//! Dependabot PR title parsing.
//!
//! Titles look like `Bump ossf/scorecard-action from v2.4.1 to v2.4.2`,
//! optionally behind a conventional prefix such as `chore(deps): `.
//! Anything that does not fit that shape is still mined for an
//! `owner/repo` token and version numbers so a release can go out.

use std::sync::OnceLock;

use regex::Regex;

use crate::boundary::BoundaryWarning;
use crate::domain::{DependencyUpdate, LATEST, UNKNOWN};

fn bump_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"(?i)\bbump\s+(?P<name>[A-Za-z0-9_.-]+/[A-Za-z0-9_.-]+)\s+from\s+v?(?P<old>\d+\.\d+\.\d+(?:[-+][0-9A-Za-z]+(?:[.+-][0-9A-Za-z]+)*)?)\s+to\s+v?(?P<new>\d+\.\d+\.\d+(?:[-+][0-9A-Za-z]+(?:[.+-][0-9A-Za-z]+)*)?)",
        )
        .expect("valid bump title regex")
    })
}

fn name_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"([A-Za-z0-9_-]+/[A-Za-z0-9_-]+)").expect("valid name regex"))
}

fn version_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"v?(\d+\.\d+\.\d+)").expect("valid version regex"))
}

/// Outcome of parsing a PR title.
#[derive(Debug, Clone, PartialEq)]
pub enum TitleParse {
    /// Exact `Bump <org>/<repo> from <old> to <new>` match
    Recognized(DependencyUpdate),
    /// Name and at least one version found outside the canonical shape
    Lenient(DependencyUpdate),
    /// Name or versions missing; `update` carries sentinel values
    Unrecognized {
        title: String,
        reason: String,
        update: DependencyUpdate,
    },
}

impl TitleParse {
    /// The dependency update to carry forward, sentinel-filled when unrecognized.
    pub fn into_update(self) -> DependencyUpdate {
        match self {
            TitleParse::Recognized(update) | TitleParse::Lenient(update) => update,
            TitleParse::Unrecognized { update, .. } => update,
        }
    }

    pub fn update(&self) -> &DependencyUpdate {
        match self {
            TitleParse::Recognized(update) | TitleParse::Lenient(update) => update,
            TitleParse::Unrecognized { update, .. } => update,
        }
    }

    pub fn is_recognized(&self) -> bool {
        matches!(self, TitleParse::Recognized(_))
    }

    pub fn warning(&self) -> Option<BoundaryWarning> {
        match self {
            TitleParse::Unrecognized { title, reason, .. } => {
                Some(BoundaryWarning::UnrecognizedTitle {
                    title: title.clone(),
                    reason: reason.clone(),
                })
            }
            _ => None,
        }
    }
}

fn with_v(version: &str) -> String {
    format!("v{}", version)
}

/// Parse a Dependabot PR title into a [`DependencyUpdate`].
///
/// Never fails: a title without an `owner/repo` token yields the name
/// [`UNKNOWN`], and a title without versions yields `unknown` → `latest`.
pub fn parse_title(title: &str) -> TitleParse {
    if let Some(caps) = bump_regex().captures(title) {
        return TitleParse::Recognized(DependencyUpdate::new(
            &caps["name"],
            with_v(&caps["old"]),
            with_v(&caps["new"]),
        ));
    }

    let name = name_regex()
        .captures(title)
        .map(|caps| caps[1].to_string());

    let versions: Vec<String> = version_regex()
        .captures_iter(title)
        .map(|caps| with_v(&caps[1]))
        .collect();

    let (old_version, new_version) = match versions.as_slice() {
        [] => (UNKNOWN.to_string(), LATEST.to_string()),
        [only] => (UNKNOWN.to_string(), only.clone()),
        [old, new, ..] => (old.clone(), new.clone()),
    };

    match name {
        Some(name) if !versions.is_empty() => {
            TitleParse::Lenient(DependencyUpdate::new(name, old_version, new_version))
        }
        Some(name) => TitleParse::Unrecognized {
            title: title.to_string(),
            reason: "no version numbers found".to_string(),
            update: DependencyUpdate::new(name, old_version, new_version),
        },
        None => TitleParse::Unrecognized {
            title: title.to_string(),
            reason: "no owner/repo dependency name found".to_string(),
            update: DependencyUpdate::new(UNKNOWN, old_version, new_version),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_canonical_title() {
        let parsed = parse_title("Bump ossf/scorecard-action from v2.4.1 to v2.4.2");
        assert!(parsed.is_recognized());
        assert_eq!(
            parsed.into_update(),
            DependencyUpdate::new("ossf/scorecard-action", "v2.4.1", "v2.4.2")
        );
    }

    #[test]
    fn test_parse_title_without_v_prefix() {
        let update = parse_title("Bump ossf/scorecard-action from 2.4.0 to 2.4.2").into_update();
        assert_eq!(update.old_version, "v2.4.0");
        assert_eq!(update.new_version, "v2.4.2");
    }

    #[test]
    fn test_parse_title_with_conventional_prefix() {
        let parsed = parse_title("chore(deps): bump actions/upload-artifact from 4.3.1 to 4.4.0");
        assert!(parsed.is_recognized());
        assert_eq!(parsed.update().name, "actions/upload-artifact");
        assert_eq!(parsed.update().new_version, "v4.4.0");
    }

    #[test]
    fn test_parse_title_with_dotted_repo_name() {
        let update = parse_title("Bump org/action.js from v1.0.0 to v1.1.0").into_update();
        assert_eq!(update.name, "org/action.js");
    }

    #[test]
    fn test_prerelease_version_excludes_trailing_punctuation() {
        let update = parse_title("Bump a/b from 1.0.0 to 1.0.1-rc.1.").into_update();
        assert_eq!(update.new_version, "v1.0.1-rc.1");

        let update = parse_title("Bump a/b from 1.0.0-beta+build.5 to 1.0.1").into_update();
        assert_eq!(update.old_version, "v1.0.0-beta+build.5");
    }

    #[test]
    fn test_lenient_title() {
        let parsed = parse_title("Update github/codeql-action to 3.26.0 (was 3.25.1)");
        assert!(matches!(parsed, TitleParse::Lenient(_)));
        let update = parsed.into_update();
        assert_eq!(update.name, "github/codeql-action");
        assert_eq!(update.old_version, "v3.26.0");
        assert_eq!(update.new_version, "v3.25.1");
    }

    #[test]
    fn test_lenient_title_single_version() {
        let update = parse_title("Bump actions/checkout to v4.2.0").into_update();
        assert_eq!(update.old_version, UNKNOWN);
        assert_eq!(update.new_version, "v4.2.0");
    }

    #[test]
    fn test_missing_name_defaults_to_unknown_with_warning() {
        let parsed = parse_title("Bump the thing from v1.0.0 to v1.0.1");
        let warning = parsed.warning().expect("warning for unrecognized title");
        assert!(warning.to_string().contains("owner/repo"));

        let update = parsed.into_update();
        assert_eq!(update.name, UNKNOWN);
        assert_eq!(update.old_version, "v1.0.0");
        assert_eq!(update.new_version, "v1.0.1");
    }

    #[test]
    fn test_no_versions_uses_defaults() {
        let parsed = parse_title("Bump ossf/scorecard-action");
        assert!(parsed.warning().is_some());
        let update = parsed.into_update();
        assert_eq!(update.name, "ossf/scorecard-action");
        assert_eq!(update.old_version, UNKNOWN);
        assert_eq!(update.new_version, LATEST);
    }

    #[test]
    fn test_empty_title() {
        let update = parse_title("").into_update();
        assert_eq!(update, DependencyUpdate::new(UNKNOWN, UNKNOWN, LATEST));
    }
}
