use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use semver::Version;

use crate::error::{ReleaseError, Result};

fn release_tag_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^v(\d+)\.(\d+)\.(\d+)$").expect("valid release tag regex"))
}

/// A release tag of this repository, always `v<major>.<minor>.<patch>`.
///
/// Ordering follows the numeric fields, so `v1.10.0 > v1.9.9`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ReleaseTag {
    version: Version,
}

impl ReleaseTag {
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        ReleaseTag {
            version: Version::new(major, minor, patch),
        }
    }

    /// Parse a tag name of the exact form `v<major>.<minor>.<patch>`.
    ///
    /// Alias tags (`v1`), prerelease suffixes and other prefixes are rejected.
    pub fn parse(tag: &str) -> Result<Self> {
        let caps = release_tag_regex().captures(tag.trim()).ok_or_else(|| {
            ReleaseError::version(format!(
                "Invalid release tag: '{}' - expected vX.Y.Z",
                tag
            ))
        })?;

        let field = |i: usize| -> Result<u64> {
            caps[i].parse::<u64>().map_err(|_| {
                ReleaseError::version(format!("Version field out of range in '{}'", tag))
            })
        };

        Ok(ReleaseTag::new(field(1)?, field(2)?, field(3)?))
    }

    pub fn version(&self) -> &Version {
        &self.version
    }

    /// The same major/minor line with the patch component incremented.
    pub fn next_patch(&self) -> Result<Self> {
        let patch = self.version.patch.checked_add(1).ok_or_else(|| {
            ReleaseError::version(format!("Patch component of {} cannot be incremented", self))
        })?;
        Ok(ReleaseTag::new(self.version.major, self.version.minor, patch))
    }

    /// The mutable alias tracking this major line, e.g. `v1` for `v1.0.2`.
    pub fn major_alias(&self) -> String {
        format!("v{}", self.version.major)
    }

    pub fn name(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ReleaseTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.version)
    }
}
