/// Sentinel used when a title carries no recognizable dependency or version.
pub const UNKNOWN: &str = "unknown";

/// Default new version when a title carries no version at all.
pub const LATEST: &str = "latest";

const GITHUB_WEB: &str = "https://github.com";

/// An upstream dependency bump, as announced by a Dependabot PR title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyUpdate {
    /// Upstream repository in `owner/repo` form, or [`UNKNOWN`]
    pub name: String,
    pub old_version: String,
    pub new_version: String,
}

impl DependencyUpdate {
    pub fn new(
        name: impl Into<String>,
        old_version: impl Into<String>,
        new_version: impl Into<String>,
    ) -> Self {
        DependencyUpdate {
            name: name.into(),
            old_version: old_version.into(),
            new_version: new_version.into(),
        }
    }

    /// Whether the dependency name was actually extracted from the title.
    pub fn is_known(&self) -> bool {
        self.name != UNKNOWN && self.name.contains('/')
    }

    /// `https://github.com/<owner>/<repo>`
    pub fn repository_url(&self) -> String {
        format!("{}/{}", GITHUB_WEB, self.name)
    }

    /// `https://github.com/<owner>/<repo>/releases/tag/<new>`
    pub fn release_url(&self) -> String {
        format!("{}/releases/tag/{}", self.repository_url(), self.new_version)
    }

    /// `https://github.com/<owner>/<repo>/compare/<old>...<new>`
    pub fn compare_url(&self) -> String {
        format!(
            "{}/compare/{}...{}",
            self.repository_url(),
            self.old_version,
            self.new_version
        )
    }
}
