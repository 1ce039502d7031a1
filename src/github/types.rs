use serde::{Deserialize, Serialize};

/// Release to create for a freshly pushed tag.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReleaseRequest {
    pub tag_name: String,
    pub name: String,
    pub body: String,
    /// Serialized as the string GitHub expects (`"true"` / `"false"`)
    #[serde(serialize_with = "serialize_make_latest")]
    pub make_latest: bool,
}

impl ReleaseRequest {
    /// A latest release titled `Release <tag>`.
    pub fn latest(tag_name: impl Into<String>, body: impl Into<String>) -> Self {
        let tag_name = tag_name.into();
        ReleaseRequest {
            name: format!("Release {}", tag_name),
            tag_name,
            body: body.into(),
            make_latest: true,
        }
    }
}

fn serialize_make_latest<S>(value: &bool, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str(if *value { "true" } else { "false" })
}

/// Release record returned by the API.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CreatedRelease {
    pub id: u64,
    pub html_url: String,
}

/// Subset of the release payload read from upstream repositories.
#[derive(Debug, Clone, Deserialize)]
pub struct ReleaseResponse {
    #[serde(default)]
    pub body: Option<String>,
}
