//! Release records as published on the tool's release listing.

use serde::{Deserialize, Serialize};

/// A single published release.
///
/// Deserialises from the GitHub release object, keeping only the tag and the
/// lifecycle flags. Every other field of the response is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Release {
    /// Version tag (e.g. `"2.1.5"`).
    #[serde(rename = "tag_name")]
    pub tag: String,
    /// Whether the release is marked as a prerelease.
    #[serde(rename = "prerelease", default)]
    pub is_prerelease: bool,
    /// Whether the release is still a draft.
    #[serde(rename = "draft", default)]
    pub is_draft: bool,
}

impl Release {
    /// Create a published (non-draft, non-prerelease) release.
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            is_prerelease: false,
            is_draft: false,
        }
    }

    /// Mark the release as a prerelease.
    #[must_use]
    pub fn prerelease(mut self) -> Self {
        self.is_prerelease = true;
        self
    }

    /// Mark the release as a draft.
    #[must_use]
    pub fn draft(mut self) -> Self {
        self.is_draft = true;
        self
    }

    /// Drafts and prereleases never satisfy a wildcard.
    #[must_use]
    pub fn is_eligible(&self) -> bool {
        !self.is_draft && !self.is_prerelease
    }
}
