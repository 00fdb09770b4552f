// changelog configuration

use super::validator::IncrementType;
use semver::Version;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// configuration for changelog updates and release notes
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChangelogConfig {
    /// changelog to validate and update (default: "./CHANGELOG.md")
    pub changelog_path: PathBuf,

    /// file the release notes excerpt is written to (default: "./release-notes-body")
    pub release_notes_path: PathBuf,

    /// title of the heading collecting unreleased changes
    pub unreleased_title: String,

    /// prefix in front of the version in release headings
    pub version_prefix: String,

    pub major_label: String,
    pub minor_label: String,
    pub patch_label: String,
}

impl ChangelogConfig {
    /// create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    pub fn changelog_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.changelog_path = path.into();
        self
    }

    pub fn release_notes_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.release_notes_path = path.into();
        self
    }

    pub fn unreleased_title(mut self, title: impl Into<String>) -> Self {
        self.unreleased_title = title.into();
        self
    }

    pub fn version_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.version_prefix = prefix.into();
        self
    }

    pub fn label(mut self, increment: IncrementType, label: impl Into<String>) -> Self {
        let label = label.into();
        match increment {
            IncrementType::Major => self.major_label = label,
            IncrementType::Minor => self.minor_label = label,
            IncrementType::Patch => self.patch_label = label,
        }
        self
    }

    /// release label for an increment type
    pub fn label_for(&self, increment: IncrementType) -> &str {
        match increment {
            IncrementType::Major => &self.major_label,
            IncrementType::Minor => &self.minor_label,
            IncrementType::Patch => &self.patch_label,
        }
    }

    /// check if a heading title names the unreleased section
    pub fn is_unreleased_title(&self, title: &str) -> bool {
        title.eq_ignore_ascii_case(&self.unreleased_title)
    }

    /// heading title for a new release, e.g. "v3.1.0 (Feature release)"
    pub fn release_title(&self, version: &Version, increment: IncrementType) -> String {
        format!(
            "{}{} ({})",
            self.version_prefix,
            version,
            self.label_for(increment)
        )
    }
}

impl Default for ChangelogConfig {
    fn default() -> Self {
        Self {
            changelog_path: PathBuf::from("./CHANGELOG.md"),
            release_notes_path: PathBuf::from("./release-notes-body"),
            unreleased_title: "Unreleased".to_string(),
            version_prefix: "v".to_string(),
            major_label: "Breaking release".to_string(),
            minor_label: "Feature release".to_string(),
            patch_label: "Fix release".to_string(),
        }
    }
}
