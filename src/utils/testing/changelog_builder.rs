// builder for changelog fixtures in a temporary directory

use crate::utils::changelog::ChangelogConfig;
use crate::utils::changelog_manager::ChangelogManager;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// a release section to be written
#[derive(Debug, Clone)]
pub struct TestRelease {
    pub version: String,
    pub label: Option<String>,
    pub lines: Vec<String>,
}

impl TestRelease {
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            label: None,
            lines: Vec::new(),
        }
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn line(mut self, line: impl Into<String>) -> Self {
        self.lines.push(line.into());
        self
    }
}

/// builder for test changelogs
#[derive(Debug, Clone, Default)]
pub struct TestChangelog {
    title: Option<String>,
    unreleased: Vec<String>,
    releases: Vec<TestRelease>,
    indent: String,
}

impl TestChangelog {
    pub fn new() -> Self {
        Self::default()
    }

    /// top level `# <title>` heading
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// add a line under `## Unreleased`
    pub fn unreleased(mut self, line: impl Into<String>) -> Self {
        self.unreleased.push(line.into());
        self
    }

    /// add a release, newest first
    pub fn release(mut self, release: TestRelease) -> Self {
        self.releases.push(release);
        self
    }

    /// indent every line, as templated changelogs sometimes are
    pub fn indent(mut self, indent: impl Into<String>) -> Self {
        self.indent = indent.into();
        self
    }

    /// render the markdown
    pub fn render(&self) -> String {
        let mut lines = Vec::new();

        if let Some(title) = &self.title {
            lines.push(format!("# {}", title));
            lines.push(String::new());
        }

        lines.push("## Unreleased".to_string());
        lines.push(String::new());
        for line in &self.unreleased {
            lines.push(line.clone());
            lines.push(String::new());
        }

        for release in &self.releases {
            match &release.label {
                Some(label) => lines.push(format!("## v{} ({})", release.version, label)),
                None => lines.push(format!("## v{}", release.version)),
            }
            lines.push(String::new());
            for line in &release.lines {
                lines.push(line.clone());
                lines.push(String::new());
            }
        }

        lines
            .iter()
            .map(|l| {
                if l.is_empty() {
                    String::new()
                } else {
                    format!("{}{}", self.indent, l)
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// write CHANGELOG.md into a fresh temp dir
    pub fn build(self) -> Result<TestWorkdir, Box<dyn std::error::Error>> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().to_path_buf();
        fs::write(path.join("CHANGELOG.md"), self.render())?;

        Ok(TestWorkdir {
            path,
            _temp_dir: temp_dir,
        })
    }
}

/// a temp dir holding a changelog, removed on drop
pub struct TestWorkdir {
    path: PathBuf,
    _temp_dir: TempDir,
}

impl TestWorkdir {
    pub fn changelog_path(&self) -> PathBuf {
        self.path.join("CHANGELOG.md")
    }

    pub fn release_notes_path(&self) -> PathBuf {
        self.path.join("release-notes-body")
    }

    /// config pointing at the files in this dir
    pub fn config(&self) -> ChangelogConfig {
        ChangelogConfig::new()
            .changelog_path(self.changelog_path())
            .release_notes_path(self.release_notes_path())
    }

    pub fn manager(&self) -> ChangelogManager {
        ChangelogManager::new(self.config())
    }

    pub fn read_changelog(&self) -> String {
        fs::read_to_string(self.changelog_path()).unwrap_or_default()
    }

    pub fn read_release_notes(&self) -> String {
        fs::read_to_string(self.release_notes_path()).unwrap_or_default()
    }

    /// overwrite the changelog
    pub fn write_changelog(&self, content: &str) -> std::io::Result<()> {
        fs::write(self.changelog_path(), content)
    }
}
