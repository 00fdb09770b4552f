use crate::error::{Error, Result};
use crate::utils::changelog::{
    Changelog, ChangelogConfig, ChangelogStatus, IncrementType, NotesSource,
    extract_release_notes, next_versions, parse_changelog, parse_version, validate_changelog,
    validate_increment,
};
use crate::utils::severity::Issue;
use semver::Version;
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

/// validates, bumps and excerpts the changelog at the configured path
#[derive(Debug, Clone, Default)]
pub struct ChangelogManager {
    config: ChangelogConfig,
}

impl ChangelogManager {
    pub fn new(config: ChangelogConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ChangelogConfig {
        &self.config
    }

    /// read and parse the changelog
    pub fn load(&self) -> Result<Changelog> {
        parse_changelog(&self.config.changelog_path, &self.config)
    }

    /// most recent released version (first release after `Unreleased`)
    pub fn current_version(&self) -> Result<Version> {
        let changelog = self.load()?;
        current_version_of(&changelog)
    }

    /// check that `new_version` is exactly one increment above the current
    /// release; never writes
    pub fn validate_version(&self, new_version: &str) -> Result<IncrementType> {
        let (increment, _) = self.checked_changelog(new_version)?;
        Ok(increment)
    }

    /// parse the version, load the changelog once and validate against it
    fn checked_changelog(&self, new_version: &str) -> Result<(IncrementType, Changelog)> {
        // syntax first, so a bad version is reported even without a changelog
        parse_version(new_version)?;

        let changelog = self.load()?;
        let current = current_version_of(&changelog)?;
        let increment = validate_increment(&current, new_version)?;

        debug!(%current, new = new_version, %increment, "version validated");
        Ok((increment, changelog))
    }

    /// validated increment and the changelog text after releasing it
    fn prepare_update(&self, new_version: &str) -> Result<(IncrementType, String)> {
        let (increment, mut changelog) = self.checked_changelog(new_version)?;
        let version = parse_version(new_version)?;

        let label = self.config.label_for(increment).to_string();
        let title = self.config.release_title(&version, increment);
        changelog.insert_release(version, label, title)?;

        Ok((increment, changelog.render()))
    }

    /// the changelog as it would look after releasing `new_version`
    pub fn render_update(&self, new_version: &str) -> Result<String> {
        let (_, updated) = self.prepare_update(new_version)?;
        Ok(updated)
    }

    /// insert the new release heading below `Unreleased` and write the file
    pub fn update_changelog(&self, new_version: &str) -> Result<IncrementType> {
        let (increment, updated) = self.prepare_update(new_version)?;
        write_atomically(&self.config.changelog_path, &updated)?;

        info!(
            version = new_version,
            %increment,
            path = %self.config.changelog_path.display(),
            "changelog updated"
        );
        Ok(increment)
    }

    /// release notes excerpt without writing it anywhere
    pub fn release_notes(&self, from_unreleased: bool) -> Result<String> {
        let changelog = self.load()?;
        extract_release_notes(&changelog, NotesSource::from_unreleased(from_unreleased))
    }

    /// write the release notes excerpt to the configured path
    pub fn generate_release_notes(&self, from_unreleased: bool) -> Result<String> {
        let notes = self.release_notes(from_unreleased)?;
        if notes.is_empty() {
            warn!("release notes are empty");
        }

        write_atomically(&self.config.release_notes_path, &notes)?;
        info!(
            path = %self.config.release_notes_path.display(),
            from_unreleased,
            "release notes written"
        );
        Ok(notes)
    }

    pub fn status(&self) -> Result<ChangelogStatus> {
        let changelog = self.load()?;
        let current_version = current_version_of(&changelog)?;

        Ok(ChangelogStatus {
            path: self.config.changelog_path.clone(),
            next_versions: next_versions(&current_version),
            current_version,
            release_count: changelog.releases().count(),
            unreleased_entries: changelog.unreleased_entry_count(),
        })
    }

    /// structural problems in the changelog
    pub fn check(&self) -> Result<Vec<Issue>> {
        let changelog = self.load()?;
        Ok(validate_changelog(&changelog))
    }
}

fn current_version_of(changelog: &Changelog) -> Result<Version> {
    let index = changelog.require_latest_release()?;
    changelog.sections[index]
        .version()
        .cloned()
        .ok_or_else(|| Error::changelog("latest release heading has no version"))
}

/// write through a temp file in the same directory so readers never see a
/// half written file
fn write_atomically(path: &Path, contents: &str) -> Result<()> {
    let write_err = |source: std::io::Error| Error::FileWriteError {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut file = NamedTempFile::new_in(dir).map_err(write_err)?;
    file.write_all(contents.as_bytes()).map_err(write_err)?;

    if let Ok(metadata) = fs::metadata(path) {
        fs::set_permissions(file.path(), metadata.permissions()).map_err(write_err)?;
    }

    file.persist(path).map_err(|e| write_err(e.error))?;
    Ok(())
}

impl ChangelogStatus {
    /// display status in human readable format
    pub fn display(&self) {
        println!("changelog: {}", self.path.display());
        println!("  current version: {}", self.current_version);
        println!("  released versions: {}", self.release_count);
        println!("  unreleased entries: {}", self.unreleased_entries);
        println!();
        println!("next versions:");
        for (increment, version) in &self.next_versions {
            println!("  {:<6} {}", increment.to_string(), version);
        }

        if !self.has_unreleased_changes() {
            println!();
            println!("note: nothing under 'Unreleased' yet");
        }
    }
}

/// print issues grouped by severity
pub fn display_issues(issues: &[Issue]) {
    if issues.is_empty() {
        println!("no issues found.");
        return;
    }

    let errors: Vec<_> = issues.iter().filter(|i| i.is_error()).collect();
    let warnings: Vec<_> = issues.iter().filter(|i| i.is_warning()).collect();

    if !errors.is_empty() {
        println!("errors ({}):", errors.len());
        for issue in errors {
            println!("  [{}] {}", issue.issue_type, issue.message);
        }
    }

    if !warnings.is_empty() {
        println!("warnings ({}):", warnings.len());
        for issue in warnings {
            println!("  [{}] {}", issue.issue_type, issue.message);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_atomically_replaces_content() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("notes");
        fs::write(&path, "old content that is longer").unwrap();

        write_atomically(&path, "new").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "new");
    }

    #[test]
    fn test_write_atomically_missing_dir_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("notes");

        let err = write_atomically(&path, "x").unwrap_err();
        assert!(matches!(err, Error::FileWriteError { .. }));
    }

    #[test]
    fn test_missing_changelog_is_read_error() {
        let dir = TempDir::new().unwrap();
        let manager = ChangelogManager::new(
            ChangelogConfig::new().changelog_path(dir.path().join("CHANGELOG.md")),
        );

        assert!(matches!(
            manager.validate_version("1.0.0"),
            Err(Error::FileReadError { .. })
        ));
        // syntax errors win over a missing file
        assert!(matches!(
            manager.validate_version("pizza"),
            Err(Error::InvalidVersion { .. })
        ));
    }
}
