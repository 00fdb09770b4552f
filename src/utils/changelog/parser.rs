// changelog parser

use super::config::ChangelogConfig;
use super::types::{Changelog, Heading, LineEnding, Section, SectionKind};
use crate::error::{Error, Result};
use crate::utils::severity::{Issue, IssueSeverity, IssueType};
use semver::Version;
use std::fs;
use std::path::Path;
use tracing::debug;

/// split a release title like "v3.0.0 (Breaking release)" into version text
/// and optional label
fn split_release_title(title: &str) -> Option<(&str, Option<&str>)> {
    let without_prefix = title.strip_prefix(['v', 'V']).unwrap_or(title);
    if !without_prefix.starts_with(|c: char| c.is_ascii_digit()) {
        return None; // not meant to be a version heading
    }

    let (version, rest) = match without_prefix.find(char::is_whitespace) {
        Some(pos) => (&without_prefix[..pos], without_prefix[pos..].trim()),
        None => (without_prefix, ""),
    };

    let label = rest
        .strip_prefix('(')
        .and_then(|r| r.strip_suffix(')'))
        .map(str::trim)
        .filter(|l| !l.is_empty());

    Some((version, label))
}

/// track fenced code blocks so `#` lines inside them stay body text
#[derive(Default)]
struct FenceState {
    marker: Option<&'static str>,
}

impl FenceState {
    /// feed a line, returns true if the line is part of a fence
    fn update(&mut self, line: &str) -> bool {
        let trimmed = line.trim_start();
        match self.marker {
            Some(marker) => {
                if trimmed.starts_with(marker) {
                    self.marker = None;
                }
                true
            }
            None => {
                if trimmed.starts_with("```") {
                    self.marker = Some("```");
                    true
                } else if trimmed.starts_with("~~~") {
                    self.marker = Some("~~~");
                    true
                } else {
                    false
                }
            }
        }
    }
}

fn classify(
    heading: &Heading,
    line_number: usize,
    config: &ChangelogConfig,
    issues: &mut Vec<Issue>,
) -> SectionKind {
    if config.is_unreleased_title(&heading.title) {
        return SectionKind::Unreleased;
    }

    let Some((version_str, label)) = split_release_title(&heading.title) else {
        return SectionKind::Other;
    };

    match Version::parse(version_str) {
        Ok(version) => SectionKind::Release {
            version,
            label: label.map(str::to_string),
        },
        // "### 3 things" is prose, not a broken version
        Err(_) if !version_str.contains('.') => SectionKind::Other,
        Err(e) => {
            let msg = format!(
                "line {}: could not parse version from '{}' ({})",
                line_number,
                heading.title,
                e
            );
            issues.push(Issue::new(
                IssueSeverity::Error,
                IssueType::UnparsableVersion,
                msg,
            ));
            SectionKind::Other
        }
    }
}

/// parse changelog text into sections
pub fn parse_changelog_str(content: &str, config: &ChangelogConfig) -> Changelog {
    let mut changelog = Changelog::new(None);
    changelog.line_ending = LineEnding::detect(content);
    changelog.trailing_newline = content.ends_with('\n');

    let mut fence = FenceState::default();
    let mut current: Option<Section> = None;

    for (index, line) in content.lines().enumerate() {
        let line_number = index + 1;

        let heading = if fence.update(line) {
            None
        } else {
            Heading::parse(line)
        };

        match heading {
            Some(heading) => {
                if let Some(prev) = current.take() {
                    changelog.sections.push(prev);
                }
                let kind = classify(&heading, line_number, config, &mut changelog.format_issues);
                current = Some(Section::new(heading, kind, line_number));
            }
            None => match current.as_mut() {
                Some(section) => section.body.push(line.to_string()),
                None => changelog.preamble.push(line.to_string()),
            },
        }
    }

    // save last section if exists
    if let Some(section) = current {
        changelog.sections.push(section);
    }

    debug!(
        sections = changelog.sections.len(),
        releases = changelog.releases().count(),
        "parsed changelog"
    );

    changelog
}

/// parse a changelog file
pub fn parse_changelog<P: AsRef<Path>>(path: P, config: &ChangelogConfig) -> Result<Changelog> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| Error::FileReadError {
        path: path.to_path_buf(),
        source: e,
    })?;

    let mut changelog = parse_changelog_str(&content, config);
    changelog.path = Some(path.to_path_buf());
    Ok(changelog)
}
