// version increment rules and changelog structure checks

use super::types::{Changelog, SectionKind};
use crate::error::{Error, Result};
use crate::utils::severity::{Issue, IssueSeverity, IssueType};
use semver::Version;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashSet;
use std::fmt;
use tracing::debug;

/// which component of the version a release bumps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IncrementType {
    Major,
    Minor,
    Patch,
}

impl fmt::Display for IncrementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IncrementType::Major => write!(f, "major"),
            IncrementType::Minor => write!(f, "minor"),
            IncrementType::Patch => write!(f, "patch"),
        }
    }
}

impl IncrementType {
    pub const ALL: [IncrementType; 3] = [
        IncrementType::Major,
        IncrementType::Minor,
        IncrementType::Patch,
    ];

    /// most significant core component that differs, `None` when the
    /// `major.minor.patch` triples are equal
    pub fn between(current: &Version, new: &Version) -> Option<Self> {
        if new.major != current.major {
            Some(IncrementType::Major)
        } else if new.minor != current.minor {
            Some(IncrementType::Minor)
        } else if new.patch != current.patch {
            Some(IncrementType::Patch)
        } else {
            None
        }
    }

    /// increment type implied by the shape of a release number
    /// (`X.0.0` major, `X.Y.0` minor, otherwise patch)
    pub fn of_release(version: &Version) -> Self {
        match (version.minor, version.patch) {
            (0, 0) => IncrementType::Major,
            (_, 0) => IncrementType::Minor,
            _ => IncrementType::Patch,
        }
    }

    /// the single next version of this type, trailing components reset;
    /// `None` when the component is already at `u64::MAX`
    pub fn bump(self, current: &Version) -> Option<Version> {
        let next = match self {
            IncrementType::Major => Version::new(current.major.checked_add(1)?, 0, 0),
            IncrementType::Minor => {
                Version::new(current.major, current.minor.checked_add(1)?, 0)
            }
            IncrementType::Patch => {
                Version::new(current.major, current.minor, current.patch.checked_add(1)?)
            }
        };
        Some(next)
    }
}

fn core(version: &Version) -> (u64, u64, u64) {
    (version.major, version.minor, version.patch)
}

/// semver precedence key: build metadata does not count
fn precedence_key(version: &Version) -> (u64, u64, u64, &semver::Prerelease) {
    (version.major, version.minor, version.patch, &version.pre)
}

/// parse a user supplied version, tolerating a leading `v`
pub fn parse_version(input: &str) -> Result<Version> {
    let trimmed = input.trim();
    let candidate = trimmed.strip_prefix('v').unwrap_or(trimmed);
    Version::parse(candidate).map_err(|e| Error::InvalidVersion {
        version: input.to_string(),
        source: e,
    })
}

/// check that `input` is exactly one increment above `current`
pub fn validate_increment(current: &Version, input: &str) -> Result<IncrementType> {
    let new = parse_version(input)?;

    if new.cmp_precedence(current) != Ordering::Greater {
        return Err(Error::VersionRegression {
            version: input.to_string(),
            current: current.clone(),
        });
    }

    let increment = match IncrementType::between(current, &new) {
        Some(increment) => increment,
        // only the pre-release moved on
        None => return Ok(IncrementType::of_release(&new)),
    };

    // new is ahead in this component, so current cannot be at u64::MAX here
    let expected = increment.bump(current).ok_or_else(|| {
        Error::changelog(format!(
            "version {} cannot be given a {} increment",
            current, increment
        ))
    })?;
    debug!(%current, %new, %increment, %expected, "classified version increment");

    if core(&new) != core(&expected) {
        return Err(Error::InvalidIncrement {
            version: input.to_string(),
            increment,
            suggested: expected,
        });
    }

    Ok(increment)
}

/// the next major, minor and patch versions after `current`, skipping any
/// that would overflow
pub fn next_versions(current: &Version) -> Vec<(IncrementType, Version)> {
    IncrementType::ALL
        .iter()
        .filter_map(|t| t.bump(current).map(|v| (*t, v)))
        .collect()
}

/// check changelog structure: unreleased heading, release order and labels
pub fn validate_changelog(changelog: &Changelog) -> Vec<Issue> {
    let mut issues = changelog.format_issues.clone();

    let Some(unreleased) = changelog.unreleased_index() else {
        issues.push(Issue::new(
            IssueSeverity::Error,
            IssueType::MissingUnreleased,
            "missing 'Unreleased' heading".to_string(),
        ));
        return issues;
    };

    if changelog.unreleased_entry_count() == 0 {
        issues.push(Issue::new(
            IssueSeverity::Warning,
            IssueType::EmptyUnreleased,
            format!(
                "line {}: 'Unreleased' section has no entries",
                changelog.sections[unreleased].line_number
            ),
        ));
    }

    let mut seen = HashSet::new();
    let mut previous: Option<&Version> = None;

    for section in changelog.releases() {
        let SectionKind::Release { version, label } = &section.kind else {
            continue;
        };

        if !seen.insert(precedence_key(version)) {
            issues.push(Issue::new(
                IssueSeverity::Error,
                IssueType::DuplicateVersion,
                format!(
                    "line {}: version {} appears more than once",
                    section.line_number, version
                ),
            ));
        } else if let Some(prev) = previous
            && version.cmp_precedence(prev) != Ordering::Less
        {
            issues.push(Issue::new(
                IssueSeverity::Error,
                IssueType::VersionOrder,
                format!(
                    "line {}: version {} is listed below {} but is not older",
                    section.line_number, version, prev
                ),
            ));
        }

        if label.is_none() {
            issues.push(Issue::new(
                IssueSeverity::Warning,
                IssueType::MissingLabel,
                format!(
                    "line {}: release {} has no '(<label>)' after the version",
                    section.line_number, version
                ),
            ));
        }

        previous = Some(version);
    }

    issues
}
