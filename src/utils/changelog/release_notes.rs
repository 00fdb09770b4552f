// release notes extraction

use super::types::{Changelog, LineEnding};
use crate::error::Result;

/// which section the release notes are cut from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotesSource {
    /// the pending `Unreleased` section
    Unreleased,
    /// the most recently released version, right after an update
    LatestRelease,
}

impl NotesSource {
    pub fn from_unreleased(from_unreleased: bool) -> Self {
        if from_unreleased {
            NotesSource::Unreleased
        } else {
            NotesSource::LatestRelease
        }
    }
}

/// full body of the chosen section with every heading moved up one level
pub fn extract_release_notes(changelog: &Changelog, source: NotesSource) -> Result<String> {
    let index = match source {
        NotesSource::Unreleased => changelog.require_unreleased()?,
        NotesSource::LatestRelease => changelog.require_latest_release()?,
    };

    // nested headings are always deeper than the section, so level 1 never
    // shows up here
    let lines = changelog.full_body_with(index, |heading| heading.promoted().raw);

    Ok(join_trimmed(&lines, changelog.line_ending))
}

/// join lines dropping blank lines at both ends, newline terminated
fn join_trimmed(lines: &[String], line_ending: LineEnding) -> String {
    let start = lines.iter().position(|l| !l.trim().is_empty());
    let end = lines.iter().rposition(|l| !l.trim().is_empty());

    match (start, end) {
        (Some(start), Some(end)) => {
            let mut out = lines[start..=end].join(line_ending.as_str());
            out.push_str(line_ending.as_str());
            out
        }
        _ => String::new(),
    }
}
