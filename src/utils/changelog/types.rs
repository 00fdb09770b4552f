// changelog data structures

use super::validator::IncrementType;
use crate::error::{Error, Result};
use crate::utils::severity::Issue;
use semver::Version;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const MAX_HEADING_LEVEL: usize = 6;

/// a markdown ATX heading (`## Title`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Heading {
    pub level: usize,
    pub title: String,
    /// whitespace in front of the hashes
    pub indent: String,
    /// the line exactly as it appeared in the file
    pub raw: String,
}

impl Heading {
    pub fn new(level: usize, title: impl Into<String>, indent: impl Into<String>) -> Self {
        let title = title.into();
        let indent = indent.into();
        let raw = format!("{}{} {}", indent, "#".repeat(level), title);
        Self {
            level,
            title,
            indent,
            raw,
        }
    }

    /// parse a single line as a heading, `None` if it is not one
    pub fn parse(line: &str) -> Option<Self> {
        let trimmed = line.trim_start();
        let hashes = trimmed.bytes().take_while(|b| *b == b'#').count();
        if hashes == 0 || hashes > MAX_HEADING_LEVEL {
            return None;
        }

        let rest = &trimmed[hashes..];
        if !rest.is_empty() && !rest.starts_with([' ', '\t']) {
            return None; // "#hashtag", not a heading
        }

        Some(Self {
            level: hashes,
            title: rest.trim().to_string(),
            indent: line[..line.len() - trimmed.len()].to_string(),
            raw: line.to_string(),
        })
    }

    /// same heading one level up; level 1 stays level 1
    pub fn promoted(&self) -> Self {
        if self.level <= 1 {
            return self.clone();
        }

        let after_hashes = &self.raw[self.indent.len() + self.level..];
        Self {
            level: self.level - 1,
            title: self.title.clone(),
            indent: self.indent.clone(),
            raw: format!("{}{}{}", self.indent, "#".repeat(self.level - 1), after_hashes),
        }
    }
}

/// what a section heading denotes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SectionKind {
    Unreleased,
    Release {
        version: Version,
        label: Option<String>,
    },
    Other,
}

/// a heading and the lines up to the next heading of any level
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Section {
    pub heading: Heading,
    pub kind: SectionKind,
    pub body: Vec<String>,
    pub line_number: usize,
}

impl Section {
    pub fn new(heading: Heading, kind: SectionKind, line_number: usize) -> Self {
        Self {
            heading,
            kind,
            body: Vec::new(),
            line_number,
        }
    }

    pub fn version(&self) -> Option<&Version> {
        match &self.kind {
            SectionKind::Release { version, .. } => Some(version),
            _ => None,
        }
    }

    pub fn is_unreleased(&self) -> bool {
        self.kind == SectionKind::Unreleased
    }
}

/// line terminator used when writing the changelog back
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineEnding {
    #[default]
    Lf,
    CrLf,
}

impl LineEnding {
    /// CRLF if the first line break in `content` is one
    pub fn detect(content: &str) -> Self {
        match content.find('\n') {
            Some(pos) if content[..pos].ends_with('\r') => LineEnding::CrLf,
            _ => LineEnding::Lf,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::CrLf => "\r\n",
        }
    }
}

/// represents a complete changelog file
///
/// `line_number`s are kept in step with edits made through `insert_release`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Changelog {
    pub path: Option<PathBuf>,
    /// lines before the first heading
    pub preamble: Vec<String>,
    pub sections: Vec<Section>,
    pub line_ending: LineEnding,
    pub trailing_newline: bool,
    pub format_issues: Vec<Issue>,
}

impl Changelog {
    pub fn new(path: Option<PathBuf>) -> Self {
        Self {
            path,
            preamble: Vec::new(),
            sections: Vec::new(),
            line_ending: LineEnding::Lf,
            trailing_newline: false,
            format_issues: Vec::new(),
        }
    }

    pub fn unreleased_index(&self) -> Option<usize> {
        self.sections.iter().position(Section::is_unreleased)
    }

    /// index of the most recent release: the first version heading after
    /// `Unreleased` at the same level
    pub fn latest_release_index(&self) -> Option<usize> {
        let unreleased = self.unreleased_index()?;
        let level = self.sections[unreleased].heading.level;

        self.sections
            .iter()
            .enumerate()
            .skip(unreleased + 1)
            .find(|(_, s)| s.heading.level == level && s.version().is_some())
            .map(|(i, _)| i)
    }

    pub fn latest_release(&self) -> Option<&Version> {
        self.latest_release_index()
            .and_then(|i| self.sections[i].version())
    }

    pub fn require_unreleased(&self) -> Result<usize> {
        self.unreleased_index().ok_or_else(|| {
            Error::changelog(format!(
                "no 'Unreleased' heading found in {}",
                self.display_path()
            ))
        })
    }

    pub fn require_latest_release(&self) -> Result<usize> {
        self.require_unreleased()?;
        self.latest_release_index().ok_or_else(|| {
            Error::changelog(format!(
                "no released version found after the 'Unreleased' heading in {}",
                self.display_path()
            ))
        })
    }

    /// all release sections in document order
    pub fn releases(&self) -> impl Iterator<Item = &Section> {
        self.sections.iter().filter(|s| s.version().is_some())
    }

    /// index one past the last section nested under `index`
    pub fn section_end(&self, index: usize) -> usize {
        let level = self.sections[index].heading.level;
        self.sections
            .iter()
            .enumerate()
            .skip(index + 1)
            .find(|(_, s)| s.heading.level <= level)
            .map(|(i, _)| i)
            .unwrap_or(self.sections.len())
    }

    /// sections nested below `index` (deeper headings up to the next sibling)
    pub fn subsections(&self, index: usize) -> &[Section] {
        &self.sections[index + 1..self.section_end(index)]
    }

    /// own body plus nested subsections, headings rendered as in the file
    pub fn full_body(&self, index: usize) -> Vec<String> {
        self.full_body_with(index, |heading| heading.raw.clone())
    }

    /// own body plus nested subsections, each nested heading rendered by
    /// `render_heading`
    pub fn full_body_with<F>(&self, index: usize, render_heading: F) -> Vec<String>
    where
        F: Fn(&Heading) -> String,
    {
        let mut lines = self.sections[index].body.clone();
        for section in self.subsections(index) {
            lines.push(render_heading(&section.heading));
            lines.extend(section.body.iter().cloned());
        }
        lines
    }

    /// insert a release heading directly below `Unreleased`, handing it the
    /// current unreleased body
    pub fn insert_release(&mut self, version: Version, label: String, title: String) -> Result<()> {
        let unreleased = self.require_unreleased()?;
        let heading = {
            let current = &self.sections[unreleased].heading;
            Heading::new(current.level, title, current.indent.clone())
        };
        let mut release = Section::new(
            heading,
            SectionKind::Release {
                version,
                label: Some(label),
            },
            0,
        );
        release.body =
            std::mem::replace(&mut self.sections[unreleased].body, vec![String::new()]);
        if release.body.is_empty() {
            release.body.push(String::new());
        }

        self.sections.insert(unreleased + 1, release);
        self.renumber();
        Ok(())
    }

    /// recompute 1-based heading line numbers from the current layout
    fn renumber(&mut self) {
        let mut line_number = self.preamble.len() + 1;
        for section in &mut self.sections {
            section.line_number = line_number;
            line_number += 1 + section.body.len();
        }
    }

    /// serialize back to markdown
    pub fn render(&self) -> String {
        let mut lines: Vec<&str> = self.preamble.iter().map(String::as_str).collect();
        for section in &self.sections {
            lines.push(&section.heading.raw);
            lines.extend(section.body.iter().map(String::as_str));
        }

        let line_ending = self.line_ending.as_str();
        let mut out = lines.join(line_ending);
        if self.trailing_newline {
            out.push_str(line_ending);
        }
        out
    }

    /// count of non-blank lines in the unreleased section, 0 when missing
    pub fn unreleased_entry_count(&self) -> usize {
        self.unreleased_index()
            .map(|i| {
                self.full_body(i)
                    .iter()
                    .filter(|l| !l.trim().is_empty())
                    .count()
            })
            .unwrap_or(0)
    }

    fn display_path(&self) -> String {
        self.path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "changelog".to_string())
    }
}

/// snapshot of where the changelog stands, as shown by `status`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangelogStatus {
    pub path: PathBuf,
    pub current_version: Version,
    pub release_count: usize,
    pub unreleased_entries: usize,
    pub next_versions: Vec<(IncrementType, Version)>,
}

impl ChangelogStatus {
    pub fn has_unreleased_changes(&self) -> bool {
        self.unreleased_entries > 0
    }

    pub fn next_version(&self, increment: IncrementType) -> Option<&Version> {
        self.next_versions
            .iter()
            .find(|(t, _)| *t == increment)
            .map(|(_, v)| v)
    }
}
