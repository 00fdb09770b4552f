// changelog parsing, version rules and release notes

pub mod config;
pub mod parser;
pub mod release_notes;
pub mod types;
pub mod validator;

pub use config::ChangelogConfig;
pub use parser::{parse_changelog, parse_changelog_str};
pub use release_notes::{NotesSource, extract_release_notes};
pub use types::{Changelog, ChangelogStatus, Heading, LineEnding, Section, SectionKind};
pub use validator::{
    IncrementType, next_versions, parse_version, validate_changelog, validate_increment,
};
