pub mod error;
pub mod utils;

pub use error::*;
pub use utils::changelog::{
    Changelog, ChangelogConfig, ChangelogStatus, Heading, IncrementType, LineEnding, NotesSource,
    Section, SectionKind, extract_release_notes, next_versions, parse_changelog,
    parse_changelog_str, parse_version, validate_changelog, validate_increment,
};
pub use utils::changelog_manager::{ChangelogManager, display_issues};
pub use utils::config::HelperConfig;
pub use utils::severity::{Issue, IssueSeverity, IssueType};
