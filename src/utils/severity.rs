use serde::{Deserialize, Serialize};
use std::fmt;

/// severity level for issues detected while checking a changelog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueSeverity {
    /// error-level issue that should fail the check
    Error,
    /// warning-level issue that is informational only
    Warning,
}

impl fmt::Display for IssueSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IssueSeverity::Error => write!(f, "ERROR"),
            IssueSeverity::Warning => write!(f, "WARN"),
        }
    }
}

/// type of issue detected while checking a changelog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IssueType {
    /// no `Unreleased` heading to collect pending changes
    MissingUnreleased,
    /// `Unreleased` has nothing in it
    EmptyUnreleased,
    /// release heading whose version is not valid semver
    UnparsableVersion,
    /// same version released twice
    DuplicateVersion,
    /// releases are not listed newest first
    VersionOrder,
    /// release heading without a `(<label>)`
    MissingLabel,
}

impl fmt::Display for IssueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IssueType::MissingUnreleased => write!(f, "missing_unreleased"),
            IssueType::EmptyUnreleased => write!(f, "empty_unreleased"),
            IssueType::UnparsableVersion => write!(f, "unparsable_version"),
            IssueType::DuplicateVersion => write!(f, "duplicate_version"),
            IssueType::VersionOrder => write!(f, "version_order"),
            IssueType::MissingLabel => write!(f, "missing_label"),
        }
    }
}

/// structured issue with severity, type, and message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Issue {
    /// severity level of the issue
    pub severity: IssueSeverity,
    /// type of the issue
    pub issue_type: IssueType,
    /// human-readable message describing the issue
    pub message: String,
}

impl Issue {
    /// create a new issue
    pub fn new(severity: IssueSeverity, issue_type: IssueType, message: String) -> Self {
        Self {
            severity,
            issue_type,
            message,
        }
    }

    /// check if this is an error-level issue
    pub fn is_error(&self) -> bool {
        self.severity == IssueSeverity::Error
    }

    /// check if this is a warning-level issue
    pub fn is_warning(&self) -> bool {
        self.severity == IssueSeverity::Warning
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.severity, self.message)
    }
}
