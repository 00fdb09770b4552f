use crate::utils::changelog::IncrementType;
use semver::Version;
use std::fmt;
use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
    /// proposed version is not valid semver syntax
    InvalidVersion {
        version: String,
        source: semver::Error,
    },
    /// proposed version is not strictly greater than the current one
    VersionRegression {
        version: String,
        current: Version,
    },
    /// proposed version skips or combines increments
    InvalidIncrement {
        version: String,
        increment: IncrementType,
        suggested: Version,
    },
    FileReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    FileWriteError {
        path: PathBuf,
        source: std::io::Error,
    },
    TomlParseError {
        path: PathBuf,
        source: toml::de::Error,
    },
    ChangelogError {
        reason: String,
    },
    IoError(std::io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidVersion { version, .. } => {
                write!(
                    f,
                    "New version number {} could not be processed by Semver. Please ensure you are providing a valid semantic version",
                    version
                )
            }
            Error::VersionRegression { version, current } => {
                write!(
                    f,
                    "New version number {} is less than or equal to the most recent version ({}). Please provide a newer version number",
                    version, current
                )
            }
            Error::InvalidIncrement {
                version,
                increment,
                suggested,
            } => {
                write!(
                    f,
                    "New version number {} is incrementing more than one for its increment type ({}). Please provide a version number than only increments by one from the current version. In this case, it's likely that your new version number should be: {}",
                    version, increment, suggested
                )
            }
            Error::FileReadError { path, source } => {
                write!(f, "failed to read file: {} ({})", path.display(), source)
            }
            Error::FileWriteError { path, source } => {
                write!(f, "failed to write file: {} ({})", path.display(), source)
            }
            Error::TomlParseError { path, source } => {
                write!(
                    f,
                    "failed to parse toml file: {} ({})",
                    path.display(),
                    source
                )
            }
            Error::ChangelogError { reason } => {
                write!(f, "changelog error: {}", reason)
            }
            Error::IoError(err) => {
                write!(f, "io error: {}", err)
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::InvalidVersion { source, .. } => Some(source),
            Error::FileReadError { source, .. } => Some(source),
            Error::FileWriteError { source, .. } => Some(source),
            Error::TomlParseError { source, .. } => Some(source),
            Error::IoError(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::IoError(err)
    }
}

impl Error {
    pub fn changelog(reason: impl Into<String>) -> Self {
        Error::ChangelogError {
            reason: reason.into(),
        }
    }
}
