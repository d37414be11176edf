//! Error types for minibuild
//!
//! Every fatal condition in the crate surfaces as a distinct [`Error`]
//! variant carrying a literal, human-readable message that names the exact
//! path, URI, or name involved. Callers (and tests) match on either the
//! variant or the coarser [`ErrorKind`] classification.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for minibuild operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for minibuild
#[derive(Debug, Error)]
pub enum Error {
    /// A coordinate builder was given an empty required field
    #[error("invalid coordinate: {reason}")]
    InvalidCoordinate {
        /// Which field was missing or empty
        reason: String,
    },

    /// A named grouping was registered twice on the same builder
    #[error("{name} already defined")]
    AlreadyDefined {
        /// The colliding group name
        name: String,
    },

    /// A named grouping was looked up but never registered
    #[error("no such group: {name}")]
    NoSuchGroup {
        /// The unknown group name
        name: String,
    },

    /// The downloader was handed a relative or unparseable source URI
    #[error("URI is not absolute: {uri}")]
    UriNotAbsolute {
        /// The offending URI, verbatim
        uri: String,
    },

    /// The source URI carries no usable trailing file name
    #[error("URI has no file name: {uri}")]
    UriMissingFileName {
        /// The offending URI, verbatim
        uri: String,
    },

    /// Offline mode is active and the target file is not in the cache
    #[error("Target is missing and being offline: {}", .target.display())]
    OfflineTargetMissing {
        /// The local file that would have been fetched
        target: PathBuf,
    },

    /// Tree walk was started on a path that does not exist
    #[error("root does not exist: {}", .root.display())]
    WalkRootMissing {
        /// The missing traversal root
        root: PathBuf,
    },

    /// Tree copy source does not exist
    #[error("source must exist: {}", .path.display())]
    CopySourceMissing {
        /// The missing copy source
        path: PathBuf,
    },

    /// Tree copy source exists but is not a directory
    #[error("source must be a directory: {}", .path.display())]
    CopySourceNotDirectory {
        /// The non-directory copy source
        path: PathBuf,
    },

    /// Tree copy destination exists and is not a directory
    #[error("target must be a directory: {}", .path.display())]
    CopyTargetNotDirectory {
        /// The non-directory copy destination
        path: PathBuf,
    },

    /// Tree copy destination already exists inside the source tree
    #[error("target must not be a child of source: {}", .target.display())]
    CopyTargetInsideSource {
        /// The offending destination
        target: PathBuf,
    },

    /// Insufficient rights to create or write a path
    #[error("permission denied: {}", .path.display())]
    PermissionDenied {
        /// The path that could not be written
        path: PathBuf,
    },

    /// A process-invocation task named a program that is not installed
    #[error("executable not found: {program}")]
    ExecutableNotFound {
        /// The program name as given in the invocation
        program: String,
        /// The underlying lookup failure
        #[source]
        source: which::Error,
    },

    /// A transport-level failure during a body transfer or metadata query
    #[error("transfer failed for {uri}: {reason}")]
    Transfer {
        /// The source URI of the failed transfer
        uri: String,
        /// What the transport reported
        reason: String,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Coarse classification of [`Error`] variants
///
/// Mirrors the condition taxonomy callers are expected to match on when the
/// exact variant is more detail than they need.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed input: relative URIs, duplicate names, bad copy arguments
    InvalidInput,
    /// A required file or directory is absent
    MissingResource,
    /// Insufficient filesystem rights
    PermissionDenied,
    /// A task's program could not be resolved to an installed executable
    ExecutableNotFound,
    /// The transport failed during a transfer or metadata query
    TransferFailure,
    /// Any other I/O failure
    Io,
}

impl Error {
    /// Classify this error into its [`ErrorKind`]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidCoordinate { .. }
            | Error::AlreadyDefined { .. }
            | Error::NoSuchGroup { .. }
            | Error::UriNotAbsolute { .. }
            | Error::UriMissingFileName { .. }
            | Error::CopySourceNotDirectory { .. }
            | Error::CopyTargetNotDirectory { .. }
            | Error::CopyTargetInsideSource { .. } => ErrorKind::InvalidInput,
            Error::OfflineTargetMissing { .. }
            | Error::WalkRootMissing { .. }
            | Error::CopySourceMissing { .. } => ErrorKind::MissingResource,
            Error::PermissionDenied { .. } => ErrorKind::PermissionDenied,
            Error::ExecutableNotFound { .. } => ErrorKind::ExecutableNotFound,
            Error::Transfer { .. } => ErrorKind::TransferFailure,
            Error::Io(_) => ErrorKind::Io,
        }
    }
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offline_message_names_the_exact_target() {
        let err = Error::OfflineTargetMissing {
            target: PathBuf::from("/cache/lib/artifact-1.0.zip"),
        };
        assert_eq!(
            err.to_string(),
            "Target is missing and being offline: /cache/lib/artifact-1.0.zip"
        );
        assert_eq!(err.kind(), ErrorKind::MissingResource);
    }

    #[test]
    fn relative_uri_message_is_recognizable() {
        let err = Error::UriNotAbsolute {
            uri: "void".to_string(),
        };
        assert!(err.to_string().contains("URI is not absolute"));
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn duplicate_name_message_matches_builder_contract() {
        let err = Error::AlreadyDefined {
            name: "main".to_string(),
        };
        assert_eq!(err.to_string(), "main already defined");
    }

    #[test]
    fn every_variant_maps_to_a_kind() {
        let io = Error::Io(std::io::Error::other("boom"));
        assert_eq!(io.kind(), ErrorKind::Io);
        let transfer = Error::Transfer {
            uri: "https://example.com/a.zip".to_string(),
            reason: "connection reset".to_string(),
        };
        assert_eq!(transfer.kind(), ErrorKind::TransferFailure);
    }
}
