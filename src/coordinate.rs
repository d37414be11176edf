//! Dependency coordinates
//!
//! A [`Coordinate`] identifies one fetchable artifact in a remote
//! repository: `group:artifact:version` plus an optional classifier and a
//! packaging kind. Coordinates are built once through
//! [`Coordinate::builder`] and immutable afterwards; everything else
//! (file name, repository-relative path) is derived on demand.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Version suffix marking a snapshot build
const SNAPSHOT_SUFFIX: &str = "-SNAPSHOT";

/// Version string requesting whatever the repository considers newest
const LATEST_MARKER: &str = "LATEST";

/// Packaging kind used when the builder is not told otherwise
const DEFAULT_KIND: &str = "zip";

/// Immutable descriptor of a dependency artifact
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coordinate {
    group: String,
    artifact: String,
    version: String,
    classifier: Option<String>,
    kind: String,
}

impl Coordinate {
    /// Start building a coordinate
    pub fn builder() -> CoordinateBuilder {
        CoordinateBuilder::default()
    }

    /// Dot-separated namespace, e.g. `org.example.tools`
    pub fn group(&self) -> &str {
        &self.group
    }

    /// Artifact name
    pub fn artifact(&self) -> &str {
        &self.artifact
    }

    /// Version string, possibly a snapshot or latest marker
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Optional classifier distinguishing secondary artifacts
    pub fn classifier(&self) -> Option<&str> {
        self.classifier.as_deref()
    }

    /// Packaging kind (file extension)
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// File name of the artifact: `artifact-version[-classifier].kind`
    pub fn file_name(&self) -> String {
        match &self.classifier {
            Some(classifier) => {
                format!("{}-{}-{}.{}", self.artifact, self.version, classifier, self.kind)
            }
            None => format!("{}-{}.{}", self.artifact, self.version, self.kind),
        }
    }

    /// Repository-relative path: `group/with/dots/artifact/version/file`
    pub fn repository_path(&self) -> String {
        format!(
            "{}/{}/{}/{}",
            self.group.replace('.', "/"),
            self.artifact,
            self.version,
            self.file_name()
        )
    }

    /// Whether the version denotes a snapshot build
    pub fn is_snapshot(&self) -> bool {
        self.version.ends_with(SNAPSHOT_SUFFIX)
    }

    /// Whether the version is the latest marker
    pub fn is_latest(&self) -> bool {
        self.version == LATEST_MARKER
    }

    /// Whether the version is a plain release (neither snapshot nor latest)
    pub fn is_release(&self) -> bool {
        !self.is_snapshot() && !self.is_latest()
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}:{}", self.group, self.artifact, self.version)
    }
}

/// Builder for [`Coordinate`]
///
/// `group`, `artifact`, and `version` are required and validated non-empty
/// at [`build`](CoordinateBuilder::build); `kind` falls back to `zip`.
#[derive(Clone, Debug, Default)]
pub struct CoordinateBuilder {
    group: String,
    artifact: String,
    version: String,
    classifier: Option<String>,
    kind: Option<String>,
}

impl CoordinateBuilder {
    /// Set the dot-separated group namespace
    pub fn group(mut self, group: impl Into<String>) -> Self {
        self.group = group.into();
        self
    }

    /// Set the artifact name
    pub fn artifact(mut self, artifact: impl Into<String>) -> Self {
        self.artifact = artifact.into();
        self
    }

    /// Set the version string
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Set the optional classifier
    pub fn classifier(mut self, classifier: impl Into<String>) -> Self {
        self.classifier = Some(classifier.into());
        self
    }

    /// Set the packaging kind
    pub fn kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    /// Validate and build the coordinate
    pub fn build(self) -> Result<Coordinate> {
        let kind = self.kind.unwrap_or_else(|| DEFAULT_KIND.to_string());
        for (field, value) in [
            ("group", &self.group),
            ("artifact", &self.artifact),
            ("version", &self.version),
            ("kind", &kind),
        ] {
            if value.is_empty() {
                return Err(Error::InvalidCoordinate {
                    reason: format!("{field} must not be empty"),
                });
            }
        }
        if let Some(classifier) = &self.classifier {
            if classifier.is_empty() {
                return Err(Error::InvalidCoordinate {
                    reason: "classifier must not be empty when present".to_string(),
                });
            }
        }
        Ok(Coordinate {
            group: self.group,
            artifact: self.artifact,
            version: self.version,
            classifier: self.classifier,
            kind,
        })
    }
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn builder_derives_file_and_repository_path() {
        let coordinate = Coordinate::builder()
            .group("group.with.dots")
            .artifact("artifact")
            .version("47.11")
            .classifier("classifier")
            .kind("kind")
            .build()
            .unwrap();
        let file = "artifact-47.11-classifier.kind";
        assert_eq!(coordinate.group(), "group.with.dots");
        assert_eq!(coordinate.artifact(), "artifact");
        assert_eq!(coordinate.version(), "47.11");
        assert_eq!(coordinate.classifier(), Some("classifier"));
        assert_eq!(coordinate.kind(), "kind");
        assert_eq!(coordinate.file_name(), file);
        assert_eq!(
            coordinate.repository_path(),
            format!("group/with/dots/artifact/47.11/{file}")
        );
    }

    #[test]
    fn classification_is_mutually_exclusive_and_exhaustive() {
        let release = Coordinate::builder()
            .group("g")
            .artifact("a")
            .version("1.0.0")
            .build()
            .unwrap();
        assert!(release.is_release());
        assert!(!release.is_snapshot());
        assert!(!release.is_latest());

        let snapshot = Coordinate::builder()
            .group("g")
            .artifact("a")
            .version("master-SNAPSHOT")
            .build()
            .unwrap();
        assert!(snapshot.is_snapshot());
        assert!(!snapshot.is_latest());
        assert!(!snapshot.is_release());

        let latest = Coordinate::builder()
            .group("g")
            .artifact("a")
            .version("LATEST")
            .build()
            .unwrap();
        assert!(latest.is_latest());
        assert!(!latest.is_snapshot());
        assert!(!latest.is_release());
    }

    #[test]
    fn kind_defaults_to_zip() {
        let coordinate = Coordinate::builder()
            .group("g")
            .artifact("a")
            .version("1.0")
            .build()
            .unwrap();
        assert_eq!(coordinate.kind(), "zip");
        assert_eq!(coordinate.file_name(), "a-1.0.zip");
    }

    #[test]
    fn empty_required_field_is_rejected() {
        let err = Coordinate::builder()
            .group("g")
            .version("1.0")
            .build()
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
        assert!(err.to_string().contains("artifact must not be empty"));
    }
}
