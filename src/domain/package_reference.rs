//! Package references declared by manifests

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// A dependency as declared in a manifest file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageReference {
    /// Package id as written in the manifest
    pub id: String,
    /// Declared version string, which may not be a valid version
    pub declared_version: String,
    /// File the reference was read from
    pub declaring_file: PathBuf,
}

impl PackageReference {
    /// Creates a new package reference
    pub fn new(
        id: impl Into<String>,
        declared_version: impl Into<String>,
        declaring_file: impl Into<PathBuf>,
    ) -> Self {
        Self {
            id: id.into(),
            declared_version: declared_version.into(),
            declaring_file: declaring_file.into(),
        }
    }

    /// Key used to group references to the same package; NuGet ids are case-insensitive
    pub fn group_key(&self) -> String {
        self.id.to_lowercase()
    }

    /// Returns the declaring file path
    pub fn file(&self) -> &Path {
        &self.declaring_file
    }
}

impl fmt::Display for PackageReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}@{} ({})",
            self.id,
            self.declared_version,
            self.declaring_file.display()
        )
    }
}
