//! Package status classification
//!
//! Compares a declared version against the latest registry version and
//! assigns one of: not found, no local version, outdated, up to date.
//!
//! A declared version that does not parse is never compared: the status gets
//! `no_local_version` and `outdated` stays false.

use super::{NuGetVersion, Resolution};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Classification of a single package, in reporting priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StatusKind {
    /// No registry knows the package (or the lookup failed)
    NotFound,
    /// The declared version could not be parsed
    NoLocalVersion,
    /// A newer version is published
    Outdated,
    /// Declared version is the latest (or newer)
    UpToDate,
}

impl StatusKind {
    /// Returns the human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            StatusKind::NotFound => "not found",
            StatusKind::NoLocalVersion => "no local version",
            StatusKind::Outdated => "outdated",
            StatusKind::UpToDate => "up to date",
        }
    }

    /// Returns the CSS class / machine identifier
    pub fn css_class(&self) -> &'static str {
        match self {
            StatusKind::NotFound => "not-found",
            StatusKind::NoLocalVersion => "no-local-version",
            StatusKind::Outdated => "outdated",
            StatusKind::UpToDate => "up-to-date",
        }
    }
}

impl fmt::Display for StatusKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Status of one declared package after resolution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageStatus {
    /// Package id
    pub id: String,
    /// Label shown in reports; the id, or the declaring file for diverging versions
    pub label: String,
    /// Version as declared in the manifest
    pub declared_version: String,
    /// Latest version published in the registry
    pub current_version: Option<String>,
    pub not_found: bool,
    pub no_local_version: bool,
    pub outdated: bool,
    pub project_url: Option<String>,
    /// Set when the package is reported as not found because a lookup failed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lookup_error: Option<String>,
}

impl PackageStatus {
    /// Classify a declared version against a registry resolution
    pub fn classify(
        id: impl Into<String>,
        declared_version: impl Into<String>,
        resolution: &Resolution,
    ) -> Self {
        let id = id.into();
        let declared_version = declared_version.into();
        let declared = NuGetVersion::parse(&declared_version).ok();

        let mut status = Self {
            label: id.clone(),
            id,
            no_local_version: declared.is_none(),
            declared_version,
            current_version: None,
            not_found: false,
            outdated: false,
            project_url: None,
            lookup_error: None,
        };

        match resolution {
            Resolution::NotFound => status.not_found = true,
            Resolution::Failed(message) => {
                status.not_found = true;
                status.lookup_error = Some(message.clone());
            }
            Resolution::Found(metadata) => {
                status.current_version = Some(metadata.latest_version.clone());
                status.project_url = metadata.project_url.clone();

                let latest = NuGetVersion::parse(&metadata.latest_version).ok();
                if let (Some(declared), Some(latest)) = (declared, latest) {
                    status.outdated = latest > declared;
                }
            }
        }

        status
    }

    /// Replace the display label (builder pattern)
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Returns the classification, highest priority flag first
    pub fn kind(&self) -> StatusKind {
        if self.not_found {
            StatusKind::NotFound
        } else if self.no_local_version {
            StatusKind::NoLocalVersion
        } else if self.outdated {
            StatusKind::Outdated
        } else {
            StatusKind::UpToDate
        }
    }

    /// Returns true if no flag is set
    pub fn is_up_to_date(&self) -> bool {
        self.kind() == StatusKind::UpToDate
    }
}
