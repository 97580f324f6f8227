//! Scanned project results
//!
//! Provides structures for tracking package statuses at project and overall levels.

use super::{PackageStatus, StatusKind};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// One scanned manifest, or a synthetic bucket in combined mode
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeProject {
    /// Project name (file stem, package id, or combined bucket name)
    pub name: String,
    /// Path of the manifest the statuses were read from
    pub manifest_path: PathBuf,
    /// Individual package statuses
    pub packages: Vec<PackageStatus>,
    /// Whether the manifest could not be parsed
    pub parsing_error: bool,
}

impl CodeProject {
    /// Creates a new, empty CodeProject
    pub fn new(name: impl Into<String>, manifest_path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            manifest_path: manifest_path.into(),
            packages: Vec::new(),
            parsing_error: false,
        }
    }

    /// Creates a project for a manifest that failed to parse
    pub fn with_parsing_error(name: impl Into<String>, manifest_path: impl Into<PathBuf>) -> Self {
        Self {
            parsing_error: true,
            ..Self::new(name, manifest_path)
        }
    }

    /// Adds a package status
    pub fn add_status(&mut self, status: PackageStatus) {
        self.packages.push(status);
    }

    /// Returns the number of packages with the given classification
    pub fn count(&self, kind: StatusKind) -> usize {
        self.packages.iter().filter(|p| p.kind() == kind).count()
    }

    /// Returns the most severe classification in this project
    pub fn worst_kind(&self) -> Option<StatusKind> {
        self.packages.iter().map(PackageStatus::kind).min()
    }
}

/// Aggregate counts over a list of projects
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanSummary {
    pub projects: usize,
    pub packages: usize,
    pub up_to_date: usize,
    pub outdated: usize,
    pub no_local_version: usize,
    pub not_found: usize,
    pub parsing_errors: usize,
}

impl ScanSummary {
    /// Counts statuses across all projects
    pub fn from_projects(projects: &[CodeProject]) -> Self {
        let mut summary = Self {
            projects: projects.len(),
            ..Self::default()
        };

        for project in projects {
            if project.parsing_error {
                summary.parsing_errors += 1;
            }
            summary.packages += project.packages.len();
            summary.not_found += project.count(StatusKind::NotFound);
            summary.no_local_version += project.count(StatusKind::NoLocalVersion);
            summary.outdated += project.count(StatusKind::Outdated);
            summary.up_to_date += project.count(StatusKind::UpToDate);
        }

        summary
    }
}
