//! Scan orchestrator for coordinating the entire check workflow
//!
//! This module provides:
//! - Workflow coordination: detect → parse → resolve → classify → (aggregate)
//! - Per-project and combined reporting modes
//! - Error handling with partial continuation

use crate::aggregate::{build_projects, group_references};
use crate::config::ScanConfig;
use crate::domain::{BadgeState, CodeProject, PackageStatus, Resolution, ScanSummary};
use crate::error::AppError;
use crate::manifest::{collect, detect_projects, ScannedManifest};
use crate::progress::ScanProgress;
use crate::registry::{create_registries, HttpClient, Registry};
use crate::resolver::VersionResolver;
use serde::Serialize;
use std::collections::HashSet;
use std::path::PathBuf;
use thiserror::Error;
use tracing::info;

/// Orchestrator for coordinating the scan workflow
pub struct Orchestrator {
    /// Effective configuration
    config: ScanConfig,
    /// Run-scoped resolver with its cache
    resolver: VersionResolver,
    /// Ids whose lookup failure has already been recorded
    reported_failures: HashSet<String>,
}

/// Result of running the orchestrator
#[derive(Debug, Default)]
pub struct ScanResult {
    /// Scanned (or synthetic) projects in report order
    pub projects: Vec<CodeProject>,
    /// Recovered problems encountered during the scan
    pub errors: Vec<ScanError>,
}

impl ScanResult {
    /// Counts over all projects
    pub fn summary(&self) -> ScanSummary {
        ScanSummary::from_projects(&self.projects)
    }

    /// State shown on the status badge
    pub fn badge_state(&self) -> BadgeState {
        BadgeState::from_projects(&self.projects)
    }

    /// Returns true if any manifest or lookup failed
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Problems that did not stop the scan
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ScanError {
    /// A manifest could not be read or parsed
    #[error("failed to parse {}: {message}", path.display())]
    ManifestParse { path: PathBuf, message: String },

    /// Every registry lookup for a package failed
    #[error("failed to look up {package}: {message}")]
    Lookup { package: String, message: String },
}

impl Orchestrator {
    /// Create a new orchestrator querying the configured package sources
    pub fn new(config: ScanConfig) -> Result<Self, AppError> {
        let client = HttpClient::new()?;
        let registries = create_registries(&config.sources, &client);
        Ok(Self::with_registries(config, registries))
    }

    /// Create an orchestrator with custom registries (for testing)
    pub fn with_registries(config: ScanConfig, registries: Vec<Box<dyn Registry>>) -> Self {
        let resolver = VersionResolver::new(registries, config.include_prerelease);
        Self {
            config,
            resolver,
            reported_failures: HashSet::new(),
        }
    }

    /// Run the scan workflow
    pub async fn run(&mut self) -> Result<ScanResult, AppError> {
        let show_progress = !self.config.quiet && !self.config.json;
        self.run_with_progress(show_progress).await
    }

    /// Run the scan workflow with optional progress display
    pub async fn run_with_progress(&mut self, show_progress: bool) -> Result<ScanResult, AppError> {
        let mut progress = ScanProgress::new(show_progress);
        let mut result = ScanResult::default();

        // Step 1: Detect project files
        progress.detecting(&self.config.root);
        let projects = detect_projects(&self.config.root, self.config.recursive);
        progress.clear();
        let projects = projects?;
        info!(
            "found {} project file(s) in {}",
            projects.len(),
            self.config.root.display()
        );

        // Step 2: Parse manifests
        let manifests: Vec<ScannedManifest> = projects.iter().map(collect).collect();
        for manifest in &manifests {
            if let Err(e) = &manifest.outcome {
                result.errors.push(ScanError::ManifestParse {
                    path: manifest.manifest_path.clone(),
                    message: e.to_string(),
                });
            }
        }

        // Step 3: Resolve and classify
        if self.config.combine {
            self.scan_combined(&manifests, &mut progress, &mut result)
                .await;
        } else {
            self.scan_projects(&manifests, &mut progress, &mut result)
                .await;
        }
        info!(
            "{} distinct package id(s) looked up, {} error(s)",
            self.resolver.cached(),
            result.errors.len()
        );

        Ok(result)
    }

    /// One CodeProject per manifest
    async fn scan_projects(
        &mut self,
        manifests: &[ScannedManifest],
        progress: &mut ScanProgress,
        result: &mut ScanResult,
    ) {
        let total: usize = manifests.iter().map(|m| m.references().len()).sum();
        progress.checking(total);

        for manifest in manifests {
            if manifest.has_parsing_error() {
                result.projects.push(CodeProject::with_parsing_error(
                    &manifest.name,
                    &manifest.manifest_path,
                ));
                continue;
            }

            let mut project = CodeProject::new(&manifest.name, &manifest.manifest_path);
            for reference in manifest.references() {
                progress.package(&reference.id);
                let resolution = self.resolve(&reference.id, &mut result.errors).await;
                project.add_status(PackageStatus::classify(
                    &reference.id,
                    &reference.declared_version,
                    &resolution,
                ));
                progress.advance();
            }
            result.projects.push(project);
        }

        progress.clear();
    }

    /// Synthetic projects merging every manifest
    async fn scan_combined(
        &mut self,
        manifests: &[ScannedManifest],
        progress: &mut ScanProgress,
        result: &mut ScanResult,
    ) {
        let groups = group_references(
            manifests
                .iter()
                .flat_map(|m| m.references().iter().cloned()),
        );
        progress.checking(groups.len());

        let mut resolved = Vec::with_capacity(groups.len());
        for group in groups {
            progress.package(&group.id);
            let resolution = self.resolve(&group.id, &mut result.errors).await;
            resolved.push((group, resolution));
            progress.advance();
        }
        progress.clear();

        result
            .projects
            .extend(build_projects(&self.config.root, resolved));
        result.projects.extend(
            manifests
                .iter()
                .filter(|m| m.has_parsing_error())
                .map(|m| CodeProject::with_parsing_error(&m.name, &m.manifest_path)),
        );
    }

    /// Resolve an id, recording a lookup failure once per id
    async fn resolve(&mut self, package_id: &str, errors: &mut Vec<ScanError>) -> Resolution {
        let resolution = self.resolver.resolve(package_id).await;
        if let Resolution::Failed(message) = &resolution {
            if self.reported_failures.insert(package_id.to_lowercase()) {
                errors.push(ScanError::Lookup {
                    package: package_id.to_string(),
                    message: message.clone(),
                });
            }
        }
        resolution
    }
}
