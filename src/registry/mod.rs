//! Package registries for fetching published versions
//!
//! This module provides:
//! - HTTP client shared foundation with retry logic
//! - NuGet v3 protocol adapter
//! - Construction of one registry per configured package source

mod client;
mod nuget;

pub use client::{Credentials, HttpClient};
pub use nuget::{NuGetRegistry, NUGET_ORG_INDEX};

use crate::config::PackageSource;
use crate::error::RegistryError;
use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

/// One published version of a package
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageMetadata {
    /// Version string as published
    pub version: String,
    /// Project URL declared for this version
    pub project_url: Option<String>,
}

impl PackageMetadata {
    pub fn new(version: impl Into<String>, project_url: Option<String>) -> Self {
        Self {
            version: version.into(),
            project_url,
        }
    }
}

/// Trait for package registries
#[cfg_attr(test, automock)]
#[async_trait]
pub trait Registry: Send + Sync {
    /// Registry name used in logs and error messages
    fn name(&self) -> String;

    /// Fetch the listed versions of a package, oldest first
    ///
    /// An unknown package is an empty list, not an error.
    async fn fetch_metadata(
        &self,
        package_id: &str,
        include_prerelease: bool,
    ) -> Result<Vec<PackageMetadata>, RegistryError>;
}

/// Create one registry per package source, keeping priority order
pub fn create_registries(sources: &[PackageSource], client: &HttpClient) -> Vec<Box<dyn Registry>> {
    sources
        .iter()
        .map(|source| {
            let client = client.clone().with_credentials(source.credentials.clone());
            Box::new(NuGetRegistry::new(&source.name, &source.url, client)) as Box<dyn Registry>
        })
        .collect()
}
