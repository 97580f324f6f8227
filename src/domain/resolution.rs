//! Registry lookup outcomes

use serde::{Deserialize, Serialize};

/// Latest published metadata for a package id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedMetadata {
    /// Package id as queried
    pub id: String,
    /// Most recent version reported by the registry
    pub latest_version: String,
    /// Project URL of the most recent version, if published
    pub project_url: Option<String>,
    /// Name of the registry that answered
    pub registry: String,
}

/// Outcome of resolving one package id against the configured registries
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// A registry returned at least one version
    Found(ResolvedMetadata),
    /// Every registry answered, none knows the package
    NotFound,
    /// No registry knows the package and at least one lookup failed
    Failed(String),
}
