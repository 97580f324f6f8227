//! NuGet v3 registry adapter
//!
//! Resolves package metadata through the NuGet v3 protocol:
//! 1. The service index (`index.json`) locates the registration resource
//! 2. `<registration base>/<id lowercased>/index.json` lists catalog pages
//! 3. Pages are either inlined or fetched by their `@id`

use crate::error::RegistryError;
use crate::registry::{HttpClient, PackageMetadata, Registry};
use async_trait::async_trait;
use serde::Deserialize;
use tokio::sync::OnceCell;
use tracing::debug;

/// Public nuget.org service index
pub const NUGET_ORG_INDEX: &str = "https://api.nuget.org/v3/index.json";

/// Registration resource type with SemVer 2.0.0 support
const PREFERRED_REGISTRATION_TYPE: &str = "RegistrationsBaseUrl/3.6.0";

/// Prefix shared by every registration resource version
const REGISTRATION_TYPE_PREFIX: &str = "RegistrationsBaseUrl";

/// NuGet v3 package source
pub struct NuGetRegistry {
    name: String,
    index_url: String,
    client: HttpClient,
    registrations_base: OnceCell<String>,
}

#[derive(Debug, Deserialize)]
struct ServiceIndex {
    #[serde(default)]
    resources: Vec<ServiceResource>,
}

#[derive(Debug, Deserialize)]
struct ServiceResource {
    #[serde(rename = "@id")]
    id: String,
    #[serde(rename = "@type")]
    resource_type: ResourceType,
}

/// `@type` is a string on nuget.org but some feeds publish a list
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ResourceType {
    One(String),
    Many(Vec<String>),
}

impl ResourceType {
    fn matches(&self, predicate: impl Fn(&str) -> bool) -> bool {
        match self {
            ResourceType::One(t) => predicate(t),
            ResourceType::Many(types) => types.iter().any(|t| predicate(t)),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RegistrationIndex {
    #[serde(default)]
    items: Vec<RegistrationPage>,
}

#[derive(Debug, Deserialize)]
struct RegistrationPage {
    #[serde(rename = "@id")]
    id: String,
    items: Option<Vec<RegistrationLeaf>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RegistrationLeaf {
    catalog_entry: CatalogEntry,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CatalogEntry {
    version: String,
    #[serde(default)]
    listed: Option<bool>,
    #[serde(default)]
    project_url: Option<String>,
}

impl CatalogEntry {
    fn is_prerelease(&self) -> bool {
        self.version
            .split('+')
            .next()
            .is_some_and(|release| release.contains('-'))
    }
}

impl NuGetRegistry {
    /// Create an adapter for the service index at `index_url`
    pub fn new(name: impl Into<String>, index_url: impl Into<String>, client: HttpClient) -> Self {
        Self {
            name: name.into(),
            index_url: index_url.into(),
            client,
            registrations_base: OnceCell::new(),
        }
    }

    async fn registrations_base(&self) -> Result<&str, RegistryError> {
        let base = self
            .registrations_base
            .get_or_try_init(|| async {
                let index: ServiceIndex = self
                    .client
                    .get_json(&self.index_url, "", &self.name)
                    .await?;
                select_registrations_base(&index).ok_or_else(|| {
                    RegistryError::invalid_response(
                        "",
                        &self.name,
                        format!("no {} resource in {}", REGISTRATION_TYPE_PREFIX, self.index_url),
                    )
                })
            })
            .await?;
        Ok(base.as_str())
    }

    fn build_url(base: &str, package_id: &str) -> String {
        format!(
            "{}/{}/index.json",
            base.trim_end_matches('/'),
            package_id.to_lowercase()
        )
    }
}

fn select_registrations_base(index: &ServiceIndex) -> Option<String> {
    index
        .resources
        .iter()
        .find(|r| r.resource_type.matches(|t| t == PREFERRED_REGISTRATION_TYPE))
        .or_else(|| {
            index
                .resources
                .iter()
                .find(|r| r.resource_type.matches(|t| t.starts_with(REGISTRATION_TYPE_PREFIX)))
        })
        .map(|r| r.id.clone())
}

#[async_trait]
impl Registry for NuGetRegistry {
    fn name(&self) -> String {
        self.name.clone()
    }

    async fn fetch_metadata(
        &self,
        package_id: &str,
        include_prerelease: bool,
    ) -> Result<Vec<PackageMetadata>, RegistryError> {
        let base = self.registrations_base().await?;
        let url = Self::build_url(base, package_id);

        let Some(index) = self
            .client
            .get_json_optional::<RegistrationIndex>(&url, package_id, &self.name)
            .await?
        else {
            debug!("{} not found on {}", package_id, self.name);
            return Ok(Vec::new());
        };

        let mut metadata = Vec::new();
        for page in index.items {
            let leaves = match page.items {
                Some(items) => items,
                None => {
                    let page: RegistrationPage =
                        self.client.get_json(&page.id, package_id, &self.name).await?;
                    page.items.unwrap_or_default()
                }
            };

            metadata.extend(
                leaves
                    .into_iter()
                    .map(|leaf| leaf.catalog_entry)
                    .filter(|entry| entry.listed != Some(false))
                    .filter(|entry| include_prerelease || !entry.is_prerelease())
                    .map(|entry| PackageMetadata {
                        version: entry.version,
                        project_url: entry.project_url.filter(|url| !url.is_empty()),
                    }),
            );
        }

        debug!(
            "{}: {} version(s) of {}",
            self.name,
            metadata.len(),
            package_id
        );
        Ok(metadata)
    }
}
