//! Latest-version resolution across package sources
//!
//! Registries are queried strictly in priority order until one of them knows
//! the package. Every outcome, including misses and failures, is cached for
//! the lifetime of the resolver.

mod cache;

pub use cache::MetadataCache;

use crate::domain::{Resolution, ResolvedMetadata};
use crate::registry::Registry;
use tracing::{debug, warn};

/// Resolves package ids to their latest published version
pub struct VersionResolver {
    registries: Vec<Box<dyn Registry>>,
    cache: MetadataCache,
    include_prerelease: bool,
}

impl VersionResolver {
    /// Create a resolver over registries in priority order
    pub fn new(registries: Vec<Box<dyn Registry>>, include_prerelease: bool) -> Self {
        Self {
            registries,
            cache: MetadataCache::new(),
            include_prerelease,
        }
    }

    /// Resolve a package id, hitting the registries at most once per id
    pub async fn resolve(&mut self, package_id: &str) -> Resolution {
        if let Some(cached) = self.cache.get(package_id) {
            debug!("cache hit for {}", package_id);
            return cached.clone();
        }

        let resolution = self.lookup(package_id).await;
        self.cache.insert(package_id, resolution.clone());
        resolution
    }

    /// Number of distinct ids resolved so far
    pub fn cached(&self) -> usize {
        self.cache.len()
    }

    async fn lookup(&self, package_id: &str) -> Resolution {
        let mut failures = Vec::new();

        for registry in &self.registries {
            match registry
                .fetch_metadata(package_id, self.include_prerelease)
                .await
            {
                Ok(versions) => {
                    // Registries list versions oldest first
                    if let Some(latest) = versions.into_iter().last() {
                        debug!(
                            "{} resolved to {} on {}",
                            package_id,
                            latest.version,
                            registry.name()
                        );
                        return Resolution::Found(ResolvedMetadata {
                            id: package_id.to_string(),
                            latest_version: latest.version,
                            project_url: latest.project_url,
                            registry: registry.name(),
                        });
                    }
                }
                Err(e) => {
                    warn!("{}", e);
                    failures.push(e.to_string());
                }
            }
        }

        if failures.is_empty() {
            Resolution::NotFound
        } else {
            Resolution::Failed(failures.join("; "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RegistryError;
    use crate::registry::{MockRegistry, PackageMetadata};

    fn versions(list: &[&str]) -> Vec<PackageMetadata> {
        list.iter()
            .map(|v| PackageMetadata::new(*v, Some("https://example.com".to_string())))
            .collect()
    }

    fn found(resolution: &Resolution) -> &ResolvedMetadata {
        match resolution {
            Resolution::Found(metadata) => metadata,
            other => panic!("expected a resolved package, got {:?}", other),
        }
    }

    fn named(name: &'static str) -> MockRegistry {
        let mut registry = MockRegistry::new();
        registry.expect_name().returning(move || name.to_string());
        registry
    }

    #[tokio::test]
    async fn test_resolve_takes_last_version() {
        let mut registry = named("primary");
        registry
            .expect_fetch_metadata()
            .withf(|id, prerelease| id == "PackageA" && !*prerelease)
            .times(1)
            .returning(|_, _| Ok(versions(&["1.0.0", "1.1.0", "1.2.0"])));

        let mut resolver = VersionResolver::new(vec![Box::new(registry)], false);
        let resolution = resolver.resolve("PackageA").await;

        let metadata = found(&resolution);
        assert_eq!(metadata.latest_version, "1.2.0");
        assert_eq!(metadata.registry, "primary");
        assert_eq!(metadata.project_url.as_deref(), Some("https://example.com"));
    }

    #[tokio::test]
    async fn test_resolve_is_cached() {
        let mut registry = named("primary");
        registry
            .expect_fetch_metadata()
            .times(1)
            .returning(|_, _| Ok(versions(&["2.0.0"])));

        let mut resolver = VersionResolver::new(vec![Box::new(registry)], false);
        let first = resolver.resolve("PackageA").await;
        let second = resolver.resolve("PackageA").await;
        let differently_cased = resolver.resolve("packagea").await;

        assert_eq!(first, second);
        assert_eq!(first, differently_cased);
        assert_eq!(resolver.cached(), 1);
    }

    #[tokio::test]
    async fn test_misses_are_cached() {
        let mut registry = named("primary");
        registry
            .expect_fetch_metadata()
            .times(1)
            .returning(|_, _| Ok(Vec::new()));

        let mut resolver = VersionResolver::new(vec![Box::new(registry)], false);
        assert_eq!(resolver.resolve("Ghost").await, Resolution::NotFound);
        assert_eq!(resolver.resolve("Ghost").await, Resolution::NotFound);
    }

    #[tokio::test]
    async fn test_priority_order_stops_at_first_hit() {
        let mut primary = named("primary");
        primary
            .expect_fetch_metadata()
            .times(1)
            .returning(|_, _| Ok(versions(&["1.0.0"])));
        let mut secondary = named("secondary");
        secondary.expect_fetch_metadata().times(0);

        let mut resolver =
            VersionResolver::new(vec![Box::new(primary), Box::new(secondary)], false);
        let resolution = resolver.resolve("PackageA").await;

        assert_eq!(found(&resolution).registry, "primary");
    }

    #[tokio::test]
    async fn test_empty_result_falls_through() {
        let mut primary = named("primary");
        primary
            .expect_fetch_metadata()
            .times(1)
            .returning(|_, _| Ok(Vec::new()));
        let mut secondary = named("secondary");
        secondary
            .expect_fetch_metadata()
            .times(1)
            .returning(|_, _| Ok(versions(&["3.0.0"])));

        let mut resolver =
            VersionResolver::new(vec![Box::new(primary), Box::new(secondary)], false);
        let resolution = resolver.resolve("PackageA").await;

        let metadata = found(&resolution);
        assert_eq!(metadata.latest_version, "3.0.0");
        assert_eq!(metadata.registry, "secondary");
    }

    #[tokio::test]
    async fn test_error_falls_through_to_next_source() {
        let mut primary = named("primary");
        primary
            .expect_fetch_metadata()
            .times(1)
            .returning(|id, _| Err(RegistryError::timeout(id, "primary")));
        let mut secondary = named("secondary");
        secondary
            .expect_fetch_metadata()
            .times(1)
            .returning(|_, _| Ok(versions(&["1.0.0"])));

        let mut resolver =
            VersionResolver::new(vec![Box::new(primary), Box::new(secondary)], false);
        assert!(matches!(
            resolver.resolve("PackageA").await,
            Resolution::Found(_)
        ));
    }

    #[tokio::test]
    async fn test_error_without_hit_is_failed() {
        let mut primary = named("primary");
        primary
            .expect_fetch_metadata()
            .times(1)
            .returning(|id, _| Err(RegistryError::network_error(id, "primary", "HTTP 503")));
        let mut secondary = named("secondary");
        secondary
            .expect_fetch_metadata()
            .times(1)
            .returning(|_, _| Ok(Vec::new()));

        let mut resolver =
            VersionResolver::new(vec![Box::new(primary), Box::new(secondary)], false);
        let resolution = resolver.resolve("PackageA").await;

        match resolution {
            Resolution::Failed(message) => assert!(message.contains("HTTP 503")),
            other => panic!("expected Failed, got {:?}", other),
        }
        // Failures are cached too
        assert!(matches!(
            resolver.resolve("PackageA").await,
            Resolution::Failed(_)
        ));
    }

    #[tokio::test]
    async fn test_prerelease_flag_is_forwarded() {
        let mut registry = named("primary");
        registry
            .expect_fetch_metadata()
            .withf(|_, prerelease| *prerelease)
            .times(1)
            .returning(|_, _| Ok(versions(&["2.0.0-rc.1"])));

        let mut resolver = VersionResolver::new(vec![Box::new(registry)], true);
        let resolution = resolver.resolve("PackageA").await;
        assert_eq!(found(&resolution).latest_version, "2.0.0-rc.1");
    }

    #[tokio::test]
    async fn test_no_registries_is_not_found() {
        let mut resolver = VersionResolver::new(Vec::new(), false);
        assert_eq!(resolver.resolve("PackageA").await, Resolution::NotFound);
    }
}
