//! Scan configuration
//!
//! Merges command-line arguments with an optional TOML file:
//!
//! ```toml
//! recursive = true
//! combine = false
//! prerelease = false
//! report = "nuscan-report.html"
//! css_url = "https://cdn.example.com/report.css"
//! badge = "nuscan-badge.svg"
//! ci_attach = true
//!
//! [[source]]
//! name = "internal"
//! url = "https://pkgs.example.com/nuget/v3/index.json"
//! username = "ci"
//! token_env = "INTERNAL_FEED_TOKEN"
//! ```
//!
//! Command-line flags take precedence over file values. Sources from the file
//! come first, then `--source` URLs; nuget.org is used when none is given.

use crate::cli::CliArgs;
use crate::error::ConfigError;
use crate::registry::{Credentials, NUGET_ORG_INDEX};
use reqwest::Url;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Username sent with a token when the source does not name one
const DEFAULT_USERNAME: &str = "nuscan";

/// Contents of a configuration file
#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub recursive: Option<bool>,
    pub combine: Option<bool>,
    pub prerelease: Option<bool>,
    pub report: Option<PathBuf>,
    pub css_url: Option<String>,
    pub badge: Option<PathBuf>,
    pub ci_attach: Option<bool>,
    #[serde(rename = "source")]
    pub sources: Vec<SourceEntry>,
}

/// A `[[source]]` table
#[derive(Debug, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct SourceEntry {
    pub name: Option<String>,
    pub url: String,
    pub username: Option<String>,
    /// Environment variable holding the password or access token
    pub token_env: Option<String>,
}

impl FileConfig {
    /// Read and parse a configuration file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ConfigFile {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::parse(path, &content)
    }

    fn parse(path: &Path, content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::ConfigFile {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }
}

/// A NuGet package source in priority order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageSource {
    pub name: String,
    pub url: String,
    pub credentials: Option<Credentials>,
}

impl PackageSource {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            credentials: None,
        }
    }

    /// Set credentials (builder pattern)
    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// The public nuget.org feed
    pub fn nuget_org() -> Self {
        Self::new("nuget.org", NUGET_ORG_INDEX)
    }
}

/// Effective configuration of one scan
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Directory or project file to scan
    pub root: PathBuf,
    pub recursive: bool,
    pub combine: bool,
    pub include_prerelease: bool,
    /// Package sources in priority order (never empty)
    pub sources: Vec<PackageSource>,
    pub report: Option<PathBuf>,
    pub css_url: Option<String>,
    pub badge: Option<PathBuf>,
    pub ci_attach: bool,
    pub json: bool,
    pub verbose: bool,
    pub quiet: bool,
}

impl ScanConfig {
    /// Build the configuration from CLI arguments and the process environment
    pub fn load(args: &CliArgs) -> Result<Self, ConfigError> {
        let file = match &args.config {
            Some(path) => FileConfig::load(path)?,
            None => FileConfig::default(),
        };
        Self::from_parts(args, file, |name| std::env::var(name).ok())
    }

    /// Merge CLI arguments with file values, looking up secrets through `env`
    pub fn from_parts(
        args: &CliArgs,
        file: FileConfig,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let mut sources = Vec::with_capacity(file.sources.len() + args.sources.len());
        for entry in &file.sources {
            sources.push(resolve_source(entry, &env)?);
        }
        for url in &args.sources {
            sources.push(PackageSource::new(source_name(url)?, url));
        }
        if sources.is_empty() {
            sources.push(PackageSource::nuget_org());
        }

        Ok(Self {
            root: args.path.clone(),
            recursive: args.recursive || file.recursive.unwrap_or(false),
            combine: args.combine || file.combine.unwrap_or(false),
            include_prerelease: args.prerelease || file.prerelease.unwrap_or(false),
            sources,
            report: args.report.clone().or(file.report),
            css_url: args.css_url.clone().or(file.css_url),
            badge: args.badge.clone().or(file.badge),
            ci_attach: args.ci_attach || file.ci_attach.unwrap_or(false),
            json: args.json,
            verbose: args.verbose,
            quiet: args.quiet,
        })
    }
}

fn resolve_source(
    entry: &SourceEntry,
    env: &impl Fn(&str) -> Option<String>,
) -> Result<PackageSource, ConfigError> {
    let host = source_name(&entry.url)?;
    let name = entry.name.clone().unwrap_or(host);
    let source = PackageSource::new(&name, &entry.url);

    let Some(variable) = &entry.token_env else {
        return Ok(source);
    };
    let token = env(variable)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| ConfigError::MissingEnvironment {
            variable: variable.clone(),
            source_name: name.clone(),
        })?;
    let username = entry.username.as_deref().unwrap_or(DEFAULT_USERNAME);

    Ok(source.with_credentials(Credentials::new(username, token)))
}

/// Validate a source URL and derive a display name from its host
fn source_name(url: &str) -> Result<String, ConfigError> {
    let parsed = Url::parse(url).map_err(|_| ConfigError::InvalidSource {
        url: url.to_string(),
    })?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidSource {
            url: url.to_string(),
        });
    }
    Ok(parsed
        .host_str()
        .map(str::to_string)
        .unwrap_or_else(|| url.to_string()))
}
