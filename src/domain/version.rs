//! NuGet version parsing and precedence
//!
//! NuGet versions are a superset of SemVer 2.0:
//! - One to four numeric components (`1`, `1.2`, `1.2.3`, `1.2.3.4`)
//! - Optional pre-release label (`1.2.3-beta.1`)
//! - Optional build metadata (`1.2.3+sha.abc`), ignored for precedence
//!
//! Pre-release labels and build metadata are parsed with the `semver` crate so
//! that precedence follows SemVer rules (a release sorts above any pre-release).

use crate::error::VersionError;
use semver::{BuildMetadata, Prerelease};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Maximum number of numeric components in a NuGet version
const MAX_COMPONENTS: usize = 4;

/// A parsed NuGet package version
#[derive(Debug, Clone)]
pub struct NuGetVersion {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
    /// Fourth component used by legacy .NET assemblies (0 when absent)
    pub revision: u64,
    pub pre: Prerelease,
    pub build: BuildMetadata,
    /// The string the version was parsed from, trimmed
    original: String,
}

impl NuGetVersion {
    /// Parse a version string as written in a manifest or returned by a registry
    pub fn parse(input: &str) -> Result<Self, VersionError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(VersionError::Empty);
        }

        let text = unwrap_exact_range(trimmed);
        let text = text
            .strip_prefix('v')
            .or_else(|| text.strip_prefix('V'))
            .unwrap_or(text);

        let (rest, build) = match text.split_once('+') {
            Some((rest, build)) => (rest, build),
            None => (text, ""),
        };
        let (core, pre) = match rest.split_once('-') {
            Some((core, pre)) => (core, pre),
            None => (rest, ""),
        };

        let components: Vec<&str> = core.split('.').collect();
        if components.len() > MAX_COMPONENTS {
            return Err(VersionError::TooManyComponents {
                input: input.to_string(),
            });
        }

        let mut numbers = [0u64; MAX_COMPONENTS];
        for (slot, component) in numbers.iter_mut().zip(&components) {
            if component.is_empty() || !component.bytes().all(|b| b.is_ascii_digit()) {
                return Err(VersionError::InvalidComponent {
                    input: input.to_string(),
                });
            }
            *slot = component
                .parse()
                .map_err(|_| VersionError::InvalidComponent {
                    input: input.to_string(),
                })?;
        }

        if rest.contains('-') && pre.is_empty() {
            return Err(VersionError::InvalidLabel {
                input: input.to_string(),
                message: "empty pre-release label".to_string(),
            });
        }
        let pre = Prerelease::new(pre).map_err(|e| VersionError::InvalidLabel {
            input: input.to_string(),
            message: e.to_string(),
        })?;
        let build = BuildMetadata::new(build).map_err(|e| VersionError::InvalidLabel {
            input: input.to_string(),
            message: e.to_string(),
        })?;

        Ok(Self {
            major: numbers[0],
            minor: numbers[1],
            patch: numbers[2],
            revision: numbers[3],
            pre,
            build,
            original: trimmed.to_string(),
        })
    }

    /// Returns true if this version carries a pre-release label
    pub fn is_prerelease(&self) -> bool {
        !self.pre.is_empty()
    }

    /// Returns the version as originally written
    pub fn as_str(&self) -> &str {
        &self.original
    }

    fn numeric(&self) -> (u64, u64, u64, u64) {
        (self.major, self.minor, self.patch, self.revision)
    }
}

/// `[1.2.3]` is NuGet's exact-version range; treat it as the version itself
fn unwrap_exact_range(text: &str) -> &str {
    match text.strip_prefix('[').and_then(|t| t.strip_suffix(']')) {
        Some(inner) if !inner.contains(',') => inner.trim(),
        _ => text,
    }
}

impl FromStr for NuGetVersion {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl PartialEq for NuGetVersion {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for NuGetVersion {}

impl Ord for NuGetVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        self.numeric()
            .cmp(&other.numeric())
            .then_with(|| self.pre.cmp(&other.pre))
    }
}

impl PartialOrd for NuGetVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for NuGetVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.original)
    }
}
