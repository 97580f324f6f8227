//! Manifest file detection and parsing
//!
//! This module provides functionality to:
//! - Detect project files in a directory tree
//! - Parse package references from the supported XML schemas
//! - Fall back through project schemas in a fixed order

mod detector;
mod legacy_project;
mod packages_config;
mod sdk_project;
mod uwp_project;
pub mod xml;

pub use detector::{detect_projects, is_project_file, ProjectFile};
pub use legacy_project::LegacyProjectParser;
pub use packages_config::PackagesConfigParser;
pub use sdk_project::SdkProjectParser;
pub use uwp_project::UwpProjectParser;

use crate::domain::PackageReference;
use crate::error::ManifestError;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use xml::XmlElement;

/// Default namespace of pre-SDK MSBuild project files
pub const MSBUILD_NAMESPACE: &str = "http://schemas.microsoft.com/developer/msbuild/2003";

/// Result of a successful schema match
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseOutcome {
    /// The manifest declares these packages
    Packages(Vec<PackageReference>),
    /// The project expects a packages.config that does not exist
    MissingPackagesList,
}

impl ParseOutcome {
    /// Returns the declared references (empty for a missing packages list)
    pub fn references(&self) -> &[PackageReference] {
        match self {
            ParseOutcome::Packages(references) => references,
            ParseOutcome::MissingPackagesList => &[],
        }
    }
}

/// Trait for parsing one manifest schema
pub trait ManifestParser {
    /// Human-readable schema name, used in error messages
    fn schema(&self) -> &'static str;

    /// Extract package references, or fail if the document has a different shape
    fn parse(&self, path: &Path, document: &XmlElement) -> Result<ParseOutcome, ManifestError>;
}

/// Project file schemas in the order they are attempted
pub fn project_parsers() -> [&'static dyn ManifestParser; 3] {
    [&SdkProjectParser, &UwpProjectParser, &LegacyProjectParser]
}

/// Parse a project document with the first schema that matches
pub fn parse_project(path: &Path, document: &XmlElement) -> Result<ParseOutcome, ManifestError> {
    let mut last_error = None;

    for parser in project_parsers() {
        match parser.parse(path, document) {
            Ok(outcome) => {
                debug!("{} parsed as {}", path.display(), parser.schema());
                return Ok(outcome);
            }
            Err(e) => {
                debug!("{}", e);
                last_error = Some(e);
            }
        }
    }

    Err(last_error.unwrap_or_else(|| {
        ManifestError::schema_mismatch(path, "project", "no project schema matched")
    }))
}

/// A manifest after parsing, ready for resolution
#[derive(Debug)]
pub struct ScannedManifest {
    /// Project name
    pub name: String,
    /// File that was parsed
    pub manifest_path: PathBuf,
    /// Parse result
    pub outcome: Result<ParseOutcome, ManifestError>,
}

impl ScannedManifest {
    /// Returns the declared references, empty on failure
    pub fn references(&self) -> &[PackageReference] {
        match &self.outcome {
            Ok(outcome) => outcome.references(),
            Err(_) => &[],
        }
    }

    /// Returns true if the manifest could not be parsed
    pub fn has_parsing_error(&self) -> bool {
        self.outcome.is_err()
    }
}

/// Read and parse the manifest of a detected project
///
/// Never fails: problems are recorded in the returned outcome.
pub fn collect(project: &ProjectFile) -> ScannedManifest {
    let manifest_path = project.manifest_path().to_path_buf();
    let outcome = read_and_parse(project, &manifest_path);

    match &outcome {
        Ok(ParseOutcome::Packages(references)) => info!(
            "{}: {} package reference(s)",
            manifest_path.display(),
            references.len()
        ),
        Ok(ParseOutcome::MissingPackagesList) => info!(
            "{} expects a packages.config, none found",
            project.path.display()
        ),
        Err(e) => warn!("{}", e),
    }

    ScannedManifest {
        name: project.name(),
        manifest_path,
        outcome,
    }
}

fn read_and_parse(project: &ProjectFile, path: &Path) -> Result<ParseOutcome, ManifestError> {
    let content =
        std::fs::read_to_string(path).map_err(|e| ManifestError::read_error(path, e))?;
    let document = xml::parse_document(path, &content)?;

    if project.packages_config.is_some() {
        PackagesConfigParser.parse(path, &document)
    } else {
        parse_project(path, &document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn document(content: &str) -> XmlElement {
        xml::parse_document(Path::new("test.csproj"), content).unwrap()
    }

    #[test]
    fn test_parser_order() {
        let schemas: Vec<_> = project_parsers().iter().map(|p| p.schema()).collect();
        assert_eq!(
            schemas,
            vec!["SDK-style project", "UWP project", "packages.config project"]
        );
    }

    #[test]
    fn test_parse_project_sdk() {
        let doc = document(
            r#"<Project Sdk="Microsoft.NET.Sdk"><ItemGroup><PackageReference Include="A" Version="1.0.0" /></ItemGroup></Project>"#,
        );
        let outcome = parse_project(Path::new("test.csproj"), &doc).unwrap();
        assert_eq!(outcome.references().len(), 1);
    }

    #[test]
    fn test_parse_project_falls_back_to_uwp() {
        let doc = document(&format!(
            r#"<Project xmlns="{}"><ItemGroup><PackageReference Include="A"><Version>1.0.0</Version></PackageReference></ItemGroup></Project>"#,
            MSBUILD_NAMESPACE
        ));
        let outcome = parse_project(Path::new("test.csproj"), &doc).unwrap();
        assert_eq!(outcome.references()[0].declared_version, "1.0.0");
    }

    #[test]
    fn test_parse_project_falls_back_to_legacy() {
        let doc = document(&format!(
            r#"<Project xmlns="{}"><ItemGroup><Reference Include="System" /></ItemGroup></Project>"#,
            MSBUILD_NAMESPACE
        ));
        let outcome = parse_project(Path::new("test.csproj"), &doc).unwrap();
        assert_eq!(outcome, ParseOutcome::MissingPackagesList);
    }

    #[test]
    fn test_parse_project_no_schema_matches() {
        let doc = document("<Solution />");
        let result = parse_project(Path::new("test.csproj"), &doc);
        assert!(matches!(result, Err(ManifestError::SchemaMismatch { .. })));
    }

    #[test]
    fn test_collect_prefers_packages_config() {
        let dir = TempDir::new().unwrap();
        let project_path = dir.path().join("Legacy.csproj");
        let config_path = dir.path().join("packages.config");
        fs::write(
            &project_path,
            format!(r#"<Project xmlns="{}" />"#, MSBUILD_NAMESPACE),
        )
        .unwrap();
        fs::write(
            &config_path,
            r#"<packages><package id="NUnit" version="3.12.0" /></packages>"#,
        )
        .unwrap();

        let project = ProjectFile::new(&project_path).with_packages_config(&config_path);
        let scanned = collect(&project);

        assert_eq!(scanned.name, "Legacy");
        assert_eq!(scanned.manifest_path, config_path);
        assert!(!scanned.has_parsing_error());
        assert_eq!(scanned.references()[0].id, "NUnit");
    }

    #[test]
    fn test_collect_records_parse_errors() {
        let dir = TempDir::new().unwrap();
        let project_path = dir.path().join("Broken.csproj");
        fs::write(&project_path, "<Project><ItemGroup></Project>").unwrap();

        let scanned = collect(&ProjectFile::new(&project_path));
        assert!(scanned.has_parsing_error());
        assert!(scanned.references().is_empty());
    }

    #[test]
    fn test_collect_records_read_errors() {
        let scanned = collect(&ProjectFile::new("/definitely/not/here/App.csproj"));
        assert!(matches!(
            scanned.outcome,
            Err(ManifestError::ReadError { .. })
        ));
    }
}
