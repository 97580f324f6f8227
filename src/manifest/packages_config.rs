//! packages.config parser
//!
//! Handles the standalone package list used by pre-SDK projects:
//!
//! ```xml
//! <packages>
//!   <package id="Newtonsoft.Json" version="12.0.3" targetFramework="net472" />
//! </packages>
//! ```

use crate::domain::PackageReference;
use crate::error::ManifestError;
use crate::manifest::xml::XmlElement;
use crate::manifest::{ManifestParser, ParseOutcome};
use std::path::Path;

/// Parser for packages.config files
pub struct PackagesConfigParser;

impl ManifestParser for PackagesConfigParser {
    fn schema(&self) -> &'static str {
        "packages.config list"
    }

    fn parse(&self, path: &Path, document: &XmlElement) -> Result<ParseOutcome, ManifestError> {
        if !document.is("packages") {
            return Err(ManifestError::schema_mismatch(
                path,
                self.schema(),
                format!("root element is <{}>, expected <packages>", document.name),
            ));
        }

        let mut references = Vec::new();
        for package in document.children.iter().filter(|c| c.is("package")) {
            let id = package.attr("id").ok_or_else(|| {
                ManifestError::schema_mismatch(path, self.schema(), "<package> without id")
            })?;
            let version = package.attr("version").unwrap_or_default();
            references.push(PackageReference::new(id, version, path));
        }

        Ok(ParseOutcome::Packages(references))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::xml::parse_document;

    fn parse(content: &str) -> Result<ParseOutcome, ManifestError> {
        let path = Path::new("packages.config");
        let document = parse_document(path, content).unwrap();
        PackagesConfigParser.parse(path, &document)
    }

    #[test]
    fn test_parse_packages() {
        let outcome = parse(
            r#"<?xml version="1.0" encoding="utf-8"?>
<packages>
  <package id="Newtonsoft.Json" version="12.0.3" targetFramework="net472" />
  <package id="NUnit" version="3.12.0" targetFramework="net472" />
</packages>"#,
        )
        .unwrap();

        let ParseOutcome::Packages(references) = outcome else {
            panic!("expected packages");
        };
        assert_eq!(references.len(), 2);
        assert_eq!(references[0].id, "Newtonsoft.Json");
        assert_eq!(references[0].declared_version, "12.0.3");
        assert_eq!(references[1].id, "NUnit");
        assert_eq!(references[1].declaring_file, Path::new("packages.config"));
    }

    #[test]
    fn test_missing_version_is_empty() {
        let outcome = parse(r#"<packages><package id="A" /></packages>"#).unwrap();
        assert_eq!(
            outcome.references()[0].declared_version,
            "",
            "missing version should be kept as empty string"
        );
    }

    #[test]
    fn test_empty_list() {
        let outcome = parse("<packages />").unwrap();
        assert!(outcome.references().is_empty());
    }

    #[test]
    fn test_missing_id_is_schema_mismatch() {
        let result = parse(r#"<packages><package version="1.0.0" /></packages>"#);
        assert!(matches!(result, Err(ManifestError::SchemaMismatch { .. })));
    }

    #[test]
    fn test_wrong_root_is_schema_mismatch() {
        let result = parse("<Project />");
        assert!(matches!(result, Err(ManifestError::SchemaMismatch { .. })));
    }
}
