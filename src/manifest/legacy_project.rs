//! Legacy packages.config project recognizer
//!
//! Old-style MSBuild 2003 projects without package references keep their
//! dependencies in a sibling packages.config. When this parser matches, that
//! file is missing: the project has nothing to report, which is not an error.

use crate::error::ManifestError;
use crate::manifest::xml::XmlElement;
use crate::manifest::{ManifestParser, ParseOutcome, MSBUILD_NAMESPACE};
use std::path::Path;

/// Recognizer for projects that expect an external packages.config
pub struct LegacyProjectParser;

impl ManifestParser for LegacyProjectParser {
    fn schema(&self) -> &'static str {
        "packages.config project"
    }

    fn parse(&self, path: &Path, document: &XmlElement) -> Result<ParseOutcome, ManifestError> {
        if document.is("Project") && document.namespace() == Some(MSBUILD_NAMESPACE) {
            Ok(ParseOutcome::MissingPackagesList)
        } else {
            Err(ManifestError::schema_mismatch(
                path,
                self.schema(),
                "expected <Project> in the MSBuild 2003 namespace",
            ))
        }
    }
}
