//! SDK-style project parser
//!
//! Handles modern project files where package versions are attributes:
//!
//! ```xml
//! <Project Sdk="Microsoft.NET.Sdk">
//!   <ItemGroup>
//!     <PackageReference Include="Serilog" Version="2.10.0" />
//!   </ItemGroup>
//! </Project>
//! ```

use crate::domain::PackageReference;
use crate::error::ManifestError;
use crate::manifest::xml::XmlElement;
use crate::manifest::{ManifestParser, ParseOutcome, MSBUILD_NAMESPACE};
use std::path::Path;

/// Parser for SDK-style project files
pub struct SdkProjectParser;

impl ManifestParser for SdkProjectParser {
    fn schema(&self) -> &'static str {
        "SDK-style project"
    }

    fn parse(&self, path: &Path, document: &XmlElement) -> Result<ParseOutcome, ManifestError> {
        if !document.is("Project") {
            return Err(ManifestError::schema_mismatch(
                path,
                self.schema(),
                format!("root element is <{}>, expected <Project>", document.name),
            ));
        }
        if document.namespace() == Some(MSBUILD_NAMESPACE) {
            return Err(ManifestError::schema_mismatch(
                path,
                self.schema(),
                "project declares the MSBuild 2003 namespace",
            ));
        }

        let mut references = Vec::new();
        for item in document.descendants("PackageReference") {
            let id = item
                .attr("Include")
                .or_else(|| item.attr("Update"))
                .ok_or_else(|| {
                    ManifestError::schema_mismatch(
                        path,
                        self.schema(),
                        "<PackageReference> without Include",
                    )
                })?;

            let version = match item.attr("Version") {
                Some(version) => version,
                None if item.child("Version").is_some() => {
                    return Err(ManifestError::schema_mismatch(
                        path,
                        self.schema(),
                        format!("version of '{}' is a child element", id),
                    ));
                }
                // Centrally managed versions are not declared in the project
                None => "",
            };

            references.push(PackageReference::new(id, version, path));
        }

        Ok(ParseOutcome::Packages(references))
    }
}
