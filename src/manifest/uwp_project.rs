//! Legacy UWP project parser
//!
//! UWP projects keep the MSBuild 2003 format but reference packages directly,
//! with the version as a child element:
//!
//! ```xml
//! <Project ToolsVersion="14.0" xmlns="http://schemas.microsoft.com/developer/msbuild/2003">
//!   <ItemGroup>
//!     <PackageReference Include="Microsoft.NETCore.UniversalWindowsPlatform">
//!       <Version>6.2.10</Version>
//!     </PackageReference>
//!   </ItemGroup>
//! </Project>
//! ```

use crate::domain::PackageReference;
use crate::error::ManifestError;
use crate::manifest::xml::XmlElement;
use crate::manifest::{ManifestParser, ParseOutcome, MSBUILD_NAMESPACE};
use std::path::Path;

/// Parser for UWP project files
pub struct UwpProjectParser;

impl ManifestParser for UwpProjectParser {
    fn schema(&self) -> &'static str {
        "UWP project"
    }

    fn parse(&self, path: &Path, document: &XmlElement) -> Result<ParseOutcome, ManifestError> {
        if !document.is("Project") || document.namespace() != Some(MSBUILD_NAMESPACE) {
            return Err(ManifestError::schema_mismatch(
                path,
                self.schema(),
                "expected <Project> in the MSBuild 2003 namespace",
            ));
        }

        let items = document.descendants("PackageReference");
        if items.is_empty() {
            return Err(ManifestError::schema_mismatch(
                path,
                self.schema(),
                "no <PackageReference> items",
            ));
        }

        let mut references = Vec::with_capacity(items.len());
        for item in items {
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
            let version = item
                .child("Version")
                .map(|v| v.text.trim())
                .or_else(|| item.attr("Version"))
                .unwrap_or_default();
            references.push(PackageReference::new(id, version, path));
        }

        Ok(ParseOutcome::Packages(references))
    }
}
