//! Cross-project merge for combined mode
//!
//! References from every manifest are grouped by package id (case-insensitive,
//! first-seen order). Identical declared versions collapse into one entry.
//! A group that ends with a single entry lands in the shared "Combined"
//! project; a group with diverging versions gets a project of its own, with
//! one status per version labelled by the file that declares it.

use crate::domain::{CodeProject, PackageReference, PackageStatus, Resolution};
use indexmap::IndexMap;
use std::path::Path;

/// Name of the synthetic project holding packages declared consistently
pub const COMBINED_PROJECT_NAME: &str = "Combined";

/// All distinct declarations of one package id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageGroup {
    /// Package id as first seen
    pub id: String,
    /// One reference per distinct declared version, in first-seen order
    pub references: Vec<PackageReference>,
}

impl PackageGroup {
    /// Returns true if the id is declared with more than one version
    pub fn is_divergent(&self) -> bool {
        self.references.len() > 1
    }
}

/// Group references by id and drop repeated declarations
pub fn group_references(references: impl IntoIterator<Item = PackageReference>) -> Vec<PackageGroup> {
    let mut groups: IndexMap<String, PackageGroup> = IndexMap::new();

    for reference in references {
        let group = groups
            .entry(reference.group_key())
            .or_insert_with(|| PackageGroup {
                id: reference.id.clone(),
                references: Vec::new(),
            });

        let duplicate = group
            .references
            .iter()
            .any(|r| r.declared_version == reference.declared_version);
        if !duplicate {
            group.references.push(reference);
        }
    }

    groups.into_values().collect()
}

/// Build the synthetic projects from resolved groups
///
/// The "Combined" project always comes first, followed by one project per
/// divergent id in group order.
pub fn build_projects(root: &Path, resolved: Vec<(PackageGroup, Resolution)>) -> Vec<CodeProject> {
    let mut combined = CodeProject::new(COMBINED_PROJECT_NAME, root);
    let mut divergent = Vec::new();

    for (group, resolution) in resolved {
        if group.is_divergent() {
            let mut project = CodeProject::new(&group.id, root);
            for reference in &group.references {
                let label = reference.file().display().to_string();
                project.add_status(
                    PackageStatus::classify(&reference.id, &reference.declared_version, &resolution)
                        .with_label(label),
                );
            }
            divergent.push(project);
        } else if let Some(reference) = group.references.first() {
            combined.add_status(PackageStatus::classify(
                &reference.id,
                &reference.declared_version,
                &resolution,
            ));
        }
    }

    let mut projects = Vec::with_capacity(divergent.len() + 1);
    projects.push(combined);
    projects.extend(divergent);
    projects
}
