//! Project file detection
//!
//! Features:
//! - Detects .csproj, .vbproj and .fsproj files
//! - Optional recursive walk that skips hidden and build output directories
//! - Pairs each project with a sibling packages.config when present

use crate::error::IoError;
use std::path::{Path, PathBuf};
use tracing::warn;
use walkdir::{DirEntry, WalkDir};

/// Project file extensions recognized as manifests
const PROJECT_EXTENSIONS: &[&str] = &["csproj", "vbproj", "fsproj"];

/// Standalone package list file name
const PACKAGES_CONFIG: &str = "packages.config";

/// Directories never descended into during a recursive walk
const SKIPPED_DIRECTORIES: &[&str] = &["bin", "obj", "node_modules"];

/// A detected project file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectFile {
    /// Path to the project file
    pub path: PathBuf,
    /// Sibling packages.config, which takes precedence over the project file
    pub packages_config: Option<PathBuf>,
}

impl ProjectFile {
    /// Create a new ProjectFile without a packages.config
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            packages_config: None,
        }
    }

    /// Set the sibling packages.config (builder pattern)
    pub fn with_packages_config(mut self, packages_config: impl Into<PathBuf>) -> Self {
        self.packages_config = Some(packages_config.into());
        self
    }

    /// Project name (file stem of the project file)
    pub fn name(&self) -> String {
        self.path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }

    /// The file that will actually be parsed
    pub fn manifest_path(&self) -> &Path {
        self.packages_config.as_deref().unwrap_or(&self.path)
    }
}

/// Detect project files under the given root
///
/// The root may be a directory or a single project file. Results are sorted by
/// path so output order does not depend on the file system.
pub fn detect_projects(root: &Path, recursive: bool) -> Result<Vec<ProjectFile>, IoError> {
    if root.is_file() {
        return Ok(if is_project_file(root) {
            vec![with_sibling_packages_config(root)]
        } else {
            Vec::new()
        });
    }
    if !root.is_dir() {
        return Err(IoError::directory_not_found(root));
    }

    let max_depth = if recursive { usize::MAX } else { 1 };
    let walker = WalkDir::new(root)
        .max_depth(max_depth)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_skipped_directory(e));

    let mut projects = Vec::new();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("skipping unreadable path: {}", e);
                continue;
            }
        };
        if entry.file_type().is_file() && is_project_file(entry.path()) {
            projects.push(with_sibling_packages_config(entry.path()));
        }
    }

    projects.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(projects)
}

/// Check if a path has a project file extension
pub fn is_project_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| {
            PROJECT_EXTENSIONS
                .iter()
                .any(|ext| e.eq_ignore_ascii_case(ext))
        })
        .unwrap_or(false)
}

fn is_skipped_directory(entry: &DirEntry) -> bool {
    if !entry.file_type().is_dir() {
        return false;
    }
    let name = entry.file_name().to_string_lossy();
    name.starts_with('.')
        || SKIPPED_DIRECTORIES
            .iter()
            .any(|skipped| name.eq_ignore_ascii_case(skipped))
}

fn with_sibling_packages_config(project: &Path) -> ProjectFile {
    let info = ProjectFile::new(project);
    match project.parent().and_then(find_packages_config) {
        Some(packages_config) => info.with_packages_config(packages_config),
        None => info,
    }
}

/// Find packages.config in a directory, matching the file name case-insensitively
fn find_packages_config(dir: &Path) -> Option<PathBuf> {
    let exact = dir.join(PACKAGES_CONFIG);
    if exact.is_file() {
        return Some(exact);
    }

    std::fs::read_dir(dir)
        .ok()?
        .flatten()
        .map(|entry| entry.path())
        .find(|path| {
            path.is_file()
                && path
                    .file_name()
                    .and_then(|n| n.to_str())
                    .map(|n| n.eq_ignore_ascii_case(PACKAGES_CONFIG))
                    .unwrap_or(false)
        })
}
