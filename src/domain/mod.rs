//! Core domain models for nuscan
//!
//! This module contains the fundamental types used throughout the application:
//! - NuGet version parsing and precedence
//! - Package references declared by manifests
//! - Registry resolution outcomes
//! - Package status classification
//! - Project and summary structures

mod badge_state;
mod code_project;
mod package_reference;
mod package_status;
mod resolution;
mod version;

pub use badge_state::BadgeState;
pub use code_project::{CodeProject, ScanSummary};
pub use package_reference::PackageReference;
pub use package_status::{PackageStatus, StatusKind};
pub use resolution::{Resolution, ResolvedMetadata};
pub use version::NuGetVersion;
