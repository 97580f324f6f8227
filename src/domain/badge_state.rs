//! Overall badge state for a scan

use super::{CodeProject, StatusKind};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The four discrete states a status badge can show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BadgeState {
    NotFound,
    NoLocalVersion,
    Outdated,
    UpToDate,
}

impl BadgeState {
    /// Reduce all projects to one state.
    ///
    /// Checked in priority order: not found, no local version, outdated,
    /// otherwise up to date.
    pub fn from_projects(projects: &[CodeProject]) -> Self {
        match projects.iter().filter_map(CodeProject::worst_kind).min() {
            Some(StatusKind::NotFound) => BadgeState::NotFound,
            Some(StatusKind::NoLocalVersion) => BadgeState::NoLocalVersion,
            Some(StatusKind::Outdated) => BadgeState::Outdated,
            Some(StatusKind::UpToDate) | None => BadgeState::UpToDate,
        }
    }

    /// Text shown on the right-hand side of the badge
    pub fn message(&self) -> &'static str {
        match self {
            BadgeState::NotFound => "not found",
            BadgeState::NoLocalVersion => "unknown version",
            BadgeState::Outdated => "outdated",
            BadgeState::UpToDate => "up to date",
        }
    }

    /// Badge background color for the message
    pub fn color(&self) -> &'static str {
        match self {
            BadgeState::NotFound => "#e05d44",
            BadgeState::NoLocalVersion => "#9f9f9f",
            BadgeState::Outdated => "#dfb317",
            BadgeState::UpToDate => "#4c1",
        }
    }
}

impl fmt::Display for BadgeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{PackageStatus, Resolution, ResolvedMetadata};

    fn found(latest: &str) -> Resolution {
        Resolution::Found(ResolvedMetadata {
            id: "pkg".to_string(),
            latest_version: latest.to_string(),
            project_url: None,
            registry: "test".to_string(),
        })
    }

    fn project(statuses: Vec<PackageStatus>) -> CodeProject {
        let mut project = CodeProject::new("App", "App.csproj");
        for status in statuses {
            project.add_status(status);
        }
        project
    }

    #[test]
    fn test_empty_is_up_to_date() {
        assert_eq!(BadgeState::from_projects(&[]), BadgeState::UpToDate);
    }

    #[test]
    fn test_not_found_beats_outdated() {
        let projects = vec![project(vec![
            PackageStatus::classify("A", "1.0.0", &found("2.0.0")),
            PackageStatus::classify("B", "1.0.0", &Resolution::NotFound),
        ])];
        assert_eq!(BadgeState::from_projects(&projects), BadgeState::NotFound);
    }

    #[test]
    fn test_no_local_version_beats_outdated() {
        let projects = vec![
            project(vec![PackageStatus::classify("A", "1.0.0", &found("2.0.0"))]),
            project(vec![PackageStatus::classify("B", "bogus", &found("2.0.0"))]),
        ];
        assert_eq!(
            BadgeState::from_projects(&projects),
            BadgeState::NoLocalVersion
        );
    }

    #[test]
    fn test_outdated_beats_up_to_date() {
        let projects = vec![project(vec![
            PackageStatus::classify("A", "1.0.0", &found("1.0.0")),
            PackageStatus::classify("B", "1.0.0", &found("1.0.1")),
        ])];
        assert_eq!(BadgeState::from_projects(&projects), BadgeState::Outdated);
    }

    #[test]
    fn test_all_up_to_date() {
        let projects = vec![project(vec![PackageStatus::classify(
            "A",
            "1.0.0",
            &found("1.0.0"),
        )])];
        assert_eq!(BadgeState::from_projects(&projects), BadgeState::UpToDate);
        assert_eq!(BadgeState::UpToDate.to_string(), "up to date");
    }
}
