//! Text output formatter for human-readable display
//!
//! This module provides:
//! - Per-project package status tables with colors
//! - Parse failure and lookup error display
//! - Summary with a breakdown by status

use crate::domain::{CodeProject, PackageStatus, ScanSummary, StatusKind};
use crate::orchestrator::ScanResult;
use crate::output::{OutputFormatter, Verbosity};
use colored::{ColoredString, Colorize};
use std::io::Write;

/// Minimum width of the package column
const MIN_NAME_WIDTH: usize = 20;

/// Text formatter for human-readable output
pub struct TextFormatter {
    /// Verbosity level
    verbosity: Verbosity,
    /// Whether to use colors
    color: bool,
}

impl TextFormatter {
    /// Create a new text formatter
    pub fn new(verbosity: Verbosity) -> Self {
        Self {
            verbosity,
            color: true,
        }
    }

    /// Create a new text formatter with color option
    pub fn with_color(verbosity: Verbosity, color: bool) -> Self {
        Self { verbosity, color }
    }

    fn colored_kind(kind: StatusKind) -> ColoredString {
        match kind {
            StatusKind::NotFound => kind.label().red().bold(),
            StatusKind::NoLocalVersion => kind.label().dimmed(),
            StatusKind::Outdated => kind.label().yellow(),
            StatusKind::UpToDate => kind.label().green(),
        }
    }

    /// Packages worth showing at the current verbosity
    fn visible<'a>(&self, project: &'a CodeProject) -> Vec<&'a PackageStatus> {
        project
            .packages
            .iter()
            .filter(|p| self.verbosity == Verbosity::Verbose || !p.is_up_to_date())
            .collect()
    }

    /// Format a single package line
    fn format_package_line(
        &self,
        status: &PackageStatus,
        name_width: usize,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        let declared = if status.declared_version.is_empty() {
            "-"
        } else {
            status.declared_version.as_str()
        };
        let current = status.current_version.as_deref().unwrap_or("?");
        let kind = status.kind();

        if self.color {
            let name_display = format!("{:width$}", status.label, width = name_width);
            writeln!(
                writer,
                "  {} {} {} {} [{}]",
                name_display,
                declared.dimmed(),
                "→".dimmed(),
                current.bright_white().bold(),
                Self::colored_kind(kind)
            )?;
        } else {
            writeln!(
                writer,
                "  {:width$} {} -> {} [{}]",
                status.label,
                declared,
                current,
                kind.label(),
                width = name_width
            )?;
        }

        if let Some(error) = &status.lookup_error {
            if self.color {
                writeln!(writer, "    {}", error.dimmed())?;
            } else {
                writeln!(writer, "    {}", error)?;
            }
        }
        Ok(())
    }

    fn write_count(
        &self,
        writer: &mut dyn Write,
        count: usize,
        label: &str,
        paint: fn(&str) -> ColoredString,
    ) -> std::io::Result<()> {
        if count == 0 {
            return Ok(());
        }
        if self.color {
            writeln!(writer, "  {} {}", paint(&count.to_string()), label)
        } else {
            writeln!(writer, "  {} {}", count, label)
        }
    }
}

impl OutputFormatter for TextFormatter {
    fn format(&self, result: &ScanResult, writer: &mut dyn Write) -> std::io::Result<()> {
        let summary = result.summary();

        // In quiet mode, only show summary
        if self.verbosity == Verbosity::Quiet {
            return self.format_summary(&summary, writer);
        }

        for project in &result.projects {
            self.format_project(project, writer)?;
        }

        if !result.errors.is_empty() {
            if self.color {
                writeln!(writer, "{}:", "Errors".red().bold())?;
            } else {
                writeln!(writer, "Errors:")?;
            }
            for error in &result.errors {
                if self.color {
                    writeln!(writer, "  {} {}", "✗".red(), error)?;
                } else {
                    writeln!(writer, "  - {}", error)?;
                }
            }
            writeln!(writer)?;
        }

        self.format_summary(&summary, writer)
    }

    fn format_summary(
        &self,
        summary: &ScanSummary,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        let attention = summary.packages - summary.up_to_date;

        if self.verbosity == Verbosity::Quiet {
            let line = if attention == 0 && summary.parsing_errors == 0 {
                "All packages up to date".to_string()
            } else {
                format!(
                    "{} of {} package(s) need attention, {} parse error(s)",
                    attention, summary.packages, summary.parsing_errors
                )
            };
            if self.color {
                writeln!(writer, "{}", line.dimmed())?;
            } else {
                writeln!(writer, "{}", line)?;
            }
            return Ok(());
        }

        if self.color {
            writeln!(writer, "{}:", "Summary".bold())?;
        } else {
            writeln!(writer, "Summary:")?;
        }
        let header = format!(
            "{} package(s) in {} project(s)",
            summary.packages, summary.projects
        );
        writeln!(writer, "  {}", header)?;

        self.write_count(writer, summary.up_to_date, "up to date", |s| s.green())?;
        self.write_count(writer, summary.outdated, "outdated", |s| s.yellow())?;
        self.write_count(writer, summary.no_local_version, "no local version", |s| {
            s.dimmed()
        })?;
        self.write_count(writer, summary.not_found, "not found", |s| s.red())?;
        self.write_count(writer, summary.parsing_errors, "parse error(s)", |s| {
            s.red().bold()
        })?;
        Ok(())
    }

    fn format_project(
        &self,
        project: &CodeProject,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        let visible = self.visible(project);
        let path_display = project.manifest_path.display().to_string();

        if project.parsing_error {
            if self.color {
                writeln!(
                    writer,
                    "{} {} {}",
                    project.name.bold(),
                    format!("({})", path_display).dimmed(),
                    "failed to parse".red()
                )?;
            } else {
                writeln!(writer, "{} ({}) failed to parse", project.name, path_display)?;
            }
            writeln!(writer)?;
            return Ok(());
        }

        // Skip projects with nothing to show
        if visible.is_empty() && self.verbosity != Verbosity::Verbose {
            return Ok(());
        }

        let count = project.packages.len();
        let noun = if count == 1 { "package" } else { "packages" };
        if self.color {
            writeln!(
                writer,
                "{} {} {} {}",
                project.name.bold(),
                format!("({})", path_display).dimmed(),
                count.to_string().cyan(),
                noun
            )?;
        } else {
            writeln!(
                writer,
                "{} ({}) {} {}",
                project.name, path_display, count, noun
            )?;
        }

        let name_width = visible
            .iter()
            .map(|p| p.label.chars().count())
            .max()
            .unwrap_or(0)
            .max(MIN_NAME_WIDTH);
        for status in visible {
            self.format_package_line(status, name_width, writer)?;
        }

        writeln!(writer)?;
        Ok(())
    }
}
