//! JSON output formatter for machine processing
//!
//! Emits `{summary, projects, errors}` with the same project and status
//! fields as the CI attachment.

use crate::domain::{CodeProject, ScanSummary};
use crate::orchestrator::{ScanError, ScanResult};
use crate::output::OutputFormatter;
use serde::Serialize;
use std::io::Write;

/// JSON formatter for machine-readable output
#[derive(Debug, Default)]
pub struct JsonFormatter;

impl JsonFormatter {
    /// Create a new JSON formatter
    pub fn new() -> Self {
        Self
    }
}

/// JSON representation of the full result
#[derive(Serialize)]
struct JsonOutput<'a> {
    summary: ScanSummary,
    projects: &'a [CodeProject],
    errors: &'a [ScanError],
}

fn write_json<T: Serialize>(value: &T, writer: &mut dyn Write) -> std::io::Result<()> {
    serde_json::to_writer_pretty(&mut *writer, value)?;
    writeln!(writer)
}

impl OutputFormatter for JsonFormatter {
    fn format(&self, result: &ScanResult, writer: &mut dyn Write) -> std::io::Result<()> {
        let output = JsonOutput {
            summary: result.summary(),
            projects: &result.projects,
            errors: &result.errors,
        };
        write_json(&output, writer)
    }

    fn format_summary(
        &self,
        summary: &ScanSummary,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        write_json(summary, writer)
    }

    fn format_project(
        &self,
        project: &CodeProject,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        write_json(project, writer)
    }
}
