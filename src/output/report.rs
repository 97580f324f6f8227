//! Standalone HTML report
//!
//! One table per project, one row per package. Rows carry the status CSS class
//! (`not-found`, `no-local-version`, `outdated`, `up-to-date`) so an external
//! stylesheet can restyle the report.

use crate::domain::{CodeProject, PackageStatus, ScanSummary};
use crate::error::IoError;
use chrono::{DateTime, Utc};
use reqwest::Url;
use std::path::Path;

const TITLE: &str = "NuGet dependency report";

const DEFAULT_STYLE: &str = "body{font-family:sans-serif;margin:2em}\
table{border-collapse:collapse;margin-bottom:2em}\
th,td{border:1px solid #ccc;padding:4px 8px;text-align:left}\
tr.not-found td{background:#f9d6d0}\
tr.no-local-version td{background:#e6e6e6}\
tr.outdated td{background:#fbf0c4}\
tr.up-to-date td{background:#d9f2d0}\
.parse-error{color:#e05d44}";

/// Escape text for use in HTML content and attribute values
pub fn html_escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Render the report document
pub fn render_report(
    projects: &[CodeProject],
    css_url: Option<&str>,
    generated_at: DateTime<Utc>,
) -> String {
    let summary = ScanSummary::from_projects(projects);
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str(&format!("<title>{}</title>\n", TITLE));
    match css_url {
        Some(url) => html.push_str(&format!(
            "<link rel=\"stylesheet\" href=\"{}\">\n",
            html_escape(url)
        )),
        None => html.push_str(&format!("<style>{}</style>\n", DEFAULT_STYLE)),
    }
    html.push_str("</head>\n<body>\n");
    html.push_str(&format!("<h1>{}</h1>\n", TITLE));
    html.push_str(&format!(
        "<p class=\"generated\">Generated {}</p>\n",
        generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    html.push_str(&format!(
        "<p class=\"summary\">{} package(s) in {} project(s): {} up to date, {} outdated, \
         {} no local version, {} not found, {} parse error(s)</p>\n",
        summary.packages,
        summary.projects,
        summary.up_to_date,
        summary.outdated,
        summary.no_local_version,
        summary.not_found,
        summary.parsing_errors
    ));

    for project in projects {
        render_project(&mut html, project);
    }

    html.push_str("</body>\n</html>\n");
    html
}

fn render_project(html: &mut String, project: &CodeProject) {
    html.push_str("<section class=\"project\">\n");
    html.push_str(&format!("<h2>{}</h2>\n", html_escape(&project.name)));
    html.push_str(&format!(
        "<p class=\"manifest\">{}</p>\n",
        html_escape(&project.manifest_path.display().to_string())
    ));

    if project.parsing_error {
        html.push_str("<p class=\"parse-error\">The manifest could not be parsed.</p>\n");
    } else if project.packages.is_empty() {
        html.push_str("<p class=\"empty\">No package references.</p>\n");
    } else {
        html.push_str(
            "<table>\n<thead><tr><th>Package</th><th>Declared</th><th>Latest</th><th>Status</th></tr></thead>\n<tbody>\n",
        );
        for status in &project.packages {
            render_row(html, status);
        }
        html.push_str("</tbody>\n</table>\n");
    }

    html.push_str("</section>\n");
}

fn render_row(html: &mut String, status: &PackageStatus) {
    let kind = status.kind();
    let label = html_escape(&status.label);
    let name = match status.project_url.as_deref().filter(|url| is_web_link(url)) {
        Some(url) => format!("<a href=\"{}\">{}</a>", html_escape(url), label),
        None => label,
    };
    let mut state = kind.label().to_string();
    if let Some(error) = &status.lookup_error {
        state.push_str(&format!(" ({})", error));
    }

    html.push_str(&format!(
        "<tr class=\"{}\"><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
        kind.css_class(),
        name,
        html_escape(&status.declared_version),
        html_escape(status.current_version.as_deref().unwrap_or("")),
        html_escape(&state)
    ));
}

/// Project URLs come from the registry; only http(s) ones become links
fn is_web_link(url: &str) -> bool {
    Url::parse(url).is_ok_and(|parsed| matches!(parsed.scheme(), "http" | "https"))
}

/// Render the report and write it to `path`
pub fn write_report(
    path: &Path,
    projects: &[CodeProject],
    css_url: Option<&str>,
) -> Result<(), IoError> {
    let html = render_report(projects, css_url, Utc::now());
    std::fs::write(path, html).map_err(|e| IoError::generic(path, e))
}
