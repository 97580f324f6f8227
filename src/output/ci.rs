//! CI build attachment
//!
//! Writes the full project list as JSON and builds the logging command that
//! asks the build agent to attach it to the run.

use crate::domain::CodeProject;
use crate::error::IoError;
use std::path::{Path, PathBuf};

/// File name of the attachment, written to the working directory
pub const CI_ATTACHMENT_FILE: &str = "nuscan-result.json";

const ATTACHMENT_TYPE: &str = "nuscanResult";
const ATTACHMENT_NAME: &str = "nuscan-result";

/// Write the attachment into `dir`, returning its absolute path
pub fn write_attachment(dir: &Path, projects: &[CodeProject]) -> Result<PathBuf, IoError> {
    let path = dir.join(CI_ATTACHMENT_FILE);
    let json = serde_json::to_string_pretty(projects)
        .map_err(|e| IoError::generic(&path, std::io::Error::other(e)))?;
    std::fs::write(&path, json).map_err(|e| IoError::generic(&path, e))?;
    std::path::absolute(&path).map_err(|e| IoError::generic(&path, e))
}

/// Logging command announcing the attachment
pub fn attachment_marker(path: &Path) -> String {
    format!(
        "##vso[task.addattachment type={};name={};]{}",
        ATTACHMENT_TYPE,
        ATTACHMENT_NAME,
        path.display()
    )
}
