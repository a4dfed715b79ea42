//! Output formatter trait for CLI results.

use anyhow::Result;
use serde::Serialize;
use std::path::Path;
use zipbundle_core::BuildReport;

/// Download headers of an archive, ready for display.
#[derive(Debug, Serialize)]
pub struct HeadersView {
    pub path: String,
    pub headers: Vec<(String, String)>,
}

/// Common output formatter trait
pub trait OutputFormatter {
    /// Format a finished archive build
    fn format_build_result(&self, output_path: &Path, report: &BuildReport) -> Result<()>;

    /// Format download headers
    fn format_headers(&self, view: &HeadersView) -> Result<()>;

    /// Format error message
    fn format_error(&self, error: &anyhow::Error);

    /// Format success message
    #[allow(dead_code)]
    fn format_success(&self, message: &str);

    /// Format warning message
    fn format_warning(&self, message: &str);
}

/// Generic JSON output structure
#[derive(Debug, Serialize)]
pub struct JsonOutput<T> {
    pub operation: String,
    pub status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Error,
}

impl<T: Serialize> JsonOutput<T> {
    pub fn success(operation: impl Into<String>, data: T) -> Self {
        Self {
            operation: operation.into(),
            status: Status::Success,
            data: Some(data),
            error: None,
        }
    }
}

impl JsonOutput<()> {
    pub fn error(operation: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            status: Status::Error,
            data: None,
            error: Some(error.into()),
        }
    }
}
