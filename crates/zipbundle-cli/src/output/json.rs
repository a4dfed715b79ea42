//! JSON output formatter for machine-readable results.

use super::formatter::HeadersView;
use super::formatter::JsonOutput;
use super::formatter::OutputFormatter;
use anyhow::Result;
use serde::Serialize;
use std::collections::BTreeMap;
use std::io::Write;
use std::io::{self};
use std::path::Path;
use zipbundle_core::BuildReport;

pub struct JsonFormatter;

impl JsonFormatter {
    fn output<T: Serialize>(value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        writeln!(io::stdout(), "{json}")?;
        Ok(())
    }
}

#[derive(Serialize)]
struct BuildOutput {
    output_path: String,
    files_added: usize,
    directories_added: usize,
    entries_skipped: usize,
    bytes_read: u64,
    archive_size: u64,
    compression_ratio: f64,
    prefix_stripped: bool,
    duration_ms: u128,
}

impl BuildOutput {
    fn new(output_path: &Path, report: &BuildReport) -> Self {
        Self {
            output_path: output_path.display().to_string(),
            files_added: report.files_added,
            directories_added: report.directories_added,
            entries_skipped: report.entries_skipped,
            bytes_read: report.bytes_read,
            archive_size: report.archive_size,
            compression_ratio: report.compression_ratio(),
            prefix_stripped: report.prefix_stripped,
            duration_ms: report.duration.as_millis(),
        }
    }
}

#[derive(Serialize)]
struct HeadersOutput<'a> {
    path: &'a str,
    headers: BTreeMap<&'a str, &'a str>,
}

#[derive(Serialize)]
struct MessageData {
    message: String,
}

impl OutputFormatter for JsonFormatter {
    fn format_build_result(&self, output_path: &Path, report: &BuildReport) -> Result<()> {
        let output = JsonOutput::success("create", BuildOutput::new(output_path, report));
        Self::output(&output)
    }

    fn format_headers(&self, view: &HeadersView) -> Result<()> {
        let data = HeadersOutput {
            path: &view.path,
            headers: view
                .headers
                .iter()
                .map(|(name, value)| (name.as_str(), value.as_str()))
                .collect(),
        };
        Self::output(&JsonOutput::success("headers", data))
    }

    fn format_error(&self, error: &anyhow::Error) {
        let output = JsonOutput::<()>::error("error", format!("{error:?}"));
        let _ = Self::output(&output);
    }

    fn format_success(&self, message: &str) {
        let output = JsonOutput::success(
            "success",
            MessageData {
                message: message.to_string(),
            },
        );
        let _ = Self::output(&output);
    }

    fn format_warning(&self, message: &str) {
        let output = JsonOutput::success(
            "warning",
            MessageData {
                message: message.to_string(),
            },
        );
        let _ = Self::output(&output);
    }
}
