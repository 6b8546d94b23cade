//! Batch report data model
//!
//! One [`ItemReport`] per theme × template pair plus a [`Summary`], serialized
//! as pretty JSON so CI jobs can inspect what a run produced.

use crate::error::ThemeError;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Root structure of a report file
#[derive(Serialize, Debug, Clone, Default)]
pub struct BatchReport {
    /// Processed items, in processing order
    pub items: Vec<ItemReport>,

    /// Totals over `items`
    pub summary: Summary,
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Ok,
    Failed,
}

/// Result of generating one template for one theme
#[derive(Serialize, Debug, Clone)]
pub struct ItemReport {
    pub theme: String,

    /// Template file name, e.g. "top-button.png"
    pub file: String,

    pub status: Status,

    /// Written file, present on success
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,

    /// Error kind, present on failure (e.g. "decode", "encode")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<String>,

    /// Human-readable error message, present on failure
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Serialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
}

impl ItemReport {
    pub fn succeeded(theme: &str, file: &str, output: PathBuf) -> Self {
        ItemReport {
            theme: theme.to_string(),
            file: file.to_string(),
            status: Status::Ok,
            output: Some(output),
            error_kind: None,
            error: None,
        }
    }

    pub fn failed(theme: &str, file: &str, error: &ThemeError) -> Self {
        ItemReport {
            theme: theme.to_string(),
            file: file.to_string(),
            status: Status::Failed,
            output: None,
            error_kind: Some(error.kind().to_string()),
            error: Some(error.to_string()),
        }
    }
}

impl BatchReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an item, keeping the summary in sync
    pub fn push(&mut self, item: ItemReport) {
        self.summary.total += 1;
        match item.status {
            Status::Ok => self.summary.succeeded += 1,
            Status::Failed => self.summary.failed += 1,
        }
        self.items.push(item);
    }

    pub fn is_success(&self) -> bool {
        self.summary.failed == 0
    }

    pub fn failures(&self) -> impl Iterator<Item = &ItemReport> {
        self.items.iter().filter(|i| i.status == Status::Failed)
    }
}

/// Write the report as pretty JSON to `path`
pub fn write_report(path: &Path, report: &BatchReport) -> Result<(), ThemeError> {
    let report_err = |reason: String| ThemeError::ReportWrite {
        path: path.to_path_buf(),
        reason,
    };

    let json = serde_json::to_string_pretty(report).map_err(|e| report_err(e.to_string()))?;
    std::fs::write(path, json).map_err(|e| report_err(e.to_string()))?;

    Ok(())
}
