use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::evaluation::domain::evaluation_report::EvaluationReport;
use crate::evaluation::domain::report_writer::{ReportError, ReportWriter};

const MAX_SUFFIX: u32 = 1000;

/// Writes pretty-printed JSON reports named `report_<timestamp>.json`.
///
/// Files are created exclusively. When a report with the same timestamp
/// already exists a numeric suffix is appended (`report_<timestamp>_1.json`).
pub struct JsonReportWriter {
    output_dir: PathBuf,
}

impl JsonReportWriter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    fn file_name(timestamp: &str, attempt: u32) -> String {
        if attempt == 0 {
            format!("report_{timestamp}.json")
        } else {
            format!("report_{timestamp}_{attempt}.json")
        }
    }
}

impl ReportWriter for JsonReportWriter {
    fn write(&self, report: &EvaluationReport) -> Result<PathBuf, ReportError> {
        fs::create_dir_all(&self.output_dir).map_err(|source| ReportError::CreateDir {
            path: self.output_dir.clone(),
            source,
        })?;
        let body = serde_json::to_string_pretty(report)?;

        for attempt in 0..=MAX_SUFFIX {
            let path = self
                .output_dir
                .join(Self::file_name(&report.timestamp_utc, attempt));
            match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(file) => {
                    write_or_remove(&path, file, body.as_bytes())?;
                    log::info!("Saved report to {}", path.display());
                    return Ok(path);
                }
                Err(e) if e.kind() == io::ErrorKind::AlreadyExists => continue,
                Err(source) => return Err(ReportError::Write { path, source }),
            }
        }

        Err(ReportError::Write {
            path: self.output_dir.clone(),
            source: io::Error::new(io::ErrorKind::AlreadyExists, "report name space exhausted"),
        })
    }
}

/// Writes `body` to the freshly created `path`, deleting it again if the
/// write fails so no partial report is left behind.
fn write_or_remove(path: &Path, mut file: impl Write, body: &[u8]) -> Result<(), ReportError> {
    let result = file
        .write_all(body)
        .and_then(|()| file.write_all(b"\n"))
        .and_then(|()| file.flush());
    drop(file);
    result.map_err(|source| {
        if let Err(e) = fs::remove_file(path) {
            log::warn!("Could not remove partial report {}: {e}", path.display());
        }
        ReportError::Write {
            path: path.to_path_buf(),
            source,
        }
    })
}
