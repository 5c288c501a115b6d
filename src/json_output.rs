//! JSON output for machine consumers
//!
//! When --json-progress is enabled, progress and per-file outcomes are
//! emitted as JSON lines to stdout instead of the progress bar.

use serde::{Deserialize, Serialize};

use crate::image_processing::batch::{BatchReport, FileOutcome, ProgressSink};

#[derive(Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum JsonMessage {
    /// Percent complete, 100 once the batch is done
    Progress { percent: f64 },
    /// Output file written
    FileCompleted {
        input_path: String,
        output_path: String,
    },
    /// Input left without output
    FileSkipped { input_path: String, reason: String },
    /// Output could not be written
    FileFailed { input_path: String, error: String },
    /// Processing summary
    Summary {
        total_files: usize,
        written: usize,
        skipped: usize,
        failed: usize,
        duration_secs: f64,
    },
}

impl JsonMessage {
    /// Emit JSON message to stdout
    pub fn emit(&self) {
        if let Ok(json) = serde_json::to_string(self) {
            println!("{}", json);
        }
    }

    /// One message per file followed by the summary
    pub fn from_report(report: &BatchReport) -> Vec<JsonMessage> {
        let mut messages: Vec<JsonMessage> = report
            .entries
            .iter()
            .map(|(input, outcome)| {
                let input_path = input.display().to_string();
                match outcome {
                    FileOutcome::Written { output } => JsonMessage::FileCompleted {
                        input_path,
                        output_path: output.display().to_string(),
                    },
                    FileOutcome::SkippedUnreadable { reason }
                    | FileOutcome::SkippedDegenerate { reason } => JsonMessage::FileSkipped {
                        input_path,
                        reason: reason.clone(),
                    },
                    FileOutcome::Failed { reason } => JsonMessage::FileFailed {
                        input_path,
                        error: reason.clone(),
                    },
                }
            })
            .collect();

        messages.push(JsonMessage::Summary {
            total_files: report.total(),
            written: report.written(),
            skipped: report.skipped(),
            failed: report.failed(),
            duration_secs: report.duration.as_secs_f64(),
        });
        messages
    }
}

/// Progress sink printing a JSON line per update
pub struct JsonProgress;

impl ProgressSink for JsonProgress {
    fn report(&self, percent: f64) {
        JsonMessage::Progress { percent }.emit();
    }
}
