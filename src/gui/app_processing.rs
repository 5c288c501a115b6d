// Processing glue for the GUI
// Validates the form, hands the batch to a worker thread and polls its progress

use super::{ResizerApp, SizeChoice};
use image_resizer::{spawn_batch, BatchConfig, TargetSize};

impl ResizerApp {
    pub(crate) fn start_processing(&mut self, choice: SizeChoice) {
        self.error_message.clear();

        if self.input_path.trim().is_empty() || self.output_path.trim().is_empty() {
            self.error_message = "Please select all directories.".to_string();
            return;
        }

        let target_size = match choice {
            SizeChoice::Preset(size) => size,
            SizeChoice::Custom => match self.custom_size.parse::<TargetSize>() {
                Ok(size) => size,
                Err(e) => {
                    self.error_message = e.to_string();
                    return;
                }
            },
        };

        let config = BatchConfig::new(
            self.input_path.trim(),
            self.output_path.trim(),
            target_size,
        );

        match spawn_batch(config) {
            Ok(handle) => {
                self.batch = Some(handle);
                self.progress = 0.0;
                self.results_message.clear();
                self.show_completion = false;
            }
            Err(e) => self.error_message = e.to_string(),
        }
    }

    /// Apply the latest progress value and collect the report once the worker is done
    pub(crate) fn check_progress(&mut self) {
        let Some(handle) = self.batch.as_ref() else {
            return;
        };

        if let Some(percent) = handle.drain_latest() {
            self.progress = (percent / 100.0).clamp(0.0, 1.0) as f32;
        }

        if !handle.is_finished() {
            return;
        }

        let Some(handle) = self.batch.take() else {
            return;
        };

        match handle.join() {
            Ok(report) => {
                self.progress = 1.0;
                self.results_message = format!(
                    "{} written, {} skipped, {} failed",
                    report.written(),
                    report.skipped(),
                    report.failed()
                );
                self.show_completion = true;
            }
            Err(e) => self.error_message = format!("Processing failed: {}", e),
        }
    }
}
