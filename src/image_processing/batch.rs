use anyhow::{Context, Result};
use image::codecs::jpeg::JpegEncoder;
use image::{ImageFormat, ImageReader, RgbImage};
use indicatif::ProgressBar;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, Receiver, Sender};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use super::{process_image, TargetSize};
use crate::error::{ResizeError, ValidationError};
use crate::utils::has_image_suffix;

/// JPEG quality used for `.jpg` outputs.
pub const JPEG_QUALITY: u8 = 95;

/// Receives percent-complete values in `[0, 100]`; a final `100` marks the end of a batch.
pub trait ProgressSink {
    fn report(&self, percent: f64);
}

impl ProgressSink for Sender<f64> {
    fn report(&self, percent: f64) {
        // Receiver gone means nobody is watching anymore
        let _ = self.send(percent);
    }
}

impl ProgressSink for ProgressBar {
    fn report(&self, percent: f64) {
        self.set_position(percent.round() as u64);
    }
}

/// Everything a batch run needs, collected by the front end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchConfig {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub target_size: TargetSize,
}

impl BatchConfig {
    pub fn new(
        input_dir: impl Into<PathBuf>,
        output_dir: impl Into<PathBuf>,
        target_size: TargetSize,
    ) -> Self {
        Self {
            input_dir: input_dir.into(),
            output_dir: output_dir.into(),
            target_size,
        }
    }

    /// Reject a run with no input or output directory selected.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.input_dir.as_os_str().is_empty() {
            return Err(ValidationError::MissingInputDir);
        }
        if self.output_dir.as_os_str().is_empty() {
            return Err(ValidationError::MissingOutputDir);
        }
        Ok(())
    }
}

/// What happened to a single input file.
#[derive(Debug)]
pub enum FileOutcome {
    Written { output: PathBuf },
    SkippedUnreadable { reason: String },
    SkippedDegenerate { reason: String },
    Failed { reason: String },
}

impl FileOutcome {
    pub fn is_written(&self) -> bool {
        matches!(self, FileOutcome::Written { .. })
    }

    pub fn is_skipped(&self) -> bool {
        matches!(
            self,
            FileOutcome::SkippedUnreadable { .. } | FileOutcome::SkippedDegenerate { .. }
        )
    }
}

/// Per-file outcomes of a batch, in enumeration order.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub entries: Vec<(PathBuf, FileOutcome)>,
    pub duration: Duration,
}

impl BatchReport {
    pub fn total(&self) -> usize {
        self.entries.len()
    }

    pub fn written(&self) -> usize {
        self.entries.iter().filter(|(_, o)| o.is_written()).count()
    }

    pub fn skipped(&self) -> usize {
        self.entries.iter().filter(|(_, o)| o.is_skipped()).count()
    }

    pub fn failed(&self) -> usize {
        self.entries
            .iter()
            .filter(|(_, o)| matches!(o, FileOutcome::Failed { .. }))
            .count()
    }
}

/// Sequential crop-and-resize over one input directory.
pub struct BatchProcessor {
    config: BatchConfig,
}

impl BatchProcessor {
    pub fn new(config: BatchConfig) -> Result<Self, ValidationError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Entries of the input directory whose name ends in `.jpg` or `.png`,
    /// in directory listing order.
    pub fn discover_images(&self) -> Result<Vec<PathBuf>> {
        let input_dir = &self.config.input_dir;
        debug!("Scanning directory: {}", input_dir.display());

        let mut image_files = Vec::new();
        for entry in WalkDir::new(input_dir).min_depth(1).max_depth(1) {
            let entry = entry
                .with_context(|| format!("Failed to read directory: {}", input_dir.display()))?;

            if entry.file_name().to_str().is_some_and(has_image_suffix) {
                image_files.push(entry.into_path());
            }
        }

        debug!("Found {} image files", image_files.len());
        Ok(image_files)
    }

    /// Process every discovered image, reporting progress to `sink`.
    ///
    /// Per-file failures are recorded in the report and never abort the run.
    /// Files that cannot be decoded emit no progress value of their own but
    /// still count toward the denominator. A final `100` is always reported.
    pub fn run(&self, sink: &dyn ProgressSink) -> Result<BatchReport> {
        let start_time = Instant::now();
        let output_dir = &self.config.output_dir;

        fs::create_dir_all(output_dir).with_context(|| {
            format!("Failed to create output directory: {}", output_dir.display())
        })?;

        let image_files = self.discover_images()?;
        let total = image_files.len();
        info!(
            "Processing {} images from {} at {}",
            total,
            self.config.input_dir.display(),
            self.config.target_size
        );

        let mut report = BatchReport::default();
        for (index, image_path) in image_files.into_iter().enumerate() {
            let outcome = self.process_file(&image_path);

            if !matches!(outcome, FileOutcome::SkippedUnreadable { .. }) {
                sink.report(percent_complete(index + 1, total));
            }

            report.entries.push((image_path, outcome));
        }

        sink.report(100.0);

        report.duration = start_time.elapsed();
        info!(
            "Batch finished: {} written, {} skipped, {} failed",
            report.written(),
            report.skipped(),
            report.failed()
        );
        Ok(report)
    }

    fn process_file(&self, input_path: &Path) -> FileOutcome {
        let img = match decode_image(input_path) {
            Ok(img) => img,
            Err(e) => {
                warn!("Skipping unreadable file: {}", e);
                return FileOutcome::SkippedUnreadable {
                    reason: e.to_string(),
                };
            }
        };

        let final_img = match process_image(&img, self.config.target_size) {
            Ok(final_img) => final_img,
            Err(e) if e.is_degenerate() => {
                warn!("Dropping {}: {}", input_path.display(), e);
                return FileOutcome::SkippedDegenerate {
                    reason: e.to_string(),
                };
            }
            Err(e) => {
                warn!("Failed to process {}: {}", input_path.display(), e);
                return FileOutcome::Failed {
                    reason: e.to_string(),
                };
            }
        };

        // Source name is kept as-is in the output directory
        let output_path = match input_path.file_name() {
            Some(name) => self.config.output_dir.join(name),
            None => {
                return FileOutcome::Failed {
                    reason: format!("No file name in {}", input_path.display()),
                }
            }
        };

        match save_image(&final_img, &output_path) {
            Ok(()) => {
                debug!("Wrote {}", output_path.display());
                FileOutcome::Written {
                    output: output_path,
                }
            }
            Err(e) => {
                warn!("{}", e);
                FileOutcome::Failed {
                    reason: e.to_string(),
                }
            }
        }
    }
}

fn percent_complete(index: usize, total: usize) -> f64 {
    if total == 0 {
        100.0
    } else {
        index as f64 / total as f64 * 100.0
    }
}

/// Decode by content and drop any alpha channel.
pub fn decode_image(path: &Path) -> Result<RgbImage, ResizeError> {
    let decode_err = |source: image::ImageError| ResizeError::Decode {
        path: path.to_path_buf(),
        source,
    };

    let img = ImageReader::open(path)
        .and_then(|reader| reader.with_guessed_format())
        .map_err(|e| decode_err(image::ImageError::IoError(e)))?
        .decode()
        .map_err(decode_err)?;

    Ok(img.to_rgb8())
}

/// Encode according to the output file name: JPEG at [`JPEG_QUALITY`], PNG otherwise.
pub fn save_image(img: &RgbImage, path: &Path) -> Result<(), ResizeError> {
    let encode_err = |source: image::ImageError| ResizeError::Encode {
        path: path.to_path_buf(),
        source,
    };

    let is_jpeg = path
        .file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.ends_with(".jpg"));

    if is_jpeg {
        let writer = BufWriter::new(File::create(path)?);
        let encoder = JpegEncoder::new_with_quality(writer, JPEG_QUALITY);
        img.write_with_encoder(encoder).map_err(encode_err)
    } else {
        img.save_with_format(path, ImageFormat::Png)
            .map_err(encode_err)
    }
}

/// A batch running on its own worker thread.
pub struct BatchHandle {
    receiver: Receiver<f64>,
    handle: JoinHandle<Result<BatchReport>>,
}

impl BatchHandle {
    /// Drain every queued progress value and return the most recent one.
    pub fn drain_latest(&self) -> Option<f64> {
        self.receiver.try_iter().last()
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Wait for the worker and return its report.
    pub fn join(self) -> Result<BatchReport> {
        self.handle
            .join()
            .map_err(|_| anyhow::anyhow!("Batch worker thread panicked"))?
    }
}

/// Validate `config` and run the batch on a single background thread.
pub fn spawn_batch(config: BatchConfig) -> Result<BatchHandle, ValidationError> {
    let processor = BatchProcessor::new(config)?;
    let (tx, rx) = channel();

    let handle = std::thread::spawn(move || processor.run(&tx));

    Ok(BatchHandle {
        receiver: rx,
        handle,
    })
}
