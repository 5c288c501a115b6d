use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::image_processing::batch::BatchConfig;
use crate::image_processing::TargetSize;

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum SizePreset {
    /// 1000x1000 square canvas
    #[value(name = "square")]
    Square,
    /// 1801x2600 portrait canvas
    #[value(name = "poster")]
    Poster,
}

impl From<SizePreset> for TargetSize {
    fn from(preset: SizePreset) -> Self {
        match preset {
            SizePreset::Square => TargetSize::SQUARE,
            SizePreset::Poster => TargetSize::POSTER,
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "image-resizer",
    about = "Crop product photos to their subject and center them on a white canvas",
    long_about = "
Image Resizer

Scans a directory for .jpg and .png files, finds the bounding box of the
non-white subject in each one, crops to it with a 50px margin and scales the
crop onto a white canvas of a fixed size. Outputs keep their file names.

Example Usage:
  # Square 1000x1000 outputs
  image-resizer -i raw -o resized

  # Portrait preset
  image-resizer -i raw -o resized --preset poster

  # Custom canvas
  image-resizer -i raw -o resized --size 1200,800"
)]
pub struct Args {
    /// Directory containing the source images
    #[arg(short = 'i', long = "input", value_name = "DIR")]
    pub input_dir: PathBuf,

    /// Directory for resized images (created if missing)
    #[arg(short = 'o', long = "output", value_name = "DIR")]
    pub output_dir: PathBuf,

    /// Predefined canvas size
    #[arg(long = "preset", default_value = "square")]
    pub preset: SizePreset,

    /// Custom canvas size, overrides --preset
    #[arg(short = 's', long = "size", value_name = "WIDTH,HEIGHT")]
    pub size: Option<TargetSize>,

    /// Enable verbose output with per-image diagnostics
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Emit progress and results as JSON lines on stdout
    #[arg(long = "json-progress")]
    pub json_progress: bool,
}

impl Args {
    pub fn target_size(&self) -> TargetSize {
        self.size.unwrap_or_else(|| self.preset.into())
    }

    pub fn batch_config(&self) -> BatchConfig {
        BatchConfig::new(&self.input_dir, &self.output_dir, self.target_size())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_preset() {
        let args = Args::try_parse_from(["image-resizer", "-i", "raw", "-o", "out"]).unwrap();
        assert_eq!(args.target_size(), TargetSize::SQUARE);
        assert_eq!(
            args.batch_config(),
            BatchConfig::new("raw", "out", TargetSize::SQUARE)
        );
    }

    #[test]
    fn test_poster_preset() {
        let args =
            Args::try_parse_from(["image-resizer", "-i", "raw", "-o", "out", "--preset", "poster"])
                .unwrap();
        assert_eq!(args.target_size(), TargetSize::POSTER);
    }

    #[test]
    fn test_custom_size_overrides_preset() {
        let args = Args::try_parse_from([
            "image-resizer",
            "-i",
            "raw",
            "-o",
            "out",
            "--preset",
            "poster",
            "-s",
            "1200,800",
        ])
        .unwrap();
        assert_eq!(args.target_size(), TargetSize::new(1200, 800).unwrap());
    }

    #[test]
    fn test_invalid_size_rejected() {
        for size in ["1200x800", "0,800", "abc"] {
            let result =
                Args::try_parse_from(["image-resizer", "-i", "raw", "-o", "out", "-s", size]);
            assert!(result.is_err(), "size {:?} should be rejected", size);
        }
    }

    #[test]
    fn test_directories_required() {
        assert!(Args::try_parse_from(["image-resizer", "-i", "raw"]).is_err());
        assert!(Args::try_parse_from(["image-resizer", "-o", "out"]).is_err());
    }
}
