pub mod batch;
pub mod padding;
pub mod resize;
pub mod subject_detection;

use image::RgbImage;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

use crate::error::{ResizeError, ValidationError};

/// Output canvas dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TargetSize {
    pub width: u32,
    pub height: u32,
}

impl TargetSize {
    /// 1000x1000 square preset
    pub const SQUARE: TargetSize = TargetSize {
        width: 1000,
        height: 1000,
    };

    /// 1801x2600 portrait preset
    pub const POSTER: TargetSize = TargetSize {
        width: 1801,
        height: 2600,
    };

    pub fn new(width: u32, height: u32) -> Result<Self, ValidationError> {
        if width == 0 || height == 0 {
            return Err(ValidationError::ZeroSize { width, height });
        }
        Ok(Self { width, height })
    }

    pub fn presets() -> [TargetSize; 2] {
        [Self::SQUARE, Self::POSTER]
    }
}

impl FromStr for TargetSize {
    type Err = ValidationError;

    /// Parse a custom size written as `width,height`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || ValidationError::MalformedSize(s.to_string());

        let parts: Vec<&str> = s.split(',').collect();
        if parts.len() != 2 {
            return Err(malformed());
        }

        let width = parts[0].trim().parse::<u32>().map_err(|_| malformed())?;
        let height = parts[1].trim().parse::<u32>().map_err(|_| malformed())?;

        Self::new(width, height)
    }
}

impl fmt::Display for TargetSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Axis-aligned rectangle inside a source image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl BoundingBox {
    /// Box covering the whole image
    pub fn full(width: u32, height: u32) -> Self {
        Self {
            x: 0,
            y: 0,
            width,
            height,
        }
    }

    pub fn right(&self) -> u32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> u32 {
        self.y + self.height
    }

    pub fn fits_within(&self, image_width: u32, image_height: u32) -> bool {
        self.right() <= image_width && self.bottom() <= image_height
    }
}

/// Border widths around a scaled region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Padding {
    pub top: u32,
    pub bottom: u32,
    pub left: u32,
    pub right: u32,
}

/// Run the full geometry pipeline on one decoded image: detect the subject,
/// crop to it and compose it onto a white canvas of `target` size.
pub fn process_image(img: &RgbImage, target: TargetSize) -> Result<RgbImage, ResizeError> {
    let bbox = subject_detection::find_bounding_box(img);
    debug!(?bbox, "Subject bounding box");

    let cropped = resize::crop_image(img, &bbox)?;

    // Informational only: the final composition below uses its own margin.
    match padding::compute_padding(cropped.dimensions(), target) {
        Some(pad) => debug!(?pad, "Computed padding for {}", target),
        None => debug!("Padding undefined for empty crop"),
    }

    resize::resize_and_pad(&cropped, target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn test_parse_target_size() {
        assert_eq!(
            "1000,1000".parse::<TargetSize>().unwrap(),
            TargetSize::SQUARE
        );
        assert_eq!(
            " 1801 , 2600 ".parse::<TargetSize>().unwrap(),
            TargetSize::POSTER
        );
    }

    #[test]
    fn test_parse_target_size_invalid() {
        for input in ["", "1000", "1000x1000", "a,b", "10,20,30", "-5,10", "1.5,2"] {
            assert_eq!(
                input.parse::<TargetSize>(),
                Err(ValidationError::MalformedSize(input.to_string())),
                "input {:?}",
                input
            );
        }

        assert_eq!(
            "0,480".parse::<TargetSize>(),
            Err(ValidationError::ZeroSize {
                width: 0,
                height: 480
            })
        );
    }

    #[test]
    fn test_target_size_display() {
        assert_eq!(TargetSize::POSTER.to_string(), "1801x2600");
    }

    #[test]
    fn test_process_image_output_dimensions() {
        let mut img = RgbImage::from_pixel(640, 480, Rgb([255, 255, 255]));
        for y in 100..300 {
            for x in 50..500 {
                img.put_pixel(x, y, Rgb([20, 40, 200]));
            }
        }

        for target in TargetSize::presets() {
            let out = process_image(&img, target).unwrap();
            assert_eq!(out.dimensions(), (target.width, target.height));
            // Corners stay white
            assert_eq!(*out.get_pixel(0, 0), Rgb([255, 255, 255]));
            assert_eq!(
                *out.get_pixel(target.width - 1, target.height - 1),
                Rgb([255, 255, 255])
            );
        }
    }
}
