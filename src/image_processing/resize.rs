use fast_image_resize::images::Image;
use fast_image_resize::{FilterType, PixelType, ResizeAlg, ResizeOptions, Resizer};
use image::{imageops, Rgb, RgbImage};

use super::{BoundingBox, TargetSize};
use crate::error::ResizeError;

/// Total border reserved inside the canvas by [`resize_and_pad`].
pub const CANVAS_RESERVE: u32 = 100;

const WHITE: Rgb<u8> = Rgb([255, 255, 255]);

/// Scale `img` to fit the canvas minus [`CANVAS_RESERVE`] while keeping its
/// aspect ratio, then center it on a white canvas of exactly `target` size.
///
/// Fails with [`ResizeError::InvalidGeometry`] when the derived size has a
/// dimension of zero or less, which happens for extremely thin crops or for
/// targets no larger than the reserve.
pub fn resize_and_pad(img: &RgbImage, target: TargetSize) -> Result<RgbImage, ResizeError> {
    let (new_width, new_height) = fit_dimensions(img.dimensions(), target)?;

    let resized = resize_image(img, new_width, new_height)?;

    let pad_top = (target.height - new_height) / 2;
    let pad_left = (target.width - new_width) / 2;

    let mut canvas = RgbImage::from_pixel(target.width, target.height, WHITE);
    imageops::replace(&mut canvas, &resized, pad_left as i64, pad_top as i64);

    Ok(canvas)
}

/// Dimensions of `src_dims` (width, height) scaled to fill the effective area
/// along its constraining axis.
pub fn fit_dimensions(src_dims: (u32, u32), target: TargetSize) -> Result<(u32, u32), ResizeError> {
    let (src_width, src_height) = src_dims;
    let effective_width = target.width as i64 - CANVAS_RESERVE as i64;
    let effective_height = target.height as i64 - CANVAS_RESERVE as i64;

    if src_width == 0 || src_height == 0 || effective_width <= 0 || effective_height <= 0 {
        return Err(ResizeError::InvalidGeometry {
            width: effective_width.min(src_width as i64),
            height: effective_height.min(src_height as i64),
        });
    }

    let image_aspect = src_width as f64 / src_height as f64;
    let effective_aspect = effective_width as f64 / effective_height as f64;

    let (new_width, new_height) = if image_aspect > effective_aspect {
        // Relatively wider - fit to width
        (effective_width, (effective_width as f64 / image_aspect) as i64)
    } else {
        // Relatively taller - fit to height
        ((effective_height as f64 * image_aspect) as i64, effective_height)
    };

    if new_width <= 0 || new_height <= 0 {
        return Err(ResizeError::InvalidGeometry {
            width: new_width,
            height: new_height,
        });
    }

    Ok((new_width as u32, new_height as u32))
}

/// Copy the region described by `bbox` out of `img`.
pub fn crop_image(img: &RgbImage, bbox: &BoundingBox) -> Result<RgbImage, ResizeError> {
    let (img_width, img_height) = img.dimensions();

    if !bbox.fits_within(img_width, img_height) {
        return Err(ResizeError::CropOutOfBounds {
            x: bbox.x,
            y: bbox.y,
            width: bbox.width,
            height: bbox.height,
            image_width: img_width,
            image_height: img_height,
        });
    }

    Ok(imageops::crop_imm(img, bbox.x, bbox.y, bbox.width, bbox.height).to_image())
}

/// Bilinear resize to exact dimensions.
fn resize_image(img: &RgbImage, width: u32, height: u32) -> Result<RgbImage, ResizeError> {
    let (src_width, src_height) = img.dimensions();

    if src_width == width && src_height == height {
        return Ok(img.clone());
    }

    let src_image = Image::from_vec_u8(src_width, src_height, img.as_raw().clone(), PixelType::U8x3)
        .map_err(ResizeError::resample)?;
    let mut dst_image = Image::new(width, height, PixelType::U8x3);

    let options = ResizeOptions::new().resize_alg(ResizeAlg::Convolution(FilterType::Bilinear));
    Resizer::new()
        .resize(&src_image, &mut dst_image, &options)
        .map_err(ResizeError::resample)?;

    RgbImage::from_raw(width, height, dst_image.buffer().to_vec())
        .ok_or_else(|| ResizeError::resample("destination buffer size mismatch"))
}
