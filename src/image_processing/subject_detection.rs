use image::{GrayImage, Luma, RgbImage};
use imageproc::contours::find_contours;

use super::BoundingBox;

/// Pixels at or below this intensity are treated as subject.
pub const FOREGROUND_THRESHOLD: u8 = 230;

/// Margin added on every side of the detected subject so soft shadows survive the crop.
pub const SUBJECT_MARGIN: u32 = 50;

/// Find the box enclosing all non-white content, dilated by [`SUBJECT_MARGIN`].
///
/// Assumes a near-white background. Every contour of the thresholded mask
/// contributes its bounding rectangle and the union of those rectangles is
/// returned, so detached fragments (shadows, reflections) are kept. Hole
/// borders always lie inside their parent, so they never widen the union.
/// When nothing is found the full image extent is returned.
pub fn find_bounding_box(img: &RgbImage) -> BoundingBox {
    let (width, height) = img.dimensions();
    let mask = foreground_mask(img);

    let contours = find_contours::<u32>(&mask);

    let mut extent: Option<(u32, u32, u32, u32)> = None;
    // No border-type filter: imageproc reports blobs touching column 0 as holes
    for contour in &contours {
        for point in &contour.points {
            // Rectangle edges are exclusive on the right/bottom
            let (px0, py0, px1, py1) = (point.x, point.y, point.x + 1, point.y + 1);
            extent = Some(match extent {
                None => (px0, py0, px1, py1),
                Some((x0, y0, x1, y1)) => (x0.min(px0), y0.min(py0), x1.max(px1), y1.max(py1)),
            });
        }
    }

    let Some((x_min, y_min, x_max, y_max)) = extent else {
        return BoundingBox::full(width, height);
    };

    dilate_box(x_min, y_min, x_max, y_max, width, height)
}

/// Inverted binary threshold of the grayscale image: subject = 255, background = 0.
pub fn foreground_mask(img: &RgbImage) -> GrayImage {
    GrayImage::from_fn(img.width(), img.height(), |x, y| {
        let [r, g, b] = img.get_pixel(x, y).0;
        if luma(r, g, b) <= FOREGROUND_THRESHOLD {
            Luma([255])
        } else {
            Luma([0])
        }
    })
}

/// BT.601 luma in 14-bit fixed point, rounded.
fn luma(r: u8, g: u8, b: u8) -> u8 {
    const R_WEIGHT: u32 = 4899;
    const G_WEIGHT: u32 = 9617;
    const B_WEIGHT: u32 = 1868;
    const SHIFT: u32 = 14;

    let sum = r as u32 * R_WEIGHT + g as u32 * G_WEIGHT + b as u32 * B_WEIGHT;
    ((sum + (1 << (SHIFT - 1))) >> SHIFT) as u8
}

/// Grow `[x_min, x_max) x [y_min, y_max)` by the subject margin, clamped to the image.
fn dilate_box(
    x_min: u32,
    y_min: u32,
    x_max: u32,
    y_max: u32,
    image_width: u32,
    image_height: u32,
) -> BoundingBox {
    let left = x_min.saturating_sub(SUBJECT_MARGIN);
    let top = y_min.saturating_sub(SUBJECT_MARGIN);
    let right = (x_max + SUBJECT_MARGIN).min(image_width);
    let bottom = (y_max + SUBJECT_MARGIN).min(image_height);

    BoundingBox {
        x: left,
        y: top,
        width: right - left,
        height: bottom - top,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
    const BLACK: Rgb<u8> = Rgb([0, 0, 0]);

    fn fill_rect(img: &mut RgbImage, x: u32, y: u32, w: u32, h: u32, color: Rgb<u8>) {
        for py in y..y + h {
            for px in x..x + w {
                img.put_pixel(px, py, color);
            }
        }
    }

    #[test]
    fn test_single_square_is_dilated() {
        let mut img = RgbImage::from_pixel(500, 500, WHITE);
        fill_rect(&mut img, 200, 200, 100, 100, BLACK);

        let bbox = find_bounding_box(&img);
        assert_eq!(
            bbox,
            BoundingBox {
                x: 150,
                y: 150,
                width: 200,
                height: 200
            }
        );
    }

    #[test]
    fn test_all_white_falls_back_to_full_image() {
        let img = RgbImage::from_pixel(320, 240, WHITE);
        assert_eq!(find_bounding_box(&img), BoundingBox::full(320, 240));
    }

    #[test]
    fn test_near_white_is_background() {
        let mut img = RgbImage::from_pixel(200, 200, WHITE);
        // Intensity above the threshold
        fill_rect(&mut img, 10, 10, 50, 50, Rgb([240, 240, 240]));
        assert_eq!(find_bounding_box(&img), BoundingBox::full(200, 200));
    }

    #[test]
    fn test_box_clamped_to_image_bounds() {
        let mut img = RgbImage::from_pixel(300, 200, WHITE);
        fill_rect(&mut img, 0, 10, 30, 30, BLACK);
        fill_rect(&mut img, 280, 170, 20, 30, BLACK);

        let bbox = find_bounding_box(&img);
        assert_eq!(bbox, BoundingBox::full(300, 200));
        assert!(bbox.fits_within(300, 200));
    }

    #[test]
    fn test_subject_touching_left_edge() {
        let mut img = RgbImage::from_pixel(300, 200, WHITE);
        fill_rect(&mut img, 0, 80, 30, 30, BLACK);

        assert_eq!(
            find_bounding_box(&img),
            BoundingBox {
                x: 0,
                y: 30,
                width: 80,
                height: 130
            }
        );
    }

    #[test]
    fn test_subject_touching_top_edge() {
        let mut img = RgbImage::from_pixel(300, 200, WHITE);
        fill_rect(&mut img, 135, 0, 30, 30, BLACK);

        assert_eq!(
            find_bounding_box(&img),
            BoundingBox {
                x: 85,
                y: 0,
                width: 130,
                height: 80
            }
        );
    }

    #[test]
    fn test_subject_touching_right_edge() {
        let mut img = RgbImage::from_pixel(300, 200, WHITE);
        fill_rect(&mut img, 270, 80, 30, 30, BLACK);

        assert_eq!(
            find_bounding_box(&img),
            BoundingBox {
                x: 220,
                y: 30,
                width: 80,
                height: 130
            }
        );
    }

    #[test]
    fn test_subject_touching_bottom_edge() {
        let mut img = RgbImage::from_pixel(300, 200, WHITE);
        fill_rect(&mut img, 135, 170, 30, 30, BLACK);

        assert_eq!(
            find_bounding_box(&img),
            BoundingBox {
                x: 85,
                y: 120,
                width: 130,
                height: 80
            }
        );
    }

    #[test]
    fn test_left_edge_blob_kept_in_union() {
        let mut img = RgbImage::from_pixel(400, 300, WHITE);
        fill_rect(&mut img, 0, 100, 20, 20, BLACK);
        fill_rect(&mut img, 250, 120, 40, 40, BLACK);

        assert_eq!(
            find_bounding_box(&img),
            BoundingBox {
                x: 0,
                y: 50,
                width: 340,
                height: 160
            }
        );
    }

    #[test]
    fn test_disjoint_blobs_are_unioned() {
        let mut img = RgbImage::from_pixel(800, 600, WHITE);
        // Object
        fill_rect(&mut img, 200, 150, 100, 100, Rgb([30, 60, 90]));
        // Detached shadow fragment
        fill_rect(&mut img, 400, 300, 40, 10, Rgb([180, 180, 180]));

        let bbox = find_bounding_box(&img);
        assert_eq!(
            bbox,
            BoundingBox {
                x: 150,
                y: 100,
                width: 340,
                height: 260
            }
        );
    }

    #[test]
    fn test_hollow_subject_uses_outer_border() {
        let mut img = RgbImage::from_pixel(400, 400, WHITE);
        fill_rect(&mut img, 100, 100, 200, 200, BLACK);
        fill_rect(&mut img, 150, 150, 100, 100, WHITE);

        let bbox = find_bounding_box(&img);
        assert_eq!(
            bbox,
            BoundingBox {
                x: 50,
                y: 50,
                width: 300,
                height: 300
            }
        );
    }

    #[test]
    fn test_box_always_within_extent() {
        let sizes = [(1, 1), (7, 3), (64, 64), (120, 30)];
        for (w, h) in sizes {
            let img = RgbImage::from_fn(w, h, |x, y| {
                if (x + y) % 3 == 0 {
                    BLACK
                } else {
                    WHITE
                }
            });
            let bbox = find_bounding_box(&img);
            assert!(bbox.fits_within(w, h), "{:?} outside {}x{}", bbox, w, h);
        }
    }

    #[test]
    fn test_foreground_mask_threshold_is_inclusive() {
        let img = RgbImage::from_fn(3, 1, |x, _| match x {
            0 => Rgb([230, 230, 230]),
            1 => Rgb([231, 231, 231]),
            _ => BLACK,
        });
        let mask = foreground_mask(&img);
        assert_eq!(mask.get_pixel(0, 0)[0], 255);
        assert_eq!(mask.get_pixel(1, 0)[0], 0);
        assert_eq!(mask.get_pixel(2, 0)[0], 255);
    }

    #[test]
    fn test_luma_uses_bt601_weights() {
        assert_eq!(luma(255, 255, 255), 255);
        assert_eq!(luma(230, 230, 230), 230);
        assert_eq!(luma(255, 222, 222), 232);
        assert_eq!(luma(200, 240, 240), 228);
    }

    #[test]
    fn test_light_pink_is_background() {
        let mut img = RgbImage::from_pixel(500, 500, WHITE);
        fill_rect(&mut img, 200, 200, 100, 100, Rgb([255, 222, 222]));
        assert_eq!(find_bounding_box(&img), BoundingBox::full(500, 500));
    }

    #[test]
    fn test_pale_cyan_is_subject() {
        let mut img = RgbImage::from_pixel(500, 500, WHITE);
        fill_rect(&mut img, 200, 200, 100, 100, Rgb([200, 240, 240]));
        assert_eq!(
            find_bounding_box(&img),
            BoundingBox {
                x: 150,
                y: 150,
                width: 200,
                height: 200
            }
        );
    }
}
