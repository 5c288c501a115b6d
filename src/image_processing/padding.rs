use super::{Padding, TargetSize};

/// Total border reserved inside the canvas, split evenly between both sides of each axis.
pub const PADDING_RESERVE: u32 = 400;

/// Padding that centers a crop of `crop_dims` (width, height) inside `target`
/// once it is scaled to fit the canvas minus [`PADDING_RESERVE`].
///
/// The crop is never enlarged. Returns `None` for a crop with a zero dimension.
///
/// NOTE: the batch pipeline only logs this value. [`super::resize::resize_and_pad`]
/// derives its own geometry with a 100px reserve and is what shapes the output.
pub fn compute_padding(crop_dims: (u32, u32), target: TargetSize) -> Option<Padding> {
    let (crop_width, crop_height) = crop_dims;
    if crop_width == 0 || crop_height == 0 {
        return None;
    }

    let effective_width = target.width as f64 - PADDING_RESERVE as f64;
    let effective_height = target.height as f64 - PADDING_RESERVE as f64;

    let width_scale = effective_width / crop_width as f64;
    let height_scale = effective_height / crop_height as f64;
    let scale = width_scale.min(height_scale).min(1.0);

    let resized_width = (crop_width as f64 * scale) as i64;
    let resized_height = (crop_height as f64 * scale) as i64;

    let (left, right) = split_even(target.width as i64 - resized_width);
    let (top, bottom) = split_even(target.height as i64 - resized_height);

    Some(Padding {
        top,
        bottom,
        left,
        right,
    })
}

/// Split a total into floor half and remainder.
fn split_even(total: i64) -> (u32, u32) {
    let total = total.max(0);
    let first = total.div_euclid(2);
    (first as u32, (total - first) as u32)
}
