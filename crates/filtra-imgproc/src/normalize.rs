//! Gradient normalization operations.
//!
//! Edge-detection kernels produce signed, unbounded float gradient fields.
//! The operations here rescale such fields into displayable 8-bit images:
//! take the magnitude, find the global maximum and map it to 255, then
//! broadcast the result to three channels so edge images can be displayed
//! alongside color images.

use filtra_image::{Image, ImageDtype, ImageError};

use crate::parallel;

/// Find the minimum and maximum values in an image.
///
/// # Arguments
///
/// * `image` - The input image of shape (height, width, channels).
///
/// # Returns
///
/// A tuple containing the minimum and maximum values in the image.
///
/// # Errors
///
/// If the image contains no pixels, an error is returned.
///
/// # Example
///
/// ```
/// use filtra_image::{Image, ImageSize};
/// use filtra_imgproc::normalize::find_min_max;
///
/// let image_data = vec![0u8, 1, 0, 1, 2, 3, 0, 1, 0, 1, 2, 3];
/// let image = Image::<u8, 3>::new(
///     ImageSize {
///         width: 2,
///         height: 2,
///     },
///     image_data,
/// )
/// .unwrap();
///
/// let (min, max) = find_min_max(&image).unwrap();
/// assert_eq!(min, 0);
/// assert_eq!(max, 3);
/// ```
pub fn find_min_max<T, const C: usize>(image: &Image<T, C>) -> Result<(T, T), ImageError>
where
    T: Copy + PartialOrd,
{
    let first_element = match image.as_slice().iter().next() {
        Some(x) => x,
        None => return Err(ImageError::ImageDataNotInitialized),
    };

    let mut min = first_element;
    let mut max = first_element;

    for x in image.as_slice().iter() {
        if x < min {
            min = x;
        }
        if x > max {
            max = x;
        }
    }

    Ok((*min, *max))
}

/// Rescale a magnitude field so its maximum maps to 255 and broadcast the
/// byte result to all three destination channels.
fn rescale_to_rgb(magnitude: &Image<f32, 1>, dst: &mut Image<u8, 3>, max_val: f32) {
    let scale = 255.0 / max_val;
    parallel::par_iter_rows(magnitude, dst, |mag_pixel, dst_pixel| {
        dst_pixel.fill(u8::from_f32(mag_pixel[0] * scale));
    });
}

fn check_sizes<const C1: usize, const C2: usize>(
    src: &Image<f32, C1>,
    dst: &Image<u8, C2>,
) -> Result<(), ImageError> {
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            dst.cols(),
            dst.rows(),
            src.cols(),
            src.rows(),
        ));
    }
    Ok(())
}

/// Normalize a single gradient field into a displayable image.
///
/// The magnitude of each pixel is its absolute value; the field maximum is
/// mapped linearly to 255 and the byte result is broadcast to R=G=B.
/// A field with no gradient anywhere (all zeros) produces an all-black
/// image instead of dividing by zero.
///
/// # Arguments
///
/// * `field` - The gradient field with shape (H, W, 1).
/// * `dst` - The destination image with shape (H, W, 3).
pub fn normalize_gradient(field: &Image<f32, 1>, dst: &mut Image<u8, 3>) -> Result<(), ImageError> {
    check_sizes(field, dst)?;

    let magnitude = Image::<f32, 1>::new(
        field.size(),
        field.as_slice().iter().map(|v| v.abs()).collect(),
    )?;

    let (_, max_val) = find_min_max(&magnitude)?;
    if max_val == 0.0 {
        dst.as_slice_mut().fill(0);
        return Ok(());
    }

    rescale_to_rgb(&magnitude, dst, max_val);

    Ok(())
}

/// Normalize a pair of directional gradient fields into a displayable image.
///
/// The magnitude of each pixel is `|gx| + |gy|`; the combination is the L1
/// norm rather than the Euclidean one. The combined maximum is mapped
/// linearly to 255 and broadcast to R=G=B, with the same all-zero guard as
/// [`normalize_gradient`].
///
/// # Arguments
///
/// * `gx` - The horizontal gradient field with shape (H, W, 1).
/// * `gy` - The vertical gradient field with shape (H, W, 1).
/// * `dst` - The destination image with shape (H, W, 3).
pub fn normalize_gradient_pair(
    gx: &Image<f32, 1>,
    gy: &Image<f32, 1>,
    dst: &mut Image<u8, 3>,
) -> Result<(), ImageError> {
    if gx.size() != gy.size() {
        return Err(ImageError::InvalidImageSize(
            gy.cols(),
            gy.rows(),
            gx.cols(),
            gx.rows(),
        ));
    }
    check_sizes(gx, dst)?;

    let magnitude = Image::<f32, 1>::new(
        gx.size(),
        gx.as_slice()
            .iter()
            .zip(gy.as_slice().iter())
            .map(|(x, y)| x.abs() + y.abs())
            .collect(),
    )?;

    let (_, max_val) = find_min_max(&magnitude)?;
    if max_val == 0.0 {
        dst.as_slice_mut().fill(0);
        return Ok(());
    }

    rescale_to_rgb(&magnitude, dst, max_val);

    Ok(())
}
