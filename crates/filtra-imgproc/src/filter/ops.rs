use filtra_image::Image;

use super::{filter2d, filter2d_gray, kernels, FilterError, Kernel2d};
use crate::color::gray_from_rgb_u8;
use crate::normalize::{normalize_gradient, normalize_gradient_pair};

/// Blur an image using a 3x3 box blur filter.
///
/// # Arguments
///
/// * `src` - The source image with shape (H, W, 3).
/// * `dst` - The destination image with shape (H, W, 3).
///
/// PRECONDITION: `src` and `dst` must have the same shape.
pub fn box_blur(src: &Image<u8, 3>, dst: &mut Image<u8, 3>) -> Result<(), FilterError> {
    filter2d(src, dst, &kernels::box_blur_kernel_3x3())
}

/// Blur an image using a 3x3 gaussian blur filter.
///
/// # Arguments
///
/// * `src` - The source image with shape (H, W, 3).
/// * `dst` - The destination image with shape (H, W, 3).
///
/// PRECONDITION: `src` and `dst` must have the same shape.
pub fn gaussian_blur(src: &Image<u8, 3>, dst: &mut Image<u8, 3>) -> Result<(), FilterError> {
    filter2d(src, dst, &kernels::gaussian_kernel_3x3())
}

/// Sharpen an image using a 3x3 sharpening filter.
///
/// # Arguments
///
/// * `src` - The source image with shape (H, W, 3).
/// * `dst` - The destination image with shape (H, W, 3).
///
/// PRECONDITION: `src` and `dst` must have the same shape.
pub fn sharpen(src: &Image<u8, 3>, dst: &mut Image<u8, 3>) -> Result<(), FilterError> {
    filter2d(src, dst, &kernels::sharpen_kernel_3x3())
}

/// Apply a caller-supplied kernel to an image.
///
/// # Arguments
///
/// * `src` - The source image with shape (H, W, 3).
/// * `dst` - The destination image with shape (H, W, 3).
/// * `kernel` - The kernel to correlate with, typically 3x3.
///
/// PRECONDITION: `src` and `dst` must have the same shape.
///
/// # Example
///
/// ```
/// use filtra_image::{Image, ImageSize};
/// use filtra_imgproc::filter::{custom_filter, Kernel2d};
///
/// let image = Image::<u8, 3>::from_size_val(
///     ImageSize {
///         width: 4,
///         height: 4,
///     },
///     32,
/// )
/// .unwrap();
/// let mut filtered = Image::<u8, 3>::from_size_val(image.size(), 0).unwrap();
///
/// let kernel = Kernel2d::from_matrix([
///     [0.0, 0.0, 0.0],
///     [0.0, 2.0, 0.0],
///     [0.0, 0.0, 0.0],
/// ]);
/// custom_filter(&image, &mut filtered, &kernel).unwrap();
/// assert_eq!(filtered.get([1, 1, 0]), Some(&64));
/// ```
pub fn custom_filter(
    src: &Image<u8, 3>,
    dst: &mut Image<u8, 3>,
    kernel: &Kernel2d,
) -> Result<(), FilterError> {
    filter2d(src, dst, kernel)
}

/// Detect horizontal intensity changes with the sobel-x operator.
///
/// The image is converted to grayscale, correlated with the sobel-x kernel
/// into an unclamped gradient field, and the normalized magnitude is
/// broadcast back to three channels.
///
/// # Arguments
///
/// * `src` - The source image with shape (H, W, 3).
/// * `dst` - The destination image with shape (H, W, 3).
///
/// PRECONDITION: `src` and `dst` must have the same shape.
pub fn sobel_x(src: &Image<u8, 3>, dst: &mut Image<u8, 3>) -> Result<(), FilterError> {
    let (kernel_x, _) = kernels::sobel_kernels_3x3();

    let mut gray = Image::from_size_val(src.size(), 0u8)?;
    gray_from_rgb_u8(src, &mut gray)?;

    let mut gx = Image::from_size_val(src.size(), 0.0f32)?;
    filter2d_gray(&gray, &mut gx, &kernel_x)?;

    normalize_gradient(&gx, dst)?;
    Ok(())
}

/// Detect vertical intensity changes with the sobel-y operator.
///
/// Same pipeline as [`sobel_x`] with the vertical kernel.
///
/// # Arguments
///
/// * `src` - The source image with shape (H, W, 3).
/// * `dst` - The destination image with shape (H, W, 3).
///
/// PRECONDITION: `src` and `dst` must have the same shape.
pub fn sobel_y(src: &Image<u8, 3>, dst: &mut Image<u8, 3>) -> Result<(), FilterError> {
    let (_, kernel_y) = kernels::sobel_kernels_3x3();

    let mut gray = Image::from_size_val(src.size(), 0u8)?;
    gray_from_rgb_u8(src, &mut gray)?;

    let mut gy = Image::from_size_val(src.size(), 0.0f32)?;
    filter2d_gray(&gray, &mut gy, &kernel_y)?;

    normalize_gradient(&gy, dst)?;
    Ok(())
}

/// Detect intensity changes in both directions with the combined sobel operator.
///
/// Both directional gradient fields are computed from the same grayscale
/// image and combined with the L1 magnitude `|gx| + |gy|` before
/// normalization.
///
/// # Arguments
///
/// * `src` - The source image with shape (H, W, 3).
/// * `dst` - The destination image with shape (H, W, 3).
///
/// PRECONDITION: `src` and `dst` must have the same shape.
pub fn sobel_xy(src: &Image<u8, 3>, dst: &mut Image<u8, 3>) -> Result<(), FilterError> {
    let (kernel_x, kernel_y) = kernels::sobel_kernels_3x3();

    let mut gray = Image::from_size_val(src.size(), 0u8)?;
    gray_from_rgb_u8(src, &mut gray)?;

    let mut gx = Image::from_size_val(src.size(), 0.0f32)?;
    filter2d_gray(&gray, &mut gx, &kernel_x)?;

    let mut gy = Image::from_size_val(src.size(), 0.0f32)?;
    filter2d_gray(&gray, &mut gy, &kernel_y)?;

    normalize_gradient_pair(&gx, &gy, dst)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use filtra_image::ImageSize;

    fn rgb_from_gray_values(values: &[u8], width: usize, height: usize) -> Image<u8, 3> {
        let data = values.iter().flat_map(|&v| [v, v, v]).collect();
        Image::new(ImageSize { width, height }, data).unwrap()
    }

    #[test]
    fn test_blur_preserves_uniform_interior() -> Result<(), FilterError> {
        let size = ImageSize {
            width: 6,
            height: 6,
        };
        let image = Image::<u8, 3>::from_size_val(size, 200)?;

        for op in [box_blur, gaussian_blur, sharpen] {
            let mut dst = Image::<u8, 3>::from_size_val(size, 0)?;
            op(&image, &mut dst)?;
            assert_eq!(dst.as_slice(), image.as_slice());
        }

        Ok(())
    }

    #[test]
    fn test_sobel_x_uniform_image_is_black() -> Result<(), FilterError> {
        // 5x5 uniform gray image, no horizontal variation anywhere
        let image = rgb_from_gray_values(&[100; 25], 5, 5);
        let mut dst = Image::<u8, 3>::from_size_val(image.size(), 77)?;

        sobel_x(&image, &mut dst)?;

        assert_eq!(dst.as_slice(), &[0u8; 75]);

        Ok(())
    }

    #[test]
    fn test_sobel_x_vertical_edge_maps_to_255() -> Result<(), FilterError> {
        // columns 0-1 dark, columns 2-4 bright
        let values: Vec<u8> = (0..25).map(|i| if i % 5 < 2 { 0 } else { 200 }).collect();
        let image = rgb_from_gray_values(&values, 5, 5);
        let mut dst = Image::<u8, 3>::from_size_val(image.size(), 0)?;

        sobel_x(&image, &mut dst)?;

        // the steepest-gradient pixels saturate the display range
        assert_eq!(dst.get([2, 1, 0]), Some(&255));
        assert_eq!(dst.get([2, 2, 0]), Some(&255));
        // and the broadcast covers all channels
        assert_eq!(dst.get([2, 1, 1]), Some(&255));
        assert_eq!(dst.get([2, 1, 2]), Some(&255));
        // border ring of the gradient field is zero, so it displays black
        assert_eq!(dst.get([0, 0, 0]), Some(&0));
        assert_eq!(dst.get([4, 4, 0]), Some(&0));

        Ok(())
    }

    #[test]
    fn test_sobel_y_horizontal_edge() -> Result<(), FilterError> {
        // rows 0-1 dark, rows 2-4 bright
        let values: Vec<u8> = (0..25).map(|i| if i / 5 < 2 { 0 } else { 200 }).collect();
        let image = rgb_from_gray_values(&values, 5, 5);
        let mut dst = Image::<u8, 3>::from_size_val(image.size(), 0)?;

        sobel_y(&image, &mut dst)?;

        assert_eq!(dst.get([1, 2, 0]), Some(&255));
        assert_eq!(dst.get([2, 2, 0]), Some(&255));
        assert_eq!(dst.get([3, 2, 0]), Some(&0));

        Ok(())
    }

    #[test]
    fn test_sobel_xy_matches_l1_of_directional_fields() -> Result<(), FilterError> {
        use crate::color::gray_from_rgb_u8;
        use crate::normalize::normalize_gradient_pair;

        // diagonal edge, both directions contribute
        let values: Vec<u8> = (0..25)
            .map(|i| if i % 5 > i / 5 { 180 } else { 20 })
            .collect();
        let image = rgb_from_gray_values(&values, 5, 5);

        let mut dst = Image::<u8, 3>::from_size_val(image.size(), 0)?;
        sobel_xy(&image, &mut dst)?;

        // recompute the two fields independently and combine them
        let (kernel_x, kernel_y) = kernels::sobel_kernels_3x3();
        let mut gray = Image::from_size_val(image.size(), 0u8)?;
        gray_from_rgb_u8(&image, &mut gray)?;
        let mut gx = Image::from_size_val(image.size(), 0.0f32)?;
        let mut gy = Image::from_size_val(image.size(), 0.0f32)?;
        filter2d_gray(&gray, &mut gx, &kernel_x)?;
        filter2d_gray(&gray, &mut gy, &kernel_y)?;
        let mut expected = Image::<u8, 3>::from_size_val(image.size(), 0)?;
        normalize_gradient_pair(&gx, &gy, &mut expected)?;

        assert_eq!(dst.as_slice(), expected.as_slice());

        Ok(())
    }

    #[test]
    fn test_custom_filter_rejects_even_kernel() {
        assert!(matches!(
            Kernel2d::new(2, vec![0.0; 4]),
            Err(FilterError::InvalidKernelShape(2))
        ));
    }
}
