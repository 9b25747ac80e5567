use filtra_image::{Image, ImageDtype, ImageError};
use rayon::{
    iter::{IndexedParallelIterator, ParallelIterator},
    slice::ParallelSliceMut,
};

use super::{FilterError, Kernel2d};

/// Weighted sum of the kernel-sized neighborhood centered on `(y, x)`,
/// accumulated independently for each channel.
///
/// The caller must guarantee that `(y, x)` is at least `kernel.radius()`
/// away from every image edge.
#[inline]
fn correlate_pixel<const C: usize>(
    src_data: &[u8],
    src_cols: usize,
    kernel: &Kernel2d,
    y: usize,
    x: usize,
) -> [f32; C] {
    let radius = kernel.radius();
    let mut sum = [0.0f32; C];
    for ky in 0..kernel.side() {
        for kx in 0..kernel.side() {
            let row = y + ky - radius;
            let col = x + kx - radius;
            let w = kernel.weight(ky, kx);
            let pix_offset = (row * src_cols + col) * C;
            for ch in 0..C {
                sum[ch] += f32::from(src_data[pix_offset + ch]) * w;
            }
        }
    }
    sum
}

fn check_input<T1, const C1: usize, T2, const C2: usize>(
    src: &Image<T1, C1>,
    dst: &Image<T2, C2>,
) -> Result<(), FilterError> {
    if src.cols() == 0 || src.rows() == 0 {
        return Err(FilterError::InvalidImageDimensions(src.cols(), src.rows()));
    }
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            dst.cols(),
            dst.rows(),
            src.cols(),
            src.rows(),
        )
        .into());
    }
    Ok(())
}

/// Correlate an image with a 2d kernel, clamping the result to `u8`.
///
/// Every interior pixel (at least `kernel.radius()` away from every edge)
/// receives the weighted sum of its neighborhood, rounded and saturated to
/// `[0, 255]`. The border ring of thickness `kernel.radius()` keeps the
/// source pixel values unchanged.
///
/// Interior rows are processed in parallel; each output pixel depends only
/// on the source image, so the source and destination must be distinct
/// buffers (the `&`/`&mut` signature enforces this).
///
/// # Arguments
///
/// * `src` - The source image with shape (H, W, C).
/// * `dst` - The destination image with shape (H, W, C).
/// * `kernel` - The square, odd-sided kernel to correlate with.
///
/// # Example
///
/// ```
/// use filtra_image::{Image, ImageSize};
/// use filtra_imgproc::filter::{filter2d, kernels};
///
/// let image = Image::<u8, 3>::from_size_val(
///     ImageSize {
///         width: 5,
///         height: 5,
///     },
///     128,
/// )
/// .unwrap();
/// let mut filtered = Image::<u8, 3>::from_size_val(image.size(), 0).unwrap();
///
/// filter2d(&image, &mut filtered, &kernels::box_blur_kernel_3x3()).unwrap();
/// assert_eq!(filtered.get([2, 2, 0]), Some(&128));
/// ```
pub fn filter2d<const C: usize>(
    src: &Image<u8, C>,
    dst: &mut Image<u8, C>,
    kernel: &Kernel2d,
) -> Result<(), FilterError> {
    check_input(src, dst)?;

    let radius = kernel.radius();
    let cols = src.cols();
    let rows = src.rows();
    let row_len = cols * C;
    let src_data = src.as_slice();

    // the border ring keeps the source pixels
    dst.as_slice_mut().copy_from_slice(src_data);

    if cols <= 2 * radius || rows <= 2 * radius {
        // no interior pixels, the whole image is border
        return Ok(());
    }

    dst.as_slice_mut()
        .par_chunks_exact_mut(row_len)
        .enumerate()
        .skip(radius)
        .take(rows - 2 * radius)
        .for_each(|(y, dst_row)| {
            for x in radius..cols - radius {
                let sum = correlate_pixel::<C>(src_data, cols, kernel, y, x);
                let dst_pixel = &mut dst_row[x * C..(x + 1) * C];
                for ch in 0..C {
                    dst_pixel[ch] = u8::from_f32(sum[ch]);
                }
            }
        });

    Ok(())
}

/// Correlate a grayscale image with a 2d kernel, keeping the raw float sums.
///
/// The result is not clamped: gradient kernels intentionally produce
/// negative values and magnitudes beyond 255. The border ring of thickness
/// `kernel.radius()` stays exactly zero.
///
/// # Arguments
///
/// * `src` - The source grayscale image with shape (H, W, 1).
/// * `dst` - The destination gradient field with shape (H, W, 1).
/// * `kernel` - The square, odd-sided kernel to correlate with.
pub fn filter2d_gray(
    src: &Image<u8, 1>,
    dst: &mut Image<f32, 1>,
    kernel: &Kernel2d,
) -> Result<(), FilterError> {
    check_input(src, dst)?;

    let radius = kernel.radius();
    let cols = src.cols();
    let rows = src.rows();
    let src_data = src.as_slice();

    // the border ring stays zero
    dst.as_slice_mut().fill(0.0);

    if cols <= 2 * radius || rows <= 2 * radius {
        return Ok(());
    }

    dst.as_slice_mut()
        .par_chunks_exact_mut(cols)
        .enumerate()
        .skip(radius)
        .take(rows - 2 * radius)
        .for_each(|(y, dst_row)| {
            for x in radius..cols - radius {
                let sum = correlate_pixel::<1>(src_data, cols, kernel, y, x);
                dst_row[x] = sum[0];
            }
        });

    Ok(())
}
