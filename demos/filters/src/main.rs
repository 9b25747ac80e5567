use std::time::Instant;

use argh::FromArgs;

use filtra::image::{Image, ImageSize};
use filtra::imgproc::filter::{self, Kernel2d};
use filtra::imgproc::normalize::find_min_max;

#[derive(FromArgs)]
/// Apply a spatial filter to a synthesized test image
struct Args {
    /// the filter to apply: box, gaussian, sharpen, sobel-x, sobel-y, sobel-xy, custom
    #[argh(option)]
    filter: String,

    /// image width
    #[argh(option, default = "640")]
    width: usize,

    /// image height
    #[argh(option, default = "480")]
    height: usize,

    /// nine comma-separated weights for the custom kernel, row-major
    #[argh(option)]
    kernel: Option<String>,
}

/// Parse nine comma-separated weights, defaulting unparseable entries to zero.
fn parse_kernel(spec: &str) -> Kernel2d {
    let mut weights = [0.0f32; 9];
    for (i, entry) in spec.split(',').take(9).enumerate() {
        match entry.trim().parse::<f32>() {
            Ok(w) => weights[i] = w,
            Err(_) => {
                log::warn!("kernel entry {:?} is not a number, using 0", entry.trim());
            }
        }
    }
    Kernel2d::new(3, weights.to_vec()).expect("nine weights form a 3x3 kernel")
}

/// Synthesize a test image: a horizontal color ramp with a bright rectangle,
/// so both blur and edge filters have something to show.
fn synthesize(size: ImageSize) -> Result<Image<u8, 3>, Box<dyn std::error::Error>> {
    let mut data = Vec::with_capacity(size.width * size.height * 3);
    for y in 0..size.height {
        for x in 0..size.width {
            let ramp = (x * 255 / size.width.max(1)) as u8;
            let in_box = x > size.width / 4
                && x < 3 * size.width / 4
                && y > size.height / 4
                && y < 3 * size.height / 4;
            if in_box {
                data.extend_from_slice(&[230, 230, 230]);
            } else {
                data.extend_from_slice(&[ramp, 64, 255 - ramp]);
            }
        }
    }
    Ok(Image::new(size, data)?)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args: Args = argh::from_env();

    let size = ImageSize {
        width: args.width,
        height: args.height,
    };
    let image = synthesize(size)?;
    let mut filtered = Image::<u8, 3>::from_size_val(size, 0)?;

    let start = Instant::now();
    match args.filter.to_lowercase().as_str() {
        "box" => filter::box_blur(&image, &mut filtered)?,
        "gaussian" => filter::gaussian_blur(&image, &mut filtered)?,
        "sharpen" => filter::sharpen(&image, &mut filtered)?,
        "sobel-x" => filter::sobel_x(&image, &mut filtered)?,
        "sobel-y" => filter::sobel_y(&image, &mut filtered)?,
        "sobel-xy" => filter::sobel_xy(&image, &mut filtered)?,
        "custom" => {
            let spec = args
                .kernel
                .ok_or("custom filter requires --kernel with nine weights")?;
            filter::custom_filter(&image, &mut filtered, &parse_kernel(&spec))?;
        }
        _ => return Err(format!("unknown filter: {}", args.filter).into()),
    }
    let elapsed = start.elapsed();

    let (min, max) = find_min_max(&filtered)?;
    log::info!(
        "applied {} to a {} image in {:?}, output range [{}, {}]",
        args.filter,
        size,
        elapsed,
        min,
        max
    );

    Ok(())
}
