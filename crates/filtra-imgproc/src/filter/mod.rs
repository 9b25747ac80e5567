//! Filter operations
//!
//! This module provides spatial filter operations for image processing.

use filtra_image::ImageError;
use thiserror::Error;

/// Filter kernels
pub mod kernels;

/// Convolution engine
mod convolution;
pub use convolution::*;

/// Filter operations
mod ops;
pub use ops::*;

pub use kernels::Kernel2d;

/// Errors that can occur during filtering.
#[derive(Error, Debug)]
pub enum FilterError {
    /// The kernel side length is zero or even.
    #[error("kernel must have an odd, non-zero side length, got {0}")]
    InvalidKernelShape(usize),

    /// The kernel weights do not form a square matrix of the declared side.
    #[error("kernel weights length ({0}) does not match side * side ({1})")]
    InvalidKernelLength(usize, usize),

    /// The image has a zero dimension.
    #[error("image dimensions must be non-zero, got {0}x{1}")]
    InvalidImageDimensions(usize, usize),

    /// An underlying image operation failed.
    #[error(transparent)]
    Image(#[from] ImageError),
}
