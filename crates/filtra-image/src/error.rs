/// An error type for the image module.
#[derive(thiserror::Error, Debug)]
pub enum ImageError {
    /// Error when channel and shape are not valid.
    #[error("Data length ({0}) does not match the image size ({1})")]
    InvalidChannelShape(usize, usize),

    /// Error when two images are expected to have the same size.
    #[error("Image size mismatch: got {0}x{1}, expected {2}x{3}")]
    InvalidImageSize(usize, usize, usize, usize),

    /// Error when the image data is empty.
    #[error("Image data is not initialized")]
    ImageDataNotInitialized,

    /// Error when a pixel value cannot be represented in the target type.
    #[error("Failed to cast image data")]
    CastError,
}
