#![doc = env!("CARGO_PKG_DESCRIPTION")]

#[doc(inline)]
pub use filtra_image as image;

#[doc(inline)]
pub use filtra_imgproc as imgproc;
