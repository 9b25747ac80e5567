#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// color transformations module.
pub mod color;

/// image filtering module.
pub mod filter;

/// operations to normalize gradient images.
pub mod normalize;

/// module containing parallization utilities.
pub mod parallel;
