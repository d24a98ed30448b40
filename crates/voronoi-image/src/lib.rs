#![deny(missing_docs)]
//! Binary image buffer used by the thinning engine.

/// binary image representation.
pub mod image;

/// Error types for the image module.
pub mod error;

/// image-level operations: bounding boxes, cropping and pasting.
pub mod ops;

pub use crate::error::ImageError;
pub use crate::image::{BinaryImage, ImageSize, BACKGROUND, FOREGROUND};
pub use crate::ops::BoundingBox;
