/// An error type for the image module.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ImageError {
    /// Error when the data length does not match the image size.
    #[error("Data length ({0}) does not match the image size ({1})")]
    InvalidDataLength(usize, usize),

    /// Error when the pixel count of an image size does not fit in `usize`.
    #[error("Image size {0}x{1} overflows the addressable pixel count")]
    InvalidImageSize(usize, usize),

    /// Error when a pixel coordinate is outside the image.
    #[error("Pixel (row: {0}, col: {1}) is out of range for an image of {2}x{3}")]
    OutOfRange(usize, usize, usize, usize),

    /// Error when a pixel value is neither background (0) nor foreground (1).
    #[error("Pixel value {0} is not binary (expected 0 or 1)")]
    InvalidPixelValue(u8),

    /// Error when a crop or paste region does not fit inside the image.
    #[error("Region at (row: {0}, col: {1}) of {2}x{3} does not fit in the image")]
    InvalidRegion(usize, usize, usize, usize),
}
