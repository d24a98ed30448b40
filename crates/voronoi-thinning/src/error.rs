use voronoi_image::ImageError;

use crate::parallel::ParallelError;

/// Errors that can occur while thinning an image.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ThinningError {
    /// The image is empty or holds a value other than 0 or 1.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The algorithm identifier is not registered.
    #[error("Unsupported thinning algorithm '{0}' (available: {1})")]
    UnsupportedAlgorithm(String, String),

    /// Error related to the image buffer.
    #[error(transparent)]
    ImageError(#[from] ImageError),

    /// Error related to the execution strategy.
    #[error(transparent)]
    ParallelError(#[from] ParallelError),
}
