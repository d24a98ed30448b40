use crate::error::ImageError;

/// Value of a background pixel.
pub const BACKGROUND: u8 = 0;

/// Value of a foreground pixel.
pub const FOREGROUND: u8 = 1;

/// Image size in pixels
///
/// A struct to represent the size of an image in pixels.
///
/// # Examples
///
/// ```
/// use voronoi_image::ImageSize;
///
/// let image_size = ImageSize {
///   width: 10,
///   height: 20,
/// };
///
/// assert_eq!(image_size.width, 10);
/// assert_eq!(image_size.height, 20);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ImageSize {
    /// Width of the image in pixels
    pub width: usize,
    /// Height of the image in pixels
    pub height: usize,
}

impl ImageSize {
    /// Number of pixels covered by the size.
    ///
    /// Saturates at `usize::MAX`; use [`ImageSize::checked_area`] to detect sizes
    /// that cannot be allocated.
    pub fn area(&self) -> usize {
        self.width.saturating_mul(self.height)
    }

    /// Number of pixels covered by the size, or `None` if it overflows `usize`.
    pub fn checked_area(&self) -> Option<usize> {
        self.width.checked_mul(self.height)
    }

    /// Whether the size has a zero width or height.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

impl std::fmt::Display for ImageSize {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "ImageSize {{ width: {}, height: {} }}",
            self.width, self.height
        )
    }
}

impl From<[usize; 2]> for ImageSize {
    fn from(size: [usize; 2]) -> Self {
        ImageSize {
            width: size[0],
            height: size[1],
        }
    }
}

/// A single channel foreground/background mask.
///
/// Pixels are stored in row-major order. A well-formed mask only holds
/// [`BACKGROUND`] (0) and [`FOREGROUND`] (1); [`BinaryImage::new`] does not
/// enforce it so that masks produced by a caller can be checked with
/// [`BinaryImage::validate`] and rejected explicitly.
///
/// Reads outside the image are defined as background.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BinaryImage {
    size: ImageSize,
    data: Vec<u8>,
}

impl BinaryImage {
    /// Create a new binary image from pixel data.
    ///
    /// # Arguments
    ///
    /// * `size` - The size of the image in pixels.
    /// * `data` - The pixel data of the image in row-major order.
    ///
    /// # Errors
    ///
    /// If the pixel count of `size` overflows or the length of the pixel data does
    /// not match it, an error is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use voronoi_image::{BinaryImage, ImageSize};
    ///
    /// let image = BinaryImage::new(
    ///     ImageSize {
    ///         width: 3,
    ///         height: 2,
    ///     },
    ///     vec![0, 1, 0, 1, 1, 1],
    /// ).unwrap();
    ///
    /// assert_eq!(image.width(), 3);
    /// assert_eq!(image.height(), 2);
    /// assert_eq!(image.get(1, 2), 1);
    /// ```
    pub fn new(size: ImageSize, data: Vec<u8>) -> Result<Self, ImageError> {
        let area = size
            .checked_area()
            .ok_or(ImageError::InvalidImageSize(size.width, size.height))?;
        if data.len() != area {
            return Err(ImageError::InvalidDataLength(data.len(), area));
        }

        Ok(Self { size, data })
    }

    /// Create a new image with every pixel set to `val`.
    ///
    /// # Errors
    ///
    /// If `val` is not binary or the pixel count of `size` overflows, an error is returned.
    pub fn from_size_val(size: ImageSize, val: u8) -> Result<Self, ImageError> {
        if val > FOREGROUND {
            return Err(ImageError::InvalidPixelValue(val));
        }

        let area = size
            .checked_area()
            .ok_or(ImageError::InvalidImageSize(size.width, size.height))?;
        Self::new(size, vec![val; area])
    }

    /// Create a background image with the given `(row, col)` pixels set to foreground.
    ///
    /// # Errors
    ///
    /// If any point lies outside the image, an error is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use voronoi_image::{BinaryImage, ImageSize};
    ///
    /// let image = BinaryImage::from_points(
    ///     ImageSize { width: 4, height: 4 },
    ///     &[(0, 0), (3, 3)],
    /// ).unwrap();
    ///
    /// assert_eq!(image.count_foreground(), 2);
    /// ```
    pub fn from_points(size: ImageSize, points: &[(usize, usize)]) -> Result<Self, ImageError> {
        let mut image = Self::from_size_val(size, BACKGROUND)?;
        for &(row, col) in points {
            image.set(row, col, FOREGROUND)?;
        }
        Ok(image)
    }

    /// Get the size of the image in pixels.
    pub fn size(&self) -> ImageSize {
        self.size
    }

    /// Get the width of the image in pixels.
    pub fn width(&self) -> usize {
        self.size.width
    }

    /// Get the height of the image in pixels.
    pub fn height(&self) -> usize {
        self.size.height
    }

    /// Get the number of columns of the image.
    pub fn cols(&self) -> usize {
        self.width()
    }

    /// Get the number of rows of the image.
    pub fn rows(&self) -> usize {
        self.height()
    }

    /// Whether `(row, col)` lies inside the image.
    #[inline]
    pub fn contains(&self, row: isize, col: isize) -> bool {
        row >= 0 && col >= 0 && (row as usize) < self.height() && (col as usize) < self.width()
    }

    /// Get the pixel value at `(row, col)`.
    ///
    /// Coordinates outside the image read as background.
    #[inline]
    pub fn get(&self, row: isize, col: isize) -> u8 {
        if self.contains(row, col) {
            self.data[row as usize * self.width() + col as usize]
        } else {
            BACKGROUND
        }
    }

    /// Set the pixel value at `(row, col)`.
    ///
    /// # Errors
    ///
    /// Returns [`ImageError::OutOfRange`] if the coordinate is outside the image and
    /// [`ImageError::InvalidPixelValue`] if `value` is not binary. Nothing is written on error.
    pub fn set(&mut self, row: usize, col: usize, value: u8) -> Result<(), ImageError> {
        if row >= self.height() || col >= self.width() {
            return Err(ImageError::OutOfRange(
                row,
                col,
                self.width(),
                self.height(),
            ));
        }

        if value > FOREGROUND {
            return Err(ImageError::InvalidPixelValue(value));
        }

        let idx = row * self.width() + col;
        self.data[idx] = value;

        Ok(())
    }

    /// Get the pixel data of the image in row-major order.
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    /// Get the mutable pixel data of the image in row-major order.
    pub fn as_slice_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Consume the image and return its pixel data.
    pub fn into_vec(self) -> Vec<u8> {
        self.data
    }

    /// Check that every pixel is either background or foreground.
    ///
    /// # Errors
    ///
    /// Returns [`ImageError::InvalidPixelValue`] for the first offending pixel in row-major order.
    pub fn validate(&self) -> Result<(), ImageError> {
        self.first_invalid_pixel()
            .map_or(Ok(()), |(_, _, v)| Err(ImageError::InvalidPixelValue(v)))
    }

    /// Find the first pixel in row-major order that is not binary.
    ///
    /// # Returns
    ///
    /// The `(row, col, value)` of the offending pixel, if any.
    pub fn first_invalid_pixel(&self) -> Option<(usize, usize, u8)> {
        let width = self.width();
        self.data
            .iter()
            .position(|&v| v > FOREGROUND)
            .map(|idx| (idx / width, idx % width, self.data[idx]))
    }

    /// Count the foreground pixels.
    pub fn count_foreground(&self) -> usize {
        self.data.iter().filter(|&&v| v == FOREGROUND).count()
    }

    /// Iterate over the `(row, col)` coordinates of the foreground pixels in row-major order.
    pub fn foreground_points(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let width = self.width();
        self.data
            .iter()
            .enumerate()
            .filter(|(_, &v)| v == FOREGROUND)
            .map(move |(idx, _)| (idx / width, idx % width))
    }
}
