use rayon::{
    iter::{IndexedParallelIterator, ParallelIterator},
    slice::ParallelSliceMut,
};

use crate::{BinaryImage, ImageError, ImageSize, FOREGROUND};

/// An axis-aligned region of an image, in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoundingBox {
    /// Row of the top-left corner.
    pub row: usize,
    /// Column of the top-left corner.
    pub col: usize,
    /// Number of rows covered by the box.
    pub height: usize,
    /// Number of columns covered by the box.
    pub width: usize,
}

impl BoundingBox {
    /// Size of the box as an [`ImageSize`].
    pub fn size(&self) -> ImageSize {
        ImageSize {
            width: self.width,
            height: self.height,
        }
    }

    /// Grow the box by `margin` pixels on each side, clamped to an image of `bounds`.
    ///
    /// # Examples
    ///
    /// ```
    /// use voronoi_image::{BoundingBox, ImageSize};
    ///
    /// let bbox = BoundingBox { row: 0, col: 2, height: 2, width: 2 };
    /// let grown = bbox.expand(1, ImageSize { width: 5, height: 5 });
    ///
    /// assert_eq!(grown, BoundingBox { row: 0, col: 1, height: 3, width: 4 });
    /// ```
    pub fn expand(&self, margin: usize, bounds: ImageSize) -> BoundingBox {
        let row = self.row.saturating_sub(margin);
        let col = self.col.saturating_sub(margin);
        let bottom = (self.row + self.height + margin).min(bounds.height);
        let right = (self.col + self.width + margin).min(bounds.width);

        BoundingBox {
            row,
            col,
            height: bottom.saturating_sub(row),
            width: right.saturating_sub(col),
        }
    }

    fn fits(&self, size: ImageSize) -> bool {
        self.row + self.height <= size.height && self.col + self.width <= size.width
    }
}

impl BinaryImage {
    /// Compute the smallest box enclosing every foreground pixel.
    ///
    /// # Returns
    ///
    /// `None` if the image has no foreground pixel.
    pub fn foreground_bounding_box(&self) -> Option<BoundingBox> {
        let width = self.width();
        let mut rows = self
            .as_slice()
            .chunks_exact(width.max(1))
            .enumerate()
            .filter(|(_, row)| row.contains(&FOREGROUND))
            .map(|(r, _)| r);

        let top = rows.next()?;
        let bottom = rows.last().unwrap_or(top);

        let (mut left, mut right) = (width, 0);
        for row in self.as_slice()[top * width..(bottom + 1) * width].chunks_exact(width) {
            if let Some(first) = row.iter().position(|&v| v == FOREGROUND) {
                left = left.min(first);
            }
            if let Some(last) = row.iter().rposition(|&v| v == FOREGROUND) {
                right = right.max(last);
            }
        }

        Some(BoundingBox {
            row: top,
            col: left,
            height: bottom - top + 1,
            width: right - left + 1,
        })
    }

    /// Copy a region of the image into a new image.
    ///
    /// # Errors
    ///
    /// Returns [`ImageError::InvalidRegion`] if the box does not fit inside the image.
    ///
    /// # Examples
    ///
    /// ```
    /// use voronoi_image::{BinaryImage, BoundingBox, ImageSize};
    ///
    /// let image = BinaryImage::new(ImageSize { width: 4, height: 3 }, vec![
    ///     0, 0, 0, 0,
    ///     0, 1, 1, 0,
    ///     0, 0, 1, 0,
    /// ]).unwrap();
    ///
    /// let bbox = image.foreground_bounding_box().unwrap();
    /// let cropped = image.crop(&bbox).unwrap();
    ///
    /// assert_eq!(cropped.as_slice(), &[1, 1, 0, 1]);
    /// ```
    pub fn crop(&self, bbox: &BoundingBox) -> Result<BinaryImage, ImageError> {
        if !bbox.fits(self.size()) {
            return Err(ImageError::InvalidRegion(
                bbox.row,
                bbox.col,
                bbox.width,
                bbox.height,
            ));
        }

        let mut dst = BinaryImage::from_size_val(bbox.size(), 0)?;
        if bbox.size().is_empty() {
            return Ok(dst);
        }

        let src_cols = self.cols();
        let src = self.as_slice();

        dst.as_slice_mut()
            .par_chunks_exact_mut(bbox.width)
            .enumerate()
            .for_each(|(i, dst_row)| {
                // get the slice at the left edge of the box
                let offset = (bbox.row + i) * src_cols + bbox.col;
                dst_row.copy_from_slice(&src[offset..offset + bbox.width]);
            });

        Ok(dst)
    }

    /// Overwrite a region of the image with the pixels of `src`, top-left corner at `(row, col)`.
    ///
    /// # Errors
    ///
    /// Returns [`ImageError::InvalidRegion`] if `src` does not fit at that position.
    pub fn paste(&mut self, src: &BinaryImage, row: usize, col: usize) -> Result<(), ImageError> {
        let region = BoundingBox {
            row,
            col,
            height: src.height(),
            width: src.width(),
        };
        if !region.fits(self.size()) {
            return Err(ImageError::InvalidRegion(
                row,
                col,
                src.width(),
                src.height(),
            ));
        }

        if src.size().is_empty() {
            return Ok(());
        }

        let dst_cols = self.cols();
        let src_cols = src.cols();
        let src = src.as_slice();

        self.as_slice_mut()
            .par_chunks_exact_mut(dst_cols)
            .skip(row)
            .take(region.height)
            .enumerate()
            .for_each(|(i, dst_row)| {
                dst_row[col..col + src_cols].copy_from_slice(&src[i * src_cols..(i + 1) * src_cols]);
            });

        Ok(())
    }
}
