use voronoi_image::{BinaryImage, FOREGROUND};

/// `(row, col)` offsets of the neighbors p2..p9, clockwise from north.
pub const NEIGHBOR_OFFSETS: [(isize, isize); 8] = [
    (-1, 0),  // p2, N
    (-1, 1),  // p3, NE
    (0, 1),   // p4, E
    (1, 1),   // p5, SE
    (1, 0),   // p6, S
    (1, -1),  // p7, SW
    (0, -1),  // p8, W
    (-1, -1), // p9, NW
];

// bits of p2, p4, p6, p8
const EVEN_NEIGHBORS: u8 = 0b0101_0101;
// bits of p3, p5, p7, p9
const ODD_NEIGHBORS: u8 = 0b1010_1010;

/// The 8-neighborhood of a pixel packed in a byte.
///
/// Bit `k` is set when neighbor `p(k + 2)` is foreground, so bit 0 is the
/// north neighbor p2 and bit 7 is the north-west neighbor p9. The packed
/// form doubles as the index into the precomputed rule tables.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NeighborhoodPattern(u8);

impl NeighborhoodPattern {
    /// Create a pattern from its packed code.
    pub fn from_code(code: u8) -> Self {
        Self(code)
    }

    /// Read the neighborhood of `(row, col)` from `image`.
    ///
    /// Neighbors outside the image count as background.
    ///
    /// # Examples
    ///
    /// ```
    /// use voronoi_image::{BinaryImage, ImageSize};
    /// use voronoi_thinning::neighborhood::NeighborhoodPattern;
    ///
    /// let image = BinaryImage::from_points(
    ///     ImageSize { width: 3, height: 3 },
    ///     &[(0, 1), (1, 1), (2, 2)],
    /// ).unwrap();
    ///
    /// let pattern = NeighborhoodPattern::from_image(&image, 1, 1);
    /// assert_eq!(pattern.values(), [1, 0, 0, 1, 0, 0, 0, 0]);
    /// ```
    pub fn from_image(image: &BinaryImage, row: usize, col: usize) -> Self {
        let (row, col) = (row as isize, col as isize);
        let code = NEIGHBOR_OFFSETS
            .iter()
            .enumerate()
            .fold(0u8, |code, (bit, (dr, dc))| {
                if image.get(row + dr, col + dc) == FOREGROUND {
                    code | (1 << bit)
                } else {
                    code
                }
            });

        Self(code)
    }

    /// The packed code of the pattern.
    pub fn code(self) -> u8 {
        self.0
    }

    /// The neighbor values `[p2, p3, p4, p5, p6, p7, p8, p9]`.
    pub fn values(self) -> [u8; 8] {
        std::array::from_fn(|k| (self.0 >> k) & 1)
    }

    /// `B(p1)`: number of foreground neighbors.
    pub fn foreground_count(self) -> u32 {
        self.0.count_ones()
    }

    /// `A(p1)`: number of 0→1 transitions in the circular sequence p2, p3, ..., p9, p2.
    pub fn transitions(self) -> u32 {
        // bit k of the rotation holds the neighbor that follows bit k
        (!self.0 & self.0.rotate_right(1)).count_ones()
    }

    /// `N1(p1)`: foreground count over the pairs (p2, p3), (p4, p5), (p6, p7), (p8, p9).
    pub fn n1(self) -> u32 {
        ((self.0 | self.0.rotate_right(1)) & EVEN_NEIGHBORS).count_ones()
    }

    /// `N2(p1)`: foreground count over the pairs (p9, p2), (p3, p4), (p5, p6), (p7, p8).
    pub fn n2(self) -> u32 {
        ((self.0 | self.0.rotate_right(1)) & ODD_NEIGHBORS).count_ones()
    }

    /// `C(p1)`: number of `¬p(2k) ∧ (p(2k+1) ∨ p(2k+2))` terms that hold for k = 1..4, with p10 = p2.
    pub fn connectivity(self) -> u32 {
        let next = self.0.rotate_right(1) | self.0.rotate_right(2);
        (!self.0 & next & EVEN_NEIGHBORS).count_ones()
    }
}
