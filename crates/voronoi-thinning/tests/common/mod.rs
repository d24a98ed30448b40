#![allow(dead_code)]

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use voronoi_image::{BinaryImage, ImageError, ImageSize};

const NEIGHBORS_8: [(isize, isize); 8] = [
    (-1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
];

const NEIGHBORS_4: [(isize, isize); 4] = [(-1, 0), (0, 1), (1, 0), (0, -1)];

/// Background image with the pixels selected by `inside(row, col)` set.
pub fn shape(
    width: usize,
    height: usize,
    inside: impl Fn(usize, usize) -> bool,
) -> Result<BinaryImage, ImageError> {
    let points = (0..height)
        .flat_map(|r| (0..width).map(move |c| (r, c)))
        .filter(|&(r, c)| inside(r, c))
        .collect::<Vec<_>>();
    BinaryImage::from_points(ImageSize { width, height }, &points)
}

/// Ring centered in a square image; `inner < d <= outer` in squared-distance terms.
pub fn annulus(outer: usize, inner: usize) -> Result<BinaryImage, ImageError> {
    let n = 2 * outer + 5;
    let center = (n / 2) as isize;
    let (outer2, inner2) = ((outer * outer) as isize, (inner * inner) as isize);
    shape(n, n, |r, c| {
        let (dr, dc) = (r as isize - center, c as isize - center);
        let d2 = dr * dr + dc * dc;
        d2 > inner2 && d2 <= outer2
    })
}

/// Seeded random mask where each pixel is foreground with probability `density`.
pub fn random_mask(
    seed: u64,
    width: usize,
    height: usize,
    density: f64,
) -> Result<BinaryImage, ImageError> {
    let mut rng = StdRng::seed_from_u64(seed);
    let data = (0..width * height)
        .map(|_| rng.random_bool(density) as u8)
        .collect();
    BinaryImage::new(ImageSize { width, height }, data)
}

fn label(image: &BinaryImage, value: u8, neighbors: &[(isize, isize)]) -> Vec<bool> {
    // returns, per component, whether it touches the image border
    let (w, h) = (image.width() as isize, image.height() as isize);
    let mut seen = vec![false; image.as_slice().len()];
    let mut components = Vec::new();

    for start in 0..seen.len() {
        if seen[start] || image.as_slice()[start] != value {
            continue;
        }
        seen[start] = true;
        let mut stack = vec![start];
        let mut touches_border = false;

        while let Some(idx) = stack.pop() {
            let (r, c) = ((idx as isize) / w, (idx as isize) % w);
            if r == 0 || c == 0 || r == h - 1 || c == w - 1 {
                touches_border = true;
            }
            for (dr, dc) in neighbors {
                let (nr, nc) = (r + dr, c + dc);
                if !image.contains(nr, nc) || image.get(nr, nc) != value {
                    continue;
                }
                let nidx = (nr * w + nc) as usize;
                if !seen[nidx] {
                    seen[nidx] = true;
                    stack.push(nidx);
                }
            }
        }
        components.push(touches_border);
    }

    components
}

/// Number of 8-connected foreground components.
pub fn count_components(image: &BinaryImage) -> usize {
    label(image, 1, &NEIGHBORS_8).len()
}

/// Number of 4-connected background components enclosed by foreground.
pub fn count_holes(image: &BinaryImage) -> usize {
    label(image, 0, &NEIGHBORS_4)
        .into_iter()
        .filter(|touches_border| !touches_border)
        .count()
}

/// Whether every foreground pixel of `output` is foreground in `input`.
pub fn is_subset(output: &BinaryImage, input: &BinaryImage) -> bool {
    output
        .as_slice()
        .iter()
        .zip(input.as_slice())
        .all(|(&o, &i)| o <= i)
}
