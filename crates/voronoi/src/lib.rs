#![doc = env!("CARGO_PKG_DESCRIPTION")]

#[doc(inline)]
pub use voronoi_image as image;

#[doc(inline)]
pub use voronoi_thinning as thinning;
