#![doc = include_str!("../README.md")]

// Filter API and pixel buffers.
pub mod filter;
pub mod image;

// The ranked-bitmap engine, one module per stage: popcount index, per-tile
// rank tables, serpentine sweep, partitioning and dispatch. Public so each
// stage can be exercised and benchmarked on its own.
pub mod bitmap;
pub mod driver;
pub mod tile;
pub mod traverse;

// --- High-level re-exports -------------------------------------------------

// Main entry points: filter functions + run summary.
pub use crate::filter::{
    median_filter_f32, median_filter_into, median_filter_u8, FilterReport, MedianParams,
};

// Dispatch policy for callers tuning the tile driver.
pub use crate::driver::ParallelTileOptions;

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```
/// use median_rank::prelude::*;
///
/// let img = ImageU8::from_vec(4, 2, vec![9, 1, 4, 4, 7, 2, 8, 3]);
/// let out = median_filter_u8(&img, &MedianParams::default());
/// assert_eq!((out.w, out.h), (4, 2));
/// ```
pub mod prelude {
    pub use crate::filter::{median_filter_f32, median_filter_u8, MedianParams};
    pub use crate::image::{ImageF32, ImageU8};
}
