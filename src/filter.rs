//! Public median-filter entry points.
//!
//! The filter computes, for every output pixel, the median of the kernel
//! window centred on it. Windows shrink at the image edges: the median is
//! taken over the kernel cells that fall inside the image, with no padding
//! or reflection. Even-sized windows average the two middle values, `(a+b)/2`
//! for floats and round-half-up for 8-bit data.
use crate::driver::{self, ParallelTileOptions};
use crate::image::{ImageF32, ImageU8, MedianPixel};
use log::debug;
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Kernel and scheduling knobs for one filter run.
#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(default)]
pub struct MedianParams {
    /// Kernel half-extent along y; the full kernel height is `2*hy + 1`.
    pub hy: usize,
    /// Kernel half-extent along x; the full kernel width is `2*hx + 1`.
    pub hx: usize,
    /// Worker threads for tile processing. `None` uses the global pool.
    /// Affects performance only, never the output.
    pub workers: Option<usize>,
    /// Sequential/parallel dispatch policy.
    pub parallel: ParallelTileOptions,
}

impl Default for MedianParams {
    fn default() -> Self {
        Self {
            hy: 1,
            hx: 1,
            workers: None,
            parallel: ParallelTileOptions::default(),
        }
    }
}

/// Summary of one filter run.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterReport {
    pub width: usize,
    pub height: usize,
    pub hy: usize,
    pub hx: usize,
    /// Interior block size chosen by the driver.
    pub tile_w: usize,
    pub tile_h: usize,
    pub tile_count: usize,
    pub workers: usize,
    pub latency_ms: f64,
}

/// Median-filter `input` into `output`, both dense row-major
/// `height x width` buffers. The buffers must not alias.
///
/// Returns a [`FilterReport`] describing the tile decomposition and timing.
pub fn median_filter_into<P: MedianPixel>(
    input: &[P],
    output: &mut [P],
    height: usize,
    width: usize,
    params: &MedianParams,
) -> FilterReport {
    assert_eq!(input.len(), width * height, "input size mismatch");
    assert_eq!(output.len(), width * height, "output size mismatch");

    let start = Instant::now();
    let workers = params.workers.unwrap_or_else(driver::default_workers);
    let (tile_w, tile_h) = driver::block_size(width, height, workers);
    let interiors = driver::partition(width, height, tile_w, tile_h);
    debug!(
        "median_filter start {}x{} kernel={}x{} block={}x{} tiles={} workers={}",
        width,
        height,
        2 * params.hx + 1,
        2 * params.hy + 1,
        tile_w,
        tile_h,
        interiors.len(),
        workers
    );

    driver::run(
        input,
        output,
        height,
        width,
        params.hy,
        params.hx,
        &interiors,
        params.workers,
        params.parallel,
    );

    let latency_ms = start.elapsed().as_secs_f64() * 1000.0;
    debug!("median_filter done latency_ms={latency_ms:.3}");
    FilterReport {
        width,
        height,
        hy: params.hy,
        hx: params.hx,
        tile_w,
        tile_h,
        tile_count: interiors.len(),
        workers,
        latency_ms,
    }
}

/// Median-filter a float image, returning a new image of the same shape.
pub fn median_filter_f32(input: &ImageF32, params: &MedianParams) -> ImageF32 {
    let mut out = input.same_shape();
    median_filter_into(&input.data, &mut out.data, input.h, input.w, params);
    out
}

/// Median-filter an 8-bit image, returning a new image of the same shape.
pub fn median_filter_u8(input: &ImageU8, params: &MedianParams) -> ImageU8 {
    let mut out = input.same_shape();
    median_filter_into(&input.data, &mut out.data, input.h, input.w, params);
    out
}
