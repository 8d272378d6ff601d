//! Image partitioning and tile dispatch.
//!
//! The image is split into non-overlapping interior rectangles, one tile
//! per rectangle. Tiles are independent: each owns its rank tables and
//! bitmap, reads the shared input, and produces the medians for its own
//! interior. Merging back into the output is a sequential row blit.
use crate::image::MedianPixel;
use crate::tile::{Rect, Tile};
use crate::traverse::sweep_tile;
use serde::Deserialize;

/// Controls whether tiles are processed sequentially or with Rayon.
#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(default)]
pub struct ParallelTileOptions {
    enabled: bool,
    min_tiles_for_parallel: usize,
}

impl ParallelTileOptions {
    /// Construct explicit options.
    pub fn new(enabled: bool, min_tiles_for_parallel: usize) -> Self {
        Self {
            enabled,
            min_tiles_for_parallel: min_tiles_for_parallel.max(1),
        }
    }

    /// Disable parallel dispatch regardless of tile count.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            min_tiles_for_parallel: usize::MAX,
        }
    }

    /// Returns true when parallel dispatch should be used for `tile_count`.
    pub fn should_parallelize(&self, tile_count: usize) -> bool {
        self.enabled && tile_count >= self.min_tiles_for_parallel
    }
}

impl Default for ParallelTileOptions {
    fn default() -> Self {
        Self {
            enabled: cfg!(feature = "parallel"),
            min_tiles_for_parallel: 2,
        }
    }
}

/// Worker count used when the caller does not pin one.
pub fn default_workers() -> usize {
    #[cfg(feature = "parallel")]
    {
        rayon::current_num_threads()
    }
    #[cfg(not(feature = "parallel"))]
    {
        std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1)
    }
}

/// Interior block size for a `width x height` image shared by `workers`
/// threads. Aims for a few tiles per worker, floors the block at 32 pixels
/// per side, and caps it so large images still split.
pub fn block_size(width: usize, height: usize, workers: usize) -> (usize, usize) {
    if width <= 64 && height <= 64 {
        return (width, height);
    }
    let target_tiles = (workers * 3).max(4);
    let per_dim = ((target_tiles as f64).sqrt() as usize).max(1);
    let bx = width.div_ceil(per_dim).max(32).min((width / 2).max(64));
    let by = height.div_ceil(per_dim).max(32).min((height / 2).max(64));
    (bx, by)
}

/// Split the image into interior rectangles of at most `bx x by` pixels.
/// Interiors are disjoint and cover every pixel exactly once.
pub fn partition(width: usize, height: usize, bx: usize, by: usize) -> Vec<Rect> {
    if width == 0 || height == 0 {
        return Vec::new();
    }
    let mut interiors = Vec::new();
    for y0 in (0..height).step_by(by) {
        for x0 in (0..width).step_by(bx) {
            interiors.push(Rect {
                x0,
                y0,
                x1: (x0 + bx - 1).min(width - 1),
                y1: (y0 + by - 1).min(height - 1),
            });
        }
    }
    interiors
}

/// Filter every interior in `interiors` and write the medians to `output`.
///
/// The input is shared read-only; each output pixel belongs to exactly one
/// interior, so the merge needs no synchronization.
pub fn run<P: MedianPixel>(
    input: &[P],
    output: &mut [P],
    height: usize,
    width: usize,
    hy: usize,
    hx: usize,
    interiors: &[Rect],
    workers: Option<usize>,
    parallel: ParallelTileOptions,
) {
    let results = run_tiles(input, width, height, hy, hx, interiors, workers, parallel);
    for (interior, medians) in interiors.iter().zip(results) {
        let iw = interior.width();
        for (dy, chunk) in medians.chunks_exact(iw).enumerate() {
            let start = (interior.y0 + dy) * width + interior.x0;
            output[start..start + iw].copy_from_slice(chunk);
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn run_tiles<P: MedianPixel>(
    input: &[P],
    width: usize,
    height: usize,
    hy: usize,
    hx: usize,
    interiors: &[Rect],
    workers: Option<usize>,
    parallel: ParallelTileOptions,
) -> Vec<Vec<P>> {
    if parallel.should_parallelize(interiors.len()) {
        #[cfg(feature = "parallel")]
        {
            return run_tiles_parallel(input, width, height, hy, hx, interiors, workers);
        }
    }
    let _ = workers;
    run_tiles_sequential(input, width, height, hy, hx, interiors)
}

fn run_tiles_sequential<P: MedianPixel>(
    input: &[P],
    width: usize,
    height: usize,
    hy: usize,
    hx: usize,
    interiors: &[Rect],
) -> Vec<Vec<P>> {
    interiors
        .iter()
        .map(|&interior| run_one(input, width, height, hy, hx, interior))
        .collect()
}

#[cfg(feature = "parallel")]
fn run_tiles_parallel<P: MedianPixel>(
    input: &[P],
    width: usize,
    height: usize,
    hy: usize,
    hx: usize,
    interiors: &[Rect],
    workers: Option<usize>,
) -> Vec<Vec<P>> {
    use log::debug;
    use rayon::prelude::*;

    let work = || {
        interiors
            .par_iter()
            .map(|&interior| run_one(input, width, height, hy, hx, interior))
            .collect()
    };
    match workers {
        Some(n) => match rayon::ThreadPoolBuilder::new().num_threads(n).build() {
            Ok(pool) => pool.install(work),
            Err(err) => {
                debug!("dedicated pool unavailable ({err}), using the global pool");
                work()
            }
        },
        None => work(),
    }
}

fn run_one<P: MedianPixel>(
    input: &[P],
    width: usize,
    height: usize,
    hy: usize,
    hx: usize,
    interior: Rect,
) -> Vec<P> {
    let mut tile = Tile::new(input, width, height, hy, hx, interior);
    sweep_tile(&mut tile)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_images_stay_a_single_tile() {
        assert_eq!(block_size(64, 64, 8), (64, 64));
        assert_eq!(block_size(5, 3, 16), (5, 3));
    }

    #[test]
    fn block_size_respects_floor_and_cap() {
        let (bx, by) = block_size(1000, 1000, 4);
        assert!(bx >= 32 && by >= 32);
        assert!(bx <= 500 && by <= 500);
        // narrow images cap at half the dimension or 64, whichever is larger
        let (bx, by) = block_size(129, 1000, 1);
        assert_eq!(bx, 64);
        assert_eq!(by, 500);
    }

    #[test]
    fn partition_covers_every_pixel_once() {
        let (width, height) = (130, 70);
        let interiors = partition(width, height, 48, 33);
        let mut hits = vec![0u32; width * height];
        for r in &interiors {
            for y in r.y0..=r.y1 {
                for x in r.x0..=r.x1 {
                    hits[y * width + x] += 1;
                }
            }
        }
        assert!(hits.iter().all(|&c| c == 1));
    }

    #[test]
    fn run_merges_tiles_seamlessly() {
        // constant image: any kernel, any partition, output stays constant
        let (width, height) = (97, 41);
        let input = vec![6u8; width * height];
        let mut output = vec![0u8; width * height];
        let interiors = partition(width, height, 20, 15);
        run(
            &input,
            &mut output,
            height,
            width,
            2,
            3,
            &interiors,
            None,
            ParallelTileOptions::disabled(),
        );
        assert_eq!(output, input);
    }
}
