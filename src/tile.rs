//! Per-tile rank compression and window membership.
//!
//! A tile covers one interior rectangle of output pixels plus a margin of
//! one kernel half-extent on each side, clipped to the image. Pixel values
//! are sorted once at construction; afterwards the window is tracked purely
//! in rank space through a [`RankBitmap`].
use crate::bitmap::RankBitmap;
use crate::image::MedianPixel;

/// Inclusive pixel rectangle in image coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    pub x0: usize,
    pub y0: usize,
    pub x1: usize,
    pub y1: usize,
}

impl Rect {
    pub fn width(&self) -> usize {
        self.x1 - self.x0 + 1
    }

    pub fn height(&self) -> usize {
        self.y1 - self.y0 + 1
    }
}

/// Sliding-window state over one tile.
///
/// `sorted` is the ascending value table (rank to value) and `ranks` its
/// inverse permutation (tile-local pixel index to rank). Equal values keep
/// their tile-local order, so the tables are deterministic for any input.
pub struct Tile<P> {
    /// Tile extent in pixels.
    pub bx: usize,
    pub by: usize,
    /// Interior bounds in tile-local coordinates.
    pub x0: usize,
    pub y0: usize,
    pub x1: usize,
    pub y1: usize,
    /// Kernel half-extents.
    pub hx: usize,
    pub hy: usize,
    sorted: Vec<P>,
    ranks: Vec<u32>,
    bits: RankBitmap,
}

impl<P: MedianPixel> Tile<P> {
    /// Build tile state for `interior`, inflating it by the kernel
    /// half-extents and clipping to the `width x height` image.
    pub fn new(
        input: &[P],
        width: usize,
        height: usize,
        hy: usize,
        hx: usize,
        interior: Rect,
    ) -> Self {
        let x0b = interior.x0.saturating_sub(hx);
        let y0b = interior.y0.saturating_sub(hy);
        let x1b = (interior.x1 + hx).min(width - 1);
        let y1b = (interior.y1 + hy).min(height - 1);
        let bx = x1b - x0b + 1;
        let by = y1b - y0b + 1;
        let n = bx * by;

        let mut order: Vec<(P, u32)> = Vec::with_capacity(n);
        for dy in 0..by {
            let row = &input[(y0b + dy) * width + x0b..][..bx];
            for (dx, &v) in row.iter().enumerate() {
                order.push((v, (dy * bx + dx) as u32));
            }
        }
        // stable sort keeps equal values in tile-local index order
        order.sort_by(|a, b| P::cmp_values(&a.0, &b.0));

        let mut sorted = Vec::with_capacity(n);
        let mut ranks = vec![0u32; n];
        for (r, &(v, idx)) in order.iter().enumerate() {
            sorted.push(v);
            ranks[idx as usize] = r as u32;
        }

        Self {
            bx,
            by,
            x0: interior.x0 - x0b,
            y0: interior.y0 - y0b,
            x1: interior.x1 - x0b,
            y1: interior.y1 - y0b,
            hx,
            hy,
            sorted,
            ranks,
            bits: RankBitmap::new(n),
        }
    }

    /// Insert the pixel at tile-local `(ix, jy)` into the window.
    /// Coordinates outside the tile are ignored; the clipped margin of an
    /// edge tile is exactly the part of the kernel that left the image.
    #[inline]
    pub fn add(&mut self, ix: isize, jy: isize) {
        if ix < 0 || jy < 0 || ix >= self.bx as isize || jy >= self.by as isize {
            return;
        }
        let r = self.ranks[jy as usize * self.bx + ix as usize] as usize;
        self.bits.insert(r);
    }

    /// Drop the pixel at tile-local `(ix, jy)` from the window.
    /// Coordinates outside the tile are ignored.
    #[inline]
    pub fn remove(&mut self, ix: isize, jy: isize) {
        if ix < 0 || jy < 0 || ix >= self.bx as isize || jy >= self.by as isize {
            return;
        }
        let r = self.ranks[jy as usize * self.bx + ix as usize] as usize;
        self.bits.remove(r);
    }

    /// Number of pixels currently inside the window.
    #[inline]
    pub fn window_len(&self) -> usize {
        self.bits.len()
    }

    /// Median of the values currently inside the window.
    ///
    /// The window must be non-empty.
    #[inline]
    pub fn median(&mut self) -> P {
        let s = self.bits.len();
        debug_assert!(s > 0, "median of an empty window");
        let lo = self.bits.select((s - 1) / 2);
        if s % 2 == 1 {
            self.sorted[lo]
        } else {
            let hi = self.bits.select(s / 2);
            P::average(self.sorted[lo], self.sorted[hi])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rank_table_is_a_stable_permutation() {
        // 3x2 tile with a duplicated value; ties keep tile-local order
        let input: Vec<f32> = vec![5.0, 1.0, 5.0, 2.0, 5.0, 0.0];
        let tile = Tile::new(
            &input,
            3,
            2,
            0,
            0,
            Rect {
                x0: 0,
                y0: 0,
                x1: 2,
                y1: 1,
            },
        );
        let mut seen = tile.ranks.clone();
        seen.sort_unstable();
        assert_eq!(seen, (0..6).collect::<Vec<u32>>());
        // values sorted: 0, 1, 2, 5, 5, 5 with the three fives at local
        // indices 0, 2, 4 in that order
        assert_eq!(tile.ranks, vec![3, 1, 4, 2, 5, 0]);
        assert_eq!(tile.sorted, vec![0.0, 1.0, 2.0, 5.0, 5.0, 5.0]);
    }

    #[test]
    fn add_remove_median_small_window() {
        let input: Vec<f32> = vec![9.0, 3.0, 7.0, 1.0];
        let mut tile = Tile::new(
            &input,
            2,
            2,
            1,
            1,
            Rect {
                x0: 0,
                y0: 0,
                x1: 1,
                y1: 1,
            },
        );
        for jy in 0..2 {
            for ix in 0..2 {
                tile.add(ix, jy);
            }
        }
        assert_eq!(tile.window_len(), 4);
        // middles of {1, 3, 7, 9} are 3 and 7
        assert_eq!(tile.median(), 5.0);
        tile.remove(0, 0); // drop the 9
        assert_eq!(tile.median(), 3.0);
    }

    #[test]
    fn out_of_tile_coordinates_are_ignored() {
        let input: Vec<u8> = vec![10, 20, 30, 40];
        let mut tile = Tile::new(
            &input,
            2,
            2,
            1,
            1,
            Rect {
                x0: 0,
                y0: 0,
                x1: 1,
                y1: 1,
            },
        );
        tile.add(-1, 0);
        tile.add(0, -1);
        tile.add(2, 0);
        tile.add(0, 2);
        assert_eq!(tile.window_len(), 0);
        tile.add(1, 1);
        tile.remove(-1, 5);
        assert_eq!(tile.window_len(), 1);
        assert_eq!(tile.median(), 40);
    }

    #[test]
    fn u8_even_window_rounds_half_up() {
        let input: Vec<u8> = vec![10, 11, 200, 201];
        let mut tile = Tile::new(
            &input,
            4,
            1,
            0,
            1,
            Rect {
                x0: 0,
                y0: 0,
                x1: 3,
                y1: 0,
            },
        );
        tile.add(0, 0);
        tile.add(1, 0);
        assert_eq!(tile.median(), 11); // (10 + 11 + 1) / 2
        tile.add(2, 0);
        tile.add(3, 0);
        assert_eq!(tile.median(), 106); // (11 + 200 + 1) / 2
    }

    #[test]
    fn edge_interior_clips_tile_to_image() {
        // interior at the image corner; the inflated tile must not leave
        // the image and local interior offsets shift accordingly
        let input: Vec<f32> = (0..25).map(|v| v as f32).collect();
        let tile = Tile::new(
            &input,
            5,
            5,
            2,
            2,
            Rect {
                x0: 0,
                y0: 0,
                x1: 1,
                y1: 1,
            },
        );
        assert_eq!((tile.bx, tile.by), (4, 4));
        assert_eq!((tile.x0, tile.y0), (0, 0));
        assert_eq!((tile.x1, tile.y1), (1, 1));

        let inner = Tile::new(
            &input,
            5,
            5,
            2,
            2,
            Rect {
                x0: 3,
                y0: 3,
                x1: 4,
                y1: 4,
            },
        );
        assert_eq!((inner.bx, inner.by), (4, 4));
        assert_eq!((inner.x0, inner.y0), (2, 2));
    }
}
