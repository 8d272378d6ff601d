//! Serpentine window sweep over one tile.
//!
//! The sweep walks the interior column by column, alternating the row
//! direction each column. Consecutive output pixels then differ by exactly
//! one kernel row or one kernel column, so the window is maintained with
//! O(hy + hx) toggles per pixel and never rebuilt.
use crate::image::MedianPixel;
use crate::tile::Tile;

/// Emit the median for every interior pixel of `tile`.
///
/// Returns the medians as a row-major buffer over the interior rectangle.
/// Every interior pixel is written exactly once.
pub fn sweep_tile<P: MedianPixel>(tile: &mut Tile<P>) -> Vec<P> {
    let iw = tile.x1 - tile.x0 + 1;
    let ih = tile.y1 - tile.y0 + 1;
    let mut out = vec![P::default(); iw * ih];

    let hx = tile.hx as isize;
    let hy = tile.hy as isize;
    let (x0, x1) = (tile.x0 as isize, tile.x1 as isize);
    let (y0, y1) = (tile.y0 as isize, tile.y1 as isize);

    // Prime with every kernel column of the first window except the
    // rightmost; the first column advance below completes the window.
    for ix in x0 - hx..x0 + hx {
        for jy in y0 - hy..=y0 + hy {
            tile.add(ix, jy);
        }
    }

    let mut y = y0;
    for x in x0..=x1 {
        // Shift the window one column right, around the current row.
        for jy in y - hy..=y + hy {
            tile.remove(x - hx - 1, jy);
        }
        for jy in y - hy..=y + hy {
            tile.add(x + hx, jy);
        }

        let downward = (x - x0) % 2 == 0;
        loop {
            debug_assert_eq!(
                tile.window_len(),
                (((x + hx).min(tile.bx as isize - 1) - (x - hx).max(0) + 1)
                    * ((y + hy).min(tile.by as isize - 1) - (y - hy).max(0) + 1))
                    as usize,
                "window out of sync at local ({x}, {y})"
            );
            out[(y - y0) as usize * iw + (x - x0) as usize] = tile.median();
            if downward {
                if y == y1 {
                    break;
                }
                for ix in x - hx..=x + hx {
                    tile.remove(ix, y - hy);
                }
                y += 1;
                for ix in x - hx..=x + hx {
                    tile.add(ix, y + hy);
                }
            } else {
                if y == y0 {
                    break;
                }
                for ix in x - hx..=x + hx {
                    tile.remove(ix, y + hy);
                }
                y -= 1;
                for ix in x - hx..=x + hx {
                    tile.add(ix, y - hy);
                }
            }
        }
    }

    out
}
