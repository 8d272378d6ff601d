use median_rank::image::MedianPixel;

/// Straightforward full-sort median filter used as the comparison oracle.
///
/// Windows shrink at the image edges and even-sized windows average the two
/// middle values, matching the engine's contract.
pub fn reference_median<P: MedianPixel>(
    input: &[P],
    height: usize,
    width: usize,
    hy: usize,
    hx: usize,
) -> Vec<P> {
    let mut out = vec![P::default(); width * height];
    let mut window = Vec::with_capacity((2 * hy + 1) * (2 * hx + 1));
    for y in 0..height {
        for x in 0..width {
            window.clear();
            for i in y.saturating_sub(hy)..=(y + hy).min(height - 1) {
                for j in x.saturating_sub(hx)..=(x + hx).min(width - 1) {
                    window.push(input[i * width + j]);
                }
            }
            window.sort_by(|a, b| P::cmp_values(a, b));
            let mid = window.len() / 2;
            out[y * width + x] = if window.len() % 2 == 1 {
                window[mid]
            } else {
                P::average(window[mid - 1], window[mid])
            };
        }
    }
    out
}
