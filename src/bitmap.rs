//! Incremental population-count index over tile ranks.
//!
//! One bit per rank; bit `r` is set while rank `r` lies inside the sliding
//! kernel window. A pivot word with split popcount sums keeps repeated
//! order-statistic queries cheap when consecutive queries land near each
//! other, which is how the median moves under a sliding window.

/// Bit set over `[0, n)` with a pivot-anchored `select` query.
#[derive(Clone, Debug)]
pub struct RankBitmap {
    words: Vec<u64>,
    /// Word index splitting the set-bit count into `below`/`above`.
    pivot: usize,
    below: usize,
    above: usize,
}

impl RankBitmap {
    /// Create an empty index able to hold ranks `0..n`.
    pub fn new(n: usize) -> Self {
        let words = vec![0u64; n.div_ceil(64)];
        Self {
            pivot: words.len() / 2,
            words,
            below: 0,
            above: 0,
        }
    }

    /// Number of set bits.
    #[inline]
    pub fn len(&self) -> usize {
        self.below + self.above
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Set bit `rank`. The bit must currently be clear.
    #[inline]
    pub fn insert(&mut self, rank: usize) {
        let w = rank >> 6;
        self.words[w] ^= 1u64 << (rank & 63);
        if w < self.pivot {
            self.below += 1;
        } else {
            self.above += 1;
        }
    }

    /// Clear bit `rank`. The bit must currently be set.
    #[inline]
    pub fn remove(&mut self, rank: usize) {
        let w = rank >> 6;
        self.words[w] ^= 1u64 << (rank & 63);
        if w < self.pivot {
            self.below -= 1;
        } else {
            self.above -= 1;
        }
    }

    #[inline]
    fn pop(&self, w: usize) -> usize {
        self.words[w].count_ones() as usize
    }

    /// Rank of the k-th set bit (0-indexed), `k < len()`.
    ///
    /// The pivot word persists across calls, so a run of queries around a
    /// slowly moving order statistic scans O(1) words per call on average.
    pub fn select(&mut self, k: usize) -> usize {
        while self.below > k {
            self.pivot -= 1;
            let c = self.pop(self.pivot);
            self.below -= c;
            self.above += c;
        }
        while self.below + self.pop(self.pivot) <= k {
            let c = self.pop(self.pivot);
            self.below += c;
            self.above -= c;
            self.pivot += 1;
        }
        (self.pivot << 6) | nth_set_bit(self.words[self.pivot], (k - self.below) as u32) as usize
    }
}

/// Bit position of the n-th (0-indexed) set bit of `w`.
///
/// `w` must contain more than `n` set bits. Byte-wise popcount cascade,
/// portable across architectures.
#[inline]
fn nth_set_bit(w: u64, mut n: u32) -> u32 {
    let mut shift = 0u32;
    loop {
        let byte = ((w >> shift) & 0xff) as u32;
        let count = byte.count_ones();
        if n < count {
            let mut b = byte;
            for _ in 0..n {
                b &= b - 1; // drop the lowest set bit
            }
            return shift + b.trailing_zeros();
        }
        n -= count;
        shift += 8;
    }
}
