use ndarray::Array2;
use std::ops::Range;

/// A summed-area table with one row and column of zero padding.
///
/// Entry `(r, c)` holds the sum of every sample above and to the left of `(r, c)`,
/// so any axis aligned window sum takes four lookups.
#[derive(Debug, Clone)]
pub struct IntegralImage {
    sums: Array2<u64>,
}

impl IntegralImage {
    /// Builds the table for a `height x width` grid of samples.
    pub fn new(height: usize, width: usize, sample: impl Fn(usize, usize) -> u8) -> Self {
        let mut sums = Array2::zeros((height + 1, width + 1));
        for r in 0..height {
            let mut row_sum = 0u64;
            for c in 0..width {
                row_sum += u64::from(sample(r, c));
                sums[(r + 1, c + 1)] = sums[(r, c + 1)] + row_sum;
            }
        }
        Self { sums }
    }

    pub fn height(&self) -> usize {
        self.sums.nrows() - 1
    }

    pub fn width(&self) -> usize {
        self.sums.ncols() - 1
    }

    /// Sum of the samples in `rows x cols`. The ranges must lie within the table.
    pub fn sum(&self, rows: Range<usize>, cols: Range<usize>) -> u64 {
        self.sums[(rows.end, cols.end)] + self.sums[(rows.start, cols.start)]
            - self.sums[(rows.start, cols.end)]
            - self.sums[(rows.end, cols.start)]
    }

    /// Sum and sample count of the `size x size` window centred on `(r, c)`, clipped to
    /// the table. Every sample, including the border, is handled the same way.
    pub fn window_sum(&self, r: usize, c: usize, size: usize) -> (u64, u64) {
        let rows = clamped_window(r, size, self.height());
        let cols = clamped_window(c, size, self.width());
        let count = (rows.len() * cols.len()) as u64;
        (self.sum(rows, cols), count)
    }
}

/// The extent of a window of `size` centred on `centre` within `0..len`.
pub fn clamped_window(centre: usize, size: usize, len: usize) -> Range<usize> {
    let half = size / 2;
    centre.saturating_sub(half)..(centre + half + 1).min(len)
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck_macros::quickcheck;

    fn naive(samples: &[u8], width: usize, rows: Range<usize>, cols: Range<usize>) -> u64 {
        rows.flat_map(|r| cols.clone().map(move |c| (r, c)))
            .map(|(r, c)| u64::from(samples[r * width + c]))
            .sum()
    }

    #[test]
    fn clamps_at_both_ends() {
        assert_eq!(clamped_window(0, 5, 10), 0..3);
        assert_eq!(clamped_window(9, 5, 10), 7..10);
        assert_eq!(clamped_window(4, 5, 10), 2..7);
        assert_eq!(clamped_window(1, 101, 3), 0..3);
    }

    #[quickcheck]
    fn window_sum_matches_naive_sum(samples: Vec<u8>, width: u8, size: u8) -> bool {
        let width = usize::from(width % 16) + 3;
        let height = samples.len() / width;
        if height < 3 {
            return true;
        }
        let size = usize::from(size % 9) | 1;
        let integral = IntegralImage::new(height, width, |r, c| samples[r * width + c]);
        (0..height).all(|r| {
            (0..width).all(|c| {
                let rows = clamped_window(r, size, height);
                let cols = clamped_window(c, size, width);
                let expected_count = (rows.len() * cols.len()) as u64;
                let expected = naive(&samples, width, rows, cols);
                integral.window_sum(r, c, size) == (expected, expected_count)
            })
        })
    }
}
