use derive_more::{Deref, From};
use std::ops::Range;

/// Per raw image column, the first row at which the ground is visible.
///
/// Rows above the start show the horizon, the sky or the field boundary, so line
/// detection skips them. Columns past the end of the table are scanned from row `0`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deref, From)]
pub struct ScanStarts(pub Vec<usize>);

impl ScanStarts {
    /// Every column starts at `row`.
    pub fn uniform(width: usize, row: usize) -> Self {
        Self(vec![row; width])
    }

    pub fn start(&self, column: usize) -> usize {
        self.0.get(column).copied().unwrap_or(0)
    }

    pub fn allows(&self, column: usize, row: usize) -> bool {
        row >= self.start(column)
    }
}

/// Raw image rows occupied by the robot's own body, column by column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BodyPartMask {
    columns: Vec<Vec<Range<usize>>>,
}

impl BodyPartMask {
    pub fn new(width: usize) -> Self {
        Self {
            columns: vec![Vec::new(); width],
        }
    }

    /// Marks every row from the per column end row to the bottom of the image.
    ///
    /// `ends` is the row at which the body model says the field stops being visible.
    pub fn from_scan_ends(ends: &[usize], height: usize) -> Self {
        Self {
            columns: ends
                .iter()
                .map(|&end| {
                    if end < height {
                        vec![end..height]
                    } else {
                        Vec::new()
                    }
                })
                .collect(),
        }
    }

    /// Adds an occluded interval to `column`. Columns outside the mask are ignored.
    pub fn occlude(&mut self, column: usize, rows: Range<usize>) {
        if let Some(intervals) = self.columns.get_mut(column) {
            if !rows.is_empty() {
                intervals.push(rows);
            }
        }
    }

    pub fn covers(&self, column: usize, row: usize) -> bool {
        self.columns
            .get(column)
            .map_or(false, |intervals| intervals.iter().any(|rows| rows.contains(&row)))
    }

    pub fn is_empty(&self) -> bool {
        self.columns.iter().all(Vec::is_empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scan_ends_cover_the_bottom() {
        let mask = BodyPartMask::from_scan_ends(&[10, 4, 20], 12);
        assert!(mask.covers(0, 10));
        assert!(mask.covers(0, 11));
        assert!(!mask.covers(0, 9));
        assert!(mask.covers(1, 4));
        assert!(!mask.covers(2, 11));
        assert!(!mask.covers(3, 11));
    }

    #[test]
    fn scan_starts_default_to_the_top() {
        let starts = ScanStarts::from(vec![5, 0]);
        assert!(!starts.allows(0, 4));
        assert!(starts.allows(0, 5));
        assert!(starts.allows(7, 0));
        assert_eq!(starts.len(), 2);
    }
}
