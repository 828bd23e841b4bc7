//! Merge module - slide and merge rules for a single line
//!
//! A line is read in extraction order (nearest the target edge first).
//! Zeros are compacted away, then equal neighbours merge pairwise walking
//! from the edge. A freshly merged tile never merges again in the same pass:
//! - `2 2 2 2` -> `4 4 0 0` (score +8)
//! - `2 2 2 0` -> `4 2 0 0` (score +4)
//! - `4 2 2 0` -> `4 4 0 0` (score +4, not 8)

use crate::grid::Line;
use crate::types::GRID_SIZE;

/// Result of sliding one line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LineMerge {
    /// The line after slide + merge, zero-padded, in extraction order.
    pub line: Line,
    /// Sum of every merged tile's new value.
    pub score: u32,
    /// Number of pairs merged.
    pub merges: u32,
}

impl LineMerge {
    /// True if sliding produced a different line than `before`.
    pub fn changed(&self, before: &Line) -> bool {
        self.line != *before
    }
}

/// Slide and merge one line towards index 0.
pub fn merge_line(line: &Line) -> LineMerge {
    // Compact: drop empties, keep relative order.
    let mut packed = [0; GRID_SIZE];
    let mut len = 0usize;
    for &v in line.iter().filter(|&&v| v != 0) {
        packed[len] = v;
        len += 1;
    }

    let mut out = LineMerge::default();
    let mut write = 0usize;
    let mut i = 0usize;
    while i < len {
        if i + 1 < len && packed[i] == packed[i + 1] {
            let merged = packed[i].saturating_mul(2);
            out.line[write] = merged;
            out.score = out.score.saturating_add(merged);
            out.merges += 1;
            i += 2;
        } else {
            out.line[write] = packed[i];
            i += 1;
        }
        write += 1;
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn merged(line: Line) -> (Line, u32) {
        let m = merge_line(&line);
        (m.line, m.score)
    }

    #[test]
    fn test_slide_without_merge() {
        assert_eq!(merged([0, 2, 0, 4]), ([2, 4, 0, 0], 0));
        assert_eq!(merged([0, 0, 0, 8]), ([8, 0, 0, 0], 0));
    }

    #[test]
    fn test_gap_does_not_block_merge() {
        assert_eq!(merged([0, 2, 0, 2]), ([4, 0, 0, 0], 4));
        assert_eq!(merged([2, 0, 0, 2]), ([4, 0, 0, 0], 4));
    }

    #[test]
    fn test_three_equal_merges_first_pair_only() {
        assert_eq!(merged([2, 2, 2, 0]), ([4, 2, 0, 0], 4));
    }

    #[test]
    fn test_four_equal_merges_pairwise() {
        let m = merge_line(&[2, 2, 2, 2]);
        assert_eq!(m.line, [4, 4, 0, 0]);
        assert_eq!(m.score, 8);
        assert_eq!(m.merges, 2);
    }

    #[test]
    fn test_merged_tile_does_not_rechain() {
        assert_eq!(merged([4, 2, 2, 0]), ([4, 4, 0, 0], 4));
        assert_eq!(merged([2, 2, 4, 0]), ([4, 4, 0, 0], 4));
        assert_eq!(merged([4, 4, 8, 0]), ([8, 8, 0, 0], 8));
    }

    #[test]
    fn test_mixed_pairs() {
        assert_eq!(merged([2, 2, 4, 4]), ([4, 8, 0, 0], 12));
        assert_eq!(merged([8, 4, 4, 2]), ([8, 8, 2, 0], 8));
    }

    #[test]
    fn test_full_line_without_pairs_is_unchanged() {
        let line = [2, 4, 8, 16];
        let m = merge_line(&line);
        assert!(!m.changed(&line));
        assert_eq!(m.score, 0);
        assert_eq!(m.merges, 0);
    }

    #[test]
    fn test_empty_line() {
        let m = merge_line(&[0; GRID_SIZE]);
        assert_eq!(m, LineMerge::default());
    }

    #[test]
    fn test_merge_conserves_tile_sum() {
        for line in [[2, 2, 2, 2], [4, 0, 4, 8], [2, 4, 2, 4], [16, 16, 0, 32]] {
            let m = merge_line(&line);
            let before: u32 = line.iter().sum();
            let after: u32 = m.line.iter().sum();
            assert_eq!(before, after, "{line:?}");
        }
    }
}
