//! Scoring module - classic line clear scoring
//!
//! Only two sources of points exist: clearing lines (table below, scaled by
//! level) and soft dropping (one point per row the player pushed the piece
//! down, paid when the piece locks).

use crate::types::LINE_SCORES;

/// Calculate line clear score (Classic rules)
/// lines: number of lines cleared (1-4)
/// level: current level (0-based)
pub fn calculate_line_score(lines: usize, level: u32) -> u32 {
    if lines == 0 || lines >= LINE_SCORES.len() {
        return 0;
    }
    LINE_SCORES[lines].saturating_mul(level.saturating_add(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_scores_level_0() {
        assert_eq!(calculate_line_score(0, 0), 0);
        assert_eq!(calculate_line_score(1, 0), 40);
        assert_eq!(calculate_line_score(2, 0), 100);
        assert_eq!(calculate_line_score(3, 0), 300);
        assert_eq!(calculate_line_score(4, 0), 1200);
    }

    #[test]
    fn test_line_scores_scale_with_level() {
        assert_eq!(calculate_line_score(1, 1), 80);
        assert_eq!(calculate_line_score(4, 9), 12000);
    }

    #[test]
    fn test_impossible_clear_scores_nothing() {
        assert_eq!(calculate_line_score(5, 3), 0);
    }
}
