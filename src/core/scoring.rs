//! Scoring module - line score, level progression, and gravity speed.

use crate::types::{
    BASE_DROP_MS, DROP_FLOOR_MS, DROP_STEP_MS, LINES_PER_LEVEL, LINE_SCORE_BASE, TETRIS_LINES,
};

/// Points for clearing `lines` rows in one lock at the given level.
/// The level is the value before this event's lines are added.
pub fn line_clear_score(lines: usize, level: u32) -> u32 {
    lines as u32 * LINE_SCORE_BASE * level
}

/// Level derived from total lines cleared: `lines / 10 + 1`.
pub fn level_for_lines(lines: u32) -> u32 {
    lines / LINES_PER_LEVEL + 1
}

/// Gravity interval for a level: `max(100, 1000 - (level - 1) * 100)`.
pub fn drop_interval_ms(level: u32) -> u32 {
    BASE_DROP_MS
        .saturating_sub(level.saturating_sub(1).saturating_mul(DROP_STEP_MS))
        .max(DROP_FLOOR_MS)
}

/// The distinguished maximal clear, for feedback only.
pub fn is_tetris(lines: usize) -> bool {
    lines == TETRIS_LINES
}
