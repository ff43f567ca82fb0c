//! Core types shared across the application.
//! Pure data, no external dependencies.

/// Board dimensions
pub const BOARD_WIDTH: u8 = 10;
pub const BOARD_HEIGHT: u8 = 20;

/// Fixed scheduler tick (milliseconds)
pub const TICK_MS: u32 = 16;

/// Gravity: base interval, per-level speedup, and floor (milliseconds)
pub const BASE_DROP_MS: u32 = 1000;
pub const DROP_STEP_MS: u32 = 100;
pub const DROP_FLOOR_MS: u32 = 100;

/// Points per cleared line, multiplied by the line count and the level
pub const LINE_SCORE_BASE: u32 = 10;

/// Lines cleared per level step
pub const LINES_PER_LEVEL: u32 = 10;

/// The maximal single-lock clear
pub const TETRIS_LINES: usize = 4;

/// Tetromino piece kinds, in palette order (color-ids 1..=7).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    T,
    I,
    S,
    Z,
    L,
    J,
    O,
}

/// All piece kinds, indexable by `color_id - 1`.
pub const ALL_KINDS: [PieceKind; 7] = [
    PieceKind::T,
    PieceKind::I,
    PieceKind::S,
    PieceKind::Z,
    PieceKind::L,
    PieceKind::J,
    PieceKind::O,
];

impl PieceKind {
    /// Color-id as stored conceptually in the grid (1..=7, 0 is empty).
    pub fn color_id(&self) -> u8 {
        match self {
            PieceKind::T => 1,
            PieceKind::I => 2,
            PieceKind::S => 3,
            PieceKind::Z => 4,
            PieceKind::L => 5,
            PieceKind::J => 6,
            PieceKind::O => 7,
        }
    }

    pub fn from_color_id(id: u8) -> Option<Self> {
        match id {
            1..=7 => Some(ALL_KINDS[(id - 1) as usize]),
            _ => None,
        }
    }
}

/// Cell on the board (None = empty, Some = filled with piece kind)
pub type Cell = Option<PieceKind>;

/// Session lifecycle states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Ready,
    Playing,
    GameOver,
}

/// Gameplay actions (lifecycle commands are separate session methods).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    MoveLeft,
    MoveRight,
    SoftDrop,
    HardDrop,
    RotateCw,
    RotateCcw,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_ids_round_trip() {
        for kind in ALL_KINDS {
            assert_eq!(PieceKind::from_color_id(kind.color_id()), Some(kind));
        }
        assert_eq!(PieceKind::from_color_id(0), None);
        assert_eq!(PieceKind::from_color_id(8), None);
    }

    #[test]
    fn color_ids_are_dense() {
        let mut ids: Vec<u8> = ALL_KINDS.iter().map(|k| k.color_id()).collect();
        ids.sort_unstable();
        assert_eq!(ids, vec![1, 2, 3, 4, 5, 6, 7]);
    }
}
