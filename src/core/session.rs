//! Session module - the complete game session state machine.
//!
//! A `GameSession` owns the board, the active piece, the upcoming kind,
//! and the scoring stats. Every operation is synchronous and pure state
//! transition; there is no I/O and no self-rescheduling. Gravity is
//! driven externally by feeding elapsed time into [`GameSession::tick`].
//!
//! Lifecycle: Ready -> Playing on `start` (resets everything and draws
//! the first two pieces), Playing -> GameOver on spawn collision (the
//! board is cleared), GameOver -> Ready only via `restart`. There is no
//! pause state; a caller that wants one stops calling `tick`.

use crate::core::rng::{PieceSource, UniformPicker};
use crate::core::scoring::{drop_interval_ms, is_tetris, level_for_lines, line_clear_score};
use crate::core::{Board, Shape};
use crate::types::{GameAction, Phase, PieceKind, BASE_DROP_MS, BOARD_WIDTH};

/// The falling piece: an owned, rotatable copy of a shape template plus
/// the grid position of its matrix top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivePiece {
    pub shape: Shape,
    pub x: i8,
    pub y: i8,
}

impl ActivePiece {
    /// A fresh piece at the spawn position: horizontally centered, y = 0.
    pub fn spawn(kind: PieceKind) -> Self {
        let shape = Shape::template(kind);
        let x = (BOARD_WIDTH / 2) as i8 - (shape.width() / 2) as i8;
        Self { shape, x, y: 0 }
    }
}

/// What a lock event produced, with the stats after it. Consumed by
/// observers via [`GameSession::take_last_event`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockEvent {
    pub lines_cleared: usize,
    pub score: u32,
    pub lines: u32,
    pub level: u32,
    /// The distinguished 4-line clear, for feedback only.
    pub tetris: bool,
    /// The spawn that followed this lock collided (session is GameOver).
    pub topped_out: bool,
}

/// One independent game session. Owned by the caller; multiple sessions
/// can coexist and tests can drive one deterministically through the
/// injected piece source.
#[derive(Debug, Clone)]
pub struct GameSession<S: PieceSource> {
    board: Board,
    active: Option<ActivePiece>,
    next: Option<PieceKind>,
    source: S,
    phase: Phase,
    score: u32,
    lines: u32,
    level: u32,
    drop_interval_ms: u32,
    drop_timer_ms: u32,
    last_event: Option<LockEvent>,
}

impl GameSession<UniformPicker> {
    /// Session backed by the seeded uniform picker.
    pub fn with_seed(seed: u32) -> Self {
        Self::new(UniformPicker::new(seed))
    }
}

impl<S: PieceSource> GameSession<S> {
    pub fn new(source: S) -> Self {
        Self {
            board: Board::new(),
            active: None,
            next: None,
            source,
            phase: Phase::Ready,
            score: 0,
            lines: 0,
            level: 1,
            drop_interval_ms: BASE_DROP_MS,
            drop_timer_ms: 0,
            last_event: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn active(&self) -> Option<&ActivePiece> {
        self.active.as_ref()
    }

    pub fn next_kind(&self) -> Option<PieceKind> {
        self.next
    }

    /// The upcoming shape template, for the preview box.
    pub fn next_shape(&self) -> Option<Shape> {
        self.next.map(Shape::template)
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn drop_interval_ms(&self) -> u32 {
        self.drop_interval_ms
    }

    /// Take and clear the last lock event.
    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.last_event.take()
    }

    /// Ready -> Playing: reset board and stats, draw the first two pieces.
    pub fn start(&mut self) -> bool {
        if self.phase != Phase::Ready {
            return false;
        }
        self.board.clear();
        self.score = 0;
        self.lines = 0;
        self.level = 1;
        self.drop_interval_ms = BASE_DROP_MS;
        self.drop_timer_ms = 0;
        self.last_event = None;
        self.phase = Phase::Playing;

        self.next = Some(self.source.next_kind());
        self.spawn_piece();
        true
    }

    /// GameOver -> Ready. The board was already cleared at top-out.
    pub fn restart(&mut self) -> bool {
        if self.phase != Phase::GameOver {
            return false;
        }
        self.phase = Phase::Ready;
        self.active = None;
        self.next = None;
        self.last_event = None;
        true
    }

    /// Shift the active piece horizontally; revert when blocked.
    pub fn try_move(&mut self, dir: i8) -> bool {
        if self.phase != Phase::Playing {
            return false;
        }
        let Some(piece) = self.active.as_mut() else {
            return false;
        };
        if self.board.collides(&piece.shape, piece.x + dir, piece.y) {
            return false;
        }
        piece.x += dir;
        true
    }

    /// Rotate the active piece, kicking horizontally when blocked.
    ///
    /// The kick search is a linear scan, not a kick table: cumulative offsets
    /// +1, -2, +3, -4, ... applied to x until the piece fits, bounded by
    /// the shape's width. On exhaustion the rotation and x are reverted.
    pub fn try_rotate(&mut self, clockwise: bool) -> bool {
        if self.phase != Phase::Playing {
            return false;
        }
        let Some(piece) = self.active.as_mut() else {
            return false;
        };

        let saved_x = piece.x;
        piece.shape.rotate(clockwise);

        let mut offset: i8 = 1;
        while self.board.collides(&piece.shape, piece.x, piece.y) {
            piece.x += offset;
            offset = -(offset + if offset > 0 { 1 } else { -1 });
            if offset > piece.shape.width() as i8 {
                piece.shape.rotate(!clockwise);
                piece.x = saved_x;
                return false;
            }
        }
        true
    }

    /// Move the active piece down one row. On collision the move is
    /// reverted and the piece locks: merge, sweep, stats, spawn. This is
    /// the single lock path for both gravity and the user's soft drop.
    ///
    /// Returns true when the piece moved (no lock happened).
    pub fn soft_drop(&mut self) -> bool {
        if self.phase != Phase::Playing {
            return false;
        }
        let Some(piece) = self.active.as_mut() else {
            return false;
        };

        self.drop_timer_ms = 0;

        if self.board.collides(&piece.shape, piece.x, piece.y + 1) {
            self.lock_active();
            return false;
        }
        piece.y += 1;
        true
    }

    /// Resolve the entire fall synchronously, then lock.
    /// Returns the number of rows fallen.
    pub fn hard_drop(&mut self) -> u32 {
        if self.phase != Phase::Playing {
            return 0;
        }
        let Some(piece) = self.active.as_mut() else {
            return 0;
        };

        let mut distance: u32 = 0;
        while !self.board.collides(&piece.shape, piece.x, piece.y + 1) {
            piece.y += 1;
            distance += 1;
        }

        self.drop_timer_ms = 0;
        self.lock_active();
        distance
    }

    /// Advance gravity by elapsed time. Invokes the soft-drop path once
    /// the accumulator exceeds the current drop interval.
    ///
    /// Returns true when a gravity drop (or lock) occurred.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        if self.phase != Phase::Playing {
            return false;
        }
        self.drop_timer_ms += elapsed_ms;
        if self.drop_timer_ms > self.drop_interval_ms {
            self.soft_drop();
            return true;
        }
        false
    }

    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::MoveLeft => self.try_move(-1),
            GameAction::MoveRight => self.try_move(1),
            GameAction::SoftDrop => {
                self.soft_drop();
                true
            }
            GameAction::HardDrop => {
                self.hard_drop();
                true
            }
            GameAction::RotateCw => self.try_rotate(true),
            GameAction::RotateCcw => self.try_rotate(false),
        }
    }

    /// The row the active piece would land on, for the ghost outline.
    pub fn ghost_y(&self) -> Option<i8> {
        let piece = self.active.as_ref()?;
        let mut y = piece.y;
        while !self.board.collides(&piece.shape, piece.x, y + 1) {
            y += 1;
        }
        Some(y)
    }

    /// Merge the active piece, sweep full rows, update stats with the
    /// pre-event level, then spawn the next piece.
    fn lock_active(&mut self) {
        let Some(piece) = self.active.take() else {
            return;
        };
        self.board.merge(&piece.shape, piece.x, piece.y);

        let cleared = self.board.sweep();
        if cleared > 0 {
            self.score += line_clear_score(cleared, self.level);
            self.lines += cleared as u32;
            self.level = level_for_lines(self.lines);
            self.drop_interval_ms = drop_interval_ms(self.level);
        }

        self.spawn_piece();

        self.last_event = Some(LockEvent {
            lines_cleared: cleared,
            score: self.score,
            lines: self.lines,
            level: self.level,
            tetris: is_tetris(cleared),
            topped_out: self.phase == Phase::GameOver,
        });
    }

    /// Promote the upcoming kind to active and draw a new one. A spawn
    /// collision is the top-out: board cleared, session -> GameOver.
    fn spawn_piece(&mut self) -> bool {
        let Some(kind) = self.next else {
            return false;
        };
        let piece = ActivePiece::spawn(kind);

        if self.board.collides(&piece.shape, piece.x, piece.y) {
            self.board.clear();
            self.active = None;
            self.next = None;
            self.phase = Phase::GameOver;
            return false;
        }

        self.active = Some(piece);
        self.next = Some(self.source.next_kind());
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rng::ScriptedPicker;
    use crate::types::BOARD_HEIGHT;

    fn session_with(kinds: Vec<PieceKind>) -> GameSession<ScriptedPicker> {
        let mut session = GameSession::new(ScriptedPicker::new(kinds));
        session.start();
        session
    }

    #[test]
    fn new_session_is_ready() {
        let session = GameSession::with_seed(12345);
        assert_eq!(session.phase(), Phase::Ready);
        assert!(session.active().is_none());
        assert!(session.next_kind().is_none());
        assert_eq!(session.score(), 0);
        assert_eq!(session.level(), 1);
        assert_eq!(session.drop_interval_ms(), 1000);
    }

    #[test]
    fn start_spawns_active_and_next() {
        let session = session_with(vec![PieceKind::T, PieceKind::I, PieceKind::O]);
        assert_eq!(session.phase(), Phase::Playing);
        assert_eq!(session.active().unwrap().shape.kind(), PieceKind::T);
        assert_eq!(session.next_kind(), Some(PieceKind::I));
    }

    #[test]
    fn start_only_from_ready() {
        let mut session = session_with(vec![PieceKind::T]);
        assert!(!session.start());
    }

    #[test]
    fn spawn_positions_are_centered() {
        // 3-wide T: x = 5 - 1 = 4. 4-wide I: x = 5 - 2 = 3. 2-wide O: x = 5 - 1 = 4.
        assert_eq!(ActivePiece::spawn(PieceKind::T).x, 4);
        assert_eq!(ActivePiece::spawn(PieceKind::I).x, 3);
        assert_eq!(ActivePiece::spawn(PieceKind::O).x, 4);
        assert_eq!(ActivePiece::spawn(PieceKind::T).y, 0);
    }

    #[test]
    fn move_commits_or_reverts() {
        let mut session = session_with(vec![PieceKind::O]);
        let start_x = session.active().unwrap().x;

        assert!(session.try_move(1));
        assert_eq!(session.active().unwrap().x, start_x + 1);
        assert!(session.try_move(-1));
        assert_eq!(session.active().unwrap().x, start_x);

        // Walk into the left wall; position must stop changing.
        let mut moves = 0;
        while session.try_move(-1) {
            moves += 1;
            assert!(moves < 10, "never blocked by the wall");
        }
        let blocked_x = session.active().unwrap().x;
        assert!(!session.try_move(-1));
        assert_eq!(session.active().unwrap().x, blocked_x);
    }

    #[test]
    fn gravity_strictly_exceeds_interval() {
        let mut session = session_with(vec![PieceKind::T]);
        let y0 = session.active().unwrap().y;

        // Exactly the interval: no drop yet, the comparison is strict.
        assert!(!session.tick(1000));
        assert_eq!(session.active().unwrap().y, y0);

        assert!(session.tick(1));
        assert_eq!(session.active().unwrap().y, y0 + 1);
    }

    #[test]
    fn soft_drop_resets_gravity_accumulator() {
        let mut session = session_with(vec![PieceKind::T]);
        session.tick(900);
        assert!(session.soft_drop());
        // The 900ms accumulated before the manual drop no longer count.
        assert!(!session.tick(900));
        assert!(session.tick(101));
    }

    #[test]
    fn hard_drop_locks_and_spawns() {
        let mut session = session_with(vec![PieceKind::O, PieceKind::T, PieceKind::I]);
        let distance = session.hard_drop();
        // O spawns at y=0 and its matrix is 2 tall: 18 rows of fall.
        assert_eq!(distance, 18);

        // Locked into the bottom rows.
        assert_eq!(session.board().get(4, 19), Some(Some(PieceKind::O)));
        assert_eq!(session.board().get(5, 18), Some(Some(PieceKind::O)));

        // Next piece became active.
        assert_eq!(session.active().unwrap().shape.kind(), PieceKind::T);
        assert_eq!(session.next_kind(), Some(PieceKind::I));

        let event = session.take_last_event().unwrap();
        assert_eq!(event.lines_cleared, 0);
        assert!(!event.topped_out);
    }

    #[test]
    fn lock_event_reports_single_clear_score() {
        let mut session = session_with(vec![PieceKind::O, PieceKind::T, PieceKind::I]);
        // Fill the bottom row except the O's spawn columns (4 and 5).
        for x in 0..BOARD_WIDTH as i8 {
            if x != 4 && x != 5 {
                session.board.set(x, 19, Some(PieceKind::I));
            }
        }

        session.hard_drop();

        let event = session.take_last_event().unwrap();
        assert_eq!(event.lines_cleared, 1);
        assert!(!event.tetris);
        assert_eq!(session.score(), 10);
        assert_eq!(session.lines(), 1);
        assert_eq!(session.level(), 1);
        // The O's upper row slid down into the cleared slot.
        assert_eq!(session.board().get(4, 19), Some(Some(PieceKind::O)));
        assert_eq!(session.board().get(5, 19), Some(Some(PieceKind::O)));
    }

    #[test]
    fn scoring_uses_pre_event_level() {
        let mut session = session_with(vec![PieceKind::O, PieceKind::T]);
        // 9 lines already cleared: still level 1. The next clear crosses
        // the threshold but must score with the old level.
        session.lines = 9;
        for x in 0..BOARD_WIDTH as i8 {
            if x != 4 && x != 5 {
                session.board.set(x, 19, Some(PieceKind::I));
            }
        }

        session.hard_drop();

        assert_eq!(session.lines(), 10);
        assert_eq!(session.level(), 2);
        assert_eq!(session.drop_interval_ms(), 900);
        // 1 * 10 * 1, not 1 * 10 * 2.
        assert_eq!(session.score(), 10);
    }

    #[test]
    fn level_and_interval_invariants_hold_after_locks() {
        let mut session = session_with(vec![
            PieceKind::I,
            PieceKind::O,
            PieceKind::T,
            PieceKind::S,
            PieceKind::Z,
            PieceKind::L,
            PieceKind::J,
        ]);
        for _ in 0..30 {
            if session.phase() != Phase::Playing {
                break;
            }
            session.hard_drop();
            assert_eq!(session.level(), session.lines() / 10 + 1);
            let expected = 1000u32.saturating_sub((session.level() - 1) * 100).max(100);
            assert_eq!(session.drop_interval_ms(), expected);
        }
    }

    #[test]
    fn top_out_clears_board_and_ends_session() {
        let mut session = session_with(vec![PieceKind::O, PieceKind::O]);
        // Block the O spawn cells at the top.
        session.board.set(4, 0, Some(PieceKind::I));
        session.board.set(5, 1, Some(PieceKind::I));

        session.hard_drop();

        assert_eq!(session.phase(), Phase::GameOver);
        assert!(session.active().is_none());
        assert!(session.board().cells().iter().all(|c| c.is_none()));
        let event = session.take_last_event().unwrap();
        assert!(event.topped_out);
    }

    #[test]
    fn restart_returns_to_ready_only_from_game_over() {
        let mut session = session_with(vec![PieceKind::O]);
        assert!(!session.restart());

        session.board.set(4, 0, Some(PieceKind::I));
        session.hard_drop();
        assert_eq!(session.phase(), Phase::GameOver);

        assert!(session.restart());
        assert_eq!(session.phase(), Phase::Ready);
        assert!(session.start());
        assert_eq!(session.phase(), Phase::Playing);
        assert_eq!(session.score(), 0);
        assert_eq!(session.lines(), 0);
        assert_eq!(session.level(), 1);
    }

    #[test]
    fn actions_are_rejected_outside_playing() {
        let mut session = GameSession::new(ScriptedPicker::new(vec![PieceKind::T]));
        assert!(!session.try_move(1));
        assert!(!session.try_rotate(true));
        assert!(!session.soft_drop());
        assert_eq!(session.hard_drop(), 0);
        assert!(!session.tick(10_000));
        assert_eq!(session.phase(), Phase::Ready);
    }

    #[test]
    fn rotation_kick_near_right_wall() {
        let mut session = session_with(vec![PieceKind::I]);
        // Vertical I one column off the right wall (occupied column 8).
        while session.try_move(1) {}
        assert!(session.try_move(-1));
        assert_eq!(session.active().unwrap().x, 7);

        // The horizontal orientation needs x <= 6; the search tests the
        // cumulative offsets +1 then -1 and lands on x = 6.
        assert!(session.try_rotate(true));
        assert_eq!(session.active().unwrap().x, 6);
    }

    #[test]
    fn rotation_reverts_flush_against_right_wall() {
        let mut session = session_with(vec![PieceKind::I]);
        // Flush against the wall (x = 8): the tested offsets +1, -1, +2
        // all still collide and the bound cuts the search off before a
        // further leftward try, so the rotation is a no-op.
        while session.try_move(1) {}
        let before = *session.active().unwrap();
        assert_eq!(before.x, 8);

        assert!(!session.try_rotate(true));
        assert_eq!(*session.active().unwrap(), before);
    }

    #[test]
    fn rotation_reverts_when_interior_is_blocked() {
        let mut session = session_with(vec![PieceKind::I]);
        while session.try_move(1) {}
        assert!(session.try_move(-1));
        // Wall the landing columns off so no offset within the bound fits.
        for y in 0..BOARD_HEIGHT as i8 {
            session.board.set(5, y, Some(PieceKind::T));
            session.board.set(6, y, Some(PieceKind::T));
        }

        let before = *session.active().unwrap();
        assert!(!session.try_rotate(true));
        assert_eq!(*session.active().unwrap(), before);
    }

    #[test]
    fn ghost_matches_hard_drop_landing() {
        let mut session = session_with(vec![PieceKind::T, PieceKind::O]);
        let ghost = session.ghost_y().unwrap();
        let y0 = session.active().unwrap().y;
        let distance = session.hard_drop();
        assert_eq!(ghost, y0 + distance as i8);
    }

    #[test]
    fn ghost_does_not_mutate_state() {
        let session = session_with(vec![PieceKind::T]);
        let before = session.clone();
        let _ = session.ghost_y();
        assert_eq!(session.active(), before.active());
        assert_eq!(session.board().cells(), before.board().cells());
    }
}
