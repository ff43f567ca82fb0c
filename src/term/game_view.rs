//! GameView: maps a `GameSession` into a terminal framebuffer.
//!
//! Pure (no I/O), so it can be unit-tested against a framebuffer.

use crate::core::rng::PieceSource;
use crate::core::{GameSession, Shape};
use crate::term::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{Phase, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Renders the board, active piece, ghost, next preview, and stats.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 compensates for typical terminal glyph aspect ratio.
        Self {
            cell_w: 2,
            cell_h: 1,
        }
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self { cell_w, cell_h }
    }

    /// Render the session into a framebuffer sized to the viewport.
    pub fn render<S: PieceSource>(&self, session: &GameSession<S>, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        fb.clear(CellStyle::default().cell(' '));

        let board_px_w = (BOARD_WIDTH as u16) * self.cell_w;
        let board_px_h = (BOARD_HEIGHT as u16) * self.cell_h;
        let frame_w = board_px_w + 2;
        let frame_h = board_px_h + 2;

        let start_x = viewport.width.saturating_sub(frame_w + PANEL_W) / 2;
        let start_y = viewport.height.saturating_sub(frame_h) / 2;

        let well = CellStyle {
            fg: Rgb::new(80, 80, 90),
            bg: Rgb::new(12, 12, 18),
            bold: false,
            dim: false,
        };
        let border = CellStyle {
            fg: Rgb::new(200, 200, 200),
            bg: Rgb::new(0, 0, 0),
            bold: false,
            dim: false,
        };

        fb.fill_rect(start_x + 1, start_y + 1, board_px_w, board_px_h, ' ', well);
        self.draw_border(&mut fb, start_x, start_y, frame_w, frame_h, border);

        // Locked cells.
        for y in 0..BOARD_HEIGHT as i8 {
            for x in 0..BOARD_WIDTH as i8 {
                if let Some(Some(kind)) = session.board().get(x, y) {
                    self.draw_board_cell(&mut fb, start_x, start_y, x as u16, y as u16, kind);
                }
            }
        }

        // Ghost outline under the active piece.
        if let (Some(active), Some(ghost_y)) = (session.active(), session.ghost_y()) {
            let ghost = CellStyle {
                fg: Rgb::new(140, 140, 140),
                bg: Rgb::new(12, 12, 18),
                bold: false,
                dim: true,
            };
            for (dx, dy) in active.shape.cells() {
                let x = active.x + dx;
                let y = ghost_y + dy;
                if (0..BOARD_WIDTH as i8).contains(&x) && (0..BOARD_HEIGHT as i8).contains(&y) {
                    self.fill_cell_rect(&mut fb, start_x, start_y, x as u16, y as u16, '░', ghost);
                }
            }
        }

        // Active piece (cells above row 0 are simply not drawn).
        if let Some(active) = session.active() {
            for (dx, dy) in active.shape.cells() {
                let x = active.x + dx;
                let y = active.y + dy;
                if (0..BOARD_WIDTH as i8).contains(&x) && (0..BOARD_HEIGHT as i8).contains(&y) {
                    self.draw_board_cell(
                        &mut fb,
                        start_x,
                        start_y,
                        x as u16,
                        y as u16,
                        active.shape.kind(),
                    );
                }
            }
        }

        self.draw_side_panel(&mut fb, session, viewport, start_x, start_y, frame_w);

        match session.phase() {
            Phase::Ready => {
                self.draw_overlay(&mut fb, start_x, start_y, frame_w, frame_h, "PRESS ENTER");
            }
            Phase::GameOver => {
                self.draw_overlay(&mut fb, start_x, start_y, frame_w, frame_h, "GAME OVER");
            }
            Phase::Playing => {}
        }

        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
        if w < 2 || h < 2 {
            return;
        }
        fb.put_char(x, y, '┌', style);
        fb.put_char(x + w - 1, y, '┐', style);
        fb.put_char(x, y + h - 1, '└', style);
        fb.put_char(x + w - 1, y + h - 1, '┘', style);
        for dx in 1..w - 1 {
            fb.put_char(x + dx, y, '─', style);
            fb.put_char(x + dx, y + h - 1, '─', style);
        }
        for dy in 1..h - 1 {
            fb.put_char(x, y + dy, '│', style);
            fb.put_char(x + w - 1, y + dy, '│', style);
        }
    }

    fn draw_board_cell(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        x: u16,
        y: u16,
        kind: PieceKind,
    ) {
        let style = CellStyle {
            fg: piece_color(kind),
            bg: Rgb::new(12, 12, 18),
            bold: true,
            dim: false,
        };
        self.fill_cell_rect(fb, start_x, start_y, x, y, '█', style);
    }

    fn fill_cell_rect(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        cell_x: u16,
        cell_y: u16,
        ch: char,
        style: CellStyle,
    ) {
        let px = start_x + 1 + cell_x * self.cell_w;
        let py = start_y + 1 + cell_y * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel<S: PieceSource>(
        &self,
        fb: &mut FrameBuffer,
        session: &GameSession<S>,
        viewport: Viewport,
        start_x: u16,
        start_y: u16,
        frame_w: u16,
    ) {
        let panel_x = start_x.saturating_add(frame_w).saturating_add(2);
        if panel_x >= viewport.width {
            return;
        }

        let label = CellStyle {
            fg: Rgb::new(220, 220, 220),
            bg: Rgb::new(0, 0, 0),
            bold: true,
            dim: false,
        };
        let value = CellStyle {
            fg: Rgb::new(200, 200, 200),
            bg: Rgb::new(0, 0, 0),
            bold: false,
            dim: false,
        };

        let mut y = start_y;
        fb.put_str(panel_x, y, "SCORE", label);
        y = y.saturating_add(1);
        fb.put_str(panel_x, y, &session.score().to_string(), value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "LINES", label);
        y = y.saturating_add(1);
        fb.put_str(panel_x, y, &session.lines().to_string(), value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "LEVEL", label);
        y = y.saturating_add(1);
        fb.put_str(panel_x, y, &session.level().to_string(), value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "NEXT", label);
        y = y.saturating_add(1);
        if let Some(shape) = session.next_shape() {
            self.draw_preview(fb, panel_x, y, &shape);
        }
    }

    /// The upcoming shape in a 4x4 preview box.
    fn draw_preview(&self, fb: &mut FrameBuffer, x: u16, y: u16, shape: &Shape) {
        let style = CellStyle {
            fg: piece_color(shape.kind()),
            bg: Rgb::new(0, 0, 0),
            bold: true,
            dim: false,
        };
        for (dx, dy) in shape.cells() {
            let px = x + (dx as u16) * self.cell_w;
            let py = y + (dy as u16) * self.cell_h;
            fb.fill_rect(px, py, self.cell_w, self.cell_h, '█', style);
        }
    }

    fn draw_overlay(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        frame_w: u16,
        frame_h: u16,
        text: &str,
    ) {
        let mid_y = start_y.saturating_add(frame_h / 2);
        let text_w = text.chars().count() as u16;
        let x = start_x.saturating_add(frame_w.saturating_sub(text_w) / 2);
        let style = CellStyle {
            fg: Rgb::new(255, 255, 255),
            bg: Rgb::new(0, 0, 0),
            bold: true,
            dim: false,
        };
        fb.put_str(x, mid_y, text, style);
    }
}

/// Reserved columns to the right of the well for the stats panel.
const PANEL_W: u16 = 14;

/// Per-kind colors.
fn piece_color(kind: PieceKind) -> Rgb {
    match kind {
        PieceKind::T => Rgb::new(255, 13, 114),
        PieceKind::I => Rgb::new(13, 194, 255),
        PieceKind::S => Rgb::new(13, 255, 114),
        PieceKind::Z => Rgb::new(245, 56, 255),
        PieceKind::L => Rgb::new(255, 142, 13),
        PieceKind::J => Rgb::new(255, 225, 56),
        PieceKind::O => Rgb::new(56, 119, 255),
    }
}
