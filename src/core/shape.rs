//! Shape module - tetromino templates and matrix rotation.
//!
//! Each shape is a small square matrix (2x2 for O, 3x3 for T/S/Z/L/J,
//! 4x4 for I) whose cells are empty or filled with the piece's kind.
//! Rotation works on the matrix itself: transpose, then reverse each row
//! for clockwise or reverse the row order for counter-clockwise. The
//! templates are never mutated; an active piece owns its own copy.

use arrayvec::ArrayVec;

use crate::types::PieceKind;

/// Largest template edge (the I piece).
pub const MAX_SHAPE_SIZE: usize = 4;

/// A piece's shape matrix. Filled cells all carry the same kind, so the
/// matrix stores a boolean mask plus the kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shape {
    kind: PieceKind,
    size: u8,
    mask: [[bool; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE],
}

impl Shape {
    /// The fixed template for a piece kind, in spawn orientation.
    pub fn template(kind: PieceKind) -> Self {
        let (size, rows): (u8, &[&[u8]]) = match kind {
            PieceKind::T => (3, &[&[0, 1, 0], &[1, 1, 1], &[0, 0, 0]]),
            PieceKind::I => (4, &[&[0, 1, 0, 0], &[0, 1, 0, 0], &[0, 1, 0, 0], &[0, 1, 0, 0]]),
            PieceKind::S => (3, &[&[0, 1, 1], &[1, 1, 0], &[0, 0, 0]]),
            PieceKind::Z => (3, &[&[1, 1, 0], &[0, 1, 1], &[0, 0, 0]]),
            PieceKind::L => (3, &[&[1, 0, 0], &[1, 1, 1], &[0, 0, 0]]),
            PieceKind::J => (3, &[&[0, 0, 1], &[1, 1, 1], &[0, 0, 0]]),
            PieceKind::O => (2, &[&[1, 1], &[1, 1]]),
        };

        let mut mask = [[false; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        for (y, row) in rows.iter().enumerate() {
            for (x, &v) in row.iter().enumerate() {
                mask[y][x] = v != 0;
            }
        }
        Self { kind, size, mask }
    }

    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    /// Edge length of the square matrix (also the kick-search bound).
    pub fn width(&self) -> u8 {
        self.size
    }

    /// Whether the matrix cell at (x, y) is filled.
    pub fn is_filled(&self, x: u8, y: u8) -> bool {
        let n = self.size as usize;
        let (x, y) = (x as usize, y as usize);
        x < n && y < n && self.mask[y][x]
    }

    /// Offsets of all filled cells, relative to the matrix top-left.
    /// At most 16 cells; in practice every tetromino has exactly 4.
    pub fn cells(&self) -> ArrayVec<(i8, i8), 16> {
        let mut out = ArrayVec::new();
        let n = self.size as usize;
        for y in 0..n {
            for x in 0..n {
                if self.mask[y][x] {
                    out.push((x as i8, y as i8));
                }
            }
        }
        out
    }

    /// Rotate the matrix 90 degrees in place.
    ///
    /// Transpose, then reverse each row (clockwise) or reverse the row
    /// order (counter-clockwise).
    pub fn rotate(&mut self, clockwise: bool) {
        let n = self.size as usize;

        for y in 0..n {
            for x in 0..y {
                let tmp = self.mask[y][x];
                self.mask[y][x] = self.mask[x][y];
                self.mask[x][y] = tmp;
            }
        }

        if clockwise {
            for row in self.mask[..n].iter_mut() {
                row[..n].reverse();
            }
        } else {
            self.mask[..n].reverse();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ALL_KINDS;

    #[test]
    fn templates_have_four_cells() {
        for kind in ALL_KINDS {
            assert_eq!(Shape::template(kind).cells().len(), 4, "{:?}", kind);
        }
    }

    #[test]
    fn template_sizes() {
        assert_eq!(Shape::template(PieceKind::O).width(), 2);
        assert_eq!(Shape::template(PieceKind::I).width(), 4);
        assert_eq!(Shape::template(PieceKind::T).width(), 3);
    }

    #[test]
    fn i_template_is_vertical_bar() {
        let i = Shape::template(PieceKind::I);
        let cells = i.cells();
        assert_eq!(cells.as_slice(), &[(1, 0), (1, 1), (1, 2), (1, 3)]);
    }

    #[test]
    fn rotate_cw_turns_vertical_i_horizontal() {
        let mut i = Shape::template(PieceKind::I);
        i.rotate(true);
        assert_eq!(i.cells().as_slice(), &[(0, 1), (1, 1), (2, 1), (3, 1)]);
    }

    #[test]
    fn four_rotations_restore_template() {
        for kind in ALL_KINDS {
            for clockwise in [true, false] {
                let template = Shape::template(kind);
                let mut shape = template;
                for _ in 0..4 {
                    shape.rotate(clockwise);
                }
                assert_eq!(shape, template, "{:?} cw={}", kind, clockwise);
            }
        }
    }

    #[test]
    fn ccw_undoes_cw() {
        for kind in ALL_KINDS {
            let template = Shape::template(kind);
            let mut shape = template;
            shape.rotate(true);
            shape.rotate(false);
            assert_eq!(shape, template, "{:?}", kind);
        }
    }

    #[test]
    fn t_rotates_clockwise_as_expected() {
        let mut t = Shape::template(PieceKind::T);
        t.rotate(true);
        // T pointing right after one cw rotation.
        assert_eq!(t.cells().as_slice(), &[(1, 0), (1, 1), (2, 1), (1, 2)]);
    }
}
