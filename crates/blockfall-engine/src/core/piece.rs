use serde::{Deserialize, Serialize};

use super::{
    color::Color,
    shape::{Shape, ShapeKind},
};

/// Signed board coordinates of a piece's top-left anchor.
///
/// - X increases rightward (columns)
/// - Y increases downward (rows), row 0 at the top
///
/// Coordinates are signed so that rejected moves (e.g. far past the left wall)
/// can be expressed and checked without wrapping.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: isize,
    pub y: isize,
}

impl Position {
    #[must_use]
    pub const fn new(x: isize, y: isize) -> Self {
        Self { x, y }
    }

    /// Returns the position shifted by `(dx, dy)`, saturating at the integer bounds.
    #[must_use]
    pub const fn offset(self, dx: isize, dy: isize) -> Self {
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
        }
    }

    /// Board coordinates of the shape cell `(dx, dy)` anchored at this position.
    #[must_use]
    pub fn cell(self, dx: usize, dy: usize) -> Option<(isize, isize)> {
        let x = self.x.checked_add(dx.cast_signed())?;
        let y = self.y.checked_add(dy.cast_signed())?;
        Some((x, y))
    }
}

/// A shape template paired with the color its pieces are drawn with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PieceTemplate {
    pub shape: Shape,
    pub color: Color,
}

impl PieceTemplate {
    /// The canonical template of `kind`.
    #[must_use]
    pub const fn canonical(kind: ShapeKind) -> Self {
        Self {
            shape: kind.default_shape(),
            color: kind.default_color(),
        }
    }
}

/// The piece currently under player control.
///
/// Owns a copy of its template's shape, replaced wholesale by rotation.
/// Movement and rotation return new values; legality is decided by the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivePiece {
    kind: ShapeKind,
    shape: Shape,
    color: Color,
    position: Position,
}

impl ActivePiece {
    /// Creates a piece horizontally centered on a board of `board_width` columns, at row 0.
    ///
    /// The origin is `x = floor(board_width / 2) - floor(shape_width / 2)`.
    #[must_use]
    pub fn spawn(kind: ShapeKind, template: PieceTemplate, board_width: usize) -> Self {
        let x = (board_width / 2).cast_signed() - (template.shape.width() / 2).cast_signed();
        Self {
            kind,
            shape: template.shape,
            color: template.color,
            position: Position::new(x, 0),
        }
    }

    #[must_use]
    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    #[must_use]
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    #[must_use]
    pub fn color(&self) -> Color {
        self.color
    }

    #[must_use]
    pub fn position(&self) -> Position {
        self.position
    }

    /// Board coordinates of every occupied cell.
    pub fn occupied_cells(&self) -> impl Iterator<Item = (isize, isize)> + '_ {
        self.shape
            .occupied_cells()
            .filter_map(|(dx, dy)| self.position.cell(dx, dy))
    }

    #[must_use]
    pub fn moved(&self, dx: isize, dy: isize) -> Self {
        Self {
            position: self.position.offset(dx, dy),
            ..*self
        }
    }

    #[must_use]
    pub fn rotated_clockwise(&self) -> Self {
        Self {
            shape: self.shape.rotated_clockwise(),
            ..*self
        }
    }
}
