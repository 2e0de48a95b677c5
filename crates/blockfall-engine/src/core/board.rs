use std::fmt;

use super::{color::Color, piece::Position, shape::Shape};

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("board dimensions must be positive, got {width}x{height}")]
pub struct BoardSizeError {
    pub width: usize,
    pub height: usize,
}

/// Fixed-size grid of settled cells.
///
/// Occupancy is kept in two parallel matrices indexed `[y][x]`:
///
/// - `filled`: whether the cell is occupied
/// - `colors`: the color index of the occupying piece, `0` when empty
///
/// `filled[y][x]` is true iff `colors[y][x]` is non-zero. Dimensions never
/// change after construction, and line clearing moves whole rows rather than
/// individual cells.
///
/// # Example
///
/// ```
/// use blockfall_engine::{Board, Position, ShapeKind};
///
/// let board = Board::from_ascii(
///     "
///     ....
///     ....
///     11.1
///     ",
/// );
/// let o = ShapeKind::O.default_shape();
/// assert!(board.can_place(&o, Position::new(1, 0)));
/// assert!(!board.can_place(&o, Position::new(1, 1)));
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Board {
    width: usize,
    height: usize,
    filled: Vec<Vec<bool>>,
    colors: Vec<Vec<u8>>,
}

impl Board {
    /// Creates an empty board.
    pub fn new(width: usize, height: usize) -> Result<Self, BoardSizeError> {
        if width == 0 || height == 0 {
            return Err(BoardSizeError { width, height });
        }
        Ok(Self {
            width,
            height,
            filled: vec![vec![false; width]; height],
            colors: vec![vec![0; width]; height],
        })
    }

    /// Creates a board from ASCII art for testing.
    ///
    /// Rows are given top to bottom. `.` is an empty cell, `#` an occupied cell
    /// with color 1, and a digit `1`-`7` an occupied cell of that color. Other
    /// characters and blank lines are ignored.
    ///
    /// # Panics
    ///
    /// Panics if the art is empty or rows differ in width.
    #[must_use]
    pub fn from_ascii(art: &str) -> Self {
        let rows: Vec<Vec<u8>> = art
            .lines()
            .map(|line| {
                line.chars()
                    .filter_map(|ch| match ch {
                        '.' => Some(0),
                        '#' => Some(1),
                        '1'..='7' => ch.to_digit(10).and_then(|d| u8::try_from(d).ok()),
                        _ => None,
                    })
                    .collect::<Vec<u8>>()
            })
            .filter(|row| !row.is_empty())
            .collect();

        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        let mut board = Self::new(width, height).expect("ASCII board must not be empty");
        for (y, row) in rows.into_iter().enumerate() {
            assert_eq!(
                row.len(),
                width,
                "Each row must have exactly {width} cells, got {} at row {y}",
                row.len()
            );
            for (x, color) in row.into_iter().enumerate() {
                board.filled[y][x] = color != 0;
                board.colors[y][x] = color;
            }
        }
        board
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    /// The occupancy matrix, indexed `[y][x]`.
    #[must_use]
    pub fn filled(&self) -> &[Vec<bool>] {
        &self.filled
    }

    /// The color matrix, indexed `[y][x]`; `0` means no color.
    #[must_use]
    pub fn colors(&self) -> &[Vec<u8>] {
        &self.colors
    }

    /// Iterates over the rows top to bottom, yielding each cell's color (`None` when empty).
    pub fn rows(&self) -> impl Iterator<Item = impl Iterator<Item = Option<Color>> + '_> + '_ {
        self.colors
            .iter()
            .map(|row| row.iter().map(|&value| Color::new(value).ok()))
    }

    /// Returns whether cell `(x, y)` is occupied. Cells outside the board are not.
    #[must_use]
    pub fn is_filled(&self, x: usize, y: usize) -> bool {
        self.filled
            .get(y)
            .and_then(|row| row.get(x))
            .copied()
            .unwrap_or(false)
    }

    /// Returns the color of cell `(x, y)`, or `None` if it is empty or outside the board.
    #[must_use]
    pub fn color_at(&self, x: usize, y: usize) -> Option<Color> {
        let value = *self.colors.get(y)?.get(x)?;
        Color::new(value).ok()
    }

    /// Returns whether every cell of row `y` is occupied.
    #[must_use]
    pub fn is_row_complete(&self, y: usize) -> bool {
        self.filled[y].iter().all(|&c| c)
    }

    /// Returns whether any cell of row `y` is occupied.
    #[must_use]
    pub fn is_row_occupied(&self, y: usize) -> bool {
        self.filled[y].iter().any(|&c| c)
    }

    /// Returns the in-bounds, unoccupied board cell at signed coordinates `(x, y)`.
    fn free_cell(&self, x: isize, y: isize) -> Option<(usize, usize)> {
        let x = usize::try_from(x).ok().filter(|&x| x < self.width)?;
        let y = usize::try_from(y).ok().filter(|&y| y < self.height)?;
        (!self.filled[y][x]).then_some((x, y))
    }

    /// Checks whether `shape` anchored at `position` fits on the board.
    ///
    /// Returns `false` if any occupied cell of the shape lands below the bottom
    /// row, left of column 0, right of the last column, or on a filled cell.
    /// Rows above the top are rejected as well. Every legality decision of the
    /// engine goes through this predicate.
    #[must_use]
    pub fn can_place(&self, shape: &Shape, position: Position) -> bool {
        shape.occupied_cells().all(|(dx, dy)| {
            position
                .cell(dx, dy)
                .and_then(|(x, y)| self.free_cell(x, y))
                .is_some()
        })
    }

    /// Writes the occupied cells of `shape` at `position` into the board with `color`.
    ///
    /// The caller guarantees `can_place(shape, position)`; cells outside the
    /// board are skipped rather than checked.
    pub fn fill_shape(&mut self, shape: &Shape, position: Position, color: Color) {
        for (dx, dy) in shape.occupied_cells() {
            let Some((x, y)) = position.cell(dx, dy) else {
                continue;
            };
            let (Ok(x), Ok(y)) = (usize::try_from(x), usize::try_from(y)) else {
                continue;
            };
            if x < self.width && y < self.height {
                self.filled[y][x] = true;
                self.colors[y][x] = color.get();
            }
        }
    }

    /// Removes complete rows and returns how many were removed.
    ///
    /// Rows are scanned from the bottom up. When row `y` is complete, every row
    /// above it moves down by one and row 0 becomes empty; the scan then looks
    /// at row `y` again, since it now holds the former row `y - 1`.
    pub fn clear_lines(&mut self) -> usize {
        let mut count = 0;
        let mut y = self.height;
        while y > 0 {
            let row = y - 1;
            if !self.is_row_complete(row) {
                y -= 1;
                continue;
            }
            count += 1;
            self.filled[..=row].rotate_right(1);
            self.colors[..=row].rotate_right(1);
            self.filled[0].fill(false);
            self.colors[0].fill(0);
        }
        count
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.colors {
            for &color in row {
                if color == 0 {
                    f.write_str(".")?;
                } else {
                    write!(f, "{color}")?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Board {}x{}", self.width, self.height)?;
        fmt::Display::fmt(self, f)
    }
}
