use std::fmt;

use rand::{Rng, distr::StandardUniform, prelude::Distribution};
use serde::{Deserialize, Serialize};

use super::color::Color;

/// Maximum width and height of a shape matrix.
pub const MAX_SHAPE_SIZE: usize = 4;

/// Rectangular occupancy matrix of a piece.
///
/// A shape is at most [`MAX_SHAPE_SIZE`]×[`MAX_SHAPE_SIZE`] cells and has at
/// least one occupied cell. Cell `(x, y)` is column `x` of row `y`, with row 0
/// at the top, matching board coordinates.
///
/// Shapes are plain values: rotation returns a new shape, and the active piece
/// owns its own copy of the template it was spawned from.
///
/// # Serialization
///
/// Shapes are (de)serialized as nested arrays of `0`/`1`, row by row:
///
/// ```
/// use blockfall_engine::Shape;
///
/// let shape: Shape = serde_json::from_str("[[1,1,1],[0,1,0]]").unwrap();
/// assert_eq!((shape.width(), shape.height()), (3, 2));
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<u8>>", into = "Vec<Vec<u8>>")]
pub struct Shape {
    cells: [[bool; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE],
    width: u8,
    height: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ShapeError {
    #[display("shape has no rows")]
    Empty,
    #[display("shape is {width}x{height}, larger than {MAX_SHAPE_SIZE}x{MAX_SHAPE_SIZE}")]
    TooLarge { width: usize, height: usize },
    #[display("shape row {row} has {len} cells, expected {expected}")]
    Ragged {
        row: usize,
        len: usize,
        expected: usize,
    },
    #[display("shape cell must be 0 or 1, got {value}")]
    InvalidCell { value: u8 },
    #[display("shape has no occupied cell")]
    NoOccupiedCell,
}

impl Shape {
    /// Builds a shape from a fixed-size 0/1 matrix at compile time.
    ///
    /// Panics (at compile time when used in a `const`) if the matrix is too
    /// large or has no occupied cell.
    #[must_use]
    #[expect(clippy::cast_possible_truncation)]
    pub const fn from_matrix<const W: usize, const H: usize>(rows: [[u8; W]; H]) -> Self {
        assert!(W > 0 && W <= MAX_SHAPE_SIZE);
        assert!(H > 0 && H <= MAX_SHAPE_SIZE);
        let mut cells = [[false; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        let mut any = false;
        let mut y = 0;
        while y < H {
            let mut x = 0;
            while x < W {
                cells[y][x] = rows[y][x] != 0;
                any |= cells[y][x];
                x += 1;
            }
            y += 1;
        }
        assert!(any);
        Self {
            cells,
            width: W as u8,
            height: H as u8,
        }
    }

    /// Width of the matrix in cells (number of columns).
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width as usize
    }

    /// Height of the matrix in cells (number of rows).
    #[must_use]
    pub const fn height(&self) -> usize {
        self.height as usize
    }

    /// Returns whether cell `(x, y)` of the matrix is occupied.
    ///
    /// Cells outside the matrix are reported as empty.
    #[must_use]
    pub const fn is_occupied(&self, x: usize, y: usize) -> bool {
        x < self.width() && y < self.height() && self.cells[y][x]
    }

    /// Iterates over the rows of the matrix, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[bool]> + '_ {
        self.cells[..self.height()]
            .iter()
            .map(|row| &row[..self.width()])
    }

    /// Returns an iterator of occupied `(x, y)` cells relative to the top-left corner.
    pub fn occupied_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.rows().enumerate().flat_map(|(y, row)| {
            row.iter()
                .enumerate()
                .filter_map(move |(x, &cell)| cell.then_some((x, y)))
        })
    }

    /// Returns the shape rotated 90° clockwise.
    ///
    /// The rotated matrix has dimensions `(height, width)` and
    /// `rotated[x][y] = shape[height - 1 - y][x]`.
    ///
    /// ```
    /// use blockfall_engine::Shape;
    ///
    /// let t = Shape::from_matrix([[1, 1, 1], [0, 1, 0]]);
    /// assert_eq!(t.rotated_clockwise(), Shape::from_matrix([[0, 1], [1, 1], [0, 1]]));
    /// ```
    #[must_use]
    pub fn rotated_clockwise(&self) -> Self {
        let (width, height) = (self.width(), self.height());
        let mut cells = [[false; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        for (y, row) in cells.iter_mut().enumerate().take(width) {
            for (x, cell) in row.iter_mut().enumerate().take(height) {
                *cell = self.cells[height - 1 - x][y];
            }
        }
        Self {
            cells,
            width: self.height,
            height: self.width,
        }
    }
}

impl fmt::Debug for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut list = f.debug_list();
        for row in self.rows() {
            let row: String = row.iter().map(|&c| if c { '#' } else { '.' }).collect();
            list.entry(&row);
        }
        list.finish()
    }
}

impl TryFrom<Vec<Vec<u8>>> for Shape {
    type Error = ShapeError;

    #[expect(clippy::cast_possible_truncation)]
    fn try_from(rows: Vec<Vec<u8>>) -> Result<Self, Self::Error> {
        let height = rows.len();
        let width = rows.first().ok_or(ShapeError::Empty)?.len();
        if width == 0 {
            return Err(ShapeError::Empty);
        }
        if width > MAX_SHAPE_SIZE || height > MAX_SHAPE_SIZE {
            return Err(ShapeError::TooLarge { width, height });
        }

        let mut cells = [[false; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        for (y, row) in rows.iter().enumerate() {
            if row.len() != width {
                return Err(ShapeError::Ragged {
                    row: y,
                    len: row.len(),
                    expected: width,
                });
            }
            for (x, &value) in row.iter().enumerate() {
                cells[y][x] = match value {
                    0 => false,
                    1 => true,
                    _ => return Err(ShapeError::InvalidCell { value }),
                };
            }
        }
        if !cells.iter().flatten().any(|&c| c) {
            return Err(ShapeError::NoOccupiedCell);
        }

        Ok(Self {
            cells,
            width: width as u8,
            height: height as u8,
        })
    }
}

impl From<Shape> for Vec<Vec<u8>> {
    fn from(shape: Shape) -> Self {
        shape
            .rows()
            .map(|row| row.iter().map(|&c| u8::from(c)).collect())
            .collect()
    }
}

/// The seven canonical tetromino shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum ShapeKind {
    /// I-piece.
    I = 0,
    /// O-piece.
    O = 1,
    /// T-piece.
    T = 2,
    /// L-piece.
    L = 3,
    /// J-piece.
    J = 4,
    /// S-piece.
    S = 5,
    /// Z-piece.
    Z = 6,
}

impl Distribution<ShapeKind> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> ShapeKind {
        ShapeKind::ALL[rng.random_range(0..ShapeKind::LEN)]
    }
}

const DEFAULT_SHAPES: [Shape; ShapeKind::LEN] = [
    Shape::from_matrix([[1, 1, 1, 1]]),
    Shape::from_matrix([[1, 1], [1, 1]]),
    Shape::from_matrix([[1, 1, 1], [0, 1, 0]]),
    Shape::from_matrix([[1, 1, 1], [1, 0, 0]]),
    Shape::from_matrix([[1, 1, 1], [0, 0, 1]]),
    Shape::from_matrix([[1, 1, 0], [0, 1, 1]]),
    Shape::from_matrix([[0, 1, 1], [1, 1, 0]]),
];

impl ShapeKind {
    /// Number of shape kinds (7).
    pub const LEN: usize = 7;

    /// All kinds in template order.
    pub const ALL: [Self; Self::LEN] = [
        Self::I,
        Self::O,
        Self::T,
        Self::L,
        Self::J,
        Self::S,
        Self::Z,
    ];

    /// Position of this kind in [`ShapeKind::ALL`] and in template tables.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Default template for this kind.
    #[must_use]
    pub const fn default_shape(self) -> Shape {
        DEFAULT_SHAPES[self.index()]
    }

    /// Default color for this kind (`index + 1`).
    #[must_use]
    #[expect(clippy::cast_possible_truncation)]
    pub const fn default_color(self) -> Color {
        match Color::new(self.index() as u8 + 1) {
            Ok(color) => color,
            Err(_) => unreachable!(),
        }
    }
}
