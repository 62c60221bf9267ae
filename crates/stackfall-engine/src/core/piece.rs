use serde::{Deserialize, Serialize};

use super::{
    cell::PieceKind,
    rotation::{RotationDirection, rotate},
    shape::{Shape, create_piece},
};

/// The falling piece: an owned shape matrix placed on the board.
///
/// Pieces are values. Movement and rotation return new `Piece` instances, so
/// a rejected candidate never has to be rolled back.
///
/// # Coordinate System
///
/// - Position is the board cell of the matrix's top-left corner
/// - X increases rightward (columns), Y increases downward (rows)
/// - Coordinates are signed: padding columns may hang outside the board
///
/// # Example
///
/// ```
/// use stackfall_engine::{Piece, PieceKind, PiecePosition, RotationDirection};
///
/// let piece = Piece::spawn(PieceKind::T, 12);
/// assert_eq!(piece.position(), PiecePosition::new(5, 0));
///
/// let moved = piece.right().down();
/// let rotated = moved.rotated(RotationDirection::Clockwise);
/// assert_eq!(rotated.position(), PiecePosition::new(6, 1));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Piece {
    kind: PieceKind,
    shape: Shape,
    position: PiecePosition,
}

impl Piece {
    /// Creates a piece of `kind` in its template orientation at `position`.
    #[must_use]
    pub fn new(kind: PieceKind, position: PiecePosition) -> Self {
        Self::with_shape(kind, create_piece(kind), position)
    }

    #[must_use]
    pub fn with_shape(kind: PieceKind, shape: Shape, position: PiecePosition) -> Self {
        Self {
            kind,
            shape,
            position,
        }
    }

    /// Creates a piece at the spawn position of a board `board_width` columns wide.
    ///
    /// The matrix is centered horizontally using integer division on both
    /// the board width and the matrix width, on row 0.
    #[must_use]
    pub fn spawn(kind: PieceKind, board_width: usize) -> Self {
        let shape = create_piece(kind);
        let half_board = i32::try_from(board_width / 2).unwrap_or(i32::MAX);
        let half_shape = i32::try_from(shape.size() / 2).unwrap_or(0);
        Self::with_shape(kind, shape, PiecePosition::new(half_board - half_shape, 0))
    }

    #[must_use]
    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    #[must_use]
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    #[must_use]
    pub fn position(&self) -> PiecePosition {
        self.position
    }

    /// Board coordinates `(x, y, kind)` of every block of the piece.
    pub fn occupied_cells(&self) -> impl Iterator<Item = (i32, i32, PieceKind)> + '_ {
        self.shape.occupied_cells().map(move |(dx, dy, kind)| {
            // Shapes are at most 4x4.
            #[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
            let (dx, dy) = (dx as i32, dy as i32);
            (self.position.x + dx, self.position.y + dy, kind)
        })
    }

    #[must_use]
    pub fn moved(&self, dx: i32, dy: i32) -> Self {
        Self {
            kind: self.kind,
            shape: self.shape.clone(),
            position: self.position.offset(dx, dy),
        }
    }

    #[must_use]
    pub fn left(&self) -> Self {
        self.moved(-1, 0)
    }

    #[must_use]
    pub fn right(&self) -> Self {
        self.moved(1, 0)
    }

    #[must_use]
    pub fn down(&self) -> Self {
        self.moved(0, 1)
    }

    /// Returns the piece rotated a quarter turn in place (no wall kick).
    #[must_use]
    pub fn rotated(&self, direction: RotationDirection) -> Self {
        Self {
            kind: self.kind,
            shape: rotate(&self.shape, direction),
            position: self.position,
        }
    }
}

/// Position of a piece's matrix origin relative to the board's top-left cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
pub struct PiecePosition {
    x: i32,
    y: i32,
}

impl PiecePosition {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub const fn x(self) -> i32 {
        self.x
    }

    #[must_use]
    pub const fn y(self) -> i32 {
        self.y
    }

    #[must_use]
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}
