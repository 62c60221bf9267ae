use serde::{Deserialize, Serialize};

use super::{board::Board, collision::collide, piece::Piece, shape::Shape};

/// Direction of a quarter turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum RotationDirection {
    Clockwise,
    CounterClockwise,
}

/// Rotates a shape a quarter turn, returning a new matrix.
///
/// The matrix is transposed, then each row is reversed (clockwise) or the
/// row order is reversed (counter-clockwise).
///
/// # Example
///
/// ```
/// use stackfall_engine::{PieceKind, RotationDirection, Shape, create_piece, rotate};
///
/// let t = create_piece(PieceKind::T);
/// let rotated = rotate(&t, RotationDirection::Clockwise);
/// assert_eq!(rotated, Shape::from_ascii(&[".T.", ".TT", ".T."]).unwrap());
/// ```
#[must_use]
pub fn rotate(shape: &Shape, direction: RotationDirection) -> Shape {
    let n = shape.size();
    let mut cells = shape.cells().to_vec();
    for y in 0..n {
        for x in 0..y {
            cells.swap(y * n + x, x * n + y);
        }
    }
    match direction {
        RotationDirection::Clockwise => {
            for row in cells.chunks_exact_mut(n) {
                row.reverse();
            }
        }
        RotationDirection::CounterClockwise => {
            cells = cells.chunks_exact(n).rev().flatten().copied().collect();
        }
    }
    Shape::from_parts(n, cells)
}

/// Horizontal nudges tried after a rotation collides, relative to the
/// original x position.
///
/// Successive nudges are `+1, -2, +3, -4, …`, so the net displacements are
/// `+1, -1, +2, -2, …`. The search stops as soon as the next nudge would
/// exceed the shape width, before the displacement it just reached is
/// tested. For a 3-wide shape the tested displacements are `+1, -1, +2`.
#[derive(Debug, Clone)]
pub struct KickOffsets {
    width: i32,
    offset: i32,
    net: i32,
    done: bool,
}

impl KickOffsets {
    #[must_use]
    pub fn new(width: usize) -> Self {
        Self {
            width: i32::try_from(width).unwrap_or(i32::MAX),
            offset: 1,
            net: 0,
            done: false,
        }
    }
}

impl Iterator for KickOffsets {
    type Item = i32;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        self.net += self.offset;
        self.offset = -(self.offset + self.offset.signum());
        if self.offset > self.width {
            self.done = true;
            return None;
        }
        Some(self.net)
    }
}

/// Rotates `piece` and searches for a non-colliding horizontal position.
///
/// Returns `None` when neither the rotated piece in place nor any kick
/// position fits; the caller then keeps the original piece unchanged.
#[must_use]
pub fn rotate_with_kick(
    board: &Board,
    piece: &Piece,
    direction: RotationDirection,
) -> Option<Piece> {
    let rotated = piece.rotated(direction);
    if !collide(board, &rotated) {
        return Some(rotated);
    }
    KickOffsets::new(rotated.shape().size())
        .map(|dx| rotated.moved(dx, 0))
        .find(|candidate| !collide(board, candidate))
}
