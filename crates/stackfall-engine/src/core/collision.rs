use super::{board::Board, cell::Cell, piece::Piece};

/// Returns `true` if any block of `piece` lies outside the board or on an
/// occupied cell.
///
/// Rows above the top, rows below the bottom and columns past either wall
/// all count as blocked. Empty padding cells of the shape are ignored, so a
/// piece's matrix may hang over an edge as long as its blocks do not.
///
/// ```
/// use stackfall_engine::{Board, Piece, PieceKind, PiecePosition, collide};
///
/// let board = Board::new(12, 20);
/// let inside = Piece::new(PieceKind::O, PiecePosition::new(5, 18));
/// let below = Piece::new(PieceKind::O, PiecePosition::new(5, 19));
/// assert!(!collide(&board, &inside));
/// assert!(collide(&board, &below));
/// ```
#[must_use]
pub fn collide(board: &Board, piece: &Piece) -> bool {
    piece
        .occupied_cells()
        .any(|(x, y, _)| board.cell(x, y) != Some(Cell::Empty))
}
