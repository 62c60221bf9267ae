use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::{cell::Cell, piece::Piece};

/// The grid of locked cells.
///
/// The board is `height` rows of `width` cells each; row 0 is the top.
/// Dimensions are fixed at construction. Cells change only through
/// [`merge`](Self::merge), [`sweep`](Self::sweep) and [`clear`](Self::clear).
///
/// # Example
///
/// ```
/// use stackfall_engine::{Board, Piece, PieceKind, PiecePosition};
///
/// let mut board = Board::new(12, 20);
/// board.merge(&Piece::new(PieceKind::O, PiecePosition::new(5, 18)));
/// assert_eq!(board.color_ids()[19][5], PieceKind::O.color_id());
/// assert_eq!(board.sweep(), 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    width: usize,
    rows: Vec<Vec<Cell>>,
}

impl Serialize for Board {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        // Format: ["............", "....OO......", ...]
        serializer.collect_seq(self.rows.iter().map(|row| row_to_string(row)))
    }
}

impl<'de> Deserialize<'de> for Board {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let lines = Vec::<String>::deserialize(deserializer)?;
        let Some(width) = lines.first().map(|line| line.chars().count()) else {
            return Err(serde::de::Error::custom("board must have at least one row"));
        };

        let mut rows = Vec::with_capacity(lines.len());
        for (y, line) in lines.iter().enumerate() {
            let row = line
                .chars()
                .map(|c| {
                    Cell::from_char(c).ok_or_else(|| {
                        serde::de::Error::custom(format!("invalid cell '{c}' at row {y}"))
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            if row.len() != width {
                return Err(serde::de::Error::custom(format!(
                    "expected {width} cells at row {y}, got {}",
                    row.len()
                )));
            }
            rows.push(row);
        }
        Ok(Self { width, rows })
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (y, row) in self.rows.iter().enumerate() {
            if y > 0 {
                writeln!(f)?;
            }
            f.write_str(&row_to_string(row))?;
        }
        Ok(())
    }
}

fn row_to_string(row: &[Cell]) -> String {
    row.iter().map(|c| c.as_char()).collect()
}

impl Board {
    /// Creates an empty board.
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            rows: vec![vec![Cell::Empty; width]; height],
        }
    }

    /// Creates a `Board` from ASCII art for testing and scripted setups.
    ///
    /// `.` is an empty cell and a piece letter (`I`, `L`, `J`, `O`, `Z`,
    /// `S`, `T`) is a filled one. Rows are listed top to bottom; blank lines
    /// and surrounding whitespace are ignored. The width is taken from the
    /// first row and every row must match it.
    #[must_use]
    pub fn from_ascii(art: &str) -> Self {
        let rows: Vec<Vec<Cell>> = art
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| line.chars().filter_map(Cell::from_char).collect())
            .collect();
        let width = rows.first().map_or(0, Vec::len);
        for (y, row) in rows.iter().enumerate() {
            assert_eq!(
                row.len(),
                width,
                "Each row must have exactly {width} cells, got {} at row {y}",
                row.len()
            );
        }
        Self { width, rows }
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Returns the cell at column `x`, row `y`, or `None` outside the board.
    #[must_use]
    pub fn cell(&self, x: i32, y: i32) -> Option<Cell> {
        let x = usize::try_from(x).ok()?;
        let y = usize::try_from(y).ok()?;
        self.rows.get(y)?.get(x).copied()
    }

    /// Returns an iterator over the rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        self.rows.iter().map(Vec::as_slice)
    }

    /// Presentation grid: `0` for empty cells, the kind's color id otherwise.
    #[must_use]
    pub fn color_ids(&self) -> Vec<Vec<u8>> {
        self.rows
            .iter()
            .map(|row| row.iter().map(|c| c.color_id()).collect())
            .collect()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.iter().flatten().all(|c| c.is_empty())
    }

    /// Sets a single cell.
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` is outside the board.
    #[cfg(test)]
    pub(crate) fn fill_cell_at(&mut self, x: usize, y: usize, cell: Cell) {
        self.rows[y][x] = cell;
    }

    /// Writes the piece's blocks into the board.
    ///
    /// The caller must already know the piece does not collide. Blocks that
    /// fall outside the board are skipped.
    pub fn merge(&mut self, piece: &Piece) {
        for (x, y, kind) in piece.occupied_cells() {
            let (Ok(x), Ok(y)) = (usize::try_from(x), usize::try_from(y)) else {
                continue;
            };
            if let Some(cell) = self.rows.get_mut(y).and_then(|row| row.get_mut(x)) {
                *cell = Cell::Filled(kind);
            }
        }
    }

    /// A row is complete when every one of its cells is filled.
    #[must_use]
    pub fn is_row_complete(&self, y: usize) -> bool {
        self.rows
            .get(y)
            .is_some_and(|row| !row.is_empty() && row.iter().all(|c| c.is_filled()))
    }

    /// Indices of the complete rows, bottom to top. Does not modify the board.
    #[must_use]
    pub fn complete_rows(&self) -> Vec<usize> {
        (0..self.rows.len())
            .rev()
            .filter(|&y| self.is_row_complete(y))
            .collect()
    }

    /// Removes row `y`, shifts the rows above it down by one, and puts an
    /// empty row on top.
    ///
    /// # Panics
    ///
    /// Panics if `y` is outside the board.
    pub fn clear_row(&mut self, y: usize) {
        let mut row = self.rows.remove(y);
        row.fill(Cell::Empty);
        self.rows.insert(0, row);
    }

    /// Clears every complete row and returns how many were cleared.
    ///
    /// Rows are scanned bottom to top. After a row is removed the same index
    /// is checked again, because the row that slid into it may be complete
    /// as well. The top row is scanned like any other, so a complete row 0
    /// is cleared too.
    pub fn sweep(&mut self) -> usize {
        let mut cleared = 0;
        let mut y = self.rows.len();
        while y > 0 {
            if self.is_row_complete(y - 1) {
                self.clear_row(y - 1);
                cleared += 1;
            } else {
                y -= 1;
            }
        }
        cleared
    }

    /// Empties every cell, keeping the dimensions.
    pub fn clear(&mut self) {
        for row in &mut self.rows {
            row.fill(Cell::Empty);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{cell::PieceKind, piece::PiecePosition};

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::new(12, 20);
        assert_eq!(board.width(), 12);
        assert_eq!(board.height(), 20);
        assert!(board.is_empty());
        assert!(board.rows().all(|row| row.len() == 12));
    }

    #[test]
    fn test_cell_bounds() {
        let board = Board::new(12, 20);
        assert_eq!(board.cell(0, 0), Some(Cell::Empty));
        assert_eq!(board.cell(11, 19), Some(Cell::Empty));
        assert_eq!(board.cell(-1, 0), None);
        assert_eq!(board.cell(12, 0), None);
        assert_eq!(board.cell(0, -1), None);
        assert_eq!(board.cell(0, 20), None);
    }

    #[test]
    fn test_merge_writes_only_blocks() {
        let mut board = Board::from_ascii(
            "
            ZZZZ
            ....
            ....
            ",
        );
        // The padding corners of T's top row lie over Z cells and leave them alone.
        board.merge(&Piece::new(PieceKind::T, PiecePosition::new(0, 0)));
        assert_eq!(
            board,
            Board::from_ascii(
                "
                ZTZZ
                TTT.
                ....
                ",
            )
        );
    }

    #[test]
    fn test_merge_skips_cells_outside_board() {
        let mut board = Board::new(4, 2);
        board.merge(&Piece::new(PieceKind::I, PiecePosition::new(-1, -2)));
        assert_eq!(
            board,
            Board::from_ascii(
                "
                I...
                I...
                ",
            )
        );
    }

    #[test]
    fn test_sweep_without_complete_rows_changes_nothing() {
        let mut board = Board::from_ascii(
            "
            ......
            ..TT..
            SSSSS.
            .OOOOO
            ",
        );
        let before = board.clone();
        assert!(board.complete_rows().is_empty());
        assert_eq!(board.sweep(), 0);
        assert_eq!(board, before);
    }

    #[test]
    fn test_sweep_two_adjacent_rows() {
        let mut board = Board::from_ascii(
            "
            ......
            .J....
            ..TT..
            IIIIII
            OOOOOO
            ",
        );
        assert_eq!(board.complete_rows(), vec![4, 3]);
        assert_eq!(board.sweep(), 2);
        assert_eq!(
            board,
            Board::from_ascii(
                "
                ......
                ......
                ......
                .J....
                ..TT..
                ",
            )
        );
    }

    #[test]
    fn test_sweep_separated_rows() {
        let mut board = Board::from_ascii(
            "
            .L....
            IIIIII
            ..S...
            OOOOOO
            Z.....
            ",
        );
        assert_eq!(board.complete_rows(), vec![3, 1]);
        assert_eq!(board.sweep(), 2);
        assert_eq!(
            board,
            Board::from_ascii(
                "
                ......
                ......
                .L....
                ..S...
                Z.....
                ",
            )
        );
    }

    #[test]
    fn test_sweep_cascades_through_consecutive_rows() {
        let mut board = Board::from_ascii(
            "
            T.....
            SSSSSS
            ZZZZZZ
            IIIIII
            ",
        );
        assert_eq!(board.sweep(), 3);
        assert_eq!(
            board,
            Board::from_ascii(
                "
                ......
                ......
                ......
                T.....
                ",
            )
        );
    }

    #[test]
    fn test_sweep_includes_top_row() {
        let mut board = Board::from_ascii(
            "
            JJJ
            .O.
            ",
        );
        assert_eq!(board.sweep(), 1);
        assert_eq!(
            board,
            Board::from_ascii(
                "
                ...
                .O.
                ",
            )
        );
    }

    #[test]
    fn test_sweep_full_board() {
        let mut board = Board::from_ascii(
            "
            IIII
            IIII
            IIII
            ",
        );
        assert_eq!(board.sweep(), 3);
        assert!(board.is_empty());
        assert_eq!(board.height(), 3);
    }

    #[test]
    fn test_sweep_clears_complete_top_row_with_rows_below() {
        let mut board = Board::from_ascii(
            "
            SSSS
            ZZZZ
            .I..
            ",
        );
        assert_eq!(board.complete_rows(), vec![1, 0]);
        assert_eq!(board.sweep(), 2);
        assert_eq!(
            board,
            Board::from_ascii(
                "
                ....
                ....
                .I..
                ",
            )
        );
    }

    #[test]
    fn test_fill_cell_at() {
        let mut board = Board::new(3, 2);
        board.fill_cell_at(2, 1, Cell::Filled(PieceKind::L));
        assert_eq!(board.cell(2, 1), Some(Cell::Filled(PieceKind::L)));
        assert_eq!(board.to_string(), "...\n..L");
    }

    #[test]
    fn test_zero_width_rows_are_never_complete() {
        let mut board = Board::new(0, 3);
        assert!(!board.is_row_complete(0));
        assert_eq!(board.sweep(), 0);
    }

    #[test]
    fn test_clear_keeps_dimensions() {
        let mut board = Board::from_ascii(
            "
            .SS.
            SS..
            ",
        );
        board.clear();
        assert_eq!(board, Board::new(4, 2));
    }

    #[test]
    fn test_color_ids() {
        let board = Board::from_ascii(
            "
            I.O
            .TZ
            ",
        );
        assert_eq!(board.color_ids(), vec![vec![1, 0, 4], vec![0, 7, 5]]);
    }

    #[test]
    fn test_display_matches_ascii() {
        let board = Board::from_ascii(
            "
            ..L
            LLL
            ",
        );
        assert_eq!(board.to_string(), "..L\nLLL");
    }

    #[test]
    fn test_board_serialization() {
        let board = Board::from_ascii(
            "
            ....
            .JJ.
            ",
        );
        let json = serde_json::to_string(&board).unwrap();
        assert_eq!(json, r#"["....",".JJ."]"#);
        let back: Board = serde_json::from_str(&json).unwrap();
        assert_eq!(back, board);
    }

    #[test]
    fn test_board_deserialization_errors() {
        assert!(serde_json::from_str::<Board>("[]").is_err());
        assert!(serde_json::from_str::<Board>(r#"["....","..."]"#).is_err());
        let err = serde_json::from_str::<Board>(r#"["..#."]"#).unwrap_err();
        assert!(err.to_string().contains("invalid cell"));
    }
}
