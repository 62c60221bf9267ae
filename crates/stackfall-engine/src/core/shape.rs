use serde::{Serialize, Serializer};

use crate::ShapeError;

use super::cell::{Cell, PieceKind};

/// Square matrix of cells describing a piece's footprint.
///
/// Shapes are stored row-major. Every shape is square by construction, so
/// rotation never needs to special-case a piece: the library pads the
/// narrower pieces with empty rows and columns.
///
/// # Example
///
/// ```
/// use stackfall_engine::{Cell, PieceKind, create_piece};
///
/// let shape = create_piece(PieceKind::O);
/// assert_eq!(shape.size(), 2);
/// assert_eq!(shape.cell(1, 1), Cell::Filled(PieceKind::O));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Shape {
    size: usize,
    cells: Vec<Cell>,
}

impl Serialize for Shape {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        // Format: [".T.", "TTT", "..."]
        serializer.collect_seq(
            self.rows()
                .map(|row| row.iter().map(|c| c.as_char()).collect::<String>()),
        )
    }
}

impl Shape {
    /// Builds a shape from explicit rows.
    ///
    /// Rejects empty and non-square matrices: rotation is only defined for
    /// square shapes.
    pub fn from_rows<R>(rows: &[R]) -> Result<Self, ShapeError>
    where
        R: AsRef<[Cell]>,
    {
        let size = rows.len();
        if size == 0 {
            return Err(ShapeError::Empty);
        }
        let mut cells = Vec::with_capacity(size * size);
        for (row, cells_in_row) in rows.iter().enumerate() {
            let cells_in_row = cells_in_row.as_ref();
            if cells_in_row.len() != size {
                return Err(ShapeError::NotSquare {
                    rows: size,
                    row,
                    len: cells_in_row.len(),
                });
            }
            cells.extend_from_slice(cells_in_row);
        }
        Ok(Self { size, cells })
    }

    /// Builds a shape from rows of text (`.` for empty, kind letters for blocks).
    pub fn from_ascii(art: &[&str]) -> Result<Self, ShapeError> {
        let rows: Vec<Vec<Cell>> = art
            .iter()
            .map(|line| line.chars().filter_map(Cell::from_char).collect())
            .collect();
        Self::from_rows(&rows)
    }

    pub(crate) fn from_parts(size: usize, cells: Vec<Cell>) -> Self {
        debug_assert_eq!(cells.len(), size * size);
        Self { size, cells }
    }

    /// Width (and height) of the matrix, padding included.
    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns the cell at column `x`, row `y` of the matrix.
    #[must_use]
    pub fn cell(&self, x: usize, y: usize) -> Cell {
        self.cells[y * self.size + x]
    }

    pub(crate) fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        self.cells.chunks_exact(self.size)
    }

    /// Iterates over the non-empty cells as `(x, y, kind)` in matrix coordinates.
    pub fn occupied_cells(&self) -> impl Iterator<Item = (usize, usize, PieceKind)> + '_ {
        self.cells.iter().enumerate().filter_map(|(i, cell)| {
            cell.kind().map(|kind| (i % self.size, i / self.size, kind))
        })
    }
}

/// Returns a fresh copy of the template for `kind`.
///
/// Templates are 4×4 for I, 2×2 for O and 3×3 for the rest. Each call
/// allocates a new matrix, so callers may keep and transform it freely.
#[must_use]
pub fn create_piece(kind: PieceKind) -> Shape {
    let template = template(kind);
    let size = template.len();
    let cells = template
        .iter()
        .flat_map(|row| row.bytes())
        .map(|b| {
            if b == b'#' {
                Cell::Filled(kind)
            } else {
                Cell::Empty
            }
        })
        .collect();
    Shape::from_parts(size, cells)
}

fn template(kind: PieceKind) -> &'static [&'static str] {
    match kind {
        PieceKind::I => &[".#..", ".#..", ".#..", ".#.."],
        PieceKind::L => &[".#.", ".#.", ".##"],
        PieceKind::J => &[".#.", ".#.", "##."],
        PieceKind::O => &["##", "##"],
        PieceKind::Z => &["##.", ".##", "..."],
        PieceKind::S => &[".##", "##.", "..."],
        PieceKind::T => &[".#.", "###", "..."],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_sizes() {
        assert_eq!(create_piece(PieceKind::I).size(), 4);
        assert_eq!(create_piece(PieceKind::O).size(), 2);
        for kind in [
            PieceKind::L,
            PieceKind::J,
            PieceKind::Z,
            PieceKind::S,
            PieceKind::T,
        ] {
            assert_eq!(create_piece(kind).size(), 3, "{kind:?} should be 3x3");
        }
    }

    #[test]
    fn test_every_template_has_four_blocks_of_its_own_kind() {
        for kind in PieceKind::ALL {
            let shape = create_piece(kind);
            let blocks: Vec<_> = shape.occupied_cells().collect();
            assert_eq!(blocks.len(), 4, "{kind:?} should have 4 blocks");
            assert!(blocks.iter().all(|&(_, _, k)| k == kind));
        }
    }

    #[test]
    fn test_t_template_layout() {
        let shape = create_piece(PieceKind::T);
        let expected = Shape::from_ascii(&[".T.", "TTT", "..."]).unwrap();
        assert_eq!(shape, expected);
    }

    #[test]
    fn test_create_piece_returns_independent_copies() {
        let a = create_piece(PieceKind::L);
        let b = create_piece(PieceKind::L);
        assert_eq!(a, b);
        assert_ne!(a.cells().as_ptr(), b.cells().as_ptr());
    }

    #[test]
    fn test_from_rows_rejects_bad_matrices() {
        let empty: Vec<Vec<Cell>> = vec![];
        assert_eq!(Shape::from_rows(&empty), Err(ShapeError::Empty));

        let ragged = vec![vec![Cell::Empty; 3], vec![Cell::Empty; 2], vec![Cell::Empty; 3]];
        assert_eq!(
            Shape::from_rows(&ragged),
            Err(ShapeError::NotSquare {
                rows: 3,
                row: 1,
                len: 2
            })
        );

        assert!(Shape::from_ascii(&["TTT", "..."]).is_err());
    }

    #[test]
    fn test_occupied_cells_coordinates() {
        let shape = create_piece(PieceKind::S);
        let cells: Vec<_> = shape.occupied_cells().map(|(x, y, _)| (x, y)).collect();
        assert_eq!(cells, vec![(1, 0), (2, 0), (0, 1), (1, 1)]);
    }

    #[test]
    fn test_shape_serialization() {
        let shape = create_piece(PieceKind::Z);
        let json = serde_json::to_string(&shape).unwrap();
        assert_eq!(json, r#"["ZZ.",".ZZ","..."]"#);
    }
}
