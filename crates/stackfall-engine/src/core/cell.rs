use rand::{Rng, distr::StandardUniform, prelude::Distribution};
use serde::{Deserialize, Serialize};

/// Enum representing the type of piece.
///
/// The discriminant order matches the presentation color ids: `I` is color 1,
/// `T` is color 7.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[repr(u8)]
pub enum PieceKind {
    /// I-piece.
    I = 0,
    /// L-piece.
    L = 1,
    /// J-piece.
    J = 2,
    /// O-piece.
    O = 3,
    /// Z-piece.
    Z = 4,
    /// S-piece.
    S = 5,
    /// T-piece.
    T = 6,
}

impl Distribution<PieceKind> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceKind {
        PieceKind::ALL[rng.random_range(0..PieceKind::LEN)]
    }
}

impl PieceKind {
    /// Number of piece types (7).
    pub const LEN: usize = 7;

    /// All piece kinds in color-id order.
    pub const ALL: [Self; Self::LEN] = [
        PieceKind::I,
        PieceKind::L,
        PieceKind::J,
        PieceKind::O,
        PieceKind::Z,
        PieceKind::S,
        PieceKind::T,
    ];

    /// Returns the presentation color id of this kind (`1..=7`).
    ///
    /// Board logic never looks at this value; it exists for renderers.
    ///
    /// ```
    /// use stackfall_engine::PieceKind;
    ///
    /// assert_eq!(PieceKind::I.color_id(), 1);
    /// assert_eq!(PieceKind::O.color_id(), 4);
    /// assert_eq!(PieceKind::T.color_id(), 7);
    /// ```
    #[must_use]
    pub const fn color_id(self) -> u8 {
        self as u8 + 1
    }

    /// Returns the single character representation of this piece kind.
    ///
    /// # Examples
    ///
    /// ```
    /// use stackfall_engine::PieceKind;
    ///
    /// assert_eq!(PieceKind::I.as_char(), 'I');
    /// assert_eq!(PieceKind::T.as_char(), 'T');
    /// ```
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            PieceKind::I => 'I',
            PieceKind::L => 'L',
            PieceKind::J => 'J',
            PieceKind::O => 'O',
            PieceKind::Z => 'Z',
            PieceKind::S => 'S',
            PieceKind::T => 'T',
        }
    }

    /// Parses a piece kind from a single character.
    ///
    /// # Examples
    ///
    /// ```
    /// use stackfall_engine::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_char('I'), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_char('T'), Some(PieceKind::T));
    /// assert_eq!(PieceKind::from_char('X'), None);
    /// ```
    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            'I' => Some(PieceKind::I),
            'L' => Some(PieceKind::L),
            'J' => Some(PieceKind::J),
            'O' => Some(PieceKind::O),
            'Z' => Some(PieceKind::Z),
            'S' => Some(PieceKind::S),
            'T' => Some(PieceKind::T),
            _ => None,
        }
    }
}

/// A single cell of the board or of a shape matrix.
///
/// Occupancy is what the engine reasons about. The kind stored in a filled
/// cell only tells a renderer which piece produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    /// Empty cell.
    #[default]
    Empty,
    /// Cell occupied by a block of the given piece kind.
    Filled(PieceKind),
}

impl Cell {
    #[must_use]
    pub const fn is_empty(self) -> bool {
        matches!(self, Cell::Empty)
    }

    #[must_use]
    pub const fn is_filled(self) -> bool {
        !self.is_empty()
    }

    #[must_use]
    pub const fn kind(self) -> Option<PieceKind> {
        match self {
            Cell::Empty => None,
            Cell::Filled(kind) => Some(kind),
        }
    }

    /// Presentation value: `0` for empty, otherwise the kind's color id.
    #[must_use]
    pub const fn color_id(self) -> u8 {
        match self {
            Cell::Empty => 0,
            Cell::Filled(kind) => kind.color_id(),
        }
    }

    /// Text form used by board and shape dumps: `.` or the kind letter.
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::Filled(kind) => kind.as_char(),
        }
    }

    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        if c == '.' {
            return Some(Cell::Empty);
        }
        match PieceKind::from_char(c) {
            Some(kind) => Some(Cell::Filled(kind)),
            None => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;
    use rand_pcg::Pcg32;

    use super::*;

    #[test]
    fn test_color_ids_are_distinct_and_in_range() {
        let ids: Vec<u8> = PieceKind::ALL.iter().map(|k| k.color_id()).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5, 6, 7]);
        assert_eq!(Cell::Empty.color_id(), 0);
        assert_eq!(Cell::Filled(PieceKind::Z).color_id(), 5);
    }

    #[test]
    fn test_piece_kind_char_conversion() {
        for kind in PieceKind::ALL {
            assert_eq!(PieceKind::from_char(kind.as_char()), Some(kind));
        }
        assert_eq!(PieceKind::from_char('x'), None);
        assert_eq!(PieceKind::from_char('.'), None);
    }

    #[test]
    fn test_cell_char_conversion() {
        assert_eq!(Cell::from_char('.'), Some(Cell::Empty));
        assert_eq!(Cell::from_char('S'), Some(Cell::Filled(PieceKind::S)));
        assert_eq!(Cell::from_char('#'), None);
        assert_eq!(Cell::Filled(PieceKind::J).as_char(), 'J');
        assert!(Cell::Empty.is_empty());
        assert!(Cell::Filled(PieceKind::O).is_filled());
        assert_eq!(Cell::Filled(PieceKind::O).kind(), Some(PieceKind::O));
    }

    #[test]
    fn test_uniform_sampling_covers_every_kind() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut seen = [false; PieceKind::LEN];
        for _ in 0..500 {
            let kind: PieceKind = rng.random();
            seen[kind as usize] = true;
        }
        assert!(seen.iter().all(|&s| s), "every kind should be drawn: {seen:?}");
    }
}
