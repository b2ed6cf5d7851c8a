//! Board squares and the algebraic coordinate codec.

use std::fmt;
use std::str::FromStr;

use crate::error::CoordinateError;

/// Number of rows and columns on the board.
pub const BOARD_SIZE: u8 = 8;

/// A square on the board, identified by its row and column.
///
/// Row 0 is rank 8 (Black's back rank) and row 7 is rank 1; column 0 is
/// file `a`. Identity is purely positional: what stands on a square is
/// tracked by the [`Board`](crate::board::Board), not by the square.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Square {
    row: u8,
    column: u8,
}

impl Square {
    /// Total number of squares.
    pub const COUNT: usize = 64;

    /// Create a square from a row and column.
    ///
    /// # Panics
    ///
    /// Panics if either index is 8 or more. Player input goes through
    /// [`parse_coordinate`] or [`Square::try_new`] instead.
    #[inline]
    pub const fn new(row: u8, column: u8) -> Square {
        assert!(
            row < BOARD_SIZE && column < BOARD_SIZE,
            "square index outside the board"
        );
        Square { row, column }
    }

    /// Create a square from signed indices, returning `None` off the board.
    #[inline]
    pub const fn try_new(row: i32, column: i32) -> Option<Square> {
        if row >= 0 && row < BOARD_SIZE as i32 && column >= 0 && column < BOARD_SIZE as i32 {
            Some(Square {
                row: row as u8,
                column: column as u8,
            })
        } else {
            None
        }
    }

    /// Return the square `rows` and `columns` away, or `None` off the board.
    #[inline]
    pub const fn offset(self, rows: i8, columns: i8) -> Option<Square> {
        Square::try_new(
            self.row as i32 + rows as i32,
            self.column as i32 + columns as i32,
        )
    }

    /// Return the zero-based row (0 = rank 8).
    #[inline]
    pub const fn row(self) -> u8 {
        self.row
    }

    /// Return the zero-based column (0 = file a).
    #[inline]
    pub const fn column(self) -> u8 {
        self.column
    }

    /// Return the rank number printed on the board edge (1..=8).
    #[inline]
    pub const fn rank(self) -> u8 {
        BOARD_SIZE - self.row
    }

    /// Return the file letter (`a`..=`h`).
    #[inline]
    pub const fn file(self) -> char {
        (b'a' + self.column) as char
    }

    /// Return `true` for light squares. a8 and h1 are light.
    #[inline]
    pub const fn is_light(self) -> bool {
        (self.row + self.column) % 2 == 0
    }

    /// Return the index `row * 8 + column` (0..63).
    #[inline]
    pub const fn index(self) -> usize {
        self.row as usize * BOARD_SIZE as usize + self.column as usize
    }

    /// Iterate over all 64 squares, row by row from a8 to h1.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..BOARD_SIZE).flat_map(|row| (0..BOARD_SIZE).map(move |column| Square::new(row, column)))
    }

    pub const A8: Square = Square::new(0, 0);
    pub const B8: Square = Square::new(0, 1);
    pub const C8: Square = Square::new(0, 2);
    pub const D8: Square = Square::new(0, 3);
    pub const E8: Square = Square::new(0, 4);
    pub const F8: Square = Square::new(0, 5);
    pub const G8: Square = Square::new(0, 6);
    pub const H8: Square = Square::new(0, 7);
    pub const A7: Square = Square::new(1, 0);
    pub const B7: Square = Square::new(1, 1);
    pub const C7: Square = Square::new(1, 2);
    pub const D7: Square = Square::new(1, 3);
    pub const E7: Square = Square::new(1, 4);
    pub const F7: Square = Square::new(1, 5);
    pub const G7: Square = Square::new(1, 6);
    pub const H7: Square = Square::new(1, 7);
    pub const A6: Square = Square::new(2, 0);
    pub const B6: Square = Square::new(2, 1);
    pub const C6: Square = Square::new(2, 2);
    pub const D6: Square = Square::new(2, 3);
    pub const E6: Square = Square::new(2, 4);
    pub const F6: Square = Square::new(2, 5);
    pub const G6: Square = Square::new(2, 6);
    pub const H6: Square = Square::new(2, 7);
    pub const A5: Square = Square::new(3, 0);
    pub const B5: Square = Square::new(3, 1);
    pub const C5: Square = Square::new(3, 2);
    pub const D5: Square = Square::new(3, 3);
    pub const E5: Square = Square::new(3, 4);
    pub const F5: Square = Square::new(3, 5);
    pub const G5: Square = Square::new(3, 6);
    pub const H5: Square = Square::new(3, 7);
    pub const A4: Square = Square::new(4, 0);
    pub const B4: Square = Square::new(4, 1);
    pub const C4: Square = Square::new(4, 2);
    pub const D4: Square = Square::new(4, 3);
    pub const E4: Square = Square::new(4, 4);
    pub const F4: Square = Square::new(4, 5);
    pub const G4: Square = Square::new(4, 6);
    pub const H4: Square = Square::new(4, 7);
    pub const A3: Square = Square::new(5, 0);
    pub const B3: Square = Square::new(5, 1);
    pub const C3: Square = Square::new(5, 2);
    pub const D3: Square = Square::new(5, 3);
    pub const E3: Square = Square::new(5, 4);
    pub const F3: Square = Square::new(5, 5);
    pub const G3: Square = Square::new(5, 6);
    pub const H3: Square = Square::new(5, 7);
    pub const A2: Square = Square::new(6, 0);
    pub const B2: Square = Square::new(6, 1);
    pub const C2: Square = Square::new(6, 2);
    pub const D2: Square = Square::new(6, 3);
    pub const E2: Square = Square::new(6, 4);
    pub const F2: Square = Square::new(6, 5);
    pub const G2: Square = Square::new(6, 6);
    pub const H2: Square = Square::new(6, 7);
    pub const A1: Square = Square::new(7, 0);
    pub const B1: Square = Square::new(7, 1);
    pub const C1: Square = Square::new(7, 2);
    pub const D1: Square = Square::new(7, 3);
    pub const E1: Square = Square::new(7, 4);
    pub const F1: Square = Square::new(7, 5);
    pub const G1: Square = Square::new(7, 6);
    pub const H1: Square = Square::new(7, 7);
}

impl FromStr for Square {
    type Err = CoordinateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();
        let mut chars = token.chars();
        let (Some(file), Some(rank), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(CoordinateError::WrongLength {
                length: token.chars().count(),
            });
        };

        let column = match file.to_ascii_lowercase() {
            c @ 'a'..='h' => c as u8 - b'a',
            _ => return Err(CoordinateError::InvalidFile { character: file }),
        };
        let row = match rank {
            '1'..='8' => BOARD_SIZE - (rank as u8 - b'0'),
            _ => return Err(CoordinateError::InvalidRank { character: rank }),
        };
        Ok(Square::new(row, column))
    }
}

/// Parse an algebraic coordinate such as `"e4"`.
///
/// Surrounding whitespace is ignored and the file letter is
/// case-insensitive.
pub fn parse_coordinate(text: &str) -> Result<Square, CoordinateError> {
    text.parse()
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file(), self.rank())
    }
}

impl fmt::Debug for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Square({})", self)
    }
}
