//! The six kinds of unit.

use std::fmt;

use crate::error::PromotionError;

/// The kind of a unit, without side or per-variant state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum PieceKind {
    Pawn = 0,
    Knight = 1,
    Bishop = 2,
    Rook = 3,
    Queen = 4,
    King = 5,
}

impl PieceKind {
    /// Total number of kinds.
    pub const COUNT: usize = 6;

    /// All kinds in index order.
    pub const ALL: [PieceKind; 6] = [
        PieceKind::Pawn,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
        PieceKind::King,
    ];

    /// Kinds a pawn may be promoted to.
    pub const PROMOTIONS: [PieceKind; 4] = [
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
    ];

    /// Return the index (0..5).
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Letter used in the rendered grid. Knights are `H` so they do not
    /// collide with the king's `K`.
    #[inline]
    pub const fn letter(self) -> char {
        match self {
            PieceKind::Pawn => 'P',
            PieceKind::Knight => 'H',
            PieceKind::Bishop => 'B',
            PieceKind::Rook => 'R',
            PieceKind::Queen => 'Q',
            PieceKind::King => 'K',
        }
    }

    /// Material value of a unit of this kind.
    #[inline]
    pub const fn value(self) -> u32 {
        match self {
            PieceKind::Pawn => 1,
            PieceKind::Knight | PieceKind::Bishop => 3,
            PieceKind::Rook => 5,
            PieceKind::Queen => 9,
            PieceKind::King => 0,
        }
    }

    /// Return `true` if a pawn may be promoted to this kind.
    #[inline]
    pub const fn is_promotion_choice(self) -> bool {
        matches!(
            self,
            PieceKind::Knight | PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen
        )
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PieceKind::Pawn => "pawn",
            PieceKind::Knight => "knight",
            PieceKind::Bishop => "bishop",
            PieceKind::Rook => "rook",
            PieceKind::Queen => "queen",
            PieceKind::King => "king",
        };
        f.write_str(name)
    }
}

/// Parse a promotion choice typed by a player.
///
/// Accepts `q`, `r`, `b`, and `n`, `h` or `k` for the knight, or the full
/// names, case-insensitively and ignoring surrounding whitespace.
pub fn parse_promotion_choice(text: &str) -> Result<PieceKind, PromotionError> {
    let choice = text.trim().to_ascii_lowercase();
    match choice.as_str() {
        "q" | "queen" => Ok(PieceKind::Queen),
        "r" | "rook" => Ok(PieceKind::Rook),
        "b" | "bishop" => Ok(PieceKind::Bishop),
        "n" | "h" | "k" | "knight" => Ok(PieceKind::Knight),
        _ => Err(PromotionError::UnknownChoice {
            text: text.to_owned(),
        }),
    }
}
