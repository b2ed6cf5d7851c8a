//! Error types for coordinates, moves, promotion and position setup.

use crate::color::Color;
use crate::game::GameStatus;
use crate::piece_kind::PieceKind;
use crate::square::Square;

/// Errors from parsing or indexing a board coordinate.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoordinateError {
    /// The trimmed token is not exactly two characters long.
    #[error("expected a two-character coordinate, found {length} characters")]
    WrongLength {
        /// Number of characters after trimming.
        length: usize,
    },
    /// The first character is not a file letter `a`-`h`.
    #[error("column must be a letter from a-h, found '{character}'")]
    InvalidFile {
        /// The offending character.
        character: char,
    },
    /// The second character is not a rank digit `1`-`8`.
    #[error("row must be a number from 1-8, found '{character}'")]
    InvalidRank {
        /// The offending character.
        character: char,
    },
    /// A numeric row/column pair lies outside the board.
    #[error("row and column must be from 0 to 7, found ({row}, {column})")]
    OutOfRange {
        /// Requested row index.
        row: i32,
        /// Requested column index.
        column: i32,
    },
}

/// Recoverable rejections of a move attempt. None of these mutate the game.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    /// The game already ended.
    #[error("the game is over ({status})")]
    GameOver {
        /// The terminal status the game ended with.
        status: GameStatus,
    },
    /// A pawn is waiting on the far rank for its promotion choice.
    #[error("the pawn on {square} must be promoted first")]
    PromotionPending {
        /// Square of the promotable pawn.
        square: Square,
    },
    /// The unit does not belong to the side to move.
    #[error("currently {side_to_move}'s turn")]
    WrongTurn {
        /// The side whose turn it is.
        side_to_move: Color,
    },
    /// No unit stands on the requested origin square.
    #[error("no unit on {square}")]
    EmptySquare {
        /// The empty origin square.
        square: Square,
    },
    /// The target is not among the unit's legal moves.
    #[error("{kind} cannot move to {to}")]
    IllegalMove {
        /// Kind of the unit that was asked to move.
        kind: PieceKind,
        /// The rejected target square.
        to: Square,
    },
}

/// Errors from resolving a pending promotion.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PromotionError {
    /// No pawn is waiting to be promoted.
    #[error("there is no unit eligible for promotion")]
    NoPromotionPending,
    /// Pawns may only become a knight, bishop, rook or queen.
    #[error("cannot promote to {kind}")]
    InvalidPromotionChoice {
        /// The rejected kind.
        kind: PieceKind,
    },
    /// The typed choice names no unit kind.
    #[error("invalid promotion choice \"{text}\", expected one of q, r, b, n")]
    UnknownChoice {
        /// The text that failed to parse.
        text: String,
    },
}

/// Errors from validating a custom starting position.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SetupError {
    /// A side does not have exactly one king.
    #[error("expected 1 king for {color}, found {count}")]
    InvalidKingCount {
        /// Which side has the wrong king count.
        color: Color,
        /// Number of kings found.
        count: usize,
    },
    /// Two placements claim the same square.
    #[error("square {square} is occupied twice")]
    SquareOccupied {
        /// The doubly-claimed square.
        square: Square,
    },
    /// A pawn was placed on the first or eighth rank.
    #[error("pawn placed on back rank at {square}")]
    PawnOnBackRank {
        /// The pawn's square.
        square: Square,
    },
    /// The side not to move is already in check.
    #[error("{color} is in check but it is not {color}'s turn")]
    OpponentInCheck {
        /// The side whose king is attacked.
        color: Color,
    },
}
