//! Core chess rules: board state, move generation, check detection and the
//! turn state machine.

mod attacks;
mod board;
mod color;
mod error;
mod game;
mod movegen;
mod perft;
mod piece_kind;
mod rules;
mod setup;
mod simulate;
mod square;
mod unit;

pub use board::{Board, PrettyBoard};
pub use color::Color;
pub use error::{CoordinateError, MoveError, PromotionError, SetupError};
pub use game::{Game, GameStatus};
pub use perft::{divide, perft};
pub use piece_kind::{PieceKind, parse_promotion_choice};
pub use rules::{CastlingTransit, Rules};
pub use setup::Setup;
pub use square::{BOARD_SIZE, Square, parse_coordinate};
pub use unit::{Unit, UnitId, UnitKind};
