//! Building games from the standard or a custom position.

use crate::attacks::threatened_squares;
use crate::board::Board;
use crate::color::Color;
use crate::error::SetupError;
use crate::game::Game;
use crate::piece_kind::PieceKind;
use crate::rules::Rules;
use crate::square::Square;
use crate::unit::UnitKind;

/// Back-rank order from column a to column h.
const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// Builder for a starting position.
///
/// Units placed on their initial squares start unmoved; anywhere else they
/// count as having moved, so a displaced king or rook cannot castle and a
/// displaced pawn cannot advance two squares.
///
/// ```
/// use regent_core::{Color, PieceKind, Setup, Square};
///
/// let game = Setup::new()
///     .place(Color::White, PieceKind::King, Square::E1)
///     .place(Color::Black, PieceKind::King, Square::E8)
///     .build()
///     .unwrap();
/// assert_eq!(game.roster(Color::White).len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct Setup {
    placements: Vec<(Color, PieceKind, Square)>,
    side_to_move: Color,
    rules: Rules,
}

impl Setup {
    /// Return an empty setup with White to move.
    pub fn new() -> Setup {
        Setup {
            placements: Vec::new(),
            side_to_move: Color::White,
            rules: Rules::default(),
        }
    }

    /// Return the standard initial position.
    pub fn standard() -> Setup {
        let mut setup = Setup::new();
        for color in Color::ALL {
            for (column, kind) in (0..).zip(BACK_RANK) {
                setup = setup
                    .place(color, kind, Square::new(color.home_row(), column))
                    .place(color, PieceKind::Pawn, Square::new(color.pawn_row(), column));
            }
        }
        setup
    }

    /// Add a unit of `color` and `kind` on `square`.
    pub fn place(mut self, color: Color, kind: PieceKind, square: Square) -> Setup {
        self.placements.push((color, kind, square));
        self
    }

    pub fn side_to_move(mut self, color: Color) -> Setup {
        self.side_to_move = color;
        self
    }

    pub fn rules(mut self, rules: Rules) -> Setup {
        self.rules = rules;
        self
    }

    /// Validate the placements and start a game from them.
    pub fn build(self) -> Result<Game, SetupError> {
        let mut board = Board::empty();
        let mut kings = [0usize; Color::COUNT];

        for &(color, kind, square) in &self.placements {
            if !board.is_empty(square) {
                return Err(SetupError::SquareOccupied { square });
            }
            if kind == PieceKind::Pawn && (square.row() == 0 || square.row() == 7) {
                return Err(SetupError::PawnOnBackRank { square });
            }
            if kind == PieceKind::King {
                kings[color.index()] += 1;
            }
            board.spawn(color, initial_state(color, kind, square), square);
        }

        for color in Color::ALL {
            let count = kings[color.index()];
            if count != 1 {
                return Err(SetupError::InvalidKingCount { color, count });
            }
        }

        let waiting = !self.side_to_move;
        let king_square = board
            .units()
            .iter()
            .find(|unit| unit.color() == waiting && unit.piece_kind() == PieceKind::King)
            .and_then(|unit| unit.position());
        if let Some(square) = king_square
            && threatened_squares(&board, self.side_to_move).contains(&square)
        {
            return Err(SetupError::OpponentInCheck { color: waiting });
        }

        Ok(Game::from_board(board, self.side_to_move, self.rules))
    }
}

impl Default for Setup {
    fn default() -> Self {
        Setup::new()
    }
}

/// Derive has-moved flags from where a unit is placed.
fn initial_state(color: Color, kind: PieceKind, square: Square) -> UnitKind {
    let home = color.home_row();
    let at_start = match kind {
        PieceKind::Pawn => square.row() == color.pawn_row(),
        PieceKind::Rook => square.row() == home && (square.column() == 0 || square.column() == 7),
        PieceKind::King => square == Square::new(home, 4),
        _ => true,
    };
    let mut state = UnitKind::unmoved(kind);
    if !at_start {
        state.mark_moved();
    }
    state
}
