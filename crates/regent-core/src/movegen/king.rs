//! King move and castling generation.

use std::collections::BTreeSet;

use crate::attacks::{KING_STEPS, jump_scan, threatened_squares};
use crate::color::Color;
use crate::game::Game;
use crate::rules::CastlingTransit;
use crate::square::Square;
use crate::unit::UnitKind;

/// Column the king starts on.
const KING_COLUMN: u8 = 4;

/// One of the two castling moves, described by columns on the home row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Castle {
    /// Where the king lands.
    pub(crate) king_to: u8,
    /// Where the rook starts.
    pub(crate) rook_from: u8,
    /// Where the rook lands.
    pub(crate) rook_to: u8,
    /// Squares strictly between king and rook; all must be empty.
    between: &'static [u8],
    /// Squares the king crosses and lands on.
    king_path: &'static [u8],
}

const CASTLES: [Castle; 2] = [
    Castle {
        king_to: 6,
        rook_from: 7,
        rook_to: 5,
        between: &[5, 6],
        king_path: &[5, 6],
    },
    Castle {
        king_to: 2,
        rook_from: 0,
        rook_to: 3,
        between: &[1, 2, 3],
        king_path: &[3, 2],
    },
];

/// Return the castle whose king lands on `column`, if any.
pub(crate) fn castle_landing_on(column: u8) -> Option<Castle> {
    CASTLES.iter().copied().find(|castle| castle.king_to == column)
}

/// Generate king steps plus any castling landings.
pub(super) fn gen_king(
    game: &Game,
    from: Square,
    color: Color,
    has_moved: bool,
    out: &mut BTreeSet<Square>,
) {
    let board = game.board();
    jump_scan(board, from, color, &KING_STEPS, out);

    // Castling: only an unmoved king on its start square, never out of check.
    let row = color.home_row();
    if has_moved || from != Square::new(row, KING_COLUMN) {
        return;
    }
    if color == game.current_side() && game.in_check() {
        return;
    }

    let threats = match game.rules().castling_transit {
        CastlingTransit::Unattacked => Some(threatened_squares(board, !color)),
        CastlingTransit::Unobstructed => None,
    };

    for castle in &CASTLES {
        let rook_ready = board
            .unit_at(Square::new(row, castle.rook_from))
            .is_some_and(|unit| {
                unit.color() == color && unit.kind() == UnitKind::Rook { has_moved: false }
            });
        if !rook_ready {
            continue;
        }
        let corridor_clear = castle
            .between
            .iter()
            .all(|&column| board.is_empty(Square::new(row, column)));
        if !corridor_clear {
            continue;
        }
        if let Some(threats) = &threats
            && castle
                .king_path
                .iter()
                .any(|&column| threats.contains(&Square::new(row, column)))
        {
            continue;
        }
        out.insert(Square::new(row, castle.king_to));
    }
}
