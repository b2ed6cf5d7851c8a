//! Shared scanning primitives: rays, jump patterns and threat maps.

use std::collections::BTreeSet;

use crate::board::Board;
use crate::color::Color;
use crate::piece_kind::PieceKind;
use crate::square::Square;

/// North, south, east, west as (row, column) deltas.
pub(crate) const CARDINALS: [(i8, i8); 4] = [(-1, 0), (1, 0), (0, 1), (0, -1)];

/// The four diagonal directions.
pub(crate) const DIAGONALS: [(i8, i8); 4] = [(-1, 1), (-1, -1), (1, 1), (1, -1)];

pub(crate) const KNIGHT_JUMPS: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

pub(crate) const KING_STEPS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Cast a ray from `from` along each direction for a unit of `color`.
///
/// A ray stops at the board edge or the first occupied square. An enemy on
/// that square is included, an ally is not.
pub(crate) fn ray_scan(
    board: &Board,
    from: Square,
    color: Color,
    directions: &[(i8, i8)],
    out: &mut BTreeSet<Square>,
) {
    for &(rows, columns) in directions {
        let mut cursor = from;
        while let Some(next) = cursor.offset(rows, columns) {
            match board.color_at(next) {
                None => {
                    out.insert(next);
                    cursor = next;
                }
                Some(other) => {
                    if other != color {
                        out.insert(next);
                    }
                    break;
                }
            }
        }
    }
}

/// Add each fixed offset from `from` that is on the board and not held by an ally.
pub(crate) fn jump_scan(
    board: &Board,
    from: Square,
    color: Color,
    offsets: &[(i8, i8)],
    out: &mut BTreeSet<Square>,
) {
    for &(rows, columns) in offsets {
        if let Some(target) = from.offset(rows, columns)
            && board.color_at(target) != Some(color)
        {
            out.insert(target);
        }
    }
}

/// Return every square attacked by an active unit of `by`.
///
/// Pawns attack their two forward diagonals whether or not anything stands
/// there, and kings attack only adjacent squares, so the map never depends
/// on castling and never recurses into move generation.
pub(crate) fn threatened_squares(board: &Board, by: Color) -> BTreeSet<Square> {
    let mut threats = BTreeSet::new();
    for unit in board.units() {
        let Some(from) = unit.position() else {
            continue;
        };
        if unit.color() != by {
            continue;
        }
        match unit.piece_kind() {
            PieceKind::Pawn => {
                let forward = by.forward();
                for columns in [-1, 1] {
                    if let Some(target) = from.offset(forward, columns) {
                        threats.insert(target);
                    }
                }
            }
            PieceKind::Knight => jump_scan(board, from, by, &KNIGHT_JUMPS, &mut threats),
            PieceKind::Bishop => ray_scan(board, from, by, &DIAGONALS, &mut threats),
            PieceKind::Rook => ray_scan(board, from, by, &CARDINALS, &mut threats),
            PieceKind::Queen => {
                ray_scan(board, from, by, &CARDINALS, &mut threats);
                ray_scan(board, from, by, &DIAGONALS, &mut threats);
            }
            PieceKind::King => jump_scan(board, from, by, &KING_STEPS, &mut threats),
        }
    }
    threats
}
