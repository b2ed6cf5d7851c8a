//! Move generation: raw per-variant movement plus the shared legality filter.

mod king;
mod knights;
mod pawns;
mod sliders;

use std::collections::BTreeSet;

use crate::game::Game;
use crate::simulate::exposes_king;
use crate::square::Square;
use crate::unit::{UnitId, UnitKind};

pub(crate) use self::king::castle_landing_on;
pub(crate) use self::pawns::en_passant_victim;

use self::king::gen_king;
use self::knights::gen_knight;
use self::pawns::gen_pawn;
use self::sliders::{Slide, gen_slider};

/// Return the squares unit `id` could reach by its movement pattern alone,
/// ignoring whether its own king would be left attacked.
///
/// Captured and discarded units reach nothing.
pub(crate) fn pseudo_moves(game: &Game, id: UnitId) -> BTreeSet<Square> {
    let unit = game.board().unit(id);
    let mut moves = BTreeSet::new();
    let Some(from) = unit.position() else {
        return moves;
    };
    let color = unit.color();

    match unit.kind() {
        UnitKind::Pawn { has_moved, .. } => gen_pawn(game, from, color, has_moved, &mut moves),
        UnitKind::Knight => gen_knight(game.board(), from, color, &mut moves),
        UnitKind::Bishop => gen_slider(game.board(), from, color, Slide::Diagonal, &mut moves),
        UnitKind::Rook { .. } => gen_slider(game.board(), from, color, Slide::Cardinal, &mut moves),
        UnitKind::Queen => gen_slider(game.board(), from, color, Slide::Both, &mut moves),
        UnitKind::King { has_moved } => gen_king(game, from, color, has_moved, &mut moves),
    }
    moves
}

/// Return the legal moves of unit `id`.
///
/// Units of the side to move keep only the targets after which their own
/// king is not attacked: in check that means the move clears the check,
/// for the king it means not stepping into an attack. Units of the other
/// side report their raw reach, which is what check detection scans.
pub(crate) fn legal_moves(game: &mut Game, id: UnitId) -> BTreeSet<Square> {
    let mut moves = pseudo_moves(game, id);
    if game.board().unit(id).color() == game.current_side() {
        moves.retain(|&target| !exposes_king(game, id, target));
    }
    moves
}
