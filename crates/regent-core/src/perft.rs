//! Perft (performance test) for move generation correctness verification.

use crate::game::Game;
use crate::piece_kind::PieceKind;
use crate::square::Square;
use crate::unit::UnitId;

/// Count the number of leaf nodes at the given depth.
///
/// Depth 0 returns 1 (the current position). A pawn reaching its far rank
/// branches once per promotion choice. Finished games have no children.
pub fn perft(game: &Game, depth: usize) -> u64 {
    if depth == 0 {
        return 1;
    }
    if game.status().is_terminal() {
        return 0;
    }

    let mut game = game.clone();
    let mut nodes = 0u64;
    for (id, to) in side_moves(&mut game) {
        for child in children(&game, id, to) {
            nodes += perft(&child, depth - 1);
        }
    }
    nodes
}

/// Run perft with per-move breakdown (useful for debugging).
///
/// Returns a vector of `(move, node_count)` pairs sorted alphabetically,
/// where a move reads like `e2e4`, or `a7a8q` for a promotion.
pub fn divide(game: &Game, depth: usize) -> Vec<(String, u64)> {
    let mut game = game.clone();
    let mut results = Vec::new();
    for (id, to) in side_moves(&mut game) {
        let from = game
            .unit(id)
            .position()
            .expect("movable units stand on the board");
        for child in children(&game, id, to) {
            let mut name = format!("{from}{to}");
            if let Some(unit) = child.unit_at(to)
                && unit.piece_kind() != game.unit(id).piece_kind()
            {
                name.push(unit.piece_kind().letter().to_ascii_lowercase());
            }
            let count = if depth <= 1 { 1 } else { perft(&child, depth - 1) };
            results.push((name, count));
        }
    }
    results.sort_by(|a, b| a.0.cmp(&b.0));
    results
}

/// Return every legal `(unit, target)` pair for the side to move.
fn side_moves(game: &mut Game) -> Vec<(UnitId, Square)> {
    let side = game.current_side();
    let ids = game.roster(side).to_vec();
    let mut moves = Vec::new();
    for id in ids {
        for to in game.legal_moves(id) {
            moves.push((id, to));
        }
    }
    moves
}

/// Play `id` to `to` on copies of `game`, one copy per promotion choice.
fn children(game: &Game, id: UnitId, to: Square) -> Vec<Game> {
    let mut child = game.clone();
    child
        .attempt_move(id, to)
        .expect("generated moves are legal");
    if child.promotable_unit().is_none() {
        return vec![child];
    }
    PieceKind::PROMOTIONS
        .iter()
        .map(|&kind| {
            let mut promoted = child.clone();
            promoted
                .promote(kind)
                .expect("promotion choices are valid");
            promoted
        })
        .collect()
}
