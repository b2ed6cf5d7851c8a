//! Pawn move generation, including en passant.

use std::collections::BTreeSet;

use crate::color::Color;
use crate::game::Game;
use crate::square::Square;
use crate::unit::{UnitId, UnitKind};

/// Generate pawn pushes and captures for a pawn of `color` on `from`.
pub(super) fn gen_pawn(
    game: &Game,
    from: Square,
    color: Color,
    has_moved: bool,
    out: &mut BTreeSet<Square>,
) {
    let board = game.board();
    // A pawn on its far rank is waiting for promotion and cannot move.
    if from.row() == color.far_row() {
        return;
    }
    let forward = color.forward();

    if let Some(one) = from.offset(forward, 0)
        && board.is_empty(one)
    {
        out.insert(one);
        if !has_moved
            && let Some(two) = from.offset(2 * forward, 0)
            && board.is_empty(two)
        {
            out.insert(two);
        }
    }

    for columns in [-1, 1] {
        let Some(target) = from.offset(forward, columns) else {
            continue;
        };
        match board.color_at(target) {
            Some(other) if other != color => {
                out.insert(target);
            }
            Some(_) => {}
            None => {
                if en_passant_victim(game, from, color, columns).is_some() {
                    out.insert(target);
                }
            }
        }
    }
}

/// Return the enemy pawn beside `from` (towards `columns`) that a pawn of
/// `color` may capture en passant on this ply.
///
/// The victim must have advanced two squares on the immediately preceding ply.
pub(crate) fn en_passant_victim(
    game: &Game,
    from: Square,
    color: Color,
    columns: i8,
) -> Option<UnitId> {
    let beside = from.offset(0, columns)?;
    let unit = game.board().unit_at(beside)?;
    match unit.kind() {
        UnitKind::Pawn {
            double_jump_ply: Some(ply),
            ..
        } if unit.color() != color && ply + 1 == game.turn_number() => Some(unit.id()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use crate::color::Color;
    use crate::game::Game;
    use crate::movegen::pseudo_moves;
    use crate::piece_kind::PieceKind;
    use crate::setup::Setup;
    use crate::square::Square;

    fn squares(list: &[Square]) -> BTreeSet<Square> {
        list.iter().copied().collect()
    }

    fn pawn_moves(game: &Game, square: Square) -> BTreeSet<Square> {
        let id = game.unit_at(square).unwrap().id();
        pseudo_moves(game, id)
    }

    #[test]
    fn unmoved_pawn_double_steps() {
        let game = Game::new();
        assert_eq!(
            pawn_moves(&game, Square::E2),
            squares(&[Square::E3, Square::E4])
        );
        assert_eq!(
            pawn_moves(&game, Square::D7),
            squares(&[Square::D6, Square::D5])
        );
    }

    #[test]
    fn blocked_pawn_cannot_jump_over() {
        let game = Setup::new()
            .place(Color::White, PieceKind::King, Square::E1)
            .place(Color::White, PieceKind::Pawn, Square::C2)
            .place(Color::Black, PieceKind::Knight, Square::C3)
            .place(Color::Black, PieceKind::King, Square::E8)
            .build()
            .unwrap();
        assert!(pawn_moves(&game, Square::C2).is_empty());
    }

    #[test]
    fn moved_pawn_single_steps_and_captures() {
        let game = Setup::new()
            .place(Color::White, PieceKind::King, Square::E1)
            .place(Color::White, PieceKind::Pawn, Square::D4)
            .place(Color::Black, PieceKind::Knight, Square::C5)
            .place(Color::White, PieceKind::Knight, Square::E5)
            .place(Color::Black, PieceKind::King, Square::E8)
            .build()
            .unwrap();
        assert_eq!(
            pawn_moves(&game, Square::D4),
            squares(&[Square::D5, Square::C5])
        );
    }

    #[test]
    fn pawn_on_far_rank_has_no_moves() {
        let mut game = Setup::new()
            .place(Color::White, PieceKind::King, Square::E1)
            .place(Color::White, PieceKind::Pawn, Square::A7)
            .place(Color::Black, PieceKind::King, Square::H5)
            .build()
            .unwrap();
        game.attempt_move_from(Square::A7, Square::A8).unwrap();
        assert!(pawn_moves(&game, Square::A8).is_empty());
    }
}
