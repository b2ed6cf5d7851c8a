//! Speculative apply / rollback used to test king safety.

use tracing::trace;

use crate::color::Color;
use crate::game::Game;
use crate::movegen::{en_passant_victim, pseudo_moves};
use crate::piece_kind::PieceKind;
use crate::square::Square;
use crate::unit::UnitId;

/// Return `true` if moving `mover` onto `target` leaves its own king
/// attacked.
///
/// The move is applied to the grid only (no flags, counters or turn
/// change), the opponent's reach is recomputed into a scratch set, and the
/// grid is rolled back before returning, restoring any captured unit to its
/// square. A pawn capturing en passant also lifts the passed pawn for the
/// duration of the probe. Cached move sets and the check flag are never
/// touched.
///
/// `mover` must stand on the board and `target` must be one of its raw
/// moves.
pub(crate) fn exposes_king(game: &mut Game, mover: UnitId, target: Square) -> bool {
    let unit = game.board().unit(mover);
    let color = unit.color();
    let kind = unit.piece_kind();
    let origin = unit
        .position()
        .expect("only units on the board can be simulated");

    let en_passant = if kind == PieceKind::Pawn
        && origin.column() != target.column()
        && game.board().is_empty(target)
    {
        let columns = target.column() as i8 - origin.column() as i8;
        en_passant_victim(game, origin, color, columns)
            .map(|victim| (victim, Square::new(origin.row(), target.column())))
    } else {
        None
    };

    let captured = game.board_mut().relocate(mover, target);
    if let Some((victim, _)) = en_passant {
        game.board_mut().capture(victim);
    }
    let king_square = game.king_square(color);
    let attacked = reaches(game, !color, king_square);

    game.board_mut().relocate(mover, origin);
    if let Some(victim) = captured {
        game.board_mut().restore(victim, target);
    }
    if let Some((victim, square)) = en_passant {
        game.board_mut().restore(victim, square);
    }

    trace!(from = %origin, to = %target, attacked, "simulated move");
    attacked
}

/// Return `true` if any active unit of `by` can reach `square`.
fn reaches(game: &Game, by: Color, square: Square) -> bool {
    game.roster(by)
        .iter()
        .any(|&id| pseudo_moves(game, id).contains(&square))
}

#[cfg(test)]
mod tests {
    use super::exposes_king;
    use crate::color::Color;
    use crate::piece_kind::PieceKind;
    use crate::setup::Setup;
    use crate::square::Square;

    #[test]
    fn rollback_restores_captured_unit() {
        let mut game = Setup::new()
            .place(Color::White, PieceKind::King, Square::E1)
            .place(Color::White, PieceKind::Rook, Square::D1)
            .place(Color::Black, PieceKind::Queen, Square::D8)
            .place(Color::Black, PieceKind::King, Square::H8)
            .build()
            .unwrap();
        let rook = game.unit_at(Square::D1).unwrap().id();
        let queen = game.unit_at(Square::D8).unwrap().id();
        let before = game.legal_moves(queen);

        assert!(!exposes_king(&mut game, rook, Square::D8));

        assert_eq!(game.unit_at(Square::D8).map(|u| u.id()), Some(queen));
        assert_eq!(game.unit_at(Square::D1).map(|u| u.id()), Some(rook));
        assert!(!game.unit(queen).is_captured());
        assert!(game.board().is_consistent());
        assert_eq!(game.legal_moves(queen), before);
    }

    #[test]
    fn king_stepping_into_attack() {
        let mut game = Setup::new()
            .place(Color::White, PieceKind::King, Square::E1)
            .place(Color::Black, PieceKind::Rook, Square::F8)
            .place(Color::Black, PieceKind::King, Square::A8)
            .build()
            .unwrap();
        let king = game.king(Color::White);
        assert!(exposes_king(&mut game, king, Square::F1));
        assert!(exposes_king(&mut game, king, Square::F2));
        assert!(!exposes_king(&mut game, king, Square::D1));
        assert!(!game.in_check());
    }

    #[test]
    fn en_passant_that_uncovers_the_king() {
        let mut game = Setup::new()
            .place(Color::White, PieceKind::King, Square::A5)
            .place(Color::White, PieceKind::Pawn, Square::B5)
            .place(Color::Black, PieceKind::Pawn, Square::C7)
            .place(Color::Black, PieceKind::Rook, Square::H5)
            .place(Color::Black, PieceKind::King, Square::H8)
            .side_to_move(Color::Black)
            .build()
            .unwrap();
        game.attempt_move_from(Square::C7, Square::C5).unwrap();
        let pawn = game.unit_at(Square::B5).unwrap().id();
        let passed = game.unit_at(Square::C5).unwrap().id();

        // Taking c5 en passant clears the fifth rank from h5 to a5.
        assert!(exposes_king(&mut game, pawn, Square::C6));
        assert!(!exposes_king(&mut game, pawn, Square::B6));
        assert_eq!(game.unit_at(Square::C5).map(|u| u.id()), Some(passed));
        assert!(!game.unit(passed).is_captured());
        assert!(game.board().is_consistent());
    }

    #[test]
    fn en_passant_removes_checking_pawn() {
        let mut game = Setup::new()
            .place(Color::White, PieceKind::King, Square::E4)
            .place(Color::White, PieceKind::Pawn, Square::E5)
            .place(Color::Black, PieceKind::Pawn, Square::D7)
            .place(Color::Black, PieceKind::King, Square::H8)
            .side_to_move(Color::Black)
            .build()
            .unwrap();
        game.attempt_move_from(Square::D7, Square::D5).unwrap();
        assert!(game.in_check());

        let pawn = game.unit_at(Square::E5).unwrap().id();
        assert!(!exposes_king(&mut game, pawn, Square::D6));
        assert!(exposes_king(&mut game, pawn, Square::E6));
        assert!(game.unit_at(Square::D5).is_some());
        assert!(game.in_check());
    }

    #[test]
    fn capture_removes_attacker() {
        let mut game = Setup::new()
            .place(Color::White, PieceKind::King, Square::E1)
            .place(Color::Black, PieceKind::Queen, Square::E2)
            .place(Color::Black, PieceKind::King, Square::E8)
            .build()
            .unwrap();
        assert!(game.in_check());
        let king = game.king(Color::White);
        // The queen is unprotected, so taking it clears the check.
        assert!(!exposes_king(&mut game, king, Square::E2));
        assert!(exposes_king(&mut game, king, Square::D2));
        assert!(game.in_check());
    }
}
