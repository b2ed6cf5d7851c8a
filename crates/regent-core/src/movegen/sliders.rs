//! Bishop, rook and queen move generation.

use std::collections::BTreeSet;

use crate::attacks::{CARDINALS, DIAGONALS, ray_scan};
use crate::board::Board;
use crate::color::Color;
use crate::square::Square;

/// Which rays a sliding unit casts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Slide {
    Diagonal,
    Cardinal,
    Both,
}

pub(super) fn gen_slider(
    board: &Board,
    from: Square,
    color: Color,
    slide: Slide,
    out: &mut BTreeSet<Square>,
) {
    if matches!(slide, Slide::Cardinal | Slide::Both) {
        ray_scan(board, from, color, &CARDINALS, out);
    }
    if matches!(slide, Slide::Diagonal | Slide::Both) {
        ray_scan(board, from, color, &DIAGONALS, out);
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::{Slide, gen_slider};
    use crate::board::Board;
    use crate::color::Color;
    use crate::square::Square;
    use crate::unit::UnitKind;

    #[test]
    fn open_board_counts() {
        let mut board = Board::empty();
        board.spawn(Color::White, UnitKind::Queen, Square::D4);

        let mut bishop = BTreeSet::new();
        gen_slider(&board, Square::D4, Color::White, Slide::Diagonal, &mut bishop);
        assert_eq!(bishop.len(), 13);

        let mut rook = BTreeSet::new();
        gen_slider(&board, Square::D4, Color::White, Slide::Cardinal, &mut rook);
        assert_eq!(rook.len(), 14);

        let mut queen = BTreeSet::new();
        gen_slider(&board, Square::D4, Color::White, Slide::Both, &mut queen);
        assert_eq!(queen.len(), 27);
    }

    #[test]
    fn bishop_stops_at_first_unit() {
        let mut board = Board::empty();
        board.spawn(Color::Black, UnitKind::Bishop, Square::C8);
        board.spawn(Color::Black, UnitKind::Knight, Square::B7);
        board.spawn(Color::White, UnitKind::Knight, Square::E6);

        let mut out = BTreeSet::new();
        gen_slider(&board, Square::C8, Color::Black, Slide::Diagonal, &mut out);
        let expected: BTreeSet<Square> = [Square::D7, Square::E6].into_iter().collect();
        assert_eq!(out, expected);
    }
}
