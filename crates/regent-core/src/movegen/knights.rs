//! Knight move generation.

use std::collections::BTreeSet;

use crate::attacks::{KNIGHT_JUMPS, jump_scan};
use crate::board::Board;
use crate::color::Color;
use crate::square::Square;

/// Knights jump to their eight offsets, over anything in between.
pub(super) fn gen_knight(board: &Board, from: Square, color: Color, out: &mut BTreeSet<Square>) {
    jump_scan(board, from, color, &KNIGHT_JUMPS, out);
}
