//! The grid of squares and the arena of units standing on it.

use std::fmt;

use crate::color::Color;
use crate::square::{BOARD_SIZE, Square};
use crate::unit::{Unit, UnitId, UnitKind};

const SIZE: usize = BOARD_SIZE as usize;

/// Piece placement: which unit stands on which square.
///
/// Every unit ever created lives in the arena, including captured units and
/// pawns discarded by promotion. The grid and the units' positions are kept
/// in agreement by every mutator here: a square's occupant always reports
/// that square as its position, and vice versa.
#[derive(Debug, Clone)]
pub struct Board {
    grid: [[Option<UnitId>; SIZE]; SIZE],
    units: Vec<Unit>,
}

impl Board {
    /// Return a board with no units.
    pub fn empty() -> Board {
        Board {
            grid: [[None; SIZE]; SIZE],
            units: Vec::with_capacity(32),
        }
    }

    /// Create a unit on `square` and return its handle.
    ///
    /// # Panics
    ///
    /// Panics if `square` is already occupied.
    pub(crate) fn spawn(&mut self, color: Color, kind: UnitKind, square: Square) -> UnitId {
        assert!(
            self.occupant(square).is_none(),
            "cannot spawn onto occupied square {square}"
        );
        let id = UnitId::new(self.units.len());
        self.units.push(Unit::new(id, color, kind, square));
        self.set_occupant(square, Some(id));
        id
    }

    /// Return the unit with handle `id`.
    #[inline]
    pub fn unit(&self, id: UnitId) -> &Unit {
        &self.units[id.index()]
    }

    #[inline]
    pub(crate) fn unit_mut(&mut self, id: UnitId) -> &mut Unit {
        &mut self.units[id.index()]
    }

    /// Return every unit ever created, in creation order.
    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    /// Return the handle of the unit on `square`, if any.
    #[inline]
    pub fn occupant(&self, square: Square) -> Option<UnitId> {
        self.grid[square.row() as usize][square.column() as usize]
    }

    /// Return the unit on `square`, if any.
    #[inline]
    pub fn unit_at(&self, square: Square) -> Option<&Unit> {
        self.occupant(square).map(|id| self.unit(id))
    }

    /// Return the side of the unit on `square`, if any.
    #[inline]
    pub fn color_at(&self, square: Square) -> Option<Color> {
        self.unit_at(square).map(Unit::color)
    }

    #[inline]
    pub fn is_empty(&self, square: Square) -> bool {
        self.occupant(square).is_none()
    }

    #[inline]
    fn set_occupant(&mut self, square: Square, id: Option<UnitId>) {
        self.grid[square.row() as usize][square.column() as usize] = id;
    }

    /// Move unit `id` onto `to`, capturing whatever stood there.
    ///
    /// Only placement changes; per-variant flags are the caller's business.
    /// Returns the captured unit, if any.
    pub(crate) fn relocate(&mut self, id: UnitId, to: Square) -> Option<UnitId> {
        let from = self
            .unit(id)
            .position()
            .expect("only units on the board can be relocated");
        if from == to {
            return None;
        }
        let captured = self.occupant(to);
        if let Some(victim) = captured {
            self.capture(victim);
        }
        self.set_occupant(from, None);
        self.set_occupant(to, Some(id));
        self.unit_mut(id).set_position(Some(to));
        captured
    }

    /// Take unit `id` off the board and mark it captured.
    pub(crate) fn capture(&mut self, id: UnitId) {
        self.lift(id);
        self.unit_mut(id).set_captured(true);
    }

    /// Put a captured unit back on `square`, which must be empty.
    pub(crate) fn restore(&mut self, id: UnitId, square: Square) {
        assert!(
            self.is_empty(square),
            "cannot restore onto occupied square {square}"
        );
        let unit = self.unit_mut(id);
        unit.set_captured(false);
        unit.set_position(Some(square));
        self.set_occupant(square, Some(id));
    }

    /// Take unit `id` off the board without counting it as captured.
    pub(crate) fn discard(&mut self, id: UnitId) {
        self.lift(id);
    }

    fn lift(&mut self, id: UnitId) {
        if let Some(square) = self.unit(id).position() {
            self.set_occupant(square, None);
        }
        self.unit_mut(id).set_position(None);
    }

    /// Mark every unit's cached move set stale.
    pub(crate) fn invalidate_moves(&mut self) {
        for unit in &mut self.units {
            unit.set_cached_moves(None);
        }
    }

    /// Return `true` if the grid and the unit positions agree everywhere.
    pub fn is_consistent(&self) -> bool {
        let squares_agree = Square::all().all(|square| match self.occupant(square) {
            Some(id) => self.unit(id).position() == Some(square),
            None => true,
        });
        let units_agree = self.units.iter().all(|unit| match unit.position() {
            Some(square) => self.occupant(square) == Some(unit.id()) && !unit.is_captured(),
            None => true,
        });
        squares_agree && units_agree
    }

    /// Return a pretty-printable wrapper for this board.
    pub fn pretty(&self) -> PrettyBoard<'_> {
        PrettyBoard(self)
    }
}

/// Wrapper for printing a board as a labelled 8x8 grid of two-letter tags.
///
/// ```text
/// 8 [BR][BH][BB][BQ][BK][BB][BH][BR]
/// ...
/// 1 [WR][WH][WB][WQ][WK][WB][WH][WR]
///    A   B   C   D   E   F   G   H
/// ```
pub struct PrettyBoard<'a>(&'a Board);

impl fmt::Display for PrettyBoard<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let board = self.0;
        for row in 0..BOARD_SIZE {
            write!(f, "{} ", BOARD_SIZE - row)?;
            for column in 0..BOARD_SIZE {
                match board.unit_at(Square::new(row, column)) {
                    Some(unit) => write!(f, "[{}]", unit.tag())?,
                    None => write!(f, "[  ]")?,
                }
            }
            writeln!(f)?;
        }
        write!(f, "   A   B   C   D   E   F   G   H")
    }
}
