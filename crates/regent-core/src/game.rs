//! Game state, the turn state machine and promotion.

use std::collections::BTreeSet;
use std::fmt;

use tracing::{debug, info};

use crate::board::{Board, PrettyBoard};
use crate::color::Color;
use crate::error::{CoordinateError, MoveError, PromotionError};
use crate::movegen::{self, castle_landing_on, en_passant_victim};
use crate::piece_kind::PieceKind;
use crate::rules::Rules;
use crate::setup::Setup;
use crate::simulate::exposes_king;
use crate::square::Square;
use crate::unit::{Unit, UnitId, UnitKind};

/// Outcome of the game so far.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    /// The game continues.
    Ongoing,
    /// The side to move is in check with no legal move.
    Checkmate {
        /// The side that delivered mate.
        winner: Color,
    },
    /// The quiet-move limit was reached.
    Stalemate,
}

impl GameStatus {
    /// Return `true` once the game has ended.
    #[inline]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, GameStatus::Ongoing)
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameStatus::Ongoing => f.write_str("ongoing"),
            GameStatus::Checkmate { winner } => write!(f, "checkmate, {winner} wins"),
            GameStatus::Stalemate => f.write_str("stalemate"),
        }
    }
}

/// A game in progress.
///
/// The only mutators are [`Game::attempt_move`] and [`Game::promote`]; every
/// other method is a query. Move sets are cached per unit and recomputed
/// lazily after each mutation.
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    /// Active units of each side, indexed by [`Color::index`].
    rosters: [Vec<UnitId>; Color::COUNT],
    side_to_move: Color,
    /// Ply counter, starting at 1.
    ply: u32,
    in_check: bool,
    promotable: Option<UnitId>,
    quiet_moves: u32,
    status: GameStatus,
    rules: Rules,
}

impl Game {
    /// Start a game from the standard position with default rules.
    pub fn new() -> Game {
        Game::with_rules(Rules::default())
    }

    /// Start a game from the standard position.
    pub fn with_rules(rules: Rules) -> Game {
        Setup::standard()
            .rules(rules)
            .build()
            .expect("the standard position is valid")
    }

    /// Wrap a validated board. Check and checkmate are evaluated for
    /// `side_to_move` straight away.
    pub(crate) fn from_board(board: Board, side_to_move: Color, rules: Rules) -> Game {
        let mut rosters: [Vec<UnitId>; Color::COUNT] = [Vec::new(), Vec::new()];
        for unit in board.units().iter().filter(|unit| unit.is_active()) {
            rosters[unit.color().index()].push(unit.id());
        }
        let mut game = Game {
            board,
            rosters,
            side_to_move,
            ply: 1,
            in_check: false,
            promotable: None,
            quiet_moves: 0,
            status: GameStatus::Ongoing,
            rules,
        };
        game.evaluate_turn();
        game
    }

    // --- Queries ---

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub(crate) fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    #[inline]
    pub fn unit(&self, id: UnitId) -> &Unit {
        self.board.unit(id)
    }

    /// Return the unit on `square`, if any.
    #[inline]
    pub fn unit_at(&self, square: Square) -> Option<&Unit> {
        self.board.unit_at(square)
    }

    /// Return the active units of `color`.
    pub fn units(&self, color: Color) -> impl Iterator<Item = &Unit> {
        self.roster(color).iter().map(|&id| self.board.unit(id))
    }

    /// Return the handles of the active units of `color`.
    #[inline]
    pub fn roster(&self, color: Color) -> &[UnitId] {
        &self.rosters[color.index()]
    }

    /// Return the king of `color`.
    ///
    /// # Panics
    ///
    /// Panics if `color` has no king, which cannot happen in a game built
    /// by [`Setup`].
    pub fn king(&self, color: Color) -> UnitId {
        self.roster(color)
            .iter()
            .copied()
            .find(|&id| self.board.unit(id).piece_kind() == PieceKind::King)
            .expect("each side must have a king")
    }

    /// Return the square the king of `color` stands on.
    pub fn king_square(&self, color: Color) -> Square {
        self.board
            .unit(self.king(color))
            .position()
            .expect("kings are never captured")
    }

    /// Return the side to move.
    #[inline]
    pub fn current_side(&self) -> Color {
        self.side_to_move
    }

    /// Return the side that moved last. Before the first move this is White.
    pub fn previous_side(&self) -> Color {
        if self.ply == 1 {
            Color::White
        } else {
            !self.side_to_move
        }
    }

    /// Return `true` if the side to move is in check.
    #[inline]
    pub fn in_check(&self) -> bool {
        self.in_check
    }

    /// Return the pawn waiting for its promotion choice, if any.
    pub fn promotable_unit(&self) -> Option<&Unit> {
        self.promotable.map(|id| self.board.unit(id))
    }

    /// Return the ply counter. The first move is made on ply 1.
    #[inline]
    pub fn turn_number(&self) -> u32 {
        self.ply
    }

    /// Return the number of consecutive quiet moves.
    #[inline]
    pub fn quiet_move_count(&self) -> u32 {
        self.quiet_moves
    }

    #[inline]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    #[inline]
    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    /// Return the units of `color` that have been captured.
    pub fn captured_units(&self, color: Color) -> Vec<&Unit> {
        self.board
            .units()
            .iter()
            .filter(|unit| unit.color() == color && unit.is_captured())
            .collect()
    }

    /// Return the material value of the units `color` has lost.
    pub fn captured_value(&self, color: Color) -> u32 {
        self.captured_units(color)
            .iter()
            .map(|unit| unit.piece_kind().value())
            .sum()
    }

    /// Look up a square by row and column.
    pub fn square(&self, row: i32, column: i32) -> Result<Square, CoordinateError> {
        Square::try_new(row, column).ok_or(CoordinateError::OutOfRange { row, column })
    }

    /// Return the legal moves of unit `id`, computing them if stale.
    ///
    /// Units of the side to move get their king-safe moves. Units of the
    /// other side get their raw reach. Captured units have none.
    pub fn legal_moves(&mut self, id: UnitId) -> BTreeSet<Square> {
        if let Some(moves) = self.board.unit(id).cached_moves() {
            return moves.clone();
        }
        let moves = movegen::legal_moves(self, id);
        self.board.unit_mut(id).set_cached_moves(Some(moves.clone()));
        moves
    }

    /// Return `true` if moving `mover` to `target` leaves its king safe.
    ///
    /// Returns `false` when `target` is not a square `mover` can reach.
    pub fn would_escape_check(&mut self, mover: UnitId, target: Square) -> bool {
        self.reaches(mover, target) && !exposes_king(self, mover, target)
    }

    /// Return `true` if moving `king` to `target` puts it under attack.
    ///
    /// Returns `false` when `target` is not a square `king` can reach.
    pub fn would_enter_check(&mut self, king: UnitId, target: Square) -> bool {
        self.reaches(king, target) && exposes_king(self, king, target)
    }

    /// Return `true` if `id` stands on the board and `target` is in its raw reach.
    fn reaches(&self, id: UnitId, target: Square) -> bool {
        self.board.unit(id).is_active() && movegen::pseudo_moves(self, id).contains(&target)
    }

    /// Render the board as text, one rank per line.
    pub fn render(&self) -> String {
        self.pretty().to_string()
    }

    /// Return a pretty-printable wrapper for the board.
    pub fn pretty(&self) -> PrettyBoard<'_> {
        self.board.pretty()
    }

    // --- Mutators ---

    /// Move unit `id` to `to` and advance the turn.
    ///
    /// Rejections leave the game untouched. On success the new status is
    /// returned; `Checkmate` and `Stalemate` end the game, after which every
    /// further attempt fails with [`MoveError::GameOver`].
    pub fn attempt_move(&mut self, id: UnitId, to: Square) -> Result<GameStatus, MoveError> {
        if self.status.is_terminal() {
            return Err(MoveError::GameOver {
                status: self.status,
            });
        }
        if let Some(unit) = self.promotable_unit() {
            return Err(MoveError::PromotionPending {
                square: unit.position().expect("promotable pawn stands on the board"),
            });
        }
        let unit = self.board.unit(id);
        let kind = unit.piece_kind();
        if unit.color() != self.side_to_move {
            return Err(MoveError::WrongTurn {
                side_to_move: self.side_to_move,
            });
        }
        if !self.legal_moves(id).contains(&to) {
            return Err(MoveError::IllegalMove { kind, to });
        }

        let limit_reached = if kind == PieceKind::Pawn || !self.board.is_empty(to) {
            self.quiet_moves = 0;
            false
        } else {
            self.quiet_moves += 1;
            self.quiet_moves >= self.rules.quiet_move_limit
        };

        self.apply(id, to);

        if limit_reached {
            self.status = GameStatus::Stalemate;
            info!(ply = self.ply, quiet_moves = self.quiet_moves, "quiet-move limit reached");
            return Ok(self.status);
        }

        self.promotable = self.find_promotable(self.side_to_move);
        self.side_to_move = !self.side_to_move;
        self.ply += 1;
        self.evaluate_turn();
        Ok(self.status)
    }

    /// Move the unit standing on `from` to `to`.
    pub fn attempt_move_from(&mut self, from: Square, to: Square) -> Result<GameStatus, MoveError> {
        let id = self
            .board
            .occupant(from)
            .ok_or(MoveError::EmptySquare { square: from })?;
        self.attempt_move(id, to)
    }

    /// Replace the promotable pawn with a new unit of `kind`.
    ///
    /// The pawn is discarded, not captured. Check and checkmate are
    /// re-evaluated for the side to move, and the resulting status is
    /// returned.
    pub fn promote(&mut self, kind: PieceKind) -> Result<GameStatus, PromotionError> {
        let Some(pawn) = self.promotable else {
            return Err(PromotionError::NoPromotionPending);
        };
        if !kind.is_promotion_choice() {
            return Err(PromotionError::InvalidPromotionChoice { kind });
        }

        let unit = self.board.unit(pawn);
        let color = unit.color();
        let square = unit
            .position()
            .expect("promotable pawn stands on the board");

        self.board.discard(pawn);
        let mut state = UnitKind::unmoved(kind);
        state.mark_moved();
        let promoted = self.board.spawn(color, state, square);
        if let Some(slot) = self.rosters[color.index()]
            .iter_mut()
            .find(|slot| **slot == pawn)
        {
            *slot = promoted;
        }
        self.promotable = None;
        self.board.invalidate_moves();
        debug!(%square, %kind, "promoted pawn");

        if !self.status.is_terminal() {
            self.evaluate_turn();
        }
        Ok(self.status)
    }

    // --- Turn machinery ---

    /// Relocate the mover and apply the side effects of its kind.
    fn apply(&mut self, id: UnitId, to: Square) {
        let unit = self.board.unit(id);
        let color = unit.color();
        let kind = unit.kind();
        let from = unit
            .position()
            .expect("only units on the board can move");

        // An en passant victim must be found before the pawn leaves `from`.
        let en_passant = match kind {
            UnitKind::Pawn { .. } if from.column() != to.column() && self.board.is_empty(to) => {
                let columns = to.column() as i8 - from.column() as i8;
                en_passant_victim(self, from, color, columns)
            }
            _ => None,
        };

        if let Some(victim) = self.board.relocate(id, to) {
            self.remove_from_roster(victim);
        }
        if let Some(victim) = en_passant {
            self.board.capture(victim);
            self.remove_from_roster(victim);
        }

        let ply = self.ply;
        let state = self.board.unit_mut(id).kind_mut();
        state.mark_moved();
        if from.row().abs_diff(to.row()) == 2
            && let UnitKind::Pawn {
                double_jump_ply, ..
            } = state
        {
            *double_jump_ply = Some(ply);
        }

        if kind == (UnitKind::King { has_moved: false })
            && from.column().abs_diff(to.column()) == 2
            && let Some(castle) = castle_landing_on(to.column())
            && let Some(rook) = self
                .board
                .occupant(Square::new(from.row(), castle.rook_from))
        {
            self.board
                .relocate(rook, Square::new(from.row(), castle.rook_to));
            self.board.unit_mut(rook).kind_mut().mark_moved();
        }

        self.board.invalidate_moves();
        debug!(ply, %from, %to, kind = %kind.piece_kind(), "applied move");
    }

    fn remove_from_roster(&mut self, id: UnitId) {
        let color = self.board.unit(id).color();
        self.rosters[color.index()].retain(|&unit| unit != id);
    }

    /// Return the pawn of `color` standing on its far row, if any.
    ///
    /// # Panics
    ///
    /// Panics if more than one such pawn exists.
    fn find_promotable(&self, color: Color) -> Option<UnitId> {
        let mut candidates = self.roster(color).iter().copied().filter(|&id| {
            let unit = self.board.unit(id);
            unit.piece_kind() == PieceKind::Pawn
                && unit
                    .position()
                    .is_some_and(|square| square.row() == color.far_row())
        });
        let found = candidates.next();
        assert!(
            candidates.next().is_none(),
            "more than one promotable pawn"
        );
        found
    }

    /// Recompute every move set of `color` into the caches.
    fn refresh_side(&mut self, color: Color) {
        let ids = self.rosters[color.index()].clone();
        for id in ids {
            let moves = movegen::legal_moves(self, id);
            self.board.unit_mut(id).set_cached_moves(Some(moves));
        }
    }

    /// Recompute check for the side to move and detect checkmate.
    ///
    /// The other side's reach is computed first since check means that
    /// reach includes our king; our own moves are then filtered against it.
    fn evaluate_turn(&mut self) {
        let us = self.side_to_move;
        let them = !us;

        self.refresh_side(them);
        let king_square = self.king_square(us);
        let in_check = self.roster(them).iter().any(|&id| {
            self.board
                .unit(id)
                .cached_moves()
                .is_some_and(|moves| moves.contains(&king_square))
        });
        if in_check != self.in_check {
            debug!(side = %us, in_check, "check changed");
        }
        self.in_check = in_check;

        self.refresh_side(us);
        let can_move = self.roster(us).iter().any(|&id| {
            self.board
                .unit(id)
                .cached_moves()
                .is_some_and(|moves| !moves.is_empty())
        });
        if in_check && !can_move {
            self.status = GameStatus::Checkmate { winner: them };
            info!(ply = self.ply, winner = %them, "checkmate");
        }
    }
}

impl Default for Game {
    fn default() -> Self {
        Game::new()
    }
}

#[cfg(test)]
mod tests {
    use super::{Game, GameStatus};
    use crate::color::Color;
    use crate::error::{CoordinateError, MoveError, PromotionError};
    use crate::piece_kind::PieceKind;
    use crate::rules::Rules;
    use crate::setup::Setup;
    use crate::square::Square;

    fn play(game: &mut Game, moves: &[(Square, Square)]) {
        for &(from, to) in moves {
            game.attempt_move_from(from, to).unwrap();
        }
    }

    #[test]
    fn fresh_game() {
        let game = Game::new();
        assert_eq!(game.current_side(), Color::White);
        assert_eq!(game.previous_side(), Color::White);
        assert_eq!(game.turn_number(), 1);
        assert_eq!(game.status(), GameStatus::Ongoing);
        assert!(!game.in_check());
        assert!(game.promotable_unit().is_none());
        assert_eq!(game.roster(Color::White).len(), 16);
        assert_eq!(game.units(Color::Black).count(), 16);
        assert_eq!(game.king_square(Color::Black), Square::E8);
    }

    #[test]
    fn turn_alternates() {
        let mut game = Game::new();
        play(&mut game, &[(Square::E2, Square::E4)]);
        assert_eq!(game.current_side(), Color::Black);
        assert_eq!(game.previous_side(), Color::White);
        assert_eq!(game.turn_number(), 2);
        play(&mut game, &[(Square::E7, Square::E5)]);
        assert_eq!(game.current_side(), Color::White);
        assert_eq!(game.previous_side(), Color::Black);
    }

    #[test]
    fn rejections_do_not_mutate() {
        let mut game = Game::new();
        let knight = game.unit_at(Square::G8).unwrap().id();
        assert_eq!(
            game.attempt_move(knight, Square::F6),
            Err(MoveError::WrongTurn {
                side_to_move: Color::White
            })
        );
        assert_eq!(
            game.attempt_move_from(Square::E2, Square::E5),
            Err(MoveError::IllegalMove {
                kind: PieceKind::Pawn,
                to: Square::E5
            })
        );
        assert_eq!(
            game.attempt_move_from(Square::E4, Square::E5),
            Err(MoveError::EmptySquare { square: Square::E4 })
        );
        assert_eq!(game.turn_number(), 1);
        assert_eq!(game.current_side(), Color::White);
        assert_eq!(game.render(), Game::new().render());
    }

    #[test]
    fn capture_is_recorded() {
        let mut game = Game::new();
        play(
            &mut game,
            &[(Square::E2, Square::E4), (Square::D7, Square::D5), (Square::E4, Square::D5)],
        );
        let captured = game.captured_units(Color::Black);
        assert_eq!(captured.len(), 1);
        assert_eq!(captured[0].piece_kind(), PieceKind::Pawn);
        assert_eq!(game.captured_value(Color::Black), 1);
        assert_eq!(game.captured_value(Color::White), 0);
        assert_eq!(game.roster(Color::Black).len(), 15);
        assert!(game.board().is_consistent());
    }

    #[test]
    fn checked_square_lookup() {
        let game = Game::new();
        assert_eq!(game.square(4, 4), Ok(Square::E4));
        assert_eq!(
            game.square(8, 0),
            Err(CoordinateError::OutOfRange { row: 8, column: 0 })
        );
        assert_eq!(
            game.square(0, -1),
            Err(CoordinateError::OutOfRange { row: 0, column: -1 })
        );
    }

    #[test]
    fn legal_moves_are_idempotent() {
        let mut game = Game::new();
        let knight = game.unit_at(Square::B1).unwrap().id();
        let first = game.legal_moves(knight);
        let second = game.legal_moves(knight);
        assert_eq!(first, second);
        assert_eq!(first.len(), 2);
        assert!(!game.in_check());
    }

    #[test]
    fn would_enter_check_leaves_state_alone() {
        let mut game = Setup::new()
            .place(Color::White, PieceKind::King, Square::E1)
            .place(Color::Black, PieceKind::Rook, Square::D8)
            .place(Color::Black, PieceKind::King, Square::H8)
            .build()
            .unwrap();
        let king = game.king(Color::White);
        assert!(game.would_enter_check(king, Square::D2));
        assert!(!game.would_enter_check(king, Square::F2));
        assert!(game.would_escape_check(king, Square::F1));
        assert_eq!(game.king_square(Color::White), Square::E1);
        assert!(!game.in_check());
        assert!(game.board().is_consistent());
    }

    #[test]
    fn safety_queries_ignore_unreachable_targets() {
        let mut game = Setup::new()
            .place(Color::White, PieceKind::King, Square::E1)
            .place(Color::White, PieceKind::Rook, Square::A1)
            .place(Color::White, PieceKind::Knight, Square::D4)
            .place(Color::Black, PieceKind::Knight, Square::C6)
            .place(Color::Black, PieceKind::King, Square::H8)
            .build()
            .unwrap();
        let rook = game.unit_at(Square::A1).unwrap().id();
        assert!(!game.would_escape_check(rook, Square::E1));
        assert!(!game.would_enter_check(rook, Square::E1));
        assert!(!game.would_escape_check(rook, Square::B2));

        game.attempt_move_from(Square::D4, Square::C6).unwrap();
        let taken = game.captured_units(Color::Black)[0].id();
        assert!(!game.would_escape_check(taken, Square::D4));
        assert!(!game.would_enter_check(taken, Square::D4));
        assert!(game.board().is_consistent());
    }

    #[test]
    fn zero_quiet_limit_spares_pawn_moves_and_captures() {
        let mut game = Game::with_rules(Rules::default().with_quiet_move_limit(0));
        play(
            &mut game,
            &[
                (Square::E2, Square::E4),
                (Square::D7, Square::D5),
                (Square::E4, Square::D5),
                (Square::D8, Square::D5),
            ],
        );
        assert_eq!(game.status(), GameStatus::Ongoing);
        assert_eq!(
            game.attempt_move_from(Square::G1, Square::F3),
            Ok(GameStatus::Stalemate)
        );
    }

    #[test]
    fn promotion_errors() {
        let mut game = Game::new();
        assert_eq!(
            game.promote(PieceKind::Queen),
            Err(PromotionError::NoPromotionPending)
        );

        let mut game = Setup::new()
            .place(Color::White, PieceKind::King, Square::E1)
            .place(Color::White, PieceKind::Pawn, Square::B7)
            .place(Color::Black, PieceKind::King, Square::H5)
            .build()
            .unwrap();
        game.attempt_move_from(Square::B7, Square::B8).unwrap();
        assert_eq!(
            game.promote(PieceKind::Pawn),
            Err(PromotionError::InvalidPromotionChoice {
                kind: PieceKind::Pawn
            })
        );
        assert_eq!(
            game.attempt_move_from(Square::H5, Square::H4),
            Err(MoveError::PromotionPending { square: Square::B8 })
        );

        assert_eq!(game.promote(PieceKind::Knight), Ok(GameStatus::Ongoing));
        let knight = game.unit_at(Square::B8).unwrap();
        assert_eq!(knight.piece_kind(), PieceKind::Knight);
        assert_eq!(knight.color(), Color::White);
        assert!(game.promotable_unit().is_none());
        assert!(game.captured_units(Color::White).is_empty());
        assert_eq!(game.roster(Color::White).len(), 2);
        game.attempt_move_from(Square::H5, Square::H4).unwrap();
    }

    #[test]
    fn castling_moves_rook() {
        let mut game = Setup::new()
            .place(Color::White, PieceKind::King, Square::E1)
            .place(Color::White, PieceKind::Rook, Square::H1)
            .place(Color::Black, PieceKind::King, Square::E8)
            .place(Color::Black, PieceKind::Rook, Square::A8)
            .build()
            .unwrap();
        play(&mut game, &[(Square::E1, Square::G1), (Square::E8, Square::C8)]);
        assert_eq!(game.unit_at(Square::F1).map(|u| u.piece_kind()), Some(PieceKind::Rook));
        assert_eq!(game.unit_at(Square::D8).map(|u| u.piece_kind()), Some(PieceKind::Rook));
        assert!(game.unit_at(Square::H1).is_none());
        assert!(game.unit_at(Square::A8).is_none());
        assert!(game.unit_at(Square::F1).unwrap().kind().has_moved());
        assert_eq!(game.quiet_move_count(), 2);
    }

    #[test]
    fn status_display() {
        assert_eq!(GameStatus::Ongoing.to_string(), "ongoing");
        assert_eq!(GameStatus::Stalemate.to_string(), "stalemate");
        assert_eq!(
            GameStatus::Checkmate {
                winner: Color::Black
            }
            .to_string(),
            "checkmate, black wins"
        );
        assert!(GameStatus::Stalemate.is_terminal());
        assert!(!GameStatus::Ongoing.is_terminal());
    }
}
