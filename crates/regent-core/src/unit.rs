//! Units: the pieces on the board, with their per-variant state.

use std::collections::BTreeSet;

use crate::color::Color;
use crate::piece_kind::PieceKind;
use crate::square::Square;

/// Stable handle to a unit, assigned when the unit is created.
///
/// Identity never depends on where the unit stands, so a `UnitId` stays
/// valid in sets and maps while the unit moves around or is captured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UnitId(u16);

impl UnitId {
    #[inline]
    pub(crate) const fn new(index: usize) -> UnitId {
        UnitId(index as u16)
    }

    /// Return the arena index of this unit.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// The kind of a unit together with the state only that kind carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitKind {
    Pawn {
        has_moved: bool,
        /// Ply on which this pawn advanced two squares, if it ever did.
        double_jump_ply: Option<u32>,
    },
    Knight,
    Bishop,
    Rook {
        has_moved: bool,
    },
    Queen,
    King {
        has_moved: bool,
    },
}

impl UnitKind {
    /// Fresh, unmoved state for a unit of `kind`.
    pub const fn unmoved(kind: PieceKind) -> UnitKind {
        match kind {
            PieceKind::Pawn => UnitKind::Pawn {
                has_moved: false,
                double_jump_ply: None,
            },
            PieceKind::Knight => UnitKind::Knight,
            PieceKind::Bishop => UnitKind::Bishop,
            PieceKind::Rook => UnitKind::Rook { has_moved: false },
            PieceKind::Queen => UnitKind::Queen,
            PieceKind::King => UnitKind::King { has_moved: false },
        }
    }

    /// Return the bare piece kind.
    pub const fn piece_kind(self) -> PieceKind {
        match self {
            UnitKind::Pawn { .. } => PieceKind::Pawn,
            UnitKind::Knight => PieceKind::Knight,
            UnitKind::Bishop => PieceKind::Bishop,
            UnitKind::Rook { .. } => PieceKind::Rook,
            UnitKind::Queen => PieceKind::Queen,
            UnitKind::King { .. } => PieceKind::King,
        }
    }

    /// Return `true` if this unit has moved. Kinds without the flag report `false`.
    pub const fn has_moved(self) -> bool {
        match self {
            UnitKind::Pawn { has_moved, .. }
            | UnitKind::Rook { has_moved }
            | UnitKind::King { has_moved } => has_moved,
            _ => false,
        }
    }

    pub(crate) fn mark_moved(&mut self) {
        match self {
            UnitKind::Pawn { has_moved, .. }
            | UnitKind::Rook { has_moved }
            | UnitKind::King { has_moved } => *has_moved = true,
            _ => {}
        }
    }
}

/// A unit on (or removed from) the board.
#[derive(Debug, Clone)]
pub struct Unit {
    id: UnitId,
    color: Color,
    kind: UnitKind,
    position: Option<Square>,
    captured: bool,
    /// Cached move set; `None` means stale.
    moves: Option<BTreeSet<Square>>,
}

impl Unit {
    pub(crate) fn new(id: UnitId, color: Color, kind: UnitKind, position: Square) -> Unit {
        Unit {
            id,
            color,
            kind,
            position: Some(position),
            captured: false,
            moves: None,
        }
    }

    /// Return this unit's handle.
    #[inline]
    pub fn id(&self) -> UnitId {
        self.id
    }

    #[inline]
    pub fn color(&self) -> Color {
        self.color
    }

    /// Return the kind together with its per-variant state.
    #[inline]
    pub fn kind(&self) -> UnitKind {
        self.kind
    }

    #[inline]
    pub fn piece_kind(&self) -> PieceKind {
        self.kind.piece_kind()
    }

    /// Return the square this unit stands on; `None` once captured or discarded.
    #[inline]
    pub fn position(&self) -> Option<Square> {
        self.position
    }

    #[inline]
    pub fn is_captured(&self) -> bool {
        self.captured
    }

    /// Return `true` while the unit stands on the board.
    #[inline]
    pub fn is_active(&self) -> bool {
        self.position.is_some()
    }

    /// Return the two-letter tag used by the text rendering, e.g. `WH`.
    pub fn tag(&self) -> String {
        format!("{}{}", self.color.letter(), self.piece_kind().letter())
    }

    pub(crate) fn kind_mut(&mut self) -> &mut UnitKind {
        &mut self.kind
    }

    pub(crate) fn set_position(&mut self, position: Option<Square>) {
        self.position = position;
    }

    pub(crate) fn set_captured(&mut self, captured: bool) {
        self.captured = captured;
    }

    pub(crate) fn cached_moves(&self) -> Option<&BTreeSet<Square>> {
        self.moves.as_ref()
    }

    pub(crate) fn set_cached_moves(&mut self, moves: Option<BTreeSet<Square>>) {
        self.moves = moves;
    }
}

impl PartialEq for Unit {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Unit {}
