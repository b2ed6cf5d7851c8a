//! Tunable rule variations.

/// How castling treats the squares the king passes over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CastlingTransit {
    /// The squares the king crosses and lands on must not be attacked by
    /// any enemy unit.
    #[default]
    Unattacked,
    /// Only emptiness of the corridor between king and rook is checked; the
    /// landing square is still screened by the ordinary king-safety filter.
    Unobstructed,
}

/// Rule settings a game is created with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rules {
    /// Castling transit rule.
    pub castling_transit: CastlingTransit,
    /// Consecutive quiet moves after which the game is drawn.
    pub quiet_move_limit: u32,
}

impl Rules {
    /// Default number of consecutive quiet moves before the draw.
    pub const QUIET_MOVE_LIMIT: u32 = 50;

    /// Return these rules with a different castling transit rule.
    pub const fn with_castling_transit(mut self, transit: CastlingTransit) -> Rules {
        self.castling_transit = transit;
        self
    }

    /// Return these rules with a different quiet-move limit.
    pub const fn with_quiet_move_limit(mut self, limit: u32) -> Rules {
        self.quiet_move_limit = limit;
        self
    }
}

impl Default for Rules {
    fn default() -> Self {
        Rules {
            castling_transit: CastlingTransit::default(),
            quiet_move_limit: Rules::QUIET_MOVE_LIMIT,
        }
    }
}
