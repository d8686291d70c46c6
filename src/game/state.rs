//! Game state types.

use crate::strategy::Action;

/// Game state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    /// No round is open.
    WaitingForRound,
    /// Accepting bets for the opened round.
    Betting,
    /// Dealing initial cards.
    Dealing,
    /// Waiting for seat actions.
    PlayerTurn,
    /// Dealer plays out their hand.
    DealerTurn,
    /// Dealer is done and the round can be settled.
    RoundOver,
}

/// Represents the current turn position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnPosition {
    /// Index into the table's seats.
    pub seat_index: usize,
    /// Index into the seat's hands (for splits).
    pub hand_index: usize,
}

/// Which actions the active hand may take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LegalActions {
    /// Hit is allowed.
    pub hit: bool,
    /// Stand is allowed.
    pub stand: bool,
    /// Double down is allowed.
    pub double: bool,
    /// Split is allowed.
    pub split: bool,
}

impl LegalActions {
    /// Returns whether the action is allowed.
    #[must_use]
    pub const fn allows(&self, action: Action) -> bool {
        match action {
            Action::Hit => self.hit,
            Action::Stand => self.stand,
            Action::Double => self.double,
            Action::Split => self.split,
        }
    }
}
