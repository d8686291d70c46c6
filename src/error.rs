//! Error types for table operations.

use thiserror::Error;

/// Invalid table configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Seat count outside 1..=6.
    #[error("seat count {0} is outside 1..=6")]
    Seats(u8),
    /// A human seat id does not name a seat.
    #[error("human seat {0} does not exist")]
    HumanSeat(u8),
    /// Deck count outside 1..=10.
    #[error("deck count {0} is outside 1..=10")]
    Decks(u8),
    /// Dealer start cards other than 1 or 2.
    #[error("dealer start cards must be 1 or 2, got {0}")]
    DealerStartCards(u8),
    /// Maximum split hands is zero.
    #[error("maximum split hands must be at least 1")]
    MaxSplitHands,
    /// Minimum bet is zero.
    #[error("minimum bet must be positive")]
    MinBet,
    /// Blackjack payout ratio is negative or not finite.
    #[error("blackjack payout ratio must be a finite, non-negative number")]
    BlackjackPays,
}

/// Errors that can occur when starting a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RoundError {
    /// A round is already in progress.
    #[error("a round is already in progress")]
    InProgress,
    /// The round store refused to open the round.
    #[error("round store failed to begin the round: {0}")]
    Lifecycle(SinkError),
    /// The table has human seats and cannot be played automatically.
    #[error("seat {0} is human-controlled")]
    HumanSeat(u8),
    /// Dealing failed.
    #[error(transparent)]
    Deal(#[from] DealError),
    /// Dealer play or settlement failed.
    #[error(transparent)]
    Showdown(#[from] ShowdownError),
}

/// Errors that can occur during betting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BetError {
    /// Seat not found.
    #[error("seat not found")]
    SeatNotFound,
    /// The seat has no chips left.
    #[error("insufficient funds")]
    InsufficientFunds,
    /// Invalid game state for betting.
    #[error("invalid game state for betting")]
    InvalidState,
    /// Bet amount is zero.
    #[error("bet amount is zero")]
    ZeroBet,
}

/// Errors that can occur during dealing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DealError {
    /// Invalid game state for dealing.
    #[error("invalid game state for dealing")]
    InvalidState,
    /// No seat could place a bet.
    #[error("no seats have placed bets")]
    NoBets,
}

/// Illegal action requests. The table state is left unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ActionError {
    /// Invalid game state for this action.
    #[error("invalid game state for this action")]
    InvalidState,
    /// Not this seat's turn, or not this hand.
    #[error("not this seat's turn")]
    NotYourTurn,
    /// Seat not found.
    #[error("seat not found")]
    SeatNotFound,
    /// Hand not found.
    #[error("hand not found")]
    HandNotFound,
    /// The hand cannot take more cards.
    #[error("hand is locked")]
    HandLocked,
    /// Cannot double down on this hand.
    #[error("cannot double down on this hand")]
    CannotDouble,
    /// Cannot split this hand.
    #[error("cannot split this hand")]
    CannotSplit,
    /// Maximum split hands reached.
    #[error("maximum split hands reached")]
    MaxSplitsReached,
    /// Insufficient funds for this action.
    #[error("insufficient funds for this action")]
    InsufficientFunds,
}

/// Errors that can occur during dealer play and settlement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ShowdownError {
    /// Invalid game state for showdown.
    #[error("invalid game state for showdown")]
    InvalidState,
}

/// A failure reported by an external sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SinkError {
    /// The sink could not be reached.
    #[error("sink unavailable")]
    Unavailable,
    /// The sink rejected the record.
    #[error("sink rejected the record")]
    Rejected,
}

/// A strategy could not produce a decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StrategyFault {
    /// The hand has no cards.
    #[error("hand has no cards")]
    EmptyHand,
    /// The strategy hit an internal condition it cannot handle.
    #[error("strategy failed internally")]
    Internal,
}
