//! Boundary contracts for the action log and round persistence.
//!
//! The table calls these as fire-and-forget notifications. A sink error is
//! logged and never changes round state, except for
//! [`RoundStore::begin_round`]: a round that cannot be opened does not start.

use alloc::vec::Vec;
use core::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use crate::card::Card;
use crate::error::SinkError;
use crate::result::HandOutcome;
use crate::sync::Mutex;

/// Identifier of a round, handed out by the [`RoundStore`].
pub type RoundId = u64;

/// Kind of a reported action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionKind {
    /// A card was drawn into the hand.
    Hit,
    /// The hand stood.
    Stand,
    /// The wager was doubled for one card.
    Double,
    /// A pair was split.
    Split,
    /// The hand was resolved early as a natural.
    Blackjack,
    /// The hand was resolved early on 21.
    Win,
    /// The hand went over 21.
    Lose,
}

impl ActionKind {
    /// Short code used by record stores.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Hit => "hit",
            Self::Stand => "stand",
            Self::Double => "double",
            Self::Split => "split",
            Self::Blackjack => "bj",
            Self::Win => "win",
            Self::Lose => "lose",
        }
    }
}

/// A state-changing action or an immediate resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionRecord {
    /// Round the action belongs to.
    pub round_id: RoundId,
    /// Seat that acted.
    pub seat_id: u8,
    /// Hand the action applied to.
    pub hand_index: usize,
    /// What happened.
    pub kind: ActionKind,
    /// Symbol of the dealer's up card.
    pub dealer_up: Option<char>,
    /// Hand total after the action.
    pub hand_total: u8,
    /// Whether that total is soft.
    pub is_soft: bool,
    /// Cards in the hand after the action.
    pub cards: Vec<Card>,
}

/// Rules a round was played under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoundSettings {
    /// Cards the dealer receives at the deal.
    pub dealer_start_cards: u8,
    /// Number of decks in the shoe.
    pub decks: u8,
    /// Whether the `T` rank is removed.
    pub ten_depleted: bool,
    /// Whether discards are cycled back into the draw pile.
    pub cycle_shuffle: bool,
    /// Minimum bet.
    pub min_bet: usize,
}

/// A final hand as persisted at settlement.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HandRecord {
    /// Seat that held the hand.
    pub seat_id: u8,
    /// Index of the hand within the seat.
    pub hand_index: usize,
    /// Final cards.
    pub cards: Vec<Card>,
    /// Total wagered.
    pub bet: usize,
    /// Settlement outcome.
    pub outcome: HandOutcome,
    /// Net chip result.
    pub payout: isize,
}

/// Receives every state-changing action.
pub trait ActionLog: Send + Sync {
    /// Records one action.
    ///
    /// # Errors
    ///
    /// Returns a [`SinkError`] when the record could not be stored.
    fn report(&self, record: &ActionRecord) -> Result<(), SinkError>;
}

/// Opens and records rounds.
pub trait RoundStore: Send + Sync {
    /// Opens a round and returns its id.
    ///
    /// # Errors
    ///
    /// Returns a [`SinkError`] when the round could not be opened.
    fn begin_round(&self, settings: &RoundSettings) -> Result<RoundId, SinkError>;

    /// Stores every final hand of a round.
    ///
    /// # Errors
    ///
    /// Returns a [`SinkError`] when the hands could not be stored.
    fn record_round(&self, round_id: RoundId, hands: &[HandRecord]) -> Result<(), SinkError>;
}

/// Discards everything and numbers rounds from 1.
#[derive(Debug, Default)]
pub struct NoopSink {
    next_round: AtomicU64,
}

impl ActionLog for NoopSink {
    fn report(&self, _record: &ActionRecord) -> Result<(), SinkError> {
        Ok(())
    }
}

impl RoundStore for NoopSink {
    fn begin_round(&self, _settings: &RoundSettings) -> Result<RoundId, SinkError> {
        Ok(self.next_round.fetch_add(1, Ordering::SeqCst) + 1)
    }

    fn record_round(&self, _round_id: RoundId, _hands: &[HandRecord]) -> Result<(), SinkError> {
        Ok(())
    }
}

/// Keeps every action and round in memory.
///
/// Share it with a table through an `Arc` and inspect it afterwards. It can be
/// switched into a failing mode to exercise sink-failure handling.
#[derive(Default)]
pub struct MemoryLedger {
    actions: Mutex<Vec<ActionRecord>>,
    rounds: Mutex<Vec<(RoundId, RoundSettings, Vec<HandRecord>)>>,
    next_round: AtomicU64,
    failing: AtomicBool,
}

impl MemoryLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every later call fail (or succeed again).
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn check(&self) -> Result<(), SinkError> {
        if self.failing.load(Ordering::SeqCst) {
            Err(SinkError::Unavailable)
        } else {
            Ok(())
        }
    }

    /// Returns a copy of every recorded action.
    pub fn actions(&self) -> Vec<ActionRecord> {
        self.actions.lock().clone()
    }

    /// Returns the hands recorded for a round, if it was settled.
    pub fn round_hands(&self, round_id: RoundId) -> Option<Vec<HandRecord>> {
        self.rounds
            .lock()
            .iter()
            .find(|(id, _, _)| *id == round_id)
            .map(|(_, _, hands)| hands.clone())
    }

    /// Returns the settings a round was opened with.
    pub fn round_settings(&self, round_id: RoundId) -> Option<RoundSettings> {
        self.rounds
            .lock()
            .iter()
            .find(|(id, _, _)| *id == round_id)
            .map(|(_, settings, _)| *settings)
    }

    /// Number of rounds opened.
    pub fn rounds_opened(&self) -> usize {
        self.rounds.lock().len()
    }
}

impl ActionLog for MemoryLedger {
    fn report(&self, record: &ActionRecord) -> Result<(), SinkError> {
        self.check()?;
        self.actions.lock().push(record.clone());
        Ok(())
    }
}

impl RoundStore for MemoryLedger {
    fn begin_round(&self, settings: &RoundSettings) -> Result<RoundId, SinkError> {
        self.check()?;
        let id = self.next_round.fetch_add(1, Ordering::SeqCst) + 1;
        self.rounds.lock().push((id, *settings, Vec::new()));
        Ok(id)
    }

    fn record_round(&self, round_id: RoundId, hands: &[HandRecord]) -> Result<(), SinkError> {
        self.check()?;
        let mut rounds = self.rounds.lock();
        let entry = rounds
            .iter_mut()
            .find(|(id, _, _)| *id == round_id)
            .ok_or(SinkError::Rejected)?;
        entry.2 = hands.to_vec();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> RoundSettings {
        RoundSettings {
            dealer_start_cards: 1,
            decks: 6,
            ten_depleted: false,
            cycle_shuffle: true,
            min_bet: 100,
        }
    }

    #[test]
    fn ledger_numbers_rounds_and_stores_hands() {
        let ledger = MemoryLedger::new();
        let first = ledger.begin_round(&settings()).unwrap();
        let second = ledger.begin_round(&settings()).unwrap();
        assert_eq!((first, second), (1, 2));

        ledger.record_round(second, &[]).unwrap();
        assert_eq!(ledger.round_hands(second), Some(Vec::new()));
        assert_eq!(ledger.record_round(9, &[]), Err(SinkError::Rejected));
    }

    #[test]
    fn failing_ledger_refuses_everything() {
        let ledger = MemoryLedger::new();
        ledger.set_failing(true);
        assert_eq!(
            ledger.begin_round(&settings()),
            Err(SinkError::Unavailable)
        );
        assert_eq!(ledger.rounds_opened(), 0);
    }
}
