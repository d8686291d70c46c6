//! Settlement results and per-seat statistics.

extern crate alloc;

use alloc::vec::Vec;

/// Result of a single hand after settlement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HandOutcome {
    /// Seat wins (dealer busts or the seat has the higher total).
    Win,
    /// Seat loses to a higher dealer total.
    Lose,
    /// Push (tie).
    Push,
    /// Seat has a natural.
    Blackjack,
    /// Seat went over 21.
    Bust,
}

/// Result for a single hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HandResult {
    /// The hand index (for split hands).
    pub hand_index: usize,
    /// The outcome of the hand.
    pub outcome: HandOutcome,
    /// The total amount wagered on this hand.
    pub bet: usize,
    /// Net chip result: positive on a win, zero on a push, `-bet` on a loss.
    pub payout: isize,
    /// Chips handed back to the seat (`bet + payout`).
    pub returned: usize,
    /// The seat's hand value.
    pub player_value: u8,
    /// The dealer's hand value.
    pub dealer_value: u8,
    /// Whether the payout was fixed when the hand was resolved early.
    pub resolved_early: bool,
}

/// Result for a single seat after settlement.
#[derive(Debug, Clone)]
pub struct SeatResult {
    /// The seat ID.
    pub seat_id: u8,
    /// Results for each hand (multiple if split).
    pub hands: Vec<HandResult>,
    /// Total chips handed back for all hands.
    pub total_returned: usize,
    /// Net result for the round (positive = profit, negative = loss).
    pub net: isize,
}

/// Result of the entire round after settlement.
#[derive(Debug, Clone)]
pub struct RoundResult {
    /// The round id handed out by the round store.
    pub round_id: u64,
    /// Results for each seat that played.
    pub seats: Vec<SeatResult>,
    /// The dealer's final hand value.
    pub dealer_value: u8,
    /// Whether the dealer busted.
    pub dealer_bust: bool,
    /// Whether the dealer had a natural.
    pub dealer_blackjack: bool,
}

impl RoundResult {
    /// Sum of every seat's net result. The house net is the negation.
    #[must_use]
    pub fn total_net(&self) -> isize {
        self.seats.iter().map(|seat| seat.net).sum()
    }

    /// Returns the result for a seat.
    #[must_use]
    pub fn seat(&self, seat_id: u8) -> Option<&SeatResult> {
        self.seats.iter().find(|seat| seat.seat_id == seat_id)
    }
}

/// Running statistics for one seat across rounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SeatStats {
    /// Rounds the seat played.
    pub rounds: u32,
    /// Rounds with a positive net.
    pub wins: u32,
    /// Rounds with a negative net.
    pub losses: u32,
    /// Rounds that broke even.
    pub pushes: u32,
    /// Sum of every round's net.
    pub net_total: i64,
}

impl SeatStats {
    /// Folds one round's net into the statistics.
    pub fn record(&mut self, net: isize) {
        self.rounds += 1;
        match net.cmp(&0) {
            core::cmp::Ordering::Greater => self.wins += 1,
            core::cmp::Ordering::Less => self.losses += 1,
            core::cmp::Ordering::Equal => self.pushes += 1,
        }
        self.net_total += net as i64;
    }
}
