//! Table configuration options.

use alloc::vec::Vec;
use core::time::Duration;

use crate::error::ConfigError;
use crate::shoe::RecycleMode;

/// Rounding mode for fractional payouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RoundingMode {
    /// Round up.
    Up,
    /// Round down.
    Down,
    /// Round to nearest.
    Nearest,
}

/// Configuration options for a table.
///
/// Use the builder pattern to customize options:
///
/// ```
/// use pontoon::{RecycleMode, TableOptions};
///
/// let options = TableOptions::default()
///     .with_seats(4)
///     .with_human_seats(&[2])
///     .with_decks(8)
///     .with_recycle(RecycleMode::Reset);
/// assert!(options.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TableOptions {
    /// Number of seats (1..=6). Seat ids run from 1.
    pub seats: u8,
    /// Ids of the seats controlled by humans; every other seat is automated.
    pub human_seats: Vec<u8>,
    /// Chips each seat starts with.
    pub starting_chips: usize,
    /// Minimum bet, also the automatic ante.
    pub min_bet: usize,
    /// Number of decks (1..=10).
    pub decks: u8,
    /// Whether each deck has its four `T` cards removed.
    pub ten_depleted: bool,
    /// What the shoe does when the draw pile runs out.
    pub recycle: RecycleMode,
    /// Cards the dealer receives at the deal (1 or 2).
    pub dealer_start_cards: u8,
    /// Maximum hands one seat may hold after splitting.
    pub max_split_hands: u8,
    /// Blackjack payout ratio (typically 1.5).
    pub blackjack_pays: f64,
    /// Rounding mode for blackjack payouts.
    pub rounding_blackjack: RoundingMode,
    /// Pause between automated actions when driven asynchronously.
    pub think_delay: Duration,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            seats: 3,
            human_seats: Vec::new(),
            starting_chips: 10_000,
            min_bet: 100,
            decks: 6,
            ten_depleted: false,
            recycle: RecycleMode::Cycle,
            dealer_start_cards: 1,
            max_split_hands: 3,
            blackjack_pays: 1.5,
            rounding_blackjack: RoundingMode::Down,
            think_delay: Duration::from_millis(60),
        }
    }
}

impl TableOptions {
    /// Checks every option against its allowed range.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=6).contains(&self.seats) {
            return Err(ConfigError::Seats(self.seats));
        }
        if let Some(&seat) = self
            .human_seats
            .iter()
            .find(|&&id| id == 0 || id > self.seats)
        {
            return Err(ConfigError::HumanSeat(seat));
        }
        if !(1..=10).contains(&self.decks) {
            return Err(ConfigError::Decks(self.decks));
        }
        if !matches!(self.dealer_start_cards, 1 | 2) {
            return Err(ConfigError::DealerStartCards(self.dealer_start_cards));
        }
        if self.max_split_hands == 0 {
            return Err(ConfigError::MaxSplitHands);
        }
        if self.min_bet == 0 {
            return Err(ConfigError::MinBet);
        }
        if !self.blackjack_pays.is_finite() || self.blackjack_pays < 0.0 {
            return Err(ConfigError::BlackjackPays);
        }
        Ok(())
    }

    /// Returns whether the seat is controlled by a human.
    #[must_use]
    pub fn is_human(&self, seat_id: u8) -> bool {
        self.human_seats.contains(&seat_id)
    }

    /// Sets the number of seats.
    ///
    /// # Example
    ///
    /// ```
    /// use pontoon::TableOptions;
    ///
    /// let options = TableOptions::default().with_seats(6);
    /// assert_eq!(options.seats, 6);
    /// ```
    #[must_use]
    pub const fn with_seats(mut self, seats: u8) -> Self {
        self.seats = seats;
        self
    }

    /// Sets which seats are human-controlled.
    ///
    /// # Example
    ///
    /// ```
    /// use pontoon::TableOptions;
    ///
    /// let options = TableOptions::default().with_human_seats(&[1, 3]);
    /// assert!(options.is_human(3));
    /// assert!(!options.is_human(2));
    /// ```
    #[must_use]
    pub fn with_human_seats(mut self, seats: &[u8]) -> Self {
        self.human_seats = seats.to_vec();
        self
    }

    /// Sets the starting chip stack.
    #[must_use]
    pub const fn with_starting_chips(mut self, chips: usize) -> Self {
        self.starting_chips = chips;
        self
    }

    /// Sets the minimum bet.
    #[must_use]
    pub const fn with_min_bet(mut self, min_bet: usize) -> Self {
        self.min_bet = min_bet;
        self
    }

    /// Sets the number of decks.
    ///
    /// # Example
    ///
    /// ```
    /// use pontoon::TableOptions;
    ///
    /// let options = TableOptions::default().with_decks(2);
    /// assert_eq!(options.decks, 2);
    /// ```
    #[must_use]
    pub const fn with_decks(mut self, decks: u8) -> Self {
        self.decks = decks;
        self
    }

    /// Sets whether the `T` rank is removed from each deck.
    #[must_use]
    pub const fn with_ten_depleted(mut self, depleted: bool) -> Self {
        self.ten_depleted = depleted;
        self
    }

    /// Sets the shoe recycle mode.
    #[must_use]
    pub const fn with_recycle(mut self, recycle: RecycleMode) -> Self {
        self.recycle = recycle;
        self
    }

    /// Sets how many cards the dealer receives at the deal.
    ///
    /// # Example
    ///
    /// ```
    /// use pontoon::TableOptions;
    ///
    /// let options = TableOptions::default().with_dealer_start_cards(2);
    /// assert_eq!(options.dealer_start_cards, 2);
    /// ```
    #[must_use]
    pub const fn with_dealer_start_cards(mut self, cards: u8) -> Self {
        self.dealer_start_cards = cards;
        self
    }

    /// Sets the maximum number of hands a seat may hold after splitting.
    #[must_use]
    pub const fn with_max_split_hands(mut self, hands: u8) -> Self {
        self.max_split_hands = hands;
        self
    }

    /// Sets the blackjack payout ratio.
    #[must_use]
    pub const fn with_blackjack_pays(mut self, ratio: f64) -> Self {
        self.blackjack_pays = ratio;
        self
    }

    /// Sets the rounding mode for blackjack payouts.
    #[must_use]
    pub const fn with_rounding_blackjack(mut self, mode: RoundingMode) -> Self {
        self.rounding_blackjack = mode;
        self
    }

    /// Sets the pause between automated actions.
    #[must_use]
    pub const fn with_think_delay(mut self, delay: Duration) -> Self {
        self.think_delay = delay;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_options_are_valid() {
        assert_eq!(TableOptions::default().validate(), Ok(()));
    }

    #[test]
    fn rejects_out_of_range_options() {
        let base = TableOptions::default();
        assert_eq!(
            base.clone().with_seats(7).validate(),
            Err(ConfigError::Seats(7))
        );
        assert_eq!(
            base.clone().with_human_seats(&[4]).validate(),
            Err(ConfigError::HumanSeat(4))
        );
        assert_eq!(
            base.clone().with_decks(11).validate(),
            Err(ConfigError::Decks(11))
        );
        assert_eq!(
            base.clone().with_dealer_start_cards(3).validate(),
            Err(ConfigError::DealerStartCards(3))
        );
        assert_eq!(
            base.clone().with_max_split_hands(0).validate(),
            Err(ConfigError::MaxSplitHands)
        );
        assert_eq!(
            base.clone().with_min_bet(0).validate(),
            Err(ConfigError::MinBet)
        );
        assert_eq!(
            base.with_blackjack_pays(f64::NAN).validate(),
            Err(ConfigError::BlackjackPays)
        );
    }
}
