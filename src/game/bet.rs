use alloc::vec::Vec;

use tracing::{debug, info, warn};

use crate::card::Card;
use crate::error::{BetError, DealError, RoundError};
use crate::hand::Hand;
use crate::shoe::RecycleMode;
use crate::sink::{RoundId, RoundSettings};

use super::{GameState, Table, TurnPosition};

impl Table {
    fn round_settings(&self) -> RoundSettings {
        RoundSettings {
            dealer_start_cards: self.options.dealer_start_cards,
            decks: self.options.decks,
            ten_depleted: self.options.ten_depleted,
            cycle_shuffle: self.options.recycle == RecycleMode::Cycle,
            min_bet: self.options.min_bet,
        }
    }

    /// Opens a new round with the round store and starts taking bets.
    ///
    /// # Errors
    ///
    /// Returns an error if a round is already open or the round store refuses
    /// to open the round. In both cases the table state is unchanged.
    pub fn begin_round(&mut self) -> Result<RoundId, RoundError> {
        if self.round.state != GameState::WaitingForRound {
            return Err(RoundError::InProgress);
        }

        let settings = self.round_settings();
        let id = self.round_store.begin_round(&settings).map_err(|err| {
            warn!(%err, "round store could not open a round");
            RoundError::Lifecycle(err)
        })?;

        self.round.id = Some(id);
        self.round.bets.clear();
        self.round.queue.clear();
        self.round.resolved.clear();
        self.round.state = GameState::Betting;
        info!(round = id, "round opened");

        Ok(id)
    }

    /// Places (or replaces) the bet of a seat for the open round.
    ///
    /// The wager is capped at the seat's chips. Returns the amount taken.
    ///
    /// # Errors
    ///
    /// Returns an error if the table is not taking bets, the seat cannot be
    /// found, the amount is zero, or the seat has no chips.
    pub fn bet(&mut self, seat_id: u8, amount: usize) -> Result<usize, BetError> {
        if self.round.state != GameState::Betting {
            return Err(BetError::InvalidState);
        }
        if amount == 0 {
            return Err(BetError::ZeroBet);
        }

        let index = self.seat_index(seat_id).ok_or(BetError::SeatNotFound)?;
        let previous = self.round.bets.get(&seat_id).copied().unwrap_or(0);
        let seat = &mut self.seats[index];
        let available = seat.chips + previous;

        if available == 0 {
            return Err(BetError::InsufficientFunds);
        }

        let wager = amount.min(available);
        seat.chips = available - wager;
        self.round.bets.insert(seat_id, wager);
        debug!(seat = seat_id, wager, "bet placed");

        Ok(wager)
    }

    /// Deals the opening cards.
    ///
    /// Seats that did not bet ante the minimum bet (or all their chips, if
    /// fewer). Seats without chips sit the round out. Hands that start on 21
    /// are resolved immediately. With two dealer start cards a dealer natural
    /// ends the round at once.
    ///
    /// # Errors
    ///
    /// Returns an error if the table is not taking bets or no seat can play.
    pub fn deal(&mut self) -> Result<(), DealError> {
        if self.round.state != GameState::Betting {
            return Err(DealError::InvalidState);
        }

        let min_bet = self.options.min_bet;
        let mut playing = Vec::new();
        for (seat_index, seat) in self.seats.iter_mut().enumerate() {
            let wager = match self.round.bets.get(&seat.id) {
                Some(&wager) => wager,
                None => {
                    let ante = min_bet.min(seat.chips);
                    seat.chips -= ante;
                    ante
                }
            };
            if wager == 0 {
                debug!(seat = seat.id, "seat sits out");
                continue;
            }
            seat.hands.clear();
            seat.hands.push(Hand::new(wager));
            playing.push(seat_index);
        }

        if playing.is_empty() {
            return Err(DealError::NoBets);
        }

        self.round.state = GameState::Dealing;
        self.shoe.burn_one();

        let dealer_cards = self.options.dealer_start_cards;
        for _ in 0..2 {
            for &seat_index in &playing {
                let card = self.shoe.draw();
                self.seats[seat_index].hands[0].add_card(card);
            }
            if dealer_cards == 2 {
                let card = self.shoe.draw();
                self.round.dealer.add_card(card);
            }
        }
        if dealer_cards == 1 {
            let card = self.shoe.draw();
            self.round.dealer.add_card(card);
        }

        for &seat_index in &playing {
            let pos = TurnPosition {
                seat_index,
                hand_index: 0,
            };
            if self.hand_at(pos).value() == 21 {
                self.resolve_immediate(pos);
            }
            self.round.queue.push_back(pos);
        }

        info!(
            round = self.round.id.unwrap_or_default(),
            seats = playing.len(),
            dealer_up = ?self.round.dealer.up_card().map(Card::symbol),
            "cards dealt"
        );

        if dealer_cards == 2 && self.round.dealer.is_blackjack() {
            self.round.dealer.mark_checked_blackjack();
            self.round.queue.clear();
            self.round.state = GameState::RoundOver;
            info!("dealer natural; skipping to settlement");
            return Ok(());
        }

        self.round.state = GameState::PlayerTurn;
        self.skip_finished();

        Ok(())
    }
}
