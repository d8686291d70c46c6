use alloc::vec::Vec;

use tracing::{debug, info, warn};

use crate::card::Card;
use crate::error::ShowdownError;
use crate::result::{HandResult, RoundResult, SeatResult};
use crate::settlement::{DealerOutcome, settle_hand};
use crate::sink::HandRecord;

use super::{GameState, Table};

impl Table {
    /// Dealer plays their hand.
    ///
    /// A dealer that started with one card takes the second first, then draws
    /// while under 17 and on a soft 17.
    ///
    /// Returns the cards drawn by the dealer.
    ///
    /// # Errors
    ///
    /// Returns an error if the game is not in dealer turn state.
    pub fn dealer_play(&mut self) -> Result<Vec<Card>, ShowdownError> {
        if self.round.state != GameState::DealerTurn {
            return Err(ShowdownError::InvalidState);
        }

        let mut drawn = Vec::new();
        while self.round.dealer.len() < 2 || self.round.dealer.must_draw() {
            let card = self.shoe.draw();
            self.round.dealer.add_card(card);
            debug!(
                card = %card.symbol(),
                total = self.round.dealer.value(),
                "dealer draws"
            );
            drawn.push(card);
        }

        info!(
            total = self.round.dealer.value(),
            bust = self.round.dealer.is_bust(),
            "dealer stands"
        );
        self.round.state = GameState::RoundOver;

        Ok(drawn)
    }

    /// Settles every hand, pays the seats and closes the round.
    ///
    /// Hands resolved early keep the payout fixed at resolution and are paid
    /// exactly once. All cards go to the discard pile and the table returns to
    /// [`GameState::WaitingForRound`].
    ///
    /// # Errors
    ///
    /// Returns an error if the game is not in round-over state.
    #[expect(clippy::cast_possible_wrap, reason = "bet values fit in isize")]
    pub fn settle(&mut self) -> Result<RoundResult, ShowdownError> {
        if self.round.state != GameState::RoundOver {
            return Err(ShowdownError::InvalidState);
        }

        let round_id = self.round.id.unwrap_or_default();
        let dealer = DealerOutcome::from_hand(&self.round.dealer);
        let rules = self.payout_rules();

        let mut seat_results = Vec::new();
        let mut records = Vec::new();

        for seat in &mut self.seats {
            if seat.hands.is_empty() {
                continue;
            }

            let mut hand_results = Vec::with_capacity(seat.hands.len());
            let mut total_returned = 0;
            let mut net = 0;

            for (hand_index, hand) in seat.hands.iter().enumerate() {
                debug_assert_eq!(
                    hand.meta().resolved,
                    self.round.resolved.contains(&(seat.id, hand_index)),
                    "resolved marker out of step with hand {hand_index} of seat {}",
                    seat.id
                );

                let (outcome, payout) = settle_hand(hand, &dealer, &rules);
                let returned = (hand.bet() as isize + payout) as usize;
                total_returned += returned;
                net += payout;

                hand_results.push(HandResult {
                    hand_index,
                    outcome,
                    bet: hand.bet(),
                    payout,
                    returned,
                    player_value: hand.value(),
                    dealer_value: dealer.value,
                    resolved_early: hand.meta().resolved,
                });
                records.push(HandRecord {
                    seat_id: seat.id,
                    hand_index,
                    cards: hand.cards().to_vec(),
                    bet: hand.bet(),
                    outcome,
                    payout,
                });
            }

            seat.chips += total_returned;
            seat.stats.record(net);
            debug!(seat = seat.id, net, chips = seat.chips, "seat settled");

            seat_results.push(SeatResult {
                seat_id: seat.id,
                hands: hand_results,
                total_returned,
                net,
            });

            for hand in &mut seat.hands {
                self.shoe.discard_cards(&hand.take_cards());
            }
            seat.hands.clear();
        }

        let dealer_cards = self.round.dealer.clear();
        self.shoe.discard_cards(&dealer_cards);

        if let Err(err) = self.round_store.record_round(round_id, &records) {
            warn!(round = round_id, %err, "round store failed to record the round");
        }

        self.round.resolved.clear();
        self.round.queue.clear();
        self.round.bets.clear();
        self.round.id = None;
        self.round.state = GameState::WaitingForRound;
        self.rounds_played += 1;

        let result = RoundResult {
            round_id,
            seats: seat_results,
            dealer_value: dealer.value,
            dealer_bust: dealer.bust,
            dealer_blackjack: dealer.blackjack,
        };
        info!(
            round = round_id,
            dealer = dealer.value,
            house_net = -result.total_net(),
            "round settled"
        );

        Ok(result)
    }
}
