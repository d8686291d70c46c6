use tracing::{debug, warn};

use crate::card::Card;
use crate::error::ActionError;
use crate::hand::{Hand, evaluate_hard};
use crate::sink::ActionKind;
use crate::strategy::Action;

use super::{GameState, LegalActions, Table, TurnPosition};

fn rejected(seat_id: u8, hand_index: usize, action: Action, err: ActionError) -> ActionError {
    warn!(seat = seat_id, hand = hand_index, ?action, %err, "action rejected");
    err
}

impl Table {
    /// Checks that the given hand is the one to act and returns its position.
    fn ensure_turn(&self, seat_id: u8, hand_index: usize) -> Result<TurnPosition, ActionError> {
        if self.round.state != GameState::PlayerTurn {
            return Err(ActionError::InvalidState);
        }

        let seat_index = self.seat_index(seat_id).ok_or(ActionError::SeatNotFound)?;
        if hand_index >= self.seats[seat_index].hands.len() {
            return Err(ActionError::HandNotFound);
        }

        let pos = TurnPosition {
            seat_index,
            hand_index,
        };
        if self.round.queue.front() != Some(&pos) {
            return Err(ActionError::NotYourTurn);
        }

        Ok(pos)
    }

    /// Validates the turn, runs `apply` and logs a rejection.
    fn checked<T>(
        &mut self,
        seat_id: u8,
        hand_index: usize,
        action: Action,
        apply: impl FnOnce(&mut Self, TurnPosition) -> Result<T, ActionError>,
    ) -> Result<T, ActionError> {
        self.ensure_turn(seat_id, hand_index)
            .and_then(|pos| apply(self, pos))
            .map_err(|err| rejected(seat_id, hand_index, action, err))
    }

    pub(crate) fn legal_actions_at(&self, pos: TurnPosition) -> LegalActions {
        let seat = &self.seats[pos.seat_index];
        let hand = &seat.hands[pos.hand_index];
        let open = hand.is_playable();

        LegalActions {
            hit: open,
            stand: true,
            double: open && hand.len() == 2 && hand.bet() > 0 && seat.chips > 0,
            split: open
                && hand.is_pair()
                && seat.hands.len() < usize::from(self.options.max_split_hands)
                && seat.chips >= hand.bet(),
        }
    }

    /// Returns the actions the current hand may take.
    ///
    /// Everything is disallowed when no hand is waiting to act.
    #[must_use]
    pub fn legal_actions(&self) -> LegalActions {
        self.current_turn()
            .map(|pos| self.legal_actions_at(pos))
            .unwrap_or_default()
    }

    /// Applies an action to the given hand.
    ///
    /// Automated seats are not refused here: a caller may act for a seat the
    /// strategy would otherwise play.
    ///
    /// # Errors
    ///
    /// Returns an error if it is not this hand's turn or the action is not
    /// legal for the hand. The table is left unchanged.
    pub fn apply_action(
        &mut self,
        seat_id: u8,
        hand_index: usize,
        action: Action,
    ) -> Result<(), ActionError> {
        match action {
            Action::Hit => self.hit(seat_id, hand_index).map(drop),
            Action::Stand => self.stand(seat_id, hand_index),
            Action::Double => self.double_down(seat_id, hand_index).map(drop),
            Action::Split => self.split(seat_id, hand_index),
        }
    }

    /// Seat action: Hit (draw a card).
    ///
    /// Reaching 21 resolves the hand, going over 21 busts it. Either way the
    /// turn moves on; otherwise the hand stays active.
    ///
    /// # Errors
    ///
    /// Returns an error if it is not this hand's turn or the hand is locked.
    pub fn hit(&mut self, seat_id: u8, hand_index: usize) -> Result<Card, ActionError> {
        self.checked(seat_id, hand_index, Action::Hit, Self::hit_at)
    }

    pub(crate) fn hit_at(&mut self, pos: TurnPosition) -> Result<Card, ActionError> {
        if !self.hand_at(pos).is_playable() {
            return Err(ActionError::HandLocked);
        }

        let card = self.shoe.draw();
        self.hand_at_mut(pos).add_card(card);
        debug!(
            seat = self.seats[pos.seat_index].id,
            hand = pos.hand_index,
            card = %card.symbol(),
            total = self.hand_at(pos).value(),
            "hit"
        );

        self.report(pos, ActionKind::Hit, None);
        self.finish_if_terminal(pos);
        self.skip_finished();

        Ok(card)
    }

    /// Seat action: Stand (keep the hand as it is).
    ///
    /// # Errors
    ///
    /// Returns an error if it is not this hand's turn.
    pub fn stand(&mut self, seat_id: u8, hand_index: usize) -> Result<(), ActionError> {
        self.checked(seat_id, hand_index, Action::Stand, |table, pos| {
            table.stand_at(pos);
            Ok(())
        })
    }

    pub(crate) fn stand_at(&mut self, pos: TurnPosition) {
        debug!(
            seat = self.seats[pos.seat_index].id,
            hand = pos.hand_index,
            total = self.hand_at(pos).value(),
            "stand"
        );
        self.report(pos, ActionKind::Stand, None);
        self.advance_turn();
    }

    /// Seat action: Double down (raise the wager, take one card, stop).
    ///
    /// The added wager is the original bet, capped at the seat's chips.
    ///
    /// # Errors
    ///
    /// Returns an error if it is not this hand's turn, the hand does not hold
    /// exactly two cards, the hand is locked, or the seat has no chips.
    pub fn double_down(&mut self, seat_id: u8, hand_index: usize) -> Result<Card, ActionError> {
        self.checked(seat_id, hand_index, Action::Double, Self::double_at)
    }

    pub(crate) fn double_at(&mut self, pos: TurnPosition) -> Result<Card, ActionError> {
        let seat = &self.seats[pos.seat_index];
        let hand = &seat.hands[pos.hand_index];
        if !hand.is_playable() || hand.len() != 2 || hand.bet() == 0 {
            return Err(ActionError::CannotDouble);
        }
        if seat.chips == 0 {
            return Err(ActionError::InsufficientFunds);
        }

        let added = hand.bet().min(seat.chips);
        self.seats[pos.seat_index].chips -= added;

        let card = self.shoe.draw();
        let hand = self.hand_at_mut(pos);
        hand.raise_bet(added);
        hand.add_card(card);
        let meta = hand.meta_mut();
        meta.doubled = true;
        meta.can_hit = false;

        let hard = evaluate_hard(self.hand_at(pos).cards());
        debug!(
            seat = self.seats[pos.seat_index].id,
            hand = pos.hand_index,
            added,
            card = %card.symbol(),
            total = hard.best,
            "double down"
        );

        self.report(pos, ActionKind::Double, Some(hard));
        self.finish_if_terminal(pos);
        self.skip_finished();

        Ok(card)
    }

    /// Seat action: Split a pair into two hands.
    ///
    /// The new hand is played right after the current one. Split aces get one
    /// card each and are locked.
    ///
    /// # Errors
    ///
    /// Returns an error if it is not this hand's turn, the hand is not a pair,
    /// the seat already holds the maximum number of hands, or the seat cannot
    /// cover a second bet.
    pub fn split(&mut self, seat_id: u8, hand_index: usize) -> Result<(), ActionError> {
        self.checked(seat_id, hand_index, Action::Split, Self::split_at)
    }

    pub(crate) fn split_at(&mut self, pos: TurnPosition) -> Result<(), ActionError> {
        let max_hands = usize::from(self.options.max_split_hands);
        let seat = &self.seats[pos.seat_index];
        let hand = &seat.hands[pos.hand_index];
        if !hand.is_playable() || !hand.is_pair() {
            return Err(ActionError::CannotSplit);
        }
        if seat.hands.len() >= max_hands {
            return Err(ActionError::MaxSplitsReached);
        }
        if seat.chips < hand.bet() {
            return Err(ActionError::InsufficientFunds);
        }

        let bet = hand.bet();
        let aces = hand.cards().iter().all(Card::is_ace);

        let seat = &mut self.seats[pos.seat_index];
        let hand = &mut seat.hands[pos.hand_index];
        let Some(moved) = hand.take_split_card() else {
            return Err(ActionError::CannotSplit);
        };
        seat.chips -= bet;
        hand.reset_after_split(aces);

        let left_card = self.shoe.draw();
        let right_card = self.shoe.draw();
        let mut right = Hand::from_split(moved, bet, aces);
        right.add_card(right_card);

        let seat = &mut self.seats[pos.seat_index];
        seat.hands[pos.hand_index].add_card(left_card);
        seat.hands.insert(pos.hand_index + 1, right);
        self.insert_split_hand(pos);

        debug!(
            seat = self.seats[pos.seat_index].id,
            hand = pos.hand_index,
            aces,
            hands = self.seats[pos.seat_index].hands.len(),
            "split"
        );
        self.report(pos, ActionKind::Split, None);

        for hand_index in [pos.hand_index, pos.hand_index + 1] {
            let split_pos = TurnPosition {
                seat_index: pos.seat_index,
                hand_index,
            };
            if self.hand_at(split_pos).value() == 21 {
                self.resolve_immediate(split_pos);
            }
        }
        self.skip_finished();

        Ok(())
    }
}
