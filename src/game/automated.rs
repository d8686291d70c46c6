use tracing::{debug, warn};

use crate::error::RoundError;
use crate::result::RoundResult;
use crate::strategy::{Action, Decision};

use super::{GameState, LegalActions, Table, TurnPosition};

/// Replaces a decision that is not legal for the hand with the closest legal
/// one: a double becomes a hit, a split or a locked hit becomes a stand.
const fn downgrade(action: Action, legal: LegalActions) -> Action {
    match action {
        Action::Double if !legal.double => {
            if legal.hit {
                Action::Hit
            } else {
                Action::Stand
            }
        }
        Action::Split if !legal.split => Action::Stand,
        Action::Hit if !legal.hit => Action::Stand,
        other => other,
    }
}

impl Table {
    /// Returns the current position if an automated seat has to act.
    fn automated_turn(&self) -> Option<TurnPosition> {
        let pos = self.current_turn()?;
        self.seats[pos.seat_index].automated.then_some(pos)
    }

    /// Plays one decision for the current hand when its seat is automated.
    ///
    /// Returns the action taken, or `None` when no automated seat is up (a
    /// human seat is waiting, or the player turn is over).
    pub fn step_automated(&mut self) -> Option<Action> {
        let pos = self.automated_turn()?;
        let legal = self.legal_actions_at(pos);
        let seat_id = self.seats[pos.seat_index].id;

        let hand = self.hand_at(pos);
        let decision = Decision {
            seat_id,
            hand_index: pos.hand_index,
            cards: hand.cards(),
            dealer_up: self.round.dealer.up_card(),
            can_double: legal.double,
            can_split: legal.split,
        };
        let chosen = match self.strategy.decide(&decision) {
            Ok(action) => action,
            Err(fault) => {
                warn!(seat = seat_id, hand = pos.hand_index, %fault, "strategy failed; standing");
                Action::Stand
            }
        };

        let action = downgrade(chosen, legal);
        if action != chosen {
            debug!(
                seat = seat_id,
                hand = pos.hand_index,
                ?chosen,
                ?action,
                "illegal decision downgraded"
            );
        }

        let applied = match action {
            Action::Hit => self.hit_at(pos).map(drop),
            Action::Stand => {
                self.stand_at(pos);
                Ok(())
            }
            Action::Double => self.double_at(pos).map(drop),
            Action::Split => self.split_at(pos),
        };

        match applied {
            Ok(()) => Some(action),
            Err(err) => {
                warn!(seat = seat_id, hand = pos.hand_index, ?action, %err, "automated action failed; standing");
                self.stand_at(pos);
                Some(Action::Stand)
            }
        }
    }

    /// Plays automated seats until a human seat has to act or every hand is
    /// done. Returns the number of actions taken.
    pub fn run_automated(&mut self) -> usize {
        let mut steps = 0;
        while self.step_automated().is_some() {
            steps += 1;
        }
        steps
    }

    /// Plays a full round on a table without human seats: open, deal, play
    /// every hand, dealer play and settlement.
    ///
    /// # Errors
    ///
    /// Returns an error if any seat is human-controlled, a round is already
    /// open, the round store refuses the round, or no seat can bet.
    pub fn autoplay_round(&mut self) -> Result<RoundResult, RoundError> {
        if let Some(seat) = self.seats.iter().find(|seat| !seat.automated) {
            return Err(RoundError::HumanSeat(seat.id));
        }

        self.begin_round()?;
        if let Err(err) = self.deal() {
            self.abandon_round();
            return Err(err.into());
        }

        self.run_automated();
        if self.round.state == GameState::DealerTurn {
            self.dealer_play()?;
        }
        Ok(self.settle()?)
    }

    /// Drops an opened round that could not be dealt.
    pub(crate) fn abandon_round(&mut self) {
        debug_assert_eq!(self.round.state, GameState::Betting);
        warn!(round = self.round.id.unwrap_or_default(), "round abandoned before the deal");
        for seat in &mut self.seats {
            if let Some(wager) = self.round.bets.remove(&seat.id) {
                seat.chips += wager;
            }
        }
        self.round.id = None;
        self.round.state = GameState::WaitingForRound;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: LegalActions = LegalActions {
        hit: true,
        stand: true,
        double: true,
        split: true,
    };

    #[test]
    fn legal_decisions_pass_through() {
        for action in [Action::Hit, Action::Stand, Action::Double, Action::Split] {
            assert_eq!(downgrade(action, ALL), action);
        }
    }

    #[test]
    fn illegal_decisions_are_downgraded() {
        let two_card_only = LegalActions {
            double: false,
            split: false,
            ..ALL
        };
        assert_eq!(downgrade(Action::Double, two_card_only), Action::Hit);
        assert_eq!(downgrade(Action::Split, two_card_only), Action::Stand);

        let locked = LegalActions {
            stand: true,
            ..LegalActions::default()
        };
        assert_eq!(downgrade(Action::Hit, locked), Action::Stand);
        assert_eq!(downgrade(Action::Double, locked), Action::Stand);
    }
}
