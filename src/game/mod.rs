//! Table engine and round state management.

use alloc::collections::VecDeque;
use alloc::sync::Arc;
use alloc::vec::Vec;

#[cfg(all(not(feature = "std"), feature = "alloc"))]
use hashbrown::{HashMap, HashSet};
#[cfg(feature = "std")]
use std::collections::{HashMap, HashSet};
use tracing::{debug, info, warn};

use crate::card::Card;
use crate::error::ConfigError;
use crate::hand::{DealerHand, Hand, HandValue};
use crate::options::TableOptions;
use crate::result::SeatStats;
use crate::settlement::PayoutRules;
use crate::shoe::Shoe;
use crate::sink::{ActionKind, ActionLog, ActionRecord, MemoryLedger, NoopSink, RoundId, RoundStore};
use crate::strategy::{BasicStrategy, Strategy};

mod actions;
mod automated;
mod bet;
mod dealer;
pub mod state;

pub use state::{GameState, LegalActions, TurnPosition};

/// A seat at the table. Seats and their chips persist across rounds.
#[derive(Debug, Clone)]
pub struct Seat {
    id: u8,
    automated: bool,
    chips: usize,
    hands: Vec<Hand>,
    stats: SeatStats,
}

impl Seat {
    /// Returns the seat id (1-based).
    #[must_use]
    pub const fn id(&self) -> u8 {
        self.id
    }

    /// Returns whether the basic-strategy engine plays this seat.
    #[must_use]
    pub const fn is_automated(&self) -> bool {
        self.automated
    }

    /// Returns the chips not currently wagered.
    #[must_use]
    pub const fn chips(&self) -> usize {
        self.chips
    }

    /// Returns the seat's hands for the current round.
    #[must_use]
    pub fn hands(&self) -> &[Hand] {
        &self.hands
    }

    /// Returns the seat's running statistics.
    #[must_use]
    pub const fn stats(&self) -> &SeatStats {
        &self.stats
    }
}

/// Per-round state, rebuilt every round.
#[derive(Debug)]
struct RoundState {
    id: Option<RoundId>,
    state: GameState,
    dealer: DealerHand,
    /// Bets placed before the deal (`seat_id` -> amount).
    bets: HashMap<u8, usize>,
    /// Hands still to act, front first.
    queue: VecDeque<TurnPosition>,
    /// Hands paid out early, keyed by (`seat_id`, `hand_index`).
    resolved: HashSet<(u8, usize)>,
}

impl RoundState {
    fn new() -> Self {
        Self {
            id: None,
            state: GameState::WaitingForRound,
            dealer: DealerHand::new(),
            bets: HashMap::new(),
            queue: VecDeque::new(),
            resolved: HashSet::new(),
        }
    }
}

/// A Pontoon/Blackjack table that owns the shoe, the seats and the round.
///
/// Every mutation goes through the table's operations: open a round with
/// [`Table::begin_round`], take bets, [`Table::deal`], play hands with
/// [`Table::apply_action`] or [`Table::step_automated`], then
/// [`Table::dealer_play`] and [`Table::settle`].
pub struct Table {
    options: TableOptions,
    shoe: Shoe,
    seats: Vec<Seat>,
    round: RoundState,
    strategy: Arc<dyn Strategy>,
    action_log: Arc<dyn ActionLog>,
    round_store: Arc<dyn RoundStore>,
    rounds_played: u64,
}

impl Table {
    /// Creates a table with the given seed for the shoe.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the options are out of range.
    ///
    /// # Example
    ///
    /// ```
    /// use pontoon::{Table, TableOptions};
    ///
    /// let table = Table::new(TableOptions::default(), 42).unwrap();
    /// assert_eq!(table.seats().len(), 3);
    /// ```
    pub fn new(options: TableOptions, seed: u64) -> Result<Self, ConfigError> {
        options.validate()?;

        let shoe = Shoe::new(options.decks, options.ten_depleted, options.recycle, seed);
        let seats = (1..=options.seats)
            .map(|id| Seat {
                id,
                automated: !options.is_human(id),
                chips: options.starting_chips,
                hands: Vec::new(),
                stats: SeatStats::default(),
            })
            .collect();
        let sink = Arc::new(NoopSink::default());

        Ok(Self {
            options,
            shoe,
            seats,
            round: RoundState::new(),
            strategy: Arc::new(BasicStrategy),
            action_log: sink.clone(),
            round_store: sink,
            rounds_played: 0,
        })
    }

    /// Replaces the strategy used by automated seats.
    #[must_use]
    pub fn with_strategy(mut self, strategy: Arc<dyn Strategy>) -> Self {
        self.strategy = strategy;
        self
    }

    /// Replaces the action log.
    #[must_use]
    pub fn with_action_log(mut self, log: Arc<dyn ActionLog>) -> Self {
        self.action_log = log;
        self
    }

    /// Replaces the round store.
    #[must_use]
    pub fn with_round_store(mut self, store: Arc<dyn RoundStore>) -> Self {
        self.round_store = store;
        self
    }

    /// Uses one in-memory ledger as both action log and round store.
    #[must_use]
    pub fn with_ledger(self, ledger: &Arc<MemoryLedger>) -> Self {
        self.with_action_log(ledger.clone())
            .with_round_store(ledger.clone())
    }

    /// Returns the table options.
    #[must_use]
    pub const fn options(&self) -> &TableOptions {
        &self.options
    }

    /// Returns the shoe.
    #[must_use]
    pub const fn shoe(&self) -> &Shoe {
        &self.shoe
    }

    /// Returns the shoe mutably, e.g. to stack cards for a fixed scenario.
    pub const fn shoe_mut(&mut self) -> &mut Shoe {
        &mut self.shoe
    }

    /// Returns every seat.
    #[must_use]
    pub fn seats(&self) -> &[Seat] {
        &self.seats
    }

    /// Returns the seat with the given id.
    #[must_use]
    pub fn seat(&self, seat_id: u8) -> Option<&Seat> {
        self.seats.iter().find(|seat| seat.id == seat_id)
    }

    fn seat_index(&self, seat_id: u8) -> Option<usize> {
        self.seats.iter().position(|seat| seat.id == seat_id)
    }

    /// Returns the chips of the given seat.
    #[must_use]
    pub fn chips(&self, seat_id: u8) -> Option<usize> {
        self.seat(seat_id).map(Seat::chips)
    }

    /// Returns the hands of the given seat.
    #[must_use]
    pub fn hands(&self, seat_id: u8) -> Option<&[Hand]> {
        self.seat(seat_id).map(Seat::hands)
    }

    /// Returns the dealer's hand.
    #[must_use]
    pub const fn dealer(&self) -> &DealerHand {
        &self.round.dealer
    }

    /// Returns the current game state.
    #[must_use]
    pub const fn state(&self) -> GameState {
        self.round.state
    }

    /// Returns the id of the open round.
    #[must_use]
    pub const fn round_id(&self) -> Option<RoundId> {
        self.round.id
    }

    /// Returns the number of settled rounds.
    #[must_use]
    pub const fn rounds_played(&self) -> u64 {
        self.rounds_played
    }

    /// Returns the hand that has to act next.
    ///
    /// Returns `None` outside the player turn.
    #[must_use]
    pub fn current_turn(&self) -> Option<TurnPosition> {
        if self.round.state != GameState::PlayerTurn {
            return None;
        }
        self.round.queue.front().copied()
    }

    /// Returns the id of the seat that has to act next.
    #[must_use]
    pub fn current_seat(&self) -> Option<u8> {
        self.current_turn()
            .map(|pos| self.seats[pos.seat_index].id)
    }

    /// Returns whether the given hand was resolved early this round.
    #[must_use]
    pub fn is_resolved(&self, seat_id: u8, hand_index: usize) -> bool {
        self.round.resolved.contains(&(seat_id, hand_index))
    }

    fn hand_at(&self, pos: TurnPosition) -> &Hand {
        &self.seats[pos.seat_index].hands[pos.hand_index]
    }

    fn hand_at_mut(&mut self, pos: TurnPosition) -> &mut Hand {
        &mut self.seats[pos.seat_index].hands[pos.hand_index]
    }

    pub(crate) fn payout_rules(&self) -> PayoutRules {
        PayoutRules {
            blackjack_pays: self.options.blackjack_pays,
            rounding: self.options.rounding_blackjack,
        }
    }

    /// Sends an action record; failures are logged and otherwise ignored.
    fn report(&self, pos: TurnPosition, kind: ActionKind, value: Option<HandValue>) {
        let seat = &self.seats[pos.seat_index];
        let hand = &seat.hands[pos.hand_index];
        let value = value.unwrap_or_else(|| hand.evaluate());

        let record = ActionRecord {
            round_id: self.round.id.unwrap_or_default(),
            seat_id: seat.id,
            hand_index: pos.hand_index,
            kind,
            dealer_up: self.round.dealer.up_card().map(Card::symbol),
            hand_total: value.best,
            is_soft: value.is_soft,
            cards: hand.cards().to_vec(),
        };

        if let Err(err) = self.action_log.report(&record) {
            warn!(
                seat = seat.id,
                hand = pos.hand_index,
                kind = kind.code(),
                %err,
                "action log failed"
            );
        }
    }

    /// Marks a hand that reached 21 as resolved and fixes its net payout.
    ///
    /// A hand is resolved at most once per round.
    #[expect(clippy::cast_possible_wrap, reason = "bet values fit in isize")]
    fn resolve_immediate(&mut self, pos: TurnPosition) {
        let seat_id = self.seats[pos.seat_index].id;
        let key = (seat_id, pos.hand_index);
        if self.round.resolved.contains(&key) {
            return;
        }

        let hand = self.hand_at(pos);
        let natural = hand.is_blackjack();
        let payout = if natural {
            self.payout_rules().blackjack(hand.bet())
        } else {
            hand.bet() as isize
        };

        let meta = self.hand_at_mut(pos).meta_mut();
        meta.resolved = true;
        meta.payout = Some(payout);
        meta.can_hit = false;
        self.round.resolved.insert(key);

        info!(
            seat = seat_id,
            hand = pos.hand_index,
            natural,
            payout,
            "hand resolved on 21"
        );
        let kind = if natural {
            ActionKind::Blackjack
        } else {
            ActionKind::Win
        };
        self.report(pos, kind, None);
    }

    /// Resolves a 21 or reports a bust after a card was added.
    fn finish_if_terminal(&mut self, pos: TurnPosition) {
        let value = self.hand_at(pos).value();
        if value > 21 {
            debug!(
                seat = self.seats[pos.seat_index].id,
                hand = pos.hand_index,
                total = value,
                "hand bust"
            );
            self.report(pos, ActionKind::Lose, None);
        } else if value == 21 {
            self.resolve_immediate(pos);
        }
    }

    /// Drops finished hands from the front of the queue and moves to the
    /// dealer once no hand is left to act.
    fn skip_finished(&mut self) {
        while let Some(&pos) = self.round.queue.front() {
            if self.hand_at(pos).is_playable() {
                debug!(
                    seat = self.seats[pos.seat_index].id,
                    hand = pos.hand_index,
                    "turn"
                );
                return;
            }
            self.round.queue.pop_front();
        }

        if self.round.state == GameState::PlayerTurn {
            debug!("all hands played; dealer's turn");
            self.round.state = GameState::DealerTurn;
        }
    }

    /// Finishes the active hand and moves on.
    fn advance_turn(&mut self) {
        self.round.queue.pop_front();
        self.skip_finished();
    }

    /// Makes room for a new hand at `hand_index + 1` of a seat: shifts the
    /// queued positions and resolved markers behind it, then queues the new
    /// hand right after the active one.
    fn insert_split_hand(&mut self, pos: TurnPosition) {
        for queued in &mut self.round.queue {
            if queued.seat_index == pos.seat_index && queued.hand_index > pos.hand_index {
                queued.hand_index += 1;
            }
        }

        let seat_id = self.seats[pos.seat_index].id;
        self.round.resolved = self
            .round
            .resolved
            .drain()
            .map(|(id, index)| {
                if id == seat_id && index > pos.hand_index {
                    (id, index + 1)
                } else {
                    (id, index)
                }
            })
            .collect();

        let right = TurnPosition {
            seat_index: pos.seat_index,
            hand_index: pos.hand_index + 1,
        };
        let at = usize::from(!self.round.queue.is_empty());
        self.round.queue.insert(at, right);
    }
}
