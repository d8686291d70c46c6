//! The card supply: draw pile, discard pile and recycling.

use alloc::vec::Vec;

use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, warn};

use crate::card::{Card, DECK_SIZE, Suit, TEN, TEN_DEPLETED_DECK_SIZE};

/// What the shoe does when the draw pile runs out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RecycleMode {
    /// Shuffle the discard pile back into a new draw pile.
    #[default]
    Cycle,
    /// Rebuild a fresh shoe from every card not currently in play.
    Reset,
}

/// A multi-deck shoe.
///
/// Every card is always in exactly one of three places: the draw pile, the
/// discard pile, or in play (drawn and not yet discarded).
#[derive(Debug, Clone)]
pub struct Shoe {
    draw: Vec<Card>,
    discard: Vec<Card>,
    in_play: Vec<Card>,
    decks: u8,
    ten_depleted: bool,
    recycle: RecycleMode,
    sets: usize,
    reshuffles: usize,
    rng: ChaCha8Rng,
}

impl Shoe {
    /// Builds and shuffles a shoe.
    #[must_use]
    pub fn new(decks: u8, ten_depleted: bool, recycle: RecycleMode, seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut draw = build_cards(decks, ten_depleted);
        draw.shuffle(&mut rng);

        Self {
            draw,
            discard: Vec::new(),
            in_play: Vec::new(),
            decks,
            ten_depleted,
            recycle,
            sets: 1,
            reshuffles: 0,
            rng,
        }
    }

    /// Number of cards one full set of decks holds.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        let per_deck = if self.ten_depleted {
            TEN_DEPLETED_DECK_SIZE
        } else {
            DECK_SIZE
        };
        self.decks as usize * per_deck
    }

    /// Draws a card, recycling first if the draw pile is empty.
    pub fn draw(&mut self) -> Card {
        if self.draw.is_empty() {
            self.recycle();
        }

        let card = match self.draw.pop() {
            Some(card) => card,
            None => unreachable!("recycle always refills the draw pile"),
        };
        self.in_play.push(card);
        card
    }

    /// Draws one card straight into the discard pile.
    pub fn burn_one(&mut self) -> Card {
        let card = self.draw();
        self.discard_cards(&[card]);
        debug!(card = %card.symbol(), "burned card");
        card
    }

    /// Returns cards from play to the discard pile.
    pub fn discard_cards(&mut self, cards: &[Card]) {
        for card in cards {
            let pos = self.in_play.iter().position(|c| c == card);
            debug_assert!(pos.is_some(), "discarded a card that was not in play: {card:?}");
            if let Some(pos) = pos {
                self.in_play.swap_remove(pos);
            }
            self.discard.push(*card);
        }
    }

    fn recycle(&mut self) {
        self.reshuffles += 1;
        match self.recycle {
            RecycleMode::Cycle => {
                self.draw.append(&mut self.discard);
            }
            RecycleMode::Reset => {
                let mut fresh = build_cards(self.decks, self.ten_depleted);
                for _ in 1..self.sets {
                    fresh.extend(build_cards(self.decks, self.ten_depleted));
                }
                for card in &self.in_play {
                    if let Some(pos) = fresh.iter().position(|c| c == card) {
                        fresh.swap_remove(pos);
                    }
                }
                self.discard.clear();
                self.draw = fresh;
            }
        }

        if self.draw.is_empty() {
            warn!(
                in_play = self.in_play.len(),
                "every card is in play; adding a fresh set of decks"
            );
            self.sets += 1;
            self.draw = build_cards(self.decks, self.ten_depleted);
        }

        self.draw.shuffle(&mut self.rng);
        debug!(
            mode = ?self.recycle,
            cards = self.draw.len(),
            "reshuffled shoe"
        );
    }

    /// Number of cards left in the draw pile.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.draw.len()
    }

    /// Number of cards in the discard pile.
    #[must_use]
    pub fn discarded(&self) -> usize {
        self.discard.len()
    }

    /// Number of cards drawn and not yet discarded.
    #[must_use]
    pub fn in_play(&self) -> usize {
        self.in_play.len()
    }

    /// Total cards across draw, discard and play.
    #[must_use]
    pub fn total_cards(&self) -> usize {
        self.draw.len() + self.discard.len() + self.in_play.len()
    }

    /// Total cards the shoe should hold, counting any emergency deck sets.
    #[must_use]
    pub const fn expected_total(&self) -> usize {
        self.capacity() * self.sets
    }

    /// Number of times the draw pile has been refilled.
    #[must_use]
    pub const fn reshuffles(&self) -> usize {
        self.reshuffles
    }

    /// Puts the given cards on top of the draw pile, in draw order.
    ///
    /// The cards are taken out of the draw and discard piles so the shoe keeps
    /// its card count; cards that cannot be found there are ignored. Intended
    /// for replaying fixed scenarios.
    pub fn stack(&mut self, draws: &[Card]) {
        let mut top = Vec::with_capacity(draws.len());
        for card in draws {
            if let Some(pos) = self.draw.iter().position(|c| c == card) {
                top.push(self.draw.remove(pos));
            } else if let Some(pos) = self.discard.iter().position(|c| c == card) {
                top.push(self.discard.remove(pos));
            }
        }
        top.reverse();
        self.draw.extend(top);
    }
}

fn build_cards(decks: u8, ten_depleted: bool) -> Vec<Card> {
    let mut cards = Vec::with_capacity(decks as usize * DECK_SIZE);

    for _ in 0..decks {
        for suit in Suit::ALL {
            for rank in 1..=13 {
                if ten_depleted && rank == TEN {
                    continue;
                }
                cards.push(Card::new(suit, rank));
            }
        }
    }

    cards
}
