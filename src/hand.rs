//! Hand evaluation plus player and dealer hand representations.

extern crate alloc;

use alloc::vec::Vec;

use crate::card::Card;

/// The evaluated value of a set of cards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandValue {
    /// Best total: the highest candidate not above 21, or the lowest candidate
    /// when every candidate busts.
    pub best: u8,
    /// Whether `best` counts at least one ace as 11.
    pub is_soft: bool,
    /// Every candidate total, from all aces as 1 upwards.
    pub totals: Vec<u8>,
}

fn raw_sum_and_aces(cards: &[Card]) -> (u8, u8) {
    let mut sum: u8 = 0;
    let mut aces: u8 = 0;

    for card in cards {
        if card.is_ace() {
            aces += 1;
        }
        sum = sum.saturating_add(card.value());
    }

    (sum, aces)
}

/// Evaluates a hand, counting each ace as 1 or 11 to reach the best total.
///
/// A busted hand reports its lowest total rather than being clamped.
#[must_use]
pub fn evaluate(cards: &[Card]) -> HandValue {
    let (raw, aces) = raw_sum_and_aces(cards);

    let totals: Vec<u8> = (0..=aces)
        .map(|i| raw.saturating_add(i.saturating_mul(10)))
        .collect();

    let best = totals
        .iter()
        .copied()
        .filter(|&total| total <= 21)
        .max()
        .unwrap_or(raw);

    HandValue {
        best,
        is_soft: best - raw >= 10,
        totals,
    }
}

/// Evaluates a hand with every ace counted strictly as 1.
///
/// Used when reporting the hard total of a freshly doubled hand.
#[must_use]
pub fn evaluate_hard(cards: &[Card]) -> HandValue {
    let (raw, _) = raw_sum_and_aces(cards);
    HandValue {
        best: raw,
        is_soft: false,
        totals: alloc::vec![raw],
    }
}

/// Returns whether the cards are a natural: exactly an ace and a ten-valued card.
#[must_use]
pub fn is_blackjack(cards: &[Card]) -> bool {
    match cards {
        [a, b] => (a.is_ace() && b.is_ten_valued()) || (b.is_ace() && a.is_ten_valued()),
        _ => false,
    }
}

/// Per-hand rule state carried alongside the cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HandMeta {
    /// Whether the hand may take another card.
    pub can_hit: bool,
    /// Whether the hand came from splitting a pair of aces.
    pub is_split_aces: bool,
    /// Whether the hand was paid out early (natural or 21). Permanent for the round.
    pub resolved: bool,
    /// Net payout stored when the hand was resolved early.
    pub payout: Option<isize>,
    /// Whether the wager on this hand was doubled.
    pub doubled: bool,
}

impl HandMeta {
    /// Metadata for a fresh, playable hand.
    #[must_use]
    pub const fn playable() -> Self {
        Self {
            can_hit: true,
            is_split_aces: false,
            resolved: false,
            payout: None,
            doubled: false,
        }
    }

    /// Metadata for one half of a split pair of aces: locked against hitting.
    #[must_use]
    pub const fn split_aces() -> Self {
        Self {
            can_hit: false,
            is_split_aces: true,
            resolved: false,
            payout: None,
            doubled: false,
        }
    }
}

impl Default for HandMeta {
    fn default() -> Self {
        Self::playable()
    }
}

/// A seat's hand: its cards, rule metadata and wager in one record.
#[derive(Debug, Clone)]
pub struct Hand {
    cards: Vec<Card>,
    meta: HandMeta,
    bet: usize,
}

impl Hand {
    /// Creates a new empty hand with the given bet.
    #[must_use]
    pub const fn new(bet: usize) -> Self {
        Self {
            cards: Vec::new(),
            meta: HandMeta::playable(),
            bet,
        }
    }

    /// Creates one half of a split with a single card.
    #[must_use]
    pub fn from_split(card: Card, bet: usize, aces: bool) -> Self {
        Self {
            cards: alloc::vec![card],
            meta: if aces {
                HandMeta::split_aces()
            } else {
                HandMeta::playable()
            },
            bet,
        }
    }

    /// Adds a card to the hand.
    pub fn add_card(&mut self, card: Card) {
        self.cards.push(card);
    }

    /// Returns the cards in the hand.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Returns the rule metadata.
    #[must_use]
    pub const fn meta(&self) -> &HandMeta {
        &self.meta
    }

    pub(crate) const fn meta_mut(&mut self) -> &mut HandMeta {
        &mut self.meta
    }

    /// Returns the bet amount for this hand.
    #[must_use]
    pub const fn bet(&self) -> usize {
        self.bet
    }

    /// Adds to the wager, as when doubling down.
    pub(crate) const fn raise_bet(&mut self, amount: usize) {
        self.bet += amount;
    }

    /// Evaluates the hand.
    #[must_use]
    pub fn evaluate(&self) -> HandValue {
        evaluate(&self.cards)
    }

    /// Returns the best total of the hand.
    #[must_use]
    pub fn value(&self) -> u8 {
        self.evaluate().best
    }

    /// Returns whether the best total counts an ace as 11.
    #[must_use]
    pub fn is_soft(&self) -> bool {
        self.evaluate().is_soft
    }

    /// Returns whether the hand is over 21.
    #[must_use]
    pub fn is_bust(&self) -> bool {
        self.value() > 21
    }

    /// Returns whether the hand is a natural.
    #[must_use]
    pub fn is_blackjack(&self) -> bool {
        is_blackjack(&self.cards)
    }

    /// Returns whether the hand is a pair of equal blackjack value.
    #[must_use]
    pub fn is_pair(&self) -> bool {
        match self.cards.as_slice() {
            [a, b] => a.rank == b.rank || a.value() == b.value(),
            _ => false,
        }
    }

    /// Returns whether the hand still needs a decision this round.
    ///
    /// Resolved, busted, locked and 21-valued hands are finished.
    #[must_use]
    pub fn is_playable(&self) -> bool {
        !self.meta.resolved && self.meta.can_hit && self.value() < 21
    }

    /// Returns the number of cards in the hand.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Returns whether the hand is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Removes and returns the second card (for splitting).
    pub fn take_split_card(&mut self) -> Option<Card> {
        if self.cards.len() == 2 {
            self.cards.pop()
        } else {
            None
        }
    }

    /// Replaces the metadata of a hand that was just split.
    pub(crate) const fn reset_after_split(&mut self, aces: bool) {
        self.meta = if aces {
            HandMeta::split_aces()
        } else {
            HandMeta::playable()
        };
    }

    /// Takes every card out of the hand, leaving it empty.
    pub(crate) fn take_cards(&mut self) -> Vec<Card> {
        core::mem::take(&mut self.cards)
    }
}

/// The dealer's hand.
#[derive(Debug, Clone)]
pub struct DealerHand {
    cards: Vec<Card>,
    checked_blackjack: bool,
}

impl DealerHand {
    /// Creates a new empty dealer hand.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            cards: Vec::new(),
            checked_blackjack: false,
        }
    }

    /// Adds a card to the hand.
    pub fn add_card(&mut self, card: Card) {
        self.cards.push(card);
    }

    /// Returns all cards in the hand.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Returns the up card (first card).
    #[must_use]
    pub fn up_card(&self) -> Option<&Card> {
        self.cards.first()
    }

    /// Returns whether a two-card dealer natural was found at the deal.
    #[must_use]
    pub const fn checked_blackjack(&self) -> bool {
        self.checked_blackjack
    }

    pub(crate) const fn mark_checked_blackjack(&mut self) {
        self.checked_blackjack = true;
    }

    /// Evaluates the hand.
    #[must_use]
    pub fn evaluate(&self) -> HandValue {
        evaluate(&self.cards)
    }

    /// Calculates the best total of the hand.
    #[must_use]
    pub fn value(&self) -> u8 {
        self.evaluate().best
    }

    /// Returns whether the hand is a natural.
    #[must_use]
    pub fn is_blackjack(&self) -> bool {
        is_blackjack(&self.cards)
    }

    /// Returns whether the hand is bust.
    #[must_use]
    pub fn is_bust(&self) -> bool {
        self.value() > 21
    }

    /// Returns whether the dealer must draw: under 17, or a soft 17.
    #[must_use]
    pub fn must_draw(&self) -> bool {
        let value = self.evaluate();
        value.best < 17 || (value.best == 17 && value.is_soft)
    }

    /// Returns the number of cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Returns whether the hand is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Clears the hand for a new round, returning its cards.
    pub fn clear(&mut self) -> Vec<Card> {
        self.checked_blackjack = false;
        core::mem::take(&mut self.cards)
    }
}

impl Default for DealerHand {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::Suit;

    fn cards(ranks: &[u8]) -> Vec<Card> {
        ranks.iter().map(|&r| Card::new(Suit::Clubs, r)).collect()
    }

    #[test]
    fn soft_totals() {
        let value = evaluate(&cards(&[1, 6]));
        assert_eq!(value.best, 17);
        assert!(value.is_soft);
        assert_eq!(value.totals, vec![7, 17]);

        let value = evaluate(&cards(&[1, 6, 5]));
        assert_eq!(value.best, 12);
        assert!(!value.is_soft);
    }

    #[test]
    fn multiple_aces_use_one_as_eleven() {
        let value = evaluate(&cards(&[1, 1, 9]));
        assert_eq!(value.best, 21);
        assert!(value.is_soft);
        assert_eq!(value.totals, vec![11, 21, 31]);
    }

    #[test]
    fn bust_reports_lowest_total() {
        let value = evaluate(&cards(&[10, 9, 4]));
        assert_eq!(value.best, 23);
        assert!(!value.is_soft);

        let value = evaluate(&cards(&[1, 13, 12, 5]));
        assert_eq!(value.best, 26);
    }

    #[test]
    fn hard_evaluation_counts_aces_as_one() {
        let value = evaluate_hard(&cards(&[1, 9, 1]));
        assert_eq!(value.best, 11);
        assert!(!value.is_soft);
    }

    #[test]
    fn naturals() {
        assert!(is_blackjack(&cards(&[1, 13])));
        assert!(is_blackjack(&cards(&[10, 1])));
        assert!(!is_blackjack(&cards(&[1, 9])));
        assert!(!is_blackjack(&cards(&[7, 7, 7])));
    }

    #[test]
    fn dealer_draws_on_soft_seventeen_only() {
        let mut dealer = DealerHand::new();
        dealer.add_card(Card::new(Suit::Hearts, 1));
        dealer.add_card(Card::new(Suit::Hearts, 6));
        assert!(dealer.must_draw());

        let mut dealer = DealerHand::new();
        dealer.add_card(Card::new(Suit::Hearts, 10));
        dealer.add_card(Card::new(Suit::Hearts, 7));
        assert!(!dealer.must_draw());
    }

    #[test]
    fn pairs_match_on_value() {
        let mut hand = Hand::new(10);
        hand.add_card(Card::new(Suit::Hearts, 13));
        hand.add_card(Card::new(Suit::Spades, 12));
        assert!(hand.is_pair());

        let mut hand = Hand::new(10);
        hand.add_card(Card::new(Suit::Hearts, 8));
        hand.add_card(Card::new(Suit::Spades, 9));
        assert!(!hand.is_pair());
    }
}
