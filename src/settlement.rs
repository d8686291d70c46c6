//! Per-hand settlement against the dealer's final hand.
//!
//! A payout is the net chip result of a hand: the seat gets back
//! `bet + payout` chips.

use core::cmp::Ordering;

use crate::hand::{DealerHand, Hand};
use crate::options::RoundingMode;
use crate::result::HandOutcome;

#[cfg(feature = "std")]
fn round_amount(amount: f64, mode: RoundingMode) -> usize {
    match mode {
        RoundingMode::Up => amount.ceil() as usize,
        RoundingMode::Down => amount.floor() as usize,
        RoundingMode::Nearest => amount.round() as usize,
    }
}

#[cfg(all(not(feature = "std"), feature = "alloc"))]
fn round_amount(amount: f64, mode: RoundingMode) -> usize {
    match mode {
        RoundingMode::Up => libm::ceil(amount) as usize,
        RoundingMode::Down => libm::floor(amount) as usize,
        RoundingMode::Nearest => libm::round(amount) as usize,
    }
}

/// How naturals are paid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PayoutRules {
    /// Payout ratio for a natural.
    pub blackjack_pays: f64,
    /// Rounding applied to the natural payout.
    pub rounding: RoundingMode,
}

impl Default for PayoutRules {
    fn default() -> Self {
        Self {
            blackjack_pays: 1.5,
            rounding: RoundingMode::Down,
        }
    }
}

impl PayoutRules {
    /// Net payout of a natural on the given bet.
    #[must_use]
    #[expect(
        clippy::cast_precision_loss,
        reason = "f64 has sufficient precision for monetary values"
    )]
    #[expect(clippy::cast_possible_wrap, reason = "payout values fit in isize")]
    pub fn blackjack(&self, bet: usize) -> isize {
        round_amount(bet as f64 * self.blackjack_pays, self.rounding) as isize
    }
}

/// The dealer's final position as settlement sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DealerOutcome {
    /// Best total.
    pub value: u8,
    /// Whether the dealer went over 21.
    pub bust: bool,
    /// Whether the dealer holds a two-card natural.
    pub blackjack: bool,
    /// Whether that natural was found at the deal, ending the round early.
    pub natural_at_deal: bool,
}

impl DealerOutcome {
    /// Reads the outcome off the dealer's final hand.
    #[must_use]
    pub fn from_hand(dealer: &DealerHand) -> Self {
        Self {
            value: dealer.value(),
            bust: dealer.is_bust(),
            blackjack: dealer.is_blackjack(),
            natural_at_deal: dealer.checked_blackjack(),
        }
    }
}

fn compare(value: u8, dealer: &DealerOutcome) -> HandOutcome {
    if dealer.bust {
        return HandOutcome::Win;
    }
    match value.cmp(&dealer.value) {
        Ordering::Greater => HandOutcome::Win,
        Ordering::Equal => HandOutcome::Push,
        Ordering::Less => HandOutcome::Lose,
    }
}

/// Settles one hand and returns its outcome with the net payout.
///
/// A hand resolved early keeps the payout fixed at resolution. When the dealer
/// had a natural at the deal, only a player natural survives (as a push).
#[must_use]
#[expect(clippy::cast_possible_wrap, reason = "bet values fit in isize")]
pub fn settle_hand(hand: &Hand, dealer: &DealerOutcome, rules: &PayoutRules) -> (HandOutcome, isize) {
    let bet = hand.bet() as isize;
    let value = hand.value();
    let natural = hand.is_blackjack();

    if value > 21 {
        return (HandOutcome::Bust, -bet);
    }

    if dealer.natural_at_deal {
        return if natural {
            (HandOutcome::Push, 0)
        } else {
            (HandOutcome::Lose, -bet)
        };
    }

    if hand.meta().resolved {
        let payout = hand.meta().payout.unwrap_or(bet);
        let outcome = if natural {
            HandOutcome::Blackjack
        } else {
            compare(value, dealer)
        };
        return (outcome, payout);
    }

    if natural {
        return if dealer.blackjack {
            (HandOutcome::Push, 0)
        } else {
            (HandOutcome::Blackjack, rules.blackjack(hand.bet()))
        };
    }

    match compare(value, dealer) {
        HandOutcome::Win => (HandOutcome::Win, bet),
        HandOutcome::Push => (HandOutcome::Push, 0),
        _ => (HandOutcome::Lose, -bet),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::{Card, Suit};

    fn hand(ranks: &[u8], bet: usize) -> Hand {
        let mut hand = Hand::new(bet);
        for &rank in ranks {
            hand.add_card(Card::new(Suit::Spades, rank));
        }
        hand
    }

    fn dealer(ranks: &[u8]) -> DealerOutcome {
        let mut dealer = DealerHand::new();
        for &rank in ranks {
            dealer.add_card(Card::new(Suit::Hearts, rank));
        }
        DealerOutcome::from_hand(&dealer)
    }

    #[test]
    fn natural_pays_three_to_two_rounded_down() {
        let rules = PayoutRules::default();
        assert_eq!(
            settle_hand(&hand(&[1, 13], 100), &dealer(&[9, 7]), &rules),
            (HandOutcome::Blackjack, 150)
        );
        assert_eq!(rules.blackjack(25), 37);
        let up = PayoutRules {
            rounding: RoundingMode::Up,
            ..rules
        };
        assert_eq!(up.blackjack(25), 38);
    }

    #[test]
    fn totals_are_compared() {
        let rules = PayoutRules::default();
        assert_eq!(
            settle_hand(&hand(&[10, 9], 100), &dealer(&[10, 8]), &rules),
            (HandOutcome::Win, 100)
        );
        assert_eq!(
            settle_hand(&hand(&[10, 9], 100), &dealer(&[10, 9]), &rules),
            (HandOutcome::Push, 0)
        );
        assert_eq!(
            settle_hand(&hand(&[10, 7], 100), &dealer(&[10, 9]), &rules),
            (HandOutcome::Lose, -100)
        );
    }

    #[test]
    fn bust_loses_even_when_dealer_busts() {
        let rules = PayoutRules::default();
        assert_eq!(
            settle_hand(&hand(&[10, 6, 9], 100), &dealer(&[10, 6, 8]), &rules),
            (HandOutcome::Bust, -100)
        );
        assert_eq!(
            settle_hand(&hand(&[10, 6], 100), &dealer(&[10, 6, 8]), &rules),
            (HandOutcome::Win, 100)
        );
    }

    #[test]
    fn naturals_push_against_a_dealer_natural() {
        let rules = PayoutRules::default();
        let mut dealt = DealerHand::new();
        dealt.add_card(Card::new(Suit::Hearts, 1));
        dealt.add_card(Card::new(Suit::Hearts, 12));
        dealt.mark_checked_blackjack();
        let dealer = DealerOutcome::from_hand(&dealt);

        assert_eq!(
            settle_hand(&hand(&[1, 10], 100), &dealer, &rules),
            (HandOutcome::Push, 0)
        );
        assert_eq!(
            settle_hand(&hand(&[10, 10], 100), &dealer, &rules),
            (HandOutcome::Lose, -100)
        );
    }

    #[test]
    fn resolved_hands_keep_their_payout() {
        let rules = PayoutRules::default();
        let mut resolved = hand(&[7, 4, 10], 200);
        let meta = resolved.meta_mut();
        meta.resolved = true;
        meta.payout = Some(200);
        meta.can_hit = false;

        assert_eq!(
            settle_hand(&resolved, &dealer(&[10, 10, 1]), &rules),
            (HandOutcome::Push, 200)
        );
        assert_eq!(
            settle_hand(&resolved, &dealer(&[10, 7]), &rules),
            (HandOutcome::Win, 200)
        );
    }
}
