//! Basic-strategy decisions for automated seats.
//!
//! The tables are fixed lookup data keyed by the player's total (or pair rank)
//! and the dealer's up-card column, where an ace is column 11 and every
//! ten-valued rank is column 10.

use crate::card::{ACE, Card, rank_from_symbol};
use crate::error::StrategyFault;
use crate::hand::evaluate;

/// A player decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Action {
    /// Take another card.
    Hit,
    /// Keep the hand as it is.
    Stand,
    /// Double the wager for exactly one more card.
    Double,
    /// Split a pair into two hands.
    Split,
}

#[derive(Clone, Copy)]
enum Code {
    H,
    S,
    D,
    P,
}

use Code::{D, H, P, S};

/// Columns are dealer 2..=9, 10, A.
type Row = [Code; 10];

const HARD_MIN: u8 = 4;
const SOFT_MIN: u8 = 12;

const HARD: [Row; 17] = [
    [H, H, H, H, H, H, H, H, H, H], // 4
    [H, H, H, H, H, H, H, H, H, H], // 5
    [H, H, H, H, H, H, H, H, H, H], // 6
    [H, H, H, H, H, H, H, H, H, H], // 7
    [H, H, H, H, H, H, H, H, H, H], // 8
    [H, H, D, D, D, H, H, H, H, H], // 9
    [D, D, D, D, D, D, D, D, H, H], // 10
    [D, D, D, D, D, D, D, D, D, H], // 11
    [H, H, S, S, S, H, H, H, H, H], // 12
    [H, H, S, S, S, H, H, H, H, H], // 13
    [S, S, S, S, S, H, H, H, H, H], // 14
    [S, S, S, S, S, H, H, H, H, H], // 15
    [S, S, S, S, S, H, H, H, H, H], // 16
    [S, S, S, S, S, S, S, S, S, H], // 17
    [S, S, S, S, S, S, S, S, S, S], // 18
    [S, S, S, S, S, S, S, S, S, S], // 19
    [S, S, S, S, S, S, S, S, S, S], // 20
];

const SOFT: [Row; 9] = [
    [H, H, H, H, H, H, H, H, H, H], // 12
    [H, H, H, H, H, H, H, H, H, H], // 13
    [H, H, H, H, H, H, H, H, H, H], // 14
    [H, H, H, H, H, H, H, H, H, H], // 15
    [H, H, H, H, H, H, H, H, H, H], // 16
    [H, H, H, H, H, H, H, H, H, H], // 17
    [S, S, S, S, S, S, S, H, H, H], // 18
    [S, S, S, S, S, S, S, S, S, S], // 19
    [S, S, S, S, S, S, S, S, S, S], // 20
];

/// Indexed by rank - 1: A, 2..=9, T, J, Q, K.
const PAIRS: [Row; 13] = [
    [P, P, P, P, P, P, P, P, P, P], // A
    [P, P, P, P, P, P, P, P, H, H], // 2
    [P, P, P, P, P, P, P, H, H, H], // 3
    [H, H, P, P, P, P, H, H, H, H], // 4
    [D, D, D, D, D, D, D, H, H, H], // 5
    [H, H, P, P, P, H, H, H, H, H], // 6
    [P, P, P, P, P, P, H, H, H, H], // 7
    [P, P, P, P, P, P, P, P, P, H], // 8
    [S, P, P, P, P, S, P, P, S, S], // 9
    [S, S, S, S, S, S, S, S, S, S], // T
    [S, S, S, S, S, S, S, S, S, S], // J
    [S, S, S, S, S, S, S, S, S, S], // Q
    [S, S, S, S, S, S, S, S, S, S], // K
];

/// Maps a dealer up card to its table column (2..=11).
///
/// A missing up card maps to column 10.
#[must_use]
pub fn dealer_column(up: Option<&Card>) -> u8 {
    match up {
        Some(card) if card.is_ace() => 11,
        Some(card) if (2..=10).contains(&card.value()) => card.value(),
        _ => 10,
    }
}

/// Maps a textual up-card rank (`"A"`, `"7"`, `"T"`, `"10"`, `"K"`, ...) to its
/// table column. Anything unparseable maps to column 10.
#[must_use]
pub fn dealer_column_from_symbol(symbol: &str) -> u8 {
    match rank_from_symbol(symbol) {
        Some(ACE) => 11,
        Some(rank) if rank >= 10 => 10,
        Some(rank) => rank,
        None => 10,
    }
}

fn lookup(row: &Row, column: u8) -> Code {
    row[usize::from(column.clamp(2, 11) - 2)]
}

const fn downgrade(code: Code, can_double: bool) -> Action {
    match code {
        H => Action::Hit,
        S => Action::Stand,
        D if can_double => Action::Double,
        D => Action::Hit,
        P => Action::Split,
    }
}

/// Looks up the basic-strategy action for a hand.
///
/// Pairs consult the pair table first when splitting is legal, and that
/// verdict is final. Everything else goes through the soft or hard table.
/// `Double` is downgraded to `Hit` when doubling is not legal, and totals
/// outside the tables hit.
#[must_use]
pub fn decide(cards: &[Card], dealer_up: Option<&Card>, can_double: bool, can_split: bool) -> Action {
    decide_column(cards, dealer_column(dealer_up), can_double, can_split)
}

/// Same as [`decide`] with the dealer column given directly (2..=11).
#[must_use]
pub fn decide_column(cards: &[Card], column: u8, can_double: bool, can_split: bool) -> Action {
    if can_split {
        if let [a, b] = cards {
            if a.value() == b.value() && (1..=13).contains(&a.rank) {
                let row = &PAIRS[usize::from(a.rank - 1)];
                return downgrade(lookup(row, column), can_double);
            }
        }
    }

    let value = evaluate(cards);
    let code = if value.is_soft {
        value
            .best
            .checked_sub(SOFT_MIN)
            .and_then(|i| SOFT.get(usize::from(i)))
            .map(|row| lookup(row, column))
    } else {
        value
            .best
            .checked_sub(HARD_MIN)
            .and_then(|i| HARD.get(usize::from(i)))
            .map(|row| lookup(row, column))
    };

    code.map_or(Action::Hit, |code| downgrade(code, can_double))
}

/// What an automated seat sees when it has to act.
#[derive(Debug, Clone, Copy)]
pub struct Decision<'a> {
    /// The seat acting.
    pub seat_id: u8,
    /// Index of the hand being played.
    pub hand_index: usize,
    /// Cards in the hand.
    pub cards: &'a [Card],
    /// The dealer's up card, if dealt.
    pub dealer_up: Option<&'a Card>,
    /// Whether doubling is currently legal.
    pub can_double: bool,
    /// Whether splitting is currently legal.
    pub can_split: bool,
}

/// A source of decisions for automated seats.
pub trait Strategy: Send + Sync {
    /// Chooses an action for the hand.
    ///
    /// # Errors
    ///
    /// Returns a [`StrategyFault`] when no decision can be made; the table
    /// then stands.
    fn decide(&self, decision: &Decision<'_>) -> Result<Action, StrategyFault>;
}

/// The fixed basic-strategy tables.
#[derive(Debug, Clone, Copy, Default)]
pub struct BasicStrategy;

impl Strategy for BasicStrategy {
    fn decide(&self, decision: &Decision<'_>) -> Result<Action, StrategyFault> {
        if decision.cards.is_empty() {
            return Err(StrategyFault::EmptyHand);
        }
        Ok(decide(
            decision.cards,
            decision.dealer_up,
            decision.can_double,
            decision.can_split,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::Suit;

    fn cards(ranks: &[u8]) -> Vec<Card> {
        ranks.iter().map(|&r| Card::new(Suit::Diamonds, r)).collect()
    }

    fn up(rank: u8) -> Card {
        Card::new(Suit::Clubs, rank)
    }

    #[test]
    fn splits_eights_against_ten() {
        assert_eq!(
            decide(&cards(&[8, 8]), Some(&up(10)), true, true),
            Action::Split
        );
        assert_eq!(
            decide(&cards(&[8, 8]), Some(&up(13)), true, true),
            Action::Split
        );
        assert_eq!(
            decide(&cards(&[8, 8]), Some(&up(1)), true, true),
            Action::Hit
        );
    }

    #[test]
    fn pair_table_skipped_when_split_illegal() {
        // Hard 16 against a ten hits.
        assert_eq!(
            decide(&cards(&[8, 8]), Some(&up(10)), true, false),
            Action::Hit
        );
        // Hard 16 against a six stands.
        assert_eq!(
            decide(&cards(&[8, 8]), Some(&up(6)), true, false),
            Action::Stand
        );
    }

    #[test]
    fn pair_of_fives_doubles_or_hits() {
        assert_eq!(
            decide(&cards(&[5, 5]), Some(&up(6)), true, true),
            Action::Double
        );
        assert_eq!(
            decide(&cards(&[5, 5]), Some(&up(6)), false, true),
            Action::Hit
        );
    }

    #[test]
    fn mixed_tens_use_first_rank_row() {
        assert_eq!(
            decide(&cards(&[13, 12]), Some(&up(6)), true, true),
            Action::Stand
        );
    }

    #[test]
    fn hard_and_soft_lookups() {
        assert_eq!(decide(&cards(&[6, 5]), Some(&up(6)), true, true), Action::Double);
        assert_eq!(decide(&cards(&[6, 5]), Some(&up(1)), true, true), Action::Hit);
        assert_eq!(decide(&cards(&[6, 5]), Some(&up(6)), false, true), Action::Hit);
        assert_eq!(decide(&cards(&[10, 7]), Some(&up(1)), true, true), Action::Hit);
        assert_eq!(decide(&cards(&[10, 7]), Some(&up(9)), true, true), Action::Stand);
        assert_eq!(decide(&cards(&[1, 7]), Some(&up(9)), true, true), Action::Hit);
        assert_eq!(decide(&cards(&[1, 7]), Some(&up(8)), true, true), Action::Stand);
        assert_eq!(decide(&cards(&[1, 6]), Some(&up(3)), true, true), Action::Hit);
    }

    #[test]
    fn out_of_range_totals_hit() {
        assert_eq!(decide(&cards(&[2]), Some(&up(6)), false, false), Action::Hit);
        assert_eq!(decide(&cards(&[1, 1]), Some(&up(6)), true, false), Action::Hit);
        assert_eq!(decide(&cards(&[10, 5, 7]), Some(&up(6)), false, false), Action::Hit);
    }

    #[test]
    fn dealer_columns() {
        assert_eq!(dealer_column(Some(&up(1))), 11);
        assert_eq!(dealer_column(Some(&up(12))), 10);
        assert_eq!(dealer_column(Some(&up(7))), 7);
        assert_eq!(dealer_column(None), 10);
        assert_eq!(dealer_column_from_symbol("A"), 11);
        assert_eq!(dealer_column_from_symbol("q"), 10);
        assert_eq!(dealer_column_from_symbol("10"), 10);
        assert_eq!(dealer_column_from_symbol("4"), 4);
        assert_eq!(dealer_column_from_symbol("joker"), 10);
    }

    #[test]
    fn basic_strategy_rejects_empty_hand() {
        let decision = Decision {
            seat_id: 1,
            hand_index: 0,
            cards: &[],
            dealer_up: None,
            can_double: false,
            can_split: false,
        };
        assert_eq!(
            BasicStrategy.decide(&decision),
            Err(StrategyFault::EmptyHand)
        );
    }
}
