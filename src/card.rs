//! Card types and deck utilities.

/// Card suit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Suit {
    /// Spades.
    Spades,
    /// Hearts.
    Hearts,
    /// Clubs.
    Clubs,
    /// Diamonds.
    Diamonds,
}

impl Suit {
    /// All four suits in shoe-building order.
    pub const ALL: [Self; 4] = [Self::Spades, Self::Hearts, Self::Clubs, Self::Diamonds];
}

/// Rank of the ace.
pub const ACE: u8 = 1;

/// Rank of the ten (`T`). Removed from ten-depleted decks.
pub const TEN: u8 = 10;

/// A playing card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Card {
    /// The suit of the card.
    pub suit: Suit,
    /// The rank of the card (1 = Ace, 10 = Ten, 11 = Jack, 12 = Queen, 13 = King).
    pub rank: u8,
}

impl Card {
    /// Creates a new card.
    ///
    /// Note: This function does not validate the rank. Values outside 1..=13
    /// are accepted but count as zero when evaluating a hand.
    #[must_use]
    pub const fn new(suit: Suit, rank: u8) -> Self {
        Self { suit, rank }
    }

    /// Returns the blackjack value of the card with the ace counted as 1.
    #[must_use]
    pub const fn value(&self) -> u8 {
        match self.rank {
            1..=10 => self.rank,
            11..=13 => 10,
            _ => 0,
        }
    }

    /// Returns whether the card is an ace.
    #[must_use]
    pub const fn is_ace(&self) -> bool {
        self.rank == ACE
    }

    /// Returns whether the card is worth ten (`T`, `J`, `Q` or `K`).
    #[must_use]
    pub const fn is_ten_valued(&self) -> bool {
        self.value() == 10
    }

    /// Returns the rank symbol: `A`, `2`..`9`, `T`, `J`, `Q`, `K`.
    ///
    /// Unknown ranks render as `?`.
    #[must_use]
    pub const fn symbol(&self) -> char {
        match self.rank {
            1 => 'A',
            2..=9 => (b'0' + self.rank) as char,
            10 => 'T',
            11 => 'J',
            12 => 'Q',
            13 => 'K',
            _ => '?',
        }
    }
}

/// Parses a rank symbol (`A`, `2`..`9`, `T`/`10`, `J`, `Q`, `K`, any case).
#[must_use]
pub fn rank_from_symbol(symbol: &str) -> Option<u8> {
    let symbol = symbol.trim();
    if symbol == "10" {
        return Some(TEN);
    }

    let mut chars = symbol.chars();
    let first = chars.next()?;
    if chars.next().is_some() {
        return None;
    }

    match first.to_ascii_uppercase() {
        'A' => Some(ACE),
        c @ '2'..='9' => Some(c as u8 - b'0'),
        'T' => Some(TEN),
        'J' => Some(11),
        'Q' => Some(12),
        'K' => Some(13),
        _ => None,
    }
}

/// Number of cards per deck.
pub const DECK_SIZE: usize = 52;

/// Number of cards per deck when the `T` rank is removed.
pub const TEN_DEPLETED_DECK_SIZE: usize = DECK_SIZE - 4;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn values_and_symbols() {
        assert_eq!(Card::new(Suit::Spades, 1).value(), 1);
        assert_eq!(Card::new(Suit::Spades, 7).value(), 7);
        assert_eq!(Card::new(Suit::Spades, 13).value(), 10);
        assert_eq!(Card::new(Suit::Hearts, 10).symbol(), 'T');
        assert_eq!(Card::new(Suit::Hearts, 4).symbol(), '4');
        assert_eq!(Card::new(Suit::Hearts, 12).symbol(), 'Q');
    }

    #[test]
    fn parses_rank_symbols() {
        assert_eq!(rank_from_symbol("a"), Some(1));
        assert_eq!(rank_from_symbol("10"), Some(10));
        assert_eq!(rank_from_symbol("T"), Some(10));
        assert_eq!(rank_from_symbol("9"), Some(9));
        assert_eq!(rank_from_symbol("k"), Some(13));
        assert_eq!(rank_from_symbol("1"), None);
        assert_eq!(rank_from_symbol("XYZ"), None);
        assert_eq!(rank_from_symbol(""), None);
    }
}
