//! Card types and deck utilities.

use serde::{Deserialize, Serialize};

/// Card suit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Suit {
    /// Hearts.
    Hearts,
    /// Diamonds.
    Diamonds,
    /// Clubs.
    Clubs,
    /// Spades.
    Spades,
}

/// A playing card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    /// Identifier unique within one shoe build, stable for the card's life.
    pub id: u32,
    /// The suit of the card.
    pub suit: Suit,
    /// The rank of the card (1 = Ace, 11 = Jack, 12 = Queen, 13 = King).
    pub rank: u8,
}

impl Card {
    /// Creates a new card.
    ///
    /// Note: This function does not validate the rank. Values outside 1..=13
    /// are accepted but may yield non-standard results when evaluating a hand.
    #[must_use]
    pub const fn new(id: u32, suit: Suit, rank: u8) -> Self {
        Self { id, suit, rank }
    }

    /// Blackjack value of the card, counting an ace as 11.
    #[must_use]
    pub const fn value(&self) -> u8 {
        match self.rank {
            1 => 11,
            2..=10 => self.rank,
            11..=13 => 10,
            _ => 0,
        }
    }

    /// Alternate value, counting an ace as 1.
    #[must_use]
    pub const fn alt_value(&self) -> u8 {
        if self.rank == 1 { 1 } else { self.value() }
    }

    /// Hi-lo counting tag: +1 for 2 through 6, 0 for 7 through 9,
    /// -1 for ten-value cards and aces.
    #[must_use]
    pub const fn counting_tag(&self) -> i32 {
        match self.rank {
            2..=6 => 1,
            7..=9 => 0,
            1 | 10..=13 => -1,
            _ => 0,
        }
    }

    /// Returns whether this card is an ace.
    #[must_use]
    pub const fn is_ace(&self) -> bool {
        self.rank == 1
    }

    /// Returns whether this card counts ten (10, jack, queen or king).
    #[must_use]
    pub const fn is_ten_value(&self) -> bool {
        matches!(self.rank, 10..=13)
    }
}

/// Number of cards per deck.
pub const DECK_SIZE: usize = 52;
