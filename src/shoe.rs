//! Shoe construction, draws, and cut-card depletion tracking.

extern crate alloc;

use alloc::vec::Vec;

use rand::Rng;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;

use crate::card::{Card, DECK_SIZE, Suit};
use crate::error::EmptyShoeError;

/// One slot in the shoe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShoeEntry {
    /// A playable card.
    Card(Card),
    /// The non-playable marker that schedules a reshuffle.
    CutMarker,
}

/// The working sequence of cards a round draws from.
///
/// Built from one to five shuffled decks with an optional cut marker spliced
/// in at 60%-80% depth. Crossing the marker latches [`Shoe::cut_card_seen`];
/// the marker itself is removed on crossing, so it can signal only once.
#[derive(Debug, Clone)]
pub struct Shoe {
    /// Entries in draw order; the top of the shoe is the last element, so
    /// draws pop from the back.
    stack: Vec<ShoeEntry>,
    /// Latched when the cut marker is crossed; cleared only by replacement.
    cut_card_seen: bool,
}

impl Shoe {
    /// Builds a shuffled shoe from `deck_count` fresh decks.
    ///
    /// A single Fisher-Yates pass shuffles the combined decks. When
    /// `include_cut_card` is set, the marker lands at a uniformly random
    /// index within [0.6, 0.8) of the pre-insertion length, measured from
    /// the top.
    #[must_use]
    pub fn new(deck_count: u8, include_cut_card: bool, rng: &mut ChaCha8Rng) -> Self {
        let mut cards = Vec::with_capacity(deck_count as usize * DECK_SIZE);
        let mut next_id: u32 = 0;

        for _ in 0..deck_count {
            for suit in [Suit::Hearts, Suit::Diamonds, Suit::Clubs, Suit::Spades] {
                for rank in 1..=13 {
                    cards.push(Card::new(next_id, suit, rank));
                    next_id += 1;
                }
            }
        }

        cards.shuffle(rng);

        let mut entries: Vec<ShoeEntry> = cards.into_iter().map(ShoeEntry::Card).collect();
        if include_cut_card {
            let len = entries.len();
            let depth = rng.random_range(len * 6 / 10..len * 8 / 10);
            entries.insert(depth, ShoeEntry::CutMarker);
        }

        // Stored bottom-first so the top of the shoe pops off the back.
        entries.reverse();

        Self {
            stack: entries,
            cut_card_seen: false,
        }
    }

    /// Builds a marker-less shoe that yields `draws` in the given order.
    ///
    /// Intended for deterministic tests and demos.
    #[must_use]
    pub fn from_draw_order(draws: &[Card]) -> Self {
        let stack = draws.iter().rev().copied().map(ShoeEntry::Card).collect();
        Self {
            stack,
            cut_card_seen: false,
        }
    }

    /// Removes and returns the top card.
    ///
    /// The cut marker is never returned as a playable card: crossing it
    /// latches [`Shoe::cut_card_seen`] and the draw continues to the card
    /// beneath.
    ///
    /// # Errors
    ///
    /// Returns [`EmptyShoeError`] when no playable card remains.
    pub fn draw(&mut self) -> Result<Card, EmptyShoeError> {
        while let Some(entry) = self.stack.pop() {
            match entry {
                ShoeEntry::Card(card) => return Ok(card),
                ShoeEntry::CutMarker => {
                    self.cut_card_seen = true;
                    log::debug!("cut card reached; reshuffle due after this round");
                }
            }
        }
        Err(EmptyShoeError)
    }

    /// Total entries remaining, cut marker included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.stack.len()
    }

    /// Returns whether no entries remain.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    /// Number of playable cards remaining.
    #[must_use]
    pub fn cards_remaining(&self) -> usize {
        self.stack
            .iter()
            .filter(|entry| matches!(entry, ShoeEntry::Card(_)))
            .count()
    }

    /// Depth of the cut marker from the top, if it has not been crossed.
    #[must_use]
    pub fn cut_position(&self) -> Option<usize> {
        self.stack
            .iter()
            .rev()
            .position(|entry| matches!(entry, ShoeEntry::CutMarker))
    }

    /// Returns whether the cut marker has been crossed since this shoe was
    /// built.
    #[must_use]
    pub const fn cut_card_seen(&self) -> bool {
        self.cut_card_seen
    }
}
