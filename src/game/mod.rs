//! Table engine and round state management.

extern crate alloc;

use alloc::vec::Vec;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::card::{Card, DECK_SIZE};
use crate::hand::{DealerHand, Hand};
use crate::options::TableOptions;
use crate::shoe::Shoe;
use crate::snapshot::TableSnapshot;

mod actions;
mod dealer;
pub mod state;

pub use state::GamePhase;

#[cfg(feature = "std")]
fn round_amount(value: f64) -> i32 {
    value.round() as i32
}

#[cfg(all(not(feature = "std"), feature = "alloc"))]
fn round_amount(value: f64) -> i32 {
    libm::round(value) as i32
}

/// A single-player blackjack table that manages the full round flow.
///
/// The table exclusively owns the shoe, the player's hands, and the dealer
/// hand; every operation takes `&mut self`, so there is exactly one current
/// value of the round at all times. Use [`TableOptions`] to configure the
/// deck count and cut-card inclusion.
pub struct Table {
    /// Cards the round draws from. Public so tests and demos can rig
    /// deterministic deals via [`Shoe::from_draw_order`].
    pub shoe: Shoe,
    /// Table configuration.
    pub options: TableOptions,
    /// Player hands for the current round (more than one after splits).
    hands: Vec<Hand>,
    /// The dealer's hand.
    dealer: DealerHand,
    /// Current phase.
    phase: GamePhase,
    /// Index of the hand whose turn it is.
    selected_hand: usize,
    /// Total wager at risk: the sum of all hand bets.
    bet_circle: usize,
    /// Hi-lo running count over cards exposed since the last shoe rebuild.
    running_count: i32,
    /// Random number generator.
    rng: ChaCha8Rng,
}

impl Table {
    /// Creates a table with a freshly built shoe.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use shoejack::{Table, TableOptions};
    ///
    /// let options = TableOptions::default();
    /// let table = Table::new(options, 42);
    /// let _ = table;
    /// ```
    #[must_use]
    pub fn new(options: TableOptions, seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let shoe = Shoe::new(options.deck_count, options.include_cut_card, &mut rng);

        Self {
            shoe,
            options,
            hands: Vec::new(),
            dealer: DealerHand::new(),
            phase: GamePhase::PreDeal,
            selected_hand: 0,
            bet_circle: 0,
            running_count: 0,
            rng,
        }
    }

    /// Replaces the configuration, installs a fresh shoe, and resets the
    /// round to `PreDeal`.
    ///
    /// An in-progress shoe is never patched live; any active round is
    /// discarded wholesale (refund any standing bet with
    /// [`Table::clear_bet_refund`] first if that is the caller's policy).
    pub fn reconfigure(&mut self, options: TableOptions) {
        self.options = options;
        self.install_fresh_shoe();
        self.reset_round_state();
        self.set_phase(GamePhase::PreDeal);
    }

    /// Builds and installs a fresh shoe, resetting the counting state.
    pub(crate) fn install_fresh_shoe(&mut self) {
        self.shoe = Shoe::new(
            self.options.deck_count,
            self.options.include_cut_card,
            &mut self.rng,
        );
        self.running_count = 0;
        log::info!(
            "shoe rebuilt: {} decks, cut card: {}",
            self.options.deck_count,
            self.options.include_cut_card
        );
    }

    /// Draws one card, recovering from an exhausted shoe by installing a
    /// fresh one and retrying the single failed draw.
    pub(crate) fn draw_card(&mut self) -> Card {
        match self.shoe.draw() {
            Ok(card) => card,
            Err(_) => {
                log::warn!("shoe exhausted mid-round; installing a fresh shoe");
                self.install_fresh_shoe();
                self.shoe
                    .draw()
                    .expect("freshly built shoe cannot be empty")
            }
        }
    }

    /// Draws a card and exposes it to the running count.
    pub(crate) fn draw_exposed(&mut self) -> Card {
        let card = self.draw_card();
        self.expose(card);
        card
    }

    /// Feeds one card, at the moment it turns face-up, into the running
    /// count.
    pub(crate) const fn expose(&mut self, card: Card) {
        self.running_count += card.counting_tag();
    }

    pub(crate) fn set_phase(&mut self, phase: GamePhase) {
        if self.phase != phase {
            log::debug!("phase {:?} -> {:?}", self.phase, phase);
            self.phase = phase;
        }
    }

    /// Clears hands, dealer, bet circle, and hand selection.
    pub(crate) fn reset_round_state(&mut self) {
        self.hands.clear();
        self.dealer.clear();
        self.bet_circle = 0;
        self.selected_hand = 0;
    }

    /// Current phase.
    #[must_use]
    pub const fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Player hands for the current round, in table order.
    #[must_use]
    pub fn hands(&self) -> &[Hand] {
        &self.hands
    }

    /// The dealer's hand.
    #[must_use]
    pub const fn dealer(&self) -> &DealerHand {
        &self.dealer
    }

    /// Index of the hand whose turn it is.
    #[must_use]
    pub const fn selected_hand(&self) -> usize {
        self.selected_hand
    }

    /// Total wager currently at risk: the sum of all hand bets.
    #[must_use]
    pub const fn bet_circle(&self) -> usize {
        self.bet_circle
    }

    /// Hi-lo running count over every card exposed face-up since the last
    /// shoe rebuild.
    #[must_use]
    pub const fn running_count(&self) -> i32 {
        self.running_count
    }

    /// Running count normalized by the estimated decks remaining (floored
    /// at one deck), rounded to the nearest integer.
    #[must_use]
    #[expect(
        clippy::cast_precision_loss,
        reason = "f64 has sufficient precision for card counts"
    )]
    pub fn true_count(&self) -> i32 {
        let decks_remaining = (self.shoe.cards_remaining() as f64 / DECK_SIZE as f64).max(1.0);
        round_amount(f64::from(self.running_count) / decks_remaining)
    }

    /// Number of playable cards left in the shoe.
    #[must_use]
    pub fn cards_remaining(&self) -> usize {
        self.shoe.cards_remaining()
    }

    /// Captures the presentation snapshot: hands, dealer (face-up cards
    /// only), phase, bet circle, and counting state.
    #[must_use]
    pub fn snapshot(&self) -> TableSnapshot {
        TableSnapshot::capture(self)
    }
}
