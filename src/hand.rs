//! Hand totals, player and dealer hand state, and settlement.

extern crate alloc;

use alloc::vec::Vec;

use serde::{Deserialize, Serialize};

use crate::card::Card;

/// Multiplier on the bet returned for a natural blackjack win.
const BLACKJACK_RETURN: f64 = 2.5;

#[cfg(feature = "std")]
fn floor_amount(amount: f64) -> usize {
    amount.floor() as usize
}

#[cfg(all(not(feature = "std"), feature = "alloc"))]
fn floor_amount(amount: f64) -> usize {
    libm::floor(amount) as usize
}

/// Every valid total a set of cards can make.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandTotals {
    /// Best achievable total; the single minimal busting total when every
    /// ace assignment busts.
    pub best: u8,
    /// All distinct surviving totals, descending.
    pub all: Vec<u8>,
}

impl HandTotals {
    /// Totals of an empty hand.
    #[must_use]
    pub fn zero() -> Self {
        Self {
            best: 0,
            all: alloc::vec![0],
        }
    }
}

impl Default for HandTotals {
    fn default() -> Self {
        Self::zero()
    }
}

/// Computes every valid total for `cards`, resolving ace ambiguity.
///
/// Each ace contributes 1 or 11. With `base` the sum counting every ace as
/// 1, the candidates are `base + 10k` for k = 0..=aces; candidates over 21
/// are discarded. When every candidate busts, only the minimal busting
/// total is reported. An empty hand totals 0.
#[must_use]
pub fn hand_totals(cards: &[Card]) -> HandTotals {
    let mut base: u8 = 0;
    let mut aces: u8 = 0;

    for card in cards {
        base = base.saturating_add(card.alt_value());
        if card.is_ace() {
            aces += 1;
        }
    }

    let mut all = Vec::with_capacity(aces as usize + 1);
    for upgrades in (0..=aces).rev() {
        let total = base.saturating_add(10 * upgrades);
        if total <= 21 {
            all.push(total);
        }
    }

    if all.is_empty() {
        return HandTotals {
            best: base,
            all: alloc::vec![base],
        };
    }

    HandTotals { best: all[0], all }
}

/// Returns whether `cards` form a natural: exactly two cards, an ace plus a
/// ten-value card.
///
/// Only a natural earns the blackjack payout; any 21 reached on three or
/// more cards, or on two cards after a split, is a plain 21.
#[must_use]
pub fn is_natural(cards: &[Card]) -> bool {
    cards.len() == 2 && cards.iter().any(Card::is_ace) && cards.iter().any(Card::is_ten_value)
}

/// Hand lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HandStatus {
    /// The hand may still take cards.
    Playing,
    /// No further cards will be added.
    Done,
}

/// Settled result of a hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HandOutcome {
    /// Not yet settled against the dealer.
    Undecided,
    /// Player wins.
    Win,
    /// Player loses.
    Lose,
    /// Tie; the bet comes back.
    Push,
}

/// A player's hand.
#[derive(Debug, Clone)]
pub struct Hand {
    /// Cards in the hand.
    cards: Vec<Card>,
    /// Bet amount for this hand.
    bet: usize,
    /// Current status of the hand.
    status: HandStatus,
    /// Settled outcome, `Undecided` until settlement (or a pre-resolving
    /// dealer natural).
    outcome: HandOutcome,
    /// Whether the hand is a natural blackjack.
    blackjack: bool,
    /// Whether the hand was doubled down.
    doubled: bool,
    /// Whether every total busts.
    busted: bool,
    /// Whether this hand came from a split.
    from_split: bool,
    /// Cached totals for the current cards.
    totals: HandTotals,
}

impl Hand {
    /// Creates a new empty hand with the given bet.
    #[must_use]
    pub fn new(bet: usize) -> Self {
        Self {
            cards: Vec::new(),
            bet,
            status: HandStatus::Playing,
            outcome: HandOutcome::Undecided,
            blackjack: false,
            doubled: false,
            busted: false,
            from_split: false,
            totals: HandTotals::zero(),
        }
    }

    /// Creates a hand from a split, seeded with one card of the original
    /// pair. Split hands can never be naturals.
    #[must_use]
    pub fn from_split(card: Card, bet: usize) -> Self {
        let totals = hand_totals(&[card]);
        Self {
            cards: alloc::vec![card],
            bet,
            status: HandStatus::Playing,
            outcome: HandOutcome::Undecided,
            blackjack: false,
            doubled: false,
            busted: false,
            from_split: true,
            totals,
        }
    }

    /// Adds a card and re-evaluates the hand.
    ///
    /// Busting closes the hand as lost; reaching 21 stands automatically. A
    /// two-card natural sets the blackjack flag unless the hand came from a
    /// split.
    pub fn add_card(&mut self, card: Card) {
        self.cards.push(card);
        self.totals = hand_totals(&self.cards);

        if self.totals.best > 21 {
            self.busted = true;
            self.status = HandStatus::Done;
            self.outcome = HandOutcome::Lose;
        } else if self.totals.best == 21 {
            if !self.from_split && is_natural(&self.cards) {
                self.blackjack = true;
            }
            self.status = HandStatus::Done;
        }
    }

    /// Marks the hand as standing.
    pub const fn stand(&mut self) {
        self.status = HandStatus::Done;
    }

    /// Doubles the bet amount.
    pub const fn double_bet(&mut self) {
        self.bet *= 2;
    }

    /// Flags the hand as doubled down.
    pub const fn mark_doubled(&mut self) {
        self.doubled = true;
    }

    /// Closes the hand with a decided outcome (dealer-natural resolution).
    pub(crate) const fn resolve(&mut self, outcome: HandOutcome) {
        self.outcome = outcome;
        self.status = HandStatus::Done;
    }

    /// Settles this hand against the dealer's final hand.
    ///
    /// A no-op when the outcome is already decided, so settling twice never
    /// changes a result. Otherwise: a busted hand loses, a natural wins, a
    /// busted dealer or a higher total wins, an equal total pushes.
    pub fn settle(&mut self, dealer: &DealerHand) {
        if self.outcome != HandOutcome::Undecided {
            return;
        }

        self.outcome = if self.busted {
            HandOutcome::Lose
        } else if self.blackjack {
            HandOutcome::Win
        } else if dealer.is_busted() || self.totals.best > dealer.best_total() {
            HandOutcome::Win
        } else if self.totals.best == dealer.best_total() {
            HandOutcome::Push
        } else {
            HandOutcome::Lose
        };
    }

    /// Total amount returned to the player for this hand.
    ///
    /// A pure function of the settled outcome, the blackjack flag, and the
    /// bet. The original bet left the balance when the chips were placed, so
    /// this is the full return, not a delta: 2.5x the bet for a natural win
    /// (floored), 2x for a plain win, the bet back on a push, nothing on a
    /// loss.
    #[must_use]
    #[expect(
        clippy::cast_precision_loss,
        reason = "f64 has sufficient precision for monetary values"
    )]
    pub fn payout(&self) -> usize {
        match self.outcome {
            HandOutcome::Win if self.blackjack => floor_amount(self.bet as f64 * BLACKJACK_RETURN),
            HandOutcome::Win => self.bet * 2,
            HandOutcome::Push => self.bet,
            HandOutcome::Lose | HandOutcome::Undecided => 0,
        }
    }

    /// Returns the cards in the hand.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Returns the bet amount for this hand.
    #[must_use]
    pub const fn bet(&self) -> usize {
        self.bet
    }

    /// Returns the current status of the hand.
    #[must_use]
    pub const fn status(&self) -> HandStatus {
        self.status
    }

    /// Returns the settled outcome of the hand.
    #[must_use]
    pub const fn outcome(&self) -> HandOutcome {
        self.outcome
    }

    /// Returns whether the hand is a natural blackjack.
    #[must_use]
    pub const fn is_blackjack(&self) -> bool {
        self.blackjack
    }

    /// Returns whether the hand was doubled down.
    #[must_use]
    pub const fn is_doubled(&self) -> bool {
        self.doubled
    }

    /// Returns whether every total busts.
    #[must_use]
    pub const fn is_busted(&self) -> bool {
        self.busted
    }

    /// Returns whether this hand came from a split.
    #[must_use]
    pub const fn is_from_split(&self) -> bool {
        self.from_split
    }

    /// Returns every valid total for the hand, descending.
    #[must_use]
    pub const fn totals(&self) -> &HandTotals {
        &self.totals
    }

    /// Best valid total of the hand.
    #[must_use]
    pub const fn best_total(&self) -> u8 {
        self.totals.best
    }

    /// Returns whether the hand is a splittable pair: exactly two cards of
    /// equal blackjack value.
    #[must_use]
    pub fn can_split(&self) -> bool {
        self.cards.len() == 2 && self.cards[0].value() == self.cards[1].value()
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
}

/// The dealer's hand.
///
/// The second card dealt is the hole card and stays face-down until
/// revealed; totals over all cards are tracked separately from the face-up
/// display total.
#[derive(Debug, Clone)]
pub struct DealerHand {
    /// Cards in the hand; index 1 is the hole card.
    cards: Vec<Card>,
    /// Whether the hole card is revealed.
    hole_revealed: bool,
    /// Drawing status per the house rule.
    status: HandStatus,
    /// Whether every total busts.
    busted: bool,
    /// Cached totals over all cards, hole included.
    totals: HandTotals,
}

impl DealerHand {
    /// Creates a new empty dealer hand.
    #[must_use]
    pub fn new() -> Self {
        Self {
            cards: Vec::new(),
            hole_revealed: false,
            status: HandStatus::Playing,
            busted: false,
            totals: HandTotals::zero(),
        }
    }

    /// Adds a card and recomputes totals. Status only changes through
    /// [`DealerHand::evaluate`].
    pub fn add_card(&mut self, card: Card) {
        self.cards.push(card);
        self.totals = hand_totals(&self.cards);
    }

    /// Applies the house drawing rule.
    ///
    /// When every remaining player hand is already busted the dealer is done
    /// without drawing. Otherwise the dealer stands on any total of 17
    /// through 21 (soft 17 included) and must draw below 17.
    pub fn evaluate(&mut self, player_all_busted: bool) {
        if player_all_busted {
            self.status = HandStatus::Done;
        } else if self.totals.best > 21 {
            self.busted = true;
            self.status = HandStatus::Done;
        } else if self.totals.best >= 17 {
            self.status = HandStatus::Done;
        } else {
            self.status = HandStatus::Playing;
        }
    }

    /// Returns all cards in the hand.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Returns the visible card (first card).
    #[must_use]
    pub fn up_card(&self) -> Option<&Card> {
        self.cards.first()
    }

    /// Returns the hole card (second card), face-down until revealed.
    #[must_use]
    pub fn hole_card(&self) -> Option<&Card> {
        self.cards.get(1)
    }

    /// Returns whether the hole card is revealed.
    #[must_use]
    pub const fn is_hole_revealed(&self) -> bool {
        self.hole_revealed
    }

    /// Reveals the hole card.
    pub const fn reveal_hole(&mut self) {
        self.hole_revealed = true;
    }

    /// Cards currently showing face-up.
    #[must_use]
    pub fn face_up_cards(&self) -> &[Card] {
        if self.hole_revealed {
            &self.cards
        } else {
            &self.cards[..self.cards.len().min(1)]
        }
    }

    /// Best total over the face-up cards only, for honest presentation.
    #[must_use]
    pub fn display_total(&self) -> u8 {
        hand_totals(self.face_up_cards()).best
    }

    /// Returns every valid total over all cards, hole included.
    #[must_use]
    pub const fn totals(&self) -> &HandTotals {
        &self.totals
    }

    /// Best valid total over all cards, hole included.
    #[must_use]
    pub const fn best_total(&self) -> u8 {
        self.totals.best
    }

    /// Returns whether the hand is a natural, checking the hole card even
    /// while it is hidden.
    #[must_use]
    pub fn is_natural(&self) -> bool {
        is_natural(&self.cards)
    }

    /// Returns whether the hand is bust.
    #[must_use]
    pub const fn is_busted(&self) -> bool {
        self.busted
    }

    /// Returns the drawing status.
    #[must_use]
    pub const fn status(&self) -> HandStatus {
        self.status
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

    /// Clears the hand for a new round.
    pub fn clear(&mut self) {
        self.cards.clear();
        self.hole_revealed = false;
        self.status = HandStatus::Playing;
        self.busted = false;
        self.totals = HandTotals::zero();
    }
}

impl Default for DealerHand {
    fn default() -> Self {
        Self::new()
    }
}
