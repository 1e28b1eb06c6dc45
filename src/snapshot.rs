//! Presentation snapshot of the table.
//!
//! Captured after any engine call and handed to the rendering layer. The
//! dealer view carries face-up cards only, so presentation cannot leak the
//! hole card.

extern crate alloc;

use alloc::vec::Vec;

use serde::Serialize;

use crate::card::Card;
use crate::game::{GamePhase, Table};
use crate::hand::{DealerHand, Hand, HandOutcome, HandStatus, HandTotals};

/// Renderable view of a player hand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HandView {
    /// Cards in the hand.
    pub cards: Vec<Card>,
    /// Every valid total, descending.
    pub totals: HandTotals,
    /// Bet riding on the hand.
    pub bet: usize,
    /// Current status.
    pub status: HandStatus,
    /// Settled outcome.
    pub outcome: HandOutcome,
    /// Whether the hand is a natural blackjack.
    pub blackjack: bool,
    /// Whether the hand was doubled down.
    pub doubled: bool,
    /// Whether the hand busted.
    pub busted: bool,
    /// Total owed to the player (zero until settled).
    pub payout: usize,
}

impl HandView {
    fn from_hand(hand: &Hand) -> Self {
        Self {
            cards: hand.cards().to_vec(),
            totals: hand.totals().clone(),
            bet: hand.bet(),
            status: hand.status(),
            outcome: hand.outcome(),
            blackjack: hand.is_blackjack(),
            doubled: hand.is_doubled(),
            busted: hand.is_busted(),
            payout: hand.payout(),
        }
    }
}

/// Renderable view of the dealer's hand; face-down cards never appear.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DealerView {
    /// Face-up cards only.
    pub cards: Vec<Card>,
    /// Number of cards still face-down.
    pub hidden_cards: usize,
    /// Best total over the face-up cards only.
    pub display_total: u8,
}

impl DealerView {
    fn from_dealer(dealer: &DealerHand) -> Self {
        let cards: Vec<Card> = dealer.face_up_cards().to_vec();
        Self {
            hidden_cards: dealer.len() - cards.len(),
            display_total: dealer.display_total(),
            cards,
        }
    }
}

/// Everything the presentation layer needs after an engine call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableSnapshot {
    /// Current phase.
    pub phase: GamePhase,
    /// Total wager at risk.
    pub bet_circle: usize,
    /// Index of the hand whose turn it is.
    pub selected_hand: usize,
    /// Player hands in table order.
    pub hands: Vec<HandView>,
    /// Dealer hand, face-up cards only.
    pub dealer: DealerView,
    /// Hi-lo running count.
    pub running_count: i32,
    /// Running count normalized by decks remaining.
    pub true_count: i32,
    /// Playable cards left in the shoe.
    pub cards_remaining: usize,
}

impl TableSnapshot {
    pub(crate) fn capture(table: &Table) -> Self {
        Self {
            phase: table.phase(),
            bet_circle: table.bet_circle(),
            selected_hand: table.selected_hand(),
            hands: table.hands().iter().map(HandView::from_hand).collect(),
            dealer: DealerView::from_dealer(table.dealer()),
            running_count: table.running_count(),
            true_count: table.true_count(),
            cards_remaining: table.cards_remaining(),
        }
    }
}
