//! Round settlement reports.

extern crate alloc;

use alloc::vec::Vec;

use serde::{Deserialize, Serialize};

use crate::hand::HandOutcome;

/// Settlement report for a single hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandResult {
    /// The hand index (several after splits).
    pub index: usize,
    /// The settled outcome.
    pub outcome: HandOutcome,
    /// Whether the hand was a natural blackjack.
    pub blackjack: bool,
    /// The final bet for this hand.
    pub bet: usize,
    /// The total returned to the player for this hand.
    pub payout: usize,
    /// The hand's best total.
    pub total: u8,
}

/// Settlement report for the whole round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundResult {
    /// Per-hand reports in table order.
    pub hands: Vec<HandResult>,
    /// The dealer's final best total.
    pub dealer_total: u8,
    /// Whether the dealer busted.
    pub dealer_busted: bool,
    /// Whether the dealer had a natural blackjack.
    pub dealer_blackjack: bool,
    /// Sum of all hand payouts.
    pub total_payout: usize,
    /// Payouts minus wagers (positive = profit).
    pub net: isize,
}
