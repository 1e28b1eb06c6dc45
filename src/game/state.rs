//! Round phase types.

use serde::{Deserialize, Serialize};

/// Phase progression of a round.
///
/// The loop is `PreDeal` -> `Dealing` -> `PlayerTurn` -> `DealerTurn` ->
/// `SettlingHands` -> `Results` -> `PostRound` -> `EndRound` -> `PreDeal`.
/// Naturals at the deal can skip `PlayerTurn` or jump straight to
/// `SettlingHands`. `Dealing` and `EndRound` are transient: entered and
/// resolved within a single call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Chips may be placed; no cards are out.
    PreDeal,
    /// Initial cards are being drawn.
    Dealing,
    /// The selected hand may act.
    PlayerTurn,
    /// The dealer draws, one card per driver call.
    DealerTurn,
    /// Hands are compared against the dealer.
    SettlingHands,
    /// Outcomes are final; payouts await collection.
    Results,
    /// Payouts are collected; waiting for acknowledgement.
    PostRound,
    /// Cleanup before the next round.
    EndRound,
}
