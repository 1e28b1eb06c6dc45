//! Error types for engine operations.
//!
//! Action-family errors are refusals: the call returns without mutating the
//! round, so a stale caller can simply ignore the error and re-read the
//! table state.

use thiserror::Error;

/// The shoe ran out of playable cards mid-draw.
///
/// Recovered inside the table by installing a fresh shoe and retrying the
/// single failed draw, so it never surfaces from round play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("shoe has no cards left to draw")]
pub struct EmptyShoeError;

/// Errors from the credits collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CreditError {
    /// No player identity is active; credit changes cannot be applied.
    #[error("no player is logged in")]
    NotLoggedIn,
}

/// Errors that can occur while placing chips.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BetError {
    /// Chips can only be placed before the deal.
    #[error("invalid game phase for placing chips")]
    InvalidState,
    /// Chip amount is zero.
    #[error("chip amount is zero")]
    ZeroChips,
    /// The balance does not cover the chips.
    #[error("insufficient credits")]
    InsufficientCredits,
    /// The credits collaborator refused the operation.
    #[error(transparent)]
    Credits(#[from] CreditError),
}

/// Errors that can occur during dealing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DealError {
    /// Invalid game phase for dealing.
    #[error("invalid game phase for dealing")]
    InvalidState,
    /// No chips in the bet circle.
    #[error("no chips in the bet circle")]
    NoBet,
}

/// Errors that can occur during player actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ActionError {
    /// Invalid game phase for this action.
    #[error("invalid game phase for this action")]
    InvalidState,
    /// The hand is not the currently selected hand.
    #[error("hand is not the selected hand")]
    NotSelectedHand,
    /// Hand not found.
    #[error("hand not found")]
    HandNotFound,
    /// The hand is no longer in play.
    #[error("hand is not in play")]
    HandNotPlaying,
    /// Cannot double down on this hand.
    #[error("cannot double down on this hand")]
    CannotDouble,
    /// Cannot split this hand.
    #[error("cannot split this hand")]
    CannotSplit,
    /// Insufficient credits for this action.
    #[error("insufficient credits for this action")]
    InsufficientCredits,
    /// The credits collaborator refused the operation.
    #[error(transparent)]
    Credits(#[from] CreditError),
}

/// Errors that can occur during the dealer's turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DealerError {
    /// Invalid game phase for dealer play.
    #[error("invalid game phase for dealer play")]
    InvalidState,
}

/// Errors that can occur during settlement and payout collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SettleError {
    /// Invalid game phase for settlement.
    #[error("invalid game phase for settlement")]
    InvalidState,
    /// The credits collaborator refused the operation.
    #[error(transparent)]
    Credits(#[from] CreditError),
}

/// Errors from round cleanup and bet-circle management.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RoundError {
    /// Invalid game phase for this transition.
    #[error("invalid game phase for this transition")]
    InvalidState,
    /// The credits collaborator refused the operation.
    #[error(transparent)]
    Credits(#[from] CreditError),
}
