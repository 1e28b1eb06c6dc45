//! A single-player blackjack shoe and round engine with optional `no_std`
//! support.
//!
//! The crate provides a [`Table`] type that manages the full round flow:
//! chip placement, dealing, player actions (hit, stand, double, split),
//! step-wise dealer play, settlement, and payout collection against an
//! external [`CreditLedger`]. A hi-lo running count and cut-card reshuffle
//! scheduling ride along the shoe.
//!
//! # Example
//!
//! ```no_run
//! use shoejack::{Table, TableOptions};
//!
//! let options = TableOptions::default();
//! let table = Table::new(options, 42);
//! let _ = table.snapshot();
//! ```
#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]

#[cfg(all(not(feature = "std"), not(feature = "alloc")))]
compile_error!(
    "`std` is disabled but `alloc` feature is not enabled. Enable `alloc` or keep `std` enabled."
);

extern crate alloc;

pub mod card;
pub mod credits;
pub mod error;
pub mod game;
pub mod hand;
pub mod options;
pub mod result;
pub mod shoe;
pub mod snapshot;

// Re-export main types
pub use card::{Card, DECK_SIZE, Suit};
pub use credits::{CreditLedger, InMemoryLedger};
pub use error::{
    ActionError, BetError, CreditError, DealError, DealerError, EmptyShoeError, RoundError,
    SettleError,
};
pub use game::{GamePhase, Table};
pub use hand::{
    DealerHand, Hand, HandOutcome, HandStatus, HandTotals, hand_totals, is_natural,
};
pub use options::{MAX_DECKS, MIN_DECKS, TableOptions};
pub use result::{HandResult, RoundResult};
pub use shoe::{Shoe, ShoeEntry};
pub use snapshot::{DealerView, HandView, TableSnapshot};
