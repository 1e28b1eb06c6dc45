//! The player-credits collaborator.
//!
//! The engine never computes a balance on its own: it reads the current
//! amount and writes the amount the balance should become. Whatever backs
//! the ledger (a remote profile service, local storage, a test double) is
//! outside the engine.

use crate::error::CreditError;

/// External store of the player's credit balance.
pub trait CreditLedger {
    /// Current balance.
    ///
    /// # Errors
    ///
    /// Returns [`CreditError::NotLoggedIn`] when no player identity is
    /// active; this indicates a caller bug and is never swallowed.
    fn credits(&self) -> Result<usize, CreditError>;

    /// Replaces the balance.
    ///
    /// # Errors
    ///
    /// Returns [`CreditError::NotLoggedIn`] when no player identity is
    /// active.
    fn set_credits(&mut self, amount: usize) -> Result<(), CreditError>;
}

/// In-memory ledger for tests and local play.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InMemoryLedger {
    /// Balance of the active player, `None` when signed out.
    balance: Option<usize>,
}

impl InMemoryLedger {
    /// Ledger with an active player holding `balance` credits.
    #[must_use]
    pub const fn new(balance: usize) -> Self {
        Self {
            balance: Some(balance),
        }
    }

    /// Ledger with no active player; every operation fails with
    /// [`CreditError::NotLoggedIn`].
    #[must_use]
    pub const fn signed_out() -> Self {
        Self { balance: None }
    }

    /// Current balance, if a player is active.
    #[must_use]
    pub const fn balance(&self) -> Option<usize> {
        self.balance
    }
}

impl CreditLedger for InMemoryLedger {
    fn credits(&self) -> Result<usize, CreditError> {
        self.balance.ok_or(CreditError::NotLoggedIn)
    }

    fn set_credits(&mut self, amount: usize) -> Result<(), CreditError> {
        if self.balance.is_none() {
            return Err(CreditError::NotLoggedIn);
        }
        self.balance = Some(amount);
        Ok(())
    }
}
