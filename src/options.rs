//! Table configuration options.

/// Minimum number of decks a shoe may hold.
pub const MIN_DECKS: u8 = 1;

/// Maximum number of decks a shoe may hold.
pub const MAX_DECKS: u8 = 5;

/// Configuration options for a blackjack table.
///
/// Use the builder pattern to customize options:
///
/// ```
/// use shoejack::TableOptions;
///
/// let options = TableOptions::default()
///     .with_deck_count(4)
///     .with_cut_card(false);
/// ```
///
/// Changing options on a running table requires a full shoe rebuild and
/// round reset; see [`crate::Table::reconfigure`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableOptions {
    /// Number of decks in the shoe, clamped to
    /// [`MIN_DECKS`]..=[`MAX_DECKS`].
    pub deck_count: u8,
    /// Whether a cut card is inserted to schedule reshuffles.
    pub include_cut_card: bool,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            deck_count: 2,
            include_cut_card: true,
        }
    }
}

impl TableOptions {
    /// Sets the number of decks, clamped to the supported range.
    ///
    /// # Example
    ///
    /// ```
    /// use shoejack::TableOptions;
    ///
    /// let options = TableOptions::default().with_deck_count(9);
    /// assert_eq!(options.deck_count, 5);
    /// ```
    #[must_use]
    pub const fn with_deck_count(mut self, decks: u8) -> Self {
        self.deck_count = if decks < MIN_DECKS {
            MIN_DECKS
        } else if decks > MAX_DECKS {
            MAX_DECKS
        } else {
            decks
        };
        self
    }

    /// Sets whether the shoe includes a cut card.
    ///
    /// # Example
    ///
    /// ```
    /// use shoejack::TableOptions;
    ///
    /// let options = TableOptions::default().with_cut_card(false);
    /// assert!(!options.include_cut_card);
    /// ```
    #[must_use]
    pub const fn with_cut_card(mut self, include: bool) -> Self {
        self.include_cut_card = include;
        self
    }
}
