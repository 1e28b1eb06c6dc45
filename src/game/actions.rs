use crate::card::Card;
use crate::credits::CreditLedger;
use crate::error::{ActionError, BetError, DealError, RoundError};
use crate::hand::{Hand, HandOutcome, HandStatus};

use super::{GamePhase, Table};

impl Table {
    /// Adds chips to the bet circle, deducting them from the ledger.
    ///
    /// Chips leave the balance as they are placed; [`Table::deal`] consumes
    /// the accumulated circle without touching credits again.
    ///
    /// # Errors
    ///
    /// Returns an error if the table is not in the pre-deal phase, the
    /// amount is zero, the balance does not cover it, or the ledger has no
    /// active player.
    pub fn place_chips(
        &mut self,
        amount: usize,
        ledger: &mut dyn CreditLedger,
    ) -> Result<(), BetError> {
        if self.phase() != GamePhase::PreDeal {
            return Err(BetError::InvalidState);
        }
        if amount == 0 {
            return Err(BetError::ZeroChips);
        }

        let balance = ledger.credits()?;
        if balance < amount {
            return Err(BetError::InsufficientCredits);
        }
        ledger.set_credits(balance - amount)?;

        self.bet_circle += amount;
        Ok(())
    }

    /// Abandons the round, returning the bet circle to the balance.
    ///
    /// For the user-confirmed exit path; abandonment without refund is
    /// [`Table::clear_bet_forfeit`]. Which policy applies is the caller's
    /// decision. Only legal before the dealer's turn.
    ///
    /// # Errors
    ///
    /// Returns an error if the round has progressed past the player's turn
    /// or the ledger has no active player.
    pub fn clear_bet_refund(&mut self, ledger: &mut dyn CreditLedger) -> Result<(), RoundError> {
        if !self.round_abandonable() {
            return Err(RoundError::InvalidState);
        }

        let balance = ledger.credits()?;
        ledger.set_credits(balance + self.bet_circle)?;

        self.reset_round_state();
        self.set_phase(GamePhase::PreDeal);
        Ok(())
    }

    /// Abandons the round, forfeiting the bet circle.
    ///
    /// # Errors
    ///
    /// Returns an error if the round has progressed past the player's turn.
    pub fn clear_bet_forfeit(&mut self) -> Result<(), RoundError> {
        if !self.round_abandonable() {
            return Err(RoundError::InvalidState);
        }

        self.reset_round_state();
        self.set_phase(GamePhase::PreDeal);
        Ok(())
    }

    fn round_abandonable(&self) -> bool {
        matches!(self.phase(), GamePhase::PreDeal | GamePhase::PlayerTurn)
    }

    /// Deals the initial round from the accumulated bet circle.
    ///
    /// Draw order is strictly player, dealer up card, player, dealer hole
    /// card; the hole stays out of the running count until revealed. A
    /// dealer natural reveals the hole immediately and resolves the player
    /// hand (push against a player natural, loss otherwise), jumping to
    /// settlement. A player natural skips the player turn.
    ///
    /// # Errors
    ///
    /// Returns an error if the table is not in the pre-deal phase or the
    /// bet circle is empty.
    pub fn deal(&mut self) -> Result<(), DealError> {
        if self.phase() != GamePhase::PreDeal {
            return Err(DealError::InvalidState);
        }
        if self.bet_circle == 0 {
            return Err(DealError::NoBet);
        }

        self.set_phase(GamePhase::Dealing);

        let mut hand = Hand::new(self.bet_circle);
        let first = self.draw_exposed();
        hand.add_card(first);

        let up = self.draw_exposed();
        self.dealer.add_card(up);

        let second = self.draw_exposed();
        hand.add_card(second);

        let hole = self.draw_card();
        self.dealer.add_card(hole);

        self.hands.clear();
        self.hands.push(hand);
        self.selected_hand = 0;

        if self.dealer.is_natural() {
            // Hole comes up immediately; nobody gets to act.
            self.dealer.reveal_hole();
            self.expose(hole);
            self.dealer.evaluate(false);

            let outcome = if self.hands[0].is_blackjack() {
                HandOutcome::Push
            } else {
                HandOutcome::Lose
            };
            self.hands[0].resolve(outcome);
            self.set_phase(GamePhase::SettlingHands);
        } else if self.hands[0].is_blackjack() {
            self.set_phase(GamePhase::DealerTurn);
        } else {
            self.set_phase(GamePhase::PlayerTurn);
        }

        Ok(())
    }

    fn ensure_action(&self, index: usize) -> Result<(), ActionError> {
        if self.phase() != GamePhase::PlayerTurn {
            return Err(ActionError::InvalidState);
        }
        if index != self.selected_hand {
            return Err(ActionError::NotSelectedHand);
        }
        let hand = self.hands.get(index).ok_or(ActionError::HandNotFound)?;
        if hand.status() != HandStatus::Playing {
            return Err(ActionError::HandNotPlaying);
        }
        Ok(())
    }

    /// Player action: hit the selected hand. Returns the drawn card.
    ///
    /// The hand may close on a bust or on reaching 21, in which case the
    /// turn advances.
    ///
    /// # Errors
    ///
    /// Refused (without touching the round) when the phase is wrong, the
    /// hand is not the selected one, or the hand is no longer in play.
    pub fn hit(&mut self, index: usize) -> Result<Card, ActionError> {
        self.ensure_action(index)?;

        let card = self.draw_exposed();
        self.hands[index].add_card(card);
        self.advance_if_selected_done();

        Ok(card)
    }

    /// Player action: stand on the selected hand.
    ///
    /// # Errors
    ///
    /// Refused under the same conditions as [`Table::hit`].
    pub fn stay(&mut self, index: usize) -> Result<(), ActionError> {
        self.ensure_action(index)?;

        self.hands[index].stand();
        self.advance_if_selected_done();

        Ok(())
    }

    /// Player action: double down on the selected hand.
    ///
    /// Doubles the bet (paid through the ledger), draws exactly one card,
    /// and closes the hand whatever the total. Returns the drawn card.
    ///
    /// # Errors
    ///
    /// Refused when the action validation fails, the hand holds more than
    /// its first two cards, or the balance does not cover the second bet.
    pub fn double(
        &mut self,
        index: usize,
        ledger: &mut dyn CreditLedger,
    ) -> Result<Card, ActionError> {
        self.ensure_action(index)?;

        if self.hands[index].len() != 2 {
            return Err(ActionError::CannotDouble);
        }

        let bet = self.hands[index].bet();
        let balance = ledger.credits()?;
        if balance < bet {
            return Err(ActionError::InsufficientCredits);
        }
        ledger.set_credits(balance - bet)?;

        let card = self.draw_exposed();
        let hand = &mut self.hands[index];
        hand.double_bet();
        hand.add_card(card);
        hand.stand();
        hand.mark_doubled();

        self.bet_circle = self.hands.iter().map(Hand::bet).sum();
        self.advance_if_selected_done();

        Ok(card)
    }

    /// Player action: split a pair into two independently playable hands.
    ///
    /// Each daughter hand keeps one original card, draws one fresh card,
    /// and carries the original bet -- two bets of the original size, not a
    /// doubled one. A daughter reaching 21 on its two cards stands but is
    /// not a natural. The daughters take the original hand's place in index
    /// order; the turn stays on the first of them.
    ///
    /// # Errors
    ///
    /// Refused when the action validation fails, the hand is not a pair of
    /// equal value, or the balance does not cover the second bet.
    pub fn split(
        &mut self,
        index: usize,
        ledger: &mut dyn CreditLedger,
    ) -> Result<(), ActionError> {
        self.ensure_action(index)?;

        if !self.hands[index].can_split() {
            return Err(ActionError::CannotSplit);
        }

        let bet = self.hands[index].bet();
        let balance = ledger.credits()?;
        if balance < bet {
            return Err(ActionError::InsufficientCredits);
        }
        ledger.set_credits(balance - bet)?;

        let pair = [self.hands[index].cards()[0], self.hands[index].cards()[1]];
        let card_a = self.draw_exposed();
        let card_b = self.draw_exposed();

        let mut first = Hand::from_split(pair[0], bet);
        first.add_card(card_a);
        let mut second = Hand::from_split(pair[1], bet);
        second.add_card(card_b);

        self.hands[index] = first;
        self.hands.insert(index + 1, second);

        self.bet_circle = self.hands.iter().map(Hand::bet).sum();
        self.advance_if_selected_done();

        Ok(())
    }

    /// Moves the selection to the next hand still in play, by index order,
    /// or hands the round to the dealer when none remains.
    pub(super) fn advance_if_selected_done(&mut self) {
        while self.selected_hand < self.hands.len()
            && self.hands[self.selected_hand].status() != HandStatus::Playing
        {
            self.selected_hand += 1;
        }

        if self.selected_hand >= self.hands.len() {
            self.selected_hand = 0;
            self.set_phase(GamePhase::DealerTurn);
        }
    }
}
