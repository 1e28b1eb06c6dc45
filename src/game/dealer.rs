use alloc::vec::Vec;

use crate::card::Card;
use crate::credits::CreditLedger;
use crate::error::{DealerError, RoundError, SettleError};
use crate::hand::{Hand, HandStatus};
use crate::result::{HandResult, RoundResult};

use super::{GamePhase, Table};

impl Table {
    /// Checks whether every player hand has busted.
    fn player_all_busted(&self) -> bool {
        !self.hands.is_empty() && self.hands.iter().all(Hand::is_busted)
    }

    /// Advances the dealer by at most one draw.
    ///
    /// The first call reveals the hole card (feeding it into the running
    /// count). The house rule then applies: the dealer is done immediately
    /// when every player hand has busted, stands on 17 through 21 (soft 17
    /// included), and otherwise draws exactly one card per call. Once the
    /// dealer is done the phase moves to settlement.
    ///
    /// Designed to be called repeatedly by a driver so presentation can
    /// pace each draw; a tight loop produces identical results. Returns the
    /// card drawn by this call, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the table is not in the dealer-turn phase.
    pub fn dealer_step(&mut self) -> Result<Option<Card>, DealerError> {
        if self.phase() != GamePhase::DealerTurn {
            return Err(DealerError::InvalidState);
        }

        if !self.dealer.is_hole_revealed() {
            self.dealer.reveal_hole();
            if let Some(&hole) = self.dealer.hole_card() {
                self.expose(hole);
            }
        }

        let all_busted = self.player_all_busted();

        self.dealer.evaluate(all_busted);
        if self.dealer.status() == HandStatus::Done {
            self.set_phase(GamePhase::SettlingHands);
            return Ok(None);
        }

        let card = self.draw_exposed();
        self.dealer.add_card(card);
        self.dealer.evaluate(all_busted);
        if self.dealer.status() == HandStatus::Done {
            self.set_phase(GamePhase::SettlingHands);
        }

        Ok(Some(card))
    }

    /// Settles every hand against the dealer's final hand and reports the
    /// round.
    ///
    /// Hands whose outcome was pre-resolved at the deal keep it; settlement
    /// only fills outcomes still undecided.
    ///
    /// # Errors
    ///
    /// Returns an error if the table is not in the settling phase.
    #[expect(
        clippy::cast_possible_wrap,
        reason = "payout values fit in isize"
    )]
    pub fn settle_hands(&mut self) -> Result<RoundResult, SettleError> {
        if self.phase() != GamePhase::SettlingHands {
            return Err(SettleError::InvalidState);
        }

        for hand in &mut self.hands {
            hand.settle(&self.dealer);
        }

        let hands: Vec<HandResult> = self
            .hands
            .iter()
            .enumerate()
            .map(|(index, hand)| HandResult {
                index,
                outcome: hand.outcome(),
                blackjack: hand.is_blackjack(),
                bet: hand.bet(),
                payout: hand.payout(),
                total: hand.best_total(),
            })
            .collect();

        let total_payout: usize = hands.iter().map(|hand| hand.payout).sum();
        let net = total_payout as isize - self.bet_circle as isize;

        self.set_phase(GamePhase::Results);

        Ok(RoundResult {
            hands,
            dealer_total: self.dealer.best_total(),
            dealer_busted: self.dealer.is_busted(),
            dealer_blackjack: self.dealer.is_natural(),
            total_payout,
            net,
        })
    }

    /// Credits the round's payouts to the player's balance.
    ///
    /// A zero payout still writes the balance back so the collaborator
    /// reconciles any drift. Returns the total credited.
    ///
    /// # Errors
    ///
    /// Returns an error if the table is not in the results phase or the
    /// ledger has no active player.
    pub fn collect_payouts(&mut self, ledger: &mut dyn CreditLedger) -> Result<usize, SettleError> {
        if self.phase() != GamePhase::Results {
            return Err(SettleError::InvalidState);
        }

        let total: usize = self.hands.iter().map(Hand::payout).sum();
        let balance = ledger.credits()?;
        ledger.set_credits(balance + total)?;

        self.set_phase(GamePhase::PostRound);
        Ok(total)
    }

    /// Ends the round: clears the table and performs a reshuffle deferred
    /// by a crossed cut card.
    ///
    /// Reshuffles happen only here, between rounds -- every card dealt
    /// within a round comes from one physical shoe even when the marker was
    /// crossed mid-hand.
    ///
    /// # Errors
    ///
    /// Returns an error if the table is not in the post-round phase.
    pub fn end_round(&mut self) -> Result<(), RoundError> {
        if self.phase() != GamePhase::PostRound {
            return Err(RoundError::InvalidState);
        }

        self.set_phase(GamePhase::EndRound);
        self.reset_round_state();

        if self.shoe.cut_card_seen() {
            log::debug!("cut card was crossed; reshuffling between rounds");
            self.install_fresh_shoe();
        }

        self.set_phase(GamePhase::PreDeal);
        Ok(())
    }
}
