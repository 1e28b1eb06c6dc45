//! Full round-flow integration tests.

use shoejack::{
    ActionError, BetError, Card, CreditError, CreditLedger, DealError, DealerError, GamePhase,
    HandOutcome, HandStatus, InMemoryLedger, RoundError, Shoe, Suit, Table, TableOptions,
};

fn rigged_shoe(ranks: &[u8]) -> Shoe {
    let cards: Vec<Card> = ranks
        .iter()
        .enumerate()
        .map(|(index, &rank)| Card::new(index as u32, Suit::Hearts, rank))
        .collect();
    Shoe::from_draw_order(&cards)
}

fn table_with_draws(ranks: &[u8]) -> Table {
    let mut table = Table::new(TableOptions::default(), 1);
    table.shoe = rigged_shoe(ranks);
    table
}

fn run_dealer(table: &mut Table) {
    while table.phase() == GamePhase::DealerTurn {
        table.dealer_step().unwrap();
    }
}

/// Ledger that counts balance writes, for reconciliation checks.
struct RecordingLedger {
    balance: usize,
    writes: usize,
}

impl CreditLedger for RecordingLedger {
    fn credits(&self) -> Result<usize, CreditError> {
        Ok(self.balance)
    }

    fn set_credits(&mut self, amount: usize) -> Result<(), CreditError> {
        self.balance = amount;
        self.writes += 1;
        Ok(())
    }
}

#[test]
fn player_natural_beats_dealer_seventeen() {
    let mut ledger = InMemoryLedger::new(500);
    let mut table = table_with_draws(&[
        1,  // player
        9,  // dealer up
        13, // player
        8,  // dealer hole
    ]);

    table.place_chips(100, &mut ledger).unwrap();
    assert_eq!(ledger.balance(), Some(400));

    table.deal().unwrap();

    // Player natural: no player turn is offered.
    assert_eq!(table.phase(), GamePhase::DealerTurn);
    assert_eq!(table.hands()[0].status(), HandStatus::Done);
    assert!(table.hands()[0].is_blackjack());
    assert_eq!(table.hit(0).unwrap_err(), ActionError::InvalidState);

    // Dealer stands on 17 without drawing.
    assert_eq!(table.dealer_step().unwrap(), None);
    assert_eq!(table.phase(), GamePhase::SettlingHands);
    assert_eq!(table.dealer().len(), 2);

    let result = table.settle_hands().unwrap();
    assert_eq!(result.hands[0].outcome, HandOutcome::Win);
    assert!(result.hands[0].blackjack);
    assert_eq!(result.hands[0].payout, 250);
    assert_eq!(result.dealer_total, 17);
    assert!(!result.dealer_blackjack);
    assert_eq!(result.net, 150);

    let collected = table.collect_payouts(&mut ledger).unwrap();
    assert_eq!(collected, 250);
    assert_eq!(ledger.balance(), Some(650));

    table.end_round().unwrap();
    assert_eq!(table.phase(), GamePhase::PreDeal);
    assert!(table.hands().is_empty());
    assert_eq!(table.bet_circle(), 0);
}

#[test]
fn dealer_natural_resolves_the_round_at_the_deal() {
    let mut ledger = InMemoryLedger::new(500);
    let mut table = table_with_draws(&[9, 1, 7, 13]);

    table.place_chips(100, &mut ledger).unwrap();
    table.deal().unwrap();

    // Straight to settlement with the hole face-up.
    assert_eq!(table.phase(), GamePhase::SettlingHands);
    assert!(table.dealer().is_hole_revealed());
    assert!(table.dealer().is_natural());
    assert_eq!(table.hands()[0].status(), HandStatus::Done);
    assert_eq!(table.hands()[0].outcome(), HandOutcome::Lose);
    assert_eq!(table.hit(0).unwrap_err(), ActionError::InvalidState);

    let result = table.settle_hands().unwrap();
    assert!(result.dealer_blackjack);
    assert_eq!(result.hands[0].outcome, HandOutcome::Lose);
    assert_eq!(result.hands[0].payout, 0);

    table.collect_payouts(&mut ledger).unwrap();
    assert_eq!(ledger.balance(), Some(400));
}

#[test]
fn matching_naturals_push() {
    let mut ledger = InMemoryLedger::new(500);
    let mut table = table_with_draws(&[1, 1, 13, 13]);

    table.place_chips(100, &mut ledger).unwrap();
    table.deal().unwrap();

    assert_eq!(table.phase(), GamePhase::SettlingHands);
    assert_eq!(table.hands()[0].outcome(), HandOutcome::Push);

    let result = table.settle_hands().unwrap();
    assert_eq!(result.hands[0].payout, 100);

    table.collect_payouts(&mut ledger).unwrap();
    assert_eq!(ledger.balance(), Some(500));
}

#[test]
fn split_makes_two_independent_hands_with_the_original_bet() {
    let mut ledger = InMemoryLedger::new(500);
    let mut table = table_with_draws(&[
        8,  // player
        5,  // dealer up
        8,  // player
        9,  // dealer hole
        2,  // first daughter draw
        3,  // second daughter draw
        10, // hit on first daughter
        10, // hit on second daughter
        4,  // dealer draw
    ]);

    table.place_chips(50, &mut ledger).unwrap();
    table.deal().unwrap();
    assert_eq!(table.phase(), GamePhase::PlayerTurn);

    table.split(0, &mut ledger).unwrap();
    assert_eq!(ledger.balance(), Some(400));
    assert_eq!(table.bet_circle(), 100);
    assert_eq!(table.hands().len(), 2);
    assert_eq!(table.selected_hand(), 0);
    for hand in table.hands() {
        assert_eq!(hand.len(), 2);
        assert_eq!(hand.bet(), 50);
        assert_eq!(hand.status(), HandStatus::Playing);
        assert!(hand.is_from_split());
    }

    // First daughter: 8+2, hit to 20, stand.
    table.hit(0).unwrap();
    table.stay(0).unwrap();
    assert_eq!(table.selected_hand(), 1);

    // Second daughter: 8+3, hit to 21 stands automatically.
    table.hit(1).unwrap();
    assert_eq!(table.phase(), GamePhase::DealerTurn);

    run_dealer(&mut table);
    let result = table.settle_hands().unwrap();

    // Dealer 5+9+4 = 18; both hands win at 2x, the 21 is no natural.
    assert_eq!(result.dealer_total, 18);
    assert_eq!(result.hands[0].payout, 100);
    assert_eq!(result.hands[1].payout, 100);
    assert!(!result.hands[1].blackjack);

    table.collect_payouts(&mut ledger).unwrap();
    assert_eq!(ledger.balance(), Some(600));
}

#[test]
fn split_aces_making_21_pay_as_plain_wins() {
    let mut ledger = InMemoryLedger::new(500);
    let mut table = table_with_draws(&[
        1,  // player
        10, // dealer up
        1,  // player
        8,  // dealer hole
        13, // first daughter draw
        12, // second daughter draw
    ]);

    table.place_chips(50, &mut ledger).unwrap();
    table.deal().unwrap();

    table.split(0, &mut ledger).unwrap();

    // Both daughters stand on 21 and the turn moves to the dealer.
    assert_eq!(table.phase(), GamePhase::DealerTurn);
    for hand in table.hands() {
        assert_eq!(hand.best_total(), 21);
        assert_eq!(hand.status(), HandStatus::Done);
        assert!(!hand.is_blackjack());
    }

    run_dealer(&mut table);
    let result = table.settle_hands().unwrap();
    assert_eq!(result.dealer_total, 18);
    assert_eq!(result.hands[0].payout, 100);
    assert_eq!(result.hands[1].payout, 100);
    assert_eq!(result.total_payout, 200);
}

#[test]
fn double_down_takes_one_card_and_doubles_the_wager() {
    let mut ledger = InMemoryLedger::new(500);
    let mut table = table_with_draws(&[5, 9, 6, 8, 10]);

    table.place_chips(100, &mut ledger).unwrap();
    table.deal().unwrap();

    let card = table.double(0, &mut ledger).unwrap();
    assert_eq!(card.rank, 10);
    assert_eq!(ledger.balance(), Some(300));

    let hand = &table.hands()[0];
    assert_eq!(hand.bet(), 200);
    assert_eq!(hand.len(), 3);
    assert!(hand.is_doubled());
    assert_eq!(hand.status(), HandStatus::Done);
    assert_eq!(table.bet_circle(), 200);
    assert_eq!(table.phase(), GamePhase::DealerTurn);

    run_dealer(&mut table);
    let result = table.settle_hands().unwrap();
    assert_eq!(result.hands[0].payout, 400);

    table.collect_payouts(&mut ledger).unwrap();
    assert_eq!(ledger.balance(), Some(700));
}

#[test]
fn double_down_bust_stays_closed_and_loses() {
    let mut ledger = InMemoryLedger::new(500);
    let mut table = table_with_draws(&[10, 9, 6, 8, 10]);

    table.place_chips(100, &mut ledger).unwrap();
    table.deal().unwrap();

    table.double(0, &mut ledger).unwrap();
    let hand = &table.hands()[0];
    assert!(hand.is_busted());
    assert_eq!(hand.outcome(), HandOutcome::Lose);

    run_dealer(&mut table);
    let result = table.settle_hands().unwrap();
    assert_eq!(result.hands[0].payout, 0);
    assert_eq!(result.net, -200);
}

#[test]
fn busting_every_hand_short_circuits_the_dealer() {
    let mut ledger = InMemoryLedger::new(500);
    let mut table = table_with_draws(&[10, 5, 6, 9, 10]);

    table.place_chips(100, &mut ledger).unwrap();
    table.deal().unwrap();

    table.hit(0).unwrap();
    assert!(table.hands()[0].is_busted());
    assert_eq!(table.phase(), GamePhase::DealerTurn);

    // Dealer sits on 14 but is done without drawing.
    assert_eq!(table.dealer_step().unwrap(), None);
    assert_eq!(table.dealer().len(), 2);
    assert_eq!(table.phase(), GamePhase::SettlingHands);

    let result = table.settle_hands().unwrap();
    assert_eq!(result.hands[0].outcome, HandOutcome::Lose);
}

#[test]
fn actions_outside_their_phase_are_refused() {
    let mut ledger = InMemoryLedger::new(500);
    let mut table = table_with_draws(&[10, 9, 7, 8]);

    assert_eq!(table.hit(0).unwrap_err(), ActionError::InvalidState);
    assert_eq!(table.deal().unwrap_err(), DealError::NoBet);
    assert_eq!(
        table.place_chips(0, &mut ledger).unwrap_err(),
        BetError::ZeroChips
    );
    assert_eq!(
        table.place_chips(600, &mut ledger).unwrap_err(),
        BetError::InsufficientCredits
    );

    table.place_chips(100, &mut ledger).unwrap();
    table.deal().unwrap();

    assert_eq!(
        table.place_chips(50, &mut ledger).unwrap_err(),
        BetError::InvalidState
    );
    assert_eq!(table.deal().unwrap_err(), DealError::InvalidState);
    assert_eq!(table.hit(1).unwrap_err(), ActionError::NotSelectedHand);
    assert_eq!(
        table.split(0, &mut ledger).unwrap_err(),
        ActionError::CannotSplit
    );
    assert_eq!(table.dealer_step().unwrap_err(), DealerError::InvalidState);
}

#[test]
fn refused_double_leaves_the_round_untouched() {
    // Chips consume the whole balance, so the double cannot be funded.
    let mut ledger = InMemoryLedger::new(100);
    let mut table = table_with_draws(&[5, 9, 6, 8, 4]);

    table.place_chips(100, &mut ledger).unwrap();
    table.deal().unwrap();

    assert_eq!(
        table.double(0, &mut ledger).unwrap_err(),
        ActionError::InsufficientCredits
    );
    assert_eq!(table.phase(), GamePhase::PlayerTurn);
    assert_eq!(table.hands()[0].len(), 2);
    assert_eq!(table.hands()[0].bet(), 100);
    assert_eq!(ledger.balance(), Some(0));

    // Doubling after a hit is likewise refused.
    table.hit(0).unwrap();
    assert_eq!(
        table.double(0, &mut ledger).unwrap_err(),
        ActionError::CannotDouble
    );
}

#[test]
fn running_count_tracks_exposed_cards_only() {
    let mut ledger = InMemoryLedger::new(500);
    let mut table = table_with_draws(&[2, 13, 5, 9]);

    table.place_chips(10, &mut ledger).unwrap();
    table.deal().unwrap();

    // 2 (+1), king (-1), 5 (+1); the hole card 9 is still face-down.
    assert_eq!(table.running_count(), 1);
    assert_eq!(table.snapshot().running_count, 1);

    table.stay(0).unwrap();
    run_dealer(&mut table);

    // Hole revealed: 9 tags zero; dealer stood on 19.
    assert_eq!(table.running_count(), 1);
    assert_eq!(table.dealer().len(), 2);

    // Rigged shoe is empty, so the decks-remaining estimate floors at one.
    assert_eq!(table.true_count(), 1);
}

#[test]
fn snapshot_never_leaks_the_hole_card() {
    let mut ledger = InMemoryLedger::new(500);
    let mut table = table_with_draws(&[10, 9, 7, 8]);

    table.place_chips(100, &mut ledger).unwrap();
    table.deal().unwrap();

    let snapshot = table.snapshot();
    assert_eq!(snapshot.phase, GamePhase::PlayerTurn);
    assert_eq!(snapshot.dealer.cards.len(), 1);
    assert_eq!(snapshot.dealer.hidden_cards, 1);
    assert_eq!(snapshot.dealer.display_total, 9);
    assert_eq!(snapshot.hands.len(), 1);
    assert_eq!(snapshot.bet_circle, 100);

    table.stay(0).unwrap();
    run_dealer(&mut table);

    let snapshot = table.snapshot();
    assert_eq!(snapshot.dealer.hidden_cards, 0);
    assert_eq!(snapshot.dealer.display_total, 17);
}

#[test]
fn cut_card_defers_the_reshuffle_to_end_round() {
    let options = TableOptions::default().with_deck_count(1);
    let mut table = Table::new(options, 9);
    let mut ledger = InMemoryLedger::new(500);

    // Burn through the shoe until the marker is crossed.
    while !table.shoe.cut_card_seen() {
        table.shoe.draw().unwrap();
    }

    table.place_chips(10, &mut ledger).unwrap();
    table.deal().unwrap();
    assert!(table.shoe.cut_card_seen());

    // The round continues uninterrupted on the same shoe.
    let before = table.cards_remaining();
    if table.phase() == GamePhase::PlayerTurn {
        table.stay(0).unwrap();
    }
    run_dealer(&mut table);
    assert!(table.cards_remaining() <= before);

    table.settle_hands().unwrap();
    table.collect_payouts(&mut ledger).unwrap();

    // Only end_round swaps the shoe and resets the count.
    table.end_round().unwrap();
    assert!(!table.shoe.cut_card_seen());
    assert_eq!(table.cards_remaining(), 52);
    assert_eq!(table.running_count(), 0);
    assert_eq!(table.phase(), GamePhase::PreDeal);
}

#[test]
fn exhausted_shoe_recovers_mid_round() {
    let mut ledger = InMemoryLedger::new(500);
    // Exactly the four cards for the deal; the hit must force a rebuild.
    let mut table = table_with_draws(&[10, 9, 6, 8]);

    table.place_chips(100, &mut ledger).unwrap();
    table.deal().unwrap();
    assert_eq!(table.cards_remaining(), 0);

    let card = table.hit(0).unwrap();
    assert_eq!(table.hands()[0].len(), 3);

    // A fresh two-deck shoe was installed and the count restarted with the
    // single retried draw.
    assert_eq!(table.cards_remaining(), 2 * 52 - 1);
    assert_eq!(table.running_count(), card.counting_tag());
}

#[test]
fn signed_out_ledger_surfaces_not_logged_in() {
    let mut ledger = InMemoryLedger::signed_out();
    let mut table = table_with_draws(&[10, 9, 7, 8]);

    assert_eq!(
        table.place_chips(100, &mut ledger).unwrap_err(),
        BetError::Credits(CreditError::NotLoggedIn)
    );
    assert_eq!(table.bet_circle(), 0);
}

#[test]
fn losing_round_still_reconciles_the_balance() {
    let mut ledger = RecordingLedger {
        balance: 500,
        writes: 0,
    };
    let mut table = table_with_draws(&[10, 8, 7, 10]);

    table.place_chips(100, &mut ledger).unwrap();
    assert_eq!(ledger.writes, 1);

    table.deal().unwrap();
    table.stay(0).unwrap();
    run_dealer(&mut table);
    table.settle_hands().unwrap();

    let collected = table.collect_payouts(&mut ledger).unwrap();
    assert_eq!(collected, 0);
    // Zero payout still writes the balance back.
    assert_eq!(ledger.writes, 2);
    assert_eq!(ledger.balance, 400);
}

#[test]
fn abandoning_before_the_deal_refunds_the_circle() {
    let mut ledger = InMemoryLedger::new(500);
    let mut table = table_with_draws(&[10, 9, 7, 8]);

    table.place_chips(30, &mut ledger).unwrap();
    table.place_chips(20, &mut ledger).unwrap();
    assert_eq!(table.bet_circle(), 50);
    assert_eq!(ledger.balance(), Some(450));

    table.clear_bet_refund(&mut ledger).unwrap();
    assert_eq!(table.bet_circle(), 0);
    assert_eq!(ledger.balance(), Some(500));
    assert_eq!(table.phase(), GamePhase::PreDeal);
}

#[test]
fn abandoning_mid_turn_can_forfeit_but_not_after_the_dealer_acts() {
    let mut ledger = InMemoryLedger::new(500);
    let mut table = table_with_draws(&[10, 9, 7, 8]);

    table.place_chips(100, &mut ledger).unwrap();
    table.deal().unwrap();
    assert_eq!(table.phase(), GamePhase::PlayerTurn);

    table.clear_bet_forfeit().unwrap();
    assert_eq!(table.phase(), GamePhase::PreDeal);
    assert!(table.hands().is_empty());
    assert_eq!(ledger.balance(), Some(400));

    // A new round that reached the dealer can no longer be abandoned.
    let mut table = table_with_draws(&[10, 9, 7, 8]);
    table.place_chips(100, &mut ledger).unwrap();
    table.deal().unwrap();
    table.stay(0).unwrap();
    assert_eq!(table.phase(), GamePhase::DealerTurn);
    assert_eq!(table.clear_bet_forfeit().unwrap_err(), RoundError::InvalidState);
}

#[test]
fn chips_accumulate_into_a_single_hand_bet() {
    let mut ledger = InMemoryLedger::new(500);
    let mut table = table_with_draws(&[10, 9, 7, 8]);

    table.place_chips(25, &mut ledger).unwrap();
    table.place_chips(75, &mut ledger).unwrap();
    table.deal().unwrap();

    assert_eq!(table.hands()[0].bet(), 100);
    assert_eq!(table.bet_circle(), 100);
}

#[test]
fn reconfigure_rebuilds_the_shoe_and_resets_the_round() {
    let mut table = Table::new(TableOptions::default(), 3);
    let options = TableOptions::default()
        .with_deck_count(4)
        .with_cut_card(false);

    table.reconfigure(options);
    assert_eq!(table.cards_remaining(), 4 * 52);
    assert_eq!(table.shoe.cut_position(), None);
    assert_eq!(table.phase(), GamePhase::PreDeal);
    assert_eq!(table.running_count(), 0);
    assert_eq!(table.options.deck_count, 4);
}
