//! CLI blackjack table demo.
//!
//! Drives a [`Table`] through full rounds: chips, deal, player actions, the
//! step-wise dealer loop, settlement, and payout collection.

#![allow(clippy::missing_docs_in_private_items)]

use std::io::{self, Write};
use std::time::{SystemTime, UNIX_EPOCH};

use shoejack::{
    Card, GamePhase, HandOutcome, InMemoryLedger, Suit, Table, TableOptions, TableSnapshot,
};

fn main() {
    println!("Blackjack table demo (type 'q' to quit)");

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    let mut table = Table::new(TableOptions::default(), seed);
    let mut ledger = InMemoryLedger::new(500);

    loop {
        let balance = ledger.balance().unwrap_or(0);
        if balance == 0 {
            println!("You are out of credits. Game over.");
            break;
        }

        println!(
            "\nCredits: {balance} | count {} (true {}) | {} cards left",
            table.running_count(),
            table.true_count(),
            table.cards_remaining()
        );

        let Some(bet) = prompt_usize(&format!("Bet amount (1-{balance}, 0 to quit): ")) else {
            break;
        };

        if bet == 0 {
            println!("Goodbye.");
            break;
        }

        if let Err(err) = table.place_chips(bet, &mut ledger) {
            println!("Bet error: {err}");
            continue;
        }

        if let Err(err) = table.deal() {
            println!("Deal error: {err}");
            let _ = table.clear_bet_refund(&mut ledger);
            continue;
        }

        while table.phase() == GamePhase::PlayerTurn {
            print_table(&table.snapshot());

            println!("Actions: [h]it [s]tand [d]ouble down [p] split");
            let action = prompt_line("Action: ");
            let index = table.selected_hand();

            let result = match action.as_str() {
                "h" | "hit" => table.hit(index).map(|_| ()),
                "s" | "stand" => table.stay(index),
                "d" | "double" => table.double(index, &mut ledger).map(|_| ()),
                "p" | "split" => table.split(index, &mut ledger),
                "q" | "quit" => return,
                _ => {
                    println!("Unknown action.");
                    continue;
                }
            };

            if let Err(err) = result {
                println!("Action error: {err}");
            }
        }

        while table.phase() == GamePhase::DealerTurn {
            match table.dealer_step() {
                Ok(Some(card)) => println!("Dealer draws {}.", format_card(&card)),
                Ok(None) => {}
                Err(err) => {
                    println!("Dealer error: {err}");
                    break;
                }
            }
        }

        if table.phase() == GamePhase::SettlingHands {
            match table.settle_hands() {
                Ok(result) => {
                    print_table(&table.snapshot());
                    for hand in &result.hands {
                        let label = match hand.outcome {
                            HandOutcome::Win if hand.blackjack => "Blackjack!",
                            HandOutcome::Win => "You win!",
                            HandOutcome::Push => "Push.",
                            HandOutcome::Lose | HandOutcome::Undecided => "You lose.",
                        };
                        println!(
                            "Hand {}: {} (total {}, bet {}, payout {})",
                            hand.index, label, hand.total, hand.bet, hand.payout
                        );
                    }
                    println!("Round net: {}", result.net);
                }
                Err(err) => println!("Settle error: {err}"),
            }
        }

        if table.phase() == GamePhase::Results {
            match table.collect_payouts(&mut ledger) {
                Ok(total) if total > 0 => println!("Collected {total} credits."),
                Ok(_) => {}
                Err(err) => println!("Payout error: {err}"),
            }
        }

        if let Err(err) = table.end_round() {
            println!("Round error: {err}");
        }
    }
}

fn prompt_line(prompt: &str) -> String {
    print!("{prompt}");
    let _ = io::stdout().flush();

    let mut input = String::new();
    if io::stdin().read_line(&mut input).is_err() {
        return String::new();
    }
    input.trim().to_lowercase()
}

fn prompt_usize(prompt: &str) -> Option<usize> {
    loop {
        let input = prompt_line(prompt);
        if input == "q" || input == "quit" {
            return None;
        }
        match input.parse::<usize>() {
            Ok(value) => return Some(value),
            Err(_) => println!("Please enter a number."),
        }
    }
}

fn print_table(snapshot: &TableSnapshot) {
    let mut dealer_parts: Vec<String> = snapshot.dealer.cards.iter().map(format_card).collect();
    for _ in 0..snapshot.dealer.hidden_cards {
        dealer_parts.push("??".to_string());
    }
    println!(
        "\nDealer: {} (showing {})",
        dealer_parts.join(" "),
        snapshot.dealer.display_total
    );

    for (index, hand) in snapshot.hands.iter().enumerate() {
        let marker = if index == snapshot.selected_hand {
            "*"
        } else {
            " "
        };
        let cards = hand
            .cards
            .iter()
            .map(format_card)
            .collect::<Vec<_>>()
            .join(" ");
        println!(
            "{} Hand {}: {} | total {} | bet {} | {:?}",
            marker, index, cards, hand.totals.best, hand.bet, hand.status
        );
    }
    println!();
}

fn colorize(text: &str, code: &str) -> String {
    format!("\u{1b}[{code}m{text}\u{1b}[0m")
}

fn format_card(card: &Card) -> String {
    let (suit, color_code) = match card.suit {
        Suit::Hearts => ("H", "31"),
        Suit::Diamonds => ("D", "31"),
        Suit::Clubs => ("C", "32"),
        Suit::Spades => ("S", "34"),
    };

    let (rank, is_face) = match card.rank {
        1 => ("A".to_string(), true),
        11 => ("J".to_string(), true),
        12 => ("Q".to_string(), true),
        13 => ("K".to_string(), true),
        _ => (card.rank.to_string(), false),
    };

    let colored_rank = if is_face {
        colorize(&rank, color_code)
    } else {
        rank
    };
    let colored_suit = colorize(suit, color_code);
    format!("{colored_rank}{colored_suit}")
}
