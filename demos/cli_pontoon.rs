//! CLI pontoon example: seat 1 is yours, the other seats play basic strategy.

#![allow(clippy::missing_docs_in_private_items)]

use std::io::{self, Write};
use std::time::{SystemTime, UNIX_EPOCH};

use pontoon::driver::{Pause, play_automated};
use pontoon::{Action, Card, DealerHand, GameState, Hand, Suit, Table, TableOptions};
use tracing_subscriber::EnvFilter;

const HUMAN: u8 = 1;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("Pontoon CLI example (type 'q' to quit)");

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    let options = TableOptions::default().with_human_seats(&[HUMAN]);
    let mut table = match Table::new(options, seed) {
        Ok(table) => table,
        Err(err) => {
            println!("Config error: {err}");
            return;
        }
    };

    loop {
        let chips = table.chips(HUMAN).unwrap_or(0);
        if chips == 0 {
            println!("You are out of chips. Game over.");
            break;
        }

        if let Err(err) = table.begin_round() {
            println!("Round error: {err}");
            break;
        }

        let min_bet = table.options().min_bet;
        let Some(bet) = prompt_usize(&format!("Bet amount ({min_bet}-{chips}, 0 to quit): "))
        else {
            break;
        };
        if bet == 0 {
            println!("Goodbye.");
            break;
        }
        match table.bet(HUMAN, bet) {
            Ok(placed) if placed < bet => println!("Bet capped at {placed}."),
            Ok(_) => {}
            Err(err) => println!("Bet error: {err}"),
        }

        if let Err(err) = table.deal() {
            println!("Deal error: {err}");
            break;
        }

        let result = loop {
            match play_automated(&mut table).await {
                Pause::HumanTurn { position, .. } => {
                    print_table(&table);
                    println!("{}", format_actions(&table));
                    let action = match prompt_line("Action: ").as_str() {
                        "h" | "hit" => Action::Hit,
                        "s" | "stand" => Action::Stand,
                        "d" | "double" => Action::Double,
                        "p" | "split" => Action::Split,
                        "q" | "quit" => return,
                        _ => {
                            println!("Unknown action.");
                            continue;
                        }
                    };
                    if let Err(err) = table.apply_action(HUMAN, position.hand_index, action) {
                        println!("Action error: {err}");
                    }
                }
                Pause::DealerTurn => {
                    if let Err(err) = table.dealer_play() {
                        println!("Dealer error: {err}");
                        return;
                    }
                }
                Pause::RoundOver => {
                    print_table(&table);
                    match table.settle() {
                        Ok(result) => break result,
                        Err(err) => {
                            println!("Settlement error: {err}");
                            return;
                        }
                    }
                }
                Pause::Idle => return,
            }
        };

        for seat in &result.seats {
            let who = if seat.seat_id == HUMAN { "You" } else { "Bot" };
            for hand in &seat.hands {
                println!(
                    "{who} seat {} hand {}: {:?} | value {} vs {} | bet {} | net {}",
                    seat.seat_id,
                    hand.hand_index,
                    hand.outcome,
                    hand.player_value,
                    result.dealer_value,
                    hand.bet,
                    hand.payout
                );
            }
        }
        debug_assert_eq!(table.state(), GameState::WaitingForRound);
        println!("Round complete. Chips: {}\n", table.chips(HUMAN).unwrap_or(0));
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

fn print_table(table: &Table) {
    println!("\nShoe: {} cards remaining", table.shoe().remaining());
    println!(
        "\nDealer: {} (value {})",
        format_dealer(table.dealer()),
        table.dealer().value()
    );

    for seat in table.seats() {
        let turn = table.current_turn();
        for (index, hand) in seat.hands().iter().enumerate() {
            let active = turn.is_some_and(|pos| {
                table.current_seat() == Some(seat.id()) && pos.hand_index == index
            });
            let marker = if active { "*" } else { " " };
            let soft = if hand.is_soft() { "soft " } else { "" };
            println!(
                "{} Seat {} hand {}: {} | value {}{} | bet {}",
                marker,
                seat.id(),
                index,
                format_hand(hand),
                soft,
                hand.value(),
                hand.bet()
            );
        }
    }
    println!();
}

fn format_actions(table: &Table) -> String {
    let legal = table.legal_actions();
    let parts = [
        ("hit", "h", Action::Hit),
        ("stand", "s", Action::Stand),
        ("double", "d", Action::Double),
        ("split", "p", Action::Split),
    ]
    .map(|(label, key, action)| format_action(label, key, legal.allows(action)));
    format!("Actions: {}", parts.join(" "))
}

fn format_action(label: &str, key: &str, allowed: bool) -> String {
    let text = format!("[{key}]{label}");
    if allowed {
        colorize(&text, "32")
    } else {
        colorize(&text, "90")
    }
}

fn colorize(text: &str, code: &str) -> String {
    format!("\u{1b}[{code}m{text}\u{1b}[0m")
}

fn format_dealer(dealer: &DealerHand) -> String {
    if dealer.is_empty() {
        return "(no cards)".to_string();
    }
    format_cards(dealer.cards())
}

fn format_hand(hand: &Hand) -> String {
    if hand.is_empty() {
        return "(empty)".to_string();
    }
    format_cards(hand.cards())
}

fn format_cards(cards: &[Card]) -> String {
    cards.iter().map(format_card).collect::<Vec<_>>().join(" ")
}

fn format_card(card: &Card) -> String {
    let (suit, color_code) = match card.suit {
        Suit::Hearts => ("H", "31"),
        Suit::Diamonds => ("D", "31"),
        Suit::Clubs => ("C", "32"),
        Suit::Spades => ("S", "34"),
    };
    let rank = colorize(&card.symbol().to_string(), color_code);
    format!("{rank}{}", colorize(suit, color_code))
}
