//! Async driver tests.

use std::time::Duration;

use pontoon::driver::{Pause, advance, play_automated};
use pontoon::{Card, GameState, Suit, Table, TableOptions};
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .without_time()
        .try_init()
        .ok();
}

fn options() -> TableOptions {
    TableOptions::default().with_think_delay(Duration::from_millis(1))
}

#[tokio::test]
async fn automated_table_plays_to_settlement() {
    init_tracing();
    let mut table = Table::new(options(), 31).unwrap();

    table.begin_round().unwrap();
    table.deal().unwrap();
    let result = advance(&mut table).await.unwrap().unwrap();

    assert_eq!(result.seats.len(), 3);
    assert_eq!(table.state(), GameState::WaitingForRound);
    assert_eq!(table.rounds_played(), 1);
}

#[tokio::test]
async fn driver_pauses_for_human_seats() {
    init_tracing();
    let mut table = Table::new(options().with_seats(2).with_human_seats(&[1]), 32).unwrap();

    table.begin_round().unwrap();
    table.shoe_mut().stack(&[
        Card::new(Suit::Clubs, 2),
        Card::new(Suit::Spades, 10),
        Card::new(Suit::Hearts, 10),
        Card::new(Suit::Spades, 6),
        Card::new(Suit::Hearts, 7),
        Card::new(Suit::Diamonds, 9),
    ]);
    table.deal().unwrap();

    let pause = play_automated(&mut table).await;
    let Pause::HumanTurn { seat_id, position } = pause else {
        panic!("expected a human turn, got {pause:?}");
    };
    assert_eq!(seat_id, 1);
    assert_eq!(position.hand_index, 0);
    assert!(advance(&mut table).await.unwrap().is_none());

    table.stand(1, 0).unwrap();
    let result = advance(&mut table).await.unwrap().unwrap();
    assert_eq!(result.seats.len(), 2);
    assert_eq!(play_automated(&mut table).await, Pause::Idle);
}

#[tokio::test]
async fn advance_without_a_round_is_rejected() {
    let mut table = Table::new(options(), 33).unwrap();
    assert!(advance(&mut table).await.is_err());
}
