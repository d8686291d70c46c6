//! A multi-seat Pontoon/Blackjack round engine with optional `no_std` support.
//!
//! The crate provides a [`Table`] type that runs the full round flow: opening
//! a round, betting, the deal, seat actions (human or basic strategy), dealer
//! play and settlement. Actions and finished rounds are reported to pluggable
//! sinks ([`ActionLog`], [`RoundStore`]).
//!
//! # Example
//!
//! ```
//! use pontoon::{Table, TableOptions};
//!
//! let mut table = Table::new(TableOptions::default(), 42).unwrap();
//! let result = table.autoplay_round().unwrap();
//! assert_eq!(result.seats.len(), 3);
//! ```
#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]

#[cfg(all(not(feature = "std"), not(feature = "alloc")))]
compile_error!(
    "`std` is disabled but `alloc` feature is not enabled. Enable `alloc` or keep `std` enabled."
);

extern crate alloc;

pub mod card;
#[cfg(feature = "tokio")]
#[cfg_attr(docsrs, doc(cfg(feature = "tokio")))]
pub mod driver;
pub mod error;
pub mod game;
pub mod hand;
pub mod options;
pub mod result;
pub mod settlement;
pub mod shoe;
pub mod sink;
pub mod strategy;
mod sync;

// Re-export main types
pub use card::{Card, DECK_SIZE, Suit};
pub use error::{
    ActionError, BetError, ConfigError, DealError, RoundError, ShowdownError, SinkError,
    StrategyFault,
};
pub use game::{GameState, LegalActions, Seat, Table, TurnPosition};
pub use hand::{DealerHand, Hand, HandMeta, HandValue};
pub use options::{RoundingMode, TableOptions};
pub use result::{HandOutcome, HandResult, RoundResult, SeatResult, SeatStats};
pub use shoe::{RecycleMode, Shoe};
pub use sink::{
    ActionKind, ActionLog, ActionRecord, HandRecord, MemoryLedger, NoopSink, RoundId,
    RoundSettings, RoundStore,
};
pub use strategy::{Action, BasicStrategy, Decision, Strategy};
