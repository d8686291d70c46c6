//! Asynchronous driver for automated seats.
//!
//! Automated seats act one at a time with a short pause between actions so a
//! client watching the table can follow along. The driver hands control back
//! whenever a human seat has to act.

use tokio::time::sleep;
use tracing::debug;

use crate::error::ShowdownError;
use crate::game::{GameState, Table, TurnPosition};
use crate::result::RoundResult;

/// Why the driver stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pause {
    /// A human seat has to act on this hand.
    HumanTurn {
        /// The waiting seat.
        seat_id: u8,
        /// Its active hand.
        position: TurnPosition,
    },
    /// Every hand is done; the dealer plays next.
    DealerTurn,
    /// The round is ready to be settled.
    RoundOver,
    /// No round is being played.
    Idle,
}

fn pause_of(table: &Table) -> Pause {
    match table.state() {
        GameState::PlayerTurn => match (table.current_seat(), table.current_turn()) {
            (Some(seat_id), Some(position)) => Pause::HumanTurn { seat_id, position },
            _ => Pause::DealerTurn,
        },
        GameState::DealerTurn => Pause::DealerTurn,
        GameState::RoundOver => Pause::RoundOver,
        GameState::WaitingForRound | GameState::Betting | GameState::Dealing => Pause::Idle,
    }
}

/// Plays automated seats, pausing `think_delay` after each action, until a
/// human seat has to act or the player turn is over.
pub async fn play_automated(table: &mut Table) -> Pause {
    let delay = table.options().think_delay;
    while let Some(action) = table.step_automated() {
        debug!(?action, "automated seat acted");
        if !delay.is_zero() {
            sleep(delay).await;
        }
    }
    pause_of(table)
}

/// Drives the round as far as it can go without a human.
///
/// Returns `Ok(None)` when a human seat has to act (see
/// [`Table::current_turn`] and [`Table::legal_actions`]); call again after
/// applying the human's action. Otherwise the dealer plays, the round is
/// settled and its result returned.
///
/// # Errors
///
/// Returns an error if no dealt round is in progress.
pub async fn advance(table: &mut Table) -> Result<Option<RoundResult>, ShowdownError> {
    match play_automated(table).await {
        Pause::HumanTurn { .. } => Ok(None),
        Pause::DealerTurn => {
            table.dealer_play()?;
            table.settle().map(Some)
        }
        Pause::RoundOver => table.settle().map(Some),
        Pause::Idle => Err(ShowdownError::InvalidState),
    }
}
