//! Win determination and inactivity detection.
//!
//! Both are pure predicates over a session. Callers run them after each
//! engine step (outcome) or from a periodic sweep (timeout).

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::{Phase, Seat, Session, Timestamp};

/// Result of a finished duel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// Single winner.
    Winner(Seat),
    /// Nobody won.
    Draw,
}

impl Outcome {
    /// Check if a seat won.
    #[must_use]
    pub fn is_winner(self, seat: Seat) -> bool {
        self == Outcome::Winner(seat)
    }
}

/// Why no outcome could be determined.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum OutcomeError {
    /// The duel is still being played.
    #[error("the duel is not over yet")]
    NotOverYet,
    /// The duel was abandoned for inactivity and has no winner.
    #[error("the duel timed out")]
    Abandoned,
}

/// Decide who won an ended session.
///
/// - both seats at or below zero HP: draw
/// - one seat at or below zero: the other wins
/// - round limit: strictly higher HP wins, equal HP is a draw
pub fn determine_outcome(session: &Session) -> Result<Outcome, OutcomeError> {
    match session.phase() {
        Phase::Ended => {}
        Phase::TimedOut => return Err(OutcomeError::Abandoned),
        Phase::Committing(_) | Phase::Guessing { .. } => return Err(OutcomeError::NotOverYet),
    }

    let (a, b) = (session.hp(Seat::A), session.hp(Seat::B));
    let outcome = match (a <= 0, b <= 0) {
        (true, true) => Outcome::Draw,
        (true, false) => Outcome::Winner(Seat::B),
        (false, true) => Outcome::Winner(Seat::A),
        (false, false) => match a.cmp(&b) {
            std::cmp::Ordering::Greater => Outcome::Winner(Seat::A),
            std::cmp::Ordering::Less => Outcome::Winner(Seat::B),
            std::cmp::Ordering::Equal => Outcome::Draw,
        },
    };
    Ok(outcome)
}

/// True iff the session has been idle strictly longer than `timeout`.
#[must_use]
pub fn is_timed_out(session: &Session, now: Timestamp, timeout: Duration) -> bool {
    now.since(session.updated_at()) > timeout
}
