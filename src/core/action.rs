//! Actions a seat can submit and the facts an applied action produces.
//!
//! There are four verbs:
//! - `Commit(n)`: secretly lock in `n` for the opponent to guess
//! - `Guess(n)`: name the opponent's committed number
//! - `Club`: spend a club instead of committing
//! - `Flinch`: spend a flinch instead of guessing
//!
//! The engine keeps no log. Every successful apply returns one or two
//! `ActionRecord`s for the caller to persist or audit.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::seat::Seat;
use super::session::SessionId;

/// Smallest legal commit/guess value.
pub const MIN_VALUE: u8 = 1;

/// Largest legal commit/guess value.
pub const MAX_VALUE: u8 = 3;

/// A proposed action.
///
/// Values are carried unchecked; `DuelRules::check_legal` rejects
/// anything outside `1..=3` with `BadValue`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Lock in a number for the opponent to guess.
    Commit(u8),
    /// Guess the opponent's committed number.
    Guess(u8),
    /// Guaranteed damage in place of committing.
    Club,
    /// Guaranteed damage in place of guessing.
    Flinch,
}

impl Action {
    /// The kind of this action, without its value.
    #[must_use]
    pub const fn kind(self) -> ActionKind {
        match self {
            Action::Commit(_) => ActionKind::Commit,
            Action::Guess(_) => ActionKind::Guess,
            Action::Club => ActionKind::Club,
            Action::Flinch => ActionKind::Flinch,
        }
    }

    /// The committed or guessed value, if any.
    #[must_use]
    pub const fn value(self) -> Option<u8> {
        match self {
            Action::Commit(v) | Action::Guess(v) => Some(v),
            Action::Club | Action::Flinch => None,
        }
    }

    /// Is `value` inside the commit/guess domain?
    #[must_use]
    pub const fn is_valid_value(value: u8) -> bool {
        value >= MIN_VALUE && value <= MAX_VALUE
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::Commit(v) => write!(f, "commit {v}"),
            Action::Guess(v) => write!(f, "guess {v}"),
            Action::Club => write!(f, "club"),
            Action::Flinch => write!(f, "flinch"),
        }
    }
}

/// Kind tag stored in action records.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionKind {
    /// A commit was locked in.
    Commit,
    /// A guess resolved the round.
    Guess,
    /// A club was spent.
    Club,
    /// A flinch was spent.
    Flinch,
    /// Self-counter damage the committing seat dealt back on an exact guess.
    Counter,
}

/// Audit fact produced by an applied action.
///
/// `damage` is what this record's `seat` dealt to the other seat.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// Session the action belongs to.
    pub session: SessionId,

    /// Round number when the action was taken.
    pub round: u32,

    /// Seat credited with the action.
    pub seat: Seat,

    /// What happened.
    pub kind: ActionKind,

    /// Committed or guessed value, if any.
    pub value: Option<u8>,

    /// Damage dealt to the opponent.
    pub damage: i32,
}

impl ActionRecord {
    /// Create a new action record.
    #[must_use]
    pub fn new(
        session: SessionId,
        round: u32,
        seat: Seat,
        kind: ActionKind,
        value: Option<u8>,
        damage: i32,
    ) -> Self {
        Self {
            session,
            round,
            seat,
            kind,
            value,
            damage,
        }
    }
}

/// Records from a single apply: one, or two for an exact guess.
pub type RecordBatch = SmallVec<[ActionRecord; 2]>;
