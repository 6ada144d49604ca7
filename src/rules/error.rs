//! Rejected-input conditions.
//!
//! All of these come back from validation before anything is mutated, so
//! a rejected action leaves the session exactly as it was.

use thiserror::Error;

use crate::core::{ActionKind, Seat};

/// Why an action was refused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum IllegalAction {
    /// Another seat must act, or the session is over.
    #[error("it is not {0}'s turn")]
    NotYourTurn(Seat),

    /// The participant holds neither seat.
    #[error("participant is not seated in this session")]
    NotInSession,

    /// Commit or guess value outside `1..=3`.
    #[error("value {0} is not 1, 2 or 3")]
    BadValue(u8),

    /// The action does not fit the current phase.
    #[error("{0:?} is not allowed in the current phase")]
    WrongPhase(ActionKind),

    /// The seat has used up its clubs or flinches.
    #[error("no {0:?} uses left this match")]
    Exhausted(ActionKind),
}
