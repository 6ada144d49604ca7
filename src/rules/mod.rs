//! Duel rules: validation, state transitions, damage, outcome.
//!
//! `DuelRules` is the only thing that moves a live session forward. The
//! outcome helpers are pure predicates callers run after each step.

pub mod error;
pub mod engine;
pub mod outcome;

pub use error::IllegalAction;
pub use engine::{damage_for, Damage, DuelRules};
pub use outcome::{determine_outcome, is_timed_out, Outcome, OutcomeError};
