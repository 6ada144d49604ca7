//! # slap-duel
//!
//! Rules engine for a two-seat, round-based guessing duel.
//!
//! Each round one seat secretly commits a number from 1 to 3 and the other
//! guesses it; how far the guess misses decides the damage. Either seat may
//! spend a limited club (instead of committing) or flinch (instead of
//! guessing) for fixed damage. A duel ends on a knockout, after the round
//! limit, or when a caller times it out for inactivity.
//!
//! ## Design Principles
//!
//! 1. **Closed state machine**: `Phase` is an enum that carries the seat to
//!    act and any pending commit, so illegal combinations cannot be built.
//!
//! 2. **Validate before mutate**: every apply checks legality first; a
//!    rejected action leaves the session untouched.
//!
//! 3. **Explicit dependencies**: configuration, randomness and storage are
//!    passed in. There are no process-wide statics.
//!
//! ## Modules
//!
//! - `core`: Seats, configuration, RNG, actions, session state
//! - `rules`: Validation, transitions, damage, outcome, timeout
//! - `opponent`: Scripted opponent and its policies
//! - `store`: Persistence seam and in-memory store
//! - `stats`: Player records and leaderboard
//! - `arena`: Orchestration over a store

pub mod core;
pub mod rules;
pub mod opponent;
pub mod store;
pub mod stats;
pub mod arena;

// Re-export commonly used types
pub use crate::core::{
    Action, ActionKind, ActionRecord, ConfigError, DuelConfig, DuelRng, ParticipantId, Phase,
    RecordBatch, Seat, SeatMap, SeatState, Session, SessionId, Timestamp,
};

pub use crate::rules::{
    damage_for, determine_outcome, is_timed_out, Damage, DuelRules, IllegalAction, Outcome,
    OutcomeError,
};

pub use crate::opponent::{
    BaselinePolicy, OpponentError, OpponentPolicy, ScriptedOpponent, UniformOpponent,
    OPPONENT_SEAT,
};

pub use crate::store::{MemoryStore, SessionStore, StoreError};

pub use crate::stats::{DrawPolicy, PlayerRecord, Standings};

pub use crate::arena::{Arena, ArenaError, Turn};
