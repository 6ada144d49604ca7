//! Core duel types: seats, configuration, RNG, actions, session state.
//!
//! Everything here is plain data. Rules live in `rules`, the scripted
//! opponent in `opponent`.

pub mod seat;
pub mod config;
pub mod rng;
pub mod action;
pub mod session;

pub use seat::{ParticipantId, Seat, SeatMap};
pub use config::{ConfigError, DuelConfig};
pub use rng::DuelRng;
pub use action::{Action, ActionKind, ActionRecord, RecordBatch, MAX_VALUE, MIN_VALUE};
pub use session::{Phase, SeatState, Session, SessionId, Timestamp};
