//! Scripted opponent for matches with no second human.
//!
//! - `OpponentPolicy`: picks an action (baseline or uniform)
//! - `ScriptedOpponent`: owns a policy and seeded RNG, applies one action
//!   per call through `DuelRules`

pub mod policy;
pub mod scripted;

pub use policy::{BaselinePolicy, OpponentPolicy, UniformOpponent};
pub use scripted::{OpponentError, ScriptedOpponent, OPPONENT_SEAT};
