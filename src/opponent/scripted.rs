//! The scripted opponent that plays an unbound seat B.

use thiserror::Error;
use tracing::debug;

use crate::core::{DuelRng, Phase, RecordBatch, Seat, Session};
use crate::rules::{DuelRules, IllegalAction};

use super::policy::{BaselinePolicy, OpponentPolicy};

/// The seat the scripted opponent plays when nobody occupies it.
pub const OPPONENT_SEAT: Seat = Seat::B;

/// Contract violations when driving the scripted opponent.
///
/// These are caller bugs, not game conditions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum OpponentError {
    /// A human occupies the opponent seat.
    #[error("the opponent seat is held by a human")]
    SeatBound,
    /// The opponent seat has nothing to do in the current phase.
    #[error("it is not the scripted opponent's turn")]
    NotOpponentsTurn,
    /// The policy picked an action the rules refused.
    #[error("policy chose an illegal action: {0}")]
    Illegal(#[from] IllegalAction),
}

/// Plays seat B with an injected policy and seeded RNG.
#[derive(Clone, Debug)]
pub struct ScriptedOpponent<P = BaselinePolicy> {
    policy: P,
    rng: DuelRng,
}

impl ScriptedOpponent<BaselinePolicy> {
    /// Baseline opponent seeded for reproducible play.
    #[must_use]
    pub fn baseline(seed: u64) -> Self {
        Self::new(BaselinePolicy, DuelRng::new(seed))
    }
}

impl<P: OpponentPolicy> ScriptedOpponent<P> {
    /// Create an opponent from a policy and RNG.
    #[must_use]
    pub fn new(policy: P, rng: DuelRng) -> Self {
        Self { policy, rng }
    }

    /// Get the policy.
    #[must_use]
    pub fn policy(&self) -> &P {
        &self.policy
    }

    /// Choose and apply exactly one action for the opponent seat.
    ///
    /// Only valid while seat B is unbound and committing or guessing.
    pub fn take_turn(
        &mut self,
        rules: &DuelRules,
        session: &mut Session,
    ) -> Result<RecordBatch, OpponentError> {
        if !session.is_unbound(OPPONENT_SEAT) {
            return Err(OpponentError::SeatBound);
        }
        match session.phase() {
            Phase::Committing(seat) | Phase::Guessing { guesser: seat, .. }
                if seat == OPPONENT_SEAT => {}
            _ => return Err(OpponentError::NotOpponentsTurn),
        }

        let action = self
            .policy
            .choose_action(rules, session, OPPONENT_SEAT, &mut self.rng)
            .ok_or(OpponentError::NotOpponentsTurn)?;
        debug!(session = %session.id(), %action, "scripted opponent acts");

        Ok(rules.apply(session, OPPONENT_SEAT, action)?)
    }
}
