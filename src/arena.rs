//! Match orchestration over a session store.
//!
//! The `Arena` is the caller the engine expects: it loads a session,
//! validates and applies a participant's action, lets the scripted
//! opponent answer while seat B is unbound and to act, stamps activity,
//! persists the session with its records, and settles standings once the
//! duel ends. `&mut self` serializes every apply and sweep, which is the
//! per-session exclusion the engine needs.

use thiserror::Error;
use tracing::{info, warn};

use crate::core::{
    Action, ActionRecord, ConfigError, DuelConfig, ParticipantId, Session, SessionId, Timestamp,
};
use crate::opponent::{BaselinePolicy, OpponentError, OpponentPolicy, ScriptedOpponent, OPPONENT_SEAT};
use crate::rules::{determine_outcome, DuelRules, IllegalAction, Outcome};
use crate::stats::{DrawPolicy, Standings};
use crate::store::{SessionStore, StoreError};

/// Anything that can stop an arena operation.
#[derive(Debug, Error)]
pub enum ArenaError {
    /// The submitted action was refused.
    #[error(transparent)]
    Illegal(#[from] IllegalAction),
    /// The scripted opponent was driven outside its contract.
    #[error(transparent)]
    Opponent(#[from] OpponentError),
    /// Persistence failed.
    #[error(transparent)]
    Store(#[from] StoreError),
    /// The configuration is unplayable.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Everything that happened in response to one submitted action.
#[derive(Clone, Debug, PartialEq)]
pub struct Turn {
    /// Session as persisted after the exchange.
    pub session: Session,
    /// Records from the participant's action and any opponent replies.
    pub records: Vec<ActionRecord>,
    /// Set once the duel has ended.
    pub outcome: Option<Outcome>,
}

/// Runs duels against a store.
#[derive(Debug)]
pub struct Arena<S, P = BaselinePolicy> {
    rules: DuelRules,
    store: S,
    opponent: ScriptedOpponent<P>,
    standings: Standings,
}

impl<S: SessionStore, P: OpponentPolicy> Arena<S, P> {
    /// Create an arena. Rejects an unplayable configuration.
    pub fn new(
        config: DuelConfig,
        store: S,
        opponent: ScriptedOpponent<P>,
        draw_policy: DrawPolicy,
    ) -> Result<Self, ArenaError> {
        Ok(Self {
            rules: DuelRules::new(config)?,
            store,
            opponent,
            standings: Standings::new(draw_policy),
        })
    }

    /// The rules engine.
    #[must_use]
    pub fn rules(&self) -> &DuelRules {
        &self.rules
    }

    /// The backing store.
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Player standings.
    ///
    /// Standings live in this value only; they are not written through the
    /// store and start empty with every new arena.
    #[must_use]
    pub fn standings(&self) -> &Standings {
        &self.standings
    }

    /// Open and persist a new match.
    ///
    /// Pass `None` for `seat_b` to play against the scripted opponent.
    pub fn start_match(
        &mut self,
        seat_a: ParticipantId,
        seat_b: Option<ParticipantId>,
        now: Timestamp,
    ) -> Result<Session, ArenaError> {
        let id = self.store.allocate_id()?;
        let session = Session::new(id, seat_a, seat_b, self.rules.config(), now);
        self.store.save(&session)?;
        info!(session = %id, %seat_a, scripted = seat_b.is_none(), "duel started");
        Ok(session)
    }

    /// Actions a participant could take in a session right now.
    pub fn legal_actions(
        &self,
        id: SessionId,
        participant: ParticipantId,
    ) -> Result<Vec<Action>, ArenaError> {
        let session = self.store.load(id)?;
        let seat = session
            .seat_of(participant)
            .ok_or(IllegalAction::NotInSession)?;
        Ok(self.rules.legal_actions(&session, seat))
    }

    /// Apply a participant's action, then any scripted replies.
    ///
    /// A refused action leaves the stored session untouched. If the
    /// scripted opponent fails, the participant's action and any replies
    /// applied before the failure are still persisted, then the error is
    /// returned.
    pub fn submit(
        &mut self,
        id: SessionId,
        participant: ParticipantId,
        action: Action,
        now: Timestamp,
    ) -> Result<Turn, ArenaError> {
        let mut session = self.store.load(id)?;
        let seat = self
            .rules
            .check_legal_for(&session, participant, action)
            .map_err(|e| {
                warn!(session = %id, %participant, %action, error = %e, "action rejected");
                e
            })?;

        let mut records = self.rules.apply(&mut session, seat, action)?.into_vec();
        let replied = self.reply(&mut session, &mut records);

        session.touch(now);
        self.store.save(&session)?;
        self.store.append_records(&records)?;
        replied.map_err(|e| {
            warn!(session = %id, error = %e, "scripted opponent failed");
            e
        })?;

        let outcome = self.settle(&session);
        Ok(Turn {
            session,
            records,
            outcome,
        })
    }

    /// Time out every live session idle longer than the configured timeout.
    ///
    /// Returns the ids that were moved to `TimedOut`.
    pub fn sweep_timeouts(&mut self, now: Timestamp) -> Result<Vec<SessionId>, ArenaError> {
        let mut expired = Vec::new();
        for mut session in self.store.list_active()? {
            if !self.rules.is_timed_out(&session, now) || !session.time_out() {
                continue;
            }
            self.store.save(&session)?;
            info!(session = %session.id(), round = session.round(), "duel timed out");
            expired.push(session.id());
        }
        Ok(expired)
    }

    /// Let the scripted opponent act while seat B is unbound and to act.
    fn reply(
        &mut self,
        session: &mut Session,
        records: &mut Vec<ActionRecord>,
    ) -> Result<(), OpponentError> {
        while !session.is_terminal()
            && session.is_unbound(OPPONENT_SEAT)
            && session.current_turn() == Some(OPPONENT_SEAT)
        {
            records.extend(self.opponent.take_turn(&self.rules, session)?);
        }
        Ok(())
    }

    fn settle(&mut self, session: &Session) -> Option<Outcome> {
        let outcome = determine_outcome(session).ok()?;
        self.standings.settle(session, outcome);
        info!(session = %session.id(), ?outcome, "duel settled");
        Some(outcome)
    }
}
