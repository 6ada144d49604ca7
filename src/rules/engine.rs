//! The duel rules engine.
//!
//! `DuelRules` owns the configuration and implements:
//! - Validation (`check_legal`, `check_legal_for`)
//! - Action application (`apply`, `apply_commit`, `apply_guess`,
//!   `apply_club`, `apply_flinch`)
//! - Legal action enumeration
//!
//! Every apply validates first and mutates only on success. The engine
//! keeps no log; applied actions come back as a `RecordBatch`.

use smallvec::smallvec;
use tracing::{debug, info};

use crate::core::{
    Action, ActionKind, ActionRecord, ConfigError, DuelConfig, ParticipantId, Phase, RecordBatch,
    Seat, Session, Timestamp, MAX_VALUE, MIN_VALUE,
};

use super::error::IllegalAction;
use super::outcome;

/// Damage resolved from a guess.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Damage {
    /// Damage taken by the seat that committed.
    pub to_committer: i32,
    /// Self-counter damage taken by the seat that guessed.
    pub to_guesser: i32,
}

/// Damage table keyed by how far the guess missed.
///
/// | diff | committer | guesser |
/// |------|-----------|---------|
/// | 0    | 1         | 1       |
/// | 1    | 2         | 0       |
/// | 2    | 3         | 0       |
#[must_use]
pub fn damage_for(committed: u8, guess: u8) -> Damage {
    match committed.abs_diff(guess) {
        0 => Damage {
            to_committer: 1,
            to_guesser: 1,
        },
        1 => Damage {
            to_committer: 2,
            to_guesser: 0,
        },
        _ => Damage {
            to_committer: 3,
            to_guesser: 0,
        },
    }
}

/// Rules engine for a configured duel.
#[derive(Clone, Debug)]
pub struct DuelRules {
    config: DuelConfig,
}

impl DuelRules {
    /// Create an engine for the given configuration.
    ///
    /// Rejects a configuration that fails `DuelConfig::validate`, so every
    /// engine plays with at least one round and a usable special chance.
    pub fn new(config: DuelConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Get the configuration.
    #[must_use]
    pub fn config(&self) -> &DuelConfig {
        &self.config
    }

    // === Validation ===

    /// Check whether `seat` may take `action` right now.
    pub fn check_legal(
        &self,
        session: &Session,
        seat: Seat,
        action: Action,
    ) -> Result<(), IllegalAction> {
        let phase = session.phase();
        if phase.to_act() != Some(seat) {
            return Err(IllegalAction::NotYourTurn(seat));
        }

        let state = session.seat(seat);
        match action {
            Action::Commit(value) => {
                if !Action::is_valid_value(value) {
                    return Err(IllegalAction::BadValue(value));
                }
                if phase != Phase::Committing(seat) {
                    return Err(IllegalAction::WrongPhase(ActionKind::Commit));
                }
            }
            Action::Guess(value) => {
                if !Action::is_valid_value(value) {
                    return Err(IllegalAction::BadValue(value));
                }
                if !matches!(phase, Phase::Guessing { guesser, .. } if guesser == seat) {
                    return Err(IllegalAction::WrongPhase(ActionKind::Guess));
                }
            }
            Action::Club => {
                if state.clubs_used >= self.config.max_clubs {
                    return Err(IllegalAction::Exhausted(ActionKind::Club));
                }
                if !matches!(phase, Phase::Committing(_)) {
                    return Err(IllegalAction::WrongPhase(ActionKind::Club));
                }
            }
            Action::Flinch => {
                if state.flinches_used >= self.config.max_flinches {
                    return Err(IllegalAction::Exhausted(ActionKind::Flinch));
                }
                if !matches!(phase, Phase::Guessing { .. }) {
                    return Err(IllegalAction::WrongPhase(ActionKind::Flinch));
                }
            }
        }

        Ok(())
    }

    /// Resolve a participant to its seat, then `check_legal`.
    ///
    /// Membership is checked before the turn, so an outsider always gets
    /// `NotInSession` rather than `NotYourTurn`.
    pub fn check_legal_for(
        &self,
        session: &Session,
        participant: ParticipantId,
        action: Action,
    ) -> Result<Seat, IllegalAction> {
        let seat = session
            .seat_of(participant)
            .ok_or(IllegalAction::NotInSession)?;
        self.check_legal(session, seat, action)?;
        Ok(seat)
    }

    /// Every action `seat` could legally take right now.
    #[must_use]
    pub fn legal_actions(&self, session: &Session, seat: Seat) -> Vec<Action> {
        (MIN_VALUE..=MAX_VALUE)
            .map(Action::Commit)
            .chain((MIN_VALUE..=MAX_VALUE).map(Action::Guess))
            .chain([Action::Club, Action::Flinch])
            .filter(|&action| self.check_legal(session, seat, action).is_ok())
            .collect()
    }

    // === Application ===

    /// Validate and apply any action.
    pub fn apply(
        &self,
        session: &mut Session,
        seat: Seat,
        action: Action,
    ) -> Result<RecordBatch, IllegalAction> {
        self.check_legal(session, seat, action)?;

        let records = match action {
            Action::Commit(value) => self.commit(session, seat, value),
            Action::Guess(value) => {
                let committed = session
                    .pending_commit(seat.opponent())
                    .ok_or(IllegalAction::WrongPhase(ActionKind::Guess))?;
                self.guess(session, seat, committed, value)
            }
            Action::Club => self.club(session, seat),
            Action::Flinch => self.flinch(session, seat),
        };

        for record in &records {
            debug!(
                session = %record.session,
                round = record.round,
                seat = %record.seat,
                kind = ?record.kind,
                damage = record.damage,
                "applied action"
            );
        }
        if session.phase() == Phase::Ended {
            info!(
                session = %session.id(),
                round = session.round(),
                hp_a = session.hp(Seat::A),
                hp_b = session.hp(Seat::B),
                "duel ended"
            );
        }

        Ok(records)
    }

    /// Validate and apply a commit.
    pub fn apply_commit(
        &self,
        session: &mut Session,
        seat: Seat,
        value: u8,
    ) -> Result<RecordBatch, IllegalAction> {
        self.apply(session, seat, Action::Commit(value))
    }

    /// Validate and apply a guess.
    pub fn apply_guess(
        &self,
        session: &mut Session,
        seat: Seat,
        value: u8,
    ) -> Result<RecordBatch, IllegalAction> {
        self.apply(session, seat, Action::Guess(value))
    }

    /// Validate and apply a club.
    pub fn apply_club(
        &self,
        session: &mut Session,
        seat: Seat,
    ) -> Result<RecordBatch, IllegalAction> {
        self.apply(session, seat, Action::Club)
    }

    /// Validate and apply a flinch.
    pub fn apply_flinch(
        &self,
        session: &mut Session,
        seat: Seat,
    ) -> Result<RecordBatch, IllegalAction> {
        self.apply(session, seat, Action::Flinch)
    }

    // === Lifecycle ===

    /// Has the session been idle longer than the configured timeout?
    #[must_use]
    pub fn is_timed_out(&self, session: &Session, now: Timestamp) -> bool {
        outcome::is_timed_out(session, now, self.config.timeout)
    }

    // === Transitions (validated by the caller) ===

    fn commit(&self, session: &mut Session, seat: Seat, value: u8) -> RecordBatch {
        session.phase = Phase::Guessing {
            guesser: seat.opponent(),
            committed: value,
        };

        smallvec![ActionRecord::new(
            session.id(),
            session.round,
            seat,
            ActionKind::Commit,
            Some(value),
            0,
        )]
    }

    fn guess(&self, session: &mut Session, seat: Seat, committed: u8, value: u8) -> RecordBatch {
        let committer = seat.opponent();
        let damage = damage_for(committed, value);
        let round = session.round;

        session.seats[committer].hp -= damage.to_committer;
        session.seats[seat].hp -= damage.to_guesser;

        let mut records: RecordBatch = smallvec![ActionRecord::new(
            session.id(),
            round,
            seat,
            ActionKind::Guess,
            Some(value),
            damage.to_committer,
        )];
        if damage.to_guesser > 0 {
            records.push(ActionRecord::new(
                session.id(),
                round,
                committer,
                ActionKind::Counter,
                None,
                damage.to_guesser,
            ));
        }

        if session.has_knockout() || session.round >= self.config.total_rounds {
            session.phase = Phase::Ended;
        } else {
            session.round += 1;
            session.phase = Phase::Committing(Seat::opening(session.round));
        }

        records
    }

    fn club(&self, session: &mut Session, seat: Seat) -> RecordBatch {
        let state = &mut session.seats[seat];
        state.clubs_used += 1;
        debug_assert!(state.clubs_used <= self.config.max_clubs);

        let damage = self.config.club_damage;
        self.interrupt(session, seat, ActionKind::Club, damage)
    }

    fn flinch(&self, session: &mut Session, seat: Seat) -> RecordBatch {
        let state = &mut session.seats[seat];
        state.flinches_used += 1;
        debug_assert!(state.flinches_used <= self.config.max_flinches);

        let damage = self.config.flinch_damage;
        self.interrupt(session, seat, ActionKind::Flinch, damage)
    }

    /// Shared tail of club and flinch: deal fixed damage and hand the
    /// opponent the commit. The round counter does not move.
    fn interrupt(
        &self,
        session: &mut Session,
        seat: Seat,
        kind: ActionKind,
        damage: i32,
    ) -> RecordBatch {
        let opponent = seat.opponent();
        session.seats[opponent].hp -= damage;

        session.phase = if session.has_knockout() {
            Phase::Ended
        } else {
            Phase::Committing(opponent)
        };

        smallvec![ActionRecord::new(
            session.id(),
            session.round,
            seat,
            kind,
            None,
            damage,
        )]
    }
}
