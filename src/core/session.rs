//! Session state: the unit of a single match.
//!
//! ## Phase
//!
//! A closed state enum. The seat that must act next and any pending commit
//! are carried by the phase itself, so "exactly one seat to act while the
//! match is live" and "a commit is pending only while its opponent guesses"
//! hold by construction rather than by bookkeeping.
//!
//! ## Session
//!
//! Seat occupants, per-seat counters, round number, phase and timestamps.
//! Only `DuelRules` and the scripted opponent mutate a live session; once
//! the phase is terminal it no longer changes.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use super::config::DuelConfig;
use super::seat::{ParticipantId, Seat, SeatMap};

/// Opaque session identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SessionId(pub u64);

impl SessionId {
    /// Create a new session ID.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Session({})", self.0)
    }
}

/// Wall-clock instant in milliseconds since the Unix epoch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Timestamp(pub u64);

impl Timestamp {
    /// Timestamp from milliseconds since the epoch.
    #[must_use]
    pub const fn from_millis(ms: u64) -> Self {
        Self(ms)
    }

    /// Timestamp from whole seconds since the epoch.
    #[must_use]
    pub const fn from_secs(secs: u64) -> Self {
        Self(secs.saturating_mul(1000))
    }

    /// Current wall-clock time. Clocks before the epoch read as zero.
    #[must_use]
    pub fn now() -> Self {
        let since_epoch = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default();
        Self(u64::try_from(since_epoch.as_millis()).unwrap_or(u64::MAX))
    }

    /// Time elapsed from `earlier` to `self`, zero if `earlier` is later.
    #[must_use]
    pub fn since(self, earlier: Timestamp) -> Duration {
        Duration::from_millis(self.0.saturating_sub(earlier.0))
    }

    /// This instant shifted forward.
    #[must_use]
    pub fn plus(self, by: Duration) -> Self {
        Self(self.0.saturating_add(duration_millis(by)))
    }

    /// This instant shifted back, clamped at the epoch.
    #[must_use]
    pub fn minus(self, by: Duration) -> Self {
        Self(self.0.saturating_sub(duration_millis(by)))
    }
}

fn duration_millis(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}

/// Where a match stands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// The seat chooses a number to commit (or clubs instead).
    Committing(Seat),
    /// `guesser` guesses the opponent's `committed` number (or flinches
    /// instead).
    Guessing {
        /// Seat that must guess.
        guesser: Seat,
        /// The opponent's secret commit for this round.
        committed: u8,
    },
    /// Knockout or round limit.
    Ended,
    /// Abandoned for inactivity.
    TimedOut,
}

impl Phase {
    /// Seat that must act next, `None` once terminal.
    #[must_use]
    pub const fn to_act(self) -> Option<Seat> {
        match self {
            Phase::Committing(seat) => Some(seat),
            Phase::Guessing { guesser, .. } => Some(guesser),
            Phase::Ended | Phase::TimedOut => None,
        }
    }

    /// No further actions are legal.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Phase::Ended | Phase::TimedOut)
    }
}

/// Mutable counters for one seat.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatState {
    /// Human occupying the seat; `None` means the scripted opponent.
    pub occupant: Option<ParticipantId>,

    /// Hit points. May go below zero internally.
    pub hp: i32,

    /// Clubs spent this match.
    pub clubs_used: u8,

    /// Flinches spent this match.
    pub flinches_used: u8,
}

impl SeatState {
    fn new(occupant: Option<ParticipantId>, hp: i32) -> Self {
        Self {
            occupant,
            hp,
            clubs_used: 0,
            flinches_used: 0,
        }
    }

    /// Is this seat knocked out?
    #[must_use]
    pub fn is_down(&self) -> bool {
        self.hp <= 0
    }
}

/// A single match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    id: SessionId,
    pub(crate) seats: SeatMap<SeatState>,
    pub(crate) round: u32,
    pub(crate) phase: Phase,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl Session {
    /// Open a match with both seats at full HP and seat A to commit.
    ///
    /// Leave `seat_b` as `None` to have the scripted opponent play it.
    #[must_use]
    pub fn new(
        id: SessionId,
        seat_a: ParticipantId,
        seat_b: Option<ParticipantId>,
        config: &DuelConfig,
        now: Timestamp,
    ) -> Self {
        let seats = SeatMap::new(|seat| match seat {
            Seat::A => SeatState::new(Some(seat_a), config.max_hp),
            Seat::B => SeatState::new(seat_b, config.max_hp),
        });

        Self {
            id,
            seats,
            round: 1,
            phase: Phase::Committing(Seat::A),
            created_at: now,
            updated_at: now,
        }
    }

    /// Session identifier.
    #[must_use]
    pub fn id(&self) -> SessionId {
        self.id
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Current round, starting at 1.
    #[must_use]
    pub fn round(&self) -> u32 {
        self.round
    }

    /// Seat that must act next, `None` once terminal.
    #[must_use]
    pub fn current_turn(&self) -> Option<Seat> {
        self.phase.to_act()
    }

    /// Is the match over (ended or timed out)?
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.phase.is_terminal()
    }

    /// Commit `seat` has pending while its opponent guesses.
    #[must_use]
    pub fn pending_commit(&self, seat: Seat) -> Option<u8> {
        match self.phase {
            Phase::Guessing { guesser, committed } if guesser == seat.opponent() => {
                Some(committed)
            }
            _ => None,
        }
    }

    /// Counters for a seat.
    #[must_use]
    pub fn seat(&self, seat: Seat) -> &SeatState {
        &self.seats[seat]
    }

    /// Raw hit points (may be negative).
    #[must_use]
    pub fn hp(&self, seat: Seat) -> i32 {
        self.seats[seat].hp
    }

    /// Hit points as shown to players, never below zero.
    #[must_use]
    pub fn displayed_hp(&self, seat: Seat) -> i32 {
        self.seats[seat].hp.max(0)
    }

    /// Clubs spent by a seat.
    #[must_use]
    pub fn clubs_used(&self, seat: Seat) -> u8 {
        self.seats[seat].clubs_used
    }

    /// Flinches spent by a seat.
    #[must_use]
    pub fn flinches_used(&self, seat: Seat) -> u8 {
        self.seats[seat].flinches_used
    }

    /// Is either seat at or below zero HP?
    #[must_use]
    pub fn has_knockout(&self) -> bool {
        self.seats.iter().any(|(_, s)| s.is_down())
    }

    /// Human occupying a seat, `None` for the scripted opponent.
    #[must_use]
    pub fn occupant(&self, seat: Seat) -> Option<ParticipantId> {
        self.seats[seat].occupant
    }

    /// Is the seat played by the scripted opponent?
    #[must_use]
    pub fn is_unbound(&self, seat: Seat) -> bool {
        self.seats[seat].occupant.is_none()
    }

    /// Seat held by a participant, if any.
    #[must_use]
    pub fn seat_of(&self, participant: ParticipantId) -> Option<Seat> {
        Seat::BOTH
            .into_iter()
            .find(|&seat| self.seats[seat].occupant == Some(participant))
    }

    /// Creation time.
    #[must_use]
    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    /// Last time the persistence layer touched this session.
    #[must_use]
    pub fn updated_at(&self) -> Timestamp {
        self.updated_at
    }

    /// Record activity. Called by the persistence layer on save.
    pub fn touch(&mut self, now: Timestamp) {
        self.updated_at = now;
    }

    /// Move a live session to `TimedOut`.
    ///
    /// Returns `false` (and changes nothing) if the session was already
    /// terminal.
    pub fn time_out(&mut self) -> bool {
        if self.is_terminal() {
            return false;
        }
        self.phase = Phase::TimedOut;
        true
    }
}
