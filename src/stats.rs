//! Player win/loss records and the leaderboard.
//!
//! How a draw counts against a player is a product decision, so it is a
//! `DrawPolicy` chosen by the caller rather than baked into settlement.
//! Draws are always counted separately; the policy only decides how they
//! weigh in `loss_score` and `win_rate`.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::core::{ParticipantId, Seat, Session};
use crate::rules::Outcome;

/// How draws weigh against a player.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DrawPolicy {
    /// Draws do not count as losses.
    #[default]
    Neutral,
    /// Each draw counts as half a loss.
    HalfLoss,
    /// Each draw counts as a full loss.
    FullLoss,
}

/// Career record for one participant.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRecord {
    /// Whose record this is.
    pub participant: ParticipantId,
    /// Matches won.
    pub wins: u32,
    /// Matches lost.
    pub losses: u32,
    /// Matches drawn.
    pub draws: u32,
}

impl PlayerRecord {
    /// Empty record.
    #[must_use]
    pub fn new(participant: ParticipantId) -> Self {
        Self {
            participant,
            wins: 0,
            losses: 0,
            draws: 0,
        }
    }

    /// Finished matches of any result.
    #[must_use]
    pub fn games(&self) -> u32 {
        self.wins + self.losses + self.draws
    }

    /// Losses with draws weighted by `policy`.
    #[must_use]
    pub fn loss_score(&self, policy: DrawPolicy) -> f64 {
        let draws = f64::from(self.draws);
        let weight = match policy {
            DrawPolicy::Neutral => 0.0,
            DrawPolicy::HalfLoss => 0.5,
            DrawPolicy::FullLoss => 1.0,
        };
        f64::from(self.losses) + draws * weight
    }

    /// Wins over wins plus weighted losses; zero with no decided games.
    #[must_use]
    pub fn win_rate(&self, policy: DrawPolicy) -> f64 {
        let wins = f64::from(self.wins);
        let decided = wins + self.loss_score(policy);
        if decided > 0.0 {
            wins / decided
        } else {
            0.0
        }
    }
}

/// Records for every participant seen so far.
///
/// Held in memory by whoever settles duels; nothing here is persisted.
#[derive(Clone, Debug, Default)]
pub struct Standings {
    policy: DrawPolicy,
    records: FxHashMap<ParticipantId, PlayerRecord>,
}

impl Standings {
    /// Empty standings with a draw policy.
    #[must_use]
    pub fn new(policy: DrawPolicy) -> Self {
        Self {
            policy,
            records: FxHashMap::default(),
        }
    }

    /// The draw policy in force.
    #[must_use]
    pub fn policy(&self) -> DrawPolicy {
        self.policy
    }

    /// Record for a participant, if they have finished a match.
    #[must_use]
    pub fn record(&self, participant: ParticipantId) -> Option<&PlayerRecord> {
        self.records.get(&participant)
    }

    /// Credit a finished match to both occupants.
    ///
    /// The scripted opponent has no record; only bound seats are updated.
    pub fn settle(&mut self, session: &Session, outcome: Outcome) {
        for seat in Seat::BOTH {
            let Some(participant) = session.occupant(seat) else {
                continue;
            };
            let record = self
                .records
                .entry(participant)
                .or_insert_with(|| PlayerRecord::new(participant));
            match outcome {
                Outcome::Draw => record.draws += 1,
                Outcome::Winner(winner) if winner == seat => record.wins += 1,
                Outcome::Winner(_) => record.losses += 1,
            }
        }
    }

    /// Top `limit` records by wins, then win rate.
    #[must_use]
    pub fn leaderboard(&self, limit: usize) -> Vec<PlayerRecord> {
        let policy = self.policy;
        let mut ranked: Vec<PlayerRecord> = self.records.values().cloned().collect();
        ranked.sort_by(|a, b| {
            b.wins
                .cmp(&a.wins)
                .then_with(|| b.win_rate(policy).total_cmp(&a.win_rate(policy)))
                .then_with(|| a.participant.cmp(&b.participant))
        });
        ranked.truncate(limit);
        ranked
    }
}
