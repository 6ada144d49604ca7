//! Policies the scripted opponent can play.
//!
//! A policy only picks an action; `ScriptedOpponent` applies it through
//! the rules engine, so a policy can never bypass validation.

use crate::core::{Action, DuelRng, Phase, Seat, Session};
use crate::rules::DuelRules;

/// Chooses one action for the seat the scripted opponent plays.
pub trait OpponentPolicy: Send + Sync {
    /// Choose an action for `seat`.
    ///
    /// Returns `None` if `seat` has nothing to do in the current phase.
    fn choose_action(
        &self,
        rules: &DuelRules,
        session: &Session,
        seat: Seat,
        rng: &mut DuelRng,
    ) -> Option<Action>;
}

/// The classic opponent.
///
/// While committing: clubs with the configured chance if a club remains,
/// otherwise commits a uniform 1-3. While guessing: the same with flinch
/// and guess. Not tuned to play well.
#[derive(Clone, Copy, Debug, Default)]
pub struct BaselinePolicy;

impl OpponentPolicy for BaselinePolicy {
    fn choose_action(
        &self,
        rules: &DuelRules,
        session: &Session,
        seat: Seat,
        rng: &mut DuelRng,
    ) -> Option<Action> {
        let config = rules.config();
        let chance = config.opponent_special_chance;
        let state = session.seat(seat);

        match session.phase() {
            Phase::Committing(s) if s == seat => {
                if state.clubs_used < config.max_clubs && rng.gen_bool(chance) {
                    Some(Action::Club)
                } else {
                    Some(Action::Commit(rng.gen_value()))
                }
            }
            Phase::Guessing { guesser, .. } if guesser == seat => {
                if state.flinches_used < config.max_flinches && rng.gen_bool(chance) {
                    Some(Action::Flinch)
                } else {
                    Some(Action::Guess(rng.gen_value()))
                }
            }
            _ => None,
        }
    }
}

/// Uniform random opponent.
///
/// Selects uniformly from every legal action, specials included.
#[derive(Clone, Copy, Debug, Default)]
pub struct UniformOpponent;

impl OpponentPolicy for UniformOpponent {
    fn choose_action(
        &self,
        rules: &DuelRules,
        session: &Session,
        seat: Seat,
        rng: &mut DuelRng,
    ) -> Option<Action> {
        let actions = rules.legal_actions(session, seat);
        rng.choose(&actions).copied()
    }
}
