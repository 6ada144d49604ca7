//! Property tests over random action sequences.
//!
//! Each case plays a duel by picking arbitrary proposed actions (legal or
//! not) for arbitrary seats and checks the state machine invariants after
//! every attempt.

use proptest::prelude::*;

use slap_duel::{
    damage_for, determine_outcome, Action, DuelConfig, DuelRules, ParticipantId, Phase, Seat,
    Session, SessionId, Timestamp,
};

fn any_action() -> impl Strategy<Value = Action> {
    prop_oneof![
        (0u8..=4).prop_map(Action::Commit),
        (0u8..=4).prop_map(Action::Guess),
        Just(Action::Club),
        Just(Action::Flinch),
    ]
}

fn any_seat() -> impl Strategy<Value = Seat> {
    prop_oneof![Just(Seat::A), Just(Seat::B)]
}

fn config() -> DuelConfig {
    DuelConfig::default().with_total_rounds(6).with_max_hp(25)
}

fn new_session(config: &DuelConfig) -> Session {
    Session::new(
        SessionId::new(1),
        ParticipantId::new(1),
        None,
        config,
        Timestamp::from_secs(0),
    )
}

proptest! {
    /// Damage table holds for every value pair in the domain.
    #[test]
    fn damage_table_is_exact(committed in 1u8..=3, guess in 1u8..=3) {
        let damage = damage_for(committed, guess);
        let (expected_committer, expected_guesser) = match committed.abs_diff(guess) {
            0 => (1, 1),
            1 => (2, 0),
            _ => (3, 0),
        };
        prop_assert_eq!(damage.to_committer, expected_committer);
        prop_assert_eq!(damage.to_guesser, expected_guesser);
    }

    /// State machine invariants under arbitrary proposed input.
    #[test]
    fn invariants_hold(steps in prop::collection::vec((any_seat(), any_action()), 0..200)) {
        let config = config();
        let rules = DuelRules::new(config.clone()).unwrap();
        let mut session = new_session(&config);

        for (seat, action) in steps {
            let before = session.clone();
            let legal = rules.check_legal(&session, seat, action).is_ok();
            let result = rules.apply(&mut session, seat, action);

            if !legal {
                // Rejected input never mutates
                prop_assert!(result.is_err());
                prop_assert_eq!(&session, &before);
                continue;
            }
            let records = result.unwrap();
            prop_assert!(!records.is_empty());
            prop_assert_eq!(records[0].seat, seat);
            prop_assert_eq!(records[0].round, before.round());

            // Counters are monotonic and bounded
            for s in Seat::BOTH {
                prop_assert!(session.clubs_used(s) >= before.clubs_used(s));
                prop_assert!(session.flinches_used(s) >= before.flinches_used(s));
                prop_assert!(session.clubs_used(s) <= config.max_clubs);
                prop_assert!(session.flinches_used(s) <= config.max_flinches);
            }

            match action {
                Action::Guess(_) if !session.is_terminal() => {
                    // A surviving round advances by exactly one and opens by parity
                    prop_assert_eq!(session.round(), before.round() + 1);
                    prop_assert_eq!(session.phase(), Phase::Committing(Seat::opening(session.round())));
                    prop_assert_eq!(session.pending_commit(Seat::A), None);
                    prop_assert_eq!(session.pending_commit(Seat::B), None);
                }
                Action::Guess(_) => {
                    prop_assert_eq!(session.round(), before.round());
                }
                Action::Commit(v) => {
                    prop_assert_eq!(session.round(), before.round());
                    prop_assert_eq!(session.pending_commit(seat), Some(v));
                    prop_assert_eq!(session.current_turn(), Some(seat.opponent()));
                }
                Action::Club | Action::Flinch => {
                    prop_assert_eq!(session.round(), before.round());
                    if !session.is_terminal() {
                        prop_assert_eq!(session.phase(), Phase::Committing(seat.opponent()));
                    }
                }
            }

            if session.is_terminal() {
                prop_assert!(determine_outcome(&session).is_ok());
            } else {
                prop_assert!(session.round() <= config.total_rounds);
                prop_assert!(determine_outcome(&session).is_err());
            }
        }
    }

    /// A duel played only through legal actions always terminates.
    #[test]
    fn legal_play_terminates(choices in prop::collection::vec(0usize..8, 300)) {
        let config = config();
        let rules = DuelRules::new(config.clone()).unwrap();
        let mut session = new_session(&config);

        for pick in choices {
            let Some(seat) = session.current_turn() else { break };
            let actions = rules.legal_actions(&session, seat);
            prop_assert!(!actions.is_empty());
            let action = actions[pick % actions.len()];
            rules.apply(&mut session, seat, action).unwrap();
        }

        // At most 6 rounds plus 8 interrupts of two actions each
        prop_assert!(session.is_terminal());
    }
}
