//! Rules engine scenario tests.
//!
//! These drive `DuelRules` through the public API only: damage, round
//! advancement, interrupts, exhaustion, knockouts and outcome.

use std::time::Duration;

use slap_duel::{
    determine_outcome, Action, ActionKind, DuelConfig, DuelRules, IllegalAction, Outcome,
    OutcomeError, ParticipantId, Phase, Seat, Session, SessionId, Timestamp,
};

fn duel(config: DuelConfig) -> (DuelRules, Session) {
    let session = Session::new(
        SessionId::new(1),
        ParticipantId::new(100),
        Some(ParticipantId::new(200)),
        &config,
        Timestamp::from_secs(1_000),
    );
    (DuelRules::new(config).unwrap(), session)
}

/// Play one full round: whoever commits picks `commit`, the other guesses.
fn play_round(rules: &DuelRules, session: &mut Session, commit: u8, guess: u8) {
    let Phase::Committing(committer) = session.phase() else {
        panic!("round must start in a commit phase, got {:?}", session.phase());
    };
    rules.apply_commit(session, committer, commit).unwrap();
    rules.apply_guess(session, committer.opponent(), guess).unwrap();
}

/// Commit 2, guess 1: committer takes 2, guesser nothing, round 2 opens with B.
#[test]
fn test_guess_off_by_one() {
    let (rules, mut session) = duel(DuelConfig::default());

    rules.apply_commit(&mut session, Seat::A, 2).unwrap();
    let records = rules.apply_guess(&mut session, Seat::B, 1).unwrap();

    assert_eq!(session.hp(Seat::A), 18);
    assert_eq!(session.hp(Seat::B), 20);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].damage, 2);
    assert_eq!(session.round(), 2);
    assert_eq!(session.phase(), Phase::Committing(Seat::B));
    assert_eq!(session.current_turn(), Some(Seat::B));
    assert_eq!(session.pending_commit(Seat::A), None);
    assert_eq!(session.pending_commit(Seat::B), None);
}

/// A miss by two deals the full three damage.
#[test]
fn test_guess_off_by_two() {
    let (rules, mut session) = duel(DuelConfig::default());

    rules.apply_commit(&mut session, Seat::A, 3).unwrap();
    rules.apply_guess(&mut session, Seat::B, 1).unwrap();

    assert_eq!(session.hp(Seat::A), 17);
    assert_eq!(session.hp(Seat::B), 20);
}

/// Club from A's commit phase: B takes 4, A's club count rises, round stays.
#[test]
fn test_club_interrupt() {
    let (rules, mut session) = duel(DuelConfig::default());

    let records = rules.apply_club(&mut session, Seat::A).unwrap();

    assert_eq!(session.hp(Seat::B), 16);
    assert_eq!(session.clubs_used(Seat::A), 1);
    assert_eq!(session.round(), 1);
    assert_eq!(session.phase(), Phase::Committing(Seat::B));
    assert_eq!(records[0].kind, ActionKind::Club);
    assert_eq!(records[0].damage, 4);
}

/// Flinch from B's guess phase: A takes 1, A commits next, round stays.
#[test]
fn test_flinch_interrupt() {
    let (rules, mut session) = duel(DuelConfig::default());

    rules.apply_commit(&mut session, Seat::A, 1).unwrap();
    rules.apply_flinch(&mut session, Seat::B).unwrap();

    assert_eq!(session.hp(Seat::A), 19);
    assert_eq!(session.flinches_used(Seat::B), 1);
    assert_eq!(session.round(), 1);
    assert_eq!(session.phase(), Phase::Committing(Seat::A));
}

/// Club may be used from either seat's commit phase, but only by the seat to act.
#[test]
fn test_clubs_exhaust() {
    let (rules, mut session) = duel(DuelConfig::default());

    for _ in 0..2 {
        rules.apply_club(&mut session, Seat::A).unwrap();
        rules.apply_club(&mut session, Seat::B).unwrap();
    }
    assert_eq!(session.clubs_used(Seat::A), 2);
    assert_eq!(session.phase(), Phase::Committing(Seat::A));

    let before = session.clone();
    assert_eq!(
        rules.apply_club(&mut session, Seat::A),
        Err(IllegalAction::Exhausted(ActionKind::Club))
    );
    assert_eq!(session, before);
    assert_eq!(session.hp(Seat::A), 12);
    assert_eq!(session.hp(Seat::B), 12);
}

/// Flinches run out the same way.
#[test]
fn test_flinches_exhaust() {
    let config = DuelConfig::default().with_max_flinches(1);
    let (rules, mut session) = duel(config);

    rules.apply_commit(&mut session, Seat::A, 2).unwrap();
    rules.apply_flinch(&mut session, Seat::B).unwrap();
    rules.apply_commit(&mut session, Seat::A, 2).unwrap();

    assert_eq!(
        rules.check_legal(&session, Seat::B, Action::Flinch),
        Err(IllegalAction::Exhausted(ActionKind::Flinch))
    );
    assert!(!rules.legal_actions(&session, Seat::B).contains(&Action::Flinch));
}

/// The opening seat alternates strictly by round parity.
#[test]
fn test_round_start_alternates() {
    let (rules, mut session) = duel(DuelConfig::default().with_max_hp(100).with_total_rounds(8));

    for round in 1..=7 {
        assert_eq!(session.round(), round);
        let expected = if round % 2 == 1 { Seat::A } else { Seat::B };
        assert_eq!(session.phase(), Phase::Committing(expected));
        play_round(&rules, &mut session, 1, 2);
    }
}

/// Interrupts inside a round do not disturb parity of the next round.
#[test]
fn test_interrupt_then_round() {
    let (rules, mut session) = duel(DuelConfig::default());

    // A clubs, so B commits in round 1; A guesses and round 2 opens with B
    rules.apply_club(&mut session, Seat::A).unwrap();
    rules.apply_commit(&mut session, Seat::B, 3).unwrap();
    rules.apply_guess(&mut session, Seat::A, 3).unwrap();

    assert_eq!(session.round(), 2);
    assert_eq!(session.phase(), Phase::Committing(Seat::B));
    assert_eq!(session.hp(Seat::A), 19);
    assert_eq!(session.hp(Seat::B), 15);
}

/// Exact guesses every round leave equal HP; the round limit ends in a draw.
#[test]
fn test_round_limit_draw() {
    let (rules, mut session) = duel(DuelConfig::default());

    for _ in 0..5 {
        assert_eq!(determine_outcome(&session), Err(OutcomeError::NotOverYet));
        play_round(&rules, &mut session, 2, 2);
    }

    assert_eq!(session.phase(), Phase::Ended);
    assert_eq!(session.round(), 5);
    assert_eq!(session.hp(Seat::A), 15);
    assert_eq!(session.hp(Seat::B), 15);
    assert_eq!(determine_outcome(&session), Ok(Outcome::Draw));
}

/// The round limit decides on HP when nobody is knocked out.
#[test]
fn test_round_limit_hp_winner() {
    let (rules, mut session) = duel(DuelConfig::default().with_total_rounds(2));

    // Round 1: A commits 1, B guesses 3 (A takes 3)
    play_round(&rules, &mut session, 1, 3);
    // Round 2: B commits 2, A guesses 1 (B takes 2)
    play_round(&rules, &mut session, 2, 1);

    assert_eq!(session.phase(), Phase::Ended);
    assert_eq!(determine_outcome(&session), Ok(Outcome::Winner(Seat::B)));
}

/// An exact guess that drops both seats to zero is a draw.
#[test]
fn test_double_knockout() {
    let (rules, mut session) = duel(DuelConfig::default().with_max_hp(1));

    play_round(&rules, &mut session, 2, 2);

    assert_eq!(session.phase(), Phase::Ended);
    assert_eq!(session.hp(Seat::A), 0);
    assert_eq!(session.hp(Seat::B), 0);
    assert_eq!(determine_outcome(&session), Ok(Outcome::Draw));
}

/// A knockout ends the duel before the round limit; HP may go negative.
#[test]
fn test_knockout_by_guess() {
    let (rules, mut session) = duel(DuelConfig::default().with_max_hp(2));

    play_round(&rules, &mut session, 3, 1);

    assert_eq!(session.phase(), Phase::Ended);
    assert_eq!(session.hp(Seat::A), -1);
    assert_eq!(session.displayed_hp(Seat::A), 0);
    assert_eq!(session.round(), 1);
    assert_eq!(determine_outcome(&session), Ok(Outcome::Winner(Seat::B)));
    assert!(rules.legal_actions(&session, Seat::A).is_empty());
    assert!(rules.legal_actions(&session, Seat::B).is_empty());
}

/// A flinch can finish a duel too.
#[test]
fn test_knockout_by_flinch() {
    let (rules, mut session) = duel(DuelConfig::default().with_max_hp(1));

    rules.apply_commit(&mut session, Seat::A, 1).unwrap();
    rules.apply_flinch(&mut session, Seat::B).unwrap();

    assert_eq!(session.phase(), Phase::Ended);
    assert_eq!(determine_outcome(&session), Ok(Outcome::Winner(Seat::B)));
}

/// Idle strictly longer than the timeout counts as timed out.
#[test]
fn test_timeout_predicate() {
    let config = DuelConfig::default();
    let (rules, mut session) = duel(config.clone());
    let now = Timestamp::from_secs(50_000);

    session.touch(now.minus(config.timeout + Duration::from_secs(1)));
    assert!(rules.is_timed_out(&session, now));

    session.touch(now.minus(config.timeout - Duration::from_secs(1)));
    assert!(!rules.is_timed_out(&session, now));
}
