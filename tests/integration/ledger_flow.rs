//! Playing tokens through the ledger.

use crate::*;

use tokening_services::TokenRejection;

#[test]
fn test_play_until_exhausted() {
    let contest = constrained(finite(2, 1, 60, Some(2)), Some(3), 10);
    let h = Harness::new(contest, TokenPolicy::infinite());
    let ledger = h.ledger();

    let play = |sub: &str, secs: i64| {
        ledger.accept_token(&h.contest, &h.participation, TASK, sub, at(secs))
    };

    play("s1", 1).unwrap();
    // Cooldown from s1 still running.
    assert!(matches!(play("s2", 5), Err(TokenRejection::Unacceptable(_))));
    play("s2", 11).unwrap();
    // Both initial tokens spent, next one arrives at 60.
    assert!(matches!(play("s3", 30), Err(TokenRejection::Unacceptable(_))));
    play("s3", 60).unwrap();
    // Lifetime total reached.
    assert!(matches!(play("s4", 500), Err(TokenRejection::Unacceptable(_))));

    assert_eq!(ledger.plays_for(PARTICIPANT).len(), 3);
    let after = ledger
        .availability(&h.contest, &h.participation, TASK, at(1000))
        .unwrap();
    assert_eq!(after, answer(Tokens::Finite(0), None, None));
}

#[test]
fn test_double_play_on_submission() {
    let h = Harness::new(TokenPolicy::infinite(), TokenPolicy::infinite());
    let ledger = h.ledger();

    ledger
        .accept_token(&h.contest, &h.participation, TASK, "s1", at(1))
        .unwrap();
    let err = ledger
        .accept_token(&h.contest, &h.participation, TASK, "s1", at(2))
        .unwrap_err();
    assert!(matches!(err, TokenRejection::AlreadyPlayed(_)));
}

#[test]
fn test_unstarted_participant_cannot_play() {
    let schedule = Schedule::per_user(t0(), Duration::from_secs(100));
    let h = Harness::with_schedule(schedule, None, TokenPolicy::infinite(), TokenPolicy::infinite());
    let ledger = h.ledger();

    let err = ledger
        .accept_token(&h.contest, &h.participation, TASK, "s1", at(1))
        .unwrap_err();
    assert!(matches!(err, TokenRejection::Unacceptable(_)));
}

#[test]
fn test_seeded_ledger_matches_direct_query() {
    let mut h = Harness::new(finite(1, 2, 5, None), finite(2, 1, 4, Some(5)));
    h.add_token_to_task(102);
    let ledger = h.ledger();

    let via_ledger = ledger
        .availability(&h.contest, &h.participation, TASK, at(103))
        .unwrap();
    assert_eq!(via_ledger, h.call(103));
}
