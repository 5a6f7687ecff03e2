//! Round resolution integration tests.
//!
//! These drive full bet/roll/resolve cycles with scripted dice and
//! verify both the resulting state and the exact notification stream
//! observers see.

use std::cell::RefCell;
use std::rc::Rc;

use craps_engine::dice::ScriptedDice;
use craps_engine::{CrapsEngine, RollOutcome, RoundResult, StateChange};

fn scripted(faces: impl IntoIterator<Item = u8>) -> CrapsEngine {
    CrapsEngine::with_roller(Box::new(ScriptedDice::new(faces)))
}

/// Attach a listener that records every change, in order.
fn record_changes(engine: &mut CrapsEngine) -> Rc<RefCell<Vec<StateChange>>> {
    let log: Rc<RefCell<Vec<StateChange>>> = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&log);
    engine.add_listener(move |change| sink.borrow_mut().push(*change));
    log
}

/// A natural on the come-out resolves immediately for the player and
/// pays twice the stake.
#[test]
fn test_natural_pays_double_the_stake() {
    let mut engine = scripted([4, 3]);
    engine.set_bankroll(100);
    engine.place_bet(10).unwrap();

    let outcome = engine.roll();

    assert_eq!(outcome, RollOutcome::Resolved(RoundResult::Natural));
    assert_eq!(engine.bankroll(), 110);
    assert_eq!(engine.current_bet(), 0);
    assert_eq!(engine.player_wins(), 1);
    assert_eq!(engine.house_wins(), 0);
    assert!(engine.game_won());
    assert!(!engine.is_game_active());
}

/// Snake eyes on the come-out is craps: the house wins and the stake is
/// gone.
#[test]
fn test_craps_forfeits_the_stake() {
    let mut engine = scripted([1, 1]);
    engine.set_bankroll(100);
    engine.place_bet(10).unwrap();

    let outcome = engine.roll();

    assert_eq!(outcome, RollOutcome::Resolved(RoundResult::Craps));
    assert_eq!(engine.bankroll(), 90);
    assert_eq!(engine.current_bet(), 0);
    assert_eq!(engine.house_wins(), 1);
    assert!(!engine.game_won());
    assert!(!engine.is_game_active());
}

/// A come-out total of 5 establishes the point; repeating it wins.
#[test]
fn test_point_established_then_made() {
    let mut engine = scripted([2, 3, 3, 2]);
    engine.set_bankroll(100);
    engine.place_bet(10).unwrap();

    assert_eq!(engine.roll(), RollOutcome::PointSet(5));
    assert_eq!(engine.point(), 5);
    assert!(engine.is_game_active());
    assert_eq!(engine.player_wins(), 0);
    assert_eq!(engine.house_wins(), 0);

    assert_eq!(engine.roll(), RollOutcome::Resolved(RoundResult::PointMade));
    assert_eq!(engine.point(), 0, "point resets on resolution");
    assert_eq!(engine.player_wins(), 1);
    assert_eq!(engine.bankroll(), 110);
}

/// A 7 during the point phase is a seven-out for the house.
#[test]
fn test_seven_out_during_point_phase() {
    let mut engine = scripted([2, 3, 4, 3]);
    engine.set_bankroll(100);
    engine.place_bet(10).unwrap();

    assert_eq!(engine.roll(), RollOutcome::PointSet(5));
    assert_eq!(engine.roll(), RollOutcome::Resolved(RoundResult::SevenOut));
    assert_eq!(engine.point(), 0);
    assert_eq!(engine.house_wins(), 1);
    assert_eq!(engine.bankroll(), 90);
    assert!(!engine.game_won());
}

/// Every come-out total that is neither a natural nor craps becomes the
/// point.
#[test]
fn test_all_point_totals() {
    for (d1, d2, point) in [
        (1, 3, 4),
        (2, 3, 5),
        (3, 3, 6),
        (4, 4, 8),
        (4, 5, 9),
        (5, 5, 10),
    ] {
        let mut engine = scripted([d1, d2]);
        assert_eq!(engine.roll(), RollOutcome::PointSet(point));
        assert_eq!(engine.point(), point);
    }
}

/// 11 is a natural, 12 is craps, 3 is craps.
#[test]
fn test_come_out_edge_totals() {
    let mut engine = scripted([5, 6]);
    assert_eq!(engine.roll(), RollOutcome::Resolved(RoundResult::Natural));

    let mut engine = scripted([6, 6]);
    assert_eq!(engine.roll(), RollOutcome::Resolved(RoundResult::Craps));

    let mut engine = scripted([1, 2]);
    assert_eq!(engine.roll(), RollOutcome::Resolved(RoundResult::Craps));
}

/// Point-phase rolls that resolve nothing keep the round open.
#[test]
fn test_point_phase_non_resolving_rolls() {
    let mut engine = scripted([4, 4, 1, 2, 6, 5, 4, 4]);
    engine.set_bankroll(100);
    engine.place_bet(10).unwrap();

    assert_eq!(engine.roll(), RollOutcome::PointSet(8));
    assert_eq!(engine.roll(), RollOutcome::StillRolling); // 3: craps totals are inert now
    assert_eq!(engine.roll(), RollOutcome::StillRolling); // 11: naturals too
    assert_eq!(engine.roll(), RollOutcome::Resolved(RoundResult::PointMade));
}

/// The full notification stream for a winning come-out roll, in order:
/// dice, then settlement, then the round flags.
#[test]
fn test_notification_order_on_win() {
    let mut engine = scripted([4, 3]);
    engine.set_bankroll(100);
    engine.place_bet(10).unwrap();

    let log = record_changes(&mut engine);
    engine.roll();

    assert_eq!(
        *log.borrow(),
        vec![
            StateChange::Die1 { old: 0, new: 4 },
            StateChange::Die2 { old: 0, new: 3 },
            StateChange::Bankroll { old: 90, new: 110 },
            StateChange::CurrentBet { old: 10, new: 0 },
            StateChange::PlayerWins { old: 0, new: 1 },
            StateChange::GameActive {
                old: true,
                new: false
            },
            StateChange::GameWon {
                old: false,
                new: true
            },
        ]
    );
}

/// The notification stream for a losing come-out roll: no bankroll
/// event, the stake is simply forfeited.
#[test]
fn test_notification_order_on_loss() {
    let mut engine = scripted([1, 1]);
    engine.set_bankroll(100);
    engine.place_bet(10).unwrap();

    let log = record_changes(&mut engine);
    engine.roll();

    assert_eq!(
        *log.borrow(),
        vec![
            StateChange::Die1 { old: 0, new: 1 },
            StateChange::Die2 { old: 0, new: 1 },
            StateChange::CurrentBet { old: 10, new: 0 },
            StateChange::HouseWins { old: 0, new: 1 },
            StateChange::GameActive {
                old: true,
                new: false
            },
            StateChange::GameWon {
                old: true,
                new: false
            },
        ]
    );
}

/// Establishing a point notifies dice then point, nothing else.
#[test]
fn test_notification_order_on_point_set() {
    let mut engine = scripted([2, 3]);
    engine.set_bankroll(100);
    engine.place_bet(10).unwrap();

    let log = record_changes(&mut engine);
    engine.roll();

    assert_eq!(
        *log.borrow(),
        vec![
            StateChange::Die1 { old: 0, new: 2 },
            StateChange::Die2 { old: 0, new: 3 },
            StateChange::Point { old: 0, new: 5 },
        ]
    );
}

/// Dice notifications fire even when a face repeats its previous value.
#[test]
fn test_repeated_face_still_notifies() {
    let mut engine = scripted([3, 3, 3, 3]);
    let log = record_changes(&mut engine);

    engine.roll(); // point of 6
    engine.roll(); // same faces again, point made

    let die_events: Vec<_> = log
        .borrow()
        .iter()
        .filter(|c| matches!(c, StateChange::Die1 { .. } | StateChange::Die2 { .. }))
        .copied()
        .collect();

    assert_eq!(
        die_events,
        vec![
            StateChange::Die1 { old: 0, new: 3 },
            StateChange::Die2 { old: 0, new: 3 },
            StateChange::Die1 { old: 3, new: 3 },
            StateChange::Die2 { old: 3, new: 3 },
        ]
    );
}

/// Winning with no bet outstanding credits nothing but still counts the
/// win.
#[test]
fn test_win_with_zero_bet() {
    let mut engine = scripted([4, 3]);
    engine.set_bankroll(100);

    assert_eq!(engine.roll(), RollOutcome::Resolved(RoundResult::Natural));
    assert_eq!(engine.bankroll(), 100);
    assert_eq!(engine.player_wins(), 1);
}

/// Once the script runs out, the engine keeps rolling from the weighted
/// fallback and every round eventually resolves.
#[test]
fn test_session_continues_past_script() {
    let mut engine = scripted([2, 3]);
    engine.set_bankroll(100);
    engine.place_bet(10).unwrap();
    engine.roll(); // point of 5 from the script

    let mut rolls = 0;
    loop {
        if let RollOutcome::Resolved(_) = engine.roll() {
            break;
        }
        rolls += 1;
        assert!(rolls < 10_000, "round must eventually resolve");
    }
    assert_eq!(engine.player_wins() + engine.house_wins(), 1);
}
