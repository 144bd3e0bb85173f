#![no_main]

//! Full match fuzzer.
//!
//! Drives a match with arbitrary action submissions across multiple turns
//! and asserts the state invariants after every resolution pass. This
//! catches accounting bugs (health clamping, count derivation, intel
//! underflow, phase/winner consistency) that single-component tests miss.

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use nbd::game::{check_invariants, ActionKind, GameState, Position};

/// A fuzzer-generated submission.
#[derive(Arbitrary, Debug, Clone)]
struct FuzzAction {
    /// Player id, deliberately unclamped so invalid ids get exercised.
    player: u8,
    /// Action selector.
    kind: u8,
    /// Target x, reduced into a range around the board.
    x: i8,
    /// Target y, reduced into a range around the board.
    y: i8,
}

/// Structured input for match fuzzing.
#[derive(Arbitrary, Debug)]
struct MatchInput {
    /// Submissions per turn.
    turns: Vec<Vec<FuzzAction>>,
}

fn action_kind(selector: u8) -> ActionKind {
    match selector % 5 {
        0 => ActionKind::Move,
        1 => ActionKind::Attack,
        2 => ActionKind::Hack,
        3 => ActionKind::Defend,
        _ => ActionKind::Spy,
    }
}

fuzz_target!(|input: MatchInput| {
    let mut game = GameState::new("A", "B");

    // Cap the workload to keep iterations fast
    for turn_actions in input.turns.iter().take(30) {
        for action in turn_actions.iter().take(12) {
            let target = Position::new(i32::from(action.x) % 12, i32::from(action.y) % 12);
            game.submit_action(action.player, action_kind(action.kind), target);
        }
        game.end_turn();

        let violations = check_invariants(&game);
        assert!(
            violations.is_empty(),
            "Invariants violated at turn {}: {:?}",
            game.turn(),
            violations
        );

        if game.is_game_over() {
            break;
        }
    }

    // A finished match must name a real winner; an unfinished one must not.
    match game.winner() {
        Some(winner) => assert!(winner <= 1 && game.is_game_over()),
        None => assert!(!game.is_game_over()),
    }
});
