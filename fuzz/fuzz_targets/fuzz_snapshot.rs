#![no_main]

//! Snapshot import fuzzer.
//!
//! Feeds arbitrary bytes to the snapshot parser. Whatever survives parsing
//! and structural validation must restore into a match that satisfies the
//! state invariants and survives a capture/restore round trip.

use libfuzzer_sys::fuzz_target;
use nbd::game::check_invariants;
use nbd::Snapshot;

fuzz_target!(|data: &[u8]| {
    let Ok(json) = std::str::from_utf8(data) else {
        return;
    };

    let Ok(snapshot) = Snapshot::from_json(json) else {
        return;
    };

    let Ok(state) = snapshot.restore() else {
        return;
    };

    // Hostile values must have been clamped away during restore.
    let violations = check_invariants(&state);
    assert!(
        violations.is_empty(),
        "Restored snapshot violates invariants: {:?}",
        violations
    );

    // A restored match must round-trip cleanly through its own export.
    let reexported = Snapshot::capture(&state).to_json();
    let again = Snapshot::from_json(&reexported)
        .expect("re-exported snapshot must parse")
        .restore()
        .expect("re-exported snapshot must restore");
    assert_eq!(again.turn(), state.turn());
    assert_eq!(again.phase(), state.phase());
    assert_eq!(again.winner(), state.winner());
    assert_eq!(again.log(), state.log());
});
