//! Demo command implementation.

use super::output::{format_log_tail, format_state_text};
use super::{CliError, OutputFormat};
use nbd::Engine;

/// Scripted turns exercising every action kind: both sides advance, spy
/// and defend, then trade hacks and attacks.
const DEMO_TURNS: &[&[(i32, &str, i32, i32)]] = &[
    &[
        (0, "move", 0, -1),
        (1, "move", 0, 1),
        (0, "spy", 0, 0),
        (1, "defend", 1, 3),
    ],
    &[
        (0, "hack", 1, 3),
        (1, "spy", 0, 0),
        (0, "move", 1, 0),
        (1, "move", -1, 1),
    ],
    &[
        (0, "attack", 0, 1),
        (1, "attack", 0, -1),
        (0, "defend", 0, -4),
    ],
    &[(0, "hack", -1, 3), (1, "hack", -1, -3), (0, "spy", 0, 0)],
];

/// Execute the demo command.
///
/// # Errors
///
/// Returns an error if output fails (it does not).
pub(crate) fn execute(format: OutputFormat) -> Result<(), CliError> {
    let mut engine = Engine::new();
    engine.initialize("Blue", "Red");

    for turn_actions in DEMO_TURNS {
        if engine.is_game_over() {
            break;
        }
        let log_before = engine.log().len();
        for &(player, action, x, y) in *turn_actions {
            engine.submit_action(player, action, x, y);
        }
        engine.end_turn();

        if format == OutputFormat::Text {
            let log = engine.log();
            print!("{}", format_log_tail(log, log.len() - log_before));
        }
    }

    match format {
        OutputFormat::Text => {
            let state = engine
                .state()
                .ok_or_else(|| CliError::new("No match state after demo"))?;
            println!();
            print!("{}", format_state_text(state));
        }
        OutputFormat::Json => {
            println!("{}", engine.export_state());
        }
    }

    Ok(())
}
