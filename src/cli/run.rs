//! Run command implementation.

use super::output::{format_log_tail, format_state_text};
use super::{CliError, OutputFormat};
use nbd::Engine;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// A match script: two player names and a list of turns, each turn a list
/// of actions resolved in the order written.
#[derive(Debug, Deserialize)]
struct Script {
    /// Player names, exactly two.
    players: Vec<String>,
    /// Actions per turn.
    turns: Vec<Vec<ScriptAction>>,
}

/// One scripted action.
#[derive(Debug, Deserialize)]
struct ScriptAction {
    /// Acting player id (0 or 1).
    player: i32,
    /// Action name: move, attack, hack, defend, or spy.
    action: String,
    /// Target x coordinate.
    x: i32,
    /// Target y coordinate.
    y: i32,
}

/// Execute the run command.
///
/// # Errors
///
/// Returns an error if the script cannot be read or parsed, or if output
/// files cannot be written.
pub(crate) fn execute(
    script_path: &Path,
    format: OutputFormat,
    save: Option<PathBuf>,
    quiet: bool,
) -> Result<(), CliError> {
    let script_text = fs::read_to_string(script_path)
        .map_err(|e| CliError::new(format!("Failed to read {}: {e}", script_path.display())))?;
    let script: Script = serde_json::from_str(&script_text)
        .map_err(|e| CliError::new(format!("Invalid script: {e}")))?;

    if script.players.len() != 2 {
        return Err(CliError::new(format!(
            "Script must name exactly 2 players, found {}",
            script.players.len()
        )));
    }

    let mut engine = Engine::new();
    engine.initialize(&script.players[0], &script.players[1]);

    for turn_actions in &script.turns {
        if engine.is_game_over() {
            break;
        }
        let log_before = engine.log().len();
        for action in turn_actions {
            engine.submit_action(action.player, &action.action, action.x, action.y);
        }
        engine.end_turn();

        if !quiet {
            let log = engine.log();
            print!("{}", format_log_tail(log, log.len() - log_before));
        }
    }

    if let Some(save_path) = save {
        fs::write(&save_path, engine.export_state())
            .map_err(|e| CliError::new(format!("Failed to save snapshot: {e}")))?;
        if !quiet {
            println!("Snapshot saved to: {}", save_path.display());
        }
    }

    match format {
        OutputFormat::Text => {
            let state = engine
                .state()
                .ok_or_else(|| CliError::new("No match state after run"))?;
            println!();
            print!("{}", format_state_text(state));
        }
        OutputFormat::Json => {
            println!("{}", engine.export_state());
        }
    }

    Ok(())
}
