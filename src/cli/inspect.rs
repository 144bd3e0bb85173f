//! Inspect command implementation.

use super::output::{format_log_tail, format_state_text};
use super::{CliError, OutputFormat};
use nbd::Snapshot;
use std::fs;
use std::path::Path;

/// How many trailing log lines the text view shows.
const LOG_TAIL_LINES: usize = 10;

/// Execute the inspect command.
///
/// # Errors
///
/// Returns an error if the snapshot cannot be read, parsed, or restored.
pub(crate) fn execute(snapshot_path: &Path, format: OutputFormat) -> Result<(), CliError> {
    let json = fs::read_to_string(snapshot_path)
        .map_err(|e| CliError::new(format!("Failed to read {}: {e}", snapshot_path.display())))?;

    // Restoring validates the payload and normalizes hostile values.
    let state = Snapshot::from_json(&json)?.restore()?;

    match format {
        OutputFormat::Text => {
            print!("{}", format_state_text(&state));
            println!("\nRecent events:");
            print!("{}", format_log_tail(state.log(), LOG_TAIL_LINES));
        }
        OutputFormat::Json => {
            println!("{}", Snapshot::capture(&state).to_json());
        }
    }

    Ok(())
}
