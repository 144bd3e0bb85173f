//! Output formatting utilities for CLI.

use nbd::game::{GameState, NodeKind, Phase};

/// Format the full match state as human-readable text.
pub(super) fn format_state_text(state: &GameState) -> String {
    let mut output = String::new();

    output.push_str(&format!("Turn {} - {}\n", state.turn(), phase_label(state)));

    for id in 0..=1 {
        let Some(player) = state.player(id) else {
            continue;
        };
        output.push_str(&format!(
            "\nPlayer {} ({}) - {} IP\n",
            player.id,
            player.name,
            player.intel_points()
        ));

        for kind in NodeKind::ALL {
            let node = player.node(kind);
            let defended = if node.is_defended() { " [defended]" } else { "" };
            let down = if node.is_alive() { "" } else { " DOWN" };
            output.push_str(&format!(
                "  {:<8} {} {}/{} hp{defended}{down}\n",
                kind.name(),
                node.position,
                node.hp(),
                node.max_hp(),
            ));
        }

        for group in player.infantry() {
            output.push_str(&format!(
                "  {:<8} {} x{} ({}/{} hp)\n",
                group.id(),
                group.position(),
                group.count(),
                group.hp(),
                group.max_hp()
            ));
        }
        let lr = player.long_range();
        if lr.is_alive() {
            output.push_str(&format!(
                "  {:<8} {} x{} ({}/{} hp)\n",
                lr.id(),
                lr.position(),
                lr.count(),
                lr.hp(),
                lr.max_hp()
            ));
        }
    }

    output
}

/// Format the tail of the event log as indented text.
pub(super) fn format_log_tail(log: &[String], lines: usize) -> String {
    let start = log.len().saturating_sub(lines);
    log[start..]
        .iter()
        .map(|line| format!("  {line}\n"))
        .collect()
}

/// One-line summary of where the match stands.
pub(super) fn phase_label(state: &GameState) -> String {
    match state.phase() {
        Phase::Planning => "planning".to_string(),
        Phase::Executing => "executing".to_string(),
        Phase::GameOver => {
            let name = state
                .winner()
                .and_then(|id| state.player(id))
                .map_or("unknown", |p| p.name.as_str());
            format!("game over, {name} wins")
        }
    }
}
