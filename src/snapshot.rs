//! Match snapshots: a stable JSON representation of the full match state.
//!
//! The schema uses camelCase keys and encodes absent winners as `-1`, so a
//! snapshot is directly consumable by JavaScript frontends. Import never
//! trusts the payload: health values are clamped, unit counts re-derived,
//! and structural problems reject the whole snapshot.

use serde::{Deserialize, Serialize};

use crate::error::{SnapshotError, SnapshotResult};
use crate::game::{
    GameState, InfantryGroup, LongRangeUnit, Node, NodeKind, Phase, Player, PlayerId, Position,
};

/// Serialized form of a whole match.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    /// Turn number, starting at 1.
    pub current_turn: u32,
    /// Phase ordinal (0 planning, 1 executing, 2 game over).
    pub phase: i32,
    /// Winner id, or `-1` while the match is undecided.
    pub winner: i32,
    /// Both players, index order matching player ids.
    pub players: Vec<PlayerSnapshot>,
    /// The chronological event log.
    pub game_log: Vec<String>,
}

/// Serialized form of one player.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerSnapshot {
    /// Player id.
    pub id: u8,
    /// Display name.
    pub name: String,
    /// Intel balance.
    pub intel_points: i32,
    /// The three installations.
    pub nodes: NodesSnapshot,
    /// Infantry groups in creation order.
    pub infantry: Vec<UnitSnapshot>,
    /// The long-range unit.
    pub long_range: UnitSnapshot,
}

/// Serialized form of a player's three nodes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodesSnapshot {
    /// The core node.
    pub core: NodeSnapshot,
    /// The comms node.
    pub comms: NodeSnapshot,
    /// The research node.
    pub research: NodeSnapshot,
}

/// Serialized form of a single node.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeSnapshot {
    /// Node kind name ("core", "comms", "research").
    #[serde(rename = "type")]
    pub kind: String,
    /// Board x coordinate.
    pub pos_x: i32,
    /// Board y coordinate.
    pub pos_y: i32,
    /// Current hit points.
    pub hp: i32,
    /// Maximum hit points.
    pub max_hp: i32,
    /// Whether the defense flag is armed.
    pub defended: bool,
}

/// Serialized form of a unit stack (infantry group or long-range unit).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnitSnapshot {
    /// Unit id.
    pub id: String,
    /// Board x coordinate.
    pub pos_x: i32,
    /// Board y coordinate.
    pub pos_y: i32,
    /// Combatants remaining. Informational: import re-derives the count
    /// from hit points.
    pub count: i32,
    /// Current pooled hit points.
    pub hp: i32,
    /// Maximum pooled hit points.
    pub max_hp: i32,
}

impl Snapshot {
    /// Capture the full state of a match.
    #[must_use]
    pub fn capture(state: &GameState) -> Self {
        Self {
            current_turn: state.turn(),
            phase: state.phase().ordinal(),
            winner: state.winner().map_or(-1, i32::from),
            players: (0..=1u8)
                .filter_map(|id| state.player(id))
                .map(snapshot_player)
                .collect(),
            game_log: state.log().to_vec(),
        }
    }

    /// Serialize to pretty-printed JSON.
    #[must_use]
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }

    /// Parse a snapshot from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError::Parse`] when the payload is not valid JSON
    /// or does not match the schema.
    pub fn from_json(json: &str) -> SnapshotResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Rebuild a match from this snapshot.
    ///
    /// Stored health values are clamped into range and unit counts
    /// re-derived from hit points rather than trusted. Player ids follow
    /// slot order regardless of what the snapshot claims.
    ///
    /// # Errors
    ///
    /// Returns an error when the phase ordinal, winner id, or player count
    /// is structurally invalid, or when the winner and phase disagree.
    pub fn restore(&self) -> SnapshotResult<GameState> {
        let phase =
            Phase::from_ordinal(self.phase).ok_or(SnapshotError::InvalidPhase(self.phase))?;

        // The executing phase only exists inside a resolution pass; no
        // export can carry it, and a match restored into it would never
        // leave it.
        if matches!(phase, Phase::Executing) {
            return Err(SnapshotError::InvalidPhase(self.phase));
        }

        let winner: Option<PlayerId> = match self.winner {
            -1 => None,
            0 => Some(0),
            1 => Some(1),
            other => return Err(SnapshotError::InvalidWinner(other)),
        };

        // A winner exists exactly when the match is over.
        match (winner, phase) {
            (Some(_), Phase::GameOver) | (None, Phase::Planning) => {}
            _ => {
                return Err(SnapshotError::WinnerPhaseMismatch {
                    phase: self.phase,
                    winner: self.winner,
                });
            }
        }

        if self.players.len() != 2 {
            return Err(SnapshotError::WrongPlayerCount(self.players.len()));
        }

        let players = [
            restore_player(0, &self.players[0]),
            restore_player(1, &self.players[1]),
        ];

        Ok(GameState::from_parts(
            self.current_turn.max(1),
            phase,
            winner,
            players,
            self.game_log.clone(),
        ))
    }
}

fn snapshot_player(player: &Player) -> PlayerSnapshot {
    PlayerSnapshot {
        id: player.id,
        name: player.name.clone(),
        intel_points: player.intel_points(),
        nodes: NodesSnapshot {
            core: snapshot_node(player.node(NodeKind::Core)),
            comms: snapshot_node(player.node(NodeKind::Comms)),
            research: snapshot_node(player.node(NodeKind::Research)),
        },
        infantry: player.infantry().iter().map(snapshot_infantry).collect(),
        long_range: snapshot_long_range(player.long_range()),
    }
}

fn snapshot_node(node: &Node) -> NodeSnapshot {
    NodeSnapshot {
        kind: node.kind.name().to_string(),
        pos_x: node.position.x,
        pos_y: node.position.y,
        hp: node.hp(),
        max_hp: node.max_hp(),
        defended: node.is_defended(),
    }
}

fn snapshot_infantry(group: &InfantryGroup) -> UnitSnapshot {
    UnitSnapshot {
        id: group.id().to_string(),
        pos_x: group.position().x,
        pos_y: group.position().y,
        count: group.count(),
        hp: group.hp(),
        max_hp: group.max_hp(),
    }
}

fn snapshot_long_range(unit: &LongRangeUnit) -> UnitSnapshot {
    UnitSnapshot {
        id: unit.id().to_string(),
        pos_x: unit.position().x,
        pos_y: unit.position().y,
        count: unit.count(),
        hp: unit.hp(),
        max_hp: unit.max_hp(),
    }
}

fn restore_player(id: PlayerId, snapshot: &PlayerSnapshot) -> Player {
    let nodes = [
        restore_node(NodeKind::Core, &snapshot.nodes.core),
        restore_node(NodeKind::Comms, &snapshot.nodes.comms),
        restore_node(NodeKind::Research, &snapshot.nodes.research),
    ];

    let infantry = snapshot
        .infantry
        .iter()
        .map(|u| {
            InfantryGroup::from_parts(
                u.id.clone(),
                Position::new(u.pos_x, u.pos_y),
                u.hp,
                u.max_hp,
            )
        })
        .collect();

    let long_range = LongRangeUnit::from_parts(
        snapshot.long_range.id.clone(),
        Position::new(snapshot.long_range.pos_x, snapshot.long_range.pos_y),
        snapshot.long_range.hp,
        snapshot.long_range.max_hp,
    );

    Player::from_parts(
        id,
        snapshot.name.clone(),
        snapshot.intel_points,
        nodes,
        infantry,
        long_range,
    )
}

fn restore_node(kind: NodeKind, snapshot: &NodeSnapshot) -> Node {
    let mut node = Node::new(
        kind,
        Position::new(snapshot.pos_x, snapshot.pos_y),
        snapshot.hp,
        snapshot.max_hp,
    );
    node.set_defended(snapshot.defended);
    node
}
