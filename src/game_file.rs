//! The JSON game-file format: two decision problems (one per player) and a
//! sparse payoff table, as read from disk by the `cfr-train` and `solve`
//! binaries.
//!
//! ```json
//! {
//!   "decision_problem_pl1": [ { "id": "...", "type": "decision"|"observation", ... } ],
//!   "decision_problem_pl2": [ ... ],
//!   "utility_pl1": [ { "sequence_pl1": ["id","action"], "sequence_pl2": ["id","action"], "value": 1.0 } ]
//! }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SolverError};
use crate::sequence_form::{PayoffEntry, PayoffTable};
use crate::treeplex::{Node, NodeKind, Sequence, Treeplex};

/// One node as it appears on disk: `type` selects whether `actions` +
/// `parent_sequence`, or `signals`, are populated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawNode {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub parent_edge: Option<(String, String)>,
    #[serde(default)]
    pub actions: Option<Vec<String>>,
    #[serde(default)]
    pub parent_sequence: Option<Sequence>,
    #[serde(default)]
    pub signals: Option<Vec<String>>,
}

impl RawNode {
    pub fn decision(
        id: impl Into<String>,
        actions: Vec<String>,
        parent_edge: Option<(String, String)>,
        parent_sequence: Option<Sequence>,
    ) -> Self {
        Self {
            id: id.into(),
            kind: "decision".to_string(),
            parent_edge,
            actions: Some(actions),
            parent_sequence,
            signals: None,
        }
    }

    pub fn observation(
        id: impl Into<String>,
        signals: Vec<String>,
        parent_edge: Option<(String, String)>,
    ) -> Self {
        Self {
            id: id.into(),
            kind: "observation".to_string(),
            parent_edge,
            actions: None,
            parent_sequence: None,
            signals: Some(signals),
        }
    }
}

fn convert_node(raw: RawNode) -> Result<Node> {
    match raw.kind.as_str() {
        "decision" => {
            let actions = raw.actions.ok_or_else(|| {
                SolverError::MalformedGame(format!("decision node {:?} is missing actions", raw.id))
            })?;
            Ok(Node {
                id: raw.id,
                kind: NodeKind::Decision {
                    actions,
                    parent_sequence: raw.parent_sequence,
                },
                parent_edge: raw.parent_edge,
            })
        }
        "observation" => {
            let signals = raw.signals.ok_or_else(|| {
                SolverError::MalformedGame(format!("observation node {:?} is missing signals", raw.id))
            })?;
            Ok(Node {
                id: raw.id,
                kind: NodeKind::Observation { signals },
                parent_edge: raw.parent_edge,
            })
        }
        other => Err(SolverError::MalformedGame(format!(
            "node {:?} has unknown type {:?} (expected \"decision\" or \"observation\")",
            raw.id, other
        ))),
    }
}

/// One payoff-table entry as it appears on disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawPayoffEntry {
    pub sequence_pl1: Sequence,
    pub sequence_pl2: Sequence,
    pub value: f64,
}

/// The on-disk game-file schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameFile {
    pub decision_problem_pl1: Vec<RawNode>,
    pub decision_problem_pl2: Vec<RawNode>,
    pub utility_pl1: Vec<RawPayoffEntry>,
}

/// A fully loaded and validated game: both treeplexes and the resolved
/// payoff table.
pub struct LoadedGame {
    pub treeplex_pl1: Treeplex,
    pub treeplex_pl2: Treeplex,
    pub payoff: PayoffTable,
}

/// Builds and validates a [`LoadedGame`] from an in-memory [`GameFile`].
/// Used both by the file loader below and by library-side game generators
/// (`games::liars_dice`) that build a `GameFile` programmatically.
pub fn build(game: GameFile) -> Result<LoadedGame> {
    let nodes1: Vec<Node> = game
        .decision_problem_pl1
        .into_iter()
        .map(convert_node)
        .collect::<Result<_>>()?;
    let nodes2: Vec<Node> = game
        .decision_problem_pl2
        .into_iter()
        .map(convert_node)
        .collect::<Result<_>>()?;
    let treeplex_pl1 = Treeplex::build(nodes1)?;
    let treeplex_pl2 = Treeplex::build(nodes2)?;

    let raw_payoff: Vec<PayoffEntry> = game
        .utility_pl1
        .into_iter()
        .map(|e| PayoffEntry {
            sequence_pl1: e.sequence_pl1,
            sequence_pl2: e.sequence_pl2,
            value: e.value,
        })
        .collect();
    let payoff = PayoffTable::resolve(&raw_payoff, &treeplex_pl1, &treeplex_pl2)?;

    Ok(LoadedGame {
        treeplex_pl1,
        treeplex_pl2,
        payoff,
    })
}

/// Loads and validates a game file from a JSON string.
pub fn load_str(text: &str) -> Result<LoadedGame> {
    let game: GameFile =
        serde_json::from_str(text).map_err(|e| SolverError::MalformedGame(e.to_string()))?;
    build(game)
}

/// Loads and validates a game file from disk.
pub fn load_file<P: AsRef<Path>>(path: P) -> Result<LoadedGame> {
    let text = fs::read_to_string(&path)
        .map_err(|e| SolverError::MalformedGame(format!("{}: {}", path.as_ref().display(), e)))?;
    load_str(&text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matching_pennies_file() -> GameFile {
        GameFile {
            decision_problem_pl1: vec![RawNode::decision(
                "p1",
                vec!["H".to_string(), "T".to_string()],
                None,
                None,
            )],
            decision_problem_pl2: vec![RawNode::decision(
                "p2",
                vec!["H".to_string(), "T".to_string()],
                None,
                None,
            )],
            utility_pl1: vec![
                RawPayoffEntry {
                    sequence_pl1: Sequence::new("p1", "H"),
                    sequence_pl2: Sequence::new("p2", "H"),
                    value: 1.0,
                },
                RawPayoffEntry {
                    sequence_pl1: Sequence::new("p1", "T"),
                    sequence_pl2: Sequence::new("p2", "T"),
                    value: 1.0,
                },
            ],
        }
    }

    #[test]
    fn loads_a_well_formed_game() {
        let loaded = build(matching_pennies_file()).unwrap();
        assert_eq!(loaded.treeplex_pl1.num_sequences(), 2);
        assert_eq!(loaded.payoff.len(), 2);
    }

    #[test]
    fn round_trips_through_json() {
        let json = serde_json::to_string(&matching_pennies_file()).unwrap();
        let loaded = load_str(&json).unwrap();
        assert_eq!(loaded.treeplex_pl2.num_sequences(), 2);
    }

    #[test]
    fn unknown_node_type_is_malformed() {
        let mut file = matching_pennies_file();
        file.decision_problem_pl1[0].kind = "mystery".to_string();
        assert!(matches!(build(file), Err(SolverError::MalformedGame(_))));
    }

    #[test]
    fn payoff_entry_referencing_unknown_sequence_is_malformed() {
        let mut file = matching_pennies_file();
        file.utility_pl1.push(RawPayoffEntry {
            sequence_pl1: Sequence::new("p1", "nonexistent"),
            sequence_pl2: Sequence::new("p2", "H"),
            value: 0.0,
        });
        assert!(matches!(build(file), Err(SolverError::MalformedGame(_))));
    }
}
