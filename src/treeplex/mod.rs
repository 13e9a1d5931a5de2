//! The treeplex: nodes, sequences, and the sequence set Σ.
//!
//! A treeplex is one player's decision problem: a topologically-ordered list
//! of decision and observation nodes. Decision nodes own an action set and
//! chain to their parent via `parent_sequence` (the same-player sequence that
//! must have been played to reach this node); observation nodes own a signal
//! set and carry no sequence of their own. Every (decision id, action) pair
//! is a sequence; the set of all of them is Σ, indexed densely by position
//! of first appearance.

use crate::error::{Result, SolverError};
use rustc_hash::FxHashMap;

/// A player's move at a specific decision point: `(decision_id, action)`.
///
/// Serializes as a two-element JSON array (`["decision_id", "action"]`) to
/// match the game-file and policy-file wire format rather than serde's
/// default struct encoding.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Sequence {
    pub decision_id: String,
    pub action: String,
}

impl Sequence {
    pub fn new(decision_id: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            decision_id: decision_id.into(),
            action: action.into(),
        }
    }
}

impl serde::Serialize for Sequence {
    fn serialize<S: serde::Serializer>(&self, s: S) -> std::result::Result<S::Ok, S::Error> {
        (&self.decision_id, &self.action).serialize(s)
    }
}

impl<'de> serde::Deserialize<'de> for Sequence {
    fn deserialize<D: serde::Deserializer<'de>>(d: D) -> std::result::Result<Self, D::Error> {
        let (decision_id, action) = <(String, String)>::deserialize(d)?;
        Ok(Sequence { decision_id, action })
    }
}

/// What kind of node this is and the data that kind carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// A point where this player chooses among `actions`. `parent_sequence`
    /// is the sequence of this same player's own ancestor decision that must
    /// be realized for this node to matter; `None` means this is a root
    /// decision (reached with probability `x[∅] = 1`).
    Decision {
        actions: Vec<String>,
        parent_sequence: Option<Sequence>,
    },
    /// A point where chance or the opponent reveals one of `signals`. Carries
    /// no sequence: observation nodes don't appear in Σ.
    Observation { signals: Vec<String> },
}

/// One node of the treeplex.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub id: String,
    pub kind: NodeKind,
    /// The edge this node is reached by: `(parent_id, label)`, where `label`
    /// is one of the parent's actions (if the parent is a decision) or
    /// signals (if the parent is an observation). `None` marks a node with
    /// no structural parent at all (a genuine tree root).
    pub parent_edge: Option<(String, String)>,
}

impl Node {
    pub fn decision(
        id: impl Into<String>,
        actions: Vec<String>,
        parent_edge: Option<(String, String)>,
        parent_sequence: Option<Sequence>,
    ) -> Self {
        Node {
            id: id.into(),
            kind: NodeKind::Decision {
                actions,
                parent_sequence,
            },
            parent_edge,
        }
    }

    pub fn observation(
        id: impl Into<String>,
        signals: Vec<String>,
        parent_edge: Option<(String, String)>,
    ) -> Self {
        Node {
            id: id.into(),
            kind: NodeKind::Observation { signals },
            parent_edge,
        }
    }
}

/// Per-decision bookkeeping resolved once at build time: dense indices into
/// Σ for each of the decision's actions, and a dense index for its parent
/// sequence (if any), so the hot-path engine never hashes a `Sequence`.
#[derive(Debug, Clone)]
pub struct DecisionInfo {
    pub node_index: usize,
    pub node_id: String,
    pub actions: Vec<String>,
    pub parent_sequence_index: Option<usize>,
    pub sequence_indices: Vec<usize>,
}

/// One player's decision problem: a topologically-ordered node list plus the
/// dense sequence index Σ derived from it.
#[derive(Debug, Clone)]
pub struct Treeplex {
    nodes: Vec<Node>,
    node_position: FxHashMap<String, usize>,
    sequences: Vec<Sequence>,
    sequence_index: FxHashMap<Sequence, usize>,
    decisions: Vec<DecisionInfo>,
}

impl Treeplex {
    /// Build and validate a treeplex from a node list already in topological
    /// order (every node's parent, if any, appears earlier in `nodes`).
    pub fn build(nodes: Vec<Node>) -> Result<Self> {
        let mut node_position: FxHashMap<String, usize> = FxHashMap::default();
        let mut sequences = Vec::new();
        let mut sequence_index: FxHashMap<Sequence, usize> = FxHashMap::default();
        let mut decisions = Vec::new();

        for (i, node) in nodes.iter().enumerate() {
            if node_position.contains_key(&node.id) {
                return Err(SolverError::MalformedGame(format!(
                    "duplicate node id {:?}",
                    node.id
                )));
            }

            if let Some((parent_id, label)) = &node.parent_edge {
                let parent_pos = node_position.get(parent_id).copied().ok_or_else(|| {
                    SolverError::MalformedGame(format!(
                        "node {:?} references parent {:?} that is absent or appears later \
                         (node order must be topological)",
                        node.id, parent_id
                    ))
                })?;
                match &nodes[parent_pos].kind {
                    NodeKind::Observation { signals } => {
                        if !signals.contains(label) {
                            return Err(SolverError::MalformedGame(format!(
                                "edge label {:?} at node {:?} is not a signal of its \
                                 observation parent {:?}",
                                label, node.id, parent_id
                            )));
                        }
                    }
                    NodeKind::Decision { actions, .. } => {
                        if !actions.contains(label) {
                            return Err(SolverError::MalformedGame(format!(
                                "edge label {:?} at node {:?} is not an action of its \
                                 decision parent {:?}",
                                label, node.id, parent_id
                            )));
                        }
                    }
                }
            }

            if let NodeKind::Decision {
                actions,
                parent_sequence,
            } = &node.kind
            {
                if actions.is_empty() {
                    return Err(SolverError::MalformedGame(format!(
                        "decision node {:?} has no actions",
                        node.id
                    )));
                }
                let parent_sequence_index = match parent_sequence {
                    None => None,
                    Some(seq) => Some(sequence_index.get(seq).copied().ok_or_else(|| {
                        SolverError::MalformedGame(format!(
                            "node {:?} names parent_sequence {:?} which is not a sequence \
                             known at this point in the node order",
                            node.id, seq
                        ))
                    })?),
                };

                let mut sequence_indices = Vec::with_capacity(actions.len());
                for action in actions {
                    let seq = Sequence::new(node.id.clone(), action.clone());
                    if sequence_index.contains_key(&seq) {
                        return Err(SolverError::MalformedGame(format!(
                            "duplicate action {:?} at decision node {:?}",
                            action, node.id
                        )));
                    }
                    let idx = sequences.len();
                    sequence_index.insert(seq.clone(), idx);
                    sequences.push(seq);
                    sequence_indices.push(idx);
                }

                decisions.push(DecisionInfo {
                    node_index: i,
                    node_id: node.id.clone(),
                    actions: actions.clone(),
                    parent_sequence_index,
                    sequence_indices,
                });
            }

            node_position.insert(node.id.clone(), i);
        }

        Ok(Treeplex {
            nodes,
            node_position,
            sequences,
            sequence_index,
            decisions,
        })
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn node_position(&self, id: &str) -> Option<usize> {
        self.node_position.get(id).copied()
    }

    /// Σ, in order of first appearance (the order decisions were processed).
    pub fn sequence_set(&self) -> &[Sequence] {
        &self.sequences
    }

    pub fn num_sequences(&self) -> usize {
        self.sequences.len()
    }

    pub fn sequence_index(&self, seq: &Sequence) -> Option<usize> {
        self.sequence_index.get(seq).copied()
    }

    /// Decision nodes in node order, with indices pre-resolved into Σ.
    pub fn decisions(&self) -> &[DecisionInfo] {
        &self.decisions
    }

    /// The reach of `parent_sequence` in the realization plan `x`: `1.0` for
    /// the empty sequence, else `x[index]`.
    fn parent_reach(&self, x: &[f64], parent_sequence_index: Option<usize>) -> f64 {
        match parent_sequence_index {
            None => 1.0,
            Some(idx) => x[idx],
        }
    }

    /// Checks the simplex constraint at every decision node: the realization
    /// weights of a decision's actions must sum to its parent's reach
    /// (within `tol`).
    pub fn is_valid_strategy(&self, x: &[f64], tol: f64) -> Result<()> {
        if x.len() != self.sequences.len() {
            return Err(SolverError::InvalidUtility(format!(
                "strategy vector has {} entries, expected {} (|Σ|)",
                x.len(),
                self.sequences.len()
            )));
        }
        for d in &self.decisions {
            let parent_reach = self.parent_reach(x, d.parent_sequence_index);
            let sum: f64 = d.sequence_indices.iter().map(|&idx| x[idx]).sum();
            let violation = (sum - parent_reach).abs();
            if violation > tol {
                return Err(SolverError::InvalidStrategy {
                    node_id: d.node_id.clone(),
                    violation,
                });
            }
        }
        Ok(())
    }

    /// For each decision node (in node order), the list of opponent sequence
    /// indices to multiply together to get that decision's opponent-reach
    /// weight. Walks the `parent_edge` chain upward from the decision,
    /// collecting one candidate per observation ancestor whose `(id, label)`
    /// names a sequence that exists in `opponent`'s Σ; ancestors that don't
    /// match (chance reveals, or observations with no opponent-sequence
    /// counterpart) contribute nothing, which is the correct behavior since
    /// the product is implicitly 1.0 over an empty list.
    pub fn precompute_opponent_reach_links(&self, opponent: &Treeplex) -> Vec<Vec<usize>> {
        self.decisions
            .iter()
            .map(|d| {
                let mut links = Vec::new();
                let mut node = &self.nodes[d.node_index];
                while let Some((parent_id, label)) = &node.parent_edge {
                    let parent_pos = self
                        .node_position(parent_id)
                        .expect("validated treeplex: parent_edge always resolves");
                    let parent = &self.nodes[parent_pos];
                    if matches!(parent.kind, NodeKind::Observation { .. }) {
                        let seq = Sequence::new(parent.id.clone(), label.clone());
                        if let Some(idx) = opponent.sequence_index(&seq) {
                            links.push(idx);
                        }
                    }
                    node = parent;
                }
                links
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn simple_two_decision_treeplex() -> Treeplex {
        // root decision "d0" with actions a/b, then "d1" chained off d0's "a".
        let nodes = vec![
            Node::decision("d0", vec!["a".into(), "b".into()], None, None),
            Node::decision(
                "d1",
                vec!["x".into(), "y".into()],
                Some(("d0".into(), "a".into())),
                Some(Sequence::new("d0", "a")),
            ),
        ];
        Treeplex::build(nodes).unwrap()
    }

    #[test]
    fn sequence_set_is_dense_and_ordered() {
        let tp = simple_two_decision_treeplex();
        assert_eq!(tp.num_sequences(), 4);
        assert_eq!(tp.sequence_set()[0], Sequence::new("d0", "a"));
        assert_eq!(tp.sequence_set()[1], Sequence::new("d0", "b"));
        assert_eq!(tp.sequence_set()[2], Sequence::new("d1", "x"));
        assert_eq!(tp.sequence_set()[3], Sequence::new("d1", "y"));
    }

    #[test]
    fn valid_strategy_passes_simplex_check() {
        let tp = simple_two_decision_treeplex();
        // x[d0,a]=0.5, x[d0,b]=0.5, x[d1,x]=0.5*0.5, x[d1,y]=0.5*0.5
        let x = vec![0.5, 0.5, 0.25, 0.25];
        assert!(tp.is_valid_strategy(&x, 1e-9).is_ok());
    }

    #[test]
    fn invalid_strategy_is_rejected() {
        let tp = simple_two_decision_treeplex();
        let x = vec![0.5, 0.5, 0.9, 0.25];
        let err = tp.is_valid_strategy(&x, 1e-9).unwrap_err();
        match err {
            SolverError::InvalidStrategy { node_id, .. } => assert_eq!(node_id, "d1"),
            other => panic!("expected InvalidStrategy, got {:?}", other),
        }
    }

    #[test]
    fn unknown_parent_sequence_is_malformed() {
        let nodes = vec![Node::decision(
            "d1",
            vec!["x".into()],
            None,
            Some(Sequence::new("nope", "a")),
        )];
        assert!(matches!(
            Treeplex::build(nodes),
            Err(SolverError::MalformedGame(_))
        ));
    }

    #[test]
    fn non_topological_parent_edge_is_rejected() {
        let nodes = vec![Node::decision(
            "d1",
            vec!["x".into()],
            Some(("d0".into(), "a".into())),
            None,
        )];
        assert!(matches!(
            Treeplex::build(nodes),
            Err(SolverError::MalformedGame(_))
        ));
    }

    #[test]
    fn opponent_reach_links_skip_chance_observations() {
        // own decision "own_d" sits behind a chance observation "chance_obs"
        // (signals never coincide with any opponent sequence).
        let own_nodes = vec![
            Node::observation("chance_obs", vec!["heads".into(), "tails".into()], None),
            Node::decision(
                "own_d",
                vec!["x".into()],
                Some(("chance_obs".into(), "heads".into())),
                None,
            ),
        ];
        let own = Treeplex::build(own_nodes).unwrap();
        let opponent = simple_two_decision_treeplex();
        let links = own.precompute_opponent_reach_links(&opponent);
        assert_eq!(links.len(), 1);
        assert!(links[0].is_empty());
    }

    #[test]
    fn opponent_reach_links_match_coupled_observation() {
        // own decision "own_d" is preceded by an observation node whose id
        // coincides with an opponent decision id, revealing that opponent's
        // action.
        let own_nodes = vec![
            Node::observation("d0", vec!["a".into(), "b".into()], None),
            Node::decision(
                "own_d",
                vec!["x".into()],
                Some(("d0".into(), "a".into())),
                None,
            ),
        ];
        let own = Treeplex::build(own_nodes).unwrap();
        let opponent = simple_two_decision_treeplex();
        let links = own.precompute_opponent_reach_links(&opponent);
        assert_eq!(links, vec![vec![opponent.sequence_index(&Sequence::new("d0", "a")).unwrap()]]);
    }
}
