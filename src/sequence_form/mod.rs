//! Sequence-form strategies, the sparse bilinear payoff table, and the
//! best-response evaluator.
//!
//! A [`SequenceFormStrategy`] is a realization plan over one player's Σ: a
//! valid one satisfies the simplex constraints checked by
//! [`crate::treeplex::Treeplex::is_valid_strategy`]. An [`RSigmaVector`] is
//! any map `Σ -> R` with no such constraint — what utility vectors and
//! regret accumulators are. Utility between the two players is a sparse
//! bilinear form `U(x, y) = sum_{(s1,s2,v) in payoff} x[s1] * y[s2] * v`,
//! expressed as [`PayoffEntry`] triples resolved once against both
//! treeplexes into dense indices.

use crate::error::{Result, SolverError};
use crate::treeplex::{Sequence, Treeplex};
use rayon::prelude::*;

/// A map `Σ -> R` with no simplex constraint: utility vectors, regret
/// accumulators, and anything else shaped like a realization plan but not
/// required to be one.
#[derive(Debug, Clone, PartialEq)]
pub struct RSigmaVector {
    values: Vec<f64>,
}

impl RSigmaVector {
    pub fn zeros(len: usize) -> Self {
        Self {
            values: vec![0.0; len],
        }
    }

    pub fn from_values(values: Vec<f64>) -> Self {
        Self { values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, idx: usize) -> f64 {
        self.values[idx]
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }
}

/// A realization plan over one player's Σ satisfying the simplex
/// constraints at every decision node (checked, not enforced, by
/// construction — see [`Self::validated`]).
#[derive(Debug, Clone, PartialEq)]
pub struct SequenceFormStrategy {
    values: Vec<f64>,
}

impl SequenceFormStrategy {
    pub fn from_values(values: Vec<f64>) -> Self {
        Self { values }
    }

    /// Builds a strategy and checks it against `treeplex`'s simplex
    /// constraints, returning `InvalidStrategy` on the first violation.
    pub fn validated(values: Vec<f64>, treeplex: &Treeplex) -> Result<Self> {
        treeplex.is_valid_strategy(&values, 1e-6)?;
        Ok(Self { values })
    }

    /// The uniform strategy: at every decision, split reach evenly among
    /// its actions.
    pub fn uniform(treeplex: &Treeplex) -> Self {
        let mut values = vec![0.0; treeplex.num_sequences()];
        for d in treeplex.decisions() {
            let parent_reach = match d.parent_sequence_index {
                None => 1.0,
                Some(idx) => values[idx],
            };
            let share = parent_reach / d.actions.len() as f64;
            for &idx in &d.sequence_indices {
                values[idx] = share;
            }
        }
        Self { values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, idx: usize) -> f64 {
        self.values[idx]
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }
}

/// One entry of the sparse bilinear payoff table linking player 1's
/// sequence `sequence_pl1` and player 2's sequence `sequence_pl2` to a
/// player-1 payoff `value` realized when both sequences are played. The
/// game is zero-sum, so player 2's payoff at the same pair is `-value`.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct PayoffEntry {
    pub sequence_pl1: Sequence,
    pub sequence_pl2: Sequence,
    pub value: f64,
}

#[derive(Debug, Clone, Copy)]
struct ResolvedEntry {
    seq1: usize,
    seq2: usize,
    value: f64,
}

/// The payoff table resolved against both players' Σ: every entry carries
/// dense indices instead of hashed `Sequence` keys, so the hot-path
/// reduction never hashes.
#[derive(Debug, Clone)]
pub struct PayoffTable {
    entries: Vec<ResolvedEntry>,
}

impl PayoffTable {
    /// Resolves raw `(sequence_pl1, sequence_pl2, value)` triples against
    /// both treeplexes. Fails with `MalformedGame` if an entry names a
    /// sequence that doesn't exist in the corresponding Σ.
    pub fn resolve(raw: &[PayoffEntry], tp1: &Treeplex, tp2: &Treeplex) -> Result<Self> {
        let mut entries = Vec::with_capacity(raw.len());
        for e in raw {
            let seq1 = tp1.sequence_index(&e.sequence_pl1).ok_or_else(|| {
                SolverError::MalformedGame(format!(
                    "utility entry references unknown player-1 sequence {:?}",
                    e.sequence_pl1
                ))
            })?;
            let seq2 = tp2.sequence_index(&e.sequence_pl2).ok_or_else(|| {
                SolverError::MalformedGame(format!(
                    "utility entry references unknown player-2 sequence {:?}",
                    e.sequence_pl2
                ))
            })?;
            entries.push(ResolvedEntry {
                seq1,
                seq2,
                value: e.value,
            });
        }
        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `U1(x, y)`: player 1's expected payoff under both realization plans.
    pub fn expected_utility_pl1(&self, x: &SequenceFormStrategy, y: &SequenceFormStrategy) -> f64 {
        self.entries
            .par_iter()
            .map(|e| x.get(e.seq1) * y.get(e.seq2) * e.value)
            .sum()
    }

    /// The utility vector handed to player 1's local matchers:
    /// `u1[s1] = sum over entries with sequence_pl1 == s1 of value * y[sequence_pl2]`.
    /// Reduced in parallel chunks over the payoff table, per spec.md §5.
    pub fn utility_vector_pl1(&self, num_seq1: usize, y: &SequenceFormStrategy) -> RSigmaVector {
        let acc = self
            .entries
            .par_iter()
            .fold(
                || vec![0.0; num_seq1],
                |mut local, e| {
                    local[e.seq1] += e.value * y.get(e.seq2);
                    local
                },
            )
            .reduce(
                || vec![0.0; num_seq1],
                |mut a, b| {
                    for i in 0..a.len() {
                        a[i] += b[i];
                    }
                    a
                },
            );
        RSigmaVector::from_values(acc)
    }

    /// The utility vector handed to player 2's local matchers. The game is
    /// zero-sum so this is the negation of player 1's payoff at the same
    /// entries, weighted by player 1's realization plan `x`.
    pub fn utility_vector_pl2(&self, num_seq2: usize, x: &SequenceFormStrategy) -> RSigmaVector {
        let acc = self
            .entries
            .par_iter()
            .fold(
                || vec![0.0; num_seq2],
                |mut local, e| {
                    local[e.seq2] += -e.value * x.get(e.seq1);
                    local
                },
            )
            .reduce(
                || vec![0.0; num_seq2],
                |mut a, b| {
                    for i in 0..a.len() {
                        a[i] += b[i];
                    }
                    a
                },
            );
        RSigmaVector::from_values(acc)
    }
}

/// The best-response value of a utility vector against a treeplex: a single
/// backward pass in reverse node order, folding each decision's best child
/// value up into its parent sequence (or the root accumulator if the
/// decision has none). Equivalent to the maximum of `utility . x` over all
/// valid realization plans `x`.
pub fn best_response_value(treeplex: &Treeplex, utility: &RSigmaVector) -> Result<f64> {
    if utility.len() != treeplex.num_sequences() {
        return Err(SolverError::InvalidUtility(format!(
            "utility vector has {} entries, expected {} (|Σ|)",
            utility.len(),
            treeplex.num_sequences()
        )));
    }
    let mut u = utility.values().to_vec();
    let mut root = 0.0;
    for d in treeplex.decisions().iter().rev() {
        let ev = d
            .sequence_indices
            .iter()
            .map(|&idx| u[idx])
            .fold(f64::NEG_INFINITY, f64::max);
        match d.parent_sequence_index {
            None => root += ev,
            Some(idx) => u[idx] += ev,
        }
    }
    Ok(root)
}

/// The saddle-point gap (a.k.a. exploitability): how much either player
/// could gain by deviating to their best response against the other's
/// current strategy. Zero at a Nash equilibrium.
pub fn exploitability_gap(
    tp1: &Treeplex,
    tp2: &Treeplex,
    payoff: &PayoffTable,
    x: &SequenceFormStrategy,
    y: &SequenceFormStrategy,
) -> Result<f64> {
    let u1 = payoff.utility_vector_pl1(tp1.num_sequences(), y);
    let u2 = payoff.utility_vector_pl2(tp2.num_sequences(), x);
    Ok(best_response_value(tp1, &u1)? + best_response_value(tp2, &u2)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::treeplex::Node;

    /// Matching pennies: each player picks heads or tails; player 1 wins
    /// (+1) on a match, loses (-1) on a mismatch.
    fn matching_pennies() -> (Treeplex, Treeplex, PayoffTable) {
        let tp1 = Treeplex::build(vec![Node::decision(
            "p1",
            vec!["H".into(), "T".into()],
            None,
            None,
        )])
        .unwrap();
        let tp2 = Treeplex::build(vec![Node::decision(
            "p2",
            vec!["H".into(), "T".into()],
            None,
            None,
        )])
        .unwrap();
        let raw = vec![
            PayoffEntry {
                sequence_pl1: Sequence::new("p1", "H"),
                sequence_pl2: Sequence::new("p2", "H"),
                value: 1.0,
            },
            PayoffEntry {
                sequence_pl1: Sequence::new("p1", "H"),
                sequence_pl2: Sequence::new("p2", "T"),
                value: -1.0,
            },
            PayoffEntry {
                sequence_pl1: Sequence::new("p1", "T"),
                sequence_pl2: Sequence::new("p2", "H"),
                value: -1.0,
            },
            PayoffEntry {
                sequence_pl1: Sequence::new("p1", "T"),
                sequence_pl2: Sequence::new("p2", "T"),
                value: 1.0,
            },
        ];
        let payoff = PayoffTable::resolve(&raw, &tp1, &tp2).unwrap();
        (tp1, tp2, payoff)
    }

    #[test]
    fn uniform_vs_uniform_has_zero_expected_utility() {
        let (tp1, tp2, payoff) = matching_pennies();
        let x = SequenceFormStrategy::uniform(&tp1);
        let y = SequenceFormStrategy::uniform(&tp2);
        assert!((payoff.expected_utility_pl1(&x, &y)).abs() < 1e-12);
    }

    #[test]
    fn best_response_exploits_a_fixed_strategy() {
        let (tp1, tp2, payoff) = matching_pennies();
        // player 1 always plays heads; player 2's best response is tails.
        let x = SequenceFormStrategy::from_values(vec![1.0, 0.0]);
        let u2 = payoff.utility_vector_pl2(tp2.num_sequences(), &x);
        let br = best_response_value(&tp2, &u2).unwrap();
        assert!((br - 1.0).abs() < 1e-12);
    }

    #[test]
    fn uniform_strategies_have_zero_gap_at_equilibrium() {
        let (tp1, tp2, payoff) = matching_pennies();
        let x = SequenceFormStrategy::uniform(&tp1);
        let y = SequenceFormStrategy::uniform(&tp2);
        let gap = exploitability_gap(&tp1, &tp2, &payoff, &x, &y).unwrap();
        assert!(gap.abs() < 1e-12, "gap = {}", gap);
    }

    #[test]
    fn mismatched_utility_length_is_rejected() {
        let (_tp1, tp2, _payoff) = matching_pennies();
        let bad = RSigmaVector::zeros(5);
        assert!(matches!(
            best_response_value(&tp2, &bad),
            Err(SolverError::InvalidUtility(_))
        ));
    }
}
