//! [`CfrEngine`]: composes per-decision local regret matchers into a valid
//! sequence-form strategy.
//!
//! The engine owns one [`LocalRegretState`] per decision node of a treeplex
//! and knows how to turn their independent local strategies into a single
//! realization plan over Σ (by multiplying down the parent-sequence chain),
//! and how to split a full `Σ -> R` utility vector back into the per-decision
//! slices each local matcher expects. It does not know about opponent reach,
//! payoff tables, or averaging — that's the self-play driver's job.

use crate::regret::{LocalRegretState, RmVariant};
use crate::sequence_form::{RSigmaVector, SequenceFormStrategy};
use crate::treeplex::Treeplex;

/// Per-decision local regret matchers for one player's treeplex, and the
/// glue that composes/decomposes between them and a sequence-form vector.
pub struct CfrEngine<'t> {
    treeplex: &'t Treeplex,
    matchers: Vec<LocalRegretState>,
}

impl<'t> CfrEngine<'t> {
    /// One local matcher per decision node, in the treeplex's decision
    /// order, all of the same `variant`.
    pub fn new(treeplex: &'t Treeplex, variant: RmVariant) -> Self {
        let matchers = treeplex
            .decisions()
            .iter()
            .map(|d| LocalRegretState::new(d.actions.clone(), variant))
            .collect();
        Self { treeplex, matchers }
    }

    pub fn treeplex(&self) -> &'t Treeplex {
        self.treeplex
    }

    /// Asks every local matcher for its next local strategy, then composes
    /// them into a full realization plan: a decision's reach is its
    /// parent sequence's reach (1.0 for the empty sequence) times its local
    /// strategy.
    pub fn next_strategy(&mut self) -> SequenceFormStrategy {
        let mut x = vec![0.0; self.treeplex.num_sequences()];
        for (d, matcher) in self.treeplex.decisions().iter().zip(self.matchers.iter_mut()) {
            let parent_reach = match d.parent_sequence_index {
                None => 1.0,
                Some(idx) => x[idx],
            };
            let local = matcher.next_strategy();
            for (k, &seq_idx) in d.sequence_indices.iter().enumerate() {
                x[seq_idx] = parent_reach * local[k];
            }
        }
        SequenceFormStrategy::from_values(x)
    }

    /// Splits `utility` into per-decision slices and folds each into its
    /// local matcher, unweighted.
    pub fn observe_utility(&mut self, utility: &RSigmaVector) {
        let ones = vec![1.0; self.treeplex.decisions().len()];
        self.observe_utility_scaled(utility, &ones);
    }

    /// Like [`Self::observe_utility`], but scales each decision's slice by
    /// a caller-supplied weight (one entry per decision, matching
    /// `treeplex.decisions()` order) before folding it in. The self-play
    /// driver uses this to apply opponent-reach weighting.
    pub fn observe_utility_scaled(&mut self, utility: &RSigmaVector, weight_by_decision: &[f64]) {
        debug_assert_eq!(weight_by_decision.len(), self.treeplex.decisions().len());
        for ((d, matcher), &w) in self
            .treeplex
            .decisions()
            .iter()
            .zip(self.matchers.iter_mut())
            .zip(weight_by_decision)
        {
            let local: Vec<f64> = d.sequence_indices.iter().map(|&idx| w * utility.get(idx)).collect();
            matcher.observe_utility(&local);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::treeplex::Node;

    fn root_binary_treeplex() -> Treeplex {
        Treeplex::build(vec![Node::decision(
            "d",
            vec!["a".into(), "b".into()],
            None,
            None,
        )])
        .unwrap()
    }

    #[test]
    fn next_strategy_starts_uniform_and_valid() {
        let tp = root_binary_treeplex();
        let mut engine = CfrEngine::new(&tp, RmVariant::Rm);
        let x = engine.next_strategy();
        assert!((x.get(0) - 0.5).abs() < 1e-12);
        assert!((x.get(1) - 0.5).abs() < 1e-12);
        assert!(tp.is_valid_strategy(x.values(), 1e-9).is_ok());
    }

    #[test]
    fn observe_utility_shifts_next_strategy() {
        let tp = root_binary_treeplex();
        let mut engine = CfrEngine::new(&tp, RmVariant::Rm);
        for _ in 0..50 {
            engine.next_strategy();
            engine.observe_utility(&RSigmaVector::from_values(vec![1.0, 0.0]));
        }
        let x = engine.next_strategy();
        assert!(x.get(0) > 0.9, "should favor sequence a: {:?}", x.values());
    }

    #[test]
    fn chained_decision_composes_with_parent_reach() {
        let nodes = vec![
            Node::decision("d0", vec!["a".into(), "b".into()], None, None),
            Node::decision(
                "d1",
                vec!["x".into(), "y".into()],
                Some(("d0".into(), "a".into())),
                Some(crate::treeplex::Sequence::new("d0", "a")),
            ),
        ];
        let tp = Treeplex::build(nodes).unwrap();
        let mut engine = CfrEngine::new(&tp, RmVariant::Rm);
        let x = engine.next_strategy();
        // x[d0,a] = 0.5, so d1's two actions should each realize to 0.25.
        assert!((x.get(0) - 0.5).abs() < 1e-12);
        assert!((x.get(2) - 0.25).abs() < 1e-12);
        assert!((x.get(3) - 0.25).abs() < 1e-12);
    }
}
