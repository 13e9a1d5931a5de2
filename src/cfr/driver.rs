//! [`SelfPlayDriver`]: runs two [`CfrEngine`]s against each other and tracks
//! the time-averaged sequence-form strategy.
//!
//! Two training modes, both reach-weighted consistently for both players
//! (the source this was distilled from applied reach-weighting to only one
//! side; that inconsistency is not reproduced here — see DESIGN.md):
//!
//! - **Vanilla CFR**: both players update simultaneously against each
//!   other's previous-iteration strategy; the average strategy is the
//!   uniform (unweighted) mean of every iteration's realization plan.
//! - **CFR+**: players update in alternation — player 2 sees player 1's
//!   *already-updated* strategy for this iteration before it moves, and
//!   player 1's next strategy (computed after observing player 2's
//!   response) is what gets folded into the average — with linear
//!   (iteration-number-weighted) averaging.

use crate::cfr::config::{CFRConfig, CFRStats};
use crate::regret::RmVariant;
use crate::sequence_form::{self, PayoffTable, SequenceFormStrategy};
use crate::treeplex::Treeplex;
use rustc_hash::FxHashMap;

use super::engine::CfrEngine;

/// Either player's decision-node-id -> (action -> probability) policy, the
/// shape written out to a policy file.
pub type Policy = FxHashMap<String, FxHashMap<String, f64>>;

/// Drives self-play between two [`CfrEngine`]s over a shared payoff table.
pub struct SelfPlayDriver<'t> {
    tp1: &'t Treeplex,
    tp2: &'t Treeplex,
    payoff: &'t PayoffTable,
    engine1: CfrEngine<'t>,
    engine2: CfrEngine<'t>,
    reach_links_1: Vec<Vec<usize>>,
    reach_links_2: Vec<Vec<usize>>,
    cum1: Vec<f64>,
    cum2: Vec<f64>,
    weight_sum: f64,
    use_cfr_plus: bool,
    iteration: u64,
}

impl<'t> SelfPlayDriver<'t> {
    pub fn new(tp1: &'t Treeplex, tp2: &'t Treeplex, payoff: &'t PayoffTable, config: &CFRConfig) -> Self {
        let variant = if config.use_cfr_plus {
            RmVariant::RmPlus
        } else {
            RmVariant::Rm
        };
        let reach_links_1 = tp1.precompute_opponent_reach_links(tp2);
        let reach_links_2 = tp2.precompute_opponent_reach_links(tp1);
        Self {
            tp1,
            tp2,
            payoff,
            engine1: CfrEngine::new(tp1, variant),
            engine2: CfrEngine::new(tp2, variant),
            reach_links_1,
            reach_links_2,
            cum1: vec![0.0; tp1.num_sequences()],
            cum2: vec![0.0; tp2.num_sequences()],
            weight_sum: 0.0,
            use_cfr_plus: config.use_cfr_plus,
            iteration: 0,
        }
    }

    fn reach_weights(links: &[Vec<usize>], opponent: &SequenceFormStrategy) -> Vec<f64> {
        links
            .iter()
            .map(|idxs| idxs.iter().map(|&i| opponent.get(i)).product())
            .collect()
    }

    /// One iteration. Returns the realization plans used to accumulate the
    /// average strategy this step, for callers that want to inspect
    /// per-iteration behavior (tests, diagnostics).
    pub fn run_iteration(&mut self) -> (SequenceFormStrategy, SequenceFormStrategy) {
        self.iteration += 1;
        if self.use_cfr_plus {
            self.run_cfr_plus_iteration()
        } else {
            self.run_vanilla_iteration()
        }
    }

    fn run_vanilla_iteration(&mut self) -> (SequenceFormStrategy, SequenceFormStrategy) {
        let x = self.engine1.next_strategy();
        let y = self.engine2.next_strategy();

        for (c, &v) in self.cum1.iter_mut().zip(x.values()) {
            *c += v;
        }
        for (c, &v) in self.cum2.iter_mut().zip(y.values()) {
            *c += v;
        }
        self.weight_sum += 1.0;

        let u1 = self.payoff.utility_vector_pl1(self.tp1.num_sequences(), &y);
        let u2 = self.payoff.utility_vector_pl2(self.tp2.num_sequences(), &x);
        let reach1 = Self::reach_weights(&self.reach_links_1, &y);
        let reach2 = Self::reach_weights(&self.reach_links_2, &x);
        self.engine1.observe_utility_scaled(&u1, &reach1);
        self.engine2.observe_utility_scaled(&u2, &reach2);

        (x, y)
    }

    fn run_cfr_plus_iteration(&mut self) -> (SequenceFormStrategy, SequenceFormStrategy) {
        let t = self.iteration as f64;

        let y = self.engine2.next_strategy();
        let u1_for_y = self.payoff.utility_vector_pl1(self.tp1.num_sequences(), &y);
        let reach1 = Self::reach_weights(&self.reach_links_1, &y);
        self.engine1.observe_utility_scaled(&u1_for_y, &reach1);

        let x_next = self.engine1.next_strategy();
        let u2 = self.payoff.utility_vector_pl2(self.tp2.num_sequences(), &x_next);
        let reach2 = Self::reach_weights(&self.reach_links_2, &x_next);
        self.engine2.observe_utility_scaled(&u2, &reach2);

        for (c, &v) in self.cum1.iter_mut().zip(x_next.values()) {
            *c += t * v;
        }
        for (c, &v) in self.cum2.iter_mut().zip(y.values()) {
            *c += t * v;
        }
        self.weight_sum += t;

        (x_next, y)
    }

    pub fn iteration(&self) -> u64 {
        self.iteration
    }

    /// The time-averaged realization plans, the output of training.
    pub fn average_strategies(&self) -> (SequenceFormStrategy, SequenceFormStrategy) {
        let scale = if self.weight_sum > 0.0 {
            1.0 / self.weight_sum
        } else {
            0.0
        };
        let avg1: Vec<f64> = self.cum1.iter().map(|&c| c * scale).collect();
        let avg2: Vec<f64> = self.cum2.iter().map(|&c| c * scale).collect();
        (
            SequenceFormStrategy::from_values(avg1),
            SequenceFormStrategy::from_values(avg2),
        )
    }

    /// The saddle-point gap of the current time-averaged strategies.
    pub fn exploitability(&self) -> crate::error::Result<f64> {
        let (x, y) = self.average_strategies();
        sequence_form::exploitability_gap(self.tp1, self.tp2, self.payoff, &x, &y)
    }

    /// Trains for `iterations` steps, printing plain progress lines at
    /// every 10% mark, and returns the resulting stats.
    pub fn train(&mut self, iterations: u64) -> CFRStats {
        let start = std::time::Instant::now();
        let checkpoint = (iterations / 10).max(1);
        for i in 1..=iterations {
            self.run_iteration();
            if i % checkpoint == 0 || i == iterations {
                let gap = self.exploitability().unwrap_or(f64::NAN);
                println!(
                    "iteration {}/{} ({:.0}%) — gap = {:.6}",
                    i,
                    iterations,
                    100.0 * i as f64 / iterations as f64,
                    gap
                );
            }
        }
        let elapsed = start.elapsed().as_secs_f64();
        let mut stats = CFRStats::new();
        stats.iterations = self.iteration;
        stats.elapsed_seconds = elapsed;
        stats.update_rate();
        stats.record_exploitability(self.iteration, self.exploitability().unwrap_or(f64::NAN));
        stats
    }
}

/// Extracts a decision-id -> (action -> probability) policy from a
/// cumulative realization plan: each decision's weights are its cumulative
/// reach on each action, renormalized; falls back to uniform if a decision
/// was never reached.
pub fn extract_policy(treeplex: &Treeplex, strategy: &SequenceFormStrategy) -> Policy {
    let mut policy = Policy::default();
    for d in treeplex.decisions() {
        let weights: Vec<f64> = d.sequence_indices.iter().map(|&idx| strategy.get(idx)).collect();
        let total: f64 = weights.iter().sum();
        let probs: Vec<f64> = if total > 0.0 {
            weights.iter().map(|&w| w / total).collect()
        } else {
            vec![1.0 / d.actions.len() as f64; d.actions.len()]
        };
        let entry: FxHashMap<String, f64> = d
            .actions
            .iter()
            .cloned()
            .zip(probs)
            .collect();
        policy.insert(d.node_id.clone(), entry);
    }
    policy
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sequence_form::PayoffEntry;
    use crate::treeplex::{Node, Sequence};

    fn matching_pennies() -> (Treeplex, Treeplex, PayoffTable) {
        let tp1 = Treeplex::build(vec![Node::decision("p1", vec!["H".into(), "T".into()], None, None)]).unwrap();
        let tp2 = Treeplex::build(vec![Node::decision("p2", vec!["H".into(), "T".into()], None, None)]).unwrap();
        let raw = vec![
            PayoffEntry { sequence_pl1: Sequence::new("p1", "H"), sequence_pl2: Sequence::new("p2", "H"), value: 1.0 },
            PayoffEntry { sequence_pl1: Sequence::new("p1", "H"), sequence_pl2: Sequence::new("p2", "T"), value: -1.0 },
            PayoffEntry { sequence_pl1: Sequence::new("p1", "T"), sequence_pl2: Sequence::new("p2", "H"), value: -1.0 },
            PayoffEntry { sequence_pl1: Sequence::new("p1", "T"), sequence_pl2: Sequence::new("p2", "T"), value: 1.0 },
        ];
        let payoff = PayoffTable::resolve(&raw, &tp1, &tp2).unwrap();
        (tp1, tp2, payoff)
    }

    #[test]
    fn cfr_plus_converges_to_uniform_on_matching_pennies() {
        let (tp1, tp2, payoff) = matching_pennies();
        let config = CFRConfig::default();
        let mut driver = SelfPlayDriver::new(&tp1, &tp2, &payoff, &config);
        for _ in 0..2000 {
            driver.run_iteration();
        }
        let (x, y) = driver.average_strategies();
        assert!((x.get(0) - 0.5).abs() < 0.02, "x = {:?}", x.values());
        assert!((y.get(0) - 0.5).abs() < 0.02, "y = {:?}", y.values());
        assert!(driver.exploitability().unwrap() < 0.02);
    }

    #[test]
    fn vanilla_cfr_also_converges() {
        let (tp1, tp2, payoff) = matching_pennies();
        let config = CFRConfig::vanilla();
        let mut driver = SelfPlayDriver::new(&tp1, &tp2, &payoff, &config);
        for _ in 0..5000 {
            driver.run_iteration();
        }
        assert!(driver.exploitability().unwrap() < 0.05);
    }

    #[test]
    fn extract_policy_normalizes_cumulative_reach() {
        let (tp1, tp2, payoff) = matching_pennies();
        let config = CFRConfig::default();
        let mut driver = SelfPlayDriver::new(&tp1, &tp2, &payoff, &config);
        for _ in 0..500 {
            driver.run_iteration();
        }
        let (x, _y) = driver.average_strategies();
        let policy = extract_policy(&tp1, &x);
        let p1 = &policy["p1"];
        let total: f64 = p1.values().sum();
        assert!((total - 1.0).abs() < 1e-9);
    }
}
