//! Outcome-sampling MCCFR+ over the generative Liar's Dice.
//!
//! Each iteration samples one hand per player, samples player 1's claim and
//! player 2's response from their current local strategies (lazily created
//! on first visit), and updates both players' regret. Player 1's utility
//! update uses a full claim-vector heuristic — "if player 2 always
//! accepted, which claims would have been true" — rather than an unbiased
//! per-claim counterfactual estimate; this is a deliberate, documented bias
//! in the outcome-sampling scheme (see DESIGN.md), not a standard unbiased
//! MCCFR estimator.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rustc_hash::FxHashMap;

use super::dice_game::{
    all_claims, claim_is_true, format_hand, format_key2, full_information_utility_pl1, payoff_pl2,
    roll_hand, Claim, DiceGameConfig,
};
use crate::cfr::Policy;
use crate::error::{Result, SolverError};
use crate::regret::{LocalRegretState, RmVariant};

const RESPONSES: [&str; 2] = ["accept", "call"];

/// Samples an index from `weights` proportional to its value. Falls back to
/// a uniform pick over all indices if every weight is zero or the slice is
/// empty of positive mass (should not happen given [`LocalRegretState`]'s
/// uniform fallback, but guarded against regardless).
fn sample_index(weights: &[f64], rng: &mut impl rand::Rng) -> Result<usize> {
    let total: f64 = weights.iter().sum();
    if total <= 0.0 {
        return Err(SolverError::SamplingError(
            "all-zero sampling distribution".to_string(),
        ));
    }
    let mut draw = rng.gen::<f64>() * total;
    for (i, &w) in weights.iter().enumerate() {
        draw -= w;
        if draw <= 0.0 {
            return Ok(i);
        }
    }
    Ok(weights.len() - 1)
}

/// The outcome-sampling MCCFR+ trainer: lazily-created per-hand (player 1)
/// and per-(hand, claim) (player 2) regret tables, driven by a seeded RNG.
pub struct McCfrPlusTrainer {
    config: DiceGameConfig,
    claims: Vec<Claim>,
    claim_labels: Vec<String>,
    matchers1: FxHashMap<Vec<u8>, LocalRegretState>,
    sums1: FxHashMap<Vec<u8>, Vec<f64>>,
    matchers2: FxHashMap<(Vec<u8>, Claim), LocalRegretState>,
    sums2: FxHashMap<(Vec<u8>, Claim), Vec<f64>>,
    rng: StdRng,
    iterations: u64,
}

impl McCfrPlusTrainer {
    pub fn new(config: DiceGameConfig, seed: u64) -> Self {
        let claims = all_claims(&config);
        let claim_labels = claims.iter().map(|c| c.label()).collect();
        Self {
            config,
            claims,
            claim_labels,
            matchers1: FxHashMap::default(),
            sums1: FxHashMap::default(),
            matchers2: FxHashMap::default(),
            sums2: FxHashMap::default(),
            rng: StdRng::seed_from_u64(seed),
            iterations: 0,
        }
    }

    fn matcher1(&mut self, hand: &[u8]) -> &mut LocalRegretState {
        self.matchers1.entry(hand.to_vec()).or_insert_with(|| {
            LocalRegretState::new(self.claim_labels.clone(), RmVariant::RmPlus)
        })
    }

    fn matcher2(&mut self, hand: &[u8], claim: Claim) -> &mut LocalRegretState {
        self.matchers2
            .entry((hand.to_vec(), claim))
            .or_insert_with(|| {
                LocalRegretState::new(RESPONSES.iter().map(|s| s.to_string()).collect(), RmVariant::RmPlus)
            })
    }

    /// One MCCFR+ iteration. Returns the realized payoff to player 2, for
    /// callers that want to track empirical variance.
    pub fn run_iteration(&mut self) -> Result<f64> {
        self.iterations += 1;
        let hand1 = roll_hand(&self.config, &mut self.rng);
        let hand2 = roll_hand(&self.config, &mut self.rng);

        let strat1 = self.matcher1(&hand1).next_strategy().to_vec();
        self.sums1
            .entry(hand1.clone())
            .or_insert_with(|| vec![0.0; self.claims.len()])
            .iter_mut()
            .zip(&strat1)
            .for_each(|(s, &p)| *s += p);
        let claim_idx = sample_index(&strat1, &mut self.rng)?;
        let claim = self.claims[claim_idx];

        let strat2 = self.matcher2(&hand2, claim).next_strategy().to_vec();
        self.sums2
            .entry((hand2.clone(), claim))
            .or_insert_with(|| vec![0.0; RESPONSES.len()])
            .iter_mut()
            .zip(&strat2)
            .for_each(|(s, &p)| *s += p);
        let response_idx = sample_index(&strat2, &mut self.rng)?;
        let accepted = RESPONSES[response_idx] == "accept";

        let claim_true = claim_is_true(&claim, &hand1, &hand2);
        let payoff2 = payoff_pl2(accepted, claim_true);

        let u1 = full_information_utility_pl1(&self.claims, &hand1, &hand2);
        self.matcher1(&hand1).observe_utility(&u1);

        let u2 = [-payoff2, payoff2]; // [accept, call]
        self.matcher2(&hand2, claim).observe_utility(&u2);

        Ok(payoff2)
    }

    /// Trains for `iterations` steps, printing plain progress lines at
    /// every 10% mark.
    pub fn train(&mut self, iterations: u64) -> Result<()> {
        let checkpoint = (iterations / 10).max(1);
        for i in 1..=iterations {
            self.run_iteration()?;
            if i % checkpoint == 0 || i == iterations {
                println!(
                    "iteration {}/{} ({:.0}%) — {} player-1 hands seen, {} player-2 (hand, claim) pairs seen",
                    i,
                    iterations,
                    100.0 * i as f64 / iterations as f64,
                    self.matchers1.len(),
                    self.matchers2.len(),
                );
            }
        }
        Ok(())
    }

    pub fn iterations(&self) -> u64 {
        self.iterations
    }

    /// Extracts the average strategy at every visited information set. Not
    /// normalized beyond dividing by the iteration count the key was
    /// touched — callers that need a strict simplex should renormalize.
    pub fn extract_policy(&self) -> Policy {
        let mut policy = Policy::default();
        for (hand, sums) in &self.sums1 {
            let total: f64 = sums.iter().sum();
            if total <= 0.0 {
                continue;
            }
            let entry: FxHashMap<String, f64> = self
                .claim_labels
                .iter()
                .cloned()
                .zip(sums.iter().map(|&s| s / total))
                .collect();
            policy.insert(format_hand(hand), entry);
        }
        for ((hand, claim), sums) in &self.sums2 {
            let total: f64 = sums.iter().sum();
            if total <= 0.0 {
                continue;
            }
            let entry: FxHashMap<String, f64> = RESPONSES
                .iter()
                .map(|s| s.to_string())
                .zip(sums.iter().map(|&s| s / total))
                .collect();
            policy.insert(format_key2(hand, claim), entry);
        }
        policy
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_die_two_face_game_favors_honest_claim() {
        // n=1 die, faces=2: with hand (1,), claiming quantity=1 face=1 is a
        // safe, always-true claim; the trained policy should favor it over
        // the riskier quantity=2 face=1 claim.
        let config = DiceGameConfig { num_dice: 1, faces: 2 };
        let mut trainer = McCfrPlusTrainer::new(config, 7);
        trainer.train(20_000).unwrap();
        let policy = trainer.extract_policy();
        let hand_key = format_hand(&[1]);
        let dist = policy.get(&hand_key).expect("hand (1,) should have been visited");
        let safe = dist["claim_1_1"];
        let risky = dist["claim_2_1"];
        assert!(
            safe > risky,
            "expected claim_1_1 ({}) to beat claim_2_1 ({})",
            safe,
            risky
        );
    }

    #[test]
    fn regret_tables_grow_lazily() {
        let config = DiceGameConfig { num_dice: 2, faces: 3 };
        let mut trainer = McCfrPlusTrainer::new(config, 1);
        assert!(trainer.matchers1.is_empty());
        trainer.run_iteration().unwrap();
        assert_eq!(trainer.matchers1.len(), 1);
        assert_eq!(trainer.matchers2.len(), 1);
    }

    #[test]
    fn claim_vector_length_matches_action_space() {
        let config = DiceGameConfig::default();
        let mut trainer = McCfrPlusTrainer::new(config, 3);
        trainer.run_iteration().unwrap();
        assert_eq!(trainer.claims.len(), trainer.claim_labels.len());
        assert_eq!(trainer.claims.len(), (2 * 5 * 6) as usize);
    }
}
