//! The reduced, tabulable 1-bid Liar's Dice used for CFR/CFR+ convergence
//! testing (spec scenario E), as opposed to the full generative game
//! [`crate::mccfr::McCfrPlusTrainer`] trains against.
//!
//! Each player observes only the *maximum* of their own `num_dice` dice
//! (not the individual rolls), then makes a single bid `1..=faces`; the
//! other player accepts or calls. The chance distribution over observed
//! maxima is folded directly into the payoff table's entries rather than
//! modeled as explicit per-die observation nodes, following
//! `generate_liarsdice.py`'s `pr_max` precomputation. Unlike that source,
//! player 2's accept/call decision is reached only through the bid value it
//! observes, with no wildcard edges — every parent_edge names a concrete
//! signal, as the treeplex loader requires.

use crate::error::Result;
use crate::game_file::{build, GameFile, LoadedGame, RawNode, RawPayoffEntry};
use crate::mccfr::DiceGameConfig;
use crate::treeplex::Sequence;

/// `P(max of num_dice independent uniform 1..=faces rolls == k)`, via
/// `P(all <= k) - P(all <= k-1)`.
pub fn pr_max(k: u32, num_dice: usize, faces: u32) -> f64 {
    let p_le = |k: u32| (k as f64 / faces as f64).powi(num_dice as i32);
    if k == 1 {
        p_le(1)
    } else {
        p_le(k) - p_le(k - 1)
    }
}

fn bid_label(face: u32) -> String {
    format!("bid{}", face)
}

/// Builds the reduced 1-bid Liar's Dice as a treeplex/payoff-table pair.
/// `config.num_dice` dice per player, `config.faces` sides each.
pub fn generate_reduced_game(config: &DiceGameConfig) -> Result<LoadedGame> {
    build(build_game_file(config))
}

fn build_game_file(config: &DiceGameConfig) -> GameFile {
    let faces = config.faces;
    let bid_actions: Vec<String> = (1..=faces).map(bid_label).collect();

    let mut dp1 = Vec::new();
    dp1.push(RawNode::observation(
        "obs_max_pl1",
        (1..=faces).map(|k| k.to_string()).collect(),
        None,
    ));
    for k in 1..=faces {
        dp1.push(RawNode::decision(
            format!("d1_bid_{}", k),
            bid_actions.clone(),
            Some(("obs_max_pl1".to_string(), k.to_string())),
            None,
        ));
    }

    let mut dp2 = Vec::new();
    dp2.push(RawNode::observation(
        "obs_bid_pl2",
        bid_actions.clone(),
        None,
    ));
    for face in 1..=faces {
        dp2.push(RawNode::decision(
            format!("d2_{}", face),
            vec!["accept".to_string(), "call".to_string()],
            Some(("obs_bid_pl2".to_string(), bid_label(face))),
            None,
        ));
    }

    let mut utility_pl1 = Vec::new();
    for r1 in 1..=faces {
        for r2 in 1..=faces {
            let p_chance = pr_max(r1, config.num_dice, faces) * pr_max(r2, config.num_dice, faces);
            for bid in 1..=faces {
                let seq1 = Sequence::new(format!("d1_bid_{}", r1), bid_label(bid));
                for response in ["accept", "call"] {
                    let seq2 = Sequence::new(format!("d2_{}", bid), response);
                    let payoff = if response == "accept" {
                        if r1 >= bid { 1.0 } else { -1.0 }
                    } else if r1 < bid {
                        1.0
                    } else {
                        -1.0
                    };
                    utility_pl1.push(RawPayoffEntry {
                        sequence_pl1: seq1.clone(),
                        sequence_pl2: seq2,
                        value: payoff * p_chance,
                    });
                }
            }
        }
    }

    GameFile {
        decision_problem_pl1: dp1,
        decision_problem_pl2: dp2,
        utility_pl1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cfr::{CFRConfig, SelfPlayDriver};

    #[test]
    fn pr_max_distribution_sums_to_one() {
        let total: f64 = (1..=6).map(|k| pr_max(k, 5, 6)).sum();
        assert!((total - 1.0).abs() < 1e-9, "total = {}", total);
    }

    #[test]
    fn pr_max_single_die_is_uniform() {
        for k in 1..=6 {
            assert!((pr_max(k, 1, 6) - 1.0 / 6.0).abs() < 1e-12);
        }
    }

    #[test]
    fn generated_game_has_expected_sequence_counts() {
        let config = DiceGameConfig { num_dice: 1, faces: 2 };
        let loaded = generate_reduced_game(&config).unwrap();
        assert_eq!(loaded.treeplex_pl1.num_sequences(), 2 * 2);
        assert_eq!(loaded.treeplex_pl2.num_sequences(), 2 * 2);
        assert_eq!(loaded.payoff.len(), 2 * 2 * 2 * 2);
    }

    #[test]
    fn cfr_plus_converges_on_the_1die_2face_reduced_game() {
        // Scenario E (reduced n=1, faces=2): CFR+ should reach low
        // exploitability well within 5000 iterations.
        let config = DiceGameConfig { num_dice: 1, faces: 2 };
        let loaded = generate_reduced_game(&config).unwrap();
        let cfg = CFRConfig::default();
        let mut driver = SelfPlayDriver::new(&loaded.treeplex_pl1, &loaded.treeplex_pl2, &loaded.payoff, &cfg);
        for _ in 0..5000 {
            driver.run_iteration();
        }
        assert!(driver.exploitability().unwrap() <= 1e-3, "gap too high");
    }
}
