//! Matching pennies: each player picks heads or tails with no private
//! information; player 1 wins by matching, player 2 wins by mismatching.
//! The unique equilibrium is uniform random for both players with zero
//! exploitability — the simplest possible check that the engine and
//! driver converge at all.

use crate::game_file::{build, GameFile, LoadedGame, RawNode, RawPayoffEntry};
use crate::error::Result;
use crate::treeplex::Sequence;

pub fn generate() -> Result<LoadedGame> {
    let actions = vec!["H".to_string(), "T".to_string()];
    let game = GameFile {
        decision_problem_pl1: vec![RawNode::decision("p1", actions.clone(), None, None)],
        decision_problem_pl2: vec![RawNode::decision("p2", actions, None, None)],
        utility_pl1: vec![
            RawPayoffEntry {
                sequence_pl1: Sequence::new("p1", "H"),
                sequence_pl2: Sequence::new("p2", "H"),
                value: 1.0,
            },
            RawPayoffEntry {
                sequence_pl1: Sequence::new("p1", "H"),
                sequence_pl2: Sequence::new("p2", "T"),
                value: -1.0,
            },
            RawPayoffEntry {
                sequence_pl1: Sequence::new("p1", "T"),
                sequence_pl2: Sequence::new("p2", "H"),
                value: -1.0,
            },
            RawPayoffEntry {
                sequence_pl1: Sequence::new("p1", "T"),
                sequence_pl2: Sequence::new("p2", "T"),
                value: 1.0,
            },
        ],
    };
    build(game)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generates_a_valid_two_sequence_game() {
        let loaded = generate().unwrap();
        assert_eq!(loaded.treeplex_pl1.num_sequences(), 2);
        assert_eq!(loaded.treeplex_pl2.num_sequences(), 2);
        assert_eq!(loaded.payoff.len(), 4);
    }
}
