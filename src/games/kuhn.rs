//! 3-card Kuhn poker, built directly as a treeplex/payoff-table pair.
//!
//! Each player antes 1 chip and is dealt one of {J, Q, K} (no ties). Player
//! 1 acts first (pass/bet); if player 1 passes, player 2 reacts with
//! pass/bet; if either player bets, the other reacts with fold/call. Ties
//! are impossible since the two cards dealt are always distinct.
//!
//! Every "the opponent revealed an action" branch is modeled as a real
//! observation node rather than a same-player sequence, so player 2's
//! reaction to player 1's bet or check is conditioned on an actual signal —
//! matching the data model's "observation nodes carry the opponent's
//! revealed moves" convention (see `Treeplex::precompute_opponent_reach_links`).

use crate::error::Result;
use crate::game_file::{build, GameFile, LoadedGame, RawNode, RawPayoffEntry};
use crate::treeplex::Sequence;

const CARDS: [&str; 3] = ["J", "Q", "K"];

fn rank(card: &str) -> u8 {
    CARDS.iter().position(|&c| c == card).unwrap() as u8
}

pub fn generate() -> Result<LoadedGame> {
    build(build_game_file())
}

fn build_game_file() -> GameFile {
    let mut dp1 = Vec::new();
    dp1.push(RawNode::observation(
        "obs_card_pl1",
        CARDS.iter().map(|c| c.to_string()).collect(),
        None,
    ));
    for card in CARDS {
        let act_id = format!("p1_act_{}", card);
        dp1.push(RawNode::decision(
            &act_id,
            vec!["pass".to_string(), "bet".to_string()],
            Some(("obs_card_pl1".to_string(), card.to_string())),
            None,
        ));
        let obs_id = format!("obs_p2bet_{}", card);
        dp1.push(RawNode::observation(
            &obs_id,
            vec!["bet".to_string()],
            Some((act_id.clone(), "pass".to_string())),
        ));
        dp1.push(RawNode::decision(
            format!("p1_resp_{}", card),
            vec!["fold".to_string(), "call".to_string()],
            Some((obs_id, "bet".to_string())),
            Some(Sequence::new(act_id, "pass")),
        ));
    }

    let mut dp2 = Vec::new();
    dp2.push(RawNode::observation(
        "obs_card_pl2",
        CARDS.iter().map(|c| c.to_string()).collect(),
        None,
    ));
    for card in CARDS {
        let obs_id = format!("obs_p1act_{}", card);
        dp2.push(RawNode::observation(
            &obs_id,
            vec!["pass".to_string(), "bet".to_string()],
            Some(("obs_card_pl2".to_string(), card.to_string())),
        ));
        dp2.push(RawNode::decision(
            format!("p2_act_{}", card),
            vec!["pass".to_string(), "bet".to_string()],
            Some((obs_id.clone(), "pass".to_string())),
            None,
        ));
        dp2.push(RawNode::decision(
            format!("p2_actB_{}", card),
            vec!["fold".to_string(), "call".to_string()],
            Some((obs_id, "bet".to_string())),
            None,
        ));
    }

    let mut utility_pl1 = Vec::new();
    for &c1 in &CARDS {
        for &c2 in &CARDS {
            if c1 == c2 {
                continue;
            }
            let p = 1.0 / 6.0;
            let p1_wins = rank(c1) > rank(c2);

            // player 1 bets, player 2 folds
            utility_pl1.push(RawPayoffEntry {
                sequence_pl1: Sequence::new(format!("p1_act_{}", c1), "bet"),
                sequence_pl2: Sequence::new(format!("p2_actB_{}", c2), "fold"),
                value: p * 1.0,
            });
            // player 1 bets, player 2 calls
            utility_pl1.push(RawPayoffEntry {
                sequence_pl1: Sequence::new(format!("p1_act_{}", c1), "bet"),
                sequence_pl2: Sequence::new(format!("p2_actB_{}", c2), "call"),
                value: p * if p1_wins { 2.0 } else { -2.0 },
            });
            // player 1 passes, player 2 checks (showdown at the ante)
            utility_pl1.push(RawPayoffEntry {
                sequence_pl1: Sequence::new(format!("p1_act_{}", c1), "pass"),
                sequence_pl2: Sequence::new(format!("p2_act_{}", c2), "pass"),
                value: p * if p1_wins { 1.0 } else { -1.0 },
            });
            // player 1 passes, player 2 bets, player 1 folds
            utility_pl1.push(RawPayoffEntry {
                sequence_pl1: Sequence::new(format!("p1_resp_{}", c1), "fold"),
                sequence_pl2: Sequence::new(format!("p2_act_{}", c2), "bet"),
                value: -p,
            });
            // player 1 passes, player 2 bets, player 1 calls
            utility_pl1.push(RawPayoffEntry {
                sequence_pl1: Sequence::new(format!("p1_resp_{}", c1), "call"),
                sequence_pl2: Sequence::new(format!("p2_act_{}", c2), "bet"),
                value: p * if p1_wins { 2.0 } else { -2.0 },
            });
        }
    }

    GameFile {
        decision_problem_pl1: dp1,
        decision_problem_pl2: dp2,
        utility_pl1,
    }
}
