//! The generative Liar's Dice game MCCFR+ trains against.
//!
//! Each of two players privately rolls `num_dice` dice with `faces` sides.
//! Player 1 claims `(quantity, face)`: "at least `quantity` dice among both
//! hands show `face`." Player 2 either `accept`s the claim (believes it) or
//! `call`s it (thinks it's a bluff). The claim is true when the combined
//! count of `face` across both hands is `>= quantity`; player 2 wins by
//! calling a false claim or accepting a true one, and loses otherwise.

use rand::Rng;

/// Game parameters: how many dice each player rolls and how many faces a
/// die has. The reference scenario is `num_dice = 5, faces = 6`.
#[derive(Debug, Clone, Copy)]
pub struct DiceGameConfig {
    pub num_dice: usize,
    pub faces: u32,
}

impl Default for DiceGameConfig {
    fn default() -> Self {
        Self {
            num_dice: 5,
            faces: 6,
        }
    }
}

/// A claim: "at least `quantity` dice among both hands show `face`."
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Claim {
    pub quantity: u32,
    pub face: u32,
}

impl Claim {
    /// The wire/action-label form, e.g. `claim_3_4`.
    pub fn label(&self) -> String {
        format!("claim_{}_{}", self.quantity, self.face)
    }
}

/// Every claim player 1 may make: quantity from 1 to `2 * num_dice`, face
/// from 1 to `faces`, in that nested order — matching the reference
/// enumeration exactly, so claim indices are stable across runs.
pub fn all_claims(config: &DiceGameConfig) -> Vec<Claim> {
    let max_quantity = 2 * config.num_dice as u32;
    let mut claims = Vec::with_capacity((max_quantity * config.faces) as usize);
    for quantity in 1..=max_quantity {
        for face in 1..=config.faces {
            claims.push(Claim { quantity, face });
        }
    }
    claims
}

/// Rolls `config.num_dice` dice and returns them sorted — the canonical
/// form used as a regret-table key, since order doesn't affect the game.
pub fn roll_hand(config: &DiceGameConfig, rng: &mut impl Rng) -> Vec<u8> {
    let mut hand: Vec<u8> = (0..config.num_dice)
        .map(|_| rng.gen_range(1..=config.faces) as u8)
        .collect();
    hand.sort_unstable();
    hand
}

/// Whether `claim` is true for the combined hands: the count of dice
/// showing `claim.face` across both hands is at least `claim.quantity`.
pub fn claim_is_true(claim: &Claim, hand1: &[u8], hand2: &[u8]) -> bool {
    let face = claim.face as u8;
    let count = hand1.iter().chain(hand2).filter(|&&d| d == face).count() as u32;
    count >= claim.quantity
}

/// Player 2's payoff for `response` given whether `claim` was actually true.
/// Accepting a true claim or calling a false one wins; the reverse loses.
/// Player 1's payoff is the negation (zero-sum).
pub fn payoff_pl2(accepted: bool, claim_true: bool) -> f64 {
    if accepted == claim_true {
        1.0
    } else {
        -1.0
    }
}

/// The full player-1 utility vector over every claim: `+1` where the claim
/// would be true against the realized hands (assuming player 2 accepts),
/// `-1` otherwise. This is a biased outcome-sampling proxy, not the
/// unbiased per-claim counterfactual value — see `McCfrPlusTrainer` docs.
pub fn full_information_utility_pl1(claims: &[Claim], hand1: &[u8], hand2: &[u8]) -> Vec<f64> {
    claims
        .iter()
        .map(|c| if claim_is_true(c, hand1, hand2) { 1.0 } else { -1.0 })
        .collect()
}

/// Formats a hand the way the reference implementation's string keys do:
/// a Python-tuple-style rendering, e.g. `(1, 2, 2, 5, 6)` or `(3,)`.
pub fn format_hand(hand: &[u8]) -> String {
    if hand.len() == 1 {
        format!("({},)", hand[0])
    } else {
        let inner = hand
            .iter()
            .map(|d| d.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        format!("({})", inner)
    }
}

/// Formats a player-2 key `(hand, claim)` the same way.
pub fn format_key2(hand: &[u8], claim: &Claim) -> String {
    format!("({}, '{}')", format_hand(hand), claim.label())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_claims_enumeration_matches_reference_shape() {
        let config = DiceGameConfig {
            num_dice: 1,
            faces: 2,
        };
        let claims = all_claims(&config);
        // quantity in 1..=2, face in 1..=2 -> 4 claims
        assert_eq!(claims.len(), 4);
        assert_eq!(claims[0].label(), "claim_1_1");
        assert_eq!(claims[3].label(), "claim_2_2");
    }

    #[test]
    fn claim_truth_counts_across_both_hands() {
        let claim = Claim { quantity: 2, face: 3 };
        assert!(claim_is_true(&claim, &[3, 5], &[3, 1]));
        assert!(!claim_is_true(&claim, &[3, 5], &[1, 1]));
    }

    #[test]
    fn payoff_rewards_correct_response() {
        assert_eq!(payoff_pl2(true, true), 1.0);
        assert_eq!(payoff_pl2(false, false), 1.0);
        assert_eq!(payoff_pl2(true, false), -1.0);
        assert_eq!(payoff_pl2(false, true), -1.0);
    }

    #[test]
    fn hand_formatting_matches_python_tuple_style() {
        assert_eq!(format_hand(&[4]), "(4,)");
        assert_eq!(format_hand(&[1, 2, 3]), "(1, 2, 3)");
    }
}
