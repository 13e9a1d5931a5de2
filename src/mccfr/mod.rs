//! Outcome-sampling MCCFR+ over a generative Liar's Dice.
//!
//! Unlike the tabular [`crate::cfr`] engine, this trainer never builds a
//! treeplex: information sets are discovered lazily as hands and claims are
//! sampled, and regret tables grow on demand in `FxHashMap`s keyed by
//! sorted-hand (player 1) or (sorted-hand, claim) (player 2) tuples.

pub mod dice_game;
pub mod trainer;

pub use dice_game::{all_claims, Claim, DiceGameConfig};
pub use trainer::McCfrPlusTrainer;
