//! Concrete sequence-form games: small, fully-tabulated examples used in
//! tests and by the `solve` CLI's diagnostic modes.
//!
//! - [`matching_pennies`]: the smallest possible zero-sum game with no
//!   private information — a sanity check for the engine and driver.
//! - [`kuhn`]: 3-card Kuhn poker, built directly as a treeplex/payoff-table
//!   pair, with a known closed-form Nash equilibrium to check convergence
//!   against.
//! - [`liars_dice`]: the reduced, tabulable 1-bid Liar's Dice used for CFR
//!   and CFR+ convergence testing; see `McCfrPlusTrainer` for the full
//!   generative (untabulated) version used by MCCFR+.

pub mod kuhn;
pub mod liars_dice;
pub mod matching_pennies;
