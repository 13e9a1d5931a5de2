//! # sequence-form-cfr
//!
//! Approximate Nash equilibrium computation for two-player zero-sum
//! extensive-form games with imperfect information, via Counterfactual
//! Regret Minimization (CFR) and CFR+ in the sequence-form representation,
//! plus outcome-sampling MCCFR+ for games too large to tabulate.
//!
//! ## Modules
//!
//! - [`treeplex`]: nodes, sequences, and the sequence set Σ of one player's
//!   decision problem.
//! - [`sequence_form`]: realization plans, the sparse bilinear payoff table,
//!   and the best-response / exploitability evaluators.
//! - [`regret`]: local regret matching (RM and RM+), one instance per
//!   decision node.
//! - [`cfr`]: the engine that composes local matchers into a sequence-form
//!   strategy, and the self-play driver (vanilla CFR and CFR+).
//! - [`mccfr`]: outcome-sampling MCCFR+ over a generative Liar's Dice whose
//!   information-state space is too large to tabulate.
//! - [`game_file`] / [`policy`]: the JSON wire formats for loading a game
//!   and writing a trained policy.
//! - [`games`]: small, fully-tabulated example games (matching pennies,
//!   Kuhn poker, reduced Liar's Dice) used by tests and the `solve` CLI.
//! - [`error`]: the crate's error taxonomy.
//!
//! ## Quick start
//!
//! ```
//! use sequence_form_cfr::cfr::{CFRConfig, SelfPlayDriver, extract_policy};
//! use sequence_form_cfr::games::matching_pennies;
//!
//! let loaded = matching_pennies::generate().unwrap();
//! let config = CFRConfig::default();
//! let mut driver = SelfPlayDriver::new(
//!     &loaded.treeplex_pl1,
//!     &loaded.treeplex_pl2,
//!     &loaded.payoff,
//!     &config,
//! );
//! for _ in 0..1000 {
//!     driver.run_iteration();
//! }
//! let (avg1, _avg2) = driver.average_strategies();
//! let policy = extract_policy(&loaded.treeplex_pl1, &avg1);
//! assert!(driver.exploitability().unwrap() < 0.05);
//! let _ = policy;
//! ```

#![warn(missing_docs)]
#![allow(clippy::needless_range_loop)]

/// The treeplex: nodes, sequences, and the sequence set Σ.
pub mod treeplex;

/// Sequence-form strategies, the sparse bilinear payoff table, and the
/// best-response evaluator.
pub mod sequence_form;

/// Local regret matching (RM and RM+).
pub mod regret;

/// The CFR family: `CfrEngine` and `SelfPlayDriver`.
pub mod cfr;

/// Outcome-sampling MCCFR+ over a generative dice game.
pub mod mccfr;

/// The JSON game-file schema and loader.
pub mod game_file;

/// The JSON policy-file format.
pub mod policy;

/// The crate's error taxonomy.
pub mod error;

/// Small, fully-tabulated example games.
pub mod games;

pub use cfr::{extract_policy, CFRConfig, CFRStats, CfrEngine, Policy, SelfPlayDriver};
pub use error::{Result, SolverError};
