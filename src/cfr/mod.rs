//! The CFR family: composing per-decision local regret matching into
//! sequence-form self-play.
//!
//! # Overview
//!
//! Two pieces compose to produce a trained strategy:
//!
//! 1. [`CfrEngine`] owns one local regret matcher per decision node of a
//!    single player's treeplex and knows how to turn their independent
//!    local strategies into a valid sequence-form realization plan, and how
//!    to split a full utility vector back into per-decision slices.
//! 2. [`SelfPlayDriver`] runs two engines against each other over a shared
//!    payoff table, in either of two modes:
//!    - **Vanilla CFR**: simultaneous updates, uniform averaging.
//!    - **CFR+**: alternating updates (player 2 reacts to player 1's
//!      already-updated move), linear (iteration-weighted) averaging, RM+
//!      local matchers.
//!
//! # Theory
//!
//! Regret matching sets each decision's local strategy proportional to its
//! positive accumulated regret:
//! ```text
//! strategy(a) = max(0, regret(a)) / sum(max(0, regret(a')))
//! ```
//! and falls back to uniform when no action has positive regret. Averaged
//! over enough iterations, the time-averaged realization plan converges to
//! a Nash equilibrium at a rate of O(1/sqrt(T)) for vanilla CFR, faster in
//! practice for CFR+.
//!
//! # References
//!
//! - Zinkevich, M., et al. "Regret Minimization in Games with Incomplete
//!   Information" (2007)
//! - Tammelin, O. "Solving Large Imperfect Information Games Using CFR+"
//!   (2014)

pub mod config;
pub mod driver;
pub mod engine;

pub use config::{CFRConfig, CFRStats, ConfigError, ExploitabilityPoint};
pub use driver::{extract_policy, Policy, SelfPlayDriver};
pub use engine::CfrEngine;
