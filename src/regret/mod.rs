//! Local regret matching: the per-decision-point building block the CFR
//! engine composes into a full sequence-form strategy.
//!
//! A [`LocalRegretState`] owns one decision's regret accumulator and tracks
//! its own local strategy between `next_strategy` and `observe_utility`
//! calls. It comes in two flavors ([`RmVariant::Rm`] and
//! [`RmVariant::RmPlus`]) that differ only in how regret is accumulated —
//! threaded through a single flag (`CFRConfig::use_cfr_plus`) rather than a
//! parallel trait hierarchy.

/// Which flavor of regret matching a [`LocalRegretState`] performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RmVariant {
    /// Vanilla regret matching: signed regret accumulation.
    Rm,
    /// RM+: regret is floored at zero after every update, which in
    /// practice converges faster and is the variant paired with CFR+'s
    /// linear averaging.
    RmPlus,
}

/// One decision node's local regret matcher.
#[derive(Debug, Clone)]
pub struct LocalRegretState {
    actions: Vec<String>,
    regrets: Vec<f64>,
    last_strategy: Vec<f64>,
    variant: RmVariant,
}

impl LocalRegretState {
    pub fn new(actions: Vec<String>, variant: RmVariant) -> Self {
        let n = actions.len();
        let uniform = 1.0 / n as f64;
        Self {
            actions,
            regrets: vec![0.0; n],
            last_strategy: vec![uniform; n],
            variant,
        }
    }

    pub fn actions(&self) -> &[String] {
        &self.actions
    }

    pub fn regrets(&self) -> &[f64] {
        &self.regrets
    }

    pub fn variant(&self) -> RmVariant {
        self.variant
    }

    /// Computes this decision's next local strategy from its accumulated
    /// regret: proportional to positive regret, or uniform if no action has
    /// positive regret.
    pub fn next_strategy(&mut self) -> &[f64] {
        let positive_sum: f64 = self.regrets.iter().map(|&r| r.max(0.0)).sum();
        if positive_sum > 0.0 {
            for (s, &r) in self.last_strategy.iter_mut().zip(&self.regrets) {
                *s = r.max(0.0) / positive_sum;
            }
        } else {
            let uniform = 1.0 / self.actions.len() as f64;
            self.last_strategy.iter_mut().for_each(|s| *s = uniform);
        }
        &self.last_strategy
    }

    /// Folds an observed per-action utility vector (one entry per action,
    /// same order as [`Self::actions`]) into the regret accumulator, using
    /// the local strategy produced by the most recent `next_strategy` call.
    pub fn observe_utility(&mut self, utility: &[f64]) {
        debug_assert_eq!(utility.len(), self.actions.len());
        let ev: f64 = self
            .last_strategy
            .iter()
            .zip(utility)
            .map(|(&s, &u)| s * u)
            .sum();
        for (r, &u) in self.regrets.iter_mut().zip(utility) {
            let updated = *r + (u - ev);
            *r = match self.variant {
                RmVariant::Rm => updated,
                RmVariant::RmPlus => updated.max(0.0),
            };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_uniform() {
        let mut m = LocalRegretState::new(vec!["a".into(), "b".into(), "c".into()], RmVariant::Rm);
        let s = m.next_strategy();
        for &p in s {
            assert!((p - 1.0 / 3.0).abs() < 1e-12);
        }
    }

    #[test]
    fn rm_shifts_toward_higher_utility_action() {
        let mut m = LocalRegretState::new(vec!["a".into(), "b".into()], RmVariant::Rm);
        for _ in 0..50 {
            m.next_strategy();
            m.observe_utility(&[1.0, 0.0]);
        }
        let s = m.next_strategy();
        assert!(s[0] > 0.9, "strategy should favor action a: {:?}", s);
    }

    #[test]
    fn rm_plus_regret_never_goes_negative() {
        let mut m = LocalRegretState::new(vec!["a".into(), "b".into()], RmVariant::RmPlus);
        m.next_strategy();
        m.observe_utility(&[0.0, 10.0]);
        for &r in m.regrets() {
            assert!(r >= 0.0);
        }
        // a's regret should have been floored at zero rather than going
        // negative, unlike plain RM.
        assert_eq!(m.regrets()[0], 0.0);
    }

    #[test]
    fn rm_allows_negative_regret() {
        let mut m = LocalRegretState::new(vec!["a".into(), "b".into()], RmVariant::Rm);
        m.next_strategy();
        m.observe_utility(&[0.0, 10.0]);
        assert!(m.regrets()[0] < 0.0);
    }

    #[test]
    fn no_positive_regret_falls_back_to_uniform() {
        let mut m = LocalRegretState::new(vec!["a".into(), "b".into()], RmVariant::Rm);
        m.next_strategy();
        m.observe_utility(&[-1.0, -1.0]);
        let s = m.next_strategy();
        assert!((s[0] - 0.5).abs() < 1e-12);
        assert!((s[1] - 0.5).abs() < 1e-12);
    }
}
