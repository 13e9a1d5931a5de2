//! The policy-file output format: decision-id (or MCCFR+ infostate-key) to
//! action-probability maps, written as pretty JSON by the CLI binaries.

use std::fs;
use std::path::Path;

use crate::cfr::Policy;
use crate::error::{Result, SolverError};

/// Writes `policy` to `path` as pretty-printed JSON.
pub fn save(policy: &Policy, path: impl AsRef<Path>) -> Result<()> {
    let json = serde_json::to_string_pretty(policy)
        .map_err(|e| SolverError::MalformedGame(format!("failed to serialize policy: {}", e)))?;
    fs::write(&path, json).map_err(|e| {
        SolverError::MalformedGame(format!("failed to write {}: {}", path.as_ref().display(), e))
    })
}

/// Reads a policy file back from disk. Mostly useful for tests and the
/// `solve` CLI's diagnostic modes that compare against a saved policy.
pub fn load(path: impl AsRef<Path>) -> Result<Policy> {
    let text = fs::read_to_string(&path).map_err(|e| {
        SolverError::MalformedGame(format!("failed to read {}: {}", path.as_ref().display(), e))
    })?;
    serde_json::from_str(&text)
        .map_err(|e| SolverError::MalformedGame(format!("failed to parse policy file: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustc_hash::FxHashMap;

    #[test]
    fn round_trips_through_a_temp_file() {
        let mut policy: Policy = FxHashMap::default();
        let mut dist = FxHashMap::default();
        dist.insert("H".to_string(), 0.5);
        dist.insert("T".to_string(), 0.5);
        policy.insert("p1".to_string(), dist);

        let path = std::env::temp_dir().join("sequence_form_cfr_policy_test.json");
        save(&policy, &path).unwrap();
        let loaded = load(&path).unwrap();
        assert_eq!(loaded["p1"]["H"], 0.5);
        let _ = std::fs::remove_file(&path);
    }
}
