//! Engine configuration.

use serde::{Deserialize, Serialize};

/// Knobs for [`InferState`](crate::infer::InferState).
///
/// Deserializes with every field optional, so a host can embed it in its
/// own configuration file and only spell out what it changes.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UnifyConfig {
    /// Undo every binding made by a failing top-level `unify` or
    /// `unify_call`. When off, bindings made before the failing step stay.
    pub rollback_on_failure: bool,
}

impl UnifyConfig {
    pub fn with_rollback_on_failure(mut self, enabled: bool) -> Self {
        self.rollback_on_failure = enabled;
        self
    }
}
