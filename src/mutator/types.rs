//! Mutation result types.

use crate::patch::RuleOutcome;

/// Result of a successful mutation: one outcome per rule, in rule order.
#[derive(Debug, Clone)]
pub struct MutationReport {
    /// Per-rule outcomes ("already removed" is an outcome, not an error).
    pub outcomes: Vec<RuleOutcome>,
}

impl MutationReport {
    /// Whether any rule actually changed the document.
    pub fn changed(&self) -> bool {
        self.outcomes.iter().any(RuleOutcome::changed)
    }

    /// Whether the whole mutation was a no-op.
    pub fn is_noop(&self) -> bool {
        !self.changed()
    }
}
