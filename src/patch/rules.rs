//! Rule, rule-set, and patch outcome types.

use crate::error::{PatchlockError, Result};

/// A single directive: one line of text with no embedded line terminator.
///
/// Equality is exact string match; a rule differing only in leading
/// whitespace is a different rule.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Rule(String);

impl Rule {
    /// Create a rule from a single line of text.
    ///
    /// # Returns
    ///
    /// * `Ok(Rule)` - The text is a valid single line
    /// * `Err(PatchlockError::InvalidRule)` - The text contains a line terminator
    pub fn new<S: Into<String>>(line: S) -> Result<Self> {
        let line = line.into();
        if line.contains('\n') || line.contains('\r') {
            return Err(PatchlockError::InvalidRule(format!(
                "rule must be a single line without terminators: {:?}",
                line
            )));
        }
        Ok(Self(line))
    }

    /// The rule's line content.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// An ordered sequence of rules. Insertion order is significant: rules are
/// written to the managed block in the order given.
#[derive(Debug, Clone, Default)]
pub struct RuleSet(Vec<Rule>);

impl RuleSet {
    /// Create an empty rule set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a rule set holding a single rule.
    pub fn single(rule: Rule) -> Self {
        Self(vec![rule])
    }

    /// Append a rule.
    pub fn push(&mut self, rule: Rule) {
        self.0.push(rule);
    }

    /// Iterate over the rules in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Rule> {
        self.0.iter()
    }

    /// Number of rules.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the set holds no rules.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<Rule>> for RuleSet {
    fn from(rules: Vec<Rule>) -> Self {
        Self(rules)
    }
}

impl FromIterator<Rule> for RuleSet {
    fn from_iter<I: IntoIterator<Item = Rule>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a RuleSet {
    type Item = &'a Rule;
    type IntoIter = std::slice::Iter<'a, Rule>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Whether rules are being added to or removed from the managed block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatchMode {
    /// Insert rules into the managed block.
    Add,
    /// Delete rules from the document.
    Remove,
}

/// Per-rule result of a patch application.
///
/// The "already" variants are reported no-ops, not errors: removing a rule
/// that is absent means the caller's goal is already met.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleOutcome {
    /// The rule line was inserted.
    Added,
    /// The rule line was already present; nothing changed.
    AlreadyPresent,
    /// The rule line was deleted.
    Removed,
    /// The rule line was not there to delete; nothing changed.
    AlreadyAbsent,
}

impl RuleOutcome {
    /// Whether this outcome changed the document.
    pub fn changed(&self) -> bool {
        matches!(self, Self::Added | Self::Removed)
    }
}
