//! The line-based patch algorithm.

use super::rules::{PatchMode, Rule, RuleOutcome, RuleSet};
use crate::error::{PatchlockError, Result};

/// Default opening marker: the leading directive of a PHP bootstrap file.
pub const DEFAULT_OPENING_MARKER: &str = "<?php";

/// Default sentinel comment line demarcating the managed block.
pub const DEFAULT_SENTINEL: &str = "// BEGIN patchlock managed directives";

/// Pure text transform adding or removing directive lines grouped under one
/// sentinel marker line.
///
/// The document is treated as an opaque blob apart from three kinds of line:
/// the opening marker (where a fresh managed block is established), the
/// sentinel line itself, and exact-match rule lines.
#[derive(Debug, Clone)]
pub struct Patcher {
    opening_marker: String,
    sentinel: String,
}

impl Default for Patcher {
    fn default() -> Self {
        Self::new(DEFAULT_OPENING_MARKER, DEFAULT_SENTINEL)
    }
}

impl Patcher {
    /// Create a patcher for documents using the given opening marker and
    /// sentinel line.
    pub fn new<M: Into<String>, S: Into<String>>(opening_marker: M, sentinel: S) -> Self {
        Self {
            opening_marker: opening_marker.into(),
            sentinel: sentinel.into(),
        }
    }

    /// The sentinel line this patcher manages.
    pub fn sentinel(&self) -> &str {
        &self.sentinel
    }

    /// Apply `rules` to `document` in order, returning the new document text
    /// and one [`RuleOutcome`] per rule.
    ///
    /// Add: a rule already present anywhere is a no-op; otherwise it is
    /// inserted into the managed block, establishing the block after the
    /// opening marker if no sentinel exists yet. Within one call, rules land
    /// in the order given; separate calls insert at the top of the block,
    /// above previously inserted rules.
    ///
    /// Remove: an absent rule is a no-op; a present rule's line is deleted
    /// along with its terminator. The sentinel stays even when the block
    /// empties.
    ///
    /// # Returns
    ///
    /// * `Ok((document, outcomes))` - Patched text and per-rule outcomes
    /// * `Err(PatchlockError::CorruptDocument)` - The sentinel line appears
    ///   more than once; nothing is patched
    pub fn apply(
        &self,
        document: &str,
        rules: &RuleSet,
        mode: PatchMode,
    ) -> Result<(String, Vec<RuleOutcome>)> {
        let mut segments: Vec<String> = document
            .split_inclusive('\n')
            .map(str::to_string)
            .collect();

        let sentinel_count = segments
            .iter()
            .filter(|s| line_content(s) == self.sentinel)
            .count();
        if sentinel_count > 1 {
            return Err(PatchlockError::CorruptDocument(format!(
                "sentinel marker {:?} appears {} times; refusing to patch",
                self.sentinel, sentinel_count
            )));
        }

        let eol = detect_eol(&segments);
        let mut outcomes = Vec::with_capacity(rules.len());
        // Within one call, consecutive inserts advance past each other so
        // the batch lands in rule order.
        let mut cursor: Option<usize> = None;

        for rule in rules {
            let outcome = match mode {
                PatchMode::Add => self.add_rule(&mut segments, rule, &mut cursor, eol),
                PatchMode::Remove => remove_rule(&mut segments, rule),
            };
            outcomes.push(outcome);
        }

        Ok((segments.concat(), outcomes))
    }

    fn add_rule(
        &self,
        segments: &mut Vec<String>,
        rule: &Rule,
        cursor: &mut Option<usize>,
        eol: &str,
    ) -> RuleOutcome {
        if segments.iter().any(|s| line_content(s) == rule.as_str()) {
            return RuleOutcome::AlreadyPresent;
        }

        let at = match *cursor {
            Some(at) => at,
            None => self.block_insertion_point(segments, eol),
        };

        segments.insert(at, format!("{}{}", rule.as_str(), eol));
        *cursor = Some(at + 1);
        RuleOutcome::Added
    }

    /// Index at which the next rule line goes, establishing the managed
    /// block first if the sentinel is missing.
    fn block_insertion_point(&self, segments: &mut Vec<String>, eol: &str) -> usize {
        if let Some(i) = segments
            .iter()
            .position(|s| line_content(s) == self.sentinel)
        {
            ensure_terminated(&mut segments[i], eol);
            return i + 1;
        }

        // No managed block yet: put the sentinel right after the opening
        // marker, or at the very top when the document has no marker at all.
        let at = match segments
            .iter()
            .position(|s| line_content(s).trim_start().starts_with(&self.opening_marker))
        {
            Some(i) => {
                ensure_terminated(&mut segments[i], eol);
                i + 1
            }
            None => 0,
        };

        segments.insert(at, format!("{}{}", self.sentinel, eol));
        at + 1
    }
}

fn remove_rule(segments: &mut Vec<String>, rule: &Rule) -> RuleOutcome {
    match segments
        .iter()
        .position(|s| line_content(s) == rule.as_str())
    {
        Some(i) => {
            segments.remove(i);
            RuleOutcome::Removed
        }
        None => RuleOutcome::AlreadyAbsent,
    }
}

/// A segment's line content: the text without its `\n` or `\r\n` terminator.
fn line_content(segment: &str) -> &str {
    segment
        .strip_suffix('\n')
        .map(|s| s.strip_suffix('\r').unwrap_or(s))
        .unwrap_or(segment)
}

/// The document's line terminator, taken from its first terminated line, so
/// inserted lines match the document's existing endings. Empty and
/// single-line documents get `\n`.
fn detect_eol(segments: &[String]) -> &'static str {
    match segments.iter().find(|s| s.ends_with('\n')) {
        Some(s) if s.ends_with("\r\n") => "\r\n",
        _ => "\n",
    }
}

/// Make sure the segment we insert after ends in a newline, so an unterminated
/// final line does not fuse with the inserted one.
fn ensure_terminated(segment: &mut String, eol: &str) {
    if !segment.ends_with('\n') {
        segment.push_str(eol);
    }
}
