//! Tests for the rule patcher.

use super::*;

fn rule(line: &str) -> Rule {
    Rule::new(line).unwrap()
}

fn one(line: &str) -> RuleSet {
    RuleSet::single(rule(line))
}

fn patcher() -> Patcher {
    Patcher::default()
}

#[test]
fn test_add_establishes_managed_block_after_opener() {
    let doc = "<?php\n";

    let (out, outcomes) = patcher()
        .apply(doc, &one("define('X',1);"), PatchMode::Add)
        .unwrap();

    assert_eq!(
        out,
        format!("<?php\n{}\ndefine('X',1);\n", DEFAULT_SENTINEL)
    );
    assert_eq!(outcomes, vec![RuleOutcome::Added]);
}

#[test]
fn test_add_is_idempotent() {
    let doc = "<?php\n";
    let rules = one("define('X',1);");
    let p = patcher();

    let (once, _) = p.apply(doc, &rules, PatchMode::Add).unwrap();
    let (twice, outcomes) = p.apply(&once, &rules, PatchMode::Add).unwrap();

    assert_eq!(twice, once);
    assert_eq!(outcomes, vec![RuleOutcome::AlreadyPresent]);
}

#[test]
fn test_add_inserts_below_existing_sentinel() {
    let doc = format!("<?php\n{}\ndefine('OLD',1);\nrest();\n", DEFAULT_SENTINEL);

    let (out, _) = patcher()
        .apply(&doc, &one("define('NEW',1);"), PatchMode::Add)
        .unwrap();

    assert_eq!(
        out,
        format!(
            "<?php\n{}\ndefine('NEW',1);\ndefine('OLD',1);\nrest();\n",
            DEFAULT_SENTINEL
        )
    );
}

#[test]
fn test_batch_preserves_rule_order() {
    let doc = "<?php\n";
    let rules: RuleSet = vec![rule("define('R1',1);"), rule("define('R2',1);")]
        .into();

    let (out, outcomes) = patcher().apply(doc, &rules, PatchMode::Add).unwrap();

    let r1 = out.find("R1").unwrap();
    let r2 = out.find("R2").unwrap();
    assert!(r1 < r2, "R1 must appear before R2: {}", out);
    assert_eq!(outcomes, vec![RuleOutcome::Added, RuleOutcome::Added]);
}

#[test]
fn test_later_calls_insert_above_earlier_rules() {
    let doc = "<?php\n";
    let p = patcher();

    let (first, _) = p.apply(doc, &one("define('R1',1);"), PatchMode::Add).unwrap();
    let (second, _) = p
        .apply(&first, &one("define('R2',1);"), PatchMode::Add)
        .unwrap();

    let r1 = second.find("R1").unwrap();
    let r2 = second.find("R2").unwrap();
    assert!(r2 < r1, "a later call lands at the top of the block: {}", second);
}

#[test]
fn test_remove_deletes_exactly_the_rule_line() {
    let doc = format!(
        "<?php\n{}\ndefine('X',1);\ndefine('Y',1);\nrest();\n",
        DEFAULT_SENTINEL
    );

    let (out, outcomes) = patcher()
        .apply(&doc, &one("define('X',1);"), PatchMode::Remove)
        .unwrap();

    assert_eq!(
        out,
        format!("<?php\n{}\ndefine('Y',1);\nrest();\n", DEFAULT_SENTINEL)
    );
    assert_eq!(outcomes, vec![RuleOutcome::Removed]);
}

#[test]
fn test_remove_is_idempotent() {
    let doc = format!("<?php\n{}\ndefine('X',1);\n", DEFAULT_SENTINEL);
    let rules = one("define('X',1);");
    let p = patcher();

    let (once, _) = p.apply(&doc, &rules, PatchMode::Remove).unwrap();
    let (twice, outcomes) = p.apply(&once, &rules, PatchMode::Remove).unwrap();

    assert_eq!(twice, once);
    assert_eq!(outcomes, vec![RuleOutcome::AlreadyAbsent]);
}

#[test]
fn test_remove_absent_rule_is_reported_noop() {
    let doc = "<?php\n";

    let (out, outcomes) = patcher()
        .apply(doc, &one("define('X',1);"), PatchMode::Remove)
        .unwrap();

    assert_eq!(out, doc);
    assert_eq!(outcomes, vec![RuleOutcome::AlreadyAbsent]);
}

#[test]
fn test_remove_keeps_sentinel_when_block_empties() {
    let doc = format!("<?php\n{}\ndefine('X',1);\nrest();\n", DEFAULT_SENTINEL);

    let (out, _) = patcher()
        .apply(&doc, &one("define('X',1);"), PatchMode::Remove)
        .unwrap();

    assert_eq!(out, format!("<?php\n{}\nrest();\n", DEFAULT_SENTINEL));
}

#[test]
fn test_round_trip_restores_document_with_established_block() {
    let doc = format!(
        "<?php\n{}\ndefine('OLD',1);\n\n$table_prefix = 'wp_';\n",
        DEFAULT_SENTINEL
    );
    let rules = one("define('X',1);");
    let p = patcher();

    let (added, _) = p.apply(&doc, &rules, PatchMode::Add).unwrap();
    let (removed, _) = p.apply(&added, &rules, PatchMode::Remove).unwrap();

    assert_eq!(removed, doc);
}

#[test]
fn test_add_without_opener_prepends_block() {
    let doc = "just some text\n";

    let (out, _) = patcher()
        .apply(doc, &one("directive"), PatchMode::Add)
        .unwrap();

    assert_eq!(
        out,
        format!("{}\ndirective\njust some text\n", DEFAULT_SENTINEL)
    );
}

#[test]
fn test_add_to_empty_document() {
    let (out, outcomes) = patcher().apply("", &one("directive"), PatchMode::Add).unwrap();

    assert_eq!(out, format!("{}\ndirective\n", DEFAULT_SENTINEL));
    assert_eq!(outcomes, vec![RuleOutcome::Added]);
}

#[test]
fn test_add_after_unterminated_final_line() {
    let doc = "<?php";

    let (out, _) = patcher()
        .apply(doc, &one("define('X',1);"), PatchMode::Add)
        .unwrap();

    assert_eq!(
        out,
        format!("<?php\n{}\ndefine('X',1);\n", DEFAULT_SENTINEL)
    );
}

#[test]
fn test_rule_match_is_exact_not_substring() {
    // An indented copy of the directive is a different line, so the exact
    // rule is still absent and gets added.
    let doc = format!("<?php\n{}\n  define('X',1);\n", DEFAULT_SENTINEL);

    let (out, outcomes) = patcher()
        .apply(&doc, &one("define('X',1);"), PatchMode::Add)
        .unwrap();

    assert_eq!(outcomes, vec![RuleOutcome::Added]);
    assert!(out.contains("\ndefine('X',1);\n"));
    assert!(out.contains("\n  define('X',1);\n"));
}

#[test]
fn test_crlf_lines_match_and_remove_cleanly() {
    let doc = format!("<?php\r\n{}\r\ndefine('X',1);\r\nrest();\r\n", DEFAULT_SENTINEL);

    let (out, outcomes) = patcher()
        .apply(&doc, &one("define('X',1);"), PatchMode::Remove)
        .unwrap();

    assert_eq!(
        out,
        format!("<?php\r\n{}\r\nrest();\r\n", DEFAULT_SENTINEL)
    );
    assert_eq!(outcomes, vec![RuleOutcome::Removed]);
}

#[test]
fn test_crlf_document_gets_crlf_insertions() {
    let doc = "<?php\r\n$table_prefix = 'wp_';\r\n";
    let p = patcher();

    let (added, _) = p.apply(doc, &one("define('X',1);"), PatchMode::Add).unwrap();

    assert_eq!(
        added,
        format!(
            "<?php\r\n{}\r\ndefine('X',1);\r\n$table_prefix = 'wp_';\r\n",
            DEFAULT_SENTINEL
        )
    );
    // Round trip stays byte-exact under CRLF too
    let (removed, _) = p
        .apply(&added, &one("define('X',1);"), PatchMode::Remove)
        .unwrap();
    assert_eq!(removed, format!("<?php\r\n{}\r\n$table_prefix = 'wp_';\r\n", DEFAULT_SENTINEL));
}

#[test]
fn test_duplicate_sentinel_is_rejected() {
    let doc = format!("<?php\n{s}\nrule1\n{s}\nrule2\n", s = DEFAULT_SENTINEL);

    let err = patcher()
        .apply(&doc, &one("rule3"), PatchMode::Add)
        .unwrap_err();

    assert!(matches!(
        err,
        crate::error::PatchlockError::CorruptDocument(_)
    ));
}

#[test]
fn test_mixed_outcomes_in_one_batch() {
    let doc = format!("<?php\n{}\ndefine('X',1);\n", DEFAULT_SENTINEL);
    let rules: RuleSet = vec![rule("define('X',1);"), rule("define('Y',1);")]
        .into();

    let (out, outcomes) = patcher().apply(&doc, &rules, PatchMode::Add).unwrap();

    assert_eq!(
        outcomes,
        vec![RuleOutcome::AlreadyPresent, RuleOutcome::Added]
    );
    assert!(out.contains("define('Y',1);\n"));
}

#[test]
fn test_custom_marker_and_sentinel() {
    let p = Patcher::new("#!overture", "# managed");
    let doc = "#!overture\nbody\n";

    let (out, _) = p.apply(doc, &one("setting on"), PatchMode::Add).unwrap();

    assert_eq!(out, "#!overture\n# managed\nsetting on\nbody\n");
}

#[test]
fn test_rule_rejects_embedded_terminator() {
    assert!(Rule::new("two\nlines").is_err());
    assert!(Rule::new("trailing\r").is_err());
    assert!(Rule::new("define('X',1);").is_ok());
}

#[test]
fn test_rule_equality_is_exact() {
    assert_eq!(rule("a"), rule("a"));
    assert_ne!(rule("a"), rule(" a"));
}

#[test]
fn test_ruleset_preserves_insertion_order() {
    let mut set = RuleSet::new();
    set.push(rule("one"));
    set.push(rule("two"));

    let lines: Vec<&str> = set.iter().map(Rule::as_str).collect();
    assert_eq!(lines, vec!["one", "two"]);
    assert_eq!(set.len(), 2);
    assert!(!set.is_empty());
}
