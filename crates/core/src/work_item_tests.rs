// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn normalize_max_attempts_substitutes_default_for_zero() {
    assert_eq!(WorkItem::normalize_max_attempts(0), DEFAULT_MAX_ATTEMPTS);
}

#[test]
fn normalize_max_attempts_passes_through_nonzero() {
    assert_eq!(WorkItem::normalize_max_attempts(7), 7);
}

#[test]
fn has_attempts_remaining_true_below_max() {
    let item = WorkItem::builder().attempt_count(0).max_attempts(3).build();
    assert!(item.has_attempts_remaining());
}

#[test]
fn has_attempts_remaining_false_at_max() {
    let item = WorkItem::builder().attempt_count(2).max_attempts(3).build();
    assert!(!item.has_attempts_remaining());
}

#[test]
fn truncate_result_passes_through_short_strings() {
    assert_eq!(truncate_result("short"), "short");
}

#[test]
fn truncate_result_truncates_long_strings_with_marker() {
    let long = "a".repeat(5000);
    let truncated = truncate_result(&long);
    assert!(truncated.ends_with(TRUNCATION_MARKER));
    assert_eq!(
        truncated.len(),
        RESULT_TRUNCATION_LIMIT + TRUNCATION_MARKER.len()
    );
}

#[test]
fn truncate_result_exactly_at_limit_is_unchanged() {
    let exact = "a".repeat(RESULT_TRUNCATION_LIMIT);
    assert_eq!(truncate_result(&exact), exact);
}

#[test]
fn truncate_result_respects_char_boundaries() {
    // Multi-byte chars near the limit must not panic / split mid-char.
    let s = "\u{1F600}".repeat(2000); // 4 bytes each, 8000 bytes total
    let truncated = truncate_result(&s);
    assert!(truncated.ends_with(TRUNCATION_MARKER));
    assert!(std::str::from_utf8(truncated.as_bytes()).is_ok());
}
