// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Role-specific system prompt resolution (spec §6.3).

use std::path::Path;

const IMPLEMENTATION_PROMPT: &str = "\
You are implementing a specific, scoped unit of work inside a larger plan. \
Read the goal description and the prerequisite results you have been given, \
make the minimal correct change, and report back a concise summary of what \
you did and why it satisfies the action's stated effects.";

const CODE_REVIEW_PROMPT: &str = "\
You are reviewing a change for correctness, clarity, and adherence to the \
surrounding codebase's conventions. Flag concrete defects with file and line \
references; do not rewrite the change yourself unless asked.";

const ARCHITECTURE_REVIEW_PROMPT: &str = "\
You are reviewing a proposed design for structural soundness: module \
boundaries, coupling, failure handling, and fit with the existing system. \
Identify the single biggest structural risk, if any.";

const DESIGN_REVIEW_PROMPT: &str = "\
You are reviewing a design document or plan for completeness and internal \
consistency before implementation begins. Call out missing edge cases, \
undefined terms, and unstated assumptions.";

const PM_REVIEW_PROMPT: &str = "\
You are reviewing a plan or deliverable from a product standpoint: does it \
satisfy the stated goal, is scope appropriate, and is anything important \
missing from the user's perspective.";

const TESTING_PROMPT: &str = "\
You are verifying that a change behaves correctly. Write or run tests that \
exercise the golden path and the edge cases implied by the action's \
preconditions and effects, and report what you found.";

const GENERIC_PROMPT: &str = "\
You are completing one step of a larger plan. Read the goal, the action \
description, and any prerequisite results, then do the work and report back.";

/// Returns the built-in constant for a known role, or the generic
/// fallback for anything else.
pub fn builtin_prompt(role: &str) -> &'static str {
    match role {
        "implementation" => IMPLEMENTATION_PROMPT,
        "code_review" => CODE_REVIEW_PROMPT,
        "architecture_review" => ARCHITECTURE_REVIEW_PROMPT,
        "design_review" => DESIGN_REVIEW_PROMPT,
        "pm_review" => PM_REVIEW_PROMPT,
        "testing" => TESTING_PROMPT,
        _ => GENERIC_PROMPT,
    }
}

/// True if every character of `role` is `[A-Za-z0-9_-]`.
fn is_safe_role_name(role: &str) -> bool {
    !role.is_empty()
        && role
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

/// Resolves the system prompt for `role` per the §6.3 resolution order:
/// 1. If `role` consists only of `[A-Za-z0-9_-]`, attempt to load
///    `<app_home>/prompts/<role>.md`. A whitespace-only file is treated
///    as absent.
/// 2. Otherwise, or on read failure, return the built-in constant.
/// 3. Unknown roles return the generic prompt (handled by
///    [`builtin_prompt`]'s fallback arm).
pub fn resolve_prompt(app_home: &Path, role: &str) -> String {
    if is_safe_role_name(role) {
        let path = app_home.join("prompts").join(format!("{role}.md"));
        if let Ok(contents) = std::fs::read_to_string(&path) {
            if !contents.trim().is_empty() {
                return contents;
            }
        }
    }
    builtin_prompt(role).to_string()
}

#[cfg(test)]
#[path = "role_tests.rs"]
mod tests;
