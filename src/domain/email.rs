// Copyright (c) 2025 - Cowboy AI, Inc.
//! Student email format check
//!
//! Accepts `local@domain.tld` shapes: non-empty parts, no whitespace, a single
//! `@`, and at least one dot after it.

use regex::Regex;
use std::sync::LazyLock;

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is a valid regex")
});

/// Whether `email` looks like `local@domain.tld`
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}
