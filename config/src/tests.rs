//! # Tests for Config Constants
//!
//! Unit tests verifying the correctness of configuration constants.

use crate::constants::*;

// =============================================================================
// DIRECTIVE GRAMMAR TESTS
// =============================================================================

#[test]
fn test_sentinel_is_lowercase() {
    assert_eq!(
        DIRECTIVE_SENTINEL,
        DIRECTIVE_SENTINEL.to_lowercase(),
        "sentinel must be lowercase, pragma matching is case-sensitive"
    );
}

#[test]
fn test_sentinel_has_no_whitespace() {
    assert!(!DIRECTIVE_SENTINEL.contains(char::is_whitespace));
    assert!(!COMPILE_GUARD.contains(char::is_whitespace));
}

#[test]
fn test_guard_is_not_the_sentinel() {
    assert_ne!(COMPILE_GUARD, DIRECTIVE_SENTINEL);
}

// =============================================================================
// LAYOUT TESTS
// =============================================================================

#[test]
fn test_max_columns_fits_fixed_form_sources() {
    // Fortran fixed-form sources are capped at 132 columns; the directive
    // limit must leave room for the comment prefix and the continuation
    // marker.
    assert!(MAX_DIRECTIVE_COLUMNS >= 72);
    assert!(MAX_DIRECTIVE_COLUMNS <= 132);
}

#[test]
fn test_default_collapse_depth_is_one_level() {
    assert_eq!(DEFAULT_COLLAPSE_DEPTH, 1);
}
