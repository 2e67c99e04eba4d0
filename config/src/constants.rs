//! # Configuration Constants
//!
//! Centralized constants for the fortex pipeline. Directive grammar tokens,
//! column limits, and default clause values are defined here.
//!
//! ## Categories
//!
//! - **Directive grammar**: Sentinel and guard tokens recognized in pragmas
//! - **Layout**: Column limits applied when directive text is emitted
//! - **Defaults**: Clause values assumed when a clause is absent

// =============================================================================
// DIRECTIVE GRAMMAR
// =============================================================================

/// Sentinel keyword opening every transformation pragma.
///
/// A pragma-statement node whose text does not start with this token is
/// left untouched by the driver.
///
/// # Example
///
/// ```rust
/// use config::constants::DIRECTIVE_SENTINEL;
///
/// let pragma = "fx parallel acc(vector_length(64))";
/// assert!(pragma.starts_with(DIRECTIVE_SENTINEL));
/// ```
pub const DIRECTIVE_SENTINEL: &str = "fx";

/// Token marking a backend conditional-compilation guard pragma.
///
/// Guard pragmas are emitted by hand in user code to fence off
/// backend-specific lines; the driver must never rewrite them.
pub const COMPILE_GUARD: &str = "guard";

/// Comment sentinel the unparser places in front of every pragma line.
pub const PRAGMA_COMMENT_PREFIX: &str = "!$";

// =============================================================================
// LAYOUT
// =============================================================================

/// Maximum number of columns a single directive line may occupy.
///
/// Directive text accumulated past this width is split into a
/// backend-specific continuation before more clauses are appended.
///
/// # Example
///
/// ```rust
/// use config::constants::MAX_DIRECTIVE_COLUMNS;
///
/// let line = "acc parallel";
/// assert!(line.len() < MAX_DIRECTIVE_COLUMNS);
/// ```
pub const MAX_DIRECTIVE_COLUMNS: usize = 80;

// =============================================================================
// DEFAULTS
// =============================================================================

/// Effective collapse depth when a directive carries no collapse clause.
///
/// A loop-targeting directive without `collapse(n)` governs exactly one
/// loop level.
pub const DEFAULT_COLLAPSE_DEPTH: u32 = 1;
