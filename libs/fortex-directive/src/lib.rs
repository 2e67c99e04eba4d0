//! # Fortex Directive Crate
//!
//! Parses transformation pragmas into an immutable [`Directive`] and
//! synthesizes backend accelerator directive text per compile target.
//!
//! ## Architecture
//!
//! ```text
//! pragma text → Directive (clauses)        → fortex-transform units
//! Target      → DirectiveGenerator variant → backend pragma text
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use fortex_directive::{Directive, DirectiveKind, Target};
//!
//! let d = Directive::parse("fx loop-fusion group(q) collapse(2)", 3).unwrap();
//! assert_eq!(d.kind(), DirectiveKind::LoopFusion);
//! assert_eq!(d.effective_collapse(), 2);
//!
//! let generator = Target::OpenAcc.generator();
//! assert_eq!(generator.end_parallel_directive().as_deref(), Some("acc end parallel"));
//! ```

pub mod directive;
pub mod error;
pub mod generator;
pub mod target;

// Re-exports for convenience
pub use directive::{Constraint, Directive, DirectiveKind};
pub use error::MalformedDirective;
pub use generator::DirectiveGenerator;
pub use target::Target;
