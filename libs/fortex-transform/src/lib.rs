//! # Fortex Transform
//!
//! The transformation engine of the fortex pipeline: pragma-derived
//! transformation units are analyzed against the surrounding tree,
//! mutually compatible units are merged (loop fusion), surviving units
//! rewrite the tree, and accelerator directive text is synthesized per
//! compile target.
//!
//! ## Architecture
//!
//! ```text
//! arena AST with fx pragmas
//!   → Directive per pragma        (fortex-directive)
//!   → TransformationUnit per directive
//!   → Driver: analyze-all, merge-scan, apply-all (document order)
//!   → rewritten arena AST → unparser (fortex-ast)
//! ```
//!
//! ## Example
//!
//! ```rust,ignore
//! use fortex_transform::{Driver, Target};
//!
//! let driver = Driver::new(Target::OpenAcc);
//! let report = driver.run(&mut ast)?;
//! for diagnostic in report.diagnostics.iter() {
//!     eprintln!("{diagnostic:?}");
//! }
//! ```

pub mod chain;
pub mod driver;
pub mod error;
pub mod fusion;
pub mod region;
pub mod unit;

// Re-export public API
pub use chain::NestedDoChain;
pub use driver::{transform_and_unparse, Driver, TransformReport};
pub use error::TransformError;
pub use fusion::LoopFusion;
pub use unit::TransformationUnit;

// Re-export the configuration types callers need to start a run.
pub use fortex_directive::Target;
