//! # Config Crate
//!
//! Centralized configuration constants for the fortex transformation
//! pipeline. All magic numbers and fixed tokens are defined here to ensure
//! consistency across crates.
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::{DIRECTIVE_SENTINEL, MAX_DIRECTIVE_COLUMNS};
//!
//! let pragma = "fx loop-fusion group(q)";
//! assert!(pragma.starts_with(DIRECTIVE_SENTINEL));
//! assert_eq!(MAX_DIRECTIVE_COLUMNS, 80);
//! ```
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All constants defined once, used everywhere
//! - **Well-Documented**: Every constant has clear documentation

pub mod constants;

#[cfg(test)]
mod tests;
