//! # Fortex AST Crate
//!
//! Arena-based AST for the fortex transformation pipeline. The external
//! front-end parses Fortran into an XML-shaped tree; this crate receives
//! that tree in serialized form and exposes the navigation and mutation
//! primitives the transformation engine relies on.
//!
//! ## Architecture
//!
//! ```text
//! Fortran Source → front-end (serialized tree) → fortex-ast (arena)
//!                → fortex-transform (rewrites) → fortex-ast (unparse)
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use fortex_ast::{Ast, SerializedNode};
//!
//! let tree: SerializedNode = serde_json::from_str(json)?;
//! let ast = Ast::from_serialized(&tree)?;
//! ```
//!
//! ## Design Principles
//!
//! - **Arena Storage**: Nodes live in one `Vec`, addressed by stable
//!   `NodeId` indices; parent/sibling relations are index lookups
//! - **Non-owning Engine**: The transformation engine holds `NodeId`s,
//!   never node references, so merges cannot alias
//! - **Source Mapping**: Every node carries a 1-based source line for
//!   diagnostics

pub mod arena;
pub mod diagnostic;
pub mod kind;
pub mod serialized;
pub mod unparse;

// Re-exports for convenience
pub use arena::{Ast, NodeId};
pub use diagnostic::{Diagnostic, Diagnostics, Severity};
pub use kind::NodeKind;
pub use serialized::{IngestError, SerializedNode};
pub use unparse::{serialize, DecompileError};

#[cfg(test)]
mod tests;
