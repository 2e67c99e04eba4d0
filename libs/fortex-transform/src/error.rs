//! # Transformation Errors
//!
//! Fatal errors only. Recoverable conditions (malformed directives,
//! missing structure) are recorded as diagnostics and drop the affected
//! unit; the variants here abort the whole run because continuing would
//! risk emitting structurally corrupted output.

use fortex_ast::DecompileError;
use thiserror::Error;

/// Fatal failure of one driver run.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransformError {
    /// A merge was attempted on a structurally invalid pair.
    #[error("illegal transformation: {message} (line {line})")]
    IllegalTransformation { message: String, line: u32 },

    /// The unparser rejected the rewritten tree.
    #[error(transparent)]
    Decompile(#[from] DecompileError),
}

impl TransformError {
    pub fn illegal(message: impl Into<String>, line: u32) -> Self {
        TransformError::IllegalTransformation {
            message: message.into(),
            line,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_illegal_transformation_names_the_line() {
        let err = TransformError::illegal("incompatible transformation kind", 17);
        assert!(err.to_string().contains("line 17"));
    }
}
