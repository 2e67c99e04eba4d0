//! # Directive Errors
//!
//! Parse failures for pragma directives. All recoverable: the driver turns
//! them into error diagnostics and drops the directive.

use thiserror::Error;

/// A pragma carried the directive sentinel but its text does not follow
/// the directive grammar. Every variant names the pragma's source line.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MalformedDirective {
    /// Sentinel with no directive keyword behind it.
    #[error("directive keyword missing (line {line})")]
    MissingDirective { line: u32 },

    /// Unrecognized directive keyword.
    #[error("unknown directive '{keyword}' (line {line})")]
    UnknownDirective { keyword: String, line: u32 },

    /// Clause not part of the grammar.
    #[error("unknown clause '{clause}' (line {line})")]
    UnknownClause { clause: String, line: u32 },

    /// Clause that is valid elsewhere but not on this directive.
    #[error("clause '{clause}' is not allowed on '{directive}' (line {line})")]
    MisplacedClause {
        clause: String,
        directive: String,
        line: u32,
    },

    /// Clause requires a value and none was given.
    #[error("clause '{clause}' requires a value (line {line})")]
    MissingValue { clause: String, line: u32 },

    /// Clause value out of range or unparseable.
    #[error("invalid value '{value}' for clause '{clause}' (line {line})")]
    InvalidValue {
        clause: String,
        value: String,
        line: u32,
    },

    /// Same clause given twice.
    #[error("duplicate clause '{clause}' (line {line})")]
    DuplicateClause { clause: String, line: u32 },

    /// Two clauses that exclude each other are both present.
    #[error("clauses '{first}' and '{second}' are mutually exclusive (line {line})")]
    ConflictingClauses {
        first: String,
        second: String,
        line: u32,
    },
}

impl MalformedDirective {
    /// Source line of the offending pragma.
    pub fn line(&self) -> u32 {
        match self {
            MalformedDirective::MissingDirective { line }
            | MalformedDirective::UnknownDirective { line, .. }
            | MalformedDirective::UnknownClause { line, .. }
            | MalformedDirective::MisplacedClause { line, .. }
            | MalformedDirective::MissingValue { line, .. }
            | MalformedDirective::InvalidValue { line, .. }
            | MalformedDirective::DuplicateClause { line, .. }
            | MalformedDirective::ConflictingClauses { line, .. } => *line,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_carries_line() {
        let err = MalformedDirective::InvalidValue {
            clause: "collapse".into(),
            value: "0".into(),
            line: 12,
        };
        assert_eq!(err.line(), 12);
        assert!(err.to_string().contains("collapse"));
        assert!(err.to_string().contains("line 12"));
    }
}
