//! # Node Kinds
//!
//! The closed set of tree node kinds the engine understands. Kind names
//! match the node-type strings used by the external front-end.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of an AST node.
///
/// The engine dispatches on kinds for sibling matching and structural
/// precondition checks; it never inspects node text except for pragmas
/// and leaf payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    /// Translation unit root.
    Program,
    /// Subroutine or function definition. Text holds the name.
    FunctionDefinition,
    /// Statement block (program body, function body, loop body).
    Body,
    /// Variable or type declaration. Text holds the raw declaration.
    Declaration,
    /// Fortran do-loop. Children: induction `Var`, `IndexRange`, `Body`.
    DoStatement,
    /// Loop iteration range. Children: `LowerBound`, `UpperBound`,
    /// optional `Step`.
    IndexRange,
    LowerBound,
    UpperBound,
    Step,
    /// Variable reference leaf. Text holds the identifier.
    Var,
    /// Literal constant leaf. Text holds the literal.
    Constant,
    /// Opaque executable statement. Text holds the raw statement.
    AssignStatement,
    /// Pragma line. Text holds the directive text without the comment
    /// sentinel.
    PragmaStatement,
}

impl NodeKind {
    /// Returns the node-type string used by the serialized tree format.
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Program => "program",
            NodeKind::FunctionDefinition => "function-definition",
            NodeKind::Body => "body",
            NodeKind::Declaration => "declaration",
            NodeKind::DoStatement => "do-statement",
            NodeKind::IndexRange => "index-range",
            NodeKind::LowerBound => "lower-bound",
            NodeKind::UpperBound => "upper-bound",
            NodeKind::Step => "step",
            NodeKind::Var => "var",
            NodeKind::Constant => "constant",
            NodeKind::AssignStatement => "assign-statement",
            NodeKind::PragmaStatement => "pragma-statement",
        }
    }

    /// Parses a node-type string from the serialized tree format.
    ///
    /// Returns `None` for node types the engine does not know.
    pub fn parse(node_type: &str) -> Option<NodeKind> {
        Some(match node_type {
            "program" => NodeKind::Program,
            "function-definition" => NodeKind::FunctionDefinition,
            "body" => NodeKind::Body,
            "declaration" => NodeKind::Declaration,
            "do-statement" => NodeKind::DoStatement,
            "index-range" => NodeKind::IndexRange,
            "lower-bound" => NodeKind::LowerBound,
            "upper-bound" => NodeKind::UpperBound,
            "step" => NodeKind::Step,
            "var" => NodeKind::Var,
            "constant" => NodeKind::Constant,
            "assign-statement" => NodeKind::AssignStatement,
            "pragma-statement" => NodeKind::PragmaStatement,
            _ => return None,
        })
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
