//! # Serialized Tree Ingestion
//!
//! Defines the format in which the external front-end hands its tree to
//! the engine. The front-end serializes its XML document to JSON; this
//! module deserializes it and loads the nodes into the arena.
//!
//! ## Architecture
//!
//! ```text
//! Front-end: Fortran Source → XML document → Serialized tree (JSON)
//! Engine:    Serialized tree → fortex-ast arena → transformations
//! ```

use crate::arena::{Ast, NodeId};
use crate::kind::NodeKind;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A serialized syntax tree node as produced by the front-end.
///
/// # Fields
///
/// * `node_type` - The node kind name (e.g., "do-statement")
/// * `text` - Raw payload (identifier, literal, directive or statement text)
/// * `line` - 1-based source line
/// * `children` - Child nodes in document order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SerializedNode {
    /// Node kind name from the front-end grammar.
    #[serde(rename = "type")]
    pub node_type: String,

    /// Raw text payload; empty for structural nodes.
    #[serde(default)]
    pub text: String,

    /// 1-based source line.
    #[serde(default)]
    pub line: u32,

    /// Child nodes in document order.
    #[serde(default)]
    pub children: Vec<SerializedNode>,
}

/// Failure while loading a serialized tree into the arena.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IngestError {
    /// The front-end emitted a node kind this engine does not know.
    #[error("unknown node type '{node_type}' at line {line}")]
    UnknownKind { node_type: String, line: u32 },

    /// The serialized root must be a program node.
    #[error("serialized tree root must be 'program', got '{0}'")]
    BadRoot(String),
}

impl Ast {
    /// Loads a serialized tree into a fresh arena.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let tree: SerializedNode = serde_json::from_str(json)?;
    /// let ast = Ast::from_serialized(&tree)?;
    /// ```
    pub fn from_serialized(root: &SerializedNode) -> Result<Ast, IngestError> {
        if NodeKind::parse(&root.node_type) != Some(NodeKind::Program) {
            return Err(IngestError::BadRoot(root.node_type.clone()));
        }
        let mut ast = Ast::new();
        let root_id = ast.root();
        for child in &root.children {
            load_into(&mut ast, root_id, child)?;
        }
        Ok(ast)
    }
}

fn load_into(ast: &mut Ast, parent: NodeId, node: &SerializedNode) -> Result<(), IngestError> {
    let kind = NodeKind::parse(&node.node_type).ok_or_else(|| IngestError::UnknownKind {
        node_type: node.node_type.clone(),
        line: node.line,
    })?;
    let id = ast.new_node(kind, node.text.clone(), node.line);
    ast.append_child(parent, id);
    for child in &node.children {
        load_into(ast, id, child)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ingest_from_json() {
        let json = r#"{
            "type": "program",
            "children": [
                { "type": "body", "children": [
                    { "type": "pragma-statement", "text": "fx parallel", "line": 1 },
                    { "type": "do-statement", "line": 2, "children": [
                        { "type": "var", "text": "i", "line": 2 },
                        { "type": "index-range", "children": [
                            { "type": "lower-bound", "children": [{ "type": "constant", "text": "1" }] },
                            { "type": "upper-bound", "children": [{ "type": "constant", "text": "10" }] }
                        ]},
                        { "type": "body", "children": [
                            { "type": "assign-statement", "text": "a(i) = 0", "line": 3 }
                        ]}
                    ]}
                ]}
            ]
        }"#;
        let tree: SerializedNode = serde_json::from_str(json).unwrap();
        let ast = Ast::from_serialized(&tree).unwrap();
        let pragmas = ast.pragmas_in_document_order();
        assert_eq!(pragmas.len(), 1);
        assert_eq!(ast.text(pragmas[0]), "fx parallel");
        assert_eq!(
            ast.match_sibling_of_kind(pragmas[0], NodeKind::DoStatement)
                .map(|d| ast.line(d)),
            Some(2)
        );
    }

    #[test]
    fn test_ingest_rejects_unknown_kind() {
        let tree = SerializedNode {
            node_type: "program".into(),
            text: String::new(),
            line: 0,
            children: vec![SerializedNode {
                node_type: "goto-statement".into(),
                text: String::new(),
                line: 7,
                children: vec![],
            }],
        };
        let err = Ast::from_serialized(&tree).unwrap_err();
        assert_eq!(
            err,
            IngestError::UnknownKind {
                node_type: "goto-statement".into(),
                line: 7
            }
        );
    }

    #[test]
    fn test_ingest_rejects_bad_root() {
        let tree = SerializedNode {
            node_type: "body".into(),
            text: String::new(),
            line: 0,
            children: vec![],
        };
        assert!(matches!(
            Ast::from_serialized(&tree),
            Err(IngestError::BadRoot(_))
        ));
    }
}
