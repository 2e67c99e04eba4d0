//! Crate-level tests: serialized ingestion feeding navigation and the
//! unparser, the way the driver consumes this crate.

use crate::{serialize, Ast, NodeKind, SerializedNode};

fn demo_tree() -> SerializedNode {
    let json = r#"{
        "type": "program",
        "children": [
            { "type": "function-definition", "text": "kernel", "line": 1, "children": [
                { "type": "body", "children": [
                    { "type": "declaration", "text": "integer :: i", "line": 2 },
                    { "type": "pragma-statement", "text": "fx loop-fusion group(q)", "line": 3 },
                    { "type": "do-statement", "line": 4, "children": [
                        { "type": "var", "text": "i", "line": 4 },
                        { "type": "index-range", "children": [
                            { "type": "lower-bound", "children": [{ "type": "constant", "text": "1" }] },
                            { "type": "upper-bound", "children": [{ "type": "var", "text": "n" }] }
                        ]},
                        { "type": "body", "children": [
                            { "type": "assign-statement", "text": "a(i) = 0", "line": 5 }
                        ]}
                    ]}
                ]}
            ]}
        ]
    }"#;
    serde_json::from_str(json).unwrap()
}

#[test]
fn test_ingested_tree_navigates_like_the_engine() {
    let ast = Ast::from_serialized(&demo_tree()).unwrap();
    let pragmas = ast.pragmas_in_document_order();
    assert_eq!(pragmas.len(), 1);

    let do_stmt = ast
        .match_sibling_of_kind(pragmas[0], NodeKind::DoStatement)
        .unwrap();
    assert_eq!(ast.line(do_stmt), 4);
    assert_eq!(ast.enclosing_function(do_stmt).map(|f| ast.text(f)), Some("kernel"));
}

#[test]
fn test_ingested_tree_unparses() {
    let ast = Ast::from_serialized(&demo_tree()).unwrap();
    let text = serialize(&ast, 80, true).unwrap();
    assert!(text.contains("subroutine kernel"));
    assert!(text.contains("!$fx loop-fusion group(q)"));
    assert!(text.contains("do i = 1, n"));
    assert!(text.contains("end subroutine kernel"));
}

#[test]
fn test_removal_survives_unparse() {
    let mut ast = Ast::from_serialized(&demo_tree()).unwrap();
    let pragmas = ast.pragmas_in_document_order();
    ast.remove(pragmas[0]);
    let text = serialize(&ast, 80, true).unwrap();
    assert!(!text.contains("loop-fusion"));
    assert!(ast.pragmas_in_document_order().is_empty());
}
