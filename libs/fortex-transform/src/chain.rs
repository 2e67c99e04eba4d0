//! # Nested-Loop Chain
//!
//! An ordered sequence of nested do-statements rooted at a directive's
//! outer loop, of length equal to the requested collapse depth. Loop
//! fusion shares the collapsed headers and concatenates bodies only at
//! the bottom level, so the chain is the unit of comparison and merge.

use fortex_ast::{Ast, NodeId, NodeKind};

/// Chain of 1..N structurally nested do-statements, outermost first.
#[derive(Debug, Clone)]
pub struct NestedDoChain {
    loops: Vec<NodeId>,
}

impl NestedDoChain {
    /// Builds the chain of `depth` nested loops rooted at `outer`.
    ///
    /// Returns `None` when fewer structurally nested loops exist than
    /// requested; the caller reports that as an analysis error, not a
    /// crash.
    pub fn build(ast: &Ast, outer: NodeId, depth: u32) -> Option<NestedDoChain> {
        debug_assert_eq!(ast.kind(outer), NodeKind::DoStatement);
        let mut loops = vec![outer];
        let mut current = outer;
        for _ in 1..depth {
            let body = ast.child_of_kind(current, NodeKind::Body)?;
            let inner = ast.child_of_kind(body, NodeKind::DoStatement)?;
            loops.push(inner);
            current = inner;
        }
        Some(NestedDoChain { loops })
    }

    /// Outermost do-statement.
    pub fn outer(&self) -> NodeId {
        self.loops[0]
    }

    /// Do-statement at the given nesting level, 0 = outermost.
    pub fn get(&self, level: usize) -> NodeId {
        self.loops[level]
    }

    pub fn len(&self) -> usize {
        self.loops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.loops.is_empty()
    }

    /// Body of the innermost loop; merge appends partner statements here.
    pub fn innermost_body(&self, ast: &Ast) -> Option<NodeId> {
        ast.child_of_kind(*self.loops.last()?, NodeKind::Body)
    }

    /// Index range of the loop at `level`, used for structural comparison
    /// between fusion candidates.
    pub fn index_range(&self, ast: &Ast, level: usize) -> Option<NodeId> {
        ast.child_of_kind(self.loops[level], NodeKind::IndexRange)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::support::nested_loop;

    #[test]
    fn test_chain_of_requested_depth() {
        let mut ast = Ast::new();
        let body = ast.new_node(NodeKind::Body, "", 0);
        ast.append_child(ast.root(), body);
        let outer = nested_loop(&mut ast, body, &["i", "j", "k"], ("1", "10"), 1, "a = 0");

        let chain = NestedDoChain::build(&ast, outer, 3).unwrap();
        assert_eq!(chain.len(), 3);
        assert_eq!(chain.outer(), outer);
        let innermost = chain.get(2);
        assert_eq!(ast.text(ast.child_of_kind(innermost, NodeKind::Var).unwrap()), "k");
        assert!(chain.innermost_body(&ast).is_some());
    }

    #[test]
    fn test_chain_deeper_than_nest_fails() {
        let mut ast = Ast::new();
        let body = ast.new_node(NodeKind::Body, "", 0);
        ast.append_child(ast.root(), body);
        let outer = nested_loop(&mut ast, body, &["i"], ("1", "10"), 1, "a = 0");

        assert!(NestedDoChain::build(&ast, outer, 2).is_none());
        assert!(NestedDoChain::build(&ast, outer, 1).is_some());
    }
}
