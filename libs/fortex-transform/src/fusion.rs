//! # Loop Fusion
//!
//! The structurally hardest transformation unit: two fusion units that
//! share a group label and identical iteration ranges merge, the body of
//! the second loop nest appended to the end of the first. A unit that has
//! been absorbed is consumed and never matched again; the absorbing unit
//! stays eligible, so fusion chains grow to arbitrary length.
//!
//! Unit state machine: Created → Analyzed → { MergedAway | Applied }.

use crate::chain::NestedDoChain;
use crate::error::TransformError;
use fortex_ast::{Ast, Diagnostics, NodeId, NodeKind};
use fortex_directive::{Constraint, Directive};

/// One pending loop-fusion rewrite.
#[derive(Debug, Clone)]
pub struct LoopFusion {
    directive: Directive,
    pragma: NodeId,
    chain: Option<NestedDoChain>,
    consumed: bool,
}

impl LoopFusion {
    pub fn new(directive: Directive, pragma: NodeId) -> Self {
        LoopFusion {
            directive,
            pragma,
            chain: None,
            consumed: false,
        }
    }

    pub fn start_line(&self) -> u32 {
        self.directive.line()
    }

    pub fn is_consumed(&self) -> bool {
        self.consumed
    }

    pub fn mark_consumed(&mut self) {
        self.consumed = true;
    }

    /// Locates the loop nest the directive governs.
    ///
    /// Without a collapse clause the pragma must be followed by one
    /// do-statement; with `collapse(n)` the n nested do-statements must
    /// all be present. Failure records a line-tagged diagnostic and
    /// leaves the tree untouched.
    pub fn analyze(&mut self, ast: &Ast, diagnostics: &mut Diagnostics) -> bool {
        let line = self.directive.line();
        let outer = match ast.match_sibling_of_kind(self.pragma, NodeKind::DoStatement) {
            Some(node) => node,
            None => {
                diagnostics.error("do statement missing after directive", line);
                return false;
            }
        };
        match NestedDoChain::build(ast, outer, self.directive.effective_collapse()) {
            Some(chain) => {
                self.chain = Some(chain);
                true
            }
            None => {
                diagnostics.error("not enough do statements for collapse value", line);
                false
            }
        }
    }

    /// Pairwise compatibility test, symmetric in outcome.
    ///
    /// Both units must be unconsumed and analyzed, carry the same group
    /// label and a consistent constraint mode, collapse the same number
    /// of levels, sit in the same enclosing block, and have structurally
    /// identical iteration ranges at every collapsed level. Under the
    /// default `Direct` mode the outer loops must additionally be direct
    /// siblings separated only by pragmas; `Unconstrained` skips that
    /// check and records a warning naming both directive lines.
    pub fn can_merge_with(
        &self,
        other: &LoopFusion,
        ast: &Ast,
        diagnostics: &mut Diagnostics,
    ) -> bool {
        if self.consumed || other.consumed {
            return false;
        }
        if self.directive.group() != other.directive.group() {
            return false;
        }
        let constraint = match (self.directive.constraint(), other.directive.constraint()) {
            (Some(a), Some(b)) if a == b => a,
            (None, None) => Constraint::Direct,
            _ => return false,
        };
        if self.directive.effective_collapse() != other.directive.effective_collapse() {
            return false;
        }
        let (mine, theirs) = match (&self.chain, &other.chain) {
            (Some(a), Some(b)) => (a, b),
            _ => return false,
        };

        match constraint {
            Constraint::Direct => {
                if !ast.is_direct_sibling_only_separated_by(
                    mine.outer(),
                    theirs.outer(),
                    &[NodeKind::PragmaStatement],
                ) {
                    return false;
                }
            }
            Constraint::Unconstrained => {
                // The merge may reorder code between the two loops.
                diagnostics.warning_at(
                    "unconstrained loop fusion applied",
                    vec![self.directive.line(), other.directive.line()],
                );
            }
        }

        if !ast.same_parent_block(mine.outer(), theirs.outer()) {
            return false;
        }

        let depth = self.directive.effective_collapse() as usize;
        for level in 0..depth {
            let a = mine.index_range(ast, level);
            let b = theirs.index_range(ast, level);
            match (a, b) {
                (Some(ra), Some(rb)) if ast.structurally_equal(ra, rb) => {}
                _ => return false,
            }
        }
        true
    }

    /// Absorbs `other`: appends its innermost-body statements after this
    /// unit's innermost body, removes its loop nest and pragma, and marks
    /// it consumed. This unit stays eligible for further merges.
    pub fn merge(&mut self, ast: &mut Ast, other: &mut LoopFusion) -> Result<(), TransformError> {
        assert!(!self.consumed, "apply called on a consumed transformation unit");
        assert!(!other.consumed, "merge partner is already consumed");

        let depth = self.directive.effective_collapse() as usize;
        let mine = self
            .chain
            .as_ref()
            .ok_or_else(|| TransformError::illegal("fusion unit was not analyzed", self.start_line()))?;
        let theirs = other
            .chain
            .as_ref()
            .ok_or_else(|| TransformError::illegal("fusion unit was not analyzed", other.start_line()))?;
        if depth > mine.len() || depth > theirs.len() {
            return Err(TransformError::illegal(
                "cannot apply transformation, one or both do statements are invalid",
                self.start_line(),
            ));
        }

        let target_body = mine.innermost_body(ast).ok_or_else(|| {
            TransformError::illegal("fused loop has no body", self.start_line())
        })?;
        let source_body = theirs.innermost_body(ast).ok_or_else(|| {
            TransformError::illegal("fused loop has no body", other.start_line())
        })?;

        let statements: Vec<NodeId> = ast.children(source_body).to_vec();
        for statement in statements {
            ast.reparent_append(statement, target_body);
        }
        ast.remove(theirs.outer());

        ast.remove(other.pragma);
        other.mark_consumed();
        Ok(())
    }

    /// Removes the governing pragma once the unit's own rewrite is done.
    /// Removal is idempotent across merge chains.
    pub fn finish(&self, ast: &mut Ast) {
        assert!(!self.consumed, "apply called on a consumed transformation unit");
        ast.remove(self.pragma);
    }
}
