//! # Accelerator Decoration Units
//!
//! Transformation units that synthesize backend directive text through
//! the generator strategy: parallel-region insertion around a loop nest,
//! routine annotation inside a function body, and private-clause
//! propagation onto a previously inserted parallel pragma.
//!
//! Under `Target::None` every generator call returns an absent result and
//! these units reduce to removing their own governing pragma.

use config::constants::MAX_DIRECTIVE_COLUMNS;
use fortex_ast::{Ast, Diagnostics, NodeId, NodeKind};
use fortex_directive::{Directive, DirectiveGenerator};

// =============================================================================
// PARALLEL REGION
// =============================================================================

/// Wraps the loop nest following the pragma in an accelerated region:
/// optional data region outermost, parallel start/end inside it, and a
/// loop directive directly on the nest.
#[derive(Debug, Clone)]
pub struct ParallelRegion {
    directive: Directive,
    pragma: NodeId,
    loop_node: Option<NodeId>,
    consumed: bool,
}

impl ParallelRegion {
    pub fn new(directive: Directive, pragma: NodeId) -> Self {
        ParallelRegion {
            directive,
            pragma,
            loop_node: None,
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

    pub fn analyze(&mut self, ast: &Ast, diagnostics: &mut Diagnostics) -> bool {
        match ast.match_sibling_of_kind(self.pragma, NodeKind::DoStatement) {
            Some(node) => {
                self.loop_node = Some(node);
                true
            }
            None => {
                diagnostics.error(
                    "do statement missing after directive",
                    self.directive.line(),
                );
                false
            }
        }
    }

    pub fn apply(&mut self, ast: &mut Ast, generator: &DirectiveGenerator) {
        assert!(!self.consumed, "apply called on a consumed transformation unit");
        let target = self.loop_node.expect("parallel region applied before analysis");

        // Start directives stack up directly before the loop; each insert
        // lands after the previously inserted one.
        // A directive without a data clause opens no region.
        if self.directive.data_clauses().is_some() {
            if let Some(text) = generator.start_data_region(self.directive.data_clauses()) {
                insert_pragma_before(ast, target, &text);
            }
        }
        let private = generator.private_clause_list(self.directive.private_vars());
        let parallel_clauses = join_clauses(self.directive.acc_clauses(), &private);
        if let Some(text) = generator.start_parallel_directive(parallel_clauses.as_deref()) {
            insert_pragma_before(ast, target, &text);
        }
        if let Some(text) = generator.start_loop_directive(
            self.directive.effective_collapse(),
            self.directive.seq(),
            self.directive.naked(),
            None,
        ) {
            insert_pragma_before(ast, target, &text);
        }

        // End directives unwind after the loop in reverse order.
        let mut tail = target;
        if let Some(text) = generator.end_loop_directive() {
            tail = insert_pragma_after(ast, tail, &text);
        }
        if let Some(text) = generator.end_parallel_directive() {
            tail = insert_pragma_after(ast, tail, &text);
        }
        if self.directive.data_clauses().is_some() {
            if let Some(text) = generator.end_data_region() {
                insert_pragma_after(ast, tail, &text);
            }
        }

        ast.remove(self.pragma);
    }
}

// =============================================================================
// ROUTINE ANNOTATION
// =============================================================================

/// Inserts the backend routine directive as the first statement of the
/// enclosing function body, marking the routine for device compilation.
#[derive(Debug, Clone)]
pub struct RoutineAnnotation {
    directive: Directive,
    pragma: NodeId,
    body: Option<NodeId>,
    consumed: bool,
}

impl RoutineAnnotation {
    pub fn new(directive: Directive, pragma: NodeId) -> Self {
        RoutineAnnotation {
            directive,
            pragma,
            body: None,
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

    pub fn analyze(&mut self, ast: &Ast, diagnostics: &mut Diagnostics) -> bool {
        let function = match ast.enclosing_function(self.pragma) {
            Some(f) => f,
            None => {
                diagnostics.error(
                    "routine directive outside of a function definition",
                    self.directive.line(),
                );
                return false;
            }
        };
        match ast.child_of_kind(function, NodeKind::Body) {
            Some(body) => {
                self.body = Some(body);
                true
            }
            None => {
                diagnostics.error(
                    "enclosing function definition has no body",
                    self.directive.line(),
                );
                false
            }
        }
    }

    pub fn apply(&mut self, ast: &mut Ast, generator: &DirectiveGenerator) {
        assert!(!self.consumed, "apply called on a consumed transformation unit");
        let body = self.body.expect("routine annotation applied before analysis");
        if let Some(text) = generator.routine_directive(self.directive.seq()) {
            let pragma = ast.new_node(NodeKind::PragmaStatement, text, 0);
            ast.prepend_child(body, pragma);
        }
        ast.remove(self.pragma);
    }
}

// =============================================================================
// PRIVATE-CLAUSE PROPAGATION
// =============================================================================

/// Attaches a private clause to the nearest preceding parallel pragma,
/// splitting the directive into a backend continuation first when its
/// accumulated text has outgrown the column limit.
#[derive(Debug, Clone)]
pub struct PrivatePropagation {
    directive: Directive,
    pragma: NodeId,
    consumed: bool,
}

impl PrivatePropagation {
    pub fn new(directive: Directive, pragma: NodeId) -> Self {
        PrivatePropagation {
            directive,
            pragma,
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

    /// The grammar already guarantees a non-empty variable list; the
    /// target pragma is searched for at apply time, after region units
    /// have inserted theirs.
    pub fn analyze(&mut self, _ast: &Ast, _diagnostics: &mut Diagnostics) -> bool {
        true
    }

    pub fn apply(
        &mut self,
        ast: &mut Ast,
        generator: &DirectiveGenerator,
        diagnostics: &mut Diagnostics,
    ) {
        assert!(!self.consumed, "apply called on a consumed transformation unit");
        if let Some(keyword) = generator.parallel_keyword() {
            match ast.find_preceding_pragma(self.pragma, keyword) {
                None => diagnostics.warning(
                    "no parallel construct found to attach private clause",
                    self.directive.line(),
                ),
                Some(parallel) => {
                    let mut text = ast.text(parallel).to_string();
                    // Column positions are characters, not bytes.
                    let columns = text.rsplit('\n').next().unwrap_or("").chars().count();
                    if columns >= MAX_DIRECTIVE_COLUMNS {
                        // Keep the directive one logical line for the
                        // backend: continuation marker, then a fresh
                        // prefixed segment.
                        text.push_str(" &\n");
                        if let Some(prefix) = generator.prefix() {
                            text.push_str(prefix);
                            text.push_str("& ");
                        }
                    } else {
                        text.push(' ');
                    }
                    text.push_str(&generator.private_clause_list(self.directive.private_vars()));
                    ast.set_text(parallel, text);
                }
            }
        }
        ast.remove(self.pragma);
    }
}

// =============================================================================
// HELPERS
// =============================================================================

fn insert_pragma_before(ast: &mut Ast, anchor: NodeId, text: &str) -> NodeId {
    let pragma = ast.new_node(NodeKind::PragmaStatement, text, 0);
    ast.insert_before(anchor, pragma);
    pragma
}

fn insert_pragma_after(ast: &mut Ast, anchor: NodeId, text: &str) -> NodeId {
    let pragma = ast.new_node(NodeKind::PragmaStatement, text, 0);
    ast.insert_after(anchor, pragma);
    pragma
}

fn join_clauses(acc: Option<&str>, private: &str) -> Option<String> {
    match (acc, private.is_empty()) {
        (Some(a), false) => Some(format!("{a} {private}")),
        (Some(a), true) => Some(a.to_string()),
        (None, false) => Some(private.to_string()),
        (None, true) => None,
    }
}
