//! # Unparser
//!
//! Serializes the rewritten arena back to Fortran-shaped source text.
//! The engine treats this as the boundary to the external decompiler: a
//! structurally malformed tree is rejected with a [`DecompileError`]
//! instead of producing broken output.

use crate::arena::{Ast, NodeId};
use crate::kind::NodeKind;
use config::constants::PRAGMA_COMMENT_PREFIX;
use thiserror::Error;

/// The tree handed to the unparser does not have the shape the target
/// language requires.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DecompileError {
    #[error("cannot decompile: {message} (line {line})")]
    Malformed { message: String, line: u32 },
}

impl DecompileError {
    fn new(message: impl Into<String>, line: u32) -> Self {
        DecompileError::Malformed {
            message: message.into(),
            line,
        }
    }
}

/// Serializes the tree to source text.
///
/// Pragma lines longer than `max_columns` are wrapped with a Fortran
/// free-form continuation. When `suppress_line_markers` is false every
/// statement that kept a source line gets a trailing line marker comment.
pub fn serialize(
    ast: &Ast,
    max_columns: usize,
    suppress_line_markers: bool,
) -> Result<String, DecompileError> {
    let mut printer = Printer {
        ast,
        max_columns,
        suppress_line_markers,
        out: String::new(),
    };
    for &child in ast.children(ast.root()) {
        printer.emit(child, 0)?;
    }
    Ok(printer.out)
}

struct Printer<'a> {
    ast: &'a Ast,
    max_columns: usize,
    suppress_line_markers: bool,
    out: String,
}

impl Printer<'_> {
    fn emit(&mut self, id: NodeId, depth: usize) -> Result<(), DecompileError> {
        match self.ast.kind(id) {
            NodeKind::Body => {
                for &child in self.ast.children(id) {
                    self.emit(child, depth)?;
                }
                Ok(())
            }
            NodeKind::FunctionDefinition => self.emit_function(id, depth),
            NodeKind::DoStatement => self.emit_do(id, depth),
            NodeKind::PragmaStatement => self.emit_pragma(id, depth),
            NodeKind::Declaration | NodeKind::AssignStatement => {
                let text = self.ast.text(id).to_string();
                self.push_line(&text, depth, self.ast.line(id));
                Ok(())
            }
            other => Err(DecompileError::new(
                format!("unexpected {other} node in statement position"),
                self.ast.line(id),
            )),
        }
    }

    fn emit_function(&mut self, id: NodeId, depth: usize) -> Result<(), DecompileError> {
        let name = self.ast.text(id).to_string();
        self.push_line(&format!("subroutine {name}"), depth, self.ast.line(id));
        for &child in self.ast.children(id) {
            self.emit(child, depth + 1)?;
        }
        self.push_line(&format!("end subroutine {name}"), depth, 0);
        Ok(())
    }

    fn emit_do(&mut self, id: NodeId, depth: usize) -> Result<(), DecompileError> {
        let line = self.ast.line(id);
        let var = self
            .ast
            .child_of_kind(id, NodeKind::Var)
            .ok_or_else(|| DecompileError::new("do-statement without induction variable", line))?;
        let range = self
            .ast
            .child_of_kind(id, NodeKind::IndexRange)
            .ok_or_else(|| DecompileError::new("do-statement without index range", line))?;
        let body = self
            .ast
            .child_of_kind(id, NodeKind::Body)
            .ok_or_else(|| DecompileError::new("do-statement without body", line))?;

        let lower = self.render_bound(range, NodeKind::LowerBound, line)?;
        let upper = self.render_bound(range, NodeKind::UpperBound, line)?;
        let mut header = format!("do {} = {}, {}", self.ast.text(var), lower, upper);
        if self.ast.child_of_kind(range, NodeKind::Step).is_some() {
            let step = self.render_bound(range, NodeKind::Step, line)?;
            header.push_str(&format!(", {step}"));
        }
        self.push_line(&header, depth, line);
        self.emit(body, depth + 1)?;
        self.push_line("end do", depth, 0);
        Ok(())
    }

    fn render_bound(
        &self,
        range: NodeId,
        kind: NodeKind,
        line: u32,
    ) -> Result<String, DecompileError> {
        let bound = self
            .ast
            .child_of_kind(range, kind)
            .ok_or_else(|| DecompileError::new(format!("index range without {kind}"), line))?;
        let children = self.ast.children(bound);
        if children.is_empty() {
            return Ok(self.ast.text(bound).to_string());
        }
        Ok(children
            .iter()
            .map(|&c| self.ast.text(c))
            .collect::<Vec<_>>()
            .join(""))
    }

    fn emit_pragma(&mut self, id: NodeId, depth: usize) -> Result<(), DecompileError> {
        let text = self.ast.text(id).to_string();
        let line = self.ast.line(id);
        for segment in text.split('\n') {
            let pragma_line = format!("{PRAGMA_COMMENT_PREFIX}{segment}");
            for wrapped in wrap_pragma_line(&pragma_line, self.max_columns) {
                self.push_line(&wrapped, depth, line);
            }
        }
        Ok(())
    }

    fn push_line(&mut self, text: &str, depth: usize, line: u32) {
        for _ in 0..depth {
            self.out.push_str("  ");
        }
        self.out.push_str(text);
        if !self.suppress_line_markers && line > 0 {
            self.out.push_str(&format!(" ! ln:{line}"));
        }
        self.out.push('\n');
    }
}

/// Hard-wraps one pragma line at `max_columns` using free-form `&`
/// continuations. A line with no wrappable space is left alone.
fn wrap_pragma_line(line: &str, max_columns: usize) -> Vec<String> {
    let mut out = Vec::new();
    let mut rest = line.to_string();
    // Two columns reserved for the " &" continuation marker. Columns are
    // characters, so the cut must land on a char boundary.
    while rest.chars().count() > max_columns && max_columns > 2 {
        let limit = rest
            .char_indices()
            .nth(max_columns - 2)
            .map(|(i, _)| i)
            .unwrap_or(rest.len());
        let cut = match rest[..limit].rfind(' ') {
            Some(pos) if pos > 0 => pos,
            _ => break,
        };
        out.push(format!("{} &", &rest[..cut]));
        rest = format!("{}& {}", PRAGMA_COMMENT_PREFIX, rest[cut + 1..].trim_start());
    }
    out.push(rest);
    out
}
