//! # Directive Model
//!
//! Parses the text of one pragma into an immutable [`Directive`]. The
//! directive grammar is an external contract; this module enforces it but
//! does not define it:
//!
//! ```text
//! fx loop-fusion [group(<label>)] [collapse(<n>)] [constraint(direct|none)]
//! fx parallel [acc(<clauses>)] [data[(<clauses>)]] [private(<v,..>)]
//!             [collapse(<n>)] [seq] [naked]
//! fx routine [seq]
//! fx private(<v,..>)
//! ```

use crate::error::MalformedDirective;
use config::constants::{DEFAULT_COLLAPSE_DEPTH, DIRECTIVE_SENTINEL};

/// Directive keyword: which transformation the pragma requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectiveKind {
    LoopFusion,
    Parallel,
    Routine,
    Private,
}

impl DirectiveKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DirectiveKind::LoopFusion => "loop-fusion",
            DirectiveKind::Parallel => "parallel",
            DirectiveKind::Routine => "routine",
            DirectiveKind::Private => "private",
        }
    }
}

/// Fusion adjacency constraint mode.
///
/// `Direct` (the default) only fuses loops that are direct siblings;
/// `Unconstrained` skips the adjacency check and may reorder intervening
/// code, which the engine reports as a warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constraint {
    Direct,
    Unconstrained,
}

/// Parsed representation of one pragma occurrence. Immutable after parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive {
    kind: DirectiveKind,
    line: u32,
    group: Option<String>,
    collapse: Option<u32>,
    constraint: Option<Constraint>,
    acc_clauses: Option<String>,
    data_clauses: Option<String>,
    private_vars: Vec<String>,
    seq: bool,
    naked: bool,
}

impl Directive {
    /// Parses pragma text (without the comment sentinel) into a directive.
    ///
    /// # Example
    ///
    /// ```rust
    /// use fortex_directive::{Constraint, Directive};
    ///
    /// let d = Directive::parse("fx loop-fusion constraint(none)", 7).unwrap();
    /// assert_eq!(d.constraint(), Some(Constraint::Unconstrained));
    /// ```
    pub fn parse(text: &str, line: u32) -> Result<Directive, MalformedDirective> {
        let tokens = tokenize(text);
        let mut iter = tokens.iter();
        match iter.next() {
            Some(t) if t == DIRECTIVE_SENTINEL => {}
            _ => return Err(MalformedDirective::MissingDirective { line }),
        }
        let head = iter
            .next()
            .ok_or(MalformedDirective::MissingDirective { line })?;

        let (keyword, head_value) = split_clause(head);
        let mut directive = match keyword {
            "loop-fusion" => Directive::empty(DirectiveKind::LoopFusion, line),
            "parallel" => Directive::empty(DirectiveKind::Parallel, line),
            "routine" => Directive::empty(DirectiveKind::Routine, line),
            "private" => {
                let mut d = Directive::empty(DirectiveKind::Private, line);
                d.private_vars = parse_var_list(head_value, "private", line)?;
                d
            }
            other => {
                return Err(MalformedDirective::UnknownDirective {
                    keyword: other.to_string(),
                    line,
                })
            }
        };

        let mut seen: Vec<String> = Vec::new();
        for token in iter {
            let (clause, value) = split_clause(token);
            if seen.iter().any(|s| s == clause) {
                return Err(MalformedDirective::DuplicateClause {
                    clause: clause.to_string(),
                    line,
                });
            }
            seen.push(clause.to_string());
            directive.accept_clause(clause, value)?;
        }

        directive.check_conflicts()?;
        Ok(directive)
    }

    fn empty(kind: DirectiveKind, line: u32) -> Directive {
        Directive {
            kind,
            line,
            group: None,
            collapse: None,
            constraint: None,
            acc_clauses: None,
            data_clauses: None,
            private_vars: Vec::new(),
            seq: false,
            naked: false,
        }
    }

    fn accept_clause(
        &mut self,
        clause: &str,
        value: Option<&str>,
    ) -> Result<(), MalformedDirective> {
        let line = self.line;
        match clause {
            "group" => {
                self.expect_kind(clause, &[DirectiveKind::LoopFusion])?;
                let label = required_value(clause, value, line)?;
                self.group = Some(label.to_string());
            }
            "collapse" => {
                self.expect_kind(clause, &[DirectiveKind::LoopFusion, DirectiveKind::Parallel])?;
                let raw = required_value(clause, value, line)?;
                let depth: u32 = raw.trim().parse().map_err(|_| {
                    MalformedDirective::InvalidValue {
                        clause: clause.to_string(),
                        value: raw.to_string(),
                        line,
                    }
                })?;
                if depth == 0 {
                    return Err(MalformedDirective::InvalidValue {
                        clause: clause.to_string(),
                        value: raw.to_string(),
                        line,
                    });
                }
                self.collapse = Some(depth);
            }
            "constraint" => {
                self.expect_kind(clause, &[DirectiveKind::LoopFusion])?;
                let raw = required_value(clause, value, line)?;
                self.constraint = Some(match raw.trim() {
                    "direct" => Constraint::Direct,
                    "none" => Constraint::Unconstrained,
                    other => {
                        return Err(MalformedDirective::InvalidValue {
                            clause: clause.to_string(),
                            value: other.to_string(),
                            line,
                        })
                    }
                });
            }
            "acc" => {
                self.expect_kind(clause, &[DirectiveKind::Parallel])?;
                let raw = required_value(clause, value, line)?;
                self.acc_clauses = Some(raw.to_string());
            }
            "data" => {
                self.expect_kind(clause, &[DirectiveKind::Parallel])?;
                // Bare `data` opens a region with no extra clauses.
                self.data_clauses = Some(value.unwrap_or("").to_string());
            }
            "private" => {
                self.expect_kind(clause, &[DirectiveKind::Parallel])?;
                self.private_vars = parse_var_list(value, clause, line)?;
            }
            "seq" => {
                self.expect_kind(clause, &[DirectiveKind::Parallel, DirectiveKind::Routine])?;
                reject_value(clause, value, line)?;
                self.seq = true;
            }
            "naked" => {
                self.expect_kind(clause, &[DirectiveKind::Parallel])?;
                reject_value(clause, value, line)?;
                self.naked = true;
            }
            other => {
                return Err(MalformedDirective::UnknownClause {
                    clause: other.to_string(),
                    line,
                })
            }
        }
        Ok(())
    }

    fn expect_kind(
        &self,
        clause: &str,
        allowed: &[DirectiveKind],
    ) -> Result<(), MalformedDirective> {
        if allowed.contains(&self.kind) {
            Ok(())
        } else {
            Err(MalformedDirective::MisplacedClause {
                clause: clause.to_string(),
                directive: self.kind.as_str().to_string(),
                line: self.line,
            })
        }
    }

    fn check_conflicts(&self) -> Result<(), MalformedDirective> {
        if self.seq && self.naked {
            return Err(MalformedDirective::ConflictingClauses {
                first: "seq".into(),
                second: "naked".into(),
                line: self.line,
            });
        }
        Ok(())
    }

    // =========================================================================
    // ACCESSORS — pure queries over parsed state
    // =========================================================================

    pub fn kind(&self) -> DirectiveKind {
        self.kind
    }

    pub fn line(&self) -> u32 {
        self.line
    }

    pub fn group(&self) -> Option<&str> {
        self.group.as_deref()
    }

    pub fn collapse(&self) -> Option<u32> {
        self.collapse
    }

    /// Collapse depth the directive governs, defaulting to one level.
    pub fn effective_collapse(&self) -> u32 {
        self.collapse.unwrap_or(DEFAULT_COLLAPSE_DEPTH)
    }

    pub fn constraint(&self) -> Option<Constraint> {
        self.constraint
    }

    pub fn acc_clauses(&self) -> Option<&str> {
        self.acc_clauses.as_deref()
    }

    /// `Some` when the directive opens a data region; the string holds the
    /// extra region clauses and may be empty.
    pub fn data_clauses(&self) -> Option<&str> {
        self.data_clauses.as_deref()
    }

    pub fn private_vars(&self) -> &[String] {
        &self.private_vars
    }

    pub fn seq(&self) -> bool {
        self.seq
    }

    pub fn naked(&self) -> bool {
        self.naked
    }
}

/// Splits text into tokens at top-level whitespace; parenthesized clause
/// arguments may themselves contain spaces and nested parentheses.
fn tokenize(text: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut depth = 0usize;
    for ch in text.chars() {
        match ch {
            '(' => {
                depth += 1;
                current.push(ch);
            }
            ')' => {
                depth = depth.saturating_sub(1);
                current.push(ch);
            }
            c if c.is_whitespace() && depth == 0 => {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
            }
            c => current.push(c),
        }
    }
    if !current.is_empty() {
        tokens.push(current);
    }
    tokens
}

/// Splits `name(value)` into name and value; a bare token has no value.
fn split_clause(token: &str) -> (&str, Option<&str>) {
    match token.find('(') {
        Some(open) if token.ends_with(')') => {
            (&token[..open], Some(&token[open + 1..token.len() - 1]))
        }
        _ => (token, None),
    }
}

fn required_value<'a>(
    clause: &str,
    value: Option<&'a str>,
    line: u32,
) -> Result<&'a str, MalformedDirective> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(MalformedDirective::MissingValue {
            clause: clause.to_string(),
            line,
        }),
    }
}

fn reject_value(clause: &str, value: Option<&str>, line: u32) -> Result<(), MalformedDirective> {
    match value {
        None => Ok(()),
        Some(v) => Err(MalformedDirective::InvalidValue {
            clause: clause.to_string(),
            value: v.to_string(),
            line,
        }),
    }
}

fn parse_var_list(
    value: Option<&str>,
    clause: &str,
    line: u32,
) -> Result<Vec<String>, MalformedDirective> {
    let raw = required_value(clause, value, line)?;
    let vars: Vec<String> = raw
        .split(',')
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .collect();
    if vars.is_empty() {
        return Err(MalformedDirective::MissingValue {
            clause: clause.to_string(),
            line,
        });
    }
    Ok(vars)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_loop_fusion_with_all_clauses() {
        let d = Directive::parse("fx loop-fusion group(block_1) collapse(2) constraint(none)", 5)
            .unwrap();
        assert_eq!(d.kind(), DirectiveKind::LoopFusion);
        assert_eq!(d.group(), Some("block_1"));
        assert_eq!(d.collapse(), Some(2));
        assert_eq!(d.effective_collapse(), 2);
        assert_eq!(d.constraint(), Some(Constraint::Unconstrained));
        assert_eq!(d.line(), 5);
    }

    #[test]
    fn test_parse_bare_loop_fusion_defaults() {
        let d = Directive::parse("fx loop-fusion", 1).unwrap();
        assert_eq!(d.group(), None);
        assert_eq!(d.collapse(), None);
        assert_eq!(d.effective_collapse(), 1);
        assert_eq!(d.constraint(), None);
    }

    #[test]
    fn test_parse_parallel_with_nested_paren_clauses() {
        let d = Directive::parse(
            "fx parallel acc(vector_length(64) gang) data(copy(a, b)) private(w1, w2)",
            9,
        )
        .unwrap();
        assert_eq!(d.kind(), DirectiveKind::Parallel);
        assert_eq!(d.acc_clauses(), Some("vector_length(64) gang"));
        assert_eq!(d.data_clauses(), Some("copy(a, b)"));
        assert_eq!(d.private_vars(), &["w1".to_string(), "w2".to_string()]);
    }

    #[test]
    fn test_parse_routine_seq() {
        let d = Directive::parse("fx routine seq", 2).unwrap();
        assert_eq!(d.kind(), DirectiveKind::Routine);
        assert!(d.seq());
    }

    #[test]
    fn test_parse_private_directive() {
        let d = Directive::parse("fx private(tmp, acc_sum)", 4).unwrap();
        assert_eq!(d.kind(), DirectiveKind::Private);
        assert_eq!(d.private_vars().len(), 2);
    }

    #[test]
    fn test_collapse_zero_is_out_of_range() {
        let err = Directive::parse("fx loop-fusion collapse(0)", 8).unwrap_err();
        assert!(matches!(err, MalformedDirective::InvalidValue { .. }));
        assert_eq!(err.line(), 8);
    }

    #[test]
    fn test_group_requires_a_label() {
        let err = Directive::parse("fx loop-fusion group()", 3).unwrap_err();
        assert_eq!(
            err,
            MalformedDirective::MissingValue {
                clause: "group".into(),
                line: 3
            }
        );
    }

    #[test]
    fn test_unknown_directive_and_clause() {
        assert!(matches!(
            Directive::parse("fx tile", 1).unwrap_err(),
            MalformedDirective::UnknownDirective { .. }
        ));
        assert!(matches!(
            Directive::parse("fx loop-fusion unroll(4)", 1).unwrap_err(),
            MalformedDirective::UnknownClause { .. }
        ));
    }

    #[test]
    fn test_constraint_is_fusion_only() {
        let err = Directive::parse("fx parallel constraint(direct)", 6).unwrap_err();
        assert!(matches!(err, MalformedDirective::MisplacedClause { .. }));
    }

    #[test]
    fn test_duplicate_clause_rejected() {
        let err = Directive::parse("fx loop-fusion group(a) group(b)", 2).unwrap_err();
        assert!(matches!(err, MalformedDirective::DuplicateClause { .. }));
    }

    #[test]
    fn test_seq_and_naked_conflict() {
        let err = Directive::parse("fx parallel seq naked", 11).unwrap_err();
        assert!(matches!(err, MalformedDirective::ConflictingClauses { .. }));
    }

    #[test]
    fn test_bare_sentinel_is_malformed() {
        assert_eq!(
            Directive::parse("fx", 1).unwrap_err(),
            MalformedDirective::MissingDirective { line: 1 }
        );
    }
}
