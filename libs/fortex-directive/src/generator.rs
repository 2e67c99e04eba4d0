//! # Accelerator Generator Strategy
//!
//! Stateless, polymorphic directive-text synthesizer, one variant per
//! backend. Every method is a pure function of its arguments; callers
//! insert the returned text into the tree themselves.
//!
//! The `None` variant returns an absent result from every method, so
//! callers never need a null check: absence is a representable value.
//! Malformed inputs (an empty variable list, for instance) yield an empty
//! result rather than an error, since directive generation is advisory
//! decoration, not structural rewriting.

use config::constants::COMPILE_GUARD;

/// Backend directive dialect generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectiveGenerator {
    None,
    OpenAcc,
    OpenMp,
}

impl DirectiveGenerator {
    /// Token opening every directive of this dialect, used for backward
    /// pragma searches and continuation lines.
    pub fn prefix(&self) -> Option<&'static str> {
        match self {
            DirectiveGenerator::None => None,
            DirectiveGenerator::OpenAcc => Some("acc"),
            DirectiveGenerator::OpenMp => Some("omp"),
        }
    }

    /// Keyword identifying a parallel construct in this dialect.
    pub fn parallel_keyword(&self) -> Option<&'static str> {
        match self {
            DirectiveGenerator::None => None,
            DirectiveGenerator::OpenAcc | DirectiveGenerator::OpenMp => Some("parallel"),
        }
    }

    /// Directive opening a parallel region, extra clauses appended.
    pub fn start_parallel_directive(&self, clauses: Option<&str>) -> Option<String> {
        match self {
            DirectiveGenerator::None => None,
            DirectiveGenerator::OpenAcc => Some(with_clauses("acc parallel", clauses)),
            DirectiveGenerator::OpenMp => Some(with_clauses("omp parallel", clauses)),
        }
    }

    /// Directive closing a parallel region.
    pub fn end_parallel_directive(&self) -> Option<String> {
        match self {
            DirectiveGenerator::None => None,
            DirectiveGenerator::OpenAcc => Some("acc end parallel".to_string()),
            DirectiveGenerator::OpenMp => Some("omp end parallel".to_string()),
        }
    }

    /// Directive placed directly before a loop nest.
    ///
    /// `depth` > 1 collapses that many levels; `seq` requests sequential
    /// execution where the dialect supports it; `naked` suppresses the
    /// loop directive altogether.
    pub fn start_loop_directive(
        &self,
        depth: u32,
        seq: bool,
        naked: bool,
        clauses: Option<&str>,
    ) -> Option<String> {
        if naked {
            return None;
        }
        match self {
            DirectiveGenerator::None => None,
            DirectiveGenerator::OpenAcc => {
                let mut text = String::from("acc loop");
                if depth > 1 {
                    text.push_str(&format!(" collapse({depth})"));
                }
                if seq {
                    text.push_str(" seq");
                }
                Some(with_clauses(&text, clauses))
            }
            DirectiveGenerator::OpenMp => {
                // OpenMP has no sequential loop form; seq means no
                // worksharing directive at all.
                if seq {
                    return None;
                }
                let mut text = String::from("omp do");
                if depth > 1 {
                    text.push_str(&format!(" collapse({depth})"));
                }
                Some(with_clauses(&text, clauses))
            }
        }
    }

    /// Directive closing a loop construct, for dialects that have one.
    pub fn end_loop_directive(&self) -> Option<String> {
        match self {
            DirectiveGenerator::None | DirectiveGenerator::OpenAcc => None,
            DirectiveGenerator::OpenMp => Some("omp end do".to_string()),
        }
    }

    /// One free-standing directive carrying a single clause.
    pub fn single_directive(&self, clause: &str) -> Option<String> {
        match self {
            DirectiveGenerator::None => None,
            DirectiveGenerator::OpenAcc => Some(format!("acc {clause}")),
            DirectiveGenerator::OpenMp => Some(format!("omp {clause}")),
        }
    }

    /// Private clause for one variable.
    pub fn private_clause(&self, var: &str) -> String {
        match self {
            DirectiveGenerator::None => String::new(),
            DirectiveGenerator::OpenAcc | DirectiveGenerator::OpenMp => {
                format!("private({var})")
            }
        }
    }

    /// Private clause for a variable list; an empty list yields an empty
    /// clause, not an error.
    pub fn private_clause_list(&self, vars: &[String]) -> String {
        if vars.is_empty() {
            return String::new();
        }
        match self {
            DirectiveGenerator::None => String::new(),
            DirectiveGenerator::OpenAcc | DirectiveGenerator::OpenMp => {
                format!("private({})", vars.join(", "))
            }
        }
    }

    /// Directive marking a routine for device compilation.
    pub fn routine_directive(&self, seq: bool) -> Option<String> {
        match self {
            DirectiveGenerator::None => None,
            DirectiveGenerator::OpenAcc => Some(if seq {
                "acc routine seq".to_string()
            } else {
                "acc routine".to_string()
            }),
            DirectiveGenerator::OpenMp => Some("omp declare target".to_string()),
        }
    }

    /// Directive opening a data region, extra clauses appended.
    pub fn start_data_region(&self, clauses: Option<&str>) -> Option<String> {
        match self {
            DirectiveGenerator::None => None,
            DirectiveGenerator::OpenAcc => Some(with_clauses("acc data", clauses)),
            DirectiveGenerator::OpenMp => Some(with_clauses("omp target data", clauses)),
        }
    }

    /// Directive closing a data region.
    pub fn end_data_region(&self) -> Option<String> {
        match self {
            DirectiveGenerator::None => None,
            DirectiveGenerator::OpenAcc => Some("acc end data".to_string()),
            DirectiveGenerator::OpenMp => Some("omp end target data".to_string()),
        }
    }

    /// Clause forcing sequential execution, where the dialect has one.
    pub fn sequential_clause(&self) -> Option<&'static str> {
        match self {
            DirectiveGenerator::OpenAcc => Some("seq"),
            DirectiveGenerator::None | DirectiveGenerator::OpenMp => None,
        }
    }

    /// Recognizes a backend conditional-compilation guard pragma, which
    /// the engine must never rewrite.
    pub fn is_compile_guard(&self, raw: &str) -> bool {
        match self.prefix() {
            None => false,
            Some(prefix) => {
                let trimmed = raw.trim_start();
                trimmed.starts_with(prefix) && trimmed.contains(COMPILE_GUARD)
            }
        }
    }
}

fn with_clauses(base: &str, clauses: Option<&str>) -> String {
    match clauses {
        Some(c) if !c.trim().is_empty() => format!("{base} {}", c.trim()),
        _ => base.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// The none variant must be absent/empty/false for every query.
    #[test]
    fn test_none_variant_generates_nothing() {
        let g = DirectiveGenerator::None;
        assert_eq!(g.prefix(), None);
        assert_eq!(g.parallel_keyword(), None);
        assert_eq!(g.start_parallel_directive(Some("gang")), None);
        assert_eq!(g.end_parallel_directive(), None);
        assert_eq!(g.start_loop_directive(3, false, false, None), None);
        assert_eq!(g.end_loop_directive(), None);
        assert_eq!(g.single_directive("wait"), None);
        assert_eq!(g.private_clause("v"), "");
        assert_eq!(g.private_clause_list(&["v".to_string()]), "");
        assert_eq!(g.routine_directive(true), None);
        assert_eq!(g.start_data_region(None), None);
        assert_eq!(g.end_data_region(), None);
        assert_eq!(g.sequential_clause(), None);
        assert!(!g.is_compile_guard("acc guard"));
        assert!(!g.is_compile_guard(""));
    }

    #[test]
    fn test_openacc_directive_texts() {
        let g = DirectiveGenerator::OpenAcc;
        assert_eq!(
            g.start_parallel_directive(Some("vector_length(64)")).as_deref(),
            Some("acc parallel vector_length(64)")
        );
        assert_eq!(g.end_parallel_directive().as_deref(), Some("acc end parallel"));
        assert_eq!(
            g.start_loop_directive(2, true, false, None).as_deref(),
            Some("acc loop collapse(2) seq")
        );
        assert_eq!(g.end_loop_directive(), None);
        assert_eq!(g.routine_directive(true).as_deref(), Some("acc routine seq"));
        assert_eq!(
            g.start_data_region(Some("copy(a)")).as_deref(),
            Some("acc data copy(a)")
        );
        assert_eq!(g.end_data_region().as_deref(), Some("acc end data"));
    }

    #[test]
    fn test_openmp_directive_texts() {
        let g = DirectiveGenerator::OpenMp;
        assert_eq!(g.start_parallel_directive(None).as_deref(), Some("omp parallel"));
        assert_eq!(
            g.start_loop_directive(2, false, false, None).as_deref(),
            Some("omp do collapse(2)")
        );
        assert_eq!(g.end_loop_directive().as_deref(), Some("omp end do"));
        // No sequential loop form in this dialect.
        assert_eq!(g.start_loop_directive(1, true, false, None), None);
        assert_eq!(g.routine_directive(false).as_deref(), Some("omp declare target"));
    }

    #[test]
    fn test_naked_suppresses_loop_directive() {
        assert_eq!(
            DirectiveGenerator::OpenAcc.start_loop_directive(1, false, true, None),
            None
        );
    }

    #[test]
    fn test_private_clause_list() {
        let g = DirectiveGenerator::OpenAcc;
        assert_eq!(
            g.private_clause_list(&["a".to_string(), "b".to_string()]),
            "private(a, b)"
        );
        assert_eq!(g.private_clause_list(&[]), "");
    }

    #[test]
    fn test_compile_guard_recognition() {
        let g = DirectiveGenerator::OpenAcc;
        assert!(g.is_compile_guard("acc guard begin"));
        assert!(!g.is_compile_guard("acc parallel"));
        assert!(!g.is_compile_guard("omp guard"));
        assert!(DirectiveGenerator::OpenMp.is_compile_guard("omp guard end"));
    }
}
