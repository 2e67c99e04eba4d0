//! # Transformation Driver
//!
//! Owns the ordered collection of transformation units for one
//! translation unit and runs the full pipeline deterministically in
//! document order: collect, analyze-all, merge-scan, apply-all. The
//! driver is the only writer to the tree; no unit mutates it outside an
//! `apply` the driver invokes.

use crate::error::TransformError;
use crate::unit::TransformationUnit;
use config::constants::DIRECTIVE_SENTINEL;
use fortex_ast::{Ast, Diagnostics};
use fortex_directive::{Directive, DirectiveGenerator, Target};
use tracing::{debug, trace, warn};

/// Outcome of one driver run over one translation unit.
#[derive(Debug, Clone)]
pub struct TransformReport {
    /// Warnings and errors accumulated across the pipeline.
    pub diagnostics: Diagnostics,
    /// Units that performed their own rewrite.
    pub units_applied: usize,
    /// Units folded into a merge partner.
    pub units_fused: usize,
}

impl TransformReport {
    /// True when no error-severity diagnostic was recorded.
    pub fn success(&self) -> bool {
        !self.diagnostics.has_errors()
    }
}

/// Single-pass batch driver for one translation unit.
///
/// ## Example
///
/// ```rust,ignore
/// let driver = Driver::new(Target::OpenAcc);
/// let report = driver.run(&mut ast)?;
/// assert!(report.success());
/// ```
#[derive(Debug)]
pub struct Driver {
    generator: DirectiveGenerator,
}

impl Driver {
    pub fn new(target: Target) -> Self {
        Driver {
            generator: target.generator(),
        }
    }

    pub fn generator(&self) -> &DirectiveGenerator {
        &self.generator
    }

    /// Runs collect → analyze-all → merge-scan → apply-all.
    ///
    /// Recoverable failures drop the affected unit and are reported in
    /// the returned diagnostics; fatal errors abort immediately and no
    /// output should be emitted from the half-rewritten tree.
    pub fn run(&self, ast: &mut Ast) -> Result<TransformReport, TransformError> {
        let mut diagnostics = Diagnostics::new();

        let units = self.collect(ast, &mut diagnostics);
        debug!(count = units.len(), "collected transformation units");

        let mut units: Vec<TransformationUnit> = units
            .into_iter()
            .filter_map(|mut unit| {
                if unit.analyze(ast, &mut diagnostics) {
                    Some(unit)
                } else {
                    trace!(line = unit.start_line(), "dropping unit after failed analysis");
                    None
                }
            })
            .collect();

        let units_fused = match self.merge_scan(ast, &mut units, &mut diagnostics) {
            Ok(count) => count,
            Err(err) => {
                warn!(%err, "fatal error during merge scan");
                return Err(err);
            }
        };

        let mut units_applied = 0;
        for unit in &mut units {
            if unit.is_consumed() {
                continue;
            }
            trace!(line = unit.start_line(), "applying unit");
            unit.apply(ast, None, &self.generator, &mut diagnostics)?;
            units_applied += 1;
        }

        debug!(units_applied, units_fused, "driver run finished");
        Ok(TransformReport {
            diagnostics,
            units_applied,
            units_fused,
        })
    }

    /// Walks pragma nodes in document order and builds units. Compile
    /// guards and foreign pragmas are skipped; malformed directives are
    /// recorded as errors and dropped.
    fn collect(&self, ast: &Ast, diagnostics: &mut Diagnostics) -> Vec<TransformationUnit> {
        let mut units = Vec::new();
        for pragma in ast.pragmas_in_document_order() {
            let text = ast.text(pragma);
            if self.generator.is_compile_guard(text) {
                trace!(line = ast.line(pragma), "skipping compile guard");
                continue;
            }
            if text.split_whitespace().next() != Some(DIRECTIVE_SENTINEL) {
                continue;
            }
            match Directive::parse(text, ast.line(pragma)) {
                Ok(directive) => units.push(TransformationUnit::from_directive(directive, pragma)),
                Err(err) => diagnostics.error(err.to_string(), err.line()),
            }
        }
        units
    }

    /// Pairwise compatibility scan in document order. The first unit of a
    /// compatible pair absorbs the second and stays eligible, so fusion
    /// chains grow beyond pairs. Quadratic per group; incompatible group
    /// labels short-circuit on the first test.
    fn merge_scan(
        &self,
        ast: &mut Ast,
        units: &mut [TransformationUnit],
        diagnostics: &mut Diagnostics,
    ) -> Result<usize, TransformError> {
        let mut fused = 0;
        for first in 0..units.len() {
            if !units[first].is_loop_fusion() || units[first].is_consumed() {
                continue;
            }
            for second in first + 1..units.len() {
                if !units[second].is_loop_fusion() || units[second].is_consumed() {
                    continue;
                }
                if !units[first].can_merge_with(&units[second], ast, diagnostics) {
                    continue;
                }
                trace!(
                    first = units[first].start_line(),
                    second = units[second].start_line(),
                    "merging loop-fusion units"
                );
                let (head, tail) = units.split_at_mut(second);
                head[first].apply(ast, Some(&mut tail[0]), &self.generator, diagnostics)?;
                fused += 1;
            }
        }
        Ok(fused)
    }
}

/// Runs the driver and unparses the rewritten tree in one step.
///
/// A decompile failure is fatal and reported with the run's other fatal
/// errors; no partial output is returned.
pub fn transform_and_unparse(
    ast: &mut Ast,
    target: Target,
    max_columns: usize,
) -> Result<(String, TransformReport), TransformError> {
    let report = Driver::new(target).run(ast)?;
    let output = fortex_ast::serialize(ast, max_columns, true)?;
    Ok((output, report))
}
