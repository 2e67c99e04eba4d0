//! # Transformation Unit
//!
//! The analyze / compatibility-test / apply / mark-consumed contract every
//! concrete rewrite implements. The concrete set is closed, so units are
//! a tagged variant dispatched by pattern match rather than trait objects.

use crate::error::TransformError;
use crate::fusion::LoopFusion;
use crate::region::{ParallelRegion, PrivatePropagation, RoutineAnnotation};
use fortex_ast::{Ast, Diagnostics, NodeId};
use fortex_directive::{Directive, DirectiveGenerator, DirectiveKind};

/// One pending rewrite, built from a directive and the tree region it
/// governs.
///
/// Lifecycle: created at collection, validated by `analyze`, optionally
/// folded into another unit by the driver's merge scan (`mark_consumed`),
/// finally `apply`d. A consumed unit is permanently excluded from further
/// matching and application.
#[derive(Debug, Clone)]
pub enum TransformationUnit {
    LoopFusion(LoopFusion),
    ParallelRegion(ParallelRegion),
    RoutineAnnotation(RoutineAnnotation),
    PrivatePropagation(PrivatePropagation),
}

impl TransformationUnit {
    /// Builds the unit the directive's keyword requests.
    pub fn from_directive(directive: Directive, pragma: NodeId) -> TransformationUnit {
        match directive.kind() {
            DirectiveKind::LoopFusion => {
                TransformationUnit::LoopFusion(LoopFusion::new(directive, pragma))
            }
            DirectiveKind::Parallel => {
                TransformationUnit::ParallelRegion(ParallelRegion::new(directive, pragma))
            }
            DirectiveKind::Routine => {
                TransformationUnit::RoutineAnnotation(RoutineAnnotation::new(directive, pragma))
            }
            DirectiveKind::Private => {
                TransformationUnit::PrivatePropagation(PrivatePropagation::new(directive, pragma))
            }
        }
    }

    /// Locates the governed AST region and validates structural
    /// preconditions. Records a diagnostic and returns false on failure;
    /// never mutates the tree.
    pub fn analyze(&mut self, ast: &Ast, diagnostics: &mut Diagnostics) -> bool {
        match self {
            TransformationUnit::LoopFusion(unit) => unit.analyze(ast, diagnostics),
            TransformationUnit::ParallelRegion(unit) => unit.analyze(ast, diagnostics),
            TransformationUnit::RoutineAnnotation(unit) => unit.analyze(ast, diagnostics),
            TransformationUnit::PrivatePropagation(unit) => unit.analyze(ast, diagnostics),
        }
    }

    /// Symmetric-intent compatibility test. Merging is only ever
    /// attempted between units of the same concrete kind; today only
    /// loop-fusion units merge at all.
    pub fn can_merge_with(
        &self,
        other: &TransformationUnit,
        ast: &Ast,
        diagnostics: &mut Diagnostics,
    ) -> bool {
        match (self, other) {
            (TransformationUnit::LoopFusion(a), TransformationUnit::LoopFusion(b)) => {
                a.can_merge_with(b, ast, diagnostics)
            }
            _ => false,
        }
    }

    /// Performs the rewrite, consuming `partner` first when present, then
    /// removes the governing pragma. Calling apply on a consumed unit is
    /// a programming error and panics.
    pub fn apply(
        &mut self,
        ast: &mut Ast,
        partner: Option<&mut TransformationUnit>,
        generator: &DirectiveGenerator,
        diagnostics: &mut Diagnostics,
    ) -> Result<(), TransformError> {
        match self {
            TransformationUnit::LoopFusion(unit) => {
                if let Some(partner) = partner {
                    match partner {
                        TransformationUnit::LoopFusion(other) => unit.merge(ast, other)?,
                        _ => {
                            return Err(TransformError::illegal(
                                "incompatible transformation kind",
                                unit.start_line(),
                            ))
                        }
                    }
                }
                unit.finish(ast);
                Ok(())
            }
            TransformationUnit::ParallelRegion(unit) => {
                debug_assert!(partner.is_none(), "only loop-fusion units merge");
                unit.apply(ast, generator);
                Ok(())
            }
            TransformationUnit::RoutineAnnotation(unit) => {
                debug_assert!(partner.is_none(), "only loop-fusion units merge");
                unit.apply(ast, generator);
                Ok(())
            }
            TransformationUnit::PrivatePropagation(unit) => {
                debug_assert!(partner.is_none(), "only loop-fusion units merge");
                unit.apply(ast, generator, diagnostics);
                Ok(())
            }
        }
    }

    pub fn is_consumed(&self) -> bool {
        match self {
            TransformationUnit::LoopFusion(unit) => unit.is_consumed(),
            TransformationUnit::ParallelRegion(unit) => unit.is_consumed(),
            TransformationUnit::RoutineAnnotation(unit) => unit.is_consumed(),
            TransformationUnit::PrivatePropagation(unit) => unit.is_consumed(),
        }
    }

    pub fn mark_consumed(&mut self) {
        match self {
            TransformationUnit::LoopFusion(unit) => unit.mark_consumed(),
            TransformationUnit::ParallelRegion(unit) => unit.mark_consumed(),
            TransformationUnit::RoutineAnnotation(unit) => unit.mark_consumed(),
            TransformationUnit::PrivatePropagation(unit) => unit.mark_consumed(),
        }
    }

    /// Source line of the governing pragma, for diagnostics.
    pub fn start_line(&self) -> u32 {
        match self {
            TransformationUnit::LoopFusion(unit) => unit.start_line(),
            TransformationUnit::ParallelRegion(unit) => unit.start_line(),
            TransformationUnit::RoutineAnnotation(unit) => unit.start_line(),
            TransformationUnit::PrivatePropagation(unit) => unit.start_line(),
        }
    }

    pub fn is_loop_fusion(&self) -> bool {
        matches!(self, TransformationUnit::LoopFusion(_))
    }
}
