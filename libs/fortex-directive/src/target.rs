//! # Compile Target
//!
//! The backend directive dialect selected once per run.

use crate::generator::DirectiveGenerator;

/// Backend the run generates accelerator directives for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Target {
    /// No accelerator directives are generated.
    #[default]
    None,
    OpenAcc,
    OpenMp,
}

impl Target {
    /// Selects the generator strategy for this target.
    ///
    /// `Target::None` yields a generator whose every method returns an
    /// absent result, so callers never special-case the target.
    pub fn generator(self) -> DirectiveGenerator {
        match self {
            Target::None => DirectiveGenerator::None,
            Target::OpenAcc => DirectiveGenerator::OpenAcc,
            Target::OpenMp => DirectiveGenerator::OpenMp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_target_generates_nothing() {
        let generator = Target::default().generator();
        assert_eq!(generator.start_parallel_directive(None), None);
    }
}
