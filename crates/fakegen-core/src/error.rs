//! Generation error types.
//!
//! Every failure is fatal for the run: nothing here is transient, so
//! callers get one descriptive error and no partial artifact.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerateError {
    /// The introspection backend could not load the module, or loaded it
    /// and reported diagnostics.
    ModuleLoad {
        /// Module path as requested.
        module: String,
        /// Diagnostics in reported order; the first is the primary cause.
        diagnostics: Vec<String>,
    },

    /// The module has no symbol with the requested name.
    TargetNotFound { target: String, module: String },

    /// The symbol exists but is neither an interface nor a function type.
    UnsupportedTargetKind {
        target: String,
        /// What the symbol actually is, e.g. "struct".
        kind: String,
    },

    /// The requested generation shape does not match the resolved contract.
    GenerationUnsupported {
        requested: String,
        resolved: String,
    },
}

impl GenerateError {
    pub fn module_load(module: impl Into<String>, diagnostics: Vec<String>) -> Self {
        GenerateError::ModuleLoad {
            module: module.into(),
            diagnostics,
        }
    }
}

impl fmt::Display for GenerateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerateError::ModuleLoad {
                module,
                diagnostics,
            } => {
                write!(f, "failed to load module {}", module)?;
                match diagnostics.as_slice() {
                    [] => Ok(()),
                    [only] => write!(f, ": {}", only),
                    many => {
                        write!(f, ": {} errors", many.len())?;
                        for d in many {
                            write!(f, "\n\t{}", d)?;
                        }
                        Ok(())
                    }
                }
            }
            GenerateError::TargetNotFound { target, module } => {
                write!(f, "cannot find {} in module {}", target, module)
            }
            GenerateError::UnsupportedTargetKind { target, kind } => write!(
                f,
                "cannot generate a fake for {} because it is a {}, not an interface or function",
                target, kind
            ),
            GenerateError::GenerationUnsupported {
                requested,
                resolved,
            } => write!(
                f,
                "fakegen can only generate fakes for interfaces, functions or modules \
                 (requested {} generation for a resolved {})",
                requested, resolved
            ),
        }
    }
}

impl std::error::Error for GenerateError {}
