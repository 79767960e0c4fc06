//! Fakegen Introspect
//!
//! The boundary between the generator and whatever knows what a module
//! declares. The generator never parses source: it asks an
//! [`Introspector`] for a module and then for symbols inside it.
//!
//! # Backends
//!
//! - [`JsonModuleLoader`]: reads module descriptions written to disk by an
//!   external type checker
//! - [`MemoryIntrospector`]: serves modules built in code (tests, embedders)
//!
//! # Example
//!
//! ```ignore
//! use fakegen_introspect::{Introspector, JsonModuleLoader};
//!
//! let loader = JsonModuleLoader::from_env();
//! let (module, diagnostics) = loader.resolve_module("./store", &cwd)?;
//! let fetcher = loader.lookup_symbol(&module, "Fetcher");
//! ```

pub mod loader;
pub mod memory;
pub mod validation;

pub use loader::JsonModuleLoader;
pub use memory::MemoryIntrospector;

use anyhow::Result;
use fakegen_types::{ModuleDecl, SymbolDecl};
use std::fmt;
use std::path::{Path, PathBuf};

/// A loaded module, owned by the caller for the rest of the run.
#[derive(Debug, Clone)]
pub struct ModuleHandle {
    decl: ModuleDecl,
    origin: Option<PathBuf>,
}

impl ModuleHandle {
    pub fn new(decl: ModuleDecl) -> Self {
        Self { decl, origin: None }
    }

    pub fn with_origin(decl: ModuleDecl, origin: PathBuf) -> Self {
        Self {
            decl,
            origin: Some(origin),
        }
    }

    pub fn decl(&self) -> &ModuleDecl {
        &self.decl
    }

    /// File the description was read from, if any.
    pub fn origin(&self) -> Option<&Path> {
        self.origin.as_deref()
    }
}

/// A problem reported while loading a module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub message: String,
    /// Where the problem was found (file, symbol), when known.
    pub location: Option<String>,
}

impl Diagnostic {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            location: None,
        }
    }

    pub fn at(location: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            location: Some(location.into()),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.location {
            Some(location) => write!(f, "{}: {}", location, self.message),
            None => write!(f, "{}", self.message),
        }
    }
}

/// Answers "what does this module declare".
///
/// `resolve_module` fails only when the module cannot be found or read at
/// all. Problems inside a module that was found come back as diagnostics;
/// deciding whether they are fatal is the caller's business.
pub trait Introspector {
    fn resolve_module(
        &self,
        path: &str,
        working_dir: &Path,
    ) -> Result<(ModuleHandle, Vec<Diagnostic>)>;

    fn lookup_symbol<'m>(&self, module: &'m ModuleHandle, name: &str) -> Option<&'m SymbolDecl> {
        module.decl().lookup(name)
    }
}

impl<T: Introspector + ?Sized> Introspector for &T {
    fn resolve_module(
        &self,
        path: &str,
        working_dir: &Path,
    ) -> Result<(ModuleHandle, Vec<Diagnostic>)> {
        (**self).resolve_module(path, working_dir)
    }

    fn lookup_symbol<'m>(&self, module: &'m ModuleHandle, name: &str) -> Option<&'m SymbolDecl> {
        (**self).lookup_symbol(module, name)
    }
}
