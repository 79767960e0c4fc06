//! In-memory backend.

use crate::validation::module_diagnostics;
use crate::{Diagnostic, Introspector, ModuleHandle};
use anyhow::{anyhow, Result};
use fakegen_types::ModuleDecl;
use std::collections::BTreeMap;
use std::path::Path;

/// Modules keyed by their path. The working directory is ignored.
#[derive(Debug, Clone, Default)]
pub struct MemoryIntrospector {
    modules: BTreeMap<String, ModuleDecl>,
}

impl MemoryIntrospector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_module(mut self, decl: ModuleDecl) -> Self {
        self.insert(decl);
        self
    }

    pub fn insert(&mut self, decl: ModuleDecl) {
        self.modules.insert(decl.path.clone(), decl);
    }
}

impl Introspector for MemoryIntrospector {
    fn resolve_module(
        &self,
        path: &str,
        _working_dir: &Path,
    ) -> Result<(ModuleHandle, Vec<Diagnostic>)> {
        let key = path.trim_start_matches("./");
        let decl = self
            .modules
            .get(key)
            .ok_or_else(|| anyhow!("cannot find module {}", path))?;
        let diagnostics = module_diagnostics(decl);
        Ok((ModuleHandle::new(decl.clone()), diagnostics))
    }
}
