//! The fully resolved request the generator runs on.

use std::fmt;
use std::path::PathBuf;

/// Which shape the caller asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestMode {
    /// Fake a named interface or function type.
    InterfaceOrFunction,
    /// Synthesize an interface from a module's exported functions and fake it.
    ModuleShim,
}

impl fmt::Display for RequestMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestMode::InterfaceOrFunction => write!(f, "interface or function"),
            RequestMode::ModuleShim => write!(f, "module shim"),
        }
    }
}

/// Everything one generation run needs. The core reads nothing from the
/// process environment; the working directory travels here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateRequest {
    pub mode: RequestMode,
    /// Symbol to fake. In module-shim mode, the name of the synthesized
    /// interface; empty means the upper-cased module short name.
    pub target_name: String,
    pub source_module_path: String,
    /// Explicit fake type name, used as given.
    pub fake_name: Option<String>,
    /// Module the generated file belongs to. Empty means derive it from
    /// the source module.
    pub destination_module: String,
    pub working_dir: PathBuf,
}

impl GenerateRequest {
    pub fn fake(
        target_name: impl Into<String>,
        source_module_path: impl Into<String>,
        destination_module: impl Into<String>,
    ) -> Self {
        Self {
            mode: RequestMode::InterfaceOrFunction,
            target_name: target_name.into(),
            source_module_path: source_module_path.into(),
            fake_name: None,
            destination_module: destination_module.into(),
            working_dir: PathBuf::from("."),
        }
    }

    pub fn module_shim(
        source_module_path: impl Into<String>,
        destination_module: impl Into<String>,
    ) -> Self {
        Self {
            mode: RequestMode::ModuleShim,
            target_name: String::new(),
            source_module_path: source_module_path.into(),
            fake_name: None,
            destination_module: destination_module.into(),
            working_dir: PathBuf::from("."),
        }
    }

    pub fn with_fake_name(mut self, name: impl Into<String>) -> Self {
        self.fake_name = Some(name.into());
        self
    }

    pub fn with_target_name(mut self, name: impl Into<String>) -> Self {
        self.target_name = name.into();
        self
    }

    pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = dir.into();
        self
    }
}
