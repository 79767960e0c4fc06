//! Module descriptions on disk.
//!
//! An external type checker writes one JSON [`ModuleDecl`] per module. A
//! module path resolves, relative to the working directory and then to
//! each search root, to the first of:
//!
//! 1. the path itself, when it is a file
//! 2. `<path>/module.json`, when the path is a directory
//! 3. `<path>.json`

use crate::validation::module_diagnostics;
use crate::{Diagnostic, Introspector, ModuleHandle};
use anyhow::{anyhow, Context, Result};
use fakegen_types::ModuleDecl;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Environment variable holding extra search roots, `PATH`-style.
pub const MODULE_PATH_ENV: &str = "FAKEGEN_MODULE_PATH";

/// File name looked up inside a module directory.
pub const MODULE_FILE_NAME: &str = "module.json";

#[derive(Debug, Clone, Default)]
pub struct JsonModuleLoader {
    search_roots: Vec<PathBuf>,
}

impl JsonModuleLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loader whose search roots come from `FAKEGEN_MODULE_PATH`.
    pub fn from_env() -> Self {
        let search_roots = std::env::var_os(MODULE_PATH_ENV)
            .map(|v| std::env::split_paths(&v).collect())
            .unwrap_or_default();
        Self { search_roots }
    }

    pub fn with_search_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.search_roots.push(root.into());
        self
    }

    pub fn search_roots(&self) -> &[PathBuf] {
        &self.search_roots
    }

    /// Find the description file for `path`, without reading it.
    pub fn locate(&self, path: &str, working_dir: &Path) -> Option<PathBuf> {
        let requested = Path::new(path);
        let bases: Vec<PathBuf> = if requested.is_absolute() {
            vec![PathBuf::new()]
        } else {
            std::iter::once(working_dir.to_path_buf())
                .chain(self.search_roots.iter().cloned())
                .collect()
        };

        for base in bases {
            let candidate = base.join(requested);
            if candidate.is_file() {
                return Some(candidate);
            }
            let in_dir = candidate.join(MODULE_FILE_NAME);
            if candidate.is_dir() && in_dir.is_file() {
                return Some(in_dir);
            }
            let with_ext = PathBuf::from(format!("{}.json", candidate.display()));
            if with_ext.is_file() {
                return Some(with_ext);
            }
        }
        None
    }
}

pub fn read_module_description(file: &Path) -> Result<ModuleDecl> {
    let text = fs::read_to_string(file).with_context(|| format!("read {}", file.display()))?;
    let decl: ModuleDecl =
        serde_json::from_str(&text).with_context(|| format!("parse {}", file.display()))?;
    Ok(decl)
}

impl Introspector for JsonModuleLoader {
    fn resolve_module(
        &self,
        path: &str,
        working_dir: &Path,
    ) -> Result<(ModuleHandle, Vec<Diagnostic>)> {
        debug!(path, working_dir = %working_dir.display(), "loading module description");
        let file = self.locate(path, working_dir).ok_or_else(|| {
            anyhow!(
                "no module description found for `{}` (looked in {} and {} search roots)",
                path,
                working_dir.display(),
                self.search_roots.len()
            )
        })?;

        let decl = read_module_description(&file)?;
        let diagnostics = module_diagnostics(&decl);
        debug!(
            module = %decl.path,
            types = decl.types.len(),
            functions = decl.functions.len(),
            diagnostics = diagnostics.len(),
            "loaded module description from {}",
            file.display()
        );
        Ok((ModuleHandle::with_origin(decl, file), diagnostics))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const STORE: &str = r#"{
        "path": "example.com/store",
        "types": [
            {"name": "Fetcher", "kind": "interface", "methods": [
                {"name": "Fetch", "params": ["string"], "results": ["string", "error"]}
            ]}
        ]
    }"#;

    #[test]
    fn test_locate_directory_with_module_file() {
        let dir = TempDir::new().unwrap();
        let module_dir = dir.path().join("store");
        fs::create_dir_all(&module_dir).unwrap();
        fs::write(module_dir.join(MODULE_FILE_NAME), STORE).unwrap();

        let loader = JsonModuleLoader::new();
        let found = loader.locate("store", dir.path()).unwrap();
        assert_eq!(found, module_dir.join(MODULE_FILE_NAME));

        let (module, diags) = loader.resolve_module("./store", dir.path()).unwrap();
        assert!(diags.is_empty());
        assert_eq!(module.decl().path, "example.com/store");
        assert!(loader.lookup_symbol(&module, "Fetcher").is_some());
        assert!(module.origin().unwrap().ends_with("store/module.json"));
    }

    #[test]
    fn test_locate_json_suffix_and_search_roots() {
        let cwd = TempDir::new().unwrap();
        let root = TempDir::new().unwrap();
        fs::create_dir_all(root.path().join("example.com")).unwrap();
        fs::write(root.path().join("example.com/store.json"), STORE).unwrap();

        let loader = JsonModuleLoader::new().with_search_root(root.path());
        let (module, _) = loader
            .resolve_module("example.com/store", cwd.path())
            .unwrap();
        assert_eq!(module.decl().short_name(), "store");
    }

    #[test]
    fn test_missing_module_is_an_error() {
        let cwd = TempDir::new().unwrap();
        let err = JsonModuleLoader::new()
            .resolve_module("nowhere", cwd.path())
            .unwrap_err();
        assert!(err.to_string().contains("no module description found for `nowhere`"));
    }

    #[test]
    fn test_reported_diagnostics_are_returned() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("broken.json");
        fs::write(
            &file,
            r#"{"path": "example.com/broken", "diagnostics": ["x.go:3:1: expected declaration"]}"#,
        )
        .unwrap();

        let (_, diags) = JsonModuleLoader::new()
            .resolve_module(file.to_str().unwrap(), Path::new("/"))
            .unwrap();
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].message, "x.go:3:1: expected declaration");
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("bad.json"), "{not json").unwrap();
        let err = JsonModuleLoader::new()
            .resolve_module("bad", dir.path())
            .unwrap_err();
        assert!(format!("{:#}", err).contains("parse"));
    }
}
