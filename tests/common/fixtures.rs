//! Fixture locations and scratch workspaces.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Module descriptions, laid out by module path.
pub const FIXTURE_DIR: &str = "tests/fixture";

/// Absolute path of the fixture root.
pub fn fixture_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join(FIXTURE_DIR)
}

/// Absolute path of one fixture module, e.g. `example.com/store`.
pub fn fixture_module(module_path: &str) -> PathBuf {
    fixture_root().join(module_path)
}

/// Copy a fixture module into `dest`, returning the copied directory.
///
/// # Panics
///
/// Panics if the fixture does not exist.
pub fn copy_fixture(module_path: &str, dest: &Path) -> PathBuf {
    let source = fixture_module(module_path);
    fs::create_dir_all(dest).expect("create fixture destination");
    for entry in fs::read_dir(&source).expect("fixture module should exist") {
        let entry = entry.expect("read fixture entry");
        fs::copy(entry.path(), dest.join(entry.file_name())).expect("copy fixture file");
    }
    dest.to_path_buf()
}

/// An empty working directory for one test.
pub fn scratch_dir() -> TempDir {
    TempDir::new().expect("create temp dir")
}
