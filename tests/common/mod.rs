#![allow(dead_code)]
//! Shared test utilities for integration tests.
//!
//! # Modules
//!
//! - `fixtures`: fixture module descriptions and scratch directories

pub mod fixtures;

use assert_cmd::Command;
use std::path::Path;

pub use fixtures::{copy_fixture, fixture_module, fixture_root, scratch_dir};

/// The `fakegen` binary run from `cwd`, with the fixture root as its only
/// module search path and logging off.
pub fn fakegen(cwd: &Path) -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("fakegen").expect("fakegen binary");
    cmd.current_dir(cwd)
        .env("FAKEGEN_MODULE_PATH", fixture_root())
        .env_remove("FAKEGEN_DEBUG")
        .env_remove("RUST_LOG");
    cmd
}
