//! Fakegen
//!
//! Command-line front end for [`fakegen_core`]:
//!
//! - **Argument parsing**: [`args`] turns the command line into a
//!   [`fakegen_core::GenerateRequest`] plus an output location
//! - **Introspection**: module descriptions are read with
//!   [`fakegen_introspect::JsonModuleLoader`], searching the working
//!   directory and `FAKEGEN_MODULE_PATH`
//! - **Output**: [`output`] writes the file (or stdout) and reports progress

pub mod args;
pub mod output;

use anyhow::Result;
use fakegen_introspect::JsonModuleLoader;
use std::path::Path;
use tracing::debug;

/// Environment variable that turns on debug logging.
pub const DEBUG_ENV: &str = "FAKEGEN_DEBUG";

/// Parse, generate and write for one invocation.
pub fn run(args: &args::Args, working_dir: &Path) -> Result<()> {
    let parsed = args.resolve(working_dir)?;
    let loader = JsonModuleLoader::from_env();
    debug!(search_roots = loader.search_roots().len(), "module loader ready");

    let artifact = fakegen_core::generate(&parsed.to_request(), &loader)?;
    output::emit(
        &artifact.rendered_text,
        &artifact.fake_name,
        &parsed.output_path,
        working_dir,
        parsed.print_to_stdout,
    )
}
