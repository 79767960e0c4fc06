//! Writing generated code and reporting progress.

use anyhow::{Context, Result};
use std::fs;
use std::io::{self, Write};
use std::path::Path;

/// `Writing `FakeFetcher` to `storefakes/fake_fetcher.go`... `
pub fn starting_message(fake_name: &str, output_path: &Path, working_dir: &Path) -> String {
    let rel = output_path.strip_prefix(working_dir).unwrap_or(output_path);
    format!("Writing `{}` to `{}`... ", fake_name, rel.display())
}

/// Write `code` to `output_path`, creating parent directories.
pub fn write_code(code: &str, output_path: &Path) -> Result<()> {
    if let Some(parent) = output_path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Couldn't create directory {}", parent.display()))?;
    }
    fs::write(output_path, code)
        .with_context(|| format!("Couldn't write fake file {}", output_path.display()))?;
    Ok(())
}

/// Emit the generated code and the progress report.
///
/// Code printed to stdout moves the report to stderr so the two never mix.
pub fn emit(
    code: &str,
    fake_name: &str,
    output_path: &Path,
    working_dir: &Path,
    print_to_stdout: bool,
) -> Result<()> {
    let message = starting_message(fake_name, output_path, working_dir);
    if print_to_stdout {
        let mut report = io::stderr().lock();
        write!(report, "{}", message)?;
        let mut out = io::stdout().lock();
        writeln!(out, "{}", code)?;
        out.flush()?;
        writeln!(report, "Done")?;
    } else {
        let mut report = io::stdout().lock();
        write!(report, "{}", message)?;
        report.flush()?;
        write_code(code, output_path)?;
        writeln!(report, "Done")?;
    }
    Ok(())
}
