//! Command-line arguments and their resolution into a generation request.

use anyhow::{anyhow, bail, Result};
use clap::Parser;
use fakegen_core::naming::{
    destination_module_name, fake_name, restrict_to_identifier, snake_case, FAKES_SUFFIX,
    SHIM_SUFFIX,
};
use fakegen_core::{GenerateRequest, RequestMode};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Positional argument that sends the generated code to stdout.
pub const STDOUT_MARKER: &str = "-";

#[derive(Debug, Clone, Parser)]
#[command(
    name = "fakegen",
    author,
    version,
    about = "Generate recorder fakes for interfaces, function types and modules",
    long_about = "Generate a fake that records every call it receives and returns configured results.\n\n\
                  fakegen [-o <output-path>] [-p] [--fake-name <name>] [<source-path>] <interface> [-]\n\n\
                  With one positional, <interface> is fully qualified: `module/path.Interface`.\n\
                  With -p, the positional is a module path and a shim plus a fake of its\n\
                  exported functions is generated. A trailing `-` prints the code to stdout."
)]
pub struct Args {
    /// Path of the file (or, with -p, directory) to write
    #[arg(short = 'o', long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Generate an interface and shim for every exported function of a module
    #[arg(short = 'p', long = "package")]
    pub package: bool,

    /// Name of the fake type (default: Fake + target name)
    #[arg(long = "fake-name", value_name = "NAME")]
    pub fake_name: Option<String>,

    /// [<source-path>] <interface> [-]
    #[arg(value_name = "ARGS", required = true, num_args = 1..=3)]
    pub positional: Vec<String>,
}

/// Arguments resolved against the working directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedArguments {
    pub mode: RequestMode,
    /// Module the target lives in, as handed to the introspector.
    pub source_module_path: String,
    /// Empty in module-shim mode.
    pub target_name: String,
    /// Name the fake will get.
    pub fake_name: String,
    pub explicit_fake_name: Option<String>,
    pub destination_module: String,
    pub output_path: PathBuf,
    pub print_to_stdout: bool,
    pub working_dir: PathBuf,
}

impl ParsedArguments {
    pub fn to_request(&self) -> GenerateRequest {
        GenerateRequest {
            mode: self.mode,
            target_name: self.target_name.clone(),
            source_module_path: self.source_module_path.clone(),
            fake_name: self.explicit_fake_name.clone(),
            destination_module: self.destination_module.clone(),
            working_dir: self.working_dir.clone(),
        }
    }
}

impl Args {
    pub fn resolve(&self, working_dir: &Path) -> Result<ParsedArguments> {
        let print_to_stdout = self.positional.iter().any(|a| a == STDOUT_MARKER);
        let positional: Vec<&str> = self
            .positional
            .iter()
            .map(String::as_str)
            .filter(|a| *a != STDOUT_MARKER)
            .collect();

        let parsed = if self.package {
            self.resolve_package(&positional, working_dir, print_to_stdout)?
        } else {
            self.resolve_interface(&positional, working_dir, print_to_stdout)?
        };
        debug!(
            module = %parsed.source_module_path,
            target = %parsed.target_name,
            destination = %parsed.destination_module,
            output = %parsed.output_path.display(),
            "parsed arguments"
        );
        Ok(parsed)
    }

    fn resolve_interface(
        &self,
        positional: &[&str],
        working_dir: &Path,
        print_to_stdout: bool,
    ) -> Result<ParsedArguments> {
        let (source_module_path, target_name, root) = match positional {
            [source, interface] => {
                let dir = source_dir(working_dir, source)?;
                (dir.display().to_string(), interface.to_string(), dir)
            }
            [qualified] => {
                let (module, interface) = split_qualified(qualified)?;
                (module, interface, working_dir.to_path_buf())
            }
            [] => bail!("missing interface argument"),
            _ => bail!("too many arguments: {}", positional.join(" ")),
        };
        if target_name.is_empty() {
            bail!("empty interface name");
        }

        let fake = fake_name(&target_name, self.fake_name.as_deref());
        let (output_path, destination_module) = match &self.output {
            Some(output) => {
                let output = absolute(working_dir, output);
                let destination = destination_module_name(&output, true);
                (output, destination)
            }
            None => {
                let base = root
                    .file_name()
                    .map(|b| b.to_string_lossy().into_owned())
                    .unwrap_or_default();
                let dir = root.join(format!("{}{}", base, FAKES_SUFFIX));
                let output = dir.join(format!("{}.go", snake_case(&fake)));
                (output, destination_module_name(&root, false))
            }
        };

        Ok(ParsedArguments {
            mode: RequestMode::InterfaceOrFunction,
            source_module_path,
            target_name,
            fake_name: fake,
            explicit_fake_name: self.fake_name.clone(),
            destination_module,
            output_path,
            print_to_stdout,
            working_dir: working_dir.to_path_buf(),
        })
    }

    fn resolve_package(
        &self,
        positional: &[&str],
        working_dir: &Path,
        print_to_stdout: bool,
    ) -> Result<ParsedArguments> {
        let module_path = match positional {
            [module] => module.trim_end_matches('/').to_string(),
            [] => bail!("missing module argument"),
            _ => bail!("-p takes a single module path, got: {}", positional.join(" ")),
        };
        let base = module_path
            .rsplit('/')
            .next()
            .filter(|b| !b.is_empty())
            .ok_or_else(|| anyhow!("invalid module path `{}`", module_path))?
            .to_string();

        let dir = match &self.output {
            Some(output) => absolute(working_dir, output),
            None => working_dir.join(format!("{}{}", restrict_to_identifier(&base), SHIM_SUFFIX)),
        };
        let output_path = dir.join(format!("{}.go", restrict_to_identifier(&base)));
        let destination_module = if self.output.is_some() {
            destination_module_name(&output_path, true)
        } else {
            format!("{}{}", restrict_to_identifier(&base), SHIM_SUFFIX)
        };
        let fake = fake_name(&base, self.fake_name.as_deref());

        Ok(ParsedArguments {
            mode: RequestMode::ModuleShim,
            source_module_path: module_path,
            target_name: String::new(),
            fake_name: fake,
            explicit_fake_name: self.fake_name.clone(),
            destination_module,
            output_path,
            print_to_stdout,
            working_dir: working_dir.to_path_buf(),
        })
    }
}

/// `example.com/store.Fetcher` -> (`example.com/store`, `Fetcher`).
pub fn split_qualified(qualified: &str) -> Result<(String, String)> {
    match qualified.rsplit_once('.') {
        Some((module, name)) if !module.is_empty() && !name.contains('/') => {
            Ok((module.to_string(), name.to_string()))
        }
        _ => bail!(
            "`{}` is not a qualified interface name (expected module/path.Interface)",
            qualified
        ),
    }
}

/// Directory of a source path; a file resolves to its parent.
pub fn source_dir(working_dir: &Path, source: &str) -> Result<PathBuf> {
    let path = absolute(working_dir, Path::new(source));
    let meta = std::fs::metadata(&path)
        .map_err(|_| anyhow!("No such file/directory/module: '{}'", path.display()))?;
    if meta.is_dir() {
        return Ok(path);
    }
    path.parent()
        .map(Path::to_path_buf)
        .ok_or_else(|| anyhow!("No such file/directory/module: '{}'", path.display()))
}

fn absolute(working_dir: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        working_dir.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn args(list: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("fakegen").chain(list.iter().copied()))
            .expect("valid arguments")
    }

    #[test]
    fn test_source_path_and_interface() {
        let dir = TempDir::new().unwrap();
        let store = dir.path().join("store");
        std::fs::create_dir_all(&store).unwrap();

        let parsed = args(&["store", "Fetcher"]).resolve(dir.path()).unwrap();
        assert_eq!(parsed.mode, RequestMode::InterfaceOrFunction);
        assert_eq!(parsed.target_name, "Fetcher");
        assert_eq!(parsed.fake_name, "FakeFetcher");
        assert_eq!(parsed.source_module_path, store.display().to_string());
        assert_eq!(parsed.destination_module, "storefakes");
        assert_eq!(
            parsed.output_path,
            store.join("storefakes").join("fake_fetcher.go")
        );
        assert!(!parsed.print_to_stdout);
    }

    #[test]
    fn test_source_file_resolves_to_its_directory() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("module.json"), "{}").unwrap();
        let parsed = args(&["module.json", "Fetcher"]).resolve(dir.path()).unwrap();
        assert_eq!(parsed.source_module_path, dir.path().display().to_string());
    }

    #[test]
    fn test_missing_source_path() {
        let dir = TempDir::new().unwrap();
        let err = args(&["nowhere", "Fetcher"]).resolve(dir.path()).unwrap_err();
        assert!(err.to_string().contains("No such file/directory/module"));
    }

    #[test]
    fn test_fully_qualified_interface() {
        let parsed = args(&["example.com/store.Fetcher"])
            .resolve(Path::new("/work/my-app"))
            .unwrap();
        assert_eq!(parsed.source_module_path, "example.com/store");
        assert_eq!(parsed.target_name, "Fetcher");
        assert_eq!(parsed.destination_module, "myappfakes");
        assert_eq!(
            parsed.output_path,
            PathBuf::from("/work/my-app/my-appfakes/fake_fetcher.go")
        );
    }

    #[test]
    fn test_unqualified_single_argument_is_an_error() {
        assert!(args(&["Fetcher"]).resolve(Path::new("/work")).is_err());
    }

    #[test]
    fn test_explicit_output_is_not_suffixed() {
        let parsed = args(&["-o", "/tmp/foo", "example.com/store.Fetcher"])
            .resolve(Path::new("/work"))
            .unwrap();
        assert_eq!(parsed.output_path, PathBuf::from("/tmp/foo"));
        assert_eq!(parsed.destination_module, "tmp");

        let relative = args(&["-o", "fakes/fetcher.go", "example.com/store.Fetcher"])
            .resolve(Path::new("/work"))
            .unwrap();
        assert_eq!(relative.output_path, PathBuf::from("/work/fakes/fetcher.go"));
        assert_eq!(relative.destination_module, "fakes");
    }

    #[test]
    fn test_fake_name_and_stdout() {
        let parsed = args(&[
            "--fake-name",
            "coolThing",
            "example.com/store.widget",
            "-",
        ])
        .resolve(Path::new("/work"))
        .unwrap();
        assert!(parsed.print_to_stdout);
        assert_eq!(parsed.fake_name, "coolThing");
        assert_eq!(parsed.explicit_fake_name.as_deref(), Some("coolThing"));
        assert_eq!(
            parsed.output_path,
            PathBuf::from("/work/workfakes/cool_thing.go")
        );
        assert_eq!(parsed.to_request().fake_name.as_deref(), Some("coolThing"));
    }

    #[test]
    fn test_unexported_target_gets_exported_fake() {
        let parsed = args(&["example.com/store.widget"])
            .resolve(Path::new("/work"))
            .unwrap();
        assert_eq!(parsed.fake_name, "FakeWidget");
    }

    #[test]
    fn test_package_mode() {
        let parsed = args(&["-p", "os"]).resolve(Path::new("/work")).unwrap();
        assert_eq!(parsed.mode, RequestMode::ModuleShim);
        assert_eq!(parsed.source_module_path, "os");
        assert_eq!(parsed.destination_module, "osshim");
        assert_eq!(parsed.output_path, PathBuf::from("/work/osshim/os.go"));
        assert_eq!(parsed.fake_name, "FakeOs");
        assert!(parsed.target_name.is_empty());

        let custom = args(&["-p", "-o", "shims", "example.com/calc"])
            .resolve(Path::new("/work"))
            .unwrap();
        assert_eq!(custom.output_path, PathBuf::from("/work/shims/calc.go"));
        assert_eq!(custom.destination_module, "shims");
    }

    #[test]
    fn test_package_mode_takes_one_module() {
        assert!(args(&["-p", "os", "io"]).resolve(Path::new("/work")).is_err());
    }
}
