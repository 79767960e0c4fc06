//! Names derived for generated code.

use std::path::Path;

/// Prefix for derived fake type names.
pub const FAKE_PREFIX: &str = "Fake";
/// Suffix for derived destination modules (`storefakes`).
pub const FAKES_SUFFIX: &str = "fakes";
/// Suffix for module-shim destinations (`osshim`).
pub const SHIM_SUFFIX: &str = "shim";

/// Whether a name is visible outside its module (starts upper-case).
pub fn is_exported(name: &str) -> bool {
    name.chars().next().is_some_and(char::is_uppercase)
}

/// Upper-case the first character.
pub fn export(name: &str) -> String {
    let name = name.trim();
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Lower-case the first character.
pub fn unexport(name: &str) -> String {
    let name = name.trim();
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Name of the fake type: the explicit name untouched, otherwise
/// `Fake` + the contract name with its first letter upper-cased.
pub fn fake_name(contract_name: &str, explicit: Option<&str>) -> String {
    match explicit {
        Some(name) if !name.trim().is_empty() => name.to_string(),
        _ => format!("{}{}", FAKE_PREFIX, export(contract_name)),
    }
}

/// Drop every character outside `[A-Za-z0-9_]`.
pub fn restrict_to_identifier(input: &str) -> String {
    input
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect()
}

/// Destination module for a fake.
///
/// Without an explicit output path, `location` is the directory the fakes
/// module is created under and the result is its last segment plus
/// `fakes`. With one, `location` is the output file and the result is
/// the name of the directory holding it, unsuffixed.
pub fn destination_module_name(location: &Path, explicit_output: bool) -> String {
    let segment = if explicit_output {
        location.parent().and_then(Path::file_name)
    } else {
        location.file_name()
    };
    let base = segment
        .map(|s| restrict_to_identifier(&s.to_string_lossy()))
        .unwrap_or_default();

    if explicit_output {
        if base.is_empty() {
            FAKES_SUFFIX.to_string()
        } else {
            base
        }
    } else {
        format!("{}{}", base, FAKES_SUFFIX)
    }
}

/// Destination module for a module shim (`os` -> `osshim`).
pub fn shim_module_name(module_short_name: &str) -> String {
    format!("{}{}", restrict_to_identifier(module_short_name), SHIM_SUFFIX)
}

/// `FakeHTTPClient` -> `fake_httpclient`: an underscore goes between a
/// lower-case letter and a following upper-case one, then everything is
/// lower-cased.
pub fn snake_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    let mut prev_lower = false;
    for c in name.chars() {
        if prev_lower && c.is_ascii_uppercase() {
            out.push('_');
        }
        prev_lower = c.is_ascii_lowercase();
        out.push(c.to_ascii_lowercase());
    }
    out
}

/// Positional parameter name, 1-based.
pub fn arg_name(index: usize) -> String {
    format!("arg{}", index + 1)
}

/// Positional result name, 1-based.
pub fn result_name(index: usize) -> String {
    format!("result{}", index + 1)
}
