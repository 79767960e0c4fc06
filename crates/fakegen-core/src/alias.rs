//! Import alias table.
//!
//! Every module referenced by a generated fake gets exactly one alias for
//! the whole run, and no alias is shared by two modules. Collisions are
//! resolved silently by suffixing: `name`, `namea`, `nameb`, ... `namez`,
//! `nameaa`, ...

use crate::naming::restrict_to_identifier;
use fakegen_types::ModuleRef;
use std::collections::BTreeMap;
use std::fmt;

/// An import line: module path plus the alias it is referenced by.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Import {
    pub alias: String,
    pub path: String,
}

/// Prints as it appears inside an import block. The alias is omitted when
/// it equals the path's last segment.
impl fmt::Display for Import {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let base = self.path.rsplit('/').next().unwrap_or(&self.path);
        if base == self.alias {
            write!(f, "\"{}\"", self.path)
        } else {
            write!(f, "{} \"{}\"", self.alias, self.path)
        }
    }
}

/// Names an alias may not take: keywords, predeclared identifiers, and
/// the locals and receivers used inside generated method bodies.
const RESERVED: &[&str] = &[
    // keywords
    "break", "case", "chan", "const", "continue", "default", "defer", "else",
    "fallthrough", "for", "func", "go", "goto", "if", "import", "interface", "map",
    "package", "range", "return", "select", "struct", "switch", "type", "var",
    // predeclared
    "any", "append", "bool", "byte", "cap", "clear", "close", "comparable", "complex",
    "complex64", "complex128", "copy", "delete", "error", "false", "float32", "float64",
    "imag", "int", "int8", "int16", "int32", "int64", "iota", "len", "make", "max", "min",
    "new", "nil", "panic", "print", "println", "real", "recover", "rune", "string", "true",
    "uint", "uint8", "uint16", "uint32", "uint64", "uintptr",
    // generated locals
    "fake", "stub", "ret", "specificReturn", "fakeReturns", "argsForCall",
    "copiedInvocations", "key", "value", "args", "i", "p",
];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AliasTable {
    by_alias: BTreeMap<String, Import>,
    by_path: BTreeMap<String, Import>,
}

impl AliasTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `path` under `alias`, or return the import it already has.
    pub fn add(&mut self, alias: &str, path: &str) -> Import {
        let path = vendorless_path(path.trim()).to_string();
        if let Some(existing) = self.by_path.get(&path) {
            return existing.clone();
        }

        let mut alias = restrict_to_identifier(alias.trim());
        if alias.is_empty() {
            alias = "pkg".to_string();
        } else if alias.starts_with(|c: char| c.is_ascii_digit()) {
            alias.insert(0, '_');
        }
        if self.is_taken(&alias) {
            alias = self.unique_alias(&alias);
        }

        let import = Import { alias, path };
        self.by_path.insert(import.path.clone(), import.clone());
        self.by_alias.insert(import.alias.clone(), import.clone());
        import
    }

    /// Register a module under its own short name.
    pub fn add_module(&mut self, module: &ModuleRef) -> Import {
        self.add(module.short_name(), &module.path)
    }

    pub fn alias_for(&self, path: &str) -> Option<&str> {
        self.by_path
            .get(vendorless_path(path))
            .map(|i| i.alias.as_str())
    }

    pub fn contains_path(&self, path: &str) -> bool {
        self.by_path.contains_key(vendorless_path(path))
    }

    /// Imports ordered by alias.
    pub fn iter(&self) -> impl Iterator<Item = &Import> {
        self.by_alias.values()
    }

    pub fn len(&self) -> usize {
        self.by_path.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_path.is_empty()
    }

    fn is_taken(&self, alias: &str) -> bool {
        self.by_alias.contains_key(alias) || RESERVED.contains(&alias)
    }

    fn unique_alias(&self, alias: &str) -> String {
        let mut n = 0usize;
        loop {
            let candidate = format!("{}{}", alias, alias_suffix(n));
            if !self.is_taken(&candidate) {
                return candidate;
            }
            n += 1;
        }
    }
}

/// Bijective base-26 suffix: 0 -> "a", 25 -> "z", 26 -> "aa".
fn alias_suffix(n: usize) -> String {
    let mut n = n + 1;
    let mut out = Vec::new();
    while n > 0 {
        n -= 1;
        out.push(b'a' + (n % 26) as u8);
        n /= 26;
    }
    out.reverse();
    String::from_utf8_lossy(&out).into_owned()
}

/// Strip everything up to and including the last `vendor/` segment.
pub fn vendorless_path(path: &str) -> &str {
    if let Some(i) = path.rfind("/vendor/") {
        return &path[i + "/vendor/".len()..];
    }
    path.strip_prefix("vendor/").unwrap_or(path)
}
