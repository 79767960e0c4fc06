//! Sanity checks shared by every backend.

use crate::Diagnostic;
use fakegen_types::ModuleDecl;
use std::collections::BTreeSet;

/// Diagnostics for a module description: whatever the producer reported,
/// followed by structural problems found here.
pub fn module_diagnostics(decl: &ModuleDecl) -> Vec<Diagnostic> {
    let mut out: Vec<Diagnostic> = decl
        .diagnostics
        .iter()
        .map(|d| Diagnostic::new(d.trim_start_matches("-: ").to_string()))
        .collect();

    if decl.path.trim().is_empty() {
        out.push(Diagnostic::new("module description has an empty path"));
    }

    let mut seen = BTreeSet::new();
    for symbol in &decl.types {
        if symbol.name.trim().is_empty() {
            out.push(Diagnostic::at(&decl.path, "type with an empty name"));
        } else if !seen.insert(symbol.name.as_str()) {
            out.push(Diagnostic::at(
                &decl.path,
                format!("{} redeclared in this module", symbol.name),
            ));
        }
    }

    let mut seen_funcs = BTreeSet::new();
    for func in &decl.functions {
        if func.name.trim().is_empty() {
            out.push(Diagnostic::at(&decl.path, "function with an empty name"));
        } else if !seen_funcs.insert(func.name.as_str()) || seen.contains(func.name.as_str()) {
            out.push(Diagnostic::at(
                &decl.path,
                format!("{} redeclared in this module", func.name),
            ));
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use fakegen_types::{InterfaceDecl, Signature, SymbolDecl};

    #[test]
    fn test_clean_module_has_no_diagnostics() {
        let decl = ModuleDecl::new("example.com/store")
            .with_type(SymbolDecl::interface("Fetcher", InterfaceDecl::default()))
            .with_function("Open", Signature::default());
        assert!(module_diagnostics(&decl).is_empty());
    }

    #[test]
    fn test_reported_diagnostics_come_first_and_lose_prefix() {
        let mut decl = ModuleDecl::new("example.com/store")
            .with_type(SymbolDecl::other("Item", "struct"))
            .with_type(SymbolDecl::other("Item", "struct"));
        decl.diagnostics.push("-: undefined: Foo".to_string());

        let diags = module_diagnostics(&decl);
        assert_eq!(diags.len(), 2);
        assert_eq!(diags[0].to_string(), "undefined: Foo");
        assert_eq!(
            diags[1].to_string(),
            "example.com/store: Item redeclared in this module"
        );
    }

    #[test]
    fn test_function_clashing_with_type_is_reported() {
        let decl = ModuleDecl::new("example.com/store")
            .with_type(SymbolDecl::other("Open", "struct"))
            .with_function("Open", Signature::default());
        assert_eq!(module_diagnostics(&decl).len(), 1);
    }
}
