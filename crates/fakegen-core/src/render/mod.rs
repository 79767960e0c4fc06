//! Code generation.
//!
//! [`render`] is the single dispatch point over [`ContractKind`]. Every
//! shape works from the same normalized method list and a finished alias
//! table; nothing here registers imports.

pub mod function;
pub mod interface;
pub mod recorder;
pub mod shim;
pub mod signature;

use crate::alias::AliasTable;
use crate::contract::{Contract, ContractKind};
use crate::method_set::MethodSignature;
use crate::naming::is_exported;

/// First line of every generated file.
pub const GENERATED_HEADER: &str = "// Code generated by fakegen. DO NOT EDIT.";

/// Everything a renderer reads.
#[derive(Debug, Clone, Copy)]
pub struct RenderInput<'a> {
    pub contract: &'a Contract,
    pub methods: &'a [MethodSignature],
    pub imports: &'a AliasTable,
    pub fake_name: &'a str,
    pub destination_module: &'a str,
}

impl RenderInput<'_> {
    /// Alias of the contract's module, if it was registered.
    fn target_alias(&self) -> Option<&str> {
        self.imports.alias_for(&self.contract.module.path)
    }

    /// `alias.Target`, when the target is visible from another module.
    fn qualified_target(&self) -> Option<String> {
        if !is_exported(&self.contract.name) {
            return None;
        }
        self.target_alias()
            .map(|alias| format!("{}.{}", alias, self.contract.name))
    }
}

/// Whether the contract's own module has to be imported.
pub fn needs_target_import(contract: &Contract) -> bool {
    match contract.kind {
        ContractKind::ModuleShim { .. } => true,
        ContractKind::Interface(_) | ContractKind::Function(_) => is_exported(&contract.name),
    }
}

/// Render the full file text.
pub fn render(input: &RenderInput<'_>) -> String {
    let mut lines = header(input.destination_module, input.imports);

    let body = match &input.contract.kind {
        ContractKind::Interface(_) => interface::render_interface_fake(
            input.fake_name,
            input.methods,
            input.qualified_target().as_deref(),
        ),
        ContractKind::Function(_) => match input.methods.first() {
            Some(method) => function::render_function_fake(
                input.fake_name,
                method,
                input.qualified_target().as_deref(),
            ),
            None => Vec::new(),
        },
        ContractKind::ModuleShim { .. } => {
            let alias = input
                .target_alias()
                .unwrap_or_else(|| input.contract.module.short_name());
            shim::render_shim_and_fake(
                &input.contract.name,
                input.fake_name,
                &input.contract.module.path,
                alias,
                input.methods,
            )
        }
    };

    lines.extend(body);
    let mut text = lines.join("\n");
    text.push('\n');
    text
}

/// Header, package clause and import block.
pub fn header(destination_module: &str, imports: &AliasTable) -> Vec<String> {
    let mut lines = vec![
        GENERATED_HEADER.to_string(),
        String::new(),
        format!("package {}", destination_module),
        String::new(),
    ];
    if !imports.is_empty() {
        lines.push("import (".to_string());
        lines.extend(imports.iter().map(|i| format!("\t{}", i)));
        lines.push(")".to_string());
        lines.push(String::new());
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_lists_imports_by_alias() {
        let mut imports = AliasTable::new();
        imports.add("sync", "sync");
        imports.add("log", "github.com/acme/log");
        imports.add("log", "example.com/log");
        let text = header("storefakes", &imports).join("\n");
        assert_eq!(
            text,
            "// Code generated by fakegen. DO NOT EDIT.\n\
             \n\
             package storefakes\n\
             \n\
             import (\n\
             \t\"github.com/acme/log\"\n\
             \tloga \"example.com/log\"\n\
             \t\"sync\"\n\
             )\n"
        );
    }

    #[test]
    fn test_header_without_imports() {
        let lines = header("fakes", &AliasTable::new());
        assert_eq!(lines.last().map(String::as_str), Some(""));
        assert!(!lines.iter().any(|l| l.starts_with("import")));
    }
}
