//! Method-set extraction.
//!
//! Turns a resolved [`Contract`] into the ordered list of normalized
//! [`MethodSignature`]s every renderer works from. The list is built in
//! full, and the alias table filled, before anything is rendered.

use crate::alias::AliasTable;
use crate::contract::{Contract, ContractKind};
use crate::naming::{arg_name, is_exported, result_name};
use crate::resolver::{register_signature, TypePrinter};
use fakegen_types::{InterfaceDecl, MethodDecl, Signature};
use std::collections::HashSet;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    /// Positional name, `arg1`...
    pub name: String,
    /// Printed type; a variadic parameter reads `...T`.
    pub type_ref: String,
    pub is_variadic: bool,
    /// Slices are copied before being recorded.
    pub is_slice: bool,
}

impl Param {
    /// Type used where the argument is stored: `...T` becomes `[]T`.
    pub fn storage_type(&self) -> String {
        match self.type_ref.strip_prefix("...") {
            Some(elem) if self.is_variadic => format!("[]{}", elem),
            _ => self.type_ref.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Return {
    /// Positional name, `result1`...
    pub name: String,
    pub type_ref: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodSignature {
    pub name: String,
    pub params: Vec<Param>,
    pub returns: Vec<Return>,
}

/// Flattened method set of an interface.
///
/// Embedded interfaces are walked level by level, so a method declared
/// closer to the contract shadows one of the same name further down, and
/// a name reached through two embedding paths appears once. Order is
/// discovery order.
pub fn interface_method_set(decl: &InterfaceDecl) -> Vec<&MethodDecl> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut out = Vec::new();
    let mut level: Vec<&InterfaceDecl> = vec![decl];

    while !level.is_empty() {
        let mut next = Vec::new();
        for iface in level {
            for method in &iface.methods {
                if seen.insert(method.name.as_str()) {
                    out.push(method);
                } else {
                    debug!(method = %method.name, "method already in set, skipping");
                }
            }
            next.extend(iface.embeds.iter().map(|e| &e.interface));
        }
        level = next;
    }
    out
}

/// Exported top-level functions, in declaration order.
pub fn exported_functions(functions: &[MethodDecl]) -> Vec<&MethodDecl> {
    functions.iter().filter(|f| is_exported(&f.name)).collect()
}

/// Raw `(name, signature)` pairs for a contract, before any printing.
pub fn raw_methods(contract: &Contract) -> Vec<(&str, &Signature)> {
    match &contract.kind {
        ContractKind::Interface(decl) => interface_method_set(decl)
            .into_iter()
            .map(|m| (m.name.as_str(), &m.signature))
            .collect(),
        ContractKind::Function(sig) => vec![(contract.name.as_str(), sig)],
        ContractKind::ModuleShim { functions } => exported_functions(functions)
            .into_iter()
            .map(|m| (m.name.as_str(), &m.signature))
            .collect(),
    }
}

/// Normalize one signature against a finished alias table.
pub fn method_for_signature(name: &str, sig: &Signature, imports: &AliasTable) -> MethodSignature {
    let printer = TypePrinter::new(imports);
    let params = (0..sig.params.len())
        .map(|i| {
            let (type_ref, is_variadic) = printer.param_string(sig, i);
            Param {
                name: arg_name(i),
                is_slice: type_ref.starts_with("[]"),
                type_ref,
                is_variadic,
            }
        })
        .collect();
    let returns = sig
        .results
        .iter()
        .enumerate()
        .map(|(i, ty)| Return {
            name: result_name(i),
            type_ref: printer.type_string(ty),
        })
        .collect();
    MethodSignature {
        name: name.to_string(),
        params,
        returns,
    }
}

/// Register every referenced module, then normalize every method.
pub fn extract_methods(contract: &Contract, imports: &mut AliasTable) -> Vec<MethodSignature> {
    let raw = raw_methods(contract);
    for (_, sig) in &raw {
        register_signature(imports, sig);
    }
    let methods: Vec<MethodSignature> = raw
        .into_iter()
        .map(|(name, sig)| method_for_signature(name, sig, imports))
        .collect();
    debug!(
        contract = %contract.name,
        methods = methods.len(),
        imports = imports.len(),
        "extracted method set"
    );
    methods
}

#[cfg(test)]
mod tests {
    use super::*;
    use fakegen_types::{parse_signature, ModuleRef};

    fn method(name: &str, sig: &str) -> MethodDecl {
        MethodDecl::new(name, parse_signature(sig).unwrap())
    }

    fn interface_contract(decl: InterfaceDecl) -> Contract {
        Contract {
            name: "Store".to_string(),
            module: ModuleRef::new("example.com/store"),
            kind: ContractKind::Interface(decl),
        }
    }

    #[test]
    fn test_same_method_through_two_embeds_appears_once() {
        let closer = InterfaceDecl::new(vec![method("Close", "() error")]);
        let reader = InterfaceDecl::new(vec![method("Read", "([]byte) (int, error)")])
            .embed("Closer", closer.clone());
        let writer = InterfaceDecl::new(vec![method("Write", "([]byte) (int, error)")])
            .embed("Closer", closer);
        let decl = InterfaceDecl::default()
            .embed("ReadCloser", reader)
            .embed("WriteCloser", writer);

        let names: Vec<&str> = interface_method_set(&decl)
            .iter()
            .map(|m| m.name.as_str())
            .collect();
        assert_eq!(names, vec!["Read", "Write", "Close"]);
    }

    #[test]
    fn test_shallower_declaration_wins() {
        let inner = InterfaceDecl::new(vec![method("Get", "(string) string")]);
        let decl = InterfaceDecl::new(vec![method("Get", "(string) (string, error)")])
            .embed("Inner", inner);
        let set = interface_method_set(&decl);
        assert_eq!(set.len(), 1);
        assert_eq!(set[0].signature.results.len(), 2);
    }

    #[test]
    fn test_empty_interface_has_no_methods() {
        let contract = interface_contract(InterfaceDecl::default());
        let mut imports = AliasTable::new();
        assert!(extract_methods(&contract, &mut imports).is_empty());
    }

    #[test]
    fn test_function_contract_is_one_method_named_after_it() {
        let contract = Contract {
            name: "Add".to_string(),
            module: ModuleRef::new("example.com/calc"),
            kind: ContractKind::Function(parse_signature("(int, int) int").unwrap()),
        };
        let mut imports = AliasTable::new();
        let methods = extract_methods(&contract, &mut imports);
        assert_eq!(methods.len(), 1);
        assert_eq!(methods[0].name, "Add");
        assert_eq!(methods[0].params.len(), 2);
        assert_eq!(methods[0].returns.len(), 1);
    }

    #[test]
    fn test_module_shim_keeps_only_exported_functions_in_order() {
        let contract = Contract {
            name: "Os".to_string(),
            module: ModuleRef::new("os"),
            kind: ContractKind::ModuleShim {
                functions: vec![
                    method("Getenv", "(string) string"),
                    method("lookup", "(string) bool"),
                    method("Chdir", "(string) error"),
                    method("_hidden", "()"),
                ],
            },
        };
        let mut imports = AliasTable::new();
        let names: Vec<String> = extract_methods(&contract, &mut imports)
            .into_iter()
            .map(|m| m.name)
            .collect();
        assert_eq!(names, vec!["Getenv", "Chdir"]);
    }

    #[test]
    fn test_positional_names_and_flags() {
        let contract = interface_contract(InterfaceDecl::new(vec![method(
            "Put",
            "(context.Context, []byte, ...example.com/store.Option) (int, error)",
        )]));
        let mut imports = AliasTable::new();
        let methods = extract_methods(&contract, &mut imports);
        let put = &methods[0];

        let names: Vec<&str> = put.params.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["arg1", "arg2", "arg3"]);
        assert_eq!(put.params[0].type_ref, "context.Context");
        assert!(put.params[1].is_slice);
        assert!(!put.params[1].is_variadic);
        assert!(put.params[2].is_variadic);
        assert!(!put.params[2].is_slice);
        assert_eq!(put.params[2].type_ref, "...store.Option");
        assert_eq!(put.params[2].storage_type(), "[]store.Option");
        assert_eq!(put.returns[0].name, "result1");
        assert_eq!(put.returns[1].type_ref, "error");

        assert!(imports.contains_path("context"));
        assert!(imports.contains_path("example.com/store"));
    }
}
