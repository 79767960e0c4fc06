//! Type reference resolution.
//!
//! Two passes over the same closed set of [`TypeShape`] variants, the way
//! the stub generator collects imports before emitting code:
//!
//! 1. [`register_type`] walks a shape and registers every module it
//!    mentions in the [`AliasTable`].
//! 2. [`TypePrinter`] spells a shape for generated code, qualifying named
//!    types with their alias. It only reads the table.

use crate::alias::AliasTable;
use fakegen_types::{ChanDir, ModuleRef, Signature, TypeShape};
use tracing::warn;

/// Visit every module reference inside `ty`, depth first.
pub fn walk_modules<F: FnMut(&ModuleRef)>(ty: &TypeShape, visit: &mut F) {
    match ty {
        TypeShape::Basic { .. } => {}
        TypeShape::Named { module: None, .. } => {}
        TypeShape::Named {
            module: Some(module),
            ..
        } => visit(module),
        TypeShape::Pointer { elem }
        | TypeShape::Slice { elem }
        | TypeShape::Array { elem, .. }
        | TypeShape::Chan { elem, .. } => walk_modules(elem, visit),
        TypeShape::Map { key, value } => {
            walk_modules(key, visit);
            walk_modules(value, visit);
        }
        TypeShape::Signature(sig) => walk_signature_modules(sig, visit),
        TypeShape::Interface { methods } => {
            for m in methods {
                walk_signature_modules(&m.signature, visit);
            }
        }
    }
}

/// Results first, then parameters.
pub fn walk_signature_modules<F: FnMut(&ModuleRef)>(sig: &Signature, visit: &mut F) {
    for r in &sig.results {
        walk_modules(r, visit);
    }
    for p in &sig.params {
        walk_modules(p, visit);
    }
}

pub fn register_type(imports: &mut AliasTable, ty: &TypeShape) {
    walk_modules(ty, &mut |module| {
        imports.add_module(module);
    });
}

pub fn register_signature(imports: &mut AliasTable, sig: &Signature) {
    walk_signature_modules(sig, &mut |module| {
        imports.add_module(module);
    });
}

/// Spells types against a finished alias table.
#[derive(Debug, Clone, Copy)]
pub struct TypePrinter<'a> {
    imports: &'a AliasTable,
}

impl<'a> TypePrinter<'a> {
    pub fn new(imports: &'a AliasTable) -> Self {
        Self { imports }
    }

    pub fn type_string(&self, ty: &TypeShape) -> String {
        match ty {
            TypeShape::Basic { name } => name.clone(),
            TypeShape::Named { name, module: None } => name.clone(),
            TypeShape::Named {
                name,
                module: Some(module),
            } => format!("{}.{}", self.qualifier(module), name),
            TypeShape::Pointer { elem } => format!("*{}", self.type_string(elem)),
            TypeShape::Slice { elem } => format!("[]{}", self.type_string(elem)),
            TypeShape::Array { len, elem } => format!("[{}]{}", len, self.type_string(elem)),
            TypeShape::Map { key, value } => format!(
                "map[{}]{}",
                self.type_string(key),
                self.type_string(value)
            ),
            TypeShape::Chan { dir, elem } => {
                let elem = self.type_string(elem);
                match dir {
                    ChanDir::Both => format!("chan {}", elem),
                    ChanDir::Send => format!("chan<- {}", elem),
                    ChanDir::Recv => format!("<-chan {}", elem),
                }
            }
            TypeShape::Signature(sig) => format!("func{}", self.signature_string(sig)),
            TypeShape::Interface { methods } => {
                let methods: Vec<String> = methods
                    .iter()
                    .map(|m| format!("{}{}", m.name, self.signature_string(&m.signature)))
                    .collect();
                format!("interface{{{}}}", methods.join("; "))
            }
        }
    }

    /// Type of parameter `index`, with the trailing variadic slice spelled
    /// `...T`. The flag says whether the parameter is variadic.
    pub fn param_string(&self, sig: &Signature, index: usize) -> (String, bool) {
        let ty = &sig.params[index];
        let is_variadic = sig.variadic && index + 1 == sig.params.len();
        if !is_variadic {
            return (self.type_string(ty), false);
        }
        let elem = match ty {
            TypeShape::Slice { elem } => self.type_string(elem),
            other => self.type_string(other),
        };
        (format!("...{}", elem), true)
    }

    /// `(params) results`, without the `func` keyword.
    pub fn signature_string(&self, sig: &Signature) -> String {
        let params: Vec<String> = (0..sig.params.len())
            .map(|i| self.param_string(sig, i).0)
            .collect();
        let results: Vec<String> = sig.results.iter().map(|r| self.type_string(r)).collect();
        match results.len() {
            0 => format!("({})", params.join(", ")),
            1 => format!("({}) {}", params.join(", "), results[0]),
            _ => format!("({}) ({})", params.join(", "), results.join(", ")),
        }
    }

    fn qualifier(&self, module: &ModuleRef) -> String {
        match self.imports.alias_for(&module.path) {
            Some(alias) => alias.to_string(),
            None => {
                warn!(module = %module.path, "printing a type from an unregistered module");
                module.short_name().to_string()
            }
        }
    }
}
