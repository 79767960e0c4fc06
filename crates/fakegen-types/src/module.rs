//! Module-level declarations.
//!
//! A [`ModuleDecl`] is what an introspection backend knows about one
//! module: its declared types (interfaces, function types and anything
//! else) and its top-level functions, in declaration order.

use crate::shape::{MethodDecl, ModuleRef, Signature};
use serde::{Deserialize, Serialize};

/// Body of an interface type.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct InterfaceDecl {
    /// Methods declared directly on the interface.
    #[serde(default)]
    pub methods: Vec<MethodDecl>,
    /// Embedded interfaces, already resolved by the backend.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub embeds: Vec<EmbeddedInterface>,
}

impl InterfaceDecl {
    pub fn new(methods: Vec<MethodDecl>) -> Self {
        Self {
            methods,
            embeds: Vec::new(),
        }
    }

    pub fn embed(mut self, name: impl Into<String>, interface: InterfaceDecl) -> Self {
        self.embeds.push(EmbeddedInterface {
            name: name.into(),
            module: None,
            interface,
        });
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbeddedInterface {
    pub name: String,
    /// Declaring module, when it differs from the embedding one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module: Option<ModuleRef>,
    #[serde(flatten)]
    pub interface: InterfaceDecl,
}

/// What a declared type turned out to be.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SymbolKind {
    Interface(InterfaceDecl),
    /// A function type: a callable signature with no receiver.
    Function(Signature),
    /// Structs, aliases of basic types, constants and the like.
    Other {
        #[serde(default)]
        description: String,
    },
}

impl SymbolKind {
    pub fn describe(&self) -> &str {
        match self {
            SymbolKind::Interface(_) => "interface",
            SymbolKind::Function(_) => "function",
            SymbolKind::Other { description } if !description.is_empty() => description.as_str(),
            SymbolKind::Other { .. } => "non-interface, non-function type",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolDecl {
    pub name: String,
    #[serde(flatten)]
    pub kind: SymbolKind,
}

impl SymbolDecl {
    pub fn interface(name: impl Into<String>, decl: InterfaceDecl) -> Self {
        Self {
            name: name.into(),
            kind: SymbolKind::Interface(decl),
        }
    }

    pub fn function(name: impl Into<String>, signature: Signature) -> Self {
        Self {
            name: name.into(),
            kind: SymbolKind::Function(signature),
        }
    }

    pub fn other(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: SymbolKind::Other {
                description: description.into(),
            },
        }
    }
}

/// Everything known about one module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleDecl {
    pub path: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(default)]
    pub types: Vec<SymbolDecl>,
    /// Top-level functions, exported or not, in declaration order.
    #[serde(default)]
    pub functions: Vec<MethodDecl>,
    /// Errors reported by whatever produced this description.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub diagnostics: Vec<String>,
}

impl ModuleDecl {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            name: String::new(),
            types: Vec::new(),
            functions: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    pub fn module_ref(&self) -> ModuleRef {
        ModuleRef::with_name(self.path.clone(), self.name.clone())
    }

    pub fn short_name(&self) -> String {
        self.module_ref().short_name().to_string()
    }

    pub fn lookup(&self, name: &str) -> Option<&SymbolDecl> {
        self.types.iter().find(|s| s.name == name)
    }

    pub fn with_type(mut self, symbol: SymbolDecl) -> Self {
        self.types.push(symbol);
        self
    }

    pub fn with_function(mut self, name: impl Into<String>, signature: Signature) -> Self {
        self.functions.push(MethodDecl::new(name, signature));
        self
    }
}
