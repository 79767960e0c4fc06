//! Contract resolution: a thin adapter over the [`Introspector`].

use crate::error::GenerateError;
use crate::naming::export;
use crate::request::{GenerateRequest, RequestMode};
use fakegen_introspect::Introspector;
use fakegen_types::{InterfaceDecl, MethodDecl, ModuleRef, Signature, SymbolKind};
use std::fmt;
use tracing::{debug, warn};

/// What is being faked. Built once per run and never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct Contract {
    /// Target symbol, or the synthesized interface name for a shim.
    pub name: String,
    /// Module the contract is declared in.
    pub module: ModuleRef,
    pub kind: ContractKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ContractKind {
    Interface(InterfaceDecl),
    Function(Signature),
    /// Every top-level function of the module, exported or not, in
    /// declaration order. The extractor filters.
    ModuleShim { functions: Vec<MethodDecl> },
}

impl ContractKind {
    pub fn label(&self) -> &'static str {
        match self {
            ContractKind::Interface(_) => "interface",
            ContractKind::Function(_) => "function",
            ContractKind::ModuleShim { .. } => "module",
        }
    }

    /// Whether a request in `mode` can be rendered from this kind.
    pub fn supports(&self, mode: RequestMode) -> bool {
        matches!(
            (mode, self),
            (RequestMode::ModuleShim, ContractKind::ModuleShim { .. })
                | (RequestMode::InterfaceOrFunction, ContractKind::Interface(_))
                | (RequestMode::InterfaceOrFunction, ContractKind::Function(_))
        )
    }
}

impl fmt::Display for ContractKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Load the request's module and classify the target.
///
/// Any diagnostic reported for the module is fatal. All of them end up in
/// the error; every one after the first is also logged.
pub fn resolve_contract<I: Introspector>(
    request: &GenerateRequest,
    introspector: &I,
) -> Result<Contract, GenerateError> {
    let path = request.source_module_path.as_str();
    debug!(module = path, working_dir = %request.working_dir.display(), "resolving module");

    let (module, diagnostics) = introspector
        .resolve_module(path, &request.working_dir)
        .map_err(|e| GenerateError::module_load(path, vec![format!("{:#}", e)]))?;

    if !diagnostics.is_empty() {
        for extra in diagnostics.iter().skip(1) {
            warn!(module = path, "{}", extra);
        }
        return Err(GenerateError::module_load(
            path,
            diagnostics.iter().map(ToString::to_string).collect(),
        ));
    }

    let decl = module.decl();
    if request.mode == RequestMode::ModuleShim {
        let name = if request.target_name.trim().is_empty() {
            export(&decl.short_name())
        } else {
            request.target_name.clone()
        };
        debug!(module = %decl.path, functions = decl.functions.len(), "found module");
        return Ok(Contract {
            name,
            module: decl.module_ref(),
            kind: ContractKind::ModuleShim {
                functions: decl.functions.clone(),
            },
        });
    }

    let target = request.target_name.as_str();
    let symbol = introspector
        .lookup_symbol(&module, target)
        .ok_or_else(|| GenerateError::TargetNotFound {
            target: target.to_string(),
            module: path.to_string(),
        })?;

    let kind = match &symbol.kind {
        SymbolKind::Interface(iface) => ContractKind::Interface(iface.clone()),
        SymbolKind::Function(sig) => ContractKind::Function(sig.clone()),
        other @ SymbolKind::Other { .. } => {
            return Err(GenerateError::UnsupportedTargetKind {
                target: target.to_string(),
                kind: other.describe().to_string(),
            })
        }
    };
    debug!(target, kind = kind.label(), "found target");

    Ok(Contract {
        name: symbol.name.clone(),
        module: decl.module_ref(),
        kind,
    })
}
