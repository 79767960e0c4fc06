//! Fakegen Core
//!
//! Contract introspection and recorder-fake generation.
//!
//! Given a request naming an interface, a function type or a whole module,
//! this crate resolves the contract through an [`Introspector`], flattens
//! it into an ordered list of normalized method signatures, assigns import
//! aliases, and renders the source text of a fake that records every call
//! and returns configurable results.
//!
//! # Pipeline
//!
//! 1. [`contract`]: classify the target (interface, function, module shim)
//! 2. [`method_set`]: flatten and normalize methods, filling the [`AliasTable`]
//! 3. [`naming`]: fake type name and destination module
//! 4. [`render`]: one of three shapes from the same method list
//!
//! # Example
//!
//! ```ignore
//! use fakegen_core::{generate, GenerateRequest};
//! use fakegen_introspect::JsonModuleLoader;
//!
//! let request = GenerateRequest::fake("Fetcher", "./store", "storefakes")
//!     .with_working_dir(&cwd);
//! let artifact = generate(&request, &JsonModuleLoader::from_env())?;
//! std::fs::write("fake_fetcher.go", artifact.rendered_text)?;
//! ```

pub mod alias;
pub mod contract;
pub mod error;
pub mod method_set;
pub mod naming;
pub mod render;
pub mod request;
pub mod resolver;

pub use alias::{AliasTable, Import};
pub use contract::{resolve_contract, Contract, ContractKind};
pub use error::GenerateError;
pub use method_set::{MethodSignature, Param, Return};
pub use request::{GenerateRequest, RequestMode};

use fakegen_introspect::Introspector;
use naming::{fake_name, restrict_to_identifier, shim_module_name, FAKES_SUFFIX};
use render::{needs_target_import, RenderInput};
use tracing::info;

/// The output of one run. Either all of it is produced or none.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedArtifact {
    pub destination_module: String,
    pub fake_name: String,
    /// Name of the faked contract (the synthesized interface for shims).
    pub contract_name: String,
    pub methods: Vec<MethodSignature>,
    pub imports: AliasTable,
    pub rendered_text: String,
}

/// Run the whole pipeline for one request.
pub fn generate<I: Introspector>(
    request: &GenerateRequest,
    introspector: &I,
) -> Result<GeneratedArtifact, GenerateError> {
    let contract = resolve_contract(request, introspector)?;
    if !contract.kind.supports(request.mode) {
        return Err(GenerateError::GenerationUnsupported {
            requested: request.mode.to_string(),
            resolved: contract.kind.to_string(),
        });
    }

    let mut imports = AliasTable::new();
    imports.add("sync", "sync");
    if needs_target_import(&contract) {
        imports.add_module(&contract.module);
    }
    let methods = method_set::extract_methods(&contract, &mut imports);

    let fake = fake_name(&contract.name, request.fake_name.as_deref());
    let destination = destination_module(request, &contract);

    info!(
        "Writing fake {} for {} {} to module {}",
        fake,
        contract.kind,
        contract.name,
        destination
    );

    let rendered_text = render::render(&RenderInput {
        contract: &contract,
        methods: &methods,
        imports: &imports,
        fake_name: &fake,
        destination_module: &destination,
    });

    Ok(GeneratedArtifact {
        destination_module: destination,
        fake_name: fake,
        contract_name: contract.name,
        methods,
        imports,
        rendered_text,
    })
}

/// The request's destination, or one derived from the source module.
fn destination_module(request: &GenerateRequest, contract: &Contract) -> String {
    let explicit = restrict_to_identifier(&request.destination_module);
    if !explicit.is_empty() {
        return explicit;
    }
    let short = contract.module.short_name();
    match contract.kind {
        ContractKind::ModuleShim { .. } => shim_module_name(short),
        _ => format!("{}{}", restrict_to_identifier(short), FAKES_SUFFIX),
    }
}
