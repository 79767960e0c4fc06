//! Shared types for the fakegen workspace.
//!
//! This crate holds the model an introspection backend hands to the
//! generator: the declarations found in a module and the shapes of the
//! types they mention. It has no knowledge of aliases or rendering.
//!
//! ## Modules
//!
//! - [`shape`]: [`TypeShape`], [`Signature`] and [`MethodDecl`]
//! - [`module`]: [`ModuleDecl`], [`SymbolDecl`] and interface bodies
//! - [`type_parsing`]: parse a type spelling such as `map[string][]*io.Reader`

pub mod module;
pub mod shape;
pub mod type_parsing;

pub use module::{EmbeddedInterface, InterfaceDecl, ModuleDecl, SymbolDecl, SymbolKind};
pub use shape::{ChanDir, MethodDecl, ModuleRef, Signature, TypeShape};
pub use type_parsing::{parse_signature, parse_type_shape, TypeParseError};
