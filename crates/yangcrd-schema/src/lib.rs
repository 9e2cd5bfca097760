//! # yangcrd-schema — Resource Schema Compiler
//!
//! Compiles a selected schema subtree into the OpenAPI-style fragment that an
//! orchestration platform's resource definition embeds.
//!
//! ## Compilation (`compile`)
//!
//! - [`compile`] emits the fragment for one subtree in [`Mode::Spec`]
//!   (every data node) or [`Mode::Status`] (read-only nodes only, chosen by
//!   the partition pass).
//! - [`compile_module`] resolves the root/instance selection from
//!   [`CrdOptions`](yangcrd_core::CrdOptions) first.
//! - Children are emitted in lexicographic order of their raw schema names.
//!   Choices and cases are transparent; rpcs are skipped.
//!
//! ## Remote Procedures (`rpc`)
//!
//! [`compile_rpcs`] emits one boolean trigger plus `Input`/`Output` objects
//! per rpc, when the module declares any.
//!
//! ## Descriptors (`descriptor`)
//!
//! [`describe`] derives resource kind, plural, short names and key field.
//!
//! ## Validation (`validate`)
//!
//! [`FragmentValidator`] checks external-form instances against a compiled
//! fragment using the `jsonschema` crate.
//!
//! ## Crate Policy
//!
//! - Depends only on `yangcrd-core` internally.
//! - Fragments are built in memory and serialized once; nothing is written
//!   to an output sink while the tree is being walked.

pub mod compile;
pub mod descriptor;
pub mod fragment;
mod partition;
pub mod rpc;
pub mod validate;

pub use compile::{compile, compile_module};
pub use descriptor::{describe, resource_kind, short_names, CrdDescriptor};
pub use fragment::{CompiledFragment, Mode, Properties, SchemaFragment};
pub use rpc::compile_rpcs;
pub use validate::{FragmentValidationError, FragmentValidator, ValidationViolations, Violation};
