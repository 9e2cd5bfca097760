//! # yangcrd-core — Foundational Types for yangcrd
//!
//! This crate is the leaf of the yangcrd workspace. It holds the read-only
//! schema tree handed over by the external module resolver and the pure
//! helpers every other crate builds on.
//!
//! ## Key Design Principles
//!
//! 1. **Tagged node kinds.** `NodeKind` has one variant per schema node kind
//!    (container, list, leaf, leaf-list, choice, case, rpc). Every walk over the
//!    tree is an exhaustive `match`; adding a kind forces every consumer to
//!    handle it.
//!
//! 2. **Deterministic children.** Children live in a `BTreeMap` keyed by raw
//!    schema name, so iteration is always lexicographic regardless of the
//!    order the resolver produced them in.
//!
//! 3. **Explicit configuration.** `CrdOptions` is built once and passed down.
//!    No global state is read by the compiler or the mapper.
//!
//! 4. **Typed failures.** Selection and compilation failures are variants of
//!    `CrdError`, each fatal to the single invocation that raised it.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `yangcrd-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod error;
pub mod model;
pub mod naming;
pub mod options;
pub mod select;

// Re-export primary types for ergonomic imports.
pub use error::CrdError;
pub use model::{ListInfo, NodeKind, RpcInfo, SchemaNode, TypeInfo, TypeKind};
pub use naming::{fold_key, pluralize, to_display_name};
pub use options::{CrdOptions, DEFAULT_GROUP, INTERNAL_KEY, STATUS_KEY};
pub use select::{
    candidates, discover_instance, select_instance, select_list_entry, Candidate, CandidateShape, Selection,
};
