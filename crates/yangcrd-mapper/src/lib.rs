//! # yangcrd-mapper — Instance Data Mapper
//!
//! Moves instance data between the canonical form used on the wire (keys are
//! raw schema names) and the external form exposed in resources (keys are
//! camelCase display names).
//!
//! ## Modules
//!
//! - [`mapper`]: [`map_instance`] in either [`Direction`], with key folding,
//!   choice merging and scalar coercion.
//! - [`namespace`]: the [`NamespaceIndex`] trie and [`augment`], which add
//!   `xmlns` attributes for XML encoding.
//! - [`wire`]: [`to_wire_compatible`] and [`from_wire_compatible`], the two
//!   conversions applied around the XML codec.
//!
//! ## Reserved Keys
//!
//! Attributes are object keys prefixed with [`ATTRIBUTE_PREFIX`]. Text content
//! of an element that also carries attributes lives under [`TEXT_KEY`].
//!
//! ## Crate Policy
//!
//! - Mapping never fails. Unknown keys are dropped; unknown enumeration
//!   literals and shape mismatches are handled leniently and logged at
//!   debug level.
//! - Inputs are never mutated; every call builds a fresh value.

pub mod mapper;
pub mod namespace;
pub mod wire;

/// Prefix marking an object key as an XML attribute.
pub const ATTRIBUTE_PREFIX: &str = "-";

/// Object key holding the text content of a mixed-content element.
pub const TEXT_KEY: &str = "#text";

pub use mapper::{map_instance, Direction};
pub use namespace::{augment, NamespaceAttribute, NamespaceIndex};
pub use wire::{from_wire_compatible, to_wire_compatible, WireTarget};
