//! # Schema Node Model
//!
//! The immutable, tree-shaped schema produced by the external module
//! resolver. The compiler and the mapper only ever read it.
//!
//! ## Document Form
//!
//! The resolver hands the tree over as YAML or JSON. In that form children
//! are a sequence, which reads naturally:
//!
//! ```yaml
//! name: example
//! kind: container
//! namespace: urn:example
//! children:
//!   - name: interfaces
//!     kind: container
//!     children:
//!       - name: interface
//!         kind: list
//!         key: name
//!         children:
//!           - name: name
//!             kind: leaf
//!             type: { name: string }
//! ```
//!
//! On load the sequence becomes a `BTreeMap` keyed by raw name. Duplicate
//! names are rejected, as are children under leaves. A choice child that is
//! not a case is wrapped in an implicit case of the same name.
//!
//! ## Config Flag
//!
//! `config` is stored per node exactly as the resolver reported it. It is
//! not inherited here; inheritance of read-only semantics is computed by the
//! status partitioner.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::CrdError;

/// Primitive kind of a leaf type, as named by the modeling language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeKind {
    Int8,
    Int16,
    Int32,
    Int64,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    Decimal64,
    String,
    Boolean,
    Leafref,
    Bits,
    Enumeration,
    /// Any type name the tables do not know; treated as a string.
    #[serde(other)]
    Unknown,
}

impl TypeKind {
    /// The resource schema type word for this kind.
    ///
    /// All integer widths and bits map to `integer`, decimal64 to `number`,
    /// string and leafref to `string`, boolean to `boolean`. Everything else
    /// (enumeration included) is a `string`.
    pub fn schema_type(self) -> &'static str {
        match self {
            Self::Int8
            | Self::Int16
            | Self::Int32
            | Self::Int64
            | Self::Uint8
            | Self::Uint16
            | Self::Uint32
            | Self::Uint64
            | Self::Bits => "integer",
            Self::Decimal64 => "number",
            Self::Boolean => "boolean",
            Self::String | Self::Leafref | Self::Enumeration | Self::Unknown => "string",
        }
    }
}

/// Type information attached to a leaf or leaf-list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TypeInfo {
    /// Primitive kind.
    #[serde(rename = "name")]
    pub kind: TypeKind,
    /// Enumeration literals in declaration order. Empty unless `kind` is
    /// `Enumeration`.
    #[serde(default, rename = "enum", skip_serializing_if = "Vec::is_empty")]
    pub enum_values: Vec<String>,
    /// Range expression as written in the model (`1..10`, `0..63 | 100`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<String>,
}

impl TypeInfo {
    /// A plain type with no enumeration literals or range.
    pub fn new(kind: TypeKind) -> Self {
        Self {
            kind,
            enum_values: Vec::new(),
            range: None,
        }
    }

    /// An enumeration with the given literals.
    pub fn enumeration<I, S>(literals: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            kind: TypeKind::Enumeration,
            enum_values: literals.into_iter().map(Into::into).collect(),
            range: None,
        }
    }

    /// Attach a range expression.
    pub fn with_range(mut self, range: impl Into<String>) -> Self {
        self.range = Some(range.into());
        self
    }

    /// Whether this is an enumeration type.
    pub fn is_enumeration(&self) -> bool {
        self.kind == TypeKind::Enumeration
    }

    /// The bounds of the range when it is a single, fully numeric interval.
    ///
    /// `1..10` gives `(1, 10)` and `5` gives `(5, 5)`. Multiple intervals,
    /// symbolic bounds such as `min`/`max`, and inverted intervals give `None`.
    pub fn single_range(&self) -> Option<(i64, i64)> {
        let range = self.range.as_deref()?;
        let mut parts = range.split('|');
        let only = parts.next()?.trim();
        if parts.next().is_some() {
            return None;
        }
        let (min, max) = match only.split_once("..") {
            Some((lo, hi)) => (lo.trim().parse::<i64>().ok()?, hi.trim().parse::<i64>().ok()?),
            None => {
                let v = only.parse::<i64>().ok()?;
                (v, v)
            }
        };
        (min <= max).then_some((min, max))
    }
}

/// Repetition attributes of a list or leaf-list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListInfo {
    /// Whitespace-separated key field names. May be empty.
    #[serde(default)]
    pub key: String,
}

impl ListInfo {
    /// A list keyed by the given specification.
    pub fn keyed(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    /// The individual key field names.
    pub fn keys(&self) -> Vec<&str> {
        self.key.split_whitespace().collect()
    }
}

/// Input and output of a remote procedure.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RpcInfo {
    pub input: Option<Box<SchemaNode>>,
    pub output: Option<Box<SchemaNode>>,
}

/// The kind of a schema node, with the data that only that kind carries.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    Container {
        children: BTreeMap<String, SchemaNode>,
    },
    List {
        children: BTreeMap<String, SchemaNode>,
        list: ListInfo,
    },
    Leaf {
        type_info: Option<TypeInfo>,
    },
    LeafList {
        type_info: Option<TypeInfo>,
        list: ListInfo,
    },
    Choice {
        cases: BTreeMap<String, SchemaNode>,
    },
    Case {
        children: BTreeMap<String, SchemaNode>,
    },
    Rpc(RpcInfo),
}

/// One node of the schema tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "NodeDocument", into = "NodeDocument")]
pub struct SchemaNode {
    /// Identifier in source-model spelling.
    pub name: String,
    pub kind: NodeKind,
    /// `true` for writable configuration, `false` for read-only state.
    pub config: bool,
    /// Module namespace URI, normally only set on the module root.
    pub namespace: Option<String>,
    pub description: Option<String>,
}

fn keyed(nodes: impl IntoIterator<Item = SchemaNode>) -> BTreeMap<String, SchemaNode> {
    nodes.into_iter().map(|n| (n.name.clone(), n)).collect()
}

impl SchemaNode {
    fn with_kind(name: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            config: true,
            namespace: None,
            description: None,
        }
    }

    /// A container node.
    pub fn container(name: impl Into<String>, children: impl IntoIterator<Item = SchemaNode>) -> Self {
        Self::with_kind(
            name,
            NodeKind::Container {
                children: keyed(children),
            },
        )
    }

    /// A list node keyed by `key` (whitespace-separated, may be empty).
    pub fn list(
        name: impl Into<String>,
        key: impl Into<String>,
        children: impl IntoIterator<Item = SchemaNode>,
    ) -> Self {
        Self::with_kind(
            name,
            NodeKind::List {
                children: keyed(children),
                list: ListInfo::keyed(key),
            },
        )
    }

    /// A leaf node.
    pub fn leaf(name: impl Into<String>, type_info: TypeInfo) -> Self {
        Self::with_kind(
            name,
            NodeKind::Leaf {
                type_info: Some(type_info),
            },
        )
    }

    /// A leaf-list node.
    pub fn leaf_list(name: impl Into<String>, type_info: TypeInfo) -> Self {
        Self::with_kind(
            name,
            NodeKind::LeafList {
                type_info: Some(type_info),
                list: ListInfo::default(),
            },
        )
    }

    /// A choice node over the given cases.
    pub fn choice(name: impl Into<String>, cases: impl IntoIterator<Item = SchemaNode>) -> Self {
        Self::with_kind(name, NodeKind::Choice { cases: keyed(cases) })
    }

    /// A case node.
    pub fn case(name: impl Into<String>, children: impl IntoIterator<Item = SchemaNode>) -> Self {
        Self::with_kind(
            name,
            NodeKind::Case {
                children: keyed(children),
            },
        )
    }

    /// A remote procedure.
    pub fn rpc(name: impl Into<String>, input: Option<SchemaNode>, output: Option<SchemaNode>) -> Self {
        Self::with_kind(
            name,
            NodeKind::Rpc(RpcInfo {
                input: input.map(Box::new),
                output: output.map(Box::new),
            }),
        )
    }

    /// Set the config flag.
    pub fn with_config(mut self, config: bool) -> Self {
        self.config = config;
        self
    }

    /// Mark the node read-only (`config false`).
    pub fn read_only(self) -> Self {
        self.with_config(false)
    }

    /// Set the namespace URI.
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    /// Whether this node is read-only state.
    pub fn is_read_only(&self) -> bool {
        !self.config
    }

    /// Child nodes, keyed by raw name. For a choice these are its cases.
    /// Leaves, leaf-lists and rpcs have none.
    pub fn children(&self) -> Option<&BTreeMap<String, SchemaNode>> {
        match &self.kind {
            NodeKind::Container { children }
            | NodeKind::List { children, .. }
            | NodeKind::Case { children } => Some(children),
            NodeKind::Choice { cases } => Some(cases),
            NodeKind::Leaf { .. } | NodeKind::LeafList { .. } | NodeKind::Rpc(_) => None,
        }
    }

    /// Look up a direct child by raw name.
    pub fn child(&self, name: &str) -> Option<&SchemaNode> {
        self.children().and_then(|c| c.get(name))
    }

    /// Repetition attributes, present only on lists and leaf-lists.
    pub fn list_info(&self) -> Option<&ListInfo> {
        match &self.kind {
            NodeKind::List { list, .. } | NodeKind::LeafList { list, .. } => Some(list),
            _ => None,
        }
    }

    /// Type information, present only on leaves and leaf-lists.
    pub fn type_info(&self) -> Option<&TypeInfo> {
        match &self.kind {
            NodeKind::Leaf { type_info } | NodeKind::LeafList { type_info, .. } => type_info.as_ref(),
            _ => None,
        }
    }

    pub fn is_container(&self) -> bool {
        matches!(self.kind, NodeKind::Container { .. })
    }

    pub fn is_list(&self) -> bool {
        matches!(self.kind, NodeKind::List { .. })
    }

    pub fn is_rpc(&self) -> bool {
        matches!(self.kind, NodeKind::Rpc(_))
    }

    /// Whether any node beneath this one is read-only. Rpcs are not data
    /// nodes and are not searched.
    pub fn has_read_only_descendant(&self) -> bool {
        self.children().is_some_and(|children| {
            children
                .values()
                .filter(|c| !c.is_rpc())
                .any(|c| c.is_read_only() || c.has_read_only_descendant())
        })
    }

    /// Parse a schema tree from its YAML document form.
    pub fn from_yaml_str(s: &str) -> Result<Self, CrdError> {
        Ok(serde_yaml::from_str(s)?)
    }

    /// Parse a schema tree from its JSON document form.
    pub fn from_json_str(s: &str) -> Result<Self, CrdError> {
        Ok(serde_json::from_str(s)?)
    }

    /// Load a schema tree from a file. `.json` files are read as JSON,
    /// anything else as YAML.
    pub fn load(path: &Path) -> Result<Self, CrdError> {
        let content = std::fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json_str(&content),
            _ => Self::from_yaml_str(&content),
        }
    }
}

/// Kind tag used in the document form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
enum KindTag {
    Container,
    List,
    Leaf,
    LeafList,
    Choice,
    Case,
    Rpc,
}

/// The serialized shape of a [`SchemaNode`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct NodeDocument {
    name: String,
    kind: KindTag,
    #[serde(default = "default_config")]
    config: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    namespace: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    type_info: Option<TypeInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    key: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    children: Vec<NodeDocument>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    input: Option<Box<NodeDocument>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    output: Option<Box<NodeDocument>>,
}

fn default_config() -> bool {
    true
}

fn convert_children(
    parent: &str,
    docs: Vec<NodeDocument>,
) -> Result<BTreeMap<String, SchemaNode>, CrdError> {
    let mut children = BTreeMap::new();
    for doc in docs {
        let node = SchemaNode::try_from(doc)?;
        if children.contains_key(&node.name) {
            return Err(CrdError::InvalidSchema(format!(
                "duplicate child '{}' under '{parent}'",
                node.name
            )));
        }
        children.insert(node.name.clone(), node);
    }
    Ok(children)
}

impl TryFrom<NodeDocument> for SchemaNode {
    type Error = CrdError;

    fn try_from(doc: NodeDocument) -> Result<Self, Self::Error> {
        let name = doc.name;
        let leaf_like = matches!(doc.kind, KindTag::Leaf | KindTag::LeafList);
        if leaf_like && !doc.children.is_empty() {
            return Err(CrdError::InvalidSchema(format!("leaf '{name}' cannot have children")));
        }
        if doc.kind != KindTag::Rpc && (doc.input.is_some() || doc.output.is_some()) {
            return Err(CrdError::InvalidSchema(format!(
                "only rpc nodes carry input/output, found on '{name}'"
            )));
        }

        let kind = match doc.kind {
            KindTag::Container => NodeKind::Container {
                children: convert_children(&name, doc.children)?,
            },
            KindTag::List => NodeKind::List {
                children: convert_children(&name, doc.children)?,
                list: ListInfo::keyed(doc.key.unwrap_or_default()),
            },
            KindTag::Leaf => NodeKind::Leaf {
                type_info: doc.type_info,
            },
            KindTag::LeafList => NodeKind::LeafList {
                type_info: doc.type_info,
                list: ListInfo::keyed(doc.key.unwrap_or_default()),
            },
            KindTag::Choice => {
                let mut cases = convert_children(&name, doc.children)?;
                // Shorthand: a data node directly under a choice is its own case.
                for (case_name, node) in cases.iter_mut() {
                    if !matches!(node.kind, NodeKind::Case { .. }) {
                        let inner = std::mem::replace(node, SchemaNode::case(case_name.clone(), []));
                        *node = SchemaNode::case(case_name.clone(), [inner]);
                    }
                }
                NodeKind::Choice { cases }
            }
            KindTag::Case => NodeKind::Case {
                children: convert_children(&name, doc.children)?,
            },
            KindTag::Rpc => NodeKind::Rpc(RpcInfo {
                input: doc.input.map(|d| SchemaNode::try_from(*d).map(Box::new)).transpose()?,
                output: doc.output.map(|d| SchemaNode::try_from(*d).map(Box::new)).transpose()?,
            }),
        };

        Ok(Self {
            name,
            kind,
            config: doc.config,
            namespace: doc.namespace,
            description: doc.description,
        })
    }
}

fn documents(children: &BTreeMap<String, SchemaNode>) -> Vec<NodeDocument> {
    children.values().cloned().map(NodeDocument::from).collect()
}

impl From<SchemaNode> for NodeDocument {
    fn from(node: SchemaNode) -> Self {
        let mut doc = NodeDocument {
            name: node.name,
            kind: KindTag::Container,
            config: node.config,
            namespace: node.namespace,
            description: node.description,
            type_info: None,
            key: None,
            children: Vec::new(),
            input: None,
            output: None,
        };
        let non_empty = |list: &ListInfo| (!list.key.is_empty()).then(|| list.key.clone());
        match node.kind {
            NodeKind::Container { children } => doc.children = documents(&children),
            NodeKind::List { children, list } => {
                doc.kind = KindTag::List;
                doc.key = non_empty(&list);
                doc.children = documents(&children);
            }
            NodeKind::Leaf { type_info } => {
                doc.kind = KindTag::Leaf;
                doc.type_info = type_info;
            }
            NodeKind::LeafList { type_info, list } => {
                doc.kind = KindTag::LeafList;
                doc.type_info = type_info;
                doc.key = non_empty(&list);
            }
            NodeKind::Choice { cases } => {
                doc.kind = KindTag::Choice;
                doc.children = documents(&cases);
            }
            NodeKind::Case { children } => {
                doc.kind = KindTag::Case;
                doc.children = documents(&children);
            }
            NodeKind::Rpc(rpc) => {
                doc.kind = KindTag::Rpc;
                doc.input = rpc.input.map(|n| Box::new(NodeDocument::from(*n)));
                doc.output = rpc.output.map(|n| Box::new(NodeDocument::from(*n)));
            }
        }
        doc
    }
}
