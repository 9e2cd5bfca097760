//! # Root/Instance Selection
//!
//! Resolves which subtree of a module one resource instance corresponds to.
//! A selection is a `root` (a top-level container or list) and an `instance`
//! (the root itself, or a container/list directly beneath it).
//!
//! Failures are terminal: [`CrdError::NodeNotFound`] when nothing matches or
//! the choice is ambiguous, [`CrdError::InvalidNode`] when a node matches by
//! name but has the wrong kind.

use serde::Serialize;

use crate::error::CrdError;
use crate::model::SchemaNode;

/// A resolved root/instance pair.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection<'a> {
    /// Raw name of the root node.
    pub root: String,
    /// Raw name of the instance node.
    pub instance: String,
    /// The instance subtree.
    pub node: &'a SchemaNode,
}

/// Shape of a top-level node offered as a root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CandidateShape {
    /// A top-level list: root and instance are the same node.
    List,
    /// A container without children: root and instance are the same node.
    SingleContainer,
    /// A container whose list children are the possible instances.
    Container,
}

/// One way a module could be selected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Candidate {
    pub shape: CandidateShape,
    pub root: String,
    pub instances: Vec<String>,
}

fn is_container_or_list(node: &SchemaNode) -> bool {
    node.is_container() || node.is_list()
}

fn data_nodes(module: &SchemaNode) -> impl Iterator<Item = &SchemaNode> {
    module
        .children()
        .into_iter()
        .flat_map(|c| c.values())
        .filter(|n| !n.is_rpc())
}

/// Resolve `root`/`instance` inside `module`.
///
/// An empty `root` and `instance` falls back to [`discover_instance`]. An
/// empty `instance` selects the root itself.
pub fn select_instance<'a>(
    module: &'a SchemaNode,
    root: &str,
    instance: &str,
) -> Result<Selection<'a>, CrdError> {
    if root.is_empty() {
        if instance.is_empty() {
            return discover_instance(module);
        }
        return Err(CrdError::NodeNotFound(format!(
            "instance '{instance}' given without a root node"
        )));
    }
    let instance = if instance.is_empty() { root } else { instance };

    let root_node = module
        .child(root)
        .filter(|n| !n.is_rpc())
        .ok_or_else(|| CrdError::NodeNotFound(format!("no root node '{root}' in module '{}'", module.name)))?;

    if !is_container_or_list(root_node) {
        return Err(CrdError::invalid_node(root, "root is not a container/list node"));
    }

    if root == instance {
        tracing::debug!(root, "root node is the instance node");
        return Ok(Selection {
            root: root.to_string(),
            instance: instance.to_string(),
            node: root_node,
        });
    }

    if root_node.is_list() {
        return Err(CrdError::invalid_node(
            root,
            format!("root is a list and does not match instance '{instance}'"),
        ));
    }

    let node = root_node
        .child(instance)
        .ok_or_else(|| CrdError::NodeNotFound(format!("no instance node '{instance}' under root '{root}'")))?;

    if !is_container_or_list(node) {
        return Err(CrdError::invalid_node(instance, "instance is not a container/list node"));
    }

    tracing::debug!(root, instance, "resolved instance node");
    Ok(Selection {
        root: root.to_string(),
        instance: instance.to_string(),
        node,
    })
}

/// Derive root and instance when the caller supplied neither.
///
/// The module must have exactly one top-level data node. A top-level list is
/// both root and instance. A container selects its only list child, or
/// itself when it has no list children.
pub fn discover_instance(module: &SchemaNode) -> Result<Selection<'_>, CrdError> {
    let roots: Vec<&SchemaNode> = data_nodes(module).collect();
    if roots.len() > 1 {
        return Err(CrdError::NodeNotFound(format!(
            "cannot derive root/instance node: module '{}' has {} root nodes",
            module.name,
            roots.len()
        )));
    }

    let Some(root) = roots.first().copied().filter(|n| is_container_or_list(n)) else {
        return Err(CrdError::NodeNotFound(format!(
            "could not find root/instance node in module '{}'",
            module.name
        )));
    };

    if root.is_list() {
        return Ok(Selection {
            root: root.name.clone(),
            instance: root.name.clone(),
            node: root,
        });
    }

    let lists: Vec<&SchemaNode> = root
        .children()
        .into_iter()
        .flat_map(|c| c.values())
        .filter(|n| n.is_list())
        .collect();

    match lists.as_slice() {
        [] => Ok(Selection {
            root: root.name.clone(),
            instance: root.name.clone(),
            node: root,
        }),
        [only] => Ok(Selection {
            root: root.name.clone(),
            instance: only.name.clone(),
            node: only,
        }),
        several => Err(CrdError::NodeNotFound(format!(
            "cannot derive instance node: root '{}' has multiple list nodes ({})",
            root.name,
            several.iter().map(|n| n.name.as_str()).collect::<Vec<_>>().join(", ")
        ))),
    }
}

/// Every root/instance pairing the module offers.
pub fn candidates(module: &SchemaNode) -> Vec<Candidate> {
    data_nodes(module)
        .filter_map(|node| {
            if node.is_list() {
                return Some(Candidate {
                    shape: CandidateShape::List,
                    root: node.name.clone(),
                    instances: vec![node.name.clone()],
                });
            }
            let children = node.children().filter(|_| node.is_container())?;
            if children.is_empty() {
                return Some(Candidate {
                    shape: CandidateShape::SingleContainer,
                    root: node.name.clone(),
                    instances: vec![node.name.clone()],
                });
            }
            let mut instances: Vec<String> =
                children.values().filter(|c| c.is_list()).map(|c| c.name.clone()).collect();
            if instances.is_empty() {
                instances.push(node.name.clone());
            }
            Some(Candidate {
                shape: CandidateShape::Container,
                root: node.name.clone(),
                instances,
            })
        })
        .collect()
}

/// Strict lookup of a list directly under a top-level container.
///
/// Returns the list node and the namespace that applies to it (the
/// container's, else the module's).
pub fn select_list_entry<'a>(
    module: &'a SchemaNode,
    container: &str,
    list: &str,
) -> Result<(&'a SchemaNode, Option<&'a str>), CrdError> {
    let container_node = module
        .child(container)
        .filter(|n| n.children().is_some())
        .ok_or_else(|| {
            CrdError::NodeNotFound(format!(
                "unable to find module '{}' with container node '{container}', list node '{list}'",
                module.name
            ))
        })?;

    if !container_node.is_container() {
        return Err(CrdError::invalid_node(container, "not a container node"));
    }

    let list_node = container_node.child(list).ok_or_else(|| {
        CrdError::NodeNotFound(format!("no list node '{list}' under container '{container}'"))
    })?;

    if !list_node.is_list() {
        return Err(CrdError::invalid_node(list, "not a list node"));
    }

    let namespace = container_node
        .namespace
        .as_deref()
        .or(module.namespace.as_deref());
    Ok((list_node, namespace))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{TypeInfo, TypeKind};

    fn leaf(name: &str) -> SchemaNode {
        SchemaNode::leaf(name, TypeInfo::new(TypeKind::String))
    }

    fn module() -> SchemaNode {
        SchemaNode::container(
            "example",
            [
                SchemaNode::container(
                    "interfaces",
                    [
                        SchemaNode::list("interface", "name", [leaf("name")]),
                        SchemaNode::container("defaults", [leaf("mtu")]),
                        leaf("count"),
                    ],
                ),
                SchemaNode::list("users", "id", [leaf("id")]),
                leaf("hostname"),
                SchemaNode::rpc("reboot", None, None),
            ],
        )
        .with_namespace("urn:example")
    }

    #[test]
    fn select_child_instance() {
        let m = module();
        let sel = select_instance(&m, "interfaces", "interface").unwrap();
        assert_eq!(sel.instance, "interface");
        assert!(sel.node.is_list());
    }

    #[test]
    fn select_root_as_instance() {
        let m = module();
        let sel = select_instance(&m, "interfaces", "").unwrap();
        assert_eq!(sel.instance, "interfaces");
        let sel = select_instance(&m, "users", "users").unwrap();
        assert!(sel.node.is_list());
    }

    #[test]
    fn missing_root_is_not_found() {
        let m = module();
        let err = select_instance(&m, "nope", "interface").unwrap_err();
        assert!(matches!(err, CrdError::NodeNotFound(_)));
    }

    #[test]
    fn missing_instance_is_not_found() {
        let m = module();
        let err = select_instance(&m, "interfaces", "nope").unwrap_err();
        assert!(matches!(err, CrdError::NodeNotFound(_)));
    }

    #[test]
    fn leaf_root_is_invalid() {
        let m = module();
        let err = select_instance(&m, "hostname", "hostname").unwrap_err();
        assert!(matches!(err, CrdError::InvalidNode { ref node, .. } if node == "hostname"));
    }

    #[test]
    fn rpc_is_not_a_root() {
        let m = module();
        let err = select_instance(&m, "reboot", "reboot").unwrap_err();
        assert!(matches!(err, CrdError::NodeNotFound(_)));
    }

    #[test]
    fn list_root_with_other_instance_is_invalid() {
        let m = module();
        let err = select_instance(&m, "users", "id").unwrap_err();
        assert!(matches!(err, CrdError::InvalidNode { ref node, .. } if node == "users"));
    }

    #[test]
    fn leaf_instance_is_invalid() {
        let m = module();
        let err = select_instance(&m, "interfaces", "count").unwrap_err();
        assert!(matches!(err, CrdError::InvalidNode { ref node, .. } if node == "count"));
    }

    #[test]
    fn discover_rejects_multiple_roots() {
        let err = discover_instance(&module()).unwrap_err();
        assert!(matches!(err, CrdError::NodeNotFound(_)));
    }

    #[test]
    fn discover_single_list_child() {
        let m = SchemaNode::container(
            "m",
            [SchemaNode::container(
                "interfaces",
                [SchemaNode::list("interface", "name", [leaf("name")]), leaf("count")],
            )],
        );
        let sel = discover_instance(&m).unwrap();
        assert_eq!((sel.root.as_str(), sel.instance.as_str()), ("interfaces", "interface"));

        // An rpc alongside does not count as a second root.
        let with_rpc = SchemaNode::container(
            "m",
            [SchemaNode::list("users", "", [leaf("id")]), SchemaNode::rpc("ping", None, None)],
        );
        let sel = select_instance(&with_rpc, "", "").unwrap();
        assert_eq!((sel.root.as_str(), sel.instance.as_str()), ("users", "users"));
    }

    #[test]
    fn discover_container_without_lists_selects_itself() {
        let m = SchemaNode::container("m", [SchemaNode::container("system", [leaf("hostname")])]);
        let sel = discover_instance(&m).unwrap();
        assert_eq!((sel.root.as_str(), sel.instance.as_str()), ("system", "system"));
    }

    #[test]
    fn discover_multiple_lists_is_ambiguous() {
        let m = SchemaNode::container(
            "m",
            [SchemaNode::container(
                "top",
                [SchemaNode::list("a", "", []), SchemaNode::list("b", "", [])],
            )],
        );
        let err = discover_instance(&m).unwrap_err();
        assert!(err.to_string().contains("a, b"), "got: {err}");
    }

    #[test]
    fn candidate_listing() {
        let list = candidates(&module());
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].root, "interfaces");
        assert_eq!(list[0].shape, CandidateShape::Container);
        assert_eq!(list[0].instances, vec!["interface"]);
        assert_eq!(list[1].shape, CandidateShape::List);
    }

    #[test]
    fn strict_list_entry_lookup() {
        let m = module();
        let (node, ns) = select_list_entry(&m, "interfaces", "interface").unwrap();
        assert_eq!(node.name, "interface");
        assert_eq!(ns, Some("urn:example"));

        assert!(matches!(
            select_list_entry(&m, "users", "id").unwrap_err(),
            CrdError::InvalidNode { .. }
        ));
        assert!(matches!(
            select_list_entry(&m, "interfaces", "defaults").unwrap_err(),
            CrdError::InvalidNode { .. }
        ));
        assert!(matches!(
            select_list_entry(&m, "missing", "interface").unwrap_err(),
            CrdError::NodeNotFound(_)
        ));
    }
}
