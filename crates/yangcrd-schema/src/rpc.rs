//! # RPC Compilation
//!
//! Remote procedures are not data and are skipped by the main walk. This pass
//! emits them as a separate spec fragment under `rpcs`: per procedure, sorted
//! by name, a boolean trigger plus optional `<name>Input` and `<name>Output`
//! objects. The input and output bodies carry no top-level `required`;
//! nested lists keep theirs.

use yangcrd_core::{to_display_name, NodeKind, SchemaNode};

use crate::compile::emit_node;
use crate::fragment::{CompiledFragment, Mode, Properties, SchemaFragment};

/// Compile the RPC fragment of `module`, or `None` if it declares no rpcs.
pub fn compile_rpcs(module: &SchemaNode) -> Option<CompiledFragment> {
    let children = module.children()?;

    let mut rpcs = Properties::new();
    for node in children.values() {
        let NodeKind::Rpc(info) = &node.kind else {
            continue;
        };
        let name = to_display_name(&node.name, false);
        rpcs.insert(name.clone(), SchemaFragment::scalar("boolean"));
        if let Some(input) = &info.input {
            rpcs.insert(format!("{name}Input"), emit_body(input));
        }
        if let Some(output) = &info.output {
            rpcs.insert(format!("{name}Output"), emit_body(output));
        }
    }

    if rpcs.is_empty() {
        return None;
    }
    tracing::debug!(module = %module.name, count = rpcs.len(), "compiled rpc fragment");

    let mut top = Properties::new();
    top.insert("rpcs".to_string(), SchemaFragment::object(rpcs));
    Some(CompiledFragment {
        mode: Mode::Spec,
        schema: SchemaFragment::object(top),
    })
}

/// Emit an rpc input or output node without key constraints at its top level.
fn emit_body(node: &SchemaNode) -> SchemaFragment {
    let mut fragment = emit_node(node);
    fragment.required.clear();
    if let Some(items) = fragment.items.as_mut() {
        items.required.clear();
    }
    fragment
}

#[cfg(test)]
mod tests {
    use super::*;
    use yangcrd_core::{TypeInfo, TypeKind};

    fn leaf(name: &str, kind: TypeKind) -> SchemaNode {
        SchemaNode::leaf(name, TypeInfo::new(kind))
    }

    fn module() -> SchemaNode {
        SchemaNode::container(
            "device",
            [
                SchemaNode::container("system", [leaf("hostname", TypeKind::String)]),
                SchemaNode::rpc(
                    "restart-port",
                    Some(SchemaNode::container("input", [leaf("port-id", TypeKind::Uint32)])),
                    Some(SchemaNode::container("output", [leaf("result", TypeKind::String)])),
                ),
                SchemaNode::rpc("factory-reset", None, None),
            ],
        )
    }

    #[test]
    fn module_without_rpcs_has_no_fragment() {
        let plain = SchemaNode::container("m", [leaf("x", TypeKind::String)]);
        assert!(compile_rpcs(&plain).is_none());
    }

    #[test]
    fn list_bodies_have_no_top_level_required() {
        let module = SchemaNode::container(
            "device",
            [SchemaNode::rpc(
                "clear-routes",
                Some(SchemaNode::list(
                    "route",
                    "prefix",
                    [
                        leaf("prefix", TypeKind::String),
                        SchemaNode::list("hop", "address", [leaf("address", TypeKind::String)]),
                    ],
                )),
                None,
            )],
        );
        let frag = compile_rpcs(&module).unwrap();
        let input = frag.schema.property("rpcs").unwrap().property("clearRoutesInput").unwrap();
        assert_eq!(input.schema_type, "array");
        let items = input.items.as_ref().unwrap();
        assert!(items.required.is_empty());
        assert!(items.property("prefix").is_some());

        // Lists nested inside the body keep their keys.
        let hop = items.property("hop").unwrap();
        assert_eq!(hop.items.as_ref().unwrap().required, vec!["address"]);
    }

    #[test]
    fn emits_trigger_input_output_in_name_order() {
        let frag = compile_rpcs(&module()).unwrap();
        assert_eq!(frag.mode, Mode::Spec);
        let rpcs = frag.schema.property("rpcs").unwrap();
        assert_eq!(
            rpcs.properties.as_ref().unwrap().names(),
            vec!["factoryReset", "restartPort", "restartPortInput", "restartPortOutput"]
        );
        assert_eq!(rpcs.property("restartPort").unwrap().schema_type, "boolean");
        let input = rpcs.property("restartPortInput").unwrap();
        assert_eq!(input.property("portId").unwrap().schema_type, "integer");
    }

    #[test]
    fn yaml_shape() {
        let yaml = compile_rpcs(&module()).unwrap().to_yaml().unwrap();
        assert!(yaml.starts_with("spec:\n  properties:\n    rpcs:\n      properties:\n        factoryReset:\n          type: boolean\n"));
        assert!(yaml.ends_with("      type: object\n  type: object\n"));
    }
}
