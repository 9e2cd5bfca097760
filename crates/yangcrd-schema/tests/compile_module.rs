//! End-to-end compilation of a schema document loaded from YAML.

use serde_json::json;
use yangcrd_core::{CrdError, CrdOptions, SchemaNode};
use yangcrd_schema::{compile_module, compile_rpcs, describe, FragmentValidator, Mode};

const MODULE: &str = r#"
name: example-interfaces
kind: container
namespace: urn:example:interfaces
children:
  - name: interfaces
    kind: container
    children:
      - name: interface
        kind: list
        key: name
        children:
          - name: oper-status
            kind: leaf
            config: false
            type: { name: enumeration, enum: [up, down] }
          - name: name
            kind: leaf
            type: { name: string }
          - name: mtu
            kind: leaf
            type: { name: uint16, range: "68..9216" }
          - name: enabled
            kind: leaf
            type: { name: boolean }
  - name: clear-counters
    kind: rpc
"#;

fn options(config: bool) -> CrdOptions {
    let mut opts = CrdOptions::default();
    opts.apply_inline("root=interfaces,instance=interface");
    opts.config = config;
    opts
}

#[test]
fn spec_fragment_matches_expected_text() {
    let module = SchemaNode::from_yaml_str(MODULE).unwrap();
    let fragment = compile_module(&module, &options(true)).unwrap();
    assert_eq!(fragment.mode, Mode::Spec);

    let expected = "\
spec:
  properties:
    enabled:
      type: boolean
    mtu:
      type: integer
      minimum: 68
      maximum: 9216
    name:
      type: string
    operStatus:
      enum:
      - Up
      - Down
      type: string
  required:
  - name
  type: object
";
    assert_eq!(fragment.to_yaml().unwrap(), expected);
}

#[test]
fn status_fragment_matches_expected_text() {
    let module = SchemaNode::from_yaml_str(MODULE).unwrap();
    let fragment = compile_module(&module, &options(false)).unwrap();

    let expected = "\
status:
  properties:
    operStatus:
      enum:
      - Up
      - Down
      type: string
  type: object
";
    assert_eq!(fragment.to_yaml().unwrap(), expected);
}

#[test]
fn compilation_is_deterministic() {
    let module = SchemaNode::from_yaml_str(MODULE).unwrap();
    let first = compile_module(&module, &options(true)).unwrap().to_yaml().unwrap();
    let second = compile_module(&module, &options(true)).unwrap().to_yaml().unwrap();
    assert_eq!(first, second);
}

#[test]
fn unknown_root_produces_no_fragment() {
    let module = SchemaNode::from_yaml_str(MODULE).unwrap();
    let mut opts = CrdOptions::default();
    opts.apply_inline("root=routing");
    let err = compile_module(&module, &opts).unwrap_err();
    assert!(matches!(err, CrdError::NodeNotFound(_)));
}

#[test]
fn rpc_pass_is_separate() {
    let module = SchemaNode::from_yaml_str(MODULE).unwrap();
    let rpcs = compile_rpcs(&module).unwrap();
    let yaml = rpcs.to_yaml().unwrap();
    assert!(yaml.contains("clearCounters:\n          type: boolean"));

    let spec = compile_module(&module, &options(true)).unwrap().to_yaml().unwrap();
    assert!(!spec.contains("clearCounters"));
}

#[test]
fn descriptor_and_validation_agree_on_selection() {
    let module = SchemaNode::from_yaml_str(MODULE).unwrap();
    let opts = options(true);

    let descriptor = describe(&module, &opts).unwrap();
    assert_eq!(descriptor.kind, "Interface");
    assert_eq!(descriptor.key_field, "name");
    assert_eq!(descriptor.short_names, vec!["int"]);

    let fragment = compile_module(&module, &opts).unwrap();
    let validator = FragmentValidator::new(descriptor.kind.as_str(), &fragment).unwrap();
    validator
        .validate(&json!({"name": "eth0", "mtu": 9000, "enabled": true}))
        .unwrap();
    assert!(!validator.is_valid(&json!({"name": "eth0", "mtu": 10})));
}
