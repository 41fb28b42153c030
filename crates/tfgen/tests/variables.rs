//! Variable declarations for a data model using every supported shape

use pretty_assertions::assert_eq;
use tfgen::schema::{FieldSpec, ObjectSchema, Schema, TypeRef};
use tfgen::terraform::Terraform;
use tfgen::value::Value;
use tfgen::variables::{emit_variables, variables_from_schema, VariablesFormat};

#[derive(serde::Serialize)]
struct NestedModel {
    field: String,
    numeric: i64,
}

impl Schema for NestedModel {
    fn schema() -> ObjectSchema {
        ObjectSchema::new()
            .field(FieldSpec::new("field", TypeRef::STRING).with_default("default"))
            .field(FieldSpec::new("numeric", TypeRef::NUMBER))
    }
}

struct NestedNestedModel;

impl Schema for NestedNestedModel {
    fn schema() -> ObjectSchema {
        ObjectSchema::new().field(FieldSpec::new(
            "nested_items",
            TypeRef::list(TypeRef::of::<NestedModel>()),
        ))
    }
}

struct SampleModel;

impl Schema for SampleModel {
    fn schema() -> ObjectSchema {
        let nested = TypeRef::of::<NestedModel>;

        ObjectSchema::new()
            .field(FieldSpec::new("name", TypeRef::STRING))
            .field(FieldSpec::new("str_with_default", TypeRef::STRING).with_default("default"))
            .field(FieldSpec::new("counter", TypeRef::NUMBER).with_default(0))
            .field(FieldSpec::new("enabled", TypeRef::BOOL).with_default(true))
            .field(
                FieldSpec::new("empty_list", TypeRef::list(TypeRef::NUMBER))
                    .with_default(Vec::<i64>::new()),
            )
            .field(
                FieldSpec::new("empty_set", TypeRef::set(TypeRef::NUMBER))
                    .with_default(std::collections::BTreeSet::<i64>::new()),
            )
            .field(
                FieldSpec::new("empty_dict", TypeRef::map(TypeRef::NUMBER))
                    .with_default(Value::object()),
            )
            .field(
                FieldSpec::new("tags", TypeRef::optional(TypeRef::map(TypeRef::Any)))
                    .with_default(Value::Null),
            )
            .field(
                FieldSpec::new("variants", TypeRef::list(TypeRef::STRING))
                    .with_default(vec!["foo", "bar"]),
            )
            .field(
                FieldSpec::new("mode", TypeRef::literal(["auto", "manual"])).with_default("auto"),
            )
            .field(FieldSpec::new("nested", nested()))
            .field(
                FieldSpec::new("optional_nested", TypeRef::optional(nested()))
                    .with_default(Value::Null),
            )
            .field(
                FieldSpec::new("optional", TypeRef::optional(TypeRef::STRING))
                    .with_default(Value::Null),
            )
            .field(FieldSpec::new(
                "nested_nested",
                TypeRef::list(TypeRef::of::<NestedNestedModel>()),
            ))
            .field(
                FieldSpec::new("default_nested", nested())
                    .with_default_of(&NestedModel {
                        field: "default".into(),
                        numeric: 0,
                    })
                    .expect("serializable default"),
            )
            .field(
                FieldSpec::new(
                    "none_none",
                    TypeRef::union([TypeRef::STRING, TypeRef::Other("bytes".into())]),
                )
                .with_default(""),
            )
            .field(
                FieldSpec::new("field_with_description", TypeRef::optional(TypeRef::STRING))
                    .with_description("A string variable"),
            )
    }
}

fn emit(format: VariablesFormat) -> String {
    let blocks = variables_from_schema(&SampleModel::schema()).expect("valid schema");
    emit_variables(&blocks, format).expect("emittable")
}

#[test]
fn hcl() {
    insta::assert_snapshot!(emit(VariablesFormat::Hcl), @r#"
variable "counter" {
  type    = number
  default = 0
}

variable "default_nested" {
  type    = object({ field = string, numeric = number })
  default = { field = "default", numeric = 0 }
}

variable "empty_dict" {
  type    = map(number)
  default = {}
}

variable "empty_list" {
  type    = list(number)
  default = []
}

variable "empty_set" {
  type    = set(number)
  default = []
}

variable "enabled" {
  type    = bool
  default = true
}

variable "field_with_description" {
  type        = string
  description = "A string variable"
}

variable "mode" {
  type    = string
  default = "auto"
}

variable "name" {
  type = string
}

variable "nested" {
  type = object({ field = string, numeric = number })
}

variable "nested_nested" {
  type = list(object({ nested_items = list(object({ field = string, numeric = number })) }))
}

variable "none_none" {
  type    = any
  default = ""
}

variable "optional" {
  type    = string
  default = null
}

variable "optional_nested" {
  type    = object({ field = string, numeric = number })
  default = null
}

variable "str_with_default" {
  type    = string
  default = "default"
}

variable "tags" {
  type    = map(any)
  default = null
}

variable "variants" {
  type    = list(string)
  default = ["foo", "bar"]
}
"#);
}

#[test]
fn hcl_parses() {
    let body = hcl::parse(&emit(VariablesFormat::Hcl)).expect("valid hcl");

    let names: Vec<_> = body
        .blocks()
        .map(|block| {
            assert_eq!(block.identifier.as_str(), "variable");
            block.labels[0].as_str().to_string()
        })
        .collect();

    let mut sorted = names.clone();
    sorted.sort();
    assert_eq!(names, sorted);
    assert_eq!(names.len(), SampleModel::schema().fields().len());
}

#[test]
fn json() {
    let parsed: serde_json::Value =
        serde_json::from_str(&emit(VariablesFormat::Json)).expect("valid json");

    let expected = serde_json::json!({
        "variable": {
            "name": {"type": "string"},
            "str_with_default": {"type": "string", "default": "default"},
            "counter": {"type": "number", "default": 0},
            "enabled": {"type": "bool", "default": true},
            "empty_dict": {"type": "map(number)", "default": {}},
            "empty_list": {"type": "list(number)", "default": []},
            "empty_set": {"type": "set(number)", "default": []},
            "tags": {"type": "map(any)", "default": null},
            "variants": {"type": "list(string)", "default": ["foo", "bar"]},
            "mode": {"type": "string", "default": "auto"},
            "nested": {"type": "object({ field = string, numeric = number })"},
            "optional_nested": {"type": "object({ field = string, numeric = number })", "default": null},
            "optional": {"type": "string", "default": null},
            "nested_nested": {
                "type": "list(object({ nested_items = list(object({ field = string, numeric = number })) }))"
            },
            "default_nested": {
                "type": "object({ field = string, numeric = number })",
                "default": {"field": "default", "numeric": 0}
            },
            "none_none": {"type": "any", "default": ""},
            "field_with_description": {"type": "string", "description": "A string variable"},
        }
    });

    assert_eq!(parsed, expected);
}

#[test]
fn json_key_order() {
    let json = emit(VariablesFormat::Json);
    let parsed: serde_json::Value = serde_json::from_str(&json).expect("valid json");

    let names: Vec<_> = parsed["variable"]
        .as_object()
        .expect("object")
        .keys()
        .cloned()
        .collect();
    let mut sorted = names.clone();
    sorted.sort();
    assert_eq!(names, sorted);

    let keys: Vec<_> = parsed["variable"]["field_with_description"]
        .as_object()
        .expect("object")
        .keys()
        .cloned()
        .collect();
    assert_eq!(keys, ["type", "description"]);
}

#[test]
fn deterministic() {
    for format in [VariablesFormat::Hcl, VariablesFormat::Json] {
        assert_eq!(emit(format), emit(format));
    }
}

#[test]
fn declaration_order_does_not_matter() {
    let mut reversed: Vec<FieldSpec> = SampleModel::schema().fields().to_vec();
    reversed.reverse();
    let reversed: ObjectSchema = reversed.into_iter().collect();

    let blocks = variables_from_schema(&reversed).expect("valid schema");
    assert_eq!(
        emit_variables(&blocks, VariablesFormat::Hcl).expect("emittable"),
        emit(VariablesFormat::Hcl)
    );
}

#[test]
fn formatting_is_idempotent() {
    let terraform = Terraform::default();
    if !terraform.available() {
        eprintln!("terraform not available, skipping");
        return;
    }

    let once = terraform.fmt(&emit(VariablesFormat::Hcl)).expect("fmt");
    let twice = terraform.fmt(&once).expect("fmt");
    assert_eq!(once, twice);
}
