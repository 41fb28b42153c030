//! terraform variable declarations
//!
//! A schema is turned into [VariableBlock]s (one per top level field) which are rendered either as
//! HCL (`variables.tf`) or as terraform JSON syntax (`variables.tf.json`).
//!
//! Both renderings sort the blocks by variable name so output does not depend on declaration order
//! and diffs stay small.
//!
//! ```hcl
//! variable "counter" {
//!   type    = number
//!   default = 0
//! }
//!
//! variable "name" {
//!   type = string
//! }
//! ```
use crate::hcl_text;
pub use crate::hcl_text::LiteralError;
use crate::schema::{default_for, ObjectSchema, TypeRef};
use crate::terraform_type::map_type;
use crate::value::Value;
use std::path::Path;

/// The unit of a variables file
#[derive(Debug, Clone, PartialEq, derive_new::new)]
pub struct VariableBlock {
    #[new(into)]
    pub name: String,
    pub type_ref: TypeRef,
    /// `None`: required variable, no `default` is emitted at all
    pub default: Option<Value>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum VariablesFormat {
    #[default]
    Hcl,
    Json,
}

impl VariablesFormat {
    /// `*.json` (e.g. `variables.tf.json`) is JSON, everything else HCL
    pub fn from_path(path: &Path) -> Self {
        match path.extension() {
            Some(ext) if ext == "json" => VariablesFormat::Json,
            _ => VariablesFormat::Hcl,
        }
    }
}

impl std::fmt::Display for VariablesFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VariablesFormat::Hcl => f.write_str("hcl"),
            VariablesFormat::Json => f.write_str("json"),
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum EmitError {
    #[error("variable {0:?} is declared more than once")]
    DuplicateVariable(String),
    #[error("{0:?} is not a valid variable name")]
    InvalidVariableName(String),
    #[error("variable name {0:?} is reserved by terraform")]
    ReservedVariableName(String),
    #[error("{path:?} is not a valid object attribute name")]
    InvalidAttributeName { path: String },
    #[error("unable to render default of variable {name:?}")]
    Default {
        name: String,
        #[source]
        source: LiteralError,
    },
    #[error("unable to render description of variable {name:?}")]
    Description {
        name: String,
        #[source]
        source: LiteralError,
    },
    #[error("JSON serialization failed")]
    Json(#[from] serde_json::Error),
}

/// Names terraform refuses as variable names
const RESERVED_NAMES: [&str; 8] = [
    "count",
    "depends_on",
    "for_each",
    "lifecycle",
    "locals",
    "providers",
    "source",
    "version",
];

/// One [VariableBlock] per top level field of `schema`
pub fn variables_from_schema(schema: &ObjectSchema) -> Result<Vec<VariableBlock>, EmitError> {
    let mut seen = std::collections::HashSet::new();
    let mut blocks = Vec::with_capacity(schema.fields().len());

    for field in schema.fields() {
        check_names(&field.name, &field.type_ref)?;
        if !seen.insert(field.name.as_str()) {
            return Err(EmitError::DuplicateVariable(field.name.clone()));
        }

        tracing::trace!(name = %field.name, "variable from field");
        blocks.push(VariableBlock::new(
            field.name.clone(),
            field.type_ref.clone(),
            default_for(field),
            field.description.clone(),
        ));
    }

    Ok(blocks)
}

pub fn emit_variables(
    blocks: &[VariableBlock],
    format: VariablesFormat,
) -> Result<String, EmitError> {
    let sorted = sorted_by_name(blocks)?;
    tracing::debug!(count = sorted.len(), %format, "emitting variables");

    match format {
        VariablesFormat::Hcl => emit_hcl(&sorted),
        VariablesFormat::Json => emit_json(&sorted),
    }
}

fn sorted_by_name(blocks: &[VariableBlock]) -> Result<Vec<&VariableBlock>, EmitError> {
    for block in blocks {
        check_names(&block.name, &block.type_ref)?;
    }

    let mut sorted: Vec<&VariableBlock> = blocks.iter().collect();
    sorted.sort_by(|a, b| a.name.cmp(&b.name));

    if let Some(pair) = sorted.windows(2).find(|pair| pair[0].name == pair[1].name) {
        return Err(EmitError::DuplicateVariable(pair[0].name.clone()));
    }

    Ok(sorted)
}

fn check_names(name: &str, type_ref: &TypeRef) -> Result<(), EmitError> {
    if !hcl_text::is_identifier(name) {
        return Err(EmitError::InvalidVariableName(name.into()));
    }
    if RESERVED_NAMES.contains(&name) {
        return Err(EmitError::ReservedVariableName(name.into()));
    }

    match invalid_attribute(type_ref, name) {
        Some(path) => Err(EmitError::InvalidAttributeName { path }),
        None => Ok(()),
    }
}

/// Path of the first object attribute in `type_ref` that can't be written unquoted
///
/// Only the shapes that make it into the mapped type are visited.
fn invalid_attribute(type_ref: &TypeRef, path: &str) -> Option<String> {
    match type_ref {
        TypeRef::Object(schema) => schema.fields().iter().find_map(|field| {
            let path = format!("{path}.{}", field.name);
            if hcl_text::is_identifier(&field.name) {
                invalid_attribute(&field.type_ref, &path)
            } else {
                Some(path)
            }
        }),
        TypeRef::Collection {
            element: Some(element),
            ..
        } => invalid_attribute(element, &format!("{path}[*]")),
        TypeRef::Optional(inner) => invalid_attribute(inner, path),
        TypeRef::Union(members) if members.contains(&TypeRef::Null) => members
            .iter()
            .find(|member| **member != TypeRef::Null)
            .and_then(|member| invalid_attribute(member, path)),
        _ => None,
    }
}

fn emit_hcl(blocks: &[&VariableBlock]) -> Result<String, EmitError> {
    let mut out = String::new();

    for (index, block) in blocks.iter().enumerate() {
        if index > 0 {
            out.push('\n');
        }

        let mut attributes = vec![("type", map_type(&block.type_ref))];
        if let Some(default) = &block.default {
            let rendered = hcl_text::literal(default).map_err(|source| EmitError::Default {
                name: block.name.clone(),
                source,
            })?;
            attributes.push(("default", rendered));
        }
        if let Some(description) = &block.description {
            let rendered =
                hcl_text::quoted(description).map_err(|source| EmitError::Description {
                    name: block.name.clone(),
                    source,
                })?;
            attributes.push(("description", rendered));
        }

        out.push_str(&format!("variable \"{}\" {{\n", block.name));
        hcl_text::aligned_attributes(&mut out, "  ", &attributes);
        out.push_str("}\n");
    }

    Ok(out)
}

#[derive(serde::Serialize)]
struct JsonDocument<'a> {
    variable: indexmap::IndexMap<&'a str, JsonVariable<'a>>,
}

#[derive(serde::Serialize)]
struct JsonVariable<'a> {
    #[serde(rename = "type")]
    type_: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    default: Option<&'a Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
}

fn emit_json(blocks: &[&VariableBlock]) -> Result<String, EmitError> {
    let document = JsonDocument {
        variable: blocks
            .iter()
            .map(|block| {
                (
                    block.name.as_str(),
                    JsonVariable {
                        type_: map_type(&block.type_ref),
                        default: block.default.as_ref(),
                        description: block.description.as_deref(),
                    },
                )
            })
            .collect(),
    };

    let mut out = serde_json::to_string_pretty(&document)?;
    out.push('\n');
    Ok(out)
}
