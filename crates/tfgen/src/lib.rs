//! # tfgen - terraform artifacts from typed data models
//!
//! A terraform based module gets its input as one document (see [input]). `tfgen` turns the data
//! model of such a module into the files terraform needs next to the module sources:
//!
//! - `variables.tf` / `variables.tf.json`: one variable per field of the data model
//! - `tfvars.json`: the values of the current instance
//! - `backend.tf`: where the state lives
//!
//! and wraps calls to the `terraform` executable ([terraform]).
//!
//! ## Introduction for developers
//!
//! ### Describing a data model
//!
//! Nothing is discovered at runtime. A data type describes itself by implementing
//! [schema::Schema], which returns an ordered list of [schema::FieldSpec]s: name, [schema::TypeRef],
//! optional default and optional description.
//!
//! A missing default (`None`) and a `null` default ([value::Value::Null]) mean different things:
//!
//! | default | terraform |
//! |---------|-----------|
//! | `None` | required variable, no `default` line |
//! | `Some(Value::Null)` | optional variable, `default = null` |
//! | `Some(value)` | optional variable, `default = <value>` |
//!
//! ### Type mapping
//!
//! see [terraform_type::map_type]
//!
//! | [schema::TypeRef] | terraform |
//! |-------------------|-----------|
//! | `STRING`, `NUMBER`, `BOOL` | `string`, `number`, `bool` |
//! | `list(T)`, `set(T)`, `map(T)` | `list(T)`, `set(T)`, `map(T)` (`any` when untyped) |
//! | `Literal([...])` | `string` |
//! | `Object(schema)` | `object({ a = T1, b = T2 })` |
//! | `Optional(T)` | `T` |
//! | anything else | `any` |
//!
//! ### Emitting
//!
//! [variables::variables_from_schema] creates one [variables::VariableBlock] per field and
//! [variables::emit_variables] renders them as HCL or JSON. Blocks are sorted by name. The HCL is
//! written in the layout `terraform fmt` produces, so formatting it again changes nothing.
//!
//! Backend configuration and tfvars are not derived from the schema: [backend] fills in a fixed
//! template and [tfvars] serializes the data instance as it is.
//!
//! ### Running
//!
//! [config::Config] is built once (options, environment, defaults) and handed to whatever needs it.
//! [cli::main] is the entry point module binaries call.
//!
pub mod backend;
pub mod cli;
pub mod config;
pub mod generate;
mod hcl_text;
pub mod input;
pub mod schema;
pub mod terraform;
pub mod terraform_type;
pub mod tfvars;
pub mod value;
pub mod variables;
