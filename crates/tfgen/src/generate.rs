//! artifact files
//!
//! Writes are plain `std::fs::write` calls: not atomic, parent directories must exist.
use crate::backend::BackendConfig;
use crate::schema::ObjectSchema;
use crate::variables::{emit_variables, variables_from_schema, EmitError, VariablesFormat};
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(thiserror::Error, Debug)]
pub enum GenerateError {
    #[error("unable to write {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Emit(#[from] EmitError),
    #[error("unable to serialize tfvars")]
    Values(#[from] serde_json::Error),
}

/// Write the variable declarations of `schema`
///
/// Without explicit `format` the format follows the file name (see [VariablesFormat::from_path]).
pub fn create_variables_tf_file(
    schema: &ObjectSchema,
    path: &Path,
    format: Option<VariablesFormat>,
) -> Result<(), GenerateError> {
    let format = format.unwrap_or_else(|| VariablesFormat::from_path(path));
    let blocks = variables_from_schema(schema)?;
    write(path, emit_variables(&blocks, format)?)
}

pub fn create_tf_vars_json<T: Serialize + ?Sized>(
    data: &T,
    path: &Path,
) -> Result<(), GenerateError> {
    write(path, crate::tfvars::emit_values_json(data)?)
}

pub fn create_backend_tf_file(backend: &BackendConfig, path: &Path) -> Result<(), GenerateError> {
    write(path, backend.emit())
}

fn write(path: &Path, contents: String) -> Result<(), GenerateError> {
    tracing::info!(path=%path.display(), bytes = contents.len(), "writing file");
    std::fs::write(path, contents).map_err(|source| GenerateError::Write {
        path: path.to_owned(),
        source,
    })
}
