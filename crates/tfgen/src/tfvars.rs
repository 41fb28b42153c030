//! tfvars JSON from data instances
use serde::Serialize;

/// Serialize an already populated data instance as compact JSON
///
/// Fields keep the declaration order of the data type. Whether a field that was never supplied
/// shows up is decided by the type: fields of type [crate::value::Nullable] marked with
/// `skip_serializing_if = "Nullable::is_absent"` are dropped, explicit nulls are kept.
///
/// String fields are written as JSON strings even when they contain JSON themselves.
pub fn emit_values_json<T: Serialize + ?Sized>(data: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string(data)
}
