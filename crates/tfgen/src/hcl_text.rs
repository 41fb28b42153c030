//! HCL text rendering helpers
//!
//! Output is already in `terraform fmt` layout: two space indentation, aligned `=` for consecutive
//! single line attributes, inline lists and objects.
use crate::value::Value;

#[derive(thiserror::Error, Debug)]
pub enum LiteralError {
    #[error("non-finite number {0} has no HCL representation")]
    NonFiniteNumber(f64),
    #[error("unable to format HCL literal")]
    Format(#[from] hcl::Error),
}

/// Double quoted, escaped string literal
pub(crate) fn quoted(s: &str) -> Result<String, LiteralError> {
    Ok(hcl::format::to_string(&hcl::Expression::String(
        s.to_string(),
    ))?)
}

/// Whether `s` can be used unquoted as attribute or object key
pub(crate) fn is_identifier(s: &str) -> bool {
    !s.is_empty() && hcl::Identifier::sanitized(s).as_str() == s
}

/// Render a single line literal
pub(crate) fn literal(value: &Value) -> Result<String, LiteralError> {
    Ok(match value {
        Value::Null => "null".into(),
        Value::Boolean(b) => b.to_string(),
        Value::Integer(i) => i.to_string(),
        Value::Decimal(d) => {
            if !d.is_finite() {
                return Err(LiteralError::NonFiniteNumber(*d));
            }
            d.to_string()
        }
        Value::String(s) => quoted(s)?,
        Value::Array(elements) => {
            let elements = elements
                .iter()
                .map(literal)
                .collect::<Result<Vec<_>, _>>()?;
            format!("[{}]", elements.join(", "))
        }
        Value::Object(entries) if entries.is_empty() => "{}".into(),
        Value::Object(entries) => {
            let entries = entries
                .iter()
                .map(|(key, value)| Ok(format!("{} = {}", object_key(key)?, literal(value)?)))
                .collect::<Result<Vec<_>, LiteralError>>()?;
            format!("{{ {} }}", entries.join(", "))
        }
    })
}

fn object_key(key: &str) -> Result<String, LiteralError> {
    if is_identifier(key) {
        Ok(key.to_string())
    } else {
        quoted(key)
    }
}

/// Write `key = value` lines with the `=` signs lined up
pub(crate) fn aligned_attributes(out: &mut String, indent: &str, attributes: &[(&str, String)]) {
    let width = attributes
        .iter()
        .map(|(key, _)| key.len())
        .max()
        .unwrap_or_default();

    for (key, value) in attributes {
        out.push_str(indent);
        out.push_str(&format!("{key:<width$} = {value}\n"));
    }
}
