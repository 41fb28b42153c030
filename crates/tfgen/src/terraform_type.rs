//! [TypeRef] to terraform type constraint
use crate::schema::{CollectionKind, ObjectSchema, Primitive, TypeRef};

/// Render the terraform type constraint for `type_ref`
///
/// Total over [TypeRef]: shapes terraform can't express come out as `any`.
pub fn map_type(type_ref: &TypeRef) -> String {
    match type_ref {
        TypeRef::Primitive(Primitive::String) => "string".into(),
        TypeRef::Primitive(Primitive::Number) => "number".into(),
        TypeRef::Primitive(Primitive::Bool) => "bool".into(),
        TypeRef::Collection { kind, element } => {
            let wrapper = match kind {
                CollectionKind::List => "list",
                CollectionKind::Set => "set",
                CollectionKind::Map => "map",
            };
            let element = element
                .as_deref()
                .map(map_type)
                .unwrap_or_else(|| "any".into());
            format!("{wrapper}({element})")
        }
        TypeRef::Object(schema) => format!("object({})", object_attributes(schema)),
        // no enum primitive in terraform
        TypeRef::Literal(_) => "string".into(),
        TypeRef::Optional(inner) => map_type(inner),
        TypeRef::Union(members) => {
            if !members.contains(&TypeRef::Null) {
                return "any".into();
            }

            members
                .iter()
                .find(|member| **member != TypeRef::Null)
                .map(map_type)
                .unwrap_or_else(|| "any".into())
        }
        TypeRef::Null | TypeRef::Any | TypeRef::Other(_) => "any".into(),
    }
}

fn object_attributes(schema: &ObjectSchema) -> String {
    if schema.fields().is_empty() {
        return "{}".into();
    }

    let attributes: Vec<String> = schema
        .fields()
        .iter()
        .map(|field| format!("{} = {}", field.name, map_type(&field.type_ref)))
        .collect();

    format!("{{ {} }}", attributes.join(", "))
}
