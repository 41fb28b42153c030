//! schema description
//!
//! A schema is a tree of [FieldSpec]s. It is written down once, explicitly, by implementing
//! [Schema] for the data type of a module:
//!
//! ```
//! use tfgen::schema::{FieldSpec, ObjectSchema, Schema, TypeRef};
//!
//! struct Data {
//!     identifier: String,
//!     region: Option<String>,
//! }
//!
//! impl Schema for Data {
//!     fn schema() -> ObjectSchema {
//!         ObjectSchema::new()
//!             .field(FieldSpec::new("identifier", TypeRef::STRING))
//!             .field(FieldSpec::new("region", TypeRef::optional(TypeRef::STRING)).with_default(None::<String>))
//!     }
//! }
//!
//! assert_eq!(Data::schema().fields().len(), 2);
//! ```
//!
//! There are no references between schemas, only nesting. Trees are finite by construction.
use crate::value::Value;

/// Types the mapper understands
#[derive(Debug, Clone, PartialEq)]
pub enum TypeRef {
    Primitive(Primitive),
    /// `element` is `None` for untyped collections (`list(any)`, ...)
    Collection {
        kind: CollectionKind,
        element: Option<Box<TypeRef>>,
    },
    Object(ObjectSchema),
    /// A closed set of string literals
    Literal(Vec<String>),
    /// `T | null`
    Optional(Box<TypeRef>),
    /// Arbitrary union. Only unions with a `Null` member are understood.
    Union(Vec<TypeRef>),
    /// The null type, only meaningful as union member
    Null,
    Any,
    /// A named type without a terraform counterpart (e.g. `bytes`)
    Other(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primitive {
    String,
    Number,
    Bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionKind {
    List,
    Set,
    Map,
}

impl TypeRef {
    pub const STRING: TypeRef = TypeRef::Primitive(Primitive::String);
    pub const NUMBER: TypeRef = TypeRef::Primitive(Primitive::Number);
    pub const BOOL: TypeRef = TypeRef::Primitive(Primitive::Bool);

    pub fn list(element: TypeRef) -> Self {
        Self::collection(CollectionKind::List, Some(element))
    }

    pub fn set(element: TypeRef) -> Self {
        Self::collection(CollectionKind::Set, Some(element))
    }

    /// Map with string keys and `value` values
    pub fn map(value: TypeRef) -> Self {
        Self::collection(CollectionKind::Map, Some(value))
    }

    pub fn collection(kind: CollectionKind, element: Option<TypeRef>) -> Self {
        TypeRef::Collection {
            kind,
            element: element.map(Box::new),
        }
    }

    pub fn optional(inner: TypeRef) -> Self {
        TypeRef::Optional(Box::new(inner))
    }

    pub fn literal<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        TypeRef::Literal(values.into_iter().map(Into::into).collect())
    }

    pub fn union(members: impl IntoIterator<Item = TypeRef>) -> Self {
        TypeRef::Union(members.into_iter().collect())
    }

    /// The object type of a registered schema
    pub fn of<S: Schema>() -> Self {
        TypeRef::Object(S::schema())
    }
}

impl From<ObjectSchema> for TypeRef {
    fn from(value: ObjectSchema) -> Self {
        TypeRef::Object(value)
    }
}

/// One declared variable or object attribute
#[derive(Debug, Clone, PartialEq, derive_new::new)]
pub struct FieldSpec {
    #[new(into)]
    pub name: String,
    #[new(into)]
    pub type_ref: TypeRef,
    /// `None`: no default declared, the variable is required
    #[new(default)]
    pub default: Option<Value>,
    #[new(default)]
    pub description: Option<String>,
}

impl FieldSpec {
    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// Use a struct instance (or anything serializable) as default
    pub fn with_default_of<T: serde::Serialize>(
        mut self,
        default: &T,
    ) -> Result<Self, serde_json::Error> {
        self.default = Some(Value::from_serialize(default)?);
        Ok(self)
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Ordered fields of an object type
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjectSchema {
    fields: Vec<FieldSpec>,
}

impl ObjectSchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, field: FieldSpec) -> Self {
        self.fields.push(field);
        self
    }

    /// Fields in declaration order
    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }
}

impl FromIterator<FieldSpec> for ObjectSchema {
    fn from_iter<T: IntoIterator<Item = FieldSpec>>(iter: T) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

/// Explicit schema registration for a data type
pub trait Schema {
    fn schema() -> ObjectSchema;
}

/// The declared default of a field
///
/// `None` means no default was declared, which is not the same as `Some(Value::Null)`.
pub fn default_for(field: &FieldSpec) -> Option<Value> {
    field.default.clone()
}
