use serde::Serialize;
use std::collections::HashMap;

/// Separator between relation hops in a field path (`author__name`) and
/// between a field and its lookup in a composite filter key (`price__gte`).
pub const RELATION_SEPARATOR: &str = "__";

/// Type tag of a searchable field, driving which value interpreter runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    String,
    Number,
    Date,
    DateTime,
}

impl std::fmt::Display for FieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldType::String => write!(f, "string"),
            FieldType::Number => write!(f, "number"),
            FieldType::Date => write!(f, "date"),
            FieldType::DateTime => write!(f, "datetime"),
        }
    }
}

/// Schema introspection collaborator. Implemented by whatever owns the
/// concrete record layout; the parser only asks for field types and
/// relation hops, one segment at a time.
pub trait SchemaIntrospect {
    /// Type of a concrete (non-relation) field, or `None` if unknown.
    fn field_type(&self, name: &str) -> Option<FieldType>;

    /// Schema of a related record type, or `None` if `name` is not a
    /// traversable relation.
    fn relation(&self, name: &str) -> Option<&dyn SchemaIntrospect>;
}

/// Resolve a (possibly nested) field path like `author__name` to its type.
///
/// Every segment except the last is walked through `relation()`; the final
/// segment is looked up with `field_type()`. Resolution is total: any miss
/// at any hop falls back to [`FieldType::String`] so that type detection
/// never errors.
pub fn resolve_field_type(schema: &dyn SchemaIntrospect, path: &str) -> FieldType {
    let mut current = schema;
    let mut segments = path.split(RELATION_SEPARATOR).peekable();
    while let Some(segment) = segments.next() {
        if segments.peek().is_none() {
            return current.field_type(segment).unwrap_or(FieldType::String);
        }
        match current.relation(segment) {
            Some(related) => current = related,
            None => return FieldType::String,
        }
    }
    FieldType::String
}

/// In-memory [`SchemaIntrospect`] implementation: a flat field map plus
/// nested schemas for relations.
#[derive(Debug, Default)]
pub struct RecordSchema {
    fields: HashMap<String, FieldType>,
    relations: HashMap<String, RecordSchema>,
}

impl RecordSchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_field(mut self, name: &str, field_type: FieldType) -> Self {
        self.fields.insert(name.to_string(), field_type);
        self
    }

    pub fn with_relation(mut self, name: &str, schema: RecordSchema) -> Self {
        self.relations.insert(name.to_string(), schema);
        self
    }
}

impl SchemaIntrospect for RecordSchema {
    fn field_type(&self, name: &str) -> Option<FieldType> {
        self.fields.get(name).copied()
    }

    fn relation(&self, name: &str) -> Option<&dyn SchemaIntrospect> {
        self.relations
            .get(name)
            .map(|schema| schema as &dyn SchemaIntrospect)
    }
}
