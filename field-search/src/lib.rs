//! Parse human-typed search strings into structured field filters plus
//! leftover free text, for use against a tabular/record data source.
//!
//! A query mixes `field:operator"value"` clauses with plain words:
//!
//! ```text
//! title:python author__name:=john price:100..200 some free text
//! ```
//!
//! Supported syntax, per field type:
//!
//! - `field:value`: case-insensitive contains (strings)
//! - `field:=value`: case-insensitive exact
//! - `field:==value`: case-sensitive exact
//! - `field:!value`: case-sensitive contains
//! - `field:*suffix`, `field:prefix*`, `field:*infix*`: endswith /
//!   startswith / contains, case-sensitive with `!`
//! - `field:>v`, `field:>=v`, `field:<v`, `field:<=v`: comparisons on
//!   number and date fields
//! - `field:a..b`: closed or half-open range on number and date fields
//! - `field:"value with spaces"`: quoting keeps whitespace in the value
//!
//! Field types come from a [`SchemaIntrospect`] collaborator; only fields on
//! the caller-supplied allow-list are ever matched. Anything that does not
//! parse as a clause for an allowed field stays plain text, so a malformed
//! clause can never break the rest of the query:
//!
//! ```
//! use field_search::{parse_query, FieldType, FilterValue, Lookup, RecordSchema};
//!
//! let schema = RecordSchema::new()
//!     .with_field("title", FieldType::String)
//!     .with_field("price", FieldType::Number);
//!
//! let result = parse_query("title:python price:>=19.99 tutorial", &["title", "price"], &schema);
//! assert!(result.has_advanced());
//! assert_eq!(result.filters["title__icontains"].value, FilterValue::Text("python".into()));
//! assert_eq!(result.filters["price__gte"].value, FilterValue::Float(19.99));
//! assert_eq!(result.plain_text, "tutorial");
//! ```

pub mod errors;
pub mod interpret;
pub mod ops;
pub mod parser;
pub mod schema;
pub mod token;

pub use errors::InterpretError;
pub use interpret::{interpret, FilterValue};
pub use ops::{Lookup, Operator};
pub use parser::{parse_query, FilterEntry, FilterSink, ParseResult, SearchParser};
pub use schema::{
    resolve_field_type, FieldType, RecordSchema, SchemaIntrospect, RELATION_SEPARATOR,
};
pub use token::{scan, Token};
