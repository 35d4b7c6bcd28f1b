use crate::interpret::{interpret, FilterValue};
use crate::ops::Lookup;
use crate::schema::{resolve_field_type, SchemaIntrospect, RELATION_SEPARATOR};
use crate::token::scan;
use indexmap::IndexMap;
use log::debug;
use serde::Serialize;
use std::collections::HashSet;

/// A single structured filter produced from a clause.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterEntry {
    pub field: String,
    pub lookup: Lookup,
    pub value: FilterValue,
}

/// Outcome of parsing one query string: structured filters, keyed by the
/// `field__lookup` composite so that the two bounds of a range coexist,
/// plus whatever was left over as plain text.
#[derive(Debug, Default, Serialize)]
pub struct ParseResult {
    pub filters: IndexMap<String, FilterEntry>,
    pub plain_text: String,
}

impl ParseResult {
    /// True if any clause was recognized as a structured filter.
    pub fn has_advanced(&self) -> bool {
        !self.filters.is_empty()
    }

    /// Hand every filter to the sink, in the order the clauses appeared.
    pub fn apply_to<S: FilterSink + ?Sized>(&self, sink: &mut S) {
        for entry in self.filters.values() {
            sink.apply_filter(&entry.field, entry.lookup, &entry.value);
        }
    }
}

/// Sink the owning caller implements to turn filters into an actual
/// record-store query.
pub trait FilterSink {
    fn apply_filter(&mut self, field: &str, lookup: Lookup, value: &FilterValue);
}

/// Parses query strings against an allow-list of searchable fields and a
/// schema that knows the fields' types.
///
/// Parsing never fails: clauses naming a disallowed field, a value that
/// does not convert, or an operator the field's type does not support are
/// all kept verbatim as plain text.
pub struct SearchParser<'a> {
    allowed_fields: HashSet<String>,
    schema: &'a dyn SchemaIntrospect,
}

impl<'a> SearchParser<'a> {
    pub fn new<I, S>(allowed_fields: I, schema: &'a dyn SchemaIntrospect) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            allowed_fields: allowed_fields.into_iter().map(Into::into).collect(),
            schema,
        }
    }

    pub fn parse(&self, text: &str) -> ParseResult {
        // Without an allow-list there is nothing to match against
        if self.allowed_fields.is_empty() {
            return ParseResult {
                filters: IndexMap::new(),
                plain_text: text.to_string(),
            };
        }

        let mut filters: IndexMap<String, FilterEntry> = IndexMap::new();
        let mut plain_parts: Vec<&str> = Vec::new();
        let mut last_end = 0;

        for token in scan(text) {
            let (start, end) = token.span;
            plain_parts.push(&text[last_end..start]);
            last_end = end;
            let clause = &text[start..end];

            if !self.allowed_fields.contains(&token.field) {
                debug!("field '{}' not allowed, keeping '{}' as plain text", token.field, clause);
                plain_parts.push(clause);
                continue;
            }

            let field_type = resolve_field_type(self.schema, &token.field);
            match interpret(field_type, token.operator, &token.raw_value) {
                Ok(entries) => {
                    for (lookup, value) in entries {
                        let key = format!("{}{}{}", token.field, RELATION_SEPARATOR, lookup);
                        // Last occurrence of the same field+lookup wins
                        filters.insert(
                            key,
                            FilterEntry {
                                field: token.field.clone(),
                                lookup,
                                value,
                            },
                        );
                    }
                }
                Err(err) => {
                    debug!("keeping '{}' as plain text: {}", clause, err);
                    plain_parts.push(clause);
                }
            }
        }
        plain_parts.push(&text[last_end..]);

        let plain_text = plain_parts
            .iter()
            .map(|part| part.trim())
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ");

        ParseResult {
            filters,
            plain_text,
        }
    }
}

/// One-shot convenience over [`SearchParser`].
pub fn parse_query(
    text: &str,
    allowed_fields: &[&str],
    schema: &dyn SchemaIntrospect,
) -> ParseResult {
    SearchParser::new(allowed_fields.iter().copied(), schema).parse(text)
}
