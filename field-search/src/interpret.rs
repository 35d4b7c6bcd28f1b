use crate::errors::InterpretError;
use crate::ops::{Lookup, Operator};
use crate::schema::FieldType;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;

/// Typed value carried by a filter entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FilterValue {
    Text(String),
    Int(i64),
    Float(f64),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
}

impl std::fmt::Display for FilterValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FilterValue::Text(s) => write!(f, "{}", s),
            FilterValue::Int(n) => write!(f, "{}", n),
            FilterValue::Float(n) => write!(f, "{}", n),
            FilterValue::Date(d) => write!(f, "{}", d),
            FilterValue::DateTime(dt) => write!(f, "{}", dt),
        }
    }
}

/// Interpret a raw clause value for a field of the given type.
///
/// Returns the `(lookup, value)` pairs the clause stands for: one pair in
/// the common case, two for a closed range (`100..200`). An error means the
/// clause cannot apply to the field and should be kept as plain text.
pub fn interpret(
    field_type: FieldType,
    operator: Operator,
    raw_value: &str,
) -> Result<Vec<(Lookup, FilterValue)>, InterpretError> {
    match field_type {
        FieldType::String => Ok(interpret_string(operator, raw_value)),
        FieldType::Number => interpret_number(operator, raw_value),
        FieldType::Date => interpret_temporal(FieldType::Date, operator, raw_value),
        FieldType::DateTime => interpret_temporal(FieldType::DateTime, operator, raw_value),
    }
}

/// String fields never reject a clause. `=` and `==` are exact matches;
/// everything else goes through the wildcard table, case-sensitive for `!`
/// and case-insensitive otherwise.
fn interpret_string(operator: Operator, raw_value: &str) -> Vec<(Lookup, FilterValue)> {
    let (lookup, value) = match operator {
        Operator::Exact => (Lookup::Exact, raw_value),
        Operator::IExact => (Lookup::IExact, raw_value),
        Operator::Sensitive => wildcard_lookup(raw_value, true),
        _ => wildcard_lookup(raw_value, false),
    };
    vec![(lookup, FilterValue::Text(value.to_string()))]
}

/// Map `*` wildcards at the value edges to the matching lookup:
/// `*v*` → contains, `*v` → endswith, `v*` → startswith, bare → contains.
fn wildcard_lookup(value: &str, case_sensitive: bool) -> (Lookup, &str) {
    let starts = value.starts_with('*');
    let ends = value.ends_with('*');
    if starts && ends {
        let inner = if value.len() >= 2 {
            &value[1..value.len() - 1]
        } else {
            // a lone `*`
            ""
        };
        if case_sensitive {
            (Lookup::Contains, inner)
        } else {
            (Lookup::IContains, inner)
        }
    } else if starts {
        if case_sensitive {
            (Lookup::EndsWith, &value[1..])
        } else {
            (Lookup::IEndsWith, &value[1..])
        }
    } else if ends {
        if case_sensitive {
            (Lookup::StartsWith, &value[..value.len() - 1])
        } else {
            (Lookup::IStartsWith, &value[..value.len() - 1])
        }
    } else if case_sensitive {
        (Lookup::Contains, value)
    } else {
        (Lookup::IContains, value)
    }
}

fn interpret_number(
    operator: Operator,
    raw_value: &str,
) -> Result<Vec<(Lookup, FilterValue)>, InterpretError> {
    if let Some((start, end)) = raw_value.split_once("..") {
        require_range_operator(operator, FieldType::Number)?;
        let mut filters = Vec::new();
        let start = start.trim();
        let end = end.trim();
        if !start.is_empty() {
            filters.push((Lookup::Gte, parse_number(start)?));
        }
        if !end.is_empty() {
            filters.push((Lookup::Lte, parse_number(end)?));
        }
        if filters.is_empty() {
            return Err(InterpretError::EmptyRange);
        }
        return Ok(filters);
    }

    let lookup = comparison_lookup(operator).ok_or(InterpretError::UnsupportedOperator {
        operator,
        field_type: FieldType::Number,
    })?;
    Ok(vec![(lookup, parse_number(raw_value.trim())?)])
}

/// Integral if the literal has no decimal point and no exponent, float
/// otherwise.
fn parse_number(value: &str) -> Result<FilterValue, InterpretError> {
    if value.contains('.') || value.contains(['e', 'E']) {
        value.parse::<f64>().map(FilterValue::Float).map_err(|_| ())
    } else {
        value.parse::<i64>().map(FilterValue::Int).map_err(|_| ())
    }
    .map_err(|_| InterpretError::InvalidNumber(value.to_string()))
}

fn interpret_temporal(
    field_type: FieldType,
    operator: Operator,
    raw_value: &str,
) -> Result<Vec<(Lookup, FilterValue)>, InterpretError> {
    if let Some((start, end)) = raw_value.split_once("..") {
        require_range_operator(operator, field_type)?;
        let mut filters = Vec::new();
        let start = start.trim();
        let end = end.trim();
        if !start.is_empty() {
            filters.push((Lookup::Gte, parse_temporal(start, field_type)));
        }
        if !end.is_empty() {
            filters.push((Lookup::Lte, parse_temporal(end, field_type)));
        }
        if filters.is_empty() {
            return Err(InterpretError::EmptyRange);
        }
        return Ok(filters);
    }

    let lookup = comparison_lookup(operator).ok_or(InterpretError::UnsupportedOperator {
        operator,
        field_type,
    })?;
    Ok(vec![(lookup, parse_temporal(raw_value.trim(), field_type))])
}

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
];

/// Parse a date literal against the accepted formats, first match wins:
/// `YYYY-MM-DD`, then the three datetime shapes. A literal matching none of
/// them is passed through unchanged for the downstream store to deal with.
fn parse_temporal(value: &str, field_type: FieldType) -> FilterValue {
    let parsed = NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map(|date| date.and_time(NaiveTime::MIN))
        .ok()
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        });
    match parsed {
        Some(datetime) if field_type == FieldType::DateTime => FilterValue::DateTime(datetime),
        Some(datetime) => FilterValue::Date(datetime.date()),
        None => FilterValue::Text(value.to_string()),
    }
}

/// Lookups for the comparison operators shared by number and date fields.
/// `None` for the wildcard operator, which these types do not support.
fn comparison_lookup(operator: Operator) -> Option<Lookup> {
    match operator {
        Operator::Gt => Some(Lookup::Gt),
        Operator::Gte => Some(Lookup::Gte),
        Operator::Lt => Some(Lookup::Lt),
        Operator::Lte => Some(Lookup::Lte),
        Operator::Default | Operator::IExact | Operator::Exact => Some(Lookup::Exact),
        Operator::Sensitive => None,
    }
}

/// Ranges already encode their bounds, so only the default and equality
/// operators may accompany them.
fn require_range_operator(
    operator: Operator,
    field_type: FieldType,
) -> Result<(), InterpretError> {
    match operator {
        Operator::Default | Operator::IExact | Operator::Exact => Ok(()),
        _ => Err(InterpretError::UnsupportedOperator {
            operator,
            field_type,
        }),
    }
}
