use crate::ops::Operator;
use crate::schema::FieldType;

/// Error types for value interpretation.
///
/// These never escape a parse: the assembler consumes them and keeps the
/// offending clause as plain text instead.
#[derive(Debug, Clone, PartialEq)]
pub enum InterpretError {
    /// The operator has no meaning for the field's type, e.g. the wildcard
    /// operator `!` on a number field.
    UnsupportedOperator {
        operator: Operator,
        field_type: FieldType,
    },
    /// The value could not be converted to a number.
    InvalidNumber(String),
    /// A range value with both sides empty (`..`).
    EmptyRange,
}

impl std::fmt::Display for InterpretError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InterpretError::UnsupportedOperator {
                operator,
                field_type,
            } => write!(
                f,
                "Operator '{}' is not supported for {} fields",
                operator, field_type
            ),
            InterpretError::InvalidNumber(value) => {
                write!(f, "Cannot convert '{}' to a number", value)
            }
            InterpretError::EmptyRange => write!(f, "Range has neither a start nor an end"),
        }
    }
}

impl std::error::Error for InterpretError {}
