use serde::Serialize;
use std::str::FromStr;

/// Operator written between the `:` and the value of a search clause,
/// e.g. the `>=` in `price:>=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Operator {
    /// No operator written; handling depends on the field type.
    #[default]
    Default,
    /// `=` case-insensitive exact match.
    IExact,
    /// `==` case-sensitive exact match.
    Exact,
    /// `!` case-sensitive variant of the wildcard handling.
    Sensitive,
    /// `>`
    Gt,
    /// `>=`
    Gte,
    /// `<`
    Lt,
    /// `<=`
    Lte,
}

impl FromStr for Operator {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" => Ok(Operator::Default),
            "=" => Ok(Operator::IExact),
            "==" => Ok(Operator::Exact),
            "!" => Ok(Operator::Sensitive),
            ">" => Ok(Operator::Gt),
            ">=" => Ok(Operator::Gte),
            "<" => Ok(Operator::Lt),
            "<=" => Ok(Operator::Lte),
            _ => anyhow::bail!("Invalid search operator: {}", s),
        }
    }
}

impl std::fmt::Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operator::Default => write!(f, ""),
            Operator::IExact => write!(f, "="),
            Operator::Exact => write!(f, "=="),
            Operator::Sensitive => write!(f, "!"),
            Operator::Gt => write!(f, ">"),
            Operator::Gte => write!(f, ">="),
            Operator::Lt => write!(f, "<"),
            Operator::Lte => write!(f, "<="),
        }
    }
}

/// Comparison/matching semantics applied to a field, named after the
/// lookup suffixes understood by the downstream record store
/// (e.g. `title__icontains`, `price__gte`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Lookup {
    IContains,
    Contains,
    IExact,
    Exact,
    IStartsWith,
    StartsWith,
    IEndsWith,
    EndsWith,
    Gt,
    Gte,
    Lt,
    Lte,
}

impl std::fmt::Display for Lookup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Lookup::IContains => "icontains",
            Lookup::Contains => "contains",
            Lookup::IExact => "iexact",
            Lookup::Exact => "exact",
            Lookup::IStartsWith => "istartswith",
            Lookup::StartsWith => "startswith",
            Lookup::IEndsWith => "iendswith",
            Lookup::EndsWith => "endswith",
            Lookup::Gt => "gt",
            Lookup::Gte => "gte",
            Lookup::Lt => "lt",
            Lookup::Lte => "lte",
        };
        write!(f, "{}", name)
    }
}
