use serde::{Deserialize, Serialize};

/// Primary key definition preserving column order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrimaryKey {
    pub columns: Vec<String>,
    /// Single-column INTEGER keys render as `PRIMARY KEY AUTOINCREMENT`.
    pub autoincrement: bool,
}

/// Unique constraint definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UniqueConstraint {
    pub columns: Vec<String>,
}

/// Structured rule backing a CHECK constraint.
///
/// The catalog is authored in Rust, so rules stay structured end to end:
/// the same rule renders the SQL clause and validates generated values.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum CheckRule {
    /// Column value must be one of an enumerated text domain.
    OneOf { allowed: Vec<String> },
    /// Numeric column must be strictly greater than `min`.
    GreaterThan { min: f64 },
    /// Numeric column must be greater than or equal to `min`.
    AtLeast { min: f64 },
    /// Integer column must fall within `min..=max`.
    Between { min: i64, max: i64 },
}

/// Check constraint bound to a single column.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckConstraint {
    pub column: String,
    pub rule: CheckRule,
}

/// Foreign key action semantics.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FkAction {
    NoAction,
    Cascade,
}

/// Foreign key definition preserving column ordering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForeignKey {
    pub columns: Vec<String>,
    pub referenced_table: String,
    pub referenced_columns: Vec<String>,
    pub on_delete: FkAction,
}

/// Secondary index declaration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Index {
    pub name: String,
    pub table: String,
    pub columns: Vec<String>,
}

/// Table-level constraint definitions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Constraint {
    PrimaryKey(PrimaryKey),
    ForeignKey(ForeignKey),
    Unique(UniqueConstraint),
    Check(CheckConstraint),
}

impl CheckRule {
    /// Render the rule as the body of a SQL CHECK clause for `column`.
    pub fn render_sql(&self, column: &str) -> String {
        match self {
            CheckRule::OneOf { allowed } => {
                let quoted: Vec<String> =
                    allowed.iter().map(|value| format!("'{value}'")).collect();
                format!("{column} IN ({})", quoted.join(", "))
            }
            CheckRule::GreaterThan { min } => format!("{column} > {}", format_number(*min)),
            CheckRule::AtLeast { min } => format!("{column} >= {}", format_number(*min)),
            CheckRule::Between { min, max } => format!("{column} BETWEEN {min} AND {max}"),
        }
    }
}

fn format_number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}
