use mise_schema::{CheckConstraint, CheckRule};

use crate::values::Row;

/// Result of evaluating a check rule against a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckOutcome {
    Passed,
    Failed,
}

/// Evaluate a structured check constraint against a generated row.
///
/// A null column value passes, matching SQL CHECK semantics.
pub fn evaluate_check(check: &CheckConstraint, row: &Row) -> CheckOutcome {
    let Some(value) = row.get(&check.column) else {
        return CheckOutcome::Failed;
    };

    if value.is_null() {
        return CheckOutcome::Passed;
    }

    let pass = match &check.rule {
        CheckRule::OneOf { allowed } => value
            .as_str()
            .map(|text| allowed.iter().any(|candidate| candidate == text))
            .unwrap_or(false),
        CheckRule::GreaterThan { min } => {
            value.as_f64().map(|number| number > *min).unwrap_or(false)
        }
        CheckRule::AtLeast { min } => {
            value.as_f64().map(|number| number >= *min).unwrap_or(false)
        }
        CheckRule::Between { min, max } => value
            .as_i64()
            .map(|number| number >= *min && number <= *max)
            .unwrap_or(false),
    };

    if pass {
        CheckOutcome::Passed
    } else {
        CheckOutcome::Failed
    }
}
