//! Filter model and its SQL compilation.

use crate::model::id::ObjectId;
use rusqlite::types::Value as SqlValue;

/// Scalar operand for equality and containment filters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scalar {
    Int(i64),
    Text(String),
}

impl Scalar {
    fn json_type(&self) -> &'static str {
        match self {
            Self::Int(_) => "integer",
            Self::Text(_) => "text",
        }
    }

    fn to_sql(&self) -> SqlValue {
        match self {
            Self::Int(value) => SqlValue::Integer(*value),
            Self::Text(value) => SqlValue::Text(value.clone()),
        }
    }
}

impl From<i32> for Scalar {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// Document filter evaluated by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    /// Matches every document in the collection.
    All,
    /// Matches the document with this store id.
    Id(ObjectId),
    /// `field == value`.
    Eq { field: &'static str, value: Scalar },
    /// `min <= field <= max`; a missing bound is unbounded.
    Range {
        field: &'static str,
        min: Option<i64>,
        max: Option<i64>,
    },
    /// `value` is an element of the array stored at `field`.
    Contains { field: &'static str, value: Scalar },
}

impl Filter {
    pub fn by_id(id: ObjectId) -> Self {
        Self::Id(id)
    }

    pub fn eq(field: &'static str, value: impl Into<Scalar>) -> Self {
        Self::Eq {
            field,
            value: value.into(),
        }
    }

    /// Inclusive integer range. `min > max` is valid and matches nothing.
    pub fn range(field: &'static str, min: Option<i64>, max: Option<i64>) -> Self {
        Self::Range { field, min, max }
    }

    pub fn contains(field: &'static str, value: impl Into<Scalar>) -> Self {
        Self::Contains {
            field,
            value: value.into(),
        }
    }

    /// Compiles this filter into a predicate over the `documents` table.
    pub fn to_predicate(&self) -> Predicate {
        let mut predicate = Predicate::default();
        match self {
            Self::All => predicate.sql.push_str("1 = 1"),
            Self::Id(id) => {
                predicate.sql.push_str("id = ?");
                predicate.params.push(SqlValue::Blob(id.bytes().to_vec()));
            }
            Self::Eq { field, value } => {
                let path = json_path(field);
                predicate
                    .sql
                    .push_str("(json_type(body, ?) = ? AND json_extract(body, ?) = ?)");
                predicate.params.extend([
                    SqlValue::Text(path.clone()),
                    SqlValue::Text(value.json_type().to_string()),
                    SqlValue::Text(path),
                    value.to_sql(),
                ]);
            }
            Self::Range { field, min, max } => {
                let path = json_path(field);
                predicate.sql.push_str("(json_type(body, ?) = 'integer'");
                predicate.params.push(SqlValue::Text(path.clone()));
                if let Some(min) = min {
                    predicate.sql.push_str(" AND json_extract(body, ?) >= ?");
                    predicate.params.push(SqlValue::Text(path.clone()));
                    predicate.params.push(SqlValue::Integer(*min));
                }
                if let Some(max) = max {
                    predicate.sql.push_str(" AND json_extract(body, ?) <= ?");
                    predicate.params.push(SqlValue::Text(path));
                    predicate.params.push(SqlValue::Integer(*max));
                }
                predicate.sql.push(')');
            }
            Self::Contains { field, value } => {
                let path = json_path(field);
                predicate.sql.push_str(
                    "(json_type(body, ?) = 'array' AND EXISTS (
                        SELECT 1 FROM json_each(body, ?) AS element
                        WHERE element.type = ? AND element.value = ?
                    ))",
                );
                predicate.params.extend([
                    SqlValue::Text(path.clone()),
                    SqlValue::Text(path),
                    SqlValue::Text(value.json_type().to_string()),
                    value.to_sql(),
                ]);
            }
        }
        predicate
    }
}

/// Parameterized SQL predicate produced by [`Filter::to_predicate`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Predicate {
    pub sql: String,
    pub params: Vec<SqlValue>,
}

/// JSON path addressing top-level `field` of a document body.
pub(crate) fn json_path(field: &str) -> String {
    format!("$.\"{}\"", field.replace('"', "\\\""))
}

#[cfg(test)]
mod tests {
    use super::{json_path, Filter, Scalar};
    use crate::model::id::ObjectId;
    use rusqlite::types::Value as SqlValue;

    #[test]
    fn placeholders_match_bound_params() {
        let filters = [
            Filter::All,
            Filter::by_id(ObjectId::new()),
            Filter::eq("name", "Carlos"),
            Filter::range("age", Some(25), Some(40)),
            Filter::range("age", None, Some(40)),
            Filter::range("age", None, None),
            Filter::contains("tickets", 100),
        ];
        for filter in filters {
            let predicate = filter.to_predicate();
            let placeholders = predicate.sql.matches('?').count();
            assert_eq!(placeholders, predicate.params.len(), "{filter:?}");
        }
    }

    #[test]
    fn field_names_are_bound_not_spliced() {
        let predicate = Filter::eq("name') OR 1=1 --", "x").to_predicate();
        assert!(!predicate.sql.contains("OR 1=1"));
        assert_eq!(
            predicate.params[0],
            SqlValue::Text("$.\"name') OR 1=1 --\"".to_string())
        );
    }

    #[test]
    fn scalar_type_follows_operand() {
        let text = Filter::contains("collaborators", "Ana").to_predicate();
        assert!(text.params.contains(&SqlValue::Text("text".to_string())));

        let number = Filter::eq("number", Scalar::from(7_i64)).to_predicate();
        assert!(number.params.contains(&SqlValue::Text("integer".to_string())));
        assert!(number.params.contains(&SqlValue::Integer(7)));
    }

    #[test]
    fn json_path_quotes_field() {
        assert_eq!(json_path("age"), "$.\"age\"");
    }
}
