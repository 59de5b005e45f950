use std::fmt::{self, Display};

use crate::domain::json_array::JsonArrayError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SqlBuilderError {
    MissingIdentifier(&'static str),
    MalformedJson(JsonArrayError),
}

impl Display for SqlBuilderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SqlBuilderError::MissingIdentifier(field_name) => {
                write!(f, "Value cannot be null, empty or whitespace: {field_name}")
            }
            SqlBuilderError::MalformedJson(error) => write!(f, "{error}"),
        }
    }
}

impl std::error::Error for SqlBuilderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SqlBuilderError::MissingIdentifier(_) => None,
            SqlBuilderError::MalformedJson(error) => Some(error),
        }
    }
}

impl From<JsonArrayError> for SqlBuilderError {
    fn from(error: JsonArrayError) -> Self {
        SqlBuilderError::MalformedJson(error)
    }
}

pub type SqlBuilderResult<T> = Result<T, SqlBuilderError>;

/// Schema and table name that were both checked to be non-blank.
///
/// Statement rendering only accepts this type, so nothing is rendered against
/// a half-configured builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QualifiedTable<'a> {
    schema: &'a str,
    table: &'a str,
}

impl<'a> QualifiedTable<'a> {
    pub fn new(schema: Option<&'a str>, table: Option<&'a str>) -> SqlBuilderResult<Self> {
        Ok(Self {
            schema: require_identifier(schema, "schema")?,
            table: require_identifier(table, "table")?,
        })
    }
}

impl Display for QualifiedTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\".\"{}\"", self.schema, self.table)
    }
}

fn require_identifier<'a>(value: Option<&'a str>, field_name: &'static str) -> SqlBuilderResult<&'a str> {
    match value {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(SqlBuilderError::MissingIdentifier(field_name)),
    }
}

/// Renders the DDL and DML for one target table.
///
/// Schema and table are set after construction and checked on every build
/// call, so the same builder serves the create-table statement and every
/// insert batch of a run.
pub trait SqlBuilder {
    fn set_schema(&mut self, schema: &str);

    fn set_table_name(&mut self, table_name: &str);

    fn build_create_table(&self) -> SqlBuilderResult<String>;

    /// `json_array` is the whole array; `skip`/`limit` pick the window of
    /// top-level elements that goes into this statement.
    fn build_insert(
        &self,
        json_array: &str,
        skip: usize,
        limit: Option<usize>,
    ) -> SqlBuilderResult<String>;
}
