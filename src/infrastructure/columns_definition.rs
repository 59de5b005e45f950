use std::{
    collections::HashSet,
    fmt::{self, Display},
    fs,
    path::Path,
    sync::LazyLock,
};

use anyhow::{Result, anyhow};
use regex::Regex;
use tracing::debug;

use crate::domain::table_column::TableColumn;

static IDENTIFIER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^[^"\p{Cc}]*[^"\p{Cc}\s][^"\p{Cc}]*$"#).expect("identifier pattern is valid")
});

// Any type expression that stays inside one statement: non-blank, no `;`,
// no control characters.
static COLUMN_TYPE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^;\p{Cc}]*[^;\p{Cc}\s][^;\p{Cc}]*$").expect("column type pattern is valid")
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnDefinitionError {
    InvalidJson(String),
    NoColumns,
    InvalidName { position: usize, name: String },
    InvalidType { name: String, column_type: String },
    DuplicateName(String),
}

impl Display for ColumnDefinitionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnDefinitionError::InvalidJson(message) => {
                write!(f, "Columns definition is not a valid JSON array of columns: {message}")
            }
            ColumnDefinitionError::NoColumns => {
                f.write_str("Columns definition must contain at least one column")
            }
            ColumnDefinitionError::InvalidName { position, name } => {
                write!(
                    f,
                    "Column #{position} has an invalid name `{name}`: it must not be blank or contain `\"`"
                )
            }
            ColumnDefinitionError::InvalidType { name, column_type } => {
                write!(f, "Column `{name}` has an unsupported SQL type `{column_type}`")
            }
            ColumnDefinitionError::DuplicateName(name) => {
                write!(f, "Column `{name}` is defined more than once")
            }
        }
    }
}

impl std::error::Error for ColumnDefinitionError {}

/// Usable as a double-quoted SQL identifier without escaping.
pub fn is_safe_identifier(value: &str) -> bool {
    IDENTIFIER_PATTERN.is_match(value)
}

pub fn parse_columns_definition(content: &str) -> Result<Vec<TableColumn>, ColumnDefinitionError> {
    let columns: Vec<TableColumn> = serde_json::from_str(content)
        .map_err(|error| ColumnDefinitionError::InvalidJson(error.to_string()))?;
    if columns.is_empty() {
        return Err(ColumnDefinitionError::NoColumns);
    }

    let mut seen_names = HashSet::new();
    for (index, column) in columns.iter().enumerate() {
        if !is_safe_identifier(&column.name) {
            return Err(ColumnDefinitionError::InvalidName {
                position: index + 1,
                name: column.name.clone(),
            });
        }
        if !COLUMN_TYPE_PATTERN.is_match(column.column_type.trim()) {
            return Err(ColumnDefinitionError::InvalidType {
                name: column.name.clone(),
                column_type: column.column_type.clone(),
            });
        }
        if !seen_names.insert(column.name.as_str()) {
            return Err(ColumnDefinitionError::DuplicateName(column.name.clone()));
        }
    }

    Ok(columns
        .iter()
        .map(|column| TableColumn::new(&column.name, column.column_type.trim(), column.required))
        .collect())
}

pub fn load_columns_definition(path: &Path) -> Result<Vec<TableColumn>> {
    let content = fs::read_to_string(path).map_err(|error| {
        anyhow!("Unable to read columns definition file {}: {error}", path.display())
    })?;
    let columns = parse_columns_definition(&content)?;
    debug!(path = %path.display(), columns = columns.len(), "loaded columns definition");
    Ok(columns)
}
