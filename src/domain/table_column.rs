use serde::Deserialize;

/// One column of the target table, in the shape of a columns-definition file
/// entry: `{"name": "FirstName", "type": "varchar(100)", "required": true}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TableColumn {
    #[serde(alias = "Name", alias = "ColumnName", alias = "columnName")]
    pub name: String,
    #[serde(rename = "type", alias = "Type", alias = "ColumnType", alias = "columnType")]
    pub column_type: String,
    #[serde(default, alias = "Required")]
    pub required: bool,
}

impl TableColumn {
    pub fn new(name: impl Into<String>, column_type: impl Into<String>, required: bool) -> Self {
        Self {
            name: name.into(),
            column_type: column_type.into(),
            required,
        }
    }

    /// `"<name>" <type>[ not null]`, shared by `create table` and the
    /// `json_to_recordset` row shape.
    pub fn definition(&self) -> String {
        let not_null = if self.required { " not null" } else { "" };
        format!("\"{}\" {}{not_null}", self.name, self.column_type)
    }

    pub fn quoted_name(&self) -> String {
        format!("\"{}\"", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::TableColumn;

    #[test]
    fn definition_appends_not_null_only_when_required() {
        assert_eq!(
            TableColumn::new("FirstName", "varchar(100)", true).definition(),
            "\"FirstName\" varchar(100) not null"
        );
        assert_eq!(
            TableColumn::new("IsClient", "boolean", false).definition(),
            "\"IsClient\" boolean"
        );
    }

    #[test]
    fn deserializes_with_optional_required_flag() {
        let columns: Vec<TableColumn> = serde_json::from_str(
            r#"[{"name": "Phone", "type": "varchar(100)"}, {"Name": "Id", "Type": "int", "Required": true}]"#,
        )
        .expect("columns should be deserialized");

        assert_eq!(
            columns,
            vec![
                TableColumn::new("Phone", "varchar(100)", false),
                TableColumn::new("Id", "int", true),
            ]
        );
    }
}
