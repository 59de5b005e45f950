use crate::domain::{
    json_array::{JsonArrayElements, to_json_array_literal},
    sql_builder::{QualifiedTable, SqlBuilder, SqlBuilderResult},
    table_column::TableColumn,
};

const INDENT: &str = "    ";

/// PostgreSQL flavour: records are loaded through `json_to_recordset`.
#[derive(Debug, Clone, Default)]
pub struct PostgreSqlBuilder {
    columns: Vec<TableColumn>,
    schema: Option<String>,
    table: Option<String>,
}

impl PostgreSqlBuilder {
    pub fn new(columns: Vec<TableColumn>) -> Self {
        Self {
            columns,
            schema: None,
            table: None,
        }
    }

    fn target(&self) -> SqlBuilderResult<QualifiedTable<'_>> {
        QualifiedTable::new(self.schema.as_deref(), self.table.as_deref())
    }

    fn render_create_table(&self, target: QualifiedTable<'_>) -> String {
        let mut sql = format!("create table {target}(");
        push_column_block(&mut sql, self.columns.iter().map(TableColumn::definition));
        sql.push_str("\n);");
        sql
    }

    fn render_insert(&self, target: QualifiedTable<'_>, json_array_literal: &str) -> String {
        let mut sql = format!("insert into {target} (");
        push_column_block(&mut sql, self.columns.iter().map(TableColumn::quoted_name));
        sql.push_str("\n)\nselect");
        push_column_block(&mut sql, self.columns.iter().map(TableColumn::quoted_name));
        // `'` is the only character that has to be escaped inside a standard
        // string literal.
        sql.push_str("\nfrom json_to_recordset('\n");
        sql.push_str(&json_array_literal.replace('\'', "''"));
        sql.push_str("\n') as x(");
        push_column_block(&mut sql, self.columns.iter().map(TableColumn::definition));
        sql.push_str("\n);");
        sql
    }
}

impl SqlBuilder for PostgreSqlBuilder {
    fn set_schema(&mut self, schema: &str) {
        self.schema = Some(schema.to_string());
    }

    fn set_table_name(&mut self, table_name: &str) {
        self.table = Some(table_name.to_string());
    }

    fn build_create_table(&self) -> SqlBuilderResult<String> {
        let target = self.target()?;
        Ok(self.render_create_table(target))
    }

    fn build_insert(
        &self,
        json_array: &str,
        skip: usize,
        limit: Option<usize>,
    ) -> SqlBuilderResult<String> {
        let target = self.target()?;
        let elements = JsonArrayElements::scan(json_array)?;
        let json_array_literal = to_json_array_literal(elements.window(skip, limit));
        Ok(self.render_insert(target, &json_array_literal))
    }
}

/// One item per line: the first indented, the rest led by `, `.
fn push_column_block(sql: &mut String, items: impl Iterator<Item = String>) {
    for (index, item) in items.enumerate() {
        sql.push('\n');
        sql.push_str(INDENT);
        if index > 0 {
            sql.push_str(", ");
        }
        sql.push_str(&item);
    }
}
