use std::path::PathBuf;

use anyhow::{Result, anyhow, bail};
use tracing::{debug, info};

use crate::{
    application::{
        commands::{TransformJsonToSqlCommand, TransformJsonToSqlResult},
        ports::{FileReader, FileWriter, JsonSchemaValidator},
    },
    domain::{json_array::count_elements, record_window::RecordWindowSlicer, sql_builder::SqlBuilder},
};

const CREATE_TABLE_FILE_NUMBER: usize = 1;

/// Turns one JSON array export into a create-table file followed by one or
/// more insert files, numbered in the order they have to be executed.
pub struct TransformJsonToSqlUseCase<'a> {
    file_reader: &'a dyn FileReader,
    file_writer: &'a dyn FileWriter,
    sql_builder: &'a mut dyn SqlBuilder,
    json_schema_validator: Option<&'a dyn JsonSchemaValidator>,
}

impl<'a> TransformJsonToSqlUseCase<'a> {
    pub fn new(
        file_reader: &'a dyn FileReader,
        file_writer: &'a dyn FileWriter,
        sql_builder: &'a mut dyn SqlBuilder,
    ) -> Self {
        Self {
            file_reader,
            file_writer,
            sql_builder,
            json_schema_validator: None,
        }
    }

    pub fn with_json_schema_validator(mut self, validator: &'a dyn JsonSchemaValidator) -> Self {
        self.json_schema_validator = Some(validator);
        self
    }

    /// Every failure, whatever step raised it, ends the run with its message.
    /// Files written before the failure are left in place.
    pub fn execute(&mut self, command: &TransformJsonToSqlCommand) -> Result<TransformJsonToSqlResult> {
        if command.has_blank_source_path() {
            bail!("Source file path is incorrect");
        }

        let json_content = self.file_reader.read_all_text(&command.source_json_path)?;
        debug!(
            path = %command.source_json_path.display(),
            bytes = json_content.len(),
            "read source JSON"
        );

        self.validate(command, &json_content)?;
        let record_count = count_elements(&json_content)?;

        self.sql_builder.set_schema(&command.table_schema);
        self.sql_builder.set_table_name(&command.table_name);

        let output_directory = command.output_directory();
        let mut written_files = Vec::new();

        let create_table_sql = self.sql_builder.build_create_table()?;
        let create_table_path = output_directory.join(create_table_file_name(
            CREATE_TABLE_FILE_NUMBER,
            &command.table_schema,
            &command.table_name,
        ));
        self.write_sql_file(create_table_path, &create_table_sql, &mut written_files)?;

        let window_slicer = RecordWindowSlicer::new(record_count, command.max_rows_per_insert_file);
        let mut insert_file_count = 0usize;
        for (window, file_number) in window_slicer
            .iter_windows()
            .zip(CREATE_TABLE_FILE_NUMBER + 1..)
        {
            let insert_sql =
                self.sql_builder
                    .build_insert(&json_content, window.skip, window.limit)?;
            let insert_path = output_directory.join(insert_values_file_name(
                file_number,
                &command.table_schema,
                &command.table_name,
            ));
            self.write_sql_file(insert_path, &insert_sql, &mut written_files)?;
            insert_file_count += 1;
        }

        info!(
            records = record_count,
            insert_files = insert_file_count,
            output = %output_directory.display(),
            "transform finished"
        );

        Ok(TransformJsonToSqlResult {
            output_directory,
            written_files,
            record_count,
            insert_file_count,
        })
    }

    fn validate(&self, command: &TransformJsonToSqlCommand, json_content: &str) -> Result<()> {
        let Some(schema_name) = command.json_schema_name.as_deref() else {
            return Ok(());
        };
        let Some(validator) = self.json_schema_validator else {
            bail!("JSON schema `{schema_name}` was requested, but no JSON schema validator is configured");
        };

        validator
            .validate(schema_name, json_content)
            .map_err(|error| anyhow!("File has incorrect JSON: {error}"))?;
        debug!(schema = schema_name, "source JSON matches schema");
        Ok(())
    }

    fn write_sql_file(&self, path: PathBuf, sql: &str, written_files: &mut Vec<PathBuf>) -> Result<()> {
        self.file_writer.write_all_text(&path, sql)?;
        debug!(path = %path.display(), bytes = sql.len(), "wrote SQL file");
        written_files.push(path);
        Ok(())
    }
}

fn create_table_file_name(file_number: usize, schema: &str, table: &str) -> String {
    format!("{file_number:03}-create-table-{schema}_{table}.sql")
}

fn insert_values_file_name(file_number: usize, schema: &str, table: &str) -> String {
    format!("{file_number:03}-insert-values-into-{schema}_{table}.sql")
}
