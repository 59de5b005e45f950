use std::{
    env,
    path::{Path, PathBuf},
};

use anyhow::{Result, anyhow};
use clap::Parser;
use console::style;
use dialoguer::{Confirm, Editor, Input, Select, theme::ColorfulTheme};

use crate::{
    application::commands::TransformJsonToSqlCommand,
    domain::table_column::TableColumn,
    infrastructure::columns_definition::{
        is_safe_identifier, load_columns_definition, parse_columns_definition,
    },
    interfaces::capabilities::{SourceJsonKind, TargetSqlKind},
};

const DEFAULT_SCHEMA: &str = "public";
const COLUMNS_DEFINITION_TEMPLATE: &str = r#"[
    {"name": "FirstName", "type": "varchar(100)", "required": true},
    {"name": "IsClient", "type": "boolean"}
]
"#;

#[derive(Debug, Parser)]
#[command(
    name = "j2s",
    version,
    about = "JSON to SQL files transformer: one create-table file plus batched insert files"
)]
struct CliArgs {
    #[arg(long, help = "Full path to source *.json file")]
    source_json: Option<PathBuf>,
    #[arg(
        long,
        default_value = "mongodbcompass",
        help = "One of available source JSON file types"
    )]
    source_json_type: String,
    #[arg(long, default_value = "postgres", help = "One of available target SQL databases")]
    target_sql: String,
    #[arg(long, help = "Name of SQL table")]
    table_name: Option<String>,
    #[arg(long, help = "Name of SQL table schema")]
    schema: Option<String>,
    #[arg(long, help = "Max rows in INSERT statement per 1 *.sql file")]
    limit_inserts: Option<usize>,
    #[arg(long, help = "Full path to *.json file for SQL table columns definition")]
    columns_definition_file: Option<PathBuf>,
    #[arg(long, help = "JSON Schema file the source must satisfy")]
    json_schema_file: Option<PathBuf>,
    #[arg(long, help = "Write into an output directory that already contains files")]
    overwrite: bool,
    #[arg(long, short = 'v', help = "Print debug logs to stderr")]
    verbose: bool,
}

/// Everything the entry point needs to wire and run one transform.
#[derive(Debug)]
pub struct TransformRequest {
    pub command: TransformJsonToSqlCommand,
    pub columns: Vec<TableColumn>,
    pub source_json_kind: SourceJsonKind,
    pub target_sql_kind: TargetSqlKind,
    pub json_schema_file: Option<PathBuf>,
    pub overwrite: bool,
    pub verbose: bool,
}

pub fn collect_transform_request() -> Result<TransformRequest> {
    if env::args_os().len() == 1 {
        return collect_interactive_request();
    }
    collect_request_from_args(CliArgs::parse())
}

fn collect_request_from_args(args: CliArgs) -> Result<TransformRequest> {
    let source_json_path = args
        .source_json
        .ok_or_else(|| anyhow!("--source-json is required when using argument mode"))?;
    let source_json_kind = args.source_json_type.parse::<SourceJsonKind>()?;
    let target_sql_kind = args.target_sql.parse::<TargetSqlKind>()?;
    let table_name = args
        .table_name
        .ok_or_else(|| anyhow!("--table-name is required when using argument mode"))?;
    let table_name = ensure_identifier(table_name, "Table name")?;
    let table_schema = args
        .schema
        .ok_or_else(|| anyhow!("--schema is required when using argument mode"))?;
    let table_schema = ensure_identifier(table_schema, "Schema")?;
    let max_rows_per_insert_file = args.limit_inserts.map(ensure_positive_limit).transpose()?;
    let columns_definition_file = args.columns_definition_file.ok_or_else(|| {
        anyhow!("--columns-definition-file is required when using argument mode")
    })?;
    let columns = load_columns_definition(&columns_definition_file)?;

    Ok(TransformRequest {
        command: TransformJsonToSqlCommand {
            source_json_path,
            table_name,
            table_schema,
            max_rows_per_insert_file,
            json_schema_name: None,
        },
        columns,
        source_json_kind,
        target_sql_kind,
        json_schema_file: args.json_schema_file,
        overwrite: args.overwrite,
        verbose: args.verbose,
    })
}

fn collect_interactive_request() -> Result<TransformRequest> {
    let theme = ColorfulTheme::default();

    println!();
    println!(
        "{}",
        style(" j2s - JSON TO SQL FILES ")
            .black()
            .on_cyan()
            .bold()
            .underlined()
    );
    println!(
        "{}",
        style("Turn a JSON array export into create-table and batched insert files").dim()
    );
    println!();

    let source_kind_items = SourceJsonKind::ALL
        .iter()
        .map(|kind| kind.description())
        .collect::<Vec<_>>();
    let source_kind_index = Select::with_theme(&theme)
        .with_prompt("Source JSON file type")
        .default(0)
        .items(&source_kind_items)
        .interact()?;
    let source_json_kind = SourceJsonKind::ALL[source_kind_index];

    let source_json_path: String = Input::with_theme(&theme)
        .with_prompt("Source JSON file path")
        .validate_with(|value: &String| {
            if Path::new(value.trim()).is_file() {
                Ok(())
            } else {
                Err("File does not exist")
            }
        })
        .interact_text()?;

    let target_kind_items = TargetSqlKind::ALL
        .iter()
        .map(|kind| kind.description())
        .collect::<Vec<_>>();
    let target_kind_index = Select::with_theme(&theme)
        .with_prompt("Target SQL database")
        .default(0)
        .items(&target_kind_items)
        .interact()?;
    let target_sql_kind = TargetSqlKind::ALL[target_kind_index];

    let table_schema: String = Input::with_theme(&theme)
        .with_prompt("Table schema")
        .default(DEFAULT_SCHEMA.to_string())
        .validate_with(|value: &String| validate_identifier_input(value))
        .interact_text()?;

    let table_name: String = Input::with_theme(&theme)
        .with_prompt("Table name")
        .validate_with(|value: &String| validate_identifier_input(value))
        .interact_text()?;

    let limit_inserts: String = Input::with_theme(&theme)
        .with_prompt("Max rows per insert file (empty = no limit)")
        .allow_empty(true)
        .validate_with(|value: &String| parse_optional_limit(value).map(|_| ()))
        .interact_text()?;
    let max_rows_per_insert_file = parse_optional_limit(&limit_inserts).map_err(|error| anyhow!(error))?;

    let columns_source_options = [
        "Load columns definition from file",
        "Edit columns definition in your editor",
    ];
    let columns_source_index = Select::with_theme(&theme)
        .with_prompt("Columns definition")
        .default(0)
        .items(&columns_source_options)
        .interact()?;
    let columns = if columns_source_index == 0 {
        let columns_file_path: String = Input::with_theme(&theme)
            .with_prompt("Columns definition file path")
            .interact_text()?;
        load_columns_definition(Path::new(columns_file_path.trim()))?
    } else {
        let edited_columns = Editor::new()
            .extension(".json")
            .edit(COLUMNS_DEFINITION_TEMPLATE)?
            .ok_or_else(|| anyhow!("No columns definition detected from editor"))?;
        parse_columns_definition(&edited_columns)?
    };

    let json_schema_file: String = Input::with_theme(&theme)
        .with_prompt("JSON Schema file path (empty = skip validation)")
        .allow_empty(true)
        .validate_with(|value: &String| validate_optional_file_input(value))
        .interact_text()?;

    let overwrite = Confirm::with_theme(&theme)
        .with_prompt("Overwrite files that already exist in the output directory?")
        .default(false)
        .interact()?;

    Ok(TransformRequest {
        command: TransformJsonToSqlCommand {
            source_json_path: PathBuf::from(source_json_path.trim()),
            table_name: table_name.trim().to_string(),
            table_schema: table_schema.trim().to_string(),
            max_rows_per_insert_file,
            json_schema_name: None,
        },
        columns,
        source_json_kind,
        target_sql_kind,
        json_schema_file: parse_optional_path(&json_schema_file),
        overwrite,
        verbose: false,
    })
}

fn validate_identifier_input(value: &str) -> Result<(), &'static str> {
    if is_safe_identifier(value.trim()) {
        Ok(())
    } else {
        Err("Value must not be empty or contain `\"`")
    }
}

fn validate_optional_file_input(value: &str) -> Result<(), &'static str> {
    match parse_optional_path(value) {
        Some(path) if !path.is_file() => Err("File does not exist"),
        _ => Ok(()),
    }
}

fn parse_optional_path(value: &str) -> Option<PathBuf> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| PathBuf::from(trimmed))
}

fn parse_optional_limit(value: &str) -> Result<Option<usize>, &'static str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    match trimmed.parse::<usize>() {
        Ok(0) | Err(_) => Err("Limit must be a whole number greater than 0"),
        Ok(limit) => Ok(Some(limit)),
    }
}

fn ensure_positive_limit(limit: usize) -> Result<usize> {
    if limit == 0 {
        return Err(anyhow!("--limit-inserts must be greater than 0"));
    }
    Ok(limit)
}

fn ensure_identifier(value: String, field_name: &str) -> Result<String> {
    if !is_safe_identifier(&value) {
        return Err(anyhow!("{field_name} must not be empty or contain `\"`"));
    }
    Ok(value)
}
