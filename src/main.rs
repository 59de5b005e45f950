mod application;
mod domain;
mod infrastructure;
mod interfaces;

use std::process::ExitCode;

use anyhow::Result;
use console::style;
use tracing_subscriber::EnvFilter;

use crate::application::{
    commands::TransformJsonToSqlResult,
    ports::{FileReader, FileWriter},
    use_cases::transform_json_to_sql::TransformJsonToSqlUseCase,
};
use crate::domain::sql_builder::SqlBuilder;
use crate::infrastructure::{
    json_schema_validator::JsonSchemaRegistry,
    local_files::{LocalFileReader, LocalFileWriter},
    postgres_sql_builder::PostgreSqlBuilder,
};
use crate::interfaces::{
    capabilities::{SourceJsonKind, TargetSqlKind},
    cli::{TransformRequest, collect_transform_request},
};

fn main() -> ExitCode {
    match run() {
        Ok(result) => {
            println!(
                "{} {} ({} records, {} insert files)",
                style("Transform success! SQL files have been saved to").green(),
                style(result.output_directory.display()).bold(),
                result.record_count,
                result.insert_file_count,
            );
            for path in &result.written_files {
                println!("  {}", style(path.display()).dim());
            }
            ExitCode::SUCCESS
        }
        Err(error) => {
            eprintln!("{}", style("--------").red());
            eprintln!(
                "{}\n{error}",
                style("Transformation was failed with ERROR:").red().bold()
            );
            eprintln!("{}", style("--------").red());
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<TransformJsonToSqlResult> {
    let request = collect_transform_request()?;
    init_tracing(request.verbose);

    println!(
        "{} {} {}",
        style("Transforming").cyan(),
        style(request.command.source_json_path.display()).bold(),
        style(format!("({} -> {})", request.source_json_kind, request.target_sql_kind)).dim(),
    );
    run_transform(request)
}

/// Wires the adapters picked by the request and runs the transform, refusing
/// to write into a non-empty output directory unless `overwrite` is set.
fn run_transform(mut request: TransformRequest) -> Result<TransformJsonToSqlResult> {
    let file_reader: Box<dyn FileReader> = match request.source_json_kind {
        SourceJsonKind::MongoDbCompass => Box::new(LocalFileReader),
    };
    let file_writer = LocalFileWriter;
    let mut sql_builder: Box<dyn SqlBuilder> = match request.target_sql_kind {
        TargetSqlKind::PostgreSql => Box::new(PostgreSqlBuilder::new(request.columns)),
    };

    let mut json_schemas = JsonSchemaRegistry::default();
    if let Some(schema_path) = &request.json_schema_file {
        request.command.json_schema_name = Some(json_schemas.register_file(schema_path)?);
    }

    if !request.overwrite {
        file_writer.ensure_directory_has_no_files(&request.command.output_directory())?;
    }

    TransformJsonToSqlUseCase::new(file_reader.as_ref(), &file_writer, sql_builder.as_mut())
        .with_json_schema_validator(&json_schemas)
        .execute(&request.command)
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
