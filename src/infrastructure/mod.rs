pub mod columns_definition;
pub mod json_schema_validator;
pub mod local_files;
pub mod postgres_sql_builder;
