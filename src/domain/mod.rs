pub mod json_array;
pub mod record_window;
pub mod sql_builder;
pub mod table_column;
