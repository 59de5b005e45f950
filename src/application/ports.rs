use std::path::Path;

use anyhow::Result;

pub trait FileReader {
    fn read_all_text(&self, path: &Path) -> Result<String>;
}

pub trait FileWriter {
    /// Missing parent directories are created.
    fn write_all_text(&self, path: &Path, content: &str) -> Result<()>;

    /// Guard against overwriting the output of a previous run. Called by the
    /// entry point before a transform starts, never by the transformer itself.
    fn ensure_directory_has_no_files(&self, directory: &Path) -> Result<()>;
}

pub trait JsonSchemaValidator {
    /// `Err` carries every violation found, already formatted for the user.
    fn validate(&self, schema_name: &str, json_text: &str) -> Result<()>;
}
