use std::path::{Path, PathBuf};

/// Options of one JSON-to-SQL run.
#[derive(Debug, Clone, Default)]
pub struct TransformJsonToSqlCommand {
    pub source_json_path: PathBuf,
    pub table_name: String,
    pub table_schema: String,
    /// `None` writes every record into a single insert file.
    pub max_rows_per_insert_file: Option<usize>,
    /// Name of the JSON schema the source must satisfy; checked only when a
    /// validator is configured.
    pub json_schema_name: Option<String>,
}

impl TransformJsonToSqlCommand {
    /// File name of the source without its extension.
    pub fn source_file_stem(&self) -> String {
        self.source_json_path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    pub fn source_directory(&self) -> &Path {
        self.source_json_path.parent().unwrap_or_else(|| Path::new(""))
    }

    /// All files of one run land in `<source directory>/<source file stem>`.
    pub fn output_directory(&self) -> PathBuf {
        self.source_directory().join(self.source_file_stem())
    }

    pub fn has_blank_source_path(&self) -> bool {
        self.source_json_path.as_os_str().to_string_lossy().trim().is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformJsonToSqlResult {
    pub output_directory: PathBuf,
    pub written_files: Vec<PathBuf>,
    pub record_count: usize,
    pub insert_file_count: usize,
}
