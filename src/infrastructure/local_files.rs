use std::{fs, path::Path};

use anyhow::{Result, anyhow, bail};
use tracing::debug;

use crate::application::ports::{FileReader, FileWriter};

#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFileReader;

impl FileReader for LocalFileReader {
    fn read_all_text(&self, path: &Path) -> Result<String> {
        let content = fs::read_to_string(path)
            .map_err(|error| anyhow!("Unable to read JSON file {}: {error}", path.display()))?;
        // Compass exports on Windows may start with a byte order mark.
        Ok(match content.strip_prefix('\u{feff}') {
            Some(without_bom) => without_bom.to_string(),
            None => content,
        })
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFileWriter;

impl FileWriter for LocalFileWriter {
    fn write_all_text(&self, path: &Path, content: &str) -> Result<()> {
        if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|error| {
                anyhow!("Unable to create directory {}: {error}", parent.display())
            })?;
        }
        fs::write(path, content)
            .map_err(|error| anyhow!("Unable to write file {}: {error}", path.display()))
    }

    fn ensure_directory_has_no_files(&self, directory: &Path) -> Result<()> {
        if !directory.exists() {
            debug!(directory = %directory.display(), "output directory does not exist yet");
            return Ok(());
        }

        let entries = fs::read_dir(directory).map_err(|error| {
            anyhow!("Unable to read directory {}: {error}", directory.display())
        })?;
        let mut existing_files = Vec::new();
        for entry in entries {
            let entry = entry?;
            if entry.file_type()?.is_file() {
                existing_files.push(entry.file_name().to_string_lossy().into_owned());
            }
        }

        if !existing_files.is_empty() {
            existing_files.sort();
            bail!(
                "Directory {} already contains files: {}",
                directory.display(),
                existing_files.join(", ")
            );
        }
        Ok(())
    }
}
