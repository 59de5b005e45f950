use std::{collections::HashMap, fs, path::Path};

use anyhow::{Context, Result, anyhow, bail};
use jsonschema::Validator;
use serde_json::Value;
use tracing::debug;

use crate::application::ports::JsonSchemaValidator;

/// JSON Schema documents compiled once and looked up by name.
#[derive(Default)]
pub struct JsonSchemaRegistry {
    validators: HashMap<String, Validator>,
}

impl JsonSchemaRegistry {
    pub fn register(&mut self, schema_name: &str, schema: &Value) -> Result<()> {
        let validator = jsonschema::validator_for(schema)
            .map_err(|error| anyhow!("JSON schema `{schema_name}` is invalid: {error}"))?;
        self.validators.insert(schema_name.to_string(), validator);
        Ok(())
    }

    /// Registers the schema stored in `path` under the file stem and returns
    /// that name.
    pub fn register_file(&mut self, path: &Path) -> Result<String> {
        let schema_name = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .ok_or_else(|| anyhow!("JSON schema path has no file name: {}", path.display()))?;
        let content = fs::read_to_string(path)
            .map_err(|error| anyhow!("Unable to read JSON schema file {}: {error}", path.display()))?;
        let schema: Value = serde_json::from_str(&content)
            .with_context(|| format!("JSON schema file {} is not valid JSON", path.display()))?;

        self.register(&schema_name, &schema)?;
        debug!(schema = %schema_name, path = %path.display(), "registered JSON schema");
        Ok(schema_name)
    }
}

impl JsonSchemaValidator for JsonSchemaRegistry {
    fn validate(&self, schema_name: &str, json_text: &str) -> Result<()> {
        let validator = self
            .validators
            .get(schema_name)
            .ok_or_else(|| anyhow!("Unknown JSON schema: {schema_name}"))?;
        let instance: Value =
            serde_json::from_str(json_text).map_err(|error| anyhow!("content is not valid JSON: {error}"))?;

        let violations = validator
            .iter_errors(&instance)
            .map(|error| error.to_string())
            .collect::<Vec<_>>();
        if !violations.is_empty() {
            bail!(violations.join("; "));
        }
        Ok(())
    }
}
