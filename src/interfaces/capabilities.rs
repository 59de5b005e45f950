use std::str::FromStr;

use anyhow::{Result, anyhow};

/// Export formats the reader understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceJsonKind {
    MongoDbCompass,
}

impl SourceJsonKind {
    pub const ALL: [SourceJsonKind; 1] = [SourceJsonKind::MongoDbCompass];

    pub fn as_str(self) -> &'static str {
        match self {
            SourceJsonKind::MongoDbCompass => "mongodbcompass",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            SourceJsonKind::MongoDbCompass => "MongoDB Compass export file",
        }
    }
}

/// Databases the generated SQL targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetSqlKind {
    PostgreSql,
}

impl TargetSqlKind {
    pub const ALL: [TargetSqlKind; 1] = [TargetSqlKind::PostgreSql];

    pub fn as_str(self) -> &'static str {
        match self {
            TargetSqlKind::PostgreSql => "postgres",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            TargetSqlKind::PostgreSql => "PostgreSQL",
        }
    }
}

impl std::fmt::Display for SourceJsonKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::fmt::Display for TargetSqlKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SourceJsonKind {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "mongodbcompass" | "mongodb-compass" | "compass" => Ok(SourceJsonKind::MongoDbCompass),
            _ => Err(anyhow!(
                "Sorry, but now supports only next source json file types:{}",
                list_capabilities(Self::ALL.iter().map(|kind| (kind.as_str(), kind.description())))
            )),
        }
    }
}

impl FromStr for TargetSqlKind {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(TargetSqlKind::PostgreSql),
            _ => Err(anyhow!(
                "Sorry, but now supports only next SQL databases:{}",
                list_capabilities(Self::ALL.iter().map(|kind| (kind.as_str(), kind.description())))
            )),
        }
    }
}

fn list_capabilities<'a>(items: impl Iterator<Item = (&'a str, &'a str)>) -> String {
    items
        .map(|(name, description)| format!("\n  * {name} - {description};"))
        .collect()
}
