//! Specification file loading.

use std::path::Path;

use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::error::{IngestError, Result};

/// Encodings a specification file may use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecificationFormat {
    Json,
    Toml,
    /// A YAML stream; every `---` document is decoded separately.
    Yaml,
}

impl SpecificationFormat {
    /// Detect the format from the file extension (case-insensitive).
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default();
        if extension.eq_ignore_ascii_case("json") {
            Ok(SpecificationFormat::Json)
        } else if extension.eq_ignore_ascii_case("toml") {
            Ok(SpecificationFormat::Toml)
        } else if extension.eq_ignore_ascii_case("yaml") || extension.eq_ignore_ascii_case("yml") {
            Ok(SpecificationFormat::Yaml)
        } else {
            Err(IngestError::UnsupportedFormat {
                path: path.to_path_buf(),
                extension: extension.to_string(),
            })
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SpecificationFormat::Json => "json",
            SpecificationFormat::Toml => "toml",
            SpecificationFormat::Yaml => "yaml",
        }
    }
}

/// Read a specification file and split it into documents.
///
/// A file holds a list of documents, a mapping with an `examinations` list,
/// or a single document. In a YAML stream each `---` document is split the
/// same way and empty documents are skipped.
pub fn load_documents(path: &Path) -> Result<Vec<Value>> {
    if !path.is_file() {
        return Err(IngestError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let format = SpecificationFormat::from_path(path)?;
    let content = std::fs::read_to_string(path).map_err(|e| IngestError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    let trees = decode(&content, format).map_err(|error| match error {
        DecodeError::Json(source) => IngestError::Json {
            path: path.to_path_buf(),
            source,
        },
        DecodeError::Toml(source) => IngestError::Toml {
            path: path.to_path_buf(),
            source,
        },
        DecodeError::Yaml(source) => IngestError::Yaml {
            path: path.to_path_buf(),
            source,
        },
    })?;
    let documents: Vec<Value> = trees.into_iter().flat_map(split_documents).collect();
    debug!(
        path = %path.display(),
        format = format.as_str(),
        document_count = documents.len(),
        "loaded specification file"
    );
    Ok(documents)
}

enum DecodeError {
    Json(serde_json::Error),
    Toml(toml::de::Error),
    Yaml(serde_yaml::Error),
}

fn decode(
    content: &str,
    format: SpecificationFormat,
) -> std::result::Result<Vec<Value>, DecodeError> {
    match format {
        SpecificationFormat::Json => serde_json::from_str(content)
            .map(|tree| vec![tree])
            .map_err(DecodeError::Json),
        SpecificationFormat::Toml => toml::from_str(content)
            .map(|tree| vec![tree])
            .map_err(DecodeError::Toml),
        SpecificationFormat::Yaml => decode_yaml_stream(content).map_err(DecodeError::Yaml),
    }
}

fn decode_yaml_stream(content: &str) -> std::result::Result<Vec<Value>, serde_yaml::Error> {
    let mut trees = Vec::new();
    for document in serde_yaml::Deserializer::from_str(content) {
        let tree = Value::deserialize(document)?;
        if !tree.is_null() {
            trees.push(tree);
        }
    }
    Ok(trees)
}

/// Split a decoded tree into specification documents.
pub fn split_documents(tree: Value) -> Vec<Value> {
    match tree {
        Value::Array(documents) => documents,
        Value::Object(mut map) => match map.remove("examinations") {
            Some(Value::Array(documents)) => documents,
            Some(other) => {
                map.insert("examinations".to_string(), other);
                vec![Value::Object(map)]
            }
            None => vec![Value::Object(map)],
        },
        other => vec![other],
    }
}
