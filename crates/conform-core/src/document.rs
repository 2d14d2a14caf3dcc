//! # Schema Documents
//!
//! Loads schemas from JSON or YAML text and files. Every node is checked
//! for well-formedness while it is deserialized, so a successfully loaded
//! schema can be handed to the validator as-is.
//!
//! File format is chosen by extension: `.yaml`/`.yml` are YAML, anything
//! else is JSON.

use std::path::Path;

use crate::error::SchemaError;
use crate::schema::Schema;

impl Schema {
    /// Parse a schema from JSON text.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::Load` if the text is not valid JSON or does
    /// not describe a well-formed schema.
    pub fn from_json_str(text: &str) -> Result<Self, SchemaError> {
        Self::from_json_named("<json>", text)
    }

    /// Parse a schema from YAML text.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::Load` if the text is not valid YAML or does
    /// not describe a well-formed schema.
    pub fn from_yaml_str(text: &str) -> Result<Self, SchemaError> {
        Self::from_yaml_named("<yaml>", text)
    }

    /// Convert an already-parsed JSON value into a schema.
    pub fn from_json_value(value: serde_json::Value) -> Result<Self, SchemaError> {
        let schema: Schema = serde_json::from_value(value).map_err(|e| SchemaError::Load {
            source_name: "<json value>".to_string(),
            reason: e.to_string(),
        })?;
        tracing::debug!(source = "<json value>", kind = schema.tag(), "loaded schema");
        Ok(schema)
    }

    /// Load a schema document from disk.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::Io` if the file cannot be read and
    /// `SchemaError::Load` if its contents are not a well-formed schema.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, SchemaError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let name = path.display().to_string();

        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        match ext {
            "yaml" | "yml" => Self::from_yaml_named(&name, &content),
            _ => Self::from_json_named(&name, &content),
        }
    }

    fn from_json_named(name: &str, text: &str) -> Result<Self, SchemaError> {
        let schema: Schema = serde_json::from_str(text).map_err(|e| SchemaError::Load {
            source_name: name.to_string(),
            reason: format!("invalid schema JSON: {e}"),
        })?;
        tracing::debug!(source = name, kind = schema.tag(), "loaded schema");
        Ok(schema)
    }

    fn from_yaml_named(name: &str, text: &str) -> Result<Self, SchemaError> {
        let schema: Schema = serde_yaml::from_str(text).map_err(|e| SchemaError::Load {
            source_name: name.to_string(),
            reason: format!("invalid schema YAML: {e}"),
        })?;
        tracing::debug!(source = name, kind = schema.tag(), "loaded schema");
        Ok(schema)
    }
}
