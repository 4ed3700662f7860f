//! # Entity and Call Configuration
//!
//! [`EntityConfig`] holds the bookkeeping fields every entity carries: the
//! default format and schema used for validation, and the attribute
//! allow-list of the `dataverse_upload` format. [`JsonOptions`] carries the
//! per-call choices of an import, export or validation.

use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use crate::error::ModelError;
use crate::format::DataFormat;

/// Names of the bookkeeping fields, in dump order.
pub const BOOKKEEPING_FIELDS: [&str; 3] = [
    "default_validate_format",
    "default_validate_schema_filename",
    "attr_dv_up_values",
];

/// Per-entity defaults and format allow-lists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityConfig {
    /// Format used when a call does not name one.
    pub default_validate_format: DataFormat,
    /// Schema used when a call does not name one. Relative paths resolve
    /// against the working directory.
    pub default_validate_schema_filename: PathBuf,
    /// Attributes belonging to the `dataverse_upload` format, in order.
    pub attr_dv_up_values: Vec<String>,
}

impl EntityConfig {
    /// Configuration validating `dataverse_upload` documents against
    /// `schema_filename`.
    pub fn new(schema_filename: impl Into<PathBuf>, attr_dv_up_values: &[&str]) -> Self {
        Self {
            default_validate_format: DataFormat::DataverseUpload,
            default_validate_schema_filename: schema_filename.into(),
            attr_dv_up_values: attr_dv_up_values.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Attribute allow-list for `format`.
    pub fn allow_list(&self, format: DataFormat) -> &[String] {
        match format {
            DataFormat::DataverseUpload => &self.attr_dv_up_values,
        }
    }

    /// Resolve a relative default schema path against `root`.
    pub fn with_schema_root(mut self, root: &Path) -> Self {
        if self.default_validate_schema_filename.is_relative() {
            self.default_validate_schema_filename = root.join(&self.default_validate_schema_filename);
        }
        self
    }

    /// Append the bookkeeping fields to `data`.
    pub(crate) fn write_fields(&self, data: &mut Map<String, Value>) {
        data.insert(
            BOOKKEEPING_FIELDS[0].to_string(),
            Value::String(self.default_validate_format.to_string()),
        );
        data.insert(
            BOOKKEEPING_FIELDS[1].to_string(),
            Value::String(self.default_validate_schema_filename.display().to_string()),
        );
        data.insert(
            BOOKKEEPING_FIELDS[2].to_string(),
            Value::Array(
                self.attr_dv_up_values
                    .iter()
                    .cloned()
                    .map(Value::String)
                    .collect(),
            ),
        );
    }

    /// Assign a bookkeeping field by name. Returns `false` when `key` is not
    /// a bookkeeping field.
    pub(crate) fn set_field(&mut self, key: &str, value: Value) -> Result<bool, ModelError> {
        match key {
            "default_validate_format" => {
                let name: String = decode_required(key, value)?;
                self.default_validate_format = name.parse()?;
            }
            "default_validate_schema_filename" => {
                let path: String = decode_required(key, value)?;
                self.default_validate_schema_filename = PathBuf::from(path);
            }
            "attr_dv_up_values" => {
                self.attr_dv_up_values = decode_required(key, value)?;
            }
            _ => return Ok(false),
        }
        Ok(true)
    }
}

fn decode_required<T: serde::de::DeserializeOwned>(
    attribute: &str,
    value: Value,
) -> Result<T, ModelError> {
    serde_json::from_value(value).map_err(|e| ModelError::InvalidAttribute {
        attribute: attribute.to_string(),
        reason: e.to_string(),
    })
}

/// Options for [`DvObject::to_json`](crate::DvObject::to_json),
/// [`DvObject::from_json`](crate::DvObject::from_json) and
/// [`DvObject::validate_json`](crate::DvObject::validate_json).
///
/// The default uses the entity's default format and schema and validates.
#[derive(Debug, Clone)]
pub struct JsonOptions {
    /// Format name; `None` selects the entity's default format.
    pub format: Option<String>,
    /// Whether to validate against the schema.
    pub validate: bool,
    /// Schema path; `None` selects the entity's default schema.
    pub schema: Option<PathBuf>,
}

impl Default for JsonOptions {
    fn default() -> Self {
        Self {
            format: None,
            validate: true,
            schema: None,
        }
    }
}

impl JsonOptions {
    /// Default options: entity defaults, validation on.
    pub fn new() -> Self {
        Self::default()
    }

    /// Default options with validation off.
    pub fn unvalidated() -> Self {
        Self::default().validate(false)
    }

    /// Use the format called `name`.
    pub fn format(mut self, name: impl Into<String>) -> Self {
        self.format = Some(name.into());
        self
    }

    /// Turn validation on or off.
    pub fn validate(mut self, validate: bool) -> Self {
        self.validate = validate;
        self
    }

    /// Validate against the schema at `path`.
    pub fn schema(mut self, path: impl Into<PathBuf>) -> Self {
        self.schema = Some(path.into());
        self
    }
}
