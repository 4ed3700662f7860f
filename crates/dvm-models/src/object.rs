//! # Entity Object Interface
//!
//! [`DvObject`] is implemented by every entity kind. An implementation
//! supplies its attribute names, its bookkeeping configuration and typed
//! accessors for single attributes; the trait's default methods provide the
//! attribute setter, the full dump, format-scoped JSON export, JSON file
//! import and schema validation on top of them.
//!
//! ## Format handling
//!
//! Export and validation reject an unknown format name with
//! [`ModelError::UnsupportedFormat`]. Import does not: it logs a warning,
//! leaves the entity untouched and returns `Ok(false)`.

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::config::{EntityConfig, JsonOptions};
use crate::error::ModelError;
use crate::format::DataFormat;

/// A Dataverse API entity with a flat attribute set.
pub trait DvObject: Clone {
    /// Entity kind, used in log records.
    const KIND: &'static str;

    /// Domain attribute names in declaration order.
    const ATTRIBUTES: &'static [&'static str];

    /// Bookkeeping configuration.
    fn config(&self) -> &EntityConfig;

    /// Mutable bookkeeping configuration.
    fn config_mut(&mut self) -> &mut EntityConfig;

    /// Current value of a domain attribute, `None` when unset.
    fn attribute(&self, name: &str) -> Option<Value>;

    /// Assign a domain attribute. `null` unsets it.
    ///
    /// # Errors
    ///
    /// Returns `ModelError::InvalidAttribute` if `name` is not a domain
    /// attribute or `value` has the wrong JSON type for it.
    fn set_attribute(&mut self, name: &str, value: Value) -> Result<(), ModelError>;

    /// Copy recognized keys of `data` onto the entity.
    ///
    /// Domain attributes and bookkeeping fields are assigned; other keys are
    /// skipped. No schema validation happens here.
    ///
    /// # Errors
    ///
    /// `InvalidAttribute` if any value has the wrong type. The entity is
    /// only updated when every key is accepted.
    fn set(&mut self, data: &Map<String, Value>) -> Result<(), ModelError> {
        let mut next = self.clone();
        for (key, value) in data {
            if Self::ATTRIBUTES.contains(&key.as_str()) {
                next.set_attribute(key, value.clone())?;
            } else if !next.config_mut().set_field(key, value.clone())? {
                tracing::debug!(kind = Self::KIND, key = %key, "skipping unknown key");
            }
        }
        *self = next;
        Ok(())
    }

    /// Every set attribute followed by the bookkeeping fields.
    fn dict(&self) -> Map<String, Value> {
        let mut data: Map<String, Value> = Self::ATTRIBUTES
            .iter()
            .filter_map(|name| self.attribute(name).map(|v| (name.to_string(), v)))
            .collect();
        self.config().write_fields(&mut data);
        data
    }

    /// The set attributes that belong to `format`, in declaration order.
    fn scoped(&self, format: DataFormat) -> Map<String, Value> {
        let allowed = self.config().allow_list(format);
        Self::ATTRIBUTES
            .iter()
            .filter(|name| allowed.iter().any(|a| a.as_str() == **name))
            .filter_map(|name| self.attribute(name).map(|v| (name.to_string(), v)))
            .collect()
    }

    /// Export the attributes of the requested format as a JSON string.
    ///
    /// # Errors
    ///
    /// `UnsupportedFormat` for an unknown format name, `Schema` if
    /// validation is requested and fails.
    fn to_json(&self, opts: &JsonOptions) -> Result<String, ModelError> {
        let format = resolve_format(self.config(), opts)?;
        let data = Value::Object(self.scoped(format));
        if opts.validate {
            dvm_schema::validate_data(&data, &schema_path(self.config(), opts))?;
        }
        Ok(serde_json::to_string_pretty(&data)?)
    }

    /// Validate the attributes of the requested format against the schema.
    fn validate_json(&self, opts: &JsonOptions) -> Result<(), ModelError> {
        let format = resolve_format(self.config(), opts)?;
        let data = Value::Object(self.scoped(format));
        dvm_schema::validate_data(&data, &schema_path(self.config(), opts))?;
        Ok(())
    }

    /// Import the JSON document at `path`.
    ///
    /// Returns `Ok(true)` once the document's attributes of the requested
    /// format have been applied, and `Ok(false)` without reading the file
    /// when the format name is unknown.
    ///
    /// # Errors
    ///
    /// `Read`, `Decode` or `NotAnObject` when the file cannot be loaded,
    /// `Schema` when validation is requested and fails, and
    /// `InvalidAttribute` when a value has the wrong type. The entity is
    /// left unchanged on every error.
    fn from_json(&mut self, path: &Path, opts: &JsonOptions) -> Result<bool, ModelError> {
        let Ok(format) = resolve_format(self.config(), opts) else {
            tracing::warn!(
                kind = Self::KIND,
                format = opts.format.as_deref().unwrap_or_default(),
                "data format not supported for import; nothing imported"
            );
            return Ok(false);
        };

        let document = read_object(path)?;
        if opts.validate {
            dvm_schema::validate_data(
                &Value::Object(document.clone()),
                &schema_path(self.config(), opts),
            )?;
        }

        let allowed = self.config().allow_list(format).to_vec();
        let data: Map<String, Value> = document
            .into_iter()
            .filter(|(key, _)| allowed.contains(key))
            .collect();
        self.set(&data)?;

        tracing::debug!(
            kind = Self::KIND,
            path = %path.display(),
            attributes = data.len(),
            "imported document"
        );
        Ok(true)
    }
}

fn resolve_format(config: &EntityConfig, opts: &JsonOptions) -> Result<DataFormat, ModelError> {
    match opts.format.as_deref() {
        Some(name) => name.parse(),
        None => Ok(config.default_validate_format),
    }
}

fn schema_path(config: &EntityConfig, opts: &JsonOptions) -> PathBuf {
    opts.schema
        .clone()
        .unwrap_or_else(|| config.default_validate_schema_filename.clone())
}

fn read_object(path: &Path) -> Result<Map<String, Value>, ModelError> {
    let content = std::fs::read_to_string(path).map_err(|source| ModelError::Read {
        path: path.display().to_string(),
        source,
    })?;
    match serde_json::from_str(&content) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(ModelError::NotAnObject {
            path: path.display().to_string(),
        }),
        Err(source) => Err(ModelError::Decode {
            path: path.display().to_string(),
            source,
        }),
    }
}

/// Decode an attribute value; `null` decodes to `None`.
pub(crate) fn decode<T: DeserializeOwned>(
    attribute: &str,
    value: Value,
) -> Result<Option<T>, ModelError> {
    serde_json::from_value(value).map_err(|e| ModelError::InvalidAttribute {
        attribute: attribute.to_string(),
        reason: e.to_string(),
    })
}

/// Error for a name that is not one of the entity's attributes.
pub(crate) fn unknown_attribute(kind: &str, name: &str) -> ModelError {
    ModelError::InvalidAttribute {
        attribute: name.to_string(),
        reason: format!("not an attribute of {kind}"),
    }
}
