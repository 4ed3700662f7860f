//! # Datafile
//!
//! Metadata of a file uploaded into a dataset. The `dataverse_upload` format
//! carries the JSON part of the multipart upload request together with the
//! dataset `pid` and the local `filename` the client uploads.

use serde_json::{Map, Value};

use crate::config::EntityConfig;
use crate::error::ModelError;
use crate::object::{decode, unknown_attribute, DvObject};

/// Default schema for validating datafile documents.
pub const DATAFILE_SCHEMA_FILENAME: &str = "schemas/json/datafile_upload_schema.json";

/// Attributes of the `dataverse_upload` format.
pub const DATAFILE_UPLOAD_ATTRIBUTES: &[&str] = &[
    "description",
    "categories",
    "restrict",
    "label",
    "directoryLabel",
    "pid",
    "filename",
];

/// Datafile metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Datafile {
    /// Persistent identifier of the dataset the file belongs to.
    pub pid: Option<String>,
    pub filename: Option<String>,
    pub description: Option<String>,
    pub categories: Option<Vec<String>>,
    pub restrict: Option<bool>,
    pub label: Option<String>,
    pub directory_label: Option<String>,
    config: EntityConfig,
}

impl Datafile {
    /// An empty datafile with the default configuration.
    pub fn new() -> Self {
        Self {
            pid: None,
            filename: None,
            description: None,
            categories: None,
            restrict: None,
            label: None,
            directory_label: None,
            config: EntityConfig::new(DATAFILE_SCHEMA_FILENAME, DATAFILE_UPLOAD_ATTRIBUTES),
        }
    }

    /// A datafile populated from a flat mapping, see [`DvObject::set`].
    pub fn from_data(data: &Map<String, Value>) -> Result<Self, ModelError> {
        let mut df = Self::new();
        df.set(data)?;
        Ok(df)
    }

    /// Replace the configuration.
    pub fn with_config(mut self, config: EntityConfig) -> Self {
        self.config = config;
        self
    }
}

impl Default for Datafile {
    fn default() -> Self {
        Self::new()
    }
}

impl DvObject for Datafile {
    const KIND: &'static str = "datafile";

    const ATTRIBUTES: &'static [&'static str] = &[
        "pid",
        "filename",
        "description",
        "categories",
        "restrict",
        "label",
        "directoryLabel",
    ];

    fn config(&self) -> &EntityConfig {
        &self.config
    }

    fn config_mut(&mut self) -> &mut EntityConfig {
        &mut self.config
    }

    fn attribute(&self, name: &str) -> Option<Value> {
        match name {
            "pid" => self.pid.clone().map(Value::String),
            "filename" => self.filename.clone().map(Value::String),
            "description" => self.description.clone().map(Value::String),
            "categories" => self
                .categories
                .as_ref()
                .map(|c| Value::Array(c.iter().cloned().map(Value::String).collect())),
            "restrict" => self.restrict.map(Value::Bool),
            "label" => self.label.clone().map(Value::String),
            "directoryLabel" => self.directory_label.clone().map(Value::String),
            _ => None,
        }
    }

    fn set_attribute(&mut self, name: &str, value: Value) -> Result<(), ModelError> {
        match name {
            "pid" => self.pid = decode(name, value)?,
            "filename" => self.filename = decode(name, value)?,
            "description" => self.description = decode(name, value)?,
            "categories" => self.categories = decode(name, value)?,
            "restrict" => self.restrict = decode(name, value)?,
            "label" => self.label = decode(name, value)?,
            "directoryLabel" => self.directory_label = decode(name, value)?,
            _ => return Err(unknown_attribute(Self::KIND, name)),
        }
        Ok(())
    }
}
