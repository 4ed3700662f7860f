//! # Dataverse
//!
//! A dataverse is a named collection in a Dataverse installation. The
//! `dataverse_upload` format is the body of the API call that creates one:
//!
//! ```json
//! {
//!   "alias": "science",
//!   "name": "Scientific Research",
//!   "dataverseContacts": [{ "contactEmail": "pi@example.edu" }],
//!   "affiliation": "Scientific Research University",
//!   "description": "We do all the science.",
//!   "dataverseType": "LABORATORY"
//! }
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::config::EntityConfig;
use crate::error::ModelError;
use crate::object::{decode, unknown_attribute, DvObject};

/// Default schema for validating dataverse documents.
pub const DATAVERSE_SCHEMA_FILENAME: &str = "schemas/json/dataverse_upload_schema.json";

/// Attributes of the `dataverse_upload` format.
pub const DATAVERSE_UPLOAD_ATTRIBUTES: &[&str] = &[
    "affiliation",
    "alias",
    "dataverseContacts",
    "dataverseType",
    "description",
    "name",
];

/// A contact address of a dataverse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    /// Email address notified about the dataverse.
    #[serde(rename = "contactEmail")]
    pub contact_email: String,
    /// Other keys of the contact object, e.g. `displayOrder`.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Contact {
    pub fn new(contact_email: impl Into<String>) -> Self {
        Self {
            contact_email: contact_email.into(),
            extra: Map::new(),
        }
    }

    fn to_value(&self) -> Value {
        let mut data = Map::new();
        data.insert("contactEmail".into(), Value::String(self.contact_email.clone()));
        data.extend(self.extra.clone());
        Value::Object(data)
    }
}

/// Dataverse metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dataverse {
    pub alias: Option<String>,
    pub name: Option<String>,
    pub dataverse_contacts: Option<Vec<Contact>>,
    pub affiliation: Option<String>,
    pub description: Option<String>,
    /// One of the API's dataverse categories, e.g. `LABORATORY`.
    pub dataverse_type: Option<String>,
    config: EntityConfig,
}

impl Dataverse {
    /// An empty dataverse with the default configuration.
    pub fn new() -> Self {
        Self {
            alias: None,
            name: None,
            dataverse_contacts: None,
            affiliation: None,
            description: None,
            dataverse_type: None,
            config: EntityConfig::new(DATAVERSE_SCHEMA_FILENAME, DATAVERSE_UPLOAD_ATTRIBUTES),
        }
    }

    /// A dataverse populated from a flat mapping, see [`DvObject::set`].
    pub fn from_data(data: &Map<String, Value>) -> Result<Self, ModelError> {
        let mut dv = Self::new();
        dv.set(data)?;
        Ok(dv)
    }

    /// Replace the configuration.
    pub fn with_config(mut self, config: EntityConfig) -> Self {
        self.config = config;
        self
    }
}

impl Default for Dataverse {
    fn default() -> Self {
        Self::new()
    }
}

impl DvObject for Dataverse {
    const KIND: &'static str = "dataverse";

    const ATTRIBUTES: &'static [&'static str] = &[
        "alias",
        "name",
        "dataverseContacts",
        "affiliation",
        "description",
        "dataverseType",
    ];

    fn config(&self) -> &EntityConfig {
        &self.config
    }

    fn config_mut(&mut self) -> &mut EntityConfig {
        &mut self.config
    }

    fn attribute(&self, name: &str) -> Option<Value> {
        match name {
            "alias" => self.alias.clone().map(Value::String),
            "name" => self.name.clone().map(Value::String),
            "dataverseContacts" => self
                .dataverse_contacts
                .as_ref()
                .map(|contacts| Value::Array(contacts.iter().map(Contact::to_value).collect())),
            "affiliation" => self.affiliation.clone().map(Value::String),
            "description" => self.description.clone().map(Value::String),
            "dataverseType" => self.dataverse_type.clone().map(Value::String),
            _ => None,
        }
    }

    fn set_attribute(&mut self, name: &str, value: Value) -> Result<(), ModelError> {
        match name {
            "alias" => self.alias = decode(name, value)?,
            "name" => self.name = decode(name, value)?,
            "dataverseContacts" => self.dataverse_contacts = decode(name, value)?,
            "affiliation" => self.affiliation = decode(name, value)?,
            "description" => self.description = decode(name, value)?,
            "dataverseType" => self.dataverse_type = decode(name, value)?,
            _ => return Err(unknown_attribute(Self::KIND, name)),
        }
        Ok(())
    }
}
