//! # Data Formats
//!
//! The named import/export profiles. A format selects which attributes of an
//! entity are read from or written to a document; see
//! [`EntityConfig::allow_list`](crate::EntityConfig::allow_list).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// A supported document format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataFormat {
    /// JSON accepted by the Dataverse API for creating objects.
    DataverseUpload,
}

impl DataFormat {
    /// Every supported format.
    pub const ALL: &'static [DataFormat] = &[DataFormat::DataverseUpload];

    /// The format's wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DataverseUpload => "dataverse_upload",
        }
    }
}

impl fmt::Display for DataFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DataFormat {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|format| format.as_str() == s)
            .ok_or_else(|| ModelError::UnsupportedFormat(s.to_string()))
    }
}
