//! # Schema Validation
//!
//! Runtime validation of JSON documents against JSON Schema definitions.
//! The draft is taken from the schema's own `$schema` keyword; the upload
//! schemas shipped with `dvm-models` declare draft-07.
//!
//! ## Schema Resolution
//!
//! A schema is loaded from a single file. Cross-document `$ref`s, whatever
//! base URI they resolve against (the schema's `$id` or the default
//! `json-schema:///` base), are mapped to a file of the same name in the
//! directory of the loaded schema. Internal `#/definitions/<name>` refs are
//! resolved by the jsonschema crate natively.

use std::fmt;
use std::path::{Path, PathBuf};

use jsonschema::{Retrieve, Uri, ValidationOptions, Validator};
use serde_json::Value;
use thiserror::Error;

/// Local retriever that resolves `$ref` URIs to sibling schema files.
///
/// Prevents the jsonschema crate from making network requests for
/// cross-schema references.
struct SiblingSchemaRetriever {
    /// Directory of the schema being compiled.
    base_dir: PathBuf,
}

impl Retrieve for SiblingSchemaRetriever {
    fn retrieve(
        &self,
        uri: &Uri<&str>,
    ) -> Result<Value, Box<dyn std::error::Error + Send + Sync>> {
        let uri_str = uri.as_str();
        let filename = uri_str
            .split(['#', '?'])
            .next()
            .unwrap_or(uri_str)
            .rsplit('/')
            .next()
            .unwrap_or(uri_str);

        if filename.is_empty() {
            return Err(format!("cannot resolve $ref '{uri_str}' to a local file").into());
        }

        let path = self.base_dir.join(filename);
        tracing::debug!(uri = uri_str, path = %path.display(), "resolving schema $ref");

        let content = std::fs::read_to_string(&path)
            .map_err(|e| format!("cannot read referenced schema {}: {e}", path.display()))?;
        let value: Value = serde_json::from_str(&content)
            .map_err(|e| format!("invalid JSON in referenced schema {}: {e}", path.display()))?;
        Ok(value)
    }
}

/// Error during schema validation.
#[derive(Error, Debug)]
pub enum SchemaValidationError {
    /// The document did not conform to the schema.
    #[error("validation failed against schema '{schema_name}':\n{violations}")]
    ValidationFailed {
        /// Name of the schema that was validated against.
        schema_name: String,
        /// Structured list of individual violations.
        violations: ValidationViolations,
    },

    /// The schema file could not be loaded.
    #[error("schema load error for '{schema_name}': {reason}")]
    SchemaLoadError {
        /// Schema filename or path.
        schema_name: String,
        /// Reason the schema could not be loaded.
        reason: String,
    },

    /// The document file could not be loaded or parsed.
    #[error("document load error for '{path}': {reason}")]
    DocumentLoadError {
        /// Path to the document that failed to load.
        path: String,
        /// Reason the document could not be loaded.
        reason: String,
    },

    /// The compiled validator could not be built (e.g., invalid schema).
    #[error("validator build error for schema '{schema_name}': {reason}")]
    ValidatorBuildError {
        /// Schema filename or path.
        schema_name: String,
        /// Reason the validator could not be built.
        reason: String,
    },
}

impl SchemaValidationError {
    /// Whether this error reports a document that does not satisfy its schema,
    /// as opposed to a problem loading the schema or the document.
    pub fn is_validation_failure(&self) -> bool {
        matches!(self, Self::ValidationFailed { .. })
    }
}

/// A single validation violation with structured context.
#[derive(Debug, Clone)]
pub struct Violation {
    /// JSON Pointer path to the violating field in the instance.
    pub instance_path: String,
    /// JSON Pointer path within the schema that triggered the error.
    pub schema_path: String,
    /// Human-readable description of the violation.
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.instance_path.is_empty() {
            write!(f, "  (root): {}", self.message)
        } else {
            write!(f, "  {}: {}", self.instance_path, self.message)
        }
    }
}

/// Collection of validation violations.
#[derive(Debug, Clone)]
pub struct ValidationViolations {
    violations: Vec<Violation>,
}

impl ValidationViolations {
    /// Returns the number of violations.
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    /// Returns true if there are no violations.
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// Returns a slice of all violations.
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }
}

impl fmt::Display for ValidationViolations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, v) in self.violations.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{v}")?;
        }
        Ok(())
    }
}

/// A schema validator backed by the `jsonschema` crate.
///
/// Holds one parsed schema document together with the path it was loaded
/// from. The compiled validator is built per validation call; schemas are
/// small and documents are validated once per import or export.
#[derive(Debug, Clone)]
pub struct SchemaValidator {
    /// Path the schema was loaded from.
    schema_path: PathBuf,
    /// Parsed schema document.
    schema: Value,
}

impl SchemaValidator {
    /// Load a schema document from `path`.
    ///
    /// # Errors
    ///
    /// Returns `SchemaValidationError::SchemaLoadError` if the file cannot be
    /// read or is not valid JSON.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SchemaValidationError> {
        let schema_path = path.as_ref().to_path_buf();
        let schema_name = schema_path.display().to_string();

        let content = std::fs::read_to_string(&schema_path).map_err(|e| {
            SchemaValidationError::SchemaLoadError {
                schema_name: schema_name.clone(),
                reason: format!("cannot read schema file: {e}"),
            }
        })?;

        let schema: Value = serde_json::from_str(&content).map_err(|e| {
            SchemaValidationError::SchemaLoadError {
                schema_name: schema_name.clone(),
                reason: format!("invalid JSON: {e}"),
            }
        })?;

        tracing::debug!(
            schema = %schema_name,
            draft = schema.get("$schema").and_then(serde_json::Value::as_str).unwrap_or("default"),
            "loaded schema"
        );

        Ok(Self {
            schema_path,
            schema,
        })
    }

    /// Returns the path the schema was loaded from.
    pub fn schema_path(&self) -> &Path {
        &self.schema_path
    }

    /// Returns the parsed schema document.
    pub fn schema(&self) -> &Value {
        &self.schema
    }

    fn schema_name(&self) -> String {
        self.schema_path.display().to_string()
    }

    /// Build `ValidationOptions` with a local retriever so that `$ref`s to
    /// other schema files resolve from the schema's own directory.
    fn build_options(&self) -> ValidationOptions {
        let base_dir = self
            .schema_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();

        let mut opts = jsonschema::options();
        opts.with_retriever(SiblingSchemaRetriever { base_dir });
        opts
    }

    /// Build a compiled `Validator` for the loaded schema.
    ///
    /// # Errors
    ///
    /// Returns `SchemaValidationError::ValidatorBuildError` if the schema is
    /// not a valid JSON Schema or a `$ref` cannot be resolved.
    pub fn build_validator(&self) -> Result<Validator, SchemaValidationError> {
        self.build_options().build(&self.schema).map_err(|e| {
            SchemaValidationError::ValidatorBuildError {
                schema_name: self.schema_name(),
                reason: e.to_string(),
            }
        })
    }

    /// Validate a parsed JSON value against the loaded schema.
    ///
    /// # Errors
    ///
    /// Returns `SchemaValidationError::ValidationFailed` with structured
    /// violation details if the document is invalid.
    pub fn validate_document(&self, instance: &Value) -> Result<(), SchemaValidationError> {
        let validator = self.build_validator()?;

        let errors: Vec<Violation> = validator
            .iter_errors(instance)
            .map(|e| Violation {
                instance_path: e.instance_path.to_string(),
                schema_path: e.schema_path.to_string(),
                message: e.to_string(),
            })
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(SchemaValidationError::ValidationFailed {
                schema_name: self.schema_name(),
                violations: ValidationViolations { violations: errors },
            })
        }
    }

    /// Load a JSON document from `document_path` and validate it.
    ///
    /// # Errors
    ///
    /// Returns `SchemaValidationError::DocumentLoadError` if the file cannot
    /// be read or parsed, and `ValidationFailed` if it does not conform.
    pub fn validate_file(&self, document_path: &Path) -> Result<(), SchemaValidationError> {
        let content = std::fs::read_to_string(document_path).map_err(|e| {
            SchemaValidationError::DocumentLoadError {
                path: document_path.display().to_string(),
                reason: format!("cannot read file: {e}"),
            }
        })?;

        let json_value: Value = serde_json::from_str(&content).map_err(|e| {
            SchemaValidationError::DocumentLoadError {
                path: document_path.display().to_string(),
                reason: format!("invalid JSON: {e}"),
            }
        })?;

        self.validate_document(&json_value)
    }
}

/// Load the schema at `schema_path` and validate `instance` against it.
pub fn validate_data(instance: &Value, schema_path: &Path) -> Result<(), SchemaValidationError> {
    SchemaValidator::from_file(schema_path)?.validate_document(instance)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn write_schema(dir: &Path, name: &str, schema: &Value) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, serde_json::to_string_pretty(schema).unwrap()).unwrap();
        path
    }

    fn contact_schema() -> Value {
        json!({
            "$schema": "http://json-schema.org/draft-07/schema#",
            "type": "object",
            "required": ["alias", "contacts"],
            "additionalProperties": false,
            "properties": {
                "alias": { "type": "string" },
                "contacts": {
                    "type": "array",
                    "minItems": 1,
                    "items": {
                        "type": "object",
                        "required": ["contactEmail"],
                        "properties": { "contactEmail": { "type": "string" } }
                    }
                }
            }
        })
    }

    #[test]
    fn test_validate_valid_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_schema(dir.path(), "contact_schema.json", &contact_schema());
        let validator = SchemaValidator::from_file(&path).unwrap();
        validator
            .validate_document(&json!({
                "alias": "science",
                "contacts": [{ "contactEmail": "pi@example.edu" }]
            }))
            .unwrap();
    }

    #[test]
    fn test_validate_missing_required_field() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_schema(dir.path(), "contact_schema.json", &contact_schema());
        let err = validate_data(&json!({ "alias": "science" }), &path).unwrap_err();
        match &err {
            SchemaValidationError::ValidationFailed { violations, .. } => {
                assert_eq!(violations.len(), 1);
                assert!(
                    violations.violations()[0].message.contains("contacts"),
                    "Expected violation mentioning 'contacts', got: {violations}"
                );
            }
            other => panic!("Expected ValidationFailed, got: {other}"),
        }
        assert!(err.is_validation_failure());
    }

    #[test]
    fn test_validate_additional_properties_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_schema(dir.path(), "contact_schema.json", &contact_schema());
        let err = validate_data(
            &json!({
                "alias": "science",
                "contacts": [{ "contactEmail": "pi@example.edu" }],
                "unexpected": true
            }),
            &path,
        )
        .unwrap_err();
        assert!(err.is_validation_failure(), "extra field was accepted: {err}");
    }

    #[test]
    fn test_violations_report_instance_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_schema(dir.path(), "contact_schema.json", &contact_schema());
        let err = validate_data(&json!({ "alias": 7, "contacts": [] }), &path).unwrap_err();
        let SchemaValidationError::ValidationFailed { violations, .. } = err else {
            panic!("Expected ValidationFailed");
        };
        let paths: Vec<&str> = violations
            .violations()
            .iter()
            .map(|v| v.instance_path.as_str())
            .collect();
        assert!(paths.contains(&"/alias"), "got paths: {paths:?}");
        assert!(paths.contains(&"/contacts"), "got paths: {paths:?}");
    }

    #[test]
    fn test_schema_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = validate_data(&json!({}), &dir.path().join("missing_schema.json")).unwrap_err();
        assert!(
            matches!(err, SchemaValidationError::SchemaLoadError { .. }),
            "Expected SchemaLoadError, got: {err}"
        );
        assert!(!err.is_validation_failure());
    }

    #[test]
    fn test_schema_not_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken_schema.json");
        std::fs::write(&path, "{ not json").unwrap();
        let err = SchemaValidator::from_file(&path).unwrap_err();
        assert!(matches!(err, SchemaValidationError::SchemaLoadError { .. }));
    }

    #[test]
    fn test_invalid_schema_fails_to_build() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_schema(dir.path(), "bad_schema.json", &json!({ "type": 12 }));
        let err = validate_data(&json!({}), &path).unwrap_err();
        assert!(
            matches!(err, SchemaValidationError::ValidatorBuildError { .. }),
            "Expected ValidatorBuildError, got: {err}"
        );
    }

    #[test]
    fn test_sibling_ref_resolution() {
        let dir = tempfile::tempdir().unwrap();
        write_schema(
            dir.path(),
            "email_schema.json",
            &json!({
                "$schema": "http://json-schema.org/draft-07/schema#",
                "type": "object",
                "required": ["contactEmail"],
                "properties": { "contactEmail": { "type": "string" } }
            }),
        );
        let path = write_schema(
            dir.path(),
            "owner_schema.json",
            &json!({
                "$schema": "http://json-schema.org/draft-07/schema#",
                "$id": "https://example.org/schemas/json/owner_schema.json",
                "type": "object",
                "properties": { "owner": { "$ref": "email_schema.json" } }
            }),
        );
        let validator = SchemaValidator::from_file(&path).unwrap();
        validator
            .validate_document(&json!({ "owner": { "contactEmail": "pi@example.edu" } }))
            .unwrap();
        let err = validator
            .validate_document(&json!({ "owner": {} }))
            .unwrap_err();
        assert!(err.is_validation_failure());
    }

    #[test]
    fn test_validate_file_rejects_malformed_document() {
        let dir = tempfile::tempdir().unwrap();
        let schema = write_schema(dir.path(), "contact_schema.json", &contact_schema());
        let doc = dir.path().join("doc.json");
        std::fs::write(&doc, "[1, 2").unwrap();
        let err = SchemaValidator::from_file(&schema)
            .unwrap()
            .validate_file(&doc)
            .unwrap_err();
        assert!(matches!(err, SchemaValidationError::DocumentLoadError { .. }));
    }

    #[test]
    fn test_violation_display_format() {
        let v = Violation {
            instance_path: "/dataverseContacts/0/contactEmail".to_string(),
            schema_path: "/properties/dataverseContacts/items/required".to_string(),
            message: r#""contactEmail" is a required property"#.to_string(),
        };
        let display = v.to_string();
        assert!(display.contains("/dataverseContacts/0/contactEmail"));
        assert!(display.contains("required property"));
    }

    #[test]
    fn test_violation_display_root() {
        let v = Violation {
            instance_path: String::new(),
            schema_path: "/required".to_string(),
            message: r#""alias" is a required property"#.to_string(),
        };
        assert!(v.to_string().contains("(root)"));
    }
}
