//! JSON schema validators for lintignore DTOs.
//!
//! Schemas are generated from the types with schemars, the same way
//! `cargo xtask schema` generates the published schema files.

use jsonschema::JSONSchema;
use lintignore_types::{ConfigFile, ResolutionReceipt};
use schemars::schema_for;

/// Error type for schema validation failures.
#[derive(Debug)]
pub struct SchemaValidationError {
    pub errors: Vec<String>,
}

impl std::fmt::Display for SchemaValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Schema validation failed: {}", self.errors.join("; "))
    }
}

impl std::error::Error for SchemaValidationError {}

fn compile(schema: schemars::schema::RootSchema) -> JSONSchema {
    let value = serde_json::to_value(schema).expect("schema should serialize");
    JSONSchema::compile(&value).expect("schema should compile")
}

/// Compile the ConfigFile JSON schema.
pub fn config_schema() -> JSONSchema {
    compile(schema_for!(ConfigFile))
}

/// Compile the ResolutionReceipt JSON schema.
pub fn receipt_schema() -> JSONSchema {
    compile(schema_for!(ResolutionReceipt))
}

pub fn validate_config_file(config: &ConfigFile) -> Result<(), SchemaValidationError> {
    let json = serde_json::to_value(config).expect("ConfigFile should serialize to JSON");
    validate_with_schema(&config_schema(), &json)
}

pub fn validate_resolution_receipt(
    receipt: &ResolutionReceipt,
) -> Result<(), SchemaValidationError> {
    let json = serde_json::to_value(receipt).expect("ResolutionReceipt should serialize to JSON");
    validate_with_schema(&receipt_schema(), &json)
}

/// Validate any JSON value against the ResolutionReceipt schema.
pub fn validate_receipt_json(json: &serde_json::Value) -> Result<(), SchemaValidationError> {
    validate_with_schema(&receipt_schema(), json)
}

fn validate_with_schema(
    schema: &JSONSchema,
    json: &serde_json::Value,
) -> Result<(), SchemaValidationError> {
    match schema.validate(json) {
        Ok(()) => Ok(()),
        Err(errors) => Err(SchemaValidationError {
            errors: errors.map(|e| e.to_string()).collect(),
        }),
    }
}
