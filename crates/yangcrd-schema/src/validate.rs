//! # Fragment Validation
//!
//! Checks external-form instances against a compiled fragment using JSON
//! Schema (Draft 2020-12). The fragment's keywords (`properties`, `items`,
//! `type`, `enum`, `minimum`, `maximum`, `required`) are a JSON Schema subset,
//! so the fragment is used as the schema directly.
//!
//! Failures carry structured violations: the instance path, the schema path
//! and the message for each.

use std::fmt;

use jsonschema::Validator;
use serde_json::Value;
use thiserror::Error;

use yangcrd_core::CrdError;

use crate::fragment::CompiledFragment;

/// Error during fragment validation.
#[derive(Error, Debug)]
pub enum FragmentValidationError {
    /// The instance did not conform to the fragment.
    #[error("validation failed against '{schema_name}':\n{violations}")]
    ValidationFailed {
        /// Name of the fragment that was validated against.
        schema_name: String,
        /// Structured list of individual violations.
        violations: ValidationViolations,
    },

    /// The fragment could not be compiled into a validator.
    #[error("validator build error for '{schema_name}': {reason}")]
    ValidatorBuildError {
        schema_name: String,
        reason: String,
    },

    /// The fragment could not be converted to a JSON Schema value.
    #[error("fragment conversion failed: {0}")]
    Conversion(#[from] CrdError),
}

/// A single validation violation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// JSON Pointer path to the violating field in the instance.
    pub instance_path: String,
    /// JSON Pointer path within the fragment that triggered the error.
    pub schema_path: String,
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
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationViolations {
    violations: Vec<Violation>,
}

impl ValidationViolations {
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    pub fn into_inner(self) -> Vec<Violation> {
        self.violations
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

/// A compiled validator for one fragment.
///
/// Build once and reuse; the compiled validator is `Send + Sync`.
pub struct FragmentValidator {
    schema_name: String,
    validator: Validator,
}

impl fmt::Debug for FragmentValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FragmentValidator")
            .field("schema_name", &self.schema_name)
            .finish_non_exhaustive()
    }
}

impl FragmentValidator {
    /// Compile `fragment` into a validator. `schema_name` labels errors.
    ///
    /// # Errors
    ///
    /// [`FragmentValidationError::ValidatorBuildError`] if the fragment is not
    /// a valid JSON Schema.
    pub fn new(schema_name: impl Into<String>, fragment: &CompiledFragment) -> Result<Self, FragmentValidationError> {
        let schema_name = schema_name.into();
        let schema = fragment.to_json_schema()?;
        Self::from_schema(schema_name, &schema)
    }

    /// Compile an already-converted JSON Schema value.
    pub fn from_schema(schema_name: impl Into<String>, schema: &Value) -> Result<Self, FragmentValidationError> {
        let schema_name = schema_name.into();
        let mut opts = jsonschema::options();
        opts.with_draft(jsonschema::Draft::Draft202012);
        let validator = opts
            .build(schema)
            .map_err(|e| FragmentValidationError::ValidatorBuildError {
                schema_name: schema_name.clone(),
                reason: e.to_string(),
            })?;
        Ok(Self { schema_name, validator })
    }

    pub fn schema_name(&self) -> &str {
        &self.schema_name
    }

    /// Quick boolean check.
    pub fn is_valid(&self, instance: &Value) -> bool {
        self.validator.is_valid(instance)
    }

    /// Validate `instance`, collecting every violation.
    ///
    /// # Errors
    ///
    /// [`FragmentValidationError::ValidationFailed`] listing all violations.
    pub fn validate(&self, instance: &Value) -> Result<(), FragmentValidationError> {
        let violations: Vec<Violation> = self
            .validator
            .iter_errors(instance)
            .map(|e| Violation {
                instance_path: e.instance_path.to_string(),
                schema_path: e.schema_path.to_string(),
                message: e.to_string(),
            })
            .collect();

        if violations.is_empty() {
            Ok(())
        } else {
            tracing::debug!(schema = %self.schema_name, count = violations.len(), "instance rejected");
            Err(FragmentValidationError::ValidationFailed {
                schema_name: self.schema_name.clone(),
                violations: ValidationViolations { violations },
            })
        }
    }
}
