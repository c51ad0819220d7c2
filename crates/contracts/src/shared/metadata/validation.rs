//! Validation rules for form fields

use std::collections::BTreeMap;

/// Field name -> first failing message.
pub type FieldErrors = BTreeMap<String, String>;

/// Validation rules for a string field.
/// Copy trait for efficient passing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ValidationRules {
    pub required: Option<&'static str>,
    pub min_length: Option<(usize, &'static str)>,
    pub max_length: Option<(usize, &'static str)>,
}

impl ValidationRules {
    /// Create empty validation rules (all optional, no constraints)
    pub const fn none() -> Self {
        Self {
            required: None,
            min_length: None,
            max_length: None,
        }
    }

    /// Mark the field as required, failing with `message` when blank
    pub const fn required(mut self, message: &'static str) -> Self {
        self.required = Some(message);
        self
    }

    pub const fn min_length(mut self, min: usize, message: &'static str) -> Self {
        self.min_length = Some((min, message));
        self
    }

    pub const fn max_length(mut self, max: usize, message: &'static str) -> Self {
        self.max_length = Some((max, message));
        self
    }

    /// Check if field is required
    pub const fn is_required(&self) -> bool {
        self.required.is_some()
    }

    /// Validate a string value against the rules.
    ///
    /// Returns the single most relevant message: an empty value reports the
    /// required message, otherwise length bounds are checked in order.
    /// Whitespace counts as content. Length is counted in characters, not bytes.
    pub fn validate_string(&self, value: &str) -> Result<(), &'static str> {
        if let Some(message) = self.required {
            if value.is_empty() {
                return Err(message);
            }
        }

        let length = value.chars().count();

        if let Some((min, message)) = self.min_length {
            if length < min {
                return Err(message);
            }
        }

        if let Some((max, message)) = self.max_length {
            if length > max {
                return Err(message);
            }
        }

        Ok(())
    }

    /// Validate `value` and record a failure under `field` in `errors`.
    pub fn collect(&self, field: &str, value: &str, errors: &mut FieldErrors) {
        if let Err(message) = self.validate_string(value) {
            errors
                .entry(field.to_string())
                .or_insert_with(|| message.to_string());
        }
    }
}
