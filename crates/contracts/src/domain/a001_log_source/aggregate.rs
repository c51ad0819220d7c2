use serde::{Deserialize, Serialize};

use crate::domain::common::RecordId;
use crate::shared::metadata::{FieldErrors, ValidationRules};

// ============================================================================
// Aggregate
// ============================================================================

/// Registered log source (a named log origin owned by a user)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    pub id: RecordId,
    pub name: String,
    #[serde(rename = "user")]
    pub owner: RecordId,
}

/// Request body for `POST /api/sources/`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateSourceDto {
    pub name: String,
    pub user: RecordId,
}

// ============================================================================
// Draft
// ============================================================================

pub const NAME_MIN_LENGTH: usize = 2;
pub const NAME_MAX_LENGTH: usize = 50;

pub const NAME_RULES: ValidationRules = ValidationRules::none()
    .required("Source name is required")
    .min_length(
        NAME_MIN_LENGTH,
        "Too Short! Minimum length is 2 characters long",
    )
    .max_length(
        NAME_MAX_LENGTH,
        "Too Long! Maximum length is 50 characters long",
    );

/// Unsaved input of the "add source" form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceDraft {
    pub name: String,
}

impl SourceDraft {
    pub const NAME_FIELD: &'static str = "name";

    /// Run the field rules. `Ok` means the draft may be submitted.
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        NAME_RULES.collect(Self::NAME_FIELD, &self.name, &mut errors);

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Message to render next to the name input, if any
    pub fn name_error(&self) -> Option<&'static str> {
        NAME_RULES.validate_string(&self.name).err()
    }

    /// Build the create request for `owner`
    pub fn to_create_dto(&self, owner: RecordId) -> CreateSourceDto {
        CreateSourceDto {
            name: self.name.clone(),
            user: owner,
        }
    }
}
