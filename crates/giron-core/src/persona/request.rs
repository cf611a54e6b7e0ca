//! Persona registration request model.

use serde::{Deserialize, Serialize};

use crate::error::{GironError, Result};

/// Upper bound for an attached portrait image, in bytes (300 MB).
///
/// Checked locally so an oversized file is rejected before any upload
/// starts.
pub const MAX_IMAGE_BYTES: u64 = 300 * 1024 * 1024;

/// Request to register a new persona with the discussion service.
///
/// Sent as a multipart form: the text fields plus an optional `image`
/// part. Validation happens locally before the request is issued.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePersonaRequest {
    /// Display name (required)
    pub name: String,
    /// Role or title (required)
    pub role: String,
    /// Stance toward the document (required)
    pub position: String,
    /// Speaking-style characteristics (required)
    pub speaking_style: String,
    /// Optional visual icon/emoji
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Optional path to a portrait image to upload alongside the fields
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_path: Option<std::path::PathBuf>,
}

impl CreatePersonaRequest {
    /// Validate the request and return an error if any field is unusable.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(GironError::InvalidPersona(
                "Name is required and cannot be empty".to_string(),
            ));
        }
        if self.role.trim().is_empty() {
            return Err(GironError::InvalidPersona(
                "Role is required and cannot be empty".to_string(),
            ));
        }
        if self.position.trim().is_empty() {
            return Err(GironError::InvalidPersona(
                "Position is required and cannot be empty".to_string(),
            ));
        }
        if self.speaking_style.trim().is_empty() {
            return Err(GironError::InvalidPersona(
                "Speaking style is required and cannot be empty".to_string(),
            ));
        }
        if let Some(path) = &self.image_path {
            let size = std::fs::metadata(path).map(|m| m.len())?;
            if size > MAX_IMAGE_BYTES {
                return Err(GironError::InvalidPersona(
                    "ファイルサイズが大きすぎます（300MB以下）".to_string(),
                ));
            }
        }
        Ok(())
    }
}
