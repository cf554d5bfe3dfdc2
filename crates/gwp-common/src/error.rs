//! Error types for the groundwater potential services.

use thiserror::Error;

/// Result type alias using GwpError.
pub type GwpResult<T> = Result<T, GwpError>;

/// Primary error type for prediction and analysis operations.
#[derive(Debug, Error)]
pub enum GwpError {
    // === Request Errors ===
    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value for '{field}': {message}")]
    InvalidField { field: String, message: String },

    #[error("Coordinates are outside {0} district")]
    OutsideDistrict(String),

    #[error("Maximum {0} coordinates allowed per batch")]
    TooManyCoordinates(usize),

    #[error("Maximum {0} locations for comparison")]
    TooManyLocations(usize),

    #[error("No valid points in specified area")]
    NoValidPoints,

    #[error("Please provide email or phone number")]
    MissingContact,

    // === Data Errors ===
    #[error("Failed to read GWP raster: {0}")]
    Raster(String),

    // === Infrastructure Errors ===
    #[error("Upstream service error: {0}")]
    Upstream(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl GwpError {
    pub fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        GwpError::InvalidField {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            GwpError::MissingField(_)
            | GwpError::InvalidField { .. }
            | GwpError::OutsideDistrict(_)
            | GwpError::TooManyCoordinates(_)
            | GwpError::TooManyLocations(_)
            | GwpError::NoValidPoints
            | GwpError::MissingContact => 400,

            GwpError::Upstream(_) => 502,

            GwpError::Raster(_) | GwpError::Internal(_) => 500,
        }
    }

    /// True when the caller sent something we cannot serve.
    pub fn is_client_error(&self) -> bool {
        self.status_code() < 500
    }
}

impl From<std::io::Error> for GwpError {
    fn from(err: std::io::Error) -> Self {
        GwpError::Internal(err.to_string())
    }
}

impl From<serde_json::Error> for GwpError {
    fn from(err: serde_json::Error) -> Self {
        GwpError::Internal(format!("JSON error: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(GwpError::MissingField("lat".into()).status_code(), 400);
        assert_eq!(GwpError::OutsideDistrict("Dharwad".into()).status_code(), 400);
        assert_eq!(GwpError::Upstream("timeout".into()).status_code(), 502);
        assert_eq!(GwpError::Raster("bad png".into()).status_code(), 500);
    }

    #[test]
    fn test_display() {
        assert_eq!(
            GwpError::TooManyCoordinates(50).to_string(),
            "Maximum 50 coordinates allowed per batch"
        );
        assert_eq!(
            GwpError::TooManyLocations(5).to_string(),
            "Maximum 5 locations for comparison"
        );
        assert_eq!(
            GwpError::OutsideDistrict("Dharwad".into()).to_string(),
            "Coordinates are outside Dharwad district"
        );
    }
}
