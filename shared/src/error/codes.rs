//! Unified error codes for the restaurant site
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Menu errors
//! - 3xxx: Reservation errors
//! - 4xxx: Content errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// Represented as u16 values for compact serialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Invalid request
    InvalidRequest = 5,
    /// Required field missing
    RequiredField = 7,

    // ==================== 1xxx: Auth ====================
    /// Missing or wrong admin token
    NotAuthenticated = 1001,

    // ==================== 2xxx: Menu ====================
    /// Menu item not found
    MenuItemNotFound = 2001,
    /// Price is missing or not an integer amount of cents
    InvalidPrice = 2002,

    // ==================== 3xxx: Reservation ====================
    /// Reservation not found
    ReservationNotFound = 3001,
    /// Party size outside the accepted range
    InvalidPartySize = 3002,
    /// Unknown reservation status
    InvalidReservationStatus = 3003,
    /// Date/time do not form a valid timestamp
    InvalidReservationTime = 3004,

    // ==================== 4xxx: Content ====================
    /// Strip category not found
    StripNotFound = 4001,
    /// Strip category already exists
    StripAlreadyExists = 4002,
    /// Strip key does not match the allowed pattern
    InvalidStripKey = 4003,
    /// Uploaded image has an unsupported extension
    ImageFormatUnsupported = 4004,
    /// Request body is not a JSON object
    BodyNotObject = 4005,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Required binding (database, bucket) is not configured
    ConfigMissing = 9003,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Default client-facing message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Not found",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::RequiredField => "Required field is missing",

            // Auth
            ErrorCode::NotAuthenticated => "Unauthorized",

            // Menu
            ErrorCode::MenuItemNotFound => "Not found",
            ErrorCode::InvalidPrice => "price_cents must be an integer",

            // Reservation
            ErrorCode::ReservationNotFound => "Not found",
            ErrorCode::InvalidPartySize => "people invalid",
            ErrorCode::InvalidReservationStatus => "status must be new|confirmed|cancelled",
            ErrorCode::InvalidReservationTime => "date/time invalid",

            // Content
            ErrorCode::StripNotFound => "Strip category not found",
            ErrorCode::StripAlreadyExists => "Strip category already exists",
            ErrorCode::InvalidStripKey => "key invalid (use only a-z 0-9 _ -)",
            ErrorCode::ImageFormatUnsupported => "Only jpg/jpeg/png/webp allowed",
            ErrorCode::BodyNotObject => "Body must be a JSON object",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::ConfigMissing => "Configuration missing",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error returned when converting an unknown u16 to [`ErrorCode`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            5 => Ok(ErrorCode::InvalidRequest),
            7 => Ok(ErrorCode::RequiredField),

            1001 => Ok(ErrorCode::NotAuthenticated),

            2001 => Ok(ErrorCode::MenuItemNotFound),
            2002 => Ok(ErrorCode::InvalidPrice),

            3001 => Ok(ErrorCode::ReservationNotFound),
            3002 => Ok(ErrorCode::InvalidPartySize),
            3003 => Ok(ErrorCode::InvalidReservationStatus),
            3004 => Ok(ErrorCode::InvalidReservationTime),

            4001 => Ok(ErrorCode::StripNotFound),
            4002 => Ok(ErrorCode::StripAlreadyExists),
            4003 => Ok(ErrorCode::InvalidStripKey),
            4004 => Ok(ErrorCode::ImageFormatUnsupported),
            4005 => Ok(ErrorCode::BodyNotObject),

            9001 => Ok(ErrorCode::InternalError),
            9003 => Ok(ErrorCode::ConfigMissing),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_values() {
        assert_eq!(ErrorCode::NotFound.code(), 3);
        assert_eq!(ErrorCode::NotAuthenticated.code(), 1001);
        assert_eq!(ErrorCode::MenuItemNotFound.code(), 2001);
        assert_eq!(ErrorCode::InvalidPartySize.code(), 3002);
        assert_eq!(ErrorCode::StripAlreadyExists.code(), 4002);
        assert_eq!(ErrorCode::ConfigMissing.code(), 9003);
    }

    #[test]
    fn test_try_from_roundtrip() {
        for code in [
            ErrorCode::ValidationFailed,
            ErrorCode::NotAuthenticated,
            ErrorCode::InvalidPrice,
            ErrorCode::InvalidReservationTime,
            ErrorCode::BodyNotObject,
            ErrorCode::ConfigMissing,
        ] {
            assert_eq!(ErrorCode::try_from(code.code()), Ok(code));
        }
    }

    #[test]
    fn test_try_from_invalid() {
        assert_eq!(ErrorCode::try_from(1234), Err(InvalidErrorCode(1234)));
        assert_eq!(
            InvalidErrorCode(1234).to_string(),
            "invalid error code: 1234"
        );
    }

    #[test]
    fn test_serialize_as_number() {
        let json = serde_json::to_string(&ErrorCode::NotAuthenticated).unwrap();
        assert_eq!(json, "1001");
        let code: ErrorCode = serde_json::from_str("4001").unwrap();
        assert_eq!(code, ErrorCode::StripNotFound);
        assert!(serde_json::from_str::<ErrorCode>("77").is_err());
    }

    #[test]
    fn test_message() {
        assert_eq!(ErrorCode::NotAuthenticated.message(), "Unauthorized");
        assert_eq!(ErrorCode::NotFound.message(), "Not found");
        assert_eq!(
            ErrorCode::InvalidReservationStatus.message(),
            "status must be new|confirmed|cancelled"
        );
    }
}
