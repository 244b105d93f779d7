//! HTTP status code mapping for error codes

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Get the appropriate HTTP status code for this error code
    pub fn http_status(&self) -> StatusCode {
        match self {
            // 404 Not Found
            Self::NotFound
            | Self::MenuItemNotFound
            | Self::ReservationNotFound
            | Self::StripNotFound => StatusCode::NOT_FOUND,

            // 409 Conflict
            Self::StripAlreadyExists => StatusCode::CONFLICT,

            // 401 Unauthorized
            Self::NotAuthenticated => StatusCode::UNAUTHORIZED,

            // 400 Bad Request
            Self::ValidationFailed
            | Self::InvalidRequest
            | Self::RequiredField
            | Self::InvalidPrice
            | Self::InvalidPartySize
            | Self::InvalidReservationStatus
            | Self::InvalidReservationTime
            | Self::InvalidStripKey
            | Self::ImageFormatUnsupported
            | Self::BodyNotObject => StatusCode::BAD_REQUEST,

            // 500 Internal Server Error
            Self::InternalError | Self::ConfigMissing => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
