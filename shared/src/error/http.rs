//! HTTP status code mapping for error codes

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Get the appropriate HTTP status code for this error code
    pub fn http_status(&self) -> StatusCode {
        match self {
            Self::QuoteNotFound
            | Self::BrandNotFound
            | Self::WeightProfileNotFound
            | Self::ProductNotFound => StatusCode::NOT_FOUND,

            Self::BrandNameExists => StatusCode::CONFLICT,

            Self::ExtractionUnreadable => StatusCode::UNPROCESSABLE_ENTITY,

            Self::DatabaseError => StatusCode::INTERNAL_SERVER_ERROR,

            // 400 Bad Request (validation and input errors)
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_statuses() {
        assert_eq!(ErrorCode::ProductNotFound.http_status(), StatusCode::NOT_FOUND);
        assert_eq!(ErrorCode::QuoteNotFound.http_status(), StatusCode::NOT_FOUND);
        assert_eq!(ErrorCode::BrandNotFound.http_status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_validation_statuses() {
        assert_eq!(ErrorCode::InvalidInput.http_status(), StatusCode::BAD_REQUEST);
        assert_eq!(ErrorCode::QuoteEmpty.http_status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ErrorCode::CustomerNameRequired.http_status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ErrorCode::ValueOutOfRange.http_status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ErrorCode::ExtractionUnreadable.http_status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }

    #[test]
    fn test_conflict_and_system_statuses() {
        assert_eq!(ErrorCode::BrandNameExists.http_status(), StatusCode::CONFLICT);
        assert_eq!(
            ErrorCode::DatabaseError.http_status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
