//! HTTP status code mapping for error codes
//!
//! The catalog API maps conflict-class failures (insufficient stock,
//! duplicate inventory, category in use, duplicate names/SKUs) to 400,
//! matching the wire contract the clients already depend on. Only true
//! not-found codes are 404 and system codes 500.

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Get the appropriate HTTP status code for this error code
    pub fn http_status(&self) -> StatusCode {
        match self {
            // Success
            Self::Success => StatusCode::OK,

            // 404 Not Found
            Self::NotFound
            | Self::ProductNotFound
            | Self::CategoryNotFound
            | Self::InventoryNotFound => StatusCode::NOT_FOUND,

            // 500 Internal Server Error
            Self::InternalError | Self::DatabaseError | Self::ConfigError => {
                StatusCode::INTERNAL_SERVER_ERROR
            }

            // 400 Bad Request (validation and state conflicts alike)
            Self::Unknown
            | Self::ValidationFailed
            | Self::AlreadyExists
            | Self::InvalidRequest
            | Self::RequiredField
            | Self::ValueOutOfRange
            | Self::ProductSkuExists
            | Self::ProductInvalidPrice
            | Self::CategoryHasProducts
            | Self::CategoryNameExists
            | Self::InventoryExists
            | Self::InsufficientStock => StatusCode::BAD_REQUEST,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_status() {
        assert_eq!(ErrorCode::NotFound.http_status(), StatusCode::NOT_FOUND);
        assert_eq!(ErrorCode::ProductNotFound.http_status(), StatusCode::NOT_FOUND);
        assert_eq!(ErrorCode::InventoryNotFound.http_status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_conflicts_map_to_bad_request() {
        assert_eq!(ErrorCode::InsufficientStock.http_status(), StatusCode::BAD_REQUEST);
        assert_eq!(ErrorCode::InventoryExists.http_status(), StatusCode::BAD_REQUEST);
        assert_eq!(ErrorCode::CategoryHasProducts.http_status(), StatusCode::BAD_REQUEST);
        assert_eq!(ErrorCode::ProductSkuExists.http_status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_system_status() {
        assert_eq!(
            ErrorCode::DatabaseError.http_status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ErrorCode::InternalError.http_status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
