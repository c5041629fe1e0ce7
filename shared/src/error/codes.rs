//! Unified error codes for the quoting backend
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 4xxx: Quote errors
//! - 6xxx: Catalog errors (brands, weight profiles, products)
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values so the front-end can
/// switch on them without parsing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Validation failed
    ValidationFailed = 2,
    /// Malformed input value (non-numeric quantity, unknown unit, negative amount)
    InvalidInput = 6,
    /// Required field missing
    RequiredField = 7,
    /// Value out of range
    ValueOutOfRange = 8,

    // ==================== 4xxx: Quote ====================
    /// Quote not found
    QuoteNotFound = 4001,
    /// Quote has no line items
    QuoteEmpty = 4002,
    /// Customer name missing on quote
    CustomerNameRequired = 4003,
    /// Vendor extraction text could not be parsed
    ExtractionUnreadable = 4101,

    // ==================== 6xxx: Catalog ====================
    /// Brand not found
    BrandNotFound = 6001,
    /// Brand name already taken
    BrandNameExists = 6002,
    /// Weight profile not found
    WeightProfileNotFound = 6101,
    /// Product not found
    ProductNotFound = 6201,

    // ==================== 9xxx: System ====================
    /// Storage backend failure
    DatabaseError = 9002,
}

impl ErrorCode {
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::InvalidInput => "Invalid input value",
            ErrorCode::RequiredField => "Required field is missing",
            ErrorCode::ValueOutOfRange => "Value is out of range",

            // Quote
            ErrorCode::QuoteNotFound => "Quote not found",
            ErrorCode::QuoteEmpty => "Quote must contain at least one item",
            ErrorCode::CustomerNameRequired => "Customer name is required",
            ErrorCode::ExtractionUnreadable => "Vendor extraction could not be parsed",

            // Catalog
            ErrorCode::BrandNotFound => "Brand not found",
            ErrorCode::BrandNameExists => "Brand name already exists",
            ErrorCode::WeightProfileNotFound => "Weight profile not found",
            ErrorCode::ProductNotFound => "Product not found",

            // System
            ErrorCode::DatabaseError => "Database error",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
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
            // General
            2 => Ok(ErrorCode::ValidationFailed),
            6 => Ok(ErrorCode::InvalidInput),
            7 => Ok(ErrorCode::RequiredField),
            8 => Ok(ErrorCode::ValueOutOfRange),

            // Quote
            4001 => Ok(ErrorCode::QuoteNotFound),
            4002 => Ok(ErrorCode::QuoteEmpty),
            4003 => Ok(ErrorCode::CustomerNameRequired),
            4101 => Ok(ErrorCode::ExtractionUnreadable),

            // Catalog
            6001 => Ok(ErrorCode::BrandNotFound),
            6002 => Ok(ErrorCode::BrandNameExists),
            6101 => Ok(ErrorCode::WeightProfileNotFound),
            6201 => Ok(ErrorCode::ProductNotFound),

            // System
            9002 => Ok(ErrorCode::DatabaseError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
