// Registry Error Codes
// This module defines all error codes for registry operations.
//
// Error Code Ranges:
// - 1-99: Input validation errors
// - 100-199: Ownership errors
// - 200-299: Authorization errors
// - 300-399: Safe transfer errors
// - 400-499: Collaborator errors (vending, promo, personalization)

use thiserror::Error;

/// Registry operation result type
pub type RegistryResult<T> = Result<T, RegistryError>;

/// Registry error type with numeric code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[repr(u64)]
pub enum RegistryError {
    // ========================================
    // Input validation errors (1-99)
    // ========================================
    #[error("Square id outside the registry universe")]
    InvalidSquare = 1,

    #[error("Null account where a real account is required")]
    InvalidAccount = 2,

    #[error("Enumeration index beyond current list length")]
    IndexOutOfRange = 3,

    #[error("Registry name is empty or too long")]
    NameTooLong = 4,

    #[error("Symbol is empty, too long, or not uppercase ASCII")]
    SymbolInvalid = 5,

    #[error("URI exceeds the maximum length")]
    UriTooLong = 6,

    #[error("Safe transfer data exceeds the maximum length")]
    DataTooLong = 7,

    // ========================================
    // Ownership errors (100-199)
    // ========================================
    #[error("Square already minted out of the registry account")]
    AlreadyOwned = 100,

    #[error("Stated holder does not match the current owner")]
    OwnerMismatch = 101,

    #[error("Square is already held by that account")]
    SelfAssignment = 102,

    // ========================================
    // Authorization errors (200-299)
    // ========================================
    #[error("Caller lacks the required role, approval, or ownership")]
    Unauthorized = 200,

    #[error("Approving the current owner is not allowed")]
    SelfApproval = 201,

    // ========================================
    // Safe transfer errors (300-399)
    // ========================================
    #[error("Recipient did not acknowledge the square receipt")]
    TransferRejected = 300,

    // ========================================
    // Collaborator errors (400-499)
    // ========================================
    #[error("Payment does not match the required amount")]
    WrongPayment = 400,

    #[error("Promotional grant allotment exhausted")]
    PromoExhausted = 401,

    #[error("Pixel data must be exactly 300 bytes")]
    BadPixelData = 402,

    #[error("Title exceeds the maximum length")]
    TitleTooLong = 403,

    #[error("Link exceeds the maximum length")]
    LinkTooLong = 404,
}

impl RegistryError {
    /// Numeric error code
    pub fn code(&self) -> u64 {
        *self as u64
    }
}
