use thiserror::Error;

/// Generic error type used by service layer functions. Each variant renders
/// the message the HTTP layer puts into the response body.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ServiceError {
    /// Required input is missing or empty.
    #[error("{0}")]
    Validation(String),
    /// A uniqueness rule was violated.
    #[error("{0}")]
    Conflict(&'static str),
    /// No matching entity.
    #[error("{0}")]
    NotFound(&'static str),
    /// The supplied identifier is not 24 hexadecimal digits. Distinct from
    /// [`ServiceError::NotFound`] on the product endpoints only.
    #[error("Invalid id")]
    InvalidId,
    /// The category is still referenced by at least one product.
    #[error("Category in use")]
    CategoryInUse,
    /// A bulk product insert contained no structurally valid records.
    #[error("No valid products")]
    NoValidProducts,
    /// An unexpected internal error occurred.
    #[error("internal error")]
    Internal,
}

/// Convenient alias for results returned from service functions.
pub type ServiceResult<T> = Result<T, ServiceError>;
