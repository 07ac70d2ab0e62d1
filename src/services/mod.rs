//! Business rules shared by the HTTP layer, written as free functions
//! generic over the repository traits so they stay testable in memory.

pub mod categories;
pub mod errors;
pub mod products;
pub mod validation;

pub use errors::{ServiceError, ServiceResult};
