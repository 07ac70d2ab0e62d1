use actix_web::HttpResponse;
use serde_json::json;

use crate::services::ServiceError;

pub mod categories;
pub mod main;
pub mod products;

/// Maps a service failure to its HTTP status and `{"message": ...}` body.
/// Internal failures answer a bare 500; their details stay in the log.
pub(crate) fn error_response(err: ServiceError) -> HttpResponse {
    let message = err.to_string();
    match err {
        ServiceError::Validation(_)
        | ServiceError::CategoryInUse
        | ServiceError::NoValidProducts => {
            HttpResponse::BadRequest().json(json!({ "message": message }))
        }
        ServiceError::Conflict(_) => HttpResponse::Conflict().json(json!({ "message": message })),
        ServiceError::NotFound(_) => HttpResponse::NotFound().json(json!({ "message": message })),
        ServiceError::InvalidId => {
            HttpResponse::UnprocessableEntity().json(json!({ "message": message }))
        }
        ServiceError::Internal => HttpResponse::InternalServerError().finish(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;

    #[test]
    fn statuses_follow_the_error_taxonomy() {
        let cases = [
            (
                ServiceError::Validation("\"name\" is required".to_string()),
                StatusCode::BAD_REQUEST,
            ),
            (
                ServiceError::Conflict("Category already exists"),
                StatusCode::CONFLICT,
            ),
            (
                ServiceError::NotFound("Product not found"),
                StatusCode::NOT_FOUND,
            ),
            (ServiceError::InvalidId, StatusCode::UNPROCESSABLE_ENTITY),
            (ServiceError::CategoryInUse, StatusCode::BAD_REQUEST),
            (ServiceError::NoValidProducts, StatusCode::BAD_REQUEST),
            (ServiceError::Internal, StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (err, status) in cases {
            assert_eq!(error_response(err).status(), status);
        }
    }
}
