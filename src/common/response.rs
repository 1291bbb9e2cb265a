// HTTP rendering of validation payloads

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::validation::{ResponsePayload, StatusCategory};

/// Map a status category to its literal HTTP status
pub fn status_code(status: StatusCategory) -> StatusCode {
    match status {
        StatusCategory::Ok => StatusCode::OK,
        StatusCategory::Created => StatusCode::CREATED,
        StatusCategory::NotFound => StatusCode::NOT_FOUND,
        StatusCategory::UnprocessableEntity => StatusCode::UNPROCESSABLE_ENTITY,
    }
}

/// Serialize a payload as JSON with the status its category maps to
pub fn render<E: Serialize>(payload: ResponsePayload<E>, status: StatusCategory) -> Response {
    (status_code(status), Json(payload)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes_match_categories() {
        assert_eq!(status_code(StatusCategory::Ok), StatusCode::OK);
        assert_eq!(status_code(StatusCategory::Created), StatusCode::CREATED);
        assert_eq!(status_code(StatusCategory::NotFound), StatusCode::NOT_FOUND);
        assert_eq!(
            status_code(StatusCategory::UnprocessableEntity),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }
}
