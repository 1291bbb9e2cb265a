use super::handlers;
use axum::{routing::get, Router};

/// Creates the birds router with all bird-related routes
pub fn birds_routes() -> Router {
    Router::new()
        .route(
            "/birds",
            get(handlers::list_birds).post(handlers::create_bird),
        )
        .route(
            "/birds/:id",
            get(handlers::get_bird)
                .put(handlers::update_bird)
                .patch(handlers::update_bird)
                .delete(handlers::delete_bird),
        )
}
