use super::models::{Bird, BirdParams};
use super::services::BirdsService;
use crate::common::{generate_bird_id, render, ApiError, AppState};
use crate::validation::{
    build, outcome, Outcome, RequestKind, ResponsePayload, StatusCategory,
};
use axum::{
    extract::{rejection::JsonRejection, Extension, Path},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;

// ============================================================================
// Bird Handlers
// ============================================================================

/// GET /birds - List all birds
pub async fn list_birds(
    Extension(state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let birds_service = BirdsService::new(state.db.clone());
    let birds = birds_service.get_all_birds().await?;

    Ok(Json(birds))
}

/// GET /birds/:id - Get bird by ID
pub async fn get_bird(
    Extension(state): Extension<Arc<AppState>>,
    Path(bird_id): Path<String>,
) -> Result<Response, ApiError> {
    let birds_service = BirdsService::new(state.db.clone());

    let response = match birds_service.find_by_id(&bird_id).await? {
        Some(bird) => Json(bird).into_response(),
        None => render(ResponsePayload::<Bird>::not_found(), StatusCategory::NotFound),
    };

    Ok(response)
}

/// POST /birds - Create a new bird
pub async fn create_bird(
    Extension(state): Extension<Arc<AppState>>,
    payload: Result<Json<BirdParams>, JsonRejection>,
) -> Result<Response, ApiError> {
    let params = parse_params(payload)?;
    let birds_service = BirdsService::new(state.db.clone());
    let candidate = Bird::from_params(generate_bird_id(), params);

    let outcome = match outcome::create(&state.bird_rules, candidate, &birds_service).await? {
        Outcome::Success(bird) => Outcome::Success(birds_service.insert_bird(&bird).await?),
        rejected => rejected,
    };

    let (payload, status) = build(outcome, RequestKind::Create);
    Ok(render(payload, status))
}

/// PUT/PATCH /birds/:id - Update bird
pub async fn update_bird(
    Extension(state): Extension<Arc<AppState>>,
    Path(bird_id): Path<String>,
    payload: Result<Json<BirdParams>, JsonRejection>,
) -> Result<Response, ApiError> {
    let params = parse_params(payload)?;
    let birds_service = BirdsService::new(state.db.clone());
    let existing = birds_service.find_by_id(&bird_id).await?;

    let outcome = match outcome::update(
        &state.bird_rules,
        existing,
        |bird| bird.apply(params),
        &birds_service,
    )
    .await?
    {
        Outcome::Success(bird) => Outcome::Success(birds_service.update_bird(&bird).await?),
        rejected => rejected,
    };

    let (payload, status) = build(outcome, RequestKind::Update);
    Ok(render(payload, status))
}

/// DELETE /birds/:id - Delete bird
pub async fn delete_bird(
    Extension(state): Extension<Arc<AppState>>,
    Path(bird_id): Path<String>,
) -> Result<Response, ApiError> {
    let birds_service = BirdsService::new(state.db.clone());

    if birds_service.delete_bird(&bird_id).await? {
        Ok(StatusCode::NO_CONTENT.into_response())
    } else {
        Ok(render(
            ResponsePayload::<Bird>::not_found(),
            StatusCategory::NotFound,
        ))
    }
}

fn parse_params(payload: Result<Json<BirdParams>, JsonRejection>) -> Result<BirdParams, ApiError> {
    payload
        .map(|Json(params)| params)
        .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))
}
