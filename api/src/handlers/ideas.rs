// Handlers for idea endpoints

use axum::{
    extract::{Path, Query, State},
    Json,
};

use crate::auth::AuthUser;
use crate::error::HubResult;
use crate::handlers::AppState;
use crate::models::{CreateIdeaRequest, IdeaData, IdeasResponse, LikeResponse, ListIdeasQuery};
use crate::services::idea_service;

/// Handler for GET /ideas?q=...
pub async fn list_ideas(
    State(state): State<AppState>,
    Query(params): Query<ListIdeasQuery>,
) -> HubResult<Json<IdeasResponse>> {
    let response = idea_service::list_ideas(&state, params.q.as_deref()).await?;
    Ok(Json(response))
}

/// Handler for POST /ideas
pub async fn create_idea(
    State(state): State<AppState>,
    user: AuthUser,
    Json(request): Json<CreateIdeaRequest>,
) -> HubResult<Json<IdeaData>> {
    let response = idea_service::create_idea(&state, &user, request).await?;
    Ok(Json(response))
}

/// Handler for GET /ideas/{idea_id}
pub async fn get_idea(
    State(state): State<AppState>,
    Path(idea_id): Path<String>,
) -> HubResult<Json<IdeaData>> {
    let response = idea_service::get_idea(&state, &idea_id).await?;
    Ok(Json(response))
}

/// Handler for POST /ideas/{idea_id}/like
pub async fn like_idea(
    State(state): State<AppState>,
    user: AuthUser,
    Path(idea_id): Path<String>,
) -> HubResult<Json<LikeResponse>> {
    let response = idea_service::like_idea(&state, &user, &idea_id).await?;
    Ok(Json(response))
}
