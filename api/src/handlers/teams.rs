// Handlers for team endpoints

use axum::{
    extract::{Path, State},
    Json,
};

use crate::auth::AuthUser;
use crate::error::HubResult;
use crate::handlers::AppState;
use crate::models::{
    CreateTeamRequest, JoinTeamRequest, JoinTeamResponse, TeamData, TeamsResponse,
};
use crate::services::team_service;

/// Handler for GET /teams
pub async fn list_teams(State(state): State<AppState>) -> HubResult<Json<TeamsResponse>> {
    let response = team_service::list_teams(&state).await?;
    Ok(Json(response))
}

/// Handler for POST /teams
pub async fn create_team(
    State(state): State<AppState>,
    user: AuthUser,
    Json(request): Json<CreateTeamRequest>,
) -> HubResult<Json<TeamData>> {
    let response = team_service::create_team(&state, &user, request).await?;
    Ok(Json(response))
}

/// Handler for POST /teams/{team_id}/join
pub async fn join_team(
    State(state): State<AppState>,
    user: AuthUser,
    Path(team_id): Path<String>,
    Json(request): Json<JoinTeamRequest>,
) -> HubResult<Json<JoinTeamResponse>> {
    let response = team_service::join_team(&state, &user, &team_id, request).await?;
    Ok(Json(response))
}
