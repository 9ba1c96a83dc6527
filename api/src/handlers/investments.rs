// Handlers for investment endpoints

use axum::{
    extract::{Path, State},
    Json,
};

use crate::auth::AuthUser;
use crate::error::HubResult;
use crate::handlers::AppState;
use crate::models::{
    IdeaInvestmentsResponse, InvestRequest, InvestResponse, UserInvestmentsResponse,
};
use crate::services::investment_service;

/// Handler for POST /ideas/{idea_id}/invest
pub async fn invest(
    State(state): State<AppState>,
    user: AuthUser,
    Path(idea_id): Path<String>,
    Json(request): Json<InvestRequest>,
) -> HubResult<Json<InvestResponse>> {
    let response = investment_service::invest(&state, &user, &idea_id, request.amount).await?;
    Ok(Json(response))
}

/// Handler for GET /ideas/{idea_id}/investments
pub async fn get_idea_investments(
    State(state): State<AppState>,
    Path(idea_id): Path<String>,
) -> HubResult<Json<IdeaInvestmentsResponse>> {
    let response = investment_service::get_idea_investments(&state, &idea_id).await?;
    Ok(Json(response))
}

/// Handler for GET /me/investments
pub async fn get_user_investments(
    State(state): State<AppState>,
    user: AuthUser,
) -> HubResult<Json<UserInvestmentsResponse>> {
    let response = investment_service::get_user_investments(&state, &user).await?;
    Ok(Json(response))
}
