// Handlers for token economy endpoints

use axum::{
    extract::{Query, State},
    Json,
};

use crate::auth::AuthUser;
use crate::error::HubResult;
use crate::handlers::AppState;
use crate::models::{BalanceResponse, SignupBonusResponse, TransactionsQuery, TransactionsResponse};
use crate::services::token_service;

/// Handler for GET /tokens/balance
pub async fn get_balance(
    State(state): State<AppState>,
    user: AuthUser,
) -> HubResult<Json<BalanceResponse>> {
    let response = token_service::get_balance(&state, &user).await?;
    Ok(Json(response))
}

/// Handler for GET /tokens/transactions?limit=...
pub async fn get_transactions(
    State(state): State<AppState>,
    user: AuthUser,
    Query(params): Query<TransactionsQuery>,
) -> HubResult<Json<TransactionsResponse>> {
    let response = token_service::get_transactions(&state, &user, params.limit).await?;
    Ok(Json(response))
}

/// Handler for POST /tokens/signup-bonus
pub async fn claim_signup_bonus(
    State(state): State<AppState>,
    user: AuthUser,
) -> HubResult<Json<SignupBonusResponse>> {
    let response = token_service::claim_signup_bonus(&state, &user).await?;
    Ok(Json(response))
}
