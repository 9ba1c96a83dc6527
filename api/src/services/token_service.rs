// Token service - business logic for the token economy surface

use crate::auth::AuthUser;
use crate::entity::token_transactions;
use crate::error::HubResult;
use crate::handlers::AppState;
use crate::models::{BalanceResponse, SignupBonusResponse, TransactionData, TransactionsResponse};

/// Hard cap on the transaction history page size
pub const MAX_TRANSACTION_LIMIT: u64 = 100;

/// Current token balance for the acting user (0 without any history)
pub async fn get_balance(state: &AppState, user: &AuthUser) -> HubResult<BalanceResponse> {
    let balance = state.repositories.tokens.get_balance(&user.id).await?;
    Ok(BalanceResponse { balance })
}

/// The acting user's ledger entries, newest first. The limit is clamped
/// to 1..=MAX_TRANSACTION_LIMIT.
pub async fn get_transactions(
    state: &AppState,
    user: &AuthUser,
    limit: u64,
) -> HubResult<TransactionsResponse> {
    let limit = limit.clamp(1, MAX_TRANSACTION_LIMIT);
    let entries = state
        .repositories
        .tokens
        .get_transactions(&user.id, limit)
        .await?;

    Ok(TransactionsResponse {
        transactions: entries.into_iter().map(transaction_data).collect(),
    })
}

/// Claims the one-time signup bonus for the acting user
pub async fn claim_signup_bonus(state: &AppState, user: &AuthUser) -> HubResult<SignupBonusResponse> {
    let (granted, balance) = state
        .repositories
        .tokens
        .grant_signup_bonus(&user.id, state.config.signup_bonus)
        .await?;

    if granted {
        tracing::info!(
            "Granted signup bonus of {} tokens to user {}",
            state.config.signup_bonus,
            user.id
        );
    }

    Ok(SignupBonusResponse { granted, balance })
}

fn transaction_data(entry: token_transactions::Model) -> TransactionData {
    TransactionData {
        id: entry.id,
        amount: entry.amount,
        transaction_type: entry.transaction_type,
        description: entry.description,
        reference_id: entry.reference_id,
        created_at: entry.created_at.to_string(),
    }
}
