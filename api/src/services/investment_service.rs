// Investment service - business logic for the idea investment flow

use std::collections::HashMap;

use crate::auth::AuthUser;
use crate::entity::{idea_investments, ideas};
use crate::error::{HubError, HubResult};
use crate::handlers::AppState;
use crate::models::{
    IdeaInvestmentsResponse, IdeaSummary, InvestResponse, InvestmentData, UserInvestmentsResponse,
};

/// Product minimum for a single contribution. Enforced here as well as in
/// the UI; the API does not trust client-side validation.
pub const MIN_INVESTMENT: i64 = 100;

/// Rejects non-positive and below-minimum contribution amounts
pub fn validate_amount(amount: i64) -> HubResult<()> {
    if amount < MIN_INVESTMENT {
        return Err(HubError::InvalidRequest(format!(
            "Minimum investment is {} tokens",
            MIN_INVESTMENT
        )));
    }
    Ok(())
}

/// Read-time investment aggregates for one idea
#[derive(Debug, PartialEq, Eq)]
pub struct InvestmentAggregates {
    pub total_investment: i64,
    pub investor_count: u64,
}

/// Pure aggregation over an idea's investment rows. The schema holds at
/// most one row per investor, so the row count is the investor count.
pub fn compute_aggregates(rows: &[idea_investments::Model]) -> InvestmentAggregates {
    InvestmentAggregates {
        total_investment: rows.iter().map(|r| r.amount).sum(),
        investor_count: rows.len() as u64,
    }
}

/// Commits tokens from the acting user to an idea
pub async fn invest(
    state: &AppState,
    user: &AuthUser,
    idea_id: &str,
    amount: i64,
) -> HubResult<InvestResponse> {
    validate_amount(amount)?;

    state
        .repositories
        .ideas
        .get_by_id(idea_id)
        .await?
        .ok_or_else(|| HubError::NotFound(format!("Idea {} not found", idea_id)))?;

    let (investment, balance) = state
        .repositories
        .investments
        .invest(&user.id, idea_id, amount)
        .await?;

    tracing::info!(
        "User {} invested {} tokens in idea {} (cumulative {})",
        user.id,
        amount,
        idea_id,
        investment.amount
    );

    Ok(InvestResponse {
        success: true,
        idea_id: idea_id.to_string(),
        amount: investment.amount,
        balance,
    })
}

/// Investor list and aggregates for an idea, highest amount first
pub async fn get_idea_investments(
    state: &AppState,
    idea_id: &str,
) -> HubResult<IdeaInvestmentsResponse> {
    state
        .repositories
        .ideas
        .get_by_id(idea_id)
        .await?
        .ok_or_else(|| HubError::NotFound(format!("Idea {} not found", idea_id)))?;

    let rows = state.repositories.investments.get_by_idea(idea_id).await?;
    let aggregates = compute_aggregates(&rows);

    Ok(IdeaInvestmentsResponse {
        idea_id: idea_id.to_string(),
        total_investment: aggregates.total_investment,
        investor_count: aggregates.investor_count,
        investments: rows
            .into_iter()
            .map(|row| investment_data(row, None))
            .collect(),
    })
}

/// The acting user's investments across ideas, newest first, with a
/// compact summary of each idea attached
pub async fn get_user_investments(
    state: &AppState,
    user: &AuthUser,
) -> HubResult<UserInvestmentsResponse> {
    let rows = state.repositories.investments.get_by_user(&user.id).await?;

    // One row per (idea, user), so the idea ids are already distinct
    let idea_ids: Vec<String> = rows.iter().map(|r| r.idea_id.clone()).collect();
    let ideas: HashMap<String, ideas::Model> = state
        .repositories
        .ideas
        .get_by_ids(&idea_ids)
        .await?
        .into_iter()
        .map(|idea| (idea.id.clone(), idea))
        .collect();

    let investments = rows
        .into_iter()
        .map(|row| {
            let idea = ideas.get(&row.idea_id);
            investment_data(row, idea)
        })
        .collect();

    Ok(UserInvestmentsResponse { investments })
}

fn investment_data(row: idea_investments::Model, idea: Option<&ideas::Model>) -> InvestmentData {
    InvestmentData {
        id: row.id,
        idea_id: row.idea_id,
        user_id: row.user_id,
        amount: row.amount,
        created_at: row.created_at.to_string(),
        idea: idea.map(|i| IdeaSummary {
            id: i.id.clone(),
            title: i.title.clone(),
            domain: i.domain.clone(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    fn row(user_id: &str, amount: i64) -> idea_investments::Model {
        idea_investments::Model {
            id: format!("inv-{user_id}"),
            idea_id: "idea-1".to_string(),
            user_id: user_id.to_string(),
            amount,
            created_at: NaiveDateTime::default(),
        }
    }

    #[test]
    fn test_aggregates_over_empty_set() {
        let aggregates = compute_aggregates(&[]);
        assert_eq!(aggregates.total_investment, 0);
        assert_eq!(aggregates.investor_count, 0);
    }

    #[test]
    fn test_aggregates_sum_amounts_and_count_rows() {
        let rows = vec![row("user-a", 300), row("user-b", 100), row("user-c", 250)];
        let aggregates = compute_aggregates(&rows);
        assert_eq!(aggregates.total_investment, 650);
        assert_eq!(aggregates.investor_count, 3);
    }

    #[test]
    fn test_two_investors_with_100_each() {
        let rows = vec![row("user-a", 100), row("user-b", 100)];
        let aggregates = compute_aggregates(&rows);
        assert_eq!(aggregates.total_investment, 200);
        assert_eq!(aggregates.investor_count, 2);
    }

    #[test]
    fn test_validate_amount_enforces_minimum() {
        assert!(validate_amount(100).is_ok());
        assert!(validate_amount(2000).is_ok());

        for bad in [99, 1, 0, -100] {
            assert!(
                matches!(validate_amount(bad), Err(HubError::InvalidRequest(_))),
                "amount {bad} should be rejected"
            );
        }
    }
}
