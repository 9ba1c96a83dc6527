// Idea service - business logic for idea submission, discovery and likes

use crate::auth::AuthUser;
use crate::entity::ideas;
use crate::error::{HubError, HubResult};
use crate::handlers::AppState;
use crate::models::{
    json_string_list, CreateIdeaRequest, IdeaData, IdeasResponse, LikeResponse,
};
use crate::services::investment_service::{compute_aggregates, InvestmentAggregates};

/// Submits a new idea on behalf of the acting user
pub async fn create_idea(
    state: &AppState,
    user: &AuthUser,
    request: CreateIdeaRequest,
) -> HubResult<IdeaData> {
    for (field, value) in [
        ("title", &request.title),
        ("domain", &request.domain),
        ("problem", &request.problem),
        ("ai_solution", &request.ai_solution),
    ] {
        if value.trim().is_empty() {
            return Err(HubError::InvalidRequest(format!("{} must not be empty", field)));
        }
    }

    let idea = state
        .repositories
        .ideas
        .insert(
            &user.id,
            &request.title,
            &request.domain,
            &request.problem,
            &request.ai_solution,
            request.tags,
        )
        .await?;

    tracing::info!("User {} submitted idea {}", user.id, idea.id);

    // A new idea has no investors yet
    Ok(idea_data(idea, compute_aggregates(&[])))
}

/// Lists visible ideas newest-first with investment aggregates attached,
/// optionally filtered by a free-text search term
pub async fn list_ideas(state: &AppState, query: Option<&str>) -> HubResult<IdeasResponse> {
    let ideas = state.repositories.ideas.list_visible(query).await?;

    let idea_ids: Vec<String> = ideas.iter().map(|i| i.id.clone()).collect();
    let mut investments = state
        .repositories
        .investments
        .get_by_idea_batch(&idea_ids)
        .await?;

    let ideas = ideas
        .into_iter()
        .map(|idea| {
            let rows = investments.remove(&idea.id).unwrap_or_default();
            idea_data(idea, compute_aggregates(&rows))
        })
        .collect();

    Ok(IdeasResponse { ideas })
}

/// Gets a single idea with its investment aggregates
pub async fn get_idea(state: &AppState, idea_id: &str) -> HubResult<IdeaData> {
    let idea = state
        .repositories
        .ideas
        .get_by_id(idea_id)
        .await?
        .ok_or_else(|| HubError::NotFound(format!("Idea {} not found", idea_id)))?;

    let rows = state.repositories.investments.get_by_idea(idea_id).await?;

    Ok(idea_data(idea, compute_aggregates(&rows)))
}

/// Toggles the acting user's like on an idea
pub async fn like_idea(state: &AppState, user: &AuthUser, idea_id: &str) -> HubResult<LikeResponse> {
    let (idea, liked) = state
        .repositories
        .ideas
        .toggle_like(idea_id, &user.id)
        .await?;

    Ok(LikeResponse {
        success: true,
        liked,
        like_count: json_string_list(&idea.like_user_ids).len() as u64,
    })
}

fn idea_data(idea: ideas::Model, aggregates: InvestmentAggregates) -> IdeaData {
    IdeaData {
        id: idea.id,
        title: idea.title,
        domain: idea.domain,
        problem: idea.problem,
        ai_solution: idea.ai_solution,
        tags: json_string_list(&idea.tags),
        user_id: idea.user_id,
        stage: idea.stage,
        like_user_ids: json_string_list(&idea.like_user_ids),
        created_at: idea.created_at.to_string(),
        updated_at: idea.updated_at.to_string(),
        total_investment: aggregates.total_investment,
        investor_count: aggregates.investor_count,
    }
}
