// Team service - business logic for team formation

use std::collections::HashMap;

use crate::auth::AuthUser;
use crate::entity::{ideas, teams};
use crate::error::{HubError, HubResult};
use crate::handlers::AppState;
use crate::models::{
    json_string_list, CreateTeamRequest, IdeaSummary, JoinTeamRequest, JoinTeamResponse, TeamData,
    TeamsResponse,
};

/// Creates a team around an idea; the acting user becomes its leader
pub async fn create_team(
    state: &AppState,
    user: &AuthUser,
    request: CreateTeamRequest,
) -> HubResult<TeamData> {
    if request.name.trim().is_empty() {
        return Err(HubError::InvalidRequest("name must not be empty".to_string()));
    }
    if request.max_members < 2 {
        return Err(HubError::InvalidRequest(
            "A team needs room for at least 2 members".to_string(),
        ));
    }

    let idea = state
        .repositories
        .ideas
        .get_by_id(&request.idea_id)
        .await?
        .ok_or_else(|| HubError::NotFound(format!("Idea {} not found", request.idea_id)))?;

    let team = state
        .repositories
        .teams
        .create(
            &user.id,
            &request.idea_id,
            &request.name,
            &request.description,
            request.max_members,
            request.required_skills,
        )
        .await?;

    tracing::info!("User {} created team {} for idea {}", user.id, team.id, idea.id);

    Ok(team_data(team, Some(&idea)))
}

/// Lists all teams, newest first, with their idea summaries attached
pub async fn list_teams(state: &AppState) -> HubResult<TeamsResponse> {
    let teams = state.repositories.teams.list().await?;

    let mut idea_ids: Vec<String> = teams.iter().map(|t| t.idea_id.clone()).collect();
    idea_ids.sort();
    idea_ids.dedup();
    let ideas: HashMap<String, ideas::Model> = state
        .repositories
        .ideas
        .get_by_ids(&idea_ids)
        .await?
        .into_iter()
        .map(|idea| (idea.id.clone(), idea))
        .collect();

    let teams = teams
        .into_iter()
        .map(|team| {
            let idea = ideas.get(&team.idea_id);
            team_data(team, idea)
        })
        .collect();

    Ok(TeamsResponse { teams })
}

/// Files a membership request for the acting user
pub async fn join_team(
    state: &AppState,
    user: &AuthUser,
    team_id: &str,
    request: JoinTeamRequest,
) -> HubResult<JoinTeamResponse> {
    let member = state
        .repositories
        .teams
        .join(team_id, &user.id, request.skills)
        .await?;

    Ok(JoinTeamResponse {
        success: true,
        status: member.status,
    })
}

fn team_data(team: teams::Model, idea: Option<&ideas::Model>) -> TeamData {
    TeamData {
        id: team.id,
        idea_id: team.idea_id,
        name: team.name,
        description: team.description,
        max_members: team.max_members,
        current_members: team.current_members,
        required_skills: json_string_list(&team.required_skills),
        leader_id: team.leader_id,
        status: team.status,
        created_at: team.created_at.to_string(),
        idea: idea.map(|i| IdeaSummary {
            id: i.id.clone(),
            title: i.title.clone(),
            domain: i.domain.clone(),
        }),
    }
}
