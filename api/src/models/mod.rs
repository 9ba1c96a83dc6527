// API request/response models

use serde::{Deserialize, Serialize};

/// Kinds of ledger entries. Stored as snake_case text in the
/// token_transactions table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionType {
    SignupBonus,
    Purchase,
    Investment,
    Usage,
    Refund,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::SignupBonus => "signup_bonus",
            TransactionType::Purchase => "purchase",
            TransactionType::Investment => "investment",
            TransactionType::Usage => "usage",
            TransactionType::Refund => "refund",
        }
    }
}

/// Reads a jsonb string array column, tolerating null / malformed values
pub fn json_string_list(value: &serde_json::Value) -> Vec<String> {
    serde_json::from_value(value.clone()).unwrap_or_default()
}

// ---- Ideas ----

/// Request body for POST /ideas
#[derive(Debug, Deserialize)]
pub struct CreateIdeaRequest {
    pub title: String,
    pub domain: String,
    pub problem: String,
    pub ai_solution: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Query parameters for GET /ideas
#[derive(Debug, Deserialize, Default)]
pub struct ListIdeasQuery {
    pub q: Option<String>,
}

/// Idea data for API responses, with read-time investment aggregates
#[derive(Debug, Serialize)]
pub struct IdeaData {
    pub id: String,
    pub title: String,
    pub domain: String,
    pub problem: String,
    pub ai_solution: String,
    pub tags: Vec<String>,
    pub user_id: String,
    pub stage: String,
    pub like_user_ids: Vec<String>,
    pub created_at: String,
    pub updated_at: String,
    pub total_investment: i64,
    pub investor_count: u64,
}

/// Response structure for GET /ideas
#[derive(Debug, Serialize)]
pub struct IdeasResponse {
    pub ideas: Vec<IdeaData>,
}

/// Response structure for like operations
#[derive(Debug, Serialize)]
pub struct LikeResponse {
    pub success: bool,
    pub liked: bool,
    pub like_count: u64,
}

/// Compact idea reference attached to teams and user investments
#[derive(Debug, Serialize)]
pub struct IdeaSummary {
    pub id: String,
    pub title: String,
    pub domain: String,
}

// ---- Investments ----

/// Request body for POST /ideas/{idea_id}/invest
#[derive(Debug, Deserialize)]
pub struct InvestRequest {
    pub amount: i64,
}

/// Response structure for POST /ideas/{idea_id}/invest
#[derive(Debug, Serialize)]
pub struct InvestResponse {
    pub success: bool,
    pub idea_id: String,
    /// Cumulative amount this user now has in the idea
    pub amount: i64,
    /// Remaining token balance after the debit
    pub balance: i64,
}

/// Investment row for API responses
#[derive(Debug, Serialize)]
pub struct InvestmentData {
    pub id: String,
    pub idea_id: String,
    pub user_id: String,
    pub amount: i64,
    pub created_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub idea: Option<IdeaSummary>,
}

/// Response structure for GET /ideas/{idea_id}/investments
#[derive(Debug, Serialize)]
pub struct IdeaInvestmentsResponse {
    pub idea_id: String,
    pub total_investment: i64,
    pub investor_count: u64,
    pub investments: Vec<InvestmentData>,
}

/// Response structure for GET /me/investments
#[derive(Debug, Serialize)]
pub struct UserInvestmentsResponse {
    pub investments: Vec<InvestmentData>,
}

// ---- Tokens ----

/// Response structure for GET /tokens/balance
#[derive(Debug, Serialize)]
pub struct BalanceResponse {
    pub balance: i64,
}

/// Query parameters for GET /tokens/transactions
#[derive(Debug, Deserialize)]
pub struct TransactionsQuery {
    #[serde(default = "default_transaction_limit")]
    pub limit: u64,
}

fn default_transaction_limit() -> u64 {
    50
}

/// Ledger entry for API responses
#[derive(Debug, Serialize)]
pub struct TransactionData {
    pub id: String,
    pub amount: i64,
    pub transaction_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_id: Option<String>,
    pub created_at: String,
}

/// Response structure for GET /tokens/transactions
#[derive(Debug, Serialize)]
pub struct TransactionsResponse {
    pub transactions: Vec<TransactionData>,
}

/// Response structure for POST /tokens/signup-bonus
#[derive(Debug, Serialize)]
pub struct SignupBonusResponse {
    /// false when the bonus had already been claimed
    pub granted: bool,
    pub balance: i64,
}

// ---- Teams ----

/// Request body for POST /teams
#[derive(Debug, Deserialize)]
pub struct CreateTeamRequest {
    pub idea_id: String,
    pub name: String,
    pub description: String,
    pub max_members: i32,
    #[serde(default)]
    pub required_skills: Vec<String>,
}

/// Request body for POST /teams/{team_id}/join
#[derive(Debug, Deserialize)]
pub struct JoinTeamRequest {
    #[serde(default)]
    pub skills: Vec<String>,
}

/// Team data for API responses
#[derive(Debug, Serialize)]
pub struct TeamData {
    pub id: String,
    pub idea_id: String,
    pub name: String,
    pub description: String,
    pub max_members: i32,
    pub current_members: i32,
    pub required_skills: Vec<String>,
    pub leader_id: String,
    pub status: String,
    pub created_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub idea: Option<IdeaSummary>,
}

/// Response structure for GET /teams
#[derive(Debug, Serialize)]
pub struct TeamsResponse {
    pub teams: Vec<TeamData>,
}

/// Response structure for POST /teams/{team_id}/join
#[derive(Debug, Serialize)]
pub struct JoinTeamResponse {
    pub success: bool,
    /// Membership request status, pending until the leader acts on it
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transaction_type_as_str() {
        assert_eq!(TransactionType::SignupBonus.as_str(), "signup_bonus");
        assert_eq!(TransactionType::Investment.as_str(), "investment");
        assert_eq!(TransactionType::Usage.as_str(), "usage");
    }

    #[test]
    fn test_transaction_type_serde_matches_as_str() {
        for ty in [
            TransactionType::SignupBonus,
            TransactionType::Purchase,
            TransactionType::Investment,
            TransactionType::Usage,
            TransactionType::Refund,
        ] {
            let json = serde_json::to_value(ty).unwrap();
            assert_eq!(json, serde_json::Value::String(ty.as_str().to_string()));
        }
    }

    #[test]
    fn test_transactions_query_default_limit() {
        let query: TransactionsQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(query.limit, 50);

        let query: TransactionsQuery = serde_json::from_str(r#"{"limit": 20}"#).unwrap();
        assert_eq!(query.limit, 20);
    }

    #[test]
    fn test_json_string_list() {
        let value = serde_json::json!(["a", "b"]);
        assert_eq!(json_string_list(&value), vec!["a", "b"]);

        assert!(json_string_list(&serde_json::Value::Null).is_empty());
        assert!(json_string_list(&serde_json::json!(42)).is_empty());
    }
}
