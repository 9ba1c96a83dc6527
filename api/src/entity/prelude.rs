//! Prelude module for convenient imports

pub use super::idea_investments::Entity as IdeaInvestments;
pub use super::ideas::Entity as Ideas;
pub use super::team_members::Entity as TeamMembers;
pub use super::teams::Entity as Teams;
pub use super::token_transactions::Entity as TokenTransactions;
pub use super::user_tokens::Entity as UserTokens;
