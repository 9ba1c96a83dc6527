//! Entity module for database models

pub mod idea_investments;
pub mod ideas;
pub mod prelude;
pub mod team_members;
pub mod teams;
pub mod token_transactions;
pub mod user_tokens;
