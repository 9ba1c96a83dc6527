// Handlers Module
// This module contains the API endpoint handlers

pub mod health;
pub mod ideas;
pub mod investments;
pub mod teams;
pub mod tokens;

use std::sync::Arc;

use crate::auth::JwtVerifier;
use crate::config::ApiConfig;
use crate::db::Repositories;

/// Shared application context behind every handler
pub struct AppContext {
    pub repositories: Repositories,
    pub jwt: JwtVerifier,
    pub config: ApiConfig,
}

// Type alias for the application state
pub type AppState = Arc<AppContext>;
