// Business logic service implementations

pub mod idea_service;
pub mod investment_service;
pub mod team_service;
pub mod token_service;
