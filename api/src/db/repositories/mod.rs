// Database repository management

mod idea_repository;
mod investment_repository;
mod team_repository;
pub(crate) mod token_repository;

pub use idea_repository::IdeaRepository;
pub use investment_repository::InvestmentRepository;
pub use team_repository::TeamRepository;
pub use token_repository::TokenRepository;

use sea_orm::DatabaseConnection;

/// Container for all database repositories
pub struct Repositories {
    pub ideas: IdeaRepository,
    pub investments: InvestmentRepository,
    pub teams: TeamRepository,
    pub tokens: TokenRepository,
}

impl Repositories {
    /// Creates a new repositories container with database connection
    pub fn new(conn: DatabaseConnection) -> Self {
        Repositories {
            ideas: IdeaRepository::new(conn.clone()),
            investments: InvestmentRepository::new(conn.clone()),
            teams: TeamRepository::new(conn.clone()),
            tokens: TokenRepository::new(conn),
        }
    }
}
