use sea_orm::{ConnectionTrait, Database, DbBackend, Statement};
use std::error::Error;
use tracing::{error, info};

use crate::config::DatabaseConfig;

/// Execute the create command
pub async fn execute(name: Option<String>) -> Result<(), Box<dyn Error>> {
    // Load configuration
    let config = DatabaseConfig::from_env()?;

    // Use provided name or default from config
    let db_name = name.unwrap_or(config.name);

    info!("Creating database: {}", db_name);

    // CREATE DATABASE cannot run against the target database itself, so
    // go through the maintenance database on the same server
    let connection = Database::connect(&config.admin_url).await?;

    // Check if database exists
    let exists = connection
        .query_one(Statement::from_sql_and_values(
            DbBackend::Postgres,
            "SELECT 1 FROM pg_database WHERE datname = $1",
            [db_name.clone().into()],
        ))
        .await?
        .is_some();

    if exists {
        info!("Database '{}' already exists", db_name);
        return Ok(());
    }

    // Create database
    match connection
        .execute(Statement::from_string(
            DbBackend::Postgres,
            format!("CREATE DATABASE \"{}\"", db_name),
        ))
        .await
    {
        Ok(_) => {
            info!("Database '{}' created successfully", db_name);
            Ok(())
        }
        Err(e) => {
            error!("Failed to create database: {}", e);
            Err(Box::new(e))
        }
    }
}
