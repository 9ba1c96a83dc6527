use migration::Migrator;
use sea_orm::{Database, DatabaseConnection};
use sea_orm_migration::prelude::*;
use std::error::Error;
use tracing::{error, info};

use crate::config::DatabaseConfig;

async fn connect() -> Result<DatabaseConnection, Box<dyn Error>> {
    let config = DatabaseConfig::from_env()?;

    info!("Connecting to database: {}", config.url);

    match Database::connect(&config.url).await {
        Ok(conn) => Ok(conn),
        Err(e) => {
            error!("Failed to connect to database: {}", e);
            Err(Box::new(e))
        }
    }
}

/// Execute the migrate command
pub async fn execute(steps: Option<u32>) -> Result<(), Box<dyn Error>> {
    let connection = connect().await?;

    // Log migration files to be applied
    let all_migrations = Migrator::migrations();
    info!("Found {} migration files", all_migrations.len());
    for m in &all_migrations {
        info!("Migration file: {}", m.name());
    }

    info!("Running migrations...");

    match Migrator::up(&connection, steps).await {
        Ok(_) => {
            info!("Successfully ran migrations");
            Ok(())
        }
        Err(e) => {
            error!("Failed to run migrations: {}", e);
            error!("Migration error details: {:?}", e);
            Err(Box::new(e))
        }
    }
}

/// Drop all tables and reapply every migration
pub async fn reset() -> Result<(), Box<dyn Error>> {
    let connection = connect().await?;

    info!("Resetting database...");

    match Migrator::fresh(&connection).await {
        Ok(_) => {
            info!("Database reset complete");
            Ok(())
        }
        Err(e) => {
            error!("Failed to reset database: {}", e);
            Err(Box::new(e))
        }
    }
}

/// Show applied and pending migrations
pub async fn status() -> Result<(), Box<dyn Error>> {
    let connection = connect().await?;

    match Migrator::status(&connection).await {
        Ok(_) => Ok(()),
        Err(e) => {
            error!("Failed to query migration status: {}", e);
            Err(Box::new(e))
        }
    }
}
