//! Application state - shared across all handlers.

use std::io;
use std::sync::Arc;

use blog_core::ports::PostRepository;
use blog_infra::InMemoryPostRepository;

#[cfg(feature = "postgres")]
use blog_infra::{PostgresPostRepository, database::connect};
#[cfg(feature = "postgres")]
use migration::{Migrator, MigratorTrait};

use crate::config::AppConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<dyn PostRepository>,
}

impl AppState {
    pub fn new(posts: Arc<dyn PostRepository>) -> Self {
        Self { posts }
    }

    /// Build the application state with the repository the configuration asks for.
    ///
    /// Without a database URL the server runs on the in-memory repository.
    /// A configured database that cannot be reached is fatal.
    pub async fn init(config: &AppConfig) -> io::Result<Self> {
        #[cfg(feature = "postgres")]
        let posts: Arc<dyn PostRepository> = match &config.database {
            Some(db_config) => {
                let conn = connect(db_config).await.map_err(|e| {
                    tracing::error!("Failed to connect to database: {}", e);
                    io::Error::other(e)
                })?;

                if config.auto_migrate {
                    Migrator::up(&conn, None).await.map_err(|e| {
                        tracing::error!("Failed to apply migrations: {}", e);
                        io::Error::other(e)
                    })?;
                    tracing::info!("Database migrations applied");
                }

                Arc::new(PostgresPostRepository::new(conn))
            }
            None => {
                tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
                Arc::new(InMemoryPostRepository::new())
            }
        };

        #[cfg(not(feature = "postgres"))]
        let posts: Arc<dyn PostRepository> = {
            if config.database.is_some() {
                tracing::warn!("DATABASE_URL ignored: built without the postgres feature");
            }
            tracing::info!("Running without postgres feature - using in-memory repository");
            Arc::new(InMemoryPostRepository::new())
        };

        tracing::info!(storage = posts.backend(), "Application state initialized");

        Ok(Self::new(posts))
    }
}
