//! Application state - shared across all handlers.

use std::sync::Arc;

use inforum_core::PostService;
use inforum_core::ports::{
    BlogPostRepository, CategoryRepository, CommentRepository, HomeRepository,
    SubCommentRepository,
};
use inforum_infra::InMemoryStore;

#[cfg(feature = "postgres")]
use inforum_infra::{
    PostgresBlogPostRepository, PostgresCategoryRepository, PostgresCommentRepository,
    PostgresHomeRepository, PostgresStarRepository, PostgresSubCommentRepository,
};

use crate::config::AppConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: PostService,
    pub categories: Arc<dyn CategoryRepository>,
    pub homes: Arc<dyn HomeRepository>,
    pub comments: Arc<dyn CommentRepository>,
    pub sub_comments: Arc<dyn SubCommentRepository>,
    /// Which backend is serving requests, reported by the health check.
    pub storage: &'static str,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    ///
    /// Falls back to the in-memory store when no database is configured or
    /// the connection fails.
    pub async fn new(config: &AppConfig) -> Self {
        #[cfg(feature = "postgres")]
        let state = match &config.database {
            Some(db_config) => match Self::connect_postgres(db_config, config.run_migrations).await
            {
                Ok(state) => state,
                Err(e) => {
                    tracing::error!(
                        "Failed to connect to database: {}. Using in-memory fallback.",
                        e
                    );
                    Self::in_memory()
                }
            },
            None => {
                tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
                Self::in_memory()
            }
        };

        #[cfg(not(feature = "postgres"))]
        let state = {
            if config.database.is_some() {
                tracing::warn!("Built without postgres feature - DATABASE_URL is ignored");
            }
            Self::in_memory()
        };

        tracing::info!(storage = state.storage, "Application state initialized");
        state
    }

    /// State backed by a fresh in-memory store.
    pub fn in_memory() -> Self {
        let store = InMemoryStore::new();
        let posts: Arc<dyn BlogPostRepository> = Arc::new(store.clone());

        Self {
            posts: PostService::new(posts, Arc::new(store.clone())),
            categories: Arc::new(store.clone()),
            homes: Arc::new(store.clone()),
            comments: Arc::new(store.clone()),
            sub_comments: Arc::new(store),
            storage: "memory",
        }
    }

    #[cfg(feature = "postgres")]
    async fn connect_postgres(
        db_config: &inforum_infra::DatabaseConfig,
        run_migrations: bool,
    ) -> Result<Self, sea_orm::DbErr> {
        use migration::MigratorTrait;

        let db = inforum_infra::database::connect(db_config).await?;

        if run_migrations {
            tracing::info!("Running pending migrations");
            migration::Migrator::up(&db, None).await?;
        }

        Ok(Self::postgres(db))
    }

    #[cfg(feature = "postgres")]
    fn postgres(db: sea_orm::DbConn) -> Self {
        let posts: Arc<dyn BlogPostRepository> =
            Arc::new(PostgresBlogPostRepository::new(db.clone()));

        Self {
            posts: PostService::new(posts, Arc::new(PostgresStarRepository::new(db.clone()))),
            categories: Arc::new(PostgresCategoryRepository::new(db.clone())),
            homes: Arc::new(PostgresHomeRepository::new(db.clone())),
            comments: Arc::new(PostgresCommentRepository::new(db.clone())),
            sub_comments: Arc::new(PostgresSubCommentRepository::new(db)),
            storage: "postgres",
        }
    }
}
