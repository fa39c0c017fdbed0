//! # Inforum Infrastructure
//!
//! Concrete implementations of the ports defined in `inforum-core`.
//!
//! ## Feature Flags
//!
//! - `postgres` (default) - PostgreSQL repositories via SeaORM
//! - Build with `--no-default-features` for the in-memory store only

pub mod auth;
pub mod database;
pub mod memory;

pub use auth::{JwtConfig, JwtTokenService};
pub use database::DatabaseConfig;
pub use memory::InMemoryStore;

#[cfg(feature = "postgres")]
pub use database::{
    PostgresBlogPostRepository, PostgresCategoryRepository, PostgresCommentRepository,
    PostgresHomeRepository, PostgresStarRepository, PostgresSubCommentRepository,
};
