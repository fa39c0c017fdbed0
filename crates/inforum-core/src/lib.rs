//! # Inforum Core
//!
//! The domain layer of the Inforum backend.
//! This crate contains pure business logic with zero infrastructure dependencies:
//! domain entities, the slug generator, repository ports and the post/star service.

pub mod domain;
pub mod error;
pub mod ports;
pub mod services;
pub mod slug;

pub use error::{DomainError, RepoError};
pub use services::PostService;
pub use slug::generate_slug;
