//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! This module provides concrete implementations of the domain repository
//! ports backed by PostgreSQL via Diesel with async support through
//! `diesel-async` and `bb8` connection pooling.
//!
//! Repository implementations only translate between Diesel rows and domain
//! types. Row structs (`models.rs`) and the table definitions (`schema.rs`)
//! stay private to this module, and every database failure is mapped to the
//! owning port's error type.
//!
//! # Example
//!
//! ```ignore
//! use foodgram::outbound::persistence::{DbPool, PoolConfig, DieselRecipeRepository};
//!
//! let config = PoolConfig::new("postgres://localhost/foodgram");
//! let pool = DbPool::new(config).await?;
//! let repo = DieselRecipeRepository::new(pool);
//! ```

mod diesel_catalog_repository;
pub(crate) mod diesel_helpers;
mod diesel_recipe_repository;
mod diesel_relation_repository;
mod diesel_subscription_repository;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_catalog_repository::DieselCatalogRepository;
pub use diesel_recipe_repository::DieselRecipeRepository;
pub use diesel_relation_repository::DieselRelationRepository;
pub use diesel_subscription_repository::DieselSubscriptionRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MigrationError, run_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
