//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementation of the contact repository port backed by
//! PostgreSQL via Diesel, with async execution through `diesel-async` and
//! `bb8` connection pooling.
//!
//! # Architecture
//!
//! - **Thin adapters**: the repository only translates between Diesel rows
//!   and domain types. Validation and duplicate messages live in the domain.
//! - **Internal models**: row structs (`models.rs`) and table definitions
//!   (`schema.rs`) never leave this module.
//! - **Strongly typed errors**: driver failures become
//!   [`ContactRepositoryError`](crate::domain::ports::ContactRepositoryError)
//!   variants.
//!
//! # Example
//!
//! ```no_run
//! use contact_manager::outbound::persistence::{
//!     DbPool, DieselContactRepository, PoolConfig, run_pending_migrations,
//! };
//!
//! # async fn wire() -> Result<(), Box<dyn std::error::Error>> {
//! let url = "postgres://contacts@localhost/contacts";
//! run_pending_migrations(url).await?;
//! let pool = DbPool::new(PoolConfig::new(url)).await?;
//! let _repo = DieselContactRepository::new(pool);
//! # Ok(())
//! # }
//! ```

mod diesel_contact_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_contact_repository::DieselContactRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
