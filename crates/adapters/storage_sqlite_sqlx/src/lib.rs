//! # leavehub-adapter-storage-sqlite-sqlx
//!
//! `SQLite` persistence adapter using [sqlx](https://docs.rs/sqlx).
//!
//! ## Responsibilities
//! - Implement the repository port traits defined in `leavehub-app::ports`
//! - Manage `SQLite` connection pool lifecycle
//! - Run database migrations (using sqlx embedded migrations)
//! - Map between domain types and database rows
//!
//! ## Dependency rule
//! Depends on `leavehub-app` (for port traits) and `leavehub-domain` (for domain types).
//! The `app` and `domain` crates must never reference this adapter.

mod application_repo;
mod codec;
mod employee_repo;
mod error;
mod event_repo;
mod pool;

pub use application_repo::SqliteApplicationRepository;
pub use employee_repo::SqliteEmployeeRepository;
pub use error::StorageError;
pub use event_repo::SqliteEventRepository;
pub use pool::{Config, Database};
