//! SeaORM-backed persistence.

mod connection;
pub mod entity;
mod pg_repo;

pub use connection::{DatabaseConfig, connect};
pub use pg_repo::{PgCommentRepository, PgPostRepository, PgUserRepository};
