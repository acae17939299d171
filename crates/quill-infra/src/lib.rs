//! # Quill Infrastructure
//!
//! Concrete implementations of the ports defined in `quill-core`:
//! Postgres repositories via SeaORM, in-memory repositories for the
//! no-database mode and tests, Argon2 password hashing, and signed
//! session tokens.

pub mod auth;
pub mod database;
pub mod memory;

pub use auth::{Argon2PasswordService, SessionConfig, TokenSessionService};
pub use database::{DatabaseConfig, PgCommentRepository, PgPostRepository, PgUserRepository};
pub use memory::{MemoryCommentRepository, MemoryPostRepository, MemoryStore, MemoryUserRepository};
