//! # Quill Infrastructure
//!
//! Concrete implementations of the ports defined in `quill-core`:
//! the PostgreSQL repository (SeaORM) and the in-memory repository used as
//! fallback when no database is configured and as the test double.

pub mod database;

pub use database::{DatabaseConfig, InMemoryPostRepository, PostgresPostRepository};
