//! Database connection management and repositories.

mod connections;
mod memory;
pub mod postgres_repo;

pub mod entity;

pub use connections::{DatabaseConfig, connect};
pub use memory::InMemoryPostRepository;
pub use postgres_repo::PostgresPostRepository;
