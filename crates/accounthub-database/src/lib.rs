//! # accounthub-database
//!
//! PostgreSQL database connection management and concrete repository
//! implementations for Accounthub entities. Repositories expose only the
//! narrow operations the core needs: select-by-identifier,
//! delete-by-identifier, insert (atomic rotation), and count-where.

pub mod connection;
pub mod migration;
pub mod repositories;

pub use connection::DatabasePool;
