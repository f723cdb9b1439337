//! Setup repository implementations.
//!
//! # Repositories
//!
//! - [`PgSetupRepository`] - PostgreSQL storage (`shop_setups` table)
//! - [`MemorySetupRepository`] - Process-local fallback when no database is configured

pub mod memory_setup_repository;
pub mod pg_setup_repository;

pub use memory_setup_repository::MemorySetupRepository;
pub use pg_setup_repository::PgSetupRepository;
