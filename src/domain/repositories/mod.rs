//! Repository trait definitions for the domain layer.
//!
//! Traits define the data access contract; implementations live in
//! `crate::infrastructure::persistence`. Mock implementations are generated
//! via `mockall` for unit tests.

pub mod setup_repository;

pub use setup_repository::SetupRepository;

#[cfg(test)]
pub use setup_repository::MockSetupRepository;
