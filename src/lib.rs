// ============================================================================
// Employee Directory Facade
// ============================================================================

pub mod cache;
pub mod client;
pub mod config;
pub mod core;
pub mod service;
pub mod web;

// Re-export main types for convenience
pub use crate::cache::{TOP_EARNER_CAPACITY, TopEarners};
pub use crate::client::{DirectoryClient, HttpDirectoryClient, InMemoryDirectoryClient};
pub use crate::config::{AppConfig, DirectoryBackend};
pub use crate::core::{CreateEmployeeInput, DirectoryError, Employee, Result};
pub use crate::service::EmployeeService;
pub use crate::web::{AppState, build_router};
