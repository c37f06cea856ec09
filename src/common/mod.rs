pub mod config;
pub mod db;
pub mod errors;
pub mod locks;

// Re-exportaciones para facilitar el acceso
pub use config::AppConfig;
pub use errors::{DomainError, ErrorKind, Result};
pub use locks::UserLockRegistry;
