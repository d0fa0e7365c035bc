//! Application configuration
//!
//! - `config`: configuration structures and validation
//! - `loader`: layered loading from embedded defaults, files and environment

pub mod config;
pub mod loader;

pub use self::config::AppConfig;
pub use loader::load_config;
