//! # church-common
//!
//! Shared utilities including configuration, error handling, authentication, and telemetry.

pub mod auth;
pub mod config;
pub mod error;
pub mod telemetry;

// Re-export commonly used types at crate root
pub use auth::{
    hash_password, validate_password_strength, verify_password, AccessToken, Claims,
    JwtService, PasswordService,
};
pub use config::{
    AppConfig, AppSettings, ConfigError, CorsConfig, DatabaseConfig, DefaultAdminConfig,
    Environment, JwtConfig, PaginationConfig, RateLimitConfig, ServerConfig,
};
pub use error::{domain_status, AppError};
pub use telemetry::{
    init_tracing, init_tracing_with_config, try_init_tracing, try_init_tracing_with_config,
    LogFormat, TracingConfig, TracingError,
};
