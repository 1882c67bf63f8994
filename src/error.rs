pub use masterror::{AppError, AppResult};

/// Create file read error
pub fn file_read_error(path: &str, source: std::io::Error) -> AppError {
    AppError::internal(format!("Failed to read file '{}': {}", path, source))
}

/// Create schema DDL error
pub fn schema_ddl_error(message: impl Into<String>) -> AppError {
    AppError::bad_request(format!("Schema DDL error: {}", message.into()))
}

/// Create catalog access error
pub fn catalog_error(message: impl Into<String>) -> AppError {
    AppError::service(message.into())
}

/// Create config error
pub fn config_error(message: impl Into<String>) -> AppError {
    AppError::bad_request(message.into())
}
