use content_types::TypesError;
use thiserror::Error;

/// Errors raised by path and permission checks.
#[derive(Error, Debug)]
pub enum PermissionError {
    #[error("path cannot be empty or whitespace")]
    EmptyPath,

    #[error(transparent)]
    InvalidPath(#[from] TypesError),
}
