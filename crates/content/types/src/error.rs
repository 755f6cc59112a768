use thiserror::Error;

/// Errors raised while building or loading content model types.
#[derive(Error, Debug)]
pub enum TypesError {
    #[error("unknown fallback code: {0}")]
    UnknownFallbackCode(i32),

    #[error("duplicate property alias '{alias}' on content type '{content_type}'")]
    DuplicatePropertyAlias { content_type: String, alias: String },

    #[error("invalid materialized path '{path}': {reason}")]
    InvalidPath { path: String, reason: String },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_alias_display() {
        let err = TypesError::DuplicatePropertyAlias {
            content_type: "article".into(),
            alias: "title".into(),
        };
        assert_eq!(
            err.to_string(),
            "duplicate property alias 'title' on content type 'article'"
        );
    }

    #[test]
    fn unknown_code_display() {
        assert!(TypesError::UnknownFallbackCode(9).to_string().contains('9'));
    }
}
