/// Application-level errors
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("Catalog API returned status {status}: {body}")]
    Upstream { status: u16, body: String },

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl AppError {
    /// True for failures that originate at the catalog API (non-2xx or transport).
    ///
    /// These are the only errors callers of the catalog surface; everything else
    /// belongs to local persistence or startup.
    pub fn is_upstream(&self) -> bool {
        matches!(self, AppError::HttpClient(_) | AppError::Upstream { .. })
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_error_display() {
        let err = AppError::Upstream {
            status: 401,
            body: "Invalid API key".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Catalog API returned status 401: Invalid API key"
        );
        assert!(err.is_upstream());
    }

    #[test]
    fn test_storage_errors_are_not_upstream() {
        assert!(!AppError::Storage("disk full".to_string()).is_upstream());

        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        assert!(!AppError::from(io).is_upstream());
    }
}
