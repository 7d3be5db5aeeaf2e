use boothlog_core::error::CoreError;

/// Errors from talking to the staffing backend.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout, decode).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The backend answered with a non-2xx status. `message` is meant for
    /// the user and is displayed verbatim.
    #[error("{message}")]
    Backend {
        status: u16,
        code: Option<String>,
        message: String,
    },

    /// The request was rejected before it was sent.
    #[error(transparent)]
    Invalid(#[from] CoreError),

    /// The configured base URL cannot carry path segments.
    #[error("Invalid API base URL: {0}")]
    InvalidBaseUrl(String),
}

impl ApiError {
    pub fn backend(status: u16, code: &str, message: impl Into<String>) -> Self {
        ApiError::Backend {
            status,
            code: Some(code.to_string()),
            message: message.into(),
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Backend { status, .. } => Some(*status),
            ApiError::Request(e) => e.status().map(|s| s.as_u16()),
            ApiError::Invalid(_) | ApiError::InvalidBaseUrl(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_error_displays_message_verbatim() {
        let err = ApiError::backend(403, "FORBIDDEN", "Você não está escalado para este estande.");
        assert_eq!(err.to_string(), "Você não está escalado para este estande.");
        assert_eq!(err.status(), Some(403));
    }

    #[test]
    fn invalid_error_is_transparent() {
        let err = ApiError::from(CoreError::Validation("response: must not be empty".into()));
        assert_eq!(err.to_string(), "Validation failed: response: must not be empty");
        assert_eq!(err.status(), None);
    }

    #[test]
    fn request_error_display() {
        let req_err = reqwest::Client::new().get("://bad").build().unwrap_err();
        let err = ApiError::Request(req_err);
        assert!(err.to_string().contains("HTTP request failed"));
    }
}
