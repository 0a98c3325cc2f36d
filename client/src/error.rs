use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{endpoint} returned {status}")]
    Status {
        endpoint: &'static str,
        status: u16,
        /// `detail` field of the JSON error body, when the backend sent one.
        detail: Option<String>,
    },
    #[error("{0}")]
    Transport(#[from] reqwest::Error),
    #[error("Invalid response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl ApiError {
    /// Text shown to the user for a failed call.
    ///
    /// Status failures map to `fallback`; with `use_detail` the backend's
    /// `detail` wins when present. Other failures show their own message.
    pub fn user_message(&self, fallback: &str, use_detail: bool) -> String {
        match self {
            ApiError::Status { detail, .. } => match detail {
                Some(detail) if use_detail && !detail.is_empty() => detail.clone(),
                _ => fallback.to_string(),
            },
            other => other.to_string(),
        }
    }
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn status(detail: Option<&str>) -> ApiError {
        ApiError::Status {
            endpoint: "/api/summarize",
            status: 404,
            detail: detail.map(str::to_string),
        }
    }

    #[test]
    fn detail_is_used_only_when_requested() {
        let err = status(Some("Документ не найден"));
        assert_eq!(err.user_message("fallback", true), "Документ не найден");
        assert_eq!(err.user_message("fallback", false), "fallback");
    }

    #[test]
    fn missing_or_empty_detail_falls_back() {
        assert_eq!(status(None).user_message("fallback", true), "fallback");
        assert_eq!(status(Some("")).user_message("fallback", true), "fallback");
    }

    #[test]
    fn non_status_errors_keep_their_message() {
        let err = ApiError::InvalidUrl("nope".to_string());
        assert_eq!(err.user_message("fallback", true), "Invalid URL: nope");
    }
}
