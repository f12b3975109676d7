use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RestBlockError {
    #[error(transparent)]
    ParseError(#[from] crate::parser::ParseError),

    #[error("Malformed curl command: {0}")]
    MalformedCurl(String),

    #[error("Cannot read attachment '{}': {source}", path.display())]
    AttachmentRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Config error: {0}")]
    ConfigError(String),
}

impl RestBlockError {
    /// 是否为解析阶段的错误（请求尚未发出）
    pub fn is_parse_error(&self) -> bool {
        matches!(
            self,
            RestBlockError::ParseError(_)
                | RestBlockError::MalformedCurl(_)
                | RestBlockError::AttachmentRead { .. }
        )
    }

    /// 是否为传输层错误
    pub fn is_transport_error(&self) -> bool {
        matches!(
            self,
            RestBlockError::HttpError(_) | RestBlockError::NetworkError(_)
        )
    }
}

/// Result type for restblock crate
pub type Result<T> = std::result::Result<T, RestBlockError>;
