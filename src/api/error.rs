use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Failure surfaced to the browser as a plain-text message
#[derive(Debug, thiserror::Error)]
pub enum HandlerError {
    /// Storage failure (500, logged with its cause)
    #[error("{message}")]
    Storage {
        message: &'static str,
        #[source]
        source: anyhow::Error,
    },

    /// Malformed request field (400)
    #[error("{message}")]
    InvalidInput { message: &'static str },
}

impl HandlerError {
    /// Wrap a storage error with the endpoint's fixed message
    pub fn storage(message: &'static str) -> impl FnOnce(anyhow::Error) -> Self {
        move |source| Self::Storage { message, source }
    }
}

impl IntoResponse for HandlerError {
    fn into_response(self) -> Response {
        match self {
            Self::Storage { message, source } => {
                log::error!("{}: {:#}", message, source);
                (StatusCode::INTERNAL_SERVER_ERROR, message).into_response()
            }
            Self::InvalidInput { message } => (StatusCode::BAD_REQUEST, message).into_response(),
        }
    }
}
