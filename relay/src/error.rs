use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use common::models::ErrorBody;
use thiserror::Error;
use tracing::error;

use crate::providers::ProviderError;

#[derive(Debug, Error)]
pub enum RelayError {
    #[error("{0} not configured")]
    NotConfigured(&'static str),
    #[error("Missing {0}")]
    Missing(&'static str),
    #[error(transparent)]
    Provider(#[from] ProviderError),
}

impl ResponseError for RelayError {
    fn status_code(&self) -> StatusCode {
        match self {
            RelayError::NotConfigured(_) | RelayError::Missing(_) => StatusCode::BAD_REQUEST,
            RelayError::Provider(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let mut message = self.to_string();
        if let RelayError::Provider(e) = self {
            error!("Provider call failed: {}", e);
            if message.is_empty() {
                message = "Failed".to_string();
            }
        }
        HttpResponse::build(self.status_code()).json(ErrorBody { error: message })
    }
}
