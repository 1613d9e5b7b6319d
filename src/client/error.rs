use thiserror::Error;

use crate::client::validation::ValidationResult;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("falha de transporte: {0}")]
    Transport(#[from] reqwest::Error),

    // Resposta `{ "error": ... }` da API
    #[error("{message}")]
    Api { status: u16, message: String },

    #[error("resposta inesperada da API: {0}")]
    UnexpectedResponse(String),
}

impl ClientError {
    /// Texto que vai para o aviso do usuário.
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Api { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("formulário inválido")]
    Invalid(ValidationResult),

    #[error(transparent)]
    Failed(#[from] ClientError),
}
