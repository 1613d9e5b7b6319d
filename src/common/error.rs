use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use thiserror::Error;

use crate::common::i18n::I18nStore;
use crate::middleware::i18n::Locale;

// Erros de domínio. A conversão para HTTP (e o idioma) acontece em `to_api_error`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Campos obrigatórios ausentes")]
    MissingFields,

    #[error("ID do item ausente")]
    MissingItemId,

    #[error("ID do item inválido: {0}")]
    InvalidItemId(String),

    #[error("Item não encontrado")]
    ItemNotFound,

    #[error("JSON malformado: {0}")]
    MalformedPayload(String),

    // Variante para erros de banco de dados
    #[error("Erro de banco de dados: {0}")]
    DatabaseError(#[from] sqlx::Error),

    // Variante genérica para qualquer outro erro inesperado
    #[error("Erro interno do servidor: {0}")]
    InternalServerError(#[from] anyhow::Error),
}

// Resposta HTTP já traduzida: sempre `{ "error": ... }`, com `details` nas validações.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub body: Value,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_)
            | AppError::MissingFields
            | AppError::MissingItemId
            | AppError::InvalidItemId(_)
            | AppError::MalformedPayload(_) => StatusCode::BAD_REQUEST,
            AppError::ItemNotFound => StatusCode::NOT_FOUND,
            AppError::DatabaseError(_) | AppError::InternalServerError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn message_key(&self) -> &'static str {
        match self {
            AppError::ValidationError(_) => "error.validation",
            AppError::MissingFields => "error.missing_fields",
            AppError::MissingItemId => "error.missing_id",
            AppError::InvalidItemId(_) => "error.invalid_id",
            AppError::ItemNotFound => "error.not_found",
            AppError::MalformedPayload(_) => "error.malformed_payload",
            AppError::DatabaseError(_) | AppError::InternalServerError(_) => "error.internal",
        }
    }

    pub fn to_api_error(&self, locale: &Locale, store: &I18nStore) -> ApiError {
        let status = self.status_code();
        let message = store.translate(locale, self.message_key());

        let body = match self {
            // Retorna todos os detalhes da validação, campo a campo.
            AppError::ValidationError(errors) => {
                let mut details = serde_json::Map::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<Value> = field_errors
                        .iter()
                        .map(|e| {
                            let key = format!("validation.{}.{}", field, e.code);
                            let text = store
                                .lookup(locale, &key)
                                .map(str::to_string)
                                .or_else(|| e.message.as_ref().map(|m| m.to_string()))
                                .unwrap_or_else(|| e.code.to_string());
                            Value::String(text)
                        })
                        .collect();
                    details.insert(field.to_string(), Value::Array(messages));
                }
                json!({ "error": message, "details": details })
            }
            // O `tracing` loga a mensagem detalhada; o cliente recebe só a genérica.
            AppError::DatabaseError(_) | AppError::InternalServerError(_) => {
                tracing::error!("Erro Interno do Servidor: {}", self);
                json!({ "error": message })
            }
            e => {
                tracing::debug!("Requisição rejeitada: {}", e);
                json!({ "error": message })
            }
        };

        ApiError { status, body }
    }
}
