// src/client/api.rs

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Response, StatusCode};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::{
    client::error::ClientError,
    models::stock::{NewStockItem, StockItemChanges, StockRecord},
};

/// Contrato da API de estoque visto pelo cliente.
#[async_trait]
pub trait StockApi: Send + Sync {
    async fn fetch_items(&self) -> Result<Vec<StockRecord>, ClientError>;

    /// Retorna o id atribuído pelo banco.
    async fn create_item(&self, item: &NewStockItem) -> Result<Uuid, ClientError>;

    /// Retorna o `updatedAt` gravado pelo banco, quando o servidor envia.
    async fn update_item(
        &self,
        id: Uuid,
        changes: &StockItemChanges,
    ) -> Result<Option<DateTime<Utc>>, ClientError>;

    async fn delete_item(&self, id: Uuid) -> Result<(), ClientError>;
}

// Envelope comum das respostas de escrita
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Outcome {
    status: Option<String>,
    id: Option<Uuid>,
    updated_at: Option<DateTime<Utc>>,
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

#[derive(Clone)]
pub struct HttpStockApi {
    client: reqwest::Client,
    items_url: String,
}

impl HttpStockApi {
    pub fn new(base_url: &str) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: &str) -> Self {
        let items_url = format!("{}/items", base_url.trim_end_matches('/'));
        Self { client, items_url }
    }

    pub fn items_url(&self) -> &str {
        &self.items_url
    }

    async fn api_error(status: StatusCode, response: Response) -> ClientError {
        let text = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&text)
            .map(|body| body.error)
            .unwrap_or_else(|_| format!("HTTP {}", status.as_u16()));
        ClientError::Api { status: status.as_u16(), message }
    }

    async fn read_outcome(response: Response) -> Result<Outcome, ClientError> {
        let status = response.status();
        if !status.is_success() {
            return Err(Self::api_error(status, response).await);
        }

        let outcome: Outcome = response.json().await?;
        if let Some(message) = outcome.error {
            return Err(ClientError::Api { status: status.as_u16(), message });
        }
        match outcome.status.as_deref() {
            Some("success") => Ok(outcome),
            other => Err(ClientError::UnexpectedResponse(format!(
                "status = {}",
                other.unwrap_or("<ausente>")
            ))),
        }
    }
}

#[async_trait]
impl StockApi for HttpStockApi {
    async fn fetch_items(&self) -> Result<Vec<StockRecord>, ClientError> {
        tracing::debug!("GET {}", self.items_url);
        let response = self.client.get(&self.items_url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Self::api_error(status, response).await);
        }
        Ok(response.json().await?)
    }

    async fn create_item(&self, item: &NewStockItem) -> Result<Uuid, ClientError> {
        tracing::debug!("POST {} ({})", self.items_url, item.stock_number);
        let response = self.client.post(&self.items_url).json(item).send().await?;
        let outcome = Self::read_outcome(response).await?;
        outcome
            .id
            .ok_or_else(|| ClientError::UnexpectedResponse("id ausente na resposta".into()))
    }

    async fn update_item(
        &self,
        id: Uuid,
        changes: &StockItemChanges,
    ) -> Result<Option<DateTime<Utc>>, ClientError> {
        tracing::debug!("PUT {} ({})", self.items_url, id);
        let mut body = serde_json::to_value(changes)
            .map_err(|e| ClientError::UnexpectedResponse(e.to_string()))?;
        body["id"] = json!(id);

        let response = self.client.put(&self.items_url).json(&body).send().await?;
        let outcome = Self::read_outcome(response).await?;
        Ok(outcome.updated_at)
    }

    async fn delete_item(&self, id: Uuid) -> Result<(), ClientError> {
        tracing::debug!("DELETE {} ({})", self.items_url, id);
        let response = self
            .client
            .delete(&self.items_url)
            .json(&json!({ "id": id }))
            .send()
            .await?;
        Self::read_outcome(response).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::header, Router};
    use rust_decimal::Decimal;
    use tokio::net::TcpListener;

    // Servidor local que responde sempre o mesmo status e corpo
    async fn stub(status: u16, content_type: &'static str, body: &'static str) -> HttpStockApi {
        let status = axum::http::StatusCode::from_u16(status).unwrap();
        let app = Router::new()
            .fallback(move || async move { (status, [(header::CONTENT_TYPE, content_type)], body) });
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        HttpStockApi::new(&format!("http://{addr}"))
    }

    async fn json_stub(status: u16, body: &'static str) -> HttpStockApi {
        stub(status, "application/json", body).await
    }

    fn widget() -> NewStockItem {
        NewStockItem {
            stock_number: "STK010".into(),
            product_name: "Widget".into(),
            quantity: 5,
            price: Decimal::new(250, 2),
        }
    }

    #[test]
    fn items_url_ignores_trailing_slash() {
        assert_eq!(HttpStockApi::new("http://localhost:3000/").items_url(), "http://localhost:3000/items");
        assert_eq!(HttpStockApi::new("http://localhost:3000").items_url(), "http://localhost:3000/items");
    }

    #[test]
    fn outcome_reads_server_timestamp() {
        let outcome: Outcome = serde_json::from_str(
            r#"{"status":"success","updatedAt":"2026-10-14T12:00:00Z"}"#,
        )
        .unwrap();
        assert_eq!(outcome.status.as_deref(), Some("success"));
        assert!(outcome.updated_at.is_some());
        assert!(outcome.id.is_none());
    }

    #[tokio::test]
    async fn error_body_becomes_api_error() {
        let api = json_stub(400, r#"{"error":"Missing item id"}"#).await;
        match api.delete_item(Uuid::new_v4()).await {
            Err(ClientError::Api { status, message }) => {
                assert_eq!(status, 400);
                assert_eq!(message, "Missing item id");
            }
            other => panic!("esperava ClientError::Api, veio {other:?}"),
        }
    }

    #[tokio::test]
    async fn non_json_error_falls_back_to_http_code() {
        let api = stub(502, "text/html", "<html>bad gateway</html>").await;
        match api.fetch_items().await {
            Err(ClientError::Api { status, message }) => {
                assert_eq!(status, 502);
                assert_eq!(message, "HTTP 502");
            }
            other => panic!("esperava ClientError::Api, veio {other:?}"),
        }
    }

    #[tokio::test]
    async fn success_status_with_error_field_is_an_error() {
        let api = json_stub(200, r#"{"error":"Failed to update item"}"#).await;
        let changes = StockItemChanges { quantity: Some(1), ..Default::default() };
        match api.update_item(Uuid::new_v4(), &changes).await {
            Err(ClientError::Api { status, message }) => {
                assert_eq!(status, 200);
                assert_eq!(message, "Failed to update item");
            }
            other => panic!("esperava ClientError::Api, veio {other:?}"),
        }
    }

    #[tokio::test]
    async fn missing_or_unknown_status_is_unexpected() {
        let api = json_stub(200, r#"{}"#).await;
        assert!(matches!(
            api.delete_item(Uuid::new_v4()).await,
            Err(ClientError::UnexpectedResponse(_))
        ));

        let api = json_stub(200, r#"{"status":"pending"}"#).await;
        assert!(matches!(
            api.delete_item(Uuid::new_v4()).await,
            Err(ClientError::UnexpectedResponse(_))
        ));
    }

    #[tokio::test]
    async fn create_without_id_is_unexpected() {
        let api = json_stub(200, r#"{"status":"success"}"#).await;
        assert!(matches!(
            api.create_item(&widget()).await,
            Err(ClientError::UnexpectedResponse(_))
        ));
    }

    #[tokio::test]
    async fn create_returns_store_id() {
        let api =
            json_stub(200, r#"{"status":"success","id":"6f1c0c4e-8a49-4f4e-9f0e-2c1d5a0b7e11"}"#).await;
        let id = api.create_item(&widget()).await.unwrap();
        assert_eq!(id.to_string(), "6f1c0c4e-8a49-4f4e-9f0e-2c1d5a0b7e11");
    }
}
