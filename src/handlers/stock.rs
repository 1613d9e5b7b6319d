// src/handlers/stock.rs

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::i18n::Locale,
    models::stock::{NewStockItem, StockItemChanges},
};

// ---
// Payloads
// ---
// A API só checa presença aqui; as invariantes ficam no StockService.

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateStockPayload {
    pub stock_number: Option<String>,
    pub product_name: Option<String>,
    // Se o JSON não tiver esses campos (ou vier null), assume 0
    pub quantity: Option<i32>,
    pub price: Option<Decimal>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStockPayload {
    pub id: Option<String>,
    pub stock_number: Option<String>,
    pub product_name: Option<String>,
    pub quantity: Option<i32>,
    pub price: Option<Decimal>,
}

#[derive(Debug, Deserialize)]
pub struct DeleteStockPayload {
    pub id: Option<String>,
}

fn parse_item_id(raw: Option<&str>) -> Result<Uuid, AppError> {
    let raw = raw.map(str::trim).filter(|s| !s.is_empty()).ok_or(AppError::MissingItemId)?;
    Uuid::parse_str(raw).map_err(|_| AppError::InvalidItemId(raw.to_string()))
}

fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| AppError::MalformedPayload(rejection.body_text()))
}

// ---
// Handler: GET /items
// ---
pub async fn get_all_items(
    State(app_state): State<AppState>,
    locale: Locale,
) -> Result<impl IntoResponse, ApiError> {

    let items = app_state
        .stock_service
        .list_items()
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(items)))
}

// ---
// Handler: POST /items
// ---
pub async fn create_item(
    State(app_state): State<AppState>,
    locale: Locale,
    payload: Result<Json<CreateStockPayload>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {

    let payload = json_body(payload)
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    let (Some(stock_number), Some(product_name)) = (payload.stock_number, payload.product_name)
    else {
        return Err(AppError::MissingFields.to_api_error(&locale, &app_state.i18n_store));
    };

    let new_item = NewStockItem {
        stock_number,
        product_name,
        quantity: payload.quantity.unwrap_or(0),
        price: payload.price.unwrap_or(Decimal::ZERO),
    };

    let record = app_state
        .stock_service
        .create_item(new_item)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(json!({ "status": "success", "id": record.id }))))
}

// ---
// Handler: PUT /items
// ---
pub async fn update_item(
    State(app_state): State<AppState>,
    locale: Locale,
    payload: Result<Json<UpdateStockPayload>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {

    let payload = json_body(payload)
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    let id = parse_item_id(payload.id.as_deref())
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    let changes = StockItemChanges {
        stock_number: payload.stock_number,
        product_name: payload.product_name,
        quantity: payload.quantity,
        price: payload.price,
    };

    let record = app_state
        .stock_service
        .update_item(id, changes)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    // O cliente usa o timestamp do banco para reconciliar o cache
    Ok((
        StatusCode::OK,
        Json(json!({ "status": "success", "updatedAt": record.updated_at })),
    ))
}

// ---
// Handler: DELETE /items
// ---
pub async fn delete_item(
    State(app_state): State<AppState>,
    locale: Locale,
    payload: Result<Json<DeleteStockPayload>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {

    let payload = json_body(payload)
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    let id = parse_item_id(payload.id.as_deref())
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    app_state
        .stock_service
        .delete_item(id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(json!({ "status": "success" }))))
}
