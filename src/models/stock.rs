// src/models/stock.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::ValidationErrors;

use crate::common::validation::{
    check_price, check_product_name, check_quantity, check_stock_number, collect,
    FIELD_PRICE, FIELD_PRODUCT_NAME, FIELD_QUANTITY, FIELD_STOCK_NUMBER,
};

// --- Registro de estoque (tabela 'stock_items') ---
// O 'id' e o 'updated_at' são sempre atribuídos pelo banco.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct StockRecord {
    pub id: Uuid,
    pub stock_number: String,
    pub product_name: String,
    pub quantity: i32,
    pub price: Decimal, // Vira float no JSON (serde-float)
    pub updated_at: DateTime<Utc>,
}

// --- Dados de criação (POST /items) ---
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewStockItem {
    pub stock_number: String,
    pub product_name: String,
    pub quantity: i32,
    pub price: Decimal,
}

impl NewStockItem {
    /// Checa as invariantes da tabela, acumulando todos os erros.
    pub fn validate_invariants(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        collect(&mut errors, FIELD_STOCK_NUMBER, check_stock_number(&self.stock_number));
        collect(&mut errors, FIELD_PRODUCT_NAME, check_product_name(&self.product_name));
        collect(&mut errors, FIELD_QUANTITY, check_quantity(Some(f64::from(self.quantity))));
        collect(&mut errors, FIELD_PRICE, check_price(self.price.to_f64()));

        if errors.errors().is_empty() { Ok(()) } else { Err(errors) }
    }

    /// Remove espaços das pontas dos campos de texto antes de gravar.
    pub fn normalized(self) -> Self {
        Self {
            stock_number: self.stock_number.trim().to_string(),
            product_name: self.product_name.trim().to_string(),
            ..self
        }
    }
}

// --- Alterações parciais (PUT /items) ---
// Campo ausente = manter o valor gravado.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockItemChanges {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,
}

impl StockItemChanges {
    /// Só valida os campos enviados.
    pub fn validate_invariants(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if let Some(stock_number) = &self.stock_number {
            collect(&mut errors, FIELD_STOCK_NUMBER, check_stock_number(stock_number));
        }
        if let Some(product_name) = &self.product_name {
            collect(&mut errors, FIELD_PRODUCT_NAME, check_product_name(product_name));
        }
        if let Some(quantity) = self.quantity {
            collect(&mut errors, FIELD_QUANTITY, check_quantity(Some(f64::from(quantity))));
        }
        if let Some(price) = self.price {
            collect(&mut errors, FIELD_PRICE, check_price(price.to_f64()));
        }

        if errors.errors().is_empty() { Ok(()) } else { Err(errors) }
    }

    pub fn normalized(self) -> Self {
        Self {
            stock_number: self.stock_number.map(|s| s.trim().to_string()),
            product_name: self.product_name.map(|s| s.trim().to_string()),
            ..self
        }
    }

    /// Aplica as alterações sobre um registro existente (usado pelo cache do cliente).
    pub fn apply_to(&self, record: &mut StockRecord) {
        if let Some(stock_number) = &self.stock_number {
            record.stock_number = stock_number.clone();
        }
        if let Some(product_name) = &self.product_name {
            record.product_name = product_name.clone();
        }
        if let Some(quantity) = self.quantity {
            record.quantity = quantity;
        }
        if let Some(price) = self.price {
            record.price = price;
        }
    }
}
