// src/client/validation.rs

use std::collections::BTreeMap;

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use validator::ValidationErrors;

use crate::{
    common::validation::{
        check_price, check_product_name, check_quantity, check_stock_number, collect,
        first_messages, FIELD_PRICE, FIELD_PRODUCT_NAME, FIELD_QUANTITY, FIELD_STOCK_NUMBER,
    },
    models::stock::{NewStockItem, StockItemChanges, StockRecord},
};

/// Valores do formulário, ainda não validados.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StockDraft {
    pub stock_number: String,
    pub product_name: String,
    pub quantity: Option<f64>,
    pub price: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: BTreeMap<String, String>,
}

impl ValidationResult {
    pub fn error(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }
}

fn parse_number(raw: &str) -> Option<f64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    raw.parse().ok()
}

impl StockDraft {
    /// Monta o rascunho a partir do texto digitado; número em branco ou ilegível vira `None`.
    pub fn parse_form(stock_number: &str, product_name: &str, quantity: &str, price: &str) -> Self {
        Self {
            stock_number: stock_number.to_string(),
            product_name: product_name.to_string(),
            quantity: parse_number(quantity),
            price: parse_number(price),
        }
    }

    // Pré-preenche o formulário de edição
    pub fn from_record(record: &StockRecord) -> Self {
        Self {
            stock_number: record.stock_number.clone(),
            product_name: record.product_name.clone(),
            quantity: Some(f64::from(record.quantity)),
            price: record.price.to_f64(),
        }
    }

    pub fn validate(&self) -> ValidationResult {
        validate_draft(self)
    }

    /// Converte num item novo, se o rascunho for válido.
    pub fn to_new_item(&self) -> Result<NewStockItem, ValidationResult> {
        let result = self.validate();
        if !result.is_valid {
            return Err(result);
        }
        // Seguro: as regras acima garantem inteiro >= 0 dentro do i32 e preço finito
        let quantity = self.quantity.unwrap_or_default() as i32;
        let price = self
            .price
            .and_then(Decimal::from_f64)
            .map(|p| p.round_dp(2))
            .unwrap_or(Decimal::ZERO);

        Ok(NewStockItem {
            stock_number: self.stock_number.trim().to_string(),
            product_name: self.product_name.trim().to_string(),
            quantity,
            price,
        })
    }

    /// O formulário de edição sempre envia todos os campos.
    pub fn to_changes(&self) -> Result<StockItemChanges, ValidationResult> {
        let item = self.to_new_item()?;
        Ok(StockItemChanges {
            stock_number: Some(item.stock_number),
            product_name: Some(item.product_name),
            quantity: Some(item.quantity),
            price: Some(item.price),
        })
    }
}

/// Valida todos os campos de forma independente (todos os erros, não só o primeiro).
pub fn validate_draft(draft: &StockDraft) -> ValidationResult {
    let mut errors = ValidationErrors::new();
    collect(&mut errors, FIELD_STOCK_NUMBER, check_stock_number(&draft.stock_number));
    collect(&mut errors, FIELD_PRODUCT_NAME, check_product_name(&draft.product_name));
    collect(&mut errors, FIELD_QUANTITY, check_quantity(draft.quantity));
    collect(&mut errors, FIELD_PRICE, check_price(draft.price));

    let errors = first_messages(&errors);
    ValidationResult {
        is_valid: errors.is_empty(),
        errors,
    }
}
