// src/common/validation.rs

// Regras de campo compartilhadas entre o validador do formulário (cliente)
// e o serviço de estoque (servidor). Cada regra devolve no máximo um erro.

use std::collections::BTreeMap;

use validator::{ValidationError, ValidationErrors};

pub const FIELD_STOCK_NUMBER: &str = "stockNumber";
pub const FIELD_PRODUCT_NAME: &str = "productName";
pub const FIELD_QUANTITY: &str = "quantity";
pub const FIELD_PRICE: &str = "price";

// Limite da coluna NUMERIC(12, 2)
pub const MAX_PRICE: f64 = 9_999_999_999.99;

fn field_error(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(message.into());
    err
}

pub fn check_stock_number(value: &str) -> Result<(), ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(field_error("required", "Stock number is required"));
    }
    if !trimmed.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(field_error(
            "alphanumeric",
            "Stock number must contain only alphanumeric characters",
        ));
    }
    Ok(())
}

pub fn check_product_name(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(field_error("required", "Product name is required"));
    }
    Ok(())
}

pub fn check_quantity(value: Option<f64>) -> Result<(), ValidationError> {
    let Some(quantity) = value.filter(|q| !q.is_nan()) else {
        return Err(field_error("required", "Quantity is required"));
    };
    if quantity < 0.0 {
        return Err(field_error("range", "Quantity must be 0 or greater"));
    }
    if !quantity.is_finite() || quantity.fract() != 0.0 {
        return Err(field_error("whole_number", "Quantity must be a whole number"));
    }
    if quantity > f64::from(i32::MAX) {
        return Err(field_error("too_large", "Quantity is too large"));
    }
    Ok(())
}

pub fn check_price(value: Option<f64>) -> Result<(), ValidationError> {
    let Some(price) = value.filter(|p| !p.is_nan()) else {
        return Err(field_error("required", "Price is required"));
    };
    if price < 0.0 {
        return Err(field_error("range", "Price must be 0 or greater"));
    }
    if !price.is_finite() {
        return Err(field_error("finite", "Price must be a finite number"));
    }
    if price > MAX_PRICE {
        return Err(field_error("too_large", "Price is too large"));
    }
    Ok(())
}

/// Acumula o resultado de uma regra no conjunto de erros, sem interromper as demais.
pub fn collect(
    errors: &mut ValidationErrors,
    field: &'static str,
    result: Result<(), ValidationError>,
) {
    if let Err(e) = result {
        errors.add(field, e);
    }
}

/// Primeira mensagem de cada campo, em ordem estável.
pub fn first_messages(errors: &ValidationErrors) -> BTreeMap<String, String> {
    errors
        .field_errors()
        .into_iter()
        .filter_map(|(field, field_errors)| {
            field_errors.first().map(|e| {
                let message = e
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string());
                (field.to_string(), message)
            })
        })
        .collect()
}
