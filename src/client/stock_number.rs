// src/client/stock_number.rs

use crate::models::stock::StockRecord;

pub const STOCK_NUMBER_PREFIX: &str = "STK";

/// Parte numérica de um número de estoque: tira a primeira ocorrência do prefixo
/// e lê os dígitos iniciais do resto (um `+` na frente é aceito, `-` não).
/// Valores fora do padrão viram `None`.
pub fn numeric_suffix(stock_number: &str) -> Option<u64> {
    let rest = stock_number.replacen(STOCK_NUMBER_PREFIX, "", 1);
    let rest = rest.trim_start();
    let rest = rest.strip_prefix('+').unwrap_or(rest);
    let digits_end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    rest[..digits_end].parse().ok()
}

/// Sugere o próximo número de estoque: maior sufixo + 1, com três dígitos no mínimo.
pub fn next_stock_number(records: &[StockRecord]) -> String {
    let next = records
        .iter()
        .filter_map(|record| numeric_suffix(&record.stock_number))
        .max()
        .unwrap_or(0)
        .saturating_add(1);
    format!("{STOCK_NUMBER_PREFIX}{next:03}")
}
