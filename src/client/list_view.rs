// src/client/list_view.rs

use std::{cmp::Ordering, fmt, str::FromStr};

use crate::models::stock::StockRecord;

// Abaixo disso o item aparece como "estoque baixo"
pub const LOW_STOCK_THRESHOLD: i32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortColumn {
    StockNumber,
    ProductName,
    Quantity,
    Price,
    UpdatedAt,
}

impl SortColumn {
    fn compare(self, a: &StockRecord, b: &StockRecord) -> Ordering {
        match self {
            SortColumn::StockNumber => a.stock_number.cmp(&b.stock_number),
            SortColumn::ProductName => a.product_name.cmp(&b.product_name),
            SortColumn::Quantity => a.quantity.cmp(&b.quantity),
            SortColumn::Price => a.price.cmp(&b.price),
            SortColumn::UpdatedAt => a.updated_at.cmp(&b.updated_at),
        }
    }
}

impl FromStr for SortColumn {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace(['-', '_'], "").as_str() {
            "stocknumber" => Ok(SortColumn::StockNumber),
            "productname" | "name" => Ok(SortColumn::ProductName),
            "quantity" => Ok(SortColumn::Quantity),
            "price" => Ok(SortColumn::Price),
            "updatedat" | "updated" => Ok(SortColumn::UpdatedAt),
            other => Err(format!("coluna desconhecida: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// Estado de ordenação da tabela; `None` = ordem do servidor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SortState {
    current: Option<(SortColumn, SortDirection)>,
}

impl SortState {
    pub fn new(column: SortColumn, direction: SortDirection) -> Self {
        Self { current: Some((column, direction)) }
    }

    pub fn current(&self) -> Option<(SortColumn, SortDirection)> {
        self.current
    }

    /// Clique no cabeçalho: a mesma coluna em ordem crescente inverte; qualquer outro caso volta a crescente.
    pub fn toggle(&mut self, column: SortColumn) {
        let direction = match self.current {
            Some((current, SortDirection::Ascending)) if current == column => SortDirection::Descending,
            _ => SortDirection::Ascending,
        };
        self.current = Some((column, direction));
    }

    /// Ordenação estável; empates mantêm a ordem do cache.
    pub fn apply<'a>(&self, records: &'a [StockRecord]) -> Vec<&'a StockRecord> {
        let mut view: Vec<&StockRecord> = records.iter().collect();
        if let Some((column, direction)) = self.current {
            view.sort_by(|a, b| {
                let ordering = column.compare(a, b);
                match direction {
                    SortDirection::Ascending => ordering,
                    SortDirection::Descending => ordering.reverse(),
                }
            });
        }
        view
    }
}

/// Busca local: primeiro registro cujo número ou nome contém o termo (sem diferenciar maiúsculas).
pub fn search<'a>(records: &'a [StockRecord], term: &str) -> Option<&'a StockRecord> {
    let term = term.trim().to_lowercase();
    if term.is_empty() {
        return None;
    }
    records.iter().find(|record| {
        record.stock_number.to_lowercase().contains(&term)
            || record.product_name.to_lowercase().contains(&term)
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockStatus {
    OutOfStock,
    Low(i32),
    InStock,
}

impl StockStatus {
    pub fn of(record: &StockRecord) -> Self {
        match record.quantity {
            q if q <= 0 => StockStatus::OutOfStock,
            q if q < LOW_STOCK_THRESHOLD => StockStatus::Low(q),
            _ => StockStatus::InStock,
        }
    }
}

impl fmt::Display for StockStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StockStatus::OutOfStock => write!(f, "Out of Stock"),
            StockStatus::Low(q) => write!(f, "Only {q} left"),
            StockStatus::InStock => write!(f, "In stock"),
        }
    }
}
