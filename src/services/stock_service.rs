// src/services/stock_service.rs

use crate::{
    common::error::AppError,
    db::StockRepository,
    models::stock::{NewStockItem, StockItemChanges, StockRecord},
};
use sqlx::PgPool;
use uuid::Uuid;

#[derive(Clone)]
pub struct StockService {
    stock_repo: StockRepository,
    pool: PgPool,
}

impl StockService {
    pub fn new(stock_repo: StockRepository, pool: PgPool) -> Self {
        Self { stock_repo, pool }
    }

    // --- LIST ---
    pub async fn list_items(&self) -> Result<Vec<StockRecord>, AppError> {
        let items = self.stock_repo.list_all(&self.pool).await?;
        tracing::debug!("📦 {} itens listados", items.len());
        Ok(items)
    }

    // --- CREATE ---
    pub async fn create_item(&self, item: NewStockItem) -> Result<StockRecord, AppError> {
        let item = Self::prepare_new(item)?;
        let record = self.stock_repo.insert(&self.pool, &item).await?;
        tracing::info!("➕ Item {} criado ({})", record.stock_number, record.id);
        Ok(record)
    }

    // --- UPDATE (parcial) ---
    pub async fn update_item(
        &self,
        id: Uuid,
        changes: StockItemChanges,
    ) -> Result<StockRecord, AppError> {
        let changes = Self::prepare_changes(changes)?;
        let record = self
            .stock_repo
            .update(&self.pool, id, &changes)
            .await?
            .ok_or(AppError::ItemNotFound)?;
        tracing::info!("✏️ Item {} atualizado", record.id);
        Ok(record)
    }

    // --- DELETE ---
    // Idempotente: apagar um id inexistente também é sucesso.
    pub async fn delete_item(&self, id: Uuid) -> Result<(), AppError> {
        let removed = self.stock_repo.delete(&self.pool, id).await?;
        if removed == 0 {
            tracing::debug!("🗑️ Exclusão de id inexistente: {}", id);
        } else {
            tracing::info!("🗑️ Item {} excluído", id);
        }
        Ok(())
    }

    // Regras de negócio puras (sem banco), aplicadas antes de qualquer escrita.
    fn prepare_new(item: NewStockItem) -> Result<NewStockItem, AppError> {
        let item = item.normalized();
        item.validate_invariants()?;
        Ok(item)
    }

    fn prepare_changes(changes: StockItemChanges) -> Result<StockItemChanges, AppError> {
        let changes = changes.normalized();
        changes.validate_invariants()?;
        Ok(changes)
    }
}
