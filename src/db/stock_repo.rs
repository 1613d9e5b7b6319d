// src/db/stock_repo.rs

use sqlx::{Executor, Postgres};
use uuid::Uuid;
use crate::{
    common::error::AppError,
    models::stock::{NewStockItem, StockItemChanges, StockRecord},
};

const RETURNING_COLUMNS: &str = "id, stock_number, product_name, quantity, price, updated_at";

// O repositório de estoque, responsável por todas as interações com a tabela 'stock_items'.
// Todas as funções recebem o executor (pool, conexão ou transação) de quem chama.
#[derive(Clone, Default)]
pub struct StockRepository;

impl StockRepository {
    pub fn new() -> Self {
        Self
    }

    // Lista completa, mais recentes primeiro
    pub async fn list_all<'e, E>(&self, executor: E) -> Result<Vec<StockRecord>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!("SELECT {RETURNING_COLUMNS} FROM stock_items ORDER BY updated_at DESC");
        let items = sqlx::query_as::<_, StockRecord>(&sql)
            .fetch_all(executor)
            .await?;
        Ok(items)
    }

    /// Insere um item; o banco atribui o `id` e o `updated_at`.
    pub async fn insert<'e, E>(
        &self,
        executor: E,
        item: &NewStockItem,
    ) -> Result<StockRecord, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!(
            r#"
            INSERT INTO stock_items (stock_number, product_name, quantity, price, updated_at)
            VALUES ($1, $2, $3, $4, NOW())
            RETURNING {RETURNING_COLUMNS}
            "#
        );
        let record = sqlx::query_as::<_, StockRecord>(&sql)
            .bind(&item.stock_number)
            .bind(&item.product_name)
            .bind(item.quantity)
            .bind(item.price)
            .fetch_one(executor)
            .await?;
        Ok(record)
    }

    /// Atualização parcial: `COALESCE` mantém o valor gravado quando o campo não veio.
    /// Retorna `None` se o id não existir.
    pub async fn update<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        changes: &StockItemChanges,
    ) -> Result<Option<StockRecord>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!(
            r#"
            UPDATE stock_items
            SET stock_number = COALESCE($2, stock_number),
                product_name = COALESCE($3, product_name),
                quantity = COALESCE($4, quantity),
                price = COALESCE($5, price),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {RETURNING_COLUMNS}
            "#
        );
        let record = sqlx::query_as::<_, StockRecord>(&sql)
            .bind(id)
            .bind(changes.stock_number.as_deref())
            .bind(changes.product_name.as_deref())
            .bind(changes.quantity)
            .bind(changes.price)
            .fetch_optional(executor)
            .await?;
        Ok(record)
    }

    // Exclusão definitiva; retorna quantas linhas saíram (0 se o id não existia)
    pub async fn delete<'e, E>(&self, executor: E, id: Uuid) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM stock_items WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }
}
