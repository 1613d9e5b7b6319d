// src/client/cache.rs

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{
    client::{api::StockApi, error::ClientError},
    models::stock::{StockItemChanges, StockRecord},
};

#[derive(Debug, Clone, PartialEq)]
pub enum LoadState {
    Pending,
    Ready,
    Failed(String),
}

/// Espelho local da tabela, na ordem em que o servidor enviou.
#[derive(Debug, Clone)]
pub struct StockCache {
    records: Vec<StockRecord>,
    load_state: LoadState,
}

impl Default for StockCache {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            load_state: LoadState::Pending,
        }
    }
}

impl StockCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Substitui todo o cache por uma busca nova. Em caso de erro os registros ficam como estavam.
    pub async fn load<A>(&mut self, api: &A) -> Result<(), ClientError>
    where
        A: StockApi + ?Sized,
    {
        match api.fetch_items().await {
            Ok(records) => {
                tracing::debug!("cache recarregado com {} itens", records.len());
                self.replace(records);
                Ok(())
            }
            Err(e) => {
                // Só marca falha se nunca carregou
                if self.load_state != LoadState::Ready {
                    self.load_state = LoadState::Failed(e.user_message());
                }
                Err(e)
            }
        }
    }

    pub fn replace(&mut self, records: Vec<StockRecord>) {
        self.records = records;
        self.load_state = LoadState::Ready;
    }

    /// Aplica uma alteração já confirmada pelo servidor.
    pub fn apply_update(
        &mut self,
        id: Uuid,
        changes: &StockItemChanges,
        updated_at: DateTime<Utc>,
    ) -> Option<&StockRecord> {
        let record = self.records.iter_mut().find(|r| r.id == id)?;
        changes.apply_to(record);
        record.updated_at = updated_at;
        Some(record)
    }

    /// Remove um registro cuja exclusão já foi confirmada.
    pub fn apply_delete(&mut self, id: Uuid) -> Option<StockRecord> {
        let index = self.records.iter().position(|r| r.id == id)?;
        Some(self.records.remove(index))
    }

    pub fn records(&self) -> &[StockRecord] {
        &self.records
    }

    pub fn get(&self, id: Uuid) -> Option<&StockRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn load_state(&self) -> &LoadState {
        &self.load_state
    }
}
