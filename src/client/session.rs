// src/client/session.rs

use std::time::{Duration, Instant};

use chrono::Utc;
use uuid::Uuid;

use crate::{
    client::{
        api::StockApi,
        cache::{LoadState, StockCache},
        error::{ClientError, SubmitError},
        list_view::{search, SortColumn, SortState},
        stock_number::next_stock_number,
        validation::StockDraft,
    },
    models::stock::StockRecord,
};

// Tempo que um aviso fica visível
pub const NOTICE_TTL: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
    raised_at: Instant,
}

impl Notice {
    fn new(kind: NoticeKind, text: impl Into<String>) -> Self {
        Self { kind, text: text.into(), raised_at: Instant::now() }
    }

    pub fn is_expired_at(&self, now: Instant) -> bool {
        now.duration_since(self.raised_at) >= NOTICE_TTL
    }
}

/// Contêiner de estado da tela de estoque: cache, ordenação e aviso atual.
///
/// Toda operação recebe `&mut self`, então só existe uma requisição em andamento
/// por sessão. O cache só muda depois que o servidor confirma a escrita.
pub struct InventorySession<A: StockApi> {
    api: A,
    cache: StockCache,
    sort: SortState,
    notice: Option<Notice>,
}

impl<A: StockApi> InventorySession<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            cache: StockCache::new(),
            sort: SortState::default(),
            notice: None,
        }
    }

    // --- Carga inicial ---
    pub async fn start(&mut self) -> Result<(), ClientError> {
        self.refresh().await
    }

    pub async fn refresh(&mut self) -> Result<(), ClientError> {
        if let Err(e) = self.cache.load(&self.api).await {
            tracing::warn!("falha ao carregar itens: {}", e);
            self.raise(NoticeKind::Error, "Failed to load items");
            return Err(e);
        }
        Ok(())
    }

    // --- Inclusão ---
    pub async fn add_item(&mut self, draft: &StockDraft) -> Result<Uuid, SubmitError> {
        let item = draft.to_new_item().map_err(SubmitError::Invalid)?;

        let id = match self.api.create_item(&item).await {
            Ok(id) => id,
            Err(e) => {
                self.raise(NoticeKind::Error, format!("Error: {}", e.user_message()));
                return Err(e.into());
            }
        };

        // Recarrega a lista para pegar id e timestamp do banco
        if let Err(e) = self.cache.load(&self.api).await {
            tracing::warn!("item {} criado, mas a recarga falhou: {}", id, e);
            self.raise(NoticeKind::Error, "Item added, but failed to reload items");
            return Ok(id);
        }
        self.raise(NoticeKind::Success, "Item added successfully");
        Ok(id)
    }

    // --- Edição ---
    pub async fn update_item(&mut self, id: Uuid, draft: &StockDraft) -> Result<(), SubmitError> {
        let changes = draft.to_changes().map_err(SubmitError::Invalid)?;

        match self.api.update_item(id, &changes).await {
            Ok(server_stamp) => {
                // Reconciliação: usa o horário gravado no banco; o relógio local é só fallback
                let stamp = server_stamp.unwrap_or_else(Utc::now);
                if self.cache.apply_update(id, &changes, stamp).is_none() {
                    // Item fora do cache (lista desatualizada): busca de novo
                    tracing::debug!("item {} atualizado, mas ausente do cache; recarregando", id);
                    if let Err(e) = self.cache.load(&self.api).await {
                        tracing::warn!("recarga após atualizar {} falhou: {}", id, e);
                        self.raise(NoticeKind::Error, "Item updated, but failed to reload items");
                        return Ok(());
                    }
                }
                self.raise(NoticeKind::Success, "Item updated successfully");
                Ok(())
            }
            Err(e) => {
                tracing::warn!("falha ao atualizar {}: {}", id, e);
                self.raise(NoticeKind::Error, "Failed to update item");
                Err(e.into())
            }
        }
    }

    // --- Exclusão ---
    pub async fn delete_item(&mut self, id: Uuid) -> Result<Option<StockRecord>, ClientError> {
        match self.api.delete_item(id).await {
            Ok(()) => {
                let removed = self.cache.apply_delete(id);
                self.raise(NoticeKind::Success, "Item deleted successfully");
                Ok(removed)
            }
            Err(e) => {
                tracing::warn!("falha ao excluir {}: {}", id, e);
                self.raise(NoticeKind::Error, "Failed to delete item");
                Err(e)
            }
        }
    }

    pub fn search(&self, term: &str) -> Option<&StockRecord> {
        search(self.cache.records(), term)
    }

    pub fn next_stock_number(&self) -> String {
        next_stock_number(self.cache.records())
    }

    pub fn toggle_sort(&mut self, column: SortColumn) {
        self.sort.toggle(column);
    }

    pub fn set_sort(&mut self, sort: SortState) {
        self.sort = sort;
    }

    pub fn sort(&self) -> SortState {
        self.sort
    }

    /// Lista na ordem atual da tabela.
    pub fn view(&self) -> Vec<&StockRecord> {
        self.sort.apply(self.cache.records())
    }

    pub fn cache(&self) -> &StockCache {
        &self.cache
    }

    pub fn load_state(&self) -> &LoadState {
        self.cache.load_state()
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice_at(Instant::now())
    }

    pub fn notice_at(&self, now: Instant) -> Option<&Notice> {
        self.notice.as_ref().filter(|n| !n.is_expired_at(now))
    }

    fn raise(&mut self, kind: NoticeKind, text: impl Into<String>) {
        self.notice = Some(Notice::new(kind, text));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::stock::{NewStockItem, StockItemChanges};
    use async_trait::async_trait;
    use chrono::{DateTime, TimeZone};
    use rust_decimal::Decimal;
    use std::sync::Mutex;

    // API em memória; as flags `fail_*` simulam um 500 do servidor
    #[derive(Default)]
    struct FakeApi {
        rows: Mutex<Vec<StockRecord>>,
        fail_writes: Mutex<bool>,
        fail_reads: Mutex<bool>,
        stamp: Option<DateTime<Utc>>,
    }

    impl FakeApi {
        fn with_rows(rows: Vec<StockRecord>) -> Self {
            Self { rows: Mutex::new(rows), ..Default::default() }
        }

        fn server_error() -> ClientError {
            ClientError::Api { status: 500, message: "An unexpected error occurred.".into() }
        }

        fn check_writes(&self) -> Result<(), ClientError> {
            if *self.fail_writes.lock().unwrap() { Err(Self::server_error()) } else { Ok(()) }
        }
    }

    #[async_trait]
    impl StockApi for FakeApi {
        async fn fetch_items(&self) -> Result<Vec<StockRecord>, ClientError> {
            if *self.fail_reads.lock().unwrap() {
                return Err(Self::server_error());
            }
            Ok(self.rows.lock().unwrap().clone())
        }

        async fn create_item(&self, item: &NewStockItem) -> Result<Uuid, ClientError> {
            self.check_writes()?;
            let record = StockRecord {
                id: Uuid::new_v4(),
                stock_number: item.stock_number.clone(),
                product_name: item.product_name.clone(),
                quantity: item.quantity,
                price: item.price,
                updated_at: self.stamp.unwrap_or_else(Utc::now),
            };
            let id = record.id;
            self.rows.lock().unwrap().insert(0, record);
            Ok(id)
        }

        async fn update_item(
            &self,
            id: Uuid,
            changes: &StockItemChanges,
        ) -> Result<Option<DateTime<Utc>>, ClientError> {
            self.check_writes()?;
            let mut rows = self.rows.lock().unwrap();
            if let Some(row) = rows.iter_mut().find(|r| r.id == id) {
                changes.apply_to(row);
            }
            Ok(self.stamp)
        }

        async fn delete_item(&self, id: Uuid) -> Result<(), ClientError> {
            self.check_writes()?;
            self.rows.lock().unwrap().retain(|r| r.id != id);
            Ok(())
        }
    }

    fn record(stock_number: &str, name: &str, quantity: i32) -> StockRecord {
        StockRecord {
            id: Uuid::new_v4(),
            stock_number: stock_number.into(),
            product_name: name.into(),
            quantity,
            price: Decimal::new(199, 2),
            updated_at: Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    fn widget_draft() -> StockDraft {
        StockDraft {
            stock_number: "STK010".into(),
            product_name: "Widget".into(),
            quantity: Some(5.0),
            price: Some(2.5),
        }
    }

    #[tokio::test]
    async fn start_loads_the_cache() {
        let mut session = InventorySession::new(FakeApi::with_rows(vec![record("STK001", "Bolt", 3)]));
        session.start().await.unwrap();

        assert_eq!(session.load_state(), &LoadState::Ready);
        assert_eq!(session.view().len(), 1);
        assert_eq!(session.next_stock_number(), "STK002");
    }

    #[tokio::test]
    async fn failed_start_is_reported() {
        let api = FakeApi::default();
        *api.fail_reads.lock().unwrap() = true;
        let mut session = InventorySession::new(api);

        assert!(session.start().await.is_err());
        assert!(matches!(session.load_state(), LoadState::Failed(_)));
        let notice = session.notice().unwrap();
        assert_eq!(notice.kind, NoticeKind::Error);
        assert_eq!(notice.text, "Failed to load items");
    }

    #[tokio::test]
    async fn add_reloads_with_store_values() {
        let mut session = InventorySession::new(FakeApi::default());
        session.start().await.unwrap();

        let id = session.add_item(&widget_draft()).await.unwrap();

        let added = session.cache().get(id).unwrap();
        assert_eq!(added.stock_number, "STK010");
        assert_eq!(added.product_name, "Widget");
        assert_eq!(added.quantity, 5);
        assert_eq!(added.price, Decimal::new(250, 2));
        assert_eq!(session.notice().unwrap().text, "Item added successfully");
    }

    #[tokio::test]
    async fn invalid_draft_never_reaches_the_api() {
        let mut session = InventorySession::new(FakeApi::default());
        let draft = StockDraft { quantity: Some(-1.0), ..widget_draft() };

        match session.add_item(&draft).await {
            Err(SubmitError::Invalid(result)) => {
                assert_eq!(result.error("quantity"), Some("Quantity must be 0 or greater"));
            }
            other => panic!("esperava erro de validação, veio {other:?}"),
        }
        assert!(session.api.rows.lock().unwrap().is_empty());
        assert!(session.notice().is_none());
    }

    #[tokio::test]
    async fn add_failure_keeps_cache_and_shows_error() {
        let mut session = InventorySession::new(FakeApi::with_rows(vec![record("STK001", "Bolt", 3)]));
        session.start().await.unwrap();
        *session.api.fail_writes.lock().unwrap() = true;

        assert!(session.add_item(&widget_draft()).await.is_err());
        assert_eq!(session.cache().len(), 1);
        assert_eq!(
            session.notice().unwrap().text,
            "Error: An unexpected error occurred."
        );
    }

    #[tokio::test]
    async fn add_with_failed_reload_reports_error() {
        let mut session = InventorySession::new(FakeApi::with_rows(vec![record("STK001", "Bolt", 3)]));
        session.start().await.unwrap();
        *session.api.fail_reads.lock().unwrap() = true;

        let id = session.add_item(&widget_draft()).await.unwrap();

        assert!(session.cache().get(id).is_none());
        assert_eq!(session.cache().len(), 1);
        assert_eq!(session.load_state(), &LoadState::Ready);
        let notice = session.notice().unwrap();
        assert_eq!(notice.kind, NoticeKind::Error);
        assert_eq!(notice.text, "Item added, but failed to reload items");
    }

    #[tokio::test]
    async fn update_of_uncached_item_reloads_the_list() {
        let mut session = InventorySession::new(FakeApi::default());
        session.start().await.unwrap();

        // Outro cliente cadastrou o item depois da carga inicial
        let remote = record("STK004", "Washer", 1);
        let id = remote.id;
        session.api.rows.lock().unwrap().push(remote.clone());

        let draft = StockDraft { quantity: Some(8.0), ..StockDraft::from_record(&remote) };
        session.update_item(id, &draft).await.unwrap();

        let reloaded = session.cache().get(id).unwrap();
        assert_eq!(reloaded.quantity, 8);
        assert_eq!(session.notice().unwrap().text, "Item updated successfully");
    }

    #[tokio::test]
    async fn update_uses_the_server_timestamp() {
        let existing = record("STK001", "Bolt", 3);
        let id = existing.id;
        let stamp = Utc.with_ymd_and_hms(2026, 10, 14, 8, 0, 0).unwrap();
        let api = FakeApi { stamp: Some(stamp), ..FakeApi::with_rows(vec![existing]) };
        let mut session = InventorySession::new(api);
        session.start().await.unwrap();

        let mut draft = StockDraft::from_record(session.search("bolt").unwrap());
        draft.quantity = Some(7.0);
        session.update_item(id, &draft).await.unwrap();

        let updated = session.cache().get(id).unwrap();
        assert_eq!(updated.quantity, 7);
        assert_eq!(updated.updated_at, stamp);
        assert_eq!(session.notice().unwrap().text, "Item updated successfully");
    }

    #[tokio::test]
    async fn failed_update_leaves_cache_untouched() {
        let existing = record("STK001", "Bolt", 3);
        let id = existing.id;
        let mut session = InventorySession::new(FakeApi::with_rows(vec![existing.clone()]));
        session.start().await.unwrap();
        *session.api.fail_writes.lock().unwrap() = true;

        let draft = StockDraft { quantity: Some(99.0), ..StockDraft::from_record(&existing) };
        assert!(session.update_item(id, &draft).await.is_err());

        assert_eq!(session.cache().get(id), Some(&existing));
        assert_eq!(session.notice().unwrap().kind, NoticeKind::Error);
    }

    #[tokio::test]
    async fn delete_removes_after_confirmation() {
        let keep = record("STK001", "Bolt", 3);
        let gone = record("STK002", "Nut", 0);
        let gone_id = gone.id;
        let mut session = InventorySession::new(FakeApi::with_rows(vec![keep, gone]));
        session.start().await.unwrap();

        let removed = session.delete_item(gone_id).await.unwrap();
        assert_eq!(removed.map(|r| r.stock_number), Some("STK002".to_string()));
        assert_eq!(session.cache().len(), 1);
        assert_eq!(session.notice().unwrap().text, "Item deleted successfully");
    }

    #[tokio::test]
    async fn failed_delete_keeps_the_record() {
        let existing = record("STK001", "Bolt", 3);
        let id = existing.id;
        let mut session = InventorySession::new(FakeApi::with_rows(vec![existing]));
        session.start().await.unwrap();
        *session.api.fail_writes.lock().unwrap() = true;

        assert!(session.delete_item(id).await.is_err());
        assert!(session.cache().get(id).is_some());
        assert_eq!(session.notice().unwrap().text, "Failed to delete item");
    }

    #[tokio::test]
    async fn notices_expire() {
        let api = FakeApi::default();
        *api.fail_reads.lock().unwrap() = true;
        let mut session = InventorySession::new(api);
        let _ = session.start().await;

        let later = Instant::now() + NOTICE_TTL + Duration::from_millis(10);
        assert!(session.notice_at(later).is_none());
    }

    #[tokio::test]
    async fn view_follows_sort_toggles() {
        let rows = vec![record("STK001", "Bolt", 30), record("STK002", "Nut", 2)];
        let mut session = InventorySession::new(FakeApi::with_rows(rows));
        session.start().await.unwrap();

        session.toggle_sort(SortColumn::Quantity);
        assert_eq!(session.view()[0].stock_number, "STK002");
        session.toggle_sort(SortColumn::Quantity);
        assert_eq!(session.view()[0].stock_number, "STK001");
    }
}
