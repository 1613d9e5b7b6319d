// src/client.rs

// Lado do cliente: estado da lista, validação do formulário e acesso à API.

pub mod api;
pub mod cache;
pub mod error;
pub mod list_view;
pub mod session;
pub mod stock_number;
pub mod validation;

pub use api::{HttpStockApi, StockApi};
pub use cache::{LoadState, StockCache};
pub use error::{ClientError, SubmitError};
pub use session::{InventorySession, Notice, NoticeKind};
