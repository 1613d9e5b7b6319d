pub mod stock_service;
pub use stock_service::StockService;
