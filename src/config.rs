// src/config.rs

use crate::{common::i18n::I18nStore, db::StockRepository, services::stock_service::StockService};
use anyhow::Context;
use sqlx::{postgres::PgPoolOptions, PgPool};
use std::{env, fmt::Display, net::SocketAddr, str::FromStr, time::Duration};

// Configuração lida do ambiente (e do .env, se existir)
#[derive(Debug, Clone)]
pub struct Settings {
    pub database_url: String,
    pub server_addr: SocketAddr,
    pub max_connections: u32,
}

impl Settings {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").context("DATABASE_URL deve ser definida")?;

        Ok(Self {
            database_url,
            server_addr: try_load("SERVER_ADDR", "0.0.0.0:3000")?,
            max_connections: try_load("DATABASE_MAX_CONNECTIONS", "5")?,
        })
    }
}

fn try_load<T: FromStr>(key: &str, default: &str) -> anyhow::Result<T>
where
    T::Err: Display,
{
    let raw = env::var(key).unwrap_or_else(|_| {
        tracing::info!("{key} não definida, usando o padrão: {default}");
        default.to_string()
    });
    raw.parse()
        .map_err(|e| anyhow::anyhow!("Valor inválido para {key} ({raw}): {e}"))
}

#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub stock_service: StockService,
    pub i18n_store: I18nStore,
}

impl AppState {
    pub async fn new(settings: &Settings) -> anyhow::Result<Self> {
        // Conecta ao banco de dados, usando '?' para propagar erros
        let db_pool = PgPoolOptions::new()
            .max_connections(settings.max_connections)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&settings.database_url)
            .await
            .context("Falha ao conectar ao banco de dados")?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        Self::from_pool(db_pool)
    }

    // --- Monta o gráfico de dependências ---
    pub fn from_pool(db_pool: PgPool) -> anyhow::Result<Self> {
        let stock_repo = StockRepository::new();
        let stock_service = StockService::new(stock_repo, db_pool.clone());
        let i18n_store = I18nStore::load()?;

        Ok(Self {
            db_pool,
            stock_service,
            i18n_store,
        })
    }
}
