// src/common/i18n.rs

use std::{collections::HashMap, sync::Arc};

use anyhow::Context;

use crate::middleware::i18n::{Locale, DEFAULT_LANG};

// Catálogos embutidos no binário: idioma -> (chave -> mensagem)
const CATALOGS: &[(&str, &str)] = &[
    ("en", include_str!("../../locales/en.json")),
    ("pt", include_str!("../../locales/pt.json")),
];

#[derive(Debug, Clone)]
pub struct I18nStore {
    catalogs: Arc<HashMap<String, HashMap<String, String>>>,
}

impl I18nStore {
    pub fn load() -> anyhow::Result<Self> {
        let mut catalogs = HashMap::new();
        for (lang, raw) in CATALOGS {
            let messages: HashMap<String, String> = serde_json::from_str(raw)
                .with_context(|| format!("catálogo de mensagens inválido: {lang}"))?;
            catalogs.insert(lang.to_string(), messages);
        }
        tracing::debug!("🌍 {} catálogos de idioma carregados", catalogs.len());
        Ok(Self { catalogs: Arc::new(catalogs) })
    }

    pub fn supports(&self, lang: &str) -> bool {
        self.catalogs.contains_key(lang)
    }

    /// Primeiro idioma do cliente que temos catálogo; senão o padrão.
    pub fn resolve<'a>(&self, locale: &'a Locale) -> &'a str {
        locale
            .preferred()
            .find(|lang| self.supports(lang))
            .unwrap_or(DEFAULT_LANG)
    }

    /// Busca a chave no idioma do cliente, com fallback para o idioma padrão.
    pub fn lookup(&self, locale: &Locale, key: &str) -> Option<&str> {
        let lang = self.resolve(locale);
        self.catalogs
            .get(lang)
            .and_then(|messages| messages.get(key))
            .or_else(|| self.catalogs.get(DEFAULT_LANG).and_then(|m| m.get(key)))
            .map(String::as_str)
    }

    pub fn translate(&self, locale: &Locale, key: &str) -> String {
        self.lookup(locale, key)
            .map(str::to_string)
            .unwrap_or_else(|| key.to_string())
    }
}
