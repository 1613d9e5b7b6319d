// src/middleware/i18n.rs

use axum::extract::FromRequestParts;
use axum::http::{header, request::Parts};

pub const DEFAULT_LANG: &str = "en";

// Extrator de idioma: idiomas preferidos do cliente, já reduzidos à
// subtag primária ("pt-BR" -> "pt") e ordenados pela qualidade (q=).
#[derive(Debug, Clone, PartialEq)]
pub struct Locale(pub Vec<String>);

impl Locale {
    pub fn from_header(header_str: &str) -> Self {
        let mut langs: Vec<String> = Vec::new();
        for tag in accept_language::parse(header_str) {
            let primary = tag.split('-').next().unwrap_or(&tag).to_lowercase();
            if !primary.is_empty() && primary != "*" && !langs.contains(&primary) {
                langs.push(primary);
            }
        }
        Self(langs)
    }

    pub fn preferred(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self(vec![DEFAULT_LANG.to_string()])
    }
}

impl<S> FromRequestParts<S> for Locale
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        let locale = parts
            .headers
            .get(header::ACCEPT_LANGUAGE)
            .and_then(|header_value| header_value.to_str().ok())
            .map(Locale::from_header)
            .filter(|locale| !locale.0.is_empty())
            .unwrap_or_default();

        Ok(locale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reduces_tags_to_primary_subtag_by_quality() {
        let locale = Locale::from_header("en;q=0.5, pt-BR, pt;q=0.9");
        assert_eq!(locale.0, vec!["pt".to_string(), "en".to_string()]);
    }

    #[test]
    fn wildcard_is_ignored() {
        let locale = Locale::from_header("*");
        assert!(locale.0.is_empty());
    }
}
