use crate::apis::get_json;
use crate::app::ports::HttpClientPort;
use crate::config::{ApiConfig, CardsConfig};
use crate::constants::{CARD_FIELDS, CARD_ORDER_BY};
use crate::error::{CollectorError, Result};
use crate::types::SetInfo;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, instrument};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CardSearchResponse {
    /// Total matches reported by the API; absent on some responses.
    #[serde(default)]
    pub count: Option<u32>,
    #[serde(default)]
    pub data: Vec<RawCard>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawCard {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    /// Kept untyped so one malformed set reference drops that card instead of the response.
    #[serde(default)]
    pub set: Option<Value>,
    #[serde(default)]
    pub images: Option<CardImages>,
    #[serde(default)]
    pub rarity: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CardImages {
    #[serde(default)]
    pub small: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSet {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    series: Option<String>,
    #[serde(default)]
    release_date: Option<String>,
    #[serde(default)]
    total: Option<u32>,
    #[serde(default)]
    logo: Option<String>,
    #[serde(default)]
    symbol: Option<String>,
    #[serde(default)]
    images: Option<SetImages>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct SetImages {
    #[serde(default)]
    logo: Option<String>,
    #[serde(default)]
    symbol: Option<String>,
}

impl RawCard {
    /// The card's set metadata, or `None` when the reference is missing,
    /// malformed, or has an empty id.
    pub fn set_info(&self) -> Option<SetInfo> {
        let raw: RawSet = serde_json::from_value(self.set.clone()?).ok()?;
        let id = raw.id.filter(|id| !id.trim().is_empty())?;
        let images = raw.images.unwrap_or_default();
        Some(SetInfo {
            name: raw.name.unwrap_or_else(|| id.clone()),
            id,
            logo: raw.logo.or(images.logo),
            symbol: raw.symbol.or(images.symbol),
            series: raw.series,
            release_date: raw.release_date,
            total_cards: raw.total,
        })
    }

    pub fn small_image(&self) -> Option<&str> {
        self.images
            .as_ref()
            .and_then(|i| i.small.as_deref())
            .filter(|s| !s.is_empty())
    }
}

pub struct TcgApi {
    http: Arc<dyn HttpClientPort>,
    cards_url: String,
    page_size: usize,
    api_key: Option<String>,
}

impl TcgApi {
    pub fn new(http: Arc<dyn HttpClientPort>, api: &ApiConfig, cards: &CardsConfig) -> Self {
        Self {
            http,
            cards_url: api.cards_url.clone(),
            page_size: cards.page_size,
            api_key: api.tcg_api_key.clone(),
        }
    }

    /// Prefix search on card name, newest sets first.
    pub fn search_url(&self, name: &str) -> Result<String> {
        let query = format!("name:\"{}*\"", name.replace('"', ""));
        let page_size = self.page_size.to_string();
        let url = reqwest::Url::parse_with_params(
            &self.cards_url,
            &[
                ("q", query.as_str()),
                ("orderBy", CARD_ORDER_BY),
                ("pageSize", page_size.as_str()),
                ("select", CARD_FIELDS),
            ],
        )
        .map_err(|e| CollectorError::Config(format!("Invalid cards_url '{}': {}", self.cards_url, e)))?;
        Ok(url.to_string())
    }

    #[instrument(skip(self))]
    pub async fn search_cards(&self, name: &str) -> Result<CardSearchResponse> {
        let url = self.search_url(name)?;
        let headers: Vec<(&str, &str)> = match self.api_key.as_deref() {
            Some(key) => vec![("X-Api-Key", key)],
            None => Vec::new(),
        };
        let response: CardSearchResponse = get_json(self.http.as_ref(), &url, &headers).await?;
        debug!("Card API reported {:?} matches, {} returned", response.count, response.data.len());
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn card(value: Value) -> RawCard {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_set_info_reads_nested_images() {
        let raw = card(json!({
            "name": "Charmander",
            "set": {
                "id": "sv3pt5",
                "name": "151",
                "series": "Scarlet & Violet",
                "releaseDate": "2023/09/22",
                "total": 207,
                "images": { "logo": "https://img/logo.png", "symbol": "https://img/symbol.png" }
            }
        }));
        let info = raw.set_info().unwrap();
        assert_eq!(info.id, "sv3pt5");
        assert_eq!(info.logo.as_deref(), Some("https://img/logo.png"));
        assert_eq!(info.symbol.as_deref(), Some("https://img/symbol.png"));
        assert_eq!(info.release_date.as_deref(), Some("2023/09/22"));
        assert_eq!(info.total_cards, Some(207));
    }

    #[test]
    fn test_set_info_rejects_bad_references() {
        assert!(card(json!({ "name": "A" })).set_info().is_none());
        assert!(card(json!({ "name": "A", "set": null })).set_info().is_none());
        assert!(card(json!({ "name": "A", "set": "base1" })).set_info().is_none());
        assert!(card(json!({ "name": "A", "set": { "name": "Base" } })).set_info().is_none());
        assert!(card(json!({ "name": "A", "set": { "id": "  " } })).set_info().is_none());
    }

    #[test]
    fn test_search_url_encodes_query() {
        let api = TcgApi::new(
            Arc::new(NoHttp),
            &ApiConfig::default(),
            &CardsConfig::default(),
        );
        let url = api.search_url("Mr. Mime").unwrap();
        assert!(url.starts_with("https://api.pokemontcg.io/v2/cards?q="));
        assert!(url.contains("orderBy=-set.releaseDate"));
        assert!(url.contains("pageSize=250"));
        assert!(!url.contains(' '));
    }

    struct NoHttp;

    #[async_trait::async_trait]
    impl HttpClientPort for NoHttp {
        async fn get(
            &self,
            _url: &str,
            _headers: &[(&str, &str)],
        ) -> std::result::Result<crate::app::ports::HttpGetResult, String> {
            Err("offline".to_string())
        }
    }
}
