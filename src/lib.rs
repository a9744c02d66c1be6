pub mod apis;
pub mod config;
pub mod constants;
pub mod error;
pub mod labels;
pub mod logging;
pub mod metrics;
pub mod types;

// Application use cases and the ports they depend on
pub mod app;
// Adapters implementing those ports
pub mod infra;

use crate::apis::pokeapi::PokeApi;
use crate::apis::tcg::TcgApi;
use crate::app::card_search_use_case::{CardAggregator, CardSearch};
use crate::app::catalog_use_case::{Catalog, CatalogLoader};
use crate::app::ports::HttpClientPort;
use crate::app::resolve_name_use_case::NameResolver;
use crate::config::Config;
use std::sync::Arc;

/// Wires the use cases to a shared HTTP port according to `config`.
pub struct Collector {
    pub catalog_loader: CatalogLoader,
    pub card_search: CardSearch,
    pub resolver: NameResolver,
    page_size: usize,
}

impl Collector {
    pub fn new(config: &Config, http: Arc<dyn HttpClientPort>) -> Self {
        let poke = Arc::new(PokeApi::new(http.clone(), &config.api));
        let tcg = Arc::new(TcgApi::new(http, &config.api, &config.cards));
        let canonical = config.languages.canonical.clone();
        Self {
            catalog_loader: CatalogLoader::new(poke.clone(), config.languages.display.clone()),
            card_search: CardSearch::new(
                NameResolver::new(poke.clone(), canonical.clone()),
                CardAggregator::new(tcg),
            ),
            resolver: NameResolver::new(poke, canonical),
            page_size: config.catalog.page_size,
        }
    }

    /// Fresh, empty catalog session using the configured page size.
    pub fn new_catalog(&self) -> Catalog {
        Catalog::new(self.page_size)
    }
}
