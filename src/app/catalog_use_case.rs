use crate::apis::pokeapi::{find_localized, NamedResource, PokeApi, PokemonDetail, SpeciesRecord};
use crate::constants::{fallback_sprite_url, DEFAULT_GENUS, NO_DESCRIPTION};
use crate::error::{CollectorError, Result};
use crate::types::{CreatureRecord, StatEntry};
use futures::future::try_join_all;
use once_cell::sync::Lazy;
use regex::Regex;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, instrument, warn};

/// Shown once when a batch fails; the caller may simply try again.
pub const CATALOG_LOAD_FAILED_MESSAGE: &str =
    "Failed to load Pokémon. Please check your internet connection and try again.";

static LINE_BREAKS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\n\r\x0C]").expect("valid regex"));

/// Loads and normalizes one page of the creature index at a time.
pub struct CatalogLoader {
    api: Arc<PokeApi>,
    display_language: String,
}

impl CatalogLoader {
    pub fn new(api: Arc<PokeApi>, display_language: impl Into<String>) -> Self {
        Self {
            api,
            display_language: display_language.into(),
        }
    }

    /// Loads `limit` creatures starting at `offset`. Per-item requests run
    /// concurrently; records come back in index order. A failure for any item
    /// fails the whole batch.
    #[instrument(skip(self))]
    pub async fn load_batch(&self, offset: usize, limit: usize) -> Result<Vec<CreatureRecord>> {
        let started = Instant::now();
        let result = self.fetch_batch(offset, limit).await;
        match &result {
            Ok(records) => {
                crate::metrics::catalog::batch_loaded(records.len(), started.elapsed().as_secs_f64());
                info!("Loaded {} creatures at offset {}", records.len(), offset);
            }
            Err(e) => {
                crate::metrics::catalog::batch_failed();
                warn!("Catalog batch at offset {} failed: {}", offset, e);
            }
        }
        result
    }

    async fn fetch_batch(&self, offset: usize, limit: usize) -> Result<Vec<CreatureRecord>> {
        let page = self.api.list_page(offset, limit).await?;
        try_join_all(page.results.iter().map(|item| self.load_item(item))).await
    }

    async fn load_item(&self, item: &NamedResource) -> Result<CreatureRecord> {
        debug!("Fetching detail for {}", item.name);
        let detail = self.api.detail(&item.url).await?;
        let species_url = detail
            .species
            .as_ref()
            .map(|s| s.url.as_str())
            .filter(|url| !url.is_empty())
            .ok_or_else(|| CollectorError::MissingField(format!("species.url for {}", detail.name)))?;
        let species = self.api.species(species_url).await?;
        normalize_creature(&detail, &species, &self.display_language)
    }
}

/// Joins a detail record and its species record into a display record,
/// applying the display-language fallbacks.
pub fn normalize_creature(
    detail: &PokemonDetail,
    species: &SpeciesRecord,
    language: &str,
) -> Result<CreatureRecord> {
    let mut types = detail.types.clone();
    types.sort_by_key(|t| t.slot);
    let categories: Vec<String> = types
        .into_iter()
        .map(|t| t.kind.name)
        .filter(|name| !name.is_empty())
        .collect();
    if categories.is_empty() {
        return Err(CollectorError::MissingField(format!("types for {}", detail.name)));
    }

    let localized_name = find_localized(&species.names, language)
        .map(|n| n.name.clone())
        .unwrap_or_else(|| detail.name.clone());

    let description_text = find_localized(&species.flavor_text_entries, language)
        .map(|e| clean_flavor_text(&e.flavor_text))
        .unwrap_or_else(|| NO_DESCRIPTION.to_string());

    let classification = find_localized(&species.genera, language)
        .map(|g| g.genus.clone())
        .filter(|g| !g.is_empty())
        .unwrap_or_else(|| DEFAULT_GENUS.to_string());

    let image_url = detail
        .sprites
        .best_image()
        .map(str::to_string)
        .unwrap_or_else(|| fallback_sprite_url(detail.id));

    Ok(CreatureRecord {
        id: detail.id,
        localized_name,
        canonical_name: detail.name.clone(),
        categories,
        stat_entries: detail
            .stats
            .iter()
            .map(|s| StatEntry { name: s.stat.name.clone(), value: s.base_stat })
            .collect(),
        // Source units are decimetres and hectograms.
        size_meters: detail.height as f64 / 10.0,
        mass_kg: detail.weight as f64 / 10.0,
        image_url,
        description_text,
        classification,
    })
}

/// Replaces each line or page break with a single space.
pub fn clean_flavor_text(text: &str) -> String {
    LINE_BREAKS.replace_all(text, " ").into_owned()
}

/// Session state for the catalog: the loaded records plus the paging cursor.
#[derive(Debug, Default)]
pub struct Catalog {
    records: Vec<CreatureRecord>,
    next_offset: usize,
    page_size: usize,
}

impl Catalog {
    pub fn new(page_size: usize) -> Self {
        Self {
            records: Vec::new(),
            next_offset: 0,
            page_size,
        }
    }

    /// Loads the next page and appends it. On failure nothing is appended and
    /// the cursor stays put, so the call can simply be repeated.
    pub async fn load_next(&mut self, loader: &CatalogLoader) -> Result<&[CreatureRecord]> {
        let batch = loader.load_batch(self.next_offset, self.page_size).await?;
        let start = self.records.len();
        self.records.extend(batch);
        self.next_offset += self.page_size;
        Ok(&self.records[start..])
    }

    pub fn records(&self) -> &[CreatureRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn next_offset(&self) -> usize {
        self.next_offset
    }

    /// Case-insensitive substring match on either name, or exact match on the id.
    pub fn search(&self, term: &str) -> Vec<&CreatureRecord> {
        let term = term.trim().to_lowercase();
        self.records
            .iter()
            .filter(|r| {
                term.is_empty()
                    || r.localized_name.to_lowercase().contains(&term)
                    || r.canonical_name.to_lowercase().contains(&term)
                    || r.id.to_string() == term
            })
            .collect()
    }

    pub fn filter_by_category(&self, category: Option<&str>) -> Vec<&CreatureRecord> {
        match category {
            None => self.records.iter().collect(),
            Some(key) => self.records.iter().filter(|r| r.has_category(key)).collect(),
        }
    }
}
