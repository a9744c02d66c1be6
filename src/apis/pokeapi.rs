use crate::apis::get_json;
use crate::app::ports::HttpClientPort;
use crate::config::ApiConfig;
use crate::error::{CollectorError, Result};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, instrument};

/// `{name, url}` pair used all over PokéAPI, including for language tags.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NamedResource {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PokemonPage {
    #[serde(default)]
    pub results: Vec<NamedResource>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PokemonDetail {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub types: Vec<TypeSlot>,
    #[serde(default)]
    pub stats: Vec<StatSlot>,
    #[serde(default)]
    pub height: u32,
    #[serde(default)]
    pub weight: u32,
    #[serde(default)]
    pub sprites: Sprites,
    #[serde(default)]
    pub species: Option<NamedResource>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TypeSlot {
    #[serde(default)]
    pub slot: u32,
    #[serde(rename = "type")]
    pub kind: NamedResource,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StatSlot {
    pub stat: NamedResource,
    pub base_stat: u32,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Sprites {
    #[serde(default)]
    pub front_default: Option<String>,
    #[serde(default)]
    pub other: Option<OtherSprites>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OtherSprites {
    #[serde(rename = "official-artwork", default)]
    pub official_artwork: Option<ArtworkSprite>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ArtworkSprite {
    #[serde(default)]
    pub front_default: Option<String>,
}

impl Sprites {
    /// Official artwork when present, otherwise the default sprite.
    pub fn best_image(&self) -> Option<&str> {
        self.other
            .as_ref()
            .and_then(|o| o.official_artwork.as_ref())
            .and_then(|a| a.front_default.as_deref())
            .filter(|s| !s.is_empty())
            .or_else(|| self.front_default.as_deref().filter(|s| !s.is_empty()))
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SpeciesRecord {
    #[serde(default)]
    pub names: Vec<LocalizedName>,
    #[serde(default)]
    pub flavor_text_entries: Vec<FlavorTextEntry>,
    #[serde(default)]
    pub genera: Vec<GenusEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LocalizedName {
    #[serde(default)]
    pub language: NamedResource,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FlavorTextEntry {
    #[serde(default)]
    pub language: NamedResource,
    pub flavor_text: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GenusEntry {
    #[serde(default)]
    pub language: NamedResource,
    pub genus: String,
}

/// Entries tagged with a PokéAPI language.
pub trait Localized {
    fn language(&self) -> &str;
}

impl Localized for LocalizedName {
    fn language(&self) -> &str {
        &self.language.name
    }
}

impl Localized for FlavorTextEntry {
    fn language(&self) -> &str {
        &self.language.name
    }
}

impl Localized for GenusEntry {
    fn language(&self) -> &str {
        &self.language.name
    }
}

/// First entry tagged with `language`.
pub fn find_localized<'a, T: Localized>(entries: &'a [T], language: &str) -> Option<&'a T> {
    entries.iter().find(|e| e.language() == language)
}

pub struct PokeApi {
    http: Arc<dyn HttpClientPort>,
    pokemon_url: String,
    species_url: String,
}

impl PokeApi {
    pub fn new(http: Arc<dyn HttpClientPort>, api: &ApiConfig) -> Self {
        Self {
            http,
            pokemon_url: api.pokemon_url.trim_end_matches('/').to_string(),
            species_url: api.species_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn list_url(&self, offset: usize, limit: usize) -> String {
        format!("{}?limit={}&offset={}", self.pokemon_url, limit, offset)
    }

    /// The slug is appended as one percent-encoded path segment.
    pub fn species_url_for(&self, slug: &str) -> Result<String> {
        let mut url = reqwest::Url::parse(&self.species_url)
            .map_err(|e| CollectorError::Config(format!("Invalid species_url '{}': {}", self.species_url, e)))?;
        url.path_segments_mut()
            .map_err(|_| CollectorError::Config(format!("species_url '{}' cannot take a path", self.species_url)))?
            .push(slug);
        Ok(url.to_string())
    }

    #[instrument(skip(self))]
    pub async fn list_page(&self, offset: usize, limit: usize) -> Result<PokemonPage> {
        let page: PokemonPage = get_json(self.http.as_ref(), &self.list_url(offset, limit), &[]).await?;
        debug!("Index page returned {} entries", page.results.len());
        Ok(page)
    }

    pub async fn detail(&self, url: &str) -> Result<PokemonDetail> {
        get_json(self.http.as_ref(), url, &[]).await
    }

    pub async fn species(&self, url: &str) -> Result<SpeciesRecord> {
        get_json(self.http.as_ref(), url, &[]).await
    }

    pub async fn species_by_slug(&self, slug: &str) -> Result<SpeciesRecord> {
        let url = self.species_url_for(slug)?;
        self.species(&url).await
    }
}
