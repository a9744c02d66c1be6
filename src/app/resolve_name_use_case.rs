use crate::apis::pokeapi::{find_localized, PokeApi};
use std::sync::Arc;
use tracing::{debug, instrument};

/// Translates a user-typed creature name into the canonical name the card API expects.
pub struct NameResolver {
    api: Arc<PokeApi>,
    canonical_language: String,
}

impl NameResolver {
    pub fn new(api: Arc<PokeApi>, canonical_language: impl Into<String>) -> Self {
        Self {
            api,
            canonical_language: canonical_language.into(),
        }
    }

    /// Best-effort resolution. Any lookup failure, or a species record without a
    /// canonical-language name, yields `input` exactly as given: it may already be
    /// the canonical name.
    #[instrument(skip(self))]
    pub async fn resolve(&self, input: &str) -> String {
        let slug = slugify(input);
        if slug.is_empty() {
            return input.to_string();
        }

        let species = match self.api.species_by_slug(&slug).await {
            Ok(species) => species,
            Err(e) => {
                debug!("Species lookup for '{}' failed, keeping input: {}", slug, e);
                crate::metrics::resolver::fell_back();
                return input.to_string();
            }
        };

        match find_localized(&species.names, &self.canonical_language) {
            Some(entry) => {
                debug!("Resolved '{}' to '{}'", input, entry.name);
                crate::metrics::resolver::translated();
                entry.name.clone()
            }
            None => {
                debug!("No '{}' name for '{}', keeping input", self.canonical_language, slug);
                crate::metrics::resolver::fell_back();
                input.to_string()
            }
        }
    }
}

/// Lower-cased, trimmed lookup key with each whitespace run collapsed to one hyphen.
pub fn slugify(input: &str) -> String {
    input
        .split_whitespace()
        .map(|part| part.to_lowercase())
        .collect::<Vec<_>>()
        .join("-")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Glumanda"), "glumanda");
        assert_eq!(slugify("  Mr.   Mime "), "mr.-mime");
        assert_eq!(slugify("Tapu Koko"), "tapu-koko");
        assert_eq!(slugify("   "), "");
    }
}
