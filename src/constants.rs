//! Endpoint and fallback constants shared by the loaders and the CLI.

// Default API endpoints (overridable via config.toml)
pub const POKEMON_API_URL: &str = "https://pokeapi.co/api/v2/pokemon";
pub const SPECIES_API_URL: &str = "https://pokeapi.co/api/v2/pokemon-species";
pub const TCG_CARDS_API_URL: &str = "https://api.pokemontcg.io/v2/cards";

// Language tags as used by PokéAPI
pub const DISPLAY_LANGUAGE: &str = "de";
pub const CANONICAL_LANGUAGE: &str = "en";

/// Creatures loaded per catalog batch.
pub const CATALOG_PAGE_SIZE: usize = 24;

/// Card API page size. The API maximum; no known creature has more prints.
pub const CARD_PAGE_SIZE: usize = 250;

/// Card API field selection.
pub const CARD_FIELDS: &str = "id,name,set,images,rarity";

/// Newest sets first.
pub const CARD_ORDER_BY: &str = "-set.releaseDate";

// Fallbacks applied at the API boundary
pub const NO_DESCRIPTION: &str = "Keine Beschreibung verfügbar.";
pub const DEFAULT_GENUS: &str = "Pokémon";
pub const DEFAULT_RARITY: &str = "Common";
pub const CARD_PLACEHOLDER_IMAGE: &str = "https://images.pokemontcg.io/placeholder.png";

/// Sprite location used when a detail record carries no image at all.
pub fn fallback_sprite_url(id: u32) -> String {
    format!(
        "https://raw.githubusercontent.com/PokeAPI/sprites/master/sprites/pokemon/{}.png",
        id
    )
}

/// External set page linked from each set card.
pub fn set_details_url(set_id: &str) -> String {
    format!("https://pkmncards.com/set/{}/", set_id)
}

// Environment variables
pub const TCG_API_KEY_ENV: &str = "POKEMONTCG_API_KEY";
pub const CONFIG_PATH_ENV: &str = "POKECOLLECTOR_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";
