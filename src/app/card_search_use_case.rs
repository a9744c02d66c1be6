use crate::app::resolve_name_use_case::NameResolver;
use crate::apis::tcg::{RawCard, TcgApi};
use crate::constants::{CARD_PLACEHOLDER_IMAGE, DEFAULT_RARITY};
use crate::error::{CollectorError, Result};
use crate::types::{CardSummary, SetGroups};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Queries the card API for a canonical name and groups the prints by set.
pub struct CardAggregator {
    api: Arc<TcgApi>,
}

impl CardAggregator {
    pub fn new(api: Arc<TcgApi>) -> Self {
        Self { api }
    }

    /// Fails with `NotFound` (naming `resolved_name`) when the API reports zero matches
    /// or returns no cards. A missing `count` alone is not treated as zero.
    #[instrument(skip(self))]
    pub async fn aggregate(&self, resolved_name: &str) -> Result<SetGroups> {
        let response = self.api.search_cards(resolved_name).await?;
        if response.count == Some(0) || response.data.is_empty() {
            return Err(CollectorError::NotFound { query: resolved_name.to_string() });
        }

        let groups = group_cards_by_set(&response.data);
        let skipped = response.data.len() - groups.total_cards();
        crate::metrics::cards::grouped(groups.len(), groups.total_cards(), skipped);
        info!(
            "Grouped {} cards into {} sets ({} without a set skipped)",
            groups.total_cards(),
            groups.len(),
            skipped
        );
        Ok(groups)
    }
}

/// Single pass, stable grouping. Each bucket takes its metadata from the first
/// card seen for that set, cards keep their input order, and buckets iterate in
/// first-seen order. Cards without a usable set reference are dropped.
pub fn group_cards_by_set(cards: &[RawCard]) -> SetGroups {
    let mut groups = SetGroups::new();
    for card in cards {
        let Some(set_info) = card.set_info() else {
            debug!("Skipping card {:?} without a valid set reference", card.id);
            continue;
        };
        groups.push(set_info, summarize(card));
    }
    groups
}

fn summarize(card: &RawCard) -> CardSummary {
    CardSummary {
        name: card.name.clone().unwrap_or_default(),
        image_url: card
            .small_image()
            .unwrap_or(CARD_PLACEHOLDER_IMAGE)
            .to_string(),
        rarity: card
            .rarity
            .clone()
            .filter(|r| !r.is_empty())
            .unwrap_or_else(|| DEFAULT_RARITY.to_string()),
    }
}

/// Result of a successful card search.
#[derive(Debug, Clone)]
pub struct CardSearchOutcome {
    pub query: String,
    pub resolved_name: String,
    pub groups: SetGroups,
}

impl CardSearchOutcome {
    /// "Glumanda (Charmander)"
    pub fn heading(&self) -> String {
        format!("{} ({})", self.query, self.resolved_name)
    }

    pub fn set_count(&self) -> usize {
        self.groups.len()
    }
}

/// The card finder flow: resolve the typed name, then aggregate by set.
pub struct CardSearch {
    resolver: NameResolver,
    aggregator: CardAggregator,
}

impl CardSearch {
    pub fn new(resolver: NameResolver, aggregator: CardAggregator) -> Self {
        Self { resolver, aggregator }
    }

    /// Returns `Ok(None)` for a blank query. A `NotFound` error names the query as
    /// the user typed it, not the resolved name.
    #[instrument(skip(self))]
    pub async fn search(&self, query: &str) -> Result<Option<CardSearchOutcome>> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(None);
        }

        let resolved_name = self.resolver.resolve(query).await;
        match self.aggregator.aggregate(&resolved_name).await {
            Ok(groups) => Ok(Some(CardSearchOutcome {
                query: query.to_string(),
                resolved_name,
                groups,
            })),
            Err(CollectorError::NotFound { .. }) => {
                crate::metrics::cards::not_found();
                Err(CollectorError::NotFound { query: query.to_string() })
            }
            Err(e) => {
                crate::metrics::cards::failed();
                warn!("Card search for '{}' failed: {}", query, e);
                Err(e)
            }
        }
    }
}
