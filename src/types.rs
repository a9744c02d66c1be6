use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One normalized catalog entry, joined from a creature detail record and its species record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatureRecord {
    pub id: u32,
    pub localized_name: String,
    pub canonical_name: String,
    /// Never empty; the first entry is the primary category.
    pub categories: Vec<String>,
    pub stat_entries: Vec<StatEntry>,
    pub size_meters: f64,
    pub mass_kg: f64,
    pub image_url: String,
    pub description_text: String,
    pub classification: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatEntry {
    pub name: String,
    pub value: u32,
}

impl CreatureRecord {
    pub fn primary_category(&self) -> &str {
        self.categories.first().map(String::as_str).unwrap_or_default()
    }

    /// "#004" style number shown on catalog cards.
    pub fn display_number(&self) -> String {
        format!("#{:03}", self.id)
    }

    pub fn has_category(&self, key: &str) -> bool {
        self.categories.iter().any(|c| c == key)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardSummary {
    pub name: String,
    pub image_url: String,
    pub rarity: String,
}

/// Set metadata as embedded in the first card seen for that set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetInfo {
    pub id: String,
    pub name: String,
    pub logo: Option<String>,
    pub symbol: Option<String>,
    pub series: Option<String>,
    pub release_date: Option<String>,
    pub total_cards: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetBucket {
    pub set_info: SetInfo,
    pub cards: Vec<CardSummary>,
}

/// Set id -> bucket mapping that iterates in first-inserted order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SetGroups {
    buckets: Vec<SetBucket>,
    index: HashMap<String, usize>,
}

impl SetGroups {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `card` to the bucket for `set_info.id`, creating the bucket from
    /// `set_info` if this is the first card of that set. Later metadata for an
    /// existing set is ignored.
    pub fn push(&mut self, set_info: SetInfo, card: CardSummary) {
        match self.index.get(&set_info.id) {
            Some(&pos) => self.buckets[pos].cards.push(card),
            None => {
                self.index.insert(set_info.id.clone(), self.buckets.len());
                self.buckets.push(SetBucket { set_info, cards: vec![card] });
            }
        }
    }

    pub fn get(&self, set_id: &str) -> Option<&SetBucket> {
        self.index.get(set_id).map(|&pos| &self.buckets[pos])
    }

    /// Number of distinct sets.
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    pub fn total_cards(&self) -> usize {
        self.buckets.iter().map(|b| b.cards.len()).sum()
    }

    pub fn set_ids(&self) -> impl Iterator<Item = &str> {
        self.buckets.iter().map(|b| b.set_info.id.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &SetBucket> {
        self.buckets.iter()
    }
}

impl Serialize for SetGroups {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(self.buckets.len()))?;
        for bucket in &self.buckets {
            map.serialize_entry(&bucket.set_info.id, bucket)?;
        }
        map.end()
    }
}
