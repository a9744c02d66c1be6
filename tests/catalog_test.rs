mod common;

use anyhow::Result;
use common::{test_config, StubHttp, POKEMON_URL, SPECIES_URL};
use pokecollector::constants::{DEFAULT_GENUS, NO_DESCRIPTION};
use pokecollector::error::ErrorKind;
use pokecollector::Collector;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;

const ROSTER: [(u32, &str, &str, &str); 6] = [
    (1, "bulbasaur", "Bisasam", "grass"),
    (4, "charmander", "Glumanda", "fire"),
    (7, "squirtle", "Schiggy", "water"),
    (25, "pikachu", "Pikachu", "electric"),
    (133, "eevee", "Evoli", "normal"),
    (143, "snorlax", "Relaxo", "normal"),
];

fn detail_url(id: u32) -> String {
    format!("{}/{}/", POKEMON_URL, id)
}

fn species_url(id: u32) -> String {
    format!("{}/{}/", SPECIES_URL, id)
}

fn list_url(offset: usize, limit: usize) -> String {
    format!("{}?limit={}&offset={}", POKEMON_URL, limit, offset)
}

fn page(entries: &[(u32, &str, &str, &str)]) -> Value {
    json!({
        "count": 1025,
        "results": entries
            .iter()
            .map(|(id, name, _, _)| json!({ "name": name, "url": detail_url(*id) }))
            .collect::<Vec<_>>()
    })
}

fn detail(id: u32, name: &str, category: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "types": [{ "slot": 1, "type": { "name": category } }],
        "stats": [{ "stat": { "name": "hp" }, "base_stat": 45 }],
        "height": 7,
        "weight": 69,
        "sprites": {
            "front_default": format!("https://img/{}.png", id),
            "other": { "official-artwork": { "front_default": format!("https://img/art/{}.png", id) } }
        },
        "species": { "name": name, "url": species_url(id) }
    })
}

fn species(localized: &str) -> Value {
    json!({
        "names": [{ "language": { "name": "de" }, "name": localized }],
        "flavor_text_entries": [{ "language": { "name": "de" }, "flavor_text": "Eine\nBeschreibung." }],
        "genera": [{ "language": { "name": "de" }, "genus": "Test-Pokémon" }]
    })
}

/// Stub serving the whole roster; `slow` items answer their detail request late.
fn roster_http(slow: &[u32]) -> StubHttp {
    let mut http = StubHttp::new()
        .json(&list_url(0, 3), page(&ROSTER[..3]))
        .json(&list_url(3, 3), page(&ROSTER[3..]));
    for (id, name, localized, category) in ROSTER {
        let delay = if slow.contains(&id) { 60 } else { 0 };
        http = http
            .delayed_json(&detail_url(id), detail(id, name, category), delay)
            .json(&species_url(id), species(localized));
    }
    http
}

#[tokio::test]
async fn test_batch_keeps_index_order() -> Result<()> {
    let collector = Collector::new(&test_config(), Arc::new(roster_http(&[1, 4])));

    let records = collector.catalog_loader.load_batch(0, 3).await?;
    let names: Vec<&str> = records.iter().map(|r| r.localized_name.as_str()).collect();
    assert_eq!(names, vec!["Bisasam", "Glumanda", "Schiggy"]);

    let first = &records[0];
    assert_eq!(first.canonical_name, "bulbasaur");
    assert_eq!(first.description_text, "Eine Beschreibung.");
    assert_eq!(first.classification, "Test-Pokémon");
    assert_eq!(first.image_url, "https://img/art/1.png");
    assert!((first.size_meters - 0.7).abs() < 1e-9);
    assert!((first.mass_kg - 6.9).abs() < 1e-9);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_batch_items_load_concurrently() -> Result<()> {
    let mut http = StubHttp::new().json(&list_url(0, 3), page(&ROSTER[..3]));
    for (id, name, localized, category) in &ROSTER[..3] {
        http = http
            .delayed_json(&detail_url(*id), detail(*id, name, category), 100)
            .json(&species_url(*id), species(localized));
    }
    let collector = Collector::new(&test_config(), Arc::new(http));

    let started = tokio::time::Instant::now();
    let records = collector.catalog_loader.load_batch(0, 3).await?;
    let elapsed = started.elapsed();

    assert_eq!(records.len(), 3);
    // Three 100ms detail requests in sequence would take 300ms.
    assert!(elapsed >= Duration::from_millis(100), "elapsed {:?}", elapsed);
    assert!(elapsed < Duration::from_millis(200), "elapsed {:?}", elapsed);
    Ok(())
}

#[tokio::test]
async fn test_catalog_appends_pages_in_order() -> Result<()> {
    let collector = Collector::new(&test_config(), Arc::new(roster_http(&[25])));
    let mut catalog = collector.new_catalog();

    let appended = catalog.load_next(&collector.catalog_loader).await?.len();
    assert_eq!(appended, 3);
    assert_eq!(catalog.next_offset(), 3);

    let appended: Vec<u32> = catalog
        .load_next(&collector.catalog_loader)
        .await?
        .iter()
        .map(|r| r.id)
        .collect();
    assert_eq!(appended, vec![25, 133, 143]);
    assert_eq!(catalog.next_offset(), 6);

    let ids: Vec<u32> = catalog.records().iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![1, 4, 7, 25, 133, 143]);

    let normal: Vec<u32> = catalog.filter_by_category(Some("normal")).iter().map(|r| r.id).collect();
    assert_eq!(normal, vec![133, 143]);
    let found: Vec<u32> = catalog.search("glu").iter().map(|r| r.id).collect();
    assert_eq!(found, vec![4]);
    Ok(())
}

#[tokio::test]
async fn test_one_failed_item_fails_the_batch() {
    let http = StubHttp::new()
        .json(&list_url(0, 3), page(&ROSTER[..3]))
        .json(&detail_url(1), detail(1, "bulbasaur", "grass"))
        .json(&species_url(1), species("Bisasam"))
        .json(&detail_url(4), detail(4, "charmander", "fire"))
        .status(&species_url(4), 500)
        .json(&detail_url(7), detail(7, "squirtle", "water"))
        .json(&species_url(7), species("Schiggy"));
    let collector = Collector::new(&test_config(), Arc::new(http));
    let mut catalog = collector.new_catalog();

    let err = catalog.load_next(&collector.catalog_loader).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::TransportFailure);
    assert!(catalog.is_empty());
    assert_eq!(catalog.next_offset(), 0);
}

#[tokio::test]
async fn test_unreachable_index_fails_the_batch() {
    let collector = Collector::new(&test_config(), Arc::new(StubHttp::new()));
    let mut catalog = collector.new_catalog();

    let err = catalog.load_next(&collector.catalog_loader).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::TransportFailure);
    assert!(catalog.is_empty());
}

#[tokio::test]
async fn test_malformed_detail_is_parse_failure() {
    let http = StubHttp::new()
        .json(&list_url(0, 3), page(&ROSTER[..1]))
        .json(&detail_url(1), json!({ "name": "bulbasaur" }));
    let collector = Collector::new(&test_config(), Arc::new(http));

    let err = collector.catalog_loader.load_batch(0, 3).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ParseFailure);
}

#[tokio::test]
async fn test_missing_translations_use_fallbacks() -> Result<()> {
    let http = StubHttp::new()
        .json(&list_url(0, 3), page(&ROSTER[..1]))
        .json(&detail_url(1), detail(1, "bulbasaur", "grass"))
        .json(
            &species_url(1),
            json!({
                "names": [{ "language": { "name": "en" }, "name": "Bulbasaur" }],
                "flavor_text_entries": [{ "language": { "name": "en" }, "flavor_text": "A strange seed." }]
            }),
        );
    let collector = Collector::new(&test_config(), Arc::new(http));

    let records = collector.catalog_loader.load_batch(0, 3).await?;
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].localized_name, "bulbasaur");
    assert_eq!(records[0].description_text, NO_DESCRIPTION);
    assert_eq!(records[0].classification, DEFAULT_GENUS);
    Ok(())
}
