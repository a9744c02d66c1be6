#![allow(dead_code)]

use async_trait::async_trait;
use pokecollector::app::ports::{HttpClientPort, HttpGetResult};
use pokecollector::config::Config;
use serde_json::Value;
use std::sync::Mutex;
use std::time::Duration;

pub const POKEMON_URL: &str = "https://pokeapi.test/api/v2/pokemon";
pub const SPECIES_URL: &str = "https://pokeapi.test/api/v2/pokemon-species";
pub const CARDS_URL: &str = "https://tcg.test/v2/cards";

enum Reply {
    Json { status: u16, body: Value, delay_ms: u64 },
    Fail(String),
}

/// Canned HTTP responses keyed by URL prefix; the longest matching prefix wins.
/// Unmatched URLs fail like a refused connection.
#[derive(Default)]
pub struct StubHttp {
    routes: Vec<(String, Reply)>,
    pub requests: Mutex<Vec<(String, Vec<(String, String)>)>>,
}

impl StubHttp {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn json(self, url: &str, body: Value) -> Self {
        self.reply(url, 200, body, 0)
    }

    pub fn delayed_json(self, url: &str, body: Value, delay_ms: u64) -> Self {
        self.reply(url, 200, body, delay_ms)
    }

    pub fn status(self, url: &str, status: u16) -> Self {
        self.reply(url, status, Value::Null, 0)
    }

    pub fn fail(mut self, url: &str, message: &str) -> Self {
        self.routes.push((url.to_string(), Reply::Fail(message.to_string())));
        self
    }

    fn reply(mut self, url: &str, status: u16, body: Value, delay_ms: u64) -> Self {
        self.routes.push((url.to_string(), Reply::Json { status, body, delay_ms }));
        self
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn requested_urls(&self) -> Vec<String> {
        self.requests.lock().unwrap().iter().map(|(u, _)| u.clone()).collect()
    }
}

#[async_trait]
impl HttpClientPort for StubHttp {
    async fn get(&self, url: &str, headers: &[(&str, &str)]) -> Result<HttpGetResult, String> {
        self.requests.lock().unwrap().push((
            url.to_string(),
            headers.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect(),
        ));

        let route = self
            .routes
            .iter()
            .filter(|(prefix, _)| url.starts_with(prefix.as_str()))
            .max_by_key(|(prefix, _)| prefix.len());

        match route {
            Some((_, Reply::Json { status, body, delay_ms })) => {
                if *delay_ms > 0 {
                    tokio::time::sleep(Duration::from_millis(*delay_ms)).await;
                }
                Ok(HttpGetResult {
                    status: *status,
                    bytes: serde_json::to_vec(body).unwrap(),
                    content_type: "application/json".to_string(),
                })
            }
            Some((_, Reply::Fail(message))) => Err(message.clone()),
            None => Err(format!("connection refused: {}", url)),
        }
    }
}

pub fn test_config() -> Config {
    let mut config = Config::default();
    config.api.pokemon_url = POKEMON_URL.to_string();
    config.api.species_url = SPECIES_URL.to_string();
    config.api.cards_url = CARDS_URL.to_string();
    config.catalog.page_size = 3;
    config
}
