//! Counters and histograms for catalog loads, name resolution and card searches.
//!
//! Recording is a no-op until a recorder is installed; `init_metrics` installs
//! the Prometheus exporter when the CLI is asked to expose one.

use std::net::SocketAddr;
use tracing::{info, warn};

pub fn init_metrics(port: u16) {
    let addr: SocketAddr = ([0, 0, 0, 0], port).into();
    let builder = metrics_exporter_prometheus::PrometheusBuilder::new().with_http_listener(addr);
    match builder.install() {
        Ok(()) => info!("Prometheus exporter listening on http://{}/metrics", addr),
        Err(e) => warn!("Prometheus exporter install failed (possibly already installed): {}", e),
    }
}

pub mod catalog {
    pub fn batch_loaded(records: usize, duration_secs: f64) {
        ::metrics::counter!("pokecollector_catalog_batches_total").increment(1);
        ::metrics::counter!("pokecollector_catalog_records_total").increment(records as u64);
        ::metrics::histogram!("pokecollector_catalog_batch_duration_seconds").record(duration_secs);
    }

    pub fn batch_failed() {
        ::metrics::counter!("pokecollector_catalog_batch_failures_total").increment(1);
    }
}

pub mod resolver {
    pub fn translated() {
        ::metrics::counter!("pokecollector_resolver_translated_total").increment(1);
    }

    pub fn fell_back() {
        ::metrics::counter!("pokecollector_resolver_fallback_total").increment(1);
    }
}

pub mod cards {
    pub fn grouped(sets: usize, cards: usize, skipped: usize) {
        ::metrics::counter!("pokecollector_card_searches_total").increment(1);
        ::metrics::histogram!("pokecollector_card_sets_per_search").record(sets as f64);
        ::metrics::counter!("pokecollector_cards_grouped_total").increment(cards as u64);
        if skipped > 0 {
            ::metrics::counter!("pokecollector_cards_skipped_total").increment(skipped as u64);
        }
    }

    pub fn not_found() {
        ::metrics::counter!("pokecollector_card_searches_not_found_total").increment(1);
    }

    pub fn failed() {
        ::metrics::counter!("pokecollector_card_searches_failed_total").increment(1);
    }
}
