use anyhow::Context;
use clap::{Parser, Subcommand};
use pokecollector::app::card_search_use_case::CardSearchOutcome;
use pokecollector::app::catalog_use_case::CATALOG_LOAD_FAILED_MESSAGE;
use pokecollector::config::Config;
use pokecollector::constants::set_details_url;
use pokecollector::infra::http_client::ReqwestHttp;
use pokecollector::labels::{category_label, format_release_date, stat_label, stat_percent, CATEGORY_KEYS};
use pokecollector::types::CreatureRecord;
use pokecollector::{logging, metrics, Collector};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "pokecollector")]
#[command(about = "Pokédex catalog and TCG set finder")]
#[command(version)]
struct Cli {
    /// Path to a TOML config file (defaults to $POKECOLLECTOR_CONFIG or ./config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Expose Prometheus metrics on this port
    #[arg(long, global = true)]
    metrics_port: Option<u16>,

    /// Print results as JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load catalog pages and list the creatures
    Catalog {
        /// Number of batches to load
        #[arg(long, default_value_t = 1)]
        pages: usize,
        /// Only show creatures whose name or number matches
        #[arg(long)]
        search: Option<String>,
        /// Only show creatures of this category (e.g. fire, water)
        #[arg(long)]
        category: Option<String>,
        /// Print description, size and stats for every creature
        #[arg(long)]
        details: bool,
    },
    /// Translate a creature name to its canonical (card API) name
    Resolve { name: String },
    /// Find trading-card sets containing a creature
    Cards { query: String },
    /// List the known category keys and their labels
    Categories,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let log_guard = logging::init_logging();

    let cli = Cli::parse();
    if let Some(port) = cli.metrics_port {
        metrics::init_metrics(port);
    }

    let config = Config::load(cli.config.as_deref()).context("loading configuration")?;
    let http = Arc::new(ReqwestHttp::new(&config.http).context("building HTTP client")?);
    let collector = Collector::new(&config, http);

    match cli.command {
        Commands::Catalog { pages, search, category, details } => {
            let mut catalog = collector.new_catalog();
            for page in 0..pages.max(1) {
                if let Err(e) = catalog.load_next(&collector.catalog_loader).await {
                    error!("Catalog page {} failed: {}", page + 1, e);
                    eprintln!("{}", CATALOG_LOAD_FAILED_MESSAGE);
                    break;
                }
            }
            info!("{} creatures loaded", catalog.len());

            let mut shown = match search.as_deref() {
                Some(term) => catalog.search(term),
                None => catalog.filter_by_category(None),
            };
            if let Some(key) = category.as_deref() {
                shown.retain(|r| r.has_category(key));
            }

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&shown)?);
            } else if shown.is_empty() {
                if let Some(term) = search {
                    println!("No loaded Pokémon match \"{}\". Load more pages or try the English name.", term);
                }
            } else {
                let count = shown.len();
                for record in shown {
                    print_creature(record, details);
                }
                println!("\n{} of {} loaded", count, catalog.len());
            }
        }
        Commands::Resolve { name } => {
            let resolved = collector.resolver.resolve(&name).await;
            println!("{}", resolved);
        }
        Commands::Cards { query } => match collector.card_search.search(&query).await {
            Ok(Some(outcome)) => {
                if cli.json {
                    println!("{}", serde_json::to_string_pretty(&outcome.groups)?);
                } else {
                    print_sets(&outcome);
                }
            }
            Ok(None) => {}
            Err(e) => {
                error!("Card search failed: {}", e);
                eprintln!("{}", e.user_message());
                drop(log_guard);
                std::process::exit(1);
            }
        },
        Commands::Categories => {
            for key in CATEGORY_KEYS {
                println!("{:<10} {}", key, category_label(key));
            }
        }
    }
    Ok(())
}

fn print_creature(record: &CreatureRecord, details: bool) {
    let categories: Vec<&str> = record.categories.iter().map(|c| category_label(c)).collect();
    println!(
        "{:>5}  {:<16} {}",
        record.display_number(),
        record.localized_name,
        categories.join(" / ")
    );
    if !details {
        return;
    }
    println!("       {}", record.classification);
    println!("       \"{}\"", record.description_text);
    println!("       Größe {} m · Gewicht {} kg", record.size_meters, record.mass_kg);
    for stat in &record.stat_entries {
        println!(
            "       {:<10} {:>3} {:>5.1}%",
            stat_label(&stat.name),
            stat.value,
            stat_percent(stat.value)
        );
    }
    println!("       {}", record.image_url);
}

fn print_sets(outcome: &CardSearchOutcome) {
    println!("{} in {} Sets", outcome.heading(), outcome.set_count());
    for bucket in outcome.groups.iter() {
        let info = &bucket.set_info;
        println!("\n{}", info.name);
        println!("  Erschienen: {}", format_release_date(info.release_date.as_deref()));
        if let Some(series) = &info.series {
            println!("  Serie: {}", series);
        }
        if let Some(total) = info.total_cards {
            println!("  {} Karten im Set", total);
        }

        let preview: Vec<String> = bucket
            .cards
            .iter()
            .take(3)
            .map(|c| format!("{} ({})", c.name, c.rarity))
            .collect();
        let remaining = bucket.cards.len().saturating_sub(3);
        let suffix = if remaining > 0 { format!(" +{}", remaining) } else { String::new() };
        println!("  Gefundene Karten ({}): {}{}", bucket.cards.len(), preview.join(", "), suffix);
        println!("  {}", set_details_url(&info.id));
    }
}
