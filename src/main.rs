use std::time::Duration;

use anyhow::{Context, Result};
use clap::*;
use meili_client::{
    Client, ClientConfig, FacetSearchQuery, MatchingStrategy, SearchQuery, Settings,
};
use serde_json::Value;
use tracing::warn;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show a task
    Task { uid: u64 },
    /// Wait until a task is finished
    Wait {
        uid: u64,
        /// Give up after this many milliseconds
        #[arg(long)]
        timeout_ms: Option<u64>,
        /// Pause between polls, in milliseconds
        #[arg(long)]
        interval_ms: Option<u64>,
    },
    /// List the values of a facet
    FacetSearch {
        index: String,
        facet: String,
        /// Query on the facet values
        #[arg(long)]
        facet_query: Option<String>,
        /// Search query on the documents
        #[arg(short, long)]
        query: Option<String>,
        #[arg(short, long)]
        filter: Option<String>,
        /// `last` or `all`
        #[arg(long)]
        matching_strategy: Option<MatchingStrategy>,
        /// Restrict the search query to these attributes
        #[arg(long = "on")]
        attributes_to_search_on: Vec<String>,
        #[arg(long = "locale")]
        locales: Vec<String>,
    },
    /// Search an index
    Search {
        index: String,
        query: String,
        #[arg(short, long)]
        filter: Option<String>,
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Show the settings of an index, or update them from a JSON file
    Settings {
        index: String,
        /// JSON file holding the settings to update
        #[arg(long)]
        update: Option<std::path::PathBuf>,
        /// Wait for the update to be applied
        #[arg(long)]
        wait: bool,
    },
}

fn non_empty(values: Vec<String>) -> Option<Vec<String>> {
    (!values.is_empty()).then_some(values)
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    if dotenv::dotenv().is_err() {
        warn!("didn't load a .env file")
    }

    let args = Cli::parse();

    let config = ClientConfig::from_env().context("failed to read client configuration")?;
    let client = Client::new(config).context("failed to create client")?;

    match args.command {
        Commands::Task { uid } => {
            let task = client.get_task(uid).await?;
            println!("{task}");
        }
        Commands::Wait {
            uid,
            timeout_ms,
            interval_ms,
        } => {
            let task = client
                .wait_for_task_with(
                    uid,
                    timeout_ms.map(Duration::from_millis),
                    interval_ms.map(Duration::from_millis),
                )
                .await
                .with_context(|| format!("failed waiting for task {uid}"))?;
            println!("{task}");
        }
        Commands::FacetSearch {
            index,
            facet,
            facet_query,
            query,
            filter,
            matching_strategy,
            attributes_to_search_on,
            locales,
        } => {
            let query = FacetSearchQuery {
                query,
                facet_query,
                filter,
                matching_strategy,
                attributes_to_search_on: non_empty(attributes_to_search_on),
                locales: non_empty(locales),
            };
            let result = client
                .index(index)
                .facet_search(&facet, Some(&query))
                .await
                .context("facet search failed")?;
            print!("{result}");
        }
        Commands::Search {
            index,
            query,
            filter,
            limit,
        } => {
            let mut search = SearchQuery::new(query);
            search.filter = filter;
            search.limit = limit;
            let results = client
                .index(index)
                .search::<Value>(&search)
                .await
                .context("search failed")?;
            println!("{results}");
        }
        Commands::Settings {
            index,
            update,
            wait,
        } => {
            let index = client.index(index);
            match update {
                Some(path) => {
                    let raw = std::fs::read_to_string(&path)
                        .with_context(|| format!("failed to read {}", path.display()))?;
                    let settings: Settings =
                        serde_json::from_str(&raw).context("settings file is not valid")?;
                    let info = index.update_settings(&settings).await?;
                    println!("enqueued task {}", info.task_uid);
                    if wait {
                        let task = index.wait_for_task(info.task_uid).await?;
                        println!("{task}");
                    }
                }
                None => println!("{}", index.get_settings().await?),
            }
        }
    }

    Ok(())
}
