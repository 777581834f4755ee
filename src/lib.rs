//! Typed async bindings to the Meilisearch HTTP API.
//!
//! A [`Client`] talks to one engine instance. Mutating calls return a
//! [`TaskInfo`] that can be awaited with [`Client::wait_for_task`]; reads and
//! searches return decoded responses directly.
//!
//! ```no_run
//! use meili_client::{Client, ClientConfig, FacetSearchQuery, Settings};
//!
//! # async fn run() -> meili_client::Result<()> {
//! let client = Client::new(ClientConfig::new("http://localhost:7700"))?;
//! let movies = client.index("movies");
//!
//! let task = movies
//!     .update_settings(&Settings::new().with_filterable_attributes(["genre"]))
//!     .await?;
//! client.wait_for_task(task.task_uid).await?;
//!
//! let query = FacetSearchQuery::new().with_filter("genre = SF");
//! let result = movies.facet_search("genre", Some(&query)).await?;
//! for hit in &result.facet_hits {
//!     println!("{}: {}", hit.value, hit.count);
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod facet;
pub mod index;
pub mod search;
pub mod settings;
pub mod task;
pub mod transport;

#[cfg(test)]
mod testing;

pub use client::Client;
pub use config::{ClientConfig, PollPolicy};
pub use error::{Error, ResponseError, Result, TransportError};
pub use facet::{FacetHit, FacetSearchQuery, FacetSearchResult, MatchingStrategy};
pub use index::{Index, IndexInfo, IndexesPage};
pub use search::{SearchQuery, SearchResults};
pub use settings::{LocalizedAttribute, Settings};
pub use task::{Task, TaskInfo, TaskStatus};
pub use transport::{HttpTransport, Transport};
