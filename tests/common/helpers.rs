// Test helper functions

use std::time::Duration;

use meili_client::{Client, ClientConfig, Index, PollPolicy, Settings};

use super::engine::FakeEngine;
use super::fixtures::movies_for_faceting;

/// A client for the fake engine, polling fast.
#[allow(dead_code)] // Used in integration tests
pub fn test_client(engine: &FakeEngine) -> Client {
    let config = ClientConfig::new(engine.url.clone()).with_poll_policy(PollPolicy {
        interval: Duration::from_millis(5),
        timeout: Duration::from_secs(5),
    });
    Client::new(config).expect("failed to create client")
}

/// Creates `uid`, adds the faceting movies and makes `genre` filterable,
/// waiting for each task.
#[allow(dead_code)] // Used in integration tests
pub async fn set_up_index_for_faceting(client: &Client, uid: &str) -> Index {
    let task = client.create_index(uid, Some("id")).await.unwrap();
    client.wait_for_task(task.task_uid).await.unwrap();

    let index = client.index(uid);
    let task = index
        .add_documents(&movies_for_faceting(), None)
        .await
        .unwrap();
    index.wait_for_task(task.task_uid).await.unwrap();

    let task = index
        .update_settings(&Settings::new().with_filterable_attributes(["genre"]))
        .await
        .unwrap();
    index.wait_for_task(task.task_uid).await.unwrap();

    index
}
