//! Integration tests against a running Elasticsearch cluster.
//!
//! Ignored by default. Run with a single-node cluster reachable at
//! `ELASTICSEARCH_URL` (default `http://localhost:9200`):
//!
//! ```text
//! cargo test -p es-client --test live_cluster -- --ignored --test-threads=1
//! ```

use std::env;
use std::time::Duration;

use es_client::{ClientConfig, RequestOptions, SearchClient, SearchResult};
use serde::{Deserialize, Serialize};
use tokio::time::sleep;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Order {
    id: u32,
    status: String,
}

async fn client() -> SearchClient {
    let url = env::var("ELASTICSEARCH_URL").unwrap_or_else(|_| "http://localhost:9200".to_string());
    SearchClient::connect(ClientConfig::new([url]).with_request_timeout(Duration::from_secs(30)))
        .await
        .expect("cluster reachable")
}

fn opts() -> RequestOptions {
    RequestOptions::none().with_timeout(Duration::from_secs(30))
}

fn orders(statuses: &[&str]) -> Vec<Order> {
    statuses
        .iter()
        .enumerate()
        .map(|(i, status)| Order {
            id: i as u32,
            status: status.to_string(),
        })
        .collect()
}

/// Remove `index` if a previous run left it behind.
async fn reset_index(client: &SearchClient, index: &str) {
    if client.index_exists(index, &opts()).await.unwrap() {
        client.delete_index(index, &opts()).await.unwrap();
    }
}

/// Query until at least `expected` hits are visible; indexing is near-real-time.
async fn wait_for_hits(client: &SearchClient, index: &str, query: &str, expected: u64) -> SearchResult {
    for _ in 0..20 {
        let result = client.query(index, query, &opts()).await.unwrap();
        if result.total_hits() >= expected {
            return result;
        }
        sleep(Duration::from_millis(250)).await;
    }
    panic!("expected at least {} hits for '{}' in {}", expected, query, index);
}

#[tokio::test]
#[ignore]
async fn test_orders_scenario() {
    let client = client().await;
    reset_index(&client, "orders").await;

    let ack = client.create_index("orders", 1, 0, &opts()).await.unwrap();
    assert!(ack.acknowledged);

    let ack = client
        .add_alias("orders", "orders-current", &opts())
        .await
        .unwrap();
    assert!(ack.acknowledged);
    assert!(client.index_exists("orders", &opts()).await.unwrap());

    let docs = orders(&["paid", "open", "paid"]);
    let summary = client.insert_bulk("orders", &docs, &opts()).await.unwrap();
    assert_eq!(summary.total, 3);
    assert!(summary.all_succeeded());

    let result = wait_for_hits(&client, "orders", "*", 3).await;
    assert_eq!(result.total_hits(), 3);
    let mut found: Vec<Order> = result.sources().unwrap();
    found.sort_by_key(|o| o.id);
    assert_eq!(found, docs);

    let ack = client.delete_index("orders", &opts()).await.unwrap();
    assert!(ack.acknowledged);
    assert!(!client.index_exists("orders", &opts()).await.unwrap());
}

#[tokio::test]
#[ignore]
async fn test_create_duplicate_index_fails() {
    let client = client().await;
    reset_index(&client, "duplicates").await;

    client.create_index("duplicates", 1, 0, &opts()).await.unwrap();
    let err = client
        .create_index("duplicates", 1, 0, &opts())
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(400));

    client.delete_index("duplicates", &opts()).await.unwrap();
}

#[tokio::test]
#[ignore]
async fn test_delete_by_query_counts_matches() {
    let client = client().await;
    reset_index(&client, "invoices").await;
    client.create_index("invoices", 1, 0, &opts()).await.unwrap();

    let docs = orders(&["paid", "open", "paid", "void", "paid"]);
    client.insert_bulk("invoices", &docs, &opts()).await.unwrap();
    wait_for_hits(&client, "invoices", "*", 5).await;

    let deleted = client
        .delete_by_query("invoices", "status:paid", &opts())
        .await
        .unwrap();
    assert_eq!(deleted, 3);

    client.delete_index("invoices", &opts()).await.unwrap();
}

#[tokio::test]
#[ignore]
async fn test_batch_flush() {
    let client = client().await;
    reset_index(&client, "batches").await;
    client.create_index("batches", 1, 0, &opts()).await.unwrap();

    let mut batch = client.begin_batch("batches").unwrap();
    for order in orders(&["open", "open"]) {
        batch.add(&order).unwrap();
    }
    let summary = client.flush(batch, &opts()).await.unwrap();
    assert_eq!(summary.succeeded, 2);
    wait_for_hits(&client, "batches", "status:open", 2).await;

    client.delete_index("batches", &opts()).await.unwrap();
}

#[tokio::test]
#[ignore]
async fn test_template_applies_alias() {
    let client = client().await;
    reset_index(&client, "logs-2024").await;

    let ack = client
        .create_template("logs-template", "logs-", "logs-all", 1, 0, &opts())
        .await
        .unwrap();
    assert!(ack.acknowledged);
    assert!(client.template_exists("logs-template", &opts()).await.unwrap());

    client.create_index("logs-2024", 1, 0, &opts()).await.unwrap();
    client
        .insert_bulk("logs-2024", &orders(&["open"]), &opts())
        .await
        .unwrap();

    // the template alias resolves to the new index
    let result = wait_for_hits(&client, "logs-all", "*", 1).await;
    assert_eq!(result.hits.hits[0].index, "logs-2024");

    client.delete_index("logs-2024", &opts()).await.unwrap();
    client.delete_template("logs-template", &opts()).await.unwrap();
    assert!(!client.template_exists("logs-template", &opts()).await.unwrap());
}

#[tokio::test]
#[ignore]
async fn test_missing_template_does_not_exist() {
    let client = client().await;
    assert!(!client
        .template_exists("never-created-template", &opts())
        .await
        .unwrap());
}

#[tokio::test]
#[ignore]
async fn test_rollover_with_unmet_conditions() {
    let client = client().await;
    reset_index(&client, "events-000001").await;
    client.create_index("events-000001", 1, 0, &opts()).await.unwrap();
    client
        .add_alias("events-000001", "events", &opts())
        .await
        .unwrap();

    let response = client.rollover("events", "30d", 1_000_000, &opts()).await.unwrap();
    assert!(!response.rolled_over);
    assert_eq!(response.old_index, "events-000001");

    client.delete_index("events-000001", &opts()).await.unwrap();
}

#[tokio::test]
#[ignore]
async fn test_cluster_health() {
    let client = client().await;
    let health = client.cluster_health(&opts()).await.unwrap();
    assert!(health.number_of_nodes >= 1);
    assert!(["green", "yellow", "red"].contains(&health.status.as_str()));
}
