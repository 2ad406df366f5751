//! Integration test: the full pipeline over HTTP against a mock ledger node.

use std::time::Duration;

use noderank_core::NodeRankConfig;
use noderank_integration_tests::record;
use noderank_ledger::{HttpLedgerClient, NodeRank};
use serde_json::json;
use wiremock::matchers::{body_partial_json, method};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SCENARIO_C: &str = "%7B%22tee_num%22%3A1%2C%22tee_content%22%3A%5B%7B%22attester%22%3A%22X%22%2C%22attestee%22%3A%22Y%22%2C%22score%22%3A5%7D%5D%7D";

async fn noderank(server: &MockServer) -> NodeRank<HttpLedgerClient> {
    let mut config = NodeRankConfig::default();
    config.ledger.url = server.uri();
    config.ledger.address = "TESTADDRESS9".into();
    let client = HttpLedgerClient::from_config(&config).unwrap();
    NodeRank::new(client, &config).unwrap()
}

#[tokio::test]
async fn test_rank_period_over_http() {
    let server = MockServer::start().await;
    let blocks = serde_json::to_string(&vec![
        SCENARIO_C.to_string(),
        record(&[("Y", "Z", 5.0)]),
    ])
    .unwrap();
    Mock::given(method("POST"))
        .and(body_partial_json(json!({
            "command": "getBlocksInPeriodStatement",
            "period": 12
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "blocks": blocks,
            "duration": 4
        })))
        .expect(1)
        .mount(&server)
        .await;

    let result = noderank(&server).await.compute_ranking(12, 2).await.unwrap();
    assert_eq!(result.node_count, 3);
    assert_eq!(result.entries.len(), 2);
    assert_eq!(result.entries[0].identity.as_str(), "Z");
}

#[tokio::test]
async fn test_export_period_over_http() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "blocks": [SCENARIO_C],
            "duration": 1
        })))
        .mount(&server)
        .await;

    let graph = noderank(&server).await.export_graph(1).await.unwrap();
    assert_eq!(graph.nodes.len(), 2);
    assert_eq!(graph.edges[0].from.as_str(), "X");
    assert_eq!(graph.edges[0].to.as_str(), "Y");
}

#[tokio::test]
async fn test_submit_over_http() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({
            "command": "storeMessage",
            "address": "TESTADDRESS9",
            "message": SCENARIO_C
        })))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"duration":2}"#))
        .expect(1)
        .mount(&server)
        .await;

    let reply = noderank(&server)
        .await
        .submit_attestation("X", "Y", "5")
        .await
        .unwrap();
    assert_eq!(reply, r#"{"duration":2}"#);
}

#[tokio::test]
async fn test_slow_ledger_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(r#"{"blocks":"[]"}"#)
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let mut config = NodeRankConfig::default();
    config.ledger.url = server.uri();
    config.ledger.timeout_secs = 1;
    let client = HttpLedgerClient::from_config(&config).unwrap();
    let noderank = NodeRank::new(client, &config).unwrap();

    assert!(noderank.compute_ranking(1, 10).await.is_err());
}
