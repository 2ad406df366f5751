//! Integration test: fetch → decode → build → rank → select through the
//! public `NodeRank` operations, against an in-memory ledger.

use noderank_core::{
    decode_envelope, AttestationEdge, CoreError, DecodeError, DecodePolicy, Identity,
    NodeRankConfig,
};
use noderank_integration_tests::{record, MemoryLedger};
use noderank_ledger::{LedgerCommand, LedgerError, NodeRank, PipelineError};

fn service(ledger: MemoryLedger) -> NodeRank<MemoryLedger> {
    NodeRank::new(ledger, &NodeRankConfig::default()).unwrap()
}

fn names(result: &noderank_ledger::RankingResult) -> Vec<&str> {
    result.entries.iter().map(|e| e.identity.as_str()).collect()
}

// =========================================================================
// Ranking scenarios
// =========================================================================

#[tokio::test]
async fn test_symmetric_pair_splits_evenly() {
    let ledger = MemoryLedger::new().with_period(
        1,
        vec![record(&[("a", "b", 10.0)]), record(&[("b", "a", 10.0)])],
    );
    let result = service(ledger).compute_ranking(1, 10).await.unwrap();

    assert_eq!(result.entries.len(), 2);
    for entry in &result.entries {
        assert!((entry.score - 0.5).abs() < 1e-6);
    }
}

#[tokio::test]
async fn test_chain_sink_ranks_highest() {
    let ledger = MemoryLedger::new().with_period(
        2,
        vec![record(&[("a", "b", 10.0), ("b", "c", 10.0)])],
    );
    let result = service(ledger).compute_ranking(2, 10).await.unwrap();

    assert_eq!(names(&result), vec!["c", "b", "a"]);
    let total: f64 = result.entries.iter().map(|e| e.score).sum();
    assert!((total - 1.0).abs() < 1e-6);
    assert!(result.converged);
}

#[tokio::test]
async fn test_empty_period_is_not_an_error() {
    let noderank = service(MemoryLedger::new().with_period(9, Vec::new()));

    let result = noderank.compute_ranking(9, 5).await.unwrap();
    assert!(result.is_empty());
    assert_eq!(result.node_count, 0);

    let graph = noderank.export_graph(9).await.unwrap();
    assert!(graph.is_empty());
    assert!(graph.edges.is_empty());
}

#[tokio::test]
async fn test_unknown_period_is_empty() {
    let result = service(MemoryLedger::new()).compute_ranking(42, 5).await.unwrap();
    assert!(result.is_empty());
}

#[tokio::test]
async fn test_top_n_clamped() {
    let ledger = MemoryLedger::new().with_period(
        3,
        vec![record(&[("a", "b", 1.0), ("b", "c", 1.0), ("c", "a", 1.0)])],
    );
    let noderank = service(ledger);

    assert_eq!(noderank.compute_ranking(3, 100).await.unwrap().entries.len(), 3);
    assert_eq!(noderank.compute_ranking(3, 2).await.unwrap().entries.len(), 2);
    assert!(noderank.compute_ranking(3, 0).await.unwrap().is_empty());
    assert!(noderank.compute_ranking(3, -1).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_ranking_is_deterministic_including_ties() {
    // x, y and z all sit in symmetric positions around the hub.
    let records = vec![
        record(&[("hub", "z", 1.0), ("hub", "x", 1.0)]),
        record(&[("hub", "y", 1.0), ("z", "hub", 1.0)]),
        record(&[("x", "hub", 1.0), ("y", "hub", 1.0)]),
    ];
    let noderank = service(MemoryLedger::new().with_period(4, records));

    let first = noderank.compute_ranking(4, 10).await.unwrap();
    let second = noderank.compute_ranking(4, 10).await.unwrap();
    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
    // Leaves tie; they appear in the order they were first attested.
    assert_eq!(names(&first), vec!["hub", "z", "x", "y"]);
}

#[tokio::test]
async fn test_weights_accumulate_across_records() {
    let ledger = MemoryLedger::new().with_period(
        5,
        vec![
            record(&[("a", "b", 3.0)]),
            record(&[("a", "b", 4.0)]),
            record(&[("a", "c", 5.0)]),
        ],
    );
    let result = service(ledger).compute_ranking(5, 10).await.unwrap();

    assert_eq!(result.edge_count, 2);
    assert_eq!(names(&result)[0], "b");
}

// =========================================================================
// Failure handling
// =========================================================================

#[tokio::test]
async fn test_malformed_record_aborts_period() {
    let ledger = MemoryLedger::new().with_period(
        6,
        vec![record(&[("a", "b", 1.0)]), "%7Bbroken%ZZ".to_string()],
    );
    let result = service(ledger).compute_ranking(6, 10).await;

    match result {
        Err(PipelineError::Core(CoreError::Decode { index, source })) => {
            assert_eq!(index, 1);
            assert!(matches!(source, DecodeError::MalformedEscape { .. }));
        }
        other => panic!("expected decode error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_skip_policy_ranks_remaining_records() {
    let mut config = NodeRankConfig::default();
    config.decode.policy = DecodePolicy::SkipInvalid;
    let ledger = MemoryLedger::new().with_period(
        7,
        vec![record(&[("a", "b", 1.0)]), "%ZZ".to_string()],
    );
    let noderank = NodeRank::new(ledger, &config).unwrap();

    let result = noderank.compute_ranking(7, 10).await.unwrap();
    assert_eq!(result.skipped_records, 1);
    assert_eq!(result.node_count, 2);
}

#[tokio::test]
async fn test_transport_failure_surfaces() {
    let result = service(MemoryLedger::failing(500)).compute_ranking(1, 10).await;
    assert!(matches!(
        result,
        Err(PipelineError::Transport(LedgerError::Status { status: 500, .. }))
    ));
}

#[test]
fn test_invalid_rank_params_rejected_at_construction() {
    let mut config = NodeRankConfig::default();
    config.rank.damping = 2.0;
    assert!(NodeRank::new(MemoryLedger::new(), &config).is_err());
}

// =========================================================================
// Export and submission
// =========================================================================

#[tokio::test]
async fn test_export_drops_weights_and_duplicates() {
    let ledger = MemoryLedger::new().with_period(
        8,
        vec![record(&[("a", "b", 3.0), ("a", "b", 4.0), ("b", "c", 1.0)])],
    );
    let graph = service(ledger).export_graph(8).await.unwrap();

    assert_eq!(graph.nodes.len(), 3);
    assert_eq!(graph.edges.len(), 2);
    let json = serde_json::to_value(&graph).unwrap();
    assert!(json["edges"][0].get("weight").is_none());
}

#[tokio::test]
async fn test_submit_attestation_stores_single_edge_envelope() {
    let noderank = service(MemoryLedger::new());
    noderank.submit_attestation("alice", "bob", "7").await.unwrap();

    let stored = noderank.client().stored();
    assert_eq!(stored.len(), 1);
    match &stored[0] {
        LedgerCommand::StoreMessage {
            address,
            message,
            tag,
        } => {
            assert_eq!(address, noderank.address());
            assert!(tag.ends_with("TEE"));
            assert_eq!(tag.len(), 11);

            let envelope = decode_envelope(message).unwrap();
            assert_eq!(envelope.count, 1);
            assert_eq!(envelope.edges, vec![AttestationEdge::new("alice", "bob", 7.0)]);
        }
        other => panic!("unexpected command {other:?}"),
    }
}

#[tokio::test]
async fn test_submit_rejects_bad_weight_without_posting() {
    let noderank = service(MemoryLedger::new());
    for raw in ["-1", "abc", "2.5"] {
        let result = noderank.submit_attestation("alice", "bob", raw).await;
        assert!(matches!(
            result,
            Err(PipelineError::Core(CoreError::InvalidWeight { .. }))
        ));
    }
    assert!(noderank.client().stored().is_empty());
}

#[tokio::test]
async fn test_submitted_attestation_can_be_ranked() {
    let writer = service(MemoryLedger::new());
    writer.submit_attestation("alice", "bob", "5").await.unwrap();
    writer.submit_attestation("bob", "carol", "5").await.unwrap();

    let records: Vec<String> = writer
        .client()
        .stored()
        .into_iter()
        .filter_map(|cmd| match cmd {
            LedgerCommand::StoreMessage { message, .. } => Some(message),
            LedgerCommand::GetBlocksInPeriodStatement { .. } => None,
        })
        .collect();

    let reader = service(MemoryLedger::new().with_period(11, records));
    let result = reader.compute_ranking(11, 1).await.unwrap();
    assert_eq!(result.entries[0].identity, Identity::from("carol"));
}
