//! Smoke test del workspace: el binario de demo y cualquier cliente externo
//! consumen `seq-core` exactamente a través de esta superficie.
use seq_core::{ChainEngine, ChainEventKind, Sequence};
use serde_json::json;

#[test]
fn chain_smoke_filter_then_map() {
    tokio_test::block_on(async {
        let mut chain = ChainEngine::new(Sequence::from(vec![json!(1), json!("x"), json!(3)]))
            .filter(|el, _| async move { Ok(json!(el.is_number())) })
            .map(|el, _| async move { Ok(json!(el.as_i64().unwrap_or(0) + 1)) });

        let result = chain.execute().await.expect("chain should complete");
        assert_eq!(result.into_vec(), vec![json!(2), json!(4)]);

        let events = chain.events().expect("events recorded");
        assert!(events.iter()
                      .any(|e| matches!(e.kind, ChainEventKind::ChainCompleted { .. })),
                "ChainCompleted missing");
    });
}
