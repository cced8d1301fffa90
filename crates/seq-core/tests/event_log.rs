//! Registro de eventos: ciclo de vida observable de una corrida y
//! estabilidad del hash de definición.
use seq_core::{ChainEngine, ChainEvent, ChainEventKind, Sequence, StepKind};
use serde_json::json;

fn numbers() -> Sequence {
    Sequence::from(vec![json!(1), json!(2), json!(3)])
}

fn init_hash(events: &[ChainEvent]) -> String {
    events.iter()
          .find_map(|e| match &e.kind {
              ChainEventKind::ChainInitialized { definition_hash, .. } => {
                  Some(definition_hash.clone())
              }
              _ => None,
          })
          .expect("ChainInitialized missing")
}

#[tokio::test]
async fn success_run_emits_full_lifecycle() {
    let mut chain = ChainEngine::new(numbers())
        .filter(|el, _| async move { Ok(json!(el.as_i64().unwrap_or(0) > 1)) })
        .map(|el, _| async move { Ok(el) });

    chain.execute().await.expect("chain should complete");

    let events = chain.events().expect("events recorded");
    assert_eq!(events[0].seq, 0);
    assert!(matches!(events[0].kind,
                     ChainEventKind::ChainInitialized { step_count: 2, source_len: 3, .. }));
    assert!(matches!(events[1].kind,
                     ChainEventKind::StepStarted { step_index: 0, kind: StepKind::Filter, .. }));
    assert!(matches!(events[2].kind,
                     ChainEventKind::StepFinished { step_index: 0, output_len: 2, .. }));
    assert!(matches!(events.last().expect("non-empty").kind,
                     ChainEventKind::ChainCompleted { step_count: 2 }));
}

#[tokio::test]
async fn failed_run_emits_step_failed_and_stops() {
    let mut chain = ChainEngine::new(numbers())
        .map(|el, _| async move { Ok(el) })
        .map(|_el, _| async move { Err(json!("boom")) })
        .map(|el, _| async move { Ok(el) });

    chain.execute().await.expect_err("chain should fail");

    let variants = chain.event_variants().expect("events recorded");
    // El tercer step nunca arranca: no hay más eventos después del fallo.
    assert_eq!(variants, vec!["I", "S", "F", "S", "X"]);

    let events = chain.events().expect("events recorded");
    assert!(events.iter().any(|e| matches!(&e.kind,
                     ChainEventKind::StepFailed { step_index: 1, .. })));
}

#[tokio::test]
async fn definition_hash_is_recorded_and_stable_across_runs() {
    let mut chain = ChainEngine::new(numbers()).map(|el, _| async move { Ok(el) });

    chain.execute().await.expect("first run");
    let first_run = chain.last_run_id().expect("run id");
    chain.execute().await.expect("second run");
    let second_run = chain.last_run_id().expect("run id");

    let first_hash = init_hash(&chain.events_for(first_run));
    let second_hash = init_hash(&chain.events_for(second_run));
    assert_eq!(first_hash, second_hash);
    assert_eq!(first_hash, chain.definition_hash());
}

#[tokio::test]
async fn different_chains_have_different_definition_hashes() {
    let map_chain = ChainEngine::new(numbers()).map(|el, _| async move { Ok(el) });
    let filter_chain = ChainEngine::new(numbers()).filter(|_, _| async { Ok(json!(true)) });

    assert_ne!(map_chain.definition_hash(), filter_chain.definition_hash());
}
