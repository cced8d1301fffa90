//! Escenarios end-to-end de ejecución de cadenas: orden determinista de
//! resultados bajo completaciones desordenadas, encadenado de etapas y
//! re-ejecución independiente.
use std::sync::{Arc, Mutex};
use std::time::Duration;

use seq_core::{ChainEngine, Sequence};
use serde_json::{json, Value};
use tokio::time::sleep;

fn mixed_sequence() -> Sequence {
    Sequence::from(vec![json!(1), json!(2), json!("three"), json!(4)])
}

#[tokio::test]
async fn parallel_map_preserves_input_order_despite_reversed_delays() {
    // Los retrasos decrecen con el índice: el elemento 3 completa primero y
    // el 0 último, pero la escritura es posicional.
    let mut chain = ChainEngine::new(mixed_sequence()).map(|_el, index| async move {
        sleep(Duration::from_millis(40 - 10 * index as u64)).await;
        Ok(json!(format!("did {index}")))
    });

    let result = chain.execute().await.expect("chain should complete");
    let expected: Vec<Value> = (0..4).map(|i| json!(format!("did {i}"))).collect();
    assert_eq!(result.into_vec(), expected);
}

#[tokio::test]
async fn parallel_filter_restores_original_relative_order() {
    let mut chain = ChainEngine::new(mixed_sequence()).filter(|el, index| async move {
        sleep(Duration::from_millis(30 - 7 * index as u64)).await;
        Ok(json!(!el.is_string()))
    });

    let result = chain.execute().await.expect("chain should complete");
    assert_eq!(result.into_vec(), vec![json!(1), json!(2), json!(4)]);
}

#[tokio::test]
async fn serial_filter_runs_workers_strictly_in_index_order() {
    let log: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
    let worker_log = Arc::clone(&log);

    let mut chain = ChainEngine::new(mixed_sequence()).filter_serial(move |el, index| {
        let log = Arc::clone(&worker_log);
        log.lock().unwrap().push(format!("invoke {index}"));
        async move {
            sleep(Duration::from_millis(5)).await;
            log.lock().unwrap().push(format!("complete {index}"));
            Ok(json!(!el.is_string()))
        }
    });

    let result = chain.execute().await.expect("chain should complete");
    assert_eq!(result.into_vec(), vec![json!(1), json!(2), json!(4)]);

    // Ningún worker arranca antes de que complete el anterior.
    let observed = log.lock().unwrap().clone();
    assert_eq!(observed,
               vec!["invoke 0", "complete 0", "invoke 1", "complete 1", "invoke 2",
                    "complete 2", "invoke 3", "complete 3"]);
}

#[tokio::test]
async fn filter_then_map_feeds_stage_output_forward() {
    let mut chain = ChainEngine::new(mixed_sequence())
        .filter(|el, _| async move { Ok(json!(!el.is_string())) })
        .map(|el, _| async move { Ok(json!(el.to_string())) });

    let result = chain.execute().await.expect("chain should complete");
    assert_eq!(result.into_vec(), vec![json!("1"), json!("2"), json!("4")]);
}

#[tokio::test]
async fn for_each_invokes_worker_once_per_element_and_completes_once() {
    let invocations = Arc::new(Mutex::new(0usize));
    let completions = Arc::new(Mutex::new(0usize));

    let worker_count = Arc::clone(&invocations);
    let callback_count = Arc::clone(&completions);

    let mut chain = ChainEngine::new(mixed_sequence())
        .for_each(move |_el, _index| {
            *worker_count.lock().unwrap() += 1;
            async move { Ok(Value::Null) }
        })
        .on_step_complete(move |error, result| {
            assert!(error.is_none());
            assert_eq!(result.len(), 4);
            *callback_count.lock().unwrap() += 1;
        })
        .expect("step exists");

    let result = chain.execute().await.expect("chain should complete");
    // for-each no escribe: el resultado es la secuencia de entrada.
    assert_eq!(result, mixed_sequence());
    assert_eq!(*invocations.lock().unwrap(), 4);
    assert_eq!(*completions.lock().unwrap(), 1);
}

#[tokio::test]
async fn multiple_callbacks_fire_in_registration_order() {
    let order: Arc<Mutex<Vec<&'static str>>> = Arc::new(Mutex::new(Vec::new()));
    let first = Arc::clone(&order);
    let second = Arc::clone(&order);

    let mut chain = ChainEngine::new(mixed_sequence())
        .map(|el, _| async move { Ok(el) })
        .on_step_complete(move |_, _| first.lock().unwrap().push("first"))
        .expect("step exists")
        .on_step_complete(move |_, _| second.lock().unwrap().push("second"))
        .expect("step exists");

    chain.execute().await.expect("chain should complete");
    assert_eq!(*order.lock().unwrap(), vec!["first", "second"]);
}

#[tokio::test]
async fn re_execution_is_independent_and_repeatable() {
    let mut chain = ChainEngine::new(mixed_sequence())
        .filter(|el, _| async move { Ok(json!(!el.is_string())) })
        .map(|el, _| async move { Ok(json!(el.as_i64().unwrap_or(0) * 2)) });

    let first = chain.execute().await.expect("first run should complete");
    let first_run = chain.last_run_id().expect("run id recorded");
    let second = chain.execute().await.expect("second run should complete");
    let second_run = chain.last_run_id().expect("run id recorded");

    assert_eq!(first, second);
    assert_eq!(first.into_vec(), vec![json!(2), json!(4), json!(8)]);
    // Corridas distintas: eventos propios bajo run ids propios.
    assert_ne!(first_run, second_run);
    assert_eq!(chain.events_for(first_run).len(), chain.events_for(second_run).len());
}

#[tokio::test]
async fn empty_sequence_completes_every_step_immediately() {
    let mut chain = ChainEngine::new(Sequence::new())
        .for_each(|_, _| async { Ok(Value::Null) })
        .map(|el, _| async move { Ok(el) })
        .filter(|_, _| async { Ok(json!(true)) });

    let result = chain.execute().await.expect("chain should complete");
    assert!(result.is_empty());
    assert_eq!(chain.event_variants().expect("events"),
               vec!["I", "S", "F", "S", "F", "S", "F", "C"]);
}
