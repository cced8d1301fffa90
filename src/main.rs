//! Driver de demostración del motor de cadenas.
//!
//! Corre tres validaciones cortas contra `seq-core` e imprime resultados y
//! la secuencia compacta de eventos de cada corrida.
use std::time::Duration;

use seq_core::{ChainEngine, Sequence};
use serde_json::json;
use tokio::time::sleep;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    run_parallel_map_validation().await;
    run_serial_filter_validation().await;
    run_failure_validation().await;
}

fn sample_sequence() -> Sequence {
    Sequence::from(vec![json!(1), json!(2), json!("three"), json!(4)])
}

/// Map paralelo con retrasos invertidos: el resultado respeta el orden de
/// entrada aunque las completaciones lleguen al revés.
async fn run_parallel_map_validation() {
    let mut chain = ChainEngine::new(sample_sequence()).map(|_el, index| async move {
        sleep(Duration::from_millis(40 - 10 * index as u64)).await;
        Ok(json!(format!("did {index}")))
    });

    match chain.execute().await {
        Ok(result) => println!("[map paralelo] resultado: {:?}", result.into_vec()),
        Err(e) => println!("[map paralelo] error inesperado: {e}"),
    }
    if let Some(variants) = chain.event_variants() {
        println!("[map paralelo] eventos: {variants:?}");
    }
}

/// Filter serial que descarta strings, encadenado con un map que multiplica.
async fn run_serial_filter_validation() {
    let chain = ChainEngine::new(sample_sequence())
        .filter_serial(|el, _| async move { Ok(json!(!el.is_string())) })
        .map(|el, _| async move { Ok(json!(el.as_i64().unwrap_or(0) * 10)) })
        .on_step_complete(|error, result| {
            if error.is_none() {
                println!("[filter serial] etapa map completó con {} elementos", result.len());
            }
        });

    let mut chain = match chain {
        Ok(c) => c,
        Err(e) => {
            println!("[filter serial] registro inválido: {e}");
            return;
        }
    };

    match chain.execute().await {
        Ok(result) => println!("[filter serial] resultado: {:?}", result.into_vec()),
        Err(e) => println!("[filter serial] error inesperado: {e}"),
    }
    if let Some(variants) = chain.event_variants() {
        println!("[filter serial] eventos: {variants:?}");
    }
}

/// Cadena que falla en el elemento no numérico: el primer error detiene todo.
async fn run_failure_validation() {
    let mut chain = ChainEngine::new(sample_sequence())
        .map(|el, index| async move {
            if el.is_string() {
                Err(json!({ "unsupported": index }))
            } else {
                Ok(el)
            }
        })
        .map(|el, _| async move { Ok(el) });

    match chain.execute().await {
        Ok(result) => println!("[fallo] no debería completar: {:?}", result.into_vec()),
        Err(e) => println!("[fallo] corto-circuito esperado: {e}"),
    }
    if let Some(variants) = chain.event_variants() {
        println!("[fallo] eventos: {variants:?}");
    }
}
