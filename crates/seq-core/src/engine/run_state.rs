//! Estado por ejecución de una cadena.
use uuid::Uuid;

/// Estado transitorio de una corrida completa de la cadena: identifica la
/// ejecución (`run_id`) y lleva el cursor del step activo. Se descarta al
/// terminar o fallar; cada `execute()` crea uno nuevo, por lo que re-ejecutar
/// una cadena no comparte contadores con corridas anteriores.
#[derive(Debug, Clone, Copy)]
pub struct RunState {
    pub run_id: Uuid,
    pub cursor: usize,
}

impl RunState {
    pub fn new() -> Self {
        Self { run_id: Uuid::new_v4(),
               cursor: 0 }
    }

    /// Avanza exactamente un step tras una finalización exitosa.
    pub fn advance(&mut self) {
        self.cursor += 1;
    }
}

impl Default for RunState {
    fn default() -> Self {
        Self::new()
    }
}
