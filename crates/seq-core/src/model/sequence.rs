//! Contenedor ordenado de elementos.
//!
//! Una `Sequence` es la unidad de datos que entra y sale de cada step. Es
//! neutral:
//! - Los elementos son JSON genérico (`serde_json::Value`); el motor no
//!   interpreta su semántica, salvo el test de veracidad que usa el step de
//!   filtrado.
//! - La longitud queda fija una vez producida: cada step consume una
//!   `Sequence` y produce exactamente una nueva (el for-each devuelve su
//!   propia entrada).
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Snapshot ordenado e indexable de elementos.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Sequence {
    items: Vec<Value>,
}

impl Sequence {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Acceso posicional (`None` fuera de rango).
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.items.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.items.iter()
    }

    /// Agrega un elemento al final. Sólo se usa mientras se materializa un
    /// resultado; una vez entregada a un step la secuencia no cambia.
    pub fn push(&mut self, value: Value) {
        self.items.push(value);
    }

    pub fn as_slice(&self) -> &[Value] {
        &self.items
    }

    pub fn into_vec(self) -> Vec<Value> {
        self.items
    }
}

impl From<Vec<Value>> for Sequence {
    fn from(items: Vec<Value>) -> Self {
        Self { items }
    }
}

impl FromIterator<Value> for Sequence {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Self { items: iter.into_iter().collect() }
    }
}

impl IntoIterator for Sequence {
    type Item = Value;
    type IntoIter = std::vec::IntoIter<Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a Sequence {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl std::ops::Index<usize> for Sequence {
    type Output = Value;

    fn index(&self, index: usize) -> &Value {
        &self.items[index]
    }
}

/// Test de veracidad del valor de completación de un worker de filtrado:
/// `null`, `false`, `0`, `""` descartan el elemento; cualquier otro valor lo
/// conserva.
pub fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
