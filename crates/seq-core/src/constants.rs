//! Constantes del motor core.
//!
//! Este módulo agrupa valores estáticos que participan en el cálculo del
//! `definition_hash` de una cadena. Cambios en estas constantes alteran la
//! identidad de toda cadena aunque su definición no cambie (por diseño,
//! `ENGINE_VERSION` forma parte del input del hashing).

/// Versión lógica del motor de cadenas. Se incluye en el hash de definición
/// para que un cambio de versión del engine invalide determinísticamente la
/// identidad registrada en `ChainInitialized`. Mantener estable mientras no
/// haya cambios incompatibles.
pub const ENGINE_VERSION: &str = "1.0";
