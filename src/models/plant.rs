use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A tracked houseplant.
///
/// Identifiers are assigned sequentially by the database starting at 1 and
/// never change. `fecha_actualizacion` is refreshed on every mutating write;
/// `fecha_creacion` is set once.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Plant {
    pub id: i64,
    pub nombre: String,
    /// Category, e.g. "Interior" or "Exterior".
    pub tipo: String,
    pub ubicacion: String,
    /// Target interval in days between waterings. Always > 0.
    pub frecuencia_riego_dias: i64,
    pub fecha_creacion: DateTime<Utc>,
    pub fecha_actualizacion: DateTime<Utc>,
}

/// Input for creating a plant. Validated at the API boundary before it
/// reaches the store: all text fields non-empty, frequency positive.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePlantInput {
    pub nombre: String,
    pub tipo: String,
    pub ubicacion: String,
    pub frecuencia_riego_dias: i64,
}

/// Input for a partial update. Absent fields keep their current values.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdatePlantInput {
    pub nombre: Option<String>,
    pub tipo: Option<String>,
    pub ubicacion: Option<String>,
    pub frecuencia_riego_dias: Option<i64>,
}
