use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind-specific payload of a care event.
///
/// The database stores these as a sparse wide row (nullable `cantidad_ml`,
/// `tipo_fertilizante`, `cantidad` and `descripcion` columns with a `tipo`
/// discriminator); this enum only exists between the storage boundary and
/// the wire. On the wire it is internally tagged as `tipo` and flattened
/// into the event object, so consumers see the same flat shape the columns
/// have.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "tipo", rename_all = "snake_case")]
pub enum CareDetail {
    Riego {
        /// Water volume in milliliters. Always > 0.
        cantidad_ml: f64,
    },
    Fertilizacion {
        tipo_fertilizante: String,
        /// Free-form amount, e.g. "10ml" or "una cucharada".
        cantidad: String,
    },
    General {
        descripcion: String,
    },
}

impl CareDetail {
    /// Discriminator value as stored in the `tipo` column.
    pub fn kind(&self) -> &'static str {
        match self {
            CareDetail::Riego { .. } => "riego",
            CareDetail::Fertilizacion { .. } => "fertilizacion",
            CareDetail::General { .. } => "general",
        }
    }
}

/// One logged care action against a plant.
///
/// Events are immutable once recorded and are listed in ascending id order,
/// which equals insertion order. `planta_id` is an unchecked reference into
/// the plant registry service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CareEvent {
    pub id: i64,
    pub planta_id: i64,
    #[serde(flatten)]
    pub detail: CareDetail,
    /// Free-text note; empty string when none was given.
    #[serde(default)]
    pub notas: String,
    pub fecha: DateTime<Utc>,
}
