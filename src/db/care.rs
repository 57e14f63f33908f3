use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::Result;
use chrono::Utc;
use rusqlite::Connection;

use crate::models::{CareDetail, CareEvent};

use super::schema;

/// Store for the care log service.
///
/// The log is append-mostly: events are recorded once, never mutated, and
/// only removed by explicit delete. `planta_id` is stored as given; this
/// service never checks it against the plant registry.
#[derive(Clone)]
pub struct CareStore {
    conn: Arc<Mutex<Connection>>,
}

impl CareStore {
    pub fn open(path: PathBuf) -> Result<Self> {
        Ok(Self {
            conn: super::open_connection(&path)?,
        })
    }

    pub fn open_default() -> Result<Self> {
        Self::open(super::default_db_path("cuidados.db")?)
    }

    pub fn open_memory() -> Result<Self> {
        Ok(Self {
            conn: super::memory_connection()?,
        })
    }

    pub fn migrate(&self) -> Result<()> {
        let conn = self.conn.lock().expect("database lock poisoned");
        schema::run_migrations(&conn, schema::CARE_MIGRATIONS)
    }

    pub fn record_watering(
        &self,
        planta_id: i64,
        cantidad_ml: f64,
        notas: String,
    ) -> Result<CareEvent> {
        self.insert(planta_id, CareDetail::Riego { cantidad_ml }, notas)
    }

    pub fn record_fertilizing(
        &self,
        planta_id: i64,
        tipo_fertilizante: String,
        cantidad: String,
        notas: String,
    ) -> Result<CareEvent> {
        self.insert(
            planta_id,
            CareDetail::Fertilizacion {
                tipo_fertilizante,
                cantidad,
            },
            notas,
        )
    }

    pub fn record_general(
        &self,
        planta_id: i64,
        descripcion: String,
        notas: String,
    ) -> Result<CareEvent> {
        self.insert(planta_id, CareDetail::General { descripcion }, notas)
    }

    /// Serializes the tagged detail into the sparse wide row: columns
    /// irrelevant to the kind stay NULL.
    fn insert(&self, planta_id: i64, detail: CareDetail, notas: String) -> Result<CareEvent> {
        let (cantidad_ml, tipo_fertilizante, cantidad, descripcion) = match &detail {
            CareDetail::Riego { cantidad_ml } => (Some(*cantidad_ml), None, None, None),
            CareDetail::Fertilizacion {
                tipo_fertilizante,
                cantidad,
            } => (
                None,
                Some(tipo_fertilizante.as_str()),
                Some(cantidad.as_str()),
                None,
            ),
            CareDetail::General { descripcion } => (None, None, None, Some(descripcion.as_str())),
        };

        let conn = self.conn.lock().expect("database lock poisoned");
        let now = Utc::now();

        conn.execute(
            "INSERT INTO cuidados (planta_id, tipo, cantidad_ml, tipo_fertilizante, cantidad, descripcion, notas, fecha)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
            (
                planta_id,
                detail.kind(),
                cantidad_ml,
                tipo_fertilizante,
                cantidad,
                descripcion,
                &notas,
                now.to_rfc3339(),
            ),
        )?;

        Ok(CareEvent {
            id: conn.last_insert_rowid(),
            planta_id,
            detail,
            notas,
            fecha: now,
        })
    }

    pub fn get_all(&self) -> Result<Vec<CareEvent>> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let mut stmt = conn.prepare(
            "SELECT id, planta_id, tipo, cantidad_ml, tipo_fertilizante, cantidad, descripcion, notas, fecha
             FROM cuidados ORDER BY id",
        )?;

        let events = stmt
            .query_map([], row_to_event)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(events)
    }

    pub fn get(&self, id: i64) -> Result<Option<CareEvent>> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let mut stmt = conn.prepare(
            "SELECT id, planta_id, tipo, cantidad_ml, tipo_fertilizante, cantidad, descripcion, notas, fecha
             FROM cuidados WHERE id = ?",
        )?;

        let mut rows = stmt.query([id])?;
        match rows.next()? {
            Some(row) => Ok(Some(row_to_event(row)?)),
            None => Ok(None),
        }
    }

    pub fn get_by_plant(&self, planta_id: i64) -> Result<Vec<CareEvent>> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let mut stmt = conn.prepare(
            "SELECT id, planta_id, tipo, cantidad_ml, tipo_fertilizante, cantidad, descripcion, notas, fecha
             FROM cuidados WHERE planta_id = ? ORDER BY id",
        )?;

        let events = stmt
            .query_map([planta_id], row_to_event)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(events)
    }

    pub fn delete(&self, id: i64) -> Result<bool> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let rows = conn.execute("DELETE FROM cuidados WHERE id = ?", [id])?;
        Ok(rows > 0)
    }
}

fn row_to_event(row: &rusqlite::Row) -> rusqlite::Result<CareEvent> {
    let kind: String = row.get(2)?;
    let detail = match kind.as_str() {
        "riego" => CareDetail::Riego {
            cantidad_ml: row.get(3)?,
        },
        "fertilizacion" => CareDetail::Fertilizacion {
            tipo_fertilizante: row.get(4)?,
            cantidad: row.get(5)?,
        },
        "general" => CareDetail::General {
            descripcion: row.get(6)?,
        },
        other => {
            return Err(rusqlite::Error::FromSqlConversionFailure(
                2,
                rusqlite::types::Type::Text,
                format!("unknown care event kind: {other}").into(),
            ))
        }
    };

    Ok(CareEvent {
        id: row.get(0)?,
        planta_id: row.get(1)?,
        detail,
        notas: row.get(7)?,
        fecha: super::parse_datetime(row.get::<_, String>(8)?),
    })
}
