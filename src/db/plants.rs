use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::Result;
use chrono::Utc;
use rusqlite::Connection;

use crate::models::{CreatePlantInput, Plant, UpdatePlantInput};

use super::schema;

/// Store for the plant registry service.
///
/// Inputs are validated at the API boundary before they reach this type;
/// the store assumes text fields are non-empty and the watering frequency
/// is positive (a CHECK constraint backs the latter up).
#[derive(Clone)]
pub struct PlantStore {
    conn: Arc<Mutex<Connection>>,
}

impl PlantStore {
    pub fn open(path: PathBuf) -> Result<Self> {
        Ok(Self {
            conn: super::open_connection(&path)?,
        })
    }

    pub fn open_default() -> Result<Self> {
        Self::open(super::default_db_path("plantas.db")?)
    }

    pub fn open_memory() -> Result<Self> {
        Ok(Self {
            conn: super::memory_connection()?,
        })
    }

    pub fn migrate(&self) -> Result<()> {
        let conn = self.conn.lock().expect("database lock poisoned");
        schema::run_migrations(&conn, schema::PLANT_MIGRATIONS)
    }

    pub fn create(&self, input: CreatePlantInput) -> Result<Plant> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let now = Utc::now();

        conn.execute(
            "INSERT INTO plantas (nombre, tipo, ubicacion, frecuencia_riego_dias, fecha_creacion, fecha_actualizacion)
             VALUES (?, ?, ?, ?, ?, ?)",
            (
                &input.nombre,
                &input.tipo,
                &input.ubicacion,
                input.frecuencia_riego_dias,
                now.to_rfc3339(),
                now.to_rfc3339(),
            ),
        )?;

        Ok(Plant {
            id: conn.last_insert_rowid(),
            nombre: input.nombre,
            tipo: input.tipo,
            ubicacion: input.ubicacion,
            frecuencia_riego_dias: input.frecuencia_riego_dias,
            fecha_creacion: now,
            fecha_actualizacion: now,
        })
    }

    pub fn get_all(&self) -> Result<Vec<Plant>> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let mut stmt = conn.prepare(
            "SELECT id, nombre, tipo, ubicacion, frecuencia_riego_dias, fecha_creacion, fecha_actualizacion
             FROM plantas ORDER BY id",
        )?;

        let plants = stmt
            .query_map([], row_to_plant)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(plants)
    }

    pub fn get(&self, id: i64) -> Result<Option<Plant>> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let mut stmt = conn.prepare(
            "SELECT id, nombre, tipo, ubicacion, frecuencia_riego_dias, fecha_creacion, fecha_actualizacion
             FROM plantas WHERE id = ?",
        )?;

        let mut rows = stmt.query([id])?;
        match rows.next()? {
            Some(row) => Ok(Some(row_to_plant(row)?)),
            None => Ok(None),
        }
    }

    /// Partial update over a fixed allow-list of columns.
    ///
    /// Only supplied fields are written; the statement is assembled from
    /// constant column fragments with every value bound as a parameter.
    /// Supplying at least one field also refreshes `fecha_actualizacion`;
    /// an input with no fields returns the record untouched.
    pub fn update(&self, id: i64, input: UpdatePlantInput) -> Result<Option<Plant>> {
        if self.get(id)?.is_none() {
            return Ok(None);
        }

        let mut sets: Vec<&str> = Vec::new();
        let mut params: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

        if let Some(nombre) = input.nombre {
            sets.push("nombre = ?");
            params.push(Box::new(nombre));
        }
        if let Some(tipo) = input.tipo {
            sets.push("tipo = ?");
            params.push(Box::new(tipo));
        }
        if let Some(ubicacion) = input.ubicacion {
            sets.push("ubicacion = ?");
            params.push(Box::new(ubicacion));
        }
        if let Some(frecuencia) = input.frecuencia_riego_dias {
            sets.push("frecuencia_riego_dias = ?");
            params.push(Box::new(frecuencia));
        }

        if sets.is_empty() {
            return self.get(id);
        }

        sets.push("fecha_actualizacion = ?");
        params.push(Box::new(Utc::now().to_rfc3339()));
        params.push(Box::new(id));

        {
            let conn = self.conn.lock().expect("database lock poisoned");
            let sql = format!("UPDATE plantas SET {} WHERE id = ?", sets.join(", "));
            let params_ref: Vec<&dyn rusqlite::ToSql> = params.iter().map(|p| p.as_ref()).collect();
            conn.execute(&sql, params_ref.as_slice())?;
        }

        self.get(id)
    }

    pub fn delete(&self, id: i64) -> Result<bool> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let rows = conn.execute("DELETE FROM plantas WHERE id = ?", [id])?;
        Ok(rows > 0)
    }

    pub fn exists(&self, id: i64) -> Result<bool> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let count: i32 = conn.query_row("SELECT COUNT(*) FROM plantas WHERE id = ?", [id], |row| {
            row.get(0)
        })?;
        Ok(count > 0)
    }
}

fn row_to_plant(row: &rusqlite::Row) -> rusqlite::Result<Plant> {
    Ok(Plant {
        id: row.get(0)?,
        nombre: row.get(1)?,
        tipo: row.get(2)?,
        ubicacion: row.get(3)?,
        frecuencia_riego_dias: row.get(4)?,
        fecha_creacion: super::parse_datetime(row.get::<_, String>(5)?),
        fecha_actualizacion: super::parse_datetime(row.get::<_, String>(6)?),
    })
}
