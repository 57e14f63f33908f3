//! SQLite-backed stores, one per service.
//!
//! [`PlantStore`] and [`CareStore`] each own an independent database file
//! with a single table. Stores are constructed explicitly and injected
//! into the routers at startup, so tests can swap in `open_memory()`.

mod care;
mod plants;
mod schema;

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use anyhow::Result;
use chrono::{DateTime, Utc};
use rusqlite::Connection;

pub use care::CareStore;
pub use plants::PlantStore;

fn open_connection(path: &Path) -> Result<Arc<Mutex<Connection>>> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let conn = Connection::open(path)?;
    conn.pragma_update(None, "journal_mode", "WAL")?;
    Ok(Arc::new(Mutex::new(conn)))
}

fn memory_connection() -> Result<Arc<Mutex<Connection>>> {
    let conn = Connection::open_in_memory()?;
    Ok(Arc::new(Mutex::new(conn)))
}

fn default_db_path(file_name: &str) -> Result<PathBuf> {
    let dirs = directories::ProjectDirs::from("", "", "plantcare")
        .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
    Ok(dirs.data_dir().join(file_name))
}

fn parse_datetime(s: String) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(&s)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|_| Utc::now())
}
