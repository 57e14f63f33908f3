use anyhow::{Context, Result};
use rusqlite::Connection;

pub(crate) struct Migration {
    version: &'static str,
    name: &'static str,
    sql: &'static str,
}

/// Each service owns its own database file, so each gets its own
/// migration list.
pub(crate) const PLANT_MIGRATIONS: &[Migration] = &[Migration {
    version: "001",
    name: "plantas_initial",
    sql: include_str!("migrations/plantas_001_initial.sql"),
}];

pub(crate) const CARE_MIGRATIONS: &[Migration] = &[Migration {
    version: "001",
    name: "cuidados_initial",
    sql: include_str!("migrations/cuidados_001_initial.sql"),
}];

pub(crate) fn run_migrations(conn: &Connection, migrations: &[Migration]) -> Result<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS schema_migrations (
            version TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            applied_at TEXT NOT NULL
        )",
    )
    .context("Failed to create schema_migrations table")?;

    let applied = applied_versions(conn)?;

    for migration in migrations {
        if !applied.contains(&migration.version.to_string()) {
            apply_migration(conn, migration)?;
        }
    }

    Ok(())
}

fn applied_versions(conn: &Connection) -> Result<Vec<String>> {
    let mut stmt = conn.prepare("SELECT version FROM schema_migrations ORDER BY version")?;
    let versions = stmt
        .query_map([], |row| row.get(0))?
        .collect::<Result<Vec<String>, _>>()?;
    Ok(versions)
}

fn apply_migration(conn: &Connection, migration: &Migration) -> Result<()> {
    tracing::info!(
        "Applying migration {}: {}",
        migration.version,
        migration.name
    );

    // Run migration in a transaction
    conn.execute_batch(&format!("BEGIN TRANSACTION; {} COMMIT;", migration.sql))
        .with_context(|| {
            format!(
                "Failed to apply migration {}: {}",
                migration.version, migration.name
            )
        })?;

    let now = chrono::Utc::now().to_rfc3339();
    conn.execute(
        "INSERT INTO schema_migrations (version, name, applied_at) VALUES (?, ?, ?)",
        (migration.version, migration.name, &now),
    )?;

    Ok(())
}
