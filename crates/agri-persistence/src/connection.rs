// Archivo: connection.rs
// Propósito: pool r2d2 de conexiones SQLite compartido por los repositorios
// Diesel, con PRAGMAs y migraciones embebidas aplicadas al crearlo.
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool, PooledConnection};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("./migrations");

pub(crate) type DbPool = Pool<ConnectionManager<SqliteConnection>>;
pub(crate) type DbConn = PooledConnection<ConnectionManager<SqliteConnection>>;

/// Crea el pool y deja el esquema al día. El error se devuelve como texto
/// para que cada repositorio lo envuelva en su propio tipo de error.
pub(crate) fn build_pool(database_url: &str) -> Result<DbPool, String> {
    let manager = ConnectionManager::<SqliteConnection>::new(database_url);
    let pool = Pool::builder().max_size(4)
                              .build(manager)
                              .map_err(|e| format!("no se pudo crear el pool de conexiones: {}", e))?;
    let mut conn = pool.get().map_err(|e| format!("pool: {}", e))?;
    for pragma in ["PRAGMA journal_mode = WAL;", "PRAGMA busy_timeout = 5000;", "PRAGMA foreign_keys = ON;"] {
        if let Err(e) = diesel::sql_query(pragma).execute(&mut conn) {
            log::warn!("sqlite: {} falló: {}", pragma, e);
        }
    }
    let applied = conn.run_pending_migrations(MIGRATIONS)
                      .map_err(|e| format!("migraciones: {}", e))?;
    if !applied.is_empty() {
        log::info!("sqlite: {} migración(es) aplicadas en {}", applied.len(), database_url);
    }
    Ok(pool)
}

/// Lee la URL de la base desde el entorno (`AGRI_DB_URL`, luego
/// `DATABASE_URL`). Carga `.env` si existe.
pub fn database_url_from_env() -> Option<String> {
    dotenvy::dotenv().ok();
    std::env::var("AGRI_DB_URL").or_else(|_| std::env::var("DATABASE_URL")).ok()
}

pub(crate) fn to_micros(ts: DateTime<Utc>) -> i64 {
    ts.timestamp_micros()
}

pub(crate) fn from_micros(us: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(us.div_euclid(1_000_000), (us.rem_euclid(1_000_000) * 1_000) as u32).unwrap_or_default()
}
