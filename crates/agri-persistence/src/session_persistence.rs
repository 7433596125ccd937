// Archivo: session_persistence.rs
// Propósito: `DieselSessionStore`, caché de identidad de la sesión sobre la
// tabla `session_entries`. Sobrevive a reinicios del proceso.
use crate::connection::{build_pool, database_url_from_env, to_micros, DbConn, DbPool};
use crate::schema;
use crate::schema::session_entries::dsl as se_dsl;
use agri_domain::{DomainError, SessionStore};
use chrono::Utc;
use diesel::prelude::*;
use diesel::result::Error as DieselError;
use std::sync::Arc;

#[derive(Debug, Queryable, Insertable)]
#[diesel(table_name = schema::session_entries)]
struct SessionEntryRow {
  pub key: String,
  pub value: String,
  pub updated_at_us: i64,
}

fn map_db_err<T>(res: std::result::Result<T, DieselError>) -> Result<T, DomainError> {
  res.map_err(|e| DomainError::StorageError(format!("db: {}", e)))
}

pub struct DieselSessionStore {
  pool: Arc<DbPool>,
}

impl DieselSessionStore {
  pub fn new(database_url: &str) -> Result<Self, DomainError> {
    let pool = build_pool(database_url).map_err(DomainError::StorageError)?;
    Ok(Self { pool: Arc::new(pool) })
  }

  fn conn(&self) -> Result<DbConn, DomainError> {
    self.pool.get().map_err(|e| DomainError::StorageError(format!("pool: {}", e)))
  }
}

pub fn new_session_store_from_env() -> Result<DieselSessionStore, DomainError> {
  let url = database_url_from_env().ok_or_else(|| DomainError::StorageError("AGRI_DB_URL / DATABASE_URL no definido".into()))?;
  DieselSessionStore::new(&url)
}

impl SessionStore for DieselSessionStore {
  fn get(&self, key: &str) -> Result<Option<String>, DomainError> {
    let mut conn = self.conn()?;
    map_db_err(se_dsl::session_entries.filter(se_dsl::key.eq(key))
                                      .select(se_dsl::value)
                                      .first::<String>(&mut conn)
                                      .optional())
  }

  fn set(&self, key: &str, value: &str) -> Result<(), DomainError> {
    let mut conn = self.conn()?;
    let row = SessionEntryRow { key: key.to_string(),
                                value: value.to_string(),
                                updated_at_us: to_micros(Utc::now()) };
    map_db_err(diesel::replace_into(se_dsl::session_entries).values(&row).execute(&mut conn))?;
    Ok(())
  }

  fn remove(&self, key: &str) -> Result<(), DomainError> {
    let mut conn = self.conn()?;
    map_db_err(diesel::delete(se_dsl::session_entries.filter(se_dsl::key.eq(key))).execute(&mut conn))?;
    Ok(())
  }
}
