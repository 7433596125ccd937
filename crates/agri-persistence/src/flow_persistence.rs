// Archivo: flow_persistence.rs
// Propósito: `DieselFlowRepository`, implementación SQLite de
// `FlowRepository`. Cada corrida de capacitación es una fila en `flows` y
// cada paso completado un registro en `flow_data`.
use crate::connection::{build_pool, database_url_from_env, from_micros, to_micros, DbConn, DbPool};
use crate::schema;
use crate::schema::flow_data::dsl as fd_dsl;
use crate::schema::flows::dsl as flows_dsl;
use crate::schema::snapshots::dsl as snap_dsl;
use chrono::Utc;
use diesel::prelude::*;
use diesel::result::Error as DieselError;
use flow::{FlowData, FlowError, FlowMeta, FlowRepository, PersistResult, Result, SnapshotMeta};
use serde_json::Value as JsonValue;
use std::sync::Arc;
use uuid::Uuid;

#[derive(Debug, Queryable, Insertable)]
#[diesel(table_name = schema::flows)]
struct FlowRow {
    pub id: String,
    pub name: Option<String>,
    pub status: Option<String>,
    pub created_at_us: i64,
    pub current_cursor: i64,
    pub current_version: i64,
    pub metadata: String,
}

#[derive(Debug, Queryable, Insertable)]
#[diesel(table_name = schema::flow_data)]
struct FlowDataRow {
    pub id: String,
    pub flow_id: String,
    pub cursor: i64,
    pub key: String,
    pub payload: String,
    pub metadata: String,
    pub command_id: Option<String>,
    pub created_at_us: i64,
}

#[derive(Debug, Queryable, Insertable)]
#[diesel(table_name = schema::snapshots)]
struct SnapshotRow {
    pub id: String,
    pub flow_id: String,
    pub cursor: i64,
    pub state: String,
    pub created_at_us: i64,
}

fn map_db_err<T>(res: std::result::Result<T, DieselError>) -> Result<T> {
    res.map_err(|e| FlowError::Storage(format!("db: {}", e)))
}

fn parse_uuid(s: &str) -> Result<Uuid> {
    Uuid::parse_str(s).map_err(|e| FlowError::Storage(format!("uuid inválido '{}': {}", s, e)))
}

impl FlowRow {
    fn into_meta(self) -> Result<FlowMeta> {
        Ok(FlowMeta { id: parse_uuid(&self.id)?,
                      name: self.name,
                      status: self.status,
                      created_at: from_micros(self.created_at_us),
                      current_cursor: self.current_cursor,
                      current_version: self.current_version,
                      metadata: serde_json::from_str(&self.metadata)? })
    }
}

impl FlowDataRow {
    fn from_data(d: &FlowData) -> Result<Self> {
        Ok(Self { id: d.id.to_string(),
                  flow_id: d.flow_id.to_string(),
                  cursor: d.cursor,
                  key: d.key.clone(),
                  payload: serde_json::to_string(&d.payload)?,
                  metadata: serde_json::to_string(&d.metadata)?,
                  command_id: d.command_id.map(|c| c.to_string()),
                  created_at_us: to_micros(d.created_at) })
    }

    fn into_data(self) -> Result<FlowData> {
        Ok(FlowData { id: parse_uuid(&self.id)?,
                      flow_id: parse_uuid(&self.flow_id)?,
                      cursor: self.cursor,
                      key: self.key,
                      payload: serde_json::from_str(&self.payload)?,
                      metadata: serde_json::from_str(&self.metadata)?,
                      command_id: self.command_id.as_deref().map(parse_uuid).transpose()?,
                      created_at: from_micros(self.created_at_us) })
    }
}

/// Repositorio Diesel (SQLite) que implementa `FlowRepository`.
pub struct DieselFlowRepository {
    pool: Arc<DbPool>,
}

impl DieselFlowRepository {
    /// Abre (o crea) la base en `database_url` y aplica las migraciones.
    pub fn new(database_url: &str) -> Result<Self> {
        let pool = build_pool(database_url).map_err(FlowError::Storage)?;
        Ok(Self { pool: Arc::new(pool) })
    }

    fn conn(&self) -> Result<DbConn> {
        self.pool.get().map_err(|e| FlowError::Storage(format!("pool: {}", e)))
    }

    fn load_row(conn: &mut SqliteConnection, flow_id: &Uuid) -> Result<FlowRow> {
        map_db_err(flows_dsl::flows.filter(flows_dsl::id.eq(flow_id.to_string()))
                                   .first::<FlowRow>(conn)
                                   .optional())?
            .ok_or_else(|| FlowError::NotFound(format!("flow {}", flow_id)))
    }

    fn write_metadata(&self, flow_id: &Uuid, f: impl FnOnce(&mut serde_json::Map<String, JsonValue>)) -> Result<()> {
        let mut conn = self.conn()?;
        let row = Self::load_row(&mut conn, flow_id)?;
        let mut metadata: JsonValue = serde_json::from_str(&row.metadata)?;
        if !metadata.is_object() {
            metadata = JsonValue::Object(Default::default());
        }
        if let Some(obj) = metadata.as_object_mut() {
            f(obj);
        }
        map_db_err(diesel::update(flows_dsl::flows.filter(flows_dsl::id.eq(flow_id.to_string())))
                       .set(flows_dsl::metadata.eq(serde_json::to_string(&metadata)?))
                       .execute(&mut conn))?;
        Ok(())
    }
}

/// Construye el repositorio desde `AGRI_DB_URL` / `DATABASE_URL`.
pub fn new_from_env() -> Result<DieselFlowRepository> {
    let url = database_url_from_env().ok_or_else(|| FlowError::Storage("AGRI_DB_URL / DATABASE_URL no definido".into()))?;
    DieselFlowRepository::new(&url)
}

impl FlowRepository for DieselFlowRepository {
    fn get_flow_meta(&self, flow_id: &Uuid) -> Result<FlowMeta> {
        let mut conn = self.conn()?;
        Self::load_row(&mut conn, flow_id)?.into_meta()
    }

    fn create_flow(&self, name: Option<String>, status: Option<String>, metadata: JsonValue) -> Result<Uuid> {
        let mut conn = self.conn()?;
        let id = Uuid::new_v4();
        let row = FlowRow { id: id.to_string(),
                            name,
                            status,
                            created_at_us: to_micros(Utc::now()),
                            current_cursor: 0,
                            current_version: 0,
                            metadata: serde_json::to_string(&metadata)? };
        map_db_err(diesel::insert_into(flows_dsl::flows).values(&row).execute(&mut conn))?;
        Ok(id)
    }

    /// Todo ocurre en una transacción: verificación de command_id, versión y
    /// cursor, inserción del registro y avance de la fila `flows`.
    fn persist_data(&self, data: &FlowData, expected_version: i64) -> Result<PersistResult> {
        let mut pooled = self.conn()?;
        let conn: &mut SqliteConnection = &mut pooled;
        let row = FlowDataRow::from_data(data)?;
        let flow_key = data.flow_id.to_string();
        let outcome = conn.transaction::<Result<PersistResult>, DieselError, _>(|conn| {
                              let current = flows_dsl::flows.filter(flows_dsl::id.eq(&flow_key))
                                                            .first::<FlowRow>(conn)
                                                            .optional()?;
                              let current = match current {
                                  Some(c) => c,
                                  None => return Ok(Err(FlowError::NotFound(format!("flow {}", flow_key)))),
                              };
                              if let Some(cmd) = &row.command_id {
                                  let seen: i64 = fd_dsl::flow_data.filter(fd_dsl::flow_id.eq(&flow_key))
                                                                   .filter(fd_dsl::command_id.eq(cmd))
                                                                   .count()
                                                                   .get_result(conn)?;
                                  if seen > 0 {
                                      return Ok(Ok(PersistResult::Ok { new_version: current.current_version }));
                                  }
                              }
                              if current.current_version != expected_version {
                                  return Ok(Ok(PersistResult::Conflict));
                              }
                              if row.cursor <= current.current_cursor {
                                  return Ok(Err(FlowError::Conflict(format!("cursor {} no es mayor que el actual {}",
                                                                            row.cursor, current.current_cursor))));
                              }
                              diesel::insert_into(fd_dsl::flow_data).values(&row).execute(conn)?;
                              let new_version = current.current_version + 1;
                              diesel::update(flows_dsl::flows.filter(flows_dsl::id.eq(&flow_key)))
                                  .set((flows_dsl::current_version.eq(new_version), flows_dsl::current_cursor.eq(row.cursor)))
                                  .execute(conn)?;
                              Ok(Ok(PersistResult::Ok { new_version }))
                          });
        map_db_err(outcome)?
    }

    fn read_data(&self, flow_id: &Uuid, from_cursor: i64) -> Result<Vec<FlowData>> {
        let mut conn = self.conn()?;
        let rows = map_db_err(fd_dsl::flow_data.filter(fd_dsl::flow_id.eq(flow_id.to_string()))
                                               .filter(fd_dsl::cursor.gt(from_cursor))
                                               .order(fd_dsl::cursor.asc())
                                               .load::<FlowDataRow>(&mut conn))?;
        rows.into_iter().map(FlowDataRow::into_data).collect()
    }

    fn count_steps(&self, flow_id: &Uuid) -> Result<i64> {
        let mut conn = self.conn()?;
        let key = flow_id.to_string();
        let exists: i64 = map_db_err(flows_dsl::flows.filter(flows_dsl::id.eq(&key)).count().get_result(&mut conn))?;
        if exists == 0 {
            return Ok(-1);
        }
        map_db_err(fd_dsl::flow_data.filter(fd_dsl::flow_id.eq(&key)).count().get_result(&mut conn))
    }

    fn load_latest_snapshot(&self, flow_id: &Uuid) -> Result<Option<SnapshotMeta>> {
        let mut conn = self.conn()?;
        let row = map_db_err(snap_dsl::snapshots.filter(snap_dsl::flow_id.eq(flow_id.to_string()))
                                                .order((snap_dsl::cursor.desc(), snap_dsl::created_at_us.desc()))
                                                .first::<SnapshotRow>(&mut conn)
                                                .optional())?;
        match row {
            Some(r) => Ok(Some(SnapshotMeta { id: parse_uuid(&r.id)?,
                                              flow_id: parse_uuid(&r.flow_id)?,
                                              cursor: r.cursor,
                                              state: serde_json::from_str(&r.state)?,
                                              created_at: from_micros(r.created_at_us) })),
            None => Ok(None),
        }
    }

    fn save_snapshot(&self, flow_id: &Uuid, cursor: i64, state: JsonValue) -> Result<Uuid> {
        let mut conn = self.conn()?;
        Self::load_row(&mut conn, flow_id)?;
        let id = Uuid::new_v4();
        let row = SnapshotRow { id: id.to_string(),
                                flow_id: flow_id.to_string(),
                                cursor,
                                state: serde_json::to_string(&state)?,
                                created_at_us: to_micros(Utc::now()) };
        map_db_err(diesel::insert_into(snap_dsl::snapshots).values(&row).execute(&mut conn))?;
        Ok(id)
    }

    fn get_flow_status(&self, flow_id: &Uuid) -> Result<Option<String>> {
        Ok(self.get_flow_meta(flow_id)?.status)
    }

    fn set_flow_status(&self, flow_id: &Uuid, new_status: Option<String>) -> Result<FlowMeta> {
        let mut conn = self.conn()?;
        let updated = map_db_err(diesel::update(flows_dsl::flows.filter(flows_dsl::id.eq(flow_id.to_string())))
                                     .set(flows_dsl::status.eq(new_status))
                                     .execute(&mut conn))?;
        if updated == 0 {
            return Err(FlowError::NotFound(format!("flow {}", flow_id)));
        }
        Self::load_row(&mut conn, flow_id)?.into_meta()
    }

    fn list_flow_ids(&self) -> Result<Vec<Uuid>> {
        let mut conn = self.conn()?;
        let ids = map_db_err(flows_dsl::flows.select(flows_dsl::id)
                                             .order(flows_dsl::created_at_us.asc())
                                             .load::<String>(&mut conn))?;
        ids.iter().map(|s| parse_uuid(s)).collect()
    }

    fn set_meta(&self, flow_id: &Uuid, key: &str, value: JsonValue) -> Result<()> {
        self.write_metadata(flow_id, |obj| {
                obj.insert(key.to_string(), value);
            })
    }

    fn del_meta(&self, flow_id: &Uuid, key: &str) -> Result<()> {
        self.write_metadata(flow_id, |obj| {
                obj.remove(key);
            })
    }

    fn delete_flow(&self, flow_id: &Uuid) -> Result<()> {
        let mut conn = self.conn()?;
        let flow_key = flow_id.to_string();
        let removed = map_db_err(conn.transaction::<usize, DieselError, _>(|conn| {
                                     diesel::delete(snap_dsl::snapshots.filter(snap_dsl::flow_id.eq(&flow_key))).execute(conn)?;
                                     diesel::delete(fd_dsl::flow_data.filter(fd_dsl::flow_id.eq(&flow_key))).execute(conn)?;
                                     diesel::delete(flows_dsl::flows.filter(flows_dsl::id.eq(&flow_key))).execute(conn)
                                 }))?;
        if removed == 0 {
            return Err(FlowError::NotFound(format!("flow {}", flow_id)));
        }
        Ok(())
    }
}
