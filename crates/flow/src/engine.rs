// Archivo: engine.rs
// Propósito: `FlowEngine`, helpers ergonómicos sobre `FlowRepository` para
// anexar registros, tomar snapshots y rehidratar (snapshot + replay).
//
// El motor no conoce la lógica de negocio: quien lo envuelve decide cómo
// aplicar cada `FlowData` al estado derivado.
use crate::domain::{FlowData, FlowMeta, PersistResult, SnapshotMeta};
use crate::errors::{FlowError, Result};
use crate::repository::FlowRepository;
use chrono::Utc;
use serde_json::Value as JsonValue;
use std::sync::Arc;
use uuid::Uuid;

/// Configuración del motor.
#[derive(Debug, Clone)]
pub struct FlowEngineConfig {
    /// Reintentos de `append` ante `PersistResult::Conflict` releyendo la
    /// versión actual. 0 desactiva el reintento.
    pub conflict_retries: u32,
}

impl Default for FlowEngineConfig {
    fn default() -> Self {
        Self { conflict_retries: 2 }
    }
}

/// Resultado de una rehidratación: último snapshot (si hay) y los registros
/// posteriores a su cursor.
#[derive(Debug, Clone)]
pub struct Rehydration {
    pub meta: FlowMeta,
    pub snapshot: Option<SnapshotMeta>,
    pub replay: Vec<FlowData>,
}

pub struct FlowEngine<R>
    where R: FlowRepository + ?Sized
{
    repo: Arc<R>,
    config: FlowEngineConfig,
}

impl<R> FlowEngine<R> where R: FlowRepository + ?Sized
{
    pub fn new(repo: Arc<R>, config: FlowEngineConfig) -> Self {
        Self { repo, config }
    }

    /// Crea un flow delegando al repositorio.
    pub fn start_flow(&self, name: Option<String>, status: Option<String>, metadata: JsonValue) -> Result<Uuid> {
        self.repo.create_flow(name, status, metadata)
    }

    /// Crea y persiste un `FlowData` en el siguiente cursor.
    ///
    /// Si `expected_version` es `None` se usa la versión actual del flow y,
    /// ante conflicto, se reintenta hasta `conflict_retries` veces. Con una
    /// versión explícita el conflicto se devuelve tal cual al caller.
    pub fn append(&self,
                  flow_id: Uuid,
                  key: &str,
                  payload: JsonValue,
                  metadata: JsonValue,
                  command_id: Option<Uuid>,
                  expected_version: Option<i64>)
                  -> Result<PersistResult> {
        let mut attempts = 0;
        loop {
            let meta = self.repo.get_flow_meta(&flow_id)?;
            let data = FlowData { id: Uuid::new_v4(),
                                  flow_id,
                                  cursor: meta.current_cursor + 1,
                                  key: key.to_string(),
                                  payload: payload.clone(),
                                  metadata: metadata.clone(),
                                  command_id,
                                  created_at: Utc::now() };
            let version = expected_version.unwrap_or(meta.current_version);
            match self.repo.persist_data(&data, version)? {
                PersistResult::Conflict if expected_version.is_none() && attempts < self.config.conflict_retries => {
                    attempts += 1;
                }
                other => return Ok(other),
            }
        }
    }

    /// Igual que `append` pero convierte `Conflict` en `FlowError::Conflict`.
    pub fn append_or_fail(&self,
                          flow_id: Uuid,
                          key: &str,
                          payload: JsonValue,
                          metadata: JsonValue,
                          command_id: Option<Uuid>)
                          -> Result<i64> {
        match self.append(flow_id, key, payload, metadata, command_id, None)? {
            PersistResult::Ok { new_version } => Ok(new_version),
            PersistResult::Conflict => Err(FlowError::Conflict(format!("flow {} modificado concurrentemente", flow_id))),
        }
    }

    /// Guarda un snapshot del estado en el cursor actual del flow.
    pub fn save_snapshot(&self, flow_id: &Uuid, state: JsonValue) -> Result<Uuid> {
        let meta = self.repo.get_flow_meta(flow_id)?;
        self.repo.save_snapshot(flow_id, meta.current_cursor, state)
    }

    /// Carga el último snapshot y los registros posteriores a su cursor.
    pub fn rehydrate(&self, flow_id: &Uuid) -> Result<Rehydration> {
        let meta = self.repo.get_flow_meta(flow_id)?;
        let snapshot = self.repo.load_latest_snapshot(flow_id)?;
        let from = snapshot.as_ref().map(|s| s.cursor).unwrap_or(0);
        let replay = self.repo.read_data(flow_id, from)?;
        Ok(Rehydration { meta, snapshot, replay })
    }

    pub fn set_status(&self, flow_id: &Uuid, status: &str) -> Result<FlowMeta> {
        self.repo.set_flow_status(flow_id, Some(status.to_string()))
    }
}
