// Archivo: stubs.rs
// Propósito: implementaciones en memoria del repositorio de flows y del
// almacén de artefactos. No son durables; sirven para pruebas, para la CLI
// sin base de datos y como referencia del contrato.
use crate::domain::{FlowData, FlowMeta, PersistResult, SnapshotMeta};
use crate::errors::{FlowError, Result};
use crate::repository::{ArtifactStore, FlowRepository};
use chrono::Utc;
use serde_json::Value as JsonValue;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use uuid::Uuid;

/// Mapea `Mutex::lock()` a `FlowError::Storage`.
fn lock<T>(m: &Mutex<T>) -> Result<MutexGuard<'_, T>> {
    m.lock().map_err(|e| FlowError::Storage(format!("mutex poisoned: {:?}", e)))
}

pub struct InMemoryFlowRepository {
    /// Metadatos de flows indexados por `flow_id`.
    flows: Mutex<HashMap<Uuid, FlowMeta>>,
    /// Orden de creación, para `list_flow_ids`.
    order: Mutex<Vec<Uuid>>,
    /// Registros de FlowData por flow.
    steps: Mutex<HashMap<Uuid, Vec<FlowData>>>,
    snapshots: Mutex<Vec<SnapshotMeta>>,
}

impl InMemoryFlowRepository {
    pub fn new() -> Self {
        Self { flows: Mutex::new(HashMap::new()),
               order: Mutex::new(Vec::new()),
               steps: Mutex::new(HashMap::new()),
               snapshots: Mutex::new(Vec::new()) }
    }

    fn update_meta<F>(&self, flow_id: &Uuid, f: F) -> Result<FlowMeta>
        where F: FnOnce(&mut FlowMeta)
    {
        let mut flows = lock(&self.flows)?;
        let meta = flows.get_mut(flow_id)
                        .ok_or_else(|| FlowError::NotFound(format!("flow {}", flow_id)))?;
        f(meta);
        Ok(meta.clone())
    }
}

impl Default for InMemoryFlowRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl FlowRepository for InMemoryFlowRepository {
    fn get_flow_meta(&self, flow_id: &Uuid) -> Result<FlowMeta> {
        let flows = lock(&self.flows)?;
        flows.get(flow_id)
             .cloned()
             .ok_or_else(|| FlowError::NotFound(format!("flow {}", flow_id)))
    }

    fn create_flow(&self, name: Option<String>, status: Option<String>, metadata: JsonValue) -> Result<Uuid> {
        let id = Uuid::new_v4();
        let meta = FlowMeta { id,
                              name,
                              status,
                              created_at: Utc::now(),
                              current_cursor: 0,
                              current_version: 0,
                              metadata };
        lock(&self.flows)?.insert(id, meta);
        lock(&self.order)?.push(id);
        Ok(id)
    }

    /// Aplica control optimista por `expected_version` y deduplicación por
    /// `command_id` antes de anexar el registro.
    fn persist_data(&self, data: &FlowData, expected_version: i64) -> Result<PersistResult> {
        let mut flows = lock(&self.flows)?;
        let mut steps = lock(&self.steps)?;
        let flow_meta = flows.get_mut(&data.flow_id)
                             .ok_or_else(|| FlowError::NotFound(format!("flow {}", data.flow_id)))?;

        // Un command_id repetido nunca duplica, aunque la versión haya avanzado.
        if let Some(cmd_id) = data.command_id {
            let seen = steps.get(&data.flow_id)
                            .map(|list| list.iter().any(|d| d.command_id == Some(cmd_id)))
                            .unwrap_or(false);
            if seen {
                return Ok(PersistResult::Ok { new_version: flow_meta.current_version });
            }
        }

        if flow_meta.current_version != expected_version {
            return Ok(PersistResult::Conflict);
        }
        if data.cursor <= flow_meta.current_cursor {
            return Err(FlowError::Conflict(format!("cursor {} no es mayor que el actual {}",
                                                   data.cursor, flow_meta.current_cursor)));
        }

        steps.entry(data.flow_id).or_default().push(data.clone());
        flow_meta.current_version = flow_meta.current_version.saturating_add(1);
        flow_meta.current_cursor = data.cursor;
        Ok(PersistResult::Ok { new_version: flow_meta.current_version })
    }

    fn read_data(&self, flow_id: &Uuid, from_cursor: i64) -> Result<Vec<FlowData>> {
        let steps = lock(&self.steps)?;
        let mut items: Vec<FlowData> = steps.get(flow_id)
                                            .map(|list| list.iter().filter(|d| d.cursor > from_cursor).cloned().collect())
                                            .unwrap_or_default();
        items.sort_by_key(|d| d.cursor);
        Ok(items)
    }

    fn count_steps(&self, flow_id: &Uuid) -> Result<i64> {
        if !lock(&self.flows)?.contains_key(flow_id) {
            return Ok(-1);
        }
        let steps = lock(&self.steps)?;
        Ok(steps.get(flow_id).map(|v| v.len() as i64).unwrap_or(0))
    }

    fn load_latest_snapshot(&self, flow_id: &Uuid) -> Result<Option<SnapshotMeta>> {
        let snaps = lock(&self.snapshots)?;
        // Con cursores iguales gana el más reciente (último insertado).
        Ok(snaps.iter()
                .filter(|s| &s.flow_id == flow_id)
                .fold(None, |best: Option<&SnapshotMeta>, s| match best {
                    Some(b) if b.cursor > s.cursor => Some(b),
                    _ => Some(s),
                })
                .cloned())
    }

    fn save_snapshot(&self, flow_id: &Uuid, cursor: i64, state: JsonValue) -> Result<Uuid> {
        if !lock(&self.flows)?.contains_key(flow_id) {
            return Err(FlowError::NotFound(format!("flow {}", flow_id)));
        }
        let id = Uuid::new_v4();
        lock(&self.snapshots)?.push(SnapshotMeta { id,
                                                   flow_id: *flow_id,
                                                   cursor,
                                                   state,
                                                   created_at: Utc::now() });
        Ok(id)
    }

    fn get_flow_status(&self, flow_id: &Uuid) -> Result<Option<String>> {
        Ok(self.get_flow_meta(flow_id)?.status)
    }

    fn set_flow_status(&self, flow_id: &Uuid, new_status: Option<String>) -> Result<FlowMeta> {
        self.update_meta(flow_id, |m| m.status = new_status)
    }

    fn list_flow_ids(&self) -> Result<Vec<Uuid>> {
        Ok(lock(&self.order)?.clone())
    }

    fn set_meta(&self, flow_id: &Uuid, key: &str, value: JsonValue) -> Result<()> {
        self.update_meta(flow_id, |m| {
                if !m.metadata.is_object() {
                    m.metadata = JsonValue::Object(Default::default());
                }
                if let Some(obj) = m.metadata.as_object_mut() {
                    obj.insert(key.to_string(), value);
                }
            })
            .map(|_| ())
    }

    fn del_meta(&self, flow_id: &Uuid, key: &str) -> Result<()> {
        self.update_meta(flow_id, |m| {
                if let Some(obj) = m.metadata.as_object_mut() {
                    obj.remove(key);
                }
            })
            .map(|_| ())
    }

    fn delete_flow(&self, flow_id: &Uuid) -> Result<()> {
        let mut flows = lock(&self.flows)?;
        if flows.remove(flow_id).is_none() {
            return Err(FlowError::NotFound(format!("flow {}", flow_id)));
        }
        lock(&self.order)?.retain(|id| id != flow_id);
        lock(&self.steps)?.remove(flow_id);
        lock(&self.snapshots)?.retain(|s| &s.flow_id != flow_id);
        Ok(())
    }
}

/// Almacén de artefactos en memoria direccionado por contenido (blake3).
///
/// Guardar dos veces el mismo blob devuelve la misma clave.
#[derive(Default)]
pub struct InMemoryArtifactStore {
    blobs: Mutex<HashMap<String, (Vec<u8>, String)>>,
}

impl InMemoryArtifactStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.blobs.lock().map(|b| b.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Clave de artefacto: `blake3:<hex>` del contenido.
pub fn artifact_key(blob: &[u8]) -> String {
    format!("blake3:{}", blake3::hash(blob).to_hex())
}

impl ArtifactStore for InMemoryArtifactStore {
    fn put(&self, blob: &[u8], media_type: &str) -> Result<String> {
        let key = artifact_key(blob);
        lock(&self.blobs)?.entry(key.clone())
                          .or_insert_with(|| (blob.to_vec(), media_type.to_string()));
        Ok(key)
    }

    fn get(&self, key: &str) -> Result<(Vec<u8>, String)> {
        lock(&self.blobs)?.get(key)
                          .cloned()
                          .ok_or_else(|| FlowError::NotFound(format!("artifact {}", key)))
    }

    fn exists(&self, key: &str) -> Result<bool> {
        Ok(lock(&self.blobs)?.contains_key(key))
    }
}
