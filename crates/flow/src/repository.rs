// Archivo: repository.rs
// Propósito: contratos de persistencia. `FlowRepository` guarda las corridas
// y sus registros; `ArtifactStore` guarda blobs binarios (fotos de
// evidencia) y devuelve referencias opacas.
use crate::domain::{FlowData, FlowMeta, PersistResult, SnapshotMeta};
use crate::errors::Result;
use serde_json::Value as JsonValue;
use uuid::Uuid;

/// Contrato del repositorio de flows en el modelo basado en `FlowData`.
///
/// Cada registro se guarda inmediatamente y contiene lo necesario para
/// reconstruir el estado (snapshot + replay).
pub trait FlowRepository: Send + Sync {
    /// Obtiene los metadatos de un flow. `NotFound` si no existe.
    fn get_flow_meta(&self, flow_id: &Uuid) -> Result<FlowMeta>;

    /// Crea un flow nuevo y devuelve su id generado por el repositorio.
    fn create_flow(&self, name: Option<String>, status: Option<String>, metadata: JsonValue) -> Result<Uuid>;

    /// Persiste un registro. Devuelve `Conflict` si `expected_version` no
    /// coincide; si el `command_id` ya existe no duplica y devuelve la
    /// versión actual.
    fn persist_data(&self, data: &FlowData, expected_version: i64) -> Result<PersistResult>;

    /// Registros con `cursor > from_cursor`, ordenados por cursor.
    fn read_data(&self, flow_id: &Uuid, from_cursor: i64) -> Result<Vec<FlowData>>;

    /// Cuenta registros del flow; -1 si el flow no existe.
    fn count_steps(&self, flow_id: &Uuid) -> Result<i64>;

    /// Último snapshot (mayor cursor) del flow, si existe.
    fn load_latest_snapshot(&self, flow_id: &Uuid) -> Result<Option<SnapshotMeta>>;

    /// Guarda un snapshot del estado derivado en `cursor`.
    fn save_snapshot(&self, flow_id: &Uuid, cursor: i64, state: JsonValue) -> Result<Uuid>;

    fn get_flow_status(&self, flow_id: &Uuid) -> Result<Option<String>>;

    /// Actualiza el estado del flow y devuelve la metadata resultante.
    fn set_flow_status(&self, flow_id: &Uuid, new_status: Option<String>) -> Result<FlowMeta>;

    /// Ids de todos los flows conocidos, del más antiguo al más reciente.
    fn list_flow_ids(&self) -> Result<Vec<Uuid>>;

    /// Lee una clave de la metadata del flow (`Null` si no existe).
    fn get_meta(&self, flow_id: &Uuid, key: &str) -> Result<JsonValue> {
        let meta = self.get_flow_meta(flow_id)?;
        Ok(meta.metadata.get(key).cloned().unwrap_or(JsonValue::Null))
    }

    /// Escribe una clave en la metadata del flow.
    fn set_meta(&self, flow_id: &Uuid, key: &str, value: JsonValue) -> Result<()>;

    /// Elimina una clave de la metadata del flow.
    fn del_meta(&self, flow_id: &Uuid, key: &str) -> Result<()>;

    /// Borra el flow con sus registros y snapshots. `NotFound` si no existe.
    fn delete_flow(&self, flow_id: &Uuid) -> Result<()>;
}

/// Almacén de blobs binarios direccionado por referencias opacas.
pub trait ArtifactStore: Send + Sync {
    /// Guarda el blob y devuelve su clave.
    fn put(&self, blob: &[u8], media_type: &str) -> Result<String>;
    /// Recupera el blob y su media type. `NotFound` si la clave no existe.
    fn get(&self, key: &str) -> Result<(Vec<u8>, String)>;
    fn exists(&self, key: &str) -> Result<bool>;
}
