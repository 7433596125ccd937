// Archivo: domain.rs
// Propósito: tipos de dominio del modelo de persistencia por registros.
// Un "flow" es una corrida de trabajo (por ejemplo, una capacitación de
// cultivo) y cada `FlowData` es un registro autocontenido de esa corrida.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use uuid::Uuid;

/// Registro de datos de un flow. El `cursor` es estrictamente creciente
/// dentro del flow y el `command_id` (si existe) lo hace idempotente.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowData {
    pub id: Uuid,
    pub flow_id: Uuid,
    pub cursor: i64,
    pub key: String,
    pub payload: JsonValue,
    pub metadata: JsonValue,
    pub command_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

/// Metadatos ligeros de un flow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowMeta {
    pub id: Uuid,
    pub name: Option<String>,
    pub status: Option<String>,
    pub created_at: DateTime<Utc>,
    /// Cursor del último registro persistido (0 si no hay registros).
    pub current_cursor: i64,
    /// Versión para locking optimista; se incrementa con cada registro.
    pub current_version: i64,
    pub metadata: JsonValue,
}

/// Snapshot del estado derivado de un flow en un cursor dado.
///
/// El estado se guarda como JSON para poder rehidratar sin reproducir
/// todos los registros anteriores a `cursor`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotMeta {
    pub id: Uuid,
    pub flow_id: Uuid,
    pub cursor: i64,
    pub state: JsonValue,
    pub created_at: DateTime<Utc>,
}

/// Resultado de una escritura con control optimista de versión.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersistResult {
    Ok { new_version: i64 },
    Conflict,
}
