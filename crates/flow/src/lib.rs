//! Crate `flow`: persistencia basada en registros
//!
//! Define los tipos `FlowData`, `FlowMeta` y `SnapshotMeta`, el contrato
//! `FlowRepository`, el almacén de blobs `ArtifactStore` y sus
//! implementaciones en memoria, más el motor auxiliar `FlowEngine`.
//!
//! Diseño resumido:
//! - Cada `FlowData` es autocontenido; el estado se reconstruye con
//!   snapshot + replay.
//! - Idempotencia: un `command_id` repetido nunca duplica registros.
//! - Locking optimista: `expected_version` detecta escrituras concurrentes
//!   (`PersistResult::Conflict`).
//!
//! ```rust
//! use flow::stubs::InMemoryFlowRepository;
//! use flow::engine::FlowEngineConfig;
//! use std::sync::Arc;
//! let repo = Arc::new(InMemoryFlowRepository::new());
//! let engine = flow::FlowEngine::new(repo, FlowEngineConfig::default());
//! let id = engine.start_flow(Some("demo".into()), None, serde_json::json!({})).unwrap();
//! engine.append_or_fail(id, "crop_selected", serde_json::json!({"crop": "potato"}), serde_json::json!({}), None).unwrap();
//! assert_eq!(engine.rehydrate(&id).unwrap().replay.len(), 1);
//! ```
pub mod domain;
pub mod engine;
pub mod errors;
pub mod repository;
pub mod stubs;

pub use domain::*;
pub use engine::*;
pub use errors::*;
pub use repository::*;
pub use stubs::*;
