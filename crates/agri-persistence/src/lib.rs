//! Persistencia SQLite (Diesel) para las corridas de capacitación y la caché
//! de identidad de la sesión. Expone `DieselFlowRepository`, que implementa
//! `flow::FlowRepository`, y `DieselSessionStore`, que implementa
//! `agri_domain::SessionStore`. Ambos comparten el esquema de `schema.rs` y
//! las migraciones embebidas.

mod connection;
mod flow_persistence;
mod session_persistence;
pub mod schema;

pub use connection::{database_url_from_env, MIGRATIONS};
pub use flow_persistence::{new_from_env, DieselFlowRepository};
pub use session_persistence::{new_session_store_from_env, DieselSessionStore};
