// session_store.rs
use crate::DomainError;
use std::collections::HashMap;
use std::sync::Mutex;

/// Caché clave-valor de la sesión (por ejemplo, la identidad recibida por
/// hand-off). Las implementaciones deben ser seguras entre hilos.
pub trait SessionStore: Send + Sync {
  fn get(&self, key: &str) -> Result<Option<String>, DomainError>;
  fn set(&self, key: &str, value: &str) -> Result<(), DomainError>;
  fn remove(&self, key: &str) -> Result<(), DomainError>;
}

#[derive(Default)]
pub struct InMemorySessionStore {
  entries: Mutex<HashMap<String, String>>,
}

impl InMemorySessionStore {
  pub fn new() -> Self {
    Self::default()
  }

  fn entries(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>, DomainError> {
    self.entries.lock().map_err(|e| DomainError::StorageError(format!("mutex poisoned: {:?}", e)))
  }
}

impl SessionStore for InMemorySessionStore {
  fn get(&self, key: &str) -> Result<Option<String>, DomainError> {
    Ok(self.entries()?.get(key).cloned())
  }

  fn set(&self, key: &str, value: &str) -> Result<(), DomainError> {
    self.entries()?.insert(key.to_string(), value.to_string());
    Ok(())
  }

  fn remove(&self, key: &str) -> Result<(), DomainError> {
    self.entries()?.remove(key);
    Ok(())
  }
}
