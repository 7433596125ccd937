//! Hand-off de identidad al iniciar la sesión.
//!
//! Un portal externo puede abrir la sesión con parámetros (`name`,
//! `nationalId`, `landAreaAcres`, `cropType`). Si traen identidad, ganan y
//! se escriben en la caché de sesión; si no, se restaura lo que la caché
//! tenga bajo las mismas claves. Nombre e identificador de origen externo
//! quedan en solo lectura.

use crate::errors::WorkflowError;
use agri_domain::{CropType, FarmerProfile, ProfileField, SessionStore};
use log::{debug, warn};
use std::collections::BTreeMap;
use url::Url;

pub const KEY_NAME: &str = "name";
pub const KEY_NATIONAL_ID: &str = "nationalId";
pub const KEY_LAND_AREA: &str = "landAreaAcres";
pub const KEY_CROP: &str = "cropType";
pub const HANDOFF_KEYS: [&str; 4] = [KEY_NAME, KEY_NATIONAL_ID, KEY_LAND_AREA, KEY_CROP];

/// De dónde salieron los valores aplicados.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandoffSource {
  Params,
  Cache,
  None,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HandoffOutcome {
  pub source: HandoffSource,
  /// Cultivo pedido, si era válido. La sesión decide si seleccionarlo.
  pub crop: Option<CropType>,
  pub applied: Vec<ProfileField>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdentityHandoff {
  params: BTreeMap<String, String>,
}

impl IdentityHandoff {
  pub fn new() -> Self {
    Self::default()
  }

  /// Conserva solo las claves conocidas con valor no vacío; ante claves
  /// repetidas gana la última.
  pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where I: IntoIterator<Item = (K, V)>,
          K: AsRef<str>,
          V: AsRef<str>
  {
    let mut params = BTreeMap::new();
    for (k, v) in pairs {
      let (k, v) = (k.as_ref().trim(), v.as_ref().trim());
      if v.is_empty() {
        continue;
      }
      if HANDOFF_KEYS.contains(&k) {
        params.insert(k.to_string(), v.to_string());
      } else {
        debug!("hand-off: clave ignorada {}", k);
      }
    }
    Self { params }
  }

  /// Query string (`?name=Asha%20Devi&cropType=potato`), con o sin `?`.
  pub fn from_query(query: &str) -> Self {
    let query = query.trim().trim_start_matches('?');
    Self::from_pairs(url::form_urlencoded::parse(query.as_bytes()))
  }

  /// URL completa de entrada.
  pub fn from_url(raw: &str) -> Result<Self, WorkflowError> {
    let url = Url::parse(raw).map_err(|e| WorkflowError::Validation(format!("URL de hand-off inválida: {}", e)))?;
    Ok(Self::from_pairs(url.query_pairs()))
  }

  pub fn get(&self, key: &str) -> Option<&str> {
    self.params.get(key).map(String::as_str)
  }

  pub fn is_empty(&self) -> bool {
    self.params.is_empty()
  }

  fn has_identity(&self) -> bool {
    self.params.contains_key(KEY_NAME) || self.params.contains_key(KEY_NATIONAL_ID)
  }

  /// Valores efectivos y su origen. Con identidad en los parámetros se
  /// escriben en la caché; sin ella se leen de la caché y los parámetros
  /// presentes la sobrescriben.
  pub fn resolve(&self, store: &dyn SessionStore) -> Result<(HandoffSource, BTreeMap<String, String>), WorkflowError> {
    if self.has_identity() {
      for (k, v) in &self.params {
        store.set(k, v)?;
      }
      return Ok((HandoffSource::Params, self.params.clone()));
    }
    let mut values = BTreeMap::new();
    for key in HANDOFF_KEYS {
      if let Some(v) = store.get(key)? {
        values.insert(key.to_string(), v);
      }
    }
    let source = if values.is_empty() { HandoffSource::None } else { HandoffSource::Cache };
    values.extend(self.params.clone());
    Ok((source, values))
  }

  /// Aplica los valores resueltos al perfil. Nombre e identificador quedan
  /// bloqueados; superficie o cultivo inválidos se ignoran con un aviso.
  pub fn apply(&self, profile: &mut FarmerProfile, store: &dyn SessionStore) -> Result<HandoffOutcome, WorkflowError> {
    let (source, values) = self.resolve(store)?;
    let mut applied = Vec::new();

    if let Some(name) = values.get(KEY_NAME) {
      if profile.is_locked(ProfileField::Name) {
        warn!("hand-off: el nombre ya estaba bloqueado");
      } else {
        profile.set_name(name.as_str())?;
        profile.lock(ProfileField::Name);
        applied.push(ProfileField::Name);
      }
    }
    if let Some(id) = values.get(KEY_NATIONAL_ID) {
      if profile.is_locked(ProfileField::NationalId) {
        warn!("hand-off: el identificador ya estaba bloqueado");
      } else {
        profile.set_national_id(id.as_str())?;
        profile.lock(ProfileField::NationalId);
        applied.push(ProfileField::NationalId);
      }
    }
    if let Some(raw) = values.get(KEY_LAND_AREA) {
      match raw.parse::<f64>() {
        Ok(acres) => match profile.set_land_area_acres(acres) {
          Ok(()) => applied.push(ProfileField::LandArea),
          Err(e) => warn!("hand-off: superficie ignorada: {}", e),
        },
        Err(_) => warn!("hand-off: superficie no numérica '{}'", raw),
      }
    }
    let crop = match values.get(KEY_CROP) {
      Some(raw) => match raw.parse::<CropType>() {
        Ok(crop) => Some(crop),
        Err(e) => {
          warn!("hand-off: {}", e);
          None
        }
      },
      None => None,
    };
    debug!("hand-off aplicado desde {:?}: {:?}", source, applied);
    Ok(HandoffOutcome { source, crop, applied })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn query_is_percent_decoded_and_filtered() {
    let h = IdentityHandoff::from_query("?name=Asha%20Devi&nationalId=1234+5678&foo=bar&cropType=");
    assert_eq!(h.get(KEY_NAME), Some("Asha Devi"));
    assert_eq!(h.get(KEY_NATIONAL_ID), Some("1234 5678"));
    assert_eq!(h.get("foo"), None);
    assert_eq!(h.get(KEY_CROP), None);
  }

  #[test]
  fn from_url_reads_query_pairs() {
    let h = IdentityHandoff::from_url("https://kisan.example/train?landAreaAcres=1.5&cropType=onion").unwrap();
    assert_eq!(h.get(KEY_LAND_AREA), Some("1.5"));
    assert!(IdentityHandoff::from_url("no es una url").is_err());
  }
}
