// config.rs
//
// Configuración del motor de capacitación: límites de evidencia, política
// de certificados y política de snapshots. Se lee del entorno (`.env`
// incluido); valores inválidos se registran y se ignoran.
use log::warn;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_MAX_EVIDENCE_BYTES: u64 = 5 * 1024 * 1024;
pub const DEFAULT_MAX_PROFILE_PHOTO_BYTES: u64 = 2 * 1024 * 1024;
pub const DEFAULT_VALIDITY_MONTHS: u32 = 36;
pub const DEFAULT_CERTIFICATE_PREFIX: &str = "AGR";

/// Qué hacer cuando se pide el certificado de una corrida ya certificada.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CertificatePolicy {
  /// El primer certificado emitido es canónico; repetir devuelve el mismo.
  OnePerRun,
  /// Cada generación crea un identificador nuevo.
  AlwaysFresh,
}

impl fmt::Display for CertificatePolicy {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let s = match self {
      CertificatePolicy::OnePerRun => "one_per_run",
      CertificatePolicy::AlwaysFresh => "always_fresh",
    };
    write!(f, "{}", s)
  }
}

impl FromStr for CertificatePolicy {
  type Err = String;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_lowercase().replace('-', "_").as_str() {
      "one_per_run" | "cached" => Ok(CertificatePolicy::OnePerRun),
      "always_fresh" | "fresh" => Ok(CertificatePolicy::AlwaysFresh),
      other => Err(format!("política de certificado desconocida: {}", other)),
    }
  }
}

/// Cuándo guardar snapshots automáticamente.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SnapshotPolicy {
  Never,
  /// Cada `n` pasos completados.
  Every(u32),
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WorkflowConfig {
  pub max_evidence_bytes: u64,
  pub max_profile_photo_bytes: u64,
  pub certificate_policy: CertificatePolicy,
  pub certificate_validity_months: u32,
  pub certificate_prefix: String,
  pub snapshot_policy: SnapshotPolicy,
}

impl Default for WorkflowConfig {
  fn default() -> Self {
    WorkflowConfig { max_evidence_bytes: DEFAULT_MAX_EVIDENCE_BYTES,
                     max_profile_photo_bytes: DEFAULT_MAX_PROFILE_PHOTO_BYTES,
                     certificate_policy: CertificatePolicy::OnePerRun,
                     certificate_validity_months: DEFAULT_VALIDITY_MONTHS,
                     certificate_prefix: DEFAULT_CERTIFICATE_PREFIX.to_string(),
                     snapshot_policy: SnapshotPolicy::Every(1) }
  }
}

impl WorkflowConfig {
  /// Variables: `AGRI_MAX_EVIDENCE_BYTES`, `AGRI_CERTIFICATE_POLICY`,
  /// `AGRI_CERTIFICATE_VALIDITY_MONTHS`, `AGRI_CERTIFICATE_PREFIX`,
  /// `AGRI_SNAPSHOT_EVERY` (0 desactiva).
  pub fn from_env() -> Self {
    dotenvy::dotenv().ok();
    Self::from_lookup(|key| std::env::var(key).ok())
  }

  /// Igual que `from_env` pero con una fuente de variables arbitraria.
  pub fn from_lookup<F>(lookup: F) -> Self
    where F: Fn(&str) -> Option<String>
  {
    let mut cfg = Self::default();
    if let Some(v) = lookup("AGRI_MAX_EVIDENCE_BYTES") {
      match v.trim().parse::<u64>() {
        Ok(n) if n > 0 => cfg.max_evidence_bytes = n,
        _ => warn!("AGRI_MAX_EVIDENCE_BYTES inválido ({}), se usa {}", v, cfg.max_evidence_bytes),
      }
    }
    if let Some(v) = lookup("AGRI_CERTIFICATE_POLICY") {
      match v.parse::<CertificatePolicy>() {
        Ok(p) => cfg.certificate_policy = p,
        Err(e) => warn!("{}; se usa {}", e, cfg.certificate_policy),
      }
    }
    if let Some(v) = lookup("AGRI_CERTIFICATE_VALIDITY_MONTHS") {
      match v.trim().parse::<u32>() {
        Ok(n) if n > 0 => cfg.certificate_validity_months = n,
        _ => warn!("AGRI_CERTIFICATE_VALIDITY_MONTHS inválido ({})", v),
      }
    }
    if let Some(v) = lookup("AGRI_CERTIFICATE_PREFIX") {
      let prefix: String = v.trim().chars().filter(|c| c.is_ascii_alphanumeric()).collect();
      if prefix.is_empty() {
        warn!("AGRI_CERTIFICATE_PREFIX vacío, se usa {}", cfg.certificate_prefix);
      } else {
        cfg.certificate_prefix = prefix.to_uppercase();
      }
    }
    if let Some(v) = lookup("AGRI_SNAPSHOT_EVERY") {
      match v.trim().parse::<u32>() {
        Ok(0) => cfg.snapshot_policy = SnapshotPolicy::Never,
        Ok(n) => cfg.snapshot_policy = SnapshotPolicy::Every(n),
        Err(_) => warn!("AGRI_SNAPSHOT_EVERY inválido ({})", v),
      }
    }
    cfg
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::collections::HashMap;

  fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
    move |k| map.get(k).cloned()
  }

  #[test]
  fn defaults_match_documented_limits() {
    let cfg = WorkflowConfig::from_lookup(|_| None);
    assert_eq!(cfg.max_evidence_bytes, 5 * 1024 * 1024);
    assert_eq!(cfg.certificate_policy, CertificatePolicy::OnePerRun);
    assert_eq!(cfg.certificate_validity_months, 36);
  }

  #[test]
  fn invalid_values_keep_defaults() {
    let cfg = WorkflowConfig::from_lookup(lookup(&[("AGRI_MAX_EVIDENCE_BYTES", "mucho"),
                                                   ("AGRI_CERTIFICATE_POLICY", "always-fresh"),
                                                   ("AGRI_CERTIFICATE_PREFIX", "kmt-"),
                                                   ("AGRI_SNAPSHOT_EVERY", "0")]));
    assert_eq!(cfg.max_evidence_bytes, DEFAULT_MAX_EVIDENCE_BYTES);
    assert_eq!(cfg.certificate_policy, CertificatePolicy::AlwaysFresh);
    assert_eq!(cfg.certificate_prefix, "KMT");
    assert_eq!(cfg.snapshot_policy, SnapshotPolicy::Never);
  }
}
