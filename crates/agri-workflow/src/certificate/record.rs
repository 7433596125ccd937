// record.rs
//! Datos del certificado de capacitación.
//!
//! `assemble_certificate_data` es una proyección pura: une cada paso
//! completado con su detalle del catálogo, copia el perfil y los esquemas
//! elegibles y calcula identificador, vigencia y huella de contenido. No
//! persiste nada; la sesión decide qué hacer con el registro.

use crate::config::WorkflowConfig;
use crate::errors::WorkflowError;
use agri_domain::{find_step, CompletedStep, CropType, DomainError, Evidence, FarmerProfile, SubsidyScheme};
use chrono::{DateTime, Months, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

pub const CERTIFICATE_TERMS: [&str; 10] = [
  "This certificate is valid for a period of three (3) years from the date of issue and may be renewed upon successful completion of refresher training.",
  "The certificate holder must maintain the prescribed training standards and implement the learned agricultural practices in their farming operations.",
  "This certificate must be produced as mandatory documentation when applying for any government subsidy schemes or agricultural benefits.",
  "The certificate is subject to verification by authorized government officials and may be audited for compliance with training requirements.",
  "Any fraudulent use, duplication, or misrepresentation of this certificate will result in immediate cancellation and legal action under applicable laws.",
  "The certificate holder agrees to participate in periodic follow-up surveys, monitoring visits, and evaluation programs conducted by the issuing authority.",
  "This certificate does not guarantee automatic approval of subsidy applications, which remain subject to individual scheme eligibility and availability of funds.",
  "All information provided during the training program must be accurate, verifiable, and supported by authentic documentation.",
  "The issuing authority reserves the right to revoke this certificate if any discrepancies, violations, or non-compliance issues are discovered.",
  "For any queries, clarifications, or grievances related to this certificate, contact the nearest Agricultural Extension Office or the District Collectorate.",
];

/// Secciones del documento, en el orden en que el renderizador las emite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CertificateSection {
  Header,
  FarmerDetails,
  TrainingModules,
  Eligibility,
  Terms,
  Verification,
  Signatures,
}

pub const DEFAULT_LAYOUT: [CertificateSection; 7] = [CertificateSection::Header,
                                                     CertificateSection::FarmerDetails,
                                                     CertificateSection::TrainingModules,
                                                     CertificateSection::Eligibility,
                                                     CertificateSection::Terms,
                                                     CertificateSection::Verification,
                                                     CertificateSection::Signatures];

/// Paso completado unido con su detalle del catálogo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CertificateModule {
  pub step_id: String,
  pub title: String,
  pub description: String,
  pub duration_days: u32,
  pub checklist: Vec<String>,
  pub detailed_steps: Vec<String>,
  pub proof_requirement: String,
  pub completed_at: DateTime<Utc>,
  pub evidence: Option<Evidence>,
}

/// Copia autocontenida de un esquema elegible.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CertificateScheme {
  pub id: String,
  pub name: String,
  pub sponsor: String,
  pub eligibility_label: String,
  pub benefit_amount_label: String,
  pub benefits: Vec<String>,
  pub required_documents: Vec<String>,
}

impl From<&SubsidyScheme> for CertificateScheme {
  fn from(s: &SubsidyScheme) -> Self {
    CertificateScheme { id: s.id.to_string(),
                        name: s.name.to_string(),
                        sponsor: s.sponsor_type.to_string(),
                        eligibility_label: s.eligibility_label.to_string(),
                        benefit_amount_label: s.benefit_amount_label.to_string(),
                        benefits: s.benefits.iter().map(|b| b.to_string()).collect(),
                        required_documents: s.required_documents.iter().map(|d| d.to_string()).collect() }
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CertificateRecord {
  pub certificate_id: String,
  pub issued_at: DateTime<Utc>,
  pub valid_until: DateTime<Utc>,
  pub farmer: FarmerProfile,
  pub crop: CropType,
  pub modules: Vec<CertificateModule>,
  pub eligible_schemes: Vec<CertificateScheme>,
  pub training_started_at: DateTime<Utc>,
  pub training_finished_at: DateTime<Utc>,
  pub terms: Vec<String>,
  pub layout: Vec<CertificateSection>,
  /// SHA-256 (hex) del contenido: perfil, cultivo, módulos y esquemas.
  /// No incluye identificador ni fechas de emisión, así dos emisiones de la
  /// misma corrida comparten huella.
  pub content_digest: String,
}

impl CertificateRecord {
  pub fn is_valid_at(&self, at: DateTime<Utc>) -> bool {
    self.issued_at <= at && at <= self.valid_until
  }
}

/// `{PREFIJO}-{AAAAMMDD}-{8 hex}`; único por invocación.
pub fn new_certificate_id(prefix: &str, issued_at: DateTime<Utc>) -> String {
  let token = Uuid::new_v4().simple().to_string();
  format!("{}-{}-{}", prefix, issued_at.format("%Y%m%d"), token[..8].to_uppercase())
}

#[derive(Serialize)]
struct DigestInput<'a> {
  farmer: &'a FarmerProfile,
  crop: CropType,
  modules: &'a [CertificateModule],
  eligible_schemes: &'a [CertificateScheme],
}

fn content_digest(input: &DigestInput<'_>) -> Result<String, WorkflowError> {
  let bytes = serde_json::to_vec(input)?;
  let digest = Sha256::digest(&bytes);
  Ok(digest.iter().map(|b| format!("{:02x}", b)).collect())
}

/// Ensambla el certificado con la hora actual.
pub fn assemble_certificate_data(profile: &FarmerProfile,
                                 completed: &[CompletedStep],
                                 schemes: &[&SubsidyScheme],
                                 config: &WorkflowConfig)
                                 -> Result<CertificateRecord, WorkflowError> {
  assemble_certificate_data_at(profile, completed, schemes, config, Utc::now())
}

/// Ensambla el certificado emitido en `issued_at`.
///
/// Falla con `NoCompletedSteps` si no hay pasos y con `UnknownStep` si un
/// paso no existe en el catálogo. Cada llamada genera un identificador
/// nuevo.
pub fn assemble_certificate_data_at(profile: &FarmerProfile,
                                    completed: &[CompletedStep],
                                    schemes: &[&SubsidyScheme],
                                    config: &WorkflowConfig,
                                    issued_at: DateTime<Utc>)
                                    -> Result<CertificateRecord, WorkflowError> {
  let (first, last) = match (completed.first(), completed.last()) {
    (Some(f), Some(l)) => (f, l),
    _ => return Err(WorkflowError::NoCompletedSteps),
  };

  let mut modules = Vec::with_capacity(completed.len());
  let mut crop = profile.selected_crop();
  for done in completed {
    let step = find_step(&done.step_id).ok_or_else(|| DomainError::UnknownStep(done.step_id.clone()))?;
    crop.get_or_insert(step.crop);
    modules.push(CertificateModule { step_id: done.step_id.clone(),
                                     title: step.title.to_string(),
                                     description: step.description.to_string(),
                                     duration_days: step.duration_days,
                                     checklist: step.checklist.iter().map(|c| c.to_string()).collect(),
                                     detailed_steps: step.detailed_steps.iter().map(|d| d.to_string()).collect(),
                                     proof_requirement: step.proof_requirement.to_string(),
                                     completed_at: done.completed_at,
                                     evidence: done.evidence.clone() });
  }
  // siempre hay al menos un módulo, así que el cultivo quedó resuelto
  let crop = crop.ok_or(WorkflowError::NoCompletedSteps)?;

  let eligible_schemes: Vec<CertificateScheme> = schemes.iter().map(|s| CertificateScheme::from(*s)).collect();
  let valid_until = issued_at.checked_add_months(Months::new(config.certificate_validity_months))
                             .ok_or_else(|| WorkflowError::Validation("fecha de vigencia fuera de rango".into()))?;
  let content_digest = content_digest(&DigestInput { farmer: profile,
                                                     crop,
                                                     modules: &modules,
                                                     eligible_schemes: &eligible_schemes })?;

  Ok(CertificateRecord { certificate_id: new_certificate_id(&config.certificate_prefix, issued_at),
                         issued_at,
                         valid_until,
                         farmer: profile.clone(),
                         crop,
                         modules,
                         eligible_schemes,
                         training_started_at: first.completed_at,
                         training_finished_at: last.completed_at,
                         terms: CERTIFICATE_TERMS.iter().map(|t| t.to_string()).collect(),
                         layout: DEFAULT_LAYOUT.to_vec(),
                         content_digest })
}
