mod common;

use agri_domain::CropType;
use agri_workflow::certificate::{CertificateSection, NOT_PROVIDED};
use agri_workflow::{CertificatePolicy, HtmlCertificateRenderer, TrainingPhase, WorkflowConfig, WorkflowError};
use common::{finish_training, harness, new_session, satisfy_current_step};
use flow::repository::FlowRepository;

fn html(bytes: &[u8]) -> String {
  String::from_utf8(bytes.to_vec()).expect("utf8")
}

#[test]
fn certificate_joins_catalog_detail_and_schemes() -> Result<(), WorkflowError> {
  let h = harness(WorkflowConfig::default());
  let mut flow = new_session(&h);
  flow.edit_profile(|p| {
        p.set_name("Asha Devi")?;
        p.set_national_id("123456789012")?;
        p.set_land_area_acres(1.5)
      })?;
  flow.select_crop(CropType::Potato)?;
  finish_training(&mut flow);

  let issued = flow.generate_certificate(&HtmlCertificateRenderer::default())?;
  let record = &issued.record;
  assert!(!issued.reused);
  assert_eq!(flow.phase(), TrainingPhase::CertificateIssued);
  assert_eq!(record.crop, CropType::Potato);
  assert_eq!(record.modules.len(), 5);
  assert_eq!(record.modules[0].step_id, "potato-1");
  assert_eq!(record.modules[0].checklist.len(), 5);
  assert!(!record.modules[0].detailed_steps.is_empty());
  assert!(record.modules.iter().all(|m| m.evidence.is_some()));
  assert!(record.eligible_schemes.iter().any(|s| s.id == "pm_kisan_small"));
  assert_eq!(record.layout.first(), Some(&CertificateSection::Header));
  assert_eq!(record.terms.len(), 10);
  assert_eq!(record.content_digest.len(), 64);
  assert!(record.training_started_at <= record.training_finished_at);
  assert!(record.is_valid_at(record.issued_at));

  let page = html(&issued.document.bytes);
  assert!(issued.document.filename.starts_with("Agricultural_Training_Certificate_Asha_Devi_"));
  assert!(page.contains(&record.certificate_id));
  assert!(page.contains("1234-XXXX-XXXX"));
  assert!(!page.contains("123456789012"));
  assert!(page.contains("data:image/png;base64,"));
  assert!(page.contains("TERMS AND CONDITIONS"));
  assert_eq!(h.repo.get_flow_status(&flow.id)?.as_deref(), Some("certificate_issued"));
  Ok(())
}

#[test]
fn missing_profile_fields_render_as_placeholder() -> Result<(), WorkflowError> {
  let h = harness(WorkflowConfig::default());
  let mut flow = new_session(&h);
  flow.select_crop(CropType::Onion)?;
  finish_training(&mut flow);

  let issued = flow.generate_certificate(&HtmlCertificateRenderer::default())?;
  let page = html(&issued.document.bytes);
  assert!(page.contains(&format!("<tr><th>Full Name:</th><td>{}</td></tr>", NOT_PROVIDED)));
  assert!(page.contains(&format!("<tr><th>Mobile Number:</th><td>{}</td></tr>", NOT_PROVIDED)));
  assert!(page.contains(&format!("<tr><th>Aadhaar Number:</th><td>{}</td></tr>", NOT_PROVIDED)));
  assert!(page.contains(&format!("holding Aadhaar Card No. {},", NOT_PROVIDED)));
  assert!(!page.contains("XXXX-XXXX-XXXX"));
  assert!(issued.document.filename.starts_with("Agricultural_Training_Certificate_Farmer_"));
  assert_eq!(issued.record.farmer.name(), "");
  Ok(())
}

#[test]
fn one_per_run_reuses_the_first_certificate() -> Result<(), WorkflowError> {
  let h = harness(WorkflowConfig::default());
  let mut flow = new_session(&h);
  flow.select_crop(CropType::Tomato)?;
  finish_training(&mut flow);
  let renderer = HtmlCertificateRenderer::default();

  let first = flow.generate_certificate(&renderer)?;
  let records_after_first = h.repo.count_steps(&flow.id)?;
  let second = flow.generate_certificate(&renderer)?;

  assert!(second.reused);
  assert_eq!(first.record.certificate_id, second.record.certificate_id);
  assert_eq!(h.repo.count_steps(&flow.id)?, records_after_first);
  Ok(())
}

#[test]
fn always_fresh_mints_new_ids_with_same_content() -> Result<(), WorkflowError> {
  let config = WorkflowConfig { certificate_policy: CertificatePolicy::AlwaysFresh,
                                ..WorkflowConfig::default() };
  let h = harness(config);
  let mut flow = new_session(&h);
  flow.select_crop(CropType::Wheat)?;
  finish_training(&mut flow);
  let renderer = HtmlCertificateRenderer::default();

  let a = flow.generate_certificate(&renderer)?;
  let b = flow.generate_certificate(&renderer)?;
  assert!(!b.reused);
  assert_ne!(a.record.certificate_id, b.record.certificate_id);
  assert_eq!(a.record.content_digest, b.record.content_digest);
  assert_eq!(flow.certificate().map(|c| c.certificate_id.clone()), Some(b.record.certificate_id));
  Ok(())
}

#[test]
fn unfinished_training_cannot_be_certified() -> Result<(), WorkflowError> {
  let h = harness(WorkflowConfig::default());
  let mut flow = new_session(&h);
  let renderer = HtmlCertificateRenderer::default();
  assert!(matches!(flow.generate_certificate(&renderer), Err(WorkflowError::NoCompletedSteps)));

  flow.select_crop(CropType::Potato)?;
  satisfy_current_step(&mut flow);
  flow.complete_current_step()?;
  assert!(matches!(flow.generate_certificate(&renderer), Err(WorkflowError::Validation(_))));
  // los datos sí se pueden ensamblar con un paso completado
  assert_eq!(flow.assemble_certificate_data()?.modules.len(), 1);
  assert!(flow.certificate().is_none());
  Ok(())
}

#[test]
fn crop_cannot_change_after_certification() -> Result<(), WorkflowError> {
  let h = harness(WorkflowConfig::default());
  let mut flow = new_session(&h);
  flow.select_crop(CropType::Potato)?;
  finish_training(&mut flow);
  flow.generate_certificate(&HtmlCertificateRenderer::default())?;

  assert!(matches!(flow.select_crop(CropType::Onion), Err(WorkflowError::Validation(_))));
  assert_eq!(flow.selected_crop(), Some(CropType::Potato));
  Ok(())
}
