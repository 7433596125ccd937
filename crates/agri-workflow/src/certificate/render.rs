// render.rs
//
// Sumidero de documentos. `CertificateRenderer` recibe el registro ya
// ensamblado y el almacén de evidencias (para las miniaturas) y devuelve el
// documento descargable. `HtmlCertificateRenderer` produce una página con
// formato de certificado gubernamental.
use crate::certificate::record::{CertificateRecord, CertificateSection};
use crate::errors::WorkflowError;
use agri_domain::{Evidence, FarmerProfile};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use chrono::{DateTime, Utc};
use flow::repository::ArtifactStore;
use log::warn;
use std::fmt::Write as _;

pub const NOT_PROVIDED: &str = "Not provided";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedDocument {
  pub filename: String,
  pub media_type: String,
  pub bytes: Vec<u8>,
}

pub trait CertificateRenderer: Send + Sync {
  fn render(&self, record: &CertificateRecord, artifacts: &dyn ArtifactStore) -> Result<RenderedDocument, WorkflowError>;
}

/// `Agricultural_Training_Certificate_<Nombre>_<AAAA-MM-DD>.<ext>`; los
/// caracteres no alfanuméricos del nombre pasan a `_`.
pub fn certificate_filename(farmer_name: &str, issued_at: DateTime<Utc>, extension: &str) -> String {
  let name: String = farmer_name.trim()
                                .chars()
                                .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
                                .collect();
  let name = if name.is_empty() { "Farmer".to_string() } else { name };
  format!("Agricultural_Training_Certificate_{}_{}.{}", name, issued_at.format("%Y-%m-%d"), extension)
}

fn escape(text: &str) -> String {
  let mut out = String::with_capacity(text.len());
  for c in text.chars() {
    match c {
      '&' => out.push_str("&amp;"),
      '<' => out.push_str("&lt;"),
      '>' => out.push_str("&gt;"),
      '"' => out.push_str("&quot;"),
      '\'' => out.push_str("&#39;"),
      _ => out.push(c),
    }
  }
  out
}

fn or_placeholder(value: &str) -> String {
  if value.trim().is_empty() {
    NOT_PROVIDED.to_string()
  } else {
    escape(value)
  }
}

/// Aadhaar enmascarado, o el marcador si el perfil no lo tiene.
fn masked_or_placeholder(farmer: &FarmerProfile) -> String {
  if farmer.national_id().trim().is_empty() {
    NOT_PROVIDED.to_string()
  } else {
    escape(&farmer.masked_national_id())
  }
}

fn date_in(at: DateTime<Utc>) -> String {
  at.format("%d/%m/%Y").to_string()
}

fn capitalize(s: &str) -> String {
  let mut chars = s.chars();
  match chars.next() {
    Some(first) => first.to_uppercase().chain(chars).collect(),
    None => String::new(),
  }
}

#[derive(Debug, Clone)]
pub struct HtmlCertificateRenderer {
  pub issuing_authority: String,
  pub place_of_issue: String,
  pub verification_url: String,
}

impl Default for HtmlCertificateRenderer {
  fn default() -> Self {
    HtmlCertificateRenderer { issuing_authority: "Agricultural Subsidy Management System, Government of India".into(),
                              place_of_issue: "New Delhi".into(),
                              verification_url: "https://agri.gov.in/verify-certificate".into() }
  }
}

impl HtmlCertificateRenderer {
  fn thumbnail(&self, evidence: &Evidence, artifacts: &dyn ArtifactStore) -> String {
    match artifacts.get(&evidence.artifact_key) {
      Ok((bytes, media_type)) => {
        format!("<img class=\"thumb\" alt=\"{}\" src=\"data:{};base64,{}\"/>",
                escape(&evidence.filename),
                escape(&media_type),
                STANDARD.encode(bytes))
      }
      Err(e) => {
        warn!("miniatura no disponible para {}: {}", evidence.artifact_key, e);
        String::new()
      }
    }
  }

  fn header(&self, out: &mut String, record: &CertificateRecord, artifacts: &dyn ArtifactStore) -> std::fmt::Result {
    writeln!(out, "<header><p class=\"seal\">GOVT SEAL</p>")?;
    writeln!(out, "<h1>CERTIFICATE OF AGRICULTURAL TRAINING COMPLETION</h1>")?;
    writeln!(out, "<p>{}</p>", escape(&self.issuing_authority))?;
    if let Some(photo) = record.farmer.profile_photo() {
      if let Ok((bytes, media_type)) = artifacts.get(photo) {
        writeln!(out,
                 "<img class=\"photo\" alt=\"Farmer photo\" src=\"data:{};base64,{}\"/>",
                 escape(&media_type),
                 STANDARD.encode(bytes))?;
      }
    }
    writeln!(out, "<table class=\"issue\">")?;
    writeln!(out, "<tr><th>Certificate No:</th><td>{}</td></tr>", escape(&record.certificate_id))?;
    writeln!(out, "<tr><th>Date of Issue:</th><td>{}</td></tr>", date_in(record.issued_at))?;
    writeln!(out, "<tr><th>Valid Until:</th><td>{}</td></tr>", date_in(record.valid_until))?;
    writeln!(out, "<tr><th>Place of Issue:</th><td>{}</td></tr>", escape(&self.place_of_issue))?;
    writeln!(out, "</table>")?;
    writeln!(out, "<h2>HEREBY CERTIFIED</h2>")?;
    writeln!(out,
             "<p>That Shri/Smt. {}, resident of {}, holding Aadhaar Card No. {}, has successfully completed the \
              prescribed Agricultural Training Program for {} Cultivation.</p>",
             or_placeholder(record.farmer.name()),
             or_placeholder(record.farmer.location()),
             masked_or_placeholder(&record.farmer),
             capitalize(record.crop.key()))?;
    writeln!(out, "</header>")
  }

  fn farmer_details(&self, out: &mut String, record: &CertificateRecord) -> std::fmt::Result {
    let farmer = &record.farmer;
    let rows = [("Full Name", or_placeholder(farmer.name())),
                ("Aadhaar Number", masked_or_placeholder(farmer)),
                ("Mobile Number", or_placeholder(farmer.mobile())),
                ("Complete Address", or_placeholder(farmer.location())),
                ("Land Area (acres)", farmer.land_area_acres().to_string()),
                ("Bank Account Number", or_placeholder(farmer.bank_account_ref())),
                ("Selected Crop", capitalize(record.crop.key())),
                ("Training Start Date", date_in(record.training_started_at)),
                ("Training End Date", date_in(record.training_finished_at))];
    writeln!(out, "<section class=\"farmer\"><h2>FARMER COMPLETE DETAILS</h2><table>")?;
    for (label, value) in rows {
      writeln!(out, "<tr><th>{}:</th><td>{}</td></tr>", label, value)?;
    }
    writeln!(out, "</table></section>")
  }

  fn modules(&self, out: &mut String, record: &CertificateRecord, artifacts: &dyn ArtifactStore) -> std::fmt::Result {
    writeln!(out, "<section class=\"modules\"><h2>DETAILED TRAINING MODULES COMPLETED</h2>")?;
    for (i, module) in record.modules.iter().enumerate() {
      writeln!(out, "<article class=\"module\">")?;
      writeln!(out,
               "<h3>Module {}: {}</h3><p class=\"done\">Completed on: {}</p>",
               i + 1,
               escape(&module.title),
               date_in(module.completed_at))?;
      writeln!(out, "<p>Description: {}</p>", escape(&module.description))?;
      writeln!(out, "<h4>Training Content Covered:</h4><ol>")?;
      for step in &module.detailed_steps {
        writeln!(out, "<li>{}</li>", escape(step))?;
      }
      writeln!(out, "</ol><h4>Key Activities Completed:</h4><ul>")?;
      for item in &module.checklist {
        writeln!(out, "<li>✓ {}</li>", escape(item))?;
      }
      writeln!(out, "</ul>")?;
      match &module.evidence {
        Some(evidence) => {
          writeln!(out,
                   "<div class=\"evidence\"><p>Proof submitted: {} ({} bytes)</p>{}</div>",
                   escape(&evidence.filename),
                   evidence.file_size_bytes,
                   self.thumbnail(evidence, artifacts))?;
        }
        None => writeln!(out, "<div class=\"evidence\"><p>Proof submitted: {}</p></div>", NOT_PROVIDED)?,
      }
      writeln!(out, "</article>")?;
    }
    writeln!(out, "</section>")
  }

  fn eligibility(&self, out: &mut String, record: &CertificateRecord) -> std::fmt::Result {
    writeln!(out, "<section class=\"schemes\"><h2>SCHEME ELIGIBILITY</h2>")?;
    if record.eligible_schemes.is_empty() {
      writeln!(out, "<p>Based on the provided land area, no schemes are currently eligible.</p>")?;
      writeln!(out, "<p>Please contact the nearest agricultural office for more information.</p>")?;
      return writeln!(out, "</section>");
    }
    writeln!(out, "<table><tr><th>#</th><th>Scheme</th><th>Scheme Type</th><th>Financial Benefit</th><th>Eligibility Criteria</th><th>Required Documents</th><th>Key Benefits</th></tr>")?;
    for (i, scheme) in record.eligible_schemes.iter().enumerate() {
      let benefits: Vec<String> = scheme.benefits.iter().map(|b| format!("<li>{}</li>", escape(b))).collect();
      writeln!(out,
               "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td><ul>{}</ul></td></tr>",
               i + 1,
               escape(&scheme.name),
               escape(&scheme.sponsor),
               escape(&scheme.benefit_amount_label),
               escape(&scheme.eligibility_label),
               escape(&scheme.required_documents.join(", ")),
               benefits.concat())?;
    }
    writeln!(out, "</table></section>")
  }

  fn terms(&self, out: &mut String, record: &CertificateRecord) -> std::fmt::Result {
    writeln!(out, "<section class=\"terms\"><h2>TERMS AND CONDITIONS</h2><ol>")?;
    for term in &record.terms {
      writeln!(out, "<li>{}</li>", escape(term))?;
    }
    writeln!(out, "</ol></section>")
  }

  fn verification(&self, out: &mut String, record: &CertificateRecord) -> std::fmt::Result {
    writeln!(out, "<section class=\"verification\"><h2>DIGITAL VERIFICATION</h2>")?;
    writeln!(out, "<p>Unique Certificate ID: {}</p>", escape(&record.certificate_id))?;
    writeln!(out, "<p>Content Digest (SHA-256): <code>{}</code></p>", escape(&record.content_digest))?;
    writeln!(out, "<p>Online Verification Portal: {}</p>", escape(&self.verification_url))?;
    writeln!(out, "</section>")
  }

  fn signatures(&self, out: &mut String) -> std::fmt::Result {
    writeln!(out, "<footer class=\"signatures\"><h2>ISSUING AUTHORITY</h2>")?;
    writeln!(out, "<div>Authorized Signatory<br/>Training Officer<br/>Agricultural Department</div>")?;
    writeln!(out, "<div>OFFICIAL SEAL</div>")?;
    writeln!(out, "<div>Authorized Signatory<br/>District Collector<br/>(Government Seal)</div>")?;
    writeln!(out, "</footer>")
  }

  /// Página HTML completa siguiendo `record.layout`.
  pub fn to_html(&self, record: &CertificateRecord, artifacts: &dyn ArtifactStore) -> Result<String, WorkflowError> {
    let mut out = String::new();
    self.write_document(&mut out, record, artifacts)
        .map_err(|e| WorkflowError::Render(format!("no se pudo escribir el documento: {}", e)))?;
    Ok(out)
  }

  fn write_document(&self, out: &mut String, record: &CertificateRecord, artifacts: &dyn ArtifactStore) -> std::fmt::Result {
    writeln!(out, "<!DOCTYPE html>")?;
    writeln!(out, "<html lang=\"en\"><head><meta charset=\"utf-8\"/>")?;
    writeln!(out, "<title>Certificate {}</title>", escape(&record.certificate_id))?;
    writeln!(out,
             "<style>body{{font-family:serif;margin:2em}}h1,h2{{text-align:center}}th{{text-align:left}}\
              .thumb{{max-width:160px;max-height:120px}}.photo{{max-width:96px}}</style>")?;
    writeln!(out, "</head><body>")?;
    for section in &record.layout {
      match section {
        CertificateSection::Header => self.header(out, record, artifacts)?,
        CertificateSection::FarmerDetails => self.farmer_details(out, record)?,
        CertificateSection::TrainingModules => self.modules(out, record, artifacts)?,
        CertificateSection::Eligibility => self.eligibility(out, record)?,
        CertificateSection::Terms => self.terms(out, record)?,
        CertificateSection::Verification => self.verification(out, record)?,
        CertificateSection::Signatures => self.signatures(out)?,
      }
    }
    writeln!(out, "</body></html>")
  }
}

impl CertificateRenderer for HtmlCertificateRenderer {
  fn render(&self, record: &CertificateRecord, artifacts: &dyn ArtifactStore) -> Result<RenderedDocument, WorkflowError> {
    let html = self.to_html(record, artifacts)?;
    Ok(RenderedDocument { filename: certificate_filename(record.farmer.name(), record.issued_at, "html"),
                          media_type: "text/html; charset=utf-8".into(),
                          bytes: html.into_bytes() })
  }
}
