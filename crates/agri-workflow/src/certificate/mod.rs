pub mod record;
pub mod render;

pub use record::{assemble_certificate_data, assemble_certificate_data_at, new_certificate_id, CertificateModule,
                 CertificateRecord, CertificateScheme, CertificateSection, CERTIFICATE_TERMS, DEFAULT_LAYOUT};
pub use render::{certificate_filename, CertificateRenderer, HtmlCertificateRenderer, RenderedDocument, NOT_PROVIDED};
