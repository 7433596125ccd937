//! agri-workflow: motor de capacitación y elegibilidad
//!
//! Define la sesión de capacitación (`TrainingFlow`) sobre
//! `flow::FlowRepository`: selección de cultivo, compuerta de pasos
//! (casillas + evidencia), porcentaje de avance, esquemas elegibles y
//! emisión del certificado a través de un `CertificateRenderer`. La
//! `TrainingSessionFactory` crea y rehidrata sesiones y aplica el hand-off
//! de identidad.

pub mod certificate;
pub mod config;
pub mod engine;
pub mod errors;
pub mod evidence;
pub mod factory;
pub mod flows;
pub mod handoff;
pub mod step;
pub mod workflow_type;

pub use certificate::{assemble_certificate_data, CertificateRecord, CertificateRenderer, HtmlCertificateRenderer,
                      RenderedDocument};
pub use config::{CertificatePolicy, SnapshotPolicy, WorkflowConfig};
pub use engine::TrainingFlowEngine;
pub use errors::WorkflowError;
pub use evidence::EvidenceUpload;
pub use factory::TrainingSessionFactory;
pub use flows::training_flow::{CompletionOutcome, IssuedCertificate, StepStatus, TrainingPhase};
pub use flows::TrainingFlow;
pub use handoff::{HandoffOutcome, HandoffSource, IdentityHandoff};
pub use step::{BlockReason, GateStatus, WorkflowStep};
pub use workflow_type::WorkflowType;
