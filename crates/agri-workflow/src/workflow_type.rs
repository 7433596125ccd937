use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Tipos de corrida registrados en la metadata del flow (`workflow_type`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowType {
  CropTraining,
  #[default]
  Unknown,
}

impl fmt::Display for WorkflowType {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let s = match self {
      WorkflowType::CropTraining => "crop_training",
      WorkflowType::Unknown => "unknown",
    };
    write!(f, "{}", s)
  }
}

impl FromStr for WorkflowType {
  type Err = ();

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.to_lowercase().as_str() {
      "crop_training" => Ok(WorkflowType::CropTraining),
      _ => Ok(WorkflowType::Unknown),
    }
  }
}
