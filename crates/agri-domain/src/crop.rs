// crop.rs
use crate::crop_catalog::{ONION_STEPS, POTATO_STEPS, TOMATO_STEPS, WHEAT_STEPS};
use crate::DomainError;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Cultivos soportados. El conjunto es cerrado: claves desconocidas se
/// rechazan en la frontera (`FromStr`) y nunca llegan a seleccionarse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CropType {
  Potato,
  Onion,
  Tomato,
  Wheat,
}

impl CropType {
  pub const ALL: [CropType; 4] = [CropType::Potato, CropType::Onion, CropType::Tomato, CropType::Wheat];

  pub fn key(&self) -> &'static str {
    match self {
      CropType::Potato => "potato",
      CropType::Onion => "onion",
      CropType::Tomato => "tomato",
      CropType::Wheat => "wheat",
    }
  }

  /// Secuencia ordenada de pasos de capacitación del cultivo.
  pub fn steps(&self) -> &'static [CropStep] {
    match self {
      CropType::Potato => POTATO_STEPS,
      CropType::Onion => ONION_STEPS,
      CropType::Tomato => TOMATO_STEPS,
      CropType::Wheat => WHEAT_STEPS,
    }
  }

  /// Duración total del currículo en días.
  pub fn total_days(&self) -> u32 {
    self.steps().iter().map(|s| s.duration_days).sum()
  }

  /// Ventana de días (1-based, inclusiva) del paso en la posición `index`.
  pub fn step_window(&self, index: usize) -> Option<(u32, u32)> {
    let steps = self.steps();
    let step = steps.get(index)?;
    let start = steps[..index].iter().map(|s| s.duration_days).sum::<u32>() + 1;
    Some((start, start + step.duration_days - 1))
  }
}

impl fmt::Display for CropType {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.key())
  }
}

impl FromStr for CropType {
  type Err = DomainError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_lowercase().as_str() {
      "potato" => Ok(CropType::Potato),
      "onion" => Ok(CropType::Onion),
      "tomato" => Ok(CropType::Tomato),
      "wheat" => Ok(CropType::Wheat),
      other => Err(DomainError::UnknownCrop(other.to_string())),
    }
  }
}

/// Paso del currículo. Datos de referencia inmutables.
#[derive(Debug, Serialize)]
pub struct CropStep {
  pub id: &'static str,
  pub crop: CropType,
  pub title: &'static str,
  pub duration_days: u32,
  pub checklist: &'static [&'static str],
  pub description: &'static str,
  pub detailed_steps: &'static [&'static str],
  pub proof_requirement: &'static str,
  pub media_reference: &'static str,
}

static STEP_INDEX: Lazy<HashMap<&'static str, (&'static CropStep, usize)>> = Lazy::new(|| {
  CropType::ALL.iter()
               .flat_map(|c| c.steps().iter().enumerate())
               .map(|(i, s)| (s.id, (s, i)))
               .collect()
});

/// Busca un paso por id en todo el catálogo.
pub fn find_step(step_id: &str) -> Option<&'static CropStep> {
  STEP_INDEX.get(step_id).map(|(s, _)| *s)
}

/// Posición del paso dentro de la secuencia de su cultivo.
pub fn step_position(step_id: &str) -> Option<usize> {
  STEP_INDEX.get(step_id).map(|(_, i)| *i)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parse_and_display_roundtrip_keys() {
    for crop in CropType::ALL {
      assert_eq!(crop.key().parse::<CropType>().unwrap(), crop);
      assert_eq!(crop.to_string(), crop.key());
    }
    assert_eq!(" Wheat ".parse::<CropType>().unwrap(), CropType::Wheat);
    assert!(matches!("rice".parse::<CropType>(), Err(DomainError::UnknownCrop(_))));
  }

  #[test]
  fn windows_are_contiguous() {
    let crop = CropType::Potato;
    assert_eq!(crop.step_window(0), Some((1, 10)));
    assert_eq!(crop.step_window(1), Some((11, 15)));
    let last = crop.steps().len() - 1;
    assert_eq!(crop.step_window(last).map(|w| w.1), Some(crop.total_days()));
    assert_eq!(crop.step_window(last + 1), None);
  }
}
