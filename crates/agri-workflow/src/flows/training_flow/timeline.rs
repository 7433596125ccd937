// timeline.rs
use agri_domain::{CompletedStep, CropType};
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StepStatus {
  Completed,
  Current,
  Locked,
}

/// Una fila del cronograma: paso, ventana de días y estado.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimelineEntry {
  pub index: usize,
  pub step_id: &'static str,
  pub title: &'static str,
  pub duration_days: u32,
  pub start_day: u32,
  pub end_day: u32,
  pub status: StepStatus,
  pub completed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DaysProgress {
  pub completed_days: u32,
  pub total_days: u32,
}

pub fn build_timeline(crop: CropType, current_index: usize, completed: &[CompletedStep]) -> Vec<TimelineEntry> {
  crop.steps()
      .iter()
      .enumerate()
      .filter_map(|(index, step)| {
        let (start_day, end_day) = crop.step_window(index)?;
        let done = completed.iter().find(|c| c.step_id == step.id);
        let status = match done {
          Some(_) => StepStatus::Completed,
          None if index == current_index => StepStatus::Current,
          None => StepStatus::Locked,
        };
        Some(TimelineEntry { index,
                             step_id: step.id,
                             title: step.title,
                             duration_days: step.duration_days,
                             start_day,
                             end_day,
                             status,
                             completed_at: done.map(|c| c.completed_at) })
      })
      .collect()
}

/// Días de los pasos completados frente al total del currículo.
pub fn days_progress(crop: Option<CropType>, completed: &[CompletedStep]) -> DaysProgress {
  match crop {
    Some(crop) => {
      let completed_days = crop.steps()
                               .iter()
                               .filter(|s| completed.iter().any(|c| c.step_id == s.id))
                               .map(|s| s.duration_days)
                               .sum();
      DaysProgress { completed_days,
                     total_days: crop.total_days() }
    }
    None => DaysProgress { completed_days: 0,
                           total_days: 0 },
  }
}
