pub mod state;
pub mod step_task;
pub mod timeline;
#[allow(clippy::module_inception)]
pub mod training_flow;

pub use state::{TrainingPhase, TrainingState};
pub use step_task::CropStepTask;
pub use timeline::{DaysProgress, StepStatus, TimelineEntry};
pub use training_flow::{CompletionOutcome, IssuedCertificate, TrainingFlow};
