pub mod context;
pub mod trait_step;

pub use context::{command_id_for, StepContext, STEP_STATE_PREFIX};
pub use trait_step::{BlockReason, GateStatus, StepInfo, StepProgress, WorkflowStep};
