pub mod session_factory;

pub use session_factory::{SessionSummary, TrainingSessionFactory};
