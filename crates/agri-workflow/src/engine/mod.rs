pub mod training_engine;

pub use training_engine::TrainingFlowEngine;
