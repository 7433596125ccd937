pub mod training_flow;

pub use training_flow::TrainingFlow;
