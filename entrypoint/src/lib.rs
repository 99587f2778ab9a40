pub mod errors;
pub mod logger;
pub mod orchestrator;
pub mod output;
