pub mod evaluator;
pub mod provider;
pub mod rule;
pub mod scanner;
pub mod selector;
pub mod status;
pub mod zone;
