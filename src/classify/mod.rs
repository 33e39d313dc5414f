pub mod functional;
pub mod input;

pub use functional::FunctionalGroupClassifier;
pub use input::classify_input;
