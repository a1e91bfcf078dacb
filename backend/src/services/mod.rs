pub mod llm;
pub mod name_service;
pub mod prompt;
pub mod script;
pub mod suggestion;

pub use name_service::{Detection, Generation, NameService};
