pub mod constants;
pub mod prompts;
pub mod types;
