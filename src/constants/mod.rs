pub mod instructions;
pub mod prompts;
