pub mod file_processor;
pub mod json_extract;
pub mod model_service;
pub mod tool_service;
pub mod upstream;
