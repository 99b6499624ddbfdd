pub mod ollama_service;
pub mod tgi_service;
